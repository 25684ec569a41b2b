//! Row <-> aggregate helpers shared by the repositories

use chrono::{DateTime, Utc};
use contracts::domain::common::EntityMetadata;
use uuid::Uuid;

use crate::shared::error::DomainError;

/// Metadata rebuilt from the lifecycle columns every table carries
pub fn metadata_from_row(
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
    is_deleted: bool,
    is_posted: bool,
    version: i32,
) -> EntityMetadata {
    EntityMetadata {
        created_at: created_at.unwrap_or_else(Utc::now),
        updated_at: updated_at.unwrap_or_else(Utc::now),
        is_deleted,
        is_posted,
        version,
    }
}

/// Row ids are always written from UUIDs; a corrupt one yields a fresh id
pub fn uuid_from_row(id: &str) -> Uuid {
    Uuid::parse_str(id).unwrap_or_else(|_| Uuid::new_v4())
}

/// Id of an update DTO
pub fn parse_dto_id(id: Option<&String>) -> anyhow::Result<Uuid> {
    id.and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| DomainError::validation("Invalid ID"))
}

/// Short random suffix for generated business codes
pub fn short_code(prefix: &str) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{}-{}", prefix, &suffix[..8].to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_code_shape() {
        let code = short_code("BTQ");
        assert!(code.starts_with("BTQ-"));
        assert_eq!(code.len(), 12);
    }

    #[test]
    fn test_parse_dto_id() {
        assert!(parse_dto_id(None).is_err());
        assert!(parse_dto_id(Some(&"nope".to_string())).is_err());
        let id = Uuid::new_v4();
        assert_eq!(parse_dto_id(Some(&id.to_string())).unwrap(), id);
    }
}
