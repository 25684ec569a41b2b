use super::EntityMetadata;
use serde::{Deserialize, Serialize};

/// Fields shared by every aggregate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaseAggregate<Id> {
    pub id: Id,
    /// Business code (e.g. "BTQ-001", "FAC-2025-0001")
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub metadata: EntityMetadata,
}

impl<Id> BaseAggregate<Id> {
    pub fn new(id: Id, code: String, description: String) -> Self {
        Self {
            id,
            code,
            description,
            comment: None,
            metadata: EntityMetadata::new(),
        }
    }

    /// Rebuild an aggregate loaded from the database
    pub fn with_metadata(
        id: Id,
        code: String,
        description: String,
        comment: Option<String>,
        metadata: EntityMetadata,
    ) -> Self {
        Self {
            id,
            code,
            description,
            comment,
            metadata,
        }
    }

    pub fn touch(&mut self) {
        self.metadata.touch();
    }

    /// Common checks applied by every aggregate's `validate`
    pub fn validate_base(&self) -> Result<(), String> {
        if self.description.trim().is_empty() {
            return Err("Description must not be empty".into());
        }
        if self.code.trim().is_empty() {
            return Err("Code must not be empty".into());
        }
        Ok(())
    }
}
