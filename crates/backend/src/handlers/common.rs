use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use crate::shared::error::to_status;

/// Path id as UUID; anything else is a bad request
pub fn parse_id(id: &str) -> Result<Uuid, StatusCode> {
    Uuid::parse_str(id).map_err(|_| StatusCode::BAD_REQUEST)
}

/// Body of an upsert: the id of the created or updated record
pub fn upsert_result(
    context: &str,
    result: anyhow::Result<Uuid>,
) -> Result<axum::Json<serde_json::Value>, StatusCode> {
    match result {
        Ok(id) => Ok(axum::Json(json!({ "id": id.to_string() }))),
        Err(e) => Err(to_status(context, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("nope"), Err(StatusCode::BAD_REQUEST));
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string()), Ok(id));
    }

    #[test]
    fn test_upsert_result_body() {
        let id = Uuid::new_v4();
        let body = upsert_result("test", Ok(id)).unwrap();
        assert_eq!(body.0["id"], id.to_string());
    }
}
