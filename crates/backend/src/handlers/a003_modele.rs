use axum::{extract::Path, http::StatusCode, Json};
use contracts::domain::a003_modele::aggregate::{Modele, ModeleDto};

use super::common::{parse_id, upsert_result};
use crate::domain::a003_modele;
use crate::shared::error::to_status;

/// GET /api/modele
pub async fn list_all() -> Result<Json<Vec<Modele>>, StatusCode> {
    a003_modele::service::list_all()
        .await
        .map(Json)
        .map_err(|e| to_status("Failed to list models", e))
}

/// GET /api/modele/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<Modele>, StatusCode> {
    let uuid = parse_id(&id)?;
    match a003_modele::service::get_by_id(uuid).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => Err(to_status("Failed to load model", e)),
    }
}

/// POST /api/modele
pub async fn upsert(Json(dto): Json<ModeleDto>) -> Result<Json<serde_json::Value>, StatusCode> {
    let result = if dto.id.is_some() {
        a003_modele::service::update(dto).await
    } else {
        a003_modele::service::create(dto).await
    };
    upsert_result("Failed to save model", result)
}

/// DELETE /api/modele/:id
pub async fn delete(Path(id): Path<String>) -> Result<(), StatusCode> {
    let uuid = parse_id(&id)?;
    match a003_modele::service::delete(uuid).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(StatusCode::NOT_FOUND),
        Err(e) => Err(to_status("Failed to delete model", e)),
    }
}

/// POST /api/modele/testdata
pub async fn insert_test_data() -> Result<(), StatusCode> {
    a003_modele::service::insert_test_data()
        .await
        .map_err(|e| to_status("Failed to insert model test data", e))
}
