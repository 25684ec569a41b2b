use axum::{extract::Path, http::StatusCode, Json};
use contracts::domain::a004_modele_boutique::aggregate::{ModeleBoutique, ModeleBoutiqueDto};

use super::common::{parse_id, upsert_result};
use crate::domain::a004_modele_boutique;
use crate::shared::error::to_status;

/// GET /api/modele_boutique
pub async fn list_all() -> Result<Json<Vec<ModeleBoutique>>, StatusCode> {
    a004_modele_boutique::service::list_all()
        .await
        .map(Json)
        .map_err(|e| to_status("Failed to list stock", e))
}

/// GET /api/modele_boutique/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<ModeleBoutique>, StatusCode> {
    let uuid = parse_id(&id)?;
    match a004_modele_boutique::service::get_by_id(uuid).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => Err(to_status("Failed to load stock row", e)),
    }
}

/// POST /api/modele_boutique
pub async fn upsert(
    Json(dto): Json<ModeleBoutiqueDto>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let result = if dto.id.is_some() {
        a004_modele_boutique::service::update(dto).await
    } else {
        a004_modele_boutique::service::create(dto).await
    };
    upsert_result("Failed to save stock row", result)
}

/// DELETE /api/modele_boutique/:id
pub async fn delete(Path(id): Path<String>) -> Result<(), StatusCode> {
    let uuid = parse_id(&id)?;
    match a004_modele_boutique::service::delete(uuid).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(StatusCode::NOT_FOUND),
        Err(e) => Err(to_status("Failed to delete stock row", e)),
    }
}
