use axum::{extract::Path, http::StatusCode, Json};
use contracts::domain::a007_vente::aggregate::{Vente, VenteDto};

use super::common::{parse_id, upsert_result};
use crate::domain::a007_vente;
use crate::shared::error::to_status;

/// GET /api/vente
pub async fn list_all() -> Result<Json<Vec<Vente>>, StatusCode> {
    a007_vente::service::list_all()
        .await
        .map(Json)
        .map_err(|e| to_status("Failed to list sales", e))
}

/// GET /api/vente/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<Vente>, StatusCode> {
    let uuid = parse_id(&id)?;
    match a007_vente::service::get_by_id(uuid).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => Err(to_status("Failed to load sale", e)),
    }
}

/// POST /api/vente
pub async fn upsert(Json(dto): Json<VenteDto>) -> Result<Json<serde_json::Value>, StatusCode> {
    let result = if dto.id.is_some() {
        a007_vente::service::update(dto).await
    } else {
        a007_vente::service::create(dto).await
    };
    upsert_result("Failed to save sale", result)
}

/// DELETE /api/vente/:id
pub async fn delete(Path(id): Path<String>) -> Result<(), StatusCode> {
    let uuid = parse_id(&id)?;
    match a007_vente::service::delete(uuid).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(StatusCode::NOT_FOUND),
        Err(e) => Err(to_status("Failed to delete sale", e)),
    }
}
