use axum::{extract::Path, http::StatusCode, Json};
use contracts::domain::a001_boutique::aggregate::{Boutique, BoutiqueDto};
use contracts::domain::a004_modele_boutique::aggregate::ModeleBoutique;

use super::common::{parse_id, upsert_result};
use crate::domain::{a001_boutique, a004_modele_boutique};
use crate::shared::error::to_status;

/// GET /api/boutique
pub async fn list_all() -> Result<Json<Vec<Boutique>>, StatusCode> {
    a001_boutique::service::list_all()
        .await
        .map(Json)
        .map_err(|e| to_status("Failed to list boutiques", e))
}

/// GET /api/boutique/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<Boutique>, StatusCode> {
    let uuid = parse_id(&id)?;
    match a001_boutique::service::get_by_id(uuid).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => Err(to_status("Failed to load boutique", e)),
    }
}

/// POST /api/boutique
pub async fn upsert(Json(dto): Json<BoutiqueDto>) -> Result<Json<serde_json::Value>, StatusCode> {
    let result = if dto.id.is_some() {
        a001_boutique::service::update(dto).await
    } else {
        a001_boutique::service::create(dto).await
    };
    upsert_result("Failed to save boutique", result)
}

/// DELETE /api/boutique/:id
pub async fn delete(Path(id): Path<String>) -> Result<(), StatusCode> {
    let uuid = parse_id(&id)?;
    match a001_boutique::service::delete(uuid).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(StatusCode::NOT_FOUND),
        Err(e) => Err(to_status("Failed to delete boutique", e)),
    }
}

/// GET /api/boutique/:id/succursales
pub async fn list_succursales(Path(id): Path<String>) -> Result<Json<Vec<Boutique>>, StatusCode> {
    let uuid = parse_id(&id)?;
    a001_boutique::service::list_succursales(uuid)
        .await
        .map(Json)
        .map_err(|e| to_status("Failed to list succursales", e))
}

/// GET /api/boutique/:id/modeles
pub async fn list_modeles(Path(id): Path<String>) -> Result<Json<Vec<ModeleBoutique>>, StatusCode> {
    let uuid = parse_id(&id)?;
    a004_modele_boutique::service::list_by_boutique(uuid)
        .await
        .map(Json)
        .map_err(|e| to_status("Failed to list boutique stock", e))
}

/// POST /api/boutique/testdata
pub async fn insert_test_data() -> Result<(), StatusCode> {
    a001_boutique::service::insert_test_data()
        .await
        .map_err(|e| to_status("Failed to insert boutique test data", e))
}
