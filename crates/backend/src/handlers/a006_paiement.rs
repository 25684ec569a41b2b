use axum::{extract::Path, http::StatusCode, Json};
use contracts::domain::a006_paiement::aggregate::{Paiement, PaiementDto};

use super::common::{parse_id, upsert_result};
use crate::domain::a006_paiement;
use crate::shared::error::to_status;

/// GET /api/paiement
pub async fn list_all() -> Result<Json<Vec<Paiement>>, StatusCode> {
    a006_paiement::service::list_all()
        .await
        .map(Json)
        .map_err(|e| to_status("Failed to list payments", e))
}

/// GET /api/paiement/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<Paiement>, StatusCode> {
    let uuid = parse_id(&id)?;
    match a006_paiement::service::get_by_id(uuid).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => Err(to_status("Failed to load payment", e)),
    }
}

/// POST /api/paiement (payments are only ever created)
pub async fn register(Json(dto): Json<PaiementDto>) -> Result<Json<serde_json::Value>, StatusCode> {
    upsert_result(
        "Failed to register payment",
        a006_paiement::service::register(dto).await,
    )
}

/// DELETE /api/paiement/:id
pub async fn delete(Path(id): Path<String>) -> Result<(), StatusCode> {
    let uuid = parse_id(&id)?;
    match a006_paiement::service::delete(uuid).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(StatusCode::NOT_FOUND),
        Err(e) => Err(to_status("Failed to delete payment", e)),
    }
}
