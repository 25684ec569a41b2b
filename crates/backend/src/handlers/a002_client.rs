use axum::{extract::Path, http::StatusCode, Json};
use contracts::domain::a002_client::aggregate::{Client, ClientDto};
use contracts::domain::a005_facture::aggregate::Facture;

use super::common::{parse_id, upsert_result};
use crate::domain::a002_client;
use crate::shared::error::to_status;

/// GET /api/client
pub async fn list_all() -> Result<Json<Vec<Client>>, StatusCode> {
    a002_client::service::list_all()
        .await
        .map(Json)
        .map_err(|e| to_status("Failed to list clients", e))
}

/// GET /api/client/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<Client>, StatusCode> {
    let uuid = parse_id(&id)?;
    match a002_client::service::get_by_id(uuid).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => Err(to_status("Failed to load client", e)),
    }
}

/// POST /api/client
pub async fn upsert(Json(dto): Json<ClientDto>) -> Result<Json<serde_json::Value>, StatusCode> {
    let result = if dto.id.is_some() {
        a002_client::service::update(dto).await
    } else {
        a002_client::service::create(dto).await
    };
    upsert_result("Failed to save client", result)
}

/// DELETE /api/client/:id
pub async fn delete(Path(id): Path<String>) -> Result<(), StatusCode> {
    let uuid = parse_id(&id)?;
    match a002_client::service::delete(uuid).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(StatusCode::NOT_FOUND),
        Err(e) => Err(to_status("Failed to delete client", e)),
    }
}

/// GET /api/client/:id/factures
pub async fn list_factures(Path(id): Path<String>) -> Result<Json<Vec<Facture>>, StatusCode> {
    let uuid = parse_id(&id)?;
    a002_client::service::list_factures(uuid)
        .await
        .map(Json)
        .map_err(|e| to_status("Failed to list client invoices", e))
}
