use axum::{
    extract::{Path, Query},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use contracts::domain::a005_facture::aggregate::{Facture, FactureDto, FactureListParams};
use contracts::domain::a006_paiement::aggregate::Paiement;

use super::common::{parse_id, upsert_result};
use crate::domain::{a005_facture, a006_paiement};
use crate::shared::error::to_status;

/// GET /api/facture?clientId=&boutiqueId=&statut=&dateDebut=&dateFin=
pub async fn list(Query(params): Query<FactureListParams>) -> Result<Json<Vec<Facture>>, StatusCode> {
    a005_facture::service::list_filtered(params)
        .await
        .map(Json)
        .map_err(|e| to_status("Failed to list invoices", e))
}

/// GET /api/facture/export (same filters, CSV body)
pub async fn export_csv(
    Query(params): Query<FactureListParams>,
) -> Result<impl IntoResponse, StatusCode> {
    let body = a005_facture::service::export_csv(params)
        .await
        .map_err(|e| to_status("Failed to export invoices", e))?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"factures.csv\"",
            ),
        ],
        body,
    ))
}

/// GET /api/facture/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<Facture>, StatusCode> {
    let uuid = parse_id(&id)?;
    match a005_facture::service::get_by_id(uuid).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => Err(to_status("Failed to load invoice", e)),
    }
}

/// POST /api/facture
pub async fn upsert(Json(dto): Json<FactureDto>) -> Result<Json<serde_json::Value>, StatusCode> {
    let result = if dto.id.is_some() {
        a005_facture::service::update(dto).await
    } else {
        a005_facture::service::create(dto).await
    };
    upsert_result("Failed to save invoice", result)
}

/// DELETE /api/facture/:id
pub async fn delete(Path(id): Path<String>) -> Result<(), StatusCode> {
    let uuid = parse_id(&id)?;
    match a005_facture::service::delete(uuid).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(StatusCode::NOT_FOUND),
        Err(e) => Err(to_status("Failed to delete invoice", e)),
    }
}

/// POST /api/facture/:id/cancel
pub async fn cancel(Path(id): Path<String>) -> Result<(), StatusCode> {
    let uuid = parse_id(&id)?;
    a005_facture::service::cancel(uuid)
        .await
        .map_err(|e| to_status("Failed to cancel invoice", e))
}

/// GET /api/facture/:id/paiements
pub async fn list_paiements(Path(id): Path<String>) -> Result<Json<Vec<Paiement>>, StatusCode> {
    let uuid = parse_id(&id)?;
    a006_paiement::service::list_by_facture(uuid)
        .await
        .map(Json)
        .map_err(|e| to_status("Failed to list invoice payments", e))
}
