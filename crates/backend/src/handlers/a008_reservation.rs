use axum::{extract::Path, http::StatusCode, Json};
use contracts::domain::a008_reservation::aggregate::{
    Reservation, ReservationDto, ReservationStatusDto,
};

use super::common::{parse_id, upsert_result};
use crate::domain::a008_reservation;
use crate::shared::error::to_status;

/// GET /api/reservation
pub async fn list_all() -> Result<Json<Vec<Reservation>>, StatusCode> {
    a008_reservation::service::list_all()
        .await
        .map(Json)
        .map_err(|e| to_status("Failed to list reservations", e))
}

/// GET /api/reservation/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<Reservation>, StatusCode> {
    let uuid = parse_id(&id)?;
    match a008_reservation::service::get_by_id(uuid).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => Err(to_status("Failed to load reservation", e)),
    }
}

/// POST /api/reservation
pub async fn upsert(
    Json(dto): Json<ReservationDto>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let result = if dto.id.is_some() {
        a008_reservation::service::update(dto).await
    } else {
        a008_reservation::service::create(dto).await
    };
    upsert_result("Failed to save reservation", result)
}

/// DELETE /api/reservation/:id
pub async fn delete(Path(id): Path<String>) -> Result<(), StatusCode> {
    let uuid = parse_id(&id)?;
    match a008_reservation::service::delete(uuid).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(StatusCode::NOT_FOUND),
        Err(e) => Err(to_status("Failed to delete reservation", e)),
    }
}

/// POST /api/reservation/:id/status
pub async fn set_status(
    Path(id): Path<String>,
    Json(dto): Json<ReservationStatusDto>,
) -> Result<(), StatusCode> {
    let uuid = parse_id(&id)?;
    a008_reservation::service::set_status(uuid, dto.statut)
        .await
        .map_err(|e| to_status("Failed to change reservation status", e))
}
