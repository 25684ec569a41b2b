use chrono::Utc;
use contracts::domain::a008_reservation::aggregate::{Reservation, ReservationDto};
use contracts::domain::common::AggregateRoot;
use contracts::enums::ReservationStatus;
use contracts::shared::period::DateRange;
use uuid::Uuid;

use super::repository;
use crate::domain::a002_client;
use crate::domain::common::parse_dto_id;
use crate::shared::data::db::get_connection;
use crate::shared::error::DomainError;

pub async fn create(dto: ReservationDto) -> anyhow::Result<Uuid> {
    let mut aggregate = Reservation::new_for_insert(
        dto.boutique_id.clone(),
        dto.modele_id.clone(),
        dto.client_id.clone(),
        dto.date_reservation.unwrap_or_else(Utc::now),
        dto.quantite,
        dto.montant,
    );
    aggregate.update(&dto);

    aggregate.validate().map_err(DomainError::validation)?;
    ensure_client_exists(&aggregate.client_id).await?;
    aggregate.before_write();

    repository::insert(get_connection(), &aggregate).await
}

pub async fn update(dto: ReservationDto) -> anyhow::Result<Uuid> {
    let id = parse_dto_id(dto.id.as_ref())?;
    let db = get_connection();

    let mut aggregate = repository::get_by_id(db, id)
        .await?
        .ok_or_else(|| DomainError::not_found(Reservation::element_name()))?;

    aggregate.update(&dto);
    aggregate.validate().map_err(DomainError::validation)?;
    ensure_client_exists(&aggregate.client_id).await?;
    aggregate.before_write();

    repository::update(db, &aggregate).await?;
    Ok(id)
}

async fn ensure_client_exists(client_id: &str) -> anyhow::Result<()> {
    let id = Uuid::parse_str(client_id)
        .map_err(|_| DomainError::validation(format!("Invalid client id: {}", client_id)))?;
    if a002_client::repository::get_by_id(get_connection(), id)
        .await?
        .is_none()
    {
        return Err(DomainError::not_found("Client"));
    }
    Ok(())
}

/// Move a reservation to `statut`. Cancelled reservations stay cancelled.
pub async fn set_status(id: Uuid, statut: ReservationStatus) -> anyhow::Result<()> {
    let db = get_connection();
    let mut aggregate = repository::get_by_id(db, id)
        .await?
        .filter(|r| !r.base.metadata.is_deleted)
        .ok_or_else(|| DomainError::not_found(Reservation::element_name()))?;

    if aggregate.statut == ReservationStatus::Annulee && statut != ReservationStatus::Annulee {
        return Err(DomainError::validation(
            "A cancelled reservation cannot be reopened",
        ));
    }

    aggregate.statut = statut;
    aggregate.before_write();
    repository::update(db, &aggregate).await?;

    tracing::info!("Reservation {} is now {}", aggregate.base.code, statut.code());
    Ok(())
}

pub async fn delete(id: Uuid) -> anyhow::Result<bool> {
    repository::soft_delete(get_connection(), id).await
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Reservation>> {
    repository::get_by_id(get_connection(), id).await
}

pub async fn list_all() -> anyhow::Result<Vec<Reservation>> {
    repository::list_all(get_connection()).await
}

pub async fn list_in_range(
    range: DateRange,
    boutique_id: Option<&str>,
) -> anyhow::Result<Vec<Reservation>> {
    repository::list_in_range(get_connection(), &range, boutique_id).await
}
