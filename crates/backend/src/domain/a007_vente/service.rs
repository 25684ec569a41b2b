use chrono::Utc;
use contracts::domain::a007_vente::aggregate::{Vente, VenteDto};
use contracts::domain::common::AggregateRoot;
use contracts::shared::period::DateRange;
use uuid::Uuid;

use super::repository;
use crate::domain::a003_modele;
use crate::domain::common::parse_dto_id;
use crate::shared::data::db::get_connection;
use crate::shared::error::DomainError;

pub async fn create(dto: VenteDto) -> anyhow::Result<Uuid> {
    let mut aggregate = Vente::new_for_insert(
        dto.boutique_id.clone(),
        dto.modele_id.clone(),
        dto.client_id.clone(),
        dto.date_vente.unwrap_or_else(Utc::now),
        dto.quantite,
        dto.prix_unitaire,
    );
    aggregate.base.comment = dto.comment.clone();

    aggregate.validate().map_err(DomainError::validation)?;
    ensure_modele_exists(&aggregate.modele_id).await?;
    aggregate.before_write();

    repository::insert(get_connection(), &aggregate).await
}

pub async fn update(dto: VenteDto) -> anyhow::Result<Uuid> {
    let id = parse_dto_id(dto.id.as_ref())?;
    let db = get_connection();

    let mut aggregate = repository::get_by_id(db, id)
        .await?
        .ok_or_else(|| DomainError::not_found(Vente::element_name()))?;

    aggregate.update(&dto);
    aggregate.validate().map_err(DomainError::validation)?;
    ensure_modele_exists(&aggregate.modele_id).await?;
    aggregate.before_write();

    repository::update(db, &aggregate).await?;
    Ok(id)
}

async fn ensure_modele_exists(modele_id: &str) -> anyhow::Result<()> {
    let id = Uuid::parse_str(modele_id)
        .map_err(|_| DomainError::validation(format!("Invalid model id: {}", modele_id)))?;
    if a003_modele::repository::get_by_id(get_connection(), id)
        .await?
        .is_none()
    {
        return Err(DomainError::not_found("Modele"));
    }
    Ok(())
}

pub async fn delete(id: Uuid) -> anyhow::Result<bool> {
    repository::soft_delete(get_connection(), id).await
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Vente>> {
    repository::get_by_id(get_connection(), id).await
}

pub async fn list_all() -> anyhow::Result<Vec<Vente>> {
    repository::list_all(get_connection()).await
}

pub async fn list_in_range(range: DateRange, boutique_id: Option<&str>) -> anyhow::Result<Vec<Vente>> {
    repository::list_in_range(get_connection(), &range, boutique_id).await
}
