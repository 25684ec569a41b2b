use contracts::domain::a004_modele_boutique::aggregate::{ModeleBoutique, ModeleBoutiqueDto};
use contracts::domain::common::AggregateRoot;
use uuid::Uuid;

use super::repository;
use crate::domain::common::parse_dto_id;
use crate::domain::{a001_boutique, a003_modele};
use crate::shared::data::db::get_connection;
use crate::shared::error::DomainError;

pub async fn create(dto: ModeleBoutiqueDto) -> anyhow::Result<Uuid> {
    let mut aggregate = ModeleBoutique::new_for_insert(
        dto.modele_id.clone(),
        dto.boutique_id.clone(),
        dto.prix,
        dto.quantite,
    );
    aggregate.base.comment = dto.comment.clone();

    aggregate.validate().map_err(DomainError::validation)?;
    ensure_references(&aggregate).await?;
    ensure_pair_is_free(&aggregate).await?;
    aggregate.before_write();

    repository::insert(get_connection(), &aggregate).await
}

pub async fn update(dto: ModeleBoutiqueDto) -> anyhow::Result<Uuid> {
    let id = parse_dto_id(dto.id.as_ref())?;
    let db = get_connection();

    let mut aggregate = repository::get_by_id(db, id)
        .await?
        .ok_or_else(|| DomainError::not_found(ModeleBoutique::element_name()))?;

    aggregate.update(&dto);
    aggregate.validate().map_err(DomainError::validation)?;
    ensure_references(&aggregate).await?;
    ensure_pair_is_free(&aggregate).await?;
    aggregate.before_write();

    repository::update(db, &aggregate).await?;
    Ok(id)
}

async fn ensure_references(aggregate: &ModeleBoutique) -> anyhow::Result<()> {
    let modele_id = Uuid::parse_str(&aggregate.modele_id)
        .map_err(|_| DomainError::validation("Invalid model id"))?;
    let boutique_id = Uuid::parse_str(&aggregate.boutique_id)
        .map_err(|_| DomainError::validation("Invalid boutique id"))?;

    let db = get_connection();
    if a003_modele::repository::get_by_id(db, modele_id).await?.is_none() {
        return Err(DomainError::not_found("Modele"));
    }
    if a001_boutique::repository::get_by_id(db, boutique_id).await?.is_none() {
        return Err(DomainError::not_found("Boutique"));
    }
    Ok(())
}

async fn ensure_pair_is_free(aggregate: &ModeleBoutique) -> anyhow::Result<()> {
    let existing = repository::find_pair(
        get_connection(),
        &aggregate.modele_id,
        &aggregate.boutique_id,
    )
    .await?;
    match existing {
        Some(other) if other.base.id != aggregate.base.id => Err(DomainError::validation(
            "This model is already stocked in this boutique",
        )),
        _ => Ok(()),
    }
}

pub async fn delete(id: Uuid) -> anyhow::Result<bool> {
    repository::soft_delete(get_connection(), id).await
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<ModeleBoutique>> {
    repository::get_by_id(get_connection(), id).await
}

pub async fn list_all() -> anyhow::Result<Vec<ModeleBoutique>> {
    repository::list_all(get_connection()).await
}

pub async fn list_by_boutique(boutique_id: Uuid) -> anyhow::Result<Vec<ModeleBoutique>> {
    repository::list_by_boutique(get_connection(), &boutique_id.to_string()).await
}

pub async fn find_pair(modele_id: Uuid, boutique_id: Uuid) -> anyhow::Result<Option<ModeleBoutique>> {
    repository::find_pair(
        get_connection(),
        &modele_id.to_string(),
        &boutique_id.to_string(),
    )
    .await
}
