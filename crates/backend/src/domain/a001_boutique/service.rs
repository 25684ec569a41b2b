use contracts::domain::a001_boutique::aggregate::{Boutique, BoutiqueDto};
use contracts::domain::common::AggregateRoot;
use uuid::Uuid;

use super::repository;
use crate::domain::common::{parse_dto_id, short_code};
use crate::shared::data::db::get_connection;
use crate::shared::error::DomainError;

pub async fn create(dto: BoutiqueDto) -> anyhow::Result<Uuid> {
    let code = dto
        .code
        .clone()
        .filter(|c| !c.trim().is_empty())
        .unwrap_or_else(|| short_code("BTQ"));
    let mut aggregate = Boutique::new_for_insert(
        code,
        dto.description,
        dto.adresse.unwrap_or_default(),
        dto.telephone,
        dto.is_succursale,
        dto.parent_id,
        dto.comment,
    );

    aggregate.validate().map_err(DomainError::validation)?;
    ensure_parent_exists(&aggregate).await?;
    aggregate.before_write();

    repository::insert(get_connection(), &aggregate).await
}

pub async fn update(dto: BoutiqueDto) -> anyhow::Result<Uuid> {
    let id = parse_dto_id(dto.id.as_ref())?;
    let db = get_connection();

    let mut aggregate = repository::get_by_id(db, id)
        .await?
        .ok_or_else(|| DomainError::not_found(Boutique::element_name()))?;

    aggregate.update(&dto);
    aggregate.validate().map_err(DomainError::validation)?;
    ensure_parent_exists(&aggregate).await?;
    aggregate.before_write();

    repository::update(db, &aggregate).await?;
    Ok(id)
}

async fn ensure_parent_exists(aggregate: &Boutique) -> anyhow::Result<()> {
    let Some(parent) = aggregate.parent_id.as_deref().filter(|p| !p.trim().is_empty()) else {
        return Ok(());
    };
    let parent_id = Uuid::parse_str(parent)
        .map_err(|_| DomainError::validation(format!("Invalid parent id: {}", parent)))?;
    match repository::get_by_id(get_connection(), parent_id).await? {
        Some(p) if !p.base.metadata.is_deleted => Ok(()),
        _ => Err(DomainError::not_found("Parent boutique")),
    }
}

pub async fn delete(id: Uuid) -> anyhow::Result<bool> {
    repository::soft_delete(get_connection(), id).await
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Boutique>> {
    repository::get_by_id(get_connection(), id).await
}

pub async fn list_all() -> anyhow::Result<Vec<Boutique>> {
    repository::list_all(get_connection()).await
}

pub async fn list_succursales(parent_id: Uuid) -> anyhow::Result<Vec<Boutique>> {
    repository::list_succursales(get_connection(), parent_id).await
}

/// Seed a main boutique with one branch and a second independent boutique
pub async fn insert_test_data() -> anyhow::Result<()> {
    let centre_id = create(BoutiqueDto {
        code: Some("BTQ-001".into()),
        description: "Boutique Centre".into(),
        adresse: Some("12 rue de la République, Lyon".into()),
        telephone: Some("04 78 00 00 01".into()),
        comment: Some("Boutique principale".into()),
        ..Default::default()
    })
    .await?;

    create(BoutiqueDto {
        code: Some("BTQ-002".into()),
        description: "Succursale Part-Dieu".into(),
        adresse: Some("17 rue du Docteur Bouchut, Lyon".into()),
        is_succursale: true,
        parent_id: Some(centre_id.to_string()),
        ..Default::default()
    })
    .await?;

    create(BoutiqueDto {
        code: Some("BTQ-003".into()),
        description: "Boutique Vieux Port".into(),
        adresse: Some("5 quai du Port, Marseille".into()),
        ..Default::default()
    })
    .await?;

    tracing::info!("Boutique test data inserted");
    Ok(())
}
