use contracts::domain::a003_modele::aggregate::{Modele, ModeleDto};
use contracts::domain::common::AggregateRoot;
use uuid::Uuid;

use super::repository;
use crate::domain::common::{parse_dto_id, short_code};
use crate::shared::data::db::get_connection;
use crate::shared::error::DomainError;

pub async fn create(dto: ModeleDto) -> anyhow::Result<Uuid> {
    let code = dto
        .code
        .clone()
        .filter(|c| !c.trim().is_empty())
        .unwrap_or_else(|| short_code("MOD"));
    let mut aggregate = Modele::new_for_insert(
        code,
        dto.description.clone(),
        dto.reference.clone().unwrap_or_default(),
        dto.prix_base,
        dto.comment.clone(),
    );
    aggregate.is_active = dto.is_active.unwrap_or(true);

    aggregate.validate().map_err(DomainError::validation)?;
    aggregate.before_write();

    repository::insert(get_connection(), &aggregate).await
}

pub async fn update(dto: ModeleDto) -> anyhow::Result<Uuid> {
    let id = parse_dto_id(dto.id.as_ref())?;
    let db = get_connection();

    let mut aggregate = repository::get_by_id(db, id)
        .await?
        .ok_or_else(|| DomainError::not_found(Modele::element_name()))?;

    aggregate.update(&dto);
    aggregate.validate().map_err(DomainError::validation)?;
    aggregate.before_write();

    repository::update(db, &aggregate).await?;
    Ok(id)
}

pub async fn delete(id: Uuid) -> anyhow::Result<bool> {
    repository::soft_delete(get_connection(), id).await
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Modele>> {
    repository::get_by_id(get_connection(), id).await
}

pub async fn list_all() -> anyhow::Result<Vec<Modele>> {
    repository::list_all(get_connection()).await
}

pub async fn list_active() -> anyhow::Result<Vec<Modele>> {
    repository::list_active(get_connection()).await
}

pub async fn insert_test_data() -> anyhow::Result<()> {
    let samples = [
        ("MOD-001", "Robe d'été lin", "RL-2025-01", 89.90),
        ("MOD-002", "Veste en jean", "VJ-2025-02", 120.00),
        ("MOD-003", "Chemise popeline", "CP-2025-03", 59.50),
        ("MOD-004", "Pull cachemire", "PC-2025-04", 185.00),
    ];

    for (code, description, reference, prix_base) in samples {
        create(ModeleDto {
            code: Some(code.into()),
            description: description.into(),
            reference: Some(reference.into()),
            prix_base,
            ..Default::default()
        })
        .await?;
    }

    tracing::info!("Inserted {} test models", samples.len());
    Ok(())
}
