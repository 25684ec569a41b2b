use contracts::domain::a002_client::aggregate::{Client, ClientDto};
use contracts::domain::common::AggregateRoot;
use contracts::domain::a005_facture::aggregate::{Facture, FactureListParams};
use uuid::Uuid;

use super::repository;
use crate::domain::a005_facture;
use crate::domain::common::{parse_dto_id, short_code};
use crate::shared::data::db::get_connection;
use crate::shared::error::DomainError;

pub async fn create(dto: ClientDto) -> anyhow::Result<Uuid> {
    let code = dto
        .code
        .clone()
        .filter(|c| !c.trim().is_empty())
        .unwrap_or_else(|| short_code("CLI"));
    let mut aggregate = Client::new_for_insert(code, dto.description.clone());
    aggregate.update(&dto);

    aggregate.validate().map_err(DomainError::validation)?;
    aggregate.before_write();

    repository::insert(get_connection(), &aggregate).await
}

pub async fn update(dto: ClientDto) -> anyhow::Result<Uuid> {
    let id = parse_dto_id(dto.id.as_ref())?;
    let db = get_connection();

    let mut aggregate = repository::get_by_id(db, id)
        .await?
        .ok_or_else(|| DomainError::not_found(Client::element_name()))?;

    aggregate.update(&dto);
    aggregate.validate().map_err(DomainError::validation)?;
    aggregate.before_write();

    repository::update(db, &aggregate).await?;
    Ok(id)
}

pub async fn delete(id: Uuid) -> anyhow::Result<bool> {
    repository::soft_delete(get_connection(), id).await
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Client>> {
    repository::get_by_id(get_connection(), id).await
}

pub async fn list_all() -> anyhow::Result<Vec<Client>> {
    repository::list_all(get_connection()).await
}

/// Invoices of a client, newest first
pub async fn list_factures(client_id: Uuid) -> anyhow::Result<Vec<Facture>> {
    let db = get_connection();
    if repository::get_by_id(db, client_id).await?.is_none() {
        return Err(DomainError::not_found(Client::element_name()));
    }
    a005_facture::service::list_filtered(FactureListParams {
        client_id: Some(client_id.to_string()),
        ..Default::default()
    })
    .await
}
