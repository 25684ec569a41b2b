use chrono::Utc;
use contracts::domain::a005_facture::aggregate::{
    Facture, FactureDto, FactureListParams, AMOUNT_EPSILON,
};
use contracts::domain::common::AggregateRoot;
use contracts::enums::FactureStatus;
use serde::Serialize;
use uuid::Uuid;

use super::repository::{self, FactureFilter};
use crate::domain::a002_client;
use crate::domain::common::parse_dto_id;
use crate::shared::data::db::get_connection;
use crate::shared::error::DomainError;
use crate::shared::period::{parse_optional_end, parse_optional_start};

pub async fn create(dto: FactureDto) -> anyhow::Result<Uuid> {
    let date_facture = dto.date_facture.unwrap_or_else(Utc::now);
    let code = dto
        .code
        .clone()
        .filter(|c| !c.trim().is_empty())
        .unwrap_or_else(|| Facture::generate_code(date_facture));
    let mut aggregate = Facture::new_for_insert(
        code,
        dto.client_id.clone(),
        dto.boutique_id.clone(),
        date_facture,
        dto.montant_total,
    );
    aggregate.update(&dto);

    aggregate.validate().map_err(DomainError::validation)?;
    ensure_client_exists(&aggregate.client_id).await?;
    aggregate.before_write();

    let id = repository::insert(get_connection(), &aggregate).await?;
    tracing::info!(
        "Facture {} created for client {} ({:.2})",
        aggregate.base.code,
        aggregate.client_id,
        aggregate.montant_total
    );
    Ok(id)
}

pub async fn update(dto: FactureDto) -> anyhow::Result<Uuid> {
    let id = parse_dto_id(dto.id.as_ref())?;
    let db = get_connection();

    let mut aggregate = repository::get_by_id(db, id)
        .await?
        .ok_or_else(|| DomainError::not_found(Facture::element_name()))?;
    if aggregate.statut == FactureStatus::Annulee {
        return Err(DomainError::validation("A cancelled invoice cannot be modified"));
    }

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
    match a002_client::repository::get_by_id(get_connection(), id).await? {
        Some(c) if !c.base.metadata.is_deleted => Ok(()),
        _ => Err(DomainError::not_found("Client")),
    }
}

pub async fn cancel(id: Uuid) -> anyhow::Result<()> {
    let db = get_connection();
    let mut aggregate = repository::get_by_id(db, id)
        .await?
        .ok_or_else(|| DomainError::not_found(Facture::element_name()))?;

    aggregate.cancel().map_err(DomainError::validation)?;
    aggregate.before_write();
    repository::update(db, &aggregate).await?;

    tracing::info!("Facture {} cancelled", aggregate.base.code);
    Ok(())
}

/// Soft delete; invoices carrying payments must have them removed first
pub async fn delete(id: Uuid) -> anyhow::Result<bool> {
    let db = get_connection();
    let Some(aggregate) = repository::get_by_id(db, id).await? else {
        return Ok(false);
    };
    if aggregate.montant_paye > AMOUNT_EPSILON {
        return Err(DomainError::validation(
            "Cannot delete an invoice with recorded payments",
        ));
    }
    repository::soft_delete(db, id).await
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Facture>> {
    repository::get_by_id(get_connection(), id).await
}

pub async fn list_all() -> anyhow::Result<Vec<Facture>> {
    repository::list_all(get_connection()).await
}

pub async fn list_filtered(params: FactureListParams) -> anyhow::Result<Vec<Facture>> {
    let filter = filter_from_params(&params)?;
    repository::list_filtered(get_connection(), &filter).await
}

fn filter_from_params(params: &FactureListParams) -> anyhow::Result<FactureFilter> {
    let non_blank = |v: &Option<String>| v.clone().filter(|s| !s.trim().is_empty());

    let statut = match non_blank(&params.statut) {
        Some(code) => Some(
            FactureStatus::from_code(code.trim())
                .ok_or_else(|| DomainError::validation(format!("Unknown status: {}", code)))?,
        ),
        None => None,
    };

    Ok(FactureFilter {
        client_id: non_blank(&params.client_id),
        boutique_id: non_blank(&params.boutique_id),
        statut,
        from: parse_optional_start(&params.date_debut)?,
        to: parse_optional_end(&params.date_fin)?,
    })
}

#[derive(Debug, Serialize)]
struct FactureCsvRow<'a> {
    code: &'a str,
    date_facture: String,
    date_echeance: String,
    client_id: &'a str,
    boutique_id: &'a str,
    statut: &'a str,
    montant_total: String,
    montant_paye: String,
    reste_a_payer: String,
}

/// Filtered invoice list rendered as CSV (header row included)
pub async fn export_csv(params: FactureListParams) -> anyhow::Result<String> {
    let factures = list_filtered(params).await?;
    render_csv(&factures)
}

fn render_csv(factures: &[Facture]) -> anyhow::Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for f in factures {
        writer.serialize(FactureCsvRow {
            code: &f.base.code,
            date_facture: f.date_facture.format("%Y-%m-%d %H:%M:%S").to_string(),
            date_echeance: f
                .date_echeance
                .map(|d| d.to_string())
                .unwrap_or_default(),
            client_id: &f.client_id,
            boutique_id: f.boutique_id.as_deref().unwrap_or(""),
            statut: f.statut.code(),
            montant_total: format!("{:.2}", f.montant_total),
            montant_paye: format!("{:.2}", f.montant_paye),
            reste_a_payer: format!("{:.2}", f.reste_a_payer()),
        })?;
    }
    let bytes = writer.into_inner().map_err(|e| anyhow::anyhow!("{}", e))?;
    Ok(String::from_utf8(bytes)?)
}
