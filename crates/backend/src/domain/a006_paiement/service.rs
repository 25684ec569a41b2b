use chrono::Utc;
use contracts::domain::a005_facture::aggregate::Facture;
use contracts::domain::a006_paiement::aggregate::{Paiement, PaiementDto};
use contracts::domain::common::AggregateRoot;
use sea_orm::TransactionTrait;
use uuid::Uuid;

use super::repository;
use crate::domain::a005_facture;
use crate::shared::data::db::get_connection;
use crate::shared::error::DomainError;
use crate::shared::format::format_amount;

/// Record a payment and settle it on its invoice
pub async fn register(dto: PaiementDto) -> anyhow::Result<Uuid> {
    register_in(get_connection(), dto).await
}

/// Payment insert and invoice update share one transaction; any failure
/// leaves both untouched.
pub async fn register_in<C: TransactionTrait>(db: &C, dto: PaiementDto) -> anyhow::Result<Uuid> {
    let facture_id = Uuid::parse_str(&dto.facture_id)
        .map_err(|_| DomainError::validation(format!("Invalid invoice id: {}", dto.facture_id)))?;

    let mut paiement = Paiement::new_for_insert(
        dto.facture_id.clone(),
        dto.date_paiement.unwrap_or_else(Utc::now),
        dto.montant,
        dto.mode,
        dto.comment,
    );
    paiement.validate().map_err(DomainError::validation)?;
    paiement.before_write();

    let txn = db.begin().await?;
    let settled = async {
        let mut facture = a005_facture::repository::get_by_id(&txn, facture_id)
            .await?
            .filter(|f| !f.base.metadata.is_deleted)
            .ok_or_else(|| DomainError::not_found(Facture::element_name()))?;

        facture
            .apply_payment(paiement.montant)
            .map_err(DomainError::validation)?;
        facture.before_write();

        repository::insert(&txn, &paiement).await?;
        a005_facture::repository::update(&txn, &facture).await?;
        anyhow::Ok(facture)
    }
    .await;

    let facture = match settled {
        Ok(facture) => {
            txn.commit().await?;
            facture
        }
        Err(e) => {
            txn.rollback().await?;
            return Err(e);
        }
    };
    let id = paiement.base.id.value();

    tracing::info!(
        "Paiement {} of {} registered on facture {} (now {})",
        paiement.base.code,
        format_amount(paiement.montant),
        facture.base.code,
        facture.statut
    );
    Ok(id)
}

/// Remove a payment and give its amount back to the invoice
pub async fn delete(id: Uuid) -> anyhow::Result<bool> {
    delete_in(get_connection(), id).await
}

pub async fn delete_in<C: TransactionTrait>(db: &C, id: Uuid) -> anyhow::Result<bool> {
    let txn = db.begin().await?;

    let Some(paiement) = repository::get_by_id(&txn, id)
        .await?
        .filter(|p| !p.base.metadata.is_deleted)
    else {
        txn.rollback().await?;
        return Ok(false);
    };

    if let Ok(facture_id) = Uuid::parse_str(&paiement.facture_id) {
        if let Some(mut facture) = a005_facture::repository::get_by_id(&txn, facture_id).await? {
            facture.revert_payment(paiement.montant);
            facture.before_write();
            a005_facture::repository::update(&txn, &facture).await?;
        }
    }

    let deleted = repository::soft_delete(&txn, id).await?;
    txn.commit().await?;
    Ok(deleted)
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Paiement>> {
    repository::get_by_id(get_connection(), id).await
}

pub async fn list_all() -> anyhow::Result<Vec<Paiement>> {
    repository::list_all(get_connection()).await
}

pub async fn list_by_facture(facture_id: Uuid) -> anyhow::Result<Vec<Paiement>> {
    repository::list_by_facture(get_connection(), &facture_id.to_string()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::connect_in_memory;
    use crate::shared::error::status_for;
    use axum::http::StatusCode;
    use contracts::domain::a005_facture::aggregate::Facture;
    use contracts::enums::{FactureStatus, PaymentMode};

    async fn seed_facture(db: &sea_orm::DatabaseConnection, total: f64) -> Uuid {
        let f = Facture::new_for_insert("FAC-T".into(), "c1".into(), None, Utc::now(), total);
        a005_facture::repository::insert(db, &f).await.unwrap()
    }

    fn dto(facture_id: Uuid, montant: f64) -> PaiementDto {
        PaiementDto {
            facture_id: facture_id.to_string(),
            montant,
            mode: PaymentMode::Carte,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_register_updates_invoice() {
        let db = connect_in_memory().await;
        let facture_id = seed_facture(&db, 100.0).await;

        register_in(&db, dto(facture_id, 40.0)).await.unwrap();
        let f = a005_facture::repository::get_by_id(&db, facture_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(f.montant_paye, 40.0);
        assert_eq!(f.statut, FactureStatus::PartiellementPayee);

        register_in(&db, dto(facture_id, 60.0)).await.unwrap();
        let f = a005_facture::repository::get_by_id(&db, facture_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(f.statut, FactureStatus::Payee);

        let payments = repository::list_by_facture(&db, &facture_id.to_string())
            .await
            .unwrap();
        assert_eq!(payments.len(), 2);
        assert_eq!(payments[0].mode, PaymentMode::Carte);
    }

    #[tokio::test]
    async fn test_overpayment_is_rejected_without_side_effects() {
        let db = connect_in_memory().await;
        let facture_id = seed_facture(&db, 50.0).await;

        let err = register_in(&db, dto(facture_id, 80.0)).await.unwrap_err();
        assert_eq!(status_for(&err), StatusCode::BAD_REQUEST);

        let f = a005_facture::repository::get_by_id(&db, facture_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(f.montant_paye, 0.0);
        assert!(repository::list_by_facture(&db, &facture_id.to_string())
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_unknown_invoice_is_not_found() {
        let db = connect_in_memory().await;
        let err = register_in(&db, dto(Uuid::new_v4(), 10.0)).await.unwrap_err();
        assert_eq!(status_for(&err), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_reverts_amount() {
        let db = connect_in_memory().await;
        let facture_id = seed_facture(&db, 100.0).await;
        let paiement_id = register_in(&db, dto(facture_id, 100.0)).await.unwrap();

        assert!(delete_in(&db, paiement_id).await.unwrap());
        let f = a005_facture::repository::get_by_id(&db, facture_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(f.montant_paye, 0.0);
        assert_eq!(f.statut, FactureStatus::Emise);

        assert!(!delete_in(&db, paiement_id).await.unwrap());
    }
}
