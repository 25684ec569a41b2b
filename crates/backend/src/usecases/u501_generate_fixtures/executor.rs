use std::time::Instant;

use anyhow::Result;
use contracts::domain::a004_modele_boutique::aggregate::ModeleBoutique;
use contracts::usecases::common::{UseCaseError, UseCaseMetadata};
use contracts::usecases::u501_generate_fixtures::{
    GenerateFixtures, GenerateFixturesRequest, GenerateFixturesResponse,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sea_orm::{ConnectionTrait, DatabaseTransaction, TransactionTrait};
use uuid::Uuid;

use crate::domain::{a001_boutique, a003_modele, a004_modele_boutique};
use crate::shared::error::DomainError;

enum PairOutcome {
    Created,
    Skipped,
}

/// Stocks models in boutiques with random prices and quantities
pub struct GenerateFixturesExecutor<R> {
    rng: R,
}

impl GenerateFixturesExecutor<StdRng> {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl Default for GenerateFixturesExecutor<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng + Send> GenerateFixturesExecutor<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Runs in one transaction. Each pair gets its own savepoint, so a
    /// failing pair is rolled back and reported without stopping the run.
    pub async fn execute<C>(
        &mut self,
        db: &C,
        request: GenerateFixturesRequest,
    ) -> Result<GenerateFixturesResponse>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        request.validate().map_err(DomainError::validation)?;
        let started = Instant::now();

        let boutique_ids = match &request.boutique_ids {
            Some(ids) => ids.clone(),
            None => a001_boutique::repository::list_all(db)
                .await?
                .iter()
                .map(|b| b.base.id.value().to_string())
                .collect(),
        };
        let modele_ids = match &request.modele_ids {
            Some(ids) => ids.clone(),
            None => a003_modele::repository::list_active(db)
                .await?
                .iter()
                .map(|m| m.base.id.value().to_string())
                .collect(),
        };

        tracing::info!(
            "{}: {} boutique(s) x {} model(s)",
            GenerateFixtures::full_name(),
            boutique_ids.len(),
            modele_ids.len()
        );

        let mut response = GenerateFixturesResponse::default();
        let txn = db.begin().await?;

        for boutique_id in &boutique_ids {
            for modele_id in &modele_ids {
                let savepoint = txn.begin().await?;
                match self
                    .write_pair(&savepoint, &request, boutique_id, modele_id)
                    .await
                {
                    Ok(outcome) => {
                        savepoint.commit().await?;
                        match outcome {
                            PairOutcome::Created => response.created += 1,
                            PairOutcome::Skipped => response.skipped += 1,
                        }
                    }
                    Err(e) => {
                        savepoint.rollback().await?;
                        tracing::warn!(
                            "{}: pair boutique={} modele={} failed: {}",
                            GenerateFixtures::full_name(),
                            boutique_id,
                            modele_id,
                            e
                        );
                        response.errors.push(
                            to_usecase_error(&e)
                                .with_details(format!("boutique={} modele={}", boutique_id, modele_id)),
                        );
                    }
                }
            }
        }

        txn.commit().await?;
        response.elapsed_ms = started.elapsed().as_millis();

        tracing::info!(
            "{} done: {} created, {} skipped, {} error(s) in {} ms",
            GenerateFixtures::full_name(),
            response.created,
            response.skipped,
            response.errors.len(),
            response.elapsed_ms
        );
        Ok(response)
    }

    async fn write_pair(
        &mut self,
        txn: &DatabaseTransaction,
        request: &GenerateFixturesRequest,
        boutique_id: &str,
        modele_id: &str,
    ) -> Result<PairOutcome> {
        let boutique_uuid = Uuid::parse_str(boutique_id)
            .map_err(|_| DomainError::validation(format!("Invalid boutique id: {}", boutique_id)))?;
        let modele_uuid = Uuid::parse_str(modele_id)
            .map_err(|_| DomainError::validation(format!("Invalid model id: {}", modele_id)))?;

        a001_boutique::repository::get_by_id(txn, boutique_uuid)
            .await?
            .filter(|b| !b.base.metadata.is_deleted)
            .ok_or_else(|| DomainError::not_found(format!("Boutique {}", boutique_id)))?;
        let modele = a003_modele::repository::get_by_id(txn, modele_uuid)
            .await?
            .filter(|m| !m.base.metadata.is_deleted)
            .ok_or_else(|| DomainError::not_found(format!("Modele {}", modele_id)))?;

        if a004_modele_boutique::repository::find_pair(txn, modele_id, boutique_id)
            .await?
            .is_some()
        {
            return Ok(PairOutcome::Skipped);
        }

        let prix = self.pick_price(request, modele.prix_base);
        let quantite = self.rng.gen_range(0..=request.quantite_max());

        let mut stock =
            ModeleBoutique::new_for_insert(modele_id.to_string(), boutique_id.to_string(), prix, quantite);
        stock.validate().map_err(DomainError::validation)?;
        stock.before_write();
        a004_modele_boutique::repository::insert(txn, &stock).await?;

        Ok(PairOutcome::Created)
    }

    fn pick_price(&mut self, request: &GenerateFixturesRequest, prix_base: f64) -> f64 {
        let raw = match (request.prix_min, request.prix_max) {
            (Some(min), Some(max)) => self.rng.gen_range(min..=max),
            _ => prix_base * self.rng.gen_range(0.9..=1.2),
        };
        round_cents(raw)
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn to_usecase_error(error: &anyhow::Error) -> UseCaseError {
    match error.downcast_ref::<DomainError>() {
        Some(DomainError::Validation(msg)) => UseCaseError::validation(msg.clone()),
        Some(DomainError::NotFound(what)) => UseCaseError::not_found(format!("{} not found", what)),
        None => UseCaseError::internal(format!("{:#}", error)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::connect_in_memory;
    use contracts::domain::a001_boutique::aggregate::Boutique;
    use contracts::domain::a003_modele::aggregate::Modele;
    use sea_orm::DatabaseConnection;

    async fn seed(db: &DatabaseConnection) -> (Vec<String>, Vec<String>) {
        let mut boutiques = Vec::new();
        for code in ["B1", "B2"] {
            let b = Boutique::new_for_insert(code.into(), code.into(), String::new(), None, false, None, None);
            boutiques.push(a001_boutique::repository::insert(db, &b).await.unwrap().to_string());
        }
        let mut modeles = Vec::new();
        for (code, prix) in [("M1", 100.0), ("M2", 40.0)] {
            let m = Modele::new_for_insert(code.into(), code.into(), String::new(), prix, None);
            modeles.push(a003_modele::repository::insert(db, &m).await.unwrap().to_string());
        }
        (boutiques, modeles)
    }

    fn executor() -> GenerateFixturesExecutor<StdRng> {
        GenerateFixturesExecutor::with_rng(StdRng::seed_from_u64(7))
    }

    #[tokio::test]
    async fn test_defaults_cover_every_pair_then_skip() {
        let db = connect_in_memory().await;
        let (boutiques, _) = seed(&db).await;

        let first = executor()
            .execute(&db, GenerateFixturesRequest::default())
            .await
            .unwrap();
        assert_eq!(first.created, 4);
        assert_eq!(first.skipped, 0);
        assert!(first.errors.is_empty());

        let second = executor()
            .execute(&db, GenerateFixturesRequest::default())
            .await
            .unwrap();
        assert_eq!(second.created, 0);
        assert_eq!(second.skipped, 4);

        let stock = a004_modele_boutique::repository::list_by_boutique(&db, &boutiques[0])
            .await
            .unwrap();
        assert_eq!(stock.len(), 2);
        for row in stock {
            assert!(row.quantite >= 0 && row.quantite <= 50);
            // prix_base is 100 or 40; default price is within [0.9, 1.2] of it
            assert!((36.0..=48.0).contains(&row.prix) || (90.0..=120.0).contains(&row.prix));
            assert_eq!(row.prix, round_cents(row.prix));
        }
    }

    #[tokio::test]
    async fn test_failing_pair_is_recorded_and_run_continues() {
        let db = connect_in_memory().await;
        let (boutiques, modeles) = seed(&db).await;

        let request = GenerateFixturesRequest {
            boutique_ids: Some(vec![boutiques[0].clone(), Uuid::new_v4().to_string()]),
            modele_ids: Some(modeles.clone()),
            prix_min: Some(10.0),
            prix_max: Some(20.0),
            quantite_max: Some(3),
        };
        let response = executor().execute(&db, request).await.unwrap();

        assert_eq!(response.created, 2);
        assert_eq!(response.errors.len(), 2);
        assert_eq!(response.errors[0].code, "NOT_FOUND");
        assert!(response.errors[0]
            .details
            .as_deref()
            .unwrap()
            .contains(&modeles[0]));

        let stock = a004_modele_boutique::repository::list_all(&db).await.unwrap();
        assert_eq!(stock.len(), 2);
        for row in stock {
            assert!((10.0..=20.0).contains(&row.prix));
            assert!(row.quantite <= 3);
        }
    }

    #[tokio::test]
    async fn test_invalid_request_is_rejected() {
        let db = connect_in_memory().await;
        let request = GenerateFixturesRequest {
            prix_min: Some(5.0),
            ..Default::default()
        };
        assert!(executor().execute(&db, request).await.is_err());
    }

    #[test]
    fn test_round_cents() {
        assert_eq!(round_cents(12.345_6), 12.35);
        assert_eq!(round_cents(7.0), 7.0);
    }
}
