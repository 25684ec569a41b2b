use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::define_aggregate_id;
use crate::domain::common::{AggregateRoot, BaseAggregate, EntityMetadata};
use crate::enums::PaymentMode;

define_aggregate_id!(
    /// Payment identifier
    PaiementId
);

/// Payment received against an invoice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paiement {
    #[serde(flatten)]
    pub base: BaseAggregate<PaiementId>,

    #[serde(rename = "factureId")]
    pub facture_id: String,
    #[serde(rename = "datePaiement")]
    pub date_paiement: DateTime<Utc>,
    pub montant: f64,
    pub mode: PaymentMode,
}

impl Paiement {
    pub fn new_for_insert(
        facture_id: String,
        date_paiement: DateTime<Utc>,
        montant: f64,
        mode: PaymentMode,
        comment: Option<String>,
    ) -> Self {
        let id = PaiementId::new_v4();
        let code = format!(
            "PAY-{}-{}",
            date_paiement.format("%Y%m%d"),
            &id.value().simple().to_string()[..8]
        );
        let description = format!("Paiement {} ({})", montant, mode.display_name());
        let mut base = BaseAggregate::new(id, code, description);
        base.comment = comment;
        Self {
            base,
            facture_id,
            date_paiement,
            montant,
            mode,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        self.base.validate_base()?;
        if self.facture_id.trim().is_empty() {
            return Err("Invoice reference must not be empty".into());
        }
        if !self.montant.is_finite() || self.montant <= 0.0 {
            return Err("Payment amount must be positive".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for Paiement {
    type Id = PaiementId;

    fn id(&self) -> Self::Id {
        self.base.id
    }

    fn code(&self) -> &str {
        &self.base.code
    }

    fn description(&self) -> &str {
        &self.base.description
    }

    fn metadata(&self) -> &EntityMetadata {
        &self.base.metadata
    }

    fn metadata_mut(&mut self) -> &mut EntityMetadata {
        &mut self.base.metadata
    }

    fn aggregate_index() -> &'static str {
        "a006"
    }

    fn collection_name() -> &'static str {
        "paiement"
    }

    fn element_name() -> &'static str {
        "Paiement"
    }

    fn list_name() -> &'static str {
        "Paiements"
    }
}

/// Payments are immutable once registered: the DTO only creates them
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PaiementDto {
    #[serde(rename = "factureId")]
    pub facture_id: String,
    #[serde(rename = "datePaiement")]
    pub date_paiement: Option<DateTime<Utc>>,
    pub montant: f64,
    #[serde(default)]
    pub mode: PaymentMode,
    pub comment: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_must_be_positive() {
        let p = Paiement::new_for_insert("f".into(), Utc::now(), 0.0, PaymentMode::Carte, None);
        assert!(p.validate().is_err());
        let p = Paiement::new_for_insert("f".into(), Utc::now(), 12.0, PaymentMode::Carte, None);
        assert!(p.validate().is_ok());
        assert!(p.base.code.starts_with("PAY-"));
    }

    #[test]
    fn test_dto_defaults_to_cash() {
        let dto: PaiementDto =
            serde_json::from_str(r#"{"factureId":"f","montant":5.0}"#).unwrap();
        assert_eq!(dto.mode, PaymentMode::Especes);
        assert!(dto.date_paiement.is_none());
    }
}
