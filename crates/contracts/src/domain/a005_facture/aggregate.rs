use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::define_aggregate_id;
use crate::domain::common::{AggregateRoot, BaseAggregate, EntityMetadata};
use crate::enums::FactureStatus;

/// Tolerance used when comparing monetary amounts stored as f64
pub const AMOUNT_EPSILON: f64 = 0.005;

define_aggregate_id!(
    /// Invoice identifier
    FactureId
);

/// Invoice tying a client to an amount owed and the amount already paid.
/// The status follows the paid amount, except for drafts and cancelled
/// invoices.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Facture {
    #[serde(flatten)]
    pub base: BaseAggregate<FactureId>,

    #[serde(rename = "clientId")]
    pub client_id: String,
    #[serde(rename = "boutiqueId")]
    pub boutique_id: Option<String>,

    #[serde(rename = "dateFacture")]
    pub date_facture: DateTime<Utc>,
    #[serde(rename = "dateEcheance")]
    pub date_echeance: Option<NaiveDate>,

    #[serde(rename = "montantTotal")]
    pub montant_total: f64,
    #[serde(rename = "montantPaye")]
    pub montant_paye: f64,

    pub statut: FactureStatus,
}

impl Facture {
    pub fn new_for_insert(
        code: String,
        client_id: String,
        boutique_id: Option<String>,
        date_facture: DateTime<Utc>,
        montant_total: f64,
    ) -> Self {
        let description = format!("Facture {}", code);
        Self {
            base: BaseAggregate::new(FactureId::new_v4(), code, description),
            client_id,
            boutique_id,
            date_facture,
            date_echeance: None,
            montant_total,
            montant_paye: 0.0,
            statut: FactureStatus::Emise,
        }
    }

    /// Invoice number derived from the issue date, e.g. "FAC-20250610-1a2b3c4d"
    pub fn generate_code(date: DateTime<Utc>) -> String {
        let suffix = uuid::Uuid::new_v4().simple().to_string();
        format!("FAC-{}-{}", date.format("%Y%m%d"), &suffix[..8])
    }

    pub fn update(&mut self, dto: &FactureDto) {
        if let Some(code) = dto.code.as_ref().filter(|c| !c.trim().is_empty()) {
            self.base.code = code.clone();
        }
        if let Some(description) = dto.description.as_ref().filter(|d| !d.trim().is_empty()) {
            self.base.description = description.clone();
        }
        self.base.comment = dto.comment.clone();
        self.client_id = dto.client_id.clone();
        self.boutique_id = dto.boutique_id.clone();
        if let Some(date) = dto.date_facture {
            self.date_facture = date;
        }
        self.date_echeance = dto.date_echeance;
        self.montant_total = dto.montant_total;
        if dto.brouillon {
            self.statut = FactureStatus::Brouillon;
        } else if self.statut == FactureStatus::Brouillon {
            self.statut = FactureStatus::Emise;
        }
        self.refresh_status();
    }

    pub fn reste_a_payer(&self) -> f64 {
        (self.montant_total - self.montant_paye).max(0.0)
    }

    /// Recompute the status from the amounts. Drafts and cancelled invoices
    /// keep their status.
    pub fn refresh_status(&mut self) {
        if self.statut.is_sticky() {
            return;
        }
        self.statut = if self.montant_paye <= AMOUNT_EPSILON {
            FactureStatus::Emise
        } else if self.montant_paye + AMOUNT_EPSILON < self.montant_total {
            FactureStatus::PartiellementPayee
        } else {
            FactureStatus::Payee
        };
    }

    /// Record a payment. Fails when the invoice cannot receive it.
    pub fn apply_payment(&mut self, montant: f64) -> Result<(), String> {
        match self.statut {
            FactureStatus::Annulee => return Err("Cannot pay a cancelled invoice".into()),
            FactureStatus::Brouillon => return Err("Cannot pay a draft invoice".into()),
            _ => {}
        }
        if !montant.is_finite() || montant <= 0.0 {
            return Err("Payment amount must be positive".into());
        }
        if montant > self.reste_a_payer() + AMOUNT_EPSILON {
            return Err(format!(
                "Payment of {:.2} exceeds the remaining {:.2}",
                montant,
                self.reste_a_payer()
            ));
        }
        self.montant_paye += montant;
        self.refresh_status();
        Ok(())
    }

    /// Undo a previously recorded payment
    pub fn revert_payment(&mut self, montant: f64) {
        self.montant_paye = (self.montant_paye - montant).max(0.0);
        self.refresh_status();
    }

    pub fn cancel(&mut self) -> Result<(), String> {
        if self.montant_paye > AMOUNT_EPSILON {
            return Err("Cannot cancel an invoice with recorded payments".into());
        }
        self.statut = FactureStatus::Annulee;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), String> {
        self.base.validate_base()?;
        if self.client_id.trim().is_empty() {
            return Err("Client reference must not be empty".into());
        }
        if !self.montant_total.is_finite() || self.montant_total < 0.0 {
            return Err("Total amount must be a non-negative number".into());
        }
        if self.montant_paye < 0.0 || self.montant_paye > self.montant_total + AMOUNT_EPSILON {
            return Err("Paid amount must lie between 0 and the total amount".into());
        }
        if self.statut == FactureStatus::Brouillon && self.montant_paye > AMOUNT_EPSILON {
            return Err("An invoice with recorded payments cannot go back to draft".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for Facture {
    type Id = FactureId;

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
        "a005"
    }

    fn collection_name() -> &'static str {
        "facture"
    }

    fn element_name() -> &'static str {
        "Facture"
    }

    fn list_name() -> &'static str {
        "Factures"
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FactureDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "clientId")]
    pub client_id: String,
    #[serde(rename = "boutiqueId")]
    pub boutique_id: Option<String>,
    #[serde(rename = "dateFacture")]
    pub date_facture: Option<DateTime<Utc>>,
    #[serde(rename = "dateEcheance")]
    pub date_echeance: Option<NaiveDate>,
    #[serde(rename = "montantTotal", default)]
    pub montant_total: f64,
    /// Keep the invoice as a draft
    #[serde(default)]
    pub brouillon: bool,
    pub comment: Option<String>,
}

/// Query parameters of GET /api/facture
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FactureListParams {
    pub client_id: Option<String>,
    pub boutique_id: Option<String>,
    pub statut: Option<String>,
    pub date_debut: Option<String>,
    pub date_fin: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn facture(total: f64) -> Facture {
        Facture::new_for_insert("FAC-1".into(), "client".into(), None, Utc::now(), total)
    }

    #[test]
    fn test_status_follows_payments() {
        let mut f = facture(100.0);
        assert_eq!(f.statut, FactureStatus::Emise);

        f.apply_payment(40.0).unwrap();
        assert_eq!(f.statut, FactureStatus::PartiellementPayee);
        assert!((f.reste_a_payer() - 60.0).abs() < 1e-9);

        f.apply_payment(60.0).unwrap();
        assert_eq!(f.statut, FactureStatus::Payee);

        f.revert_payment(60.0);
        assert_eq!(f.statut, FactureStatus::PartiellementPayee);
    }

    #[test]
    fn test_overpayment_is_rejected() {
        let mut f = facture(50.0);
        assert!(f.apply_payment(50.01).is_err());
        assert!(f.apply_payment(0.0).is_err());
        assert_eq!(f.montant_paye, 0.0);
    }

    #[test]
    fn test_cancelled_invoice_keeps_status_and_refuses_payments() {
        let mut f = facture(50.0);
        f.cancel().unwrap();
        f.refresh_status();
        assert_eq!(f.statut, FactureStatus::Annulee);
        assert!(f.apply_payment(10.0).is_err());
    }

    #[test]
    fn test_paid_invoice_cannot_be_cancelled() {
        let mut f = facture(50.0);
        f.apply_payment(10.0).unwrap();
        assert!(f.cancel().is_err());
    }

    #[test]
    fn test_draft_flag_round_trip() {
        let mut f = facture(50.0);
        let mut dto = FactureDto {
            client_id: "client".into(),
            montant_total: 80.0,
            brouillon: true,
            ..Default::default()
        };
        f.update(&dto);
        assert_eq!(f.statut, FactureStatus::Brouillon);

        dto.brouillon = false;
        f.update(&dto);
        assert_eq!(f.statut, FactureStatus::Emise);
        assert_eq!(f.montant_total, 80.0);
    }

    #[test]
    fn test_paid_invoice_cannot_become_draft() {
        let mut f = facture(100.0);
        f.apply_payment(100.0).unwrap();
        assert_eq!(f.statut, FactureStatus::Payee);

        f.update(&FactureDto {
            client_id: "client".into(),
            montant_total: 100.0,
            brouillon: true,
            ..Default::default()
        });
        assert!(f.validate().is_err());
    }

    #[test]
    fn test_generated_code_contains_date() {
        let date = chrono::TimeZone::with_ymd_and_hms(&Utc, 2025, 6, 10, 8, 0, 0).unwrap();
        let code = Facture::generate_code(date);
        assert!(code.starts_with("FAC-20250610-"));
    }
}
