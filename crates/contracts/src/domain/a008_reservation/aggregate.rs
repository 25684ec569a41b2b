use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::define_aggregate_id;
use crate::domain::common::{AggregateRoot, BaseAggregate, EntityMetadata};
use crate::enums::ReservationStatus;

define_aggregate_id!(
    /// Reservation identifier
    ReservationId
);

/// Reservation of a model by a client (the reservation sales channel)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    #[serde(flatten)]
    pub base: BaseAggregate<ReservationId>,

    #[serde(rename = "boutiqueId")]
    pub boutique_id: String,
    #[serde(rename = "modeleId")]
    pub modele_id: String,
    #[serde(rename = "clientId")]
    pub client_id: String,

    #[serde(rename = "dateReservation")]
    pub date_reservation: DateTime<Utc>,
    pub quantite: i32,
    /// Total amount of the reservation
    pub montant: f64,
    pub statut: ReservationStatus,
}

impl Reservation {
    pub fn new_for_insert(
        boutique_id: String,
        modele_id: String,
        client_id: String,
        date_reservation: DateTime<Utc>,
        quantite: i32,
        montant: f64,
    ) -> Self {
        let id = ReservationId::new_v4();
        let code = format!(
            "RES-{}-{}",
            date_reservation.format("%Y%m%d"),
            &id.value().simple().to_string()[..8]
        );
        let description = format!("Réservation {} x {}", quantite, modele_id);
        Self {
            base: BaseAggregate::new(id, code, description),
            boutique_id,
            modele_id,
            client_id,
            date_reservation,
            quantite,
            montant,
            statut: ReservationStatus::EnAttente,
        }
    }

    pub fn update(&mut self, dto: &ReservationDto) {
        self.boutique_id = dto.boutique_id.clone();
        self.modele_id = dto.modele_id.clone();
        self.client_id = dto.client_id.clone();
        if let Some(date) = dto.date_reservation {
            self.date_reservation = date;
        }
        self.quantite = dto.quantite;
        self.montant = dto.montant;
        if let Some(statut) = dto.statut {
            self.statut = statut;
        }
        self.base.comment = dto.comment.clone();
    }

    /// Counted as a sale by the statistics
    pub fn is_sale(&self) -> bool {
        self.statut == ReservationStatus::Confirmee
    }

    pub fn validate(&self) -> Result<(), String> {
        self.base.validate_base()?;
        if self.boutique_id.trim().is_empty()
            || self.modele_id.trim().is_empty()
            || self.client_id.trim().is_empty()
        {
            return Err("Boutique, model and client references are required".into());
        }
        if self.quantite <= 0 {
            return Err("Quantity must be positive".into());
        }
        if !self.montant.is_finite() || self.montant < 0.0 {
            return Err("Amount must be a non-negative number".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for Reservation {
    type Id = ReservationId;

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
        "a008"
    }

    fn collection_name() -> &'static str {
        "reservation"
    }

    fn element_name() -> &'static str {
        "Réservation"
    }

    fn list_name() -> &'static str {
        "Réservations"
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ReservationDto {
    pub id: Option<String>,
    #[serde(rename = "boutiqueId")]
    pub boutique_id: String,
    #[serde(rename = "modeleId")]
    pub modele_id: String,
    #[serde(rename = "clientId")]
    pub client_id: String,
    #[serde(rename = "dateReservation")]
    pub date_reservation: Option<DateTime<Utc>>,
    pub quantite: i32,
    pub montant: f64,
    pub statut: Option<ReservationStatus>,
    pub comment: Option<String>,
}

/// Body of POST /api/reservation/:id/status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationStatusDto {
    pub statut: ReservationStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_confirmed_reservations_are_sales() {
        let mut r =
            Reservation::new_for_insert("b".into(), "m".into(), "c".into(), Utc::now(), 2, 40.0);
        assert!(!r.is_sale());
        r.statut = ReservationStatus::Confirmee;
        assert!(r.is_sale());
        r.statut = ReservationStatus::Annulee;
        assert!(!r.is_sale());
    }

    #[test]
    fn test_client_is_required() {
        let r = Reservation::new_for_insert("b".into(), "m".into(), "".into(), Utc::now(), 2, 40.0);
        assert!(r.validate().is_err());
    }
}
