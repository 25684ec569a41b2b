use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::define_aggregate_id;
use crate::domain::common::{AggregateRoot, BaseAggregate, EntityMetadata};

define_aggregate_id!(
    /// Direct sale identifier
    VenteId
);

/// Direct sale of a model in a boutique (the direct-sale channel)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vente {
    #[serde(flatten)]
    pub base: BaseAggregate<VenteId>,

    #[serde(rename = "boutiqueId")]
    pub boutique_id: String,
    #[serde(rename = "modeleId")]
    pub modele_id: String,
    #[serde(rename = "clientId")]
    pub client_id: Option<String>,

    #[serde(rename = "dateVente")]
    pub date_vente: DateTime<Utc>,
    pub quantite: i32,
    #[serde(rename = "prixUnitaire")]
    pub prix_unitaire: f64,
}

impl Vente {
    pub fn new_for_insert(
        boutique_id: String,
        modele_id: String,
        client_id: Option<String>,
        date_vente: DateTime<Utc>,
        quantite: i32,
        prix_unitaire: f64,
    ) -> Self {
        let id = VenteId::new_v4();
        let code = format!(
            "VTE-{}-{}",
            date_vente.format("%Y%m%d"),
            &id.value().simple().to_string()[..8]
        );
        let description = format!("Vente {} x {}", quantite, modele_id);
        Self {
            base: BaseAggregate::new(id, code, description),
            boutique_id,
            modele_id,
            client_id,
            date_vente,
            quantite,
            prix_unitaire,
        }
    }

    pub fn update(&mut self, dto: &VenteDto) {
        self.boutique_id = dto.boutique_id.clone();
        self.modele_id = dto.modele_id.clone();
        self.client_id = dto.client_id.clone();
        if let Some(date) = dto.date_vente {
            self.date_vente = date;
        }
        self.quantite = dto.quantite;
        self.prix_unitaire = dto.prix_unitaire;
        self.base.comment = dto.comment.clone();
    }

    /// Revenue of the sale line
    pub fn montant(&self) -> f64 {
        self.quantite as f64 * self.prix_unitaire
    }

    pub fn validate(&self) -> Result<(), String> {
        self.base.validate_base()?;
        if self.boutique_id.trim().is_empty() || self.modele_id.trim().is_empty() {
            return Err("Boutique and model references are required".into());
        }
        if self.quantite <= 0 {
            return Err("Quantity must be positive".into());
        }
        if !self.prix_unitaire.is_finite() || self.prix_unitaire < 0.0 {
            return Err("Unit price must be a non-negative number".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for Vente {
    type Id = VenteId;

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
        "a007"
    }

    fn collection_name() -> &'static str {
        "vente"
    }

    fn element_name() -> &'static str {
        "Vente"
    }

    fn list_name() -> &'static str {
        "Ventes"
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct VenteDto {
    pub id: Option<String>,
    #[serde(rename = "boutiqueId")]
    pub boutique_id: String,
    #[serde(rename = "modeleId")]
    pub modele_id: String,
    #[serde(rename = "clientId")]
    pub client_id: Option<String>,
    #[serde(rename = "dateVente")]
    pub date_vente: Option<DateTime<Utc>>,
    pub quantite: i32,
    #[serde(rename = "prixUnitaire")]
    pub prix_unitaire: f64,
    pub comment: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_montant_and_validation() {
        let v = Vente::new_for_insert("b".into(), "m".into(), None, Utc::now(), 3, 19.5);
        assert!((v.montant() - 58.5).abs() < 1e-9);
        assert!(v.validate().is_ok());

        let v = Vente::new_for_insert("b".into(), "m".into(), None, Utc::now(), 0, 19.5);
        assert!(v.validate().is_err());
    }
}
