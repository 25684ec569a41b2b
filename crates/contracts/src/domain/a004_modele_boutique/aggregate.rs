use serde::{Deserialize, Serialize};

use crate::define_aggregate_id;
use crate::domain::common::{AggregateRoot, BaseAggregate, EntityMetadata};

define_aggregate_id!(
    /// Identifier of a model stocked at a boutique
    ModeleBoutiqueId
);

/// A model stocked at a boutique with a local price and quantity.
/// The pair (modele_id, boutique_id) is unique.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModeleBoutique {
    #[serde(flatten)]
    pub base: BaseAggregate<ModeleBoutiqueId>,

    #[serde(rename = "modeleId")]
    pub modele_id: String,
    #[serde(rename = "boutiqueId")]
    pub boutique_id: String,

    pub prix: f64,
    pub quantite: i32,
}

impl ModeleBoutique {
    pub fn new_for_insert(modele_id: String, boutique_id: String, prix: f64, quantite: i32) -> Self {
        let id = ModeleBoutiqueId::new_v4();
        let code = format!("MB-{}", &id.value().simple().to_string()[..8]);
        let description = format!("{} @ {}", modele_id, boutique_id);
        Self {
            base: BaseAggregate::new(id, code, description),
            modele_id,
            boutique_id,
            prix,
            quantite,
        }
    }

    pub fn update(&mut self, dto: &ModeleBoutiqueDto) {
        self.modele_id = dto.modele_id.clone();
        self.boutique_id = dto.boutique_id.clone();
        self.prix = dto.prix;
        self.quantite = dto.quantite;
        self.base.comment = dto.comment.clone();
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.modele_id.trim().is_empty() {
            return Err("Model reference must not be empty".into());
        }
        if self.boutique_id.trim().is_empty() {
            return Err("Boutique reference must not be empty".into());
        }
        if !self.prix.is_finite() || self.prix < 0.0 {
            return Err("Price must be a non-negative number".into());
        }
        if self.quantite < 0 {
            return Err("Quantity must not be negative".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for ModeleBoutique {
    type Id = ModeleBoutiqueId;

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
        "a004"
    }

    fn collection_name() -> &'static str {
        "modele_boutique"
    }

    fn element_name() -> &'static str {
        "Modèle en boutique"
    }

    fn list_name() -> &'static str {
        "Modèles en boutique"
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ModeleBoutiqueDto {
    pub id: Option<String>,
    #[serde(rename = "modeleId")]
    pub modele_id: String,
    #[serde(rename = "boutiqueId")]
    pub boutique_id: String,
    #[serde(default)]
    pub prix: f64,
    #[serde(default)]
    pub quantite: i32,
    pub comment: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_code_and_validation() {
        let mb = ModeleBoutique::new_for_insert("m".into(), "b".into(), 12.5, 3);
        assert!(mb.base.code.starts_with("MB-"));
        assert_eq!(mb.base.code.len(), 11);
        assert!(mb.validate().is_ok());
    }

    #[test]
    fn test_negative_quantity_is_rejected() {
        let mb = ModeleBoutique::new_for_insert("m".into(), "b".into(), 12.5, -1);
        assert!(mb.validate().is_err());
    }

    #[test]
    fn test_empty_references_are_rejected() {
        let mb = ModeleBoutique::new_for_insert(" ".into(), "b".into(), 1.0, 0);
        assert!(mb.validate().is_err());
        let mb = ModeleBoutique::new_for_insert("m".into(), "".into(), 1.0, 0);
        assert!(mb.validate().is_err());
    }
}
