use serde::{Deserialize, Serialize};

use crate::define_aggregate_id;
use crate::domain::common::{AggregateRoot, BaseAggregate, EntityMetadata};

define_aggregate_id!(
    /// Product model identifier
    ModeleId
);

/// Product model. Each boutique stocks it with its own price and quantity
/// (see `ModeleBoutique`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Modele {
    #[serde(flatten)]
    pub base: BaseAggregate<ModeleId>,

    /// Manufacturer reference
    pub reference: String,

    #[serde(rename = "prixBase")]
    pub prix_base: f64,

    #[serde(rename = "isActive")]
    pub is_active: bool,
}

impl Modele {
    pub fn new_for_insert(
        code: String,
        description: String,
        reference: String,
        prix_base: f64,
        comment: Option<String>,
    ) -> Self {
        let mut base = BaseAggregate::new(ModeleId::new_v4(), code, description);
        base.comment = comment;
        Self {
            base,
            reference,
            prix_base,
            is_active: true,
        }
    }

    pub fn update(&mut self, dto: &ModeleDto) {
        if let Some(code) = dto.code.as_ref().filter(|c| !c.trim().is_empty()) {
            self.base.code = code.clone();
        }
        self.base.description = dto.description.clone();
        self.base.comment = dto.comment.clone();
        self.reference = dto.reference.clone().unwrap_or_default();
        self.prix_base = dto.prix_base;
        self.is_active = dto.is_active.unwrap_or(true);
    }

    pub fn validate(&self) -> Result<(), String> {
        self.base.validate_base()?;
        if !self.prix_base.is_finite() || self.prix_base < 0.0 {
            return Err("Base price must be a non-negative number".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for Modele {
    type Id = ModeleId;

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
        "a003"
    }

    fn collection_name() -> &'static str {
        "modele"
    }

    fn element_name() -> &'static str {
        "Modèle"
    }

    fn list_name() -> &'static str {
        "Modèles"
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ModeleDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub description: String,
    pub reference: Option<String>,
    #[serde(rename = "prixBase", default)]
    pub prix_base: f64,
    #[serde(rename = "isActive")]
    pub is_active: Option<bool>,
    pub comment: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_or_nan_price_is_rejected() {
        let mut m = Modele::new_for_insert("MOD-1".into(), "Sac".into(), "R1".into(), 10.0, None);
        assert!(m.validate().is_ok());
        m.prix_base = -1.0;
        assert!(m.validate().is_err());
        m.prix_base = f64::NAN;
        assert!(m.validate().is_err());
    }

    #[test]
    fn test_update_defaults_to_active() {
        let mut m = Modele::new_for_insert("MOD-1".into(), "Sac".into(), "R1".into(), 10.0, None);
        m.is_active = false;
        m.update(&ModeleDto {
            description: "Sac cuir".into(),
            prix_base: 25.0,
            ..Default::default()
        });
        assert!(m.is_active);
        assert_eq!(m.prix_base, 25.0);
    }
}
