use crate::define_aggregate_id;
use crate::domain::common::{AggregateRoot, BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};

// ============================================================================
// ID Type
// ============================================================================

define_aggregate_id!(
    /// Boutique identifier
    BoutiqueId
);

// ============================================================================
// Aggregate Root
// ============================================================================

/// Retail outlet. A succursale (branch) is a boutique attached to a parent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boutique {
    #[serde(flatten)]
    pub base: BaseAggregate<BoutiqueId>,

    pub adresse: String,
    pub telephone: Option<String>,

    #[serde(rename = "isSuccursale")]
    pub is_succursale: bool,

    #[serde(rename = "parentId")]
    pub parent_id: Option<String>,
}

impl Boutique {
    pub fn new_for_insert(
        code: String,
        description: String,
        adresse: String,
        telephone: Option<String>,
        is_succursale: bool,
        parent_id: Option<String>,
        comment: Option<String>,
    ) -> Self {
        let mut base = BaseAggregate::new(BoutiqueId::new_v4(), code, description);
        base.comment = comment;

        Self {
            base,
            adresse,
            telephone,
            is_succursale,
            parent_id,
        }
    }

    pub fn update(&mut self, dto: &BoutiqueDto) {
        if let Some(code) = dto.code.as_ref().filter(|c| !c.trim().is_empty()) {
            self.base.code = code.clone();
        }
        self.base.description = dto.description.clone();
        self.base.comment = dto.comment.clone();
        self.adresse = dto.adresse.clone().unwrap_or_default();
        self.telephone = dto.telephone.clone();
        self.is_succursale = dto.is_succursale;
        self.parent_id = dto.parent_id.clone();
    }

    pub fn validate(&self) -> Result<(), String> {
        self.base.validate_base()?;

        let parent = self
            .parent_id
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty());

        if self.is_succursale && parent.is_none() {
            return Err("A succursale must reference its parent boutique".into());
        }
        if parent == Some(self.base.id.value().to_string().as_str()) {
            return Err("A boutique cannot be its own parent".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for Boutique {
    type Id = BoutiqueId;

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
        "a001"
    }

    fn collection_name() -> &'static str {
        "boutique"
    }

    fn element_name() -> &'static str {
        "Boutique"
    }

    fn list_name() -> &'static str {
        "Boutiques"
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BoutiqueDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub description: String,
    pub adresse: Option<String>,
    pub telephone: Option<String>,
    #[serde(rename = "isSuccursale", default)]
    pub is_succursale: bool,
    #[serde(rename = "parentId")]
    pub parent_id: Option<String>,
    pub comment: Option<String>,
}
