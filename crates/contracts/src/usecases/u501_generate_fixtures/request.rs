use serde::{Deserialize, Serialize};

pub const DEFAULT_QUANTITE_MAX: i32 = 50;

/// Body of POST /api/u501/generate_fixtures. Every field is optional.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GenerateFixturesRequest {
    /// Target boutiques; all non-deleted boutiques when absent
    pub boutique_ids: Option<Vec<String>>,
    /// Target models; all active models when absent
    pub modele_ids: Option<Vec<String>>,
    pub prix_min: Option<f64>,
    pub prix_max: Option<f64>,
    pub quantite_max: Option<i32>,
}

impl GenerateFixturesRequest {
    pub fn validate(&self) -> Result<(), String> {
        match (self.prix_min, self.prix_max) {
            (Some(min), Some(max)) => {
                if !min.is_finite() || !max.is_finite() || min < 0.0 {
                    return Err("Price bounds must be non-negative numbers".into());
                }
                if min > max {
                    return Err("prixMin must not exceed prixMax".into());
                }
            }
            (None, None) => {}
            _ => return Err("prixMin and prixMax must be given together".into()),
        }
        if self.quantite_max.is_some_and(|q| q < 0) {
            return Err("quantiteMax must not be negative".into());
        }
        Ok(())
    }

    pub fn quantite_max(&self) -> i32 {
        self.quantite_max.unwrap_or(DEFAULT_QUANTITE_MAX)
    }
}
