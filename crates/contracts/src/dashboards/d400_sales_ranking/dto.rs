use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::sales::AggregatedSale;

/// Response of GET /api/d400/top_models
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopModelsResponse {
    pub date_debut: DateTime<Utc>,
    pub date_fin: DateTime<Utc>,
    pub boutique_id: Option<String>,
    /// Effective limit after defaults and capping
    pub limit: usize,
    /// Models ranked by quantity then revenue, both descending
    pub items: Vec<AggregatedSale>,
}
