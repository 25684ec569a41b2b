use serde::{Deserialize, Serialize};

use crate::usecases::common::UseCaseError;

/// Outcome of a fixture generation run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateFixturesResponse {
    /// Pairs written
    pub created: usize,
    /// Pairs already present
    pub skipped: usize,
    /// Pairs that failed; the run continued past them
    pub errors: Vec<UseCaseError>,
    pub elapsed_ms: u128,
}
