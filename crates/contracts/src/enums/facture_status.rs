use serde::{Deserialize, Serialize};

/// Lifecycle status of an invoice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FactureStatus {
    /// Draft, not yet sent to the client
    Brouillon,
    /// Issued, nothing paid yet
    #[default]
    Emise,
    PartiellementPayee,
    Payee,
    Annulee,
}

impl FactureStatus {
    pub fn code(&self) -> &'static str {
        match self {
            FactureStatus::Brouillon => "brouillon",
            FactureStatus::Emise => "emise",
            FactureStatus::PartiellementPayee => "partiellement_payee",
            FactureStatus::Payee => "payee",
            FactureStatus::Annulee => "annulee",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            FactureStatus::Brouillon => "Brouillon",
            FactureStatus::Emise => "Émise",
            FactureStatus::PartiellementPayee => "Partiellement payée",
            FactureStatus::Payee => "Payée",
            FactureStatus::Annulee => "Annulée",
        }
    }

    pub fn all() -> Vec<FactureStatus> {
        vec![
            FactureStatus::Brouillon,
            FactureStatus::Emise,
            FactureStatus::PartiellementPayee,
            FactureStatus::Payee,
            FactureStatus::Annulee,
        ]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::all().into_iter().find(|s| s.code() == code)
    }

    /// Status that no longer follows the paid amount
    pub fn is_sticky(&self) -> bool {
        matches!(self, FactureStatus::Brouillon | FactureStatus::Annulee)
    }
}

impl std::fmt::Display for FactureStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}
