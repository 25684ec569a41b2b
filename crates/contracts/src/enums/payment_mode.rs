use serde::{Deserialize, Serialize};

/// Means of payment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMode {
    #[default]
    Especes,
    Carte,
    Virement,
    Cheque,
}

impl PaymentMode {
    pub fn code(&self) -> &'static str {
        match self {
            PaymentMode::Especes => "especes",
            PaymentMode::Carte => "carte",
            PaymentMode::Virement => "virement",
            PaymentMode::Cheque => "cheque",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PaymentMode::Especes => "Espèces",
            PaymentMode::Carte => "Carte bancaire",
            PaymentMode::Virement => "Virement",
            PaymentMode::Cheque => "Chèque",
        }
    }

    pub fn all() -> Vec<PaymentMode> {
        vec![
            PaymentMode::Especes,
            PaymentMode::Carte,
            PaymentMode::Virement,
            PaymentMode::Cheque,
        ]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::all().into_iter().find(|m| m.code() == code)
    }
}

impl std::fmt::Display for PaymentMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}
