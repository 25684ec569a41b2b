use serde::{Deserialize, Serialize};

/// Status of a reservation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    #[default]
    EnAttente,
    /// Only confirmed reservations count as sales
    Confirmee,
    Annulee,
}

impl ReservationStatus {
    pub fn code(&self) -> &'static str {
        match self {
            ReservationStatus::EnAttente => "en_attente",
            ReservationStatus::Confirmee => "confirmee",
            ReservationStatus::Annulee => "annulee",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "en_attente" => Some(ReservationStatus::EnAttente),
            "confirmee" => Some(ReservationStatus::Confirmee),
            "annulee" => Some(ReservationStatus::Annulee),
            _ => None,
        }
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}
