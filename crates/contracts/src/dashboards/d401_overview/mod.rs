pub mod dto;

pub use dto::{ClientStats, FactureStats, OverviewResponse, PaiementStats, VenteStats};
