use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Response of GET /api/d401/overview
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewResponse {
    pub date_debut: DateTime<Utc>,
    pub date_fin: DateTime<Utc>,
    pub factures: FactureStats,
    pub paiements: PaiementStats,
    pub clients: ClientStats,
    pub ventes: VenteStats,
}

/// Invoices issued inside the window (cancelled ones only counted by status)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FactureStats {
    pub count: usize,
    pub montant_total: f64,
    pub montant_paye: f64,
    pub reste_a_payer: f64,
    /// Status code -> number of invoices
    pub by_status: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaiementStats {
    pub count: usize,
    pub montant: f64,
    /// Payment mode code -> collected amount
    pub by_mode: BTreeMap<String, f64>,
}

/// Client and subscription statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientStats {
    pub total: usize,
    /// Clients created inside the window
    pub nouveaux: usize,
    /// Subscriptions active on the last day of the window
    pub abonnements_actifs: usize,
    /// Subscriptions whose end date falls inside the window
    pub abonnements_expirant: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VenteStats {
    pub count: usize,
    pub quantite: i64,
    pub chiffre_affaires: f64,
}
