use anyhow::Result;
use contracts::dashboards::d401_overview::dto::{
    ClientStats, FactureStats, OverviewResponse, PaiementStats, VenteStats,
};
use contracts::domain::a002_client::aggregate::Client;
use contracts::domain::a005_facture::aggregate::Facture;
use contracts::domain::a006_paiement::aggregate::Paiement;
use contracts::domain::a007_vente::aggregate::Vente;
use contracts::enums::FactureStatus;
use contracts::shared::period::{DateRange, StatsQuery};

use crate::domain::a005_facture::repository::FactureFilter;
use crate::domain::{a002_client, a005_facture, a006_paiement, a007_vente};
use crate::shared::data::db::get_connection;
use crate::shared::period::resolve_range;

/// Dashboard figures for the requested period
pub async fn get_overview(query: StatsQuery) -> Result<OverviewResponse> {
    let range = resolve_range(&query)?;
    let db = get_connection();

    let factures = a005_facture::repository::list_filtered(
        db,
        &FactureFilter {
            from: Some(range.start),
            to: Some(range.end),
            ..Default::default()
        },
    )
    .await?;
    let paiements = a006_paiement::repository::list_in_range(db, range.start, range.end).await?;
    let clients = a002_client::repository::list_all(db).await?;
    let ventes = a007_vente::repository::list_in_range(db, &range, None).await?;

    Ok(OverviewResponse {
        date_debut: range.start,
        date_fin: range.end,
        factures: summarize_factures(&factures),
        paiements: summarize_paiements(&paiements),
        clients: summarize_clients(&clients, &range),
        ventes: summarize_ventes(&ventes),
    })
}

/// Amounts ignore cancelled invoices; every invoice is counted by status
pub fn summarize_factures(factures: &[Facture]) -> FactureStats {
    factures.iter().fold(FactureStats::default(), |mut stats, f| {
        *stats.by_status.entry(f.statut.code().to_string()).or_insert(0) += 1;
        if f.statut != FactureStatus::Annulee {
            stats.count += 1;
            stats.montant_total += f.montant_total;
            stats.montant_paye += f.montant_paye;
            stats.reste_a_payer += f.reste_a_payer();
        }
        stats
    })
}

pub fn summarize_paiements(paiements: &[Paiement]) -> PaiementStats {
    paiements.iter().fold(PaiementStats::default(), |mut stats, p| {
        stats.count += 1;
        stats.montant += p.montant;
        *stats.by_mode.entry(p.mode.code().to_string()).or_insert(0.0) += p.montant;
        stats
    })
}

pub fn summarize_clients(clients: &[Client], range: &DateRange) -> ClientStats {
    let last_day = range.end.date_naive();
    let first_day = range.start.date_naive();

    clients.iter().fold(ClientStats::default(), |mut stats, c| {
        stats.total += 1;
        if range.contains(c.base.metadata.created_at) {
            stats.nouveaux += 1;
        }
        if c.is_abonnement_actif(last_day) {
            stats.abonnements_actifs += 1;
        }
        if c.abonnement.is_some()
            && c.abonnement_fin
                .is_some_and(|fin| fin >= first_day && fin <= last_day)
        {
            stats.abonnements_expirant += 1;
        }
        stats
    })
}

pub fn summarize_ventes(ventes: &[Vente]) -> VenteStats {
    ventes.iter().fold(VenteStats::default(), |mut stats, v| {
        stats.count += 1;
        stats.quantite += i64::from(v.quantite);
        stats.chiffre_affaires += v.montant();
        stats
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use contracts::enums::PaymentMode;

    fn june_range() -> DateRange {
        DateRange::new(
            Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 6, 30, 23, 59, 59).unwrap(),
        )
    }

    fn facture(total: f64) -> Facture {
        let date = Utc.with_ymd_and_hms(2025, 6, 5, 0, 0, 0).unwrap();
        Facture::new_for_insert("FAC".into(), "c1".into(), None, date, total)
    }

    #[test]
    fn test_summarize_factures() {
        let mut partial = facture(100.0);
        partial.apply_payment(30.0).unwrap();
        let open = facture(50.0);
        let mut cancelled = facture(999.0);
        cancelled.cancel().unwrap();

        let stats = summarize_factures(&[partial, open, cancelled]);
        assert_eq!(stats.count, 2);
        assert_eq!(stats.montant_total, 150.0);
        assert_eq!(stats.montant_paye, 30.0);
        assert_eq!(stats.reste_a_payer, 120.0);
        assert_eq!(stats.by_status.get("partiellement_payee"), Some(&1));
        assert_eq!(stats.by_status.get("emise"), Some(&1));
        assert_eq!(stats.by_status.get("annulee"), Some(&1));
    }

    #[test]
    fn test_summarize_paiements_by_mode() {
        let date = Utc.with_ymd_and_hms(2025, 6, 5, 0, 0, 0).unwrap();
        let paiements = vec![
            Paiement::new_for_insert("f".into(), date, 10.0, PaymentMode::Carte, None),
            Paiement::new_for_insert("f".into(), date, 15.0, PaymentMode::Carte, None),
            Paiement::new_for_insert("f".into(), date, 5.0, PaymentMode::Especes, None),
        ];
        let stats = summarize_paiements(&paiements);
        assert_eq!(stats.count, 3);
        assert_eq!(stats.montant, 30.0);
        assert_eq!(stats.by_mode.get("carte"), Some(&25.0));
        assert_eq!(stats.by_mode.get("especes"), Some(&5.0));
    }

    #[test]
    fn test_summarize_clients_subscriptions() {
        let range = june_range();
        let day = |m, d| NaiveDate::from_ymd_opt(2025, m, d);

        let mut old = Client::new_for_insert("C1".into(), "Ancien".into());
        old.base.metadata.created_at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        old.abonnement = Some("Annuel".into());
        old.abonnement_debut = day(1, 1);
        old.abonnement_fin = day(12, 31);

        let mut expiring = Client::new_for_insert("C2".into(), "Expire".into());
        expiring.base.metadata.created_at = Utc.with_ymd_and_hms(2025, 6, 3, 0, 0, 0).unwrap();
        expiring.abonnement = Some("Mensuel".into());
        expiring.abonnement_debut = day(5, 15);
        expiring.abonnement_fin = day(6, 14);

        let mut none = Client::new_for_insert("C3".into(), "Sans".into());
        none.base.metadata.created_at = Utc.with_ymd_and_hms(2025, 7, 3, 0, 0, 0).unwrap();

        let stats = summarize_clients(&[old, expiring, none], &range);
        assert_eq!(
            stats,
            ClientStats {
                total: 3,
                nouveaux: 1,
                abonnements_actifs: 1,
                abonnements_expirant: 1,
            }
        );
    }

    #[test]
    fn test_summarize_ventes() {
        let date = Utc.with_ymd_and_hms(2025, 6, 5, 0, 0, 0).unwrap();
        let ventes = vec![
            Vente::new_for_insert("b".into(), "m".into(), None, date, 2, 10.0),
            Vente::new_for_insert("b".into(), "m".into(), None, date, 3, 1.5),
        ];
        assert_eq!(
            summarize_ventes(&ventes),
            VenteStats {
                count: 2,
                quantite: 5,
                chiffre_affaires: 24.5,
            }
        );
        assert_eq!(summarize_ventes(&[]), VenteStats::default());
    }
}
