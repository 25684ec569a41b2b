use chrono::{DateTime, Utc};
use contracts::dashboards::d400_sales_ranking::TopModelsResponse;
use contracts::shared::period::StatsQuery;
use sea_orm::ConnectionTrait;

use super::aggregator::combine_and_rank;
use super::repository::{ReservationSource, SaleSource, VenteSource};
use crate::shared::config::statistics_config;
use crate::shared::data::db::get_connection;
use crate::shared::period::resolve_range_at;

/// Best-selling models over the requested period, both channels combined
pub async fn top_models(query: StatsQuery) -> anyhow::Result<TopModelsResponse> {
    top_models_in(get_connection(), query, Utc::now()).await
}

pub async fn top_models_in<C>(
    db: &C,
    query: StatsQuery,
    now: DateTime<Utc>,
) -> anyhow::Result<TopModelsResponse>
where
    C: ConnectionTrait + Send + Sync,
{
    let range = resolve_range_at(&query, now)?;
    let limit = statistics_config().effective_limit(query.limit);
    let boutique_id = query
        .boutique_id
        .clone()
        .filter(|b| !b.trim().is_empty());

    let ventes = VenteSource { db };
    let reservations = ReservationSource { db };
    let from_ventes = ventes.load(&range, boutique_id.as_deref()).await?;
    let from_reservations = reservations.load(&range, boutique_id.as_deref()).await?;

    tracing::debug!(
        "top_models {} -> {}: {} {} rows, {} {} rows",
        range.start,
        range.end,
        from_ventes.len(),
        ventes.channel(),
        from_reservations.len(),
        reservations.channel()
    );

    let items = combine_and_rank(&from_ventes, &from_reservations, limit);

    Ok(TopModelsResponse {
        date_debut: range.start,
        date_fin: range.end,
        boutique_id,
        limit,
        items,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{a003_modele, a007_vente, a008_reservation};
    use crate::shared::data::db::connect_in_memory;
    use chrono::TimeZone;
    use contracts::domain::a003_modele::aggregate::Modele;
    use contracts::domain::a007_vente::aggregate::Vente;
    use contracts::domain::a008_reservation::aggregate::Reservation;
    use contracts::enums::ReservationStatus;
    use contracts::shared::sales::AggregatedSale;
    use sea_orm::DatabaseConnection;

    fn june(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, day, 12, 0, 0).unwrap()
    }

    fn june_query(boutique_id: Option<&str>, limit: Option<usize>) -> StatsQuery {
        StatsQuery {
            date_debut: Some("2025-06-01".into()),
            date_fin: Some("2025-06-30".into()),
            boutique_id: boutique_id.map(str::to_string),
            limit,
            ..Default::default()
        }
    }

    async fn insert_modele(db: &DatabaseConnection, code: &str, name: &str) -> String {
        let modele = Modele::new_for_insert(code.into(), name.into(), "R".into(), 50.0, None);
        a003_modele::repository::insert(db, &modele)
            .await
            .unwrap()
            .to_string()
    }

    /// Robe: 2 sold in b1 + 5 reserved and confirmed in b1, Jupe: 4 sold in b2
    async fn seed() -> (DatabaseConnection, String, String) {
        let db = connect_in_memory().await;
        let robe = insert_modele(&db, "M1", "Robe").await;
        let jupe = insert_modele(&db, "M2", "Jupe").await;

        let v = Vente::new_for_insert("b1".into(), robe.clone(), None, june(3), 2, 10.0);
        a007_vente::repository::insert(&db, &v).await.unwrap();
        let v = Vente::new_for_insert("b2".into(), jupe.clone(), None, june(4), 4, 5.0);
        a007_vente::repository::insert(&db, &v).await.unwrap();

        let mut r =
            Reservation::new_for_insert("b1".into(), robe.clone(), "c1".into(), june(5), 5, 50.0);
        r.statut = ReservationStatus::Confirmee;
        a008_reservation::repository::insert(&db, &r).await.unwrap();
        let pending =
            Reservation::new_for_insert("b2".into(), jupe.clone(), "c1".into(), june(5), 9, 90.0);
        a008_reservation::repository::insert(&db, &pending).await.unwrap();

        (db, robe, jupe)
    }

    fn sale(id: &str, name: &str, quantity: i64, revenue: f64) -> AggregatedSale {
        AggregatedSale {
            model_id: id.into(),
            model_name: name.into(),
            total_quantity: quantity,
            total_revenue: revenue,
        }
    }

    #[tokio::test]
    async fn test_channels_merge_into_one_row_per_model() {
        let (db, robe, jupe) = seed().await;

        let response = top_models_in(&db, june_query(None, None), june(30))
            .await
            .unwrap();
        assert_eq!(response.limit, 10);
        assert_eq!(response.boutique_id, None);
        assert_eq!(
            response.items,
            vec![sale(&robe, "Robe", 7, 70.0), sale(&jupe, "Jupe", 4, 20.0)]
        );
    }

    #[tokio::test]
    async fn test_limit_is_applied_and_capped() {
        let (db, robe, _) = seed().await;

        let first = top_models_in(&db, june_query(None, Some(1)), june(30))
            .await
            .unwrap();
        assert_eq!(first.items, vec![sale(&robe, "Robe", 7, 70.0)]);

        let capped = top_models_in(&db, june_query(None, Some(5000)), june(30))
            .await
            .unwrap();
        assert_eq!(capped.limit, 100);
        assert_eq!(capped.items.len(), 2);
    }

    #[tokio::test]
    async fn test_boutique_filter() {
        let (db, _, jupe) = seed().await;

        let b2 = top_models_in(&db, june_query(Some("b2"), None), june(30))
            .await
            .unwrap();
        assert_eq!(b2.boutique_id.as_deref(), Some("b2"));
        assert_eq!(b2.items, vec![sale(&jupe, "Jupe", 4, 20.0)]);

        let blank = top_models_in(&db, june_query(Some("  "), None), june(30))
            .await
            .unwrap();
        assert_eq!(blank.boutique_id, None);
        assert_eq!(blank.items.len(), 2);
    }

    #[tokio::test]
    async fn test_bad_date_fails_before_querying() {
        let db = connect_in_memory().await;
        let query = StatsQuery {
            date_debut: Some("yesterday".into()),
            ..Default::default()
        };
        assert!(top_models_in(&db, query, june(30)).await.is_err());
    }
}
