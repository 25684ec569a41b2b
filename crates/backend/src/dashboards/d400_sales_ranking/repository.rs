use async_trait::async_trait;
use contracts::shared::period::DateRange;
use contracts::shared::sales::SaleRecord;
use sea_orm::{ConnectionTrait, DatabaseBackend, FromQueryResult, Statement, Value};

/// Per-model totals of one channel; SUM over no usable value yields NULL
#[derive(Debug, Clone, FromQueryResult)]
struct SaleRow {
    model_id: String,
    model_name: Option<String>,
    quantity: Option<i64>,
    revenue: Option<f64>,
}

impl From<SaleRow> for SaleRecord {
    fn from(row: SaleRow) -> Self {
        SaleRecord::new(
            row.model_id,
            row.model_name.unwrap_or_default(),
            row.quantity.unwrap_or(0),
            row.revenue.filter(|r| r.is_finite()).unwrap_or(0.0),
        )
    }
}

/// A sales channel able to report per-model totals over a period
#[async_trait]
pub trait SaleSource: Send + Sync {
    fn channel(&self) -> &'static str;

    async fn load(
        &self,
        range: &DateRange,
        boutique_id: Option<&str>,
    ) -> anyhow::Result<Vec<SaleRecord>>;
}

/// Direct sales (a007_vente)
pub struct VenteSource<'a, C> {
    pub db: &'a C,
}

/// Confirmed reservations (a008_reservation)
pub struct ReservationSource<'a, C> {
    pub db: &'a C,
}

#[async_trait]
impl<'a, C: ConnectionTrait + Send + Sync> SaleSource for VenteSource<'a, C> {
    fn channel(&self) -> &'static str {
        "vente"
    }

    async fn load(
        &self,
        range: &DateRange,
        boutique_id: Option<&str>,
    ) -> anyhow::Result<Vec<SaleRecord>> {
        let sql = r#"
            SELECT
                v.modele_id AS model_id,
                m.description AS model_name,
                CAST(SUM(v.quantite) AS INTEGER) AS quantity,
                CAST(SUM(v.quantite * v.prix_unitaire) AS REAL) AS revenue
            FROM a007_vente v
            LEFT JOIN a003_modele m ON m.id = v.modele_id
            WHERE v.is_deleted = 0
              AND v.date_vente >= ? AND v.date_vente <= ?
              AND (? IS NULL OR v.boutique_id = ?)
            GROUP BY v.modele_id, m.description
        "#;
        fetch(self.db, sql, range, boutique_id).await
    }
}

#[async_trait]
impl<'a, C: ConnectionTrait + Send + Sync> SaleSource for ReservationSource<'a, C> {
    fn channel(&self) -> &'static str {
        "reservation"
    }

    async fn load(
        &self,
        range: &DateRange,
        boutique_id: Option<&str>,
    ) -> anyhow::Result<Vec<SaleRecord>> {
        let sql = r#"
            SELECT
                r.modele_id AS model_id,
                m.description AS model_name,
                CAST(SUM(r.quantite) AS INTEGER) AS quantity,
                CAST(SUM(r.montant) AS REAL) AS revenue
            FROM a008_reservation r
            LEFT JOIN a003_modele m ON m.id = r.modele_id
            WHERE r.is_deleted = 0
              AND r.statut = 'confirmee'
              AND r.date_reservation >= ? AND r.date_reservation <= ?
              AND (? IS NULL OR r.boutique_id = ?)
            GROUP BY r.modele_id, m.description
        "#;
        fetch(self.db, sql, range, boutique_id).await
    }
}

async fn fetch<C: ConnectionTrait>(
    db: &C,
    sql: &str,
    range: &DateRange,
    boutique_id: Option<&str>,
) -> anyhow::Result<Vec<SaleRecord>> {
    let boutique: Value = boutique_id.map(str::to_string).into();
    let stmt = Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        sql,
        [
            range.start.into(),
            range.end.into(),
            boutique.clone(),
            boutique,
        ],
    );

    let rows = SaleRow::find_by_statement(stmt).all(db).await?;
    Ok(rows.into_iter().map(Into::into).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{a003_modele, a007_vente, a008_reservation};
    use crate::shared::data::db::connect_in_memory;
    use chrono::{TimeZone, Utc};
    use contracts::domain::a003_modele::aggregate::Modele;
    use contracts::domain::a007_vente::aggregate::Vente;
    use contracts::domain::a008_reservation::aggregate::Reservation;
    use contracts::enums::ReservationStatus;

    fn june(day: u32) -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, day, 12, 0, 0).unwrap()
    }

    fn june_range() -> DateRange {
        DateRange::new(
            Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 6, 30, 23, 59, 59).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_vente_source_groups_by_model() {
        let db = connect_in_memory().await;
        let modele = Modele::new_for_insert("M1".into(), "Robe".into(), "R".into(), 50.0, None);
        let modele_id = a003_modele::repository::insert(&db, &modele)
            .await
            .unwrap()
            .to_string();

        for (boutique, day, qty, price) in [("b1", 2, 2, 10.0), ("b1", 5, 3, 20.0), ("b2", 6, 1, 5.0)] {
            let v = Vente::new_for_insert(boutique.into(), modele_id.clone(), None, june(day), qty, price);
            a007_vente::repository::insert(&db, &v).await.unwrap();
        }
        // Outside the range
        let v = Vente::new_for_insert(
            "b1".into(),
            modele_id.clone(),
            None,
            Utc.with_ymd_and_hms(2025, 7, 1, 0, 0, 0).unwrap(),
            9,
            1.0,
        );
        a007_vente::repository::insert(&db, &v).await.unwrap();

        let source = VenteSource { db: &db };
        let all = source.load(&june_range(), None).await.unwrap();
        assert_eq!(all, vec![SaleRecord::new(modele_id.clone(), "Robe", 6, 85.0)]);

        let b1 = source.load(&june_range(), Some("b1")).await.unwrap();
        assert_eq!(b1, vec![SaleRecord::new(modele_id, "Robe", 5, 80.0)]);
    }

    #[tokio::test]
    async fn test_reservation_source_counts_confirmed_only() {
        let db = connect_in_memory().await;
        for (statut, qty) in [
            (ReservationStatus::Confirmee, 2),
            (ReservationStatus::EnAttente, 5),
            (ReservationStatus::Annulee, 7),
            (ReservationStatus::Confirmee, 1),
        ] {
            let mut r = Reservation::new_for_insert(
                "b1".into(),
                "unknown-model".into(),
                "c1".into(),
                june(10),
                qty,
                qty as f64 * 10.0,
            );
            r.statut = statut;
            a008_reservation::repository::insert(&db, &r).await.unwrap();
        }

        let records = ReservationSource { db: &db }
            .load(&june_range(), None)
            .await
            .unwrap();
        // No model row: the name falls back to empty
        assert_eq!(records, vec![SaleRecord::new("unknown-model", "", 3, 30.0)]);
    }
}
