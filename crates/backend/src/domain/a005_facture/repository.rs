use chrono::{DateTime, NaiveDate, Utc};
use contracts::domain::a005_facture::aggregate::{Facture, FactureId};
use contracts::domain::common::BaseAggregate;
use contracts::enums::FactureStatus;
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, QueryOrder, Set};

use crate::domain::common::{metadata_from_row, uuid_from_row};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "a005_facture")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub client_id: String,
    pub boutique_id: Option<String>,
    pub date_facture: DateTime<Utc>,
    pub date_echeance: Option<NaiveDate>,
    pub montant_total: f64,
    pub montant_paye: f64,
    pub statut: String,
    pub is_deleted: bool,
    pub is_posted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Facture {
    fn from(m: Model) -> Self {
        let metadata = metadata_from_row(
            m.created_at,
            m.updated_at,
            m.is_deleted,
            m.is_posted,
            m.version,
        );
        Facture {
            base: BaseAggregate::with_metadata(
                FactureId(uuid_from_row(&m.id)),
                m.code,
                m.description,
                m.comment,
                metadata,
            ),
            client_id: m.client_id,
            boutique_id: m.boutique_id,
            date_facture: m.date_facture,
            date_echeance: m.date_echeance,
            montant_total: m.montant_total,
            montant_paye: m.montant_paye,
            statut: FactureStatus::from_code(&m.statut).unwrap_or_default(),
        }
    }
}

fn to_active(aggregate: &Facture) -> ActiveModel {
    ActiveModel {
        id: Set(aggregate.base.id.value().to_string()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        client_id: Set(aggregate.client_id.clone()),
        boutique_id: Set(aggregate.boutique_id.clone()),
        date_facture: Set(aggregate.date_facture),
        date_echeance: Set(aggregate.date_echeance),
        montant_total: Set(aggregate.montant_total),
        montant_paye: Set(aggregate.montant_paye),
        statut: Set(aggregate.statut.code().to_string()),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        is_posted: Set(aggregate.base.metadata.is_posted),
        created_at: Set(Some(aggregate.base.metadata.created_at)),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    }
}

/// Optional filters of the invoice list; `from`/`to` bound `date_facture`
#[derive(Debug, Clone, Default)]
pub struct FactureFilter {
    pub client_id: Option<String>,
    pub boutique_id: Option<String>,
    pub statut: Option<FactureStatus>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

pub async fn list_all<C: ConnectionTrait>(db: &C) -> anyhow::Result<Vec<Facture>> {
    list_filtered(db, &FactureFilter::default()).await
}

/// Non-deleted invoices matching the filter, newest first
pub async fn list_filtered<C: ConnectionTrait>(
    db: &C,
    filter: &FactureFilter,
) -> anyhow::Result<Vec<Facture>> {
    let mut query = Entity::find().filter(Column::IsDeleted.eq(false));

    if let Some(client_id) = &filter.client_id {
        query = query.filter(Column::ClientId.eq(client_id.as_str()));
    }
    if let Some(boutique_id) = &filter.boutique_id {
        query = query.filter(Column::BoutiqueId.eq(boutique_id.as_str()));
    }
    if let Some(statut) = filter.statut {
        query = query.filter(Column::Statut.eq(statut.code()));
    }
    if let Some(from) = filter.from {
        query = query.filter(Column::DateFacture.gte(from));
    }
    if let Some(to) = filter.to {
        query = query.filter(Column::DateFacture.lte(to));
    }

    let items = query
        .order_by_desc(Column::DateFacture)
        .all(db)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn get_by_id<C: ConnectionTrait>(db: &C, id: Uuid) -> anyhow::Result<Option<Facture>> {
    let result = Entity::find_by_id(id.to_string()).one(db).await?;
    Ok(result.map(Into::into))
}

pub async fn insert<C: ConnectionTrait>(db: &C, aggregate: &Facture) -> anyhow::Result<Uuid> {
    to_active(aggregate).insert(db).await?;
    Ok(aggregate.base.id.value())
}

pub async fn update<C: ConnectionTrait>(db: &C, aggregate: &Facture) -> anyhow::Result<()> {
    to_active(aggregate).update(db).await?;
    Ok(())
}

pub async fn soft_delete<C: ConnectionTrait>(db: &C, id: Uuid) -> anyhow::Result<bool> {
    use sea_orm::sea_query::Expr;
    let result = Entity::update_many()
        .col_expr(Column::IsDeleted, Expr::value(true))
        .col_expr(Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(Column::Id.eq(id.to_string()))
        .filter(Column::IsDeleted.eq(false))
        .exec(db)
        .await?;
    Ok(result.rows_affected > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::connect_in_memory;
    use chrono::TimeZone;

    fn facture(client: &str, day: u32, total: f64) -> Facture {
        let date = Utc.with_ymd_and_hms(2025, 6, day, 10, 0, 0).unwrap();
        Facture::new_for_insert(Facture::generate_code(date), client.into(), None, date, total)
    }

    #[tokio::test]
    async fn test_list_filtered_by_client_status_and_date() {
        let db = connect_in_memory().await;
        insert(&db, &facture("c1", 1, 100.0)).await.unwrap();
        insert(&db, &facture("c1", 15, 50.0)).await.unwrap();
        let mut paid = facture("c2", 20, 30.0);
        paid.apply_payment(30.0).unwrap();
        insert(&db, &paid).await.unwrap();

        let by_client = list_filtered(
            &db,
            &FactureFilter {
                client_id: Some("c1".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(by_client.len(), 2);
        // newest first
        assert_eq!(by_client[0].montant_total, 50.0);

        let by_status = list_filtered(
            &db,
            &FactureFilter {
                statut: Some(FactureStatus::Payee),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(by_status.len(), 1);
        assert_eq!(by_status[0].client_id, "c2");

        let in_range = list_filtered(
            &db,
            &FactureFilter {
                from: Some(Utc.with_ymd_and_hms(2025, 6, 10, 0, 0, 0).unwrap()),
                to: Some(Utc.with_ymd_and_hms(2025, 6, 16, 0, 0, 0).unwrap()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(in_range.len(), 1);
        assert_eq!(in_range[0].montant_total, 50.0);
    }

    #[tokio::test]
    async fn test_status_survives_round_trip() {
        let db = connect_in_memory().await;
        let mut f = facture("c1", 2, 80.0);
        f.apply_payment(20.0).unwrap();
        let id = insert(&db, &f).await.unwrap();

        let loaded = get_by_id(&db, id).await.unwrap().unwrap();
        assert_eq!(loaded.statut, FactureStatus::PartiellementPayee);
        assert_eq!(loaded.montant_paye, 20.0);
    }
}
