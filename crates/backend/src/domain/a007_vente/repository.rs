use chrono::{DateTime, Utc};
use contracts::domain::a007_vente::aggregate::{Vente, VenteId};
use contracts::domain::common::BaseAggregate;
use contracts::shared::period::DateRange;
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, QueryOrder, Set};

use crate::domain::common::{metadata_from_row, uuid_from_row};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "a007_vente")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub boutique_id: String,
    pub modele_id: String,
    pub client_id: Option<String>,
    pub date_vente: DateTime<Utc>,
    pub quantite: i32,
    pub prix_unitaire: f64,
    pub is_deleted: bool,
    pub is_posted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Vente {
    fn from(m: Model) -> Self {
        let metadata = metadata_from_row(
            m.created_at,
            m.updated_at,
            m.is_deleted,
            m.is_posted,
            m.version,
        );
        Vente {
            base: BaseAggregate::with_metadata(
                VenteId(uuid_from_row(&m.id)),
                m.code,
                m.description,
                m.comment,
                metadata,
            ),
            boutique_id: m.boutique_id,
            modele_id: m.modele_id,
            client_id: m.client_id,
            date_vente: m.date_vente,
            quantite: m.quantite,
            prix_unitaire: m.prix_unitaire,
        }
    }
}

fn to_active(aggregate: &Vente) -> ActiveModel {
    ActiveModel {
        id: Set(aggregate.base.id.value().to_string()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        boutique_id: Set(aggregate.boutique_id.clone()),
        modele_id: Set(aggregate.modele_id.clone()),
        client_id: Set(aggregate.client_id.clone()),
        date_vente: Set(aggregate.date_vente),
        quantite: Set(aggregate.quantite),
        prix_unitaire: Set(aggregate.prix_unitaire),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        is_posted: Set(aggregate.base.metadata.is_posted),
        created_at: Set(Some(aggregate.base.metadata.created_at)),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    }
}

pub async fn list_all<C: ConnectionTrait>(db: &C) -> anyhow::Result<Vec<Vente>> {
    let items = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .order_by_desc(Column::DateVente)
        .all(db)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn list_in_range<C: ConnectionTrait>(
    db: &C,
    range: &DateRange,
    boutique_id: Option<&str>,
) -> anyhow::Result<Vec<Vente>> {
    let mut query = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .filter(Column::DateVente.gte(range.start))
        .filter(Column::DateVente.lte(range.end));
    if let Some(boutique_id) = boutique_id {
        query = query.filter(Column::BoutiqueId.eq(boutique_id));
    }
    let items = query
        .order_by_asc(Column::DateVente)
        .all(db)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn get_by_id<C: ConnectionTrait>(db: &C, id: Uuid) -> anyhow::Result<Option<Vente>> {
    let result = Entity::find_by_id(id.to_string()).one(db).await?;
    Ok(result.map(Into::into))
}

pub async fn insert<C: ConnectionTrait>(db: &C, aggregate: &Vente) -> anyhow::Result<Uuid> {
    to_active(aggregate).insert(db).await?;
    Ok(aggregate.base.id.value())
}

pub async fn update<C: ConnectionTrait>(db: &C, aggregate: &Vente) -> anyhow::Result<()> {
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

    #[tokio::test]
    async fn test_list_in_range_filters_dates_and_boutique() {
        let db = connect_in_memory().await;
        for (boutique, day) in [("b1", 1), ("b1", 10), ("b2", 10), ("b1", 25)] {
            let date = Utc.with_ymd_and_hms(2025, 6, day, 12, 0, 0).unwrap();
            let vente = Vente::new_for_insert(boutique.into(), "m1".into(), None, date, 1, 10.0);
            insert(&db, &vente).await.unwrap();
        }

        let range = DateRange::new(
            Utc.with_ymd_and_hms(2025, 6, 5, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 6, 20, 23, 59, 59).unwrap(),
        );
        assert_eq!(list_in_range(&db, &range, None).await.unwrap().len(), 2);
        let b1 = list_in_range(&db, &range, Some("b1")).await.unwrap();
        assert_eq!(b1.len(), 1);
        assert_eq!(b1[0].date_vente.format("%d").to_string(), "10");
    }
}
