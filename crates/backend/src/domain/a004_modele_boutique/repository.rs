use chrono::Utc;
use contracts::domain::a004_modele_boutique::aggregate::{ModeleBoutique, ModeleBoutiqueId};
use contracts::domain::common::BaseAggregate;
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, QueryOrder, Set};

use crate::domain::common::{metadata_from_row, uuid_from_row};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "a004_modele_boutique")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub modele_id: String,
    pub boutique_id: String,
    pub prix: f64,
    pub quantite: i32,
    pub is_deleted: bool,
    pub is_posted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for ModeleBoutique {
    fn from(m: Model) -> Self {
        let metadata = metadata_from_row(
            m.created_at,
            m.updated_at,
            m.is_deleted,
            m.is_posted,
            m.version,
        );
        ModeleBoutique {
            base: BaseAggregate::with_metadata(
                ModeleBoutiqueId(uuid_from_row(&m.id)),
                m.code,
                m.description,
                m.comment,
                metadata,
            ),
            modele_id: m.modele_id,
            boutique_id: m.boutique_id,
            prix: m.prix,
            quantite: m.quantite,
        }
    }
}

fn to_active(aggregate: &ModeleBoutique) -> ActiveModel {
    ActiveModel {
        id: Set(aggregate.base.id.value().to_string()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        modele_id: Set(aggregate.modele_id.clone()),
        boutique_id: Set(aggregate.boutique_id.clone()),
        prix: Set(aggregate.prix),
        quantite: Set(aggregate.quantite),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        is_posted: Set(aggregate.base.metadata.is_posted),
        created_at: Set(Some(aggregate.base.metadata.created_at)),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    }
}

pub async fn list_all<C: ConnectionTrait>(db: &C) -> anyhow::Result<Vec<ModeleBoutique>> {
    let items = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .order_by_asc(Column::BoutiqueId)
        .order_by_asc(Column::ModeleId)
        .all(db)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn list_by_boutique<C: ConnectionTrait>(
    db: &C,
    boutique_id: &str,
) -> anyhow::Result<Vec<ModeleBoutique>> {
    let items = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .filter(Column::BoutiqueId.eq(boutique_id))
        .order_by_asc(Column::ModeleId)
        .all(db)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

/// Live row for a (modele, boutique) pair
pub async fn find_pair<C: ConnectionTrait>(
    db: &C,
    modele_id: &str,
    boutique_id: &str,
) -> anyhow::Result<Option<ModeleBoutique>> {
    let result = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .filter(Column::ModeleId.eq(modele_id))
        .filter(Column::BoutiqueId.eq(boutique_id))
        .one(db)
        .await?;
    Ok(result.map(Into::into))
}

pub async fn get_by_id<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> anyhow::Result<Option<ModeleBoutique>> {
    let result = Entity::find_by_id(id.to_string()).one(db).await?;
    Ok(result.map(Into::into))
}

pub async fn insert<C: ConnectionTrait>(db: &C, aggregate: &ModeleBoutique) -> anyhow::Result<Uuid> {
    to_active(aggregate).insert(db).await?;
    Ok(aggregate.base.id.value())
}

pub async fn update<C: ConnectionTrait>(db: &C, aggregate: &ModeleBoutique) -> anyhow::Result<()> {
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

    #[tokio::test]
    async fn test_pair_is_unique_while_live() {
        let db = connect_in_memory().await;
        let first = ModeleBoutique::new_for_insert("m1".into(), "b1".into(), 10.0, 3);
        let first_id = insert(&db, &first).await.unwrap();

        let found = find_pair(&db, "m1", "b1").await.unwrap().unwrap();
        assert_eq!(found.base.id.value(), first_id);
        assert!(find_pair(&db, "m1", "b2").await.unwrap().is_none());

        let duplicate = ModeleBoutique::new_for_insert("m1".into(), "b1".into(), 12.0, 1);
        assert!(insert(&db, &duplicate).await.is_err());

        // Once the first row is deleted the pair can be stocked again
        soft_delete(&db, first_id).await.unwrap();
        assert!(find_pair(&db, "m1", "b1").await.unwrap().is_none());
        insert(&db, &duplicate).await.unwrap();
        assert_eq!(list_by_boutique(&db, "b1").await.unwrap().len(), 1);
    }
}
