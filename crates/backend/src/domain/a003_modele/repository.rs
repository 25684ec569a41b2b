use chrono::Utc;
use contracts::domain::a003_modele::aggregate::{Modele, ModeleId};
use contracts::domain::common::BaseAggregate;
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, QueryOrder, Set};

use crate::domain::common::{metadata_from_row, uuid_from_row};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "a003_modele")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub reference: String,
    pub prix_base: f64,
    pub is_active: bool,
    pub is_deleted: bool,
    pub is_posted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Modele {
    fn from(m: Model) -> Self {
        let metadata = metadata_from_row(
            m.created_at,
            m.updated_at,
            m.is_deleted,
            m.is_posted,
            m.version,
        );
        Modele {
            base: BaseAggregate::with_metadata(
                ModeleId(uuid_from_row(&m.id)),
                m.code,
                m.description,
                m.comment,
                metadata,
            ),
            reference: m.reference,
            prix_base: m.prix_base,
            is_active: m.is_active,
        }
    }
}

fn to_active(aggregate: &Modele) -> ActiveModel {
    ActiveModel {
        id: Set(aggregate.base.id.value().to_string()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        reference: Set(aggregate.reference.clone()),
        prix_base: Set(aggregate.prix_base),
        is_active: Set(aggregate.is_active),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        is_posted: Set(aggregate.base.metadata.is_posted),
        created_at: Set(Some(aggregate.base.metadata.created_at)),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    }
}

pub async fn list_all<C: ConnectionTrait>(db: &C) -> anyhow::Result<Vec<Modele>> {
    let items = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .order_by_asc(Column::Description)
        .all(db)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn list_active<C: ConnectionTrait>(db: &C) -> anyhow::Result<Vec<Modele>> {
    let items = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .filter(Column::IsActive.eq(true))
        .order_by_asc(Column::Description)
        .all(db)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn get_by_id<C: ConnectionTrait>(db: &C, id: Uuid) -> anyhow::Result<Option<Modele>> {
    let result = Entity::find_by_id(id.to_string()).one(db).await?;
    Ok(result.map(Into::into))
}

pub async fn insert<C: ConnectionTrait>(db: &C, aggregate: &Modele) -> anyhow::Result<Uuid> {
    to_active(aggregate).insert(db).await?;
    Ok(aggregate.base.id.value())
}

pub async fn update<C: ConnectionTrait>(db: &C, aggregate: &Modele) -> anyhow::Result<()> {
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
    async fn test_list_active_skips_inactive_and_deleted() {
        let db = connect_in_memory().await;
        let active = Modele::new_for_insert("M1".into(), "Active".into(), "R1".into(), 10.0, None);
        let mut inactive =
            Modele::new_for_insert("M2".into(), "Inactive".into(), "R2".into(), 10.0, None);
        inactive.is_active = false;
        let deleted = Modele::new_for_insert("M3".into(), "Deleted".into(), "R3".into(), 10.0, None);

        insert(&db, &active).await.unwrap();
        insert(&db, &inactive).await.unwrap();
        let deleted_id = insert(&db, &deleted).await.unwrap();
        soft_delete(&db, deleted_id).await.unwrap();

        let listed = list_active(&db).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].base.code, "M1");
        assert_eq!(list_all(&db).await.unwrap().len(), 2);
    }
}
