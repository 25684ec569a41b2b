use chrono::Utc;
use contracts::domain::a001_boutique::aggregate::{Boutique, BoutiqueId};
use contracts::domain::common::BaseAggregate;
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::domain::common::{metadata_from_row, uuid_from_row};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "a001_boutique")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub adresse: String,
    pub telephone: Option<String>,
    pub is_succursale: bool,
    pub parent_id: Option<String>,
    pub is_deleted: bool,
    pub is_posted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Boutique {
    fn from(m: Model) -> Self {
        let metadata = metadata_from_row(
            m.created_at,
            m.updated_at,
            m.is_deleted,
            m.is_posted,
            m.version,
        );
        Boutique {
            base: BaseAggregate::with_metadata(
                BoutiqueId(uuid_from_row(&m.id)),
                m.code,
                m.description,
                m.comment,
                metadata,
            ),
            adresse: m.adresse,
            telephone: m.telephone,
            is_succursale: m.is_succursale,
            parent_id: m.parent_id,
        }
    }
}

fn to_active(aggregate: &Boutique) -> ActiveModel {
    ActiveModel {
        id: Set(aggregate.base.id.value().to_string()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        adresse: Set(aggregate.adresse.clone()),
        telephone: Set(aggregate.telephone.clone()),
        is_succursale: Set(aggregate.is_succursale),
        parent_id: Set(aggregate.parent_id.clone()),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        is_posted: Set(aggregate.base.metadata.is_posted),
        created_at: Set(Some(aggregate.base.metadata.created_at)),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    }
}

/// Non-deleted boutiques: main boutiques first, then by name
pub async fn list_all<C: ConnectionTrait>(db: &C) -> anyhow::Result<Vec<Boutique>> {
    let mut items: Vec<Boutique> = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .all(db)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    items.sort_by(|a, b| match (a.is_succursale, b.is_succursale) {
        (false, true) => std::cmp::Ordering::Less,
        (true, false) => std::cmp::Ordering::Greater,
        _ => a
            .base
            .description
            .to_lowercase()
            .cmp(&b.base.description.to_lowercase()),
    });
    Ok(items)
}

pub async fn list_succursales<C: ConnectionTrait>(
    db: &C,
    parent_id: Uuid,
) -> anyhow::Result<Vec<Boutique>> {
    let items = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .filter(Column::ParentId.eq(parent_id.to_string()))
        .order_by_asc(Column::Description)
        .all(db)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn get_by_id<C: ConnectionTrait>(db: &C, id: Uuid) -> anyhow::Result<Option<Boutique>> {
    let result = Entity::find_by_id(id.to_string()).one(db).await?;
    Ok(result.map(Into::into))
}

pub async fn insert<C: ConnectionTrait>(db: &C, aggregate: &Boutique) -> anyhow::Result<Uuid> {
    to_active(aggregate).insert(db).await?;
    Ok(aggregate.base.id.value())
}

pub async fn update<C: ConnectionTrait>(db: &C, aggregate: &Boutique) -> anyhow::Result<()> {
    let mut active = to_active(aggregate);
    active.created_at = sea_orm::ActiveValue::NotSet;
    active.update(db).await?;
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
