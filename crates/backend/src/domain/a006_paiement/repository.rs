use chrono::{DateTime, Utc};
use contracts::domain::a006_paiement::aggregate::{Paiement, PaiementId};
use contracts::domain::common::BaseAggregate;
use contracts::enums::PaymentMode;
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, QueryOrder, Set};

use crate::domain::common::{metadata_from_row, uuid_from_row};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "a006_paiement")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub facture_id: String,
    pub date_paiement: DateTime<Utc>,
    pub montant: f64,
    pub mode: String,
    pub is_deleted: bool,
    pub is_posted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Paiement {
    fn from(m: Model) -> Self {
        let metadata = metadata_from_row(
            m.created_at,
            m.updated_at,
            m.is_deleted,
            m.is_posted,
            m.version,
        );
        Paiement {
            base: BaseAggregate::with_metadata(
                PaiementId(uuid_from_row(&m.id)),
                m.code,
                m.description,
                m.comment,
                metadata,
            ),
            facture_id: m.facture_id,
            date_paiement: m.date_paiement,
            montant: m.montant,
            mode: PaymentMode::from_code(&m.mode).unwrap_or_default(),
        }
    }
}

pub async fn list_all<C: ConnectionTrait>(db: &C) -> anyhow::Result<Vec<Paiement>> {
    let items = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .order_by_desc(Column::DatePaiement)
        .all(db)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn list_by_facture<C: ConnectionTrait>(
    db: &C,
    facture_id: &str,
) -> anyhow::Result<Vec<Paiement>> {
    let items = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .filter(Column::FactureId.eq(facture_id))
        .order_by_asc(Column::DatePaiement)
        .all(db)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

/// Payments received inside `[from, to]`
pub async fn list_in_range<C: ConnectionTrait>(
    db: &C,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> anyhow::Result<Vec<Paiement>> {
    let items = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .filter(Column::DatePaiement.gte(from))
        .filter(Column::DatePaiement.lte(to))
        .order_by_asc(Column::DatePaiement)
        .all(db)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn get_by_id<C: ConnectionTrait>(db: &C, id: Uuid) -> anyhow::Result<Option<Paiement>> {
    let result = Entity::find_by_id(id.to_string()).one(db).await?;
    Ok(result.map(Into::into))
}

pub async fn insert<C: ConnectionTrait>(db: &C, aggregate: &Paiement) -> anyhow::Result<Uuid> {
    let active = ActiveModel {
        id: Set(aggregate.base.id.value().to_string()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        facture_id: Set(aggregate.facture_id.clone()),
        date_paiement: Set(aggregate.date_paiement),
        montant: Set(aggregate.montant),
        mode: Set(aggregate.mode.code().to_string()),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        is_posted: Set(aggregate.base.metadata.is_posted),
        created_at: Set(Some(aggregate.base.metadata.created_at)),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    };
    active.insert(db).await?;
    Ok(aggregate.base.id.value())
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
