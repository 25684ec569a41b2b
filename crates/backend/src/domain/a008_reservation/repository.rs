use chrono::{DateTime, Utc};
use contracts::domain::a008_reservation::aggregate::{Reservation, ReservationId};
use contracts::domain::common::BaseAggregate;
use contracts::enums::ReservationStatus;
use contracts::shared::period::DateRange;
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, QueryOrder, Set};

use crate::domain::common::{metadata_from_row, uuid_from_row};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "a008_reservation")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub boutique_id: String,
    pub modele_id: String,
    pub client_id: String,
    pub date_reservation: DateTime<Utc>,
    pub quantite: i32,
    pub montant: f64,
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

impl From<Model> for Reservation {
    fn from(m: Model) -> Self {
        let metadata = metadata_from_row(
            m.created_at,
            m.updated_at,
            m.is_deleted,
            m.is_posted,
            m.version,
        );
        Reservation {
            base: BaseAggregate::with_metadata(
                ReservationId(uuid_from_row(&m.id)),
                m.code,
                m.description,
                m.comment,
                metadata,
            ),
            boutique_id: m.boutique_id,
            modele_id: m.modele_id,
            client_id: m.client_id,
            date_reservation: m.date_reservation,
            quantite: m.quantite,
            montant: m.montant,
            statut: ReservationStatus::from_code(&m.statut).unwrap_or_default(),
        }
    }
}

fn to_active(aggregate: &Reservation) -> ActiveModel {
    ActiveModel {
        id: Set(aggregate.base.id.value().to_string()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        boutique_id: Set(aggregate.boutique_id.clone()),
        modele_id: Set(aggregate.modele_id.clone()),
        client_id: Set(aggregate.client_id.clone()),
        date_reservation: Set(aggregate.date_reservation),
        quantite: Set(aggregate.quantite),
        montant: Set(aggregate.montant),
        statut: Set(aggregate.statut.code().to_string()),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        is_posted: Set(aggregate.base.metadata.is_posted),
        created_at: Set(Some(aggregate.base.metadata.created_at)),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    }
}

pub async fn list_all<C: ConnectionTrait>(db: &C) -> anyhow::Result<Vec<Reservation>> {
    let items = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .order_by_desc(Column::DateReservation)
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
) -> anyhow::Result<Vec<Reservation>> {
    let mut query = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .filter(Column::DateReservation.gte(range.start))
        .filter(Column::DateReservation.lte(range.end));
    if let Some(boutique_id) = boutique_id {
        query = query.filter(Column::BoutiqueId.eq(boutique_id));
    }
    let items = query
        .order_by_asc(Column::DateReservation)
        .all(db)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn get_by_id<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> anyhow::Result<Option<Reservation>> {
    let result = Entity::find_by_id(id.to_string()).one(db).await?;
    Ok(result.map(Into::into))
}

pub async fn insert<C: ConnectionTrait>(db: &C, aggregate: &Reservation) -> anyhow::Result<Uuid> {
    to_active(aggregate).insert(db).await?;
    Ok(aggregate.base.id.value())
}

pub async fn update<C: ConnectionTrait>(db: &C, aggregate: &Reservation) -> anyhow::Result<()> {
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
