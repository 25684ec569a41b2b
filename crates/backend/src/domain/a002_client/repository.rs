use chrono::{NaiveDate, Utc};
use contracts::domain::a002_client::aggregate::{Client, ClientId};
use contracts::domain::common::BaseAggregate;
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, QueryOrder, Set};

use crate::domain::common::{metadata_from_row, uuid_from_row};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "a002_client")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub email: Option<String>,
    pub telephone: Option<String>,
    pub boutique_id: Option<String>,
    pub abonnement: Option<String>,
    pub abonnement_debut: Option<NaiveDate>,
    pub abonnement_fin: Option<NaiveDate>,
    pub is_deleted: bool,
    pub is_posted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Client {
    fn from(m: Model) -> Self {
        let metadata = metadata_from_row(
            m.created_at,
            m.updated_at,
            m.is_deleted,
            m.is_posted,
            m.version,
        );
        Client {
            base: BaseAggregate::with_metadata(
                ClientId(uuid_from_row(&m.id)),
                m.code,
                m.description,
                m.comment,
                metadata,
            ),
            email: m.email,
            telephone: m.telephone,
            boutique_id: m.boutique_id,
            abonnement: m.abonnement,
            abonnement_debut: m.abonnement_debut,
            abonnement_fin: m.abonnement_fin,
        }
    }
}

fn to_active(aggregate: &Client) -> ActiveModel {
    ActiveModel {
        id: Set(aggregate.base.id.value().to_string()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        email: Set(aggregate.email.clone()),
        telephone: Set(aggregate.telephone.clone()),
        boutique_id: Set(aggregate.boutique_id.clone()),
        abonnement: Set(aggregate.abonnement.clone()),
        abonnement_debut: Set(aggregate.abonnement_debut),
        abonnement_fin: Set(aggregate.abonnement_fin),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        is_posted: Set(aggregate.base.metadata.is_posted),
        created_at: Set(Some(aggregate.base.metadata.created_at)),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    }
}

pub async fn list_all<C: ConnectionTrait>(db: &C) -> anyhow::Result<Vec<Client>> {
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

pub async fn get_by_id<C: ConnectionTrait>(db: &C, id: Uuid) -> anyhow::Result<Option<Client>> {
    let result = Entity::find_by_id(id.to_string()).one(db).await?;
    Ok(result.map(Into::into))
}

pub async fn insert<C: ConnectionTrait>(db: &C, aggregate: &Client) -> anyhow::Result<Uuid> {
    to_active(aggregate).insert(db).await?;
    Ok(aggregate.base.id.value())
}

pub async fn update<C: ConnectionTrait>(db: &C, aggregate: &Client) -> anyhow::Result<()> {
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
    async fn test_insert_get_and_soft_delete() {
        let db = connect_in_memory().await;
        let mut client = Client::new_for_insert("CLI-001".into(), "Marie Curie".into());
        client.abonnement = Some("Premium".into());
        client.abonnement_debut = NaiveDate::from_ymd_opt(2025, 1, 1);
        let id = insert(&db, &client).await.unwrap();

        let loaded = get_by_id(&db, id).await.unwrap().unwrap();
        assert_eq!(loaded.base.description, "Marie Curie");
        assert_eq!(loaded.abonnement_debut, NaiveDate::from_ymd_opt(2025, 1, 1));
        assert_eq!(list_all(&db).await.unwrap().len(), 1);

        assert!(soft_delete(&db, id).await.unwrap());
        assert!(!soft_delete(&db, id).await.unwrap());
        assert!(list_all(&db).await.unwrap().is_empty());
    }
}
