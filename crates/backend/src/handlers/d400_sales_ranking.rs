use axum::{extract::Query, http::StatusCode, Json};
use contracts::dashboards::d400_sales_ranking::TopModelsResponse;
use contracts::shared::period::StatsQuery;

use crate::dashboards::d400_sales_ranking;
use crate::shared::error::to_status;

/// GET /api/d400/top_models?periode=&dateDebut=&dateFin=&boutiqueId=&limit=
pub async fn top_models(
    Query(query): Query<StatsQuery>,
) -> Result<Json<TopModelsResponse>, StatusCode> {
    d400_sales_ranking::service::top_models(query)
        .await
        .map(Json)
        .map_err(|e| to_status("Failed to rank models", e))
}
