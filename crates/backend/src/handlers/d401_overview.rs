use axum::{extract::Query, http::StatusCode, Json};
use contracts::dashboards::d401_overview::OverviewResponse;
use contracts::shared::period::StatsQuery;

use crate::dashboards::d401_overview;
use crate::shared::error::to_status;

/// GET /api/d401/overview?periode=&dateDebut=&dateFin=
pub async fn overview(Query(query): Query<StatsQuery>) -> Result<Json<OverviewResponse>, StatusCode> {
    d401_overview::service::get_overview(query)
        .await
        .map(Json)
        .map_err(|e| to_status("Failed to build overview", e))
}
