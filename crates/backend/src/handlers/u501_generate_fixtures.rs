use axum::{http::StatusCode, Json};
use contracts::usecases::u501_generate_fixtures::{
    GenerateFixturesRequest, GenerateFixturesResponse,
};

use crate::shared::data::db::get_connection;
use crate::shared::error::to_status;
use crate::usecases::u501_generate_fixtures::GenerateFixturesExecutor;

/// POST /api/u501/generate_fixtures
pub async fn generate_fixtures(
    Json(request): Json<GenerateFixturesRequest>,
) -> Result<Json<GenerateFixturesResponse>, StatusCode> {
    let mut executor = GenerateFixturesExecutor::new();
    executor
        .execute(get_connection(), request)
        .await
        .map(Json)
        .map_err(|e| to_status("Fixture generation failed", e))
}
