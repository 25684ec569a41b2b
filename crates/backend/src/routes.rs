use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::{handlers, system};

/// All application routes
pub fn configure_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // A001 Boutique
        .route(
            "/api/boutique",
            get(handlers::a001_boutique::list_all).post(handlers::a001_boutique::upsert),
        )
        .route(
            "/api/boutique/testdata",
            post(handlers::a001_boutique::insert_test_data),
        )
        .route(
            "/api/boutique/:id",
            get(handlers::a001_boutique::get_by_id).delete(handlers::a001_boutique::delete),
        )
        .route(
            "/api/boutique/:id/succursales",
            get(handlers::a001_boutique::list_succursales),
        )
        .route(
            "/api/boutique/:id/modeles",
            get(handlers::a001_boutique::list_modeles),
        )
        // A002 Client
        .route(
            "/api/client",
            get(handlers::a002_client::list_all).post(handlers::a002_client::upsert),
        )
        .route(
            "/api/client/:id",
            get(handlers::a002_client::get_by_id).delete(handlers::a002_client::delete),
        )
        .route(
            "/api/client/:id/factures",
            get(handlers::a002_client::list_factures),
        )
        // A003 Modele
        .route(
            "/api/modele",
            get(handlers::a003_modele::list_all).post(handlers::a003_modele::upsert),
        )
        .route(
            "/api/modele/testdata",
            post(handlers::a003_modele::insert_test_data),
        )
        .route(
            "/api/modele/:id",
            get(handlers::a003_modele::get_by_id).delete(handlers::a003_modele::delete),
        )
        // A004 ModeleBoutique
        .route(
            "/api/modele_boutique",
            get(handlers::a004_modele_boutique::list_all)
                .post(handlers::a004_modele_boutique::upsert),
        )
        .route(
            "/api/modele_boutique/:id",
            get(handlers::a004_modele_boutique::get_by_id)
                .delete(handlers::a004_modele_boutique::delete),
        )
        // A005 Facture
        .route(
            "/api/facture",
            get(handlers::a005_facture::list).post(handlers::a005_facture::upsert),
        )
        .route(
            "/api/facture/export",
            get(handlers::a005_facture::export_csv),
        )
        .route(
            "/api/facture/:id",
            get(handlers::a005_facture::get_by_id).delete(handlers::a005_facture::delete),
        )
        .route(
            "/api/facture/:id/cancel",
            post(handlers::a005_facture::cancel),
        )
        .route(
            "/api/facture/:id/paiements",
            get(handlers::a005_facture::list_paiements),
        )
        // A006 Paiement
        .route(
            "/api/paiement",
            get(handlers::a006_paiement::list_all).post(handlers::a006_paiement::register),
        )
        .route(
            "/api/paiement/:id",
            get(handlers::a006_paiement::get_by_id).delete(handlers::a006_paiement::delete),
        )
        // A007 Vente
        .route(
            "/api/vente",
            get(handlers::a007_vente::list_all).post(handlers::a007_vente::upsert),
        )
        .route(
            "/api/vente/:id",
            get(handlers::a007_vente::get_by_id).delete(handlers::a007_vente::delete),
        )
        // A008 Reservation
        .route(
            "/api/reservation",
            get(handlers::a008_reservation::list_all).post(handlers::a008_reservation::upsert),
        )
        .route(
            "/api/reservation/:id",
            get(handlers::a008_reservation::get_by_id)
                .delete(handlers::a008_reservation::delete),
        )
        .route(
            "/api/reservation/:id/status",
            post(handlers::a008_reservation::set_status),
        )
        // D400 / D401 dashboards
        .route(
            "/api/d400/top_models",
            get(handlers::d400_sales_ranking::top_models),
        )
        .route(
            "/api/d401/overview",
            get(handlers::d401_overview::overview),
        )
        // U501 fixtures
        .route(
            "/api/u501/generate_fixtures",
            post(handlers::u501_generate_fixtures::generate_fixtures),
        )
        .layer(middleware::from_fn(system::middleware::request_logger))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    async fn status_of(uri: &str) -> StatusCode {
        configure_routes()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_health() {
        assert_eq!(status_of("/health").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_malformed_path_id_is_bad_request() {
        assert_eq!(status_of("/api/boutique/not-a-uuid").await, StatusCode::BAD_REQUEST);
        assert_eq!(status_of("/api/facture/42/paiements").await, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_invalid_stats_date_is_bad_request() {
        assert_eq!(
            status_of("/api/d400/top_models?dateDebut=yesterday").await,
            StatusCode::BAD_REQUEST
        );
    }
}
