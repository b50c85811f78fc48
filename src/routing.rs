//! Application router configuration.

use axum::{Router, response::Redirect, routing::get};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    dashboard::{get_dashboard_page, get_dashboard_summary},
    endpoints,
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.static_dir);

    Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page))
        .route(endpoints::DASHBOARD_SUMMARY_API, get(get_dashboard_summary))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        )
        .nest_service(endpoints::STATIC, static_files)
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the dashboard page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::DASHBOARD_VIEW)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;

    use crate::{AppState, dataset::Dataset, endpoints, order::Order};

    use super::build_router;

    fn test_server() -> TestServer {
        let dataset = Dataset::new(vec![Order::new("XL", "01/15/2024", "2", "20.00")]);
        let app = build_router(AppState::new(dataset, "static/"));

        TestServer::try_new(app).expect("Could not create test server.")
    }

    #[tokio::test]
    async fn root_redirects_to_dashboard() {
        let response = test_server().get(endpoints::ROOT).await;

        response.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(response.header("location"), endpoints::DASHBOARD_VIEW);
    }

    #[tokio::test]
    async fn dashboard_route_is_registered() {
        test_server()
            .get(endpoints::DASHBOARD_VIEW)
            .await
            .assert_status_ok();
    }

    #[tokio::test]
    async fn summary_route_is_registered() {
        test_server()
            .get(endpoints::DASHBOARD_SUMMARY_API)
            .await
            .assert_status_ok();
    }

    #[tokio::test]
    async fn error_page_returns_internal_server_error() {
        test_server()
            .get(endpoints::INTERNAL_ERROR_VIEW)
            .await
            .assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let response = test_server().get("/no/such/page").await;

        response.assert_status_not_found();
        assert!(response.text().contains("404"));
    }
}
