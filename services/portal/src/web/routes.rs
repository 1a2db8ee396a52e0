//! services/portal/src/web/routes.rs
//!
//! Assembles the full router: portal pages, mock control endpoints, static
//! assets and the Swagger UI.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, services::ServeDir};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::web::{
    pages::{entry_page_handler, entry_submit_handler, redirect_to_units, units_handler, UNITS_PATH},
    rest::{reset_handler, sessions_handler, ApiDoc},
    state::AppState,
};

pub fn build_router(state: Arc<AppState>) -> Router {
    let static_root = state.config.static_root.clone();

    let portal_routes = Router::new()
        .route("/", get(redirect_to_units))
        .route("/student/", get(redirect_to_units))
        .route(UNITS_PATH, get(units_handler))
        .route(
            "/student/Entry.aspx",
            get(entry_page_handler).post(entry_submit_handler),
        );

    // Harnesses may drive these from a browser page on another origin.
    let mock_routes = Router::new()
        .route("/mock/reset", post(reset_handler))
        .route("/mock/sessions", get(sessions_handler))
        .layer(CorsLayer::permissive());

    Router::new()
        .merge(portal_routes)
        .merge(mock_routes)
        .nest_service("/student/jq", ServeDir::new(static_root.join("jq")))
        .nest_service("/student/jqm", ServeDir::new(static_root.join("jqm")))
        .nest_service("/student/img", ServeDir::new(static_root.join("img")))
        .nest_service("/static", ServeDir::new(static_root))
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
