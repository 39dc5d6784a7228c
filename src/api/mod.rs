mod handlers;

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::session::SessionStore;

pub fn create_router(store: SessionStore) -> Router {
    let api = Router::new()
        // Doctors
        .route("/doctors", get(handlers::list_doctors))
        .route("/doctors/{index}", get(handlers::get_doctor))
        .route("/doctors/{index}/accept", post(handlers::accept_doctor))
        .route("/doctors/{index}/reject", post(handlers::reject_doctor))
        // Session
        .route("/summary", get(handlers::get_summary))
        .route("/actions", delete(handlers::clear_actions))
        .route("/audit", get(handlers::list_audit))
        .route("/audit", delete(handlers::clear_audit))
        // Health
        .route("/health", get(handlers::health));

    Router::new()
        // Review page
        .route("/", get(handlers::review_page))
        .route("/doctors/{index}/accept", post(handlers::accept_form))
        .route("/doctors/{index}/reject", post(handlers::reject_form))
        .route("/actions/clear", post(handlers::clear_actions_form))
        .route("/audit/clear", post(handlers::clear_audit_form))
        .route("/snapshot.csv", get(handlers::download_snapshot))
        .route("/health", get(handlers::health))
        .nest("/api/v1", api)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(store)
}
