pub mod classify;
pub mod health;
pub mod tickets;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health::health))
        .route(
            "/api/tickets/",
            get(tickets::list_tickets).post(tickets::create_ticket),
        )
        .route(
            "/api/tickets/classify/",
            post(classify::suggest_classification),
        )
        .route(
            "/api/tickets/:id/",
            get(tickets::get_ticket).patch(tickets::update_ticket),
        )
}
