use axum::{
    routing::{delete, get},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/mentors/:mentor_id/slots",
            get(handlers::availability::get_slots),
        )
        .route(
            "/api/mentors/:mentor_id/slots/range",
            get(handlers::availability::get_slot_range),
        )
        .route(
            "/api/mentors/:mentor_id/rules",
            get(handlers::availability::list_rules).post(handlers::availability::create_rule),
        )
        .route(
            "/api/mentors/:mentor_id/rules/:rule_id",
            delete(handlers::availability::delete_rule),
        )
        .route(
            "/api/mentors/:mentor_id/blocked-dates",
            get(handlers::availability::list_blocked_dates)
                .post(handlers::availability::block_date),
        )
        .route(
            "/api/mentors/:mentor_id/blocked-dates/:blocked_id",
            delete(handlers::availability::unblock_date),
        )
}
