use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/bookings", post(handlers::booking::create_booking))
        .route("/api/bookings/:id", get(handlers::booking::get_booking))
        .route(
            "/api/bookings/:id/confirm",
            post(handlers::booking::confirm_booking),
        )
        .route(
            "/api/bookings/:id/decline",
            post(handlers::booking::decline_booking),
        )
        .route(
            "/api/bookings/:id/cancel",
            post(handlers::booking::cancel_booking),
        )
        .route(
            "/api/bookings/:id/complete",
            post(handlers::booking::complete_booking),
        )
        .route(
            "/api/mentors/:mentor_id/bookings",
            get(handlers::booking::list_mentor_bookings),
        )
        .route(
            "/api/students/:student_id/bookings",
            get(handlers::booking::list_student_bookings),
        )
}
