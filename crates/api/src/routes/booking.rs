use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/bookings", post(handlers::booking::create_booking))
        .route(
            "/api/teachers/:teacher_id/bookings",
            get(handlers::booking::list_bookings),
        )
}
