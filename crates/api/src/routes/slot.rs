use axum::{
    Router,
    routing::{delete, get, post, put},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/teachers/:teacher_id/slots",
            get(handlers::slot::list_slots),
        )
        .route(
            "/api/teachers/:teacher_id/slots",
            post(handlers::slot::create_slot),
        )
        .route(
            "/api/teachers/:teacher_id/slots/:slot_id",
            put(handlers::slot::update_slot),
        )
        .route(
            "/api/teachers/:teacher_id/slots/:slot_id",
            delete(handlers::slot::delete_slot),
        )
}
