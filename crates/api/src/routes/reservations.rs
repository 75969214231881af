use axum::{
    Router,
    routing::{get, patch, post},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/reservations", post(handlers::reservations::create_reservation))
        .route("/reservations/:id", get(handlers::reservations::get_reservation))
        .route(
            "/reservations/:id/status",
            patch(handlers::reservations::update_reservation_status),
        )
        .route(
            "/businesses/:id/employees/:employee_id/reservations",
            get(handlers::reservations::list_employee_reservations),
        )
}
