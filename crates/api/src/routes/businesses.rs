use axum::{
    Router,
    routing::{get, post, put},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/businesses", post(handlers::businesses::create_business))
        .route(
            "/businesses/:id/employees",
            post(handlers::businesses::create_employee),
        )
        .route(
            "/businesses/:id/employees/:employee_id",
            get(handlers::businesses::get_employee),
        )
        .route(
            "/businesses/:id/employees/:employee_id/schedule",
            put(handlers::businesses::update_employee_schedule),
        )
}
