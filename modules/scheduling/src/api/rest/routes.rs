use std::sync::Arc;

use axum::{
    routing::{get, post},
    Extension, Router,
};

use crate::api::rest::handlers;
use crate::domain::service::Service;

/// Assemble the scheduling REST router over a shared domain service.
pub fn router(service: Arc<Service>) -> Router {
    Router::new()
        .route(
            "/users",
            get(handlers::list_users).post(handlers::create_user),
        )
        .route(
            "/users/{id}",
            get(handlers::get_user).put(handlers::update_user),
        )
        .route(
            "/users/{id}/appointments",
            get(handlers::list_user_appointments),
        )
        .route("/auth/google", post(handlers::google_sign_in))
        .route(
            "/appointments",
            get(handlers::list_appointments).post(handlers::create_appointment),
        )
        .route(
            "/appointments/{id}",
            get(handlers::get_appointment).put(handlers::update_appointment),
        )
        .route(
            "/time-slots",
            get(handlers::list_time_slots).post(handlers::create_time_slot),
        )
        .route(
            "/time-slots/{id}",
            get(handlers::get_time_slot)
                .put(handlers::update_time_slot)
                .delete(handlers::delete_time_slot),
        )
        .layer(Extension(service))
}
