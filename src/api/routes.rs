use axum::{
    routing::{delete, get, head, post, put},
    Router,
};
use std::sync::Arc;

use crate::api::handlers;
use crate::store::traits::Store;

pub fn create_router<S: Store + 'static>() -> Router<Arc<S>> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Property listing and CRUD
        .route("/api/properties", get(handlers::list_properties::<S>))
        .route("/api/properties", post(handlers::create_property::<S>))
        .route("/api/properties/:id", get(handlers::get_property::<S>))
        .route("/api/properties/:id", put(handlers::update_property::<S>))
        .route("/api/properties/:id", delete(handlers::delete_property::<S>))
        .route("/api/properties/:id", head(handlers::property_exists::<S>))
        // Owner CRUD
        .route("/api/owners", get(handlers::list_owners::<S>))
        .route("/api/owners", post(handlers::create_owner::<S>))
        .route("/api/owners/:id", get(handlers::get_owner::<S>))
        .route("/api/owners/:id", put(handlers::update_owner::<S>))
        .route("/api/owners/:id", delete(handlers::delete_owner::<S>))
}
