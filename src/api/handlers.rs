use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    Json as RequestJson,
};
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;

use crate::logic::{owners, properties};
use crate::model::{
    Id, NewOwner, NewProperty, Owner, PagedResult, PropertyDetail, PropertyFilter,
    PropertyListItem,
};
use crate::store::traits::Store;

pub type AppState<S> = Arc<S>;

/// Simple health check endpoint
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: &str) -> Self {
        Self {
            error: message.to_string(),
        }
    }
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn internal_error(e: anyhow::Error) -> ApiError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new(&e.to_string())),
    )
}

fn not_found(message: &str) -> ApiError {
    (StatusCode::NOT_FOUND, Json(ErrorResponse::new(message)))
}

// Payload validation beyond shape checks is intentionally thin; a negative
// price is the one value the model itself forbids.
fn check_price(price: Decimal) -> Result<(), ApiError> {
    if price < Decimal::ZERO {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("Price must be non-negative")),
        ));
    }
    Ok(())
}

// Property handlers

pub async fn list_properties<S: Store>(
    State(store): State<AppState<S>>,
    Query(filter): Query<PropertyFilter>,
) -> Result<Json<PagedResult<PropertyListItem>>, ApiError> {
    match properties::list_properties(&*store, &filter).await {
        Ok(page) => Ok(Json(page)),
        Err(e) => Err(internal_error(e)),
    }
}

pub async fn get_property<S: Store>(
    State(store): State<AppState<S>>,
    Path(id): Path<Id>,
) -> Result<Json<PropertyDetail>, ApiError> {
    match properties::get_property_detail(&*store, id).await {
        Ok(Some(detail)) => Ok(Json(detail)),
        Ok(None) => Err(not_found("Property not found")),
        Err(e) => Err(internal_error(e)),
    }
}

pub async fn create_property<S: Store>(
    State(store): State<AppState<S>>,
    RequestJson(new_property): RequestJson<NewProperty>,
) -> Result<(StatusCode, Json<PropertyListItem>), ApiError> {
    check_price(new_property.price)?;

    match properties::create_property(&*store, new_property).await {
        Ok(created) => Ok((StatusCode::CREATED, Json(created))),
        Err(e) => Err(internal_error(e)),
    }
}

pub async fn update_property<S: Store>(
    State(store): State<AppState<S>>,
    Path(id): Path<Id>,
    RequestJson(new_property): RequestJson<NewProperty>,
) -> Result<Json<PropertyListItem>, ApiError> {
    check_price(new_property.price)?;

    match properties::update_property(&*store, id, new_property).await {
        Ok(Some(updated)) => Ok(Json(updated)),
        Ok(None) => Err(not_found("Property not found")),
        Err(e) => Err(internal_error(e)),
    }
}

pub async fn delete_property<S: Store>(
    State(store): State<AppState<S>>,
    Path(id): Path<Id>,
) -> Result<StatusCode, ApiError> {
    match properties::delete_property(&*store, id).await {
        Ok(true) => Ok(StatusCode::NO_CONTENT),
        Ok(false) => Err(not_found("Property not found")),
        Err(e) => Err(internal_error(e)),
    }
}

/// HEAD existence probe: status only, no body.
pub async fn property_exists<S: Store>(
    State(store): State<AppState<S>>,
    Path(id): Path<Id>,
) -> StatusCode {
    match properties::property_exists(&*store, id).await {
        Ok(true) => StatusCode::OK,
        Ok(false) => StatusCode::NOT_FOUND,
        Err(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

// Owner handlers

pub async fn list_owners<S: Store>(
    State(store): State<AppState<S>>,
) -> Result<Json<Vec<Owner>>, ApiError> {
    match owners::list_owners(&*store).await {
        Ok(all) => Ok(Json(all)),
        Err(e) => Err(internal_error(e)),
    }
}

pub async fn get_owner<S: Store>(
    State(store): State<AppState<S>>,
    Path(id): Path<Id>,
) -> Result<Json<Owner>, ApiError> {
    match owners::get_owner(&*store, id).await {
        Ok(Some(owner)) => Ok(Json(owner)),
        Ok(None) => Err(not_found("Owner not found")),
        Err(e) => Err(internal_error(e)),
    }
}

pub async fn create_owner<S: Store>(
    State(store): State<AppState<S>>,
    RequestJson(new_owner): RequestJson<NewOwner>,
) -> Result<(StatusCode, Json<Owner>), ApiError> {
    match owners::create_owner(&*store, new_owner).await {
        Ok(created) => Ok((StatusCode::CREATED, Json(created))),
        Err(e) => Err(internal_error(e)),
    }
}

pub async fn update_owner<S: Store>(
    State(store): State<AppState<S>>,
    Path(id): Path<Id>,
    RequestJson(new_owner): RequestJson<NewOwner>,
) -> Result<Json<Owner>, ApiError> {
    match owners::update_owner(&*store, id, new_owner).await {
        Ok(Some(updated)) => Ok(Json(updated)),
        Ok(None) => Err(not_found("Owner not found")),
        Err(e) => Err(internal_error(e)),
    }
}

pub async fn delete_owner<S: Store>(
    State(store): State<AppState<S>>,
    Path(id): Path<Id>,
) -> Result<StatusCode, ApiError> {
    match owners::delete_owner(&*store, id).await {
        Ok(true) => Ok(StatusCode::NO_CONTENT),
        Ok(false) => Err(not_found("Owner not found")),
        Err(e) => Err(internal_error(e)),
    }
}
