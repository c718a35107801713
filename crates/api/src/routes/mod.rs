//! API route definitions.

use std::collections::HashMap;

use axum::{
    Json, Router,
    extract::OriginalUri,
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use bankroll_core::{CrudOperation, EntityKind, Intent, Outcome, normalize};
use bankroll_shared::{AppError, ErrorCode};
use serde::de::DeserializeOwned;

use crate::{AppState, error::ApiError};

pub mod bank_accounts;
pub mod customers;
pub mod health;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(customers::routes())
        .merge(bank_accounts::routes())
        .method_not_allowed_fallback(unrouted)
}

/// Fallback for requests no route matches.
pub async fn unrouted(method: Method, OriginalUri(uri): OriginalUri) -> ApiError {
    ApiError(route_not_found(&method, &uri))
}

fn route_not_found(method: &Method, uri: &Uri) -> AppError {
    AppError::route_not_found(format!("No route found for \"{method} {}\"", uri.path()))
}

/// Raw transport input of one request.
pub(crate) struct RawRequest<'a> {
    pub method: &'a Method,
    pub uri: &'a Uri,
    pub route: Vec<(String, String)>,
    pub query: HashMap<String, String>,
    pub body: &'a [u8],
}

impl RawRequest<'_> {
    /// Builds the intent. A non-integer route segment reads as an unrouted request.
    pub fn into_intent<P: DeserializeOwned>(
        self,
        entity: EntityKind,
        operation: CrudOperation,
    ) -> Result<Intent<P>, ApiError> {
        normalize(entity, operation, self.route, self.query, self.body).map_err(|e| {
            if e.code() == ErrorCode::RouteNotFound {
                ApiError(route_not_found(self.method, self.uri))
            } else {
                ApiError(e)
            }
        })
    }
}

/// Turns an outcome into a response. Bodyless outcomes render an empty body.
pub(crate) fn render(outcome: Outcome) -> Response {
    let status =
        StatusCode::from_u16(outcome.status.http_status()).unwrap_or(StatusCode::OK);

    match outcome.payload {
        Some(payload) => (status, Json(payload)).into_response(),
        None => status.into_response(),
    }
}
