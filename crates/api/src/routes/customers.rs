//! Customer routes.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    Router,
    body::Bytes,
    extract::{OriginalUri, Path, Query, State},
    http::Method,
    response::Response,
    routing::get,
};
use bankroll_core::customer::{CustomerPayload, CustomerService};
use bankroll_core::intent::ROUTE_ID;
use bankroll_core::{CrudOperation, EntityKind, Intent};
use bankroll_db::CustomerRepository;
use tracing::info;

use super::{RawRequest, render};
use crate::{AppState, error::ApiError};

/// Creates the customer routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/customers", get(list_customers).post(create_customer))
        .route(
            "/customers/{id}",
            get(get_customer)
                .patch(update_customer)
                .delete(delete_customer),
        )
}

fn service(state: &AppState) -> CustomerService<CustomerRepository> {
    CustomerService::new(Arc::new(CustomerRepository::new((*state.db).clone())))
}

async fn execute(state: &AppState, intent: Intent<CustomerPayload>) -> Result<Response, ApiError> {
    let outcome = service(state).execute(intent).await?;
    Ok(render(outcome))
}

/// POST `/customers`
async fn create_customer(
    State(state): State<AppState>,
    method: Method,
    OriginalUri(uri): OriginalUri,
    Query(query): Query<HashMap<String, String>>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let intent = RawRequest {
        method: &method,
        uri: &uri,
        route: Vec::new(),
        query,
        body: &body,
    }
    .into_intent(EntityKind::Customer, CrudOperation::Create)?;

    let outcome = service(&state).execute(intent).await?;
    if let Some(customer_id) = outcome.created_id() {
        info!(customer_id, "Customer created");
    }
    Ok(render(outcome))
}

/// GET `/customers?limit&offset`
async fn list_customers(
    State(state): State<AppState>,
    method: Method,
    OriginalUri(uri): OriginalUri,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Response, ApiError> {
    let intent = RawRequest {
        method: &method,
        uri: &uri,
        route: Vec::new(),
        query,
        body: &[],
    }
    .into_intent(EntityKind::Customer, CrudOperation::Read)?;

    execute(&state, intent).await
}

/// GET `/customers/{id}`
async fn get_customer(
    State(state): State<AppState>,
    method: Method,
    OriginalUri(uri): OriginalUri,
    Path(route): Path<HashMap<String, String>>,
) -> Result<Response, ApiError> {
    let intent = RawRequest {
        method: &method,
        uri: &uri,
        route: route.into_iter().collect(),
        query: HashMap::new(),
        body: &[],
    }
    .into_intent(EntityKind::Customer, CrudOperation::ReadOne)?;

    execute(&state, intent).await
}

/// PATCH `/customers/{id}`
async fn update_customer(
    State(state): State<AppState>,
    method: Method,
    OriginalUri(uri): OriginalUri,
    Path(route): Path<HashMap<String, String>>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let intent: Intent<CustomerPayload> = RawRequest {
        method: &method,
        uri: &uri,
        route: route.into_iter().collect(),
        query: HashMap::new(),
        body: &body,
    }
    .into_intent(EntityKind::Customer, CrudOperation::Update)?;
    let customer_id = intent.route_id(ROUTE_ID);

    let response = execute(&state, intent).await?;
    info!(customer_id, "Customer updated");
    Ok(response)
}

/// DELETE `/customers/{id}`
async fn delete_customer(
    State(state): State<AppState>,
    method: Method,
    OriginalUri(uri): OriginalUri,
    Path(route): Path<HashMap<String, String>>,
) -> Result<Response, ApiError> {
    let intent: Intent<CustomerPayload> = RawRequest {
        method: &method,
        uri: &uri,
        route: route.into_iter().collect(),
        query: HashMap::new(),
        body: &[],
    }
    .into_intent(EntityKind::Customer, CrudOperation::Delete)?;
    let customer_id = intent.route_id(ROUTE_ID);

    let response = execute(&state, intent).await?;
    info!(customer_id, "Customer deleted");
    Ok(response)
}
