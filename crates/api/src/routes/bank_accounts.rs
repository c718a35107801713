//! Bank account routes.

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
use bankroll_core::bank_account::{BankAccountPayload, BankAccountService};
use bankroll_core::intent::{ROUTE_CUSTOMER_ID, ROUTE_ID};
use bankroll_core::{CrudOperation, EntityKind, Intent};
use bankroll_db::{BankAccountRepository, CustomerRepository};
use tracing::info;

use super::{RawRequest, render};
use crate::{AppState, error::ApiError};

/// Creates the bank account routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/bank_accounts",
            get(list_bank_accounts).post(create_bank_account),
        )
        .route(
            "/bank_accounts/{id}",
            get(get_bank_account)
                .patch(update_bank_account)
                .delete(delete_bank_account),
        )
        // `{id}` here is the customer; the segment name must match `/customers/{id}`
        .route("/customers/{id}/bank_accounts", get(list_customer_bank_accounts))
}

type Service = BankAccountService<BankAccountRepository, CustomerRepository>;

fn service(state: &AppState) -> Service {
    BankAccountService::new(
        Arc::new(BankAccountRepository::new((*state.db).clone())),
        Arc::new(CustomerRepository::new((*state.db).clone())),
    )
}

async fn execute(
    state: &AppState,
    intent: Intent<BankAccountPayload>,
) -> Result<Response, ApiError> {
    let outcome = service(state).execute(intent).await?;
    Ok(render(outcome))
}

/// POST `/bank_accounts`
async fn create_bank_account(
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
    .into_intent(EntityKind::BankAccount, CrudOperation::Create)?;

    let outcome = service(&state).execute(intent).await?;
    if let Some(bank_account_id) = outcome.created_id() {
        info!(bank_account_id, "Bank account created");
    }
    Ok(render(outcome))
}

/// GET `/bank_accounts?limit&offset`
async fn list_bank_accounts(
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
    .into_intent(EntityKind::BankAccount, CrudOperation::Read)?;

    execute(&state, intent).await
}

/// GET `/customers/{id}/bank_accounts?limit&offset`
async fn list_customer_bank_accounts(
    State(state): State<AppState>,
    method: Method,
    OriginalUri(uri): OriginalUri,
    Path(route): Path<HashMap<String, String>>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Response, ApiError> {
    let route = route
        .into_iter()
        .map(|(key, value)| {
            let key = if key == ROUTE_ID {
                ROUTE_CUSTOMER_ID.to_string()
            } else {
                key
            };
            (key, value)
        })
        .collect();

    let intent = RawRequest {
        method: &method,
        uri: &uri,
        route,
        query,
        body: &[],
    }
    .into_intent(EntityKind::BankAccount, CrudOperation::Read)?;

    execute(&state, intent).await
}

/// GET `/bank_accounts/{id}`
async fn get_bank_account(
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
    .into_intent(EntityKind::BankAccount, CrudOperation::ReadOne)?;

    execute(&state, intent).await
}

/// PATCH `/bank_accounts/{id}`
async fn update_bank_account(
    State(state): State<AppState>,
    method: Method,
    OriginalUri(uri): OriginalUri,
    Path(route): Path<HashMap<String, String>>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let intent: Intent<BankAccountPayload> = RawRequest {
        method: &method,
        uri: &uri,
        route: route.into_iter().collect(),
        query: HashMap::new(),
        body: &body,
    }
    .into_intent(EntityKind::BankAccount, CrudOperation::Update)?;
    let bank_account_id = intent.route_id(ROUTE_ID);

    let response = execute(&state, intent).await?;
    info!(bank_account_id, "Bank account updated");
    Ok(response)
}

/// DELETE `/bank_accounts/{id}`
async fn delete_bank_account(
    State(state): State<AppState>,
    method: Method,
    OriginalUri(uri): OriginalUri,
    Path(route): Path<HashMap<String, String>>,
) -> Result<Response, ApiError> {
    let intent: Intent<BankAccountPayload> = RawRequest {
        method: &method,
        uri: &uri,
        route: route.into_iter().collect(),
        query: HashMap::new(),
        body: &[],
    }
    .into_intent(EntityKind::BankAccount, CrudOperation::Delete)?;
    let bank_account_id = intent.route_id(ROUTE_ID);

    let response = execute(&state, intent).await?;
    info!(bank_account_id, "Bank account deleted");
    Ok(response)
}
