//! Canonical request intents and the normalizer that builds them.
//!
//! The transport layer hands over raw route parameters, query parameters, and the
//! body bytes; [`normalize`] turns them into an [`Intent`] the orchestrators can
//! execute without knowing anything about HTTP.

use std::collections::BTreeMap;

use bankroll_shared::types::Page;
use bankroll_shared::{AppError, AppResult};
use serde::de::DeserializeOwned;

/// Route key of the addressed resource.
pub const ROUTE_ID: &str = "id";

/// Route key of the owning customer, for nested bank account listings.
pub const ROUTE_CUSTOMER_ID: &str = "customer_id";

/// Query key of the page size.
pub const QUERY_LIMIT: &str = "limit";

/// Query key of the page start.
pub const QUERY_OFFSET: &str = "offset";

/// Entity an intent targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// Customers.
    Customer,
    /// Bank accounts.
    BankAccount,
}

/// CRUD operation an intent requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrudOperation {
    /// Create one entity.
    Create,
    /// List a page of entities.
    Read,
    /// Fetch one entity.
    ReadOne,
    /// Change fields of one entity.
    Update,
    /// Remove one entity.
    Delete,
}

impl CrudOperation {
    /// Returns true if the operation carries a body.
    #[must_use]
    pub const fn carries_payload(self) -> bool {
        matches!(self, Self::Create | Self::Update)
    }
}

/// Route identifiers, parsed to integers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams(BTreeMap<String, i64>);

impl RouteParams {
    /// Returns the identifier stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<i64> {
        self.0.get(key).copied()
    }

    /// Adds an identifier.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: i64) -> Self {
        self.0.insert(key.into(), value);
        self
    }
}

/// One request's target operation and data, independent of transport.
#[derive(Debug, Clone)]
pub struct Intent<P> {
    /// Targeted entity.
    pub entity: EntityKind,
    /// Requested operation.
    pub operation: CrudOperation,
    /// Path-derived identifiers.
    pub route: RouteParams,
    /// Raw query parameters.
    pub query: BTreeMap<String, String>,
    /// Paging window, from `limit`/`offset` or the defaults.
    pub page: Page,
    /// Parsed body; only present for Create and Update.
    pub payload: Option<P>,
}

impl<P> Intent<P> {
    /// Creates an intent with no identifiers, default paging, and no payload.
    #[must_use]
    pub fn new(entity: EntityKind, operation: CrudOperation) -> Self {
        Self {
            entity,
            operation,
            route: RouteParams::default(),
            query: BTreeMap::new(),
            page: Page::default(),
            payload: None,
        }
    }

    /// Sets a route identifier.
    #[must_use]
    pub fn with_route(mut self, key: impl Into<String>, value: i64) -> Self {
        self.route = self.route.with(key, value);
        self
    }

    /// Sets the paging window.
    #[must_use]
    pub fn with_page(mut self, page: Page) -> Self {
        self.page = page;
        self
    }

    /// Sets the payload.
    #[must_use]
    pub fn with_payload(mut self, payload: P) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Returns the identifier stored under `key`.
    #[must_use]
    pub fn route_id(&self, key: &str) -> Option<i64> {
        self.route.get(key)
    }
}

/// Builds an intent from raw transport input.
///
/// Route values must be integers; anything else means the route does not exist.
/// `limit` and `offset` default to 10 and 0. For Create and Update a non-empty body
/// is parsed into `P`; an empty body leaves the payload absent so the orchestrator
/// can report it. Every other operation ignores the body.
pub fn normalize<P, R, Q>(
    entity: EntityKind,
    operation: CrudOperation,
    route: R,
    query: Q,
    body: &[u8],
) -> AppResult<Intent<P>>
where
    P: DeserializeOwned,
    R: IntoIterator<Item = (String, String)>,
    Q: IntoIterator<Item = (String, String)>,
{
    let route = parse_route(route)?;
    let query: BTreeMap<String, String> = query.into_iter().collect();
    let page = Page::new(
        parse_paging(&query, QUERY_LIMIT)?,
        parse_paging(&query, QUERY_OFFSET)?,
    );

    let payload = if operation.carries_payload() {
        parse_body(body)?
    } else {
        None
    };

    Ok(Intent {
        entity,
        operation,
        route,
        query,
        page,
        payload,
    })
}

fn parse_route(route: impl IntoIterator<Item = (String, String)>) -> AppResult<RouteParams> {
    route
        .into_iter()
        .try_fold(RouteParams::default(), |params, (key, raw)| {
            let value = raw.parse::<i64>().map_err(|_| {
                AppError::route_not_found(format!(
                    "No route found: path parameter '{key}' must be an integer, got '{raw}'"
                ))
            })?;
            Ok(params.with(key, value))
        })
}

fn parse_paging(query: &BTreeMap<String, String>, key: &str) -> AppResult<Option<u64>> {
    query
        .get(key)
        .map(|raw| {
            raw.parse::<i64>()
                .ok()
                .and_then(|value| u64::try_from(value).ok())
                .ok_or_else(|| {
                    AppError::malformed_request(format!(
                        "Query parameter '{key}' must be an integer between 0 and {}, got '{raw}'",
                        i64::MAX
                    ))
                })
        })
        .transpose()
}

fn parse_body<P: DeserializeOwned>(body: &[u8]) -> AppResult<Option<P>> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }

    serde_json::from_slice(body).map(Some).map_err(|e| {
        AppError::malformed_request(format!("Request body could not be parsed: {e}"))
            .with_source(e)
    })
}
