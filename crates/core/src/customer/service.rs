//! Customer orchestration.

use std::future::Future;
use std::sync::Arc;

use bankroll_shared::types::{CustomerId, Page};
use bankroll_shared::{AppError, AppResult};

use super::types::{
    CUSTOMER_RULES, Customer, CustomerCriteria, CustomerFields, CustomerPayload, CustomerView,
};
use crate::intent::{CrudOperation, Intent, ROUTE_ID};
use crate::outcome::{CustomerList, Outcome, OutcomePayload};
use crate::repository::RepositoryError;
use crate::validation::rules;

/// Message of a Create or Update rejected for a taken ssn.
pub const DUPLICATE_SSN_MESSAGE: &str = "Unable to create customer. SSN was already found.";

/// Repository trait for customer persistence.
///
/// This trait is implemented by the db crate to provide actual database operations.
pub trait CustomerRepository: Send + Sync {
    /// Find a customer by ID.
    fn find_by_id(
        &self,
        id: CustomerId,
    ) -> impl Future<Output = Result<Option<Customer>, RepositoryError>> + Send;

    /// Find a page of customers matching the criteria, in id order.
    fn find_by(
        &self,
        criteria: &CustomerCriteria,
        page: Page,
    ) -> impl Future<Output = Result<Vec<Customer>, RepositoryError>> + Send;

    /// Insert a customer when `id` is `None`, otherwise overwrite the stored one.
    fn save(
        &self,
        id: Option<CustomerId>,
        fields: &CustomerFields,
    ) -> impl Future<Output = Result<Customer, RepositoryError>> + Send;

    /// Delete a customer. Returns false if nothing was deleted.
    fn delete(&self, id: CustomerId) -> impl Future<Output = Result<bool, RepositoryError>> + Send;
}

/// Executes customer intents.
pub struct CustomerService<R: CustomerRepository> {
    repo: Arc<R>,
}

impl<R: CustomerRepository> CustomerService<R> {
    /// Create a new customer service.
    #[must_use]
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Executes one intent.
    ///
    /// # Errors
    ///
    /// Returns the taxonomy error of the first failed step.
    pub async fn execute(&self, intent: Intent<CustomerPayload>) -> AppResult<Outcome> {
        match intent.operation {
            CrudOperation::Create => self.create(intent.payload).await,
            CrudOperation::Read => self.read(intent.page).await,
            CrudOperation::ReadOne => self.read_one(route_id(&intent)?).await,
            CrudOperation::Update => {
                let id = route_id(&intent)?;
                self.update(id, intent.payload).await
            }
            CrudOperation::Delete => self.delete(route_id(&intent)?).await,
        }
    }

    /// Validates and stores a new customer.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The body is missing or fails validation
    /// - Another customer already holds the ssn
    /// - Storage fails
    pub async fn create(&self, payload: Option<CustomerPayload>) -> AppResult<Outcome> {
        let payload = payload.ok_or_else(missing_body)?;
        rules::validate(CUSTOMER_RULES, &payload)?;

        let fields = payload.into_fields();
        self.ensure_ssn_free(&fields.ssn, None).await?;

        let customer = self
            .repo
            .save(None, &fields)
            .await
            .map_err(|e| save_failed("Unable to create customer", e))?;

        Ok(Outcome::created(customer.id.into_inner()))
    }

    /// Lists a page of customers.
    ///
    /// # Errors
    ///
    /// Returns an unknown error if storage fails.
    pub async fn read(&self, page: Page) -> AppResult<Outcome> {
        let customers = self
            .repo
            .find_by(&CustomerCriteria::default(), page)
            .await
            .map_err(|e| {
                AppError::unknown("Unable to read customers. An error occurred while retrieving.")
                    .with_source(e)
            })?;

        Ok(Outcome::ok(OutcomePayload::Customers(CustomerList {
            customers: customers.into_iter().map(CustomerView::from).collect(),
        })))
    }

    /// Fetches one customer. A missing customer is a NotFound outcome, not an error.
    ///
    /// # Errors
    ///
    /// Returns a database error if storage fails.
    pub async fn read_one(&self, id: CustomerId) -> AppResult<Outcome> {
        let customer = self.repo.find_by_id(id).await.map_err(lookup_failed)?;

        Ok(customer.map_or_else(Outcome::not_found, |c| {
            Outcome::ok(OutcomePayload::Customer(c.into()))
        }))
    }

    /// Overlays the non-empty payload fields onto the stored customer.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The customer does not exist
    /// - The body is missing, or the merged customer fails validation
    /// - The new ssn belongs to another customer
    /// - Storage fails
    pub async fn update(
        &self,
        id: CustomerId,
        payload: Option<CustomerPayload>,
    ) -> AppResult<Outcome> {
        let stored = self.load(id).await?;
        let payload = payload.ok_or_else(missing_body)?;

        let merged = payload.merge_onto(&stored.fields);
        rules::validate(CUSTOMER_RULES, &merged)?;

        if merged.ssn != stored.fields.ssn {
            self.ensure_ssn_free(&merged.ssn, Some(id)).await?;
        }

        self.repo
            .save(Some(id), &merged)
            .await
            .map_err(|e| save_failed("Unable to update customer", e))?;

        Ok(Outcome::no_content())
    }

    /// Deletes a customer and, through storage, its bank accounts.
    ///
    /// # Errors
    ///
    /// Returns a not found error if the customer does not exist, or a database
    /// error if storage fails.
    pub async fn delete(&self, id: CustomerId) -> AppResult<Outcome> {
        self.load(id).await?;

        let deleted = self.repo.delete(id).await.map_err(|e| {
            AppError::database("Unable to delete customer. An error occurred while deleting.")
                .with_source(e)
        })?;
        if !deleted {
            return Err(customer_not_found(id));
        }

        Ok(Outcome::no_content())
    }

    async fn load(&self, id: CustomerId) -> AppResult<Customer> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(lookup_failed)?
            .ok_or_else(|| customer_not_found(id))
    }

    async fn ensure_ssn_free(&self, ssn: &str, owner: Option<CustomerId>) -> AppResult<()> {
        let holders = self
            .repo
            .find_by(&CustomerCriteria::by_ssn(ssn), Page::default())
            .await
            .map_err(lookup_failed)?;

        if holders.iter().any(|c| Some(c.id) != owner) {
            return Err(AppError::duplicate(DUPLICATE_SSN_MESSAGE));
        }
        Ok(())
    }
}

fn route_id<P>(intent: &Intent<P>) -> AppResult<CustomerId> {
    intent
        .route_id(ROUTE_ID)
        .map(CustomerId::new)
        .ok_or_else(|| AppError::route_not_found("No route found: missing customer id"))
}

fn customer_not_found(id: CustomerId) -> AppError {
    AppError::customer_not_found(format!("Customer with id {id} could not be found."))
}

pub(crate) fn missing_body() -> AppError {
    AppError::validation("There was no body for the request")
}

pub(crate) fn lookup_failed(e: RepositoryError) -> AppError {
    AppError::database("An error occurred while retrieving.").with_source(e)
}

fn save_failed(action: &str, e: RepositoryError) -> AppError {
    if e.is_unique_violation() {
        return AppError::duplicate(DUPLICATE_SSN_MESSAGE).with_source(e);
    }
    AppError::database(format!("{action}. An error occurred while saving.")).with_source(e)
}
