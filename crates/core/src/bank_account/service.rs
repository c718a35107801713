//! Bank account orchestration.

use std::future::Future;
use std::sync::Arc;

use bankroll_shared::types::{BankAccountId, CustomerId, Page};
use bankroll_shared::{AppError, AppResult};

use super::types::{
    BANK_ACCOUNT_RULES, BankAccount, BankAccountCriteria, BankAccountFields, BankAccountPayload,
    BankAccountView,
};
use crate::customer::CustomerRepository;
use crate::customer::service::{lookup_failed, missing_body};
use crate::intent::{CrudOperation, Intent, ROUTE_CUSTOMER_ID, ROUTE_ID};
use crate::outcome::{BankAccountList, Outcome, OutcomePayload};
use crate::repository::RepositoryError;
use crate::validation::rules;

/// Message of a request that would give a customer a second preferred account.
pub const PREFERRED_ALREADY_SET_MESSAGE: &str = "Customer already has a preferred bank account";

/// Repository trait for bank account persistence.
///
/// This trait is implemented by the db crate to provide actual database operations.
pub trait BankAccountRepository: Send + Sync {
    /// Find a bank account by ID.
    fn find_by_id(
        &self,
        id: BankAccountId,
    ) -> impl Future<Output = Result<Option<BankAccount>, RepositoryError>> + Send;

    /// Find a page of bank accounts matching the criteria, in id order.
    fn find_by(
        &self,
        criteria: &BankAccountCriteria,
        page: Page,
    ) -> impl Future<Output = Result<Vec<BankAccount>, RepositoryError>> + Send;

    /// Insert an account when `id` is `None`, otherwise overwrite the stored one.
    ///
    /// `customer_id` is only written on insert.
    fn save(
        &self,
        id: Option<BankAccountId>,
        customer_id: CustomerId,
        fields: &BankAccountFields,
    ) -> impl Future<Output = Result<BankAccount, RepositoryError>> + Send;

    /// Delete a bank account. Returns false if nothing was deleted.
    fn delete(
        &self,
        id: BankAccountId,
    ) -> impl Future<Output = Result<bool, RepositoryError>> + Send;
}

/// Executes bank account intents.
pub struct BankAccountService<B: BankAccountRepository, C: CustomerRepository> {
    accounts: Arc<B>,
    customers: Arc<C>,
}

impl<B: BankAccountRepository, C: CustomerRepository> BankAccountService<B, C> {
    /// Create a new bank account service.
    #[must_use]
    pub fn new(accounts: Arc<B>, customers: Arc<C>) -> Self {
        Self {
            accounts,
            customers,
        }
    }

    /// Executes one intent.
    ///
    /// # Errors
    ///
    /// Returns the taxonomy error of the first failed step.
    pub async fn execute(&self, intent: Intent<BankAccountPayload>) -> AppResult<Outcome> {
        match intent.operation {
            CrudOperation::Create => self.create(intent.payload).await,
            CrudOperation::Read => {
                let owner = intent.route_id(ROUTE_CUSTOMER_ID).map(CustomerId::new);
                self.read(owner, intent.page).await
            }
            CrudOperation::ReadOne => self.read_one(route_id(&intent)?).await,
            CrudOperation::Update => {
                let id = route_id(&intent)?;
                self.update(id, intent.payload).await
            }
            CrudOperation::Delete => self.delete(route_id(&intent)?).await,
        }
    }

    /// Validates and stores a new bank account for an existing customer.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The body is missing or fails validation
    /// - The customer does not exist
    /// - The account is preferred and the customer already has a preferred account
    /// - Storage fails
    pub async fn create(&self, payload: Option<BankAccountPayload>) -> AppResult<Outcome> {
        let payload = payload.ok_or_else(missing_body)?;
        rules::validate(BANK_ACCOUNT_RULES, &payload)?;

        let customer_id = self.resolve_customer(payload.customer_id).await?;
        let fields = payload.into_fields()?;

        if fields.is_preferred {
            self.ensure_no_preferred(customer_id, None).await?;
        }

        let account = self
            .accounts
            .save(None, customer_id, &fields)
            .await
            .map_err(|e| {
                AppError::database("Unable to create bank account. An error occurred while saving.")
                    .with_source(e)
            })?;

        Ok(Outcome::created(account.id.into_inner()))
    }

    /// Lists a page of bank accounts, optionally only those of one customer.
    ///
    /// # Errors
    ///
    /// Returns an unknown error if storage fails.
    pub async fn read(&self, owner: Option<CustomerId>, page: Page) -> AppResult<Outcome> {
        let criteria = owner.map_or_else(BankAccountCriteria::default, BankAccountCriteria::of_customer);

        let accounts = self.accounts.find_by(&criteria, page).await.map_err(|e| {
            AppError::unknown("Unable to read bank accounts. An error occurred while retrieving.")
                .with_source(e)
        })?;

        Ok(Outcome::ok(OutcomePayload::BankAccounts(BankAccountList {
            bank_accounts: accounts.into_iter().map(BankAccountView::from).collect(),
        })))
    }

    /// Fetches one bank account. A missing account is a NotFound outcome, not an error.
    ///
    /// # Errors
    ///
    /// Returns a database error if storage fails.
    pub async fn read_one(&self, id: BankAccountId) -> AppResult<Outcome> {
        let account = self.accounts.find_by_id(id).await.map_err(lookup_failed)?;

        Ok(account.map_or_else(Outcome::not_found, |a| {
            Outcome::ok(OutcomePayload::BankAccount(a.into()))
        }))
    }

    /// Overlays the payload onto the stored account. Id and owner never change.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The account does not exist
    /// - The body is missing, or the merged account fails validation
    /// - The account becomes preferred while another account of the customer is
    /// - Storage fails
    pub async fn update(
        &self,
        id: BankAccountId,
        payload: Option<BankAccountPayload>,
    ) -> AppResult<Outcome> {
        let stored = self.load(id).await?;
        let payload = payload.ok_or_else(missing_body)?;

        let merged = payload.merge_onto(&stored);
        rules::validate(BANK_ACCOUNT_RULES, &merged)?;
        let fields = merged.into_fields()?;

        if fields.is_preferred && !stored.fields.is_preferred {
            self.ensure_no_preferred(stored.customer_id, Some(id)).await?;
        }

        self.accounts
            .save(Some(id), stored.customer_id, &fields)
            .await
            .map_err(|e| {
                AppError::database("Unable to update bank account. An error occurred while saving.")
                    .with_source(e)
            })?;

        Ok(Outcome::no_content())
    }

    /// Deletes a bank account.
    ///
    /// # Errors
    ///
    /// Returns a not found error if the account does not exist, or a database
    /// error if storage fails.
    pub async fn delete(&self, id: BankAccountId) -> AppResult<Outcome> {
        self.load(id).await?;

        let deleted = self.accounts.delete(id).await.map_err(|e| {
            AppError::database("Unable to delete bank account. An error occurred while deleting.")
                .with_source(e)
        })?;
        if !deleted {
            return Err(bank_account_not_found(id));
        }

        Ok(Outcome::no_content())
    }

    async fn load(&self, id: BankAccountId) -> AppResult<BankAccount> {
        self.accounts
            .find_by_id(id)
            .await
            .map_err(lookup_failed)?
            .ok_or_else(|| bank_account_not_found(id))
    }

    async fn resolve_customer(&self, customer_id: Option<i64>) -> AppResult<CustomerId> {
        let id = customer_id
            .map(CustomerId::new)
            .ok_or_else(|| AppError::validation("The customer_id field is required."))?;

        match self.customers.find_by_id(id).await.map_err(lookup_failed)? {
            Some(customer) => Ok(customer.id),
            None => Err(AppError::customer_not_found(format!(
                "Customer id {id} was not found."
            ))),
        }
    }

    async fn ensure_no_preferred(
        &self,
        customer_id: CustomerId,
        exclude: Option<BankAccountId>,
    ) -> AppResult<()> {
        let preferred = self
            .accounts
            .find_by(&BankAccountCriteria::preferred_of(customer_id), Page::default())
            .await
            .map_err(lookup_failed)?;

        if preferred.iter().any(|a| Some(a.id) != exclude) {
            return Err(AppError::preferred_already_set(PREFERRED_ALREADY_SET_MESSAGE));
        }
        Ok(())
    }
}

fn route_id<P>(intent: &Intent<P>) -> AppResult<BankAccountId> {
    intent
        .route_id(ROUTE_ID)
        .map(BankAccountId::new)
        .ok_or_else(|| AppError::route_not_found("No route found: missing bank account id"))
}

fn bank_account_not_found(id: BankAccountId) -> AppError {
    AppError::bank_account_not_found(format!("Bank account with id {id} could not be found."))
}
