//! Bank account repository for database operations.
//!
//! Implements bank account CRUD operations using SeaORM.

use bankroll_core::RepositoryError;
use bankroll_core::bank_account::{
    AccountType, BankAccount, BankAccountCriteria, BankAccountFields,
    BankAccountRepository as BankAccountRepoTrait,
};
use bankroll_shared::types::{BankAccountId, CustomerId, Page};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use super::{repository_error, storage_key};
use crate::entities::bank_accounts;

/// Bank account repository implementation.
#[derive(Debug, Clone)]
pub struct BankAccountRepository {
    db: DatabaseConnection,
}

impl BankAccountRepository {
    /// Create a new bank account repository.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl BankAccountRepoTrait for BankAccountRepository {
    async fn find_by_id(&self, id: BankAccountId) -> Result<Option<BankAccount>, RepositoryError> {
        let Some(key) = storage_key(id.into_inner()) else {
            return Ok(None);
        };

        let model = bank_accounts::Entity::find_by_id(key)
            .one(&self.db)
            .await
            .map_err(|e| repository_error(&e))?;

        model.map(to_domain).transpose()
    }

    async fn find_by(
        &self,
        criteria: &BankAccountCriteria,
        page: Page,
    ) -> Result<Vec<BankAccount>, RepositoryError> {
        let mut query = bank_accounts::Entity::find();
        if let Some(customer_id) = criteria.customer_id {
            let Some(key) = storage_key(customer_id.into_inner()) else {
                return Ok(Vec::new());
            };
            query = query.filter(bank_accounts::Column::CustomerId.eq(key));
        }
        if let Some(is_preferred) = criteria.is_preferred {
            query = query.filter(bank_accounts::Column::IsPreferred.eq(is_preferred));
        }

        let models = query
            .order_by_asc(bank_accounts::Column::Id)
            .limit(page.limit)
            .offset(page.offset)
            .all(&self.db)
            .await
            .map_err(|e| repository_error(&e))?;

        models.into_iter().map(to_domain).collect()
    }

    async fn save(
        &self,
        id: Option<BankAccountId>,
        customer_id: CustomerId,
        fields: &BankAccountFields,
    ) -> Result<BankAccount, RepositoryError> {
        let mut active_model = bank_accounts::ActiveModel {
            id: NotSet,
            customer_id: NotSet,
            account_number: Set(fields.account_number.clone()),
            account_type: Set(fields.account_type.as_str().to_string()),
            account_name: Set(fields.account_name.clone()),
            currency: Set(fields.currency.clone()),
            is_preferred: Set(fields.is_preferred),
        };

        let model = match id {
            None => {
                let owner = storage_key(customer_id.into_inner()).ok_or_else(|| {
                    RepositoryError::database(format!("customer {customer_id} is out of range"))
                })?;
                active_model.customer_id = Set(owner);
                active_model.insert(&self.db).await
            }
            Some(id) => {
                let key = storage_key(id.into_inner()).ok_or_else(|| {
                    RepositoryError::database(format!("bank account {id} is out of range"))
                })?;
                active_model.id = Set(key);
                active_model.update(&self.db).await
            }
        }
        .map_err(|e| repository_error(&e))?;

        to_domain(model)
    }

    async fn delete(&self, id: BankAccountId) -> Result<bool, RepositoryError> {
        let Some(key) = storage_key(id.into_inner()) else {
            return Ok(false);
        };

        let result = bank_accounts::Entity::delete_by_id(key)
            .exec(&self.db)
            .await
            .map_err(|e| repository_error(&e))?;

        Ok(result.rows_affected > 0)
    }
}

/// Convert database model to domain model.
fn to_domain(model: bank_accounts::Model) -> Result<BankAccount, RepositoryError> {
    let account_type = model
        .account_type
        .parse::<AccountType>()
        .map_err(|e| RepositoryError::database(e.to_string()))?;

    Ok(BankAccount {
        id: BankAccountId::new(i64::from(model.id)),
        customer_id: CustomerId::new(i64::from(model.customer_id)),
        fields: BankAccountFields {
            account_number: model.account_number,
            account_type,
            account_name: model.account_name,
            currency: model.currency,
            is_preferred: model.is_preferred,
        },
    })
}
