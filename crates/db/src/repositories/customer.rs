//! Customer repository for database operations.
//!
//! Implements customer CRUD operations using SeaORM.

use bankroll_core::RepositoryError;
use bankroll_core::customer::{
    Customer, CustomerCriteria, CustomerFields, CustomerRepository as CustomerRepoTrait,
};
use bankroll_shared::types::{CustomerId, Page};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use super::{repository_error, storage_key};
use crate::entities::customers;

/// Customer repository implementation.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    db: DatabaseConnection,
}

impl CustomerRepository {
    /// Create a new customer repository.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl CustomerRepoTrait for CustomerRepository {
    async fn find_by_id(&self, id: CustomerId) -> Result<Option<Customer>, RepositoryError> {
        let Some(key) = storage_key(id.into_inner()) else {
            return Ok(None);
        };

        let model = customers::Entity::find_by_id(key)
            .one(&self.db)
            .await
            .map_err(|e| repository_error(&e))?;

        Ok(model.map(to_domain))
    }

    async fn find_by(
        &self,
        criteria: &CustomerCriteria,
        page: Page,
    ) -> Result<Vec<Customer>, RepositoryError> {
        let mut query = customers::Entity::find();
        if let Some(ssn) = &criteria.ssn {
            query = query.filter(customers::Column::Ssn.eq(ssn.as_str()));
        }

        let models = query
            .order_by_asc(customers::Column::Id)
            .limit(page.limit)
            .offset(page.offset)
            .all(&self.db)
            .await
            .map_err(|e| repository_error(&e))?;

        Ok(models.into_iter().map(to_domain).collect())
    }

    async fn save(
        &self,
        id: Option<CustomerId>,
        fields: &CustomerFields,
    ) -> Result<Customer, RepositoryError> {
        let mut active_model = customers::ActiveModel {
            id: NotSet,
            first_name: Set(fields.first_name.clone()),
            last_name: Set(fields.last_name.clone()),
            ssn: Set(fields.ssn.clone()),
        };

        let model = match id {
            None => active_model.insert(&self.db).await,
            Some(id) => {
                let key = storage_key(id.into_inner())
                    .ok_or_else(|| RepositoryError::database(format!("customer {id} is out of range")))?;
                active_model.id = Set(key);
                active_model.update(&self.db).await
            }
        }
        .map_err(|e| repository_error(&e))?;

        Ok(to_domain(model))
    }

    async fn delete(&self, id: CustomerId) -> Result<bool, RepositoryError> {
        let Some(key) = storage_key(id.into_inner()) else {
            return Ok(false);
        };

        let result = customers::Entity::delete_by_id(key)
            .exec(&self.db)
            .await
            .map_err(|e| repository_error(&e))?;

        Ok(result.rows_affected > 0)
    }
}

/// Convert database model to domain model.
fn to_domain(model: customers::Model) -> Customer {
    Customer {
        id: CustomerId::new(i64::from(model.id)),
        fields: CustomerFields {
            first_name: model.first_name,
            last_name: model.last_name,
            ssn: model.ssn,
        },
    }
}
