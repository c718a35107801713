//! In-memory repositories for orchestrator tests.

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};

use bankroll_shared::types::{BankAccountId, CustomerId, Page};

use crate::bank_account::{BankAccount, BankAccountCriteria, BankAccountFields, BankAccountRepository};
use crate::customer::{Customer, CustomerCriteria, CustomerFields, CustomerRepository};
use crate::repository::RepositoryError;

/// Both tables behind one lock each, with a unique ssn index and cascading deletes.
#[derive(Default)]
pub struct MemoryStore {
    customers: Mutex<BTreeMap<i64, CustomerFields>>,
    accounts: Mutex<BTreeMap<i64, (CustomerId, BankAccountFields)>>,
    next_id: AtomicI64,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent save fail with a database error.
    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }

    pub fn insert_customer(&self, fields: CustomerFields) -> CustomerId {
        let id = self.next();
        self.customers.lock().unwrap().insert(id, fields);
        CustomerId::new(id)
    }

    pub fn insert_account(&self, customer_id: CustomerId, fields: BankAccountFields) -> BankAccountId {
        let id = self.next();
        self.accounts
            .lock()
            .unwrap()
            .insert(id, (customer_id, fields));
        BankAccountId::new(id)
    }

    pub fn account(&self, id: BankAccountId) -> Option<BankAccount> {
        self.accounts
            .lock()
            .unwrap()
            .get(&id.into_inner())
            .map(|(customer_id, fields)| BankAccount {
                id,
                customer_id: *customer_id,
                fields: fields.clone(),
            })
    }

    pub fn customer(&self, id: CustomerId) -> Option<Customer> {
        self.customers
            .lock()
            .unwrap()
            .get(&id.into_inner())
            .map(|fields| Customer {
                id,
                fields: fields.clone(),
            })
    }

    pub fn account_count(&self) -> usize {
        self.accounts.lock().unwrap().len()
    }

    fn next(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn check_writable(&self) -> Result<(), RepositoryError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(RepositoryError::database("connection reset"));
        }
        Ok(())
    }
}

fn window<T>(rows: impl Iterator<Item = T>, page: Page) -> Vec<T> {
    rows.skip(usize::try_from(page.offset).unwrap())
        .take(usize::try_from(page.limit).unwrap())
        .collect()
}

impl CustomerRepository for MemoryStore {
    async fn find_by_id(&self, id: CustomerId) -> Result<Option<Customer>, RepositoryError> {
        Ok(self.customer(id))
    }

    async fn find_by(
        &self,
        criteria: &CustomerCriteria,
        page: Page,
    ) -> Result<Vec<Customer>, RepositoryError> {
        let customers = self.customers.lock().unwrap();
        let rows = customers
            .iter()
            .map(|(id, fields)| Customer {
                id: CustomerId::new(*id),
                fields: fields.clone(),
            })
            .filter(|c| criteria.matches(c));
        Ok(window(rows, page))
    }

    async fn save(
        &self,
        id: Option<CustomerId>,
        fields: &CustomerFields,
    ) -> Result<Customer, RepositoryError> {
        self.check_writable()?;

        let mut customers = self.customers.lock().unwrap();
        let taken = customers
            .iter()
            .any(|(key, c)| c.ssn == fields.ssn && Some(*key) != id.map(CustomerId::into_inner));
        if taken {
            return Err(RepositoryError::UniqueViolation("customers.ssn".to_string()));
        }

        let key = id.map_or_else(|| self.next(), CustomerId::into_inner);
        customers.insert(key, fields.clone());
        Ok(Customer {
            id: CustomerId::new(key),
            fields: fields.clone(),
        })
    }

    async fn delete(&self, id: CustomerId) -> Result<bool, RepositoryError> {
        let removed = self.customers.lock().unwrap().remove(&id.into_inner());
        self.accounts
            .lock()
            .unwrap()
            .retain(|_, (owner, _)| *owner != id);
        Ok(removed.is_some())
    }
}

impl BankAccountRepository for MemoryStore {
    async fn find_by_id(&self, id: BankAccountId) -> Result<Option<BankAccount>, RepositoryError> {
        Ok(self.account(id))
    }

    async fn find_by(
        &self,
        criteria: &BankAccountCriteria,
        page: Page,
    ) -> Result<Vec<BankAccount>, RepositoryError> {
        let accounts = self.accounts.lock().unwrap();
        let rows = accounts
            .iter()
            .map(|(id, (customer_id, fields))| BankAccount {
                id: BankAccountId::new(*id),
                customer_id: *customer_id,
                fields: fields.clone(),
            })
            .filter(|a| criteria.matches(a));
        Ok(window(rows, page))
    }

    async fn save(
        &self,
        id: Option<BankAccountId>,
        customer_id: CustomerId,
        fields: &BankAccountFields,
    ) -> Result<BankAccount, RepositoryError> {
        self.check_writable()?;

        let mut accounts = self.accounts.lock().unwrap();
        let (key, owner) = match id {
            Some(id) => {
                let owner = accounts
                    .get(&id.into_inner())
                    .map_or(customer_id, |(owner, _)| *owner);
                (id.into_inner(), owner)
            }
            None => (self.next(), customer_id),
        };
        accounts.insert(key, (owner, fields.clone()));

        Ok(BankAccount {
            id: BankAccountId::new(key),
            customer_id: owner,
            fields: fields.clone(),
        })
    }

    async fn delete(&self, id: BankAccountId) -> Result<bool, RepositoryError> {
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .remove(&id.into_inner())
            .is_some())
    }
}
