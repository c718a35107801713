//! Canonical operation results.

use bankroll_shared::StatusClass;
use serde::Serialize;

use crate::bank_account::BankAccountView;
use crate::customer::CustomerView;

/// Body of a Created outcome: only the new id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CreatedId {
    /// Storage-assigned id.
    pub id: i64,
}

/// A page of customers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerList {
    /// Customers in storage order.
    pub customers: Vec<CustomerView>,
}

/// A page of bank accounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BankAccountList {
    /// Bank accounts in storage order.
    pub bank_accounts: Vec<BankAccountView>,
}

/// What an outcome carries back to the boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum OutcomePayload {
    /// New id after Create.
    Created(CreatedId),
    /// One customer.
    Customer(CustomerView),
    /// A page of customers.
    Customers(CustomerList),
    /// One bank account.
    BankAccount(BankAccountView),
    /// A page of bank accounts.
    BankAccounts(BankAccountList),
}

/// Result of executing one intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Result class.
    pub status: StatusClass,
    /// Optional body.
    pub payload: Option<OutcomePayload>,
}

impl Outcome {
    /// Created, carrying only the new id.
    #[must_use]
    pub const fn created(id: i64) -> Self {
        Self {
            status: StatusClass::Created,
            payload: Some(OutcomePayload::Created(CreatedId { id })),
        }
    }

    /// Ok, carrying a body.
    #[must_use]
    pub const fn ok(payload: OutcomePayload) -> Self {
        Self {
            status: StatusClass::Ok,
            payload: Some(payload),
        }
    }

    /// NoContent.
    #[must_use]
    pub const fn no_content() -> Self {
        Self {
            status: StatusClass::NoContent,
            payload: None,
        }
    }

    /// NotFound without a body. Not an error.
    #[must_use]
    pub const fn not_found() -> Self {
        Self {
            status: StatusClass::NotFound,
            payload: None,
        }
    }

    /// Returns the new id of a Created outcome.
    #[must_use]
    pub fn created_id(&self) -> Option<i64> {
        match &self.payload {
            Some(OutcomePayload::Created(created)) => Some(created.id),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_created_serializes_id_only() {
        let outcome = Outcome::created(7);
        assert_eq!(outcome.status, StatusClass::Created);
        assert_eq!(outcome.created_id(), Some(7));
        assert_eq!(
            serde_json::to_value(outcome.payload).unwrap(),
            serde_json::json!({"id": 7})
        );
    }

    #[test]
    fn test_bodyless_outcomes() {
        assert_eq!(Outcome::no_content().payload, None);
        assert_eq!(Outcome::not_found().status, StatusClass::NotFound);
        assert_eq!(Outcome::not_found().payload, None);
    }

    #[test]
    fn test_empty_lists_keep_their_key() {
        let customers = OutcomePayload::Customers(CustomerList { customers: vec![] });
        let accounts = OutcomePayload::BankAccounts(BankAccountList {
            bank_accounts: vec![],
        });

        assert_eq!(
            serde_json::to_value(customers).unwrap(),
            serde_json::json!({"customers": []})
        );
        assert_eq!(
            serde_json::to_value(accounts).unwrap(),
            serde_json::json!({"bank_accounts": []})
        );
    }
}
