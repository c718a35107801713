//! Bank accounts: rule table, payload merging, and the CRUD orchestrator.
//!
//! Each account belongs to exactly one customer, and at most one account per
//! customer is preferred.

pub mod service;
pub mod types;


pub use service::{BankAccountRepository, BankAccountService, PREFERRED_ALREADY_SET_MESSAGE};
pub use types::{
    AccountType, BANK_ACCOUNT_RULES, BankAccount, BankAccountCriteria, BankAccountFields,
    BankAccountPayload, BankAccountView,
};
