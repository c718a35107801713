//! `SeaORM` entity definitions.

pub mod bank_accounts;
pub mod customers;

pub mod prelude {
    //! Entity re-exports.

    pub use super::bank_accounts::Entity as BankAccounts;
    pub use super::customers::Entity as Customers;
}
