//! Customers: rule table, payload merging, and the CRUD orchestrator.

pub mod service;
pub mod types;


pub use service::{CustomerRepository, CustomerService, DUPLICATE_SSN_MESSAGE};
pub use types::{
    CUSTOMER_RULES, Customer, CustomerCriteria, CustomerFields, CustomerPayload, CustomerView,
};
