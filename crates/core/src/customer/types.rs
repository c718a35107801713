//! Customer domain types.

use bankroll_shared::types::CustomerId;
use serde::{Deserialize, Serialize};

use crate::validation::rules::{self, FieldRule, FieldSource, FieldValue, RuleKind};

/// Wire name of the first name field.
pub const FIELD_FIRST_NAME: &str = "first_name";
/// Wire name of the last name field.
pub const FIELD_LAST_NAME: &str = "last_name";
/// Wire name of the ssn field.
pub const FIELD_SSN: &str = "ssn";

/// Rules every customer must satisfy, in reporting order.
pub const CUSTOMER_RULES: &[FieldRule] = &[
    FieldRule::new(
        FIELD_FIRST_NAME,
        RuleKind::Required,
        "The first_name field is required.",
    ),
    FieldRule::new(
        FIELD_LAST_NAME,
        RuleKind::Required,
        "The last_name field is required.",
    ),
    FieldRule::new(FIELD_SSN, RuleKind::Required, "The ssn field is required."),
];

/// Customer fields shared by the stored entity and its projection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerFields {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Social security number, unique across customers.
    pub ssn: String,
}

impl FieldSource for CustomerFields {
    fn field(&self, field: &str) -> FieldValue<'_> {
        match field {
            FIELD_FIRST_NAME => FieldValue::Text(&self.first_name),
            FIELD_LAST_NAME => FieldValue::Text(&self.last_name),
            FIELD_SSN => FieldValue::Text(&self.ssn),
            _ => FieldValue::Absent,
        }
    }
}

/// A stored customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    /// Storage-assigned id.
    pub id: CustomerId,
    /// Current field values.
    pub fields: CustomerFields,
}

/// Customer as rendered to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerView {
    /// Customer id.
    pub id: i64,
    /// Field values.
    #[serde(flatten)]
    pub fields: CustomerFields,
}

impl From<Customer> for CustomerView {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id.into_inner(),
            fields: customer.fields,
        }
    }
}

/// Inbound customer body for Create and Update.
///
/// Unknown keys, including `id`, are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CustomerPayload {
    /// Given name.
    pub first_name: Option<String>,
    /// Family name.
    pub last_name: Option<String>,
    /// Social security number.
    pub ssn: Option<String>,
}

impl CustomerPayload {
    /// Converts a validated payload into entity fields.
    #[must_use]
    pub fn into_fields(self) -> CustomerFields {
        CustomerFields {
            first_name: self.first_name.unwrap_or_default(),
            last_name: self.last_name.unwrap_or_default(),
            ssn: self.ssn.unwrap_or_default(),
        }
    }

    /// Overlays the non-empty values of this payload onto `stored`.
    #[must_use]
    pub fn merge_onto(&self, stored: &CustomerFields) -> CustomerFields {
        CustomerFields {
            first_name: overlay(self.first_name.as_ref(), &stored.first_name),
            last_name: overlay(self.last_name.as_ref(), &stored.last_name),
            ssn: overlay(self.ssn.as_ref(), &stored.ssn),
        }
    }
}

impl FieldSource for CustomerPayload {
    fn field(&self, field: &str) -> FieldValue<'_> {
        match field {
            FIELD_FIRST_NAME => rules::text(self.first_name.as_ref()),
            FIELD_LAST_NAME => rules::text(self.last_name.as_ref()),
            FIELD_SSN => rules::text(self.ssn.as_ref()),
            _ => FieldValue::Absent,
        }
    }
}

/// Filter for customer lookups. Empty matches every customer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerCriteria {
    /// Exact ssn match.
    pub ssn: Option<String>,
}

impl CustomerCriteria {
    /// Matches customers holding `ssn`.
    #[must_use]
    pub fn by_ssn(ssn: impl Into<String>) -> Self {
        Self {
            ssn: Some(ssn.into()),
        }
    }

    /// Returns true if `customer` satisfies the criteria.
    #[must_use]
    pub fn matches(&self, customer: &Customer) -> bool {
        self.ssn
            .as_ref()
            .is_none_or(|ssn| *ssn == customer.fields.ssn)
    }
}

/// Picks `update` when it holds a non-empty string, else keeps `current`.
pub(crate) fn overlay(update: Option<&String>, current: &str) -> String {
    match update {
        Some(value) if !value.is_empty() => value.clone(),
        _ => current.to_string(),
    }
}
