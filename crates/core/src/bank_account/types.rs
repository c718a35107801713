//! Bank account domain types.

use std::fmt;
use std::str::FromStr;

use bankroll_shared::types::{BankAccountId, CustomerId};
use bankroll_shared::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::customer::types::overlay;
use crate::validation::rules::{self, FieldRule, FieldSource, FieldValue, RuleKind};

/// Wire name of the account number field.
pub const FIELD_ACCOUNT_NUMBER: &str = "account_number";
/// Wire name of the account type field.
pub const FIELD_ACCOUNT_TYPE: &str = "account_type";
/// Wire name of the account name field.
pub const FIELD_ACCOUNT_NAME: &str = "account_name";
/// Wire name of the currency field.
pub const FIELD_CURRENCY: &str = "currency";
/// Wire name of the preferred flag.
pub const FIELD_IS_PREFERRED: &str = "is_preferred";
/// Wire name of the owning customer.
pub const FIELD_CUSTOMER_ID: &str = "customer_id";

const ACCOUNT_TYPES: &[&str] = &["ORGANIZATION", "PRIVATE"];

const ACCOUNT_TYPE_MESSAGE: &str = "The account_type must be either ORGANIZATION or PRIVATE.";
const IS_PREFERRED_MESSAGE: &str = "The is_preferred flag must be either true or false.";

/// Rules every bank account must satisfy, in reporting order.
pub const BANK_ACCOUNT_RULES: &[FieldRule] = &[
    FieldRule::new(
        FIELD_ACCOUNT_NUMBER,
        RuleKind::Required,
        "The account_number field is required.",
    ),
    FieldRule::new(
        FIELD_ACCOUNT_NUMBER,
        RuleKind::MinLength(2),
        "The account_number must be at least 2 characters long.",
    ),
    FieldRule::new(
        FIELD_ACCOUNT_NUMBER,
        RuleKind::MaxLength(11),
        "The account_number must be no more than 11 characters long.",
    ),
    FieldRule::new(
        FIELD_ACCOUNT_NUMBER,
        RuleKind::Mod11,
        "The account_number is invalid (MOD11 required).",
    ),
    FieldRule::new(
        FIELD_ACCOUNT_TYPE,
        RuleKind::Required,
        "The account_type field is required.",
    ),
    FieldRule::new(
        FIELD_ACCOUNT_TYPE,
        RuleKind::Choice(ACCOUNT_TYPES),
        ACCOUNT_TYPE_MESSAGE,
    ),
    FieldRule::new(
        FIELD_ACCOUNT_NAME,
        RuleKind::Required,
        "The account_name field is required.",
    ),
    FieldRule::new(
        FIELD_CURRENCY,
        RuleKind::Required,
        "The currency field is required.",
    ),
    FieldRule::new(
        FIELD_CURRENCY,
        RuleKind::CurrencyCode,
        "The currency must be a valid 3 character currency code (ISO 4217).",
    ),
    FieldRule::new(FIELD_IS_PREFERRED, RuleKind::Boolean, IS_PREFERRED_MESSAGE),
    FieldRule::new(
        FIELD_CUSTOMER_ID,
        RuleKind::Required,
        "The customer_id field is required.",
    ),
];

/// Kind of account holder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountType {
    /// Held by a company or other organization.
    Organization,
    /// Held by a private person.
    Private,
}

impl AccountType {
    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Organization => "ORGANIZATION",
            Self::Private => "PRIVATE",
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An account type string outside the enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown account type: {0}")]
pub struct UnknownAccountType(pub String);

impl FromStr for AccountType {
    type Err = UnknownAccountType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ORGANIZATION" => Ok(Self::Organization),
            "PRIVATE" => Ok(Self::Private),
            other => Err(UnknownAccountType(other.to_string())),
        }
    }
}

/// Bank account fields shared by the stored entity and its projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankAccountFields {
    /// MOD-11 account number, 2 to 11 characters.
    pub account_number: String,
    /// Kind of holder.
    pub account_type: AccountType,
    /// Display name.
    pub account_name: String,
    /// ISO 4217 code.
    pub currency: String,
    /// Whether this is the customer's preferred account.
    pub is_preferred: bool,
}

/// A stored bank account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankAccount {
    /// Storage-assigned id.
    pub id: BankAccountId,
    /// Owning customer. Never changes.
    pub customer_id: CustomerId,
    /// Current field values.
    pub fields: BankAccountFields,
}

/// Bank account as rendered to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BankAccountView {
    /// Account id.
    pub id: i64,
    /// Field values.
    #[serde(flatten)]
    pub fields: BankAccountFields,
    /// Owning customer id.
    pub customer_id: i64,
}

impl From<BankAccount> for BankAccountView {
    fn from(account: BankAccount) -> Self {
        Self {
            id: account.id.into_inner(),
            fields: account.fields,
            customer_id: account.customer_id.into_inner(),
        }
    }
}

/// Inbound bank account body for Create and Update.
///
/// `is_preferred` is kept as raw JSON so a non-boolean value is reported by
/// validation rather than rejected as an unparsable body.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BankAccountPayload {
    /// Account number.
    pub account_number: Option<String>,
    /// `ORGANIZATION` or `PRIVATE`.
    pub account_type: Option<String>,
    /// Display name.
    pub account_name: Option<String>,
    /// ISO 4217 code.
    pub currency: Option<String>,
    /// Preferred flag.
    pub is_preferred: Option<Value>,
    /// Owning customer. Ignored on Update.
    pub customer_id: Option<i64>,
}

impl BankAccountPayload {
    /// Builds the view validated on Update: non-empty strings and a non-null flag
    /// from this payload, everything else from `stored`. Ownership always comes
    /// from `stored`.
    #[must_use]
    pub fn merge_onto(&self, stored: &BankAccount) -> Self {
        let current = &stored.fields;
        let is_preferred = match &self.is_preferred {
            None | Some(Value::Null) => Value::Bool(current.is_preferred),
            Some(value) => value.clone(),
        };

        Self {
            account_number: Some(overlay(
                self.account_number.as_ref(),
                &current.account_number,
            )),
            account_type: Some(overlay(
                self.account_type.as_ref(),
                current.account_type.as_str(),
            )),
            account_name: Some(overlay(self.account_name.as_ref(), &current.account_name)),
            currency: Some(overlay(self.currency.as_ref(), &current.currency)),
            is_preferred: Some(is_preferred),
            customer_id: Some(stored.customer_id.into_inner()),
        }
    }

    /// Returns true if the payload asks for a preferred account.
    #[must_use]
    pub fn wants_preferred(&self) -> bool {
        matches!(self.is_preferred, Some(Value::Bool(true)))
    }

    /// Converts a validated payload into entity fields.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the account type or preferred flag is not
    /// one of the accepted values.
    pub fn into_fields(self) -> AppResult<BankAccountFields> {
        let account_type = self
            .account_type
            .as_deref()
            .unwrap_or_default()
            .parse::<AccountType>()
            .map_err(|e| AppError::validation(ACCOUNT_TYPE_MESSAGE).with_source(e))?;

        let is_preferred = match self.is_preferred {
            None | Some(Value::Null) => false,
            Some(Value::Bool(flag)) => flag,
            Some(_) => return Err(AppError::validation(IS_PREFERRED_MESSAGE)),
        };

        Ok(BankAccountFields {
            account_number: self.account_number.unwrap_or_default(),
            account_type,
            account_name: self.account_name.unwrap_or_default(),
            currency: self.currency.unwrap_or_default(),
            is_preferred,
        })
    }
}

impl FieldSource for BankAccountPayload {
    fn field(&self, field: &str) -> FieldValue<'_> {
        match field {
            FIELD_ACCOUNT_NUMBER => rules::text(self.account_number.as_ref()),
            FIELD_ACCOUNT_TYPE => rules::text(self.account_type.as_ref()),
            FIELD_ACCOUNT_NAME => rules::text(self.account_name.as_ref()),
            FIELD_CURRENCY => rules::text(self.currency.as_ref()),
            FIELD_IS_PREFERRED => rules::json(self.is_preferred.as_ref()),
            FIELD_CUSTOMER_ID => self
                .customer_id
                .map_or(FieldValue::Absent, FieldValue::Integer),
            _ => FieldValue::Absent,
        }
    }
}

/// Filter for bank account lookups. Empty matches every account.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BankAccountCriteria {
    /// Owning customer.
    pub customer_id: Option<CustomerId>,
    /// Preferred flag.
    pub is_preferred: Option<bool>,
}

impl BankAccountCriteria {
    /// Matches the accounts of one customer.
    #[must_use]
    pub const fn of_customer(customer_id: CustomerId) -> Self {
        Self {
            customer_id: Some(customer_id),
            is_preferred: None,
        }
    }

    /// Matches the preferred account of one customer.
    #[must_use]
    pub const fn preferred_of(customer_id: CustomerId) -> Self {
        Self {
            customer_id: Some(customer_id),
            is_preferred: Some(true),
        }
    }

    /// Returns true if `account` satisfies the criteria.
    #[must_use]
    pub fn matches(&self, account: &BankAccount) -> bool {
        self.customer_id.is_none_or(|id| id == account.customer_id)
            && self
                .is_preferred
                .is_none_or(|flag| flag == account.fields.is_preferred)
    }
}
