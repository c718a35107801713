//! Field validation.
//!
//! This module provides:
//! - MOD-11 check-digit validation for account numbers
//! - Declarative per-entity rule tables and the routine that evaluates them

pub mod mod11;
pub mod rules;

#[cfg(test)]
mod mod11_props;

pub use mod11::Mod11Violation;
pub use rules::{FieldRule, FieldSource, FieldValue, RuleKind, Violation, evaluate, validate};
