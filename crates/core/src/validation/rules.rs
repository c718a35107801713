//! Declarative field rules and the routine that evaluates them.
//!
//! Each entity declares a static table of [`FieldRule`]s. [`evaluate`] walks the
//! table in order and collects every violation; it never stops at the first one.

use bankroll_shared::{AppError, AppResult};

use super::mod11;

/// Prefix of the joined validation message.
pub const VALIDATION_MESSAGE_PREFIX: &str = "There were validation errors: ";

/// A field value as seen by the rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    /// Not provided, or JSON `null`.
    Absent,
    /// A string.
    Text(&'a str),
    /// A boolean.
    Bool(bool),
    /// An integer.
    Integer(i64),
    /// Provided, but with a JSON type no rule accepts for this field.
    Other,
}

/// Anything whose fields can be looked up by wire name.
pub trait FieldSource {
    /// Returns the value of `field`, or [`FieldValue::Absent`].
    fn field(&self, field: &str) -> FieldValue<'_>;
}

/// The check a rule performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    /// Present and, for strings, non-empty.
    Required,
    /// At least this many characters. Skips absent and empty values.
    MinLength(usize),
    /// At most this many characters. Skips absent and empty values.
    MaxLength(usize),
    /// Passes MOD-11. Skips absent and empty values.
    Mod11,
    /// One of the listed strings. Skips absent and empty values.
    Choice(&'static [&'static str]),
    /// A listed ISO 4217 code. Skips absent and empty values.
    CurrencyCode,
    /// A boolean, if present.
    Boolean,
}

/// One row of a rule table.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    /// Wire name of the field.
    pub field: &'static str,
    /// Check to perform.
    pub kind: RuleKind,
    /// Message reported when the check fails.
    pub message: &'static str,
}

impl FieldRule {
    /// Creates a rule.
    #[must_use]
    pub const fn new(field: &'static str, kind: RuleKind, message: &'static str) -> Self {
        Self {
            field,
            kind,
            message,
        }
    }

    /// Returns true if `value` satisfies the rule.
    #[must_use]
    pub fn check(&self, value: FieldValue<'_>) -> bool {
        match (self.kind, value) {
            (RuleKind::Required, FieldValue::Absent) => false,
            (RuleKind::Required, FieldValue::Text(s)) => !s.is_empty(),
            (RuleKind::Required, _) => true,

            (RuleKind::Boolean, FieldValue::Absent | FieldValue::Bool(_)) => true,
            (RuleKind::Boolean, _) => false,

            (_, FieldValue::Text(s)) if s.is_empty() => true,
            (RuleKind::MinLength(min), FieldValue::Text(s)) => s.chars().count() >= min,
            (RuleKind::MaxLength(max), FieldValue::Text(s)) => s.chars().count() <= max,
            (RuleKind::Mod11, FieldValue::Text(s)) => mod11::validate(s).is_ok(),
            (RuleKind::Choice(choices), FieldValue::Text(s)) => choices.contains(&s),
            (RuleKind::CurrencyCode, FieldValue::Text(s)) => is_currency_code(s),

            (_, FieldValue::Absent) => true,
            _ => false,
        }
    }
}

/// A failed rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Violation {
    /// Wire name of the field.
    pub field: &'static str,
    /// Message of the failed rule.
    pub message: &'static str,
}

/// Evaluates every rule against `source`, in table order.
#[must_use]
pub fn evaluate(rules: &[FieldRule], source: &impl FieldSource) -> Vec<Violation> {
    rules
        .iter()
        .filter(|rule| !rule.check(source.field(rule.field)))
        .map(|rule| Violation {
            field: rule.field,
            message: rule.message,
        })
        .collect()
}

/// Evaluates the rules and raises a validation error carrying every message.
pub fn validate(rules: &[FieldRule], source: &impl FieldSource) -> AppResult<()> {
    let violations = evaluate(rules, source);
    if violations.is_empty() {
        return Ok(());
    }

    Err(AppError::validation(join_violations(&violations)))
}

/// Joins violation messages into one sentence, each followed by a space.
#[must_use]
pub fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .fold(String::from(VALIDATION_MESSAGE_PREFIX), |mut acc, v| {
            acc.push_str(v.message);
            acc.push(' ');
            acc
        })
}

/// Active ISO 4217 alphabetic codes, sorted.
const ISO_4217_CODES: &[&str] = &[
    "AED", "AFN", "ALL", "AMD", "ANG", "AOA", "ARS", "AUD", "AWG", "AZN", "BAM", "BBD",
    "BDT", "BGN", "BHD", "BIF", "BMD", "BND", "BOB", "BOV", "BRL", "BSD", "BTN", "BWP",
    "BYN", "BZD", "CAD", "CDF", "CHE", "CHF", "CHW", "CLF", "CLP", "CNY", "COP", "COU",
    "CRC", "CUC", "CUP", "CVE", "CZK", "DJF", "DKK", "DOP", "DZD", "EGP", "ERN", "ETB",
    "EUR", "FJD", "FKP", "GBP", "GEL", "GHS", "GIP", "GMD", "GNF", "GTQ", "GYD", "HKD",
    "HNL", "HTG", "HUF", "IDR", "ILS", "INR", "IQD", "IRR", "ISK", "JMD", "JOD", "JPY",
    "KES", "KGS", "KHR", "KMF", "KPW", "KRW", "KWD", "KYD", "KZT", "LAK", "LBP", "LKR",
    "LRD", "LSL", "LYD", "MAD", "MDL", "MGA", "MKD", "MMK", "MNT", "MOP", "MRU", "MUR",
    "MVR", "MWK", "MXN", "MXV", "MYR", "MZN", "NAD", "NGN", "NIO", "NOK", "NPR", "NZD",
    "OMR", "PAB", "PEN", "PGK", "PHP", "PKR", "PLN", "PYG", "QAR", "RON", "RSD", "RUB",
    "RWF", "SAR", "SBD", "SCR", "SDG", "SEK", "SGD", "SHP", "SLE", "SLL", "SOS", "SRD",
    "SSP", "STN", "SVC", "SYP", "SZL", "THB", "TJS", "TMT", "TND", "TOP", "TRY", "TTD",
    "TWD", "TZS", "UAH", "UGX", "USD", "USN", "UYI", "UYU", "UYW", "UZS", "VED", "VES",
    "VND", "VUV", "WST", "XAF", "XAG", "XAU", "XBA", "XBB", "XBC", "XBD", "XCD", "XCG",
    "XDR", "XOF", "XPD", "XPF", "XPT", "XSU", "XUA", "YER", "ZAR", "ZMW", "ZWG", "ZWL",
];

fn is_currency_code(value: &str) -> bool {
    ISO_4217_CODES.binary_search(&value).is_ok()
}

/// Maps an optional string to a field value.
#[must_use]
pub fn text(value: Option<&String>) -> FieldValue<'_> {
    value.map_or(FieldValue::Absent, |s| FieldValue::Text(s))
}

/// Maps an optional JSON value to a field value.
#[must_use]
pub fn json(value: Option<&serde_json::Value>) -> FieldValue<'_> {
    match value {
        None | Some(serde_json::Value::Null) => FieldValue::Absent,
        Some(serde_json::Value::String(s)) => FieldValue::Text(s),
        Some(serde_json::Value::Bool(b)) => FieldValue::Bool(*b),
        Some(serde_json::Value::Number(n)) => n.as_i64().map_or(FieldValue::Other, FieldValue::Integer),
        Some(_) => FieldValue::Other,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use bankroll_shared::ErrorCode;

    use super::*;

    struct MapSource(HashMap<&'static str, FieldValue<'static>>);

    impl FieldSource for MapSource {
        fn field(&self, field: &str) -> FieldValue<'_> {
            self.0.get(field).copied().unwrap_or(FieldValue::Absent)
        }
    }

    const TABLE: &[FieldRule] = &[
        FieldRule::new("code", RuleKind::Required, "code required."),
        FieldRule::new("code", RuleKind::MinLength(2), "code too short."),
        FieldRule::new("code", RuleKind::Mod11, "code bad checksum."),
        FieldRule::new("kind", RuleKind::Choice(&["A", "B"]), "kind must be A or B."),
        FieldRule::new("flag", RuleKind::Boolean, "flag must be boolean."),
    ];

    fn source(pairs: &[(&'static str, FieldValue<'static>)]) -> MapSource {
        MapSource(pairs.iter().copied().collect())
    }

    #[test]
    fn test_all_rules_pass() {
        let s = source(&[
            ("code", FieldValue::Text("1120")),
            ("kind", FieldValue::Text("A")),
            ("flag", FieldValue::Bool(true)),
        ]);
        assert!(evaluate(TABLE, &s).is_empty());
        assert!(validate(TABLE, &s).is_ok());
    }

    #[test]
    fn test_absent_only_fails_required() {
        let violations = evaluate(TABLE, &source(&[]));
        assert_eq!(
            violations,
            vec![Violation {
                field: "code",
                message: "code required."
            }]
        );
    }

    #[test]
    fn test_collects_across_fields_in_table_order() {
        let s = source(&[
            ("code", FieldValue::Text("5")),
            ("kind", FieldValue::Text("C")),
            ("flag", FieldValue::Text("yes")),
        ]);
        let messages: Vec<&str> = evaluate(TABLE, &s).iter().map(|v| v.message).collect();
        assert_eq!(
            messages,
            vec![
                "code too short.",
                "code bad checksum.",
                "kind must be A or B.",
                "flag must be boolean."
            ]
        );
    }

    #[test]
    fn test_empty_string_only_fails_required() {
        let s = source(&[("code", FieldValue::Text("")), ("kind", FieldValue::Text(""))]);
        let messages: Vec<&str> = evaluate(TABLE, &s).iter().map(|v| v.message).collect();
        assert_eq!(messages, vec!["code required."]);
    }

    #[test]
    fn test_validate_joins_messages() {
        let s = source(&[("code", FieldValue::Text("311")), ("kind", FieldValue::Text("Z"))]);
        let err = validate(TABLE, &s).unwrap_err();

        assert_eq!(err.code(), ErrorCode::ValidationFailed);
        assert_eq!(
            err.message(),
            "There were validation errors: code bad checksum. kind must be A or B. "
        );
        assert_eq!(
            err.to_string(),
            "There were validation errors: code bad checksum. kind must be A or B.  (Error code: 3)"
        );
    }

    #[test]
    fn test_currency_code() {
        let rule = FieldRule::new("currency", RuleKind::CurrencyCode, "bad currency.");
        assert!(rule.check(FieldValue::Text("USD")));
        assert!(rule.check(FieldValue::Absent));
        assert!(!rule.check(FieldValue::Text("usd")));
        assert!(!rule.check(FieldValue::Text("US")));
        assert!(!rule.check(FieldValue::Text("USDT")));
        assert!(rule.check(FieldValue::Text("EUR")));
        assert!(!rule.check(FieldValue::Text("ZZZ")));
        assert!(!rule.check(FieldValue::Text("ABC")));
        assert!(!rule.check(FieldValue::Integer(840)));
    }

    #[test]
    fn test_currency_table_is_sorted() {
        assert!(ISO_4217_CODES.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(ISO_4217_CODES.iter().all(|code| code.len() == 3));
    }

    #[test]
    fn test_json_mapping() {
        let value = serde_json::json!({"s": "x", "b": false, "n": 4, "f": 1.5, "z": null});
        assert_eq!(json(value.get("s")), FieldValue::Text("x"));
        assert_eq!(json(value.get("b")), FieldValue::Bool(false));
        assert_eq!(json(value.get("n")), FieldValue::Integer(4));
        assert_eq!(json(value.get("f")), FieldValue::Other);
        assert_eq!(json(value.get("z")), FieldValue::Absent);
        assert_eq!(json(value.get("missing")), FieldValue::Absent);
    }
}
