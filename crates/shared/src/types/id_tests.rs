use super::*;
use std::str::FromStr;

#[test]
fn test_typed_id_roundtrip_inner() {
    let id = CustomerId::new(42);
    assert_eq!(id.into_inner(), 42);
    assert_eq!(CustomerId::from(42), id);
}

#[test]
fn test_typed_id_display() {
    assert_eq!(BankAccountId::new(7).to_string(), "7");
}

#[test]
fn test_typed_id_from_str() {
    assert_eq!(CustomerId::from_str("15").unwrap(), CustomerId::new(15));
    assert!(CustomerId::from_str("non-number").is_err());
    assert!(CustomerId::from_str("").is_err());
}

#[test]
fn test_typed_id_serializes_transparently() {
    let json = serde_json::to_string(&BankAccountId::new(3)).unwrap();
    assert_eq!(json, "3");

    let id: CustomerId = serde_json::from_str("99").unwrap();
    assert_eq!(id, CustomerId::new(99));
}
