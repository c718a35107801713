//! Property-based tests for MOD-11 validation.

use proptest::prelude::*;

use super::mod11::{check_digit, remainder, validate, Mod11Violation, MAX_LENGTH};

/// Strategy for a digit-only body of 1 to 10 characters.
fn body_strategy() -> impl Strategy<Value = String> {
    proptest::collection::vec(0u32..10, 1..MAX_LENGTH)
        .prop_map(|digits| digits.into_iter().filter_map(|d| char::from_digit(d, 10)).collect())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Any body followed by its computed check character has remainder 0.
    #[test]
    fn prop_computed_check_digit_validates(body in body_strategy()) {
        let check = check_digit(&body).expect("digit-only body has a check character");
        let value = format!("{body}{check}");

        prop_assert_eq!(remainder(&value), 0);
        prop_assert_eq!(validate(&value), Ok(()));
    }

    /// Any other check digit fails with a non-zero remainder.
    #[test]
    fn prop_wrong_check_digit_fails(body in body_strategy(), replacement in 1u32..10) {
        let check = check_digit(&body).expect("digit-only body has a check character");
        let Some(wrong) = char::from_digit(replacement, 10) else {
            return Ok(());
        };
        prop_assume!(wrong != check);

        let value = format!("{body}{wrong}");
        let result = validate(&value);

        prop_assert!(matches!(result, Err(Mod11Violation::ChecksumFailed { remainder }) if remainder != 0), "expected ChecksumFailed with non-zero remainder, got {:?}", result);
    }

    /// Over-long input is always TOO_LONG, whatever its characters.
    #[test]
    fn prop_over_long_is_too_long(value in "[0-9A-Za-z]{12,20}") {
        prop_assert_eq!(validate(&value), Err(Mod11Violation::TooLong));
    }

    /// A letter anywhere before the check position is INVALID_CHARACTERS.
    #[test]
    fn prop_letter_in_body_is_invalid(
        prefix in "[0-9]{0,4}",
        letter in "[A-Za-z]",
        suffix in "[0-9]{1,5}",
    ) {
        let value = format!("{prefix}{letter}{suffix}");
        prop_assert_eq!(validate(&value), Err(Mod11Violation::InvalidCharacters));
    }
}
