//! MOD-11 check-digit validation for account numbers.
//!
//! The last character is the check digit. `X` stands for 10 and `0` stands for 11;
//! any other digit stands for itself. Each preceding digit at position `i` (0-based
//! from the left) is weighted by `len - i`, so for an 11 character value the first
//! digit is weighted by 11 and the tenth by 2. The value is valid when the weighted
//! sum plus the check value is divisible by 11.

use thiserror::Error;

/// Shortest accepted value, including the check digit.
pub const MIN_LENGTH: usize = 2;

/// Longest accepted value, including the check digit.
pub const MAX_LENGTH: usize = 11;

const MODULUS: u32 = 11;

/// Why a value failed MOD-11 validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Mod11Violation {
    /// Fewer than [`MIN_LENGTH`] characters.
    #[error("value is shorter than 2 characters")]
    TooShort,

    /// More than [`MAX_LENGTH`] characters.
    #[error("value is longer than 11 characters")]
    TooLong,

    /// A non-digit before the check position, or a check character that is neither a digit nor `X`.
    #[error("value contains invalid characters")]
    InvalidCharacters,

    /// Well-formed, but the weighted sum leaves a remainder.
    #[error("checksum failed with remainder {remainder}")]
    ChecksumFailed {
        /// Weighted sum modulo 11.
        remainder: u32,
    },
}

impl Mod11Violation {
    /// Returns the violation code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::TooShort => "TOO_SHORT_ERROR",
            Self::TooLong => "TOO_LONG_ERROR",
            Self::InvalidCharacters => "INVALID_CHARACTERS_ERROR",
            Self::ChecksumFailed { .. } => "CHECKSUM_FAILED_ERROR",
        }
    }
}

/// Validates `value` against the MOD-11 scheme.
///
/// An empty value is treated as "not provided" and passes; presence is a separate rule.
/// Checks run in order and the first failure wins: length, body characters, check
/// character, checksum.
pub fn validate(value: &str) -> Result<(), Mod11Violation> {
    if value.is_empty() {
        return Ok(());
    }

    let length = value.chars().count();
    if length < MIN_LENGTH {
        return Err(Mod11Violation::TooShort);
    }
    if length > MAX_LENGTH {
        return Err(Mod11Violation::TooLong);
    }

    let mut chars = value.chars();
    let Some(check) = chars.next_back() else {
        return Err(Mod11Violation::TooShort);
    };

    if !chars.all(|c| c.is_ascii_digit()) {
        return Err(Mod11Violation::InvalidCharacters);
    }
    if !check.is_ascii_digit() && check != 'X' {
        return Err(Mod11Violation::InvalidCharacters);
    }

    match remainder(value) {
        0 => Ok(()),
        remainder => Err(Mod11Violation::ChecksumFailed { remainder }),
    }
}

/// Computes the weighted sum of `value` modulo 11.
///
/// Expects a value that already passed the length and character checks; stray
/// non-digits count as zero.
#[must_use]
pub fn remainder(value: &str) -> u32 {
    let digits: Vec<char> = value.chars().collect();
    let Some((&check, body)) = digits.split_last() else {
        return 0;
    };

    let length = digits.len();
    let seed = check_value(check);

    let sum = body
        .iter()
        .enumerate()
        .fold(seed, |acc, (i, c)| acc + weight(length, i) * digit(*c));

    sum % MODULUS
}

/// Returns the check character that makes `body` followed by it a valid value.
///
/// Returns `None` when `body` is empty, too long, or contains a non-digit.
#[must_use]
pub fn check_digit(body: &str) -> Option<char> {
    if body.is_empty()
        || body.chars().count() >= MAX_LENGTH
        || !body.chars().all(|c| c.is_ascii_digit())
    {
        return None;
    }

    let length = body.chars().count() + 1;
    let sum = body
        .chars()
        .enumerate()
        .fold(0, |acc, (i, c)| acc + weight(length, i) * digit(c));

    match MODULUS - sum % MODULUS {
        11 => Some('0'),
        10 => Some('X'),
        n => char::from_digit(n, 10),
    }
}

fn check_value(check: char) -> u32 {
    match check {
        'X' => 10,
        '0' => 11,
        c => digit(c),
    }
}

fn digit(c: char) -> u32 {
    c.to_digit(10).unwrap_or(0)
}

#[allow(clippy::cast_possible_truncation)]
fn weight(length: usize, position: usize) -> u32 {
    // length <= MAX_LENGTH, so this always fits
    (length - position) as u32
}
