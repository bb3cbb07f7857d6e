//! Validated primitives shared across the MedReport crates.
//!
//! These types encode the field-level rules of the intake form in the type system, so
//! a value that has been accepted once never needs to be checked again.

/// Errors that can occur when creating validated text types.
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    /// The input text was empty
    #[error("Text cannot be empty")]
    Empty,
}

/// A string type that guarantees non-empty content.
///
/// The text is kept exactly as entered, surrounding whitespace included; only the empty
/// string is rejected. Values shown back to the user (the report ID, the patient name)
/// must match what was typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Creates a new `NonEmptyText` from the given input.
    pub fn new(input: impl Into<String>) -> Result<Self, TextError> {
        let text = input.into();
        if text.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(text))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for NonEmptyText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for NonEmptyText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NonEmptyText::new(s).map_err(serde::de::Error::custom)
    }
}

/// Errors that can occur when parsing an [`Age`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AgeError {
    /// The input is not a finite number.
    #[error("age is not a number")]
    NotNumeric,
    /// The number is negative or above [`Age::MAX`].
    #[error("age must be between {min} and {max}", min = Age::MIN, max = Age::MAX)]
    OutOfRange,
}

/// A patient age in years, within the inclusive range `[0, 150]`.
///
/// Fractional ages are accepted (`"0.5"` for a six-month-old).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Age(f64);

impl Age {
    /// Lowest accepted age.
    pub const MIN: f64 = 0.0;
    /// Highest accepted age.
    pub const MAX: f64 = 150.0;

    /// Parses an age typed into a form field, the way a browser converts form text to a
    /// number.
    ///
    /// - Surrounding whitespace is ignored, and blank input reads as `0`
    /// - `0x`, `0o` and `0b` prefixes select hexadecimal, octal and binary integers
    /// - Otherwise any decimal or exponent notation is accepted
    ///
    /// `NaN` and infinities are rejected.
    pub fn parse(input: &str) -> Result<Self, AgeError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Self::new(0.0);
        }

        let value = match radix_literal(trimmed) {
            Some((radix, digits)) => u64::from_str_radix(digits, radix)
                .map(|n| n as f64)
                .map_err(|_| AgeError::NotNumeric)?,
            None => trimmed.parse().map_err(|_| AgeError::NotNumeric)?,
        };
        Self::new(value)
    }

    /// Wraps an already numeric age, checking the range.
    pub fn new(value: f64) -> Result<Self, AgeError> {
        if value.is_nan() {
            return Err(AgeError::NotNumeric);
        }
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(AgeError::OutOfRange);
        }
        Ok(Self(value))
    }

    /// Returns the age in years.
    pub fn years(self) -> f64 {
        self.0
    }
}

/// Splits `0x1A` into `(16, "1A")`. Signs are not allowed in front of a prefix.
fn radix_literal(text: &str) -> Option<(u32, &str)> {
    let (prefix, digits) = text.split_at_checked(2)?;
    let radix = match prefix {
        "0x" | "0X" => 16,
        "0o" | "0O" => 8,
        "0b" | "0B" => 2,
        _ => return None,
    };
    // from_str_radix would accept a leading '+'
    if digits.starts_with('+') {
        return None;
    }
    Some((radix, digits))
}

impl std::fmt::Display for Age {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Age {
    type Err = AgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
