//! Patient identifier stored on the monitor

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Identifier stored on the monitor
///
/// The device keeps the identifier as a 22-digit ASCII-hex field, so at most
/// 11 printable ASCII characters fit.
///
/// The unused digits are padded with `9`, and readers stop at the first
/// `"99"` in the hex text. An identifier whose last character has a hex
/// code ending in `9` (`)`, `9`, `I`, `Y`, `i`, `y`) is stored fine but
/// cannot be read back: `"JOHNNY"` becomes `4a4f484e4e59999...` and the
/// scan stops inside `59`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier(String);

impl Identifier {
    /// Maximum identifier length in characters
    pub const MAX_LEN: usize = 11;

    /// Validate and wrap an identifier
    ///
    /// # Examples
    ///
    /// ```
    /// use microlife_types::Identifier;
    ///
    /// let id = Identifier::new("PATIENT01").unwrap();
    /// assert_eq!(id.as_str(), "PATIENT01");
    ///
    /// assert!(Identifier::new("much-too-long-id").is_err());
    /// ```
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();

        if value.len() > Self::MAX_LEN {
            return Err(Error::Validation(format!(
                "identifier '{}' is {} characters long (max: {})",
                value,
                value.len(),
                Self::MAX_LEN
            )));
        }

        if let Some(c) = value.chars().find(|c| !(' '..='~').contains(c)) {
            return Err(Error::Validation(format!(
                "identifier contains non-printable or non-ASCII character {:?}",
                c
            )));
        }

        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Identifier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_valid() {
        let id = Identifier::new("JOHN DOE").unwrap();
        assert_eq!(id.as_str(), "JOHN DOE");
        assert_eq!(id.to_string(), "JOHN DOE");
    }

    #[test]
    fn test_identifier_max_length() {
        assert!(Identifier::new("ABCDEFGHIJK").is_ok());
        assert!(matches!(
            Identifier::new("ABCDEFGHIJKL"),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn test_identifier_rejects_non_ascii() {
        assert!(Identifier::new("Zoé").is_err());
        assert!(Identifier::new("tab\there").is_err());
    }

    #[test]
    fn test_identifier_empty() {
        let id: Identifier = "".parse().unwrap();
        assert_eq!(id.as_str(), "");
    }
}
