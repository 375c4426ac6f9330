pub mod matcher;

use std::fmt;

use serde::Serialize;

pub use matcher::IdentifierMatcher;

/// Receipt number recovered from page text. Compared by exact string equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Identifier(String);

impl Identifier {
    /// Trims surrounding whitespace. Returns `None` if nothing is left.
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        (!trimmed.is_empty()).then(|| Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_capture() {
        let id = Identifier::new("  AB123 \n").unwrap();
        assert_eq!(id.as_str(), "AB123");
    }

    #[test]
    fn test_blank_is_not_an_identifier() {
        assert!(Identifier::new("   ").is_none());
        assert!(Identifier::new("").is_none());
    }

    #[test]
    fn test_equality_is_case_sensitive() {
        assert_ne!(Identifier::new("ab1"), Identifier::new("AB1"));
    }
}
