use regex::Regex;

use super::Identifier;

/// Extraction patterns in priority order. Capture group 1 is the receipt number.
pub const DEFAULT_PATTERNS: &[&str] = &[
    // "RECEIPT NO: 12345", tolerating a trailing "(2)"
    r"(?i)RECEIPT\s*NO[.:]?\s*([A-Z0-9]+(?:\([0-9]+\))?)",
    r"(?i)FCR\s*NO[.:]?\s*([A-Z0-9]+)",
    // رقم الإيصال = "receipt number"
    r"(?i)رقم\s*الإيصال[\s:]*([A-Z0-9]+)",
];

pub struct IdentifierMatcher {
    patterns: Vec<Regex>,
}

impl IdentifierMatcher {
    pub fn new() -> Self {
        Self::with_patterns(DEFAULT_PATTERNS).expect("built-in identifier patterns are valid")
    }

    /// Builds a matcher from custom patterns. Each must have a capture group.
    pub fn with_patterns(patterns: &[&str]) -> Result<Self, regex::Error> {
        let patterns = patterns
            .iter()
            .map(|p| Regex::new(p))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(Regex::as_str)
    }

    /// First capture of the first pattern (in priority order) that matches
    /// anywhere in `text`. Later patterns are not tried once one matches.
    pub fn find(&self, text: &str) -> Option<Identifier> {
        self.patterns.iter().find_map(|regex| {
            regex
                .captures(text)
                .and_then(|caps| caps.get(1))
                .and_then(|m| Identifier::new(m.as_str()))
        })
    }
}

impl Default for IdentifierMatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find(text: &str) -> Option<String> {
        IdentifierMatcher::new()
            .find(text)
            .map(|id| id.as_str().to_string())
    }

    #[test]
    fn test_receipt_number_label() {
        assert_eq!(find("RECEIPT NO: ABC123\nDate: 2024-01-01"), Some("ABC123".into()));
        assert_eq!(find("Receipt No.556"), Some("556".into()));
        assert_eq!(find("RECEIPTNO 77"), Some("77".into()));
    }

    #[test]
    fn test_receipt_number_with_parenthesized_suffix() {
        assert_eq!(find("RECEIPT NO: 12345(2)"), Some("12345(2)".into()));
    }

    #[test]
    fn test_receipt_number_ignores_unclosed_parenthesis() {
        assert_eq!(find("RECEIPT NO: 12345(2"), Some("12345".into()));
    }

    #[test]
    fn test_fcr_number_label() {
        assert_eq!(find("Forwarder FCR NO. KHI0042 issued"), Some("KHI0042".into()));
        assert_eq!(find("fcr no:x9"), Some("x9".into()));
    }

    #[test]
    fn test_arabic_receipt_label() {
        assert_eq!(find("رقم الإيصال: 889900"), Some("889900".into()));
        assert_eq!(find("رقم الإيصال AB12"), Some("AB12".into()));
    }

    #[test]
    fn test_priority_order_beats_position() {
        // FCR NO appears first in the text but RECEIPT NO has priority
        let text = "FCR NO 111\nRECEIPT NO 222";
        assert_eq!(find(text), Some("222".into()));
    }

    #[test]
    fn test_first_match_of_pattern_wins() {
        let text = "RECEIPT NO A1\nRECEIPT NO B2";
        assert_eq!(find(text), Some("A1".into()));
    }

    #[test]
    fn test_latin_pattern_is_case_insensitive_but_capture_is_verbatim() {
        assert_eq!(find("receipt no abc9"), Some("abc9".into()));
    }

    #[test]
    fn test_no_match() {
        assert_eq!(find("Invoice #4411 for services"), None);
        assert_eq!(find(""), None);
    }

    #[test]
    fn test_custom_patterns() {
        let matcher = IdentifierMatcher::with_patterns(&[r"REF-(\d+)"]).unwrap();
        assert_eq!(matcher.find("see REF-42").unwrap().as_str(), "42");
        assert_eq!(matcher.patterns().count(), 1);
    }

    #[test]
    fn test_invalid_custom_pattern() {
        assert!(IdentifierMatcher::with_patterns(&["(unclosed"]).is_err());
    }
}
