//! Contact classification and normalization
//!
//! Sniffs the kind of a raw contact handle (url, email, phone, UPI id or
//! social handle) and canonicalizes it so equal handles compare equal.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Digits kept from a phone number when comparing contacts. Country
/// prefixes beyond this are ignored.
const SUBSCRIBER_DIGITS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ContactType {
    Url,
    Email,
    Phone,
    Upi,
    Social,
    #[default]
    Unknown,
}

impl ContactType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactType::Url => "url",
            ContactType::Email => "email",
            ContactType::Phone => "phone",
            ContactType::Upi => "upi",
            ContactType::Social => "social",
            ContactType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ContactType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub struct ContactClassifier;

impl ContactClassifier {
    /// Detect the contact type. Rules run in a fixed priority order; the
    /// `@upi` check has to stay ahead of the generic `@` check.
    // TODO: replace substring sniffing with per-type structural validation
    // (VPA grammar for UPI, RFC 5322 local part for email).
    pub fn classify(raw: &str) -> ContactType {
        let v = raw.trim().to_lowercase();

        if v.is_empty() {
            return ContactType::Unknown;
        }

        if v.contains("http") || v.contains("www.") || v.contains(".com") {
            return ContactType::Url;
        }

        if v.contains("@upi") {
            return ContactType::Upi;
        }

        if v.contains('@') {
            return ContactType::Email;
        }

        let digits = Self::digits_only(&v);
        if (10..=15).contains(&digits.len()) {
            return ContactType::Phone;
        }

        ContactType::Social
    }

    /// Canonical form of a contact handle. Idempotent.
    pub fn normalize(raw: &str) -> String {
        let mut v: String = raw
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '(' | ')'))
            .collect();

        // All trailing slashes go, otherwise "http://x//" would not be a
        // fixed point.
        if v.starts_with("http") {
            while v.ends_with('/') {
                v.pop();
            }
        }

        v
    }

    /// Form used when scoring similarity between two contacts of the same
    /// type. Phones compare on their trailing subscriber digits.
    pub fn comparison_key(kind: ContactType, normalized: &str) -> String {
        match kind {
            ContactType::Phone => {
                let digits = Self::digits_only(normalized);
                if digits.len() >= SUBSCRIBER_DIGITS {
                    digits[digits.len() - SUBSCRIBER_DIGITS..].to_string()
                } else {
                    digits
                }
            }
            _ => normalized.to_string(),
        }
    }

    fn digits_only(v: &str) -> String {
        v.chars().filter(|c| c.is_ascii_digit()).collect()
    }
}
