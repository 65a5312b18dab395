//! # Field Checks
//!
//! The closed set of predicates a [`FieldRule`](crate::FieldRule) can apply.
//! Checks are data (serialized as `non_empty`, `pan`, `ein`, `zip`, `email`)
//! so rule tables can be loaded from configuration.
//!
//! Every check requires a string value; numbers, booleans, arrays and
//! mappings fail. Checks are never applied to absent fields.

use serde::{Deserialize, Serialize};

use crate::document::FieldValue;

/// A format predicate over a present field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Check {
    /// String that is non-empty after trimming whitespace.
    NonEmpty,
    /// PAN-style tax identifier: exactly 10 ASCII letters or digits.
    Pan,
    /// EIN-style tax identifier: exactly 8 ASCII digits.
    Ein,
    /// Postal code: exactly 5 ASCII digits, no trimming, no extension.
    Zip,
    /// Simple `local@domain.tld` email shape. No DNS or deliverability check.
    Email,
}

impl Check {
    /// Configuration name of the check.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NonEmpty => "non_empty",
            Self::Pan => "pan",
            Self::Ein => "ein",
            Self::Zip => "zip",
            Self::Email => "email",
        }
    }

    /// Human-readable description of what the check accepts.
    pub fn describe(&self) -> &'static str {
        match self {
            Self::NonEmpty => "string, non-empty after trimming whitespace",
            Self::Pan => "exactly 10 ASCII letters or digits",
            Self::Ein => "exactly 8 ASCII digits",
            Self::Zip => "exactly 5 ASCII digits",
            Self::Email => "local@domain.tld with a TLD of 2+ letters",
        }
    }

    /// Apply the check to a resolved value.
    pub fn accepts(&self, value: FieldValue<'_>) -> bool {
        let Some(text) = value.as_text() else {
            return false;
        };
        match self {
            Self::NonEmpty => !text.trim().is_empty(),
            Self::Pan => is_pan(text),
            Self::Ein => is_ein(text),
            Self::Zip => is_zip(text),
            Self::Email => is_email(text),
        }
    }
}

impl std::fmt::Display for Check {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exactly 10 ASCII alphanumeric characters.
pub fn is_pan(s: &str) -> bool {
    s.len() == 10 && s.bytes().all(|b| b.is_ascii_alphanumeric())
}

/// Exactly 8 ASCII digits.
pub fn is_ein(s: &str) -> bool {
    s.len() == 8 && s.bytes().all(|b| b.is_ascii_digit())
}

/// Exactly 5 ASCII digits.
pub fn is_zip(s: &str) -> bool {
    s.len() == 5 && s.bytes().all(|b| b.is_ascii_digit())
}

/// Simple email shape check.
///
/// Equivalent to `^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$`:
/// the local part cannot contain `@`, so the first `@` splits local from
/// host; the TLD cannot contain `.`, so the last `.` of the host splits
/// domain from TLD.
pub fn is_email(s: &str) -> bool {
    let Some((local, host)) = s.split_once('@') else {
        return false;
    };
    if local.is_empty() || !local.bytes().all(is_local_byte) {
        return false;
    }
    let Some((domain, tld)) = host.rsplit_once('.') else {
        return false;
    };
    !domain.is_empty()
        && domain.bytes().all(is_domain_byte)
        && tld.len() >= 2
        && tld.bytes().all(|b| b.is_ascii_alphabetic())
}

fn is_local_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'.' | b'_' | b'%' | b'+' | b'-')
}

fn is_domain_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'.' | b'-')
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn non_empty_trims_whitespace() {
        assert!(!Check::NonEmpty.accepts(FieldValue::Text("   ")));
        assert!(!Check::NonEmpty.accepts(FieldValue::Text("")));
        assert!(!Check::NonEmpty.accepts(FieldValue::Text("\t\n")));
        assert!(Check::NonEmpty.accepts(FieldValue::Text(" Acme ")));
    }

    #[test]
    fn zip_requires_five_digits() {
        assert!(is_zip("12345"));
        assert!(!is_zip("1234"));
        assert!(!is_zip("123456"));
        assert!(!is_zip("12a45"));
        assert!(!is_zip(" 12345"));
        assert!(!is_zip("12345-6789"));
    }

    #[test]
    fn pan_requires_ten_alphanumerics() {
        assert!(is_pan("ABCDE12345"));
        assert!(is_pan("AB12345678"));
        assert!(is_pan("abcdefghij"));
        assert!(!is_pan("ABCDE1234"));
        assert!(!is_pan("ABCDE123456"));
        assert!(!is_pan("ABCDE-1234"));
    }

    #[test]
    fn pan_rejects_non_ascii_letters() {
        // Ten chars, but 'É' is two bytes and not ASCII.
        assert!(!is_pan("ÉBCDE12345"));
        assert!(!is_pan("ÉBCDE1234"));
    }

    #[test]
    fn ein_requires_eight_digits() {
        assert!(is_ein("12345678"));
        assert!(!is_ein("1234567"));
        assert!(!is_ein("1234567a"));
        assert!(!is_ein("123456789"));
    }

    #[test]
    fn email_accepts_simple_addresses() {
        assert!(is_email("ops@acme.com"));
        assert!(is_email("first.last+tag@mail.acme.co.uk"));
        assert!(is_email("a_b%c-d@x-y.io"));
        assert!(is_email("a@b..cd"));
    }

    #[test]
    fn email_rejects_malformed_addresses() {
        assert!(!is_email("acme.com"));
        assert!(!is_email("@acme.com"));
        assert!(!is_email("ops@.com"));
        assert!(!is_email("ops@acme"));
        assert!(!is_email("ops@acme.c"));
        assert!(!is_email("ops@acme.c0m"));
        assert!(!is_email("ops@@acme.com"));
        assert!(!is_email("o ps@acme.com"));
        assert!(!is_email("ops@ac_me.com"));
        assert!(!is_email("ops@acme.com "));
    }

    #[test]
    fn checks_reject_non_strings() {
        let number = json!(12345);
        let flag = json!(true);
        for check in [Check::NonEmpty, Check::Pan, Check::Ein, Check::Zip, Check::Email] {
            assert!(!check.accepts(FieldValue::from_value(&number)), "{check}");
            assert!(!check.accepts(FieldValue::from_value(&flag)), "{check}");
        }
    }

    #[test]
    fn serde_names_match_as_str() {
        for check in [Check::NonEmpty, Check::Pan, Check::Ein, Check::Zip, Check::Email] {
            let json = serde_json::to_string(&check).unwrap();
            assert_eq!(json, format!("\"{}\"", check.as_str()));
        }
        assert!(serde_json::from_str::<Check>("\"phone\"").is_err());
    }
}
