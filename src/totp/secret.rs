//! Shared Secret
//!
//! User-supplied key material, normalized once on entry and kept out of
//! `Debug` output.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};

const URI_PREFIX: &str = "otpauth://";
const MASK: &str = "****";

/// A non-empty TOTP shared secret: a Base32 key or an `otpauth://` URI
pub struct Secret {
    inner: SecretString,
}

impl Secret {
    /// Normalize raw input. Returns `None` when nothing usable remains.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();

        let normalized = if is_uri(trimmed) {
            trimmed.to_string()
        } else {
            trimmed
                .chars()
                .filter(|c| !c.is_whitespace() && *c != '-')
                .collect::<String>()
                .trim_end_matches('=')
                .to_ascii_uppercase()
        };

        if normalized.is_empty() {
            return None;
        }

        Some(Self {
            inner: SecretString::from(normalized),
        })
    }

    pub fn expose(&self) -> &str {
        self.inner.expose_secret()
    }

    pub fn is_uri(&self) -> bool {
        is_uri(self.expose())
    }

    /// First six and last four characters around a fixed mask
    pub fn masked(&self) -> String {
        let chars: Vec<char> = self.expose().chars().collect();
        if chars.len() <= 10 {
            return MASK.to_string();
        }

        let head: String = chars[..6].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}{}{}", head, MASK, tail)
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Secret").field(&self.masked()).finish()
    }
}

impl Clone for Secret {
    fn clone(&self) -> Self {
        Self {
            inner: SecretString::from(self.expose().to_string()),
        }
    }
}

impl PartialEq for Secret {
    fn eq(&self, other: &Self) -> bool {
        self.expose() == other.expose()
    }
}

impl Eq for Secret {}

fn is_uri(value: &str) -> bool {
    value
        .get(..URI_PREFIX.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(URI_PREFIX))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_rejected() {
        assert!(Secret::parse("").is_none());
        assert!(Secret::parse("   ").is_none());
        assert!(Secret::parse(" - = ").is_none());
    }

    #[test]
    fn test_base32_normalization() {
        let secret = Secret::parse("  jbsw y3dp-ehpk 3pxp==\n").unwrap();
        assert_eq!(secret.expose(), "JBSWY3DPEHPK3PXP");
        assert!(!secret.is_uri());
    }

    #[test]
    fn test_uri_kept_verbatim() {
        let uri = "otpauth://totp/ACME:john?secret=HXDMVJECJJWSRB3HWIZR4IFUGFTMXBOZ&issuer=ACME";
        let secret = Secret::parse(&format!(" {} ", uri)).unwrap();
        assert_eq!(secret.expose(), uri);
        assert!(secret.is_uri());
    }

    #[test]
    fn test_masked() {
        let secret = Secret::parse("JBSWY3DPEHPK3PXP").unwrap();
        assert_eq!(secret.masked(), "JBSWY3****3PXP");

        let short = Secret::parse("ABCDEFGH").unwrap();
        assert_eq!(short.masked(), "****");
    }

    #[test]
    fn test_debug_does_not_leak() {
        let secret = Secret::parse("JBSWY3DPEHPK3PXP").unwrap();
        let debug = format!("{:?}", secret);
        assert!(!debug.contains("JBSWY3DPEHPK3PXP"));
    }
}
