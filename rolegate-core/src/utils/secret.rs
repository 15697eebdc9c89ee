//! Configuration secrets backed by the secrecy crate.
//!
//! `RedactedSecret` is zeroized on drop, never prints its value in Debug or
//! Display output, and requires an explicit `.expose_secret()` for access.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer};

const REDACTED: &str = "[redacted]";

#[derive(Clone)]
pub struct RedactedSecret(SecretString);

impl RedactedSecret {
    pub fn new(value: String) -> Self {
        Self(SecretString::new(value.into_boxed_str()))
    }

    pub fn expose_secret(&self) -> &str {
        self.0.expose_secret()
    }

    pub fn is_empty(&self) -> bool {
        self.0.expose_secret().is_empty()
    }
}

impl From<&str> for RedactedSecret {
    fn from(value: &str) -> Self {
        Self::new(value.to_string())
    }
}

impl std::fmt::Debug for RedactedSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\"{REDACTED}\"")
    }
}

impl std::fmt::Display for RedactedSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(REDACTED)
    }
}

impl<'de> Deserialize<'de> for RedactedSecret {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(RedactedSecret::new(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_and_display_hide_value() {
        let secret = RedactedSecret::from("hunter2");
        assert_eq!(format!("{:?}", secret), "\"[redacted]\"");
        assert_eq!(secret.to_string(), "[redacted]");
        assert_eq!(secret.expose_secret(), "hunter2");
    }

    #[test]
    fn test_deserialize_from_plain_string() {
        let secret: RedactedSecret = serde_json::from_str("\"s3cret\"").unwrap();
        assert_eq!(secret.expose_secret(), "s3cret");
        assert!(!secret.is_empty());
    }
}
