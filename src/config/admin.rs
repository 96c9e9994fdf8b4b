//! Admin configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;

/// Minimum admin key length accepted in production.
const MIN_PRODUCTION_KEY_LEN: usize = 24;

/// Admin access configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdminConfig {
    /// Accepted `X-Admin-Auth` keys (comma-separated). Several keys allow
    /// rotation without downtime.
    pub api_keys: Option<SecretString>,
}

impl AdminConfig {
    pub fn keys(&self) -> Vec<SecretString> {
        self.api_keys
            .as_ref()
            .map(|raw| {
                raw.expose_secret()
                    .split(',')
                    .map(str::trim)
                    .filter(|k| !k.is_empty())
                    .map(|k| SecretString::new(k.to_string()))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn validate(&self, production: bool) -> Result<(), ValidationError> {
        let keys = self.keys();
        if keys.is_empty() {
            return Err(ValidationError::MissingRequired("ADMIN__API_KEYS"));
        }
        if production
            && keys
                .iter()
                .any(|k| k.expose_secret().len() < MIN_PRODUCTION_KEY_LEN)
        {
            return Err(ValidationError::AdminKeyTooShort(MIN_PRODUCTION_KEY_LEN));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_keys(raw: &str) -> AdminConfig {
        AdminConfig {
            api_keys: Some(SecretString::new(raw.to_string())),
        }
    }

    #[test]
    fn splits_and_trims_keys() {
        let keys = with_keys("alpha, beta ,,").keys();
        let exposed: Vec<_> = keys.iter().map(|k| k.expose_secret().as_str()).collect();
        assert_eq!(exposed, vec!["alpha", "beta"]);
    }

    #[test]
    fn at_least_one_key_required() {
        assert_eq!(
            AdminConfig::default().validate(false),
            Err(ValidationError::MissingRequired("ADMIN__API_KEYS"))
        );
        assert!(with_keys(" , ").validate(false).is_err());
    }

    #[test]
    fn short_keys_rejected_in_production_only() {
        let config = with_keys("short-key");
        assert!(config.validate(false).is_ok());
        assert_eq!(
            config.validate(true),
            Err(ValidationError::AdminKeyTooShort(MIN_PRODUCTION_KEY_LEN))
        );
    }
}
