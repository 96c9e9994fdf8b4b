//! Payment configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::foundation::Currency;
use crate::domain::monetization::{FeeRate, PriceList};

/// Payment configuration (Stripe, platform fee, prices)
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// Stripe secret API key
    #[serde(default = "empty_secret")]
    pub stripe_api_key: SecretString,

    /// Stripe webhook signing secret
    #[serde(default = "empty_secret")]
    pub stripe_webhook_secret: SecretString,

    /// Overrides the Stripe API base URL (stripe-mock, proxies)
    pub stripe_api_base_url: Option<String>,

    /// Initial platform fee; adjustable at runtime by admins
    #[serde(default = "default_fee_percentage")]
    pub platform_fee_percentage: f64,

    /// Currency used when a request names none
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Prices in minor units
    #[serde(default)]
    pub prices: PriceList,
}

impl PaymentConfig {
    pub fn is_test_mode(&self) -> bool {
        self.stripe_api_key.expose_secret().starts_with("sk_test_")
    }

    pub fn fee_rate(&self) -> Result<FeeRate, ValidationError> {
        FeeRate::from_percentage(self.platform_fee_percentage)
            .map_err(|_| ValidationError::InvalidFeePercentage)
    }

    pub fn default_currency(&self) -> Result<Currency, ValidationError> {
        Currency::new(&self.currency).map_err(|_| ValidationError::InvalidCurrency(self.currency.clone()))
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let api_key = self.stripe_api_key.expose_secret();
        let webhook_secret = self.stripe_webhook_secret.expose_secret();
        if api_key.is_empty() {
            return Err(ValidationError::MissingRequired("PAYMENT__STRIPE_API_KEY"));
        }
        if webhook_secret.is_empty() {
            return Err(ValidationError::MissingRequired("PAYMENT__STRIPE_WEBHOOK_SECRET"));
        }
        if !api_key.starts_with("sk_") {
            return Err(ValidationError::InvalidStripeKey);
        }
        if !webhook_secret.starts_with("whsec_") {
            return Err(ValidationError::InvalidStripeWebhookSecret);
        }
        self.fee_rate()?;
        self.default_currency()?;
        let prices = &self.prices;
        if prices.subscription_monthly <= 0 || prices.subscription_yearly <= 0 || prices.content_ppv <= 0 {
            return Err(ValidationError::InvalidPrice);
        }
        Ok(())
    }
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            stripe_api_key: empty_secret(),
            stripe_webhook_secret: empty_secret(),
            stripe_api_base_url: None,
            platform_fee_percentage: default_fee_percentage(),
            currency: default_currency(),
            prices: PriceList::default(),
        }
    }
}

fn empty_secret() -> SecretString {
    SecretString::new(String::new())
}

fn default_fee_percentage() -> f64 {
    15.0
}

fn default_currency() -> String {
    "usd".to_string()
}
