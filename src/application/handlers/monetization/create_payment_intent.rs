//! CreatePaymentIntentHandler - Opens a processor payment intent for an item.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::foundation::{ContentId, Currency, Money, UserId};
use crate::domain::monetization::{
    ItemType, MonetizationError, PaymentIntentRequest, PaymentMetadata, PriceList,
};
use crate::ports::{ContentCatalog, PaymentProcessor, UserDirectory};

/// Fields arrive optional; the handler reports which combination is missing.
#[derive(Debug, Clone, Default)]
pub struct CreatePaymentIntentCommand {
    pub item_id: Option<i64>,
    pub item_type: Option<String>,
    pub fan_id: Option<UserId>,
    pub currency: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CreatePaymentIntentResult {
    pub payment_intent_id: String,
    pub client_secret: String,
    pub amount: Money,
}

pub struct CreatePaymentIntentHandler {
    users: Arc<dyn UserDirectory>,
    catalog: Arc<dyn ContentCatalog>,
    processor: Arc<dyn PaymentProcessor>,
    prices: PriceList,
    default_currency: Currency,
}

impl CreatePaymentIntentHandler {
    pub fn new(
        users: Arc<dyn UserDirectory>,
        catalog: Arc<dyn ContentCatalog>,
        processor: Arc<dyn PaymentProcessor>,
        prices: PriceList,
        default_currency: Currency,
    ) -> Self {
        Self {
            users,
            catalog,
            processor,
            prices,
            default_currency,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreatePaymentIntentCommand,
    ) -> Result<CreatePaymentIntentResult, MonetizationError> {
        // 1. Required fields
        let (Some(item_id), Some(item_type), Some(fan_id)) = (
            cmd.item_id,
            cmd.item_type.filter(|t| !t.trim().is_empty()),
            cmd.fan_id,
        ) else {
            return Err(MonetizationError::MissingIntentFields);
        };

        // 2. Price the item
        let item_type: ItemType = item_type.parse()?;
        if !self.item_exists(item_type, item_id).await? {
            return Err(MonetizationError::InvalidItem);
        }
        let amount_minor = self.prices.amount_for(item_type);
        if amount_minor <= 0 {
            return Err(MonetizationError::InvalidItem);
        }

        let currency = match cmd.currency.as_deref() {
            Some(code) => Currency::new(code)?,
            None => self.default_currency.clone(),
        };
        let amount = Money::from_minor(amount_minor, currency)?;

        // 3. Open the intent with metadata the webhook reads back
        let intent = self
            .processor
            .create_payment_intent(PaymentIntentRequest {
                amount: amount.clone(),
                metadata: PaymentMetadata::for_item(item_id, item_type, fan_id),
            })
            .await
            .map_err(|e| {
                warn!(item_type = %item_type, item_id, error = %e, "Payment intent creation failed");
                MonetizationError::intent_creation_failed(e.message)
            })?;

        let client_secret = intent.client_secret.ok_or_else(|| {
            MonetizationError::intent_creation_failed("Payment intent has no client secret")
        })?;

        debug!(payment_intent_id = %intent.id, item_type = %item_type, item_id, "Payment intent created");

        Ok(CreatePaymentIntentResult {
            payment_intent_id: intent.id,
            client_secret,
            amount,
        })
    }

    /// Subscription items name a coach; pay-per-view items name content.
    async fn item_exists(&self, item_type: ItemType, item_id: i64) -> Result<bool, MonetizationError> {
        if item_type.subscription_plan().is_some() {
            let coach = self.users.find_by_id(UserId::from_raw(item_id)).await?;
            return Ok(coach.is_some_and(|u| u.is_coach()));
        }
        let content = self.catalog.find_by_id(ContentId::from_raw(item_id)).await?;
        Ok(content.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryContentCatalog, InMemoryUserDirectory};
    use crate::adapters::stripe::MockPaymentProcessor;
    use crate::application::handlers::test_support::{seed_content, seed_user};
    use crate::domain::account::UserRole;
    use crate::domain::content::AccessSetting;
    use crate::ports::PaymentError;

    struct Fixture {
        users: InMemoryUserDirectory,
        catalog: InMemoryContentCatalog,
        processor: MockPaymentProcessor,
        handler: CreatePaymentIntentHandler,
    }

    fn fixture() -> Fixture {
        let users = InMemoryUserDirectory::new();
        let catalog = InMemoryContentCatalog::new();
        let processor = MockPaymentProcessor::new();
        let handler = CreatePaymentIntentHandler::new(
            Arc::new(users.clone()),
            Arc::new(catalog.clone()),
            Arc::new(processor.clone()),
            PriceList::default(),
            Currency::usd(),
        );
        Fixture {
            users,
            catalog,
            processor,
            handler,
        }
    }

    #[tokio::test]
    async fn monthly_subscription_is_priced_and_tagged() {
        let f = fixture();
        let coach = seed_user(&f.users, "coach@example.com", UserRole::Coach).await;

        let result = f
            .handler
            .handle(CreatePaymentIntentCommand {
                item_id: Some(coach.id.as_i64()),
                item_type: Some("subscription_monthly".to_string()),
                fan_id: Some(UserId::from_raw(7)),
                currency: None,
            })
            .await
            .unwrap();

        assert!(!result.client_secret.is_empty());
        assert_eq!(result.amount.minor(), 1_000);
        let request = &f.processor.created_requests()[0];
        assert_eq!(request.metadata.fan_id.as_deref(), Some("7"));
        assert_eq!(request.metadata.item_type.as_deref(), Some("subscription_monthly"));
        assert_eq!(request.amount.currency().as_str(), "usd");
    }

    #[tokio::test]
    async fn ppv_requires_existing_content() {
        let f = fixture();
        let coach = seed_user(&f.users, "coach@example.com", UserRole::Coach).await;
        let content = seed_content(&f.catalog, coach.id, AccessSetting::Paywall).await;

        let ok = f
            .handler
            .handle(CreatePaymentIntentCommand {
                item_id: Some(content.id.as_i64()),
                item_type: Some("content_ppv".to_string()),
                fan_id: Some(UserId::from_raw(7)),
                currency: Some("eur".to_string()),
            })
            .await
            .unwrap();
        let missing = f
            .handler
            .handle(CreatePaymentIntentCommand {
                item_id: Some(999),
                item_type: Some("content_ppv".to_string()),
                fan_id: Some(UserId::from_raw(7)),
                currency: None,
            })
            .await
            .unwrap_err();

        assert_eq!(ok.amount.minor(), 500);
        assert_eq!(ok.amount.currency().as_str(), "eur");
        assert_eq!(missing, MonetizationError::InvalidItem);
    }

    #[tokio::test]
    async fn missing_fields_are_rejected() {
        let f = fixture();
        let err = f
            .handler
            .handle(CreatePaymentIntentCommand {
                item_id: Some(1),
                item_type: None,
                fan_id: Some(UserId::from_raw(7)),
                currency: None,
            })
            .await
            .unwrap_err();

        assert_eq!(err.message(), "Missing item_id, item_type, or fan_id");
    }

    #[tokio::test]
    async fn unknown_item_type_is_invalid() {
        let f = fixture();
        let err = f
            .handler
            .handle(CreatePaymentIntentCommand {
                item_id: Some(1),
                item_type: Some("tip".to_string()),
                fan_id: Some(UserId::from_raw(7)),
                currency: None,
            })
            .await
            .unwrap_err();

        assert_eq!(
            err.message(),
            "Invalid item_type or item_id for amount calculation"
        );
    }

    #[tokio::test]
    async fn processor_refusal_passes_message_through() {
        let f = fixture();
        let coach = seed_user(&f.users, "coach@example.com", UserRole::Coach).await;
        f.processor
            .set_error(PaymentError::invalid_request("Amount must be at least 50 cents"));

        let err = f
            .handler
            .handle(CreatePaymentIntentCommand {
                item_id: Some(coach.id.as_i64()),
                item_type: Some("subscription_yearly".to_string()),
                fan_id: Some(UserId::from_raw(7)),
                currency: None,
            })
            .await
            .unwrap_err();

        assert_eq!(
            err,
            MonetizationError::intent_creation_failed("Amount must be at least 50 cents")
        );
    }
}
