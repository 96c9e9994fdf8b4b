//! PurchaseContentHandler - Command handler for pay-per-view purchases.

use std::sync::Arc;

use tracing::info;

use super::grants::GrantIssuer;
use super::payment_verification::{verify_payment, ExpectedPayment};
use crate::domain::foundation::{ContentId, Timestamp, UserId};
use crate::domain::monetization::{ItemType, MonetizationError, Purchase};
use crate::ports::{ContentCatalog, InsertOutcome, PaymentProcessor, UserDirectory};

#[derive(Debug, Clone)]
pub struct PurchaseContentCommand {
    pub fan_id: UserId,
    pub content_id: ContentId,
    pub payment_reference: String,
}

#[derive(Debug, Clone)]
pub enum PurchaseContentResult {
    Created(Purchase),
    AlreadyOwned(Purchase),
}

impl PurchaseContentResult {
    pub fn purchase(&self) -> &Purchase {
        match self {
            PurchaseContentResult::Created(p) | PurchaseContentResult::AlreadyOwned(p) => p,
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self, PurchaseContentResult::Created(_))
    }
}

/// Records a pay-per-view purchase once the processor confirms the payment.
pub struct PurchaseContentHandler {
    users: Arc<dyn UserDirectory>,
    catalog: Arc<dyn ContentCatalog>,
    processor: Arc<dyn PaymentProcessor>,
    grants: GrantIssuer,
}

impl PurchaseContentHandler {
    pub fn new(
        users: Arc<dyn UserDirectory>,
        catalog: Arc<dyn ContentCatalog>,
        processor: Arc<dyn PaymentProcessor>,
        grants: GrantIssuer,
    ) -> Self {
        Self {
            users,
            catalog,
            processor,
            grants,
        }
    }

    pub async fn handle(
        &self,
        cmd: PurchaseContentCommand,
    ) -> Result<PurchaseContentResult, MonetizationError> {
        // 1. Fan role
        let fan = self.users.find_by_id(cmd.fan_id).await?;
        if !fan.as_ref().is_some_and(|u| u.is_fan()) {
            return Err(MonetizationError::InvalidFan);
        }

        // 2. Content must exist and sit behind the paywall
        let content = self
            .catalog
            .find_by_id(cmd.content_id)
            .await?
            .ok_or(MonetizationError::ContentNotFound(cmd.content_id))?;
        if !content.access_setting.is_paywalled() {
            return Err(MonetizationError::NotPurchasable(content.id));
        }

        // 3. Processor's record
        let intent = verify_payment(
            self.processor.as_ref(),
            &cmd.payment_reference,
            ExpectedPayment {
                fan_id: cmd.fan_id,
                item_type: ItemType::ContentPpv,
                item_id: content.id.as_i64(),
            },
        )
        .await?;

        // 4. Grant, recording what was actually charged
        let outcome = self
            .grants
            .ensure_purchase(
                cmd.fan_id,
                content.id,
                intent.amount,
                &cmd.payment_reference,
                Timestamp::now(),
            )
            .await?;

        Ok(match outcome {
            InsertOutcome::Inserted(purchase) => {
                info!(
                    purchase_id = %purchase.id,
                    fan_id = %purchase.fan_id,
                    content_id = %purchase.content_id,
                    amount_minor = purchase.amount.minor(),
                    "Content purchased"
                );
                PurchaseContentResult::Created(purchase)
            }
            InsertOutcome::AlreadyExists(purchase) => PurchaseContentResult::AlreadyOwned(purchase),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{
        InMemoryContentCatalog, InMemoryPurchaseRepository, InMemorySubscriptionRepository,
        InMemoryUserDirectory,
    };
    use crate::adapters::stripe::MockPaymentProcessor;
    use crate::application::handlers::test_support::{seed_content, seed_user};
    use crate::domain::account::UserRole;
    use crate::domain::content::AccessSetting;
    use crate::domain::monetization::PaymentMetadata;

    struct Fixture {
        users: InMemoryUserDirectory,
        catalog: InMemoryContentCatalog,
        purchases: InMemoryPurchaseRepository,
        processor: MockPaymentProcessor,
        handler: PurchaseContentHandler,
    }

    fn fixture() -> Fixture {
        let users = InMemoryUserDirectory::new();
        let catalog = InMemoryContentCatalog::new();
        let purchases = InMemoryPurchaseRepository::new();
        let processor = MockPaymentProcessor::new();
        let grants = GrantIssuer::new(
            Arc::new(InMemorySubscriptionRepository::new()),
            Arc::new(purchases.clone()),
        );
        let handler = PurchaseContentHandler::new(
            Arc::new(users.clone()),
            Arc::new(catalog.clone()),
            Arc::new(processor.clone()),
            grants,
        );
        Fixture {
            users,
            catalog,
            purchases,
            processor,
            handler,
        }
    }

    #[tokio::test]
    async fn verified_payment_records_amount_charged() {
        let f = fixture();
        let fan = seed_user(&f.users, "fan@example.com", UserRole::Fan).await;
        let coach = seed_user(&f.users, "coach@example.com", UserRole::Coach).await;
        let content = seed_content(&f.catalog, coach.id, AccessSetting::Paywall).await;
        f.processor.add_intent(MockPaymentProcessor::succeeded(
            "pi_ppv",
            750,
            PaymentMetadata::for_item(content.id.as_i64(), ItemType::ContentPpv, fan.id),
        ));

        let result = f
            .handler
            .handle(PurchaseContentCommand {
                fan_id: fan.id,
                content_id: content.id,
                payment_reference: "pi_ppv".to_string(),
            })
            .await
            .unwrap();

        assert!(result.is_created());
        assert_eq!(result.purchase().amount.minor(), 750);
        assert_eq!(result.purchase().payment_reference.as_deref(), Some("pi_ppv"));
    }

    #[tokio::test]
    async fn second_purchase_returns_existing() {
        let f = fixture();
        let fan = seed_user(&f.users, "fan@example.com", UserRole::Fan).await;
        let coach = seed_user(&f.users, "coach@example.com", UserRole::Coach).await;
        let content = seed_content(&f.catalog, coach.id, AccessSetting::Paywall).await;
        f.processor.add_intent(MockPaymentProcessor::succeeded(
            "pi_ppv",
            500,
            PaymentMetadata::default(),
        ));
        let cmd = PurchaseContentCommand {
            fan_id: fan.id,
            content_id: content.id,
            payment_reference: "pi_ppv".to_string(),
        };

        let first = f.handler.handle(cmd.clone()).await.unwrap();
        let second = f.handler.handle(cmd).await.unwrap();

        assert!(matches!(second, PurchaseContentResult::AlreadyOwned(_)));
        assert_eq!(first.purchase().id, second.purchase().id);
        assert_eq!(f.purchases.all().await.len(), 1);
    }

    #[tokio::test]
    async fn free_content_is_not_purchasable() {
        let f = fixture();
        let fan = seed_user(&f.users, "fan@example.com", UserRole::Fan).await;
        let coach = seed_user(&f.users, "coach@example.com", UserRole::Coach).await;
        let content = seed_content(&f.catalog, coach.id, AccessSetting::Free).await;

        let err = f
            .handler
            .handle(PurchaseContentCommand {
                fan_id: fan.id,
                content_id: content.id,
                payment_reference: "pi_ppv".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(err, MonetizationError::NotPurchasable(content.id));
        assert!(f.processor.retrieved_references().is_empty());
    }

    #[tokio::test]
    async fn missing_content_is_not_found() {
        let f = fixture();
        let fan = seed_user(&f.users, "fan@example.com", UserRole::Fan).await;

        let err = f
            .handler
            .handle(PurchaseContentCommand {
                fan_id: fan.id,
                content_id: ContentId::from_raw(42),
                payment_reference: "pi_ppv".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.message(), "Content not found");
    }

    #[tokio::test]
    async fn non_fan_is_rejected() {
        let f = fixture();
        let coach = seed_user(&f.users, "coach@example.com", UserRole::Coach).await;
        let content = seed_content(&f.catalog, coach.id, AccessSetting::Paywall).await;

        let err = f
            .handler
            .handle(PurchaseContentCommand {
                fan_id: coach.id,
                content_id: content.id,
                payment_reference: "pi_ppv".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(err, MonetizationError::InvalidFan);
    }
}
