//! HandlePaymentEventHandler - Reconciles processor webhooks into the ledger.
//!
//! The only writer of ledger transactions. Deliveries are at-least-once, so
//! every step tolerates re-entry: a payment reference already in the ledger
//! is acknowledged without another write.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::grants::GrantIssuer;
use crate::domain::content::Content;
use crate::domain::foundation::{
    ContentId, DomainError, PurchaseId, SubscriptionId, Timestamp, UserId,
};
use crate::domain::monetization::{
    FeeSplit, ItemType, MonetizationError, NewTransaction, PaymentEventKind, PaymentIntent,
    PlatformFeeSetting, Transaction, TransactionType, WebhookError, WebhookVerifier,
};
use crate::ports::{ContentCatalog, InsertOutcome, TransactionLedger, UserDirectory};

/// Command to handle one webhook delivery.
#[derive(Debug, Clone)]
pub struct HandlePaymentEventCommand {
    /// Raw request body, exactly as signed.
    pub payload: Vec<u8>,
    /// Signature header value.
    pub signature: String,
}

#[derive(Debug, Clone)]
pub enum HandlePaymentEventResult {
    /// A new ledger transaction was written.
    Recorded(Transaction),
    /// The payment reference was already in the ledger.
    AlreadyProcessed { payment_reference: String },
    /// Event type needs no action.
    Ignored { event_type: String },
}

/// Who paid whom for what.
///
/// The `*_id` fields are what the payment named and go to the ledger as
/// given. The rest is what those ids resolved to and gates the grant.
#[derive(Debug, Default)]
struct Parties {
    fan_id: Option<UserId>,
    coach_id: Option<UserId>,
    content_id: Option<ContentId>,
    verified_fan: Option<UserId>,
    verified_coach: Option<UserId>,
    content: Option<Content>,
}

pub struct HandlePaymentEventHandler {
    verifier: Arc<WebhookVerifier>,
    users: Arc<dyn UserDirectory>,
    catalog: Arc<dyn ContentCatalog>,
    ledger: Arc<dyn TransactionLedger>,
    grants: GrantIssuer,
    fee: PlatformFeeSetting,
}

impl HandlePaymentEventHandler {
    pub fn new(
        verifier: Arc<WebhookVerifier>,
        users: Arc<dyn UserDirectory>,
        catalog: Arc<dyn ContentCatalog>,
        ledger: Arc<dyn TransactionLedger>,
        grants: GrantIssuer,
        fee: PlatformFeeSetting,
    ) -> Self {
        Self {
            verifier,
            users,
            catalog,
            ledger,
            grants,
            fee,
        }
    }

    pub async fn handle(
        &self,
        cmd: HandlePaymentEventCommand,
    ) -> Result<HandlePaymentEventResult, WebhookError> {
        // 1. Verify signature, then parse
        let event = self
            .verifier
            .verify_and_parse(&cmd.payload, &cmd.signature)
            .map_err(|e| {
                warn!(error = %e, "Rejected payment webhook");
                e
            })?;

        debug!(event_id = %event.id, event_type = %event.event_type, "Payment webhook received");

        // 2. Only succeeded payments are recorded
        match event.kind() {
            PaymentEventKind::PaymentIntentSucceeded => {}
            PaymentEventKind::PaymentMethodAttached | PaymentEventKind::Other => {
                return Ok(HandlePaymentEventResult::Ignored {
                    event_type: event.event_type,
                });
            }
        }
        let intent = event.payment_intent()?;

        // 3. Redelivery
        if self
            .ledger
            .find_by_payment_reference(&intent.id)
            .await
            .map_err(database)?
            .is_some()
        {
            info!(payment_reference = %intent.id, "Payment already processed");
            return Ok(HandlePaymentEventResult::AlreadyProcessed {
                payment_reference: intent.id,
            });
        }

        // 4. Fee split at the rate in force now
        let rate = self.fee.current();
        let split = FeeSplit::compute(intent.amount.clone(), rate);

        // 5. Resolve who paid whom for what
        let item_type = intent.metadata.item_type();
        let parties = self.resolve_parties(&intent, item_type).await?;

        // 6. Make sure the entitlement exists
        let now = Timestamp::now();
        let (subscription_id, purchase_id) = self.ensure_grant(&intent, item_type, &parties, now).await?;

        // 7. Append
        let mut record = NewTransaction::succeeded_payment(
            item_type
                .map(|t| t.transaction_type())
                .unwrap_or(TransactionType::UnknownPayment),
            split,
            intent.id.clone(),
            now,
        );
        record.fan_id = parties.fan_id;
        record.coach_id = parties.coach_id;
        record.content_id = parties.content_id;
        record.subscription_id = subscription_id;
        record.purchase_id = purchase_id;

        match self.ledger.append(record).await.map_err(database)? {
            InsertOutcome::Inserted(tx) => {
                info!(
                    transaction_id = %tx.id,
                    payment_reference = %tx.payment_reference,
                    transaction_type = %tx.transaction_type,
                    gross_minor = tx.gross.minor(),
                    fee_minor = tx.platform_fee.minor(),
                    fee_bps = rate.basis_points(),
                    "Payment recorded"
                );
                Ok(HandlePaymentEventResult::Recorded(tx))
            }
            InsertOutcome::AlreadyExists(tx) => Ok(HandlePaymentEventResult::AlreadyProcessed {
                payment_reference: tx.payment_reference,
            }),
        }
    }

    async fn resolve_parties(
        &self,
        intent: &PaymentIntent,
        item_type: Option<ItemType>,
    ) -> Result<Parties, WebhookError> {
        let mut parties = Parties {
            fan_id: intent.metadata.fan_id(),
            ..Parties::default()
        };

        if let Some(fan_id) = parties.fan_id {
            let user = self.users.find_by_id(fan_id).await.map_err(database)?;
            parties.verified_fan = user.filter(|u| u.is_fan()).map(|u| u.id);
        }

        let (Some(item_type), Some(item_id)) = (item_type, intent.metadata.item_id()) else {
            return Ok(parties);
        };

        let resolved = if item_type.subscription_plan().is_some() {
            let coach_id = UserId::from_raw(item_id);
            parties.coach_id = Some(coach_id);
            let coach = self.users.find_by_id(coach_id).await.map_err(database)?;
            parties.verified_coach = coach.filter(|u| u.is_coach()).map(|u| u.id);
            parties.verified_coach.is_some()
        } else {
            let content_id = ContentId::from_raw(item_id);
            parties.content_id = Some(content_id);
            let content = self.catalog.find_by_id(content_id).await.map_err(database)?;
            parties.coach_id = content.as_ref().map(|c| c.coach_id);
            parties.content = content;
            parties.content.is_some()
        };

        if !resolved {
            warn!(
                payment_reference = %intent.id,
                item_type = %item_type,
                item_id,
                "Payment item does not resolve; recording without grant"
            );
        }

        Ok(parties)
    }

    /// Grant failures other than storage errors are logged, never fatal: the
    /// financial record is written regardless.
    async fn ensure_grant(
        &self,
        intent: &PaymentIntent,
        item_type: Option<ItemType>,
        parties: &Parties,
        now: Timestamp,
    ) -> Result<(Option<SubscriptionId>, Option<PurchaseId>), WebhookError> {
        let (Some(item_type), Some(fan_id)) = (item_type, parties.verified_fan) else {
            return Ok((None, None));
        };

        let result = match (item_type.subscription_plan(), parties.verified_coach, &parties.content) {
            (Some(plan), Some(coach_id), _) => self
                .grants
                .ensure_subscription(fan_id, coach_id, plan, &intent.id, now)
                .await
                .map(|o| (Some(o.into_record().id), None)),
            (None, _, Some(content)) if content.access_setting.is_paywalled() => self
                .grants
                .ensure_purchase(fan_id, content.id, intent.amount.clone(), &intent.id, now)
                .await
                .map(|o| (None, Some(o.into_record().id))),
            _ => return Ok((None, None)),
        };

        match result {
            Ok(ids) => Ok(ids),
            Err(MonetizationError::Infrastructure(msg)) => Err(WebhookError::Database(msg)),
            Err(e) => {
                warn!(payment_reference = %intent.id, error = %e, "Grant not issued from webhook");
                Ok((None, None))
            }
        }
    }
}

fn database(err: DomainError) -> WebhookError {
    WebhookError::Database(err.message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{
        InMemoryContentCatalog, InMemoryPurchaseRepository, InMemorySubscriptionRepository,
        InMemoryTransactionLedger, InMemoryUserDirectory,
    };
    use crate::application::handlers::test_support::{seed_content, seed_user};
    use crate::domain::account::UserRole;
    use crate::domain::content::AccessSetting;
    use crate::domain::monetization::{signature_header_for, FeeRate};
    use secrecy::SecretString;

    const SECRET: &str = "whsec_test_secret";

    struct Fixture {
        users: InMemoryUserDirectory,
        catalog: InMemoryContentCatalog,
        subscriptions: InMemorySubscriptionRepository,
        purchases: InMemoryPurchaseRepository,
        ledger: InMemoryTransactionLedger,
        fee: PlatformFeeSetting,
        handler: HandlePaymentEventHandler,
    }

    fn fixture() -> Fixture {
        let users = InMemoryUserDirectory::new();
        let catalog = InMemoryContentCatalog::new();
        let subscriptions = InMemorySubscriptionRepository::new();
        let purchases = InMemoryPurchaseRepository::new();
        let ledger = InMemoryTransactionLedger::new();
        let fee = PlatformFeeSetting::new(FeeRate::from_basis_points(1_500).unwrap());
        let handler = HandlePaymentEventHandler::new(
            Arc::new(WebhookVerifier::new(SecretString::new(SECRET.to_string()))),
            Arc::new(users.clone()),
            Arc::new(catalog.clone()),
            Arc::new(ledger.clone()),
            GrantIssuer::new(Arc::new(subscriptions.clone()), Arc::new(purchases.clone())),
            fee.clone(),
        );
        Fixture {
            users,
            catalog,
            subscriptions,
            purchases,
            ledger,
            fee,
            handler,
        }
    }

    fn succeeded_event(reference: &str, amount: i64, item_type: &str, item_id: i64, fan_id: i64) -> Vec<u8> {
        serde_json::json!({
            "id": format!("evt_{}", reference),
            "type": "payment_intent.succeeded",
            "created": chrono::Utc::now().timestamp(),
            "livemode": false,
            "data": { "object": {
                "id": reference,
                "object": "payment_intent",
                "amount": amount,
                "currency": "usd",
                "status": "succeeded",
                "metadata": {
                    "item_id": item_id.to_string(),
                    "item_type": item_type,
                    "user_id": fan_id.to_string()
                }
            }}
        })
        .to_string()
        .into_bytes()
    }

    fn signed(payload: Vec<u8>) -> HandlePaymentEventCommand {
        let signature =
            signature_header_for(SECRET, chrono::Utc::now().timestamp(), &payload).unwrap();
        HandlePaymentEventCommand { payload, signature }
    }

    #[tokio::test]
    async fn ppv_payment_is_split_and_attributed_to_content_owner() {
        let f = fixture();
        let fan = seed_user(&f.users, "fan@example.com", UserRole::Fan).await;
        let coach = seed_user(&f.users, "coach@example.com", UserRole::Coach).await;
        let content = seed_content(&f.catalog, coach.id, AccessSetting::Paywall).await;

        let payload = succeeded_event("pi_ppv", 10_000, "content_ppv", content.id.as_i64(), fan.id.as_i64());
        let result = f.handler.handle(signed(payload)).await.unwrap();

        let HandlePaymentEventResult::Recorded(tx) = result else {
            panic!("expected a recorded transaction");
        };
        assert_eq!(tx.transaction_type, TransactionType::PpvPurchase);
        assert_eq!(tx.coach_id, Some(coach.id));
        assert_eq!(tx.content_id, Some(content.id));
        assert_eq!(tx.gross.minor(), 10_000);
        assert_eq!(tx.platform_fee.minor(), 1_500);
        assert_eq!(tx.net.minor(), 8_500);
        assert!(tx.purchase_id.is_some());
        assert_eq!(f.purchases.all().await.len(), 1);
    }

    #[tokio::test]
    async fn subscription_payment_links_granted_subscription() {
        let f = fixture();
        let fan = seed_user(&f.users, "fan@example.com", UserRole::Fan).await;
        let coach = seed_user(&f.users, "coach@example.com", UserRole::Coach).await;

        let payload = succeeded_event(
            "pi_sub",
            1_000,
            "subscription_monthly",
            coach.id.as_i64(),
            fan.id.as_i64(),
        );
        let HandlePaymentEventResult::Recorded(tx) = f.handler.handle(signed(payload)).await.unwrap()
        else {
            panic!("expected a recorded transaction");
        };

        let subs = f.subscriptions.all().await;
        assert_eq!(subs.len(), 1);
        assert_eq!(tx.subscription_id, Some(subs[0].id));
        assert_eq!(tx.coach_id, Some(coach.id));
        assert_eq!(tx.transaction_type, TransactionType::SubscriptionPayment);
    }

    #[tokio::test]
    async fn redelivered_event_writes_one_transaction() {
        let f = fixture();
        let fan = seed_user(&f.users, "fan@example.com", UserRole::Fan).await;
        let coach = seed_user(&f.users, "coach@example.com", UserRole::Coach).await;
        let payload = succeeded_event(
            "pi_dup",
            1_000,
            "subscription_monthly",
            coach.id.as_i64(),
            fan.id.as_i64(),
        );

        f.handler.handle(signed(payload.clone())).await.unwrap();
        let second = f.handler.handle(signed(payload)).await.unwrap();

        assert!(matches!(second, HandlePaymentEventResult::AlreadyProcessed { .. }));
        assert_eq!(f.ledger.len().await, 1);
        assert_eq!(f.subscriptions.all().await.len(), 1);
    }

    #[tokio::test]
    async fn invalid_signature_writes_nothing() {
        let f = fixture();
        let payload = succeeded_event("pi_forged", 1_000, "content_ppv", 1, 1);
        let signature = signature_header_for("whsec_wrong", chrono::Utc::now().timestamp(), &payload)
            .unwrap();

        let err = f
            .handler
            .handle(HandlePaymentEventCommand { payload, signature })
            .await
            .unwrap_err();

        assert!(err.is_signature_failure());
        assert!(f.ledger.is_empty().await);
    }

    #[tokio::test]
    async fn unrecognised_item_type_is_still_recorded() {
        let f = fixture();
        let payload = succeeded_event("pi_odd", 2_000, "tip_jar", 5, 6);

        let HandlePaymentEventResult::Recorded(tx) = f.handler.handle(signed(payload)).await.unwrap()
        else {
            panic!("expected a recorded transaction");
        };

        assert_eq!(tx.transaction_type, TransactionType::UnknownPayment);
        assert_eq!(tx.fan_id, Some(UserId::from_raw(6)));
        assert_eq!(tx.coach_id, None);
        assert_eq!(tx.content_id, None);
        assert_eq!(tx.net.minor(), 1_700);
    }

    #[tokio::test]
    async fn ppv_for_deleted_content_keeps_content_id() {
        let f = fixture();
        let fan = seed_user(&f.users, "fan@example.com", UserRole::Fan).await;
        let payload = succeeded_event("pi_gone", 500, "content_ppv", 41, fan.id.as_i64());

        let HandlePaymentEventResult::Recorded(tx) = f.handler.handle(signed(payload)).await.unwrap()
        else {
            panic!("expected a recorded transaction");
        };

        assert_eq!(tx.transaction_type, TransactionType::PpvPurchase);
        assert_eq!(tx.fan_id, Some(fan.id));
        assert_eq!(tx.content_id, Some(ContentId::from_raw(41)));
        assert_eq!(tx.coach_id, None);
        assert_eq!(tx.purchase_id, None);
        assert!(f.purchases.all().await.is_empty());
    }

    #[tokio::test]
    async fn subscription_to_unknown_coach_keeps_coach_id() {
        let f = fixture();
        let fan = seed_user(&f.users, "fan@example.com", UserRole::Fan).await;
        let payload = succeeded_event("pi_ghost", 1_000, "subscription_monthly", 999, fan.id.as_i64());

        let HandlePaymentEventResult::Recorded(tx) = f.handler.handle(signed(payload)).await.unwrap()
        else {
            panic!("expected a recorded transaction");
        };

        assert_eq!(tx.coach_id, Some(UserId::from_raw(999)));
        assert_eq!(tx.fan_id, Some(fan.id));
        assert_eq!(tx.subscription_id, None);
        assert!(f.subscriptions.all().await.is_empty());
    }

    #[tokio::test]
    async fn other_event_types_are_acknowledged() {
        let f = fixture();
        let payload = serde_json::json!({
            "id": "evt_pm",
            "type": "payment_method.attached",
            "data": { "object": { "id": "pm_1" } }
        })
        .to_string()
        .into_bytes();

        let result = f.handler.handle(signed(payload)).await.unwrap();

        assert!(matches!(
            result,
            HandlePaymentEventResult::Ignored { ref event_type } if event_type == "payment_method.attached"
        ));
        assert!(f.ledger.is_empty().await);
    }

    #[tokio::test]
    async fn fee_changes_apply_to_next_event() {
        let f = fixture();
        f.fee.set(FeeRate::from_basis_points(2_000).unwrap());
        let payload = succeeded_event("pi_fee", 10_000, "tip_jar", 1, 1);

        let HandlePaymentEventResult::Recorded(tx) = f.handler.handle(signed(payload)).await.unwrap()
        else {
            panic!("expected a recorded transaction");
        };

        assert_eq!(tx.platform_fee.minor(), 2_000);
    }

    #[tokio::test]
    async fn ledger_failure_is_retryable() {
        let f = fixture();
        f.ledger.set_fail_writes(true);
        let payload = succeeded_event("pi_retry", 1_000, "tip_jar", 1, 1);

        let err = f.handler.handle(signed(payload)).await.unwrap_err();

        assert!(err.is_retryable());
    }
}
