//! SubscribeHandler - Command handler for fan-to-coach subscriptions.

use std::sync::Arc;

use tracing::info;

use super::grants::GrantIssuer;
use super::payment_verification::{verify_payment, ExpectedPayment};
use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::monetization::{ItemType, MonetizationError, Subscription, SubscriptionPlan};
use crate::ports::{InsertOutcome, PaymentProcessor, UserDirectory};

/// Command to subscribe a fan to a coach after client-side payment.
#[derive(Debug, Clone)]
pub struct SubscribeCommand {
    pub fan_id: UserId,
    pub coach_id: UserId,
    /// `monthly` or `yearly`; validated by the handler.
    pub subscription_type: String,
    pub payment_reference: String,
}

#[derive(Debug, Clone)]
pub enum SubscribeResult {
    Created(Subscription),
    /// An unexpired subscription already covered the pair.
    AlreadyActive(Subscription),
}

impl SubscribeResult {
    pub fn subscription(&self) -> &Subscription {
        match self {
            SubscribeResult::Created(s) | SubscribeResult::AlreadyActive(s) => s,
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self, SubscribeResult::Created(_))
    }
}

/// Grants a subscription once the processor confirms the payment.
///
/// Never writes a ledger transaction; that is the payment webhook's job.
pub struct SubscribeHandler {
    users: Arc<dyn UserDirectory>,
    processor: Arc<dyn PaymentProcessor>,
    grants: GrantIssuer,
}

impl SubscribeHandler {
    pub fn new(
        users: Arc<dyn UserDirectory>,
        processor: Arc<dyn PaymentProcessor>,
        grants: GrantIssuer,
    ) -> Self {
        Self {
            users,
            processor,
            grants,
        }
    }

    pub async fn handle(&self, cmd: SubscribeCommand) -> Result<SubscribeResult, MonetizationError> {
        // 1. Roles
        let fan = self.users.find_by_id(cmd.fan_id).await?;
        if !fan.as_ref().is_some_and(|u| u.is_fan()) {
            return Err(MonetizationError::InvalidFan);
        }
        let coach = self.users.find_by_id(cmd.coach_id).await?;
        if !coach.as_ref().is_some_and(|u| u.is_coach()) {
            return Err(MonetizationError::InvalidCoach);
        }

        // 2. Plan
        let plan: SubscriptionPlan = cmd.subscription_type.parse()?;

        // 3. Processor's record must show a completed payment for this pair
        verify_payment(
            self.processor.as_ref(),
            &cmd.payment_reference,
            ExpectedPayment {
                fan_id: cmd.fan_id,
                item_type: ItemType::for_plan(plan),
                item_id: cmd.coach_id.as_i64(),
            },
        )
        .await?;

        // 4. Grant
        let outcome = self
            .grants
            .ensure_subscription(
                cmd.fan_id,
                cmd.coach_id,
                plan,
                &cmd.payment_reference,
                Timestamp::now(),
            )
            .await?;

        Ok(match outcome {
            InsertOutcome::Inserted(subscription) => {
                info!(
                    subscription_id = %subscription.id,
                    fan_id = %subscription.fan_id,
                    coach_id = %subscription.coach_id,
                    plan = %subscription.plan,
                    "Subscription created"
                );
                SubscribeResult::Created(subscription)
            }
            InsertOutcome::AlreadyExists(subscription) => SubscribeResult::AlreadyActive(subscription),
        })
    }
}
