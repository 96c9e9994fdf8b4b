//! PostgreSQL implementation of SubscriptionRepository.
//!
//! The partial unique index `subscriptions_active_pair_key` allows one
//! active row per (fan, coach); `payment_reference` is unique on its own.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::{corrupt, db_error};
use crate::domain::foundation::{DomainError, ErrorCode, SubscriptionId, Timestamp, UserId};
use crate::domain::monetization::{NewSubscription, Subscription, SubscriptionPlan};
use crate::ports::{InsertOutcome, SubscriptionRepository};

const SUBSCRIPTION_COLUMNS: &str =
    "id, fan_id, coach_id, plan, start_date, end_date, is_active, payment_reference";

pub struct PostgresSubscriptionRepository {
    pool: PgPool,
}

impl PostgresSubscriptionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct SubscriptionRow {
    id: i64,
    fan_id: i64,
    coach_id: i64,
    plan: String,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
    is_active: bool,
    payment_reference: Option<String>,
}

impl TryFrom<SubscriptionRow> for Subscription {
    type Error = DomainError;

    fn try_from(row: SubscriptionRow) -> Result<Self, Self::Error> {
        Ok(Subscription {
            id: SubscriptionId::from_raw(row.id),
            fan_id: UserId::from_raw(row.fan_id),
            coach_id: UserId::from_raw(row.coach_id),
            plan: row
                .plan
                .parse::<SubscriptionPlan>()
                .map_err(|e| corrupt("plan", e))?,
            start_date: Timestamp::from_datetime(row.start_date),
            end_date: Timestamp::from_datetime(row.end_date),
            is_active: row.is_active,
            payment_reference: row.payment_reference,
        })
    }
}

#[async_trait]
impl SubscriptionRepository for PostgresSubscriptionRepository {
    async fn find_flagged_active(
        &self,
        fan_id: UserId,
        coach_id: UserId,
    ) -> Result<Option<Subscription>, DomainError> {
        let row: Option<SubscriptionRow> = sqlx::query_as(&format!(
            "SELECT {} FROM subscriptions WHERE fan_id = $1 AND coach_id = $2 AND is_active",
            SUBSCRIPTION_COLUMNS
        ))
        .bind(fan_id.as_i64())
        .bind(coach_id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("find active subscription", e))?;

        row.map(Subscription::try_from).transpose()
    }

    async fn find_by_id(&self, id: SubscriptionId) -> Result<Option<Subscription>, DomainError> {
        let row: Option<SubscriptionRow> = sqlx::query_as(&format!(
            "SELECT {} FROM subscriptions WHERE id = $1",
            SUBSCRIPTION_COLUMNS
        ))
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("find subscription", e))?;

        row.map(Subscription::try_from).transpose()
    }

    async fn find_by_payment_reference(
        &self,
        reference: &str,
    ) -> Result<Option<Subscription>, DomainError> {
        let row: Option<SubscriptionRow> = sqlx::query_as(&format!(
            "SELECT {} FROM subscriptions WHERE payment_reference = $1",
            SUBSCRIPTION_COLUMNS
        ))
        .bind(reference)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("find subscription by reference", e))?;

        row.map(Subscription::try_from).transpose()
    }

    async fn deactivate(&self, id: SubscriptionId) -> Result<(), DomainError> {
        sqlx::query("UPDATE subscriptions SET is_active = FALSE WHERE id = $1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("deactivate subscription", e))?;
        Ok(())
    }

    async fn insert_active(
        &self,
        subscription: NewSubscription,
    ) -> Result<InsertOutcome<Subscription>, DomainError> {
        let inserted: Option<SubscriptionRow> = sqlx::query_as(&format!(
            r#"
            INSERT INTO subscriptions (
                fan_id, coach_id, plan, start_date, end_date, is_active, payment_reference
            ) VALUES ($1, $2, $3, $4, $5, TRUE, $6)
            ON CONFLICT DO NOTHING
            RETURNING {}
            "#,
            SUBSCRIPTION_COLUMNS
        ))
        .bind(subscription.fan_id.as_i64())
        .bind(subscription.coach_id.as_i64())
        .bind(subscription.plan.as_str())
        .bind(subscription.start_date.as_datetime())
        .bind(subscription.end_date.as_datetime())
        .bind(subscription.payment_reference.as_deref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("insert subscription", e))?;

        if let Some(row) = inserted {
            return Ok(InsertOutcome::Inserted(row.try_into()?));
        }

        // Lost a race; the winner holds either the reference or the active pair.
        if let Some(reference) = subscription.payment_reference.as_deref() {
            if let Some(existing) = self.find_by_payment_reference(reference).await? {
                return Ok(InsertOutcome::AlreadyExists(existing));
            }
        }
        self.find_flagged_active(subscription.fan_id, subscription.coach_id)
            .await?
            .map(InsertOutcome::AlreadyExists)
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::DuplicateEntry,
                    "Subscription conflict without a surviving row",
                )
            })
    }
}
