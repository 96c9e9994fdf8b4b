//! PostgreSQL implementation of PurchaseRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::{db_error, money_from_row};
use crate::domain::foundation::{ContentId, DomainError, ErrorCode, PurchaseId, Timestamp, UserId};
use crate::domain::monetization::{NewPurchase, Purchase};
use crate::ports::{InsertOutcome, PurchaseRepository};

const PURCHASE_COLUMNS: &str =
    "id, fan_id, content_id, purchased_at, amount_minor, currency, payment_reference";

pub struct PostgresPurchaseRepository {
    pool: PgPool,
}

impl PostgresPurchaseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct PurchaseRow {
    id: i64,
    fan_id: i64,
    content_id: i64,
    purchased_at: DateTime<Utc>,
    amount_minor: i64,
    currency: String,
    payment_reference: Option<String>,
}

impl TryFrom<PurchaseRow> for Purchase {
    type Error = DomainError;

    fn try_from(row: PurchaseRow) -> Result<Self, Self::Error> {
        Ok(Purchase {
            id: PurchaseId::from_raw(row.id),
            fan_id: UserId::from_raw(row.fan_id),
            content_id: ContentId::from_raw(row.content_id),
            purchased_at: Timestamp::from_datetime(row.purchased_at),
            amount: money_from_row(row.amount_minor, &row.currency)?,
            payment_reference: row.payment_reference,
        })
    }
}

#[async_trait]
impl PurchaseRepository for PostgresPurchaseRepository {
    async fn find(
        &self,
        fan_id: UserId,
        content_id: ContentId,
    ) -> Result<Option<Purchase>, DomainError> {
        let row: Option<PurchaseRow> = sqlx::query_as(&format!(
            "SELECT {} FROM purchases WHERE fan_id = $1 AND content_id = $2",
            PURCHASE_COLUMNS
        ))
        .bind(fan_id.as_i64())
        .bind(content_id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("find purchase", e))?;

        row.map(Purchase::try_from).transpose()
    }

    async fn find_by_payment_reference(
        &self,
        reference: &str,
    ) -> Result<Option<Purchase>, DomainError> {
        let row: Option<PurchaseRow> = sqlx::query_as(&format!(
            "SELECT {} FROM purchases WHERE payment_reference = $1",
            PURCHASE_COLUMNS
        ))
        .bind(reference)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("find purchase by reference", e))?;

        row.map(Purchase::try_from).transpose()
    }

    async fn insert(&self, purchase: NewPurchase) -> Result<InsertOutcome<Purchase>, DomainError> {
        let inserted: Option<PurchaseRow> = sqlx::query_as(&format!(
            r#"
            INSERT INTO purchases (
                fan_id, content_id, purchased_at, amount_minor, currency, payment_reference
            ) VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT DO NOTHING
            RETURNING {}
            "#,
            PURCHASE_COLUMNS
        ))
        .bind(purchase.fan_id.as_i64())
        .bind(purchase.content_id.as_i64())
        .bind(purchase.purchased_at.as_datetime())
        .bind(purchase.amount.minor())
        .bind(purchase.amount.currency().as_str())
        .bind(purchase.payment_reference.as_deref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("insert purchase", e))?;

        if let Some(row) = inserted {
            return Ok(InsertOutcome::Inserted(row.try_into()?));
        }

        // Lost to either unique key; report whichever row holds it
        if let Some(reference) = purchase.payment_reference.as_deref() {
            if let Some(existing) = self.find_by_payment_reference(reference).await? {
                return Ok(InsertOutcome::AlreadyExists(existing));
            }
        }
        self.find(purchase.fan_id, purchase.content_id)
            .await?
            .map(InsertOutcome::AlreadyExists)
            .ok_or_else(|| {
                DomainError::new(ErrorCode::DuplicateEntry, "Purchase conflict without a surviving row")
            })
    }
}
