//! PostgreSQL implementation of TransactionLedger.
//!
//! Rows are never updated. `transactions_payment_reference_key` makes a
//! redelivered event resolve to the row that was written first.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::{corrupt, db_error, money_from_row};
use crate::domain::foundation::{
    ContentId, DomainError, ErrorCode, PurchaseId, SubscriptionId, Timestamp, TransactionId,
    UserId,
};
use crate::domain::monetization::{
    NewTransaction, Transaction, TransactionStatus, TransactionType,
};
use crate::ports::{InsertOutcome, TransactionLedger};

const TRANSACTION_COLUMNS: &str = "id, transaction_type, fan_id, coach_id, content_id, \
                                   subscription_id, purchase_id, gross_minor, fee_minor, \
                                   net_minor, currency, payment_reference, status, created_at";

pub struct PostgresTransactionLedger {
    pool: PgPool,
}

impl PostgresTransactionLedger {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct TransactionRow {
    id: i64,
    transaction_type: String,
    fan_id: Option<i64>,
    coach_id: Option<i64>,
    content_id: Option<i64>,
    subscription_id: Option<i64>,
    purchase_id: Option<i64>,
    gross_minor: i64,
    fee_minor: i64,
    net_minor: i64,
    currency: String,
    payment_reference: String,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<TransactionRow> for Transaction {
    type Error = DomainError;

    fn try_from(row: TransactionRow) -> Result<Self, Self::Error> {
        Ok(Transaction {
            id: TransactionId::from_raw(row.id),
            transaction_type: row
                .transaction_type
                .parse::<TransactionType>()
                .map_err(|e| corrupt("transaction_type", e))?,
            fan_id: row.fan_id.map(UserId::from_raw),
            coach_id: row.coach_id.map(UserId::from_raw),
            content_id: row.content_id.map(ContentId::from_raw),
            subscription_id: row.subscription_id.map(SubscriptionId::from_raw),
            purchase_id: row.purchase_id.map(PurchaseId::from_raw),
            gross: money_from_row(row.gross_minor, &row.currency)?,
            platform_fee: money_from_row(row.fee_minor, &row.currency)?,
            net: money_from_row(row.net_minor, &row.currency)?,
            payment_reference: row.payment_reference,
            status: row
                .status
                .parse::<TransactionStatus>()
                .map_err(|e| corrupt("status", e))?,
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

#[async_trait]
impl TransactionLedger for PostgresTransactionLedger {
    async fn find_by_payment_reference(
        &self,
        reference: &str,
    ) -> Result<Option<Transaction>, DomainError> {
        let row: Option<TransactionRow> = sqlx::query_as(&format!(
            "SELECT {} FROM transactions WHERE payment_reference = $1",
            TRANSACTION_COLUMNS
        ))
        .bind(reference)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("find transaction", e))?;

        row.map(Transaction::try_from).transpose()
    }

    async fn append(
        &self,
        tx: NewTransaction,
    ) -> Result<InsertOutcome<Transaction>, DomainError> {
        let inserted: Option<TransactionRow> = sqlx::query_as(&format!(
            r#"
            INSERT INTO transactions (
                transaction_type, fan_id, coach_id, content_id, subscription_id, purchase_id,
                gross_minor, fee_minor, net_minor, currency, payment_reference, status, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            ON CONFLICT (payment_reference) DO NOTHING
            RETURNING {}
            "#,
            TRANSACTION_COLUMNS
        ))
        .bind(tx.transaction_type.as_str())
        .bind(tx.fan_id.map(|id| id.as_i64()))
        .bind(tx.coach_id.map(|id| id.as_i64()))
        .bind(tx.content_id.map(|id| id.as_i64()))
        .bind(tx.subscription_id.map(|id| id.as_i64()))
        .bind(tx.purchase_id.map(|id| id.as_i64()))
        .bind(tx.gross.minor())
        .bind(tx.platform_fee.minor())
        .bind(tx.net.minor())
        .bind(tx.gross.currency().as_str())
        .bind(&tx.payment_reference)
        .bind(tx.status.as_str())
        .bind(tx.created_at.as_datetime())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("append transaction", e))?;

        match inserted {
            Some(row) => Ok(InsertOutcome::Inserted(row.try_into()?)),
            None => self
                .find_by_payment_reference(&tx.payment_reference)
                .await?
                .map(InsertOutcome::AlreadyExists)
                .ok_or_else(|| {
                    DomainError::new(
                        ErrorCode::DuplicateEntry,
                        "Transaction conflict without a surviving row",
                    )
                }),
        }
    }

    async fn list_all(&self) -> Result<Vec<Transaction>, DomainError> {
        let rows: Vec<TransactionRow> = sqlx::query_as(&format!(
            "SELECT {} FROM transactions ORDER BY created_at DESC, id DESC",
            TRANSACTION_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("list transactions", e))?;

        rows.into_iter().map(Transaction::try_from).collect()
    }
}
