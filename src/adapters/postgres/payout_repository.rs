//! PostgreSQL implementation of PayoutRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::{corrupt, db_error, money_from_row};
use crate::domain::foundation::{DomainError, ErrorCode, PayoutId, Timestamp, UserId};
use crate::domain::monetization::{NewPayout, Payout, PayoutStatus};
use crate::ports::PayoutRepository;

const PAYOUT_COLUMNS: &str =
    "id, coach_id, amount_minor, currency, status, requested_at, processed_at, transfer_reference";

pub struct PostgresPayoutRepository {
    pool: PgPool,
}

impl PostgresPayoutRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct PayoutRow {
    id: i64,
    coach_id: i64,
    amount_minor: i64,
    currency: String,
    status: String,
    requested_at: DateTime<Utc>,
    processed_at: Option<DateTime<Utc>>,
    transfer_reference: Option<String>,
}

impl TryFrom<PayoutRow> for Payout {
    type Error = DomainError;

    fn try_from(row: PayoutRow) -> Result<Self, Self::Error> {
        Ok(Payout {
            id: PayoutId::from_raw(row.id),
            coach_id: UserId::from_raw(row.coach_id),
            amount: money_from_row(row.amount_minor, &row.currency)?,
            status: row
                .status
                .parse::<PayoutStatus>()
                .map_err(|e| corrupt("status", e))?,
            requested_at: Timestamp::from_datetime(row.requested_at),
            processed_at: row.processed_at.map(Timestamp::from_datetime),
            transfer_reference: row.transfer_reference,
        })
    }
}

#[async_trait]
impl PayoutRepository for PostgresPayoutRepository {
    async fn insert(&self, payout: NewPayout) -> Result<Payout, DomainError> {
        let row: PayoutRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO payouts (coach_id, amount_minor, currency, status, requested_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            PAYOUT_COLUMNS
        ))
        .bind(payout.coach_id.as_i64())
        .bind(payout.amount.minor())
        .bind(payout.amount.currency().as_str())
        .bind(PayoutStatus::Pending.as_str())
        .bind(payout.requested_at.as_datetime())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("insert payout", e))?;

        row.try_into()
    }

    async fn find_by_id(&self, id: PayoutId) -> Result<Option<Payout>, DomainError> {
        let row: Option<PayoutRow> =
            sqlx::query_as(&format!("SELECT {} FROM payouts WHERE id = $1", PAYOUT_COLUMNS))
                .bind(id.as_i64())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| db_error("find payout", e))?;

        row.map(Payout::try_from).transpose()
    }

    async fn update_if_status(
        &self,
        payout: &Payout,
        expected: PayoutStatus,
    ) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE payouts SET
                status = $2,
                processed_at = $3,
                transfer_reference = $4
            WHERE id = $1 AND status = $5
            "#,
        )
        .bind(payout.id.as_i64())
        .bind(payout.status.as_str())
        .bind(payout.processed_at.as_ref().map(|t| *t.as_datetime()))
        .bind(payout.transfer_reference.as_deref())
        .bind(expected.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("update payout", e))?;

        if result.rows_affected() > 0 {
            return Ok(true);
        }

        // Zero rows: either gone or moved by another writer
        match self.find_by_id(payout.id).await? {
            Some(_) => Ok(false),
            None => Err(DomainError::new(
                ErrorCode::PayoutNotFound,
                format!("Payout {} not found", payout.id),
            )),
        }
    }

    async fn list_all(&self) -> Result<Vec<Payout>, DomainError> {
        let rows: Vec<PayoutRow> = sqlx::query_as(&format!(
            "SELECT {} FROM payouts ORDER BY requested_at DESC, id DESC",
            PAYOUT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("list payouts", e))?;

        rows.into_iter().map(Payout::try_from).collect()
    }
}
