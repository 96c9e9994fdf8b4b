//! Coach payouts.
//!
//! The ledger only tracks payout state. Moving funds to the coach's processor
//! account happens outside this service.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::MonetizationError;
use crate::domain::foundation::{
    Money, PayoutId, StateMachine, Timestamp, UserId, ValidationError,
};

/// Lifecycle of a payout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayoutStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl PayoutStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PayoutStatus::Pending => "pending",
            PayoutStatus::Processing => "processing",
            PayoutStatus::Completed => "completed",
            PayoutStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for PayoutStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PayoutStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(PayoutStatus::Pending),
            "processing" => Ok(PayoutStatus::Processing),
            "completed" => Ok(PayoutStatus::Completed),
            "failed" => Ok(PayoutStatus::Failed),
            other => Err(ValidationError::invalid_format(
                "payout_status",
                format!("unknown value '{}'", other),
            )),
        }
    }
}

impl StateMachine for PayoutStatus {
    const ALL: &'static [Self] = &[
        PayoutStatus::Pending,
        PayoutStatus::Processing,
        PayoutStatus::Completed,
        PayoutStatus::Failed,
    ];

    fn can_transition_to(&self, target: &Self) -> bool {
        matches!(
            (self, target),
            (PayoutStatus::Pending, PayoutStatus::Processing)
                | (PayoutStatus::Processing, PayoutStatus::Completed)
                | (PayoutStatus::Processing, PayoutStatus::Failed)
        )
    }
}

/// Money owed to a coach.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payout {
    pub id: PayoutId,
    pub coach_id: UserId,
    pub amount: Money,
    pub status: PayoutStatus,
    pub requested_at: Timestamp,
    pub processed_at: Option<Timestamp>,
    pub transfer_reference: Option<String>,
}

impl Payout {
    /// Moves a pending payout to processing and stamps `processed_at`.
    pub fn mark_processing(&mut self, now: Timestamp) -> Result<(), MonetizationError> {
        if self.status != PayoutStatus::Pending {
            return Err(MonetizationError::payout_not_pending(self.id, self.status));
        }
        self.status = self
            .status
            .transition_to(PayoutStatus::Processing)
            .map_err(|_| MonetizationError::payout_not_pending(self.id, self.status))?;
        self.processed_at = Some(now);
        Ok(())
    }
}

/// A payout request ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPayout {
    pub coach_id: UserId,
    pub amount: Money,
    pub requested_at: Timestamp,
}
