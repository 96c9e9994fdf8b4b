//! MarkPayoutProcessingHandler - Moves a pending payout to processing.
//!
//! Only tracks state. Moving funds to the coach is done outside this service.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::admin::AdminCapability;
use crate::domain::foundation::{PayoutId, Timestamp};
use crate::domain::monetization::{MonetizationError, Payout, PayoutStatus};
use crate::ports::PayoutRepository;

#[derive(Debug, Clone)]
pub struct MarkPayoutProcessingCommand {
    pub payout_id: PayoutId,
}

#[derive(Debug, Clone)]
pub struct MarkPayoutProcessingResult {
    pub payout: Payout,
}

pub struct MarkPayoutProcessingHandler {
    payouts: Arc<dyn PayoutRepository>,
}

impl MarkPayoutProcessingHandler {
    pub fn new(payouts: Arc<dyn PayoutRepository>) -> Self {
        Self { payouts }
    }

    pub async fn handle(
        &self,
        capability: &AdminCapability,
        cmd: MarkPayoutProcessingCommand,
    ) -> Result<MarkPayoutProcessingResult, MonetizationError> {
        // 1. Load
        let mut payout = self
            .payouts
            .find_by_id(cmd.payout_id)
            .await?
            .ok_or(MonetizationError::PayoutNotFound(cmd.payout_id))?;

        // 2. Transition; only pending payouts move
        payout.mark_processing(Timestamp::now())?;

        // 3. Persist only if no other request moved it meanwhile
        if !self
            .payouts
            .update_if_status(&payout, PayoutStatus::Pending)
            .await?
        {
            let current = self
                .payouts
                .find_by_id(payout.id)
                .await?
                .ok_or(MonetizationError::PayoutNotFound(payout.id))?
                .status;
            warn!(payout_id = %payout.id, status = %current, "Payout moved by a concurrent request");
            return Err(MonetizationError::payout_not_pending(payout.id, current));
        }

        info!(
            payout_id = %payout.id,
            coach_id = %payout.coach_id,
            amount_minor = payout.amount.minor(),
            admin = capability.principal(),
            "Payout marked processing"
        );

        Ok(MarkPayoutProcessingResult { payout })
    }
}
