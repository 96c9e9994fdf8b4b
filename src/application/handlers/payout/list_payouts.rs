//! ListPayoutsHandler - Query handler for the payout ledger.

use std::sync::Arc;

use crate::domain::admin::AdminCapability;
use crate::domain::monetization::{MonetizationError, Payout};
use crate::ports::PayoutRepository;

pub struct ListPayoutsHandler {
    payouts: Arc<dyn PayoutRepository>,
}

impl ListPayoutsHandler {
    pub fn new(payouts: Arc<dyn PayoutRepository>) -> Self {
        Self { payouts }
    }

    /// Newest request first.
    pub async fn handle(&self, _capability: &AdminCapability) -> Result<Vec<Payout>, MonetizationError> {
        Ok(self.payouts.list_all().await?)
    }
}
