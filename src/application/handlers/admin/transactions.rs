//! ListTransactionsHandler - The ledger, newest first.

use std::sync::Arc;

use crate::domain::admin::{AdminCapability, AdminError};
use crate::domain::monetization::Transaction;
use crate::ports::TransactionLedger;

pub struct ListTransactionsHandler {
    ledger: Arc<dyn TransactionLedger>,
}

impl ListTransactionsHandler {
    pub fn new(ledger: Arc<dyn TransactionLedger>) -> Self {
        Self { ledger }
    }

    pub async fn handle(
        &self,
        _capability: &AdminCapability,
    ) -> Result<Vec<Transaction>, AdminError> {
        Ok(self.ledger.list_all().await?)
    }
}
