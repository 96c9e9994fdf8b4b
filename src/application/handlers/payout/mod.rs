//! Payout ledger handlers. Admin-only.

mod list_payouts;
mod mark_processing;

pub use list_payouts::ListPayoutsHandler;
pub use mark_processing::{
    MarkPayoutProcessingCommand, MarkPayoutProcessingHandler, MarkPayoutProcessingResult,
};
