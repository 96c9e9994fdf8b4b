//! Admin handlers. Every operation takes an `AdminCapability`.
//!
//! Payout operations live in the `payout` module and are re-exported by the
//! HTTP layer under the admin routes.

mod content;
mod platform_fee;
mod transactions;
mod users;

pub use content::{DeleteContentCommand, DeleteContentHandler, ListAllContentHandler};
pub use platform_fee::{SetPlatformFeeCommand, SetPlatformFeeHandler, SetPlatformFeeResult};
pub use transactions::ListTransactionsHandler;
pub use users::{GetUserHandler, GetUserQuery, ListUsersHandler};
