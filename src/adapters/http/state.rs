//! Shared application state for every HTTP route.

use std::sync::Arc;

use crate::application::handlers::account::{
    GetProfileHandler, LoginHandler, RegisterHandler, UpdateProfileHandler,
};
use crate::application::handlers::admin::{
    DeleteContentHandler, GetUserHandler, ListAllContentHandler, ListTransactionsHandler,
    ListUsersHandler, SetPlatformFeeHandler,
};
use crate::application::handlers::content::{
    GetContentHandler, ListCoachContentHandler, UploadContentHandler,
};
use crate::application::handlers::monetization::{
    CheckAccessHandler, CreatePaymentIntentHandler, GrantIssuer, HandlePaymentEventHandler,
    PurchaseContentHandler, SubscribeHandler,
};
use crate::application::handlers::payout::{ListPayoutsHandler, MarkPayoutProcessingHandler};
use crate::domain::foundation::Currency;
use crate::domain::monetization::{PlatformFeeSetting, PriceList, WebhookVerifier};
use crate::ports::{
    AdminAuthorizer, BlobStore, ContentCatalog, PasswordHasher, PaymentProcessor,
    PayoutRepository, PurchaseRepository, SubscriptionRepository, TransactionLedger,
    UserDirectory,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Dependencies shared by all routes.
///
/// Cloned per request; every field is an `Arc` or a cheap handle onto shared
/// state, so clones see the same stores and the same platform fee.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserDirectory>,
    pub catalog: Arc<dyn ContentCatalog>,
    pub subscriptions: Arc<dyn SubscriptionRepository>,
    pub purchases: Arc<dyn PurchaseRepository>,
    pub ledger: Arc<dyn TransactionLedger>,
    pub payouts: Arc<dyn PayoutRepository>,
    pub processor: Arc<dyn PaymentProcessor>,
    pub password_hasher: Arc<dyn PasswordHasher>,
    pub blobs: Arc<dyn BlobStore>,
    pub admin_authorizer: Arc<dyn AdminAuthorizer>,
    pub webhook_verifier: Arc<WebhookVerifier>,
    pub platform_fee: PlatformFeeSetting,
    pub prices: PriceList,
    pub default_currency: Currency,
}

impl AppState {
    // Account

    pub fn register_handler(&self) -> RegisterHandler {
        RegisterHandler::new(self.users.clone(), self.password_hasher.clone())
    }

    pub fn login_handler(&self) -> LoginHandler {
        LoginHandler::new(self.users.clone(), self.password_hasher.clone())
    }

    pub fn get_profile_handler(&self) -> GetProfileHandler {
        GetProfileHandler::new(self.users.clone())
    }

    pub fn update_profile_handler(&self) -> UpdateProfileHandler {
        UpdateProfileHandler::new(self.users.clone())
    }

    // Content

    pub fn upload_content_handler(&self) -> UploadContentHandler {
        UploadContentHandler::new(self.users.clone(), self.catalog.clone(), self.blobs.clone())
    }

    pub fn get_content_handler(&self) -> GetContentHandler {
        GetContentHandler::new(self.check_access_handler())
    }

    pub fn list_coach_content_handler(&self) -> ListCoachContentHandler {
        ListCoachContentHandler::new(self.users.clone(), self.catalog.clone())
    }

    // Monetization

    pub fn check_access_handler(&self) -> CheckAccessHandler {
        CheckAccessHandler::new(
            self.users.clone(),
            self.catalog.clone(),
            self.subscriptions.clone(),
            self.purchases.clone(),
        )
    }

    pub fn create_payment_intent_handler(&self) -> CreatePaymentIntentHandler {
        CreatePaymentIntentHandler::new(
            self.users.clone(),
            self.catalog.clone(),
            self.processor.clone(),
            self.prices,
            self.default_currency.clone(),
        )
    }

    pub fn subscribe_handler(&self) -> SubscribeHandler {
        SubscribeHandler::new(self.users.clone(), self.processor.clone(), self.grants())
    }

    pub fn purchase_content_handler(&self) -> PurchaseContentHandler {
        PurchaseContentHandler::new(
            self.users.clone(),
            self.catalog.clone(),
            self.processor.clone(),
            self.grants(),
        )
    }

    pub fn payment_event_handler(&self) -> HandlePaymentEventHandler {
        HandlePaymentEventHandler::new(
            self.webhook_verifier.clone(),
            self.users.clone(),
            self.catalog.clone(),
            self.ledger.clone(),
            self.grants(),
            self.platform_fee.clone(),
        )
    }

    fn grants(&self) -> GrantIssuer {
        GrantIssuer::new(self.subscriptions.clone(), self.purchases.clone())
    }

    // Admin

    pub fn list_users_handler(&self) -> ListUsersHandler {
        ListUsersHandler::new(self.users.clone())
    }

    pub fn get_user_handler(&self) -> GetUserHandler {
        GetUserHandler::new(self.users.clone())
    }

    pub fn list_all_content_handler(&self) -> ListAllContentHandler {
        ListAllContentHandler::new(self.catalog.clone())
    }

    pub fn delete_content_handler(&self) -> DeleteContentHandler {
        DeleteContentHandler::new(self.catalog.clone())
    }

    pub fn list_transactions_handler(&self) -> ListTransactionsHandler {
        ListTransactionsHandler::new(self.ledger.clone())
    }

    pub fn list_payouts_handler(&self) -> ListPayoutsHandler {
        ListPayoutsHandler::new(self.payouts.clone())
    }

    pub fn mark_payout_processing_handler(&self) -> MarkPayoutProcessingHandler {
        MarkPayoutProcessingHandler::new(self.payouts.clone())
    }

    pub fn set_platform_fee_handler(&self) -> SetPlatformFeeHandler {
        SetPlatformFeeHandler::new(self.platform_fee.clone())
    }
}

#[cfg(test)]
pub(crate) mod test_state {
    //! In-memory `AppState` for route tests.

    use std::sync::Arc;

    use secrecy::SecretString;

    use super::AppState;
    use crate::adapters::auth::{BcryptPasswordHasher, SharedKeyAdminAuthorizer};
    use crate::adapters::memory::{
        InMemoryContentCatalog, InMemoryPayoutRepository, InMemoryPurchaseRepository,
        InMemorySubscriptionRepository, InMemoryTransactionLedger, InMemoryUserDirectory,
    };
    use crate::adapters::storage::LocalBlobStore;
    use crate::adapters::stripe::MockPaymentProcessor;
    use crate::domain::foundation::Currency;
    use crate::domain::monetization::{PlatformFeeSetting, PriceList, WebhookVerifier};

    pub const ADMIN_KEY: &str = "test-admin-key-0123456789abcdef";
    pub const WEBHOOK_SECRET: &str = "whsec_test_secret";

    pub fn test_state() -> AppState {
        AppState {
            users: Arc::new(InMemoryUserDirectory::new()),
            catalog: Arc::new(InMemoryContentCatalog::new()),
            subscriptions: Arc::new(InMemorySubscriptionRepository::new()),
            purchases: Arc::new(InMemoryPurchaseRepository::new()),
            ledger: Arc::new(InMemoryTransactionLedger::new()),
            payouts: Arc::new(InMemoryPayoutRepository::new()),
            processor: Arc::new(MockPaymentProcessor::new()),
            password_hasher: Arc::new(BcryptPasswordHasher::new(4)),
            blobs: Arc::new(LocalBlobStore::new(
                std::env::temp_dir().join("creator-pay-route-tests"),
                "/uploads",
            )),
            admin_authorizer: Arc::new(SharedKeyAdminAuthorizer::new([SecretString::new(
                ADMIN_KEY.to_string(),
            )])),
            webhook_verifier: Arc::new(WebhookVerifier::new(SecretString::new(
                WEBHOOK_SECRET.to_string(),
            ))),
            platform_fee: PlatformFeeSetting::default(),
            prices: PriceList::default(),
            default_currency: Currency::usd(),
        }
    }
}
