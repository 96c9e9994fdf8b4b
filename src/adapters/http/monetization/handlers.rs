//! HTTP handlers for payments, grants, webhooks and entitlement checks.

use axum::body::Bytes;
use axum::extract::{Json, Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::adapters::http::error::ErrorResponse;
use crate::adapters::http::state::AppState;
use crate::application::handlers::monetization::{
    CheckAccessQuery, CreatePaymentIntentCommand, HandlePaymentEventCommand,
    HandlePaymentEventResult, PurchaseContentCommand, SubscribeCommand, SubscribeResult,
    PurchaseContentResult,
};
use crate::domain::foundation::{ContentId, DomainError, ErrorCode, UserId};
use crate::domain::monetization::{MonetizationError, WebhookError};

use super::dto::{
    AccessCheckResponse, CreatePaymentIntentRequest, PaymentIntentResponse,
    PurchaseContentRequest, PurchaseResponse, SubscribeRequest, SubscriptionResponse,
    WebhookAckResponse, PURCHASE_FIELDS_REQUIRED, SUBSCRIBE_FIELDS_REQUIRED,
};

/// Header carrying the processor's webhook signature.
pub const SIGNATURE_HEADER: &str = "Stripe-Signature";

// ════════════════════════════════════════════════════════════════════════════════
// Command Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/monetization/create_payment_intent
pub async fn create_payment_intent(
    State(state): State<AppState>,
    request: Option<Json<CreatePaymentIntentRequest>>,
) -> Result<impl IntoResponse, MonetizationApiError> {
    let request = request.map(|Json(r)| r).unwrap_or_default();
    let cmd = CreatePaymentIntentCommand {
        item_id: request.item_id,
        item_type: request.item_type,
        fan_id: request.fan_id.map(UserId::from_raw),
        currency: request.currency,
    };

    let result = state.create_payment_intent_handler().handle(cmd).await?;

    Ok(Json(PaymentIntentResponse {
        client_secret: result.client_secret,
        payment_intent_id: result.payment_intent_id,
    }))
}

/// POST /api/monetization/subscribe
pub async fn subscribe(
    State(state): State<AppState>,
    request: Option<Json<SubscribeRequest>>,
) -> Result<impl IntoResponse, MonetizationApiError> {
    let request = request.map(|Json(r)| r).unwrap_or_default();
    let (Some(fan_id), Some(coach_id), Some(subscription_type), Some(payment_reference)) = (
        request.fan_id,
        request.coach_id,
        non_blank(request.subscription_type),
        non_blank(request.payment_intent_id),
    ) else {
        return Err(MonetizationError::MissingRequestFields(SUBSCRIBE_FIELDS_REQUIRED).into());
    };

    let cmd = SubscribeCommand {
        fan_id: UserId::from_raw(fan_id),
        coach_id: UserId::from_raw(coach_id),
        subscription_type,
        payment_reference,
    };

    let result = state.subscribe_handler().handle(cmd).await?;

    let (status, message) = match &result {
        SubscribeResult::Created(_) => (StatusCode::CREATED, "Subscription successful"),
        SubscribeResult::AlreadyActive(_) => (StatusCode::OK, "Already subscribed and active"),
    };
    Ok((
        status,
        Json(SubscriptionResponse {
            message: message.to_string(),
            subscription_id: result.subscription().id,
        }),
    ))
}

/// POST /api/monetization/purchase_content
pub async fn purchase_content(
    State(state): State<AppState>,
    request: Option<Json<PurchaseContentRequest>>,
) -> Result<impl IntoResponse, MonetizationApiError> {
    let request = request.map(|Json(r)| r).unwrap_or_default();
    let (Some(fan_id), Some(content_id), Some(payment_reference)) = (
        request.fan_id,
        request.content_id,
        non_blank(request.payment_intent_id),
    ) else {
        return Err(MonetizationError::MissingRequestFields(PURCHASE_FIELDS_REQUIRED).into());
    };

    let cmd = PurchaseContentCommand {
        fan_id: UserId::from_raw(fan_id),
        content_id: ContentId::from_raw(content_id),
        payment_reference,
    };

    let result = state.purchase_content_handler().handle(cmd).await?;

    let (status, message) = match &result {
        PurchaseContentResult::Created(_) => (StatusCode::CREATED, "Content purchased successfully"),
        PurchaseContentResult::AlreadyOwned(_) => (StatusCode::OK, "Content already purchased"),
    };
    Ok((
        status,
        Json(PurchaseResponse {
            message: message.to_string(),
            purchase_id: result.purchase().id,
        }),
    ))
}

/// POST /api/monetization/stripe_webhook
///
/// The body is taken as raw bytes; the signature covers them exactly.
pub async fn stripe_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, WebhookApiError> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or(WebhookError::InvalidSignature)?;

    let cmd = HandlePaymentEventCommand {
        payload: body.to_vec(),
        signature: signature.to_string(),
    };

    match state.payment_event_handler().handle(cmd).await? {
        HandlePaymentEventResult::Ignored { event_type } => {
            tracing::debug!(event_type = %event_type, "Unhandled event type");
        }
        HandlePaymentEventResult::Recorded(_) | HandlePaymentEventResult::AlreadyProcessed { .. } => {}
    }

    Ok(Json(WebhookAckResponse { success: true }))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// ════════════════════════════════════════════════════════════════════════════════
// Query Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/monetization/check_access/{fan_id}/{content_id}
///
/// 200 when allowed, 403 with the reason when not.
pub async fn check_access(
    State(state): State<AppState>,
    Path((fan_id, content_id)): Path<(i64, i64)>,
) -> Result<Response, MonetizationApiError> {
    let query = CheckAccessQuery {
        fan_id: Some(UserId::from_raw(fan_id)),
        content_id: ContentId::from_raw(content_id),
        verify_fan: true,
    };

    let result = state.check_access_handler().handle(query).await?;
    let decision = result.decision;

    let response = if decision.allowed {
        (
            StatusCode::OK,
            Json(AccessCheckResponse {
                access: true,
                reason: decision.reason.describe().to_string(),
                error: None,
                error_code: None,
            }),
        )
    } else {
        (
            StatusCode::FORBIDDEN,
            Json(AccessCheckResponse {
                access: false,
                reason: decision.reason.describe().to_string(),
                error: Some("Access denied".to_string()),
                error_code: Some(ErrorCode::Forbidden.to_string()),
            }),
        )
    };
    Ok(response.into_response())
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts monetization errors to HTTP responses.
#[derive(Debug)]
pub struct MonetizationApiError(MonetizationError);

impl From<MonetizationError> for MonetizationApiError {
    fn from(err: MonetizationError) -> Self {
        Self(err)
    }
}

impl From<DomainError> for MonetizationApiError {
    fn from(err: DomainError) -> Self {
        Self(MonetizationError::from(err))
    }
}

impl MonetizationApiError {
    fn status(&self) -> StatusCode {
        match &self.0 {
            MonetizationError::MissingRequestFields(_)
            | MonetizationError::MissingIntentFields
            | MonetizationError::InvalidItem
            | MonetizationError::InvalidSubscriptionType(_)
            | MonetizationError::NotPurchasable(_)
            | MonetizationError::PaymentMismatch
            | MonetizationError::PayoutNotPending { .. }
            | MonetizationError::InvalidFeePercentage
            | MonetizationError::ValidationFailed { .. } => StatusCode::BAD_REQUEST,
            MonetizationError::PaymentIncomplete { .. } => StatusCode::PAYMENT_REQUIRED,
            MonetizationError::InvalidFan
            | MonetizationError::InvalidCoach
            | MonetizationError::IntentCreationFailed(_) => StatusCode::FORBIDDEN,
            MonetizationError::ContentNotFound(_)
            | MonetizationError::UserNotFound(_)
            | MonetizationError::PayoutNotFound(_) => StatusCode::NOT_FOUND,
            MonetizationError::PaymentProvider(_) | MonetizationError::Infrastructure(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for MonetizationApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        ErrorResponse::new(self.0.code(), self.0.message()).into_response_with(status)
    }
}

/// Webhook failures. 4xx stops redelivery, 5xx asks for it.
#[derive(Debug)]
pub struct WebhookApiError(WebhookError);

impl From<WebhookError> for WebhookApiError {
    fn from(err: WebhookError) -> Self {
        Self(err)
    }
}

impl IntoResponse for WebhookApiError {
    fn into_response(self) -> Response {
        let code = if self.0.is_signature_failure() {
            ErrorCode::InvalidWebhookSignature
        } else if self.0.is_retryable() {
            ErrorCode::DatabaseError
        } else {
            ErrorCode::ValidationFailed
        };
        ErrorResponse::new(code, self.0.to_string()).into_response_with(self.0.status_code())
    }
}
