//! GetContentHandler - Returns a content item to an entitled viewer.

use crate::application::handlers::monetization::{CheckAccessHandler, CheckAccessQuery};
use crate::domain::content::{Content, ContentError};
use crate::domain::foundation::{ContentId, UserId};
use crate::domain::monetization::{AccessDecision, MonetizationError};

#[derive(Debug, Clone)]
pub struct GetContentQuery {
    pub content_id: ContentId,
    pub fan_id: Option<UserId>,
}

#[derive(Debug, Clone)]
pub struct GetContentResult {
    pub content: Content,
    pub decision: AccessDecision,
}

/// Gates the body behind the same entitlement check used by the access
/// endpoint. Denied viewers get `AccessDenied` with the reason and no body.
pub struct GetContentHandler {
    access: CheckAccessHandler,
}

impl GetContentHandler {
    pub fn new(access: CheckAccessHandler) -> Self {
        Self { access }
    }

    pub async fn handle(&self, query: GetContentQuery) -> Result<GetContentResult, ContentError> {
        let result = self
            .access
            .handle(CheckAccessQuery {
                fan_id: query.fan_id,
                content_id: query.content_id,
                verify_fan: false,
            })
            .await
            .map_err(|e| match e {
                MonetizationError::ContentNotFound(id) => ContentError::not_found(id),
                other => ContentError::infrastructure(other.message()),
            })?;

        if !result.decision.allowed {
            return Err(ContentError::access_denied(result.decision.reason.describe()));
        }

        Ok(GetContentResult {
            content: result.content,
            decision: result.decision,
        })
    }
}
