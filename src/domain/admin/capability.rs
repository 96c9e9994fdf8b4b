//! Operator capability.
//!
//! Admin operations take an [`AdminCapability`] argument instead of checking a
//! header themselves. Only an `AdminAuthorizer` hands one out.

use std::fmt;

/// Raw credential presented by a caller. Redacted in `Debug`.
#[derive(Clone)]
pub struct AdminCredential(String);

impl AdminCredential {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AdminCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AdminCredential([REDACTED])")
    }
}

/// Proof that the caller passed admin authorization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminCapability {
    principal: String,
}

impl AdminCapability {
    /// Issues a capability for `principal`. Call only from an authorizer.
    pub fn issue(principal: impl Into<String>) -> Self {
        Self {
            principal: principal.into(),
        }
    }

    /// Label of the key or operator that was authorized, for audit logs.
    pub fn principal(&self) -> &str {
        &self.principal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credential_debug_is_redacted() {
        let cred = AdminCredential::new("hunter2");
        assert!(!format!("{:?}", cred).contains("hunter2"));
        assert_eq!(cred.as_str(), "hunter2");
    }

    #[test]
    fn capability_keeps_principal() {
        assert_eq!(AdminCapability::issue("ops-key-1").principal(), "ops-key-1");
    }
}
