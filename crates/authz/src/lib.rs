//! Ownership guards for mutating resource records.
//!
//! Authentication happens upstream; by the time a request reaches a handler
//! the authenticated identity, if any, is carried in a header. This crate
//! reads that identity and decides whether it may touch a record.

use axum::http::HeaderMap;
use serde::Deserialize;
use thiserror::Error;

/// Header the upstream authentication layer sets by default.
pub const DEFAULT_CALLER_HEADER: &str = "x-user-id";

/// Whether record ownership is checked on create, update, and delete.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OwnershipPolicy {
    #[default]
    Disabled,
    Enforced,
}

impl OwnershipPolicy {
    pub fn is_enforced(self) -> bool {
        self == Self::Enforced
    }
}

/// Identity of the requester as asserted by the authentication layer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Caller(Option<String>);

impl Caller {
    pub fn anonymous() -> Self {
        Self(None)
    }

    pub fn identified(id: impl Into<String>) -> Self {
        Self(Some(id.into()))
    }

    /// Read the caller from `header`. Missing, blank, or non-UTF-8 values are anonymous.
    pub fn from_headers(headers: &HeaderMap, header: &str) -> Self {
        let id = headers
            .get(header)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string);
        Self(id)
    }

    pub fn id(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum OwnershipError {
    #[error("a caller identity is required")]
    MissingCaller,

    #[error("record has no owner")]
    Unowned,

    #[error("caller '{caller}' does not own this record")]
    NotOwner { caller: String },
}

/// Ensure a record may be created under `policy`. Returns the owner to store.
pub fn require_caller(
    policy: OwnershipPolicy,
    caller: &Caller,
) -> Result<Option<String>, OwnershipError> {
    match (policy, caller.id()) {
        (OwnershipPolicy::Enforced, None) => Err(OwnershipError::MissingCaller),
        (_, id) => Ok(id.map(str::to_string)),
    }
}

/// Ensure `caller` owns the record whose stored owner is `owner`.
pub fn require_ownership(
    policy: OwnershipPolicy,
    caller: &Caller,
    owner: Option<&str>,
) -> Result<(), OwnershipError> {
    if !policy.is_enforced() {
        return Ok(());
    }

    let caller_id = caller.id().ok_or(OwnershipError::MissingCaller)?;
    let owner = owner.ok_or(OwnershipError::Unowned)?;

    if caller_id != owner {
        tracing::debug!(caller = caller_id, owner, "ownership check rejected");
        return Err(OwnershipError::NotOwner {
            caller: caller_id.to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn caller_from_header() {
        let mut headers = HeaderMap::new();
        headers.insert(DEFAULT_CALLER_HEADER, HeaderValue::from_static("user-1"));
        assert_eq!(
            Caller::from_headers(&headers, DEFAULT_CALLER_HEADER),
            Caller::identified("user-1")
        );
    }

    #[test]
    fn blank_header_is_anonymous() {
        let mut headers = HeaderMap::new();
        headers.insert(DEFAULT_CALLER_HEADER, HeaderValue::from_static("  "));
        assert_eq!(
            Caller::from_headers(&headers, DEFAULT_CALLER_HEADER),
            Caller::anonymous()
        );
    }

    #[test]
    fn disabled_policy_allows_everything() {
        let anonymous = Caller::anonymous();
        assert_eq!(require_caller(OwnershipPolicy::Disabled, &anonymous), Ok(None));
        assert!(require_ownership(OwnershipPolicy::Disabled, &anonymous, Some("user-1")).is_ok());
    }

    #[test]
    fn disabled_policy_still_records_known_caller() {
        let caller = Caller::identified("user-1");
        assert_eq!(
            require_caller(OwnershipPolicy::Disabled, &caller),
            Ok(Some("user-1".to_string()))
        );
    }

    #[test]
    fn enforced_policy_requires_caller_on_create() {
        assert_eq!(
            require_caller(OwnershipPolicy::Enforced, &Caller::anonymous()),
            Err(OwnershipError::MissingCaller)
        );
    }

    #[test]
    fn enforced_policy_rejects_other_callers() {
        let caller = Caller::identified("user-2");
        assert_eq!(
            require_ownership(OwnershipPolicy::Enforced, &caller, Some("user-1")),
            Err(OwnershipError::NotOwner {
                caller: "user-2".to_string()
            })
        );
        assert_eq!(
            require_ownership(OwnershipPolicy::Enforced, &caller, None),
            Err(OwnershipError::Unowned)
        );
        assert!(require_ownership(OwnershipPolicy::Enforced, &caller, Some("user-2")).is_ok());
    }
}
