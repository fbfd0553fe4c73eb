pub mod auth;
pub mod comment;
pub mod review;
pub mod taxonomy;
pub mod title;
pub mod user;

use yamdb_domain::policy::{Action, Decision, Resource, authorize};

use crate::domain::types::User;
use crate::error::ApiError;

/// Apply the access policy to `actor`, mapping a denial to its API error.
pub fn ensure_allowed(
    actor: Option<&User>,
    resource: Resource,
    action: Action,
) -> Result<(), ApiError> {
    match authorize(actor.map(|u| u.role), resource, action) {
        Decision::Allow => Ok(()),
        Decision::Unauthenticated => Err(ApiError::Unauthenticated),
        Decision::Forbidden => Err(ApiError::Forbidden),
    }
}

/// Unwrap the caller or fail with 401.
pub fn require_actor(actor: Option<&User>) -> Result<&User, ApiError> {
    actor.ok_or(ApiError::Unauthenticated)
}
