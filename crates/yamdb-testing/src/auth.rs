//! Bearer-token helpers for HTTP tests.
//!
//! `MockAuth` signs real tokens with a [`TokenIssuer`] so that requests go
//! through the same verification path as production traffic.

use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue, header::AUTHORIZATION};
use yamdb_auth_types::clock::{Clock, SystemClock};
use yamdb_auth_types::token::TokenIssuer;
use yamdb_domain::id::UserId;

use crate::TEST_SECRET;

pub struct MockAuth {
    issuer: TokenIssuer,
}

impl Default for MockAuth {
    fn default() -> Self {
        Self::new(TEST_SECRET, Arc::new(SystemClock))
    }
}

impl MockAuth {
    pub fn new(secret: &str, clock: Arc<dyn Clock>) -> Self {
        Self {
            issuer: TokenIssuer::new(secret, 3600, clock),
        }
    }

    pub fn token(&self, user_id: UserId) -> String {
        self.issuer
            .issue(user_id)
            .expect("test token must sign")
            .token
    }

    /// `Authorization: Bearer <token>` for the given user.
    pub fn header(&self, user_id: UserId) -> (HeaderName, HeaderValue) {
        Self::bearer(&self.token(user_id))
    }

    pub fn bearer(token: &str) -> (HeaderName, HeaderValue) {
        let value = HeaderValue::from_str(&format!("Bearer {token}"))
            .expect("token is a valid header value");
        (AUTHORIZATION, value)
    }
}
