//! `Authorization: Bearer <token>` extractor.

use axum::extract::FromRequestParts;
use http::header::AUTHORIZATION;
use http::request::Parts;
use http::{HeaderMap, StatusCode};

/// Raw bearer credential from the `Authorization` header, if any.
///
/// Never rejects: a missing header yields `BearerToken(None)` so that read
/// endpoints stay open to anonymous callers. A header with a scheme other
/// than `Bearer` is treated as a bad credential (401).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BearerToken(pub Option<String>);

fn parse_bearer(value: &str) -> Option<&str> {
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

impl BearerToken {
    /// Synchronous form of the extractor, for callers that need the token
    /// before building their own future.
    pub fn from_headers(headers: &HeaderMap) -> Result<Self, StatusCode> {
        match headers.get(AUTHORIZATION) {
            None => Ok(Self(None)),
            Some(value) => value
                .to_str()
                .ok()
                .and_then(parse_bearer)
                .map(|t| Self(Some(t.to_owned())))
                .ok_or(StatusCode::UNAUTHORIZED),
        }
    }
}

impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    // Header parsing happens synchronously; only the result moves into the future.
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let result = Self::from_headers(&parts.headers);
        async move { result }
    }
}
