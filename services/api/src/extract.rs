//! Request extractors: the calling user, plus JSON bodies, query strings and
//! path segments with API-shaped rejections.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts};
use axum::http::request::Parts;

use yamdb_auth_types::identity::BearerToken;

use crate::domain::repository::UserRepository;
use crate::domain::types::User;
use crate::error::ApiError;
use crate::state::AppState;

/// The authenticated caller, or `None` for anonymous requests.
///
/// A present but invalid token is rejected with 401 even on open endpoints,
/// as is a valid token whose user has since been deleted.
#[derive(Debug, Clone)]
pub struct Requester(pub Option<User>);

impl Requester {
    pub fn user(&self) -> Option<&User> {
        self.0.as_ref()
    }
}

impl FromRequestParts<AppState> for Requester {
    type Rejection = ApiError;

    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let bearer = BearerToken::from_headers(&parts.headers);
        let tokens = state.tokens.clone();
        let users = state.user_repo();

        async move {
            let BearerToken(token) = bearer.map_err(|_| ApiError::InvalidToken)?;
            let Some(token) = token else {
                return Ok(Self(None));
            };
            let info = tokens.verify(&token).map_err(|e| {
                tracing::debug!(error = %e, "rejected access token");
                ApiError::InvalidToken
            })?;
            let user = users
                .find_by_id(info.user_id)
                .await?
                .ok_or(ApiError::InvalidToken)?;
            Ok(Self(Some(user)))
        }
    }
}

/// `axum::Json` whose rejection is a 400 `ApiError::Validation`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct Payload<T>(pub T);

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::validation("body", rejection.body_text())
    }
}

/// `axum::extract::Query` whose rejection is a 400 `ApiError::Validation`.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct Params<T>(pub T);

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::validation("query", rejection.body_text())
    }
}

/// `axum::extract::Path` whose rejection is a 400 `ApiError::Validation`.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct PathParams<T>(pub T);

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::validation("path", rejection.body_text())
    }
}
