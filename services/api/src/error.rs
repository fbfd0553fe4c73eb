use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// API error variants. Every handler returns `Result<_, ApiError>`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{message}")]
    Validation {
        field: &'static str,
        message: String,
    },
    #[error("invalid confirmation code")]
    InvalidConfirmationCode,
    #[error("authentication credentials were not provided")]
    Unauthenticated,
    #[error("invalid or expired access token")]
    InvalidToken,
    #[error("you do not have permission to perform this action")]
    Forbidden,
    #[error("user not found")]
    UserNotFound,
    #[error("title not found")]
    TitleNotFound,
    #[error("review not found")]
    ReviewNotFound,
    #[error("comment not found")]
    CommentNotFound,
    #[error("category not found")]
    CategoryNotFound,
    #[error("genre not found")]
    GenreNotFound,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    /// Second review by the same author for the same title.
    pub fn duplicate_review() -> Self {
        Self::validation("title", "you have already reviewed this title")
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::InvalidConfirmationCode => "INVALID_CONFIRMATION_CODE",
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::Forbidden => "FORBIDDEN",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::TitleNotFound => "TITLE_NOT_FOUND",
            Self::ReviewNotFound => "REVIEW_NOT_FOUND",
            Self::CommentNotFound => "COMMENT_NOT_FOUND",
            Self::CategoryNotFound => "CATEGORY_NOT_FOUND",
            Self::GenreNotFound => "GENRE_NOT_FOUND",
            Self::Internal(_) => "INTERNAL",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::Validation { .. } | Self::InvalidConfirmationCode => StatusCode::BAD_REQUEST,
            Self::Unauthenticated | Self::InvalidToken => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::UserNotFound
            | Self::TitleNotFound
            | Self::ReviewNotFound
            | Self::CommentNotFound
            | Self::CategoryNotFound
            | Self::GenreNotFound => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<sea_orm::DbErr> for ApiError {
    fn from(e: sea_orm::DbErr) -> Self {
        Self::Internal(e.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let Self::Internal(ref e) = self {
            tracing::error!(error = format!("{e:#}"), kind = "INTERNAL", "internal error");
        }
        let mut body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        if let Self::Validation { field, .. } = &self {
            body["field"] = serde_json::Value::from(*field);
        }
        (status, axum::Json(body)).into_response()
    }
}
