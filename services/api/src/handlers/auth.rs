use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::extract::Payload;
use crate::state::AppState;
use crate::usecase::auth::{SignupInput, SignupUseCase, TokenInput, TokenUseCase};

// ── POST /auth/signup ────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub username: String,
}

#[derive(Serialize)]
pub struct SignupResponse {
    pub email: String,
    pub username: String,
}

pub async fn signup(
    State(state): State<AppState>,
    Payload(body): Payload<SignupRequest>,
) -> Result<Json<SignupResponse>, ApiError> {
    let usecase = SignupUseCase {
        users: state.user_repo(),
        mailer: state.mailer(),
        codes: state.codes.clone(),
    };
    let out = usecase
        .execute(SignupInput {
            email: body.email,
            username: body.username,
        })
        .await?;
    Ok(Json(SignupResponse {
        email: out.email,
        username: out.username,
    }))
}

// ── POST /auth/token ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct TokenRequest {
    pub username: String,
    pub confirmation_code: String,
}

#[derive(Serialize)]
pub struct TokenResponse {
    pub token: String,
}

pub async fn token(
    State(state): State<AppState>,
    Payload(body): Payload<TokenRequest>,
) -> Result<(StatusCode, Json<TokenResponse>), ApiError> {
    let usecase = TokenUseCase {
        users: state.user_repo(),
        codes: state.codes.clone(),
        tokens: state.tokens.clone(),
    };
    let out = usecase
        .execute(TokenInput {
            username: body.username,
            confirmation_code: body.confirmation_code,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(TokenResponse { token: out.token })))
}
