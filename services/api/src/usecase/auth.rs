use chrono::Utc;

use yamdb_auth_types::confirmation::ConfirmationCodes;
use yamdb_auth_types::token::TokenIssuer;
use yamdb_domain::user::{UserRole, validate_email, validate_username};

use crate::domain::repository::{ConfirmationMailer, UserRepository};
use crate::domain::types::{NewUser, User};
use crate::error::ApiError;

// ── Signup ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct SignupInput {
    pub email: String,
    pub username: String,
}

/// Echo of the accepted request. Identical whether or not the user existed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupOutput {
    pub email: String,
    pub username: String,
}

pub struct SignupUseCase<U: UserRepository, M: ConfirmationMailer> {
    pub users: U,
    pub mailer: M,
    pub codes: ConfirmationCodes,
}

impl<U: UserRepository, M: ConfirmationMailer> SignupUseCase<U, M> {
    pub async fn execute(&self, input: SignupInput) -> Result<SignupOutput, ApiError> {
        validate_username(&input.username)
            .map_err(|e| ApiError::validation("username", e.to_string()))?;
        if !validate_email(&input.email) {
            return Err(ApiError::validation("email", "enter a valid email address"));
        }

        let user = self.find_or_create(&input).await?;

        // Sending is not transactional with user creation; a retry reuses
        // the pair and re-sends.
        let code = self.codes.make(&user.confirmation_fingerprint());
        self.mailer.send_confirmation_code(&user, &code).await?;
        tracing::info!(user_id = %user.id, "confirmation code queued");

        Ok(SignupOutput {
            email: input.email,
            username: input.username,
        })
    }

    async fn find_or_create(&self, input: &SignupInput) -> Result<User, ApiError> {
        if let Some(existing) = self.users.find_by_username(&input.username).await? {
            if existing.email == input.email {
                return Ok(existing);
            }
            return Err(ApiError::validation(
                "username",
                "a user with that username already exists",
            ));
        }
        if self.users.find_by_email(&input.email).await?.is_some() {
            return Err(ApiError::validation(
                "email",
                "a user with that email already exists",
            ));
        }

        let user = self
            .users
            .create(
                &NewUser {
                    username: input.username.clone(),
                    email: input.email.clone(),
                    role: UserRole::User,
                    ..Default::default()
                },
                Utc::now(),
            )
            .await?;
        tracing::info!(user_id = %user.id, "user signed up");
        Ok(user)
    }
}

// ── Token exchange ───────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct TokenInput {
    pub username: String,
    pub confirmation_code: String,
}

#[derive(Debug, Clone)]
pub struct TokenOutput {
    pub token: String,
    pub exp: u64,
}

pub struct TokenUseCase<U: UserRepository> {
    pub users: U,
    pub codes: ConfirmationCodes,
    pub tokens: TokenIssuer,
}

impl<U: UserRepository> TokenUseCase<U> {
    pub async fn execute(&self, input: TokenInput) -> Result<TokenOutput, ApiError> {
        let user = self
            .users
            .find_by_username(&input.username)
            .await?
            .ok_or(ApiError::UserNotFound)?;

        if !self
            .codes
            .check(&user.confirmation_fingerprint(), &input.confirmation_code)
        {
            return Err(ApiError::InvalidConfirmationCode);
        }

        // Moves the fingerprint, so the code cannot be exchanged twice.
        self.users.touch_last_login(user.id, Utc::now()).await?;

        let access = self
            .tokens
            .issue(user.id)
            .map_err(|e| ApiError::Internal(e.into()))?;
        tracing::info!(user_id = %user.id, "access token issued");

        Ok(TokenOutput {
            token: access.token,
            exp: access.exp,
        })
    }
}
