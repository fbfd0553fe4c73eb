use chrono::Utc;

use yamdb_domain::pagination::{Page, PageRequest};
use yamdb_domain::policy::{Action, Resource, may_assign_role};
use yamdb_domain::user::{validate_email, validate_person_name, validate_username};

use crate::domain::repository::UserRepository;
use crate::domain::types::{NewUser, User, UserPatch};
use crate::error::ApiError;
use crate::usecase::{ensure_allowed, require_actor};

fn validate_patch(patch: &UserPatch) -> Result<(), ApiError> {
    if let Some(username) = &patch.username {
        validate_username(username).map_err(|e| ApiError::validation("username", e.to_string()))?;
    }
    if let Some(email) = &patch.email {
        if !validate_email(email) {
            return Err(ApiError::validation("email", "enter a valid email address"));
        }
    }
    for (field, value) in [
        ("first_name", &patch.first_name),
        ("last_name", &patch.last_name),
    ] {
        if value.as_deref().is_some_and(|v| !validate_person_name(v)) {
            return Err(ApiError::validation(field, "must be at most 150 characters"));
        }
    }
    Ok(())
}

/// Reject a username or email that belongs to an account other than `owner`.
async fn ensure_unique<R: UserRepository>(
    repo: &R,
    owner: Option<&User>,
    username: Option<&str>,
    email: Option<&str>,
) -> Result<(), ApiError> {
    let is_other = |found: &User| owner.is_none_or(|o| o.id != found.id);
    if let Some(username) = username {
        if repo
            .find_by_username(username)
            .await?
            .is_some_and(|u| is_other(&u))
        {
            return Err(ApiError::validation(
                "username",
                "a user with that username already exists",
            ));
        }
    }
    if let Some(email) = email {
        if repo.find_by_email(email).await?.is_some_and(|u| is_other(&u)) {
            return Err(ApiError::validation(
                "email",
                "a user with that email already exists",
            ));
        }
    }
    Ok(())
}

// ── ListUsers ────────────────────────────────────────────────────────────────

pub struct ListUsersUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> ListUsersUseCase<R> {
    pub async fn execute(
        &self,
        actor: Option<&User>,
        search: Option<&str>,
        page: PageRequest,
    ) -> Result<Page<User>, ApiError> {
        ensure_allowed(actor, Resource::UserDirectory, Action::Read)?;
        self.repo.list(search, page.clamped()).await
    }
}

// ── CreateUser ───────────────────────────────────────────────────────────────

pub struct CreateUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> CreateUserUseCase<R> {
    pub async fn execute(&self, actor: Option<&User>, input: NewUser) -> Result<User, ApiError> {
        ensure_allowed(actor, Resource::UserDirectory, Action::Create)?;
        validate_patch(&UserPatch {
            username: Some(input.username.clone()),
            email: Some(input.email.clone()),
            first_name: Some(input.first_name.clone()),
            last_name: Some(input.last_name.clone()),
            ..Default::default()
        })?;
        ensure_unique(&self.repo, None, Some(&input.username), Some(&input.email)).await?;
        self.repo.create(&input, Utc::now()).await
    }
}

// ── GetUser ──────────────────────────────────────────────────────────────────

pub struct GetUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> GetUserUseCase<R> {
    pub async fn execute(&self, actor: Option<&User>, username: &str) -> Result<User, ApiError> {
        ensure_allowed(actor, Resource::UserDirectory, Action::Read)?;
        self.repo
            .find_by_username(username)
            .await?
            .ok_or(ApiError::UserNotFound)
    }
}

// ── UpdateUser ───────────────────────────────────────────────────────────────

pub struct UpdateUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> UpdateUserUseCase<R> {
    pub async fn execute(
        &self,
        actor: Option<&User>,
        username: &str,
        patch: UserPatch,
    ) -> Result<User, ApiError> {
        ensure_allowed(
            actor,
            Resource::UserDirectory,
            Action::Modify { is_author: false },
        )?;
        let target = self
            .repo
            .find_by_username(username)
            .await?
            .ok_or(ApiError::UserNotFound)?;
        validate_patch(&patch)?;
        ensure_unique(
            &self.repo,
            Some(&target),
            patch.username.as_deref(),
            patch.email.as_deref(),
        )
        .await?;
        self.repo.update(target.id, &patch).await
    }
}

// ── DeleteUser ───────────────────────────────────────────────────────────────

pub struct DeleteUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> DeleteUserUseCase<R> {
    pub async fn execute(&self, actor: Option<&User>, username: &str) -> Result<(), ApiError> {
        ensure_allowed(
            actor,
            Resource::UserDirectory,
            Action::Modify { is_author: false },
        )?;
        let target = self
            .repo
            .find_by_username(username)
            .await?
            .ok_or(ApiError::UserNotFound)?;
        if !self.repo.delete(target.id).await? {
            return Err(ApiError::UserNotFound);
        }
        tracing::info!(user_id = %target.id, "user deleted");
        Ok(())
    }
}

// ── Me ───────────────────────────────────────────────────────────────────────

pub fn get_me(actor: Option<&User>) -> Result<User, ApiError> {
    ensure_allowed(actor, Resource::OwnProfile, Action::Read)?;
    Ok(require_actor(actor)?.clone())
}

pub struct UpdateMeUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> UpdateMeUseCase<R> {
    /// `role` is read-only here unless the caller is an admin; for everyone
    /// else it is dropped from the patch without an error.
    pub async fn execute(&self, actor: Option<&User>, mut patch: UserPatch) -> Result<User, ApiError> {
        ensure_allowed(
            actor,
            Resource::OwnProfile,
            Action::Modify { is_author: true },
        )?;
        let me = require_actor(actor)?;
        if !may_assign_role(me.role) {
            patch.role = None;
        }
        validate_patch(&patch)?;
        ensure_unique(
            &self.repo,
            Some(me),
            patch.username.as_deref(),
            patch.email.as_deref(),
        )
        .await?;
        self.repo.update(me.id, &patch).await
    }
}
