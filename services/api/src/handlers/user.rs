use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use yamdb_domain::pagination::{Page, PageRequest};
use yamdb_domain::user::UserRole;

use crate::domain::types::{NewUser, User, UserPatch};
use crate::error::ApiError;
use crate::extract::{Params, PathParams, Payload, Requester};
use crate::state::AppState;
use crate::usecase::user::{
    CreateUserUseCase, DeleteUserUseCase, GetUserUseCase, ListUsersUseCase, UpdateMeUseCase,
    UpdateUserUseCase, get_me as get_me_usecase,
};

#[derive(Serialize)]
pub struct UserResponse {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub bio: String,
    pub role: UserRole,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            bio: user.bio,
            role: user.role,
        }
    }
}

#[derive(Deserialize, Default)]
pub struct UserSearchQuery {
    pub search: Option<String>,
}

// ── GET /users ───────────────────────────────────────────────────────────────

pub async fn list_users(
    requester: Requester,
    State(state): State<AppState>,
    Params(page): Params<PageRequest>,
    Params(query): Params<UserSearchQuery>,
) -> Result<Json<Page<UserResponse>>, ApiError> {
    let usecase = ListUsersUseCase {
        repo: state.user_repo(),
    };
    let users = usecase
        .execute(requester.user(), query.search.as_deref(), page)
        .await?;
    Ok(Json(users.map(UserResponse::from)))
}

// ── POST /users ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub role: UserRole,
}

pub async fn create_user(
    requester: Requester,
    State(state): State<AppState>,
    Payload(body): Payload<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let usecase = CreateUserUseCase {
        repo: state.user_repo(),
    };
    let user = usecase
        .execute(
            requester.user(),
            NewUser {
                username: body.username,
                email: body.email,
                first_name: body.first_name,
                last_name: body.last_name,
                bio: body.bio,
                role: body.role,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

// ── GET/PATCH/DELETE /users/{username} ───────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub role: Option<UserRole>,
}

impl From<UpdateUserRequest> for UserPatch {
    fn from(body: UpdateUserRequest) -> Self {
        Self {
            username: body.username,
            email: body.email,
            first_name: body.first_name,
            last_name: body.last_name,
            bio: body.bio,
            role: body.role,
        }
    }
}

pub async fn get_user(
    requester: Requester,
    State(state): State<AppState>,
    PathParams(username): PathParams<String>,
) -> Result<Json<UserResponse>, ApiError> {
    let usecase = GetUserUseCase {
        repo: state.user_repo(),
    };
    let user = usecase.execute(requester.user(), &username).await?;
    Ok(Json(user.into()))
}

pub async fn update_user(
    requester: Requester,
    State(state): State<AppState>,
    PathParams(username): PathParams<String>,
    Payload(body): Payload<UpdateUserRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let usecase = UpdateUserUseCase {
        repo: state.user_repo(),
    };
    let user = usecase
        .execute(requester.user(), &username, body.into())
        .await?;
    Ok(Json(user.into()))
}

pub async fn delete_user(
    requester: Requester,
    State(state): State<AppState>,
    PathParams(username): PathParams<String>,
) -> Result<StatusCode, ApiError> {
    let usecase = DeleteUserUseCase {
        repo: state.user_repo(),
    };
    usecase.execute(requester.user(), &username).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── GET/PATCH /users/me ──────────────────────────────────────────────────────

pub async fn get_me(requester: Requester) -> Result<Json<UserResponse>, ApiError> {
    let me = get_me_usecase(requester.user())?;
    Ok(Json(me.into()))
}

pub async fn update_me(
    requester: Requester,
    State(state): State<AppState>,
    Payload(body): Payload<UpdateUserRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let usecase = UpdateMeUseCase {
        repo: state.user_repo(),
    };
    let me = usecase.execute(requester.user(), body.into()).await?;
    Ok(Json(me.into()))
}
