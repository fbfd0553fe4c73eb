use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use yamdb_domain::catalog::SlugName;
use yamdb_domain::id::TitleId;
use yamdb_domain::pagination::{Page, PageRequest};

use crate::domain::types::{Title, TitleFilter};
use crate::error::ApiError;
use crate::extract::{Params, PathParams, Payload, Requester};
use crate::handlers::double_option;
use crate::state::AppState;
use crate::usecase::title::{
    CreateTitleInput, CreateTitleUseCase, DeleteTitleUseCase, GetTitleUseCase, ListTitlesUseCase,
    UpdateTitleInput, UpdateTitleUseCase,
};

#[derive(Serialize)]
pub struct SlugNameResponse {
    pub name: String,
    pub slug: String,
}

impl From<SlugName> for SlugNameResponse {
    fn from(label: SlugName) -> Self {
        Self {
            name: label.name,
            slug: label.slug,
        }
    }
}

#[derive(Serialize)]
pub struct TitleResponse {
    pub id: TitleId,
    pub name: String,
    pub year: i32,
    pub rating: Option<u32>,
    pub description: Option<String>,
    pub genre: Vec<SlugNameResponse>,
    pub category: Option<SlugNameResponse>,
}

impl From<Title> for TitleResponse {
    fn from(title: Title) -> Self {
        Self {
            id: title.id,
            name: title.name,
            year: title.year,
            rating: title.rating,
            description: title.description,
            genre: title.genres.into_iter().map(Into::into).collect(),
            category: title.category.map(Into::into),
        }
    }
}

// ── GET /titles ──────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct TitleFilterQuery {
    pub category: Option<String>,
    pub genre: Option<String>,
    pub name: Option<String>,
    pub year: Option<i32>,
}

pub async fn list_titles(
    State(state): State<AppState>,
    Params(page): Params<PageRequest>,
    Params(query): Params<TitleFilterQuery>,
) -> Result<Json<Page<TitleResponse>>, ApiError> {
    let usecase = ListTitlesUseCase {
        titles: state.title_repo(),
    };
    let filter = TitleFilter {
        category: query.category.filter(|s| !s.is_empty()),
        genre: query.genre.filter(|s| !s.is_empty()),
        name: query.name.filter(|s| !s.is_empty()),
        year: query.year,
    };
    let titles = usecase.execute(filter, page).await?;
    Ok(Json(titles.map(TitleResponse::from)))
}

// ── POST /titles ─────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateTitleRequest {
    pub name: String,
    pub year: i32,
    pub description: Option<String>,
    pub category: Option<String>,
    #[serde(default)]
    pub genre: Vec<String>,
}

pub async fn create_title(
    requester: Requester,
    State(state): State<AppState>,
    Payload(body): Payload<CreateTitleRequest>,
) -> Result<(StatusCode, Json<TitleResponse>), ApiError> {
    let usecase = CreateTitleUseCase {
        titles: state.title_repo(),
        categories: state.category_repo(),
        genres: state.genre_repo(),
    };
    let title = usecase
        .execute(
            requester.user(),
            CreateTitleInput {
                name: body.name,
                year: body.year,
                description: body.description,
                category: body.category,
                genre: body.genre,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(title.into())))
}

// ── GET/PATCH/DELETE /titles/{title_id} ──────────────────────────────────────

pub async fn get_title(
    State(state): State<AppState>,
    PathParams(id): PathParams<TitleId>,
) -> Result<Json<TitleResponse>, ApiError> {
    let usecase = GetTitleUseCase {
        titles: state.title_repo(),
    };
    Ok(Json(usecase.execute(id).await?.into()))
}

#[derive(Deserialize, Default)]
pub struct UpdateTitleRequest {
    pub name: Option<String>,
    pub year: Option<i32>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub category: Option<Option<String>>,
    pub genre: Option<Vec<String>>,
}

pub async fn update_title(
    requester: Requester,
    State(state): State<AppState>,
    PathParams(id): PathParams<TitleId>,
    Payload(body): Payload<UpdateTitleRequest>,
) -> Result<Json<TitleResponse>, ApiError> {
    let usecase = UpdateTitleUseCase {
        titles: state.title_repo(),
        categories: state.category_repo(),
        genres: state.genre_repo(),
    };
    let title = usecase
        .execute(
            requester.user(),
            id,
            UpdateTitleInput {
                name: body.name,
                year: body.year,
                description: body.description,
                category: body.category,
                genre: body.genre,
            },
        )
        .await?;
    Ok(Json(title.into()))
}

pub async fn delete_title(
    requester: Requester,
    State(state): State<AppState>,
    PathParams(id): PathParams<TitleId>,
) -> Result<StatusCode, ApiError> {
    let usecase = DeleteTitleUseCase {
        titles: state.title_repo(),
    };
    usecase.execute(requester.user(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
