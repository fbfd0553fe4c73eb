//! Categories and genres expose identical routes; each handler is generic
//! over the repository and instantiated once per taxonomy in the router.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use yamdb_domain::catalog::SlugName;
use yamdb_domain::pagination::{Page, PageRequest};

use crate::domain::repository::TaxonomyRepository;
use crate::domain::types::TaxonomyEntry;
use crate::error::ApiError;
use crate::extract::{Params, PathParams, Payload, Requester};
use crate::infra::db::{DbCategoryRepository, DbGenreRepository};
use crate::state::AppState;
use crate::usecase::taxonomy::{
    CreateTaxonomyUseCase, DeleteTaxonomyUseCase, GetTaxonomyUseCase, ListTaxonomyUseCase,
    TaxonomyPatch, UpdateTaxonomyUseCase,
};

/// Picks the repository for one taxonomy out of the shared state.
pub trait TaxonomyRoute: TaxonomyRepository + Sized {
    fn from_state(state: &AppState) -> Self;
}

impl TaxonomyRoute for DbCategoryRepository {
    fn from_state(state: &AppState) -> Self {
        state.category_repo()
    }
}

impl TaxonomyRoute for DbGenreRepository {
    fn from_state(state: &AppState) -> Self {
        state.genre_repo()
    }
}

#[derive(Serialize, Deserialize)]
pub struct SlugNameBody {
    pub name: String,
    pub slug: String,
}

impl From<TaxonomyEntry> for SlugNameBody {
    fn from(entry: TaxonomyEntry) -> Self {
        Self {
            name: entry.label.name,
            slug: entry.label.slug,
        }
    }
}

#[derive(Deserialize, Default)]
pub struct TaxonomySearchQuery {
    pub search: Option<String>,
}

#[derive(Deserialize, Default)]
pub struct PatchSlugNameRequest {
    pub name: Option<String>,
    pub slug: Option<String>,
}

pub async fn list<R: TaxonomyRoute>(
    State(state): State<AppState>,
    Params(page): Params<PageRequest>,
    Params(query): Params<TaxonomySearchQuery>,
) -> Result<Json<Page<SlugNameBody>>, ApiError> {
    let usecase = ListTaxonomyUseCase {
        repo: R::from_state(&state),
    };
    let entries = usecase.execute(query.search.as_deref(), page).await?;
    Ok(Json(entries.map(SlugNameBody::from)))
}

pub async fn get<R: TaxonomyRoute>(
    State(state): State<AppState>,
    PathParams(slug): PathParams<String>,
) -> Result<Json<SlugNameBody>, ApiError> {
    let usecase = GetTaxonomyUseCase {
        repo: R::from_state(&state),
    };
    Ok(Json(usecase.execute(&slug).await?.into()))
}

pub async fn create<R: TaxonomyRoute>(
    requester: Requester,
    State(state): State<AppState>,
    Payload(body): Payload<SlugNameBody>,
) -> Result<(StatusCode, Json<SlugNameBody>), ApiError> {
    let usecase = CreateTaxonomyUseCase {
        repo: R::from_state(&state),
    };
    let entry = usecase
        .execute(
            requester.user(),
            SlugName {
                name: body.name,
                slug: body.slug,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(entry.into())))
}

pub async fn update<R: TaxonomyRoute>(
    requester: Requester,
    State(state): State<AppState>,
    PathParams(slug): PathParams<String>,
    Payload(body): Payload<PatchSlugNameRequest>,
) -> Result<Json<SlugNameBody>, ApiError> {
    let usecase = UpdateTaxonomyUseCase {
        repo: R::from_state(&state),
    };
    let entry = usecase
        .execute(
            requester.user(),
            &slug,
            TaxonomyPatch {
                name: body.name,
                slug: body.slug,
            },
        )
        .await?;
    Ok(Json(entry.into()))
}

pub async fn delete<R: TaxonomyRoute>(
    requester: Requester,
    State(state): State<AppState>,
    PathParams(slug): PathParams<String>,
) -> Result<StatusCode, ApiError> {
    let usecase = DeleteTaxonomyUseCase {
        repo: R::from_state(&state),
    };
    usecase.execute(requester.user(), &slug).await?;
    Ok(StatusCode::NO_CONTENT)
}
