use chrono::{Datelike, Utc};

use yamdb_domain::catalog::{validate_name, validate_year};
use yamdb_domain::id::TitleId;
use yamdb_domain::pagination::{Page, PageRequest};
use yamdb_domain::policy::{Action, Resource};

use crate::domain::repository::{TaxonomyRepository, TitleRepository};
use crate::domain::types::{NewTitle, Title, TitleFilter, TitlePatch, User};
use crate::error::ApiError;
use crate::usecase::ensure_allowed;

fn current_year() -> i32 {
    Utc::now().year()
}

fn check_name(name: &str) -> Result<(), ApiError> {
    validate_name(name).map_err(|e| ApiError::validation("name", e.to_string()))
}

fn check_year(year: i32) -> Result<(), ApiError> {
    validate_year(year, current_year()).map_err(|e| ApiError::validation("year", e.to_string()))
}

async fn resolve_category<C: TaxonomyRepository>(
    categories: &C,
    slug: &str,
) -> Result<i32, ApiError> {
    categories
        .find_by_slug(slug)
        .await?
        .map(|c| c.id)
        .ok_or_else(|| ApiError::validation("category", format!("unknown category `{slug}`")))
}

/// Resolve genre slugs to ids, dropping duplicates. The set must be non-empty.
async fn resolve_genres<G: TaxonomyRepository>(
    genres: &G,
    slugs: &[String],
) -> Result<Vec<i32>, ApiError> {
    if slugs.is_empty() {
        return Err(ApiError::validation("genre", "at least one genre is required"));
    }
    let mut ids = Vec::with_capacity(slugs.len());
    for slug in slugs {
        let genre = genres
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| ApiError::validation("genre", format!("unknown genre `{slug}`")))?;
        if !ids.contains(&genre.id) {
            ids.push(genre.id);
        }
    }
    Ok(ids)
}

// ── ListTitles / GetTitle ────────────────────────────────────────────────────

pub struct ListTitlesUseCase<T: TitleRepository> {
    pub titles: T,
}

impl<T: TitleRepository> ListTitlesUseCase<T> {
    pub async fn execute(
        &self,
        filter: TitleFilter,
        page: PageRequest,
    ) -> Result<Page<Title>, ApiError> {
        self.titles.list(&filter, page.clamped()).await
    }
}

pub struct GetTitleUseCase<T: TitleRepository> {
    pub titles: T,
}

impl<T: TitleRepository> GetTitleUseCase<T> {
    pub async fn execute(&self, id: TitleId) -> Result<Title, ApiError> {
        self.titles
            .find_by_id(id)
            .await?
            .ok_or(ApiError::TitleNotFound)
    }
}

// ── CreateTitle ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct CreateTitleInput {
    pub name: String,
    pub year: i32,
    pub description: Option<String>,
    pub category: Option<String>,
    pub genre: Vec<String>,
}

pub struct CreateTitleUseCase<T: TitleRepository, C: TaxonomyRepository, G: TaxonomyRepository> {
    pub titles: T,
    pub categories: C,
    pub genres: G,
}

impl<T: TitleRepository, C: TaxonomyRepository, G: TaxonomyRepository> CreateTitleUseCase<T, C, G> {
    pub async fn execute(
        &self,
        actor: Option<&User>,
        input: CreateTitleInput,
    ) -> Result<Title, ApiError> {
        ensure_allowed(actor, Resource::Catalog, Action::Create)?;
        check_name(&input.name)?;
        check_year(input.year)?;

        let category_id = match input.category.as_deref() {
            Some(slug) => Some(resolve_category(&self.categories, slug).await?),
            None => None,
        };
        let genre_ids = resolve_genres(&self.genres, &input.genre).await?;

        self.titles
            .create(&NewTitle {
                name: input.name,
                year: input.year,
                description: input.description,
                category_id,
                genre_ids,
            })
            .await
    }
}

// ── UpdateTitle ──────────────────────────────────────────────────────────────

/// `category: Some(None)` detaches the category; `genre: Some(_)` replaces
/// the whole genre set.
#[derive(Debug, Clone, Default)]
pub struct UpdateTitleInput {
    pub name: Option<String>,
    pub year: Option<i32>,
    pub description: Option<Option<String>>,
    pub category: Option<Option<String>>,
    pub genre: Option<Vec<String>>,
}

pub struct UpdateTitleUseCase<T: TitleRepository, C: TaxonomyRepository, G: TaxonomyRepository> {
    pub titles: T,
    pub categories: C,
    pub genres: G,
}

impl<T: TitleRepository, C: TaxonomyRepository, G: TaxonomyRepository> UpdateTitleUseCase<T, C, G> {
    pub async fn execute(
        &self,
        actor: Option<&User>,
        id: TitleId,
        input: UpdateTitleInput,
    ) -> Result<Title, ApiError> {
        ensure_allowed(actor, Resource::Catalog, Action::Modify { is_author: false })?;
        if !self.titles.exists(id).await? {
            return Err(ApiError::TitleNotFound);
        }
        if let Some(name) = &input.name {
            check_name(name)?;
        }
        if let Some(year) = input.year {
            check_year(year)?;
        }

        let category_id = match input.category {
            Some(Some(slug)) => Some(Some(resolve_category(&self.categories, &slug).await?)),
            Some(None) => Some(None),
            None => None,
        };
        let genre_ids = match input.genre {
            Some(slugs) => Some(resolve_genres(&self.genres, &slugs).await?),
            None => None,
        };

        self.titles
            .update(
                id,
                &TitlePatch {
                    name: input.name,
                    year: input.year,
                    description: input.description,
                    category_id,
                    genre_ids,
                },
            )
            .await
    }
}

// ── DeleteTitle ──────────────────────────────────────────────────────────────

pub struct DeleteTitleUseCase<T: TitleRepository> {
    pub titles: T,
}

impl<T: TitleRepository> DeleteTitleUseCase<T> {
    pub async fn execute(&self, actor: Option<&User>, id: TitleId) -> Result<(), ApiError> {
        ensure_allowed(actor, Resource::Catalog, Action::Modify { is_author: false })?;
        if !self.titles.delete(id).await? {
            return Err(ApiError::TitleNotFound);
        }
        tracing::info!(title_id = %id, "title deleted");
        Ok(())
    }
}
