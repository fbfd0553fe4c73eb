//! Categories and genres share one set of use cases, parameterised by the
//! repository's [`TaxonomyKind`].

use yamdb_domain::catalog::SlugName;
use yamdb_domain::pagination::{Page, PageRequest};
use yamdb_domain::policy::{Action, Resource};

use crate::domain::repository::TaxonomyRepository;
use crate::domain::types::{TaxonomyEntry, TaxonomyKind, User};
use crate::error::ApiError;
use crate::usecase::ensure_allowed;

pub fn not_found(kind: TaxonomyKind) -> ApiError {
    match kind {
        TaxonomyKind::Category => ApiError::CategoryNotFound,
        TaxonomyKind::Genre => ApiError::GenreNotFound,
    }
}

fn validate(label: &SlugName) -> Result<(), ApiError> {
    label
        .validate()
        .map_err(|(field, e)| ApiError::validation(field, e.to_string()))
}

async fn ensure_slug_free<R: TaxonomyRepository>(repo: &R, slug: &str) -> Result<(), ApiError> {
    if repo.find_by_slug(slug).await?.is_some() {
        return Err(ApiError::validation(
            "slug",
            format!("slug `{slug}` is already in use"),
        ));
    }
    Ok(())
}

pub struct ListTaxonomyUseCase<R: TaxonomyRepository> {
    pub repo: R,
}

impl<R: TaxonomyRepository> ListTaxonomyUseCase<R> {
    pub async fn execute(
        &self,
        search: Option<&str>,
        page: PageRequest,
    ) -> Result<Page<TaxonomyEntry>, ApiError> {
        let search = search.filter(|s| !s.is_empty());
        self.repo.list(search, page.clamped()).await
    }
}

pub struct GetTaxonomyUseCase<R: TaxonomyRepository> {
    pub repo: R,
}

impl<R: TaxonomyRepository> GetTaxonomyUseCase<R> {
    pub async fn execute(&self, slug: &str) -> Result<TaxonomyEntry, ApiError> {
        self.repo
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| not_found(R::KIND))
    }
}

pub struct CreateTaxonomyUseCase<R: TaxonomyRepository> {
    pub repo: R,
}

impl<R: TaxonomyRepository> CreateTaxonomyUseCase<R> {
    pub async fn execute(
        &self,
        actor: Option<&User>,
        label: SlugName,
    ) -> Result<TaxonomyEntry, ApiError> {
        ensure_allowed(actor, Resource::Catalog, Action::Create)?;
        validate(&label)?;
        ensure_slug_free(&self.repo, &label.slug).await?;
        self.repo.create(&label).await
    }
}

#[derive(Debug, Clone, Default)]
pub struct TaxonomyPatch {
    pub name: Option<String>,
    pub slug: Option<String>,
}

pub struct UpdateTaxonomyUseCase<R: TaxonomyRepository> {
    pub repo: R,
}

impl<R: TaxonomyRepository> UpdateTaxonomyUseCase<R> {
    pub async fn execute(
        &self,
        actor: Option<&User>,
        slug: &str,
        patch: TaxonomyPatch,
    ) -> Result<TaxonomyEntry, ApiError> {
        ensure_allowed(actor, Resource::Catalog, Action::Modify { is_author: false })?;
        let current = self
            .repo
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| not_found(R::KIND))?;

        let label = SlugName {
            name: patch.name.unwrap_or(current.label.name),
            slug: patch.slug.unwrap_or(current.label.slug),
        };
        validate(&label)?;
        if label.slug != slug {
            ensure_slug_free(&self.repo, &label.slug).await?;
        }
        self.repo.update(current.id, &label).await
    }
}

pub struct DeleteTaxonomyUseCase<R: TaxonomyRepository> {
    pub repo: R,
}

impl<R: TaxonomyRepository> DeleteTaxonomyUseCase<R> {
    pub async fn execute(&self, actor: Option<&User>, slug: &str) -> Result<(), ApiError> {
        ensure_allowed(actor, Resource::Catalog, Action::Modify { is_author: false })?;
        let current = self
            .repo
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| not_found(R::KIND))?;
        if !self.repo.delete(current.id).await? {
            return Err(not_found(R::KIND));
        }
        Ok(())
    }
}
