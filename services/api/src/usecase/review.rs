use chrono::Utc;

use yamdb_domain::id::{ReviewId, TitleId};
use yamdb_domain::pagination::{Page, PageRequest};
use yamdb_domain::policy::{Action, Resource};
use yamdb_domain::review::Score;

use crate::domain::repository::{ReviewRepository, TitleRepository};
use crate::domain::types::{NewReview, Review, ReviewPatch, User};
use crate::error::ApiError;
use crate::usecase::{ensure_allowed, require_actor};

fn parse_score(raw: i64) -> Result<Score, ApiError> {
    Score::new(raw).map_err(|e| ApiError::validation("score", e.to_string()))
}

fn check_text(text: &str) -> Result<(), ApiError> {
    if text.trim().is_empty() {
        return Err(ApiError::validation("text", "must not be blank"));
    }
    Ok(())
}

/// Look up a review under its title, distinguishing a missing title from a
/// missing review.
pub(crate) async fn find_scoped<T: TitleRepository, R: ReviewRepository>(
    titles: &T,
    reviews: &R,
    title_id: TitleId,
    review_id: ReviewId,
) -> Result<Review, ApiError> {
    if !titles.exists(title_id).await? {
        return Err(ApiError::TitleNotFound);
    }
    reviews
        .find(title_id, review_id)
        .await?
        .ok_or(ApiError::ReviewNotFound)
}

// ── ListReviews / GetReview ──────────────────────────────────────────────────

pub struct ListReviewsUseCase<T: TitleRepository, R: ReviewRepository> {
    pub titles: T,
    pub reviews: R,
}

impl<T: TitleRepository, R: ReviewRepository> ListReviewsUseCase<T, R> {
    pub async fn execute(
        &self,
        title_id: TitleId,
        page: PageRequest,
    ) -> Result<Page<Review>, ApiError> {
        if !self.titles.exists(title_id).await? {
            return Err(ApiError::TitleNotFound);
        }
        self.reviews.list(title_id, page.clamped()).await
    }
}

pub struct GetReviewUseCase<T: TitleRepository, R: ReviewRepository> {
    pub titles: T,
    pub reviews: R,
}

impl<T: TitleRepository, R: ReviewRepository> GetReviewUseCase<T, R> {
    pub async fn execute(&self, title_id: TitleId, review_id: ReviewId) -> Result<Review, ApiError> {
        find_scoped(&self.titles, &self.reviews, title_id, review_id).await
    }
}

// ── CreateReview ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct CreateReviewInput {
    pub text: String,
    pub score: i64,
}

pub struct CreateReviewUseCase<T: TitleRepository, R: ReviewRepository> {
    pub titles: T,
    pub reviews: R,
}

impl<T: TitleRepository, R: ReviewRepository> CreateReviewUseCase<T, R> {
    pub async fn execute(
        &self,
        actor: Option<&User>,
        title_id: TitleId,
        input: CreateReviewInput,
    ) -> Result<Review, ApiError> {
        ensure_allowed(actor, Resource::Ledger, Action::Create)?;
        let author = require_actor(actor)?;
        if !self.titles.exists(title_id).await? {
            return Err(ApiError::TitleNotFound);
        }
        check_text(&input.text)?;
        let score = parse_score(input.score)?;

        if self
            .reviews
            .find_by_author(title_id, author.id)
            .await?
            .is_some()
        {
            return Err(ApiError::duplicate_review());
        }

        let review = self
            .reviews
            .create(&NewReview {
                title_id,
                author_id: author.id,
                text: input.text,
                score,
                pub_date: Utc::now(),
            })
            .await?;
        tracing::info!(review_id = %review.id, title_id = %title_id, "review created");
        Ok(review)
    }
}

// ── UpdateReview ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct UpdateReviewInput {
    pub text: Option<String>,
    pub score: Option<i64>,
}

pub struct UpdateReviewUseCase<T: TitleRepository, R: ReviewRepository> {
    pub titles: T,
    pub reviews: R,
}

impl<T: TitleRepository, R: ReviewRepository> UpdateReviewUseCase<T, R> {
    pub async fn execute(
        &self,
        actor: Option<&User>,
        title_id: TitleId,
        review_id: ReviewId,
        input: UpdateReviewInput,
    ) -> Result<Review, ApiError> {
        let actor = require_actor(actor)?;
        let review = find_scoped(&self.titles, &self.reviews, title_id, review_id).await?;
        ensure_allowed(
            Some(actor),
            Resource::Ledger,
            Action::Modify {
                is_author: review.author_id == actor.id,
            },
        )?;

        if let Some(text) = &input.text {
            check_text(text)?;
        }
        let score = input.score.map(parse_score).transpose()?;
        self.reviews
            .update(
                review.id,
                &ReviewPatch {
                    text: input.text,
                    score,
                },
            )
            .await
    }
}

// ── DeleteReview ─────────────────────────────────────────────────────────────

pub struct DeleteReviewUseCase<T: TitleRepository, R: ReviewRepository> {
    pub titles: T,
    pub reviews: R,
}

impl<T: TitleRepository, R: ReviewRepository> DeleteReviewUseCase<T, R> {
    /// Comments on the review are removed with it.
    pub async fn execute(
        &self,
        actor: Option<&User>,
        title_id: TitleId,
        review_id: ReviewId,
    ) -> Result<(), ApiError> {
        let actor = require_actor(actor)?;
        let review = find_scoped(&self.titles, &self.reviews, title_id, review_id).await?;
        ensure_allowed(
            Some(actor),
            Resource::Ledger,
            Action::Modify {
                is_author: review.author_id == actor.id,
            },
        )?;
        if !self.reviews.delete(review.id).await? {
            return Err(ApiError::ReviewNotFound);
        }
        Ok(())
    }
}
