use chrono::Utc;

use yamdb_domain::id::{CommentId, ReviewId, TitleId};
use yamdb_domain::pagination::{Page, PageRequest};
use yamdb_domain::policy::{Action, Resource};

use crate::domain::repository::{CommentRepository, ReviewRepository, TitleRepository};
use crate::domain::types::{Comment, NewComment, User};
use crate::error::ApiError;
use crate::usecase::review::find_scoped;
use crate::usecase::{ensure_allowed, require_actor};

/// Path coordinates of a comment collection: `/titles/{title_id}/reviews/{review_id}/comments`.
#[derive(Debug, Clone, Copy)]
pub struct Thread {
    pub title_id: TitleId,
    pub review_id: ReviewId,
}

fn check_text(text: &str) -> Result<(), ApiError> {
    if text.trim().is_empty() {
        return Err(ApiError::validation("text", "must not be blank"));
    }
    Ok(())
}

async fn review_of<T: TitleRepository, R: ReviewRepository>(
    titles: &T,
    reviews: &R,
    thread: Thread,
) -> Result<ReviewId, ApiError> {
    let review = find_scoped(titles, reviews, thread.title_id, thread.review_id).await?;
    Ok(review.id)
}

/// Resolve a comment through its title and review, so each level reports its own 404.
async fn comment_of<T: TitleRepository, R: ReviewRepository, C: CommentRepository>(
    titles: &T,
    reviews: &R,
    comments: &C,
    thread: Thread,
    id: CommentId,
) -> Result<Comment, ApiError> {
    let review_id = review_of(titles, reviews, thread).await?;
    comments
        .find(review_id, id)
        .await?
        .ok_or(ApiError::CommentNotFound)
}

fn ensure_may_modify(actor: &User, comment: &Comment) -> Result<(), ApiError> {
    ensure_allowed(
        Some(actor),
        Resource::Ledger,
        Action::Modify {
            is_author: comment.author_id == actor.id,
        },
    )
}

// ── ListComments / GetComment ────────────────────────────────────────────────

pub struct ListCommentsUseCase<T: TitleRepository, R: ReviewRepository, C: CommentRepository> {
    pub titles: T,
    pub reviews: R,
    pub comments: C,
}

impl<T: TitleRepository, R: ReviewRepository, C: CommentRepository> ListCommentsUseCase<T, R, C> {
    pub async fn execute(&self, thread: Thread, page: PageRequest) -> Result<Page<Comment>, ApiError> {
        let review_id = review_of(&self.titles, &self.reviews, thread).await?;
        self.comments.list(review_id, page.clamped()).await
    }
}

pub struct GetCommentUseCase<T: TitleRepository, R: ReviewRepository, C: CommentRepository> {
    pub titles: T,
    pub reviews: R,
    pub comments: C,
}

impl<T: TitleRepository, R: ReviewRepository, C: CommentRepository> GetCommentUseCase<T, R, C> {
    pub async fn execute(&self, thread: Thread, id: CommentId) -> Result<Comment, ApiError> {
        comment_of(&self.titles, &self.reviews, &self.comments, thread, id).await
    }
}

// ── CreateComment ────────────────────────────────────────────────────────────

pub struct CreateCommentUseCase<T: TitleRepository, R: ReviewRepository, C: CommentRepository> {
    pub titles: T,
    pub reviews: R,
    pub comments: C,
}

impl<T: TitleRepository, R: ReviewRepository, C: CommentRepository> CreateCommentUseCase<T, R, C> {
    pub async fn execute(
        &self,
        actor: Option<&User>,
        thread: Thread,
        text: String,
    ) -> Result<Comment, ApiError> {
        ensure_allowed(actor, Resource::Ledger, Action::Create)?;
        let author = require_actor(actor)?;
        let review_id = review_of(&self.titles, &self.reviews, thread).await?;
        check_text(&text)?;
        let comment = self
            .comments
            .create(&NewComment {
                review_id,
                author_id: author.id,
                text,
                pub_date: Utc::now(),
            })
            .await?;
        tracing::info!(comment_id = %comment.id, review_id = %review_id, "comment created");
        Ok(comment)
    }
}

// ── UpdateComment ────────────────────────────────────────────────────────────

pub struct UpdateCommentUseCase<T: TitleRepository, R: ReviewRepository, C: CommentRepository> {
    pub titles: T,
    pub reviews: R,
    pub comments: C,
}

impl<T: TitleRepository, R: ReviewRepository, C: CommentRepository> UpdateCommentUseCase<T, R, C> {
    /// A missing `text` leaves the comment as it is.
    pub async fn execute(
        &self,
        actor: Option<&User>,
        thread: Thread,
        id: CommentId,
        text: Option<String>,
    ) -> Result<Comment, ApiError> {
        let actor = require_actor(actor)?;
        let comment = comment_of(&self.titles, &self.reviews, &self.comments, thread, id).await?;
        ensure_may_modify(actor, &comment)?;
        match text {
            None => Ok(comment),
            Some(text) => {
                check_text(&text)?;
                self.comments.update(comment.id, &text).await
            }
        }
    }
}

// ── DeleteComment ────────────────────────────────────────────────────────────

pub struct DeleteCommentUseCase<T: TitleRepository, R: ReviewRepository, C: CommentRepository> {
    pub titles: T,
    pub reviews: R,
    pub comments: C,
}

impl<T: TitleRepository, R: ReviewRepository, C: CommentRepository> DeleteCommentUseCase<T, R, C> {
    pub async fn execute(
        &self,
        actor: Option<&User>,
        thread: Thread,
        id: CommentId,
    ) -> Result<(), ApiError> {
        let actor = require_actor(actor)?;
        let comment = comment_of(&self.titles, &self.reviews, &self.comments, thread, id).await?;
        ensure_may_modify(actor, &comment)?;
        if !self.comments.delete(comment.id).await? {
            return Err(ApiError::CommentNotFound);
        }
        Ok(())
    }
}
