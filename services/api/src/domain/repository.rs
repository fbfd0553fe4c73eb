#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};

use yamdb_domain::catalog::SlugName;
use yamdb_domain::id::{CommentId, ReviewId, TitleId, UserId};
use yamdb_domain::pagination::{Page, PageRequest};

use crate::domain::types::{
    Comment, NewComment, NewReview, NewTitle, NewUser, Review, ReviewPatch, TaxonomyEntry,
    TaxonomyKind, Title, TitleFilter, TitlePatch, User, UserPatch,
};
use crate::error::ApiError;

/// Repository for user accounts.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, ApiError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, ApiError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError>;

    /// Ordered by id. `search` matches a username substring.
    async fn list(&self, search: Option<&str>, page: PageRequest)
    -> Result<Page<User>, ApiError>;

    async fn create(&self, user: &NewUser, joined_at: DateTime<Utc>) -> Result<User, ApiError>;
    async fn update(&self, id: UserId, patch: &UserPatch) -> Result<User, ApiError>;
    async fn touch_last_login(&self, id: UserId, at: DateTime<Utc>) -> Result<(), ApiError>;

    /// Returns `true` if a row was deleted.
    async fn delete(&self, id: UserId) -> Result<bool, ApiError>;
}

/// Out-of-band delivery of confirmation codes.
pub trait ConfirmationMailer: Send + Sync {
    async fn send_confirmation_code(&self, user: &User, code: &str) -> Result<(), ApiError>;
}

/// Repository for one slug-keyed taxonomy (categories or genres).
pub trait TaxonomyRepository: Send + Sync {
    const KIND: TaxonomyKind;

    /// Ordered by name. `search` is a name prefix.
    async fn list(
        &self,
        search: Option<&str>,
        page: PageRequest,
    ) -> Result<Page<TaxonomyEntry>, ApiError>;

    async fn find_by_slug(&self, slug: &str) -> Result<Option<TaxonomyEntry>, ApiError>;
    async fn create(&self, label: &SlugName) -> Result<TaxonomyEntry, ApiError>;
    async fn update(&self, id: i32, label: &SlugName) -> Result<TaxonomyEntry, ApiError>;
    async fn delete(&self, id: i32) -> Result<bool, ApiError>;
}

/// Repository for titles. Reads return the expanded read model.
pub trait TitleRepository: Send + Sync {
    /// Ordered newest id first.
    async fn list(&self, filter: &TitleFilter, page: PageRequest)
    -> Result<Page<Title>, ApiError>;

    async fn find_by_id(&self, id: TitleId) -> Result<Option<Title>, ApiError>;
    async fn exists(&self, id: TitleId) -> Result<bool, ApiError>;
    async fn create(&self, title: &NewTitle) -> Result<Title, ApiError>;
    async fn update(&self, id: TitleId, patch: &TitlePatch) -> Result<Title, ApiError>;
    async fn delete(&self, id: TitleId) -> Result<bool, ApiError>;
}

/// Repository for reviews. Lookups are always scoped to the parent title.
pub trait ReviewRepository: Send + Sync {
    /// Newest first.
    async fn list(&self, title_id: TitleId, page: PageRequest) -> Result<Page<Review>, ApiError>;

    async fn find(&self, title_id: TitleId, id: ReviewId) -> Result<Option<Review>, ApiError>;

    async fn find_by_author(
        &self,
        title_id: TitleId,
        author_id: UserId,
    ) -> Result<Option<Review>, ApiError>;

    /// Fails with the duplicate-review validation error if the author
    /// already reviewed the title, even when the pre-check raced.
    async fn create(&self, review: &NewReview) -> Result<Review, ApiError>;

    async fn update(&self, id: ReviewId, patch: &ReviewPatch) -> Result<Review, ApiError>;
    async fn delete(&self, id: ReviewId) -> Result<bool, ApiError>;
}

/// Repository for comments. Lookups are always scoped to the parent review.
pub trait CommentRepository: Send + Sync {
    /// Newest first.
    async fn list(&self, review_id: ReviewId, page: PageRequest)
    -> Result<Page<Comment>, ApiError>;

    async fn find(&self, review_id: ReviewId, id: CommentId)
    -> Result<Option<Comment>, ApiError>;

    async fn create(&self, comment: &NewComment) -> Result<Comment, ApiError>;
    async fn update(&self, id: CommentId, text: &str) -> Result<Comment, ApiError>;
    async fn delete(&self, id: CommentId) -> Result<bool, ApiError>;
}
