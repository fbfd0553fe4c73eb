use chrono::{DateTime, Utc};
use uuid::Uuid;

use yamdb_domain::catalog::SlugName;
use yamdb_domain::id::{CommentId, ReviewId, TitleId, UserId};
use yamdb_domain::review::Score;
use yamdb_domain::user::UserRole;

// ── Users ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub bio: String,
    pub role: UserRole,
    pub last_login: Option<DateTime<Utc>>,
    pub date_joined: DateTime<Utc>,
}

impl User {
    /// Mutable account state a confirmation code is bound to.
    ///
    /// Any change to these fields, including a successful login, invalidates
    /// outstanding codes.
    pub fn confirmation_fingerprint(&self) -> String {
        let last_login = self
            .last_login
            .map(|t| t.timestamp_micros().to_string())
            .unwrap_or_default();
        let id = self.id.to_string();
        [
            id.as_str(),
            self.username.as_str(),
            self.email.as_str(),
            self.role.as_str(),
            self.first_name.as_str(),
            self.last_name.as_str(),
            self.bio.as_str(),
            last_login.as_str(),
        ]
        .join("\u{1f}")
    }
}

#[derive(Debug, Clone, Default)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub bio: String,
    pub role: UserRole,
}

/// Partial update; `None` leaves the field unchanged.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub username: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub role: Option<UserRole>,
}

// ── Catalog ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaxonomyKind {
    Category,
    Genre,
}

/// A category or genre row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxonomyEntry {
    pub id: i32,
    pub label: SlugName,
}

/// Title read model: relations expanded, rating computed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Title {
    pub id: TitleId,
    pub name: String,
    pub year: i32,
    pub description: Option<String>,
    pub category: Option<SlugName>,
    pub genres: Vec<SlugName>,
    pub rating: Option<u32>,
}

/// Title write model with relations already resolved to row ids.
#[derive(Debug, Clone)]
pub struct NewTitle {
    pub name: String,
    pub year: i32,
    pub description: Option<String>,
    pub category_id: Option<i32>,
    pub genre_ids: Vec<i32>,
}

/// `Some(None)` on an optional column clears it.
#[derive(Debug, Clone, Default)]
pub struct TitlePatch {
    pub name: Option<String>,
    pub year: Option<i32>,
    pub description: Option<Option<String>>,
    pub category_id: Option<Option<i32>>,
    pub genre_ids: Option<Vec<i32>>,
}

#[derive(Debug, Clone, Default)]
pub struct TitleFilter {
    pub category: Option<String>,
    pub genre: Option<String>,
    pub name: Option<String>,
    pub year: Option<i32>,
}

// ── Ledger ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub id: ReviewId,
    pub title_id: TitleId,
    pub author_id: UserId,
    /// Author's username.
    pub author: String,
    pub text: String,
    pub score: Score,
    pub pub_date: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewReview {
    pub title_id: TitleId,
    pub author_id: UserId,
    pub text: String,
    pub score: Score,
    pub pub_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct ReviewPatch {
    pub text: Option<String>,
    pub score: Option<Score>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: CommentId,
    pub review_id: ReviewId,
    pub author_id: UserId,
    pub author: String,
    pub text: String,
    pub pub_date: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewComment {
    pub review_id: ReviewId,
    pub author_id: UserId,
    pub text: String,
    pub pub_date: DateTime<Utc>,
}

// ── Outbox ───────────────────────────────────────────────────────────────────

/// Outbound notification queued for the mail relay.
#[derive(Debug, Clone)]
pub struct OutboxEvent {
    pub id: Uuid,
    pub kind: String,
    pub payload: serde_json::Value,
    pub idempotency_key: String,
}
