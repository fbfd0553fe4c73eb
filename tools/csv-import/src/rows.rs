//! Typed rows for each CSV file. Columns are positional; the header row is
//! skipped by the reader.

use chrono::{DateTime, Utc};
use csv::StringRecord;
use sea_orm::{ActiveModelBehavior, ActiveModelTrait, ActiveValue::Set, EntityTrait};

use yamdb_api_schema::{categories, comments, genre_titles, genres, reviews, titles, users};
use yamdb_domain::catalog::{validate_name, validate_slug};
use yamdb_domain::review::Score;
use yamdb_domain::user::{UserRole, validate_email, validate_username};

use crate::plan::Table;

/// A foreign key carried by a row: `(column, referenced table, id)`.
pub type Reference = (&'static str, Table, i32);

pub trait ImportRow: Sized {
    const TABLE: Table;
    type Entity: EntityTrait;
    type ActiveModel: ActiveModelTrait<Entity = Self::Entity> + ActiveModelBehavior + Send;

    fn parse(record: &StringRecord, joined_at: DateTime<Utc>) -> Result<Self, String>;
    fn id(&self) -> i32;
    fn references(&self) -> Vec<Reference>;
    fn into_active_model(self) -> Self::ActiveModel;
}

/// Positional access with column names in error messages.
struct Fields<'a>(&'a StringRecord);

impl Fields<'_> {
    fn text(&self, index: usize, column: &str) -> Result<String, String> {
        self.0
            .get(index)
            .map(str::to_owned)
            .ok_or_else(|| format!("missing column `{column}`"))
    }

    fn int(&self, index: usize, column: &str) -> Result<i32, String> {
        let raw = self.text(index, column)?;
        raw.trim()
            .parse()
            .map_err(|_| format!("`{column}` is not an integer: {raw:?}"))
    }

    fn opt_int(&self, index: usize, column: &str) -> Result<Option<i32>, String> {
        match self.text(index, column)?.trim() {
            "" => Ok(None),
            _ => self.int(index, column).map(Some),
        }
    }

    fn timestamp(&self, index: usize, column: &str) -> Result<DateTime<Utc>, String> {
        let raw = self.text(index, column)?;
        DateTime::parse_from_rfc3339(raw.trim())
            .map(|t| t.with_timezone(&Utc))
            .map_err(|e| format!("`{column}` is not an RFC 3339 timestamp: {e}"))
    }
}

// ── users.csv ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRow {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub role: UserRole,
    pub bio: String,
    pub first_name: String,
    pub last_name: String,
    pub joined_at: DateTime<Utc>,
}

impl ImportRow for UserRow {
    const TABLE: Table = Table::Users;
    type Entity = users::Entity;
    type ActiveModel = users::ActiveModel;

    fn parse(record: &StringRecord, joined_at: DateTime<Utc>) -> Result<Self, String> {
        let f = Fields(record);
        let username = f.text(1, "username")?;
        validate_username(&username).map_err(|e| format!("`username` {username:?}: {e}"))?;
        let email = f.text(2, "email")?;
        if !validate_email(&email) {
            return Err(format!("`email` is not a valid address: {email:?}"));
        }
        let role_raw = f.text(3, "role")?;
        let role = match role_raw.trim() {
            "" => UserRole::User,
            other => other.parse().map_err(|e| format!("`role`: {e}"))?,
        };
        Ok(Self {
            id: f.int(0, "id")?,
            username,
            email,
            role,
            bio: f.text(4, "bio")?,
            first_name: f.text(5, "first_name")?,
            last_name: f.text(6, "last_name")?,
            joined_at,
        })
    }

    fn id(&self) -> i32 {
        self.id
    }

    fn references(&self) -> Vec<Reference> {
        Vec::new()
    }

    fn into_active_model(self) -> users::ActiveModel {
        users::ActiveModel {
            id: Set(self.id),
            username: Set(self.username),
            email: Set(self.email),
            first_name: Set(self.first_name),
            last_name: Set(self.last_name),
            bio: Set(self.bio),
            role: Set(self.role.as_str().to_owned()),
            last_login: Set(None),
            date_joined: Set(self.joined_at),
        }
    }
}

// ── category.csv / genre.csv ─────────────────────────────────────────────────

fn parse_slug_name(record: &StringRecord) -> Result<(i32, String, String), String> {
    let f = Fields(record);
    let name = f.text(1, "name")?;
    validate_name(&name).map_err(|e| format!("`name`: {e}"))?;
    let slug = f.text(2, "slug")?;
    validate_slug(&slug).map_err(|e| format!("`slug` {slug:?}: {e}"))?;
    Ok((f.int(0, "id")?, name, slug))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRow {
    pub id: i32,
    pub name: String,
    pub slug: String,
}

impl ImportRow for CategoryRow {
    const TABLE: Table = Table::Categories;
    type Entity = categories::Entity;
    type ActiveModel = categories::ActiveModel;

    fn parse(record: &StringRecord, _: DateTime<Utc>) -> Result<Self, String> {
        let (id, name, slug) = parse_slug_name(record)?;
        Ok(Self { id, name, slug })
    }

    fn id(&self) -> i32 {
        self.id
    }

    fn references(&self) -> Vec<Reference> {
        Vec::new()
    }

    fn into_active_model(self) -> categories::ActiveModel {
        categories::ActiveModel {
            id: Set(self.id),
            name: Set(self.name),
            slug: Set(self.slug),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreRow {
    pub id: i32,
    pub name: String,
    pub slug: String,
}

impl ImportRow for GenreRow {
    const TABLE: Table = Table::Genres;
    type Entity = genres::Entity;
    type ActiveModel = genres::ActiveModel;

    fn parse(record: &StringRecord, _: DateTime<Utc>) -> Result<Self, String> {
        let (id, name, slug) = parse_slug_name(record)?;
        Ok(Self { id, name, slug })
    }

    fn id(&self) -> i32 {
        self.id
    }

    fn references(&self) -> Vec<Reference> {
        Vec::new()
    }

    fn into_active_model(self) -> genres::ActiveModel {
        genres::ActiveModel {
            id: Set(self.id),
            name: Set(self.name),
            slug: Set(self.slug),
        }
    }
}

// ── titles.csv ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleRow {
    pub id: i32,
    pub name: String,
    pub year: i32,
    pub category_id: Option<i32>,
}

impl ImportRow for TitleRow {
    const TABLE: Table = Table::Titles;
    type Entity = titles::Entity;
    type ActiveModel = titles::ActiveModel;

    fn parse(record: &StringRecord, _: DateTime<Utc>) -> Result<Self, String> {
        let f = Fields(record);
        let name = f.text(1, "name")?;
        validate_name(&name).map_err(|e| format!("`name`: {e}"))?;
        Ok(Self {
            id: f.int(0, "id")?,
            name,
            year: f.int(2, "year")?,
            category_id: f.opt_int(3, "category")?,
        })
    }

    fn id(&self) -> i32 {
        self.id
    }

    fn references(&self) -> Vec<Reference> {
        self.category_id
            .map(|id| ("category", Table::Categories, id))
            .into_iter()
            .collect()
    }

    fn into_active_model(self) -> titles::ActiveModel {
        titles::ActiveModel {
            id: Set(self.id),
            name: Set(self.name),
            year: Set(self.year),
            description: Set(None),
            category_id: Set(self.category_id),
        }
    }
}

// ── review.csv ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewRow {
    pub id: i32,
    pub title_id: i32,
    pub text: String,
    pub author_id: i32,
    pub score: Score,
    pub pub_date: DateTime<Utc>,
}

impl ImportRow for ReviewRow {
    const TABLE: Table = Table::Reviews;
    type Entity = reviews::Entity;
    type ActiveModel = reviews::ActiveModel;

    fn parse(record: &StringRecord, _: DateTime<Utc>) -> Result<Self, String> {
        let f = Fields(record);
        let raw_score = f.int(4, "score")?;
        let score = Score::new(i64::from(raw_score)).map_err(|e| format!("`score`: {e}"))?;
        Ok(Self {
            id: f.int(0, "id")?,
            title_id: f.int(1, "title_id")?,
            text: f.text(2, "text")?,
            author_id: f.int(3, "author")?,
            score,
            pub_date: f.timestamp(5, "pub_date")?,
        })
    }

    fn id(&self) -> i32 {
        self.id
    }

    fn references(&self) -> Vec<Reference> {
        vec![
            ("title_id", Table::Titles, self.title_id),
            ("author", Table::Users, self.author_id),
        ]
    }

    fn into_active_model(self) -> reviews::ActiveModel {
        reviews::ActiveModel {
            id: Set(self.id),
            title_id: Set(self.title_id),
            author_id: Set(self.author_id),
            text: Set(self.text),
            score: Set(i16::from(self.score.get())),
            pub_date: Set(self.pub_date),
        }
    }
}

// ── comments.csv ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentRow {
    pub id: i32,
    pub review_id: i32,
    pub text: String,
    pub author_id: i32,
    pub pub_date: DateTime<Utc>,
}

impl ImportRow for CommentRow {
    const TABLE: Table = Table::Comments;
    type Entity = comments::Entity;
    type ActiveModel = comments::ActiveModel;

    fn parse(record: &StringRecord, _: DateTime<Utc>) -> Result<Self, String> {
        let f = Fields(record);
        Ok(Self {
            id: f.int(0, "id")?,
            review_id: f.int(1, "review_id")?,
            text: f.text(2, "text")?,
            author_id: f.int(3, "author")?,
            pub_date: f.timestamp(4, "pub_date")?,
        })
    }

    fn id(&self) -> i32 {
        self.id
    }

    fn references(&self) -> Vec<Reference> {
        vec![
            ("review_id", Table::Reviews, self.review_id),
            ("author", Table::Users, self.author_id),
        ]
    }

    fn into_active_model(self) -> comments::ActiveModel {
        comments::ActiveModel {
            id: Set(self.id),
            review_id: Set(self.review_id),
            author_id: Set(self.author_id),
            text: Set(self.text),
            pub_date: Set(self.pub_date),
        }
    }
}

// ── genre_title.csv ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreTitleRow {
    pub id: i32,
    pub title_id: i32,
    pub genre_id: i32,
}

impl ImportRow for GenreTitleRow {
    const TABLE: Table = Table::GenreTitles;
    type Entity = genre_titles::Entity;
    type ActiveModel = genre_titles::ActiveModel;

    fn parse(record: &StringRecord, _: DateTime<Utc>) -> Result<Self, String> {
        let f = Fields(record);
        Ok(Self {
            id: f.int(0, "id")?,
            title_id: f.int(1, "title_id")?,
            genre_id: f.int(2, "genre_id")?,
        })
    }

    fn id(&self) -> i32 {
        self.id
    }

    fn references(&self) -> Vec<Reference> {
        vec![
            ("title_id", Table::Titles, self.title_id),
            ("genre_id", Table::Genres, self.genre_id),
        ]
    }

    fn into_active_model(self) -> genre_titles::ActiveModel {
        genre_titles::ActiveModel {
            id: Set(self.id),
            title_id: Set(self.title_id),
            genre_id: Set(self.genre_id),
        }
    }
}
