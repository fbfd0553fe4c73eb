use std::collections::HashMap;

use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ActiveValue::Set, ColumnTrait, ConnectionTrait,
    DatabaseConnection, DbErr, EntityTrait, IntoActiveModel as _, QueryFilter, QueryOrder,
    QuerySelect, TransactionTrait,
    sea_query::{Expr, Query},
};

use yamdb_api_schema::{categories, comments, genre_titles, genres, reviews, titles, users};
use yamdb_core::sea_ext::{FetchPage as _, is_unique_violation};
use yamdb_domain::catalog::SlugName;
use yamdb_domain::id::{CommentId, ReviewId, TitleId, UserId};
use yamdb_domain::pagination::{Page, PageRequest};
use yamdb_domain::review::{Score, rating};
use yamdb_domain::user::UserRole;

use crate::domain::repository::{
    CommentRepository, ReviewRepository, TaxonomyRepository, TitleRepository, UserRepository,
};
use crate::domain::types::{
    Comment, NewComment, NewReview, NewTitle, NewUser, Review, ReviewPatch, TaxonomyEntry,
    TaxonomyKind, Title, TitleFilter, TitlePatch, User, UserPatch,
};
use crate::error::ApiError;

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find user by id")?;
        model.map(user_from_model).transpose()
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.db)
            .await
            .context("find user by username")?;
        model.map(user_from_model).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        model.map(user_from_model).transpose()
    }

    async fn list(
        &self,
        search: Option<&str>,
        page: PageRequest,
    ) -> Result<Page<User>, ApiError> {
        let mut query = users::Entity::find().order_by_asc(users::Column::Id);
        if let Some(search) = search {
            query = query.filter(users::Column::Username.contains(search));
        }
        let page = query
            .fetch_page(&self.db, page)
            .await
            .context("list users")?;
        let results = page
            .results
            .into_iter()
            .map(user_from_model)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Page {
            count: page.count,
            results,
        })
    }

    async fn create(&self, user: &NewUser, joined_at: DateTime<Utc>) -> Result<User, ApiError> {
        let inserted = users::ActiveModel {
            id: NotSet,
            username: Set(user.username.clone()),
            email: Set(user.email.clone()),
            first_name: Set(user.first_name.clone()),
            last_name: Set(user.last_name.clone()),
            bio: Set(user.bio.clone()),
            role: Set(user.role.as_str().to_owned()),
            last_login: Set(None),
            date_joined: Set(joined_at),
        }
        .insert(&self.db)
        .await;
        match inserted {
            Ok(model) => user_from_model(model),
            Err(e) if is_unique_violation(&e) => Err(ApiError::validation(
                "username",
                "a user with that username or email already exists",
            )),
            Err(e) => Err(anyhow::Error::new(e).context("create user").into()),
        }
    }

    async fn update(&self, id: UserId, patch: &UserPatch) -> Result<User, ApiError> {
        let model = users::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("load user for update")?
            .ok_or(ApiError::UserNotFound)?;
        let mut am = model.into_active_model();
        if let Some(username) = &patch.username {
            am.username = Set(username.clone());
        }
        if let Some(email) = &patch.email {
            am.email = Set(email.clone());
        }
        if let Some(first_name) = &patch.first_name {
            am.first_name = Set(first_name.clone());
        }
        if let Some(last_name) = &patch.last_name {
            am.last_name = Set(last_name.clone());
        }
        if let Some(bio) = &patch.bio {
            am.bio = Set(bio.clone());
        }
        if let Some(role) = patch.role {
            am.role = Set(role.as_str().to_owned());
        }
        match am.update(&self.db).await {
            Ok(model) => user_from_model(model),
            Err(e) if is_unique_violation(&e) => Err(ApiError::validation(
                "username",
                "a user with that username or email already exists",
            )),
            Err(e) => Err(anyhow::Error::new(e).context("update user").into()),
        }
    }

    async fn touch_last_login(&self, id: UserId, at: DateTime<Utc>) -> Result<(), ApiError> {
        users::Entity::update_many()
            .col_expr(users::Column::LastLogin, Expr::value(Some(at)))
            .filter(users::Column::Id.eq(id.0))
            .exec(&self.db)
            .await
            .context("record last login")?;
        Ok(())
    }

    async fn delete(&self, id: UserId) -> Result<bool, ApiError> {
        let result = users::Entity::delete_by_id(id.0)
            .exec(&self.db)
            .await
            .context("delete user")?;
        Ok(result.rows_affected > 0)
    }
}

fn user_from_model(model: users::Model) -> Result<User, ApiError> {
    let role = model
        .role
        .parse::<UserRole>()
        .with_context(|| format!("user {} has corrupt role", model.id))?;
    Ok(User {
        id: UserId(model.id),
        username: model.username,
        email: model.email,
        first_name: model.first_name,
        last_name: model.last_name,
        bio: model.bio,
        role,
        last_login: model.last_login,
        date_joined: model.date_joined,
    })
}

// ── Taxonomy repositories ────────────────────────────────────────────────────

/// Categories and genres have identical tables; one impl per entity module.
macro_rules! db_taxonomy_repository {
    ($name:ident, $entity:ident, $kind:expr, $what:literal) => {
        #[derive(Clone)]
        pub struct $name {
            pub db: DatabaseConnection,
        }

        impl TaxonomyRepository for $name {
            const KIND: TaxonomyKind = $kind;

            async fn list(
                &self,
                search: Option<&str>,
                page: PageRequest,
            ) -> Result<Page<TaxonomyEntry>, ApiError> {
                let mut query = $entity::Entity::find()
                    .order_by_asc($entity::Column::Name)
                    .order_by_asc($entity::Column::Id);
                if let Some(prefix) = search {
                    query = query.filter($entity::Column::Name.starts_with(prefix));
                }
                let page = query
                    .fetch_page(&self.db, page)
                    .await
                    .context(concat!("list ", $what))?;
                Ok(page.map(|m| TaxonomyEntry {
                    id: m.id,
                    label: SlugName {
                        name: m.name,
                        slug: m.slug,
                    },
                }))
            }

            async fn find_by_slug(&self, slug: &str) -> Result<Option<TaxonomyEntry>, ApiError> {
                let model = $entity::Entity::find()
                    .filter($entity::Column::Slug.eq(slug))
                    .one(&self.db)
                    .await
                    .context(concat!("find ", $what, " by slug"))?;
                Ok(model.map(|m| TaxonomyEntry {
                    id: m.id,
                    label: SlugName {
                        name: m.name,
                        slug: m.slug,
                    },
                }))
            }

            async fn create(&self, label: &SlugName) -> Result<TaxonomyEntry, ApiError> {
                let inserted = $entity::ActiveModel {
                    id: NotSet,
                    name: Set(label.name.clone()),
                    slug: Set(label.slug.clone()),
                }
                .insert(&self.db)
                .await;
                match inserted {
                    Ok(m) => Ok(TaxonomyEntry {
                        id: m.id,
                        label: SlugName {
                            name: m.name,
                            slug: m.slug,
                        },
                    }),
                    Err(e) if is_unique_violation(&e) => Err(slug_taken(&label.slug)),
                    Err(e) => Err(anyhow::Error::new(e)
                        .context(concat!("create ", $what))
                        .into()),
                }
            }

            async fn update(&self, id: i32, label: &SlugName) -> Result<TaxonomyEntry, ApiError> {
                let updated = $entity::ActiveModel {
                    id: Set(id),
                    name: Set(label.name.clone()),
                    slug: Set(label.slug.clone()),
                }
                .update(&self.db)
                .await;
                match updated {
                    Ok(m) => Ok(TaxonomyEntry {
                        id: m.id,
                        label: SlugName {
                            name: m.name,
                            slug: m.slug,
                        },
                    }),
                    Err(e) if is_unique_violation(&e) => Err(slug_taken(&label.slug)),
                    Err(e) => Err(anyhow::Error::new(e)
                        .context(concat!("update ", $what))
                        .into()),
                }
            }

            async fn delete(&self, id: i32) -> Result<bool, ApiError> {
                let result = $entity::Entity::delete_by_id(id)
                    .exec(&self.db)
                    .await
                    .context(concat!("delete ", $what))?;
                Ok(result.rows_affected > 0)
            }
        }
    };
}

fn slug_taken(slug: &str) -> ApiError {
    ApiError::validation("slug", format!("slug `{slug}` is already in use"))
}

db_taxonomy_repository!(
    DbCategoryRepository,
    categories,
    TaxonomyKind::Category,
    "category"
);
db_taxonomy_repository!(DbGenreRepository, genres, TaxonomyKind::Genre, "genre");

// ── Title repository ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbTitleRepository {
    pub db: DatabaseConnection,
}

impl TitleRepository for DbTitleRepository {
    async fn list(&self, filter: &TitleFilter, page: PageRequest) -> Result<Page<Title>, ApiError> {
        let mut query = titles::Entity::find().order_by_desc(titles::Column::Id);

        if let Some(slug) = &filter.category {
            query = query.filter(
                titles::Column::CategoryId.in_subquery(
                    Query::select()
                        .column(categories::Column::Id)
                        .from(categories::Entity)
                        .and_where(categories::Column::Slug.eq(slug.as_str()))
                        .to_owned(),
                ),
            );
        }
        if let Some(slug) = &filter.genre {
            query = query.filter(
                titles::Column::Id.in_subquery(
                    Query::select()
                        .column((genre_titles::Entity, genre_titles::Column::TitleId))
                        .from(genre_titles::Entity)
                        .inner_join(
                            genres::Entity,
                            Expr::col((genres::Entity, genres::Column::Id))
                                .equals((genre_titles::Entity, genre_titles::Column::GenreId)),
                        )
                        .and_where(Expr::col((genres::Entity, genres::Column::Slug)).eq(slug.as_str()))
                        .to_owned(),
                ),
            );
        }
        if let Some(name) = &filter.name {
            query = query.filter(titles::Column::Name.contains(name.as_str()));
        }
        if let Some(year) = filter.year {
            query = query.filter(titles::Column::Year.eq(year));
        }

        let page = query
            .fetch_page(&self.db, page)
            .await
            .context("list titles")?;
        let results = hydrate_titles(&self.db, page.results)
            .await
            .context("load title relations")?;
        Ok(Page {
            count: page.count,
            results,
        })
    }

    async fn find_by_id(&self, id: TitleId) -> Result<Option<Title>, ApiError> {
        let Some(model) = titles::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find title by id")?
        else {
            return Ok(None);
        };
        let mut hydrated = hydrate_titles(&self.db, vec![model])
            .await
            .context("load title relations")?;
        Ok(hydrated.pop())
    }

    async fn exists(&self, id: TitleId) -> Result<bool, ApiError> {
        let found = titles::Entity::find_by_id(id.0)
            .select_only()
            .column(titles::Column::Id)
            .into_tuple::<i32>()
            .one(&self.db)
            .await
            .context("check title exists")?;
        Ok(found.is_some())
    }

    async fn create(&self, title: &NewTitle) -> Result<Title, ApiError> {
        let title = title.clone();
        let model = self
            .db
            .transaction::<_, titles::Model, DbErr>(|txn| {
                Box::pin(async move {
                    let model = titles::ActiveModel {
                        id: NotSet,
                        name: Set(title.name),
                        year: Set(title.year),
                        description: Set(title.description),
                        category_id: Set(title.category_id),
                    }
                    .insert(txn)
                    .await?;
                    link_genres(txn, model.id, &title.genre_ids).await?;
                    Ok(model)
                })
            })
            .await
            .context("create title")?;
        tracing::info!(title_id = model.id, "title created");
        self.hydrate_one(model).await
    }

    async fn update(&self, id: TitleId, patch: &TitlePatch) -> Result<Title, ApiError> {
        let patch = patch.clone();
        let model = self
            .db
            .transaction::<_, Option<titles::Model>, DbErr>(|txn| {
                Box::pin(async move {
                    let Some(model) = titles::Entity::find_by_id(id.0).one(txn).await? else {
                        return Ok(None);
                    };
                    let mut am = model.into_active_model();
                    if let Some(name) = patch.name {
                        am.name = Set(name);
                    }
                    if let Some(year) = patch.year {
                        am.year = Set(year);
                    }
                    if let Some(description) = patch.description {
                        am.description = Set(description);
                    }
                    if let Some(category_id) = patch.category_id {
                        am.category_id = Set(category_id);
                    }
                    let model = am.update(txn).await?;
                    if let Some(genre_ids) = patch.genre_ids {
                        genre_titles::Entity::delete_many()
                            .filter(genre_titles::Column::TitleId.eq(model.id))
                            .exec(txn)
                            .await?;
                        link_genres(txn, model.id, &genre_ids).await?;
                    }
                    Ok(Some(model))
                })
            })
            .await
            .context("update title")?
            .ok_or(ApiError::TitleNotFound)?;
        self.hydrate_one(model).await
    }

    async fn delete(&self, id: TitleId) -> Result<bool, ApiError> {
        let result = titles::Entity::delete_by_id(id.0)
            .exec(&self.db)
            .await
            .context("delete title")?;
        Ok(result.rows_affected > 0)
    }
}

impl DbTitleRepository {
    async fn hydrate_one(&self, model: titles::Model) -> Result<Title, ApiError> {
        let id = model.id;
        hydrate_titles(&self.db, vec![model])
            .await
            .context("load title relations")?
            .pop()
            .ok_or_else(|| anyhow::anyhow!("title {id} vanished after write").into())
    }
}

async fn link_genres<C: ConnectionTrait>(db: &C, title_id: i32, genre_ids: &[i32]) -> Result<(), DbErr> {
    if genre_ids.is_empty() {
        return Ok(());
    }
    genre_titles::Entity::insert_many(genre_ids.iter().map(|&genre_id| genre_titles::ActiveModel {
        id: NotSet,
        title_id: Set(title_id),
        genre_id: Set(genre_id),
    }))
    .exec(db)
    .await?;
    Ok(())
}

/// Expand category, genres and rating for a batch of title rows, preserving order.
async fn hydrate_titles<C: ConnectionTrait>(
    db: &C,
    models: Vec<titles::Model>,
) -> Result<Vec<Title>, DbErr> {
    if models.is_empty() {
        return Ok(Vec::new());
    }
    let title_ids: Vec<i32> = models.iter().map(|m| m.id).collect();
    let category_ids: Vec<i32> = models.iter().filter_map(|m| m.category_id).collect();

    let categories: HashMap<i32, SlugName> = if category_ids.is_empty() {
        HashMap::new()
    } else {
        categories::Entity::find()
            .filter(categories::Column::Id.is_in(category_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|c| (c.id, SlugName { name: c.name, slug: c.slug }))
            .collect()
    };

    let mut genres_by_title: HashMap<i32, Vec<SlugName>> = HashMap::new();
    let links = genre_titles::Entity::find()
        .filter(genre_titles::Column::TitleId.is_in(title_ids.clone()))
        .find_also_related(genres::Entity)
        .order_by_asc(genres::Column::Name)
        .all(db)
        .await?;
    for (link, genre) in links {
        if let Some(g) = genre {
            genres_by_title
                .entry(link.title_id)
                .or_default()
                .push(SlugName { name: g.name, slug: g.slug });
        }
    }

    let mut scores_by_title: HashMap<i32, Vec<u8>> = HashMap::new();
    let scores: Vec<(i32, i16)> = reviews::Entity::find()
        .select_only()
        .column(reviews::Column::TitleId)
        .column(reviews::Column::Score)
        .filter(reviews::Column::TitleId.is_in(title_ids))
        .into_tuple()
        .all(db)
        .await?;
    for (title_id, score) in scores {
        scores_by_title
            .entry(title_id)
            .or_default()
            .push(u8::try_from(score).unwrap_or_default());
    }

    Ok(models
        .into_iter()
        .map(|m| Title {
            id: TitleId(m.id),
            category: m.category_id.and_then(|id| categories.get(&id).cloned()),
            genres: genres_by_title.remove(&m.id).unwrap_or_default(),
            rating: scores_by_title.remove(&m.id).and_then(rating),
            name: m.name,
            year: m.year,
            description: m.description,
        })
        .collect())
}

// ── Review repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbReviewRepository {
    pub db: DatabaseConnection,
}

impl ReviewRepository for DbReviewRepository {
    async fn list(&self, title_id: TitleId, page: PageRequest) -> Result<Page<Review>, ApiError> {
        let page = reviews::Entity::find()
            .filter(reviews::Column::TitleId.eq(title_id.0))
            .order_by_desc(reviews::Column::PubDate)
            .order_by_desc(reviews::Column::Id)
            .fetch_page(&self.db, page)
            .await
            .context("list reviews")?;
        let authors = usernames(&self.db, page.results.iter().map(|r| r.author_id)).await?;
        let results = page
            .results
            .into_iter()
            .map(|m| review_from_model(m, &authors))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Page {
            count: page.count,
            results,
        })
    }

    async fn find(&self, title_id: TitleId, id: ReviewId) -> Result<Option<Review>, ApiError> {
        let model = reviews::Entity::find_by_id(id.0)
            .filter(reviews::Column::TitleId.eq(title_id.0))
            .one(&self.db)
            .await
            .context("find review")?;
        self.with_author(model).await
    }

    async fn find_by_author(
        &self,
        title_id: TitleId,
        author_id: UserId,
    ) -> Result<Option<Review>, ApiError> {
        let model = reviews::Entity::find()
            .filter(reviews::Column::TitleId.eq(title_id.0))
            .filter(reviews::Column::AuthorId.eq(author_id.0))
            .one(&self.db)
            .await
            .context("find review by author")?;
        self.with_author(model).await
    }

    async fn create(&self, review: &NewReview) -> Result<Review, ApiError> {
        let inserted = reviews::ActiveModel {
            id: NotSet,
            title_id: Set(review.title_id.0),
            author_id: Set(review.author_id.0),
            text: Set(review.text.clone()),
            score: Set(i16::from(review.score.get())),
            pub_date: Set(review.pub_date),
        }
        .insert(&self.db)
        .await;
        let model = match inserted {
            Ok(model) => model,
            // Lost the race against a concurrent first review.
            Err(e) if is_unique_violation(&e) => return Err(ApiError::duplicate_review()),
            Err(e) => return Err(anyhow::Error::new(e).context("create review").into()),
        };
        self.with_author(Some(model))
            .await?
            .ok_or_else(|| anyhow::anyhow!("review author missing").into())
    }

    async fn update(&self, id: ReviewId, patch: &ReviewPatch) -> Result<Review, ApiError> {
        let mut am = reviews::ActiveModel {
            id: Set(id.0),
            ..Default::default()
        };
        if let Some(text) = &patch.text {
            am.text = Set(text.clone());
        }
        if let Some(score) = patch.score {
            am.score = Set(i16::from(score.get()));
        }
        let model = if am.is_changed() {
            am.update(&self.db).await.context("update review")?
        } else {
            reviews::Entity::find_by_id(id.0)
                .one(&self.db)
                .await
                .context("load review")?
                .ok_or(ApiError::ReviewNotFound)?
        };
        self.with_author(Some(model))
            .await?
            .ok_or_else(|| anyhow::anyhow!("review author missing").into())
    }

    async fn delete(&self, id: ReviewId) -> Result<bool, ApiError> {
        let result = reviews::Entity::delete_by_id(id.0)
            .exec(&self.db)
            .await
            .context("delete review")?;
        Ok(result.rows_affected > 0)
    }
}

impl DbReviewRepository {
    async fn with_author(&self, model: Option<reviews::Model>) -> Result<Option<Review>, ApiError> {
        let Some(model) = model else {
            return Ok(None);
        };
        let authors = usernames(&self.db, [model.author_id]).await?;
        review_from_model(model, &authors).map(Some)
    }
}

fn review_from_model(model: reviews::Model, authors: &HashMap<i32, String>) -> Result<Review, ApiError> {
    let score = Score::new(i64::from(model.score))
        .with_context(|| format!("review {} has corrupt score", model.id))?;
    Ok(Review {
        id: ReviewId(model.id),
        title_id: TitleId(model.title_id),
        author_id: UserId(model.author_id),
        author: authors.get(&model.author_id).cloned().unwrap_or_default(),
        text: model.text,
        score,
        pub_date: model.pub_date,
    })
}

// ── Comment repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCommentRepository {
    pub db: DatabaseConnection,
}

impl CommentRepository for DbCommentRepository {
    async fn list(&self, review_id: ReviewId, page: PageRequest) -> Result<Page<Comment>, ApiError> {
        let page = comments::Entity::find()
            .filter(comments::Column::ReviewId.eq(review_id.0))
            .order_by_desc(comments::Column::PubDate)
            .order_by_desc(comments::Column::Id)
            .fetch_page(&self.db, page)
            .await
            .context("list comments")?;
        let authors = usernames(&self.db, page.results.iter().map(|c| c.author_id)).await?;
        Ok(page.map(|m| comment_from_model(m, &authors)))
    }

    async fn find(&self, review_id: ReviewId, id: CommentId) -> Result<Option<Comment>, ApiError> {
        let model = comments::Entity::find_by_id(id.0)
            .filter(comments::Column::ReviewId.eq(review_id.0))
            .one(&self.db)
            .await
            .context("find comment")?;
        self.with_author(model).await
    }

    async fn create(&self, comment: &NewComment) -> Result<Comment, ApiError> {
        let model = comments::ActiveModel {
            id: NotSet,
            review_id: Set(comment.review_id.0),
            author_id: Set(comment.author_id.0),
            text: Set(comment.text.clone()),
            pub_date: Set(comment.pub_date),
        }
        .insert(&self.db)
        .await
        .context("create comment")?;
        self.with_author(Some(model))
            .await?
            .ok_or_else(|| anyhow::anyhow!("comment author missing").into())
    }

    async fn update(&self, id: CommentId, text: &str) -> Result<Comment, ApiError> {
        let model = comments::ActiveModel {
            id: Set(id.0),
            text: Set(text.to_owned()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("update comment")?;
        self.with_author(Some(model))
            .await?
            .ok_or_else(|| anyhow::anyhow!("comment author missing").into())
    }

    async fn delete(&self, id: CommentId) -> Result<bool, ApiError> {
        let result = comments::Entity::delete_by_id(id.0)
            .exec(&self.db)
            .await
            .context("delete comment")?;
        Ok(result.rows_affected > 0)
    }
}

impl DbCommentRepository {
    async fn with_author(&self, model: Option<comments::Model>) -> Result<Option<Comment>, ApiError> {
        let Some(model) = model else {
            return Ok(None);
        };
        let authors = usernames(&self.db, [model.author_id]).await?;
        Ok(Some(comment_from_model(model, &authors)))
    }
}

fn comment_from_model(model: comments::Model, authors: &HashMap<i32, String>) -> Comment {
    Comment {
        id: CommentId(model.id),
        review_id: ReviewId(model.review_id),
        author_id: UserId(model.author_id),
        author: authors.get(&model.author_id).cloned().unwrap_or_default(),
        text: model.text,
        pub_date: model.pub_date,
    }
}

/// Usernames for a set of author ids.
async fn usernames(
    db: &DatabaseConnection,
    ids: impl IntoIterator<Item = i32>,
) -> Result<HashMap<i32, String>, ApiError> {
    let mut ids: Vec<i32> = ids.into_iter().collect();
    ids.sort_unstable();
    ids.dedup();
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows: Vec<(i32, String)> = users::Entity::find()
        .select_only()
        .column(users::Column::Id)
        .column(users::Column::Username)
        .filter(users::Column::Id.is_in(ids))
        .into_tuple()
        .all(db)
        .await
        .context("load author usernames")?;
    Ok(rows.into_iter().collect())
}
