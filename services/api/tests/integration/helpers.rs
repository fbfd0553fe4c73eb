use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};

use yamdb_api::domain::repository::{
    CommentRepository, ConfirmationMailer, ReviewRepository, TaxonomyRepository, TitleRepository,
    UserRepository,
};
use yamdb_api::domain::types::{
    Comment, NewComment, NewReview, NewTitle, NewUser, Review, ReviewPatch, TaxonomyEntry,
    TaxonomyKind, Title, TitleFilter, TitlePatch, User, UserPatch,
};
use yamdb_api::error::ApiError;
use yamdb_domain::catalog::SlugName;
use yamdb_domain::id::{CommentId, ReviewId, TitleId, UserId};
use yamdb_domain::pagination::{Page, PageRequest};
use yamdb_domain::user::UserRole;

fn paginate<T: Clone>(items: &[T], page: PageRequest) -> Page<T> {
    let results = items
        .iter()
        .skip(page.offset() as usize)
        .take(page.limit() as usize)
        .cloned()
        .collect();
    Page {
        count: items.len() as u64,
        results,
    }
}

pub fn test_user(id: i32, username: &str, role: UserRole) -> User {
    User {
        id: UserId(id),
        username: username.to_owned(),
        email: format!("{username}@example.com"),
        first_name: String::new(),
        last_name: String::new(),
        bio: String::new(),
        role,
        last_login: None,
        date_joined: Utc::now(),
    }
}

// ── MockUserRepo ─────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockUserRepo {
    pub users: Arc<Mutex<Vec<User>>>,
}

impl MockUserRepo {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users: Arc::new(Mutex::new(users)),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Shared handle to the stored users for post-execution inspection.
    pub fn users_handle(&self) -> Arc<Mutex<Vec<User>>> {
        Arc::clone(&self.users)
    }
}

impl UserRepository for MockUserRepo {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, ApiError> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, ApiError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn list(&self, search: Option<&str>, page: PageRequest) -> Result<Page<User>, ApiError> {
        let users: Vec<User> = self
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| search.is_none_or(|s| u.username.contains(s)))
            .cloned()
            .collect();
        Ok(paginate(&users, page))
    }

    async fn create(&self, user: &NewUser, joined_at: DateTime<Utc>) -> Result<User, ApiError> {
        let mut users = self.users.lock().unwrap();
        let id = users.iter().map(|u| u.id.0).max().unwrap_or(0) + 1;
        let created = User {
            id: UserId(id),
            username: user.username.clone(),
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            bio: user.bio.clone(),
            role: user.role,
            last_login: None,
            date_joined: joined_at,
        };
        users.push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: UserId, patch: &UserPatch) -> Result<User, ApiError> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(ApiError::UserNotFound)?;
        if let Some(v) = &patch.username {
            user.username = v.clone();
        }
        if let Some(v) = &patch.email {
            user.email = v.clone();
        }
        if let Some(v) = &patch.first_name {
            user.first_name = v.clone();
        }
        if let Some(v) = &patch.last_name {
            user.last_name = v.clone();
        }
        if let Some(v) = &patch.bio {
            user.bio = v.clone();
        }
        if let Some(v) = patch.role {
            user.role = v;
        }
        Ok(user.clone())
    }

    async fn touch_last_login(&self, id: UserId, at: DateTime<Utc>) -> Result<(), ApiError> {
        if let Some(user) = self.users.lock().unwrap().iter_mut().find(|u| u.id == id) {
            user.last_login = Some(at);
        }
        Ok(())
    }

    async fn delete(&self, id: UserId) -> Result<bool, ApiError> {
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| u.id != id);
        Ok(users.len() < before)
    }
}

// ── MockMailer ───────────────────────────────────────────────────────────────

/// Records `(username, code)` pairs instead of sending mail.
#[derive(Clone, Default)]
pub struct MockMailer {
    pub sent: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockMailer {
    pub fn sent_handle(&self) -> Arc<Mutex<Vec<(String, String)>>> {
        Arc::clone(&self.sent)
    }
}

impl ConfirmationMailer for MockMailer {
    async fn send_confirmation_code(&self, user: &User, code: &str) -> Result<(), ApiError> {
        self.sent
            .lock()
            .unwrap()
            .push((user.username.clone(), code.to_owned()));
        Ok(())
    }
}

// ── Mock taxonomy repos ──────────────────────────────────────────────────────

macro_rules! mock_taxonomy_repo {
    ($name:ident, $kind:expr) => {
        #[derive(Clone, Default)]
        pub struct $name {
            pub entries: Arc<Mutex<Vec<TaxonomyEntry>>>,
        }

        impl $name {
            /// Entries from `(name, slug)` pairs with ids starting at 1.
            pub fn with(labels: &[(&str, &str)]) -> Self {
                let entries = labels
                    .iter()
                    .enumerate()
                    .map(|(i, (name, slug))| TaxonomyEntry {
                        id: i as i32 + 1,
                        label: SlugName {
                            name: (*name).to_owned(),
                            slug: (*slug).to_owned(),
                        },
                    })
                    .collect();
                Self {
                    entries: Arc::new(Mutex::new(entries)),
                }
            }
        }

        impl TaxonomyRepository for $name {
            const KIND: TaxonomyKind = $kind;

            async fn list(
                &self,
                search: Option<&str>,
                page: PageRequest,
            ) -> Result<Page<TaxonomyEntry>, ApiError> {
                let mut entries: Vec<TaxonomyEntry> = self
                    .entries
                    .lock()
                    .unwrap()
                    .iter()
                    .filter(|e| search.is_none_or(|s| e.label.name.starts_with(s)))
                    .cloned()
                    .collect();
                entries.sort_by(|a, b| a.label.name.cmp(&b.label.name));
                Ok(paginate(&entries, page))
            }

            async fn find_by_slug(&self, slug: &str) -> Result<Option<TaxonomyEntry>, ApiError> {
                Ok(self
                    .entries
                    .lock()
                    .unwrap()
                    .iter()
                    .find(|e| e.label.slug == slug)
                    .cloned())
            }

            async fn create(&self, label: &SlugName) -> Result<TaxonomyEntry, ApiError> {
                let mut entries = self.entries.lock().unwrap();
                let id = entries.iter().map(|e| e.id).max().unwrap_or(0) + 1;
                let entry = TaxonomyEntry {
                    id,
                    label: label.clone(),
                };
                entries.push(entry.clone());
                Ok(entry)
            }

            async fn update(&self, id: i32, label: &SlugName) -> Result<TaxonomyEntry, ApiError> {
                let mut entries = self.entries.lock().unwrap();
                let entry = entries
                    .iter_mut()
                    .find(|e| e.id == id)
                    .ok_or_else(|| ApiError::validation("slug", "missing"))?;
                entry.label = label.clone();
                Ok(entry.clone())
            }

            async fn delete(&self, id: i32) -> Result<bool, ApiError> {
                let mut entries = self.entries.lock().unwrap();
                let before = entries.len();
                entries.retain(|e| e.id != id);
                Ok(entries.len() < before)
            }
        }
    };
}

mock_taxonomy_repo!(MockCategoryRepo, TaxonomyKind::Category);
mock_taxonomy_repo!(MockGenreRepo, TaxonomyKind::Genre);

// ── MockTitleRepo ────────────────────────────────────────────────────────────

/// Stores titles as written; relations are echoed back as ids in slug form.
#[derive(Clone, Default)]
pub struct MockTitleRepo {
    pub titles: Arc<Mutex<Vec<Title>>>,
    pub written: Arc<Mutex<Vec<NewTitle>>>,
}

impl MockTitleRepo {
    pub fn with_ids(ids: &[i32]) -> Self {
        let titles = ids
            .iter()
            .map(|&id| Title {
                id: TitleId(id),
                name: format!("title {id}"),
                year: 2000,
                description: None,
                category: None,
                genres: vec![],
                rating: None,
            })
            .collect();
        Self {
            titles: Arc::new(Mutex::new(titles)),
            written: Arc::default(),
        }
    }

    pub fn written_handle(&self) -> Arc<Mutex<Vec<NewTitle>>> {
        Arc::clone(&self.written)
    }
}

fn id_label(id: i32) -> SlugName {
    SlugName {
        name: id.to_string(),
        slug: id.to_string(),
    }
}

impl TitleRepository for MockTitleRepo {
    async fn list(&self, filter: &TitleFilter, page: PageRequest) -> Result<Page<Title>, ApiError> {
        let titles: Vec<Title> = self
            .titles
            .lock()
            .unwrap()
            .iter()
            .filter(|t| filter.year.is_none_or(|y| t.year == y))
            .cloned()
            .collect();
        Ok(paginate(&titles, page))
    }

    async fn find_by_id(&self, id: TitleId) -> Result<Option<Title>, ApiError> {
        Ok(self.titles.lock().unwrap().iter().find(|t| t.id == id).cloned())
    }

    async fn exists(&self, id: TitleId) -> Result<bool, ApiError> {
        Ok(self.titles.lock().unwrap().iter().any(|t| t.id == id))
    }

    async fn create(&self, title: &NewTitle) -> Result<Title, ApiError> {
        self.written.lock().unwrap().push(title.clone());
        let mut titles = self.titles.lock().unwrap();
        let id = titles.iter().map(|t| t.id.0).max().unwrap_or(0) + 1;
        let created = Title {
            id: TitleId(id),
            name: title.name.clone(),
            year: title.year,
            description: title.description.clone(),
            category: title.category_id.map(id_label),
            genres: title.genre_ids.iter().copied().map(id_label).collect(),
            rating: None,
        };
        titles.push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: TitleId, patch: &TitlePatch) -> Result<Title, ApiError> {
        let mut titles = self.titles.lock().unwrap();
        let title = titles
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(ApiError::TitleNotFound)?;
        if let Some(v) = &patch.name {
            title.name = v.clone();
        }
        if let Some(v) = patch.year {
            title.year = v;
        }
        if let Some(v) = &patch.description {
            title.description = v.clone();
        }
        if let Some(v) = patch.category_id {
            title.category = v.map(id_label);
        }
        if let Some(v) = &patch.genre_ids {
            title.genres = v.iter().copied().map(id_label).collect();
        }
        Ok(title.clone())
    }

    async fn delete(&self, id: TitleId) -> Result<bool, ApiError> {
        let mut titles = self.titles.lock().unwrap();
        let before = titles.len();
        titles.retain(|t| t.id != id);
        Ok(titles.len() < before)
    }
}

// ── MockReviewRepo ───────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockReviewRepo {
    pub reviews: Arc<Mutex<Vec<Review>>>,
}

impl MockReviewRepo {
    pub fn new(reviews: Vec<Review>) -> Self {
        Self {
            reviews: Arc::new(Mutex::new(reviews)),
        }
    }

    pub fn reviews_handle(&self) -> Arc<Mutex<Vec<Review>>> {
        Arc::clone(&self.reviews)
    }
}

pub fn test_review(id: i32, title_id: i32, author: &User, score: i64) -> Review {
    Review {
        id: ReviewId(id),
        title_id: TitleId(title_id),
        author_id: author.id,
        author: author.username.clone(),
        text: format!("review {id}"),
        score: yamdb_domain::review::Score::new(score).unwrap(),
        pub_date: Utc::now(),
    }
}

impl ReviewRepository for MockReviewRepo {
    async fn list(&self, title_id: TitleId, page: PageRequest) -> Result<Page<Review>, ApiError> {
        let mut reviews: Vec<Review> = self
            .reviews
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.title_id == title_id)
            .cloned()
            .collect();
        reviews.sort_by(|a, b| b.pub_date.cmp(&a.pub_date).then(b.id.cmp(&a.id)));
        Ok(paginate(&reviews, page))
    }

    async fn find(&self, title_id: TitleId, id: ReviewId) -> Result<Option<Review>, ApiError> {
        Ok(self
            .reviews
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.title_id == title_id && r.id == id)
            .cloned())
    }

    async fn find_by_author(
        &self,
        title_id: TitleId,
        author_id: UserId,
    ) -> Result<Option<Review>, ApiError> {
        Ok(self
            .reviews
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.title_id == title_id && r.author_id == author_id)
            .cloned())
    }

    async fn create(&self, review: &NewReview) -> Result<Review, ApiError> {
        let mut reviews = self.reviews.lock().unwrap();
        let id = reviews.iter().map(|r| r.id.0).max().unwrap_or(0) + 1;
        let created = Review {
            id: ReviewId(id),
            title_id: review.title_id,
            author_id: review.author_id,
            author: format!("user{}", review.author_id),
            text: review.text.clone(),
            score: review.score,
            pub_date: review.pub_date,
        };
        reviews.push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: ReviewId, patch: &ReviewPatch) -> Result<Review, ApiError> {
        let mut reviews = self.reviews.lock().unwrap();
        let review = reviews
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(ApiError::ReviewNotFound)?;
        if let Some(v) = &patch.text {
            review.text = v.clone();
        }
        if let Some(v) = patch.score {
            review.score = v;
        }
        Ok(review.clone())
    }

    async fn delete(&self, id: ReviewId) -> Result<bool, ApiError> {
        let mut reviews = self.reviews.lock().unwrap();
        let before = reviews.len();
        reviews.retain(|r| r.id != id);
        Ok(reviews.len() < before)
    }
}

// ── MockCommentRepo ──────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockCommentRepo {
    pub comments: Arc<Mutex<Vec<Comment>>>,
}

impl MockCommentRepo {
    pub fn new(comments: Vec<Comment>) -> Self {
        Self {
            comments: Arc::new(Mutex::new(comments)),
        }
    }

    pub fn comments_handle(&self) -> Arc<Mutex<Vec<Comment>>> {
        Arc::clone(&self.comments)
    }
}

pub fn test_comment(id: i32, review_id: i32, author: &User) -> Comment {
    Comment {
        id: CommentId(id),
        review_id: ReviewId(review_id),
        author_id: author.id,
        author: author.username.clone(),
        text: format!("comment {id}"),
        pub_date: Utc::now(),
    }
}

impl CommentRepository for MockCommentRepo {
    async fn list(&self, review_id: ReviewId, page: PageRequest) -> Result<Page<Comment>, ApiError> {
        let comments: Vec<Comment> = self
            .comments
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.review_id == review_id)
            .cloned()
            .collect();
        Ok(paginate(&comments, page))
    }

    async fn find(&self, review_id: ReviewId, id: CommentId) -> Result<Option<Comment>, ApiError> {
        Ok(self
            .comments
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.review_id == review_id && c.id == id)
            .cloned())
    }

    async fn create(&self, comment: &NewComment) -> Result<Comment, ApiError> {
        let mut comments = self.comments.lock().unwrap();
        let id = comments.iter().map(|c| c.id.0).max().unwrap_or(0) + 1;
        let created = Comment {
            id: CommentId(id),
            review_id: comment.review_id,
            author_id: comment.author_id,
            author: format!("user{}", comment.author_id),
            text: comment.text.clone(),
            pub_date: comment.pub_date,
        };
        comments.push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: CommentId, text: &str) -> Result<Comment, ApiError> {
        let mut comments = self.comments.lock().unwrap();
        let comment = comments
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(ApiError::CommentNotFound)?;
        comment.text = text.to_owned();
        Ok(comment.clone())
    }

    async fn delete(&self, id: CommentId) -> Result<bool, ApiError> {
        let mut comments = self.comments.lock().unwrap();
        let before = comments.len();
        comments.retain(|c| c.id != id);
        Ok(comments.len() < before)
    }
}
