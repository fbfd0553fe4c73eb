use axum::extract::FromRef;
use sea_orm::DatabaseConnection;

use yamdb_auth_types::confirmation::ConfirmationCodes;
use yamdb_auth_types::token::TokenIssuer;

use crate::infra::db::{
    DbCategoryRepository, DbCommentRepository, DbGenreRepository, DbReviewRepository,
    DbTitleRepository, DbUserRepository,
};
use crate::infra::mailer::OutboxMailer;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub tokens: TokenIssuer,
    pub codes: ConfirmationCodes,
}

impl FromRef<AppState> for DatabaseConnection {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn mailer(&self) -> OutboxMailer {
        OutboxMailer {
            db: self.db.clone(),
        }
    }

    pub fn category_repo(&self) -> DbCategoryRepository {
        DbCategoryRepository {
            db: self.db.clone(),
        }
    }

    pub fn genre_repo(&self) -> DbGenreRepository {
        DbGenreRepository {
            db: self.db.clone(),
        }
    }

    pub fn title_repo(&self) -> DbTitleRepository {
        DbTitleRepository {
            db: self.db.clone(),
        }
    }

    pub fn review_repo(&self) -> DbReviewRepository {
        DbReviewRepository {
            db: self.db.clone(),
        }
    }

    pub fn comment_repo(&self) -> DbCommentRepository {
        DbCommentRepository {
            db: self.db.clone(),
        }
    }
}
