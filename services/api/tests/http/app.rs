use std::sync::Arc;

use axum_test::TestServer;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ActiveValue::Set, ColumnTrait, ConnectOptions,
    Database, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};

use yamdb_api::router::build_router;
use yamdb_api::state::AppState;
use yamdb_api_migration::{Migrator, MigratorTrait};
use yamdb_api_schema::{categories, genres, outbox_events, users};
use yamdb_auth_types::clock::SystemClock;
use yamdb_auth_types::confirmation::ConfirmationCodes;
use yamdb_auth_types::token::TokenIssuer;
use yamdb_domain::id::UserId;
use yamdb_testing::TEST_SECRET;
use yamdb_testing::auth::MockAuth;

pub struct TestApp {
    pub server: TestServer,
    pub db: DatabaseConnection,
    pub auth: MockAuth,
}

impl TestApp {
    pub async fn spawn() -> Self {
        // One connection: every pooled connection would get its own in-memory database.
        let mut opts = ConnectOptions::new("sqlite::memory:");
        opts.max_connections(1).min_connections(1).sqlx_logging(false);
        let db = Database::connect(opts).await.unwrap();
        Migrator::up(&db, None).await.unwrap();

        let clock = Arc::new(SystemClock);
        let state = AppState {
            db: db.clone(),
            tokens: TokenIssuer::new(TEST_SECRET, 3600, clock.clone()),
            codes: ConfirmationCodes::new(TEST_SECRET, 3600, clock),
        };
        let server = TestServer::new(build_router(state)).unwrap();

        Self {
            server,
            db,
            auth: MockAuth::default(),
        }
    }

    /// Insert a user directly and return its id.
    pub async fn seed_user(&self, username: &str, role: &str) -> UserId {
        let model = users::ActiveModel {
            id: NotSet,
            username: Set(username.to_owned()),
            email: Set(format!("{username}@example.com")),
            first_name: Set(String::new()),
            last_name: Set(String::new()),
            bio: Set(String::new()),
            role: Set(role.to_owned()),
            last_login: Set(None),
            date_joined: Set(Utc::now()),
        }
        .insert(&self.db)
        .await
        .unwrap();
        UserId(model.id)
    }

    pub async fn seed_category(&self, name: &str, slug: &str) {
        categories::ActiveModel {
            id: NotSet,
            name: Set(name.to_owned()),
            slug: Set(slug.to_owned()),
        }
        .insert(&self.db)
        .await
        .unwrap();
    }

    pub async fn seed_genre(&self, name: &str, slug: &str) {
        genres::ActiveModel {
            id: NotSet,
            name: Set(name.to_owned()),
            slug: Set(slug.to_owned()),
        }
        .insert(&self.db)
        .await
        .unwrap();
    }

    /// The most recent confirmation code queued for `username`.
    pub async fn last_code_for(&self, username: &str) -> String {
        let events = outbox_events::Entity::find()
            .filter(outbox_events::Column::Kind.eq("confirmation_code_issued"))
            .order_by_desc(outbox_events::Column::CreatedAt)
            .all(&self.db)
            .await
            .unwrap();
        events
            .into_iter()
            .find(|e| e.payload["username"] == username)
            .and_then(|e| e.payload["confirmation_code"].as_str().map(str::to_owned))
            .expect("a code was queued")
    }
}
