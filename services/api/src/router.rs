use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use yamdb_core::health::{healthz, readyz};
use yamdb_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    auth::{signup, token},
    comment::{create_comment, delete_comment, get_comment, list_comments, update_comment},
    review::{create_review, delete_review, get_review, list_reviews, update_review},
    taxonomy,
    title::{create_title, delete_title, get_title, list_titles, update_title},
    user::{create_user, delete_user, get_me, get_user, list_users, update_me, update_user},
};
use crate::infra::db::{DbCategoryRepository, DbGenreRepository};
use crate::state::AppState;

fn api_routes() -> Router<AppState> {
    Router::new()
        // Auth
        .route("/auth/signup", post(signup))
        .route("/auth/token", post(token))
        // Users; `me` is a reserved username, so the static segment never
        // shadows a real account.
        .route("/users", get(list_users).post(create_user))
        .route("/users/me", get(get_me).patch(update_me))
        .route(
            "/users/{username}",
            get(get_user).patch(update_user).delete(delete_user),
        )
        // Catalog
        .route(
            "/categories",
            get(taxonomy::list::<DbCategoryRepository>)
                .post(taxonomy::create::<DbCategoryRepository>),
        )
        .route(
            "/categories/{slug}",
            get(taxonomy::get::<DbCategoryRepository>)
                .patch(taxonomy::update::<DbCategoryRepository>)
                .delete(taxonomy::delete::<DbCategoryRepository>),
        )
        .route(
            "/genres",
            get(taxonomy::list::<DbGenreRepository>).post(taxonomy::create::<DbGenreRepository>),
        )
        .route(
            "/genres/{slug}",
            get(taxonomy::get::<DbGenreRepository>)
                .patch(taxonomy::update::<DbGenreRepository>)
                .delete(taxonomy::delete::<DbGenreRepository>),
        )
        .route("/titles", get(list_titles).post(create_title))
        .route(
            "/titles/{title_id}",
            get(get_title).patch(update_title).delete(delete_title),
        )
        // Reviews and comments
        .route(
            "/titles/{title_id}/reviews",
            get(list_reviews).post(create_review),
        )
        .route(
            "/titles/{title_id}/reviews/{review_id}",
            get(get_review).patch(update_review).delete(delete_review),
        )
        .route(
            "/titles/{title_id}/reviews/{review_id}/comments",
            get(list_comments).post(create_comment),
        )
        .route(
            "/titles/{title_id}/reviews/{review_id}/comments/{comment_id}",
            get(get_comment).patch(update_comment).delete(delete_comment),
        )
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .nest("/api/v1", api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(propagate_request_id_layer())
        .layer(request_id_layer())
        .with_state(state)
}
