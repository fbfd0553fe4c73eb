use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use yamdb_domain::id::{CommentId, ReviewId, TitleId};
use yamdb_domain::pagination::{Page, PageRequest};

use crate::domain::types::Comment;
use crate::error::ApiError;
use crate::extract::{Params, PathParams, Payload, Requester};
use crate::state::AppState;
use crate::usecase::comment::{
    CreateCommentUseCase, DeleteCommentUseCase, GetCommentUseCase, ListCommentsUseCase, Thread,
    UpdateCommentUseCase,
};

#[derive(Serialize)]
pub struct CommentResponse {
    pub id: CommentId,
    pub review: ReviewId,
    pub text: String,
    pub author: String,
    #[serde(serialize_with = "yamdb_core::serde::to_rfc3339_ms")]
    pub pub_date: chrono::DateTime<chrono::Utc>,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            review: comment.review_id,
            text: comment.text,
            author: comment.author,
            pub_date: comment.pub_date,
        }
    }
}

#[derive(Deserialize)]
pub struct CreateCommentRequest {
    pub text: String,
}

#[derive(Deserialize, Default)]
pub struct UpdateCommentRequest {
    pub text: Option<String>,
}

// ── GET/POST /titles/{title_id}/reviews/{review_id}/comments ─────────────────

pub async fn list_comments(
    State(state): State<AppState>,
    PathParams((title_id, review_id)): PathParams<(TitleId, ReviewId)>,
    Params(page): Params<PageRequest>,
) -> Result<Json<Page<CommentResponse>>, ApiError> {
    let usecase = ListCommentsUseCase {
        titles: state.title_repo(),
        reviews: state.review_repo(),
        comments: state.comment_repo(),
    };
    let comments = usecase.execute(Thread { title_id, review_id }, page).await?;
    Ok(Json(comments.map(CommentResponse::from)))
}

pub async fn create_comment(
    requester: Requester,
    State(state): State<AppState>,
    PathParams((title_id, review_id)): PathParams<(TitleId, ReviewId)>,
    Payload(body): Payload<CreateCommentRequest>,
) -> Result<(StatusCode, Json<CommentResponse>), ApiError> {
    let usecase = CreateCommentUseCase {
        titles: state.title_repo(),
        reviews: state.review_repo(),
        comments: state.comment_repo(),
    };
    let comment = usecase
        .execute(requester.user(), Thread { title_id, review_id }, body.text)
        .await?;
    Ok((StatusCode::CREATED, Json(comment.into())))
}

// ── GET/PATCH/DELETE .../comments/{comment_id} ───────────────────────────────

pub async fn get_comment(
    State(state): State<AppState>,
    PathParams((title_id, review_id, id)): PathParams<(TitleId, ReviewId, CommentId)>,
) -> Result<Json<CommentResponse>, ApiError> {
    let usecase = GetCommentUseCase {
        titles: state.title_repo(),
        reviews: state.review_repo(),
        comments: state.comment_repo(),
    };
    let comment = usecase.execute(Thread { title_id, review_id }, id).await?;
    Ok(Json(comment.into()))
}

pub async fn update_comment(
    requester: Requester,
    State(state): State<AppState>,
    PathParams((title_id, review_id, id)): PathParams<(TitleId, ReviewId, CommentId)>,
    Payload(body): Payload<UpdateCommentRequest>,
) -> Result<Json<CommentResponse>, ApiError> {
    let usecase = UpdateCommentUseCase {
        titles: state.title_repo(),
        reviews: state.review_repo(),
        comments: state.comment_repo(),
    };
    let comment = usecase
        .execute(requester.user(), Thread { title_id, review_id }, id, body.text)
        .await?;
    Ok(Json(comment.into()))
}

pub async fn delete_comment(
    requester: Requester,
    State(state): State<AppState>,
    PathParams((title_id, review_id, id)): PathParams<(TitleId, ReviewId, CommentId)>,
) -> Result<StatusCode, ApiError> {
    let usecase = DeleteCommentUseCase {
        titles: state.title_repo(),
        reviews: state.review_repo(),
        comments: state.comment_repo(),
    };
    usecase
        .execute(requester.user(), Thread { title_id, review_id }, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
