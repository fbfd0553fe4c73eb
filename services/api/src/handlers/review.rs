use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use yamdb_domain::id::{ReviewId, TitleId};
use yamdb_domain::pagination::{Page, PageRequest};
use yamdb_domain::review::Score;

use crate::domain::types::Review;
use crate::error::ApiError;
use crate::extract::{Params, PathParams, Payload, Requester};
use crate::state::AppState;
use crate::usecase::review::{
    CreateReviewInput, CreateReviewUseCase, DeleteReviewUseCase, GetReviewUseCase,
    ListReviewsUseCase, UpdateReviewInput, UpdateReviewUseCase,
};

#[derive(Serialize)]
pub struct ReviewResponse {
    pub id: ReviewId,
    pub title: TitleId,
    pub text: String,
    pub author: String,
    pub score: Score,
    #[serde(serialize_with = "yamdb_core::serde::to_rfc3339_ms")]
    pub pub_date: chrono::DateTime<chrono::Utc>,
}

impl From<Review> for ReviewResponse {
    fn from(review: Review) -> Self {
        Self {
            id: review.id,
            title: review.title_id,
            text: review.text,
            author: review.author,
            score: review.score,
            pub_date: review.pub_date,
        }
    }
}

// ── GET/POST /titles/{title_id}/reviews ──────────────────────────────────────

pub async fn list_reviews(
    State(state): State<AppState>,
    PathParams(title_id): PathParams<TitleId>,
    Params(page): Params<PageRequest>,
) -> Result<Json<Page<ReviewResponse>>, ApiError> {
    let usecase = ListReviewsUseCase {
        titles: state.title_repo(),
        reviews: state.review_repo(),
    };
    let reviews = usecase.execute(title_id, page).await?;
    Ok(Json(reviews.map(ReviewResponse::from)))
}

/// `score` stays a raw integer here so range errors surface as field-scoped
/// validation messages rather than body rejections.
#[derive(Deserialize)]
pub struct CreateReviewRequest {
    pub text: String,
    pub score: i64,
}

pub async fn create_review(
    requester: Requester,
    State(state): State<AppState>,
    PathParams(title_id): PathParams<TitleId>,
    Payload(body): Payload<CreateReviewRequest>,
) -> Result<(StatusCode, Json<ReviewResponse>), ApiError> {
    let usecase = CreateReviewUseCase {
        titles: state.title_repo(),
        reviews: state.review_repo(),
    };
    let review = usecase
        .execute(
            requester.user(),
            title_id,
            CreateReviewInput {
                text: body.text,
                score: body.score,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(review.into())))
}

// ── GET/PATCH/DELETE /titles/{title_id}/reviews/{review_id} ──────────────────

pub async fn get_review(
    State(state): State<AppState>,
    PathParams((title_id, review_id)): PathParams<(TitleId, ReviewId)>,
) -> Result<Json<ReviewResponse>, ApiError> {
    let usecase = GetReviewUseCase {
        titles: state.title_repo(),
        reviews: state.review_repo(),
    };
    Ok(Json(usecase.execute(title_id, review_id).await?.into()))
}

#[derive(Deserialize, Default)]
pub struct UpdateReviewRequest {
    pub text: Option<String>,
    pub score: Option<i64>,
}

pub async fn update_review(
    requester: Requester,
    State(state): State<AppState>,
    PathParams((title_id, review_id)): PathParams<(TitleId, ReviewId)>,
    Payload(body): Payload<UpdateReviewRequest>,
) -> Result<Json<ReviewResponse>, ApiError> {
    let usecase = UpdateReviewUseCase {
        titles: state.title_repo(),
        reviews: state.review_repo(),
    };
    let review = usecase
        .execute(
            requester.user(),
            title_id,
            review_id,
            UpdateReviewInput {
                text: body.text,
                score: body.score,
            },
        )
        .await?;
    Ok(Json(review.into()))
}

pub async fn delete_review(
    requester: Requester,
    State(state): State<AppState>,
    PathParams((title_id, review_id)): PathParams<(TitleId, ReviewId)>,
) -> Result<StatusCode, ApiError> {
    let usecase = DeleteReviewUseCase {
        titles: state.title_repo(),
        reviews: state.review_repo(),
    };
    usecase
        .execute(requester.user(), title_id, review_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
