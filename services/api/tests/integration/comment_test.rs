use yamdb_api::error::ApiError;
use yamdb_api::usecase::comment::{
    CreateCommentUseCase, DeleteCommentUseCase, GetCommentUseCase, ListCommentsUseCase, Thread,
    UpdateCommentUseCase,
};
use yamdb_domain::id::{CommentId, ReviewId, TitleId};
use yamdb_domain::pagination::PageRequest;
use yamdb_domain::user::UserRole;

use crate::helpers::{
    MockCommentRepo, MockReviewRepo, MockTitleRepo, test_comment, test_review, test_user,
};

const THREAD: Thread = Thread {
    title_id: TitleId(1),
    review_id: ReviewId(10),
};

fn titles() -> MockTitleRepo {
    MockTitleRepo::with_ids(&[1, 2])
}

/// Review 10 on title 1, written by alice.
fn reviews() -> MockReviewRepo {
    let alice = test_user(2, "alice", UserRole::User);
    MockReviewRepo::new(vec![test_review(10, 1, &alice, 6)])
}

fn create(
    comments: MockCommentRepo,
) -> CreateCommentUseCase<MockTitleRepo, MockReviewRepo, MockCommentRepo> {
    CreateCommentUseCase {
        titles: titles(),
        reviews: reviews(),
        comments,
    }
}

fn get(
    comments: MockCommentRepo,
) -> GetCommentUseCase<MockTitleRepo, MockReviewRepo, MockCommentRepo> {
    GetCommentUseCase {
        titles: titles(),
        reviews: reviews(),
        comments,
    }
}

#[tokio::test]
async fn should_add_comment_to_review() {
    let bob = test_user(3, "bob", UserRole::User);
    let comments = MockCommentRepo::default();
    let handle = comments.comments_handle();

    let comment = create(comments)
        .execute(Some(&bob), THREAD, "agreed".to_owned())
        .await
        .unwrap();

    assert_eq!(comment.review_id, ReviewId(10));
    assert_eq!(comment.author_id, bob.id);
    assert_eq!(handle.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_require_login_to_comment() {
    let result = create(MockCommentRepo::default())
        .execute(None, THREAD, "agreed".to_owned())
        .await;

    assert!(
        matches!(result, Err(ApiError::Unauthenticated)),
        "expected Unauthenticated, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_review_from_another_title() {
    let bob = test_user(3, "bob", UserRole::User);
    let wrong = Thread {
        title_id: TitleId(2),
        review_id: ReviewId(10),
    };

    let result = create(MockCommentRepo::default())
        .execute(Some(&bob), wrong, "agreed".to_owned())
        .await;

    assert!(matches!(result, Err(ApiError::ReviewNotFound)));
}

#[tokio::test]
async fn should_return_title_not_found_before_review() {
    let missing = Thread {
        title_id: TitleId(99),
        review_id: ReviewId(10),
    };
    let uc = ListCommentsUseCase {
        titles: titles(),
        reviews: reviews(),
        comments: MockCommentRepo::default(),
    };

    let result = uc.execute(missing, PageRequest::default()).await;

    assert!(matches!(result, Err(ApiError::TitleNotFound)));
}

#[tokio::test]
async fn should_reject_blank_comment() {
    let bob = test_user(3, "bob", UserRole::User);

    let result = create(MockCommentRepo::default())
        .execute(Some(&bob), THREAD, "   ".to_owned())
        .await;

    assert!(matches!(result, Err(ApiError::Validation { field: "text", .. })));
}

#[tokio::test]
async fn should_not_find_comment_on_other_review() {
    let bob = test_user(3, "bob", UserRole::User);

    let result = get(MockCommentRepo::new(vec![test_comment(5, 11, &bob)]))
        .execute(THREAD, CommentId(5))
        .await;

    assert!(matches!(result, Err(ApiError::CommentNotFound)));
}

#[tokio::test]
async fn should_enforce_authorship_on_edit() {
    let bob = test_user(3, "bob", UserRole::User);
    let carol = test_user(4, "carol", UserRole::User);
    let admin = test_user(1, "admin", UserRole::Admin);
    let comments = MockCommentRepo::new(vec![test_comment(5, 10, &bob)]);
    let update = UpdateCommentUseCase {
        titles: titles(),
        reviews: reviews(),
        comments: comments.clone(),
    };
    let delete = DeleteCommentUseCase {
        titles: titles(),
        reviews: reviews(),
        comments: comments.clone(),
    };

    let stranger = update
        .execute(Some(&carol), THREAD, CommentId(5), Some("mine now".to_owned()))
        .await;
    assert!(matches!(stranger, Err(ApiError::Forbidden)));

    let edited = update
        .execute(Some(&bob), THREAD, CommentId(5), Some("edited".to_owned()))
        .await
        .unwrap();
    assert_eq!(edited.text, "edited");

    delete
        .execute(Some(&admin), THREAD, CommentId(5))
        .await
        .unwrap();
    let gone = get(comments).execute(THREAD, CommentId(5)).await;
    assert!(matches!(gone, Err(ApiError::CommentNotFound)));
}
