use yamdb_api::error::ApiError;
use yamdb_api::usecase::review::{
    CreateReviewInput, CreateReviewUseCase, DeleteReviewUseCase, GetReviewUseCase,
    ListReviewsUseCase, UpdateReviewInput, UpdateReviewUseCase,
};
use yamdb_domain::id::{ReviewId, TitleId};
use yamdb_domain::pagination::PageRequest;
use yamdb_domain::user::UserRole;

use crate::helpers::{MockReviewRepo, MockTitleRepo, test_review, test_user};

fn review_input(score: i64) -> CreateReviewInput {
    CreateReviewInput {
        text: "great".to_owned(),
        score,
    }
}

#[tokio::test]
async fn should_create_review_for_existing_title() {
    let alice = test_user(2, "alice", UserRole::User);
    let reviews = MockReviewRepo::default();
    let handle = reviews.reviews_handle();
    let uc = CreateReviewUseCase {
        titles: MockTitleRepo::with_ids(&[1]),
        reviews,
    };

    let review = uc
        .execute(Some(&alice), TitleId(1), review_input(9))
        .await
        .unwrap();

    assert_eq!(review.score.get(), 9);
    assert_eq!(review.author_id, alice.id);
    assert_eq!(handle.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_reject_second_review_by_same_author() {
    let alice = test_user(2, "alice", UserRole::User);
    let uc = CreateReviewUseCase {
        titles: MockTitleRepo::with_ids(&[1]),
        reviews: MockReviewRepo::new(vec![test_review(1, 1, &alice, 5)]),
    };

    let result = uc.execute(Some(&alice), TitleId(1), review_input(9)).await;

    assert!(
        matches!(result, Err(ApiError::Validation { field: "title", .. })),
        "expected duplicate review error, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_score_out_of_range() {
    let alice = test_user(2, "alice", UserRole::User);
    let uc = CreateReviewUseCase {
        titles: MockTitleRepo::with_ids(&[1]),
        reviews: MockReviewRepo::default(),
    };

    for score in [0, 11, -3] {
        let result = uc.execute(Some(&alice), TitleId(1), review_input(score)).await;
        assert!(
            matches!(result, Err(ApiError::Validation { field: "score", .. })),
            "score {score}: got {result:?}"
        );
    }
}

#[tokio::test]
async fn should_require_authentication_to_review() {
    let uc = CreateReviewUseCase {
        titles: MockTitleRepo::with_ids(&[1]),
        reviews: MockReviewRepo::default(),
    };

    let result = uc.execute(None, TitleId(1), review_input(5)).await;

    assert!(matches!(result, Err(ApiError::Unauthenticated)));
}

#[tokio::test]
async fn should_return_not_found_for_unknown_title() {
    let alice = test_user(2, "alice", UserRole::User);
    let uc = CreateReviewUseCase {
        titles: MockTitleRepo::default(),
        reviews: MockReviewRepo::default(),
    };

    let result = uc.execute(Some(&alice), TitleId(7), review_input(5)).await;

    assert!(matches!(result, Err(ApiError::TitleNotFound)));
}

#[tokio::test]
async fn should_not_find_review_under_another_title() {
    let alice = test_user(2, "alice", UserRole::User);
    let uc = GetReviewUseCase {
        titles: MockTitleRepo::with_ids(&[1, 2]),
        reviews: MockReviewRepo::new(vec![test_review(10, 1, &alice, 5)]),
    };

    assert!(uc.execute(TitleId(1), ReviewId(10)).await.is_ok());
    let result = uc.execute(TitleId(2), ReviewId(10)).await;
    assert!(matches!(result, Err(ApiError::ReviewNotFound)));
}

#[tokio::test]
async fn should_list_reviews_newest_first() {
    let alice = test_user(2, "alice", UserRole::User);
    let bob = test_user(3, "bob", UserRole::User);
    let mut older = test_review(1, 1, &alice, 5);
    older.pub_date -= chrono::Duration::hours(1);
    let newer = test_review(2, 1, &bob, 7);
    let uc = ListReviewsUseCase {
        titles: MockTitleRepo::with_ids(&[1]),
        reviews: MockReviewRepo::new(vec![older, newer]),
    };

    let page = uc.execute(TitleId(1), PageRequest::default()).await.unwrap();

    assert_eq!(page.count, 2);
    assert_eq!(page.results[0].id, ReviewId(2));
}

#[tokio::test]
async fn should_forbid_non_author_update() {
    let alice = test_user(2, "alice", UserRole::User);
    let bob = test_user(3, "bob", UserRole::User);
    let uc = UpdateReviewUseCase {
        titles: MockTitleRepo::with_ids(&[1]),
        reviews: MockReviewRepo::new(vec![test_review(1, 1, &alice, 5)]),
    };

    let result = uc
        .execute(
            Some(&bob),
            TitleId(1),
            ReviewId(1),
            UpdateReviewInput {
                score: Some(1),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(result, Err(ApiError::Forbidden)));
}

#[tokio::test]
async fn should_let_author_update_score() {
    let alice = test_user(2, "alice", UserRole::User);
    let uc = UpdateReviewUseCase {
        titles: MockTitleRepo::with_ids(&[1]),
        reviews: MockReviewRepo::new(vec![test_review(1, 1, &alice, 5)]),
    };

    let review = uc
        .execute(
            Some(&alice),
            TitleId(1),
            ReviewId(1),
            UpdateReviewInput {
                score: Some(8),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(review.score.get(), 8);
    assert_eq!(review.text, "review 1");
}

#[tokio::test]
async fn should_let_moderator_delete_any_review() {
    let alice = test_user(2, "alice", UserRole::User);
    let moderator = test_user(4, "mod", UserRole::Moderator);
    let reviews = MockReviewRepo::new(vec![test_review(1, 1, &alice, 5)]);
    let handle = reviews.reviews_handle();
    let uc = DeleteReviewUseCase {
        titles: MockTitleRepo::with_ids(&[1]),
        reviews,
    };

    uc.execute(Some(&moderator), TitleId(1), ReviewId(1))
        .await
        .unwrap();

    assert!(handle.lock().unwrap().is_empty());
}
