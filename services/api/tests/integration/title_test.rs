use yamdb_api::error::ApiError;
use yamdb_api::usecase::title::{
    CreateTitleInput, CreateTitleUseCase, DeleteTitleUseCase, UpdateTitleInput, UpdateTitleUseCase,
};
use yamdb_domain::id::TitleId;
use yamdb_domain::user::UserRole;

use crate::helpers::{MockCategoryRepo, MockGenreRepo, MockTitleRepo, test_user};

fn create_usecase(titles: MockTitleRepo) -> CreateTitleUseCase<MockTitleRepo, MockCategoryRepo, MockGenreRepo> {
    CreateTitleUseCase {
        titles,
        categories: MockCategoryRepo::with(&[("Drama", "drama"), ("Comedy", "comedy")]),
        genres: MockGenreRepo::with(&[("Thriller", "thriller"), ("Noir", "noir")]),
    }
}

fn pulp_fiction() -> CreateTitleInput {
    CreateTitleInput {
        name: "Pulp Fiction".to_owned(),
        year: 1994,
        description: None,
        category: Some("drama".to_owned()),
        genre: vec!["thriller".to_owned(), "noir".to_owned(), "thriller".to_owned()],
    }
}

#[tokio::test]
async fn should_resolve_slugs_when_creating_title() {
    let admin = test_user(1, "admin", UserRole::Admin);
    let titles = MockTitleRepo::default();
    let written = titles.written_handle();

    create_usecase(titles)
        .execute(Some(&admin), pulp_fiction())
        .await
        .unwrap();

    let written = written.lock().unwrap();
    assert_eq!(written[0].category_id, Some(1));
    assert_eq!(written[0].genre_ids, vec![1, 2], "duplicates are dropped");
}

#[tokio::test]
async fn should_forbid_non_admin_title_creation() {
    let moderator = test_user(2, "mod", UserRole::Moderator);

    let result = create_usecase(MockTitleRepo::default())
        .execute(Some(&moderator), pulp_fiction())
        .await;

    assert!(matches!(result, Err(ApiError::Forbidden)));
}

#[tokio::test]
async fn should_reject_unknown_genre_slug() {
    let admin = test_user(1, "admin", UserRole::Admin);
    let mut input = pulp_fiction();
    input.genre = vec!["western".to_owned()];

    let result = create_usecase(MockTitleRepo::default())
        .execute(Some(&admin), input)
        .await;

    assert!(
        matches!(result, Err(ApiError::Validation { field: "genre", .. })),
        "expected genre validation error, got {result:?}"
    );
}

#[tokio::test]
async fn should_require_at_least_one_genre() {
    let admin = test_user(1, "admin", UserRole::Admin);
    let mut input = pulp_fiction();
    input.genre.clear();

    let result = create_usecase(MockTitleRepo::default())
        .execute(Some(&admin), input)
        .await;

    assert!(matches!(result, Err(ApiError::Validation { field: "genre", .. })));
}

#[tokio::test]
async fn should_reject_year_in_the_future() {
    let admin = test_user(1, "admin", UserRole::Admin);
    let mut input = pulp_fiction();
    input.year = 9999;

    let result = create_usecase(MockTitleRepo::default())
        .execute(Some(&admin), input)
        .await;

    assert!(matches!(result, Err(ApiError::Validation { field: "year", .. })));
}

#[tokio::test]
async fn should_clear_category_and_keep_genres_on_patch() {
    let admin = test_user(1, "admin", UserRole::Admin);
    let titles = MockTitleRepo::default();
    let created = create_usecase(titles.clone())
        .execute(Some(&admin), pulp_fiction())
        .await
        .unwrap();

    let uc = UpdateTitleUseCase {
        titles,
        categories: MockCategoryRepo::default(),
        genres: MockGenreRepo::default(),
    };
    let updated = uc
        .execute(
            Some(&admin),
            created.id,
            UpdateTitleInput {
                category: Some(None),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.category, None);
    assert_eq!(updated.genres, created.genres);
}

#[tokio::test]
async fn should_return_not_found_when_deleting_missing_title() {
    let admin = test_user(1, "admin", UserRole::Admin);
    let uc = DeleteTitleUseCase {
        titles: MockTitleRepo::default(),
    };

    let result = uc.execute(Some(&admin), TitleId(42)).await;

    assert!(matches!(result, Err(ApiError::TitleNotFound)));
}
