use yamdb_api::error::ApiError;
use yamdb_api::usecase::taxonomy::{
    CreateTaxonomyUseCase, DeleteTaxonomyUseCase, GetTaxonomyUseCase, ListTaxonomyUseCase,
    TaxonomyPatch, UpdateTaxonomyUseCase,
};
use yamdb_domain::catalog::SlugName;
use yamdb_domain::pagination::PageRequest;
use yamdb_domain::user::UserRole;

use crate::helpers::{MockCategoryRepo, MockGenreRepo, test_user};

fn label(name: &str, slug: &str) -> SlugName {
    SlugName {
        name: name.to_owned(),
        slug: slug.to_owned(),
    }
}

#[tokio::test]
async fn should_list_by_name_prefix() {
    let uc = ListTaxonomyUseCase {
        repo: MockGenreRepo::with(&[
            ("Drama", "drama"),
            ("Documentary", "documentary"),
            ("Thriller", "thriller"),
        ]),
    };

    let page = uc.execute(Some("D"), PageRequest::default()).await.unwrap();

    assert_eq!(page.count, 2);
    assert_eq!(page.results[0].label.slug, "documentary");
    assert_eq!(page.results[1].label.slug, "drama");
}

#[tokio::test]
async fn should_only_let_admins_create() {
    let moderator = test_user(1, "mod", UserRole::Moderator);
    let uc = CreateTaxonomyUseCase {
        repo: MockCategoryRepo::default(),
    };

    let anonymous = uc.execute(None, label("Films", "films")).await;
    assert!(matches!(anonymous, Err(ApiError::Unauthenticated)));

    let result = uc.execute(Some(&moderator), label("Films", "films")).await;
    assert!(matches!(result, Err(ApiError::Forbidden)));
}

#[tokio::test]
async fn should_reject_duplicate_slug() {
    let admin = test_user(1, "admin", UserRole::Admin);
    let uc = CreateTaxonomyUseCase {
        repo: MockCategoryRepo::with(&[("Films", "films")]),
    };

    let result = uc.execute(Some(&admin), label("Movies", "films")).await;

    assert!(
        matches!(result, Err(ApiError::Validation { field: "slug", .. })),
        "expected slug validation error, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_malformed_slug() {
    let admin = test_user(1, "admin", UserRole::Admin);
    let uc = CreateTaxonomyUseCase {
        repo: MockGenreRepo::default(),
    };

    let result = uc.execute(Some(&admin), label("Sci-Fi", "sci fi")).await;

    assert!(
        matches!(result, Err(ApiError::Validation { field: "slug", .. })),
        "expected slug validation error, got {result:?}"
    );
}

#[tokio::test]
async fn should_rename_and_reslug() {
    let admin = test_user(1, "admin", UserRole::Admin);
    let repo = MockGenreRepo::with(&[("Scifi", "scifi")]);
    let uc = UpdateTaxonomyUseCase { repo: repo.clone() };

    let entry = uc
        .execute(
            Some(&admin),
            "scifi",
            TaxonomyPatch {
                name: Some("Science fiction".to_owned()),
                slug: Some("science-fiction".to_owned()),
            },
        )
        .await
        .unwrap();

    assert_eq!(entry.label, label("Science fiction", "science-fiction"));
    let found = GetTaxonomyUseCase { repo }
        .execute("science-fiction")
        .await
        .unwrap();
    assert_eq!(found.id, entry.id);
}

#[tokio::test]
async fn should_report_kind_specific_not_found() {
    let admin = test_user(1, "admin", UserRole::Admin);

    let category = DeleteTaxonomyUseCase {
        repo: MockCategoryRepo::default(),
    }
    .execute(Some(&admin), "nope")
    .await;
    assert!(matches!(category, Err(ApiError::CategoryNotFound)));

    let genre = GetTaxonomyUseCase {
        repo: MockGenreRepo::default(),
    }
    .execute("nope")
    .await;
    assert!(matches!(genre, Err(ApiError::GenreNotFound)));
}
