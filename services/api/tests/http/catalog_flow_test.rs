use axum::http::StatusCode;
use serde_json::{Value, json};

use crate::app::TestApp;

#[tokio::test]
async fn should_manage_categories_as_admin_only() {
    let app = TestApp::spawn().await;
    let admin = app.seed_user("root", "admin").await;
    let alice = app.seed_user("alice", "user").await;

    let (name, value) = app.auth.header(alice);
    app.server
        .post("/api/v1/categories")
        .add_header(name, value)
        .json(&json!({"name": "Films", "slug": "films"}))
        .await
        .assert_status(StatusCode::FORBIDDEN);

    let (name, value) = app.auth.header(admin);
    app.server
        .post("/api/v1/categories")
        .add_header(name.clone(), value.clone())
        .json(&json!({"name": "Films", "slug": "films"}))
        .await
        .assert_status(StatusCode::CREATED);

    let duplicate = app
        .server
        .post("/api/v1/categories")
        .add_header(name.clone(), value.clone())
        .json(&json!({"name": "Movies", "slug": "films"}))
        .await;
    duplicate.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(duplicate.json::<Value>()["field"], "slug");

    let list = app.server.get("/api/v1/categories").await;
    list.assert_status_ok();
    assert_eq!(
        list.json::<Value>(),
        json!({"count": 1, "results": [{"name": "Films", "slug": "films"}]})
    );

    app.server
        .delete("/api/v1/categories/films")
        .add_header(name, value)
        .await
        .assert_status(StatusCode::NO_CONTENT);
    app.server
        .get("/api/v1/categories/films")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn should_create_filter_and_patch_titles() {
    let app = TestApp::spawn().await;
    let admin = app.seed_user("root", "admin").await;
    app.seed_category("Drama", "drama").await;
    app.seed_category("Comedy", "comedy").await;
    app.seed_genre("Thriller", "thriller").await;
    app.seed_genre("Crime", "crime").await;
    let (name, value) = app.auth.header(admin);

    let created = app
        .server
        .post("/api/v1/titles")
        .add_header(name.clone(), value.clone())
        .json(&json!({
            "name": "Pulp Fiction",
            "year": 1994,
            "category": "drama",
            "genre": ["thriller", "crime"],
        }))
        .await;
    created.assert_status(StatusCode::CREATED);
    let title = created.json::<Value>();
    assert_eq!(title["rating"], Value::Null);
    assert_eq!(title["category"], json!({"name": "Drama", "slug": "drama"}));
    assert_eq!(
        title["genre"],
        json!([{"name": "Crime", "slug": "crime"}, {"name": "Thriller", "slug": "thriller"}])
    );
    let id = title["id"].as_i64().unwrap();

    app.server
        .post("/api/v1/titles")
        .add_header(name.clone(), value.clone())
        .json(&json!({"name": "Airplane!", "year": 1980, "category": "comedy", "genre": ["crime"]}))
        .await
        .assert_status(StatusCode::CREATED);

    let by_genre = app
        .server
        .get("/api/v1/titles")
        .add_query_param("genre", "thriller")
        .await;
    by_genre.assert_status_ok();
    let body = by_genre.json::<Value>();
    assert_eq!(body["count"], 1);
    assert_eq!(body["results"][0]["id"], id);

    let by_category = app
        .server
        .get("/api/v1/titles")
        .add_query_param("category", "comedy")
        .add_query_param("per-page", 1)
        .await;
    assert_eq!(by_category.json::<Value>()["results"][0]["name"], "Airplane!");

    let patched = app
        .server
        .patch(&format!("/api/v1/titles/{id}"))
        .add_header(name, value)
        .json(&json!({"category": null, "description": "Royale with cheese"}))
        .await;
    patched.assert_status_ok();
    let body = patched.json::<Value>();
    assert_eq!(body["category"], Value::Null);
    assert_eq!(body["description"], "Royale with cheese");
    assert_eq!(body["genre"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn should_reject_unknown_genre_slug_on_title_create() {
    let app = TestApp::spawn().await;
    let admin = app.seed_user("root", "admin").await;
    let (name, value) = app.auth.header(admin);

    let res = app
        .server
        .post("/api/v1/titles")
        .add_header(name, value)
        .json(&json!({"name": "X", "year": 2000, "genre": ["nope"]}))
        .await;

    res.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>()["field"], "genre");
}

#[tokio::test]
async fn should_report_missing_title() {
    let app = TestApp::spawn().await;

    let res = app.server.get("/api/v1/titles/404").await;

    res.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(res.json::<Value>()["kind"], "TITLE_NOT_FOUND");
}

#[tokio::test]
async fn should_reject_malformed_path_id_as_json() {
    let app = TestApp::spawn().await;

    let res = app.server.get("/api/v1/titles/abc/reviews").await;

    res.assert_status(StatusCode::BAD_REQUEST);
    let body = res.json::<Value>();
    assert_eq!(body["kind"], "VALIDATION_ERROR");
    assert_eq!(body["field"], "path");
}
