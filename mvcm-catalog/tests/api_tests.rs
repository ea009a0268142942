//! Integration tests for mvcm-catalog HTTP endpoints
//!
//! Each test builds the full router over a fresh in-memory database and
//! drives it with `oneshot` requests.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
};
use http_body_util::BodyExt;
use mvcm_catalog::{build_router, AppState};
use mvcm_common::db::{create_movie_table, seed_movies};
use serde_json::Value;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tower::util::ServiceExt; // for `oneshot` method

/// Test helper: single-connection in-memory database, optionally with the movie table
async fn setup_test_db(with_table: bool) -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Should open in-memory database");

    if with_table {
        create_movie_table(&pool)
            .await
            .expect("Should create movie table");
    }
    pool
}

fn setup_app(db: SqlitePool) -> axum::Router {
    build_router(AppState::new(db))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Should read body")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("Body should be UTF-8")
}

fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}

async fn movie_count(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM movie")
        .fetch_one(pool)
        .await
        .unwrap()
}

// =============================================================================
// Health and root
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let app = setup_app(setup_test_db(true).await);

    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "mvcm-catalog");
    assert_eq!(body["database"], true);
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_root_redirects_to_list() {
    let app = setup_app(setup_test_db(true).await);

    let response = app.oneshot(get("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/movies");
}

// =============================================================================
// List
// =============================================================================

#[tokio::test]
async fn test_list_shows_seeded_movies_and_genres() {
    let db = setup_test_db(true).await;
    seed_movies(&db).await.unwrap();
    let app = setup_app(db);

    let response = app.oneshot(get("/movies")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let page = body_text(response).await;
    assert!(page.contains("When Harry Met Sally"));
    assert!(page.contains("Rio Bravo"));
    assert!(page.contains(r#"<option value="Western">Western</option>"#));
}

#[tokio::test]
async fn test_list_filters_and_echoes_parameters() {
    let db = setup_test_db(true).await;
    seed_movies(&db).await.unwrap();
    let app = setup_app(db);

    let response = app
        .oneshot(get("/movies?movie_genre=Comedy&search_string=ghost&release_year=1986"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let page = body_text(response).await;
    assert!(page.contains("Ghostbusters 2"));
    assert!(!page.contains("When Harry Met Sally"));
    assert!(!page.contains("Rio Bravo"));
    assert!(page.contains(r#"<option value="Comedy" selected>Comedy</option>"#));
    assert!(page.contains(r#"name="search_string" value="ghost""#));
    assert!(page.contains(r#"name="release_year" value="1986""#));
}

#[tokio::test]
async fn test_list_repairs_missing_genre_and_rating() {
    let db = setup_test_db(true).await;
    sqlx::query(
        "INSERT INTO movie (title, release_date, genre, price, rating) VALUES ('Orphan', '2001-01-01', NULL, 5.0, NULL)",
    )
    .execute(&db)
    .await
    .unwrap();
    let app = setup_app(db.clone());

    let response = app.oneshot(get("/movies")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let page = body_text(response).await;
    assert!(page.contains("Orphan"));
    assert!(page.contains("Unknown"));
    assert!(page.contains("Unrated"));

    let (genre, rating): (String, String) =
        sqlx::query_as("SELECT genre, rating FROM movie WHERE title = 'Orphan'")
            .fetch_one(&db)
            .await
            .unwrap();
    assert_eq!(genre, "Unknown");
    assert_eq!(rating, "Unrated");
}

#[tokio::test]
async fn test_list_without_table_is_server_error() {
    let app = setup_app(setup_test_db(false).await);

    let response = app.oneshot(get("/movies")).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_text(response).await.contains("500"));
}

// =============================================================================
// Details
// =============================================================================

#[tokio::test]
async fn test_details_found() {
    let db = setup_test_db(true).await;
    seed_movies(&db).await.unwrap();
    let app = setup_app(db);

    let response = app.oneshot(get("/movies/details/4")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let page = body_text(response).await;
    assert!(page.contains("Rio Bravo"));
    assert!(page.contains("1959-04-15"));
}

#[tokio::test]
async fn test_details_of_unrepaired_row_shows_placeholders() {
    let db = setup_test_db(true).await;
    sqlx::query(
        "INSERT INTO movie (title, release_date, genre, price, rating) VALUES ('Orphan', '2001-01-01', NULL, 5.0, NULL)",
    )
    .execute(&db)
    .await
    .unwrap();
    let app = setup_app(db);

    let response = app.oneshot(get("/movies/details/1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let page = body_text(response).await;
    assert!(page.contains("<dt>Genre</dt><dd>Unknown</dd>"));
    assert!(page.contains("<dt>Rating</dt><dd>Unrated</dd>"));
}

#[tokio::test]
async fn test_details_missing_unknown_or_malformed_id_is_not_found() {
    let db = setup_test_db(true).await;
    seed_movies(&db).await.unwrap();
    let app = setup_app(db);

    for uri in ["/movies/details", "/movies/details/999", "/movies/details/abc"] {
        let response = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{}", uri);
    }
}

// =============================================================================
// Create
// =============================================================================

#[tokio::test]
async fn test_create_form_renders() {
    let app = setup_app(setup_test_db(true).await);

    let response = app.oneshot(get("/movies/create")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains(r#"action="/movies/create""#));
}

#[tokio::test]
async fn test_create_ignores_posted_id() {
    let db = setup_test_db(true).await;
    let app = setup_app(db.clone());

    let response = app
        .oneshot(post_form(
            "/movies/create",
            "id=999&title=Alien&release_date=1979-05-25&genre=Horror&price=9.99&rating=R",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/movies");

    let ids: Vec<i64> = sqlx::query_scalar("SELECT id FROM movie")
        .fetch_all(&db)
        .await
        .unwrap();
    assert_eq!(ids, vec![1]);
}

#[tokio::test]
async fn test_create_invalid_redisplays_form() {
    let db = setup_test_db(true).await;
    let app = setup_app(db.clone());

    let response = app
        .oneshot(post_form(
            "/movies/create",
            "title=Al&release_date=1979-05-25&genre=horror&price=500&rating=R",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let page = body_text(response).await;
    assert!(page.contains("Please correct the errors below."));
    assert!(page.contains(r#"name="title" type="text" value="Al""#));
    assert_eq!(movie_count(&db).await, 0);
}

// =============================================================================
// Edit
// =============================================================================

#[tokio::test]
async fn test_edit_form_prefilled() {
    let db = setup_test_db(true).await;
    seed_movies(&db).await.unwrap();
    let app = setup_app(db);

    let response = app.oneshot(get("/movies/edit/2")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let page = body_text(response).await;
    assert!(page.contains(r#"name="title" type="text" value="Ghostbusters""#));
    assert!(page.contains(r#"<input type="hidden" name="id" value="2">"#));
}

#[tokio::test]
async fn test_edit_submit_updates_and_redirects() {
    let db = setup_test_db(true).await;
    seed_movies(&db).await.unwrap();
    let app = setup_app(db.clone());

    let response = app
        .oneshot(post_form(
            "/movies/edit/2",
            "id=2&title=Ghostbusters+Remastered&release_date=1984-03-13&genre=Comedy&price=12.5&rating=PG",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/movies");

    let (title, price): (String, f64) = sqlx::query_as("SELECT title, price FROM movie WHERE id = 2")
        .fetch_one(&db)
        .await
        .unwrap();
    assert_eq!(title, "Ghostbusters Remastered");
    assert_eq!(price, 12.5);
}

#[tokio::test]
async fn test_edit_submit_mismatched_id_is_not_found() {
    let db = setup_test_db(true).await;
    seed_movies(&db).await.unwrap();
    let app = setup_app(db.clone());

    let response = app
        .oneshot(post_form(
            "/movies/edit/2",
            "id=3&title=Hijacked&release_date=1984-03-13&genre=Comedy&price=1&rating=PG",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let titles: Vec<String> = sqlx::query_scalar("SELECT title FROM movie WHERE title = 'Hijacked'")
        .fetch_all(&db)
        .await
        .unwrap();
    assert!(titles.is_empty());
}

#[tokio::test]
async fn test_edit_submit_invalid_redisplays_form() {
    let db = setup_test_db(true).await;
    seed_movies(&db).await.unwrap();
    let app = setup_app(db);

    let response = app
        .oneshot(post_form(
            "/movies/edit/1",
            "id=1&title=When+Harry+Met+Sally&release_date=not-a-date&genre=Romantic+Comedy&price=7.99&rating=R",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let page = body_text(response).await;
    assert!(page.contains(r#"action="/movies/edit/1""#));
    assert!(page.contains(r#"value="not-a-date""#));
}

#[tokio::test]
async fn test_edit_submit_for_deleted_movie_is_not_found() {
    let db = setup_test_db(true).await;
    let app = setup_app(db);

    let response = app
        .oneshot(post_form(
            "/movies/edit/7",
            "id=7&title=Gone+Movie&release_date=2000-01-01&genre=Drama&price=3&rating=PG",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// Delete
// =============================================================================

#[tokio::test]
async fn test_delete_confirmation_page() {
    let db = setup_test_db(true).await;
    seed_movies(&db).await.unwrap();
    let app = setup_app(db);

    let response = app.clone().oneshot(get("/movies/delete/3")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Ghostbusters 2"));

    let response = app.oneshot(get("/movies/delete/999")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_submit_removes_and_tolerates_missing() {
    let db = setup_test_db(true).await;
    seed_movies(&db).await.unwrap();
    let app = setup_app(db.clone());

    let response = app
        .clone()
        .oneshot(post_form("/movies/delete/3", ""))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(movie_count(&db).await, 3);

    let response = app
        .oneshot(post_form("/movies/delete/3", ""))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/movies");
    assert_eq!(movie_count(&db).await, 3);
}
