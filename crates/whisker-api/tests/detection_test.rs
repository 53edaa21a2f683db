//! `/upload` integration tests: validation, classification, archive and notification.
//!
//! Run with: `cargo test -p whisker-api --test detection_test`

mod helpers;

use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};
use helpers::fixtures::{create_test_jpeg, create_test_png, upload_form};
use helpers::{setup_test_app, TestAppBuilder};
use whisker_api::ErrorResponse;
use whisker_core::models::{ChatRecord, DetectionResult};

#[tokio::test]
async fn cat_upload_is_archived_recorded_and_notified() {
    let app = setup_test_app(0.92).await;

    let response = app
        .client()
        .post("/upload")
        .multipart(upload_form(
            "cat1.jpg",
            create_test_jpeg(),
            "Tom",
            "tom.owner@example.com",
        ))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let result: DetectionResult = response.json();
    assert!(result.is_cat);
    assert_eq!(result.chat_name, "Tom");
    assert_eq!(result.message, "Cat detected!");
    assert_eq!(result.confidence, "0.92");
    assert!(result.image_url.starts_with("/static/uploads/"));
    assert!(result.image_url.ends_with("cat1.jpg"));

    assert_eq!(app.scorer.calls(), 1);
    assert_eq!(app.row_count().await, 1);
    assert_eq!(app.staged_files().len(), 1);
    assert_eq!(app.archived_files(), app.staged_files());
    assert_eq!(
        app.notifier.sent(),
        vec![("tom.owner@example.com".to_string(), "Tom".to_string())]
    );

    let records: Vec<ChatRecord> = app.client().get("/chats").await.json();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "Tom");
    assert_eq!(records[0].email, "tom.owner@example.com");
    assert!(records[0].image_path.starts_with("/static/enregistres/"));
    assert!(records[0].image_path.ends_with(&app.archived_files()[0]));
}

#[tokio::test]
async fn non_cat_upload_stays_staged_only() {
    let app = setup_test_app(0.10).await;

    let response = app
        .client()
        .post("/upload")
        .multipart(upload_form("dog1.png", create_test_png(), "Rex", "rex@example.com"))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let result: DetectionResult = response.json();
    assert!(!result.is_cat);
    assert_eq!(result.message, "No cat detected");
    assert_eq!(result.confidence, "0.10");

    assert_eq!(app.row_count().await, 0);
    assert!(app.notifier.sent().is_empty());
    assert_eq!(app.staged_files().len(), 1);
    assert!(app.archived_files().is_empty());
}

#[tokio::test]
async fn very_long_filename_is_shortened_and_processed() {
    let app = setup_test_app(0.92).await;
    let filename = format!("{}.jpg", "a".repeat(240));

    let response = app
        .client()
        .post("/upload")
        .multipart(upload_form(&filename, create_test_jpeg(), "Tom", "tom@example.com"))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let result: DetectionResult = response.json();
    assert!(result.is_cat);

    let staged = app.staged_files();
    assert_eq!(staged.len(), 1);
    assert!(staged[0].len() <= 249);
    assert!(staged[0].ends_with(".jpg"));
    assert_eq!(app.archived_files(), staged);
    assert_eq!(app.row_count().await, 1);
}

#[tokio::test]
async fn score_of_exactly_half_is_not_a_cat() {
    let app = setup_test_app(0.5).await;

    let result: DetectionResult = app
        .client()
        .post("/upload")
        .multipart(upload_form("edge.png", create_test_png(), "Edge", "e@example.com"))
        .await
        .json();

    assert!(!result.is_cat);
    assert_eq!(result.confidence, "0.50");
    assert_eq!(app.row_count().await, 0);
}

#[tokio::test]
async fn score_just_above_half_is_a_cat() {
    let app = setup_test_app(0.51).await;

    let result: DetectionResult = app
        .client()
        .post("/upload")
        .multipart(upload_form("edge.png", create_test_png(), "Edge", "e@example.com"))
        .await
        .json();

    assert!(result.is_cat);
    assert_eq!(result.confidence, "0.51");
    assert_eq!(app.row_count().await, 1);
}

#[tokio::test]
async fn disallowed_extension_redirects_without_side_effects() {
    let app = setup_test_app(0.99).await;

    let response = app
        .client()
        .post("/upload")
        .multipart(upload_form(
            "doc.txt",
            b"not an image".to_vec(),
            "Doc",
            "doc@example.com",
        ))
        .await;

    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), "/");
    assert_eq!(app.scorer.calls(), 0);
    assert!(app.staged_files().is_empty());
    assert!(app.archived_files().is_empty());
    assert_eq!(app.row_count().await, 0);
    assert!(app.notifier.sent().is_empty());
}

#[tokio::test]
async fn missing_or_unnamed_file_redirects_without_side_effects() {
    let app = setup_test_app(0.99).await;

    let no_file = MultipartForm::new()
        .add_text("name", "Ghost")
        .add_text("email", "ghost@example.com");
    let unnamed = MultipartForm::new()
        .add_part("image", Part::bytes(create_test_png()).file_name(""))
        .add_text("name", "Ghost");
    let no_extension = MultipartForm::new()
        .add_part("image", Part::bytes(create_test_png()).file_name("photo"))
        .add_text("name", "Ghost");

    for form in [no_file, unnamed, no_extension] {
        let response = app.client().post("/upload").multipart(form).await;
        assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
        assert_eq!(response.header("location"), "/");
    }

    assert_eq!(app.scorer.calls(), 0);
    assert!(app.staged_files().is_empty());
    assert_eq!(app.row_count().await, 0);
}

#[tokio::test]
async fn uppercase_extension_is_accepted() {
    let app = setup_test_app(0.80).await;

    let response = app
        .client()
        .post("/upload")
        .multipart(upload_form("CAT.JPEG", create_test_jpeg(), "Felix", "f@example.com"))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(app.scorer.calls(), 1);
}

#[tokio::test]
async fn failed_notification_does_not_change_the_result() {
    let app = TestAppBuilder::new()
        .score(0.92)
        .failing_notifier()
        .build()
        .await;

    let response = app
        .client()
        .post("/upload")
        .multipart(upload_form("cat1.jpg", create_test_jpeg(), "Tom", "tom@example.com"))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let result: DetectionResult = response.json();
    assert!(result.is_cat);
    assert_eq!(result.message, "Cat detected!");
    assert_eq!(result.confidence, "0.92");
    assert_eq!(app.row_count().await, 1);
    assert_eq!(app.notifier.sent().len(), 1);
}

#[tokio::test]
async fn classifier_failure_is_bad_gateway_and_keeps_staged_file() {
    let app = TestAppBuilder::new().failing_scorer().build().await;

    let response = app
        .client()
        .post("/upload")
        .multipart(upload_form("cat1.jpg", create_test_jpeg(), "Tom", "tom@example.com"))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_GATEWAY);
    let body: ErrorResponse = response.json();
    assert_eq!(body.code, "CLASSIFICATION_FAILED");

    assert_eq!(app.staged_files().len(), 1);
    assert!(app.archived_files().is_empty());
    assert_eq!(app.row_count().await, 0);
    assert!(app.notifier.sent().is_empty());
}

#[tokio::test]
async fn undecodable_image_is_a_classification_failure() {
    let app = setup_test_app(0.99).await;

    let response = app
        .client()
        .post("/upload")
        .multipart(upload_form(
            "broken.png",
            b"definitely not a png".to_vec(),
            "Tom",
            "tom@example.com",
        ))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_GATEWAY);
    assert_eq!(app.scorer.calls(), 0);
    assert_eq!(app.row_count().await, 0);
}

#[tokio::test]
async fn staged_upload_is_served_at_its_url() {
    let app = setup_test_app(0.10).await;
    let data = create_test_png();

    let result: DetectionResult = app
        .client()
        .post("/upload")
        .multipart(upload_form("dog1.png", data.clone(), "Rex", "rex@example.com"))
        .await
        .json();

    let served = app.client().get(&result.image_url).await;
    assert_eq!(served.status_code(), StatusCode::OK);
    assert_eq!(served.as_bytes().to_vec(), data);
}

#[tokio::test]
async fn oversized_upload_is_rejected() {
    let app = TestAppBuilder::new().score(0.99).max_file_size_mb(1).build().await;

    let response = app
        .client()
        .post("/upload")
        .multipart(upload_form(
            "huge.png",
            vec![0u8; 2 * 1024 * 1024],
            "Big",
            "big@example.com",
        ))
        .await;

    assert_eq!(response.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(app.scorer.calls(), 0);
    assert_eq!(app.row_count().await, 0);
}
