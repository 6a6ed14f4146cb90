//! Integration tests for the HTTP layer.
//!
//! The router is exercised in-process with `tower::ServiceExt::oneshot`,
//! with multipart bodies built by hand. Upload directories and result
//! files live in per-test temporary directories.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use rust_xlsxwriter::*;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;
use xlsx2json::server::{router, AppState, ServiceConfig};
use xlsx2json::{ConverterBuilder, TransformMode};

const BOUNDARY: &str = "test-boundary-7f9a2b";

// Helper module for generating test fixtures
mod fixtures {
    use super::*;

    /// Generate a simple header + 2 data rows table
    pub fn generate_simple_table() -> Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();

        worksheet.write_string(0, 0, "Name")?;
        worksheet.write_string(0, 1, "Age")?;

        worksheet.write_string(1, 0, "Alice")?;
        worksheet.write_number(1, 1, 30)?;

        worksheet.write_string(2, 0, "Bob")?;
        worksheet.write_number(2, 1, 25)?;

        Ok(workbook.save_to_buffer()?)
    }

    /// Generate a column of log lines, one per row
    pub fn generate_log_lines(lines: &[&str]) -> Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();

        for (row, line) in lines.iter().enumerate() {
            worksheet.write_string(row as u32, 0, *line)?;
        }

        Ok(workbook.save_to_buffer()?)
    }
}

/// Build a test state rooted in `dir`, with the upload directory created
fn test_state(dir: &TempDir, mode: TransformMode, route: &str) -> AppState {
    let upload_dir = dir.path().join("uploads");
    std::fs::create_dir_all(&upload_dir).unwrap();

    let converter = ConverterBuilder::new()
        .with_transform_mode(mode)
        .build()
        .unwrap();

    AppState::new(
        ServiceConfig {
            convert_route: route.to_string(),
            upload_dir,
            result_path: dir.path().join("data.json"),
            permissive_cors: false,
            error_message: "Error while processing the file.".to_string(),
        },
        converter,
    )
}

/// Build a multipart/form-data body with a single field
fn multipart_body(field_name: &str, filename: &str, content: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            field_name, filename
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    body
}

fn post_request(route: &str, body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(route)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn response_bytes(response: axum::response::Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

#[tokio::test]
async fn test_convert_happy_path() {
    let dir = TempDir::new().unwrap();
    let state = test_state(&dir, TransformMode::Direct, "/convert");

    let excel_data = fixtures::generate_simple_table().unwrap();
    let body = multipart_body("file", "input.xlsx", &excel_data);

    let response = router(state.clone())
        .oneshot(post_request("/convert", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let value: Value = serde_json::from_slice(&response_bytes(response).await).unwrap();
    assert_eq!(
        value,
        json!([
            {"Name": "Alice", "Age": 30.0},
            {"Name": "Bob", "Age": 25.0}
        ])
    );
}

#[tokio::test]
async fn test_result_file_matches_response() {
    let dir = TempDir::new().unwrap();
    let state = test_state(&dir, TransformMode::Direct, "/convert");

    let excel_data = fixtures::generate_simple_table().unwrap();
    let body = multipart_body("file", "input.xlsx", &excel_data);

    let response = router(state.clone())
        .oneshot(post_request("/convert", body))
        .await
        .unwrap();
    let response_value: Value =
        serde_json::from_slice(&response_bytes(response).await).unwrap();

    let persisted = std::fs::read_to_string(dir.path().join("data.json")).unwrap();
    // Pretty-printed on disk, same structure as the response body
    assert!(persisted.contains('\n'));
    let persisted_value: Value = serde_json::from_str(&persisted).unwrap();
    assert_eq!(persisted_value, response_value);
}

#[tokio::test]
async fn test_uploaded_file_removed_after_success() {
    let dir = TempDir::new().unwrap();
    let state = test_state(&dir, TransformMode::Direct, "/convert");

    let excel_data = fixtures::generate_simple_table().unwrap();
    let body = multipart_body("file", "input.xlsx", &excel_data);

    let response = router(state.clone())
        .oneshot(post_request("/convert", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let leftover: Vec<_> = std::fs::read_dir(dir.path().join("uploads"))
        .unwrap()
        .collect();
    assert!(leftover.is_empty());
}

#[tokio::test]
async fn test_missing_file_field_returns_400() {
    let dir = TempDir::new().unwrap();
    let state = test_state(&dir, TransformMode::Direct, "/convert");

    let body = multipart_body("other", "input.xlsx", b"irrelevant");

    let response = router(state.clone())
        .oneshot(post_request("/convert", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_bytes(response).await;
    assert_eq!(body, b"No file uploaded.");
    // Nothing was persisted
    assert!(!dir.path().join("data.json").exists());
}

#[tokio::test]
async fn test_unparseable_upload_returns_500() {
    let dir = TempDir::new().unwrap();
    let state = test_state(&dir, TransformMode::Direct, "/convert");

    let body = multipart_body("file", "input.xlsx", b"this is not a spreadsheet");

    let response = router(state.clone())
        .oneshot(post_request("/convert", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = response_bytes(response).await;
    assert_eq!(body, b"Error while processing the file.");
    assert!(!dir.path().join("data.json").exists());
}

#[tokio::test]
async fn test_result_is_404_before_first_conversion() {
    let dir = TempDir::new().unwrap();
    let state = test_state(&dir, TransformMode::Direct, "/convert");

    let response = router(state.clone())
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/result")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_result_serves_persisted_file() {
    let dir = TempDir::new().unwrap();
    let state = test_state(&dir, TransformMode::Direct, "/convert");

    let excel_data = fixtures::generate_simple_table().unwrap();
    let body = multipart_body("file", "input.xlsx", &excel_data);
    let convert_response = router(state.clone())
        .oneshot(post_request("/convert", body))
        .await
        .unwrap();
    let converted: Value =
        serde_json::from_slice(&response_bytes(convert_response).await).unwrap();

    let response = router(state.clone())
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/result")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let served: Value = serde_json::from_slice(&response_bytes(response).await).unwrap();
    assert_eq!(served, converted);
}

#[tokio::test]
async fn test_second_conversion_overwrites_result() {
    let dir = TempDir::new().unwrap();
    let state = test_state(&dir, TransformMode::Direct, "/convert");

    let first = fixtures::generate_simple_table().unwrap();
    router(state.clone())
        .oneshot(post_request("/convert", multipart_body("file", "a.xlsx", &first)))
        .await
        .unwrap();

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.write_string(0, 0, "Only").unwrap();
    worksheet.write_string(1, 0, "row").unwrap();
    let second = workbook.save_to_buffer().unwrap();

    router(state.clone())
        .oneshot(post_request("/convert", multipart_body("file", "b.xlsx", &second)))
        .await
        .unwrap();

    let persisted: Value =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join("data.json")).unwrap())
            .unwrap();
    assert_eq!(persisted, json!([{"Only": "row"}]));
}

#[tokio::test]
async fn test_log_extraction_service() {
    let dir = TempDir::new().unwrap();
    let state = test_state(&dir, TransformMode::LogExtraction, "/upload");

    let excel_data = fixtures::generate_log_lines(&[
        r#"INFO {"event": "login", "user": "alice"}"#,
        "line without payload",
        r#"INFO {"event": "logout", "user": "alice"}"#,
    ])
    .unwrap();
    let body = multipart_body("file", "logs.xlsx", &excel_data);

    let response = router(state.clone())
        .oneshot(post_request("/upload", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let value: Value = serde_json::from_slice(&response_bytes(response).await).unwrap();
    assert_eq!(
        value,
        json!([
            {"event": "login", "user": "alice"},
            {"event": "logout", "user": "alice"}
        ])
    );
}
