//! Integration tests for the HTTP API

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use clausewise::{AnalyzerConfig, ContractAnalyzer};
use clausewise_http::{AppState, HttpConfig, router};
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

const CONTRACT: &str = "1. Term. This agreement automatically renews for successive one year periods unless terminated by either party. \
2. Fees. The customer shall pay a penalty fee of 2% per month on late invoices. \
3. Liability. The supplier accepts unlimited liability for all claims arising under this agreement.";

const CLEAN_CONTRACT: &str = "1. Services. The supplier provides consulting services to the customer as described in each statement of work. \
2. Notices. All notices are given in writing to the addresses listed above.";

const BOUNDARY: &str = "clausewise-test-boundary";

/// Helper to create test app
fn create_test_app(upload_dir: &TempDir, max_body_size: usize) -> Router {
    let analyzer = ContractAnalyzer::from_config(&AnalyzerConfig::default()).unwrap();
    let config = HttpConfig {
        upload_dir: upload_dir.path().to_path_buf(),
        max_body_size,
        ..HttpConfig::default()
    };
    router(AppState::new(analyzer, config))
}

fn multipart_request(field: &str, filename: &str, content: &str) -> Request<Body> {
    let body = format!(
        "--{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n\
         Content-Type: application/octet-stream\r\n\r\n\
         {content}\r\n\
         --{BOUNDARY}--\r\n"
    );
    Request::builder()
        .method("POST")
        .uri("/api/analyze")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

fn json_request(body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/analyze/text")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap()
}

fn upload_dir_entries(dir: &TempDir) -> usize {
    std::fs::read_dir(dir.path()).unwrap().count()
}

async fn read_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_health_endpoint_returns_ok() {
    let dir = TempDir::new().unwrap();
    let response = create_test_app(&dir, 1024 * 1024)
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = read_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["service"], "clausewise");
    assert_eq!(json["knowledge_version"], "1.0.0");
    assert_eq!(json["llm_enabled"], false);
}

#[tokio::test]
async fn test_upload_is_saved_and_analyzed() {
    let dir = TempDir::new().unwrap();
    let response = create_test_app(&dir, 1024 * 1024)
        .oneshot(multipart_request("file", "../My Contract.txt", CONTRACT))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = read_json(response).await;
    assert_eq!(json["filename"], "My_Contract.txt");
    let risks = json["risks"].as_array().unwrap();
    assert!(risks.len() >= 3);
    assert_eq!(json["risk_count"], risks.len());
    assert_eq!(json["risk_summary"]["overall_risk_level"], "high");
    assert!(json.get("llm_analysis").is_none());
    assert_eq!(upload_dir_entries(&dir), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_uploads_with_same_name_stay_separate() {
    let dir = TempDir::new().unwrap();
    let app = create_test_app(&dir, 1024 * 1024);

    for _ in 0..20 {
        let (risky, clean) = tokio::join!(
            app.clone()
                .oneshot(multipart_request("file", "contract.txt", CONTRACT)),
            app.clone()
                .oneshot(multipart_request("file", "contract.txt", CLEAN_CONTRACT)),
        );

        let risky = read_json(risky.unwrap()).await;
        let clean = read_json(clean.unwrap()).await;

        assert_eq!(risky["filename"], "contract.txt");
        assert_eq!(clean["filename"], "contract.txt");
        assert_eq!(risky["risk_summary"]["overall_risk_level"], "high");
        assert_eq!(clean["risk_count"], 0);
    }

    assert_eq!(upload_dir_entries(&dir), 0);
}

#[tokio::test]
async fn test_upload_rejects_disallowed_extension() {
    let dir = TempDir::new().unwrap();
    let response = create_test_app(&dir, 1024 * 1024)
        .oneshot(multipart_request("file", "payload.exe", "MZ"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(read_json(response).await["error"], "File type not allowed");
}

#[tokio::test]
async fn test_upload_without_file_field() {
    let dir = TempDir::new().unwrap();
    let response = create_test_app(&dir, 1024 * 1024)
        .oneshot(multipart_request("document", "contract.txt", CONTRACT))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(read_json(response).await["error"], "No file provided");
}

#[tokio::test]
async fn test_upload_of_unreadable_doc_is_client_error() {
    let dir = TempDir::new().unwrap();
    let response = create_test_app(&dir, 1024 * 1024)
        .oneshot(multipart_request("file", "legacy.doc", "binary"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error = read_json(response).await["error"].as_str().unwrap().to_string();
    assert!(error.contains("not implemented"));
}

#[tokio::test]
async fn test_text_analysis() {
    let dir = TempDir::new().unwrap();
    let body = json!({ "text": CONTRACT }).to_string();
    let response = create_test_app(&dir, 1024 * 1024)
        .oneshot(json_request(body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = read_json(response).await;
    assert_eq!(json["filename"], "inline.txt");
    assert_eq!(json["total_clauses"], json["clauses"].as_array().unwrap().len());
}

#[tokio::test]
async fn test_short_text_is_bad_request() {
    let dir = TempDir::new().unwrap();
    let body = json!({ "filename": "nda.txt", "text": "Too short." }).to_string();
    let response = create_test_app(&dir, 1024 * 1024)
        .oneshot(json_request(body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error = read_json(response).await["error"].as_str().unwrap().to_string();
    assert!(error.contains("too short"));
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let dir = TempDir::new().unwrap();
    let response = create_test_app(&dir, 1024 * 1024)
        .oneshot(json_request("{\"text\": ".to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(read_json(response).await["error"].is_string());
}

#[tokio::test]
async fn test_oversized_body_is_rejected() {
    let dir = TempDir::new().unwrap();
    let body = json!({ "text": CONTRACT }).to_string();
    let response = create_test_app(&dir, 64)
        .oneshot(json_request(body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert!(read_json(response).await["error"].is_string());
}
