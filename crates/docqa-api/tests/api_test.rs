//! End-to-end HTTP tests against the router with in-memory stores and
//! stub providers

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use docqa_api::{create_router, AppState};
use docqa_core::config::AppConfig;
use docqa_core::error::ProviderError;
use docqa_llm::{Embedder, Generator};
use docqa_store::{MemoryChunkStore, MemoryDocumentStore};
use serde_json::{json, Value};
use tower::ServiceExt;

const BOUNDARY: &str = "docqa-test-boundary";

/// Embeds text as counts of a few keywords
struct StubEmbedder {
    fail: bool,
}

#[async_trait]
impl Embedder for StubEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, ProviderError> {
        if self.fail {
            return Err(ProviderError::Api { status: 503, message: "Model is loading".to_string() });
        }
        let lower = text.to_lowercase();
        Ok(["cat", "rocket", "bread"]
            .iter()
            .map(|k| lower.matches(k).count() as f32 + 0.01)
            .collect())
    }

    fn model_name(&self) -> &str {
        "stub-embedder"
    }
}

struct StubGenerator;

#[async_trait]
impl Generator for StubGenerator {
    async fn generate(&self, _prompt: &str) -> Result<Option<String>, ProviderError> {
        Ok(Some("The cat sat on the mat.".to_string()))
    }

    fn model_name(&self) -> &str {
        "stub-generator"
    }
}

fn app_with(embedder: StubEmbedder) -> Router {
    let state = AppState::new(
        AppConfig::with_defaults(),
        Arc::new(MemoryDocumentStore::new()),
        Arc::new(MemoryChunkStore::new()),
        Arc::new(embedder),
        Arc::new(StubGenerator),
    )
    .unwrap();
    create_router(Arc::new(state))
}

fn app() -> Router {
    app_with(StubEmbedder { fail: false })
}

/// (field name, file name, content type, content)
fn multipart(parts: &[(&str, &str, &str, &str)]) -> Request<Body> {
    let parts: Vec<(&str, &str, &str, &[u8])> = parts
        .iter()
        .map(|(field, filename, content_type, content)| {
            (*field, *filename, *content_type, content.as_bytes())
        })
        .collect();
    multipart_bytes(&parts)
}

fn multipart_bytes(parts: &[(&str, &str, &str, &[u8])]) -> Request<Body> {
    let mut body = Vec::new();
    for (field, filename, content_type, content) in parts {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(content);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri("/api/documents/upload")
        .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={BOUNDARY}"))
        .body(Body::from(body))
        .unwrap()
}

fn ask(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/qa/ask")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn fetch() -> Request<Body> {
    Request::builder().uri("/api/documents/fetch").body(Body::empty()).unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
    (status, body)
}

#[tokio::test]
async fn test_health_check_sets_isolation_headers() {
    let response = app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["cross-origin-embedder-policy"], "require-corp");
    assert_eq!(response.headers()["cross-origin-opener-policy"], "same-origin");

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, json!({"status": "ok", "service": "docqa-api"}));
}

#[tokio::test]
async fn test_upload_short_text_yields_one_chunk() {
    let app = app();
    let text = "The cat sat on the mat. It was very happy.";

    let (status, body) =
        send(&app, multipart(&[("documents", "cat.txt", "text/plain", text)])).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Documents processed successfully");
    let documents = body["documents"].as_array().unwrap();
    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0]["name"], "cat.txt");
    assert_eq!(documents[0]["chunksCount"], 1);
    assert_eq!(documents[0]["textLength"], text.len());
    assert!(documents[0]["documentId"].as_str().is_some());
}

#[tokio::test]
async fn test_fetch_lists_uploaded_documents() {
    let app = app();
    send(
        &app,
        multipart(&[
            ("documents", "cat.txt", "text/plain", "A cat."),
            ("documents", "bread.txt", "application/octet-stream", "Fresh bread. Warm bread."),
        ]),
    )
    .await;

    let (status, body) = send(&app, fetch()).await;

    assert_eq!(status, StatusCode::OK);
    let documents = body["documents"].as_array().unwrap();
    assert_eq!(documents.len(), 2);
    for document in documents {
        assert_eq!(document["type"], "text/plain");
        assert_eq!(document["chunksCount"], 1);
        assert!(document["createdAt"].as_str().is_some());
    }
}

#[tokio::test]
async fn test_upload_skips_unsupported_files() {
    let app = app();

    let (status, body) =
        send(&app, multipart(&[("documents", "photo.png", "image/png", "not text")])).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["documents"], json!([]));
}

#[tokio::test]
async fn test_upload_declared_type_wins_over_extension() {
    let app = app();

    let (status, body) =
        send(&app, multipart(&[("documents", "x.txt", "image/png", "A cat.")])).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["documents"], json!([]));
}

#[tokio::test]
async fn test_upload_latin1_text_is_decoded_lossily() {
    let app = app();

    let (status, body) = send(
        &app,
        multipart_bytes(&[("documents", "menu.txt", "text/plain", b"Caf\xe9 au lait.")]),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let documents = body["documents"].as_array().unwrap();
    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0]["chunksCount"], 1);
    assert_eq!(documents[0]["textLength"], "Caf\u{fffd} au lait.".chars().count());
}

#[tokio::test]
async fn test_upload_without_files_is_bad_request() {
    let app = app();

    let (status, body) =
        send(&app, multipart(&[("attachment", "cat.txt", "text/plain", "A cat.")])).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "No files uploaded");
}

#[tokio::test]
async fn test_upload_more_than_ten_files_is_bad_request() {
    let app = app();
    let parts: Vec<(&str, &str, &str, &str)> =
        (0..11).map(|_| ("documents", "note.txt", "text/plain", "A note.")).collect();

    let (status, body) = send(&app, multipart(&parts)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Too many files");

    let (_, listed) = send(&app, fetch()).await;
    assert_eq!(listed["documents"], json!([]));
}

#[tokio::test]
async fn test_embedding_failure_returns_500_and_rolls_back() {
    let app = app_with(StubEmbedder { fail: true });

    let (status, body) = send(
        &app,
        multipart(&[("documents", "cat.txt", "text/plain", "The cat sat. The cat slept.")]),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Document processing failed");
    assert!(body["details"].as_str().unwrap().contains("Model is loading"));

    let (_, listed) = send(&app, fetch()).await;
    assert_eq!(listed["documents"], json!([]));
}

#[tokio::test]
async fn test_ask_unknown_documents_is_not_found() {
    let app = app();

    let (status, body) = send(
        &app,
        ask(json!({
            "documentIds": ["7f1c2a4e-9a51-4f5d-8d3e-2b6f0c1d9e77"],
            "question": "What did the cat do?"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "No relevant data found in selected documents.");
}

#[tokio::test]
async fn test_ask_with_malformed_ids_is_not_found() {
    let app = app();

    let (status, _) =
        send(&app, ask(json!({"documentIds": ["not-a-uuid"], "question": "Why?"}))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_ask_requires_ids_and_question() {
    let app = app();

    let (no_ids, body) = send(&app, ask(json!({"question": "Why?"}))).await;
    assert_eq!(no_ids, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Document IDs and question are required");

    let (no_question, _) = send(&app, ask(json!({"documentIds": ["x"]}))).await;
    assert_eq!(no_question, StatusCode::BAD_REQUEST);

    let (blank_question, _) =
        send(&app, ask(json!({"documentIds": ["x"], "question": "  "}))).await;
    assert_eq!(blank_question, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_ask_with_empty_id_list_is_not_found() {
    let app = app();
    send(&app, multipart(&[("documents", "cat.txt", "text/plain", "A cat.")])).await;

    let (status, body) = send(&app, ask(json!({"documentIds": [], "question": "Why?"}))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "No relevant data found in selected documents.");
}

#[tokio::test]
async fn test_ask_malformed_json_is_bad_request() {
    let app = app();
    let request = Request::builder()
        .method("POST")
        .uri("/api/qa/ask")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid request body");
}

#[tokio::test]
async fn test_upload_then_ask() {
    let app = app();
    let (_, uploaded) = send(
        &app,
        multipart(&[(
            "documents",
            "story.txt",
            "text/plain",
            "The cat sat on the mat. The rocket launched at dawn. The bread was fresh.",
        )]),
    )
    .await;
    let document_id = uploaded["documents"][0]["documentId"].clone();

    let (status, body) = send(
        &app,
        ask(json!({"documentIds": [document_id], "question": "Where did the cat sit?"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["answer"], "The cat sat on the mat.");
    assert_eq!(body["relevantChunksCount"], 1);
}
