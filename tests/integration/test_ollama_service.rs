//! Integration tests for the Ollama client against a local mock server

use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use chrono::Utc;
use dinner_decider_api::config::OllamaConfig;
use dinner_decider_api::models::Ingredient;
use dinner_decider_api::services::ollama_service::NO_INGREDIENTS_PLACEHOLDER;
use dinner_decider_api::services::{OllamaService, RecipeGenerationError, RecipeGenerator};
use serde_json::{Value, json};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

type Captured = Arc<Mutex<Vec<Value>>>;

#[derive(Clone)]
struct MockState {
    status: StatusCode,
    body: String,
    delay: Duration,
    captured: Captured,
}

async fn generate(State(state): State<MockState>, Json(request): Json<Value>) -> (StatusCode, String) {
    state.captured.lock().await.push(request);
    if !state.delay.is_zero() {
        tokio::time::sleep(state.delay).await;
    }
    (state.status, state.body.clone())
}

/// Start a mock `/api/generate` endpoint and return its address.
async fn start_mock(status: StatusCode, body: String, delay: Duration) -> (SocketAddr, Captured) {
    let captured: Captured = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route("/api/generate", post(generate))
        .with_state(MockState {
            status,
            body,
            delay,
            captured: captured.clone(),
        });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr, captured)
}

fn envelope(response: &str) -> String {
    json!({
        "model": "llama2",
        "created_at": "2024-01-15T18:00:00Z",
        "response": response,
        "done": true
    })
    .to_string()
}

fn client(addr: SocketAddr, timeout_secs: u64) -> OllamaService {
    OllamaService::new(&OllamaConfig {
        endpoint: format!("http://{}", addr),
        model: "llama2".to_string(),
        timeout_secs,
    })
    .unwrap()
}

fn carrot() -> Ingredient {
    let now = Utc::now();
    Ingredient {
        id: 1,
        name: "carrot".to_string(),
        quantity: "2".to_string(),
        purchase_date: None,
        created_at: now,
        updated_at: now,
    }
}

const RECIPES: &str = r#"{"suggestions":[{"name":"Carrot soup","steps":["Chop","Simmer","Blend"],"missing_items":["cream"]},{"name":"Carrot salad","steps":["Grate"],"missing_items":[]}]}"#;

#[tokio::test]
async fn test_generate_parses_suggestions() {
    let (addr, captured) = start_mock(StatusCode::OK, envelope(RECIPES), Duration::ZERO).await;

    let response = client(addr, 5).generate(&[carrot()]).await.unwrap();

    assert_eq!(response.suggestions.len(), 2);
    assert_eq!(response.suggestions[0].name, "Carrot soup");
    assert_eq!(response.suggestions[0].steps.len(), 3);
    assert_eq!(response.suggestions[0].missing_items, vec!["cream"]);
    assert!(response.suggestions[1].missing_items.is_empty());

    let requests = captured.lock().await;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0]["model"], "llama2");
    assert_eq!(requests[0]["stream"], false);
    assert_eq!(requests[0]["format"], "json");
    let prompt = requests[0]["prompt"].as_str().unwrap();
    assert!(prompt.contains("carrot(2)"));
}

#[tokio::test]
async fn test_empty_ingredient_list_uses_placeholder() {
    let (addr, captured) = start_mock(
        StatusCode::OK,
        envelope(r#"{"suggestions":[]}"#),
        Duration::ZERO,
    )
    .await;

    let response = client(addr, 5).generate(&[]).await.unwrap();
    assert!(response.suggestions.is_empty());

    let requests = captured.lock().await;
    let prompt = requests[0]["prompt"].as_str().unwrap();
    assert!(prompt.contains(NO_INGREDIENTS_PLACEHOLDER));
}

#[tokio::test]
async fn test_missing_suggestions_key_yields_empty_list() {
    let (addr, _) = start_mock(StatusCode::OK, envelope("{}"), Duration::ZERO).await;

    let response = client(addr, 5).generate(&[carrot()]).await.unwrap();
    assert!(response.suggestions.is_empty());
}

#[tokio::test]
async fn test_error_status_is_unavailable() {
    let (addr, _) = start_mock(
        StatusCode::INTERNAL_SERVER_ERROR,
        "model not loaded".to_string(),
        Duration::ZERO,
    )
    .await;

    let err = client(addr, 5).generate(&[carrot()]).await.unwrap_err();
    match &err {
        RecipeGenerationError::UpstreamStatus { status, body } => {
            assert_eq!(*status, 500);
            assert_eq!(body, "model not loaded");
        }
        other => panic!("expected upstream status error, got {:?}", other),
    }
    assert!(err.is_unavailable());
}

#[tokio::test]
async fn test_malformed_envelope() {
    let (addr, _) = start_mock(StatusCode::OK, "not json".to_string(), Duration::ZERO).await;

    let err = client(addr, 5).generate(&[carrot()]).await.unwrap_err();
    assert!(matches!(err, RecipeGenerationError::MalformedEnvelope(_)));
    assert!(!err.is_unavailable());
}

#[tokio::test]
async fn test_malformed_model_output() {
    let (addr, _) = start_mock(
        StatusCode::OK,
        envelope("Here are some ideas: soup"),
        Duration::ZERO,
    )
    .await;

    let err = client(addr, 5).generate(&[carrot()]).await.unwrap_err();
    assert!(matches!(err, RecipeGenerationError::MalformedContent(_)));
    assert!(!err.is_unavailable());
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_error() {
    // Bind then drop to get a port nothing listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(addr, 5).generate(&[carrot()]).await.unwrap_err();
    assert!(matches!(err, RecipeGenerationError::Transport { .. }));
    assert!(err.is_unavailable());
}

#[tokio::test]
async fn test_slow_backend_times_out() {
    let (addr, _) = start_mock(StatusCode::OK, envelope(RECIPES), Duration::from_secs(5)).await;

    let err = client(addr, 1).generate(&[carrot()]).await.unwrap_err();
    assert!(err.is_timeout());
    assert!(err.is_unavailable());
}
