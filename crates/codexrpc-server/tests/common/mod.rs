//! Shared fixtures for codexrpc-server integration tests.

// Each test binary uses a different subset of these helpers
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use codexrpc_core::{
    CompletionChoice, CompletionError, CompletionParams, CompletionPort, CompletionResult,
};
use codexrpc_server::{Translator, TranslatorConfig, create_router};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

/// Text every successful stub completion returns.
pub const STUB_TEXT: &str = "fn main() {}";

/// Deterministic backend that records the params of every call.
#[derive(Debug)]
pub struct StubBackend {
    outcome: Result<CompletionResult, CompletionError>,
    calls: Mutex<Vec<CompletionParams>>,
}

impl StubBackend {
    pub fn succeeding() -> Self {
        Self::returning(CompletionResult {
            id: "cmpl-stub".to_string(),
            object: "text_completion".to_string(),
            created: 1_700_000_000,
            model: "stub-model".to_string(),
            choices: vec![CompletionChoice {
                text: STUB_TEXT.to_string(),
                index: 0,
                finish_reason: Some("stop".to_string()),
            }],
            usage: None,
        })
    }

    pub fn returning(result: CompletionResult) -> Self {
        Self {
            outcome: Ok(result),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: CompletionError) -> Self {
        Self {
            outcome: Err(error),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<CompletionParams> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionPort for StubBackend {
    async fn complete(
        &self,
        params: &CompletionParams,
    ) -> Result<CompletionResult, CompletionError> {
        self.calls.lock().unwrap().push(params.clone());
        self.outcome.clone()
    }
}

/// Router wired to `backend` with default translator settings.
pub fn router(backend: Arc<StubBackend>) -> Router {
    let translator = Translator::new(backend, TranslatorConfig::default());
    create_router(Arc::new(translator))
}

/// POST `body` to `/` and return the status and parsed JSON body.
pub async fn post(app: Router, body: impl Into<Body>) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/")
                .header("content-type", "application/json")
                .body(body.into())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

/// POST a JSON value to `/`.
pub async fn post_json(app: Router, body: &Value) -> (StatusCode, Value) {
    post(app, body.to_string()).await
}
