//! Route-level tests for the JSON-RPC endpoint.
//!
//! These drive the real axum router with a stub completion backend.

mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use codexrpc_core::{
    CompletionChoice, CompletionError, CompletionParams, CompletionResult, DEFAULT_MODEL, Usage,
};
use serde_json::json;
use tower::ServiceExt;

use common::{STUB_TEXT, StubBackend, post, post_json, router};

#[tokio::test]
async fn complete_returns_result_and_echoes_id() {
    let backend = Arc::new(StubBackend::succeeding());
    let app = router(backend.clone());

    let (status, body) = post_json(
        app,
        &json!({
            "jsonrpc": "2.0",
            "method": "complete",
            "id": 42,
            "params": {"prompt": "hello"}
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["jsonrpc"], "2.0");
    assert_eq!(body["id"], json!(42));
    assert_eq!(body["result"]["choices"][0]["text"], STUB_TEXT);
    assert_eq!(body["result"]["object"], "text_completion");
    assert!(body.get("error").is_none());

    let calls = backend.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].prompt, json!("hello"));
}

#[tokio::test]
async fn id_is_echoed_with_type_preserved() {
    let backend = Arc::new(StubBackend::succeeding());
    let app = router(backend);

    for id in [json!(7), json!(-3), json!("abc-123"), json!(1.5), json!(0)] {
        let (status, body) = post_json(
            app.clone(),
            &json!({"jsonrpc": "2.0", "method": "complete", "id": id}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], id, "id {id} was not echoed exactly");
    }
}

#[tokio::test]
async fn malformed_json_is_rejected() {
    let backend = Arc::new(StubBackend::succeeding());
    let (status, body) = post(router(backend.clone()), "{\"jsonrpc\": \"2.0\",").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"detail": "Invalid JSON payload"}));
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn wrong_version_is_rejected() {
    let backend = Arc::new(StubBackend::succeeding());
    let (status, body) = post_json(
        router(backend.clone()),
        &json!({"jsonrpc": "1.0", "method": "complete", "id": 1}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"detail": "Invalid JSON-RPC request"}));
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn missing_id_or_method_is_rejected() {
    let backend = Arc::new(StubBackend::succeeding());
    let app = router(backend.clone());

    for request in [
        json!({"jsonrpc": "2.0", "method": "complete"}),
        json!({"jsonrpc": "2.0", "method": "complete", "id": null}),
        json!({"jsonrpc": "2.0", "id": 1}),
        json!({"jsonrpc": "2.0", "method": "", "id": 1}),
    ] {
        let (status, body) = post_json(app.clone(), &request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "for {request}");
        assert_eq!(body["detail"], "Invalid JSON-RPC request");
    }
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn unknown_method_returns_method_not_found() {
    let backend = Arc::new(StubBackend::succeeding());
    let (status, body) = post_json(
        router(backend.clone()),
        &json!({"jsonrpc": "2.0", "method": "foo", "id": 1}),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["jsonrpc"], "2.0");
    assert_eq!(body["id"], 1);
    assert_eq!(body["error"]["code"], -32601);
    assert!(body["error"]["message"].as_str().unwrap().contains("foo"));
    assert_eq!(body["error"]["message"], "Method 'foo' not found");
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn backend_failure_is_passed_through() {
    let backend = Arc::new(StubBackend::failing(CompletionError::Api {
        status: 429,
        message: "rate limit exceeded".to_string(),
    }));
    let (status, body) = post_json(
        router(backend.clone()),
        &json!({"jsonrpc": "2.0", "method": "complete", "id": "r1", "params": {"prompt": "x"}}),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({
            "jsonrpc": "2.0",
            "id": "r1",
            "error": {"code": -32000, "message": "rate limit exceeded"}
        })
    );
    assert_eq!(backend.calls().len(), 1);
}

#[tokio::test]
async fn network_failure_is_passed_through() {
    let backend = Arc::new(StubBackend::failing(CompletionError::Timeout(
        "operation timed out".to_string(),
    )));
    let (status, body) = post_json(
        router(backend),
        &json!({"jsonrpc": "2.0", "method": "complete", "id": 2}),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"]["message"], "operation timed out");
}

#[tokio::test]
async fn omitted_params_use_defaults() {
    let backend = Arc::new(StubBackend::succeeding());
    let app = router(backend.clone());

    for request in [
        json!({"jsonrpc": "2.0", "method": "complete", "id": 1}),
        json!({"jsonrpc": "2.0", "method": "complete", "id": 2, "params": {}}),
    ] {
        let (status, _) = post_json(app.clone(), &request).await;
        assert_eq!(status, StatusCode::OK);
    }

    let calls = backend.calls();
    assert_eq!(calls.len(), 2);
    for params in calls {
        assert_eq!(params, CompletionParams::with_defaults(DEFAULT_MODEL));
        assert_eq!(params.max_tokens, json!(150));
        assert_eq!(params.temperature, json!(0.7));
    }
}

#[tokio::test]
async fn ill_typed_values_reach_backend_and_fail_as_server_error() {
    let backend = Arc::new(StubBackend::failing(CompletionError::Api {
        status: 400,
        message: "'ten' is not of type 'integer' - 'max_tokens'".to_string(),
    }));
    let (status, body) = post_json(
        router(backend.clone()),
        &json!({
            "jsonrpc": "2.0",
            "method": "complete",
            "id": 11,
            "params": {"max_tokens": "ten"}
        }),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({
            "jsonrpc": "2.0",
            "id": 11,
            "error": {"code": -32000, "message": "'ten' is not of type 'integer' - 'max_tokens'"}
        })
    );

    let calls = backend.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].max_tokens, json!("ten"));
}

#[tokio::test]
async fn array_prompt_is_forwarded() {
    let backend = Arc::new(StubBackend::succeeding());
    let (status, body) = post_json(
        router(backend.clone()),
        &json!({
            "jsonrpc": "2.0",
            "method": "complete",
            "id": 1,
            "params": {"prompt": ["a", "b"], "n": 2}
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["choices"][0]["text"], STUB_TEXT);

    let calls = backend.calls();
    assert_eq!(calls[0].prompt, json!(["a", "b"]));
    assert_eq!(calls[0].extra.get("n"), Some(&json!(2)));
}

#[tokio::test]
async fn non_object_params_are_a_server_error() {
    let backend = Arc::new(StubBackend::succeeding());
    let app = router(backend.clone());

    for (params, kind) in [(json!("x"), "a string"), (json!([1, 2]), "an array")] {
        let (status, body) = post_json(
            app.clone(),
            &json!({"jsonrpc": "2.0", "method": "complete", "id": 3, "params": params}),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["id"], 3);
        assert_eq!(body["error"]["code"], -32000);
        assert_eq!(
            body["error"]["message"],
            format!("params must be an object, got {kind}")
        );
    }
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn oversized_integer_id_is_echoed_exactly() {
    let backend = Arc::new(StubBackend::succeeding());
    let (status, body) = post(
        router(backend),
        r#"{"jsonrpc":"2.0","method":"complete","id":123456789012345678901234567890}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"].to_string(), "123456789012345678901234567890");
}

#[tokio::test]
async fn usage_and_null_finish_reason_are_rendered() {
    let backend = Arc::new(StubBackend::returning(CompletionResult {
        id: "cmpl-usage".to_string(),
        object: "text_completion".to_string(),
        created: 1_700_000_001,
        model: "stub-model".to_string(),
        choices: vec![CompletionChoice {
            text: "partial".to_string(),
            index: 0,
            finish_reason: None,
        }],
        usage: Some(Usage {
            prompt_tokens: 4,
            completion_tokens: 6,
            total_tokens: 10,
        }),
    }));
    let (status, body) = post_json(
        router(backend),
        &json!({"jsonrpc": "2.0", "method": "complete", "id": 8}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["result"],
        json!({
            "id": "cmpl-usage",
            "object": "text_completion",
            "created": 1_700_000_001,
            "model": "stub-model",
            "choices": [{"text": "partial", "index": 0, "finish_reason": null}],
            "usage": {"prompt_tokens": 4, "completion_tokens": 6, "total_tokens": 10}
        })
    );
}

#[tokio::test]
async fn repeated_requests_are_identical() {
    let backend = Arc::new(StubBackend::succeeding());
    let app = router(backend.clone());
    let request = json!({
        "jsonrpc": "2.0",
        "method": "complete",
        "id": "same",
        "params": {"prompt": "def add(a, b):", "max_tokens": 16}
    });

    let first = post_json(app.clone(), &request).await;
    let second = post_json(app, &request).await;

    assert_eq!(first, second);
    assert_eq!(backend.calls().len(), 2);
}

#[tokio::test]
async fn only_post_root_is_routed() {
    let app = router(Arc::new(StubBackend::succeeding()));

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/v1/completions")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
