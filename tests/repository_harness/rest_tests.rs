//! REST integration test macro for order repositories.
//!
//! The `rest_integration_tests!` macro drives the full HTTP stack:
//! JSON → HTTP request → handler → OrderRepository → HTTP response → JSON.

/// Generate a REST integration test suite for a repository backend.
///
/// `$factory` must produce an `impl OrderRepository + 'static`.
///
/// # Generated Tests
///
/// ## Create / Read (4 tests)
/// - `test_rest_create` — POST 201, NEW, version 0
/// - `test_rest_get` — GET 200 + same order
/// - `test_rest_list` — GET 200 + every created order
/// - `test_rest_create_ignores_body` — client fields never leak into the order
///
/// ## Lookup errors (2 tests)
/// - `test_rest_error_not_found` — unknown id → 404
/// - `test_rest_error_invalid_uuid` — garbage id → 400
///
/// ## Status updates (8 tests)
/// - `test_rest_update_status` — PATCH 200, version bumped
/// - `test_rest_update_status_stale_version` — 409 version conflict
/// - `test_rest_update_status_invalid_transition` — NEW → CONFIRMED → 409
/// - `test_rest_update_status_terminal` — 409 terminal state
/// - `test_rest_update_status_unknown_status` — 400
/// - `test_rest_update_status_malformed_body` — 400
/// - `test_rest_update_status_fail_reason` — FAILED with a reason
/// - `test_rest_update_status_not_found` — 404
#[macro_export]
macro_rules! rest_integration_tests {
    ($factory:expr) => {
        mod rest_integration_tests {
            use super::*;
            use axum::http::StatusCode;
            use axum_test::TestServer;
            use serde_json::{Value, json};

            async fn make_server() -> TestServer {
                test_server($factory)
            }

            async fn create(server: &TestServer) -> Value {
                let response = server.post("/orders").await;
                response.assert_status(StatusCode::CREATED);
                response.json()
            }

            async fn patch_status(server: &TestServer, id: &str, body: Value) -> axum_test::TestResponse {
                server
                    .patch(&format!("/orders/{}/status", id))
                    .json(&body)
                    .await
            }

            // ==============================================================
            // Create / Read
            // ==============================================================

            #[tokio::test]
            async fn test_rest_create() {
                let server = make_server().await;

                let body = create(&server).await;

                assert_eq!(body["status"], "NEW");
                assert_eq!(body["version"], 0);
                assert!(body.get("fail_reason_code").is_none());
                assert!(body["created_at"].as_str().is_some());
                assert!(body["updated_at"].as_str().is_some());
                uuid::Uuid::parse_str(body["id"].as_str().unwrap()).unwrap();
            }

            #[tokio::test]
            async fn test_rest_create_ignores_body() {
                let server = make_server().await;

                let response = server
                    .post("/orders")
                    .json(&json!({ "status": "CONFIRMED", "version": 42 }))
                    .await;

                response.assert_status(StatusCode::CREATED);
                let body: Value = response.json();
                assert_eq!(body["status"], "NEW");
                assert_eq!(body["version"], 0);
            }

            #[tokio::test]
            async fn test_rest_get() {
                let server = make_server().await;
                let created = create(&server).await;
                let id = created["id"].as_str().unwrap();

                let response = server.get(&format!("/orders/{}", id)).await;

                response.assert_status_ok();
                let body: Value = response.json();
                assert_eq!(body, created);
            }

            #[tokio::test]
            async fn test_rest_list() {
                let server = make_server().await;

                let empty: Value = server.get("/orders").await.json();
                assert_eq!(empty, json!([]));

                let first = create(&server).await;
                let second = create(&server).await;

                let response = server.get("/orders").await;
                response.assert_status_ok();

                let body: Value = response.json();
                let items = body.as_array().unwrap();
                assert_eq!(items.len(), 2);
                assert!(items.iter().any(|o| o["id"] == first["id"]));
                assert!(items.iter().any(|o| o["id"] == second["id"]));
            }

            // ==============================================================
            // Lookup errors
            // ==============================================================

            #[tokio::test]
            async fn test_rest_error_not_found() {
                let server = make_server().await;
                let fake_id = uuid::Uuid::new_v4();

                let response = server.get(&format!("/orders/{}", fake_id)).await;

                response.assert_status(StatusCode::NOT_FOUND);
                response.assert_json(&json!({ "error": "order not found" }));
            }

            #[tokio::test]
            async fn test_rest_error_invalid_uuid() {
                let server = make_server().await;

                let response = server.get("/orders/not-a-valid-id").await;

                response.assert_status(StatusCode::BAD_REQUEST);
                response.assert_json(&json!({ "error": "invalid id" }));
            }

            // ==============================================================
            // Status updates
            // ==============================================================

            #[tokio::test]
            async fn test_rest_update_status() {
                let server = make_server().await;
                let created = create(&server).await;
                let id = created["id"].as_str().unwrap();

                let response = patch_status(
                    &server,
                    id,
                    json!({ "status": "RESERVED", "expected_version": 0 }),
                )
                .await;

                response.assert_status_ok();
                let body: Value = response.json();
                assert_eq!(body["status"], "RESERVED");
                assert_eq!(body["version"], 1);
                assert_eq!(body["created_at"], created["created_at"]);

                let fetched: Value = server.get(&format!("/orders/{}", id)).await.json();
                assert_eq!(fetched, body);
            }

            #[tokio::test]
            async fn test_rest_update_status_stale_version() {
                let server = make_server().await;
                let created = create(&server).await;
                let id = created["id"].as_str().unwrap();

                patch_status(&server, id, json!({ "status": "RESERVED", "expected_version": 0 }))
                    .await
                    .assert_status_ok();

                let response = patch_status(
                    &server,
                    id,
                    json!({ "status": "CONFIRMED", "expected_version": 0 }),
                )
                .await;

                response.assert_status(StatusCode::CONFLICT);
                response.assert_json(&json!({ "error": "version conflict" }));
            }

            #[tokio::test]
            async fn test_rest_update_status_invalid_transition() {
                let server = make_server().await;
                let created = create(&server).await;
                let id = created["id"].as_str().unwrap();

                let response = patch_status(
                    &server,
                    id,
                    json!({ "status": "CONFIRMED", "expected_version": 0 }),
                )
                .await;

                response.assert_status(StatusCode::CONFLICT);
                response.assert_json(&json!({ "error": "invalid transition" }));

                let fetched: Value = server.get(&format!("/orders/{}", id)).await.json();
                assert_eq!(fetched["status"], "NEW");
                assert_eq!(fetched["version"], 0);
            }

            #[tokio::test]
            async fn test_rest_update_status_terminal() {
                let server = make_server().await;
                let created = create(&server).await;
                let id = created["id"].as_str().unwrap();

                for (status, version) in [("RESERVED", 0), ("CONFIRMED", 1)] {
                    patch_status(&server, id, json!({ "status": status, "expected_version": version }))
                        .await
                        .assert_status_ok();
                }

                let response = patch_status(
                    &server,
                    id,
                    json!({ "status": "FAILED", "expected_version": 2 }),
                )
                .await;

                response.assert_status(StatusCode::CONFLICT);
                response.assert_json(&json!({ "error": "order is in terminal state" }));
            }

            #[tokio::test]
            async fn test_rest_update_status_unknown_status() {
                let server = make_server().await;
                let created = create(&server).await;
                let id = created["id"].as_str().unwrap();

                let response = patch_status(
                    &server,
                    id,
                    json!({ "status": "SHIPPED", "expected_version": 0 }),
                )
                .await;

                response.assert_status(StatusCode::BAD_REQUEST);
                response.assert_json(&json!({ "error": "invalid status" }));
            }

            #[tokio::test]
            async fn test_rest_update_status_malformed_body() {
                let server = make_server().await;
                let created = create(&server).await;
                let id = created["id"].as_str().unwrap();

                let response = patch_status(&server, id, json!({ "status": "RESERVED" })).await;

                response.assert_status(StatusCode::BAD_REQUEST);
                response.assert_json(&json!({ "error": "invalid request body" }));
            }

            #[tokio::test]
            async fn test_rest_update_status_fail_reason() {
                let server = make_server().await;
                let created = create(&server).await;
                let id = created["id"].as_str().unwrap();

                let response = patch_status(
                    &server,
                    id,
                    json!({
                        "status": "FAILED",
                        "expected_version": 0,
                        "fail_reason_code": "OUT_OF_STOCK",
                        "fail_reason_detail": "sku 1234 unavailable"
                    }),
                )
                .await;

                response.assert_status_ok();
                let body: Value = response.json();
                assert_eq!(body["status"], "FAILED");
                assert_eq!(body["version"], 1);
                assert_eq!(body["fail_reason_code"], "OUT_OF_STOCK");
                assert_eq!(body["fail_reason_detail"], "sku 1234 unavailable");

                // A reason on a non-FAILED target is rejected
                let other = create(&server).await;
                let response = patch_status(
                    &server,
                    other["id"].as_str().unwrap(),
                    json!({
                        "status": "RESERVED",
                        "expected_version": 0,
                        "fail_reason_code": "OUT_OF_STOCK"
                    }),
                )
                .await;
                response.assert_status(StatusCode::BAD_REQUEST);
                response.assert_json(&json!({ "error": "invalid fail reason" }));
            }

            #[tokio::test]
            async fn test_rest_update_status_not_found() {
                let server = make_server().await;
                let fake_id = uuid::Uuid::new_v4().to_string();

                let response = patch_status(
                    &server,
                    &fake_id,
                    json!({ "status": "RESERVED", "expected_version": 0 }),
                )
                .await;

                response.assert_status(StatusCode::NOT_FOUND);
                response.assert_json(&json!({ "error": "order not found" }));
            }
        }
    };
}
