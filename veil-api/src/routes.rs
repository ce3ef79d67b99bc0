//! API route configuration.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;
use crate::state::AppState;

/// Creates the API router with all routes configured.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))

        // Stealth operations
        .route("/api/resolve-stealth/:ens_name", get(handlers::resolve_stealth))
        .route("/api/derive-stealth", post(handlers::derive_stealth))
        .route("/api/announcements/:view_tag/:p_view", get(handlers::list_announcements))

        // Proof placeholders
        .route("/api/generate-derivation-proof", post(handlers::derivation_proof))
        .route("/api/generate-ownership-proof", post(handlers::ownership_proof))

        // Shielded pool
        .route("/api/pool/deposit", post(handlers::pool_deposit))
        .route("/api/pool/state", get(handlers::pool_state))
        .route("/api/pool/sweep", post(handlers::pool_sweep))

        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::state::ApiConfig;

    fn test_app() -> Router {
        let state = Arc::new(AppState::new(ApiConfig::default()).unwrap());
        create_router(state)
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
        send(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
    }

    async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
        send(
            app,
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    #[tokio::test]
    async fn test_health_check() {
        let app = test_app();
        let (status, body) = get_json(&app, "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["digest"], "sha256");
        assert_eq!(body["announcements"], 0);
    }

    #[tokio::test]
    async fn test_resolve_stealth() {
        let app = test_app();
        let (status, body) = get_json(&app, "/api/resolve-stealth/alice.eth").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ensName"], "alice.eth");
        assert_eq!(body["metaAddress"]["pSpend"].as_str().unwrap().len(), 64);
        assert_eq!(body["metaAddress"]["pView"].as_str().unwrap().len(), 64);
    }

    #[tokio::test]
    async fn test_full_flow() {
        let app = test_app();

        let (_, resolved) = get_json(&app, "/api/resolve-stealth/alice.eth").await;
        let meta = resolved["metaAddress"].clone();

        let (status, ann) = post_json(
            &app,
            "/api/derive-stealth",
            json!({"ensName": "alice.eth", "metaAddress": meta}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ann["id"], 1);
        assert_eq!(ann["stealthAddress"].as_str().unwrap().len(), 42);
        assert_eq!(ann["viewTag"].as_str().unwrap().len(), 2);
        assert_eq!(ann["R"].as_str().unwrap().len(), 64);
        assert_eq!(ann["aStealth"].as_str().unwrap().len(), 64);

        let uri = format!(
            "/api/announcements/{}/{}",
            ann["viewTag"].as_str().unwrap(),
            meta["pView"].as_str().unwrap()
        );
        let (status, list) = get_json(&app, &uri).await;
        assert_eq!(status, StatusCode::OK);
        assert!(list.as_array().unwrap().iter().any(|a| a["id"] == 1));

        let (status, deposit) = post_json(
            &app,
            "/api/pool/deposit",
            json!({"announcementId": 1, "value": 5}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(deposit["note"]["value"], 5);
        assert_eq!(deposit["note"]["spent"], false);
        assert_eq!(deposit["note"]["stealthAddress"], ann["stealthAddress"]);
        assert!(deposit["note"].get("nullifier").is_none());

        let (_, state) = get_json(&app, "/api/pool/state").await;
        assert_eq!(state["total"], 5);
        assert_eq!(state["nullifiers"], json!([]));

        let (status, sweep) = post_json(
            &app,
            "/api/pool/sweep",
            json!({"pView": meta["pView"], "mainAddress": "0xabc"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(sweep["swept"], 5);
        assert_eq!(sweep["transfers"], json!([{"to": "0xabc", "value": 5}]));
        assert_eq!(sweep["spentNoteIds"], json!([1]));
        assert!(sweep.get("message").is_none());

        let (_, state) = get_json(&app, "/api/pool/state").await;
        assert_eq!(state["total"], 0);
        assert_eq!(state["commitments"][0]["spent"], true);
        assert_eq!(state["nullifiers"].as_array().unwrap().len(), 1);

        let (_, again) = post_json(
            &app,
            "/api/pool/sweep",
            json!({"pView": meta["pView"], "mainAddress": "0xabc"}),
        )
        .await;
        assert_eq!(again["swept"], 0);
        assert_eq!(again["transfers"], json!([]));
        assert!(again["message"].is_string());
    }

    #[tokio::test]
    async fn test_derive_rejects_bad_meta_address() {
        let app = test_app();

        let (status, body) = post_json(
            &app,
            "/api/derive-stealth",
            json!({"ensName": "alice.eth", "metaAddress": {"pSpend": "zz", "pView": "11"}}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INVALID_META_ADDRESS");

        let (status, _) = post_json(&app, "/api/derive-stealth", json!({"ensName": "a"})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_deposit_errors() {
        let app = test_app();

        let (status, body) = post_json(
            &app,
            "/api/pool/deposit",
            json!({"announcementId": 42, "value": 5}),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "UNKNOWN_ANNOUNCEMENT");

        let (status, body) = post_json(&app, "/api/pool/deposit", json!({"value": 5})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "MISSING_PARAMETERS");

        let (_, state) = get_json(&app, "/api/pool/state").await;
        assert_eq!(state["commitments"], json!([]));
    }

    #[tokio::test]
    async fn test_deposit_invalid_amounts() {
        let app = test_app();
        let (_, resolved) = get_json(&app, "/api/resolve-stealth/bob.eth").await;
        post_json(
            &app,
            "/api/derive-stealth",
            json!({"ensName": "bob.eth", "metaAddress": resolved["metaAddress"]}),
        )
        .await;

        for value in [json!(0), json!(-3), json!(2.5), json!("7")] {
            let (status, body) = post_json(
                &app,
                "/api/pool/deposit",
                json!({"announcementId": 1, "value": value}),
            )
            .await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "value {}", value);
            assert_eq!(body["error"]["code"], "INVALID_AMOUNT");
        }
    }

    #[tokio::test]
    async fn test_deposit_validates_before_lookup() {
        let app = test_app();

        let (status, body) = post_json(
            &app,
            "/api/pool/deposit",
            json!({"announcementId": 999, "value": 0}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INVALID_AMOUNT");

        let (status, body) = post_json(
            &app,
            "/api/pool/deposit",
            json!({"announcementId": 0, "value": 5}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "MISSING_PARAMETERS");
    }

    #[tokio::test]
    async fn test_body_rejections_use_error_shape() {
        let app = test_app();

        let (status, body) = post_json(&app, "/api/pool/sweep", json!({"pView": 5})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INVALID_ENCODING");
        assert!(body["error"]["message"].is_string());

        let (status, body) = send(
            &app,
            Request::builder()
                .method("POST")
                .uri("/api/derive-stealth")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "MISSING_PARAMETERS");

        let (status, body) = send(
            &app,
            Request::builder()
                .method("POST")
                .uri("/api/pool/deposit")
                .header("content-type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INVALID_ENCODING");
    }

    #[tokio::test]
    async fn test_announcements_wrong_view_key_excludes() {
        let app = test_app();
        let (_, resolved) = get_json(&app, "/api/resolve-stealth/alice.eth").await;
        let (_, ann) = post_json(
            &app,
            "/api/derive-stealth",
            json!({"ensName": "alice.eth", "metaAddress": resolved["metaAddress"]}),
        )
        .await;
        let tag = ann["viewTag"].as_str().unwrap();

        let mut excluded = false;
        for b in 0..=255u8 {
            let uri = format!("/api/announcements/{}/{}", tag, format!("{:02x}", b).repeat(32));
            let (status, list) = get_json(&app, &uri).await;
            assert_eq!(status, StatusCode::OK);
            if list.as_array().unwrap().is_empty() {
                excluded = true;
                break;
            }
        }
        assert!(excluded);
    }

    #[tokio::test]
    async fn test_sweep_missing_parameters() {
        let app = test_app();
        let (status, body) = post_json(&app, "/api/pool/sweep", json!({"pView": "11"})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "MISSING_PARAMETERS");
    }

    #[tokio::test]
    async fn test_announcements_malformed_input_is_empty() {
        let app = test_app();
        let (status, body) = get_json(&app, "/api/announcements/zz/nothex").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn test_proofs_ignore_body() {
        let app = test_app();

        let (status, body) = send(
            &app,
            Request::builder()
                .method("POST")
                .uri("/api/generate-derivation-proof")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["proof"]["a"].as_str().unwrap().len(), 64);

        let (status, body) =
            post_json(&app, "/api/generate-ownership-proof", json!({"anything": true})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["proof"]["c"].as_str().unwrap().len(), 64);

        let (status, _) = post_json(
            &app,
            "/api/generate-ownership-proof",
            json!({"announcementId": 9}),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
