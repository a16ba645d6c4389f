//! 統合テスト共通ユーティリティ

#![allow(dead_code)]

use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// 使われていないポートを確保して返す
pub fn unused_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("failed to reserve test port");
    let port = listener
        .local_addr()
        .expect("failed to read test port")
        .port();
    drop(listener);
    port
}

/// 標準的な `/status` レスポンス
pub fn status_body() -> Value {
    json!({
        "components": {
            "github": { "status": "ok" },
            "replit": { "status": "ok" },
            "cursor": { "status": "ok" }
        }
    })
}

pub async fn mount_status(server: &MockServer, body: Value, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path("/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(expected_calls)
        .mount(server)
        .await;
}

pub async fn mount_relay(
    server: &MockServer,
    endpoint: &str,
    response: ResponseTemplate,
    expected_calls: u64,
) {
    Mock::given(method("POST"))
        .and(path(endpoint))
        .respond_with(response)
        .expect(expected_calls)
        .mount(server)
        .await;
}

/// 3つのリレーテストすべてに成功レスポンスを返す
pub async fn mount_all_relays_ok(dashboard: &MockServer, listener: &MockServer) {
    mount_relay(
        dashboard,
        "/api/github-events/test",
        ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "event": { "event": "workflow_run", "action": "completed" }
        })),
        1,
    )
    .await;
    mount_relay(
        dashboard,
        "/api/replit-events/test",
        ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "event": { "event": "deploy", "workspace": { "name": "monitor" } }
        })),
        1,
    )
    .await;
    mount_relay(
        listener,
        "/api/vscode-events/test",
        ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "event": { "event": "file_save", "file": "index.js" }
        })),
        1,
    )
    .await;
}
