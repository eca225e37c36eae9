//! End-to-end test: a real server bound to a local port, driven over HTTP.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use restaurant_api::{build_server, AppState};
use serde_json::{json, Value};

fn free_port() -> u16 {
    // Bind to port 0 to let the OS assign a free port, then release it.
    std::net::TcpListener::bind("127.0.0.1:0")
        .expect("bind failed")
        .local_addr()
        .expect("addr failed")
        .port()
}

/// Wait until the server accepts connections, retrying for up to `timeout`.
async fn wait_for_http(url: &str, timeout: Duration) {
    let client = Client::new();
    let deadline = tokio::time::Instant::now() + timeout;
    loop {
        if tokio::time::Instant::now() > deadline {
            panic!("server did not become ready within {:?}", timeout);
        }
        if client.get(url).send().await.is_ok() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
}

#[tokio::test]
async fn order_lifecycle_over_http() {
    let port = free_port();
    let server = build_server(AppState::empty(), "127.0.0.1", port)
        .expect("Failed to bind the restaurant service");
    let handle = server.handle();
    tokio::spawn(server);

    let base = format!("http://127.0.0.1:{port}");
    wait_for_http(&format!("{base}/orders"), Duration::from_secs(10)).await;
    let http = Client::new();

    // ── create ───────────────────────────────────────────────────────────────
    let resp = http
        .post(format!("{base}/orders"))
        .json(&json!({
            "data": {
                "deliverTo": "123 Main",
                "mobileNumber": "555-0100",
                "dishes": [{"id": 5, "quantity": 2}]
            }
        }))
        .send()
        .await
        .expect("POST /orders failed");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = resp.json().await.expect("created body");
    assert_eq!(created["data"]["status"], json!("pending"));
    assert_eq!(created["data"]["dishes"].as_array().map(Vec::len), Some(1));
    let id = created["data"]["id"].as_str().expect("id assigned").to_string();

    // ── mark delivered ───────────────────────────────────────────────────────
    let resp = http
        .put(format!("{base}/orders/{id}"))
        .json(&json!({
            "data": {
                "id": id,
                "deliverTo": "123 Main",
                "mobileNumber": "555-0100",
                "status": "delivered",
                "dishes": [{"id": 5, "quantity": 2}]
            }
        }))
        .send()
        .await
        .expect("PUT /orders failed");
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Value = resp.json().await.expect("updated body");
    assert_eq!(updated["data"]["status"], json!("delivered"));

    // ── delete is refused once delivered ─────────────────────────────────────
    let resp = http
        .delete(format!("{base}/orders/{id}"))
        .send()
        .await
        .expect("DELETE /orders failed");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let err: Value = resp.json().await.expect("error body");
    assert_eq!(
        err,
        json!({ "error": "An order cannot be deleted unless it is pending." })
    );

    let resp = http
        .get(format!("{base}/orders/{id}"))
        .send()
        .await
        .expect("GET /orders failed");
    assert_eq!(resp.status(), StatusCode::OK);

    handle.stop(true).await;
}
