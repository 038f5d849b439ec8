//! General API integration tests: health, admin tools, request IDs.

mod common;

use common::TestHarness;

#[tokio::test]
async fn health_check_returns_200() {
    let (_harness, addr) = TestHarness::with_server().await;
    let url = format!("http://{addr}/health");

    let resp = reqwest::get(&url).await.expect("request failed");
    assert_eq!(resp.status(), 200);

    let body = resp.text().await.unwrap();
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn admin_tools_lists_known_tools() {
    let (_harness, addr) = TestHarness::with_server().await;
    let url = format!("http://{addr}/admin/tools");

    let resp = reqwest::get(&url).await.unwrap();
    assert_eq!(resp.status(), 200);

    let json: serde_json::Value = resp.json().await.unwrap();
    let names: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["ffmpeg", "ffprobe", "packager"]);

    for tool in json.as_array().unwrap() {
        assert_eq!(tool["available"], true);
    }
}

#[tokio::test]
async fn request_id_is_echoed() {
    let (_harness, addr) = TestHarness::with_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .get(format!("http://{addr}/health"))
        .header("x-request-id", "test-id-42")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.headers()["x-request-id"], "test-id-42");
}

#[tokio::test]
async fn request_id_is_generated_when_absent() {
    let (_harness, addr) = TestHarness::with_server().await;

    let resp = reqwest::get(format!("http://{addr}/health")).await.unwrap();
    let id = resp.headers()["x-request-id"].to_str().unwrap();
    assert!(!id.is_empty());
}
