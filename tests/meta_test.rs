//! Integration tests for the metadata endpoints (/meta and /file-meta).

mod common;

use common::TestHarness;
use reqwest::multipart::{Form, Part};

fn file_form(name: &str, bytes: &[u8]) -> Form {
    Form::new().part("file", Part::bytes(bytes.to_vec()).file_name(name.to_string()))
}

const DUMP: &str = "\
Found 2 streams.
Stream [0] type: Video
 codec: h264
 time_scale: 1000
 duration: 9000

Stream [1] type: Audio
 codec: aac
 language: fr

Packaging completed successfully.
";

#[tokio::test]
async fn meta_parses_stream_dump() {
    let (harness, addr) = TestHarness::with_server().await;
    harness.runner.succeed_with("packager", DUMP, "");

    let client = reqwest::Client::new();
    let resp = client
        .post(format!("http://{addr}/meta"))
        .multipart(file_form("clip.mp4", b"fake media"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(json["packaging_status"], "completed successfully");

    let streams = json["streams"].as_array().unwrap();
    assert_eq!(streams.len(), 2);
    assert_eq!(streams[0]["type"], "Video");
    assert_eq!(streams[0]["duration_seconds"], 9.0);
    assert_eq!(streams[1]["type"], "Audio");
    assert_eq!(streams[1]["language"], "fr");
    assert!(streams[1].get("duration_seconds").is_none());

    let calls = harness.runner.calls_for("packager");
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].args[1], "--dump_stream_info");
    assert!(calls[0].args[0].starts_with("input="));
    assert!(calls[0].args[0].ends_with("/clip.mp4"));
}

#[tokio::test]
async fn meta_with_no_streams_in_dump() {
    let (harness, addr) = TestHarness::with_server().await;
    harness.runner.succeed_with("packager", "nothing to see\n", "");

    let client = reqwest::Client::new();
    let resp = client
        .post(format!("http://{addr}/meta"))
        .multipart(file_form("clip.mp4", b"fake"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(json["packaging_status"], "unknown");
    assert_eq!(json["streams"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn meta_requires_file() {
    let (harness, addr) = TestHarness::with_server().await;

    let client = reqwest::Client::new();
    let resp = client
        .post(format!("http://{addr}/meta"))
        .multipart(Form::new().text("other", "field"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let json: serde_json::Value = resp.json().await.unwrap();
    assert!(json["error"].as_str().unwrap().contains("No file uploaded"));
    assert!(harness.runner.calls().is_empty());
}

#[tokio::test]
async fn meta_tool_failure_returns_500_with_details() {
    let (harness, addr) = TestHarness::with_server().await;
    harness
        .runner
        .fail_with("packager", "exited with status 1", "cannot open input");

    let client = reqwest::Client::new();
    let resp = client
        .post(format!("http://{addr}/meta"))
        .multipart(file_form("clip.mp4", b"fake"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 500);

    let json: serde_json::Value = resp.json().await.unwrap();
    assert!(json["error"].as_str().unwrap().contains("packager"));
    assert_eq!(json["details"], "cannot open input");
}

#[tokio::test]
async fn file_meta_injects_packaging_status() {
    let (harness, addr) = TestHarness::with_server().await;
    harness.runner.succeed_with(
        "ffprobe",
        r#"{"streams": [{"index": 0, "codec_type": "video", "codec_name": "h264"}]}"#,
        "",
    );

    let client = reqwest::Client::new();
    let resp = client
        .post(format!("http://{addr}/file-meta"))
        .multipart(file_form("clip.mp4", b"fake"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let json: serde_json::Value = resp.json().await.unwrap();
    // ffprobe's own JSON passes through untouched...
    assert_eq!(json["streams"][0]["codec_name"], "h264");
    // ...with the status injected alongside it.
    assert_eq!(json["packaging_status"], "completed successfully");

    let calls = harness.runner.calls_for("ffprobe");
    assert_eq!(calls.len(), 1);
    assert!(calls[0].args.contains(&"-show_streams".to_string()));
}

#[tokio::test]
async fn file_meta_invalid_json_is_500() {
    let (harness, addr) = TestHarness::with_server().await;
    harness.runner.succeed_with("ffprobe", "not json at all", "");

    let client = reqwest::Client::new();
    let resp = client
        .post(format!("http://{addr}/file-meta"))
        .multipart(file_form("clip.mp4", b"fake"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 500);

    let json: serde_json::Value = resp.json().await.unwrap();
    assert!(json["error"].as_str().unwrap().contains("ffprobe"));
}
