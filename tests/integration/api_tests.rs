// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{create_test_app, create_test_server};
use axum::http::StatusCode;
use pixcrawl::infrastructure::storage::LocalResultSink;
use serde_json::{json, Value};
use std::sync::Arc;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ARTICLE: &str = r#"<html>
<head>
    <title>Gallery</title>
    <meta property="og:image" content="https://i0.hdslb.com/bfs/cover.jpg">
    <style>body { color: red; }</style>
</head>
<body>
    <img src="/img/first.png">
    <img data-src="img/lazy.webp">
    <img src="/img/first.png">
    <img src="/not-an-image">
    <p>Hello</p>
    <p>World</p>
    <script>console.log("hidden")</script>
</body>
</html>"#;

async fn upstream() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/article"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(ARTICLE, "text/html; charset=utf-8"))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/big"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(vec![b'x'; 5000], "text/html"))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    server
}

#[tokio::test]
async fn test_health_and_version() {
    let app = create_test_app();

    let response = app.server.get("/health").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.text(), "OK");

    let response = app.server.get("/v1/version").await;
    assert_eq!(response.text(), env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_crawl_extracts_images_and_text() {
    let upstream = upstream().await;
    let app = create_test_app();
    let url = format!("{}/article", upstream.uri());

    let response = app
        .server
        .post("/crawl")
        .json(&json!({ "urls": url, "maxSize": 1000, "contentType": "all" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();

    let result = &body["results"][0];
    assert_eq!(result["outcome"], "success");
    assert_eq!(result["status"], "success");
    assert_eq!(result["url"], url);
    assert_eq!(result["size"], ARTICLE.len());
    assert_eq!(result["status_code"], 200);
    assert_eq!(result["text"], "Gallery Hello World");
    assert_eq!(result["text_length"], "Gallery Hello World".len());

    let images: Vec<&str> = result["images"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert_eq!(
        images,
        vec![
            format!("{}/img/first.png", upstream.uri()).as_str(),
            format!("{}/img/lazy.webp", upstream.uri()).as_str(),
            "https://i0.hdslb.com/bfs/cover.jpg",
        ]
    );
    assert_eq!(result["image_count"], 3);

    let stats = &body["stats"];
    assert_eq!(stats["total_urls"], 1);
    assert_eq!(stats["success_count"], 1);
    assert_eq!(stats["failed_count"], 0);
    assert_eq!(stats["total_size"], ARTICLE.len());
    let domain = upstream.address().to_string();
    assert_eq!(stats["domains"][&domain]["count"], 1);

    assert_eq!(app.sink.saved().await.len(), 1);
}

#[tokio::test]
async fn test_crawl_sends_browser_headers() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/guarded"))
        .and(header("Referer", "https://www.bilibili.com"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<p>ok</p>", "text/html"))
        .mount(&upstream)
        .await;

    let app = create_test_app();
    let response = app
        .server
        .post("/crawl")
        .json(&json!({ "urls": format!("{}/guarded", upstream.uri()), "contentType": "text" }))
        .await;

    let body: Value = response.json();
    assert_eq!(body["results"][0]["outcome"], "success");
    assert_eq!(body["results"][0]["text"], "ok");
    assert!(body["results"][0].get("images").is_none());
}

#[tokio::test]
async fn test_crawl_rejects_empty_input() {
    let app = create_test_app();

    for urls in ["", "  \n\n  "] {
        let response = app.server.post("/crawl").json(&json!({ "urls": urls })).await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["error"], "请输入要抓取的网址");
    }
    assert!(app.sink.saved().await.is_empty());
}

#[tokio::test]
async fn test_crawl_size_cap_and_failures_are_reported() {
    let upstream = upstream().await;
    let app = create_test_app();
    let urls = format!(
        "{base}/big\n\n{base}/broken\n{base}/article",
        base = upstream.uri()
    );

    let response = app
        .server
        .post("/crawl")
        .json(&json!({ "urls": urls, "maxSize": 1, "contentType": "images" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();

    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 3);

    let big = &results[0];
    assert_eq!(big["outcome"], "size_exceeded");
    assert_eq!(big["size"], 5000);
    assert!(big.get("images").is_none());
    assert!(big.get("text").is_none());

    let broken = &results[1];
    assert_eq!(broken["outcome"], "failed");
    assert_eq!(broken["error_type"], "HTTPError");
    assert_eq!(broken["size"], 0);

    assert_eq!(results[2]["outcome"], "success");
    assert!(results[2].get("text").is_none());

    let stats = &body["stats"];
    assert_eq!(stats["total_urls"], 3);
    assert_eq!(stats["success_count"], 1);
    assert_eq!(stats["failed_count"], 2);
    assert_eq!(stats["error_types"]["HTTPError"], 1);
    assert_eq!(stats["error_types"]["Unknown"], 1);

    let domain = &stats["domains"][upstream.address().to_string()];
    assert_eq!(domain["count"], 3);
    assert_eq!(domain["success_count"], 1);
    assert_eq!(domain["failed_count"], 2);
}

#[tokio::test]
async fn test_crawl_connection_failure() {
    let app = create_test_app();

    // Nothing listens on port 9 locally
    let response = app
        .server
        .post("/crawl")
        .json(&json!({ "urls": "http://127.0.0.1:9/" }))
        .await;

    let body: Value = response.json();
    assert_eq!(body["results"][0]["outcome"], "failed");
    assert_eq!(body["results"][0]["error_type"], "ConnectionError");
    assert_eq!(body["stats"]["avg_time_per_page"], 0.0);
}

#[tokio::test]
async fn test_crawl_persists_successful_pages_to_disk() {
    let upstream = upstream().await;
    let dir = tempfile::tempdir().unwrap();
    let server = create_test_server(Arc::new(LocalResultSink::new(dir.path())));

    let response = server
        .post("/crawl")
        .json(&json!({ "urls": format!("{}/article\n{}/broken", upstream.uri(), upstream.uri()) }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let files: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(files.len(), 1);

    let name = files[0].as_ref().unwrap().file_name().into_string().unwrap();
    assert!(name.starts_with("crawl_127.0.0.1_"));
    assert!(name.ends_with(".json"));
}
