// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::create_test_app;
use axum::http::StatusCode;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PNG: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

#[tokio::test]
async fn test_proxy_image_relays_bytes_with_referer() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/bfs/a.png"))
        .and(header("Referer", "https://www.bilibili.com/"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(PNG, "image/png"))
        .mount(&upstream)
        .await;

    let app = create_test_app();
    let response = app
        .server
        .get("/proxy_image")
        .add_query_param("url", format!("{}/bfs/a.png", upstream.uri()))
        .add_query_param("referer", "https://www.bilibili.com/")
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.header("content-type"), "image/png");
    assert_eq!(response.as_bytes().as_ref(), PNG);
}

#[tokio::test]
async fn test_proxy_image_requires_url() {
    let app = create_test_app();

    let response = app.server.get("/proxy_image").await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.text(), "No URL provided");

    let response = app.server.get("/proxy_image").add_query_param("url", "").await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_proxy_image_upstream_failure() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&upstream)
        .await;

    let app = create_test_app();
    let response = app
        .server
        .get("/proxy_image")
        .add_query_param("url", format!("{}/missing.png", upstream.uri()))
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.text().contains("404"));
}
