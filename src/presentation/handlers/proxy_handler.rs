// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::{Extension, Query},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::warn;

use crate::{
    application::dto::proxy_request::ProxyImageQuery,
    domain::services::image_relay::ImageRelayService,
};

/// 图片中转
///
/// 以调用方给定的 Referer 拉取图片，原样返回字节和内容类型
pub async fn proxy_image(
    Extension(relay): Extension<Arc<ImageRelayService>>,
    Query(query): Query<ProxyImageQuery>,
) -> Response {
    let url = match query.url.as_deref().map(str::trim) {
        Some(url) if !url.is_empty() => url.to_string(),
        _ => return (StatusCode::BAD_REQUEST, "No URL provided").into_response(),
    };

    match relay.relay(&url, query.referer.as_deref()).await {
        Ok(image) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, image.content_type)],
            image.body,
        )
            .into_response(),
        Err(e) => {
            warn!("Image relay failed for {}: {}", url, e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}
