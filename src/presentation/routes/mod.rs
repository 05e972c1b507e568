// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    routing::{get, post},
    Extension, Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::domain::services::{batch_service::BatchCrawlService, image_relay::ImageRelayService};
use crate::presentation::handlers::{crawl_handler, proxy_handler};

/// 创建应用路由
///
/// # 参数
///
/// * `batch` - 批量爬取服务
/// * `relay` - 图片中转服务
///
/// # 返回值
///
/// 返回配置好的路由
pub fn routes(batch: Arc<BatchCrawlService>, relay: Arc<ImageRelayService>) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/v1/version", get(version));

    let crawl_routes = Router::new()
        .route("/crawl", post(crawl_handler::crawl))
        .route("/proxy_image", get(proxy_handler::proxy_image));

    Router::new()
        .merge(public_routes)
        .merge(crawl_routes)
        .layer(Extension(batch))
        .layer(Extension(relay))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// 健康检查端点
///
/// # 返回值
///
/// 返回"OK"字符串
pub async fn health_check() -> &'static str {
    "OK"
}

/// 版本信息端点
///
/// # 返回值
///
/// 返回应用版本号
pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
#[path = "routes_test.rs"]
mod tests;
