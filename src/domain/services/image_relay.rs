// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use bytes::Bytes;
use std::sync::Arc;

use crate::config::settings::{CrawlerSettings, RelaySettings};
use crate::engines::traits::{EngineError, FetchRequest, ScraperEngine};

/// 上游未声明内容类型时使用的默认值
pub const DEFAULT_IMAGE_CONTENT_TYPE: &str = "image/jpeg";

/// 中转得到的图片
#[derive(Debug, Clone)]
pub struct RelayedImage {
    pub content_type: String,
    pub body: Bytes,
}

/// 图片中转服务
///
/// 以浏览器请求头和调用方给定的 Referer 拉取图片，绕过图床的防盗链检查
pub struct ImageRelayService {
    engine: Arc<dyn ScraperEngine>,
    crawler: CrawlerSettings,
    relay: RelaySettings,
}

impl ImageRelayService {
    pub fn new(engine: Arc<dyn ScraperEngine>, crawler: CrawlerSettings, relay: RelaySettings) -> Self {
        Self {
            engine,
            crawler,
            relay,
        }
    }

    /// 拉取图片
    pub async fn relay(&self, url: &str, referer: Option<&str>) -> Result<RelayedImage, EngineError> {
        let request = FetchRequest {
            url: url.to_string(),
            headers: self.crawler.relay_headers(&self.relay, referer),
            timeout: self.crawler.timeout(),
            skip_tls_verification: false,
        };

        let response = self.engine.fetch(&request).await?;
        let content_type = if response.content_type.trim().is_empty() {
            DEFAULT_IMAGE_CONTENT_TYPE.to_string()
        } else {
            response.content_type
        };

        Ok(RelayedImage {
            content_type,
            body: response.body,
        })
    }
}
