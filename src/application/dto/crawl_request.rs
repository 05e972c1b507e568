// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::models::crawl_request::{ContentMode, CrawlRequestSpec};

// Distinguishes an explicit `null` from an absent field
fn present<'de, D>(deserializer: D) -> Result<Option<Option<u64>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<u64>::deserialize(deserializer).map(Some)
}

/// 批量爬取请求DTO
#[derive(Debug, Deserialize, Serialize)]
pub struct CrawlRequestDto {
    /// 按行分隔的URL列表
    #[serde(default)]
    pub urls: String,
    /// 页面大小上限（KB）
    ///
    /// 缺省时使用服务端默认值；`null` 或 0 表示不限
    #[serde(
        rename = "maxSize",
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_size: Option<Option<u64>>,
    /// 提取模式：images / text / all
    #[serde(rename = "contentType", default)]
    pub content_type: Option<String>,
}

impl CrawlRequestDto {
    /// 转换为领域请求
    pub fn into_spec(self, default_max_size_kib: u64) -> CrawlRequestSpec {
        let mode = self
            .content_type
            .as_deref()
            .map(ContentMode::parse_lossy)
            .unwrap_or_default();
        let max_size = self.max_size.unwrap_or(Some(default_max_size_kib));
        CrawlRequestSpec::from_text(&self.urls, max_size, mode)
    }
}
