// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// 内容提取模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentMode {
    Images,
    Text,
    #[default]
    All,
}

impl ContentMode {
    /// 宽松解析，未知取值按 `All` 处理
    pub fn parse_lossy(value: &str) -> Self {
        match value.trim() {
            "images" => ContentMode::Images,
            "text" => ContentMode::Text,
            _ => ContentMode::All,
        }
    }

    pub fn wants_images(&self) -> bool {
        matches!(self, ContentMode::Images | ContentMode::All)
    }

    pub fn wants_text(&self) -> bool {
        matches!(self, ContentMode::Text | ContentMode::All)
    }
}

/// 批量爬取请求
///
/// 单次批量运行内不可变。`urls` 保持输入顺序，可能包含待丢弃的空行。
#[derive(Debug, Clone, PartialEq)]
pub struct CrawlRequestSpec {
    pub urls: Vec<String>,
    /// 页面大小上限（KB），`None` 表示不限
    pub max_size_kib: Option<u64>,
    pub content_mode: ContentMode,
}

impl CrawlRequestSpec {
    pub fn new(urls: Vec<String>, max_size_kib: Option<u64>, content_mode: ContentMode) -> Self {
        Self {
            urls,
            // 0 means unlimited
            max_size_kib: max_size_kib.filter(|&kib| kib > 0),
            content_mode,
        }
    }

    /// 从按行分隔的文本构建请求
    pub fn from_text(text: &str, max_size_kib: Option<u64>, content_mode: ContentMode) -> Self {
        Self::new(
            text.split('\n').map(str::to_string).collect(),
            max_size_kib,
            content_mode,
        )
    }

    /// 去除首尾空白并丢弃空行后的URL列表
    pub fn normalized_urls(&self) -> Vec<String> {
        self.urls
            .iter()
            .map(|u| u.trim())
            .filter(|u| !u.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// 大小上限（字节）
    pub fn max_size_bytes(&self) -> Option<u64> {
        self.max_size_kib.map(|kib| kib.saturating_mul(1024))
    }
}
