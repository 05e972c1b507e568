// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// 单个页面的性能指标
///
/// 时间字段单位为秒。每个URL处理时新建，各阶段完成后逐步填充，
/// 处理结束后不再修改。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    /// 客户端准备耗时
    pub dns_time: f64,
    /// 连接耗时（占位，始终为 0）
    pub connect_time: f64,
    /// 等待响应耗时
    pub response_time: f64,
    /// 下载响应体耗时
    pub download_time: f64,
    /// 解析HTML耗时
    pub parse_time: f64,
    /// 总耗时
    pub total_time: f64,
    /// 提取到的图片数量
    pub image_count: usize,
    /// 提取到的文本长度（字符数）
    pub text_length: usize,
    /// 页面字节数
    pub html_size: usize,
    /// HTTP状态码
    pub status_code: u16,
}

/// 失败分类
///
/// 序列化名称与统计中的错误类型键一致
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ErrorCategory {
    #[serde(rename = "Timeout")]
    Timeout,
    #[serde(rename = "ConnectionError")]
    ConnectionError,
    #[serde(rename = "HTTPError")]
    HttpError,
    #[serde(rename = "InvalidURL")]
    InvalidUrl,
    #[serde(rename = "InvalidHeader")]
    InvalidHeader,
    #[serde(rename = "TooManyRedirects")]
    TooManyRedirects,
    #[serde(rename = "BodyError")]
    BodyError,
    #[serde(rename = "RequestException")]
    RequestException,
    #[serde(rename = "ProcessingError")]
    ProcessingError,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Timeout => "Timeout",
            ErrorCategory::ConnectionError => "ConnectionError",
            ErrorCategory::HttpError => "HTTPError",
            ErrorCategory::InvalidUrl => "InvalidURL",
            ErrorCategory::InvalidHeader => "InvalidHeader",
            ErrorCategory::TooManyRedirects => "TooManyRedirects",
            ErrorCategory::BodyError => "BodyError",
            ErrorCategory::RequestException => "RequestException",
            ErrorCategory::ProcessingError => "ProcessingError",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 成功抓取的页面
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageSuccess {
    pub url: String,
    /// 响应体字节数
    pub size: usize,
    /// 处理耗时（秒）
    pub time: f64,
    pub status: String,
    pub performance: PerformanceMetrics,
    pub domain: String,
    pub content_type: String,
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_length: Option<usize>,
}

/// 超过大小上限而未解析的页面
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageSizeExceeded {
    pub url: String,
    pub size: usize,
    pub time: f64,
    pub status: String,
    pub performance: PerformanceMetrics,
    pub domain: String,
    /// 生效的上限（KB）
    pub max_size_kib: u64,
}

/// 抓取失败的页面
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageFailure {
    pub url: String,
    pub size: usize,
    pub time: f64,
    pub status: String,
    pub error_type: ErrorCategory,
    pub error_details: String,
    pub domain: String,
}

/// 单个URL的处理结果
///
/// 每个URL恰好对应一个变体，`outcome` 字段为机器可读的标记，
/// `status` 字段为面向展示的描述。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PageResult {
    Success(PageSuccess),
    SizeExceeded(PageSizeExceeded),
    Failed(PageFailure),
}

impl PageResult {
    pub fn url(&self) -> &str {
        match self {
            PageResult::Success(p) => &p.url,
            PageResult::SizeExceeded(p) => &p.url,
            PageResult::Failed(p) => &p.url,
        }
    }

    /// 字节数，失败时为 0
    pub fn size(&self) -> usize {
        match self {
            PageResult::Success(p) => p.size,
            PageResult::SizeExceeded(p) => p.size,
            PageResult::Failed(p) => p.size,
        }
    }

    pub fn domain(&self) -> &str {
        match self {
            PageResult::Success(p) => &p.domain,
            PageResult::SizeExceeded(p) => &p.domain,
            PageResult::Failed(p) => &p.domain,
        }
    }

    /// 处理耗时（秒）
    pub fn elapsed_secs(&self) -> f64 {
        match self {
            PageResult::Success(p) => p.time,
            PageResult::SizeExceeded(p) => p.time,
            PageResult::Failed(p) => p.time,
        }
    }

    /// 面向展示的状态描述
    pub fn status(&self) -> &str {
        match self {
            PageResult::Success(p) => &p.status,
            PageResult::SizeExceeded(p) => &p.status,
            PageResult::Failed(p) => &p.status,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, PageResult::Success(_))
    }

    /// 错误分类，仅失败变体携带
    pub fn error_category(&self) -> Option<ErrorCategory> {
        match self {
            PageResult::Failed(p) => Some(p.error_type),
            _ => None,
        }
    }

    /// 用于日志和指标标签的结果名称
    pub fn outcome(&self) -> &'static str {
        match self {
            PageResult::Success(_) => "success",
            PageResult::SizeExceeded(_) => "size_exceeded",
            PageResult::Failed(_) => "failed",
        }
    }
}
