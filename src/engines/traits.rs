// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

use crate::domain::models::page_result::ErrorCategory;

/// 引擎错误类型
#[derive(Error, Debug)]
pub enum EngineError {
    /// 请求失败（网络、DNS、超时或非 2xx 状态码）
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    /// 请求头非法
    #[error("Invalid header: {0}")]
    InvalidHeader(String),
}

impl EngineError {
    /// 错误分类，用于统计和结果标记
    pub fn category(&self) -> ErrorCategory {
        match self {
            EngineError::RequestFailed(e) => {
                if e.is_timeout() {
                    ErrorCategory::Timeout
                } else if e.is_status() {
                    ErrorCategory::HttpError
                } else if e.is_connect() {
                    ErrorCategory::ConnectionError
                } else if e.is_builder() {
                    ErrorCategory::InvalidUrl
                } else if e.is_redirect() {
                    ErrorCategory::TooManyRedirects
                } else if e.is_body() || e.is_decode() {
                    ErrorCategory::BodyError
                } else {
                    ErrorCategory::RequestException
                }
            }
            EngineError::InvalidHeader(_) => ErrorCategory::InvalidHeader,
        }
    }
}

/// 抓取请求
#[derive(Debug, Clone)]
pub struct FetchRequest {
    /// 目标URL
    pub url: String,
    /// 请求头
    pub headers: HashMap<String, String>,
    /// 超时时间
    pub timeout: Duration,
    /// 是否跳过TLS验证
    pub skip_tls_verification: bool,
}

/// 各阶段耗时
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTiming {
    /// 客户端构建耗时
    pub setup: Duration,
    /// 等待响应头耗时
    pub response: Duration,
    /// 下载响应体耗时
    pub download: Duration,
}

/// 抓取响应
#[derive(Debug, Clone)]
pub struct FetchResponse {
    /// HTTP状态码
    pub status_code: u16,
    /// 内容类型，响应未声明时为空字符串
    pub content_type: String,
    /// 响应头
    pub headers: HashMap<String, String>,
    /// 原始响应体
    pub body: Bytes,
    /// 耗时明细
    pub timing: FetchTiming,
}

/// 抓取引擎特质
#[async_trait]
pub trait ScraperEngine: Send + Sync {
    /// 执行一次 GET 请求
    async fn fetch(&self, request: &FetchRequest) -> Result<FetchResponse, EngineError>;

    /// 引擎名称
    fn name(&self) -> &'static str;
}
