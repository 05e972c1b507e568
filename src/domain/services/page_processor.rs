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

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

use crate::config::settings::CrawlerSettings;
use crate::domain::models::crawl_request::{ContentMode, CrawlRequestSpec};
use crate::domain::models::page_result::{
    ErrorCategory, PageFailure, PageResult, PageSizeExceeded, PageSuccess, PerformanceMetrics,
};
use crate::domain::repositories::result_sink::ResultSink;
use crate::domain::services::extraction_service::ExtractionService;
use crate::engines::traits::{EngineError, FetchRequest, FetchResponse, ScraperEngine};
use crate::utils::text_encoding::decode_body;
use crate::utils::url_utils::domain_of;

/// 成功结果的状态描述
pub const STATUS_SUCCESS: &str = "success";

/// 页面处理错误（传输层以外）
#[derive(Error, Debug)]
pub enum ProcessingError {
    /// 页面地址无法作为相对链接的基准
    #[error("invalid base url {url}: {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// 出站请求配置
#[derive(Debug, Clone)]
pub struct FetchProfile {
    pub headers: HashMap<String, String>,
    pub timeout: Duration,
    pub skip_tls_verification: bool,
}

impl FetchProfile {
    /// 批量爬取使用的请求配置
    pub fn for_crawl(settings: &CrawlerSettings) -> Self {
        Self {
            headers: settings.crawl_headers(),
            timeout: settings.timeout(),
            skip_tls_verification: settings.skip_tls_verification,
        }
    }

    fn request(&self, url: &str) -> FetchRequest {
        FetchRequest {
            url: url.to_string(),
            headers: self.headers.clone(),
            timeout: self.timeout,
            skip_tls_verification: self.skip_tls_verification,
        }
    }
}

/// 解析与提取的产物
struct PageContent {
    images: Option<Vec<String>>,
    text: Option<String>,
    parse_time: Duration,
}

/// 页面处理器
///
/// 组合抓取、大小检查、解析和内容提取，为每个URL产出一条结果
pub struct PageProcessor {
    engine: Arc<dyn ScraperEngine>,
    sink: Arc<dyn ResultSink>,
    profile: FetchProfile,
}

impl PageProcessor {
    pub fn new(engine: Arc<dyn ScraperEngine>, sink: Arc<dyn ResultSink>, profile: FetchProfile) -> Self {
        Self {
            engine,
            sink,
            profile,
        }
    }

    /// 处理单个URL
    ///
    /// 所有错误都转换为失败结果，不会向调用方传播。
    ///
    /// # 参数
    ///
    /// * `url` - 目标URL
    /// * `spec` - 本次批量请求，提供大小上限和内容提取模式
    pub async fn process(&self, url: &str, spec: &CrawlRequestSpec) -> PageResult {
        let start = Instant::now();
        debug!("Fetching {} with {} engine", url, self.engine.name());
        let domain = domain_of(url);
        let mut metrics = PerformanceMetrics::default();

        let response = match self.engine.fetch(&self.profile.request(url)).await {
            Ok(response) => response,
            Err(e) => return transport_failure(url, domain, start.elapsed(), &e),
        };

        metrics.dns_time = response.timing.setup.as_secs_f64();
        metrics.response_time = response.timing.response.as_secs_f64();
        metrics.download_time = response.timing.download.as_secs_f64();
        metrics.status_code = response.status_code;
        metrics.html_size = response.body.len();

        if let (Some(limit), Some(max_bytes)) = (spec.max_size_kib, spec.max_size_bytes()) {
            if response.body.len() as u64 > max_bytes {
                debug!("{} is {} bytes, over the {}KB limit", url, response.body.len(), limit);
                return PageResult::SizeExceeded(PageSizeExceeded {
                    url: url.to_string(),
                    size: response.body.len(),
                    time: start.elapsed().as_secs_f64(),
                    status: format!("page exceeds the maximum size limit ({}KB)", limit),
                    performance: metrics,
                    domain,
                    max_size_kib: limit,
                });
            }
        }

        let content = match analyze(url, &response, spec.content_mode) {
            Ok(content) => content,
            Err(e) => return processing_failure(url, domain, start.elapsed(), &e),
        };

        metrics.parse_time = content.parse_time.as_secs_f64();
        let image_count = content.images.as_ref().map(Vec::len);
        let text_length = content.text.as_ref().map(|t| t.chars().count());
        metrics.image_count = image_count.unwrap_or_default();
        metrics.text_length = text_length.unwrap_or_default();

        let elapsed = start.elapsed().as_secs_f64();
        metrics.total_time = elapsed;

        let page = PageSuccess {
            url: url.to_string(),
            size: response.body.len(),
            time: elapsed,
            status: STATUS_SUCCESS.to_string(),
            performance: metrics,
            domain,
            content_type: response.content_type,
            status_code: response.status_code,
            headers: response.headers,
            images: content.images,
            text: content.text,
            image_count,
            text_length,
        };

        if let Err(e) = self.sink.persist(&page).await {
            warn!("Failed to persist result for {}: {}", url, e);
        }

        PageResult::Success(page)
    }
}

/// 解码、解析并提取内容
///
/// 文档只在该同步函数内存在，不会跨越 await。
fn analyze(url: &str, response: &FetchResponse, mode: ContentMode) -> Result<PageContent, ProcessingError> {
    let base_url = Url::parse(url).map_err(|source| ProcessingError::InvalidBaseUrl {
        url: url.to_string(),
        source,
    })?;

    let parse_start = Instant::now();
    let decoded = decode_body(&response.body, &response.content_type);
    if decoded.had_errors {
        warn!("{} contained bytes invalid in {}, replaced", url, decoded.encoding);
    } else {
        debug!("Decoded {} as {}", url, decoded.encoding);
    }
    let document = ExtractionService::parse(&decoded.text);
    let parse_time = parse_start.elapsed();

    let images = mode
        .wants_images()
        .then(|| ExtractionService::extract_images(&document, &base_url));
    let text = mode
        .wants_text()
        .then(|| ExtractionService::extract_text(&document));

    Ok(PageContent {
        images,
        text,
        parse_time,
    })
}

fn transport_failure(url: &str, domain: String, elapsed: Duration, error: &EngineError) -> PageResult {
    PageResult::Failed(PageFailure {
        url: url.to_string(),
        size: 0,
        time: elapsed.as_secs_f64(),
        status: format!("request failed: {}", error),
        error_type: error.category(),
        error_details: error.to_string(),
        domain,
    })
}

fn processing_failure(url: &str, domain: String, elapsed: Duration, error: &ProcessingError) -> PageResult {
    PageResult::Failed(PageFailure {
        url: url.to_string(),
        size: 0,
        time: elapsed.as_secs_f64(),
        status: format!("failed: {}", error),
        error_type: ErrorCategory::ProcessingError,
        error_details: error.to_string(),
        domain,
    })
}

#[cfg(test)]
#[path = "page_processor_test.rs"]
mod tests;
