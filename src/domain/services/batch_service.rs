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

use metrics::{counter, histogram};
use std::time::Instant;
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::models::batch_stats::{BatchReport, BatchStatistics, UNKNOWN_ERROR_TYPE};
use crate::domain::models::crawl_request::CrawlRequestSpec;
use crate::domain::models::page_result::PageResult;
use crate::domain::services::page_processor::PageProcessor;

/// 批量爬取错误类型
#[derive(Error, Debug)]
pub enum CrawlError {
    /// 规范化后没有可抓取的URL
    #[error("请输入要抓取的网址")]
    InvalidInput,
}

/// 请求未指定时的页面大小上限（KB）
pub const DEFAULT_MAX_SIZE_KIB: u64 = 1000;

/// 批量爬取服务
///
/// 按输入顺序逐个处理URL，前一个完全结束后才开始下一个，
/// 并把每条结果累加进本次运行独有的统计对象。
pub struct BatchCrawlService {
    processor: PageProcessor,
    default_max_size_kib: u64,
}

impl BatchCrawlService {
    pub fn new(processor: PageProcessor) -> Self {
        Self {
            processor,
            default_max_size_kib: DEFAULT_MAX_SIZE_KIB,
        }
    }

    pub fn with_default_max_size_kib(mut self, kib: u64) -> Self {
        self.default_max_size_kib = kib;
        self
    }

    /// 请求未指定大小上限时使用的值
    pub fn default_max_size_kib(&self) -> u64 {
        self.default_max_size_kib
    }

    /// 执行一次批量爬取
    ///
    /// # 参数
    ///
    /// * `spec` - 批量请求
    ///
    /// # 返回值
    ///
    /// * `Ok(BatchReport)` - 与输入顺序一致的结果和汇总统计
    /// * `Err(CrawlError::InvalidInput)` - 没有有效URL，未发出任何请求
    pub async fn run(&self, spec: &CrawlRequestSpec) -> Result<BatchReport, CrawlError> {
        let urls = spec.normalized_urls();
        if urls.is_empty() {
            return Err(CrawlError::InvalidInput);
        }

        info!(
            "Starting batch of {} urls (max size: {:?}KB, mode: {:?})",
            urls.len(),
            spec.max_size_kib,
            spec.content_mode
        );
        counter!("crawl_batches_total").increment(1);

        let start = Instant::now();
        let mut stats = BatchStatistics::new(urls.len());
        let mut results = Vec::with_capacity(urls.len());

        for url in &urls {
            let result = self
                .processor
                .process(url, spec)
                .await;

            log_result(&result);
            stats.record(&result);
            results.push(result);
        }

        stats.finalize(start.elapsed());

        info!(
            "Batch finished: {} succeeded, {} failed, {} bytes in {:.3}s",
            stats.success_count, stats.failed_count, stats.total_size, stats.total_time
        );

        Ok(BatchReport { results, stats })
    }
}

fn log_result(result: &PageResult) {
    counter!("crawl_pages_total", "outcome" => result.outcome()).increment(1);
    histogram!("crawl_page_duration_seconds").record(result.elapsed_secs());

    match result {
        PageResult::Success(page) => {
            counter!("crawl_bytes_total").increment(page.size as u64);
            info!(
                "Crawled {} ({} bytes, {:.3}s)",
                page.url, page.size, page.time
            );
        }
        _ => {
            let category = result
                .error_category()
                .map_or(UNKNOWN_ERROR_TYPE, |c| c.as_str());
            warn!("Skipped {} [{}]: {}", result.url(), category, result.status());
        }
    }
}

#[cfg(test)]
#[path = "batch_service_test.rs"]
mod tests;
