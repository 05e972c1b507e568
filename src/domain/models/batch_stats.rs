// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

use super::page_result::PageResult;

/// 非成功结果缺少错误分类时使用的键
pub const UNKNOWN_ERROR_TYPE: &str = "Unknown";

/// 单个域名的统计
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DomainStats {
    pub count: u64,
    /// 成功请求的字节数之和
    pub total_size: u64,
    /// 成功请求的耗时之和（秒）
    pub total_time: f64,
    pub success_count: u64,
    pub failed_count: u64,
    pub avg_time: f64,
    pub avg_size: f64,
}

/// 批量运行的汇总统计
///
/// 由批量循环独占持有并逐条累加，循环结束后调用 [`BatchStatistics::finalize`]
/// 计算派生的平均值。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchStatistics {
    pub total_urls: u64,
    pub success_count: u64,
    pub failed_count: u64,
    /// 仅统计成功请求
    pub total_size: u64,
    /// 整个批次的墙钟耗时（秒）
    pub total_time: f64,
    pub avg_time_per_page: f64,
    pub avg_size_per_page: f64,
    pub domains: BTreeMap<String, DomainStats>,
    pub error_types: BTreeMap<String, u64>,
}

impl BatchStatistics {
    pub fn new(total_urls: usize) -> Self {
        Self {
            total_urls: total_urls as u64,
            ..Default::default()
        }
    }

    /// 累加一条结果
    ///
    /// 只有成功变体计为成功；超限与失败均计为失败，且不累加大小和耗时。
    pub fn record(&mut self, result: &PageResult) {
        let domain = self.domains.entry(result.domain().to_string()).or_default();
        domain.count += 1;

        if result.is_success() {
            let size = result.size() as u64;
            self.success_count += 1;
            self.total_size += size;

            domain.success_count += 1;
            domain.total_size += size;
            domain.total_time += result.elapsed_secs();
        } else {
            self.failed_count += 1;
            domain.failed_count += 1;

            let key = result
                .error_category()
                .map(|c| c.as_str())
                .unwrap_or(UNKNOWN_ERROR_TYPE);
            *self.error_types.entry(key.to_string()).or_insert(0) += 1;
        }
    }

    /// 写入批次总耗时并计算平均值
    ///
    /// 没有成功请求时平均值保持为 0。
    pub fn finalize(&mut self, elapsed: Duration) {
        self.total_time = elapsed.as_secs_f64();

        if self.success_count > 0 {
            self.avg_time_per_page = self.total_time / self.success_count as f64;
            self.avg_size_per_page = self.total_size as f64 / self.success_count as f64;
        }

        for stats in self.domains.values_mut() {
            if stats.success_count > 0 {
                stats.avg_time = stats.total_time / stats.success_count as f64;
                stats.avg_size = stats.total_size as f64 / stats.success_count as f64;
            }
        }
    }
}

/// 批量运行的完整报告
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    /// 与输入顺序一致的结果列表
    pub results: Vec<PageResult>,
    pub stats: BatchStatistics,
}
