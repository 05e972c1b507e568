// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// - 批量请求（crawl_request）：URL 列表、大小上限与内容模式
/// - 页面结果（page_result）：单个URL的处理结果与性能指标
/// - 批量统计（batch_stats）：汇总与按域名统计
pub mod batch_stats;
pub mod crawl_request;
pub mod page_result;
