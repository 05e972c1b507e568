// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施模块
///
/// - 指标（metrics）：Prometheus 导出与指标注册
/// - 存储（storage）：爬取结果的持久化实现
pub mod metrics;
pub mod storage;
