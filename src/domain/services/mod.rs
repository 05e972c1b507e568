// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 包含的服务：
/// - 图片判定（image_classifier）：判断候选字符串是否为图片链接
/// - 提取服务（extraction_service）：从文档中提取图片链接和可见文本
/// - 页面处理（page_processor）：单个URL的抓取、大小检查、解析与提取
/// - 批量服务（batch_service）：顺序处理URL列表并汇总统计
/// - 图片中转（image_relay）：携带 Referer 拉取图片
pub mod batch_service;
pub mod extraction_service;
pub mod image_classifier;
pub mod image_relay;
pub mod page_processor;
