// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 该模块包含系统的核心业务逻辑，包括：
/// - 领域模型（models）：批量请求、页面结果和统计数据结构
/// - 仓库接口（repositories）：结果持久化抽象接口
/// - 服务（services）：图片判定、内容提取、页面处理和批量汇总
///
/// 领域层只依赖抓取引擎和结果存储的抽象，不依赖具体实现。
pub mod models;
pub mod repositories;
pub mod services;
