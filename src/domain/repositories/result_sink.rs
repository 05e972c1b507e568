// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::models::page_result::PageSuccess;

/// 存储错误类型
#[derive(Error, Debug)]
pub enum StorageError {
    /// IO错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// 序列化错误
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// 结果存储特质
///
/// 接收每个成功的页面结果并持久化。写入失败只记录日志，不影响爬取流程。
#[async_trait]
pub trait ResultSink: Send + Sync {
    /// 持久化一条成功结果
    async fn persist(&self, page: &PageSuccess) -> Result<(), StorageError>;
}
