// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use chrono::Local;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::config::settings::StorageSettings;
use crate::domain::models::page_result::PageSuccess;
use crate::domain::repositories::result_sink::{ResultSink, StorageError};

/// 本地文件系统存储实现
///
/// 每条成功结果写入一个缩进格式的 JSON 文件，
/// 文件名为 `crawl_<域名>_<YYYYmmdd_HHMMSS>.json`。
pub struct LocalResultSink {
    base_path: PathBuf,
}

impl LocalResultSink {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// 结果文件名，域名中的 `:` 替换为 `_`
    ///
    /// 同一秒内同域名的后续结果追加 `_1`、`_2` 等序号
    pub fn file_name(domain: &str, timestamp: &str, sequence: u32) -> String {
        let domain = domain.replace(':', "_");
        if sequence == 0 {
            format!("crawl_{}_{}.json", domain, timestamp)
        } else {
            format!("crawl_{}_{}_{}.json", domain, timestamp, sequence)
        }
    }

    /// 以独占方式创建结果文件，已存在时改用下一个序号
    async fn create_unique(&self, domain: &str) -> Result<(fs::File, PathBuf), StorageError> {
        let timestamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
        let mut sequence = 0;
        loop {
            let path = self
                .base_path
                .join(Self::file_name(domain, &timestamp, sequence));
            match fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(file) => return Ok((file, path)),
                Err(e) if e.kind() == ErrorKind::AlreadyExists => sequence += 1,
                Err(e) => return Err(e.into()),
            }
        }
    }
}

#[async_trait]
impl ResultSink for LocalResultSink {
    async fn persist(&self, page: &PageSuccess) -> Result<(), StorageError> {
        // 确保目录存在
        fs::create_dir_all(&self.base_path).await?;

        let data = serde_json::to_vec_pretty(page)?;

        let (mut file, full_path) = self.create_unique(&page.domain).await?;
        file.write_all(&data).await?;
        file.flush().await?;

        debug!("Saved crawl result to {}", full_path.display());
        Ok(())
    }
}

/// 关闭持久化时使用的空实现
pub struct DisabledResultSink;

#[async_trait]
impl ResultSink for DisabledResultSink {
    async fn persist(&self, _page: &PageSuccess) -> Result<(), StorageError> {
        Ok(())
    }
}

/// 存储工厂函数
pub fn create_result_sink(settings: &StorageSettings) -> Arc<dyn ResultSink> {
    if settings.enabled {
        Arc::new(LocalResultSink::new(&settings.output_dir))
    } else {
        Arc::new(DisabledResultSink)
    }
}

/// 测试用的内存存储实现（用于单元测试）
#[derive(Default)]
pub struct InMemoryResultSink {
    data: tokio::sync::RwLock<Vec<PageSuccess>>,
}

impl InMemoryResultSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// 已保存的结果
    pub async fn saved(&self) -> Vec<PageSuccess> {
        self.data.read().await.clone()
    }
}

#[async_trait]
impl ResultSink for InMemoryResultSink {
    async fn persist(&self, page: &PageSuccess) -> Result<(), StorageError> {
        self.data.write().await.push(page.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::page_result::PerformanceMetrics;
    use std::collections::HashMap;

    fn page() -> PageSuccess {
        PageSuccess {
            url: "http://127.0.0.1:8080/视频".to_string(),
            size: 12,
            time: 0.25,
            status: "success".to_string(),
            performance: PerformanceMetrics::default(),
            domain: "127.0.0.1:8080".to_string(),
            content_type: "text/html".to_string(),
            status_code: 200,
            headers: HashMap::new(),
            images: Some(vec!["https://i0.hdslb.com/bfs/a.jpg".to_string()]),
            text: Some("哔哩哔哩".to_string()),
            image_count: Some(1),
            text_length: Some(4),
        }
    }

    #[test]
    fn test_file_name_replaces_port_separator() {
        assert_eq!(
            LocalResultSink::file_name("127.0.0.1:8080", "20250101_120000", 0),
            "crawl_127.0.0.1_8080_20250101_120000.json"
        );
        assert_eq!(
            LocalResultSink::file_name("a.com", "20250101_120000", 2),
            "crawl_a.com_20250101_120000_2.json"
        );
    }

    #[tokio::test]
    async fn test_same_second_results_do_not_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let sink = LocalResultSink::new(dir.path());

        let mut second = page();
        second.url = "http://127.0.0.1:8080/other".to_string();
        for p in [page(), second.clone(), page()] {
            sink.persist(&p).await.unwrap();
        }

        let mut contents: Vec<PageSuccess> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| {
                let text = std::fs::read_to_string(entry.unwrap().path()).unwrap();
                serde_json::from_str(&text).unwrap()
            })
            .collect();
        assert_eq!(contents.len(), 3);
        contents.retain(|p| p.url == second.url);
        assert_eq!(contents, vec![second]);
    }

    #[tokio::test]
    async fn test_local_sink_writes_pretty_unescaped_json() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("nested").join("data");
        let sink = LocalResultSink::new(&output);

        sink.persist(&page()).await.unwrap();

        let mut entries = std::fs::read_dir(&output).unwrap();
        let entry = entries.next().unwrap().unwrap();
        let name = entry.file_name().into_string().unwrap();
        assert!(name.starts_with("crawl_127.0.0.1_8080_"));
        assert!(name.ends_with(".json"));

        let contents = std::fs::read_to_string(entry.path()).unwrap();
        assert!(contents.contains("哔哩哔哩"));
        assert!(contents.contains("\n  \"url\""));

        let restored: PageSuccess = serde_json::from_str(&contents).unwrap();
        assert_eq!(restored, page());
    }

    #[tokio::test]
    async fn test_in_memory_sink_records_pages() {
        let sink = InMemoryResultSink::new();
        sink.persist(&page()).await.unwrap();
        assert_eq!(sink.saved().await.len(), 1);
    }

    #[tokio::test]
    async fn test_factory_respects_enabled_flag() {
        let dir = tempfile::tempdir().unwrap();
        let settings = StorageSettings {
            enabled: false,
            output_dir: dir.path().join("out").to_string_lossy().to_string(),
        };
        let sink = create_result_sink(&settings);
        sink.persist(&page()).await.unwrap();
        assert!(!dir.path().join("out").exists());
    }
}
