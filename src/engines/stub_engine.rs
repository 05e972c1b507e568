// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::engines::traits::{EngineError, FetchRequest, FetchResponse, FetchTiming, ScraperEngine};

/// 测试用的固定响应引擎
///
/// 按URL返回预设的响应，未登记的URL返回请求头错误；同时记录调用顺序和请求头。
#[derive(Default)]
pub struct StubEngine {
    pages: HashMap<String, (String, Bytes)>,
    calls: Mutex<Vec<FetchRequest>>,
}

impl StubEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// 登记一个返回 200 的页面
    pub fn with_page(mut self, url: &str, content_type: &str, body: impl Into<Bytes>) -> Self {
        self.pages
            .insert(url.to_string(), (content_type.to_string(), body.into()));
        self
    }

    /// 已发出的请求，按调用顺序
    pub fn calls(&self) -> Vec<FetchRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ScraperEngine for StubEngine {
    async fn fetch(&self, request: &FetchRequest) -> Result<FetchResponse, EngineError> {
        self.calls.lock().unwrap().push(request.clone());

        let (content_type, body) = self
            .pages
            .get(&request.url)
            .cloned()
            .ok_or_else(|| EngineError::InvalidHeader(format!("no stub for {}", request.url)))?;

        let mut headers = HashMap::new();
        headers.insert("content-type".to_string(), content_type.clone());

        Ok(FetchResponse {
            status_code: 200,
            content_type,
            headers,
            body,
            timing: FetchTiming::default(),
        })
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}
