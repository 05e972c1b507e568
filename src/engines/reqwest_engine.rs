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

use crate::engines::traits::{
    EngineError, FetchRequest, FetchResponse, FetchTiming, ScraperEngine,
};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::collections::HashMap;
use std::time::Instant;
use tracing::debug;

/// 抓取引擎
///
/// 基于reqwest实现的基本HTTP抓取引擎
pub struct ReqwestEngine;

#[async_trait]
impl ScraperEngine for ReqwestEngine {
    /// 执行HTTP抓取
    ///
    /// # 参数
    ///
    /// * `request` - 抓取请求
    ///
    /// # 返回值
    ///
    /// * `Ok(FetchResponse)` - 状态码为 2xx 的完整响应
    /// * `Err(EngineError)` - 网络错误、超时或非 2xx 状态码
    async fn fetch(&self, request: &FetchRequest) -> Result<FetchResponse, EngineError> {
        // Build headers
        let mut headers = HeaderMap::new();
        for (k, v) in &request.headers {
            let name = HeaderName::from_bytes(k.as_bytes())
                .map_err(|e| EngineError::InvalidHeader(format!("{}: {}", k, e)))?;
            let value = HeaderValue::from_str(v)
                .map_err(|e| EngineError::InvalidHeader(format!("{}: {}", k, e)))?;
            headers.insert(name, value);
        }

        // Each request gets a fresh client for cookie isolation
        let setup_start = Instant::now();
        let mut builder = reqwest::Client::builder()
            .timeout(request.timeout)
            .cookie_store(true);

        // Handle TLS verification
        if request.skip_tls_verification {
            builder = builder.danger_accept_invalid_certs(true);
        }

        let client = builder.build()?;
        let setup = setup_start.elapsed();

        let response_start = Instant::now();
        let response = client.get(&request.url).headers(headers).send().await?;
        let response_time = response_start.elapsed();

        let status_code = response.status().as_u16();
        debug!("{} responded with {}", request.url, status_code);
        let response = response.error_for_status()?;

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        // Repeated headers are comma-joined in arrival order
        let mut response_headers: HashMap<String, String> = HashMap::new();
        for (k, v) in response.headers() {
            if let Ok(v_str) = v.to_str() {
                response_headers
                    .entry(k.as_str().to_string())
                    .and_modify(|joined| {
                        joined.push_str(", ");
                        joined.push_str(v_str);
                    })
                    .or_insert_with(|| v_str.to_string());
            }
        }

        let download_start = Instant::now();
        let body = response.bytes().await?;
        let download = download_start.elapsed();

        Ok(FetchResponse {
            status_code,
            content_type,
            headers: response_headers,
            body,
            timing: FetchTiming {
                setup,
                response: response_time,
                download,
            },
        })
    }

    /// 获取引擎名称
    fn name(&self) -> &'static str {
        "reqwest"
    }
}

#[cfg(test)]
#[path = "reqwest_engine_test.rs"]
mod tests;
