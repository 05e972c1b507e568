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

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// 应用程序配置设置
///
/// 包含服务器、爬取请求、图片中转、结果存储和指标导出等所有配置项
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 服务器配置
    pub server: ServerSettings,
    /// 爬取配置
    pub crawler: CrawlerSettings,
    /// 图片中转配置
    pub relay: RelaySettings,
    /// 存储配置
    pub storage: StorageSettings,
    /// 指标配置
    pub metrics: MetricsSettings,
}

/// 服务器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// 服务器监听主机地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
}

/// 爬取配置设置
///
/// 出站请求头是针对目标站点的固定指纹，按配置处理
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerSettings {
    /// 单次请求超时时间（秒）
    pub timeout_secs: u64,
    /// 是否跳过TLS证书校验
    pub skip_tls_verification: bool,
    /// 请求未指定时的默认页面大小上限（KB）
    pub default_max_size_kib: u64,
    /// User-Agent
    pub user_agent: String,
    /// Accept
    pub accept: String,
    /// Accept-Language
    pub accept_language: String,
    /// Referer
    pub referer: String,
    /// 会话Cookie，为空时不发送
    pub cookie: String,
}

/// 图片中转配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct RelaySettings {
    /// 图片请求使用的 Accept 头
    pub accept: String,
}

/// 存储配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// 是否持久化成功的爬取结果
    pub enabled: bool,
    /// 结果输出目录
    pub output_dir: String,
}

/// 指标配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsSettings {
    /// 是否启用 Prometheus 导出
    pub enabled: bool,
    /// Prometheus 监听地址
    pub listen_addr: String,
}

impl CrawlerSettings {
    /// 请求超时时间
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// 批量爬取使用的固定请求头
    pub fn crawl_headers(&self) -> HashMap<String, String> {
        let mut headers = HashMap::new();
        headers.insert("User-Agent".to_string(), self.user_agent.clone());
        headers.insert("Accept".to_string(), self.accept.clone());
        headers.insert("Accept-Language".to_string(), self.accept_language.clone());
        headers.insert("Connection".to_string(), "keep-alive".to_string());
        if !self.referer.is_empty() {
            headers.insert("Referer".to_string(), self.referer.clone());
        }
        if !self.cookie.is_empty() {
            headers.insert("Cookie".to_string(), self.cookie.clone());
        }
        headers
    }

    /// 图片中转使用的请求头，Referer 由调用方提供
    pub fn relay_headers(&self, relay: &RelaySettings, referer: Option<&str>) -> HashMap<String, String> {
        let mut headers = HashMap::new();
        headers.insert("User-Agent".to_string(), self.user_agent.clone());
        headers.insert("Accept".to_string(), relay.accept.clone());
        headers.insert("Accept-Language".to_string(), self.accept_language.clone());
        if let Some(referer) = referer.filter(|r| !r.is_empty()) {
            headers.insert("Referer".to_string(), referer.to_string());
        }
        headers
    }
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 依次加载内置默认值、配置文件和 `PIXCRAWL__` 前缀的环境变量
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        Self::builder_with_defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("PIXCRAWL").separator("__"))
            .build()?
            .try_deserialize()
    }

    /// 仅使用内置默认值构建配置，不读取文件和环境变量
    pub fn defaults() -> Result<Self, ConfigError> {
        Self::builder_with_defaults()?.build()?.try_deserialize()
    }

    fn builder_with_defaults(
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 5000)?
            // Crawler settings
            .set_default("crawler.timeout_secs", 10)?
            .set_default("crawler.skip_tls_verification", false)?
            .set_default("crawler.default_max_size_kib", 1000)?
            .set_default("crawler.user_agent", DEFAULT_USER_AGENT)?
            .set_default(
                "crawler.accept",
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
            )?
            .set_default("crawler.accept_language", "zh-CN,zh;q=0.9,en;q=0.8")?
            .set_default("crawler.referer", "https://www.bilibili.com")?
            .set_default(
                "crawler.cookie",
                "buvid3=2B4AEB11-5E03-4F41-B288-D037739B4F6833232infoc",
            )?
            .set_default("relay.accept", "image/webp,image/apng,image/*,*/*;q=0.8")?
            // Storage settings
            .set_default("storage.enabled", true)?
            .set_default("storage.output_dir", "./data")?
            // Metrics settings
            .set_default("metrics.enabled", false)?
            .set_default("metrics.listen_addr", "0.0.0.0:9000")
    }
}
