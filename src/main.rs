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

use pixcrawl::config::settings::Settings;
use pixcrawl::domain::services::batch_service::BatchCrawlService;
use pixcrawl::domain::services::image_relay::ImageRelayService;
use pixcrawl::domain::services::page_processor::{FetchProfile, PageProcessor};
use pixcrawl::engines::reqwest_engine::ReqwestEngine;
use pixcrawl::engines::traits::ScraperEngine;
use pixcrawl::infrastructure::storage::create_result_sink;
use pixcrawl::presentation::routes;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use pixcrawl::utils::telemetry;

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting pixcrawl...");

    // 2. Load configuration
    let settings = Settings::new()?;
    info!("Configuration loaded");

    // 3. Initialize Prometheus Metrics
    pixcrawl::infrastructure::metrics::init_metrics(&settings.metrics)?;

    // 4. Initialize Components
    let engine: Arc<dyn ScraperEngine> = Arc::new(ReqwestEngine);
    info!("Using {} engine", engine.name());
    let sink = create_result_sink(&settings.storage);
    if settings.storage.enabled {
        info!("Persisting crawl results to {}", settings.storage.output_dir);
    }
    if settings.crawler.skip_tls_verification {
        info!("TLS certificate verification is disabled for page fetches");
    }

    let processor = PageProcessor::new(
        engine.clone(),
        sink,
        FetchProfile::for_crawl(&settings.crawler),
    );
    let batch = Arc::new(
        BatchCrawlService::new(processor)
            .with_default_max_size_kib(settings.crawler.default_max_size_kib),
    );
    let relay = Arc::new(ImageRelayService::new(
        engine,
        settings.crawler.clone(),
        settings.relay.clone(),
    ));

    // 5. Start Server
    let app = routes::routes(batch, relay);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    info!("Listening on {}", addr);

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
