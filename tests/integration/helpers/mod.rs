// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum_test::TestServer;
use pixcrawl::config::settings::Settings;
use pixcrawl::domain::repositories::result_sink::ResultSink;
use pixcrawl::domain::services::batch_service::BatchCrawlService;
use pixcrawl::domain::services::image_relay::ImageRelayService;
use pixcrawl::domain::services::page_processor::{FetchProfile, PageProcessor};
use pixcrawl::engines::reqwest_engine::ReqwestEngine;
use pixcrawl::engines::traits::ScraperEngine;
use pixcrawl::infrastructure::storage::InMemoryResultSink;
use pixcrawl::presentation::routes;
use std::sync::Arc;

pub struct TestApp {
    pub server: TestServer,
    pub sink: Arc<InMemoryResultSink>,
}

pub fn create_test_app() -> TestApp {
    let sink = Arc::new(InMemoryResultSink::new());
    let server = create_test_server(sink.clone());
    TestApp { server, sink }
}

/// 使用给定的结果存储构建测试服务
pub fn create_test_server(sink: Arc<dyn ResultSink>) -> TestServer {
    let settings = Settings::defaults().expect("default settings");
    let engine: Arc<dyn ScraperEngine> = Arc::new(ReqwestEngine);

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

    TestServer::new(routes::routes(batch, relay)).expect("test server")
}
