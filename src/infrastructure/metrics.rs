// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use metrics::{describe_counter, describe_histogram, Unit};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use tracing::{info, warn};

use crate::config::settings::MetricsSettings;

/// 初始化指标系统
///
/// 未启用时不安装导出器，指标宏调用为空操作
pub fn init_metrics(settings: &MetricsSettings) -> anyhow::Result<()> {
    if !settings.enabled {
        return Ok(());
    }

    let addr: SocketAddr = settings.listen_addr.parse()?;

    // Ignore error if address is already in use (for development/testing)
    if let Err(e) = PrometheusBuilder::new().with_http_listener(addr).install() {
        warn!("Failed to install Prometheus recorder: {}", e);
        return Ok(());
    }

    describe_counter!("crawl_batches_total", "Total number of batch crawls started");
    describe_counter!("crawl_pages_total", "Total number of pages processed, by outcome");
    describe_counter!(
        "crawl_bytes_total",
        Unit::Bytes,
        "Total bytes downloaded by successful page fetches"
    );
    describe_histogram!(
        "crawl_page_duration_seconds",
        Unit::Seconds,
        "Time spent processing a single page"
    );

    info!("Metrics exporter listening on {}", addr);
    Ok(())
}
