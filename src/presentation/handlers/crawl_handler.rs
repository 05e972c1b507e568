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

use axum::{extract::Extension, Json};
use std::sync::Arc;

use crate::{
    application::dto::crawl_request::CrawlRequestDto,
    domain::{models::batch_stats::BatchReport, services::batch_service::BatchCrawlService},
    presentation::errors::AppError,
};

/// 执行批量爬取
///
/// 整批处理完成后一次性返回全部结果和统计
pub async fn crawl(
    Extension(service): Extension<Arc<BatchCrawlService>>,
    Json(payload): Json<CrawlRequestDto>,
) -> Result<Json<BatchReport>, AppError> {
    let spec = payload.into_spec(service.default_max_size_kib());
    let report = service.run(&spec).await?;
    Ok(Json(report))
}
