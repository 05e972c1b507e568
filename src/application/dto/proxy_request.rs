// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// 图片中转查询参数
#[derive(Debug, Deserialize, Serialize)]
pub struct ProxyImageQuery {
    /// 图片地址
    pub url: Option<String>,
    /// 上游请求使用的 Referer
    pub referer: Option<String>,
}
