// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use url::{ParseError, Url};

/// 是否以 http:// 或 https:// 开头
pub fn has_http_scheme(candidate: &str) -> bool {
    candidate.starts_with("http://") || candidate.starts_with("https://")
}

/// 将可能为相对路径的URL转换为绝对路径URL
pub fn resolve_url(base_url: &Url, path: &str) -> Result<Url, ParseError> {
    base_url.join(path)
}

/// 解析候选链接，已是绝对地址的保持原样
pub fn absolutize(base_url: &Url, candidate: &str) -> Option<String> {
    if has_http_scheme(candidate) {
        return Some(candidate.to_string());
    }
    resolve_url(base_url, candidate).ok().map(String::from)
}

/// URL 的主机部分（含非默认端口），无法解析时返回空字符串
pub fn domain_of(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => match (parsed.host_str(), parsed.port()) {
            (Some(host), Some(port)) => format!("{}:{}", host, port),
            (Some(host), None) => host.to_string(),
            _ => String::new(),
        },
        Err(_) => String::new(),
    }
}
