// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use url::Url;

use crate::utils::url_utils::has_http_scheme;

/// 图片扩展名（小写）
pub const IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".gif", ".webp", ".bmp", ".ico"];

/// 图床链接特征
///
/// 命中任意一项即视为图片，这类链接常带有 `@100w_100h.webp` 之类的动态处理后缀，
/// 无法靠扩展名识别。
pub const IMAGE_HOST_PATTERNS: &[&str] = &["@", ".hdslb.com", "/bfs/"];

/// 判断候选字符串是否为有效的图片URL
///
/// 只接受 http/https 链接；命中图床特征或路径以图片扩展名结尾（不区分大小写）即通过。
/// 纯字符串判断，对任意输入都返回布尔值。
pub fn is_image_url(candidate: &str) -> bool {
    if !has_http_scheme(candidate) {
        return false;
    }

    if IMAGE_HOST_PATTERNS
        .iter()
        .any(|pattern| candidate.contains(pattern))
    {
        return true;
    }

    match Url::parse(candidate) {
        Ok(url) => {
            let path = url.path().to_ascii_lowercase();
            IMAGE_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
        }
        Err(_) => false,
    }
}
