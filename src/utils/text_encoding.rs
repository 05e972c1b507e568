// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8};
use once_cell::sync::Lazy;
use regex::Regex;

/// HTTP Content-Type 头中的编码声明
static CONTENT_TYPE_CHARSET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)charset\s*=\s*["']?([^;"'\s]+)"#).expect("valid regex"));

/// HTML meta 标签中的编码声明
static META_CHARSET: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)<meta[^>]*charset\s*=\s*["']?([^"'>\s/;]+)"#).expect("valid regex")
});

/// meta 声明的扫描范围
const META_SNIFF_LIMIT: usize = 4096;

/// 解码后的响应体
#[derive(Debug, Clone)]
pub struct DecodedBody {
    pub text: String,
    /// 实际使用的编码名称
    pub encoding: &'static str,
    /// 解码过程中是否出现替换字符
    pub had_errors: bool,
}

/// 将响应体解码为UTF-8字符串
///
/// 编码来源优先级：Content-Type 声明、HTML meta 声明、chardetng 检测。
/// 字节序标记始终优先于上述来源。
pub fn decode_body(body: &[u8], content_type: &str) -> DecodedBody {
    let encoding = declared_encoding(content_type)
        .or_else(|| sniff_meta_encoding(body))
        .unwrap_or_else(|| detect_encoding(body));

    let (decoded, used, had_errors) = encoding.decode(body);

    DecodedBody {
        text: decoded.into_owned(),
        encoding: used.name(),
        had_errors,
    }
}

fn declared_encoding(content_type: &str) -> Option<&'static Encoding> {
    let label = CONTENT_TYPE_CHARSET.captures(content_type)?.get(1)?;
    Encoding::for_label(label.as_str().as_bytes())
}

fn sniff_meta_encoding(body: &[u8]) -> Option<&'static Encoding> {
    let head = &body[..body.len().min(META_SNIFF_LIMIT)];
    let head = String::from_utf8_lossy(head);
    let label = META_CHARSET.captures(&head)?.get(1)?;
    Encoding::for_label(label.as_str().as_bytes())
}

fn detect_encoding(body: &[u8]) -> &'static Encoding {
    if std::str::from_utf8(body).is_ok() {
        return UTF_8;
    }
    let mut detector = EncodingDetector::new();
    detector.feed(body, true);
    detector.guess(None, true)
}
