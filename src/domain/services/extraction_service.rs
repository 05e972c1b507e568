// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use html5ever::driver::{self, ParseOpts};
use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;
use once_cell::sync::Lazy;
use scraper::{Html, HtmlTreeSink, Node, Selector};
use serde_json::Value;
use std::collections::HashSet;
use url::Url;

use crate::domain::services::image_classifier::is_image_url;
use crate::utils::url_utils::absolutize;

static IMG_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("img").expect("valid selector"));
static OG_IMAGE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"meta[property="og:image"]"#).expect("valid selector"));
static THUMBNAIL_META_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"meta[itemprop="thumbnailUrl"]"#).expect("valid selector"));
static LD_JSON_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"script[type="application/ld+json"]"#).expect("valid selector")
});

/// 结构化数据中携带图片地址的字段
const LD_JSON_IMAGE_FIELDS: &[&str] = &["thumbnailUrl", "image"];

/// 不参与可见文本的元素
const NON_VISIBLE_ELEMENTS: &[&str] = &["script", "style"];

/// 提取服务
///
/// 负责从已解析的 HTML 文档中提取图片链接和可见文本
pub struct ExtractionService;

impl ExtractionService {
    /// 解析 HTML 文档
    ///
    /// 以关闭脚本的模式解析，`<noscript>` 的内容按普通元素建树，
    /// 其中的 `<img>` 和文本都能被提取。
    pub fn parse(text: &str) -> Html {
        let opts = ParseOpts {
            tree_builder: TreeBuilderOpts {
                scripting_enabled: false,
                ..Default::default()
            },
            ..Default::default()
        };
        driver::parse_document(HtmlTreeSink::new(Html::new_document()), opts).one(text)
    }

    /// 提取图片链接
    ///
    /// 按发现顺序收集 `<img>`、`og:image`、`itemprop="thumbnailUrl"` 和
    /// JSON-LD 中的候选地址，逐个经过图片判定后按首次出现顺序去重。
    ///
    /// # 参数
    ///
    /// * `document` - 已解析的文档
    /// * `base_url` - 用于解析相对路径的页面地址
    pub fn extract_images(document: &Html, base_url: &Url) -> Vec<String> {
        let mut candidates = Vec::new();

        for img in document.select(&IMG_SELECTOR) {
            let src = img
                .value()
                .attr("src")
                .filter(|s| !s.is_empty())
                .or_else(|| img.value().attr("data-src").filter(|s| !s.is_empty()));
            if let Some(resolved) = src.and_then(|s| absolutize(base_url, s)) {
                candidates.push(resolved);
            }
        }

        if let Some(content) = document
            .select(&OG_IMAGE_SELECTOR)
            .next()
            .and_then(|meta| meta.value().attr("content"))
        {
            candidates.push(content.to_string());
        }

        for meta in document.select(&THUMBNAIL_META_SELECTOR) {
            if let Some(content) = meta.value().attr("content") {
                candidates.push(content.to_string());
            }
        }

        for script in document.select(&LD_JSON_SELECTOR) {
            let raw = script.text().collect::<String>();
            // Malformed blocks are skipped
            let Ok(Value::Object(data)) = serde_json::from_str::<Value>(&raw) else {
                continue;
            };
            for field in LD_JSON_IMAGE_FIELDS {
                match data.get(*field) {
                    Some(Value::String(url)) => candidates.push(url.clone()),
                    Some(Value::Array(urls)) => candidates.extend(
                        urls.iter().filter_map(Value::as_str).map(str::to_string),
                    ),
                    _ => {}
                }
            }
        }

        let mut seen = HashSet::new();
        candidates
            .into_iter()
            .filter(|candidate| is_image_url(candidate))
            .filter(|candidate| seen.insert(candidate.clone()))
            .collect()
    }

    /// 提取可见文本
    ///
    /// 跳过 script/style 子树，其余文本节点逐个去除首尾空白后以单个空格连接，
    /// 空节点不参与拼接。
    pub fn extract_text(document: &Html) -> String {
        document
            .tree
            .root()
            .descendants()
            .filter_map(|node| match node.value() {
                Node::Text(text) => Some((node, text)),
                _ => None,
            })
            .filter(|(node, _)| {
                !node.ancestors().any(|ancestor| {
                    ancestor
                        .value()
                        .as_element()
                        .is_some_and(|el| NON_VISIBLE_ELEMENTS.contains(&el.name()))
                })
            })
            .map(|(_, text)| text.trim())
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
#[path = "extraction_service_test.rs"]
mod tests;
