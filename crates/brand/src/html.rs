//! Minimal regex-based HTML tag and attribute helpers.
//!
//! These are not an HTML parser: they scan raw markup for opening tags and
//! quoted `name="value"` pairs, which is enough for brand metadata.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use std::sync::LazyLock;

use regex::Regex;

static ATTRIBUTE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([a-zA-Z_:][A-Za-z0-9_:.\-]*)\s*=\s*("[^"]*"|'[^']*')"#).expect("valid regex")
});

static IMG_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<img\b[^>]*>").expect("valid regex"));

static LINK_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<link\b[^>]*>").expect("valid regex"));

/// Parse quoted attributes of a single tag. Names are lowercased; a repeated
/// attribute keeps its last value.
pub(crate) fn parse_attributes(tag: &str) -> HashMap<String, String> {
    ATTRIBUTE_RE
        .captures_iter(tag)
        .map(|caps| {
            let name = caps[1].to_lowercase();
            let raw = &caps[2];
            (name, raw[1..raw.len() - 1].to_string())
        })
        .collect()
}

pub(crate) fn img_tags(html: &str) -> impl Iterator<Item = &str> {
    IMG_TAG_RE.find_iter(html).map(|m| m.as_str())
}

pub(crate) fn link_tags(html: &str) -> impl Iterator<Item = &str> {
    LINK_TAG_RE.find_iter(html).map(|m| m.as_str())
}

fn meta_tag_regex(key: &str) -> Option<Regex> {
    Regex::new(&format!(
        r#"(?i)<meta[^>]+(?:name|property)=["']{}["'][^>]*>"#,
        regex::escape(key)
    ))
    .ok()
}

/// Every non-empty `content` value of `<meta name|property="key">` tags, in
/// document order.
pub(crate) fn meta_contents(html: &str, key: &str) -> Vec<String> {
    let Some(re) = meta_tag_regex(key) else {
        return Vec::new();
    };
    re.find_iter(html)
        .filter_map(|m| parse_attributes(m.as_str()).remove("content"))
        .filter(|content| !content.is_empty())
        .collect()
}

/// Trimmed `content` of the first `<meta name|property="key">` tag, if any.
pub(crate) fn meta_content(html: &str, key: &str) -> Option<String> {
    let tag = meta_tag_regex(key)?.find(html)?;
    let content = parse_attributes(tag.as_str()).remove("content")?;
    let trimmed = content.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Resolve a possibly relative reference against `base`. Returns `None` for
/// empty values or unparseable URLs.
pub(crate) fn resolve_url(base: &str, value: Option<&str>) -> Option<String> {
    let value = value.filter(|v| !v.is_empty())?;
    let base = reqwest::Url::parse(base).ok()?;
    base.join(value).ok().map(String::from)
}

/// Remove duplicates and empty entries, keeping the first occurrence.
pub(crate) fn dedupe_preserve_order<T>(items: impl IntoIterator<Item = T>) -> Vec<T>
where
    T: Eq + Hash + Clone + AsRef<str>,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| !item.as_ref().is_empty() && seen.insert(item.clone()))
        .collect()
}
