//! Brand profile extraction from raw HTML.

use std::collections::HashMap;
use std::sync::LazyLock;

use pomelli_core::types::Timestamp;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::html::{
    dedupe_preserve_order, img_tags, link_tags, meta_content, meta_contents, parse_attributes,
    resolve_url,
};

/// Most frequent colors kept in a profile.
pub const MAX_COLORS: usize = 8;
/// Font families kept in a profile.
pub const MAX_FONT_FAMILIES: usize = 8;
/// Image URLs kept in a profile.
pub const MAX_IMAGE_URLS: usize = 20;

static HEX_COLOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    // ASCII word boundary: a non-ASCII letter right after the digits ends the color.
    Regex::new(r"#(?:[0-9a-fA-F]{3,4}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})(?-u:\b)")
        .expect("valid regex")
});

static FONT_FAMILY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)font-family\s*:\s*([^;}]*)").expect("valid regex"));

static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<title[^>]*>([^<]*)</title>").expect("valid regex"));

static HTTP_SCHEME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^https?://").expect("valid regex"));

/// Metadata extracted from a fetched HTML document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandProfile {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Uppercase `#RRGGBB` / `#RRGGBBAA`, most frequent first.
    pub colors: Vec<String>,
    pub font_families: Vec<String>,
    pub logo_urls: Vec<String>,
    pub image_urls: Vec<String>,
    pub fetched_at: Timestamp,
}

/// Trim and default to `https://` when no HTTP(S) scheme is present.
pub fn ensure_http_url(raw_url: &str) -> String {
    let trimmed = raw_url.trim();
    if HTTP_SCHEME_RE.is_match(trimmed) {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    }
}

/// Extract a [`BrandProfile`] from `html`, resolving relative asset URLs
/// against `base_url`.
pub fn extract_brand_profile(base_url: &str, html: &str) -> BrandProfile {
    let url = ensure_http_url(base_url);

    BrandProfile {
        title: extract_title(html),
        description: meta_content(html, "description"),
        colors: extract_hex_colors(html),
        font_families: extract_font_families(html),
        logo_urls: select_logo_urls(html, &url),
        image_urls: select_image_urls(html, &url),
        fetched_at: chrono::Utc::now(),
        url,
    }
}

fn extract_title(html: &str) -> Option<String> {
    let caps = TITLE_RE.captures(html)?;
    let title = caps[1].trim();
    (!title.is_empty()).then(|| title.to_string())
}

/// Expand short hex forms and uppercase.
fn normalize_hex(color: &str) -> String {
    let cleaned = color.trim();
    let Some(digits) = cleaned.strip_prefix('#') else {
        return cleaned.to_string();
    };
    match digits.len() {
        3 | 4 => {
            let doubled: String = digits.chars().flat_map(|c| [c, c]).collect();
            format!("#{doubled}").to_uppercase()
        }
        _ => cleaned.to_uppercase(),
    }
}

fn extract_hex_colors(html: &str) -> Vec<String> {
    // (color, count) in first-seen order so the stable sort breaks ties by it.
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();
    for m in HEX_COLOR_RE.find_iter(html) {
        let color = normalize_hex(m.as_str());
        match positions.get(&color) {
            Some(&i) => counts[i].1 += 1,
            None => {
                positions.insert(color.clone(), counts.len());
                counts.push((color, 1));
            }
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .take(MAX_COLORS)
        .map(|(color, _)| color)
        .collect()
}

fn extract_font_families(html: &str) -> Vec<String> {
    let families = FONT_FAMILY_RE.captures_iter(html).flat_map(|caps| {
        caps[1]
            .split(',')
            .map(|part| part.replace(['\'', '"'], "").trim().to_string())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
    });
    let mut deduped = dedupe_preserve_order(families);
    deduped.truncate(MAX_FONT_FAMILIES);
    deduped
}

fn select_logo_urls(html: &str, base_url: &str) -> Vec<String> {
    let mut logos = Vec::new();

    for tag in img_tags(html) {
        let attrs = parse_attributes(tag);
        let mentions_logo = ["alt", "class", "id"].iter().any(|key| {
            attrs
                .get(*key)
                .is_some_and(|value| value.to_lowercase().contains("logo"))
        });
        if mentions_logo {
            if let Some(resolved) = resolve_url(base_url, attrs.get("src").map(String::as_str)) {
                logos.push(resolved);
            }
        }
    }

    for tag in link_tags(html) {
        let attrs = parse_attributes(tag);
        let is_icon = attrs
            .get("rel")
            .is_some_and(|rel| rel.to_lowercase().contains("icon"));
        if is_icon {
            if let Some(resolved) = resolve_url(base_url, attrs.get("href").map(String::as_str)) {
                logos.push(resolved);
            }
        }
    }

    if let Some(resolved) = resolve_url(base_url, meta_content(html, "og:logo").as_deref()) {
        logos.push(resolved);
    }

    dedupe_preserve_order(logos)
}

/// Raw image references: social card meta tags first, then `<img>` sources.
fn collect_image_candidates(html: &str) -> Vec<String> {
    let mut candidates = meta_contents(html, "og:image");
    candidates.extend(meta_contents(html, "twitter:image"));

    for tag in img_tags(html) {
        let attrs = parse_attributes(tag);
        if let Some(src) = attrs.get("src").filter(|s| !s.is_empty()) {
            candidates.push(src.clone());
        }
        let first_srcset = attrs.get("srcset").and_then(|srcset| {
            srcset
                .split(',')
                .next()
                .and_then(|entry| entry.trim().split(' ').next())
                .filter(|url| !url.is_empty())
                .map(str::to_string)
        });
        if let Some(url) = first_srcset {
            candidates.push(url);
        }
    }

    candidates
}

fn select_image_urls(html: &str, base_url: &str) -> Vec<String> {
    let resolved = collect_image_candidates(html)
        .iter()
        .filter_map(|candidate| resolve_url(base_url, Some(candidate.as_str())))
        .collect::<Vec<_>>();
    let mut deduped = dedupe_preserve_order(resolved);
    deduped.truncate(MAX_IMAGE_URLS);
    deduped
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_HTML: &str = r#"
<html>
  <head>
    <title>Eyesights Tech</title>
    <meta name="description" content="See further with AI." />
    <meta property="og:image" content="/images/social-card.png" />
    <link rel="icon" href="/favicon.ico" />
    <style>
      body { background-color: #112233; font-family: 'Inter', sans-serif; }
      h1 { color: #123; font-family: "Roboto", serif; }
    </style>
  </head>
  <body>
    <img src="/assets/logo.svg" alt="Eyesights Logo" />
    <img src="/assets/hero.jpg" />
  </body>
</html>
"#;

    #[test]
    fn extracts_full_profile() {
        let profile = extract_brand_profile("https://eyesights.tech", SAMPLE_HTML);

        assert_eq!(profile.url, "https://eyesights.tech");
        assert_eq!(profile.title.as_deref(), Some("Eyesights Tech"));
        assert_eq!(profile.description.as_deref(), Some("See further with AI."));
        assert_eq!(profile.colors, vec!["#112233"]);
        assert_eq!(
            profile.font_families,
            vec!["Inter", "sans-serif", "Roboto", "serif"]
        );
        assert_eq!(
            profile.logo_urls,
            vec![
                "https://eyesights.tech/assets/logo.svg",
                "https://eyesights.tech/favicon.ico",
            ]
        );
        assert_eq!(
            profile.image_urls,
            vec![
                "https://eyesights.tech/images/social-card.png",
                "https://eyesights.tech/assets/logo.svg",
                "https://eyesights.tech/assets/hero.jpg",
            ]
        );
    }

    #[test]
    fn serializes_camel_case() {
        let profile = extract_brand_profile("example.com", "<p>nothing</p>");
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["url"], "https://example.com");
        assert!(json["fontFamilies"].as_array().unwrap().is_empty());
        assert!(json["fetchedAt"].is_string());
        assert!(json.get("title").is_none());
        assert!(json.get("description").is_none());
    }

    #[test]
    fn url_scheme_defaulting() {
        assert_eq!(ensure_http_url("  example.com "), "https://example.com");
        assert_eq!(ensure_http_url("http://example.com"), "http://example.com");
        assert_eq!(ensure_http_url("HTTPS://Example.com"), "HTTPS://Example.com");
    }

    #[test]
    fn hex_normalization() {
        assert_eq!(normalize_hex("#abc"), "#AABBCC");
        assert_eq!(normalize_hex("#abcd"), "#AABBCCDD");
        assert_eq!(normalize_hex("#a1b2c3"), "#A1B2C3");
        assert_eq!(normalize_hex("#a1b2c3d4"), "#A1B2C3D4");
    }

    #[test]
    fn colors_ranked_by_frequency_then_first_seen() {
        let html = "#fff #000000 #ABCDEF #000 #abcdef #000";
        assert_eq!(
            extract_hex_colors(html),
            vec!["#000000", "#ABCDEF", "#FFFFFF"]
        );
    }

    #[test]
    fn colors_require_word_boundary() {
        // Five and seven digit runs are not colors.
        assert!(extract_hex_colors("#12345 #1234567").is_empty());
    }

    #[test]
    fn colors_end_at_non_ascii_letter() {
        assert_eq!(extract_hex_colors("color:#abcé"), vec!["#AABBCC"]);
        assert_eq!(extract_hex_colors("#12345é"), Vec::<String>::new());
    }

    #[test]
    fn colors_counted_across_many_matches() {
        let mut html = "#111111 ".repeat(300);
        html.push_str(&"#222 ".repeat(500));
        html.push_str("#333333");
        assert_eq!(
            extract_hex_colors(&html),
            vec!["#222222", "#111111", "#333333"]
        );
    }

    #[test]
    fn colors_capped() {
        let html: String = (0..12).map(|i| format!("#{i:06x} ")).collect();
        assert_eq!(extract_hex_colors(&html).len(), MAX_COLORS);
    }

    #[test]
    fn empty_title_is_omitted() {
        assert_eq!(extract_title("<title>   </title>"), None);
        assert_eq!(extract_title("<TITLE lang=\"en\"> Hi </TITLE>").as_deref(), Some("Hi"));
    }

    #[test]
    fn logo_detection_by_class_id_and_og() {
        let html = r#"
            <img class="site-LOGO" src="a.png">
            <img id="brand" src="b.png">
            <img id="logo-mark">
            <link rel="apple-touch-icon" href="/touch.png">
            <meta property="og:logo" content="https://cdn.example.com/og.png">
        "#;
        let logos = select_logo_urls(html, "https://example.com/");
        assert_eq!(
            logos,
            vec![
                "https://example.com/a.png",
                "https://example.com/touch.png",
                "https://cdn.example.com/og.png",
            ]
        );
    }

    #[test]
    fn srcset_first_candidate_and_twitter_image() {
        let html = r#"
            <meta name="twitter:image" content="/tw.png">
            <img srcset="/small.png 480w, /large.png 1080w">
        "#;
        let images = select_image_urls(html, "https://example.com");
        assert_eq!(
            images,
            vec!["https://example.com/tw.png", "https://example.com/small.png"]
        );
    }

    #[test]
    fn image_urls_capped() {
        let html: String = (0..30).map(|i| format!("<img src=\"/{i}.png\">")).collect();
        assert_eq!(select_image_urls(&html, "https://example.com").len(), MAX_IMAGE_URLS);
    }
}
