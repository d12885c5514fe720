//! Offline adapter that fakes model output with string templating.
//!
//! The output shape is deterministic per template; only the decorative
//! prefix/emoji and the simulated latency are random.

use std::sync::LazyLock;
use std::time::Duration;

use async_trait::async_trait;
use pomelli_core::templates::Template;
use rand::seq::IndexedRandom;
use rand::Rng;
use regex::Regex;

use crate::{AdapterError, TextAdapter};

const PLAYFUL_SUFFIXES: &[&str] = &["😄", "🎉", "🚀", "✨"];
const CONCISE_PREFIXES: &[&str] = &["TL;DR", "In short", "Summary"];

/// Suffix appended by the image prompt template.
const PROMPT_SUFFIX: &str = "cinematic lighting | ultra-detailed | 35mm film";

/// Summaries keep at most this many characters of the input.
const SUMMARY_MAX_CHARS: usize = 200;
/// Words must be longer than this to count as a keyword.
const KEYWORD_MIN_LEN: usize = 4;
const MAX_KEYWORDS: usize = 12;

/// Fixed part of the simulated per-variation latency.
const DEFAULT_DELAY_BASE: Duration = Duration::from_millis(120);
/// Upper bound of the random extra latency.
const DEFAULT_DELAY_JITTER: Duration = Duration::from_millis(120);

static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_]+").expect("valid regex"));

#[derive(Debug, Clone)]
pub struct MockAdapter {
    delay: Option<(Duration, Duration)>,
}

impl MockAdapter {
    /// Mock with the default 120-240 ms simulated latency per variation.
    pub fn new() -> Self {
        Self {
            delay: Some((DEFAULT_DELAY_BASE, DEFAULT_DELAY_JITTER)),
        }
    }

    /// Mock that returns immediately. Used by tests.
    pub fn without_delay() -> Self {
        Self { delay: None }
    }

    /// Mock with a custom `base + rand(0..jitter)` latency.
    pub fn with_delay(base: Duration, jitter: Duration) -> Self {
        Self {
            delay: Some((base, jitter)),
        }
    }

    async fn pause(&self) {
        let Some((base, jitter)) = self.delay else {
            return;
        };
        let extra = if jitter.is_zero() {
            Duration::ZERO
        } else {
            let nanos = u64::try_from(jitter.as_nanos()).unwrap_or(u64::MAX);
            Duration::from_nanos(rand::rng().random_range(0..nanos))
        };
        tokio::time::sleep(base + extra).await;
    }
}

impl Default for MockAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextAdapter for MockAdapter {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn generate_variations(
        &self,
        input: &str,
        template: &Template,
        n: u32,
    ) -> Result<Vec<String>, AdapterError> {
        let mut results = Vec::with_capacity(n as usize);
        for index in 0..n {
            results.push(transform(input, template, index));
            self.pause().await;
        }
        Ok(results)
    }
}

fn transform(input: &str, template: &Template, index: u32) -> String {
    let trimmed = input.trim();
    let label = index + 1;
    match template.id {
        "playful" => format!(
            "{}: {trimmed} {} [v{label}]",
            template.name,
            pick(PLAYFUL_SUFFIXES)
        ),
        "technical" => format!(
            "{}: {} [v{label}]",
            template.name,
            extract_keywords(trimmed).join(", ")
        ),
        "prompt-generator" => format!("{}: {trimmed} | {PROMPT_SUFFIX} [v{label}]", template.name),
        _ => {
            let summary: String = trimmed.chars().take(SUMMARY_MAX_CHARS).collect();
            format!("{}: {summary} [v{label}]", pick(CONCISE_PREFIXES))
        }
    }
}

fn pick(items: &[&'static str]) -> &'static str {
    items.choose(&mut rand::rng()).copied().unwrap_or_default()
}

fn extract_keywords(input: &str) -> Vec<&str> {
    NON_WORD
        .split(input)
        .filter(|word| word.chars().count() > KEYWORD_MIN_LEN)
        .take(MAX_KEYWORDS)
        .collect()
}

#[cfg(test)]
mod tests {
    use pomelli_core::templates::find_template;

    use super::*;

    #[tokio::test]
    async fn produces_requested_count_with_labels() {
        let adapter = MockAdapter::without_delay();
        let results = adapter
            .generate_variations("Remix me please", find_template("default"), 3)
            .await
            .unwrap();

        assert_eq!(results.len(), 3);
        for (i, text) in results.iter().enumerate() {
            assert!(text.ends_with(&format!("[v{}]", i + 1)), "got {text}");
            assert!(text.contains("Remix me please"));
            assert!(CONCISE_PREFIXES.iter().any(|p| text.starts_with(p)));
        }
    }

    #[tokio::test]
    async fn zero_variations_is_empty() {
        let adapter = MockAdapter::without_delay();
        let results = adapter
            .generate_variations("text", find_template("default"), 0)
            .await
            .unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn playful_appends_emoji() {
        let text = transform("  hello world ", find_template("playful"), 0);
        assert!(text.starts_with("Playful remix: hello world "));
        assert!(PLAYFUL_SUFFIXES.iter().any(|e| text.contains(e)));
        assert!(text.ends_with("[v1]"));
    }

    #[test]
    fn technical_lists_long_words() {
        let text = transform(
            "The turbine spins; bearings overheat quickly!",
            find_template("technical"),
            1,
        );
        assert_eq!(
            text,
            "Technical brief: turbine, spins, bearings, overheat, quickly [v2]"
        );
    }

    #[test]
    fn keywords_capped_at_twelve() {
        let input = "alphas ".repeat(20);
        assert_eq!(extract_keywords(&input).len(), MAX_KEYWORDS);
    }

    #[test]
    fn prompt_generator_adds_style_suffix() {
        let text = transform("a red fox", find_template("prompt-generator"), 2);
        assert_eq!(
            text,
            "Image prompt generator: a red fox | cinematic lighting | ultra-detailed | 35mm film [v3]"
        );
    }

    #[test]
    fn summary_truncates_long_input() {
        let input = "é".repeat(300);
        let text = transform(&input, find_template("default"), 0);
        assert_eq!(text.matches('é').count(), SUMMARY_MAX_CHARS);
    }

    #[tokio::test]
    async fn custom_delay_is_applied() {
        let adapter = MockAdapter::with_delay(Duration::from_millis(10), Duration::ZERO);
        let started = std::time::Instant::now();
        adapter
            .generate_variations("x", find_template("default"), 2)
            .await
            .unwrap();
        assert!(started.elapsed() >= Duration::from_millis(20));
    }

    #[tokio::test]
    async fn sub_millisecond_jitter_is_sampled() {
        let adapter = MockAdapter::with_delay(Duration::ZERO, Duration::from_micros(500));
        let results = adapter
            .generate_variations("x", find_template("default"), 3)
            .await
            .unwrap();
        assert_eq!(results.len(), 3);
    }
}
