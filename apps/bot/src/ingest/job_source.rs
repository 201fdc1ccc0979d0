//! Job-source resolver — a message is either a link to a posting or the posting itself.

use std::sync::LazyLock;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use tracing::{info, warn};

const USER_AGENT: &str = "Mozilla/5.0 (compatible; ATSResumeBot/0.1; +https://telegram.org)";

static URL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://\S+").expect("URL pattern is valid"));

/// How a job-description message should be interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobInput<'a> {
    Url(&'a str),
    Text(&'a str),
}

impl<'a> JobInput<'a> {
    pub fn classify(raw: &'a str) -> Self {
        let trimmed = raw.trim();
        if URL_PATTERN.is_match(trimmed) {
            JobInput::Url(trimmed)
        } else {
            JobInput::Text(raw)
        }
    }
}

/// Outcome of resolving a message into job-description text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedJob {
    pub text: String,
    /// The message was a link.
    pub from_url: bool,
}

#[async_trait]
pub trait JobSource: Send + Sync {
    /// Literal text passes through verbatim; a link becomes the page's main text,
    /// or an empty string when fetching or extraction fails.
    async fn resolve(&self, raw: &str) -> ResolvedJob;
}

/// Fetches job postings over HTTP and reduces them to their main text.
#[derive(Clone)]
pub struct WebJobSource {
    client: Client,
}

impl WebJobSource {
    pub fn new(timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: Client::builder()
                .user_agent(USER_AGENT)
                .timeout(timeout)
                .build()?,
        })
    }

    async fn fetch_page(&self, url: &str) -> Result<String> {
        let html = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(html)
    }
}

#[async_trait]
impl JobSource for WebJobSource {
    async fn resolve(&self, raw: &str) -> ResolvedJob {
        match JobInput::classify(raw) {
            JobInput::Text(text) => ResolvedJob {
                text: text.to_string(),
                from_url: false,
            },
            JobInput::Url(url) => {
                let text = match self.fetch_page(url).await {
                    Ok(html) => extract_main_text(&html),
                    Err(e) => {
                        warn!("Failed to fetch job posting {url}: {e:?}");
                        String::new()
                    }
                };
                info!("Resolved job posting {url} to {} chars", text.chars().count());
                ResolvedJob {
                    text,
                    from_url: true,
                }
            }
        }
    }
}

/// Main text of a page, in priority order: paragraphs inside `article`,
/// then every paragraph, then the visible body text.
pub fn extract_main_text(html: &str) -> String {
    let document = Html::parse_document(html);

    let article_paragraphs = paragraphs(&document, "article p");
    if !article_paragraphs.is_empty() {
        return article_paragraphs;
    }

    let all_paragraphs = paragraphs(&document, "p");
    if !all_paragraphs.is_empty() {
        return all_paragraphs;
    }

    visible_text(&document)
}

fn paragraphs(document: &Html, selector: &str) -> String {
    let Ok(selector) = Selector::parse(selector) else {
        return String::new();
    };
    document
        .select(&selector)
        .map(|p| collapse_whitespace(&p.text().collect::<String>()))
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn visible_text(document: &Html) -> String {
    let root = Selector::parse("body")
        .ok()
        .and_then(|body| document.select(&body).next())
        .unwrap_or_else(|| document.root_element());
    text_without_scripts(root)
}

fn text_without_scripts(element: ElementRef<'_>) -> String {
    element
        .descendants()
        .filter_map(|node| {
            let text = node.value().as_text()?;
            let hidden = node
                .parent()
                .and_then(|parent| parent.value().as_element().map(|e| e.name()))
                .is_some_and(|name| matches!(name, "script" | "style" | "noscript" | "template"));
            (!hidden).then(|| collapse_whitespace(text))
        })
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
