//! Article source: the producer's input.
//!
//! `FeedSource` reads a JSON feed (an array, or one article per line) from a
//! file or an http(s) URL, every `refresh_interval`. Each batch only carries
//! articles that are new since the previous cycle, newest first.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::SourceConfig;
use crate::error::SourceFetchError;

/// One source item. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub source: String,
    pub title: String,
    #[serde(default)]
    pub author: String,
    pub content: String,
    pub url: String,
    #[serde(alias = "pubDate")]
    pub pub_date: DateTime<Utc>,
}

impl Article {
    pub fn word_count(&self) -> usize {
        self.content.split_whitespace().count()
    }
}

#[async_trait]
pub trait ArticleSource: Send {
    /// Next batch, in the order it should be narrated.
    /// `Ok(None)` means the source is closed and will never yield again.
    async fn next_batch(&mut self) -> Result<Option<Vec<Article>>, SourceFetchError>;
}

pub struct FeedSource {
    location: String,
    client: Client,
    refresh_interval: Duration,
    min_words: usize,
    max_words: usize,
    last_checked: DateTime<Utc>,
    lookback: chrono::Duration,
    /// URL → publication date, for articles inside the lookback window.
    seen: HashMap<String, DateTime<Utc>>,
    first_cycle: bool,
}

impl FeedSource {
    pub fn new(config: &SourceConfig) -> Result<Self, SourceFetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|source| SourceFetchError::Http {
                location: config.location.clone(),
                source,
            })?;

        Ok(Self {
            location: config.location.clone(),
            client,
            refresh_interval: Duration::from_secs(config.refresh_interval_secs),
            min_words: config.min_words,
            max_words: config.max_words,
            last_checked: Utc::now() - chrono::Duration::hours(config.lookback_hours),
            lookback: chrono::Duration::hours(config.lookback_hours),
            seen: HashMap::new(),
            first_cycle: true,
        })
    }

    async fn fetch(&self) -> Result<String, SourceFetchError> {
        if self.location.starts_with("http://") || self.location.starts_with("https://") {
            let http_err = |source| SourceFetchError::Http {
                location: self.location.clone(),
                source,
            };
            let resp = self
                .client
                .get(&self.location)
                .send()
                .await
                .and_then(|r| r.error_for_status())
                .map_err(http_err)?;
            resp.text().await.map_err(http_err)
        } else {
            tokio::fs::read_to_string(&self.location)
                .await
                .map_err(|source| SourceFetchError::Read {
                    location: self.location.clone(),
                    source,
                })
        }
    }

    /// Normalize, filter and order one fetched feed.
    fn select(&mut self, articles: Vec<Article>, now: DateTime<Utc>) -> Vec<Article> {
        let mut batch: Vec<Article> = Vec::new();

        for mut article in articles {
            article.title = article.title.trim().to_string();
            article.url = article.url.trim().to_string();
            article.content = normalize_text(&article.content, self.max_words);

            if article.word_count() <= self.min_words {
                debug!("Skipping short article from {}: {}", article.source, article.title);
                continue;
            }
            if article.pub_date <= self.last_checked {
                debug!("{} was already seen", article.title);
                continue;
            }
            if self.seen.insert(article.url.clone(), article.pub_date).is_some() {
                continue;
            }
            batch.push(article);
        }

        // Older articles are already dropped by the date check.
        let horizon = now - self.lookback;
        self.seen.retain(|_, published| *published > horizon);

        batch.sort_by(|a, b| b.pub_date.cmp(&a.pub_date));
        self.last_checked = now;
        batch
    }
}

#[async_trait]
impl ArticleSource for FeedSource {
    async fn next_batch(&mut self) -> Result<Option<Vec<Article>>, SourceFetchError> {
        if !self.first_cycle {
            tokio::time::sleep(self.refresh_interval).await;
        }
        self.first_cycle = false;

        info!("Reading articles from {}", self.location);
        let raw = self.fetch().await?;
        let articles = parse_feed(&raw).map_err(|message| SourceFetchError::Parse {
            location: self.location.clone(),
            message,
        })?;

        let fetched = articles.len();
        let batch = self.select(articles, Utc::now());
        info!(
            "Added {} of {fetched} articles. Checking again in {}s",
            batch.len(),
            self.refresh_interval.as_secs()
        );
        Ok(Some(batch))
    }
}

/// Parse a JSON array of articles, or one JSON article per line.
fn parse_feed(raw: &str) -> Result<Vec<Article>, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    if trimmed.starts_with('[') {
        return serde_json::from_str(trimmed).map_err(|e| e.to_string());
    }
    trimmed
        .lines()
        .filter(|line| !line.trim().is_empty())
        .enumerate()
        .map(|(i, line)| {
            serde_json::from_str(line).map_err(|e| format!("line {}: {e}", i + 1))
        })
        .collect()
}

/// Collapse whitespace (including non-breaking spaces) and cap the word count.
fn normalize_text(text: &str, max_words: usize) -> String {
    text.split(|c: char| c.is_whitespace() || c == '\u{a0}')
        .filter(|w| !w.is_empty())
        .take(max_words)
        .collect::<Vec<_>>()
        .join(" ")
}
