//! Script writing with Ollama.
//!
//! The model is asked for a JSON object with `intro`, `formal` and
//! `informal` fields. Only `formal` is required.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

use crate::config::WriterConfig;
use crate::error::GenerationError;
use crate::source::Article;

const SYSTEM_PROMPT: &str = r#"You are the writer for a continuous tech news radio show. Write a short spoken script about the article you are given.

Respond with a JSON object with these fields:
- "formal": a neutral, factual two-to-four sentence report of the article, crediting the source and author. Always required.
- "intro": a one sentence hook that leads into the report. Only when asked for.
- "informal": one or two sentences of casual opinion about the story. Only when asked for.

Write for the ear: no markdown, no URLs, no lists. Output ONLY the JSON object."#;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptText {
    pub intro: Option<String>,
    pub formal: String,
    pub informal: Option<String>,
}

#[async_trait]
pub trait ScriptWriter: Send + Sync {
    /// Send a prompt, return the model's raw text.
    async fn write(&self, prompt: &str) -> Result<String, GenerationError>;
}

/// Optional one-line style samples mixed into prompts.
#[derive(Debug, Clone, Default)]
pub struct StyleSamples {
    pub intros: Vec<String>,
    pub credits: Vec<String>,
    pub outros: Vec<String>,
}

impl StyleSamples {
    pub fn load(config: &WriterConfig) -> Self {
        Self {
            intros: read_lines(config.intro_samples.as_deref()),
            credits: read_lines(config.credit_samples.as_deref()),
            outros: read_lines(config.outro_samples.as_deref()),
        }
    }
}

fn read_lines(path: Option<&Path>) -> Vec<String> {
    let Some(path) = path else {
        return Vec::new();
    };
    match std::fs::read_to_string(path) {
        Ok(contents) => contents
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(String::from)
            .collect(),
        Err(e) => {
            warn!("Failed to read samples from {}: {e}", path.display());
            Vec::new()
        }
    }
}

/// What to ask the writer for one article.
pub struct ScriptRequest<'a> {
    pub article: &'a Article,
    pub want_intro: bool,
    pub want_informal: bool,
    pub intro_sample: Option<&'a str>,
    pub credit_sample: Option<&'a str>,
    pub outro_sample: Option<&'a str>,
}

impl ScriptRequest<'_> {
    pub fn prompt(&self) -> String {
        let mut prompt = String::new();
        let yes_no = |b: bool| if b { "yes" } else { "no" };

        prompt.push_str(&format!("Include intro: {}\n", yes_no(self.want_intro)));
        prompt.push_str(&format!("Include informal: {}\n", yes_no(self.want_informal)));
        if let Some(sample) = self.intro_sample.filter(|_| self.want_intro) {
            prompt.push_str(&format!("Intro Sample: \"{sample}\"\n"));
        }
        if let Some(sample) = self.credit_sample {
            prompt.push_str(&format!("Credit Sample: \"{sample}\"\n"));
        }
        if let Some(sample) = self.outro_sample.filter(|_| self.want_informal) {
            prompt.push_str(&format!("Outro Sample: \"{sample}\"\n"));
        }

        let a = self.article;
        prompt.push_str(&format!(
            "Article Source: {}\nArticle Title: {}\nArticle URL: {}\nArticle Author: {}\nArticle Content: {}",
            a.source, a.title, a.url, a.author, a.content
        ));
        prompt
    }
}

#[derive(Deserialize)]
struct RawScript {
    intro: Option<String>,
    formal: Option<String>,
    informal: Option<String>,
}

/// Parse the writer's response. Tolerates a surrounding markdown code fence.
pub fn parse_script_text(raw: &str) -> Result<ScriptText, GenerationError> {
    let body = raw.trim();
    let body = body
        .strip_prefix("```json")
        .or_else(|| body.strip_prefix("```"))
        .and_then(|b| b.strip_suffix("```"))
        .unwrap_or(body)
        .trim();

    let parsed: RawScript =
        serde_json::from_str(body).map_err(|e| GenerationError::Malformed(e.to_string()))?;

    let non_blank = |s: Option<String>| {
        s.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())
    };

    Ok(ScriptText {
        intro: non_blank(parsed.intro),
        formal: non_blank(parsed.formal).ok_or(GenerationError::MissingFormal)?,
        informal: non_blank(parsed.informal),
    })
}

pub struct OllamaScriptWriter {
    model: String,
    host: String,
    temperature: f32,
    system: String,
    client: Client,
}

impl OllamaScriptWriter {
    pub fn new(config: &WriterConfig) -> Result<Self, GenerationError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GenerationError::Request(format!("Failed to create HTTP client: {e}")))?;

        let system = match &config.system_prompt {
            Some(path) => std::fs::read_to_string(path).unwrap_or_else(|e| {
                warn!("Failed to read system prompt {}: {e}, using built-in", path.display());
                SYSTEM_PROMPT.to_string()
            }),
            None => SYSTEM_PROMPT.to_string(),
        };

        Ok(Self {
            model: config.model.clone(),
            host: config.host.clone(),
            temperature: config.temperature,
            system,
            client,
        })
    }
}

#[async_trait]
impl ScriptWriter for OllamaScriptWriter {
    async fn write(&self, prompt: &str) -> Result<String, GenerationError> {
        debug!("Sending prompt to Ollama model '{}' ({} chars)", self.model, prompt.len());

        let body = json!({
            "model": self.model,
            "system": self.system,
            "prompt": prompt,
            "stream": false,
            "format": "json",
            "options": {
                "temperature": self.temperature
            }
        });

        let url = format!("{}/api/generate", self.host);
        let resp = self.client.post(&url).json(&body).send().await.map_err(|e| {
            if e.is_connect() {
                GenerationError::Request(format!("Cannot connect to Ollama at {}", self.host))
            } else if e.is_timeout() {
                GenerationError::Request("Ollama request timed out".into())
            } else {
                GenerationError::Request(e.to_string())
            }
        })?;

        if !resp.status().is_success() {
            return Err(GenerationError::Request(format!(
                "Ollama returned status {}",
                resp.status()
            )));
        }

        let data: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| GenerationError::Malformed(format!("Failed to parse Ollama response: {e}")))?;

        let text = data["response"].as_str().unwrap_or("").trim().to_string();
        debug!("Ollama output: '{text}'");
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::test_support::article;

    #[test]
    fn parses_all_fields() {
        let text = parse_script_text(
            r#"{"intro":"Big news.","formal":"A thing happened.","informal":"  Wild. "}"#,
        )
        .unwrap();
        assert_eq!(text.intro.as_deref(), Some("Big news."));
        assert_eq!(text.formal, "A thing happened.");
        assert_eq!(text.informal.as_deref(), Some("Wild."));
    }

    #[test]
    fn blank_optionals_become_none() {
        let text = parse_script_text(r#"{"intro":"","formal":"Report.","informal":null}"#).unwrap();
        assert_eq!(text.intro, None);
        assert_eq!(text.informal, None);
    }

    #[test]
    fn strips_code_fence() {
        let text = parse_script_text("```json\n{\"formal\":\"Report.\"}\n```").unwrap();
        assert_eq!(text.formal, "Report.");
    }

    #[test]
    fn missing_formal_is_an_error() {
        assert!(matches!(
            parse_script_text(r#"{"intro":"Hi"}"#),
            Err(GenerationError::MissingFormal)
        ));
        assert!(matches!(
            parse_script_text(r#"{"formal":"   "}"#),
            Err(GenerationError::MissingFormal)
        ));
    }

    #[test]
    fn unparseable_text_is_an_error() {
        assert!(matches!(
            parse_script_text("Here is your script: blah"),
            Err(GenerationError::Malformed(_))
        ));
    }

    #[test]
    fn prompt_mentions_only_wanted_samples() {
        let a = article(1);
        let request = ScriptRequest {
            article: &a,
            want_intro: false,
            want_informal: true,
            intro_sample: Some("Hey there"),
            credit_sample: Some("Reported by"),
            outro_sample: Some("That's wild"),
        };
        let prompt = request.prompt();
        assert!(prompt.contains("Include intro: no"));
        assert!(prompt.contains("Include informal: yes"));
        assert!(!prompt.contains("Hey there"));
        assert!(prompt.contains("Credit Sample: \"Reported by\""));
        assert!(prompt.contains("Outro Sample: \"That's wild\""));
        assert!(prompt.contains("Article Title: Story 1"));
    }

    #[test]
    fn samples_skip_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("intros.txt");
        std::fs::write(&path, "Good morning\n\n  Hello world  \n").unwrap();
        let config = WriterConfig {
            intro_samples: Some(path),
            credit_samples: Some(dir.path().join("missing.txt")),
            ..WriterConfig::default()
        };
        let samples = StyleSamples::load(&config);
        assert_eq!(samples.intros, vec!["Good morning", "Hello world"]);
        assert!(samples.credits.is_empty());
    }
}
