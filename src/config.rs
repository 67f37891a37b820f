//! Configuration management for jockey.
//!
//! Loads config from YAML files in standard locations. Every section and
//! every field has a default, so a partial file (or no file) is fine.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// File path or http(s) URL of a JSON article feed.
    pub location: String,
    pub refresh_interval_secs: u64,
    pub lookback_hours: i64,
    pub min_words: usize,
    pub max_words: usize,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            location: "articles.json".into(),
            refresh_interval_secs: 600,
            lookback_hours: 72,
            min_words: 30,
            max_words: 500,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WriterConfig {
    pub model: String,
    pub host: String,
    pub temperature: f32,
    pub timeout_secs: u64,
    pub intro_odds: f64,
    pub informal_odds: f64,
    pub system_prompt: Option<PathBuf>,
    pub intro_samples: Option<PathBuf>,
    pub credit_samples: Option<PathBuf>,
    pub outro_samples: Option<PathBuf>,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            model: "llama3.2:3b".into(),
            host: "http://localhost:11434".into(),
            temperature: 0.7,
            timeout_secs: 300,
            intro_odds: 0.5,
            informal_odds: 0.5,
            system_prompt: None,
            intro_samples: None,
            credit_samples: None,
            outro_samples: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TtsBackend {
    Cloud,
    Kokoro,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TTSConfig {
    pub backend: TtsBackend,
    pub endpoint: String,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    pub language_code: String,
    pub voice_prefix: String,
    pub voices: Vec<String>,
    pub timeout_secs: u64,
    pub speed: f32,
    pub model_path: String,
}

impl Default for TTSConfig {
    fn default() -> Self {
        Self {
            backend: TtsBackend::Cloud,
            endpoint: "https://texttospeech.googleapis.com/v1/text:synthesize".into(),
            api_key_env: "GOOGLE_TTS_API_KEY".into(),
            language_code: "en-US".into(),
            voice_prefix: "en-US-Chirp3-HD-".into(),
            voices: vec![
                "Puck".into(),
                "Achernar".into(),
                "Laomedeia".into(),
                "Achird".into(),
                "Sadachbia".into(),
            ],
            timeout_secs: 60,
            speed: 1.0,
            model_path: String::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    pub player: String,
    pub asset_dir: PathBuf,
    pub intro_stinger: PathBuf,
    pub transition_stinger: PathBuf,
    pub waiting_loop: PathBuf,
    pub poll_interval_ms: u64,
    pub settle_ms: u64,
    pub intro_pause_ms: u64,
    pub formal_pause_ms: u64,
    pub outro_pause_ms: u64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            player: "ffplay".into(),
            asset_dir: PathBuf::from("/dev/shm"),
            intro_stinger: PathBuf::from("intro.mp3"),
            transition_stinger: PathBuf::from("transition.mp3"),
            waiting_loop: PathBuf::from("waiting.mp3"),
            poll_interval_ms: 5000,
            settle_ms: 500,
            intro_pause_ms: 500,
            formal_pause_ms: 700,
            outro_pause_ms: 1000,
        }
    }
}

impl PlaybackConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub image_dir: PathBuf,
    pub interval_secs: u64,
    pub frames: u32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            image_dir: PathBuf::from("narrators"),
            interval_secs: 10,
            frames: 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Log the failed article and continue with the next one.
    Skip,
    /// Stop the whole pipeline with a non-zero exit.
    Abort,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub on_error: FailurePolicy,
    pub max_backlog: usize,
    pub backlog_pause_secs: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            on_error: FailurePolicy::Skip,
            max_backlog: 4,
            backlog_pause_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub enabled: bool,
    pub port: u16,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            port: 8768,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub enabled: bool,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub source: SourceConfig,
    pub writer: WriterConfig,
    pub tts: TTSConfig,
    pub playback: PlaybackConfig,
    pub animation: AnimationConfig,
    pub generation: GenerationConfig,
    pub api: ApiConfig,
    pub history: HistoryConfig,
}

impl Config {
    /// Load configuration from YAML file.
    ///
    /// Searches standard locations if no path is provided:
    /// 1. ./jockey.yaml
    /// 2. ~/.config/jockey/config.yaml
    /// 3. /etc/jockey/config.yaml
    pub fn load(path: Option<&Path>) -> Self {
        let resolved = path.map(PathBuf::from).or_else(|| {
            let candidates = [
                std::env::current_dir().ok().map(|d| d.join("jockey.yaml")),
                dirs::home_dir().map(|h| h.join(".config/jockey/config.yaml")),
                Some(PathBuf::from("/etc/jockey/config.yaml")),
            ];
            candidates.into_iter().flatten().find(|p| p.exists())
        });

        let Some(config_path) = resolved else {
            info!("No config file found, using defaults");
            return Self::default();
        };

        match std::fs::read_to_string(&config_path) {
            Ok(contents) => match Self::parse(&contents) {
                Ok(config) => {
                    info!("Loaded config from {}", config_path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse {}: {e}, using defaults", config_path.display());
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read {}: {e}, using defaults", config_path.display());
                Self::default()
            }
        }
    }

    pub fn parse(contents: &str) -> Result<Self, serde_yml::Error> {
        serde_yml::from_str(contents)
    }
}
