//! Speech synthesis backends.
//!
//! - `CloudSynthesizer`: Google Cloud Text-to-Speech REST API (mp3)
//! - `kokoro::KokoroSynthesizer`: local Kokoro ONNX model (wav), behind the
//!   `kokoro` feature

#[cfg(feature = "kokoro")]
pub mod kokoro;

use std::time::Duration;

use async_trait::async_trait;
use base64::{engine::general_purpose, Engine};
use reqwest::Client;
use serde_json::json;
use tracing::{debug, warn};

use crate::config::TTSConfig;
use crate::error::SynthesisError;

#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize `text` with the named voice. Never returns empty audio.
    async fn synthesize(&self, text: &str, voice: &str) -> Result<Vec<u8>, SynthesisError>;

    /// File extension of the produced audio.
    fn extension(&self) -> &'static str;
}

pub struct CloudSynthesizer {
    endpoint: String,
    api_key: Option<String>,
    language_code: String,
    voice_prefix: String,
    client: Client,
}

impl CloudSynthesizer {
    pub fn new(config: &TTSConfig) -> Result<Self, SynthesisError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SynthesisError::Request(format!("Failed to create HTTP client: {e}")))?;

        let api_key = std::env::var(&config.api_key_env).ok().filter(|k| !k.is_empty());
        if api_key.is_none() {
            warn!("{} is not set, sending TTS requests without an API key", config.api_key_env);
        }

        Ok(Self {
            endpoint: config.endpoint.clone(),
            api_key,
            language_code: config.language_code.clone(),
            voice_prefix: config.voice_prefix.clone(),
            client,
        })
    }

    fn request_body(&self, text: &str, voice: &str) -> serde_json::Value {
        json!({
            "input": { "text": text },
            "voice": {
                "languageCode": self.language_code,
                "name": format!("{}{voice}", self.voice_prefix)
            },
            "audioConfig": { "audioEncoding": "MP3" }
        })
    }
}

/// Extract and decode `audioContent` from a synthesis response.
fn decode_audio(data: &serde_json::Value) -> Result<Vec<u8>, SynthesisError> {
    let encoded = data["audioContent"].as_str().unwrap_or("");
    if encoded.is_empty() {
        return Err(SynthesisError::NoAudioContent);
    }
    let bytes = general_purpose::STANDARD
        .decode(encoded)
        .map_err(|e| SynthesisError::Request(format!("Invalid audioContent: {e}")))?;
    if bytes.is_empty() {
        return Err(SynthesisError::NoAudioContent);
    }
    Ok(bytes)
}

#[async_trait]
impl SpeechSynthesizer for CloudSynthesizer {
    async fn synthesize(&self, text: &str, voice: &str) -> Result<Vec<u8>, SynthesisError> {
        debug!("Converting text to speech ({} chars, voice {voice})", text.len());

        let mut request = self.client.post(&self.endpoint).json(&self.request_body(text, voice));
        if let Some(key) = &self.api_key {
            request = request.query(&[("key", key)]);
        }

        let resp = request
            .send()
            .await
            .map_err(|e| SynthesisError::Request(e.to_string()))?;
        if !resp.status().is_success() {
            return Err(SynthesisError::Request(format!(
                "TTS returned status {}",
                resp.status()
            )));
        }

        let data: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| SynthesisError::Request(format!("Failed to parse TTS response: {e}")))?;
        decode_audio(&data)
    }

    fn extension(&self) -> &'static str {
        "mp3"
    }
}

#[cfg(test)]
pub mod fake {
    use std::sync::Mutex;

    use super::*;

    /// Returns the text itself as "audio"; fails on texts containing `fail_on`.
    #[derive(Default)]
    pub struct EchoSynthesizer {
        pub fail_on: Option<String>,
        pub calls: Mutex<Vec<(String, String)>>,
    }

    #[async_trait]
    impl SpeechSynthesizer for EchoSynthesizer {
        async fn synthesize(&self, text: &str, voice: &str) -> Result<Vec<u8>, SynthesisError> {
            self.calls
                .lock()
                .unwrap()
                .push((text.to_string(), voice.to_string()));
            if self.fail_on.as_deref().is_some_and(|f| text.contains(f)) {
                return Err(SynthesisError::NoAudioContent);
            }
            Ok(text.as_bytes().to_vec())
        }

        fn extension(&self) -> &'static str {
            "mp3"
        }
    }
}
