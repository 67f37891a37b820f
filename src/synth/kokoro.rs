//! Kokoro TTS: text → phonemes → ONNX inference → WAV bytes.
//!
//! Pipeline:
//! 1. Text → sentences (split on .!?)
//! 2. Sentence → phonemes (misaki-rs G2P)
//! 3. Phonemes → token IDs (tokenizer.json vocabulary)
//! 4. Token IDs + voice style + speed → ONNX inference → f32 audio (24kHz)
//! 5. Concatenated samples → 16-bit mono WAV

use std::collections::HashMap;
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Instant;

use async_trait::async_trait;
use ndarray::{Array2, Array3};
use ndarray_npy::NpzReader;
use ort::value::Tensor;
use tracing::{debug, info};

use super::SpeechSynthesizer;
use crate::config::TTSConfig;
use crate::error::SynthesisError;

const SAMPLE_RATE: u32 = 24000;
const MAX_TOKENS: usize = 510; // Voice style array first dimension
const SENTENCE_GAP_SECS: f32 = 0.15;

/// Loaded voice style data: shape (510, 256) f32.
struct VoiceData {
    styles: Array2<f32>,
}

struct KokoroModel {
    // ort 2.0 Session::run needs &mut
    session: Mutex<ort::session::Session>,
    phonemizer: misaki_rs::G2P,
    vocab: HashMap<char, i64>,
    voices: HashMap<String, VoiceData>,
    speed: f32,
}

pub struct KokoroSynthesizer {
    model: Arc<KokoroModel>,
}

impl KokoroSynthesizer {
    /// Load the ONNX model, tokenizer, voices, and phonemizer.
    /// This is blocking and should be called in spawn_blocking.
    pub fn load(config: &TTSConfig) -> Result<Self, SynthesisError> {
        let t0 = Instant::now();
        let base_dir = std::env::current_dir().unwrap_or_default();

        let model_path = if config.model_path.is_empty() {
            base_dir.join("kokoro-v1.0.onnx")
        } else {
            PathBuf::from(&config.model_path)
        };
        let voices_path = base_dir.join("voices-v1.0.bin");
        let tokenizer_path = base_dir.join("tokenizer.json");

        info!("Loading tokenizer from {}", tokenizer_path.display());
        let vocab = load_tokenizer(&tokenizer_path).map_err(SynthesisError::Request)?;

        info!("Loading voices from {}", voices_path.display());
        let voices = load_voices(&voices_path).map_err(SynthesisError::Request)?;
        info!("Loaded {} voices", voices.len());

        info!("Loading ONNX model from {}", model_path.display());
        let session = ort::session::Session::builder()
            .map_err(|e| SynthesisError::Request(format!("Failed to create ONNX session builder: {e}")))?
            .with_optimization_level(ort::session::builder::GraphOptimizationLevel::Level3)
            .map_err(|e| SynthesisError::Request(format!("Failed to set optimization level: {e}")))?
            .with_intra_threads(4)
            .map_err(|e| SynthesisError::Request(format!("Failed to set thread count: {e}")))?
            .commit_from_file(&model_path)
            .map_err(|e| SynthesisError::Request(format!("Failed to load ONNX model: {e}")))?;

        let phonemizer = misaki_rs::G2P::new(misaki_rs::Language::EnglishUS);

        info!("Kokoro TTS loaded in {}ms", t0.elapsed().as_millis());
        Ok(Self {
            model: Arc::new(KokoroModel {
                session: Mutex::new(session),
                phonemizer,
                vocab,
                voices,
                speed: config.speed,
            }),
        })
    }
}

impl KokoroModel {
    fn synthesize_blocking(&self, text: &str, voice: &str) -> Result<Vec<u8>, String> {
        let voice_data = self
            .voices
            .get(voice)
            .ok_or_else(|| format!("Voice not found: {voice}"))?;

        let gap = vec![0.0f32; (SENTENCE_GAP_SECS * SAMPLE_RATE as f32) as usize];
        let mut samples: Vec<f32> = Vec::new();
        for sentence in split_sentences(text.trim()) {
            let sentence_samples = self.generate_audio(sentence, voice_data)?;
            if sentence_samples.is_empty() {
                continue;
            }
            if !samples.is_empty() {
                samples.extend_from_slice(&gap);
            }
            samples.extend(sentence_samples);
        }

        if samples.is_empty() {
            return Ok(Vec::new());
        }
        encode_wav(&samples)
    }

    /// Generate audio samples for a single sentence.
    fn generate_audio(&self, text: &str, voice_data: &VoiceData) -> Result<Vec<f32>, String> {
        let (phonemes, _tokens) = self
            .phonemizer
            .g2p(text)
            .map_err(|e| format!("Phonemization failed: {e}"))?;

        if phonemes.is_empty() {
            return Ok(Vec::new());
        }

        let mut token_ids: Vec<i64> = Vec::with_capacity(phonemes.len() + 2);
        token_ids.push(0); // Start padding
        for ch in phonemes.chars() {
            if let Some(&id) = self.vocab.get(&ch) {
                token_ids.push(id);
            }
        }
        token_ids.push(0); // End padding

        let n_tokens = token_ids.len().min(MAX_TOKENS);
        token_ids.truncate(n_tokens);

        // Style vector is indexed by token count
        let style_idx = (n_tokens.saturating_sub(2)).min(voice_data.styles.nrows() - 1);
        let style_vec: Vec<f32> = voice_data.styles.row(style_idx).to_vec();

        let tokens_array = Array2::from_shape_vec((1, n_tokens), token_ids)
            .map_err(|e| format!("Failed to create tokens tensor: {e}"))?;
        let tokens_tensor = Tensor::from_array(tokens_array)
            .map_err(|e| format!("Failed to create tokens ort tensor: {e}"))?;

        let style_array = Array2::from_shape_vec((1, 256), style_vec)
            .map_err(|e| format!("Failed to create style tensor: {e}"))?;
        let style_tensor = Tensor::from_array(style_array)
            .map_err(|e| format!("Failed to create style ort tensor: {e}"))?;

        let speed_array = ndarray::Array1::from_vec(vec![self.speed]);
        let speed_tensor = Tensor::from_array(speed_array)
            .map_err(|e| format!("Failed to create speed ort tensor: {e}"))?;

        let mut session = self.session.lock().map_err(|_| "ONNX session poisoned".to_string())?;
        let outputs = session
            .run(ort::inputs![
                "tokens" => tokens_tensor,
                "style" => style_tensor,
                "speed" => speed_tensor
            ])
            .map_err(|e| format!("ONNX inference failed: {e}"))?;

        let first_output = outputs
            .iter()
            .next()
            .ok_or("No output tensor from model")?;
        let (_shape, audio_slice) = first_output
            .1
            .try_extract_tensor::<f32>()
            .map_err(|e| format!("Failed to extract audio tensor: {e}"))?;

        let samples: Vec<f32> = audio_slice.to_vec();
        debug!(
            "Generated {} samples ({:.1}s)",
            samples.len(),
            samples.len() as f32 / SAMPLE_RATE as f32
        );
        Ok(samples)
    }
}

#[async_trait]
impl SpeechSynthesizer for KokoroSynthesizer {
    async fn synthesize(&self, text: &str, voice: &str) -> Result<Vec<u8>, SynthesisError> {
        let model = self.model.clone();
        let text = text.to_string();
        let voice = voice.to_string();

        let bytes = tokio::task::spawn_blocking(move || model.synthesize_blocking(&text, &voice))
            .await
            .map_err(|e| SynthesisError::Request(format!("Kokoro task failed: {e}")))?
            .map_err(SynthesisError::Request)?;

        if bytes.is_empty() {
            return Err(SynthesisError::NoAudioContent);
        }
        Ok(bytes)
    }

    fn extension(&self) -> &'static str {
        "wav"
    }
}

/// f32 [-1, 1] samples → 16-bit mono WAV.
fn encode_wav(samples: &[f32]) -> Result<Vec<u8>, String> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec)
            .map_err(|e| format!("Failed to start WAV: {e}"))?;
        for &sample in samples {
            let s = (sample * 32767.0).clamp(-32768.0, 32767.0) as i16;
            writer
                .write_sample(s)
                .map_err(|e| format!("Failed to write WAV sample: {e}"))?;
        }
        writer
            .finalize()
            .map_err(|e| format!("Failed to finalize WAV: {e}"))?;
    }
    Ok(cursor.into_inner())
}

/// Load tokenizer vocabulary from tokenizer.json.
fn load_tokenizer(path: &Path) -> Result<HashMap<char, i64>, String> {
    let contents = fs::read_to_string(path).map_err(|e| format!("Failed to read tokenizer: {e}"))?;

    let data: serde_json::Value = serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse tokenizer JSON: {e}"))?;

    let vocab = data["model"]["vocab"]
        .as_object()
        .ok_or("Missing model.vocab in tokenizer.json")?;

    let mut map = HashMap::new();
    for (token, id) in vocab {
        let id = id.as_i64().ok_or("Token ID is not an integer")?;
        if let Some(ch) = token.chars().next() {
            map.insert(ch, id);
        }
    }
    Ok(map)
}

/// Load all voice styles from an NPZ file.
fn load_voices(path: &Path) -> Result<HashMap<String, VoiceData>, String> {
    let file = fs::File::open(path).map_err(|e| format!("Failed to open voices file: {e}"))?;
    let mut npz = NpzReader::new(file).map_err(|e| format!("Failed to read NPZ voices file: {e}"))?;

    let names: Vec<String> = npz
        .names()
        .map_err(|e| format!("Failed to list NPZ entries: {e}"))?
        .into_iter()
        .map(|n| n.trim_end_matches(".npy").to_string())
        .collect();

    let mut voices = HashMap::new();
    for name in &names {
        let arr: Array3<f32> = npz
            .by_name(&format!("{name}.npy"))
            .map_err(|e| format!("Failed to read voice '{name}': {e}"))?;

        // (510, 1, 256) → (510, 256)
        let dim0 = arr.shape()[0];
        let dim2 = arr.shape()[2];
        let styles = arr
            .into_shape_with_order((dim0, dim2))
            .map_err(|e| format!("Failed to reshape voice '{name}': {e}"))?;

        voices.insert(name.clone(), VoiceData { styles });
    }
    Ok(voices)
}

/// Split text into sentences at .!? boundaries.
fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let bytes = text.as_bytes();

    for (i, &b) in bytes.iter().enumerate() {
        if (b == b'.' || b == b'!' || b == b'?')
            && i + 1 < bytes.len()
            && bytes[i + 1].is_ascii_whitespace()
        {
            let s = text[start..=i].trim();
            if !s.is_empty() {
                sentences.push(s);
            }
            start = i + 1;
        }
    }

    let s = text[start..].trim();
    if !s.is_empty() {
        sentences.push(s);
    }
    sentences
}
