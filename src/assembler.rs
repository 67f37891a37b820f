//! Script assembly: article → written text → synthesized pieces.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info, warn};

use crate::config::{Config, TTSConfig, WriterConfig};
use crate::error::AssemblyError;
use crate::script::{AudioAsset, Script, ScriptPiece, Segment};
use crate::source::Article;
use crate::synth::SpeechSynthesizer;
use crate::writer::{parse_script_text, ScriptRequest, ScriptWriter, StyleSamples};

pub struct ScriptAssembler {
    writer: Arc<dyn ScriptWriter>,
    synth: Arc<dyn SpeechSynthesizer>,
    voices: Vec<String>,
    intro_odds: f64,
    informal_odds: f64,
    samples: StyleSamples,
    asset_dir: PathBuf,
    rng: StdRng,
}

impl ScriptAssembler {
    pub fn new(
        writer: Arc<dyn ScriptWriter>,
        synth: Arc<dyn SpeechSynthesizer>,
        config: &Config,
        samples: StyleSamples,
        rng: StdRng,
    ) -> Self {
        let voices = if config.tts.voices.is_empty() {
            warn!("No narrator voices configured, using the default set");
            TTSConfig::default().voices
        } else {
            config.tts.voices.clone()
        };

        let defaults = WriterConfig::default();
        Self {
            writer,
            synth,
            voices,
            intro_odds: odds("intro_odds", config.writer.intro_odds, defaults.intro_odds),
            informal_odds: odds(
                "informal_odds",
                config.writer.informal_odds,
                defaults.informal_odds,
            ),
            samples,
            asset_dir: config.playback.asset_dir.clone(),
            rng,
        }
    }

    fn pick<'a>(rng: &mut StdRng, lines: &'a [String]) -> Option<&'a str> {
        lines.choose(rng).map(String::as_str)
    }

    /// Build a complete script for one article.
    ///
    /// Assets written before a failure are removed when the partial pieces
    /// are dropped.
    pub async fn assemble(&mut self, article: Article, index: u64) -> Result<Script, AssemblyError> {
        let t_start = Instant::now();

        let want_intro = self.rng.gen_bool(self.intro_odds);
        let want_informal = self.rng.gen_bool(self.informal_odds);
        let voice = self
            .voices
            .choose(&mut self.rng)
            .cloned()
            .unwrap_or_default();

        let prompt = ScriptRequest {
            article: &article,
            want_intro,
            want_informal,
            intro_sample: Self::pick(&mut self.rng, &self.samples.intros),
            credit_sample: Self::pick(&mut self.rng, &self.samples.credits),
            outro_sample: Self::pick(&mut self.rng, &self.samples.outros),
        }
        .prompt();

        debug!(
            "Script {index}: voice={voice} intro={want_intro} informal={want_informal}"
        );
        let raw = self.writer.write(&prompt).await?;
        let text = parse_script_text(&raw)?;
        let t_written = t_start.elapsed();

        let intro = match text.intro.filter(|_| want_intro) {
            Some(t) => Some(self.synthesize(index, Segment::Intro, t, &voice).await?),
            None => None,
        };
        let formal = self.synthesize(index, Segment::Formal, text.formal, &voice).await?;
        let informal = match text.informal.filter(|_| want_informal) {
            Some(t) => Some(self.synthesize(index, Segment::Informal, t, &voice).await?),
            None => None,
        };

        let script = Script {
            index,
            article,
            voice,
            intro,
            formal,
            informal,
        };
        info!(
            "Script {index} ready: \"{}\" {:?} (write={:.0}ms total={:.0}ms)",
            script.article.title,
            script.segments(),
            t_written.as_secs_f64() * 1000.0,
            t_start.elapsed().as_secs_f64() * 1000.0
        );
        Ok(script)
    }

    async fn synthesize(
        &self,
        index: u64,
        segment: Segment,
        text: String,
        voice: &str,
    ) -> Result<ScriptPiece, AssemblyError> {
        let bytes = self.synth.synthesize(&text, voice).await?;
        let path = self
            .asset_dir
            .join(format!("{index}_{segment}.{}", self.synth.extension()));
        let audio = AudioAsset::write(path, &bytes).await?;
        Ok(ScriptPiece { text, audio })
    }
}

/// A probability in `[0, 1]`; non-finite values fall back to the default.
fn odds(name: &str, value: f64, default: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        warn!("writer.{name} is {value}, using {default}");
        default
    }
}
