//! Scripts and the per-script narration sequencer.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, warn};

use crate::config::PlaybackConfig;
use crate::error::{PlaybackError, SynthesisError};
use crate::player::ProcessController;
use crate::source::Article;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Segment {
    Intro,
    Formal,
    Informal,
}

impl Segment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Intro => "intro",
            Self::Formal => "formal",
            Self::Informal => "informal",
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A synthesized audio file owned by exactly one script piece.
///
/// The file is removed once: by [`AudioAsset::discard`] after playback, or
/// on drop if the owning script is never played.
#[derive(Debug)]
pub struct AudioAsset {
    path: PathBuf,
    removed: bool,
}

impl AudioAsset {
    /// Write synthesized bytes to `path` and take ownership of the file.
    pub async fn write(path: PathBuf, bytes: &[u8]) -> Result<Self, SynthesisError> {
        if bytes.is_empty() {
            return Err(SynthesisError::NoAudioContent);
        }
        if let Err(source) = tokio::fs::write(&path, bytes).await {
            return Err(SynthesisError::Write { path, source });
        }
        Ok(Self {
            path,
            removed: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Delete the file now.
    pub fn discard(mut self) {
        self.remove();
    }

    fn remove(&mut self) {
        if self.removed {
            return;
        }
        self.removed = true;
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!("Deleted {}", self.path.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!("Failed to delete {}: {e}", self.path.display()),
        }
    }
}

impl Drop for AudioAsset {
    fn drop(&mut self) {
        self.remove();
    }
}

/// One narration segment: its text and its audio.
#[derive(Debug)]
pub struct ScriptPiece {
    pub text: String,
    pub audio: AudioAsset,
}

/// One assembled narration unit. The formal piece is always present.
#[derive(Debug)]
pub struct Script {
    pub index: u64,
    pub article: Article,
    pub voice: String,
    pub intro: Option<ScriptPiece>,
    pub formal: ScriptPiece,
    pub informal: Option<ScriptPiece>,
}

/// Fixed pauses of the narration sequence.
#[derive(Debug, Clone, Copy)]
pub struct Pauses {
    pub after_intro: Duration,
    pub after_formal: Duration,
    pub after_script: Duration,
}

impl From<&PlaybackConfig> for Pauses {
    fn from(config: &PlaybackConfig) -> Self {
        Self {
            after_intro: Duration::from_millis(config.intro_pause_ms),
            after_formal: Duration::from_millis(config.formal_pause_ms),
            after_script: Duration::from_millis(config.outro_pause_ms),
        }
    }
}

impl Default for Pauses {
    fn default() -> Self {
        Self::from(&PlaybackConfig::default())
    }
}

impl Script {
    pub fn segments(&self) -> Vec<Segment> {
        let mut segments = Vec::with_capacity(3);
        if self.intro.is_some() {
            segments.push(Segment::Intro);
        }
        segments.push(Segment::Formal);
        if self.informal.is_some() {
            segments.push(Segment::Informal);
        }
        segments
    }

    /// Full narration text, segments separated by blank lines.
    pub fn text(&self) -> String {
        self.intro
            .iter()
            .chain(std::iter::once(&self.formal))
            .chain(self.informal.iter())
            .map(|piece| piece.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Console card shown before narration.
    pub fn card(&self) -> String {
        format!(
            "-----------------------------------\n{}\n{} @ {}\n{}\n{}\nNarrated by {}\n\n{}\n-----------------------------------",
            self.article.title,
            self.article.author,
            self.article.source,
            self.article.url,
            self.article.pub_date.to_rfc3339(),
            self.voice,
            self.text(),
        )
    }

    /// Narrate intro, formal and informal in order with the fixed pauses in
    /// between, deleting each asset right after it plays. Returns as soon as
    /// the final segment finishes; the `after_script` pause is the caller's.
    ///
    /// On a playback failure the remaining segments are skipped and their
    /// assets deleted. Returns the segments that played.
    pub async fn play(
        self,
        player: &dyn ProcessController,
        pauses: &Pauses,
        mut on_segment: impl FnMut(Segment) + Send,
    ) -> Result<Vec<Segment>, PlaybackError> {
        let Script {
            intro,
            formal,
            informal,
            ..
        } = self;

        let formal_pause = if informal.is_some() {
            pauses.after_formal
        } else {
            Duration::ZERO
        };

        let mut steps = Vec::with_capacity(3);
        if let Some(piece) = intro {
            steps.push((Segment::Intro, piece, pauses.after_intro));
        }
        steps.push((Segment::Formal, formal, formal_pause));
        if let Some(piece) = informal {
            steps.push((Segment::Informal, piece, Duration::ZERO));
        }

        let mut played = Vec::with_capacity(steps.len());
        let mut steps = steps.into_iter();
        while let Some((segment, piece, pause)) = steps.next() {
            on_segment(segment);
            let result = player.run_once(piece.audio.path()).await;
            piece.audio.discard();

            if let Err(e) = result {
                for (_, rest, _) in steps {
                    rest.audio.discard();
                }
                return Err(e);
            }
            played.push(segment);

            if !pause.is_zero() {
                tokio::time::sleep(pause).await;
            }
        }

        Ok(played)
    }
}
