//! Error taxonomy for the script pipeline.

use std::path::PathBuf;

use thiserror::Error;

/// The article source could not be read.
#[derive(Debug, Error)]
pub enum SourceFetchError {
    #[error("failed to read feed {location}: {source}")]
    Read {
        location: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to fetch feed {location}: {source}")]
    Http {
        location: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to parse feed {location}: {message}")]
    Parse { location: String, message: String },
}

/// The script writer returned text we cannot narrate.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("script writer request failed: {0}")]
    Request(String),

    #[error("script writer response is not valid JSON: {0}")]
    Malformed(String),

    #[error("script writer response has no \"formal\" field")]
    MissingFormal,
}

/// The synthesizer produced no usable audio.
#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("no audio content received")]
    NoAudioContent,

    #[error("speech synthesis request failed: {0}")]
    Request(String),

    #[error("failed to write audio asset {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// An external player process failed or its asset is missing.
#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("audio asset missing: {0}")]
    MissingAsset(PathBuf),

    #[error("failed to spawn {player}: {source}")]
    Spawn {
        player: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{player} exited with {status} while playing {asset}")]
    PlayerFailed {
        player: String,
        status: std::process::ExitStatus,
        asset: PathBuf,
    },

    #[error("failed to stop looping playback: {0}")]
    Stop(#[source] std::io::Error),
}

/// Everything that can fail while building one script.
#[derive(Debug, Error)]
pub enum AssemblyError {
    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Synthesis(#[from] SynthesisError),
}

/// Top-level failures that stop the pipeline.
#[derive(Debug, Error)]
pub enum JockeyError {
    #[error(transparent)]
    Source(#[from] SourceFetchError),

    #[error(transparent)]
    Assembly(#[from] AssemblyError),

    #[error(transparent)]
    Playback(#[from] PlaybackError),

    /// A logic error in the scheduler/queue handoff, never a runtime condition.
    #[error("queue invariant violated: {0}")]
    QueueInvariantViolation(String),
}
