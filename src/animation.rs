//! Companion animation: cycles narrator images while a script plays.
//!
//! One task per narration session. The task advances through frames
//! `1..=frames` of the narrator's image set every `interval`, checking its
//! cancellation token before each change. Frames are published on a watch
//! channel so the status API can show the current one.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::config::AnimationConfig;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NarratorFrame {
    pub voice: String,
    pub index: u32,
    pub path: PathBuf,
}

pub fn frame_path(image_dir: &Path, voice: &str, index: u32) -> PathBuf {
    image_dir.join(format!("narrator_{}_{index}.png", voice.to_lowercase()))
}

/// Spawns companion tasks and owns the frame channel.
pub struct Companion {
    image_dir: PathBuf,
    interval: Duration,
    frames: u32,
    tx: Arc<watch::Sender<Option<NarratorFrame>>>,
}

impl Companion {
    pub fn new(config: &AnimationConfig) -> Self {
        let (tx, _) = watch::channel(None);
        Self {
            image_dir: config.image_dir.clone(),
            interval: Duration::from_secs(config.interval_secs),
            frames: config.frames.max(1),
            tx: Arc::new(tx),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<NarratorFrame>> {
        self.tx.subscribe()
    }

    /// Start the animation for one script.
    pub fn begin(&self, voice: &str) -> NarrationSession {
        let token = CancellationToken::new();
        let task = tokio::spawn(cycle_frames(
            self.image_dir.clone(),
            voice.to_string(),
            self.frames,
            self.interval,
            token.clone(),
            self.tx.clone(),
        ));

        NarrationSession {
            token,
            task,
            tx: self.tx.clone(),
        }
    }
}

async fn cycle_frames(
    image_dir: PathBuf,
    voice: String,
    frames: u32,
    interval: Duration,
    token: CancellationToken,
    tx: Arc<watch::Sender<Option<NarratorFrame>>>,
) {
    let mut index = 1;
    loop {
        if token.is_cancelled() {
            break;
        }
        let path = frame_path(&image_dir, &voice, index);
        debug!("Narrator frame {}", path.display());
        tx.send_replace(Some(NarratorFrame {
            voice: voice.clone(),
            index,
            path,
        }));
        index = index % frames + 1;

        tokio::select! {
            _ = token.cancelled() => break,
            _ = tokio::time::sleep(interval) => {}
        }
    }
}

/// Runtime scope of one script's narration.
pub struct NarrationSession {
    token: CancellationToken,
    task: JoinHandle<()>,
    tx: Arc<watch::Sender<Option<NarratorFrame>>>,
}

impl NarrationSession {
    /// Cancel the animation and wait for its task to finish.
    pub async fn end(self) {
        self.token.cancel();
        if let Err(e) = self.task.await {
            warn!("Companion animation task failed: {e}");
        }
        self.tx.send_replace(None);
    }
}
