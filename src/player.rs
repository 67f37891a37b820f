//! External audio player processes.
//!
//! One-shot playback blocks the caller until the player exits. Looping
//! playback runs detached and is terminated through its `LoopHandle`.
//! Every child is spawned with `kill_on_drop`, so dropping a handle (or the
//! whole runtime) never leaves a player running.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::{Child, Command};
use tracing::debug;

use crate::error::PlaybackError;

/// A running looped playback.
#[derive(Debug)]
pub struct LoopHandle {
    asset: PathBuf,
    child: Option<Child>,
    stopped: bool,
}

impl LoopHandle {
    pub fn new(asset: PathBuf, child: Child) -> Self {
        Self {
            asset,
            child: Some(child),
            stopped: false,
        }
    }

    /// A handle with no process behind it, for controllers that manage
    /// playback themselves.
    pub fn detached(asset: PathBuf) -> Self {
        Self {
            asset,
            child: None,
            stopped: false,
        }
    }

    pub fn asset(&self) -> &Path {
        &self.asset
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Whether the looping player is still alive. Detached handles count as
    /// alive until stopped.
    pub fn is_running(&mut self) -> bool {
        if self.stopped {
            return false;
        }
        match self.child.as_mut() {
            Some(child) => match child.try_wait() {
                Ok(None) => true,
                Ok(Some(status)) => {
                    debug!("Looping player for {} exited with {status}", self.asset.display());
                    false
                }
                Err(e) => {
                    debug!("Failed to poll looping player: {e}");
                    false
                }
            },
            None => true,
        }
    }

    /// Mark the handle stopped and hand out its child, once.
    pub fn take_child(&mut self) -> Option<Child> {
        self.stopped = true;
        self.child.take()
    }
}

#[async_trait]
pub trait ProcessController: Send + Sync {
    /// Play one asset to completion.
    async fn run_once(&self, asset: &Path) -> Result<(), PlaybackError>;

    /// Start looping playback of an asset and return immediately.
    async fn run_looping(&self, asset: &Path) -> Result<LoopHandle, PlaybackError>;

    /// Terminate a looping playback. Stopping a stopped handle is a no-op.
    async fn stop(&self, handle: &mut LoopHandle) -> Result<(), PlaybackError>;
}

/// Plays assets with `ffplay` (or any player accepting the same flags).
pub struct FfplayController {
    player: String,
}

impl FfplayController {
    pub fn new(player: &str) -> Self {
        Self {
            player: player.to_string(),
        }
    }

    fn command(&self, asset: &Path, looping: bool) -> Command {
        let mut cmd = Command::new(&self.player);
        cmd.args(["-v", "0", "-nodisp"]);
        if looping {
            cmd.args(["-loop", "0"]);
        } else {
            cmd.arg("-autoexit");
        }
        cmd.arg(asset)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true);
        cmd
    }

    fn spawn_error(&self, source: std::io::Error) -> PlaybackError {
        PlaybackError::Spawn {
            player: self.player.clone(),
            source,
        }
    }
}

#[async_trait]
impl ProcessController for FfplayController {
    async fn run_once(&self, asset: &Path) -> Result<(), PlaybackError> {
        if !asset.exists() {
            return Err(PlaybackError::MissingAsset(asset.to_path_buf()));
        }
        debug!("Playing {}", asset.display());

        let status = self
            .command(asset, false)
            .status()
            .await
            .map_err(|e| self.spawn_error(e))?;

        if !status.success() {
            return Err(PlaybackError::PlayerFailed {
                player: self.player.clone(),
                status,
                asset: asset.to_path_buf(),
            });
        }
        Ok(())
    }

    async fn run_looping(&self, asset: &Path) -> Result<LoopHandle, PlaybackError> {
        if !asset.exists() {
            return Err(PlaybackError::MissingAsset(asset.to_path_buf()));
        }
        debug!("Looping {}", asset.display());

        let child = self
            .command(asset, true)
            .spawn()
            .map_err(|e| self.spawn_error(e))?;
        Ok(LoopHandle::new(asset.to_path_buf(), child))
    }

    async fn stop(&self, handle: &mut LoopHandle) -> Result<(), PlaybackError> {
        let Some(mut child) = handle.take_child() else {
            return Ok(());
        };

        match child.start_kill() {
            Ok(()) => {}
            // Already exited and reaped.
            Err(e) if e.kind() == std::io::ErrorKind::InvalidInput => return Ok(()),
            Err(e) => return Err(PlaybackError::Stop(e)),
        }
        child.wait().await.map_err(PlaybackError::Stop)?;
        debug!("Stopped looping {}", handle.asset().display());
        Ok(())
    }
}

#[cfg(test)]
pub mod fake {
    //! Recording controller for scheduler and sequencer tests.

    use std::path::{Path, PathBuf};
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;
    use tokio::time::Instant;

    use super::{LoopHandle, ProcessController};
    use crate::error::PlaybackError;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Event {
        /// A one-shot playback finished; `files_in_dir` counts the files
        /// next to the asset when playback started.
        Played { name: String, files_in_dir: usize },
        LoopStarted(String),
        LoopStopped(String),
    }

    pub struct FakePlayer {
        play_time: Duration,
        fail_on: Option<String>,
        events: Mutex<Vec<(Instant, Event)>>,
        playing: AtomicBool,
        pub overlapped: AtomicBool,
        pub live_loops: AtomicUsize,
        pub max_live_loops: AtomicUsize,
    }

    fn name_of(path: &Path) -> String {
        path.file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default()
    }

    impl FakePlayer {
        pub fn new(play_time: Duration) -> Self {
            Self {
                play_time,
                fail_on: None,
                events: Mutex::new(Vec::new()),
                playing: AtomicBool::new(false),
                overlapped: AtomicBool::new(false),
                live_loops: AtomicUsize::new(0),
                max_live_loops: AtomicUsize::new(0),
            }
        }

        /// Fail every one-shot playback whose file name contains `needle`.
        pub fn failing_on(mut self, needle: &str) -> Self {
            self.fail_on = Some(needle.to_string());
            self
        }

        pub fn events(&self) -> Vec<(Instant, Event)> {
            self.events.lock().unwrap().clone()
        }

        pub fn played(&self) -> Vec<String> {
            self.events()
                .into_iter()
                .filter_map(|(_, e)| match e {
                    Event::Played { name, .. } => Some(name),
                    _ => None,
                })
                .collect()
        }

        pub fn count(&self, wanted: impl Fn(&Event) -> bool) -> usize {
            self.events().iter().filter(|(_, e)| wanted(e)).count()
        }

        fn record(&self, event: Event) {
            self.events.lock().unwrap().push((Instant::now(), event));
        }
    }

    #[async_trait]
    impl ProcessController for FakePlayer {
        async fn run_once(&self, asset: &Path) -> Result<(), PlaybackError> {
            let name = name_of(asset);
            if self.playing.swap(true, Ordering::SeqCst) {
                self.overlapped.store(true, Ordering::SeqCst);
            }
            let files_in_dir = asset
                .parent()
                .and_then(|dir| std::fs::read_dir(dir).ok())
                .map(|entries| entries.count())
                .unwrap_or(0);

            tokio::time::sleep(self.play_time).await;
            self.playing.store(false, Ordering::SeqCst);

            if self.fail_on.as_deref().is_some_and(|n| name.contains(n)) {
                return Err(PlaybackError::MissingAsset(asset.to_path_buf()));
            }
            self.record(Event::Played { name, files_in_dir });
            Ok(())
        }

        async fn run_looping(&self, asset: &Path) -> Result<LoopHandle, PlaybackError> {
            let live = self.live_loops.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_live_loops.fetch_max(live, Ordering::SeqCst);
            self.record(Event::LoopStarted(name_of(asset)));
            Ok(LoopHandle::detached(PathBuf::from(asset)))
        }

        async fn stop(&self, handle: &mut LoopHandle) -> Result<(), PlaybackError> {
            if handle.is_stopped() {
                return Ok(());
            }
            handle.take_child();
            self.live_loops.fetch_sub(1, Ordering::SeqCst);
            self.record(Event::LoopStopped(name_of(handle.asset())));
            Ok(())
        }
    }
}
