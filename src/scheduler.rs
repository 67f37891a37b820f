//! Narration scheduler: the consumer side of the script queue.
//!
//! STARTING → IDLE ⟲ (poll, waiting loop) → PLAYING → TRANSITIONING → PLAYING → … → IDLE
//!
//! One script narrates at a time. The waiting loop runs only while idle and
//! is stopped before any stinger or script plays.

use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use chrono::Local;
use serde::Serialize;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::animation::Companion;
use crate::config::PlaybackConfig;
use crate::error::JockeyError;
use crate::history::{OnAirLog, OnAirRecord};
use crate::player::{LoopHandle, ProcessController};
use crate::queue::ScriptQueue;
use crate::script::{Pauses, Script, Segment};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum SchedulerState {
    #[default]
    #[serde(rename = "STARTING")]
    Starting,
    #[serde(rename = "IDLE")]
    IdleWaiting,
    #[serde(rename = "TRANSITIONING")]
    Transitioning,
    #[serde(rename = "PLAYING")]
    Playing,
}

impl std::fmt::Display for SchedulerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Starting => write!(f, "STARTING"),
            Self::IdleWaiting => write!(f, "IDLE"),
            Self::Transitioning => write!(f, "TRANSITIONING"),
            Self::Playing => write!(f, "PLAYING"),
        }
    }
}

/// The article block of the script on air.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NowPlaying {
    pub index: u64,
    pub title: String,
    pub author: String,
    pub source: String,
    pub url: String,
    pub voice: String,
    pub segment: Option<Segment>,
}

impl NowPlaying {
    fn of(script: &Script) -> Self {
        Self {
            index: script.index,
            title: script.article.title.clone(),
            author: script.article.author.clone(),
            source: script.article.source.clone(),
            url: script.article.url.clone(),
            voice: script.voice.clone(),
            segment: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Status {
    pub state: SchedulerState,
    pub now_playing: Option<NowPlaying>,
}

/// Scheduler status shared with the API.
#[derive(Clone, Default)]
pub struct StatusBoard {
    inner: Arc<Mutex<Status>>,
}

impl StatusBoard {
    fn lock(&self) -> MutexGuard<'_, Status> {
        self.inner.lock().expect("status board mutex poisoned")
    }

    pub fn snapshot(&self) -> Status {
        self.lock().clone()
    }

    fn set_state(&self, state: SchedulerState) {
        self.lock().state = state;
    }

    fn on_air(&self, now_playing: Option<NowPlaying>) {
        self.lock().now_playing = now_playing;
    }

    fn set_segment(&self, segment: Segment) {
        if let Some(now) = self.lock().now_playing.as_mut() {
            now.segment = Some(segment);
        }
    }
}

pub struct NarrationScheduler {
    queue: ScriptQueue,
    player: Arc<dyn ProcessController>,
    companion: Companion,
    waiting: Option<LoopHandle>,
    state: SchedulerState,
    pauses: Pauses,
    intro_stinger: PathBuf,
    transition_stinger: PathBuf,
    waiting_loop: PathBuf,
    poll_interval: Duration,
    settle: Duration,
    status: StatusBoard,
    history: Option<OnAirLog>,
}

impl NarrationScheduler {
    pub fn new(
        queue: ScriptQueue,
        player: Arc<dyn ProcessController>,
        companion: Companion,
        config: &PlaybackConfig,
    ) -> Self {
        Self {
            queue,
            player,
            companion,
            waiting: None,
            state: SchedulerState::Starting,
            pauses: Pauses::from(config),
            intro_stinger: config.intro_stinger.clone(),
            transition_stinger: config.transition_stinger.clone(),
            waiting_loop: config.waiting_loop.clone(),
            poll_interval: config.poll_interval(),
            settle: config.settle(),
            status: StatusBoard::default(),
            history: None,
        }
    }

    pub fn with_history(mut self, log: OnAirLog) -> Self {
        self.history = Some(log);
        self
    }

    pub fn status(&self) -> StatusBoard {
        self.status.clone()
    }

    pub fn has_waiting_loop(&self) -> bool {
        self.waiting.is_some()
    }

    /// Run forever. Returns only on a queue invariant violation.
    pub async fn run(&mut self) -> Result<(), JockeyError> {
        info!("Narration scheduler ready");
        loop {
            self.step().await?;
        }
    }

    /// Perform exactly one transition and return the new state.
    pub async fn step(&mut self) -> Result<SchedulerState, JockeyError> {
        let next = match self.state {
            SchedulerState::Starting => {
                if self.queue.is_empty() {
                    SchedulerState::IdleWaiting
                } else {
                    self.play_stinger(Stinger::Intro).await;
                    self.narrate_next().await?
                }
            }
            SchedulerState::IdleWaiting => {
                if self.queue.is_empty() {
                    self.ensure_waiting_loop().await;
                    tokio::time::sleep(self.poll_interval).await;
                    SchedulerState::IdleWaiting
                } else {
                    self.stop_waiting_loop().await;
                    tokio::time::sleep(self.settle).await;
                    self.play_stinger(Stinger::Intro).await;
                    self.narrate_next().await?
                }
            }
            SchedulerState::Playing => {
                if self.queue.is_empty() {
                    SchedulerState::IdleWaiting
                } else {
                    self.set_state(SchedulerState::Transitioning);
                    self.play_stinger(Stinger::Transition).await;
                    SchedulerState::Transitioning
                }
            }
            SchedulerState::Transitioning => self.narrate_next().await?,
        };

        self.set_state(next);
        Ok(next)
    }

    /// Stop the waiting loop, if any.
    pub async fn shutdown(&mut self) {
        self.stop_waiting_loop().await;
    }

    fn set_state(&mut self, next: SchedulerState) {
        if self.state != next {
            info!("State: {} → {next}", self.state);
            self.state = next;
            self.status.set_state(next);
        }
    }

    /// Dequeue the head and narrate it. The queue was observed non-empty
    /// by the caller and only this scheduler dequeues.
    async fn narrate_next(&mut self) -> Result<SchedulerState, JockeyError> {
        let Some(script) = self.queue.dequeue() else {
            return Err(JockeyError::QueueInvariantViolation(format!(
                "queue was non-empty in state {} but dequeue returned nothing",
                self.state
            )));
        };
        self.set_state(SchedulerState::Playing);

        info!("Now playing script {}\n{}", script.index, script.card());
        let now_playing = NowPlaying::of(&script);
        self.status.on_air(Some(now_playing.clone()));

        let session = self.companion.begin(&script.voice);
        let started = Instant::now();
        let board = self.status.clone();
        let mut segments = Vec::with_capacity(3);
        let result = script
            .play(self.player.as_ref(), &self.pauses, |segment| {
                debug!("Segment {segment}");
                board.set_segment(segment);
                segments.push(segment);
            })
            .await;
        session.end().await;
        self.status.on_air(None);
        let elapsed = started.elapsed();

        let failed = result.is_err();
        if failed {
            // The last segment started is the one that failed.
            segments.pop();
        }
        self.record(&now_playing, segments, elapsed, failed);

        match result {
            Ok(_) => {
                tokio::time::sleep(self.pauses.after_script).await;
                Ok(SchedulerState::Playing)
            }
            Err(e) => {
                warn!(
                    "Playback of script {} failed, dropping the rest of it: {e}",
                    now_playing.index
                );
                Ok(SchedulerState::IdleWaiting)
            }
        }
    }

    fn record(&self, now: &NowPlaying, segments: Vec<Segment>, elapsed: Duration, failed: bool) {
        let Some(log) = &self.history else {
            return;
        };
        log.append(&OnAirRecord {
            timestamp: Local::now().to_rfc3339(),
            index: now.index,
            title: now.title.clone(),
            url: now.url.clone(),
            source: now.source.clone(),
            voice: now.voice.clone(),
            segments,
            playback_ms: elapsed.as_millis() as i64,
            failed,
        });
    }

    async fn play_stinger(&self, stinger: Stinger) {
        let asset = match stinger {
            Stinger::Intro => &self.intro_stinger,
            Stinger::Transition => &self.transition_stinger,
        };
        if let Err(e) = self.player.run_once(asset).await {
            warn!("{stinger:?} stinger failed: {e}");
        }
    }

    async fn ensure_waiting_loop(&mut self) {
        if let Some(handle) = self.waiting.as_mut() {
            if handle.is_running() {
                return;
            }
            warn!(
                "Waiting loop {} exited on its own, restarting it",
                handle.asset().display()
            );
            self.waiting = None;
        }
        match self.player.run_looping(&self.waiting_loop).await {
            Ok(handle) => {
                info!("Waiting for scripts");
                self.waiting = Some(handle);
            }
            Err(e) => warn!("Failed to start waiting loop: {e}"),
        }
    }

    async fn stop_waiting_loop(&mut self) {
        if let Some(mut handle) = self.waiting.take() {
            if let Err(e) = self.player.stop(&mut handle).await {
                warn!("Failed to stop waiting loop: {e}");
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Stinger {
    Intro,
    Transition,
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::config::AnimationConfig;
    use crate::player::fake::{Event, FakePlayer};
    use crate::script::test_support::script_with;

    const PLAY: Duration = Duration::from_secs(2);

    fn scheduler(player: Arc<FakePlayer>) -> (NarrationScheduler, ScriptQueue) {
        let queue = ScriptQueue::new();
        let scheduler = NarrationScheduler::new(
            queue.clone(),
            player,
            Companion::new(&AnimationConfig::default()),
            &PlaybackConfig::default(),
        );
        (scheduler, queue)
    }

    fn files(dir: &Path) -> usize {
        std::fs::read_dir(dir).unwrap().count()
    }

    #[tokio::test(start_paused = true)]
    async fn empty_start_goes_idle_with_one_waiting_loop() {
        let player = Arc::new(FakePlayer::new(PLAY));
        let (mut scheduler, _queue) = scheduler(player.clone());

        assert_eq!(scheduler.step().await.unwrap(), SchedulerState::IdleWaiting);
        assert!(!scheduler.has_waiting_loop());

        for _ in 0..5 {
            assert_eq!(scheduler.step().await.unwrap(), SchedulerState::IdleWaiting);
            assert!(scheduler.has_waiting_loop());
        }
        assert_eq!(player.count(|e| matches!(e, Event::LoopStarted(_))), 1);
        assert_eq!(
            player.events()[0].1,
            Event::LoopStarted("waiting.mp3".into())
        );
    }

    #[tokio::test(start_paused = true)]
    async fn queued_start_plays_intro_stinger_without_waiting_loop() {
        let dir = tempfile::tempdir().unwrap();
        let player = Arc::new(FakePlayer::new(PLAY));
        let (mut scheduler, queue) = scheduler(player.clone());
        queue.enqueue(script_with(dir.path(), 0, false, false));

        assert_eq!(scheduler.step().await.unwrap(), SchedulerState::Playing);
        assert_eq!(player.played(), vec!["intro.mp3", "0_formal.mp3"]);
        assert_eq!(player.count(|e| matches!(e, Event::LoopStarted(_))), 0);

        assert_eq!(scheduler.step().await.unwrap(), SchedulerState::IdleWaiting);
    }

    #[tokio::test(start_paused = true)]
    async fn back_to_back_scripts_use_transition_stinger() {
        let dir = tempfile::tempdir().unwrap();
        let player = Arc::new(FakePlayer::new(PLAY));
        let (mut scheduler, queue) = scheduler(player.clone());
        for i in 0..3 {
            queue.enqueue(script_with(dir.path(), i, false, false));
        }

        let mut states = Vec::new();
        while states.last() != Some(&SchedulerState::IdleWaiting) {
            states.push(scheduler.step().await.unwrap());
        }

        assert_eq!(
            states,
            vec![
                SchedulerState::Playing,
                SchedulerState::Transitioning,
                SchedulerState::Playing,
                SchedulerState::Transitioning,
                SchedulerState::Playing,
                SchedulerState::IdleWaiting,
            ]
        );
        assert_eq!(
            player.played(),
            vec![
                "intro.mp3",
                "0_formal.mp3",
                "transition.mp3",
                "1_formal.mp3",
                "transition.mp3",
                "2_formal.mp3",
            ]
        );
        assert_eq!(player.count(|e| matches!(e, Event::LoopStarted(_))), 0);
        assert_eq!(files(dir.path()), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn resuming_from_idle_stops_loop_then_plays_intro_stinger() {
        let dir = tempfile::tempdir().unwrap();
        let player = Arc::new(FakePlayer::new(PLAY));
        let (mut scheduler, queue) = scheduler(player.clone());

        scheduler.step().await.unwrap();
        scheduler.step().await.unwrap();
        assert!(scheduler.has_waiting_loop());

        queue.enqueue(script_with(dir.path(), 0, true, false));
        assert_eq!(scheduler.step().await.unwrap(), SchedulerState::Playing);
        assert!(!scheduler.has_waiting_loop());

        let events: Vec<Event> = player.events().into_iter().map(|(_, e)| e).collect();
        assert_eq!(
            events,
            vec![
                Event::LoopStarted("waiting.mp3".into()),
                Event::LoopStopped("waiting.mp3".into()),
                Event::Played { name: "intro.mp3".into(), files_in_dir: 0 },
                Event::Played { name: "0_intro.mp3".into(), files_in_dir: 2 },
                Event::Played { name: "0_formal.mp3".into(), files_in_dir: 1 },
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn one_waiting_loop_per_idle_period_over_100_transitions() {
        let dir = tempfile::tempdir().unwrap();
        let player = Arc::new(FakePlayer::new(PLAY));
        let (mut scheduler, queue) = scheduler(player.clone());

        scheduler.step().await.unwrap();
        scheduler.step().await.unwrap();

        for i in 0..100 {
            assert!(scheduler.has_waiting_loop());
            queue.enqueue(script_with(dir.path(), i, false, false));

            assert_eq!(scheduler.step().await.unwrap(), SchedulerState::Playing);
            assert!(!scheduler.has_waiting_loop());
            assert_eq!(scheduler.step().await.unwrap(), SchedulerState::IdleWaiting);
            scheduler.step().await.unwrap();
        }

        assert_eq!(player.count(|e| matches!(e, Event::LoopStarted(_))), 101);
        assert_eq!(player.count(|e| matches!(e, Event::LoopStopped(_))), 100);
        assert_eq!(player.max_live_loops.load(std::sync::atomic::Ordering::SeqCst), 1);
        assert_eq!(player.count(|e| matches!(e, Event::Played { name, .. } if name == "transition.mp3")), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn scripts_play_in_fifo_order_without_overlap() {
        let dir = tempfile::tempdir().unwrap();
        let player = Arc::new(FakePlayer::new(PLAY));
        let (mut scheduler, queue) = scheduler(player.clone());

        let producer = {
            let queue = queue.clone();
            let dir = dir.path().to_path_buf();
            tokio::spawn(async move {
                for i in 0..12u64 {
                    tokio::time::sleep(Duration::from_millis(1500 * (i % 4) + 300 * (i % 3))).await;
                    queue.enqueue(script_with(&dir, i, i % 2 == 0, i % 3 == 0));
                }
            })
        };
        let consumer = tokio::spawn(async move {
            let _ = scheduler.run().await;
        });

        producer.await.unwrap();
        tokio::time::sleep(Duration::from_secs(300)).await;
        consumer.abort();

        let formals: Vec<String> = player
            .played()
            .into_iter()
            .filter(|n| n.ends_with("_formal.mp3"))
            .collect();
        let expected: Vec<String> = (0..12).map(|i| format!("{i}_formal.mp3")).collect();
        assert_eq!(formals, expected);
        assert!(!player.overlapped.load(std::sync::atomic::Ordering::SeqCst));
        assert_eq!(player.max_live_loops.load(std::sync::atomic::Ordering::SeqCst), 1);
        assert_eq!(files(dir.path()), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn animation_is_gone_when_narration_returns() {
        let dir = tempfile::tempdir().unwrap();
        let player = Arc::new(FakePlayer::new(Duration::from_secs(25)));
        let (mut scheduler, queue) = scheduler(player.clone());
        let mut frames = scheduler.companion.subscribe();
        queue.enqueue(script_with(dir.path(), 0, false, false));
        queue.enqueue(script_with(dir.path(), 1, false, false));

        assert_eq!(scheduler.step().await.unwrap(), SchedulerState::Playing);
        assert!(frames.borrow_and_update().is_none());

        // Nothing publishes frames after the session ended.
        tokio::time::sleep(Duration::from_secs(60)).await;
        assert!(!frames.has_changed().unwrap());

        scheduler.step().await.unwrap();
        let during_next = tokio::spawn({
            let mut frames = frames.clone();
            async move {
                frames.changed().await.unwrap();
                frames.borrow().clone()
            }
        });
        assert_eq!(scheduler.step().await.unwrap(), SchedulerState::Playing);
        let first = during_next.await.unwrap().unwrap();
        assert_eq!(first.index, 1);
        assert!(frames.borrow().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn playback_error_resumes_like_idle_with_intro_stinger() {
        let dir = tempfile::tempdir().unwrap();
        let log_dir = tempfile::tempdir().unwrap();
        let player = Arc::new(FakePlayer::new(PLAY).failing_on("1_formal"));
        let (scheduler, queue) = scheduler(player.clone());
        let mut scheduler = scheduler.with_history(OnAirLog::new(log_dir.path()));
        for i in 0..3 {
            queue.enqueue(script_with(dir.path(), i, false, i == 1));
        }

        assert_eq!(scheduler.step().await.unwrap(), SchedulerState::Playing);
        assert_eq!(scheduler.step().await.unwrap(), SchedulerState::Transitioning);
        assert_eq!(scheduler.step().await.unwrap(), SchedulerState::IdleWaiting);
        // Failed and unplayed assets of script 1 are gone.
        assert_eq!(files(dir.path()), 1);
        assert!(scheduler.status().snapshot().now_playing.is_none());

        assert_eq!(scheduler.step().await.unwrap(), SchedulerState::Playing);
        assert_eq!(
            player.played(),
            vec![
                "intro.mp3",
                "0_formal.mp3",
                "transition.mp3",
                "intro.mp3",
                "2_formal.mp3",
            ]
        );
        assert_eq!(player.count(|e| matches!(e, Event::LoopStarted(_))), 0);

        let log = std::fs::read_dir(log_dir.path()).unwrap().next().unwrap().unwrap();
        let contents = std::fs::read_to_string(log.path()).unwrap();
        let failed: Vec<bool> = contents
            .lines()
            .map(|l| serde_json::from_str::<serde_json::Value>(l).unwrap()["failed"].as_bool().unwrap())
            .collect();
        assert_eq!(failed, vec![false, true, false]);
    }

    #[tokio::test(start_paused = true)]
    async fn stinger_failure_still_narrates() {
        let dir = tempfile::tempdir().unwrap();
        let player = Arc::new(FakePlayer::new(PLAY).failing_on("intro.mp3"));
        let (mut scheduler, queue) = scheduler(player.clone());
        queue.enqueue(script_with(dir.path(), 0, false, false));

        assert_eq!(scheduler.step().await.unwrap(), SchedulerState::Playing);
        assert_eq!(player.played(), vec!["0_formal.mp3"]);
    }

    #[tokio::test(start_paused = true)]
    async fn vanished_head_is_an_invariant_violation() {
        let dir = tempfile::tempdir().unwrap();
        let player = Arc::new(FakePlayer::new(PLAY));
        let (mut scheduler, queue) = scheduler(player.clone());
        queue.enqueue(script_with(dir.path(), 0, false, false));
        queue.enqueue(script_with(dir.path(), 1, false, false));

        scheduler.step().await.unwrap();
        assert_eq!(scheduler.step().await.unwrap(), SchedulerState::Transitioning);

        // A second consumer breaks the single-consumer contract.
        drop(queue.dequeue());
        let err = scheduler.step().await.unwrap_err();
        assert!(matches!(err, JockeyError::QueueInvariantViolation(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn status_tracks_state_and_now_playing() {
        let dir = tempfile::tempdir().unwrap();
        let player = Arc::new(FakePlayer::new(PLAY));
        let (mut scheduler, queue) = scheduler(player.clone());
        let board = scheduler.status();
        queue.enqueue(script_with(dir.path(), 4, true, false));

        let step = tokio::spawn(async move {
            scheduler.step().await.unwrap();
            scheduler
        });
        // Intro stinger (2s) then the script's intro segment.
        tokio::time::sleep(Duration::from_secs(3)).await;
        let status = board.snapshot();
        assert_eq!(status.state, SchedulerState::Playing);
        let now = status.now_playing.unwrap();
        assert_eq!(now.title, "Story 4");
        assert_eq!(now.segment, Some(Segment::Intro));

        step.await.unwrap();
        assert!(board.snapshot().now_playing.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn animation_stops_when_the_final_segment_ends() {
        let dir = tempfile::tempdir().unwrap();
        let player = Arc::new(FakePlayer::new(Duration::from_millis(9500)));
        let (mut scheduler, queue) = scheduler(player.clone());
        queue.enqueue(script_with(dir.path(), 0, false, false));

        let changes = Arc::new(Mutex::new(Vec::new()));
        let watcher = tokio::spawn({
            let mut frames = scheduler.companion.subscribe();
            let changes = changes.clone();
            async move {
                while frames.changed().await.is_ok() {
                    let index = frames.borrow_and_update().as_ref().map(|f| f.index);
                    changes.lock().unwrap().push((Instant::now(), index));
                }
            }
        });

        scheduler.step().await.unwrap();
        let step_done = Instant::now();
        watcher.abort();

        let last_played = player.events().last().unwrap().0;
        let changes = changes.lock().unwrap().clone();
        let (ended_at, last) = *changes.last().unwrap();
        assert_eq!(last, None);
        assert_eq!(ended_at, last_played);
        assert!(changes.iter().all(|(at, _)| *at <= last_played));
        // The outro pause still separates the script from the next transition.
        assert_eq!(step_done - last_played, Duration::from_millis(1000));
    }

    /// Delegates to a real controller and counts loop starts.
    struct CountingLooper {
        inner: crate::player::FfplayController,
        loops: std::sync::atomic::AtomicUsize,
    }

    #[async_trait::async_trait]
    impl ProcessController for CountingLooper {
        async fn run_once(&self, asset: &Path) -> Result<(), crate::error::PlaybackError> {
            self.inner.run_once(asset).await
        }

        async fn run_looping(&self, asset: &Path) -> Result<LoopHandle, crate::error::PlaybackError> {
            self.loops.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            self.inner.run_looping(asset).await
        }

        async fn stop(&self, handle: &mut LoopHandle) -> Result<(), crate::error::PlaybackError> {
            self.inner.stop(handle).await
        }
    }

    #[tokio::test]
    async fn dead_waiting_loop_is_restarted() {
        let dir = tempfile::tempdir().unwrap();
        let waiting = dir.path().join("waiting.mp3");
        std::fs::write(&waiting, b"ID3").unwrap();
        let config = PlaybackConfig {
            waiting_loop: waiting,
            poll_interval_ms: 20,
            ..PlaybackConfig::default()
        };
        // `true` exits right away, like a player that crashed.
        let player = Arc::new(CountingLooper {
            inner: crate::player::FfplayController::new("true"),
            loops: std::sync::atomic::AtomicUsize::new(0),
        });
        let mut scheduler = NarrationScheduler::new(
            ScriptQueue::new(),
            player.clone(),
            Companion::new(&AnimationConfig::default()),
            &config,
        );

        assert_eq!(scheduler.step().await.unwrap(), SchedulerState::IdleWaiting);
        let mut steps = 0;
        while player.loops.load(std::sync::atomic::Ordering::SeqCst) < 3 {
            steps += 1;
            assert!(steps < 200, "waiting loop was never restarted");
            scheduler.step().await.unwrap();
        }
        assert!(scheduler.has_waiting_loop());
    }
}
