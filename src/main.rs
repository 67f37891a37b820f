//! jockey: continuous narrated news radio.

mod animation;
mod api;
mod assembler;
mod config;
mod error;
mod generation;
mod history;
mod player;
mod queue;
mod scheduler;
mod script;
mod source;
mod synth;
mod writer;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::{TTSConfig, TtsBackend};
use crate::synth::SpeechSynthesizer;

#[derive(Parser, Debug)]
#[command(name = "jockey", about = "Continuous narrated news radio")]
struct Args {
    /// Path to config.yaml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Article feed (file path or http(s) URL), overrides source.location
    #[arg(short, long)]
    articles: Option<String>,

    /// Seed for intro/informal draws and voice choice
    #[arg(long)]
    seed: Option<u64>,

    /// Enable verbose (debug) logging
    #[arg(short, long)]
    verbose: bool,
}

async fn build_synthesizer(
    config: &TTSConfig,
) -> Result<Arc<dyn SpeechSynthesizer>, Box<dyn std::error::Error>> {
    match config.backend {
        TtsBackend::Cloud => Ok(Arc::new(synth::CloudSynthesizer::new(config)?)),
        #[cfg(feature = "kokoro")]
        TtsBackend::Kokoro => {
            // Model loading is blocking and takes a few seconds
            info!("Loading Kokoro TTS model...");
            let tts_config = config.clone();
            let synth = tokio::task::spawn_blocking(move || {
                synth::kokoro::KokoroSynthesizer::load(&tts_config)
            })
            .await??;
            Ok(Arc::new(synth))
        }
        #[cfg(not(feature = "kokoro"))]
        TtsBackend::Kokoro => Err("tts.backend is kokoro but jockey was built without the kokoro feature".into()),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Initialize logging (suppress noisy HTTP internals)
    let filter = if args.verbose {
        EnvFilter::new("debug,reqwest=info,hyper=info,ort=info")
    } else {
        EnvFilter::new("info,reqwest=warn,hyper=warn,ort=warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("jockey starting");

    let mut config = config::Config::load(args.config.as_deref());
    if let Some(articles) = args.articles {
        config.source.location = articles;
    }
    info!("Reading articles from {}", config.source.location);

    std::fs::create_dir_all(&config.playback.asset_dir)?;

    let rng = match args.seed {
        Some(seed) => {
            info!("Using seed {seed}");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    let synth = build_synthesizer(&config.tts).await?;
    let script_writer = Arc::new(writer::OllamaScriptWriter::new(&config.writer)?);
    let samples = writer::StyleSamples::load(&config.writer);
    let assembler = assembler::ScriptAssembler::new(script_writer, synth, &config, samples, rng);

    let queue = queue::ScriptQueue::new();
    let source = source::FeedSource::new(&config.source)?;
    let mut generation =
        generation::GenerationLoop::new(Box::new(source), assembler, queue.clone(), &config.generation);

    let companion = animation::Companion::new(&config.animation);
    let frames = companion.subscribe();
    let player = Arc::new(player::FfplayController::new(&config.playback.player));
    let mut scheduler =
        scheduler::NarrationScheduler::new(queue.clone(), player, companion, &config.playback);

    if config.history.enabled {
        match history::default_dir() {
            Some(dir) => {
                info!("Logging on-air scripts to {}", dir.display());
                scheduler = scheduler.with_history(history::OnAirLog::new(dir));
            }
            None => warn!("No home directory, on-air log disabled"),
        }
    }

    if config.api.enabled {
        let api_state = api::ApiState {
            status: scheduler.status(),
            queue: queue.clone(),
            frames,
        };
        api::start_status_api(api_state, config.api.port).await;
    }

    let mut generation_task = tokio::spawn(async move { generation.run().await });
    let mut generation_done = false;

    let outcome: Result<(), Box<dyn std::error::Error>> = {
        let narration = scheduler.run();
        tokio::pin!(narration);

        loop {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    info!("Received Ctrl-C, shutting down");
                    break Ok(());
                }
                result = &mut generation_task, if !generation_done => match result {
                    Ok(Ok(())) => {
                        generation_done = true;
                        info!("No more articles, narrating what is queued");
                    }
                    Ok(Err(e)) => {
                        error!("Generation stopped: {e}");
                        break Err(e.into());
                    }
                    Err(e) => break Err(e.into()),
                },
                result = &mut narration => {
                    if let Err(e) = &result {
                        error!("Narration stopped: {e}");
                    }
                    break result.map_err(Into::into);
                }
            }
        }
    };

    generation_task.abort();
    scheduler.shutdown().await;
    info!("{} queued scripts dropped", queue.len());

    outcome
}
