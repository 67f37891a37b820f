//! Generation loop: the producer side of the script queue.

use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::assembler::ScriptAssembler;
use crate::config::{FailurePolicy, GenerationConfig};
use crate::error::JockeyError;
use crate::queue::ScriptQueue;
use crate::source::ArticleSource;

pub struct GenerationLoop {
    source: Box<dyn ArticleSource>,
    assembler: ScriptAssembler,
    queue: ScriptQueue,
    policy: FailurePolicy,
    max_backlog: usize,
    backlog_pause: Duration,
    next_index: u64,
}

impl GenerationLoop {
    pub fn new(
        source: Box<dyn ArticleSource>,
        assembler: ScriptAssembler,
        queue: ScriptQueue,
        config: &GenerationConfig,
    ) -> Self {
        Self {
            source,
            assembler,
            queue,
            policy: config.on_error,
            max_backlog: config.max_backlog,
            backlog_pause: Duration::from_secs(config.backlog_pause_secs),
            next_index: 0,
        }
    }

    /// Produce scripts until the source closes.
    ///
    /// Returns an error only under the abort policy.
    pub async fn run(&mut self) -> Result<(), JockeyError> {
        loop {
            let batch = match self.source.next_batch().await {
                Ok(Some(batch)) => batch,
                Ok(None) => {
                    info!("Article source closed, generation loop done");
                    return Ok(());
                }
                Err(e) => {
                    warn!("Article source failed: {e}");
                    continue;
                }
            };

            for article in batch {
                let index = self.next_index;
                self.next_index += 1;

                let title = article.title.clone();
                let url = article.url.clone();
                match self.assembler.assemble(article, index).await {
                    Ok(script) => {
                        self.queue.enqueue(script);
                        debug!("Queued script {index} ({} waiting)", self.queue.len());
                    }
                    Err(e) => match self.policy {
                        FailurePolicy::Skip => {
                            warn!("Skipping \"{title}\" ({url}): {e}");
                            continue;
                        }
                        FailurePolicy::Abort => {
                            error!("Script generation failed for \"{title}\" ({url}): {e}");
                            return Err(e.into());
                        }
                    },
                }

                while self.queue.len() > self.max_backlog {
                    info!(
                        "{} scripts waiting, taking a {}s break",
                        self.queue.len(),
                        self.backlog_pause.as_secs()
                    );
                    tokio::time::sleep(self.backlog_pause).await;
                }
            }
        }
    }
}
