//! Debounced rebuild driver
//!
//! Segments arrive one at a time from a drawing session that runs at its own
//! pace. The driver applies each message to the generator as it arrives and
//! coalesces bursts into a single rebuild once the channel has been quiet for
//! the debounce interval. When every sender is dropped the driver rebuilds one
//! last time if anything changed, then stops.

use std::time::Duration;
use tokio::sync::{mpsc, watch};
use turtlegcode_core::{thread_safe, Segment, ThreadSafe};
use turtlegcode_generator::{GcodeGenerator, Program};
use turtlegcode_settings::ConfigPatch;

/// Default quiet period before a rebuild
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(250);

/// Input to the driver
#[derive(Debug, Clone)]
pub enum DriverMessage {
    /// Append a segment to the history
    Record(Segment),
    /// Drop the history
    Clear,
    /// Merge a configuration patch
    Configure(ConfigPatch),
}

/// Counters reported when the driver stops
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DriverStats {
    pub messages: usize,
    pub rebuilds: usize,
    pub rejected_patches: usize,
}

/// Owns the generator for the lifetime of a drawing session
pub struct RebuildDriver {
    generator: ThreadSafe<GcodeGenerator>,
    debounce: Duration,
    program_tx: watch::Sender<Program>,
    stats: DriverStats,
}

impl RebuildDriver {
    pub fn new(generator: GcodeGenerator, debounce: Duration) -> Self {
        let (program_tx, _) = watch::channel(generator.program().clone());
        Self {
            generator: thread_safe(generator),
            debounce,
            program_tx,
            stats: DriverStats::default(),
        }
    }

    /// Receiver that sees every published program
    pub fn subscribe(&self) -> watch::Receiver<Program> {
        self.program_tx.subscribe()
    }

    /// Shared handle to the generator
    ///
    /// Holders must not keep the lock across an `.await`.
    pub fn generator(&self) -> ThreadSafe<GcodeGenerator> {
        self.generator.clone()
    }

    /// Consume messages until every sender is dropped
    pub async fn run(mut self, mut rx: mpsc::Receiver<DriverMessage>) -> DriverStats {
        let mut dirty = false;

        loop {
            let message = if dirty {
                match tokio::time::timeout(self.debounce, rx.recv()).await {
                    Ok(message) => message,
                    Err(_) => {
                        self.rebuild();
                        dirty = false;
                        continue;
                    }
                }
            } else {
                rx.recv().await
            };

            match message {
                Some(message) => {
                    self.apply(message);
                    dirty = true;
                }
                None => break,
            }
        }

        if dirty {
            self.rebuild();
        }
        tracing::debug!(
            messages = self.stats.messages,
            rebuilds = self.stats.rebuilds,
            "Driver stopped"
        );
        self.stats
    }

    fn apply(&mut self, message: DriverMessage) {
        self.stats.messages += 1;
        let mut generator = self.generator.lock();
        match message {
            DriverMessage::Record(segment) => generator.record(segment),
            DriverMessage::Clear => generator.clear(),
            DriverMessage::Configure(patch) => {
                if let Err(e) = generator.update_configuration(&patch) {
                    tracing::warn!("Rejected configuration update: {}", e);
                    self.stats.rejected_patches += 1;
                }
            }
        }
    }

    fn rebuild(&mut self) {
        let program = self.generator.lock().rebuild().clone();
        self.stats.rebuilds += 1;
        self.program_tx.send_replace(program);
    }
}
