use std::sync::Arc;

use futures::future::try_join_all;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::config::RaceConfig;
use crate::error::{RaceError, Result};
use crate::racer::{Racer, RacerSnapshot};
use crate::ranker::{self, Standing};
use crate::report::Reporter;
use crate::tracker::CompletionTracker;

/// Orchestrates the full race lifecycle
///
/// Validates inputs, spawns one task per racer, observes progress every
/// display interval without interfering with the racers, and ranks the
/// field once every racer has finished.
pub struct RaceSupervisor {
    config: RaceConfig,
    reporter: Arc<dyn Reporter>,
}

impl std::fmt::Debug for RaceSupervisor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RaceSupervisor")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl RaceSupervisor {
    pub fn new(config: RaceConfig, reporter: Arc<dyn Reporter>) -> Result<Self> {
        config.validate().map_err(RaceError::InvalidConfiguration)?;
        Ok(Self { config, reporter })
    }

    /// Run one race to completion and return the final standings
    ///
    /// Configuration errors are rejected before any racer is dispatched;
    /// no partial race ever starts. A speed of exactly zero is accepted
    /// but produces a racer that never finishes.
    pub async fn run(&self, track_length: f64, speeds: &[f64]) -> Result<Vec<Standing>> {
        validate_inputs(track_length, speeds)?;

        // ids are assigned in submission order, starting at 1
        let racers: Vec<Arc<Racer>> = speeds
            .iter()
            .enumerate()
            .map(|(i, &speed)| Arc::new(Racer::new(i as u32 + 1, speed, track_length, &self.config)))
            .collect();

        let tracker = Arc::new(CompletionTracker::new(racers.len()));
        info!(racers = racers.len(), track_length, "race started");

        // One task per racer: all racers run concurrently, nothing queues
        // behind anything else.
        let handles: Vec<JoinHandle<()>> = racers
            .iter()
            .map(|racer| {
                let racer = Arc::clone(racer);
                let tracker = Arc::clone(&tracker);
                tokio::spawn(async move {
                    racer.advance().await;
                    tracker.mark_done();
                })
            })
            .collect();

        self.monitor(&racers, &tracker).await;

        // Every racer is done; awaiting the handles only surfaces panics.
        try_join_all(handles).await?;

        let standings = ranker::rank(&racers)?;
        self.reporter.on_standings(&standings).await;
        info!(finishers = standings.len(), "race finished");
        Ok(standings)
    }

    /// Report a snapshot per racer every display interval until all racers
    /// have finished
    ///
    /// Also selects on the tracker's completion notification, so the loop
    /// breaks promptly instead of sleeping out one more interval after the
    /// last finish. It never breaks while any racer is still running.
    async fn monitor(&self, racers: &[Arc<Racer>], tracker: &CompletionTracker) {
        let mut seconds_elapsed: u64 = 0;
        loop {
            tokio::select! {
                _ = sleep(self.config.display_interval) => {
                    seconds_elapsed += 1;
                    let snapshots: Vec<RacerSnapshot> =
                        racers.iter().map(|racer| racer.snapshot()).collect();
                    self.reporter.on_tick(seconds_elapsed, &snapshots).await;
                    if tracker.all_done() {
                        break;
                    }
                }
                _ = tracker.wait_all() => {
                    debug!(seconds_elapsed, "all racers finished");
                    break;
                }
            }
        }
    }
}

fn validate_inputs(track_length: f64, speeds: &[f64]) -> Result<()> {
    if !track_length.is_finite() || track_length <= 0.0 {
        return Err(RaceError::InvalidTrackLength {
            value: track_length,
        });
    }
    if speeds.is_empty() {
        return Err(RaceError::NoRacers);
    }
    for (i, &speed) in speeds.iter().enumerate() {
        if !speed.is_finite() || speed < 0.0 {
            return Err(RaceError::InvalidSpeed {
                id: i as u32 + 1,
                value: speed,
            });
        }
        if speed == 0.0 {
            warn!(racer = i as u32 + 1, "speed is zero: racer will never finish");
        }
    }
    Ok(())
}
