use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tracing::debug;

use crate::config::RaceConfig;

/// One simulated competitor advancing toward a fixed distance
///
/// The advancement loop is the single writer of `position`; the supervisor
/// reads it concurrently through `snapshot`. The finish duration is written
/// exactly once, after the terminal condition, so readers never observe a
/// racer as finished before its duration exists.
pub struct Racer {
    id: u32,
    speed_per_tick: f64,
    track_length: f64,
    update_interval: Duration,
    /// f64 bit pattern; single writer, multiple readers
    position: AtomicU64,
    finish: OnceLock<Duration>,
}

/// Point-in-time view of a racer for display
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RacerSnapshot {
    pub id: u32,
    pub position: f64,
}

impl Racer {
    pub fn new(id: u32, speed: f64, track_length: f64, config: &RaceConfig) -> Self {
        Self {
            id,
            speed_per_tick: config.distance_per_tick(speed),
            track_length,
            update_interval: config.update_interval,
            position: AtomicU64::new(0f64.to_bits()),
            finish: OnceLock::new(),
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    /// Current position, in the same distance unit as the track length
    pub fn position(&self) -> f64 {
        f64::from_bits(self.position.load(Ordering::Acquire))
    }

    /// Current (id, position) view; safe to call at any time, including
    /// after the racer finished
    pub fn snapshot(&self) -> RacerSnapshot {
        RacerSnapshot {
            id: self.id,
            position: self.position(),
        }
    }

    /// Whether the terminal duration has been recorded
    pub fn finished(&self) -> bool {
        self.finish.get().is_some()
    }

    /// Elapsed time from start to the terminal condition, once finished
    pub fn finish_duration(&self) -> Option<Duration> {
        self.finish.get().copied()
    }

    /// Advance from 0 to the track length in discrete ticks, then record
    /// the elapsed duration
    ///
    /// Each iteration sleeps one update interval and adds the per-tick
    /// distance. Position is stored only after a completed sleep, so a
    /// cancelled task never leaves a partial write. A non-positive track
    /// length finishes immediately after zero steps.
    pub async fn advance(&self) {
        let started = Instant::now();
        debug!(racer = self.id, "racer started");

        let mut pos = self.position();
        while pos < self.track_length {
            sleep(self.update_interval).await;
            pos += self.speed_per_tick;
            self.position.store(pos.to_bits(), Ordering::Release);
        }

        // advance runs once per racer, so the terminal write never races
        let _ = self.finish.set(started.elapsed());
        debug!(
            racer = self.id,
            duration = ?self.finish_duration(),
            "racer finished"
        );
    }

    /// Distance added per tick; position never overshoots the track
    /// length by more than this
    pub fn speed_per_tick(&self) -> f64 {
        self.speed_per_tick
    }

    #[cfg(test)]
    pub(crate) fn finished_with(id: u32, duration: Duration) -> Self {
        let racer = Self::new(id, 0.0, 0.0, &RaceConfig::default());
        racer.finish.set(duration).unwrap();
        racer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn test_config() -> RaceConfig {
        RaceConfig::default()
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_racer_scenario() {
        // 10 km at 36 km/h with 100 ms ticks: 0.001 km per tick,
        // 10000 ticks, about 1000 seconds
        let racer = Racer::new(1, 36.0, 10.0, &test_config());
        racer.advance().await;

        let duration = racer.finish_duration().unwrap();
        assert!(duration >= Duration::from_secs(1000));
        assert!(duration <= Duration::from_secs(1001));
        assert!(racer.position() >= 10.0);
        assert!(racer.position() < 10.0 + racer.speed_per_tick());
    }

    #[tokio::test(start_paused = true)]
    async fn test_duration_grows_with_track_length() {
        let short = Racer::new(1, 36.0, 1.0, &test_config());
        let long = Racer::new(2, 36.0, 2.0, &test_config());

        short.advance().await;
        long.advance().await;

        let short_d = short.finish_duration().unwrap();
        let long_d = long.finish_duration().unwrap();
        assert!(short_d > Duration::ZERO);
        assert!(long_d > short_d);
    }

    #[tokio::test(start_paused = true)]
    async fn test_duration_shrinks_with_speed() {
        let slow = Racer::new(1, 20.0, 1.0, &test_config());
        let fast = Racer::new(2, 80.0, 1.0, &test_config());

        slow.advance().await;
        fast.advance().await;

        assert!(fast.finish_duration().unwrap() < slow.finish_duration().unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn test_position_monotonic_and_bounded() {
        let racer = Arc::new(Racer::new(1, 120.0, 0.05, &test_config()));
        let handle = {
            let racer = Arc::clone(&racer);
            tokio::spawn(async move { racer.advance().await })
        };

        let mut last = 0.0;
        while !racer.finished() {
            let pos = racer.position();
            assert!(pos >= last, "position went backwards: {} < {}", pos, last);
            last = pos;
            tokio::time::sleep(Duration::from_millis(30)).await;
        }
        handle.await.unwrap();

        // never overshoots by more than one tick's increment
        assert!(racer.position() >= 0.05);
        assert!(racer.position() < 0.05 + racer.speed_per_tick());
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_track_length_finishes_immediately() {
        let racer = Racer::new(1, 36.0, 0.0, &test_config());
        racer.advance().await;

        assert!(racer.finished());
        assert_eq!(racer.position(), 0.0);
        assert!(racer.finish_duration().unwrap() < Duration::from_millis(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_negative_track_length_finishes_immediately() {
        let racer = Racer::new(1, 36.0, -5.0, &test_config());
        racer.advance().await;

        assert!(racer.finished());
        assert_eq!(racer.position(), 0.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_snapshot_after_finish_is_final_position() {
        let racer = Racer::new(3, 60.0, 0.01, &test_config());
        racer.advance().await;

        let first = racer.snapshot();
        let second = racer.snapshot();
        assert_eq!(first.id, 3);
        assert_eq!(first.position, second.position);
        assert!(first.position >= 0.01);
    }

    #[tokio::test(start_paused = true)]
    async fn test_not_finished_before_terminal_condition() {
        let racer = Arc::new(Racer::new(1, 36.0, 1.0, &test_config()));
        assert!(!racer.finished());
        assert_eq!(racer.finish_duration(), None);

        racer.advance().await;
        assert!(racer.finished());
    }
}
