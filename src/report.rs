use async_trait::async_trait;

use crate::racer::RacerSnapshot;
use crate::ranker::Standing;

/// Output seam between the race core and the outside world
///
/// The core never prints; the supervisor pushes one snapshot set per
/// display tick and the final standings through this trait.
#[async_trait]
pub trait Reporter: Send + Sync {
    /// One progress snapshot per racer, every display tick
    async fn on_tick(&self, seconds_elapsed: u64, snapshots: &[RacerSnapshot]);

    /// Final standings, fastest first
    async fn on_standings(&self, standings: &[Standing]);
}

/// Prints progress and standings to stdout
pub struct ConsoleReporter;

#[async_trait]
impl Reporter for ConsoleReporter {
    async fn on_tick(&self, seconds_elapsed: u64, snapshots: &[RacerSnapshot]) {
        println!("#{} SECOND(S)#", seconds_elapsed);
        for snapshot in snapshots {
            println!(
                "[{}] Racer {} - {:.2} km",
                format_clock(seconds_elapsed),
                snapshot.id,
                snapshot.position
            );
        }
    }

    async fn on_standings(&self, standings: &[Standing]) {
        println!("#FINISH#");
        for standing in standings {
            println!(
                "{} - Racer {} - {:.3}s",
                standing.rank,
                standing.id,
                standing.duration.as_secs_f64()
            );
        }
    }
}

fn format_clock(seconds: u64) -> String {
    format!(
        "{:02}:{:02}:{:02}",
        seconds / 3600,
        (seconds % 3600) / 60,
        seconds % 60
    )
}
