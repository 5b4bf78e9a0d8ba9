use std::sync::Arc;
use std::time::Duration;

use crate::error::{RaceError, Result};
use crate::racer::Racer;

/// One row of the final report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Standing {
    /// 1-based finishing position
    pub rank: usize,
    pub id: u32,
    pub duration: Duration,
}

/// Order finished racers by elapsed duration, fastest first
///
/// Exact ties are broken by ascending id so the order is deterministic.
/// Every input racer must have a recorded finish duration; an unfinished
/// racer here is a supervisor bug, not a runtime condition.
pub fn rank(racers: &[Arc<Racer>]) -> Result<Vec<Standing>> {
    let mut finished: Vec<(u32, Duration)> = racers
        .iter()
        .map(|racer| {
            racer
                .finish_duration()
                .map(|duration| (racer.id(), duration))
                .ok_or(RaceError::RacerUnfinished { id: racer.id() })
        })
        .collect::<Result<_>>()?;

    finished.sort_by(|a, b| a.1.cmp(&b.1).then(a.0.cmp(&b.0)));

    Ok(finished
        .into_iter()
        .enumerate()
        .map(|(i, (id, duration))| Standing {
            rank: i + 1,
            id,
            duration,
        })
        .collect())
}
