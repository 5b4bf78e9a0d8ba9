use thiserror::Error;

/// Race errors covering configuration rejection, contract violations and
/// worker task failures
#[derive(Error, Debug)]
pub enum RaceError {
    // Configuration errors - rejected before any racer is dispatched
    #[error("Invalid track length: {value} (must be positive)")]
    InvalidTrackLength { value: f64 },

    #[error("No racers: at least one speed is required")]
    NoRacers,

    #[error("Invalid speed for racer {id}: {value}")]
    InvalidSpeed { id: u32, value: f64 },

    #[error("Configuration invalid: {0}")]
    InvalidConfiguration(String),

    // Contract violations
    #[error("Racer {id} has no recorded finish duration")]
    RacerUnfinished { id: u32 },

    // Worker failures
    #[error("Racer task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl RaceError {
    /// Check if this error is a configuration error
    ///
    /// Configuration errors abort the race before any racer is dispatched;
    /// everything else indicates a bug in the race itself.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::InvalidTrackLength { .. }
                | Self::NoRacers
                | Self::InvalidSpeed { .. }
                | Self::InvalidConfiguration(_)
        )
    }
}

/// Result type alias for RaceError
pub type Result<T> = std::result::Result<T, RaceError>;
