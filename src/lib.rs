// Core race simulation modules
pub mod config;
pub mod error;
pub mod racer;
pub mod ranker;
pub mod report;
pub mod supervisor;
pub mod tracker;

// Re-exports for convenience
pub use config::{RaceConfig, RaceConfigBuilder};
pub use error::{RaceError, Result};
pub use racer::{Racer, RacerSnapshot};
pub use ranker::{rank, Standing};
pub use report::{ConsoleReporter, Reporter};
pub use supervisor::RaceSupervisor;
pub use tracker::CompletionTracker;
