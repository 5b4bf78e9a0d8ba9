use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Race tuning parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RaceConfig {
    /// Racer tick granularity
    pub update_interval: Duration,
    /// Supervisor reporting granularity
    pub display_interval: Duration,
    /// Converts distance per hour into distance per millisecond
    pub speed_unit_factor: f64,
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self {
            update_interval: Duration::from_millis(100),
            display_interval: Duration::from_millis(1000),
            speed_unit_factor: 3_600_000.0,
        }
    }
}

impl RaceConfig {
    /// Create a new builder for RaceConfig
    pub fn builder() -> RaceConfigBuilder {
        RaceConfigBuilder::new()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.update_interval.is_zero() {
            return Err("update_interval must be greater than zero".to_string());
        }
        if self.display_interval.is_zero() {
            return Err("display_interval must be greater than zero".to_string());
        }
        if !self.speed_unit_factor.is_finite() || self.speed_unit_factor <= 0.0 {
            return Err("speed_unit_factor must be positive and finite".to_string());
        }
        Ok(())
    }

    /// Distance covered in one tick at the given speed (distance per hour)
    ///
    /// Precomputed once per racer so the advancement loop does simple
    /// addition.
    pub fn distance_per_tick(&self, speed: f64) -> f64 {
        speed / self.speed_unit_factor * self.update_interval.as_millis() as f64
    }
}

/// Builder for RaceConfig
pub struct RaceConfigBuilder {
    config: RaceConfig,
}

impl RaceConfigBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            config: RaceConfig::default(),
        }
    }

    /// Set the racer tick granularity
    pub fn update_interval(mut self, interval: Duration) -> Self {
        self.config.update_interval = interval;
        self
    }

    /// Set the supervisor reporting granularity
    pub fn display_interval(mut self, interval: Duration) -> Self {
        self.config.display_interval = interval;
        self
    }

    /// Set the speed unit conversion factor
    pub fn speed_unit_factor(mut self, factor: f64) -> Self {
        self.config.speed_unit_factor = factor;
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<RaceConfig, String> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for RaceConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
