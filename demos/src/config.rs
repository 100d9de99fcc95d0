//! Run configuration.

use std::num::NonZeroU64;
use std::path::PathBuf;

/// Settings of one demo run.
///
/// `Default` holds the values a bare `qfact run` uses.
#[derive(Debug, Clone, PartialEq)]
pub struct DemoConfig {
    /// Number whose divisors are listed.
    pub number: NonZeroU64,
    /// Picture shown in the report, if any.
    pub image_path: Option<PathBuf>,
    /// Estimator precision.
    pub precision: f64,
    /// Shots for the Bell circuit.
    pub bell_shots: u32,
    /// Seed for the simulator and the estimator noise.
    pub seed: Option<u64>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            number: NonZeroU64::new(14_400).unwrap_or(NonZeroU64::MIN),
            image_path: Some(PathBuf::from("/mnt/data/image.png")),
            precision: 0.01,
            bell_shots: 128,
            seed: None,
        }
    }
}

impl DemoConfig {
    /// Set the number to analyze.
    pub fn with_number(mut self, number: NonZeroU64) -> Self {
        self.number = number;
        self
    }

    /// Set the picture path.
    pub fn with_image_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.image_path = Some(path.into());
        self
    }

    /// Skip the picture.
    pub fn without_image(mut self) -> Self {
        self.image_path = None;
        self
    }

    /// Set the estimator precision.
    pub fn with_precision(mut self, precision: f64) -> Self {
        self.precision = precision;
        self
    }

    /// Set the Bell circuit shots.
    pub fn with_bell_shots(mut self, shots: u32) -> Self {
        self.bell_shots = shots;
        self
    }

    /// Make sampling and estimator noise reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
