//! Scalable filter configuration and validation
//!
//! Defaults follow the scalable Bloom filter construction of Almeida et al.
//! ("Scalable Bloom Filters", 2007): growth rate 2, tightening ratio 0.8.
//!
//! # Example
//!
//! ```
//! use scalable_bloom::ScalableConfigBuilder;
//!
//! let config = ScalableConfigBuilder::new()
//!     .target_fpr(0.01)
//!     .initial_size(4096)
//!     .build()
//!     .expect("valid config");
//! assert_eq!(config.growth_rate, 2.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::FilterError;

/// Default growth rate (s)
pub const DEFAULT_GROWTH_RATE: f64 = 2.0;
/// Default size of the first sub-filter in bytes (m0)
pub const DEFAULT_INITIAL_SIZE: usize = 1024;
/// Default tightening ratio (r)
pub const DEFAULT_TIGHTENING_RATIO: f64 = 0.8;
/// Default false positive target (p)
pub const DEFAULT_TARGET_FPR: f64 = 0.1;

/// Scalable filter configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScalableConfig {
    /// False positive probability target of the first sub-filter (p)
    pub target_fpr: f64,
    /// Size multiplier applied to each new sub-filter (s)
    pub growth_rate: f64,
    /// Size of the first sub-filter in bytes (m0)
    pub initial_size: usize,
    /// Multiplier applied to the false positive target on each growth (r)
    pub tightening_ratio: f64,
}

impl Default for ScalableConfig {
    fn default() -> Self {
        Self {
            target_fpr: DEFAULT_TARGET_FPR,
            growth_rate: DEFAULT_GROWTH_RATE,
            initial_size: DEFAULT_INITIAL_SIZE,
            tightening_ratio: DEFAULT_TIGHTENING_RATIO,
        }
    }
}

impl ScalableConfig {
    /// Create a new configuration with validation
    pub fn new(
        target_fpr: f64,
        growth_rate: f64,
        initial_size: usize,
        tightening_ratio: f64,
    ) -> Result<Self, FilterError> {
        let config = Self {
            target_fpr,
            growth_rate,
            initial_size,
            tightening_ratio,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate parameter ranges
    pub fn validate(&self) -> Result<(), FilterError> {
        if !(self.target_fpr > 0.0 && self.target_fpr < 1.0) {
            return Err(FilterError::InvalidParameters(format!(
                "target_fpr must be in (0, 1), got {}",
                self.target_fpr
            )));
        }

        if !(self.tightening_ratio > 0.0 && self.tightening_ratio < 1.0) {
            return Err(FilterError::InvalidParameters(format!(
                "tightening_ratio must be in (0, 1), got {}",
                self.tightening_ratio
            )));
        }

        // Sub-filters never shrink
        if !(self.growth_rate.is_finite() && self.growth_rate >= 1.0) {
            return Err(FilterError::InvalidParameters(format!(
                "growth_rate must be a finite value >= 1, got {}",
                self.growth_rate
            )));
        }

        if self.initial_size == 0 {
            return Err(FilterError::InvalidParameters(
                "initial_size cannot be 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Builder-style method to set the false positive target
    pub fn with_target_fpr(mut self, fpr: f64) -> Self {
        self.target_fpr = fpr;
        self
    }
}

/// Builder for ScalableConfig with validation
#[derive(Default)]
pub struct ScalableConfigBuilder {
    target_fpr: Option<f64>,
    growth_rate: Option<f64>,
    initial_size: Option<usize>,
    tightening_ratio: Option<f64>,
}

impl ScalableConfigBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the false positive target (p)
    pub fn target_fpr(mut self, fpr: f64) -> Self {
        self.target_fpr = Some(fpr);
        self
    }

    /// Set the growth rate (s)
    pub fn growth_rate(mut self, rate: f64) -> Self {
        self.growth_rate = Some(rate);
        self
    }

    /// Set the first sub-filter size in bytes (m0)
    pub fn initial_size(mut self, bytes: usize) -> Self {
        self.initial_size = Some(bytes);
        self
    }

    /// Set the tightening ratio (r)
    pub fn tightening_ratio(mut self, ratio: f64) -> Self {
        self.tightening_ratio = Some(ratio);
        self
    }

    /// Build the ScalableConfig, validating all parameters
    pub fn build(self) -> Result<ScalableConfig, FilterError> {
        let config = self.build_unchecked();
        config.validate()?;
        Ok(config)
    }

    /// Build without validation
    pub fn build_unchecked(self) -> ScalableConfig {
        let defaults = ScalableConfig::default();

        ScalableConfig {
            target_fpr: self.target_fpr.unwrap_or(defaults.target_fpr),
            growth_rate: self.growth_rate.unwrap_or(defaults.growth_rate),
            initial_size: self.initial_size.unwrap_or(defaults.initial_size),
            tightening_ratio: self.tightening_ratio.unwrap_or(defaults.tightening_ratio),
        }
    }
}
