use serde::{Deserialize, Serialize};

use crate::{
    error::ConfigError,
    model::constants::{DEFAULT_K, DEFAULT_TIE_MARGIN, MAX_TIE_MARGIN}
};

/// Rating and simulation settings. Validated once in [`EloConfig::new`] and immutable afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EloConfig {
    k: f64,
    regress_toward_mean: bool,
    tie_margin: i32
}

impl EloConfig {
    /// - `k` must be finite and positive
    /// - `tie_margin` is a percentage-point band and must lie in `[0, 50]`
    pub fn new(k: f64, regress_toward_mean: bool, tie_margin: i32) -> Result<EloConfig, ConfigError> {
        if !k.is_finite() || k <= 0.0 {
            return Err(ConfigError::InvalidK(k));
        }

        if !(0..=MAX_TIE_MARGIN).contains(&tie_margin) {
            return Err(ConfigError::InvalidTieMargin(tie_margin));
        }

        Ok(EloConfig {
            k,
            regress_toward_mean,
            tie_margin
        })
    }

    pub fn k(&self) -> f64 {
        self.k
    }

    pub fn regress_toward_mean(&self) -> bool {
        self.regress_toward_mean
    }

    pub fn tie_margin(&self) -> i32 {
        self.tie_margin
    }
}

impl Default for EloConfig {
    fn default() -> Self {
        EloConfig {
            k: DEFAULT_K,
            regress_toward_mean: true,
            tie_margin: DEFAULT_TIE_MARGIN
        }
    }
}

impl<'de> Deserialize<'de> for EloConfig {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(default)]
        struct Raw {
            k: f64,
            regress_toward_mean: bool,
            tie_margin: i32
        }

        impl Default for Raw {
            fn default() -> Self {
                let config = EloConfig::default();
                Raw {
                    k: config.k,
                    regress_toward_mean: config.regress_toward_mean,
                    tie_margin: config.tie_margin
                }
            }
        }

        let raw = Raw::deserialize(deserializer)?;
        EloConfig::new(raw.k, raw.regress_toward_mean, raw.tie_margin).map_err(serde::de::Error::custom)
    }
}

/// Switches for a single simulation pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationOptions {
    /// Feed every simulated result back into the working ratings, so later fixtures
    /// of the same run see the drift. Off by default: ratings stay frozen for the run.
    pub update_ratings: bool,
    /// Score fixtures with known goals as they happened, and only draw the rest
    pub use_real_results: bool
}
