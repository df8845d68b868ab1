//! Analysis configuration: audible band, merge curve, and eigensolver settings.
//!
//! Every field has a default, so a partial JSON document only overrides what
//! it names.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ModalError, Result};
use crate::types::{
    DEFAULT_EIGEN_EPS, DEFAULT_EIGEN_MAX_ITER, DEFAULT_MAX_FREQUENCY_HZ, DEFAULT_MERGE_CURVE,
    DEFAULT_MIN_FREQUENCY_HZ, ZERO_GAIN_TOL,
};

/// Frequency range (Hz) retained for synthesis. Both limits are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudibleBand {
    pub min_hz: f64,
    pub max_hz: f64,
}

impl AudibleBand {
    pub fn new(min_hz: f64, max_hz: f64) -> Self {
        Self { min_hz, max_hz }
    }

    #[inline]
    pub fn contains(&self, frequency_hz: f64) -> bool {
        frequency_hz > self.min_hz && frequency_hz < self.max_hz
    }
}

impl Default for AudibleBand {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_FREQUENCY_HZ, DEFAULT_MAX_FREQUENCY_HZ)
    }
}

/// Piecewise-linear merge threshold Δ(f) through three control points.
///
/// For `0 ≤ f ≤ f₁` the line through the first two points is used; above
/// `f₁` the line through the last two points is extrapolated. Negative
/// frequencies map to zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MergeCurve {
    /// `(frequency_hz, threshold_hz)` control points, ascending in frequency.
    pub points: [(f64, f64); 3],
}

impl MergeCurve {
    pub fn new(points: [(f64, f64); 3]) -> Self {
        Self { points }
    }

    /// Merge threshold (Hz) at `frequency_hz`.
    pub fn threshold(&self, frequency_hz: f64) -> f64 {
        let [(t0, y0), (t1, y1), (t2, y2)] = self.points;
        if frequency_hz < 0.0 {
            0.0
        } else if frequency_hz <= t1 {
            let m0 = (y1 - y0) / (t1 - t0);
            y0 + m0 * (frequency_hz - t0)
        } else {
            let m1 = (y2 - y1) / (t2 - t1);
            y1 + m1 * (frequency_hz - t1)
        }
    }
}

impl Default for MergeCurve {
    fn default() -> Self {
        Self::new(DEFAULT_MERGE_CURVE)
    }
}

/// Settings forwarded to the symmetric eigensolver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EigenSettings {
    /// Convergence tolerance.
    pub eps: f64,
    /// Iteration cap; 0 iterates until converged.
    pub max_iterations: usize,
}

impl Default for EigenSettings {
    fn default() -> Self {
        Self {
            eps: DEFAULT_EIGEN_EPS,
            max_iterations: DEFAULT_EIGEN_MAX_ITER,
        }
    }
}

/// Complete configuration for one modal analysis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub band: AudibleBand,
    pub curve: MergeCurve,
    pub eigen: EigenSettings,
    /// Merged modes whose every gain is at or below this magnitude are dropped.
    pub zero_gain_tol: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            band: AudibleBand::default(),
            curve: MergeCurve::default(),
            eigen: EigenSettings::default(),
            zero_gain_tol: ZERO_GAIN_TOL,
        }
    }
}

impl AnalysisConfig {
    pub fn with_band(mut self, min_hz: f64, max_hz: f64) -> Self {
        self.band = AudibleBand::new(min_hz, max_hz);
        self
    }

    pub fn with_curve(mut self, points: [(f64, f64); 3]) -> Self {
        self.curve = MergeCurve::new(points);
        self
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON file, or return defaults if the file is missing or invalid.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match std::fs::read_to_string(path.as_ref()) {
            Ok(contents) => match Self::from_json(&contents) {
                Ok(config) => {
                    log::info!("Loaded analysis configuration from {:?}", path.as_ref());
                    config
                }
                Err(e) => {
                    log::warn!("Failed to parse analysis configuration: {}, using defaults", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Analysis configuration file not found, using defaults");
                Self::default()
            }
        }
    }

    /// Reject inverted bands, non-ascending curves, and negative tolerances.
    pub fn validate(&self) -> Result<()> {
        let AudibleBand { min_hz, max_hz } = self.band;
        if !(min_hz.is_finite() && max_hz.is_finite() && min_hz >= 0.0 && min_hz < max_hz) {
            return Err(ModalError::invalid_config(format!(
                "audible band ({}, {}) must satisfy 0 <= min < max",
                min_hz, max_hz
            )));
        }

        let [(t0, _), (t1, _), (t2, _)] = self.curve.points;
        if !(t0 < t1 && t1 < t2) {
            return Err(ModalError::invalid_config(format!(
                "merge curve frequencies ({}, {}, {}) must be strictly ascending",
                t0, t1, t2
            )));
        }
        if self.curve.points.iter().any(|(t, y)| !t.is_finite() || !y.is_finite()) {
            return Err(ModalError::invalid_config("merge curve points must be finite"));
        }
        // Piecewise linear: the band minimum sits at an endpoint or at the knee
        let knee = Some(t1).filter(|&t| min_hz < t && t < max_hz);
        for f in [Some(min_hz), knee, Some(max_hz)].into_iter().flatten() {
            let delta = self.curve.threshold(f);
            if delta.is_nan() || delta <= 0.0 {
                return Err(ModalError::invalid_config(format!(
                    "merge threshold at {} Hz is {}, must be positive across the band",
                    f, delta
                )));
            }
        }

        if self.zero_gain_tol.is_nan() || self.zero_gain_tol < 0.0 {
            return Err(ModalError::invalid_config("zero_gain_tol must be non-negative"));
        }
        if self.eigen.eps.is_nan() || self.eigen.eps <= 0.0 {
            return Err(ModalError::invalid_config("eigen.eps must be positive"));
        }
        Ok(())
    }
}
