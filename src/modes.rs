//! Mode extraction: damping conversion, audible-band culling, and
//! critical-band aggregation.
//!
//! Each stage consumes the previous stage's output and returns a new value.

use std::f64::consts::PI;

use nalgebra::{Complex, DVector};

use crate::config::{AudibleBand, MergeCurve};
use crate::solver::EigenDecomposition;

/// Eigenpair after damping: complex natural frequency plus its gain vector.
#[derive(Debug, Clone)]
pub struct DampedMode {
    /// `s = (−δ + √(δ² − ω²)) / 2`; real part is the decay rate, imaginary part
    /// the angular frequency (rad/s).
    pub natural: Complex<f64>,
    pub gains: DVector<f64>,
}

impl DampedMode {
    pub fn decay_rate(&self) -> f64 {
        self.natural.re
    }

    pub fn angular_frequency(&self) -> f64 {
        self.natural.im
    }

    /// `|Im(s)| / 2π`
    pub fn frequency_hz(&self) -> f64 {
        self.natural.im.abs() / (2.0 * PI)
    }
}

/// A resonant mode ready for synthesis.
#[derive(Debug, Clone, PartialEq)]
pub struct Mode {
    pub frequency_hz: f64,
    pub decay_rate: f64,
    /// One gain per degree of freedom.
    pub gains: DVector<f64>,
}

/// Complex natural frequency for eigenvalue `λ` with viscoelastic damping `γ`
/// and fluid damping `η`.
///
/// With `ω² = 4λ` and `δ = γλ + η`, returns `(−δ + √(δ² − ω²)) / 2` using the
/// principal complex square root, so both underdamped and overdamped modes
/// are handled.
pub fn complex_natural_frequency(lambda: f64, gamma: f64, eta: f64) -> Complex<f64> {
    let omega2 = 4.0 * lambda;
    let delta = gamma * lambda + eta;
    // +0.0 imaginary part selects the upper branch for negative discriminants
    let root = Complex::new(delta * delta - omega2, 0.0).sqrt();
    (Complex::new(-delta, 0.0) + root) / 2.0
}

/// Attach a complex natural frequency to every eigenpair.
///
/// Eigenvectors pass through unchanged as gain vectors.
pub fn apply_damping(eig: &EigenDecomposition, gamma: f64, eta: f64) -> Vec<DampedMode> {
    eig.eigenvalues
        .iter()
        .zip(eig.eigenvectors.column_iter())
        .map(|(&lambda, v)| DampedMode {
            natural: complex_natural_frequency(lambda, gamma, eta),
            gains: v.into_owned(),
        })
        .collect()
}

/// Keep modes strictly inside the audible band.
///
/// Survivors are returned in ascending frequency order; the sort is stable,
/// so already-ascending input keeps its relative order. An empty result is
/// valid.
pub fn cull_to_band(damped: Vec<DampedMode>, band: &AudibleBand) -> Vec<Mode> {
    let mut modes: Vec<Mode> = damped
        .into_iter()
        .filter(|d| band.contains(d.frequency_hz()))
        .map(|d| Mode {
            frequency_hz: d.frequency_hz(),
            decay_rate: d.decay_rate(),
            gains: d.gains,
        })
        .collect();
    modes.sort_by(|a, b| a.frequency_hz.total_cmp(&b.frequency_hz));
    modes
}

/// Merge modes that fall within one critical band of each other.
///
/// Walking the ascending list, the first unmerged mode at `x` absorbs every
/// following mode whose frequency is less than `Δ(x)` above it, summing gain
/// vectors. The merged mode keeps the anchor's frequency and decay rate.
/// Merged modes whose gains are all within `zero_gain_tol` of zero are
/// dropped.
pub fn aggregate_modes(modes: &[Mode], curve: &MergeCurve, zero_gain_tol: f64) -> Vec<Mode> {
    let mut merged = Vec::with_capacity(modes.len());
    let mut i = 0;

    while i < modes.len() {
        let anchor = &modes[i];
        let delta = curve.threshold(anchor.frequency_hz);
        let mut gains = anchor.gains.clone();

        let mut j = i + 1;
        while j < modes.len() && modes[j].frequency_hz - anchor.frequency_hz < delta {
            gains += &modes[j].gains;
            j += 1;
        }

        if gains.iter().all(|g| g.abs() <= zero_gain_tol) {
            log::debug!(
                "dropping silent merged mode at {:.3} Hz ({} constituents)",
                anchor.frequency_hz,
                j - i
            );
        } else {
            merged.push(Mode {
                frequency_hz: anchor.frequency_hz,
                decay_rate: anchor.decay_rate,
                gains,
            });
        }
        i = j;
    }

    merged
}
