//! Continuous leaf distributions.
//!
//! A continuous leaf assigns probability through its CDF:
//!
//! P(X ∈ (a, b)) = CDF(b) - CDF(a)
//!
//! Open and closed endpoints carry the same mass, single points carry none,
//! and nominal outcomes are impossible. The CDFs and special functions come
//! from `statrs`. `Normal` also measures its tails in log space, so events
//! many standard deviations out keep a finite log-probability.

use std::f64::consts::{PI, SQRT_2};

use spn_core::{IntervalSet, Outcomes};
use statrs::distribution::{self as sd, ContinuousCDF};
use statrs::function::erf::erfc;

use crate::error::ProbError;
use crate::{logsumexp, Distribution, Kind};

/// Mass of a union of intervals under a CDF.
fn interval_mass(reals: &IntervalSet, cdf: impl Fn(f64) -> f64) -> f64 {
    let total: f64 = reals
        .intervals()
        .iter()
        .filter(|iv| !iv.is_point())
        .map(|iv| {
            let upper = if iv.hi() == f64::INFINITY { 1.0 } else { cdf(iv.hi()) };
            let lower = if iv.lo() == f64::NEG_INFINITY { 0.0 } else { cdf(iv.lo()) };
            (upper - lower).max(0.0)
        })
        .sum();
    total.min(1.0)
}

/// Standardized distance from the mean beyond which the upper tail is taken
/// from its asymptotic series instead of `erfc`.
const ASYMPTOTIC_TAIL: f64 = 30.0;

/// `ln P(Z > z)` for a standard normal `Z` and `z >= 0`.
///
/// Below [`ASYMPTOTIC_TAIL`] this is `ln(erfc(z/√2)/2)`. Past it `erfc`
/// heads for underflow, so the Mills-ratio series is used:
///
/// ln Q(z) ≈ -z²/2 - ln(z√(2π)) + ln(1 - 1/z² + 3/z⁴ - 15/z⁶)
fn ln_upper_tail(z: f64) -> f64 {
    if z == f64::INFINITY {
        return f64::NEG_INFINITY;
    }
    if z < ASYMPTOTIC_TAIL {
        return (0.5 * erfc(z / SQRT_2)).ln();
    }
    let r = 1.0 / (z * z);
    let series = 1.0 - r * (1.0 - 3.0 * r * (1.0 - 5.0 * r));
    -0.5 * z * z - z.ln() - 0.5 * (2.0 * PI).ln() + series.ln()
}

/// `ln(exp(big) - exp(small))` for `big >= small`.
fn ln_sub_exp(big: f64, small: f64) -> f64 {
    if small == f64::NEG_INFINITY {
        return big;
    }
    big + (-(small - big).exp()).ln_1p()
}

/// `ln P(a < Z < b)` for a standard normal `Z`.
///
/// Intervals wholly inside one tail are measured from that tail, so the
/// result stays finite long after `CDF(b) - CDF(a)` rounds to zero.
fn ln_standard_mass(a: f64, b: f64) -> f64 {
    if a >= 0.0 {
        ln_sub_exp(ln_upper_tail(a), ln_upper_tail(b))
    } else if b <= 0.0 {
        ln_sub_exp(ln_upper_tail(-b), ln_upper_tail(-a))
    } else {
        let outside = ln_upper_tail(b).exp() + ln_upper_tail(-a).exp();
        (-outside).ln_1p()
    }
}

/// A univariate Normal distribution N(μ, σ²).
#[derive(Debug, Clone, PartialEq)]
pub struct Normal {
    /// Mean (μ)
    pub mean: f64,
    /// Standard deviation (σ)
    pub std_dev: f64,
    inner: sd::Normal,
}

impl Normal {
    /// Create N(mean, std_dev²).
    ///
    /// # Errors
    /// Returns error if std_dev is not strictly positive or a parameter is
    /// not finite.
    pub fn new(mean: f64, std_dev: f64) -> Result<Self, ProbError> {
        if !mean.is_finite() {
            return Err(ProbError::invalid("mean", "mean must be finite"));
        }
        if !std_dev.is_finite() {
            return Err(ProbError::invalid("std_dev", "standard deviation must be finite"));
        }
        let inner = sd::Normal::new(mean, std_dev).map_err(|e| ProbError::invalid("std_dev", e))?;
        Ok(Self {
            mean,
            std_dev,
            inner,
        })
    }

    /// CDF(x) = P(X ≤ x)
    pub fn cdf(&self, x: f64) -> f64 {
        self.inner.cdf(x)
    }

    fn standardize(&self, x: f64) -> f64 {
        (x - self.mean) / self.std_dev
    }
}

impl Distribution for Normal {
    fn name(&self) -> &'static str {
        "normal"
    }

    fn kind(&self) -> Kind {
        Kind::Continuous
    }

    fn prob(&self, outcomes: &Outcomes) -> f64 {
        interval_mass(outcomes.reals(), |x| self.cdf(x))
    }

    /// Measured in log space interval by interval, so far-tail events keep
    /// a finite log-probability.
    fn log_prob(&self, outcomes: &Outcomes) -> f64 {
        let masses: Vec<f64> = outcomes
            .reals()
            .intervals()
            .iter()
            .filter(|iv| !iv.is_point())
            .map(|iv| ln_standard_mass(self.standardize(iv.lo()), self.standardize(iv.hi())))
            .collect();
        logsumexp(&masses).min(0.0)
    }
}

/// A Gamma distribution with shape `k` and scale `θ`.
#[derive(Debug, Clone, PartialEq)]
pub struct Gamma {
    pub shape: f64,
    pub scale: f64,
    inner: sd::Gamma,
}

impl Gamma {
    /// Create Gamma(shape, scale). `statrs` parametrizes by rate = 1/scale.
    pub fn new(shape: f64, scale: f64) -> Result<Self, ProbError> {
        if !(scale > 0.0) {
            return Err(ProbError::invalid("scale", "scale must be positive"));
        }
        let inner = sd::Gamma::new(shape, 1.0 / scale).map_err(|e| ProbError::invalid("shape", e))?;
        Ok(Self {
            shape,
            scale,
            inner,
        })
    }
}

impl Distribution for Gamma {
    fn name(&self) -> &'static str {
        "gamma"
    }

    fn kind(&self) -> Kind {
        Kind::Continuous
    }

    fn prob(&self, outcomes: &Outcomes) -> f64 {
        interval_mass(outcomes.reals(), |x| {
            if x <= 0.0 {
                0.0
            } else {
                self.inner.cdf(x)
            }
        })
    }
}

/// The continuous uniform distribution on `[low, high]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Uniform {
    pub low: f64,
    pub high: f64,
    inner: sd::Uniform,
}

impl Uniform {
    pub fn new(low: f64, high: f64) -> Result<Self, ProbError> {
        let inner = sd::Uniform::new(low, high).map_err(|e| ProbError::invalid("bounds", e))?;
        Ok(Self { low, high, inner })
    }
}

impl Distribution for Uniform {
    fn name(&self) -> &'static str {
        "uniform"
    }

    fn kind(&self) -> Kind {
        Kind::Continuous
    }

    fn prob(&self, outcomes: &Outcomes) -> f64 {
        interval_mass(outcomes.reals(), |x| self.inner.cdf(x))
    }
}
