//! Discrete leaf distributions supported on the non-negative integers.
//!
//! Mass on a real interval is the mass on the integers it contains, read
//! off the CDF:
//!
//! P(X ∈ [a, b]) = CDF(⌊b⌋) - CDF(⌈a⌉ - 1)
//!
//! with open endpoints shifting the first/last integer inward.

use spn_core::{IntervalSet, Outcomes};
use statrs::distribution::{self as sd, DiscreteCDF};

use crate::error::ProbError;
use crate::{Distribution, Kind};

/// Integers beyond this bound are treated as "infinitely far".
const MAX_COUNT: f64 = 9_007_199_254_740_992.0; // 2^53

/// Mass on the integers covered by a union of intervals.
fn integer_mass(reals: &IntervalSet, cdf: impl Fn(u64) -> f64) -> f64 {
    let mut total = 0.0;
    for iv in reals.intervals() {
        let first = if iv.lo_closed() {
            iv.lo().ceil()
        } else {
            iv.lo().floor() + 1.0
        };
        let last = if iv.hi_closed() {
            iv.hi().floor()
        } else {
            iv.hi().ceil() - 1.0
        };
        let first = first.max(0.0);
        if last < first {
            continue;
        }

        let upper = if last >= MAX_COUNT { 1.0 } else { cdf(last as u64) };
        let lower = if first <= 0.0 {
            0.0
        } else {
            cdf((first - 1.0).min(MAX_COUNT) as u64)
        };
        total += (upper - lower).max(0.0);
    }
    total.min(1.0)
}

/// Poisson distribution with rate μ.
#[derive(Debug, Clone, PartialEq)]
pub struct Poisson {
    pub mu: f64,
    inner: sd::Poisson,
}

impl Poisson {
    pub fn new(mu: f64) -> Result<Self, ProbError> {
        let inner = sd::Poisson::new(mu).map_err(|e| ProbError::invalid("mu", e))?;
        Ok(Self { mu, inner })
    }
}

impl Distribution for Poisson {
    fn name(&self) -> &'static str {
        "poisson"
    }

    fn kind(&self) -> Kind {
        Kind::Discrete
    }

    fn prob(&self, outcomes: &Outcomes) -> f64 {
        integer_mass(outcomes.reals(), |k| self.inner.cdf(k))
    }
}

/// Bernoulli distribution: 1 with probability p, else 0.
#[derive(Debug, Clone, PartialEq)]
pub struct Bernoulli {
    pub p: f64,
    inner: sd::Bernoulli,
}

impl Bernoulli {
    pub fn new(p: f64) -> Result<Self, ProbError> {
        let inner = sd::Bernoulli::new(p).map_err(|e| ProbError::invalid("p", e))?;
        Ok(Self { p, inner })
    }
}

impl Distribution for Bernoulli {
    fn name(&self) -> &'static str {
        "bernoulli"
    }

    fn kind(&self) -> Kind {
        Kind::Discrete
    }

    fn prob(&self, outcomes: &Outcomes) -> f64 {
        integer_mass(outcomes.reals(), |k| self.inner.cdf(k))
    }
}

/// Binomial distribution: successes in `n` trials with probability `p`.
#[derive(Debug, Clone, PartialEq)]
pub struct Binomial {
    pub n: u64,
    pub p: f64,
    inner: sd::Binomial,
}

impl Binomial {
    pub fn new(n: u64, p: f64) -> Result<Self, ProbError> {
        let inner = sd::Binomial::new(p, n).map_err(|e| ProbError::invalid("p", e))?;
        Ok(Self { n, p, inner })
    }
}

impl Distribution for Binomial {
    fn name(&self) -> &'static str {
        "binomial"
    }

    fn kind(&self) -> Kind {
        Kind::Discrete
    }

    fn prob(&self, outcomes: &Outcomes) -> f64 {
        let n = self.n;
        integer_mass(outcomes.reals(), |k| {
            if k >= n {
                1.0
            } else {
                self.inner.cdf(k)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spn_core::Interval;

    const TOLERANCE: f64 = 1e-9;

    fn points(xs: &[f64]) -> Outcomes {
        Outcomes::from_reals(IntervalSet::points(xs.iter().copied()))
    }

    fn interval(lo: f64, hi: f64, lo_closed: bool, hi_closed: bool) -> Outcomes {
        Outcomes::from_reals(IntervalSet::from_intervals(Interval::new(
            lo, hi, lo_closed, hi_closed,
        )))
    }

    #[test]
    fn test_bernoulli_mass() {
        let b = Bernoulli::new(0.1).unwrap();
        assert!((b.prob(&points(&[1.0])) - 0.1).abs() < TOLERANCE);
        assert!((b.prob(&points(&[0.0])) - 0.9).abs() < TOLERANCE);
        assert_eq!(b.prob(&points(&[0.5])), 0.0);
        assert_eq!(b.prob(&points(&[2.0])), 0.0);
    }

    #[test]
    fn test_bernoulli_rejects_bad_p() {
        assert!(Bernoulli::new(1.5).is_err());
        assert!(Bernoulli::new(-0.1).is_err());
    }

    #[test]
    fn test_poisson_point_mass() {
        let p = Poisson::new(7.0).unwrap();
        // P(X = 0) = e^{-7}
        assert!((p.prob(&points(&[0.0])) - (-7.0_f64).exp()).abs() < TOLERANCE);
        // P(X = 1) = 7 e^{-7}
        assert!((p.prob(&points(&[1.0])) - 7.0 * (-7.0_f64).exp()).abs() < TOLERANCE);
    }

    #[test]
    fn test_poisson_open_and_closed_endpoints() {
        let p = Poisson::new(2.0).unwrap();
        let closed = p.prob(&interval(1.0, 3.0, true, true));
        let open = p.prob(&interval(1.0, 3.0, false, false));
        let two = p.prob(&points(&[2.0]));
        assert!((open - two).abs() < TOLERANCE);
        assert!(closed > open);
    }

    #[test]
    fn test_poisson_whole_line() {
        let p = Poisson::new(3.0).unwrap();
        let all = Outcomes::from_reals(IntervalSet::all());
        assert!((p.prob(&all) - 1.0).abs() < TOLERANCE);
        let negative = interval(f64::NEG_INFINITY, 0.0, false, false);
        assert_eq!(p.prob(&negative), 0.0);
    }

    #[test]
    fn test_binomial_mass() {
        let b = Binomial::new(4, 0.5).unwrap();
        // P(X = 2) = 6/16
        assert!((b.prob(&points(&[2.0])) - 0.375).abs() < TOLERANCE);
        assert!((b.prob(&interval(0.0, 10.0, true, true)) - 1.0).abs() < TOLERANCE);
        assert_eq!(b.prob(&points(&[5.0])), 0.0);
    }
}
