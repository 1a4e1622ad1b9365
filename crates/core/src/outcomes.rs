//! # Outcome Sets
//!
//! The solved form of an event over one symbol. A random variable in a
//! sum-product network takes either real values or nominal (string) values,
//! so an outcome set is a pair:
//!
//! - an [`IntervalSet`]: a finite union of disjoint real intervals, with open
//!   or closed endpoints and infinite bounds allowed;
//! - a [`NominalSet`]: a finite set of strings, or the complement of one.
//!
//! Both halves are closed under union, intersection and complement, which
//! is exactly what the event connectives need.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;

/// An outcome of a random variable.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A real number (continuous or discrete variables).
    Real(f64),
    /// A category label (nominal variables).
    Nominal(String),
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Real(x)
    }
}

impl From<i32> for Value {
    fn from(x: i32) -> Self {
        Value::Real(f64::from(x))
    }
}

impl From<i64> for Value {
    fn from(x: i64) -> Self {
        Value::Real(x as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Nominal(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Nominal(s)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Real(x) => write!(f, "{}", x),
            Value::Nominal(s) => write!(f, "'{}'", s),
        }
    }
}

// ============================================================================
// Intervals
// ============================================================================

/// A non-empty real interval.
///
/// Invariants:
/// - `lo <= hi`, neither is NaN
/// - infinite endpoints are always open
/// - a degenerate interval (`lo == hi`) is closed on both sides
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    lo: f64,
    hi: f64,
    lo_closed: bool,
    hi_closed: bool,
}

impl Interval {
    /// Create an interval, or `None` if the bounds describe the empty set.
    pub fn new(lo: f64, hi: f64, lo_closed: bool, hi_closed: bool) -> Option<Self> {
        if lo.is_nan() || hi.is_nan() {
            return None;
        }
        let lo_closed = lo_closed && lo.is_finite();
        let hi_closed = hi_closed && hi.is_finite();
        if lo > hi || (lo == hi && !(lo_closed && hi_closed)) {
            return None;
        }
        Some(Self {
            lo,
            hi,
            lo_closed,
            hi_closed,
        })
    }

    /// The degenerate interval `[x, x]`. `None` for non-finite `x`.
    pub fn point(x: f64) -> Option<Self> {
        Self::new(x, x, true, true)
    }

    /// The whole real line.
    pub fn all() -> Self {
        Self {
            lo: f64::NEG_INFINITY,
            hi: f64::INFINITY,
            lo_closed: false,
            hi_closed: false,
        }
    }

    pub fn lo(&self) -> f64 {
        self.lo
    }

    pub fn hi(&self) -> f64 {
        self.hi
    }

    pub fn lo_closed(&self) -> bool {
        self.lo_closed
    }

    pub fn hi_closed(&self) -> bool {
        self.hi_closed
    }

    /// Whether this interval is a single point.
    pub fn is_point(&self) -> bool {
        self.lo == self.hi
    }

    pub fn contains(&self, x: f64) -> bool {
        let above = if self.lo_closed { x >= self.lo } else { x > self.lo };
        let below = if self.hi_closed { x <= self.hi } else { x < self.hi };
        above && below
    }

    fn intersect(&self, other: &Interval) -> Option<Interval> {
        let (lo, lo_closed) = match self.lo.partial_cmp(&other.lo) {
            Some(Ordering::Greater) => (self.lo, self.lo_closed),
            Some(Ordering::Less) => (other.lo, other.lo_closed),
            _ => (self.lo, self.lo_closed && other.lo_closed),
        };
        let (hi, hi_closed) = match self.hi.partial_cmp(&other.hi) {
            Some(Ordering::Less) => (self.hi, self.hi_closed),
            Some(Ordering::Greater) => (other.hi, other.hi_closed),
            _ => (self.hi, self.hi_closed && other.hi_closed),
        };
        Interval::new(lo, hi, lo_closed, hi_closed)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_point() {
            return write!(f, "{{{}}}", self.lo);
        }
        let open = if self.lo_closed { '[' } else { '(' };
        let close = if self.hi_closed { ']' } else { ')' };
        write!(f, "{}{}, {}{}", open, self.lo, self.hi, close)
    }
}

/// A finite union of disjoint, non-touching real intervals, sorted by
/// lower bound.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IntervalSet {
    intervals: Vec<Interval>,
}

impl IntervalSet {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn all() -> Self {
        Self {
            intervals: vec![Interval::all()],
        }
    }

    /// Build a set from arbitrary (possibly overlapping) intervals.
    pub fn from_intervals(intervals: impl IntoIterator<Item = Interval>) -> Self {
        let mut items: Vec<Interval> = intervals.into_iter().collect();
        items.sort_by(|a, b| {
            a.lo
                .partial_cmp(&b.lo)
                .unwrap_or(Ordering::Equal)
                .then_with(|| b.lo_closed.cmp(&a.lo_closed))
        });

        let mut merged: Vec<Interval> = Vec::with_capacity(items.len());
        for next in items {
            if let Some(cur) = merged.last_mut() {
                let touches =
                    next.lo < cur.hi || (next.lo == cur.hi && (cur.hi_closed || next.lo_closed));
                if touches {
                    if next.hi > cur.hi {
                        cur.hi = next.hi;
                        cur.hi_closed = next.hi_closed;
                    } else if next.hi == cur.hi {
                        cur.hi_closed |= next.hi_closed;
                    }
                    continue;
                }
            }
            merged.push(next);
        }
        Self { intervals: merged }
    }

    /// The set of the given finite points. Non-finite values are dropped.
    pub fn points(values: impl IntoIterator<Item = f64>) -> Self {
        Self::from_intervals(values.into_iter().filter_map(Interval::point))
    }

    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    pub fn contains(&self, x: f64) -> bool {
        self.intervals.iter().any(|iv| iv.contains(x))
    }

    pub fn union(&self, other: &IntervalSet) -> IntervalSet {
        Self::from_intervals(self.intervals.iter().chain(other.intervals.iter()).copied())
    }

    pub fn intersection(&self, other: &IntervalSet) -> IntervalSet {
        let mut pieces = Vec::new();
        for a in &self.intervals {
            for b in &other.intervals {
                if let Some(iv) = a.intersect(b) {
                    pieces.push(iv);
                }
            }
        }
        Self::from_intervals(pieces)
    }

    /// The complement with respect to the real line.
    pub fn complement(&self) -> IntervalSet {
        let mut gaps = Vec::with_capacity(self.intervals.len() + 1);
        let mut lo = f64::NEG_INFINITY;
        let mut lo_closed = false;
        for iv in &self.intervals {
            if let Some(gap) = Interval::new(lo, iv.lo, lo_closed, !iv.lo_closed) {
                gaps.push(gap);
            }
            lo = iv.hi;
            lo_closed = !iv.hi_closed;
        }
        if let Some(gap) = Interval::new(lo, f64::INFINITY, lo_closed, false) {
            gaps.push(gap);
        }
        Self::from_intervals(gaps)
    }
}

impl fmt::Display for IntervalSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.intervals.is_empty() {
            return write!(f, "∅");
        }
        let parts: Vec<String> = self.intervals.iter().map(|iv| iv.to_string()).collect();
        write!(f, "{}", parts.join(" ∪ "))
    }
}

// ============================================================================
// Nominal sets
// ============================================================================

/// A set of category labels: either exactly `values`, or every label except
/// `values` when `complement` is set.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NominalSet {
    values: BTreeSet<String>,
    complement: bool,
}

impl NominalSet {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn all() -> Self {
        Self {
            values: BTreeSet::new(),
            complement: true,
        }
    }

    pub fn from_values(values: impl IntoIterator<Item = String>) -> Self {
        Self {
            values: values.into_iter().collect(),
            complement: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        !self.complement && self.values.is_empty()
    }

    pub fn is_complement(&self) -> bool {
        self.complement
    }

    /// The listed labels (members, or exclusions for a complement set).
    pub fn values(&self) -> &BTreeSet<String> {
        &self.values
    }

    pub fn contains(&self, label: &str) -> bool {
        self.values.contains(label) != self.complement
    }

    pub fn union(&self, other: &NominalSet) -> NominalSet {
        match (self.complement, other.complement) {
            (false, false) => Self {
                values: self.values.union(&other.values).cloned().collect(),
                complement: false,
            },
            (true, true) => Self {
                values: self.values.intersection(&other.values).cloned().collect(),
                complement: true,
            },
            (false, true) => Self {
                values: other.values.difference(&self.values).cloned().collect(),
                complement: true,
            },
            (true, false) => other.union(self),
        }
    }

    pub fn intersection(&self, other: &NominalSet) -> NominalSet {
        match (self.complement, other.complement) {
            (false, false) => Self {
                values: self.values.intersection(&other.values).cloned().collect(),
                complement: false,
            },
            (true, true) => Self {
                values: self.values.union(&other.values).cloned().collect(),
                complement: true,
            },
            (false, true) => Self {
                values: self.values.difference(&other.values).cloned().collect(),
                complement: false,
            },
            (true, false) => other.intersection(self),
        }
    }

    pub fn complement(&self) -> NominalSet {
        Self {
            values: self.values.clone(),
            complement: !self.complement,
        }
    }
}

impl fmt::Display for NominalSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<String> = self.values.iter().map(|s| format!("'{}'", s)).collect();
        if self.complement {
            write!(f, "~{{{}}}", labels.join(", "))
        } else {
            write!(f, "{{{}}}", labels.join(", "))
        }
    }
}

// ============================================================================
// Outcomes
// ============================================================================

/// The set of values a single-symbol event admits.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Outcomes {
    reals: IntervalSet,
    nominals: NominalSet,
}

impl Outcomes {
    pub fn new(reals: IntervalSet, nominals: NominalSet) -> Self {
        Self { reals, nominals }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn all() -> Self {
        Self {
            reals: IntervalSet::all(),
            nominals: NominalSet::all(),
        }
    }

    /// The finite set of the given values.
    pub fn from_values<'a>(values: impl IntoIterator<Item = &'a Value>) -> Self {
        let mut reals = Vec::new();
        let mut labels = Vec::new();
        for value in values {
            match value {
                Value::Real(x) => reals.push(*x),
                Value::Nominal(s) => labels.push(s.clone()),
            }
        }
        Self {
            reals: IntervalSet::points(reals),
            nominals: NominalSet::from_values(labels),
        }
    }

    /// Real outcomes only.
    pub fn from_reals(reals: IntervalSet) -> Self {
        Self {
            reals,
            nominals: NominalSet::empty(),
        }
    }

    pub fn reals(&self) -> &IntervalSet {
        &self.reals
    }

    pub fn nominals(&self) -> &NominalSet {
        &self.nominals
    }

    pub fn is_empty(&self) -> bool {
        self.reals.is_empty() && self.nominals.is_empty()
    }

    pub fn contains(&self, value: &Value) -> bool {
        match value {
            Value::Real(x) => self.reals.contains(*x),
            Value::Nominal(s) => self.nominals.contains(s),
        }
    }

    pub fn union(&self, other: &Outcomes) -> Outcomes {
        Self {
            reals: self.reals.union(&other.reals),
            nominals: self.nominals.union(&other.nominals),
        }
    }

    pub fn intersection(&self, other: &Outcomes) -> Outcomes {
        Self {
            reals: self.reals.intersection(&other.reals),
            nominals: self.nominals.intersection(&other.nominals),
        }
    }

    pub fn complement(&self) -> Outcomes {
        Self {
            reals: self.reals.complement(),
            nominals: self.nominals.complement(),
        }
    }
}

impl fmt::Display for Outcomes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.reals.is_empty(), self.nominals.is_empty()) {
            (true, true) => write!(f, "∅"),
            (false, true) => write!(f, "{}", self.reals),
            (true, false) => write!(f, "{}", self.nominals),
            (false, false) => write!(f, "{} ∪ {}", self.reals, self.nominals),
        }
    }
}
