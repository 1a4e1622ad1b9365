//! # Events
//!
//! Predicates over one or more symbols. Events are plain data: they never
//! reference a model, so the same event can be checked against any number
//! of graphs.
//!
//! An event over a single symbol can be *solved* into the set of outcomes it
//! admits. Events over several symbols are split into per-symbol pieces by
//! whoever evaluates them (a product node splits a conjunction across its
//! factors).
//!
//! ```rust
//! use spn_core::{event, Symbol};
//!
//! let x = Symbol::new("X");
//! let y = Symbol::new("Y");
//!
//! // (X <= 10) & (Y in {"a", "b"})
//! let e = event::logical_and([x.le(10.0), y.is_in(["a", "b"])]);
//! assert_eq!(e.symbols().len(), 2);
//! assert_eq!(e.conjuncts().len(), 2);
//! ```

use std::fmt;

use crate::error::CoreError;
use crate::outcomes::{Interval, IntervalSet, Outcomes, Value};
use crate::symbol::{Scope, Symbol};

/// Comparison operators on real-valued symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CmpOp {
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
}

impl fmt::Display for CmpOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CmpOp::Lt => "<",
            CmpOp::Le => "<=",
            CmpOp::Gt => ">",
            CmpOp::Ge => ">=",
            CmpOp::Eq => "==",
        };
        write!(f, "{}", s)
    }
}

/// A predicate over symbols.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// `symbol ∈ values`
    Contains { symbol: Symbol, values: Vec<Value> },
    /// `symbol <op> value`
    Compare {
        symbol: Symbol,
        op: CmpOp,
        value: f64,
    },
    /// Conjunction. The empty conjunction is true.
    And(Vec<Event>),
    /// Disjunction. The empty disjunction is false.
    Or(Vec<Event>),
    /// Negation.
    Not(Box<Event>),
}

/// `symbol ∈ values`.
pub fn membership<V: Into<Value>>(symbol: &Symbol, values: impl IntoIterator<Item = V>) -> Event {
    Event::Contains {
        symbol: symbol.clone(),
        values: values.into_iter().map(Into::into).collect(),
    }
}

fn compare(symbol: &Symbol, op: CmpOp, value: f64) -> Event {
    Event::Compare {
        symbol: symbol.clone(),
        op,
        value,
    }
}

/// `symbol < value`.
pub fn lt(symbol: &Symbol, value: f64) -> Event {
    compare(symbol, CmpOp::Lt, value)
}

/// `symbol <= value`.
pub fn le(symbol: &Symbol, value: f64) -> Event {
    compare(symbol, CmpOp::Le, value)
}

/// `symbol > value`.
pub fn gt(symbol: &Symbol, value: f64) -> Event {
    compare(symbol, CmpOp::Gt, value)
}

/// `symbol >= value`.
pub fn ge(symbol: &Symbol, value: f64) -> Event {
    compare(symbol, CmpOp::Ge, value)
}

/// `symbol == value`.
pub fn eq(symbol: &Symbol, value: f64) -> Event {
    compare(symbol, CmpOp::Eq, value)
}

/// Conjunction of the given events.
///
/// An operand that is itself a conjunction is spliced in, so chains of
/// `and` stay one level deep.
pub fn logical_and(events: impl IntoIterator<Item = Event>) -> Event {
    let mut out = Vec::new();
    for e in events {
        match e {
            Event::And(inner) => out.extend(inner),
            other => out.push(other),
        }
    }
    Event::And(out)
}

/// Disjunction of the given events, with nested disjunctions spliced in.
pub fn logical_or(events: impl IntoIterator<Item = Event>) -> Event {
    let mut out = Vec::new();
    for e in events {
        match e {
            Event::Or(inner) => out.extend(inner),
            other => out.push(other),
        }
    }
    Event::Or(out)
}

/// Negation of an event.
pub fn logical_not(event: Event) -> Event {
    Event::Not(Box::new(event))
}

impl Event {
    /// `self & other`.
    pub fn and(self, other: Event) -> Event {
        logical_and([self, other])
    }

    /// `self | other`.
    pub fn or(self, other: Event) -> Event {
        logical_or([self, other])
    }

    /// `~self`.
    pub fn negate(self) -> Event {
        logical_not(self)
    }

    /// Nesting depth of the event tree. A comparison or membership test has
    /// depth 1.
    ///
    /// Walks the tree with an explicit stack, so it is safe to call on
    /// events too deep for the recursive operations below.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 1)];
        while let Some((event, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            match event {
                Event::Contains { .. } | Event::Compare { .. } => {}
                Event::And(events) | Event::Or(events) => {
                    stack.extend(events.iter().map(|e| (e, depth + 1)));
                }
                Event::Not(inner) => stack.push((inner, depth + 1)),
            }
        }
        deepest
    }

    /// Every symbol the event mentions.
    pub fn symbols(&self) -> Scope {
        let mut scope = Scope::new();
        self.collect_symbols(&mut scope);
        scope
    }

    fn collect_symbols(&self, scope: &mut Scope) {
        match self {
            Event::Contains { symbol, .. } | Event::Compare { symbol, .. } => {
                scope.insert(symbol.clone());
            }
            Event::And(events) | Event::Or(events) => {
                for e in events {
                    e.collect_symbols(scope);
                }
            }
            Event::Not(inner) => inner.collect_symbols(scope),
        }
    }

    /// The truth value of an event that mentions no symbol at all.
    ///
    /// Returns `None` as soon as any symbol appears.
    pub fn constant(&self) -> Option<bool> {
        match self {
            Event::Contains { .. } | Event::Compare { .. } => None,
            Event::And(events) => events
                .iter()
                .try_fold(true, |acc, e| e.constant().map(|b| acc && b)),
            Event::Or(events) => events
                .iter()
                .try_fold(false, |acc, e| e.constant().map(|b| acc || b)),
            Event::Not(inner) => inner.constant().map(|b| !b),
        }
    }

    /// Push negations inward through `And`/`Or` (De Morgan).
    ///
    /// Negated leaves stay as `Not(leaf)`: a leaf already talks about a
    /// single symbol, so its complement is solved directly.
    pub fn to_nnf(&self) -> Event {
        match self {
            Event::Contains { .. } | Event::Compare { .. } => self.clone(),
            Event::And(events) => Event::And(events.iter().map(Event::to_nnf).collect()),
            Event::Or(events) => Event::Or(events.iter().map(Event::to_nnf).collect()),
            Event::Not(inner) => match inner.as_ref() {
                Event::Not(e) => e.to_nnf(),
                Event::And(events) => Event::Or(
                    events
                        .iter()
                        .map(|e| Event::Not(Box::new(e.clone())).to_nnf())
                        .collect(),
                ),
                Event::Or(events) => Event::And(
                    events
                        .iter()
                        .map(|e| Event::Not(Box::new(e.clone())).to_nnf())
                        .collect(),
                ),
                leaf => Event::Not(Box::new(leaf.clone())),
            },
        }
    }

    /// The top-level conjuncts, with nested conjunctions flattened.
    ///
    /// A non-conjunction is its own single conjunct.
    pub fn conjuncts(&self) -> Vec<&Event> {
        let mut out = Vec::new();
        self.collect_conjuncts(&mut out);
        out
    }

    fn collect_conjuncts<'a>(&'a self, out: &mut Vec<&'a Event>) {
        match self {
            Event::And(events) => {
                for e in events {
                    e.collect_conjuncts(out);
                }
            }
            other => out.push(other),
        }
    }

    /// Solve the event for `symbol`: the set of values of `symbol` that make
    /// it true.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ForeignSymbol`] if the event mentions any other
    /// symbol.
    pub fn solve(&self, symbol: &Symbol) -> Result<Outcomes, CoreError> {
        match self {
            Event::Contains { symbol: s, values } => {
                check_symbol(symbol, s)?;
                Ok(Outcomes::from_values(values))
            }
            Event::Compare { symbol: s, op, value } => {
                check_symbol(symbol, s)?;
                Ok(Outcomes::from_reals(solve_comparison(*op, *value)))
            }
            Event::And(events) => events.iter().try_fold(Outcomes::all(), |acc, e| {
                Ok(acc.intersection(&e.solve(symbol)?))
            }),
            Event::Or(events) => events.iter().try_fold(Outcomes::empty(), |acc, e| {
                Ok(acc.union(&e.solve(symbol)?))
            }),
            Event::Not(inner) => Ok(inner.solve(symbol)?.complement()),
        }
    }
}

fn check_symbol(expected: &Symbol, found: &Symbol) -> Result<(), CoreError> {
    if expected == found {
        Ok(())
    } else {
        Err(CoreError::ForeignSymbol {
            expected: expected.clone(),
            found: found.clone(),
        })
    }
}

fn solve_comparison(op: CmpOp, value: f64) -> IntervalSet {
    let inf = f64::INFINITY;
    let interval = match op {
        CmpOp::Lt => Interval::new(-inf, value, false, false),
        CmpOp::Le => Interval::new(-inf, value, false, true),
        CmpOp::Gt => Interval::new(value, inf, false, false),
        CmpOp::Ge => Interval::new(value, inf, true, false),
        CmpOp::Eq => Interval::point(value),
    };
    IntervalSet::from_intervals(interval)
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Contains { symbol, values } => {
                let items: Vec<String> = values.iter().map(|v| v.to_string()).collect();
                write!(f, "{} in {{{}}}", symbol, items.join(", "))
            }
            Event::Compare { symbol, op, value } => write!(f, "{} {} {}", symbol, op, value),
            Event::And(events) if events.is_empty() => write!(f, "true"),
            Event::Or(events) if events.is_empty() => write!(f, "false"),
            Event::And(events) => write_joined(f, events, " & "),
            Event::Or(events) => write_joined(f, events, " | "),
            Event::Not(inner) => write!(f, "~({})", inner),
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, events: &[Event], sep: &str) -> fmt::Result {
    let parts: Vec<String> = events.iter().map(|e| e.to_string()).collect();
    write!(f, "({})", parts.join(sep))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x() -> Symbol {
        Symbol::new("X")
    }

    fn y() -> Symbol {
        Symbol::new("Y")
    }

    #[test]
    fn test_comparison_solutions() {
        let x = x();
        assert!(lt(&x, 1.0).solve(&x).unwrap().reals().contains(0.5));
        assert!(!lt(&x, 1.0).solve(&x).unwrap().reals().contains(1.0));
        assert!(le(&x, 1.0).solve(&x).unwrap().reals().contains(1.0));
        assert!(gt(&x, 1.0).solve(&x).unwrap().reals().contains(1.5));
        assert!(!gt(&x, 1.0).solve(&x).unwrap().reals().contains(1.0));
        assert!(ge(&x, 1.0).solve(&x).unwrap().reals().contains(1.0));
        assert!(eq(&x, 1.0).solve(&x).unwrap().reals().contains(1.0));
        assert!(!eq(&x, 1.0).solve(&x).unwrap().reals().contains(1.1));
    }

    #[test]
    fn test_comparison_excludes_nominals() {
        let x = x();
        let solved = le(&x, 10.0).solve(&x).unwrap();
        assert!(solved.nominals().is_empty());
    }

    #[test]
    fn test_nan_comparison_is_empty() {
        let x = x();
        assert!(le(&x, f64::NAN).solve(&x).unwrap().is_empty());
    }

    #[test]
    fn test_connectives() {
        let x = x();
        // 0 < X <= 5 or X == 7
        let e = x.gt(0.0).and(x.le(5.0)).or(x.eq_value(7.0));
        let solved = e.solve(&x).unwrap();
        assert!(solved.reals().contains(5.0));
        assert!(solved.reals().contains(7.0));
        assert!(!solved.reals().contains(0.0));
        assert!(!solved.reals().contains(6.0));

        let negated = e.negate().solve(&x).unwrap();
        assert!(negated.reals().contains(0.0));
        assert!(negated.reals().contains(6.0));
        assert!(!negated.reals().contains(7.0));
    }

    #[test]
    fn test_solve_foreign_symbol() {
        let e = x().le(1.0).and(y().le(1.0));
        let err = e.solve(&x()).unwrap_err();
        assert_eq!(
            err,
            CoreError::ForeignSymbol {
                expected: x(),
                found: y()
            }
        );
    }

    #[test]
    fn test_symbols() {
        let e = logical_not(x().is_in([1, 2]).or(y().gt(0.0)));
        let scope = e.symbols();
        assert_eq!(scope.len(), 2);
        assert!(scope.contains(&x()));
        assert!(scope.contains(&y()));
    }

    #[test]
    fn test_constant_events() {
        assert_eq!(logical_and([]).constant(), Some(true));
        assert_eq!(logical_or([]).constant(), Some(false));
        assert_eq!(logical_not(logical_or([])).constant(), Some(true));
        assert_eq!(x().le(1.0).constant(), None);
    }

    #[test]
    fn test_nnf_de_morgan() {
        let e = logical_not(x().le(1.0).or(y().le(2.0)));
        let nnf = e.to_nnf();
        assert_eq!(
            nnf,
            Event::And(vec![
                logical_not(x().le(1.0)),
                logical_not(y().le(2.0)),
            ])
        );
        assert_eq!(nnf.conjuncts().len(), 2);
    }

    #[test]
    fn test_nnf_double_negation() {
        let e = logical_not(logical_not(x().le(1.0)));
        assert_eq!(e.to_nnf(), x().le(1.0));
    }

    #[test]
    fn test_conjuncts_flatten() {
        let e = logical_and([x().le(1.0), logical_and([y().le(1.0), x().ge(0.0)])]);
        assert_eq!(e.conjuncts().len(), 3);
        assert_eq!(x().le(1.0).or(y().le(1.0)).conjuncts().len(), 1);
    }

    #[test]
    fn test_chained_connectives_stay_flat() {
        let mut e = x().gt(-100.0);
        for i in 0..500 {
            e = e.and(x().lt(100.0 + i as f64));
        }
        assert_eq!(e.depth(), 2);
        assert_eq!(e.conjuncts().len(), 501);

        let either = x().le(0.0).or(x().ge(1.0)).or(y().is_in(["a"]));
        assert_eq!(either.depth(), 2);
        assert_eq!(
            either,
            Event::Or(vec![x().le(0.0), x().ge(1.0), y().is_in(["a"])])
        );

        // Only the matching connective is spliced.
        let mixed = x().le(0.0).or(y().le(0.0)).and(x().ge(-1.0));
        assert_eq!(mixed.depth(), 3);
    }

    #[test]
    fn test_depth_of_deep_nest() {
        assert_eq!(x().le(1.0).depth(), 1);
        assert_eq!(logical_and([]).depth(), 1);
        let mut e = x().le(1.0);
        for _ in 0..3_000 {
            e = Event::Not(Box::new(e));
        }
        assert_eq!(e.depth(), 3_001);
    }

    #[test]
    fn test_display() {
        let e = x().is_in([1, 2]).and(logical_not(y().lt(3.5)));
        assert_eq!(e.to_string(), "(X in {1, 2} & ~(Y < 3.5))");
        assert_eq!(y().is_in(["a"]).to_string(), "Y in {'a'}");
    }
}
