//! # Event Tests
//!
//! Tests for the event algebra as seen from outside the crate:
//! - Constructors and symbol methods agree
//! - Solving multi-connective events over one symbol
//! - Outcome sets behave like a Boolean algebra

use proptest::prelude::*;
use spn_core::event::{self, Event};
use spn_core::{CoreError, Interval, IntervalSet, Outcomes, Symbol, Value};

// ============================================================================
// Constructor Tests
// ============================================================================

#[test]
fn test_free_functions_match_methods() {
    let x = Symbol::new("X");
    assert_eq!(event::le(&x, 10.0), x.le(10.0));
    assert_eq!(event::lt(&x, 10.0), x.lt(10.0));
    assert_eq!(event::ge(&x, 10.0), x.ge(10.0));
    assert_eq!(event::gt(&x, 10.0), x.gt(10.0));
    assert_eq!(event::eq(&x, 10.0), x.eq_value(10.0));
    assert_eq!(event::membership(&x, [1, 2]), x.is_in([1, 2]));
}

#[test]
fn test_events_do_not_depend_on_a_model() {
    let x = Symbol::new("X");
    let e = x.is_in([1]);
    // The same event value can be solved any number of times.
    let a = e.solve(&x).unwrap();
    let b = e.clone().solve(&x).unwrap();
    assert_eq!(a, b);
}

// ============================================================================
// Solving
// ============================================================================

#[test]
fn test_solve_nominal_membership() {
    let x = Symbol::new("X");
    let e = x.is_in(["a", "b"]).and(event::logical_not(x.is_in(["b"])));
    let solved = e.solve(&x).unwrap();
    assert!(solved.contains(&Value::from("a")));
    assert!(!solved.contains(&Value::from("b")));
    assert!(!solved.contains(&Value::Real(0.0)));
}

#[test]
fn test_solve_range() {
    let x = Symbol::new("X");
    let e = event::logical_and([x.ge(1.0), x.lt(3.0)]);
    let solved = e.solve(&x).unwrap();
    assert_eq!(
        solved.reals().intervals(),
        &[Interval::new(1.0, 3.0, true, false).unwrap()]
    );
}

#[test]
fn test_solve_rejects_other_symbols() {
    let x = Symbol::new("X");
    let y = Symbol::new("Y");
    let result = y.le(0.0).solve(&x);
    assert!(matches!(result, Err(CoreError::ForeignSymbol { .. })));
}

#[test]
fn test_empty_connectives() {
    let x = Symbol::new("X");
    assert_eq!(event::logical_and([]).solve(&x).unwrap(), Outcomes::all());
    assert!(event::logical_or([]).solve(&x).unwrap().is_empty());
}

#[test]
fn test_nnf_preserves_solution() {
    let x = Symbol::new("X");
    let e: Event = event::logical_not(event::logical_or([
        x.lt(0.0),
        event::logical_and([x.gt(2.0), x.lt(4.0)]),
    ]));
    assert_eq!(e.solve(&x).unwrap(), e.to_nnf().solve(&x).unwrap());
}

// ============================================================================
// Property Tests
// ============================================================================

fn arb_interval() -> impl Strategy<Value = Option<Interval>> {
    (-20i32..20, 0i32..10, any::<bool>(), any::<bool>()).prop_map(|(lo, width, lc, hc)| {
        Interval::new(f64::from(lo), f64::from(lo + width), lc, hc)
    })
}

fn arb_set() -> impl Strategy<Value = IntervalSet> {
    prop::collection::vec(arb_interval(), 0..5)
        .prop_map(|ivs| IntervalSet::from_intervals(ivs.into_iter().flatten()))
}

proptest! {
    #[test]
    fn complement_is_involutive(set in arb_set()) {
        prop_assert_eq!(set.complement().complement(), set);
    }

    #[test]
    fn set_and_complement_partition_the_line(set in arb_set(), probe in -25.0f64..25.0) {
        let comp = set.complement();
        prop_assert!(set.contains(probe) != comp.contains(probe));
        prop_assert!(set.intersection(&comp).is_empty());
    }

    #[test]
    fn de_morgan_holds(a in arb_set(), b in arb_set()) {
        let lhs = a.union(&b).complement();
        let rhs = a.complement().intersection(&b.complement());
        prop_assert_eq!(lhs, rhs);
    }

    #[test]
    fn membership_agrees_with_pointwise_logic(a in arb_set(), b in arb_set(), probe in -25.0f64..25.0) {
        prop_assert_eq!(a.union(&b).contains(probe), a.contains(probe) || b.contains(probe));
        prop_assert_eq!(a.intersection(&b).contains(probe), a.contains(probe) && b.contains(probe));
    }
}
