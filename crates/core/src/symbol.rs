//! # Symbolic Variables
//!
//! A [`Symbol`] names a random variable before any distribution is attached
//! to it. Symbols are cheap to clone: every clone shares the same interned
//! name, so computation graphs can hold on to the symbol they govern without
//! owning the caller's variable.
//!
//! ```rust
//! use spn_core::Symbol;
//!
//! let x = Symbol::new("X");
//! let event = x.le(10.0);
//! assert!(event.symbols().contains(&x));
//! ```

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use crate::event::{self, Event};
use crate::outcomes::Value;

/// An opaque, hashable identifier for a random variable.
///
/// Equality, ordering and hashing go through the name, so two symbols
/// created with the same name denote the same variable.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(Arc<str>);

/// An ordered set of symbols: the variables a model or event ranges over.
pub type Scope = BTreeSet<Symbol>;

impl Symbol {
    /// Create a symbol with the given name.
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref()))
    }

    /// The symbol's name.
    pub fn name(&self) -> &str {
        &self.0
    }

    /// `self ∈ values`.
    pub fn is_in<V: Into<Value>>(&self, values: impl IntoIterator<Item = V>) -> Event {
        event::membership(self, values)
    }

    /// `self < value`.
    pub fn lt(&self, value: f64) -> Event {
        event::lt(self, value)
    }

    /// `self <= value`.
    pub fn le(&self, value: f64) -> Event {
        event::le(self, value)
    }

    /// `self > value`.
    pub fn gt(&self, value: f64) -> Event {
        event::gt(self, value)
    }

    /// `self >= value`.
    pub fn ge(&self, value: f64) -> Event {
        event::ge(self, value)
    }

    /// `self == value`.
    pub fn eq_value(&self, value: f64) -> Event {
        event::eq(self, value)
    }

    /// The singleton scope `{self}`.
    pub fn scope(&self) -> Scope {
        BTreeSet::from([self.clone()])
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.0)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Symbol {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_symbol_equality_by_name() {
        let a = Symbol::new("X");
        let b = Symbol::new("X");
        let c = Symbol::new("Y");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_symbol_as_set_key() {
        let mut seen = HashSet::new();
        seen.insert(Symbol::new("X"));
        seen.insert(Symbol::new("X"));
        seen.insert(Symbol::new("Y"));
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn test_symbol_display() {
        let x = Symbol::new("height");
        assert_eq!(format!("{}", x), "height");
        assert_eq!(format!("{:?}", x), "Symbol(height)");
    }

    #[test]
    fn test_symbol_scope() {
        let x = Symbol::new("X");
        let scope = x.scope();
        assert_eq!(scope.len(), 1);
        assert!(scope.contains(&x));
    }
}
