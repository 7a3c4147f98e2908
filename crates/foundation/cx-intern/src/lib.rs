//! String interning for identifiers

pub use lasso::Spur as Symbol;
use lasso::ThreadedRodeo;
use std::fmt;
use std::sync::Arc;

/// Shared string interner
///
/// Cloning is cheap; every clone interns into the same table.
#[derive(Clone, Default)]
pub struct Interner {
    inner: Arc<ThreadedRodeo>,
}

impl Interner {
    /// Creates an empty interner
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Interns `text`, returning the existing symbol if it was seen before
    pub fn intern(&self, text: &str) -> Symbol {
        self.inner.get_or_intern(text)
    }

    /// Looks up `text` without interning it
    #[must_use]
    pub fn get(&self, text: &str) -> Option<Symbol> {
        self.inner.get(text)
    }

    /// Returns the text of a symbol created by this interner
    #[must_use]
    pub fn resolve(&self, symbol: Symbol) -> &str {
        self.inner.resolve(&symbol)
    }

    /// Returns the text of `symbol`, or `None` if another interner created it
    #[must_use]
    pub fn try_resolve(&self, symbol: Symbol) -> Option<&str> {
        self.inner.try_resolve(&symbol)
    }
}

impl fmt::Debug for Interner {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Interner")
            .field("len", &self.inner.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_is_idempotent() {
        let interner = Interner::new();
        let first = interner.intern("vector");
        let second = interner.clone().intern("vector");
        assert_eq!(first, second);
        assert_eq!(interner.resolve(first), "vector");
    }

    #[test]
    fn test_get_does_not_intern() {
        let interner = Interner::new();
        assert!(interner.get("N").is_none());
        let symbol = interner.intern("N");
        assert_eq!(interner.get("N"), Some(symbol));
    }
}
