//! Compilation state threaded through instantiation

use crate::InstantiationError;
use cx_scope::{Program, SymbolId};
use cx_span::Location;
use cx_syntax::SyntaxTree;
use indexmap::IndexMap;
use rustc_hash::{FxBuildHasher, FxHashSet};
use std::mem;
use std::ops::{Deref, DerefMut};

/// Bounds on nested instantiation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstantiationLimits {
    /// Instantiations that may be in progress at once
    pub max_depth: u32,
}

impl Default for InstantiationLimits {
    fn default() -> Self {
        Self { max_depth: 256 }
    }
}

/// State shared by the evaluator, the instantiation engine and the semantic
/// analyzer for one translation unit
///
/// The two analysis switches are only changed through the guards returned
/// by [`Session::check_ambiguity`] and [`Session::suspend_test_expression`],
/// which restore the previous value when dropped, including on early
/// returns.
#[derive(Debug)]
pub struct Session {
    /// Symbols, scopes and types
    pub program: Program,
    /// Every syntax node of the unit, generic and instantiated
    pub tree: SyntaxTree,
    limits: InstantiationLimits,
    checking_ambiguity: bool,
    test_expression_status: bool,
    depth: u32,
    active: FxHashSet<SymbolId>,
    instantiated: IndexMap<SymbolId, Location, FxBuildHasher>,
}

impl Session {
    /// Creates a session with default limits
    #[must_use]
    pub fn new(program: Program, tree: SyntaxTree) -> Self {
        Self::with_limits(program, tree, InstantiationLimits::default())
    }

    /// Creates a session with explicit limits
    #[must_use]
    pub fn with_limits(program: Program, tree: SyntaxTree, limits: InstantiationLimits) -> Self {
        Self {
            program,
            tree,
            limits,
            checking_ambiguity: false,
            test_expression_status: true,
            depth: 0,
            active: FxHashSet::default(),
            instantiated: IndexMap::default(),
        }
    }

    /// Instantiation limits
    #[must_use]
    pub fn limits(&self) -> InstantiationLimits {
        self.limits
    }

    /// Whether an ambiguity-resolution pass is running
    #[must_use]
    pub fn checking_ambiguity(&self) -> bool {
        self.checking_ambiguity
    }

    /// Whether expressions are being tested for well-formedness
    #[must_use]
    pub fn test_expression_status(&self) -> bool {
        self.test_expression_status
    }

    /// Number of instantiations in progress
    #[must_use]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Completed instantiations with their point of instantiation, in
    /// completion order
    #[must_use]
    pub fn instantiated(&self) -> &IndexMap<SymbolId, Location, FxBuildHasher> {
        &self.instantiated
    }

    /// Marks an ambiguity-resolution pass until the guard is dropped
    pub fn check_ambiguity(&mut self) -> FlagGuard<'_> {
        FlagGuard::set(self, Flag::CheckingAmbiguity, true)
    }

    /// Turns expression testing off until the guard is dropped
    pub fn suspend_test_expression(&mut self) -> FlagGuard<'_> {
        FlagGuard::set(self, Flag::TestExpression, false)
    }

    /// Enters the instantiation of `entity`
    ///
    /// # Errors
    ///
    /// `DepthExceeded` when `max_depth` instantiations are already in
    /// progress.
    pub(crate) fn enter_instantiation(
        &mut self,
        entity: SymbolId,
        location: &Location,
    ) -> Result<InstantiationGuard<'_>, InstantiationError> {
        if self.depth >= self.limits.max_depth {
            return Err(InstantiationError::DepthExceeded {
                name: self.program.symbol_name(entity).to_owned(),
                limit: self.limits.max_depth,
                location: location.clone(),
            });
        }
        self.depth += 1;
        self.active.insert(entity);
        Ok(InstantiationGuard {
            session: self,
            entity,
        })
    }

    /// Whether `entity` is being instantiated further up the stack
    pub(crate) fn is_active(&self, entity: SymbolId) -> bool {
        self.active.contains(&entity)
    }

    pub(crate) fn record_instantiation(&mut self, entity: SymbolId, location: &Location) {
        self.instantiated.insert(entity, location.clone());
    }

    fn flag_mut(&mut self, flag: Flag) -> &mut bool {
        match flag {
            Flag::CheckingAmbiguity => &mut self.checking_ambiguity,
            Flag::TestExpression => &mut self.test_expression_status,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Flag {
    CheckingAmbiguity,
    TestExpression,
}

/// Restores an analysis switch when dropped
#[derive(Debug)]
pub struct FlagGuard<'s> {
    session: &'s mut Session,
    flag: Flag,
    saved: bool,
}

impl<'s> FlagGuard<'s> {
    fn set(session: &'s mut Session, flag: Flag, value: bool) -> Self {
        let saved = mem::replace(session.flag_mut(flag), value);
        Self {
            session,
            flag,
            saved,
        }
    }
}

impl Deref for FlagGuard<'_> {
    type Target = Session;

    fn deref(&self) -> &Session {
        self.session
    }
}

impl DerefMut for FlagGuard<'_> {
    fn deref_mut(&mut self) -> &mut Session {
        self.session
    }
}

impl Drop for FlagGuard<'_> {
    fn drop(&mut self) {
        *self.session.flag_mut(self.flag) = self.saved;
    }
}

/// Leaves an instantiation when dropped
#[derive(Debug)]
pub(crate) struct InstantiationGuard<'s> {
    session: &'s mut Session,
    entity: SymbolId,
}

impl Deref for InstantiationGuard<'_> {
    type Target = Session;

    fn deref(&self) -> &Session {
        self.session
    }
}

impl DerefMut for InstantiationGuard<'_> {
    fn deref_mut(&mut self) -> &mut Session {
        self.session
    }
}

impl Drop for InstantiationGuard<'_> {
    fn drop(&mut self) {
        self.session.depth -= 1;
        self.session.active.remove(&self.entity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cx_scope::SymbolKind;

    fn session() -> Session {
        Session::new(Program::default(), SyntaxTree::new())
    }

    #[test]
    fn test_flag_guards_restore_on_drop() {
        let mut session = session();
        {
            let mut outer = session.check_ambiguity();
            assert!(outer.checking_ambiguity());
            {
                let inner = outer.suspend_test_expression();
                assert!(!inner.test_expression_status());
                assert!(inner.checking_ambiguity());
            }
            assert!(outer.test_expression_status());
        }
        assert!(!session.checking_ambiguity());
        assert!(session.test_expression_status());
    }

    #[test]
    fn test_flag_restored_on_error_path() {
        fn fails(session: &mut Session) -> Result<(), ()> {
            let guard = session.suspend_test_expression();
            if !guard.test_expression_status() {
                return Err(());
            }
            Ok(())
        }

        let mut session = session();
        assert_eq!(fails(&mut session), Err(()));
        assert!(session.test_expression_status());
    }

    #[test]
    fn test_depth_limit() {
        let mut session = Session::with_limits(
            Program::default(),
            SyntaxTree::new(),
            InstantiationLimits { max_depth: 1 },
        );
        let context = session.program.global_context();
        let entity =
            session
                .program
                .new_symbol(&context, context.current_scope, "A", SymbolKind::Class);
        let location = Location::new("a.cpp", 3);

        let mut guard = session
            .enter_instantiation(entity, &location)
            .expect("first level fits");
        assert_eq!(guard.depth(), 1);
        assert!(guard.is_active(entity));
        let nested = guard.enter_instantiation(entity, &location).map(|_| ());
        assert!(matches!(
            nested,
            Err(InstantiationError::DepthExceeded { limit: 1, .. })
        ));
        drop(guard);

        assert_eq!(session.depth(), 0);
        assert!(!session.is_active(entity));
    }
}
