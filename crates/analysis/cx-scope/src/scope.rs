//! Scope tree and declarative contexts

use crate::SymbolId;
use bitflags::bitflags;
use cx_intern::Symbol;
use indexmap::IndexMap;
use la_arena::{Arena, Idx};

/// Unique identifier for a scope
pub type ScopeId = Idx<ScopeData>;

/// Kind of scope
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum ScopeKind {
    /// Namespace scope, including the global one
    #[display("namespace")]
    Namespace,
    /// Scope holding template parameters (or injected template arguments)
    #[display("template")]
    Template,
    /// Class member scope
    #[display("class")]
    Class,
    /// Function parameter and body scope
    #[display("function")]
    Function,
    /// Block scope inside a function body
    #[display("block")]
    Block,
}

/// A single scope
#[derive(Debug, Clone)]
pub struct ScopeData {
    /// Enclosing scope (None for the global scope)
    pub parent: Option<ScopeId>,
    /// Kind of scope
    pub kind: ScopeKind,
    /// Class or namespace this scope belongs to
    pub owner: Option<SymbolId>,
    /// Declared names, in declaration order; a name may have several
    /// candidates (overloads)
    pub entries: IndexMap<Symbol, Vec<SymbolId>>,
}

/// Tree of all scopes in a translation unit
#[derive(Debug, Clone)]
pub struct ScopeTree {
    scopes: Arena<ScopeData>,
    global: ScopeId,
}

impl ScopeTree {
    /// Creates a tree holding only the global namespace scope
    #[must_use]
    pub fn new() -> Self {
        let mut scopes = Arena::new();
        let global = scopes.alloc(ScopeData {
            parent: None,
            kind: ScopeKind::Namespace,
            owner: None,
            entries: IndexMap::new(),
        });
        Self { scopes, global }
    }

    /// The global namespace scope
    #[must_use]
    pub fn global(&self) -> ScopeId {
        self.global
    }

    /// Creates a child scope
    pub fn create_child(&mut self, parent: ScopeId, kind: ScopeKind) -> ScopeId {
        self.scopes.alloc(ScopeData {
            parent: Some(parent),
            kind,
            owner: None,
            entries: IndexMap::new(),
        })
    }

    /// Get scope data
    #[must_use]
    pub fn get(&self, id: ScopeId) -> &ScopeData {
        &self.scopes[id]
    }

    /// Get mutable scope data
    pub fn get_mut(&mut self, id: ScopeId) -> &mut ScopeData {
        &mut self.scopes[id]
    }

    /// Signs `entry` in under `name`
    pub fn insert(&mut self, scope: ScopeId, name: Symbol, entry: SymbolId) {
        self.scopes[scope].entries.entry(name).or_default().push(entry);
    }

    /// Candidates declared for `name` directly in `scope`
    #[must_use]
    pub fn lookup_local(&self, scope: ScopeId, name: Symbol) -> &[SymbolId] {
        self.scopes[scope]
            .entries
            .get(&name)
            .map_or(&[], Vec::as_slice)
    }

    /// Candidates for `name` in the innermost enclosing scope that declares it
    #[must_use]
    pub fn lookup(&self, scope: ScopeId, name: Symbol) -> &[SymbolId] {
        let mut current = Some(scope);
        while let Some(scope_id) = current {
            let found = self.lookup_local(scope_id, name);
            if !found.is_empty() {
                return found;
            }
            current = self.scopes[scope_id].parent;
        }
        &[]
    }

    /// Context for declarations at global scope
    #[must_use]
    pub fn global_context(&self) -> DeclContext {
        DeclContext {
            global_scope: self.global,
            namespace_scope: self.global,
            current_scope: self.global,
            template_scope: None,
            class_scope: None,
            flags: DeclFlags::empty(),
            template_nesting: 0,
        }
    }

    /// Derives a context with a fresh template-parameter scope
    ///
    /// The new scope is nested in `context.current_scope` and becomes both
    /// the template scope and the current scope of the returned context, so
    /// ordinary parent-chain lookup from anything declared inside sees the
    /// template parameters before the enclosing declarations.
    pub fn new_template_context(&mut self, context: &DeclContext) -> DeclContext {
        let scope = self.create_child(context.current_scope, ScopeKind::Template);
        DeclContext {
            current_scope: scope,
            template_scope: Some(scope),
            ..*context
        }
    }

    /// Derives a context for the members of `class`
    pub fn new_class_context(&mut self, context: &DeclContext, class: SymbolId) -> DeclContext {
        let scope = self.create_child(context.current_scope, ScopeKind::Class);
        self.scopes[scope].owner = Some(class);
        DeclContext {
            current_scope: scope,
            class_scope: Some(scope),
            ..*context
        }
    }

    /// Derives a context for the members of `namespace`
    pub fn new_namespace_context(
        &mut self,
        context: &DeclContext,
        namespace: SymbolId,
    ) -> DeclContext {
        let scope = self.create_child(context.current_scope, ScopeKind::Namespace);
        self.scopes[scope].owner = Some(namespace);
        DeclContext {
            namespace_scope: scope,
            current_scope: scope,
            ..*context
        }
    }

    /// Derives a context for a function body or a nested block
    pub fn new_block_context(&mut self, context: &DeclContext, kind: ScopeKind) -> DeclContext {
        let scope = self.create_child(context.current_scope, kind);
        DeclContext {
            current_scope: scope,
            ..*context
        }
    }
}

impl Default for ScopeTree {
    fn default() -> Self {
        Self::new()
    }
}

bitflags! {
    /// Flags of a declarative context
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct DeclFlags: u32 {
        /// Declarations are part of a template
        const TEMPLATE = 1;
        /// Declarations are part of an explicit specialization
        const EXPLICIT_SPECIALIZATION = 1 << 1;
        /// Declarations are being rebuilt for an instantiation
        const INSTANTIATING = 1 << 2;
    }
}

/// Where a declaration or expression lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeclContext {
    /// The global namespace scope
    pub global_scope: ScopeId,
    /// Innermost enclosing namespace scope
    pub namespace_scope: ScopeId,
    /// Scope new names are signed in and lookup starts from
    pub current_scope: ScopeId,
    /// Template-parameter scope, if any
    pub template_scope: Option<ScopeId>,
    /// Innermost enclosing class scope, if any
    pub class_scope: Option<ScopeId>,
    /// Context flags
    pub flags: DeclFlags,
    /// Depth of enclosing template declarations
    pub template_nesting: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use cx_intern::Interner;

    #[test]
    fn test_template_context_nests_in_current_scope() {
        let mut tree = ScopeTree::new();
        let global = tree.global_context();
        let template = tree.new_template_context(&global);

        let template_scope = template.template_scope;
        assert_eq!(template_scope, Some(template.current_scope));
        assert_eq!(tree.get(template.current_scope).parent, Some(tree.global()));
        assert_eq!(tree.get(template.current_scope).kind, ScopeKind::Template);
    }

    #[test]
    fn test_lookup_walks_parents_and_stops_at_innermost() {
        let interner = Interner::new();
        let name = interner.intern("N");
        let mut tree = ScopeTree::new();
        let global = tree.global_context();
        let block = tree.new_block_context(&global, ScopeKind::Function);

        let mut symbols: Arena<()> = Arena::new();
        let outer: SymbolId = Idx::from_raw(symbols.alloc(()).into_raw());
        let inner: SymbolId = Idx::from_raw(symbols.alloc(()).into_raw());

        tree.insert(tree.global(), name, outer);
        assert_eq!(tree.lookup(block.current_scope, name), &[outer]);

        tree.insert(block.current_scope, name, inner);
        assert_eq!(tree.lookup(block.current_scope, name), &[inner]);
        assert_eq!(tree.lookup(tree.global(), name), &[outer]);
    }
}
