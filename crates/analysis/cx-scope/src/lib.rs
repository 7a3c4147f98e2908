//! Symbols, scopes and types of a C++ translation unit
//!
//! This crate holds the compiler-wide state the constant evaluator reads and
//! template instantiation mutates:
//! - **Scope tree**: parent-linked scopes with ordered candidate lists
//! - **Symbol entries**: kind, type, cached constant initializer, flags
//! - **Types**: classes, functions, templates and their specializations
//! - **Lookup**: `query_id_expression` over identifiers and qualified ids

mod declare;
pub mod error;
mod lookup;
pub mod scope;
pub mod symbol;
pub mod types;

pub use declare::TemplateParameterDecl;
pub use error::{LookupError, Severity};
pub use scope::{DeclContext, DeclFlags, ScopeData, ScopeId, ScopeKind, ScopeTree};
pub use symbol::{EntitySpecs, SymbolEntry, SymbolId, SymbolKind};
pub use types::{
    BuiltinType, ClassType, Completeness, Deduction, DeductionSet, FunctionType,
    InstantiationTrees, Specialization, TemplateArgument, TemplateParameter,
    TemplateParameterKind, TemplateType, Type, TypeArena, TypeId,
};

use cx_intern::Interner;
use cx_span::Location;
use la_arena::Arena;
use std::fmt::Write as _;

/// Compiler-wide symbol and type state
#[derive(Debug, Clone)]
pub struct Program {
    /// Identifier interner
    pub interner: Interner,
    /// All scopes
    pub scopes: ScopeTree,
    /// All symbol entries
    pub symbols: Arena<SymbolEntry>,
    /// All types
    pub types: TypeArena,
}

impl Program {
    /// Creates an empty program with only the global scope
    #[must_use]
    pub fn new(interner: Interner) -> Self {
        Self {
            interner,
            scopes: ScopeTree::new(),
            symbols: Arena::new(),
            types: TypeArena::new(),
        }
    }

    /// Context for declarations at global scope
    #[must_use]
    pub fn global_context(&self) -> DeclContext {
        self.scopes.global_context()
    }

    /// Creates a symbol and signs it in `scope`
    pub fn new_symbol(
        &mut self,
        context: &DeclContext,
        scope: ScopeId,
        name: &str,
        kind: SymbolKind,
    ) -> SymbolId {
        let id = self.new_unscoped_symbol(context, name, kind);
        self.symbols[id].scope = scope;
        let interned = self.symbols[id].name;
        self.scopes.insert(scope, interned, id);
        id
    }

    /// Creates a symbol that no scope can find by name
    ///
    /// Used for template specializations, which are reached through their
    /// template rather than through lookup.
    pub fn new_unscoped_symbol(
        &mut self,
        context: &DeclContext,
        name: &str,
        kind: SymbolKind,
    ) -> SymbolId {
        let name = self.interner.intern(name);
        self.symbols.alloc(SymbolEntry {
            name,
            kind,
            ty: None,
            decl_context: *context,
            scope: context.current_scope,
            related_scope: None,
            expression_value: None,
            defined: false,
            location: Location::builtin(),
            specs: EntitySpecs::default(),
        })
    }

    /// Copies `source` into a new entry signed in `scope` under the same name
    pub fn copy_symbol_into(&mut self, source: SymbolId, scope: ScopeId) -> SymbolId {
        let mut copy = self.symbols[source].clone();
        copy.scope = scope;
        let name = copy.name;
        let id = self.symbols.alloc(copy);
        self.scopes.insert(scope, name, id);
        id
    }

    /// Get a symbol entry
    #[must_use]
    pub fn entry(&self, id: SymbolId) -> &SymbolEntry {
        &self.symbols[id]
    }

    /// Get a mutable symbol entry
    pub fn entry_mut(&mut self, id: SymbolId) -> &mut SymbolEntry {
        &mut self.symbols[id]
    }

    /// Name of a symbol
    #[must_use]
    pub fn symbol_name(&self, id: SymbolId) -> &str {
        self.interner.resolve(self.symbols[id].name)
    }

    /// User-defined type naming `symbol`
    pub fn named_type(&mut self, symbol: SymbolId) -> TypeId {
        self.types.alloc(Type::Named(symbol))
    }

    /// Fresh typedef of `ty`
    pub fn new_typedef(&mut self, ty: TypeId) -> TypeId {
        self.types.alloc(Type::Typedef(ty))
    }

    /// Strips typedefs, including named typedef symbols
    #[must_use]
    pub fn advance_over_typedefs(&self, ty: TypeId) -> TypeId {
        let mut current = ty;
        loop {
            match self.types.get(current) {
                Type::Typedef(inner) => current = *inner,
                Type::Named(symbol) if self.symbols[*symbol].kind == SymbolKind::Typedef => {
                    match self.symbols[*symbol].ty {
                        Some(aliased) => current = aliased,
                        None => return current,
                    }
                }
                _ => return current,
            }
        }
    }

    /// Symbol a (possibly typedef'd) named type refers to
    #[must_use]
    pub fn named_type_get_symbol(&self, ty: TypeId) -> Option<SymbolId> {
        match self.types.get(self.advance_over_typedefs(ty)) {
            Type::Named(symbol) => Some(*symbol),
            _ => None,
        }
    }

    /// The `Type::Class` behind `ty`, seeing through typedefs and names
    #[must_use]
    pub fn actual_class_type(&self, ty: TypeId) -> Option<TypeId> {
        let ty = self.advance_over_typedefs(ty);
        let candidate = match self.types.get(ty) {
            Type::Named(symbol) => self.symbols[*symbol].ty?,
            _ => ty,
        };
        matches!(self.types.get(candidate), Type::Class(_)).then_some(candidate)
    }

    /// Class data behind `ty`
    #[must_use]
    pub fn class_type(&self, ty: TypeId) -> Option<&ClassType> {
        match self.types.get(self.actual_class_type(ty)?) {
            Type::Class(class) => Some(class),
            _ => None,
        }
    }

    /// Mutable class data behind `ty`
    pub fn class_type_mut(&mut self, ty: TypeId) -> Option<&mut ClassType> {
        let actual = self.actual_class_type(ty)?;
        match self.types.get_mut(actual) {
            Type::Class(class) => Some(class),
            _ => None,
        }
    }

    /// Function data of `ty`
    #[must_use]
    pub fn function_type(&self, ty: TypeId) -> Option<&FunctionType> {
        match self.types.get(self.advance_over_typedefs(ty)) {
            Type::Function(function) => Some(function),
            _ => None,
        }
    }

    /// Template data of `ty`
    #[must_use]
    pub fn template_type(&self, ty: TypeId) -> Option<&TemplateType> {
        match self.types.get(self.advance_over_typedefs(ty)) {
            Type::Template(template) => Some(template),
            _ => None,
        }
    }

    /// Specialization info of a class or function type
    #[must_use]
    pub fn specialization(&self, ty: TypeId) -> Option<&Specialization> {
        if let Some(class) = self.class_type(ty) {
            return class.specialization.as_ref();
        }
        self.function_type(ty)?.specialization.as_ref()
    }

    /// Whether `ty` is a class or function produced from a template
    #[must_use]
    pub fn is_template_specialized_type(&self, ty: TypeId) -> bool {
        self.specialization(ty).is_some()
    }

    /// One line per visible entry of `scope`, for debug logs
    #[must_use]
    pub fn describe_scope(&self, scope: ScopeId) -> String {
        let mut out = String::new();
        for (name, candidates) in &self.scopes.get(scope).entries {
            for &candidate in candidates {
                let entry = &self.symbols[candidate];
                if entry.specs.do_not_print {
                    continue;
                }
                let _ = writeln!(
                    out,
                    "{} ({})",
                    self.interner.resolve(*name),
                    entry.kind
                );
            }
        }
        out
    }
}

impl Default for Program {
    fn default() -> Self {
        Self::new(Interner::new())
    }
}
