//! Symbol table entries

use crate::{DeclContext, ScopeId, TypeId};
use cx_intern::Symbol;
use cx_span::Location;
use cx_syntax::NodeId;
use la_arena::Idx;

/// Unique identifier for a symbol entry
pub type SymbolId = Idx<SymbolEntry>;

/// Kind of symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum SymbolKind {
    /// Object or non-type template argument
    #[display("variable")]
    Variable,
    /// Enumerator of an enumeration
    #[display("enumerator")]
    Enumerator,
    /// Enumeration
    #[display("enum")]
    Enum,
    /// Typedef name (also used for injected type template arguments)
    #[display("typedef")]
    Typedef,
    /// Class, including class template specializations
    #[display("class")]
    Class,
    /// Template name
    #[display("template")]
    Template,
    /// Function, including function template specializations
    #[display("function")]
    Function,
    /// Namespace
    #[display("namespace")]
    Namespace,
    /// `typename T` parameter of a template declaration
    #[display("template type parameter")]
    TemplateTypeParameter,
    /// `template <...> class T` parameter of a template declaration
    #[display("template template parameter")]
    TemplateTemplateParameter,
    /// `int N` parameter of a template declaration
    #[display("non-type template parameter")]
    TemplateNonTypeParameter,
}

/// Per-entity flags and positions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EntitySpecs {
    /// Symbol stands for an injected template argument
    pub is_template_argument: bool,
    /// Symbol is the injected class name of its own class
    pub is_injected_class_name: bool,
    /// Class an injected class name refers to
    pub injected_class_referred_symbol: Option<SymbolId>,
    /// Hidden from scope dumps
    pub do_not_print: bool,
    /// Nesting depth of the template parameter list this parameter belongs to
    pub template_parameter_nesting: u32,
    /// Position inside its template parameter list
    pub template_parameter_position: u32,
}

/// A symbol in the translation unit
#[derive(Debug, Clone)]
pub struct SymbolEntry {
    /// Declared name
    pub name: Symbol,
    /// Symbol kind
    pub kind: SymbolKind,
    /// Type of the entity, if it has one
    pub ty: Option<TypeId>,
    /// Context the symbol was declared in
    pub decl_context: DeclContext,
    /// Scope the symbol is signed in
    pub scope: ScopeId,
    /// Scope opened by a namespace symbol
    pub related_scope: Option<ScopeId>,
    /// Initializer of a constant, or the folded value of an injected
    /// non-type template argument
    pub expression_value: Option<NodeId>,
    /// Definition has been seen (or instantiated)
    pub defined: bool,
    /// Point of declaration
    pub location: Location,
    /// Flags and template parameter position
    pub specs: EntitySpecs,
}

impl SymbolEntry {
    /// Whether the entry may appear in a constant expression
    #[must_use]
    pub fn is_constant_candidate(&self) -> bool {
        matches!(self.kind, SymbolKind::Enumerator | SymbolKind::Variable)
    }
}
