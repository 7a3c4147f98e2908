//! Types as far as constant evaluation and instantiation need them

use crate::{DeclContext, SymbolId};
use cx_syntax::NodeId;
use la_arena::{Arena, Idx};

/// Unique identifier for a type
pub type TypeId = Idx<Type>;

/// Fundamental types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum BuiltinType {
    /// `bool`
    #[display("bool")]
    Bool,
    /// `char`
    #[display("char")]
    Char,
    /// `int`
    #[display("int")]
    Int,
    /// `unsigned int`
    #[display("unsigned int")]
    UnsignedInt,
    /// `long`
    #[display("long")]
    Long,
    /// `unsigned long`
    #[display("unsigned long")]
    UnsignedLong,
    /// `void`
    #[display("void")]
    Void,
}

/// A type
#[derive(Debug, Clone)]
pub enum Type {
    /// Fundamental type
    Builtin(BuiltinType),
    /// User-defined type referring to a class, enum, typedef or template symbol
    Named(SymbolId),
    /// Fresh typedef of another type
    Typedef(TypeId),
    /// Class type
    Class(ClassType),
    /// Function type
    Function(FunctionType),
    /// Template type
    Template(TemplateType),
}

/// Completion state of a class type
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Completeness {
    /// Declared, selected as a specialization, but not yet filled in
    #[display("incomplete independent")]
    IncompleteIndependent,
    /// Declared inside a template and depending on its parameters
    #[display("incomplete dependent")]
    IncompleteDependent,
    /// Defined
    #[display("complete independent")]
    CompleteIndependent,
    /// Defined inside a template and depending on its parameters
    #[display("complete dependent")]
    CompleteDependent,
}

/// Generic trees a class template keeps for later instantiation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InstantiationTrees {
    /// Member list
    pub member_specification: Option<NodeId>,
    /// Base clause
    pub base_clause: Option<NodeId>,
}

/// Class type
#[derive(Debug, Clone)]
pub struct ClassType {
    /// Completion state
    pub completeness: Completeness,
    /// Template this class specializes, if any
    pub specialization: Option<Specialization>,
    /// Trees to copy when instantiating from this class
    pub instantiation_trees: InstantiationTrees,
    /// Member context, set once the class is defined or instantiated
    pub inner_context: Option<DeclContext>,
    /// Base classes recorded by the base-clause builder
    pub bases: Vec<TypeId>,
}

impl ClassType {
    /// A class that is declared but has no body yet
    #[must_use]
    pub fn incomplete(specialization: Option<Specialization>) -> Self {
        Self {
            completeness: Completeness::IncompleteIndependent,
            specialization,
            instantiation_trees: InstantiationTrees::default(),
            inner_context: None,
            bases: Vec::new(),
        }
    }
}

/// Function type
#[derive(Debug, Clone, Default)]
pub struct FunctionType {
    /// Template this function specializes, if any
    pub specialization: Option<Specialization>,
    /// Function definition tree of a primary template
    pub definition: Option<NodeId>,
}

/// Template type
#[derive(Debug, Clone)]
pub struct TemplateType {
    /// Template name symbol
    pub name: SymbolId,
    /// Primary specialization (the generic definition)
    pub primary: SymbolId,
    /// Partial and explicit specializations
    pub specializations: Vec<SymbolId>,
    /// Specializations named by uses such as `A<int>`, in creation order
    pub instances: Vec<SymbolId>,
}

/// Link from a specialization back to its template
#[derive(Debug, Clone)]
pub struct Specialization {
    /// The `Type::Template` this specializes
    pub template: TypeId,
    /// Template parameters of the specialization
    pub parameters: Vec<TemplateParameter>,
    /// Template arguments of the specialization
    pub arguments: Vec<TemplateArgument>,
}

/// Kind of a template parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum TemplateParameterKind {
    /// `typename T`
    #[display("type")]
    Type,
    /// `template <...> class T`
    #[display("template")]
    Template,
    /// `int N`
    #[display("non-type")]
    NonType,
}

/// A template parameter
///
/// The name is only reachable through `entry`; instantiation looks it up by
/// the entry's nesting and position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateParameter {
    /// Parameter kind
    pub kind: TemplateParameterKind,
    /// Parameter symbol, carrying name, nesting and position
    pub entry: SymbolId,
}

/// A template argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateArgument {
    /// Type argument
    Type(TypeId),
    /// Template argument, a named type referring to a template symbol
    Template(TypeId),
    /// Non-type argument
    NonType {
        /// Type of the parameter
        ty: TypeId,
        /// Argument expression
        expression: NodeId,
        /// Context the expression must be evaluated in
        context: DeclContext,
    },
}

impl TemplateArgument {
    /// Parameter kind this argument can bind to
    #[must_use]
    pub fn kind(&self) -> TemplateParameterKind {
        match self {
            Self::Type(_) => TemplateParameterKind::Type,
            Self::Template(_) => TemplateParameterKind::Template,
            Self::NonType { .. } => TemplateParameterKind::NonType,
        }
    }
}

/// One deduced binding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deduction {
    /// Nesting of the deduced parameter
    pub parameter_nesting: u32,
    /// Position of the deduced parameter
    pub parameter_position: u32,
    /// Kind of the deduced parameter
    pub kind: TemplateParameterKind,
    /// Deduced arguments; instantiation requires exactly one
    pub deduced: Vec<TemplateArgument>,
}

/// Ordered deductions produced by template argument deduction
pub type DeductionSet = Vec<Deduction>;

/// Arena of types
#[derive(Debug, Clone, Default)]
pub struct TypeArena {
    types: Arena<Type>,
}

impl TypeArena {
    /// Creates an empty arena
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a type
    pub fn alloc(&mut self, ty: Type) -> TypeId {
        self.types.alloc(ty)
    }

    /// Allocates a fundamental type
    pub fn builtin(&mut self, builtin: BuiltinType) -> TypeId {
        self.alloc(Type::Builtin(builtin))
    }

    /// Get a type
    #[must_use]
    pub fn get(&self, id: TypeId) -> &Type {
        &self.types[id]
    }

    /// Get a mutable type
    pub fn get_mut(&mut self, id: TypeId) -> &mut Type {
        &mut self.types[id]
    }
}
