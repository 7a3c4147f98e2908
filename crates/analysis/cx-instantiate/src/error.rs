//! Instantiation errors

use cx_const_eval::ConstError;
use cx_scope::{Severity, SymbolKind, TemplateParameterKind};
use cx_span::Location;
use thiserror::Error;

/// Errors raised while instantiating a template specialization
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InstantiationError {
    /// The entry is of a kind that cannot be instantiated here
    #[error("invalid symbol '{name}' ({kind}) for instantiation")]
    InvalidSymbol {
        /// Entry name
        name: String,
        /// Entry kind
        kind: SymbolKind,
    },

    /// Not an incomplete independent class template specialization
    #[error("symbol '{name}' is not a class eligible for instantiation")]
    NotEligibleClass {
        /// Entry name
        name: String,
    },

    /// Not a function template specialization
    #[error("symbol '{name}' is not a template function eligible for instantiation")]
    NotEligibleFunction {
        /// Entry name
        name: String,
    },

    /// The template solver matched nothing
    #[error("could not instantiate template '{name}' declared for first time in '{declared_at}'")]
    NoMatchingTemplate {
        /// Template name
        name: String,
        /// Declaration of the specialization
        declared_at: Location,
    },

    /// A deduction carries other than one deduced argument
    #[error("deduction for parameter {nesting}:{position} has {count} arguments, expected 1")]
    DeducedArgumentCount {
        /// Nesting of the parameter
        nesting: u32,
        /// Position of the parameter
        position: u32,
        /// Number of deduced arguments
        count: usize,
    },

    /// No template parameter has the requested nesting and position
    #[error("no template parameter with nest={nesting} and position={position}")]
    ParameterNotFound {
        /// Requested nesting
        nesting: u32,
        /// Requested position
        position: u32,
    },

    /// Argument and parameter lists differ in length
    #[error("mismatch between template arguments and parameters ({arguments} != {parameters})")]
    ArityMismatch {
        /// Number of arguments
        arguments: usize,
        /// Number of parameters
        parameters: usize,
    },

    /// An argument does not match the kind of its parameter
    #[error("mismatch between template argument kind ({argument}) and template parameter kind ({parameter})")]
    KindMismatch {
        /// Parameter kind
        parameter: TemplateParameterKind,
        /// Argument kind
        argument: TemplateParameterKind,
    },

    /// A template template argument that does not name a template
    #[error("template argument for '{parameter}' does not name a template")]
    NotATemplate {
        /// Parameter name
        parameter: String,
    },

    /// The primary template is defined but its definition tree is missing
    #[error("invalid function definition tree for '{name}'")]
    MissingDefinition {
        /// Function name
        name: String,
    },

    /// Too many nested instantiations
    #[error("instantiating '{name}' exceeds the maximum depth of {limit}")]
    DepthExceeded {
        /// Entity whose instantiation was refused
        name: String,
        /// Configured limit
        limit: u32,
        /// Point of instantiation
        location: Location,
    },

    /// Folding a non-type template argument failed
    #[error("while folding a template argument: {0}")]
    Constant(#[from] ConstError),

    /// Semantic analysis of the instantiated trees rejected them
    #[error("{message}")]
    Semantic {
        /// Diagnostic text
        message: String,
    },
}

impl InstantiationError {
    /// Whether the error is ill-formed user code or a broken invariant
    #[must_use]
    pub fn severity(&self) -> Severity {
        match self {
            Self::DepthExceeded { .. } | Self::Semantic { .. } => Severity::Diagnosed,
            Self::Constant(error) => error.severity(),
            _ => Severity::Fatal,
        }
    }
}
