//! Template instantiation for C++
//!
//! Turns a selected template specialization into a concrete definition:
//! - **Classes**: the solver picks the matching template, its trees are
//!   copied and rebuilt with the deduced arguments injected
//! - **Functions**: the primary definition is copied and rebuilt with the
//!   specialization's arguments injected
//!
//! Non-type arguments are folded to literals when they are injected, so
//! every later use sees a constant rather than the argument expression.
//!
//! The analyzer is reached through the [`Sema`] traits and may request
//! further instantiations while it builds. [`Session`] tracks the nesting
//! and the analysis switches that instantiation toggles.

mod class;
mod error;
mod function;
mod inject;
mod sema;
mod session;

pub use class::instantiate_template_class;
pub use error::InstantiationError;
pub use function::instantiate_template_function;
pub use inject::{get_instantiation_context, get_name_of_template_parameter, inject_template_argument};
pub use sema::{PrimaryTemplateSolver, ScopeBuilder, Sema, TemplateSolver};
pub use session::{FlagGuard, InstantiationLimits, Session};
