//! Front-end driver for constant folding and template instantiation
//!
//! This crate wires the constant evaluator and the instantiation engine to
//! the rest of the compiler. It loads the front-end configuration and turns
//! every error into a recorded diagnostic.

mod config;
mod diagnostic;
mod frontend;

pub use config::{DiagnosticsConfig, FrontendConfig, InstantiationConfig};
pub use diagnostic::Diagnostic;
pub use frontend::Frontend;
