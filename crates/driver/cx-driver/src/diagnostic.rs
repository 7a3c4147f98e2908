//! Reported problems

use cx_scope::Severity;
use cx_span::Location;
use std::fmt;

/// One problem reported while folding or instantiating
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// User error or internal error
    pub severity: Severity,
    /// Rendered message, including context when enabled
    pub message: String,
    /// Point of instantiation, when the problem arose in one
    pub location: Option<Location>,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(location) = &self.location {
            write!(formatter, "{location}: ")?;
        }
        write!(formatter, "{}: {}", self.severity, self.message)
    }
}
