//! Entry points the semantic analyzer calls

use crate::{Diagnostic, FrontendConfig};
use cx_const_eval::{ConstError, Value};
use cx_instantiate::{InstantiationError, Sema, Session};
use cx_scope::{DeclContext, Program, Severity, SymbolId};
use cx_span::Location;
use cx_syntax::{NodeId, SyntaxTree};
use log::error;
use std::mem;

/// Constant folding and template instantiation for one translation unit
///
/// Every error is returned to the caller and also recorded as a
/// [`Diagnostic`]; the caller decides whether to stop.
pub struct Frontend<S> {
    session: Session,
    sema: S,
    config: FrontendConfig,
    diagnostics: Vec<Diagnostic>,
}

impl<S: Sema> Frontend<S> {
    /// Creates a front end over an already parsed and declared unit
    pub fn new(program: Program, tree: SyntaxTree, sema: S, config: FrontendConfig) -> Self {
        let session = Session::with_limits(program, tree, config.limits());
        Self {
            session,
            sema,
            config,
            diagnostics: Vec::new(),
        }
    }

    /// Compilation state
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Mutable compilation state, for declaring entities
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// The semantic analyzer
    pub fn sema(&self) -> &S {
        &self.sema
    }

    /// Active configuration
    pub fn config(&self) -> &FrontendConfig {
        &self.config
    }

    /// Problems reported so far, oldest first
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Drains the reported problems
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        mem::take(&mut self.diagnostics)
    }

    /// Folds the constant expression `node` as seen from `context`
    pub fn evaluate_constant_expression(
        &mut self,
        node: NodeId,
        context: &DeclContext,
    ) -> Result<Value, ConstError> {
        let result = cx_const_eval::evaluate_constant_expression(
            &self.session.tree,
            &self.session.program,
            node,
            context,
        );
        if let Err(err) = &result {
            let mut message = err.to_string();
            if self.config.diagnostics.print_context {
                message.push_str(&format!("\n  in '{}'", self.session.tree.display(node)));
            }
            self.report(err.severity(), message, None);
        }
        result
    }

    /// Fills in the class template specialization `entry`, requested at
    /// `file:line`
    pub fn instantiate_template_class(
        &mut self,
        entry: SymbolId,
        context: &DeclContext,
        file: &str,
        line: u32,
    ) -> Result<(), InstantiationError> {
        let location = Location::new(file, line);
        let result = cx_instantiate::instantiate_template_class(
            &mut self.session,
            &mut self.sema,
            entry,
            context,
            &location,
        );
        self.report_instantiation(result, entry, location)
    }

    /// Builds the function template specialization `entry`, requested at
    /// `file:line`
    pub fn instantiate_template_function(
        &mut self,
        entry: SymbolId,
        context: &DeclContext,
        file: &str,
        line: u32,
    ) -> Result<(), InstantiationError> {
        let location = Location::new(file, line);
        let result = cx_instantiate::instantiate_template_function(
            &mut self.session,
            &mut self.sema,
            entry,
            context,
            &location,
        );
        self.report_instantiation(result, entry, location)
    }

    fn report_instantiation(
        &mut self,
        result: Result<(), InstantiationError>,
        entry: SymbolId,
        location: Location,
    ) -> Result<(), InstantiationError> {
        if let Err(err) = &result {
            let mut message = err.to_string();
            if self.config.diagnostics.print_context {
                message.push_str(&format!(
                    "\n  while instantiating '{}'",
                    self.session.program.symbol_name(entry)
                ));
            }
            self.report(err.severity(), message, Some(location));
        }
        result
    }

    fn report(&mut self, severity: Severity, message: String, location: Option<Location>) {
        let diagnostic = Diagnostic {
            severity,
            message,
            location,
        };
        error!("{diagnostic}");
        self.diagnostics.push(diagnostic);
    }
}
