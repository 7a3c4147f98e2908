//! Seams to the semantic analyzer
//!
//! Instantiation does not know how to match partial specializations or how
//! to build declarations; it calls back into the analyzer through these
//! traits. Every callback receives the [`Session`] so the analyzer can
//! request further instantiations while it builds.

use crate::{InstantiationError, Session};
use cx_scope::{DeclContext, Deduction, DeductionSet, Program, SymbolId, TypeId};
use cx_span::Location;
use cx_syntax::NodeId;

/// Selects the specialization of a class template that an instance uses
pub trait TemplateSolver {
    /// Chooses among the primary template and its partial and explicit
    /// specializations for `requested`
    ///
    /// Returns the selected specialization together with the deductions
    /// binding its template parameters, or `None` when nothing matches.
    ///
    /// # Errors
    ///
    /// Whatever the solver cannot decide.
    fn solve_class_template(
        &mut self,
        session: &mut Session,
        context: &DeclContext,
        template: TypeId,
        requested: SymbolId,
        location: &Location,
    ) -> Result<Option<(SymbolId, DeductionSet)>, InstantiationError>;
}

/// Builds declarations from syntax trees
pub trait ScopeBuilder {
    /// Records the bases of `class_ty`
    ///
    /// # Errors
    ///
    /// Ill-formed base specifiers.
    fn build_base_clause(
        &mut self,
        session: &mut Session,
        base_clause: NodeId,
        class_ty: TypeId,
        context: &DeclContext,
    ) -> Result<(), InstantiationError>;

    /// Declares the members of `class_ty` in `context`
    ///
    /// # Errors
    ///
    /// Ill-formed member declarations.
    fn build_member_specification(
        &mut self,
        session: &mut Session,
        member_specification: NodeId,
        class_ty: TypeId,
        context: &DeclContext,
    ) -> Result<(), InstantiationError>;

    /// Builds a function definition in `context`
    ///
    /// # Errors
    ///
    /// Ill-formed definitions.
    fn build_function_definition(
        &mut self,
        session: &mut Session,
        definition: NodeId,
        context: &DeclContext,
    ) -> Result<(), InstantiationError>;

    /// Completes a class once its members are known
    ///
    /// # Errors
    ///
    /// Whatever finishing the class reports.
    fn finish_class_type(
        &mut self,
        _session: &mut Session,
        _class_ty: TypeId,
        _context: &DeclContext,
        _location: &Location,
    ) -> Result<(), InstantiationError> {
        Ok(())
    }
}

/// Everything instantiation needs from the analyzer
pub trait Sema: TemplateSolver + ScopeBuilder {}

impl<T: TemplateSolver + ScopeBuilder + ?Sized> Sema for T {}

/// Solver that always selects the primary template
///
/// Each template parameter of the primary is deduced from the argument at
/// the same position in the requested specialization.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrimaryTemplateSolver;

impl PrimaryTemplateSolver {
    /// Deduces the primary template's parameters for `requested`
    ///
    /// # Errors
    ///
    /// `ArityMismatch` when the argument and parameter lists differ.
    pub fn solve(
        program: &Program,
        template: TypeId,
        requested: SymbolId,
    ) -> Result<Option<(SymbolId, DeductionSet)>, InstantiationError> {
        let Some(primary) = program
            .template_type(template)
            .map(|template_ty| template_ty.primary)
        else {
            return Ok(None);
        };
        let Some(parameters) = program
            .entry(primary)
            .ty
            .and_then(|ty| program.specialization(ty))
            .map(|spec| &spec.parameters)
        else {
            return Ok(None);
        };
        let Some(arguments) = program
            .entry(requested)
            .ty
            .and_then(|ty| program.specialization(ty))
            .map(|spec| &spec.arguments)
        else {
            return Ok(None);
        };

        if parameters.len() != arguments.len() {
            return Err(InstantiationError::ArityMismatch {
                arguments: arguments.len(),
                parameters: parameters.len(),
            });
        }

        let deductions = parameters
            .iter()
            .zip(arguments)
            .map(|(parameter, argument)| {
                let specs = program.entry(parameter.entry).specs;
                Deduction {
                    parameter_nesting: specs.template_parameter_nesting,
                    parameter_position: specs.template_parameter_position,
                    kind: parameter.kind,
                    deduced: vec![argument.clone()],
                }
            })
            .collect();
        Ok(Some((primary, deductions)))
    }
}

impl TemplateSolver for PrimaryTemplateSolver {
    fn solve_class_template(
        &mut self,
        session: &mut Session,
        _context: &DeclContext,
        template: TypeId,
        requested: SymbolId,
        _location: &Location,
    ) -> Result<Option<(SymbolId, DeductionSet)>, InstantiationError> {
        Self::solve(&session.program, template, requested)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cx_scope::{
        BuiltinType, InstantiationTrees, TemplateArgument, TemplateParameterDecl,
        TemplateParameterKind,
    };

    #[test]
    fn test_primary_solver_deduces_positionally() {
        let mut program = Program::default();
        let global = program.global_context();
        let int = program.types.builtin(BuiltinType::Int);
        let template = program.declare_class_template(
            &global,
            "A",
            &[TemplateParameterDecl::Type("T"), TemplateParameterDecl::Type("U")],
            InstantiationTrees::default(),
        );
        let long = program.types.builtin(BuiltinType::Long);
        let requested = program
            .class_template_instance(
                template,
                vec![TemplateArgument::Type(int), TemplateArgument::Type(long)],
            )
            .expect("A is a template");
        let template_ty = program.entry(template).ty.expect("template type");

        let (selected, deductions) = PrimaryTemplateSolver::solve(&program, template_ty, requested)
            .expect("arity matches")
            .expect("primary selected");

        let primary = program.template_type(template_ty).map(|t| t.primary);
        assert_eq!(Some(selected), primary);
        assert_eq!(deductions.len(), 2);
        assert_eq!(deductions[1].parameter_nesting, 1);
        assert_eq!(deductions[1].parameter_position, 1);
        assert_eq!(deductions[1].kind, TemplateParameterKind::Type);
        assert_eq!(deductions[1].deduced, vec![TemplateArgument::Type(long)]);
    }

    #[test]
    fn test_primary_solver_rejects_arity_mismatch() {
        let mut program = Program::default();
        let global = program.global_context();
        let template = program.declare_class_template(
            &global,
            "A",
            &[TemplateParameterDecl::Type("T")],
            InstantiationTrees::default(),
        );
        let requested = program
            .class_template_instance(template, Vec::new())
            .expect("A is a template");
        let template_ty = program.entry(template).ty.expect("template type");

        assert_eq!(
            PrimaryTemplateSolver::solve(&program, template_ty, requested),
            Err(InstantiationError::ArityMismatch {
                arguments: 0,
                parameters: 1,
            })
        );
    }
}
