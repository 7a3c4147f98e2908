//! Injection of template arguments into an instantiation context

use crate::{InstantiationError, Session};
use cx_const_eval::{evaluate_constant_expression, to_literal_tree};
use cx_scope::{
    DeclContext, Program, Specialization, SymbolEntry, SymbolId, SymbolKind, TemplateArgument,
    TemplateParameter, TemplateParameterKind,
};
use log::debug;

/// Name of the parameter at `nesting`/`position` in `parameters`
///
/// # Errors
///
/// `ParameterNotFound` when no parameter sits there.
pub fn get_name_of_template_parameter(
    program: &Program,
    parameters: &[TemplateParameter],
    nesting: u32,
    position: u32,
) -> Result<String, InstantiationError> {
    parameters
        .iter()
        .find(|parameter| {
            let specs = program.entry(parameter.entry).specs;
            specs.template_parameter_nesting == nesting
                && specs.template_parameter_position == position
        })
        .map(|parameter| program.symbol_name(parameter.entry).to_owned())
        .ok_or(InstantiationError::ParameterNotFound { nesting, position })
}

/// Signs `argument` in under `name` in the template scope of `context`
///
/// Type arguments become typedefs, template arguments become template
/// names, and non-type arguments become variables whose initializer is the
/// argument folded to a literal.
///
/// # Errors
///
/// `KindMismatch` when the argument cannot bind to a `kind` parameter,
/// `NotATemplate` for a template argument naming something else, and any
/// error folding a non-type argument.
pub fn inject_template_argument(
    session: &mut Session,
    context: &DeclContext,
    name: &str,
    kind: TemplateParameterKind,
    argument: &TemplateArgument,
) -> Result<SymbolId, InstantiationError> {
    if argument.kind() != kind {
        return Err(InstantiationError::KindMismatch {
            parameter: kind,
            argument: argument.kind(),
        });
    }
    let scope = context.template_scope.unwrap_or(context.current_scope);

    let injected = match *argument {
        TemplateArgument::Type(ty) => {
            let alias = session.program.new_typedef(ty);
            let id = session
                .program
                .new_symbol(context, scope, name, SymbolKind::Typedef);
            session.program.entry_mut(id).ty = Some(alias);
            debug!("Injecting typedef '{name}'");
            id
        }
        TemplateArgument::Template(ty) => {
            let template_ty = session
                .program
                .named_type_get_symbol(ty)
                .map(|symbol| session.program.entry(symbol))
                .filter(|entry| entry.kind == SymbolKind::Template)
                .and_then(|entry| entry.ty)
                .ok_or_else(|| InstantiationError::NotATemplate {
                    parameter: name.to_owned(),
                })?;
            let id = session
                .program
                .new_symbol(context, scope, name, SymbolKind::Template);
            session.program.entry_mut(id).ty = Some(template_ty);
            debug!("Injecting template name '{name}'");
            id
        }
        TemplateArgument::NonType {
            ty,
            expression,
            context: expression_context,
        } => {
            let value = evaluate_constant_expression(
                &session.tree,
                &session.program,
                expression,
                &expression_context,
            )?;
            let literal = to_literal_tree(&mut session.tree, value);
            let id = session
                .program
                .new_symbol(context, scope, name, SymbolKind::Variable);
            let entry = session.program.entry_mut(id);
            entry.ty = Some(ty);
            entry.expression_value = Some(literal);
            entry.defined = true;
            debug!(
                "Injecting parameter '{name}' with expression '{}'",
                session.tree.display(literal)
            );
            id
        }
    };
    session.program.entry_mut(injected).specs.is_template_argument = true;
    Ok(injected)
}

/// Builds the context a function template specialization is instantiated
/// in, with its template arguments injected
///
/// Function templates cannot be partially specialized, so the arguments of
/// `entry` bind one to one to `parameters`, which default to the
/// parameters recorded on the specialization.
///
/// # Errors
///
/// `NotEligibleFunction` when `entry` is not a function template
/// specialization, `ArityMismatch` when arguments and parameters differ in
/// number, and any injection error.
pub fn get_instantiation_context(
    session: &mut Session,
    entry: SymbolId,
    parameters: Option<&[TemplateParameter]>,
) -> Result<DeclContext, InstantiationError> {
    let program = &session.program;
    let symbol = program.entry(entry);
    let Some(specialization) = specialization_of_function(program, symbol) else {
        return Err(InstantiationError::NotEligibleFunction {
            name: program.symbol_name(entry).to_owned(),
        });
    };
    let parameters = parameters.map_or_else(|| specialization.parameters.clone(), <[_]>::to_vec);
    let arguments = specialization.arguments.clone();
    if arguments.len() != parameters.len() {
        return Err(InstantiationError::ArityMismatch {
            arguments: arguments.len(),
            parameters: parameters.len(),
        });
    }
    debug!("Injecting {} template arguments", parameters.len());

    let decl_context = symbol.decl_context;
    let context = session.program.scopes.new_template_context(&decl_context);
    for (parameter, argument) in parameters.iter().zip(&arguments) {
        let name = session.program.symbol_name(parameter.entry).to_owned();
        inject_template_argument(session, &context, &name, parameter.kind, argument)?;
    }
    Ok(context)
}

fn specialization_of_function<'p>(
    program: &'p Program,
    symbol: &SymbolEntry,
) -> Option<&'p Specialization> {
    program
        .function_type(symbol.ty?)?
        .specialization
        .as_ref()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cx_const_eval::{Value, value_from_literal};
    use cx_scope::{BuiltinType, TemplateParameterDecl};
    use cx_syntax::{NodeKind, SyntaxTree};

    fn session() -> Session {
        Session::new(Program::default(), SyntaxTree::new())
    }

    #[test]
    fn test_name_of_template_parameter() {
        let mut program = Program::default();
        let global = program.global_context();
        let (_, parameters) = program.declare_template_parameters(
            &global,
            &[TemplateParameterDecl::Type("T"), TemplateParameterDecl::Template("C")],
        );

        assert_eq!(
            get_name_of_template_parameter(&program, &parameters, 1, 1),
            Ok("C".to_owned())
        );
        assert_eq!(
            get_name_of_template_parameter(&program, &parameters, 2, 0),
            Err(InstantiationError::ParameterNotFound {
                nesting: 2,
                position: 0,
            })
        );
    }

    #[test]
    fn test_non_type_argument_is_folded_to_literal() {
        let mut session = session();
        let global = session.program.global_context();
        let int = session.program.types.builtin(BuiltinType::Int);
        let lhs = session.tree.integer_literal("6");
        let rhs = session.tree.integer_literal("7");
        let product = session.tree.binary(NodeKind::MultOp, lhs, rhs);
        let context = session.program.scopes.new_template_context(&global);

        let injected = inject_template_argument(
            &mut session,
            &context,
            "N",
            TemplateParameterKind::NonType,
            &TemplateArgument::NonType {
                ty: int,
                expression: product,
                context: global,
            },
        )
        .expect("argument folds");

        let entry = session.program.entry(injected);
        assert_eq!(entry.kind, SymbolKind::Variable);
        assert_eq!(entry.scope, context.current_scope);
        assert!(entry.specs.is_template_argument);
        let literal = entry.expression_value.expect("folded initializer");
        assert_eq!(session.tree.text(literal), Some("42"));
        assert_eq!(
            value_from_literal(&session.tree, literal),
            Ok(Value::SignedInt(42))
        );
    }

    #[test]
    fn test_type_argument_is_injected_as_typedef() {
        let mut session = session();
        let global = session.program.global_context();
        let long = session.program.types.builtin(BuiltinType::Long);
        let context = session.program.scopes.new_template_context(&global);

        let injected = inject_template_argument(
            &mut session,
            &context,
            "T",
            TemplateParameterKind::Type,
            &TemplateArgument::Type(long),
        )
        .expect("type binds to type");

        let entry = session.program.entry(injected);
        assert_eq!(entry.kind, SymbolKind::Typedef);
        let aliased = entry.ty.map(|ty| session.program.advance_over_typedefs(ty));
        assert_eq!(aliased, Some(long));
    }

    #[test]
    fn test_template_argument_must_name_template() {
        let mut session = session();
        let global = session.program.global_context();
        let int = session.program.types.builtin(BuiltinType::Int);
        let context = session.program.scopes.new_template_context(&global);

        let result = inject_template_argument(
            &mut session,
            &context,
            "C",
            TemplateParameterKind::Template,
            &TemplateArgument::Template(int),
        );
        assert_eq!(
            result,
            Err(InstantiationError::NotATemplate {
                parameter: "C".to_owned(),
            })
        );
    }

    #[test]
    fn test_kind_mismatch_is_fatal() {
        let mut session = session();
        let global = session.program.global_context();
        let int = session.program.types.builtin(BuiltinType::Int);

        let error = inject_template_argument(
            &mut session,
            &global,
            "N",
            TemplateParameterKind::NonType,
            &TemplateArgument::Type(int),
        )
        .expect_err("a type cannot bind to a non-type parameter");

        assert_eq!(
            error,
            InstantiationError::KindMismatch {
                parameter: TemplateParameterKind::NonType,
                argument: TemplateParameterKind::Type,
            }
        );
        assert_eq!(error.severity(), cx_scope::Severity::Fatal);
    }
}
