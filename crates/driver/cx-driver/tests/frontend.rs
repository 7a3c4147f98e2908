//! Folding and instantiation through the front-end facade

use cx_const_eval::{ConstError, Value};
use cx_driver::{Frontend, FrontendConfig};
use cx_instantiate::{
    InstantiationError, PrimaryTemplateSolver, ScopeBuilder, Session, TemplateSolver,
};
use cx_scope::{
    BuiltinType, DeclContext, DeductionSet, InstantiationTrees, Program, Severity, SymbolId,
    TemplateArgument, TemplateParameterDecl, TypeId,
};
use cx_span::Location;
use cx_syntax::{NodeId, NodeKind, SyntaxTree};
use expect_test::expect;

/// Analyzer that only counts the member lists it is asked to build
#[derive(Debug, Default)]
struct CountingSema {
    members_built: usize,
}

impl TemplateSolver for CountingSema {
    fn solve_class_template(
        &mut self,
        session: &mut Session,
        context: &DeclContext,
        template: TypeId,
        requested: SymbolId,
        location: &Location,
    ) -> Result<Option<(SymbolId, DeductionSet)>, InstantiationError> {
        PrimaryTemplateSolver.solve_class_template(session, context, template, requested, location)
    }
}

impl ScopeBuilder for CountingSema {
    fn build_base_clause(
        &mut self,
        _session: &mut Session,
        _base_clause: NodeId,
        _class_ty: TypeId,
        _context: &DeclContext,
    ) -> Result<(), InstantiationError> {
        Ok(())
    }

    fn build_member_specification(
        &mut self,
        _session: &mut Session,
        _member_specification: NodeId,
        _class_ty: TypeId,
        _context: &DeclContext,
    ) -> Result<(), InstantiationError> {
        self.members_built += 1;
        Ok(())
    }

    fn build_function_definition(
        &mut self,
        _session: &mut Session,
        _definition: NodeId,
        _context: &DeclContext,
    ) -> Result<(), InstantiationError> {
        Ok(())
    }
}

fn frontend(config: FrontendConfig) -> (Frontend<CountingSema>, DeclContext) {
    let program = Program::default();
    let global = program.global_context();
    let frontend = Frontend::new(program, SyntaxTree::new(), CountingSema::default(), config);
    (frontend, global)
}

/// Declares `template <int M> struct A { ... };` and names `A<value>`
fn declare_a(frontend: &mut Frontend<CountingSema>, global: &DeclContext, value: &str) -> SymbolId {
    let session = frontend.session_mut();
    let int: TypeId = session.program.types.builtin(BuiltinType::Int);
    let members = session.tree.node(NodeKind::MemberSpecification, []);
    let template = session.program.declare_class_template(
        global,
        "A",
        &[TemplateParameterDecl::NonType("M", int)],
        InstantiationTrees {
            member_specification: Some(members),
            base_clause: None,
        },
    );
    let expression = session.tree.integer_literal(value);
    let argument = TemplateArgument::NonType {
        ty: int,
        expression,
        context: *global,
    };
    session
        .program
        .class_template_instance(template, vec![argument])
        .expect("A is a template")
}

#[test]
fn test_evaluate_arithmetic() {
    let (mut frontend, global) = frontend(FrontendConfig::default());
    let tree = &mut frontend.session_mut().tree;
    let three = tree.integer_literal("3");
    let four = tree.integer_literal("4");
    let two = tree.integer_literal("2");
    let product = tree.binary(NodeKind::MultOp, four, two);
    let sum = tree.binary(NodeKind::AddOp, three, product);

    assert_eq!(
        frontend.evaluate_constant_expression(sum, &global),
        Ok(Value::SignedInt(11))
    );
    assert!(frontend.diagnostics().is_empty());
}

#[test]
fn test_unknown_symbol_is_reported_with_context() {
    let (mut frontend, global) = frontend(FrontendConfig::default());
    let tree = &mut frontend.session_mut().tree;
    let x = tree.identifier("x");
    let one = tree.integer_literal("1");
    let sum = tree.binary(NodeKind::AddOp, x, one);

    let result = frontend.evaluate_constant_expression(sum, &global);

    assert!(matches!(result, Err(ConstError::UnknownSymbol { .. })));
    let diagnostics = frontend.take_diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].severity, Severity::Diagnosed);
    expect![[r#"
        error: unknown symbol 'x' in constant expression
          in 'x + 1'"#]]
    .assert_eq(&diagnostics[0].to_string());
    assert!(frontend.diagnostics().is_empty());
}

#[test]
fn test_context_can_be_disabled() {
    let config = FrontendConfig::from_toml_str("[diagnostics]\nprint_context = false\n")
        .expect("valid configuration");
    let (mut frontend, global) = frontend(config);
    let x = frontend.session_mut().tree.identifier("x");

    assert!(frontend.evaluate_constant_expression(x, &global).is_err());
    expect!["error: unknown symbol 'x' in constant expression"]
        .assert_eq(&frontend.diagnostics()[0].to_string());
}

#[test]
fn test_function_call_is_an_internal_error() {
    let (mut frontend, global) = frontend(FrontendConfig::default());
    let tree = &mut frontend.session_mut().tree;
    let callee = tree.identifier("f");
    let argument = tree.integer_literal("1");
    let call = tree.node(NodeKind::FunctionCall, [callee, argument]);

    assert!(frontend.evaluate_constant_expression(call, &global).is_err());
    let diagnostic = &frontend.diagnostics()[0];
    assert_eq!(diagnostic.severity, Severity::Fatal);
    expect![[r#"
        internal error: unsupported node 'function-call' when evaluating constant expression
          in 'f(1)'"#]]
    .assert_eq(&diagnostic.to_string());
}

#[test]
fn test_instantiated_argument_is_visible_to_folding() {
    let (mut frontend, global) = frontend(FrontendConfig::default());
    let instance = declare_a(&mut frontend, &global, "3");

    frontend
        .instantiate_template_class(instance, &global, "a.cpp", 3)
        .expect("A<3> instantiates");

    assert_eq!(frontend.sema().members_built, 1);
    assert_eq!(frontend.session().instantiated().len(), 1);
    let inner = frontend
        .session()
        .program
        .entry(instance)
        .ty
        .and_then(|ty| frontend.session().program.class_type(ty))
        .and_then(|class| class.inner_context)
        .expect("A<3> has members");

    let tree = &mut frontend.session_mut().tree;
    let m = tree.identifier("M");
    let two = tree.integer_literal("2");
    let product = tree.binary(NodeKind::MultOp, m, two);
    assert_eq!(
        frontend.evaluate_constant_expression(product, &inner),
        Ok(Value::SignedInt(6))
    );
    assert!(frontend.diagnostics().is_empty());
}

#[test]
fn test_configured_depth_limit_is_diagnosed() {
    let config = FrontendConfig::from_toml_str("[instantiation]\nmax_depth = 0\n")
        .expect("valid configuration");
    let (mut frontend, global) = frontend(config);
    let instance = declare_a(&mut frontend, &global, "3");

    let result = frontend.instantiate_template_class(instance, &global, "a.cpp", 3);

    assert!(matches!(
        result,
        Err(InstantiationError::DepthExceeded { limit: 0, .. })
    ));
    assert_eq!(frontend.sema().members_built, 0);
    let diagnostic = &frontend.diagnostics()[0];
    assert_eq!(diagnostic.location, Some(Location::new("a.cpp", 3)));
    expect![[r#"
        a.cpp:3: error: instantiating 'A' exceeds the maximum depth of 0
          while instantiating 'A'"#]]
    .assert_eq(&diagnostic.to_string());
}
