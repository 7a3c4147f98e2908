//! Declaration helpers used by the declaration builder and by tests

use crate::{
    ClassType, Completeness, DeclContext, DeclFlags, FunctionType, InstantiationTrees, Program,
    Specialization, SymbolId, SymbolKind, TemplateArgument, TemplateParameter,
    TemplateParameterKind, TemplateType, Type, TypeId,
};
use cx_syntax::NodeId;

/// One parameter of a template declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateParameterDecl<'a> {
    /// `typename T`
    Type(&'a str),
    /// `template <...> class T`
    Template(&'a str),
    /// `int N`
    NonType(&'a str, TypeId),
}

impl Program {
    /// Declares a variable, optionally with a constant initializer
    pub fn declare_variable(
        &mut self,
        context: &DeclContext,
        name: &str,
        ty: TypeId,
        initializer: Option<NodeId>,
    ) -> SymbolId {
        let id = self.new_symbol(context, context.current_scope, name, SymbolKind::Variable);
        let entry = &mut self.symbols[id];
        entry.ty = Some(ty);
        entry.expression_value = initializer;
        entry.defined = true;
        id
    }

    /// Declares an enumerator with its value expression
    pub fn declare_enumerator(
        &mut self,
        context: &DeclContext,
        name: &str,
        ty: TypeId,
        value: NodeId,
    ) -> SymbolId {
        let id = self.new_symbol(context, context.current_scope, name, SymbolKind::Enumerator);
        let entry = &mut self.symbols[id];
        entry.ty = Some(ty);
        entry.expression_value = Some(value);
        entry.defined = true;
        id
    }

    /// Declares a namespace and returns the context of its members
    pub fn declare_namespace(
        &mut self,
        context: &DeclContext,
        name: &str,
    ) -> (SymbolId, DeclContext) {
        let id = self.new_symbol(context, context.current_scope, name, SymbolKind::Namespace);
        let inner = self.scopes.new_namespace_context(context, id);
        self.symbols[id].related_scope = Some(inner.current_scope);
        (id, inner)
    }

    /// Opens a template parameter scope and declares `parameters` in it
    pub fn declare_template_parameters(
        &mut self,
        context: &DeclContext,
        parameters: &[TemplateParameterDecl<'_>],
    ) -> (DeclContext, Vec<TemplateParameter>) {
        let mut template_context = self.scopes.new_template_context(context);
        template_context.template_nesting += 1;
        template_context.flags |= DeclFlags::TEMPLATE;

        let scope = template_context.current_scope;
        let mut declared = Vec::with_capacity(parameters.len());
        for (position, parameter) in parameters.iter().enumerate() {
            let (name, kind, symbol_kind, ty) = match *parameter {
                TemplateParameterDecl::Type(name) => (
                    name,
                    TemplateParameterKind::Type,
                    SymbolKind::TemplateTypeParameter,
                    None,
                ),
                TemplateParameterDecl::Template(name) => (
                    name,
                    TemplateParameterKind::Template,
                    SymbolKind::TemplateTemplateParameter,
                    None,
                ),
                TemplateParameterDecl::NonType(name, ty) => (
                    name,
                    TemplateParameterKind::NonType,
                    SymbolKind::TemplateNonTypeParameter,
                    Some(ty),
                ),
            };
            let entry = self.new_symbol(&template_context, scope, name, symbol_kind);
            let symbol = &mut self.symbols[entry];
            symbol.ty = ty;
            symbol.specs.template_parameter_nesting = template_context.template_nesting;
            symbol.specs.template_parameter_position = position as u32;
            declared.push(TemplateParameter { kind, entry });
        }
        (template_context, declared)
    }

    /// Declares `template <parameters> class name { ... }`
    ///
    /// Returns the template name symbol. The primary specialization keeps
    /// `trees` for later instantiation.
    pub fn declare_class_template(
        &mut self,
        context: &DeclContext,
        name: &str,
        parameters: &[TemplateParameterDecl<'_>],
        trees: InstantiationTrees,
    ) -> SymbolId {
        let (template_context, parameters) = self.declare_template_parameters(context, parameters);
        let template = self.new_symbol(context, context.current_scope, name, SymbolKind::Template);
        let primary = self.new_unscoped_symbol(&template_context, name, SymbolKind::Class);
        let template_ty = self.types.alloc(Type::Template(TemplateType {
            name: template,
            primary,
            specializations: Vec::new(),
            instances: Vec::new(),
        }));
        self.symbols[template].ty = Some(template_ty);

        let class_ty = self.types.alloc(Type::Class(ClassType {
            completeness: Completeness::CompleteDependent,
            specialization: Some(Specialization {
                template: template_ty,
                parameters,
                arguments: Vec::new(),
            }),
            instantiation_trees: trees,
            inner_context: None,
            bases: Vec::new(),
        }));
        let entry = &mut self.symbols[primary];
        entry.ty = Some(class_ty);
        entry.defined = true;
        template
    }

    /// Declares a partial (or, with no parameters, explicit) specialization
    /// of a class template
    ///
    /// Returns `None` when `template` does not name a template.
    pub fn declare_class_specialization(
        &mut self,
        template: SymbolId,
        parameters: &[TemplateParameterDecl<'_>],
        arguments: Vec<TemplateArgument>,
        trees: InstantiationTrees,
    ) -> Option<SymbolId> {
        let template_ty = self.template_type_of(template)?;
        let mut context = self.symbols[template].decl_context;
        if parameters.is_empty() {
            context.flags |= DeclFlags::EXPLICIT_SPECIALIZATION;
        }
        let (specialization_context, parameters) =
            self.declare_template_parameters(&context, parameters);
        let completeness = if parameters.is_empty() {
            Completeness::CompleteIndependent
        } else {
            Completeness::CompleteDependent
        };

        let name = self.symbol_name(template).to_owned();
        let id = self.new_unscoped_symbol(&specialization_context, &name, SymbolKind::Class);
        let class_ty = self.types.alloc(Type::Class(ClassType {
            completeness,
            specialization: Some(Specialization {
                template: template_ty,
                parameters,
                arguments,
            }),
            instantiation_trees: trees,
            inner_context: None,
            bases: Vec::new(),
        }));
        let entry = &mut self.symbols[id];
        entry.ty = Some(class_ty);
        entry.defined = true;

        if let Type::Template(template) = self.types.get_mut(template_ty) {
            template.specializations.push(id);
        }
        Some(id)
    }

    /// The specialization named by a use such as `A<int>`
    ///
    /// The first use creates an incomplete independent class; later uses
    /// with the same arguments return the same symbol.
    pub fn class_template_instance(
        &mut self,
        template: SymbolId,
        arguments: Vec<TemplateArgument>,
    ) -> Option<SymbolId> {
        self.template_instance(template, arguments, SymbolKind::Class)
    }

    /// Declares `template <parameters> R name(...) { ... }`
    ///
    /// Returns the template name symbol.
    pub fn declare_function_template(
        &mut self,
        context: &DeclContext,
        name: &str,
        parameters: &[TemplateParameterDecl<'_>],
        definition: Option<NodeId>,
    ) -> SymbolId {
        let (template_context, parameters) = self.declare_template_parameters(context, parameters);
        let template = self.new_symbol(context, context.current_scope, name, SymbolKind::Template);
        let primary = self.new_unscoped_symbol(&template_context, name, SymbolKind::Function);
        let template_ty = self.types.alloc(Type::Template(TemplateType {
            name: template,
            primary,
            specializations: Vec::new(),
            instances: Vec::new(),
        }));
        self.symbols[template].ty = Some(template_ty);

        let function_ty = self.types.alloc(Type::Function(FunctionType {
            specialization: Some(Specialization {
                template: template_ty,
                parameters,
                arguments: Vec::new(),
            }),
            definition,
        }));
        let entry = &mut self.symbols[primary];
        entry.ty = Some(function_ty);
        entry.defined = definition.is_some();
        template
    }

    /// The specialization named by a call such as `f<3>()`
    pub fn function_template_instance(
        &mut self,
        template: SymbolId,
        arguments: Vec<TemplateArgument>,
    ) -> Option<SymbolId> {
        self.template_instance(template, arguments, SymbolKind::Function)
    }

    /// Whether two types denote the same type
    #[must_use]
    pub fn same_type(&self, lhs: TypeId, rhs: TypeId) -> bool {
        let lhs = self.advance_over_typedefs(lhs);
        let rhs = self.advance_over_typedefs(rhs);
        if lhs == rhs {
            return true;
        }
        match (self.types.get(lhs), self.types.get(rhs)) {
            (Type::Builtin(a), Type::Builtin(b)) => a == b,
            (Type::Named(a), Type::Named(b)) => a == b,
            _ => false,
        }
    }

    fn same_arguments(&self, lhs: &[TemplateArgument], rhs: &[TemplateArgument]) -> bool {
        lhs.len() == rhs.len()
            && lhs.iter().zip(rhs).all(|pair| match pair {
                (TemplateArgument::Type(a), TemplateArgument::Type(b))
                | (TemplateArgument::Template(a), TemplateArgument::Template(b)) => {
                    self.same_type(*a, *b)
                }
                (
                    TemplateArgument::NonType { expression: a, .. },
                    TemplateArgument::NonType { expression: b, .. },
                ) => a == b,
                _ => false,
            })
    }

    fn template_type_of(&self, template: SymbolId) -> Option<TypeId> {
        let ty = self.symbols[template].ty?;
        matches!(self.types.get(ty), Type::Template(_)).then_some(ty)
    }

    fn template_instance(
        &mut self,
        template: SymbolId,
        arguments: Vec<TemplateArgument>,
        kind: SymbolKind,
    ) -> Option<SymbolId> {
        let template_ty = self.template_type_of(template)?;
        let (primary, instances) = match self.types.get(template_ty) {
            Type::Template(template) => (template.primary, template.instances.clone()),
            _ => return None,
        };

        let existing = instances.into_iter().find(|&instance| {
            self.symbols[instance]
                .ty
                .and_then(|ty| self.specialization(ty))
                .is_some_and(|spec| self.same_arguments(&spec.arguments, &arguments))
        });
        if existing.is_some() {
            return existing;
        }

        let parameters = self
            .specialization(self.symbols[primary].ty?)?
            .parameters
            .clone();
        let specialization = Some(Specialization {
            template: template_ty,
            parameters,
            arguments,
        });
        let ty = match kind {
            SymbolKind::Function => Type::Function(FunctionType {
                specialization,
                definition: None,
            }),
            _ => Type::Class(ClassType::incomplete(specialization)),
        };

        let context = self.symbols[template].decl_context;
        let name = self.symbol_name(template).to_owned();
        let id = self.new_unscoped_symbol(&context, &name, kind);
        let ty = self.types.alloc(ty);
        self.symbols[id].ty = Some(ty);
        if let Type::Template(template) = self.types.get_mut(template_ty) {
            template.instances.push(id);
        }
        Some(id)
    }
}
