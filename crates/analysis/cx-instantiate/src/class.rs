//! Class template instantiation

use crate::inject::{get_name_of_template_parameter, inject_template_argument};
use crate::{InstantiationError, Sema, Session};
use cx_scope::{Completeness, DeclContext, DeclFlags, Deduction, SymbolId, SymbolKind, TypeId};
use cx_span::Location;
use log::{Level, debug, log_enabled};

/// Fills in the class template specialization `entry`
///
/// `entry` is a class, or a typedef naming one, whose type is an
/// incomplete independent template specialization. The solver selects the
/// template it is instantiated from; the selected template's member and
/// base trees are copied and rebuilt in a fresh context holding the
/// deduced arguments.
///
/// The class is marked complete before its members are built, so members
/// naming the class itself do not request it again.
///
/// # Errors
///
/// Fatal errors when `entry` is not eligible or the solver matches
/// nothing, `DepthExceeded` when too many instantiations are nested, and
/// whatever folding an argument or the analyzer reports.
pub fn instantiate_template_class<S: Sema + ?Sized>(
    session: &mut Session,
    sema: &mut S,
    entry: SymbolId,
    context: &DeclContext,
    location: &Location,
) -> Result<(), InstantiationError> {
    let entry = resolve_class_entry(session, entry)?;
    let (class_ty, template) = eligible_class(session, entry)?;
    debug!(
        "Instantiating class '{}' at '{location}'",
        session.program.symbol_name(entry)
    );

    let mut guard = session.enter_instantiation(entry, location)?;
    let session: &mut Session = &mut guard;

    let Some((selected, deductions)) =
        sema.solve_class_template(session, context, template, entry, location)?
    else {
        return Err(InstantiationError::NoMatchingTemplate {
            name: session.program.symbol_name(entry).to_owned(),
            declared_at: session.program.entry(entry).location.clone(),
        });
    };

    let selected_ty = session.program.entry(selected).ty;
    let (trees, parameters) = selected_ty
        .and_then(|ty| {
            let class = session.program.class_type(ty)?;
            let spec = class.specialization.as_ref()?;
            Some((class.instantiation_trees, spec.parameters.clone()))
        })
        .ok_or_else(|| InstantiationError::NotEligibleClass {
            name: session.program.symbol_name(selected).to_owned(),
        })?;
    let member_specification = trees
        .member_specification
        .map(|node| session.tree.copy_for_instantiation(node));
    let base_clause = trees
        .base_clause
        .map(|node| session.tree.copy_for_instantiation(node));

    let declared_in = session.program.entry(entry).decl_context;
    let mut template_context = session.program.scopes.new_template_context(&declared_in);
    template_context
        .flags
        .remove(DeclFlags::TEMPLATE | DeclFlags::EXPLICIT_SPECIALIZATION);
    template_context.template_nesting = 0;

    let inner = session
        .program
        .scopes
        .new_class_context(&template_context, entry);
    if let Some(class) = session.program.class_type_mut(class_ty) {
        class.inner_context = Some(inner);
    }

    debug!("Injecting template parameters");
    for Deduction {
        parameter_nesting,
        parameter_position,
        kind,
        deduced,
    } in &deductions
    {
        let [argument] = deduced.as_slice() else {
            return Err(InstantiationError::DeducedArgumentCount {
                nesting: *parameter_nesting,
                position: *parameter_position,
                count: deduced.len(),
            });
        };
        let name = get_name_of_template_parameter(
            &session.program,
            &parameters,
            *parameter_nesting,
            *parameter_position,
        )?;
        inject_template_argument(session, &template_context, &name, *kind, argument)?;
    }
    if log_enabled!(Level::Debug) {
        debug!(
            "Injected context\n{}",
            session.program.describe_scope(template_context.current_scope)
        );
    }

    if let Some(base_clause) = base_clause {
        sema.build_base_clause(session, base_clause, class_ty, &inner)?;
    }

    let injected = session
        .program
        .copy_symbol_into(entry, inner.current_scope);
    let specs = &mut session.program.entry_mut(injected).specs;
    specs.do_not_print = true;
    specs.is_injected_class_name = true;
    specs.injected_class_referred_symbol = Some(entry);

    if let Some(class) = session.program.class_type_mut(class_ty) {
        class.completeness = Completeness::CompleteIndependent;
    }

    if let Some(member_specification) = member_specification {
        let mut member_context = inner;
        member_context.flags |= DeclFlags::INSTANTIATING;
        sema.build_member_specification(session, member_specification, class_ty, &member_context)?;
    }

    session.program.entry_mut(entry).defined = true;
    sema.finish_class_type(session, class_ty, &declared_in, location)?;
    session.record_instantiation(entry, location);
    debug!(
        "Instantiation of class '{}' ended",
        session.program.symbol_name(entry)
    );
    Ok(())
}

fn resolve_class_entry(session: &Session, entry: SymbolId) -> Result<SymbolId, InstantiationError> {
    let program = &session.program;
    let symbol = program.entry(entry);
    match symbol.kind {
        SymbolKind::Class => Ok(entry),
        SymbolKind::Typedef => symbol
            .ty
            .and_then(|ty| program.named_type_get_symbol(ty))
            .ok_or_else(|| InstantiationError::NotEligibleClass {
                name: program.symbol_name(entry).to_owned(),
            }),
        kind => Err(InstantiationError::InvalidSymbol {
            name: program.symbol_name(entry).to_owned(),
            kind,
        }),
    }
}

/// The class type and template of an incomplete independent specialization
fn eligible_class(
    session: &Session,
    entry: SymbolId,
) -> Result<(TypeId, TypeId), InstantiationError> {
    let program = &session.program;
    program
        .entry(entry)
        .ty
        .and_then(|ty| {
            let class_ty = program.actual_class_type(ty)?;
            let class = program.class_type(class_ty)?;
            let spec = class.specialization.as_ref()?;
            (class.completeness == Completeness::IncompleteIndependent)
                .then_some((class_ty, spec.template))
        })
        .ok_or_else(|| InstantiationError::NotEligibleClass {
            name: program.symbol_name(entry).to_owned(),
        })
}
