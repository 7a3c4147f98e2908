//! Function template instantiation

use crate::inject::get_instantiation_context;
use crate::{InstantiationError, Sema, Session};
use cx_scope::{DeclContext, DeclFlags, SymbolId, SymbolKind};
use cx_span::Location;
use log::debug;

/// Builds the definition of the function template specialization `entry`
///
/// Does nothing while an ambiguity is being resolved, when the primary
/// template has no definition yet, when `entry` is already defined, or when
/// `entry` is already being instantiated further up the stack. Otherwise
/// the primary's definition is copied and rebuilt with the template
/// arguments injected, with expression testing suspended.
///
/// # Errors
///
/// Fatal errors when `entry` is not a function template specialization or
/// its arguments do not fit the parameters, `DepthExceeded` when too many
/// instantiations are nested, and whatever folding an argument or the
/// analyzer reports.
pub fn instantiate_template_function<S: Sema + ?Sized>(
    session: &mut Session,
    sema: &mut S,
    entry: SymbolId,
    _context: &DeclContext,
    location: &Location,
) -> Result<(), InstantiationError> {
    if session.checking_ambiguity() {
        debug!("Not instantiating during ambiguity resolution");
        return Ok(());
    }

    let program = &session.program;
    let symbol = program.entry(entry);
    if symbol.kind != SymbolKind::Function {
        return Err(InstantiationError::InvalidSymbol {
            name: program.symbol_name(entry).to_owned(),
            kind: symbol.kind,
        });
    }
    debug!(
        "Instantiating function '{}' at '{location}'",
        program.symbol_name(entry)
    );

    let primary = symbol
        .ty
        .and_then(|ty| program.function_type(ty))
        .and_then(|function| function.specialization.as_ref())
        .and_then(|spec| program.template_type(spec.template))
        .map(|template| template.primary)
        .ok_or_else(|| InstantiationError::NotEligibleFunction {
            name: program.symbol_name(entry).to_owned(),
        })?;
    let primary = program.entry(primary);
    if !primary.defined {
        debug!("Not instantiating since primary template has not been defined");
        return Ok(());
    }
    if symbol.defined {
        debug!("Instantiation already performed");
        return Ok(());
    }
    if session.is_active(entry) {
        debug!("Instantiation already in progress");
        return Ok(());
    }
    let definition = primary
        .ty
        .and_then(|ty| program.function_type(ty))
        .and_then(|function| function.definition);

    let mut guard = session.enter_instantiation(entry, location)?;
    let session: &mut Session = &mut guard;

    let mut context = get_instantiation_context(session, entry, None)?;
    let definition = definition.ok_or_else(|| InstantiationError::MissingDefinition {
        name: session.program.symbol_name(entry).to_owned(),
    })?;
    let definition = session.tree.copy_for_instantiation(definition);
    context.flags |= DeclFlags::TEMPLATE | DeclFlags::EXPLICIT_SPECIALIZATION;

    {
        let mut suspended = session.suspend_test_expression();
        sema.build_function_definition(&mut suspended, definition, &context)?;
    }

    session.program.entry_mut(entry).defined = true;
    session.record_instantiation(entry, location);
    debug!(
        "Instantiation of function '{}' ended",
        session.program.symbol_name(entry)
    );
    Ok(())
}
