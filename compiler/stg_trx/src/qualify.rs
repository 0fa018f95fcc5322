//! Qualified names for entities referenced inside quotations.
//!
//! Generated code is compiled later, in a scope that only contains the
//! persistent units and the universal base scope. Every constructor, field,
//! exception or class a quotation mentions must therefore be rewritten to a
//! path that resolves from there, or rejected.
//!
//! Resolution order for an entity written as `written`:
//!
//! 1. `written` already starts at a persistent unit or the base scope.
//! 2. The short name alone finds an entity of the same kind and owner in the
//!    base scope (`Some`, `::`, `Not_found`).
//! 3. The owner's path is loadable: put the short name on its prefix, so a
//!    constructor `Leaf` of type `Tree.t` becomes `Tree.Leaf`.
//!
//! Anything else was defined in the unit being compiled and cannot be
//! referenced from code that outlives it.

use stg_ir::{
    CtorDesc, CtorKind, EntityKind, FieldDesc, Ident, Name, Path, StringLookup, SymbolTable,
};

use crate::{InternalError, StageError};

/// Whether `path` resolves outside the unit being compiled.
#[inline]
pub fn is_globally_loadable(path: &Path) -> bool {
    path.head.is_global()
}

/// Qualify a data constructor or exception reference.
pub fn qualify_ctor(
    symbols: &SymbolTable,
    names: &impl StringLookup,
    written: &Path,
    desc: &CtorDesc,
) -> Result<Path, StageError> {
    match &desc.kind {
        CtorKind::Data => qualify_member(
            symbols,
            names,
            EntityKind::Constructor,
            written,
            desc.name,
            desc.res.head_path(),
        ),
        CtorKind::Exception(own) => {
            qualify_member(symbols, names, EntityKind::Exception, written, desc.name, Some(own))
        }
    }
}

/// Qualify a record field reference.
pub fn qualify_field(
    symbols: &SymbolTable,
    names: &impl StringLookup,
    written: &Path,
    desc: &FieldDesc,
) -> Result<Path, StageError> {
    qualify_member(
        symbols,
        names,
        EntityKind::Field,
        written,
        desc.name,
        desc.record.head_path(),
    )
}

/// Check a class path used by `new`. Classes carry no owner to fall back on.
pub fn qualify_class(names: &impl StringLookup, path: &Path) -> Result<Path, StageError> {
    if is_globally_loadable(path) {
        return Ok(path.clone());
    }
    Err(not_quotable(names, path, EntityKind::Class))
}

fn qualify_member(
    symbols: &SymbolTable,
    names: &impl StringLookup,
    kind: EntityKind,
    written: &Path,
    short: Name,
    owner: Option<&Path>,
) -> Result<Path, StageError> {
    if is_globally_loadable(written) {
        return Ok(written.clone());
    }
    let Some(owner) = owner else {
        return Err(InternalError::NoOwningType(written.display(names)).into());
    };
    if symbols.resolves_in_base_scope(kind, short, owner) {
        tracing::trace!(entity = names.lookup(short), %kind, "resolved from base scope");
        return Ok(Path::ident(Ident::predef(short)));
    }
    if is_globally_loadable(owner) {
        let qualified = owner.with_last(short);
        tracing::trace!(
            entity = names.lookup(short),
            path = %qualified.display(names),
            "qualified through owner"
        );
        return Ok(qualified);
    }
    Err(not_quotable(names, written, kind))
}

fn not_quotable(names: &impl StringLookup, path: &Path, kind: EntityKind) -> StageError {
    StageError::NotQuotable {
        entity: path.display(names),
        kind,
    }
}
