//! Cross-stage persistence: identifiers from stage 0 used inside a quotation.
//!
//! The quotation needs the identifier's *value* when it is built, and must
//! carry it into code that runs later. In order of preference:
//!
//! 1. Literal lift: `int`, `char` and `bool` values become constant nodes,
//!    via `lift_int` / `lift_char` / `lift_bool` applied to the variable.
//! 2. By name: a globally loadable path is planted as a prebuilt
//!    identifier node; nothing happens at run time.
//! 3. Dynamic capture: `quote_dynamic` applied to the variable decides
//!    from the value's shape when the quotation is built.

use std::rc::Rc;

use stg_build::{build, Primitive};
use stg_ir::{Expr, Path, Ty};

use crate::qualify::is_globally_loadable;
use crate::Trx;

/// How a stage-0 identifier reaches generated code.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CspStrategy {
    /// Lift through the given literal primitive.
    Lift(Primitive),
    ByName,
    Dynamic,
}

/// Pick the strategy for an identifier with static type `ty`.
pub fn strategy(path: &Path, ty: &Ty) -> CspStrategy {
    match ty {
        Ty::Int => CspStrategy::Lift(Primitive::LiftInt),
        Ty::Char => CspStrategy::Lift(Primitive::LiftChar),
        Ty::Bool => CspStrategy::Lift(Primitive::LiftBool),
        _ if is_globally_loadable(path) => CspStrategy::ByName,
        _ => CspStrategy::Dynamic,
    }
}

impl Trx<'_> {
    /// Representation-building expression for the stage-0 identifier `expr`
    /// (an `Ident` node referring to `path`).
    pub(crate) fn cross_stage(&self, expr: &Rc<Expr>, path: &Path) -> Rc<Expr> {
        let span = expr.span;
        let strategy = strategy(path, &expr.ty);
        tracing::trace!(
            ident = %path.display(self.names),
            ?strategy,
            "cross-stage reference"
        );
        match strategy {
            CspStrategy::Lift(prim) => self.build(prim, span, vec![Rc::clone(expr)]),
            CspStrategy::ByName => self.fragment(build::ident(self.location(span), path.clone())),
            CspStrategy::Dynamic => {
                let name = self.names.intern(&path.display(self.names));
                self.build(
                    Primitive::QuoteDynamic,
                    span,
                    vec![Rc::clone(expr), self.embed_name(name, span)],
                )
            }
        }
    }
}
