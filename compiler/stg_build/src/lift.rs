//! Turning live values into code.
//!
//! The literal lifts are what generated code calls for a captured variable of
//! a liftable type: they run when the quotation is built and produce a plain
//! constant node holding the value. `quote_dynamic` is the fallback for every
//! other captured variable; it decides by the value's shape at that point.

use stg_ir::{Code, CspValue, Lit, Name, RuntimeValue, Span};

use crate::build;

pub fn lift_int(span: Span, value: i64) -> Code {
    build::constant(span, Lit::Int(value))
}

pub fn lift_char(span: Span, value: char) -> Code {
    build::constant(span, Lit::Char(value))
}

pub fn lift_bool(span: Span, value: bool) -> Code {
    build::constant(span, Lit::Bool(value))
}

/// Quote a captured value of statically unknown shape.
///
/// Floats and strings become literal nodes; anything else is embedded as an
/// opaque cross-stage value that keeps `name` for diagnostics.
pub fn quote_dynamic(span: Span, value: RuntimeValue, name: Name) -> Code {
    match value {
        RuntimeValue::Float(bits) => build::constant(span, Lit::Float(bits)),
        RuntimeValue::Str(s) => build::constant(span, Lit::Str(s)),
        payload @ (RuntimeValue::Int(_) | RuntimeValue::Opaque(_)) => {
            tracing::trace!(?payload, "embedding opaque cross-stage value");
            build::csp(span, CspValue::new(payload, name, span))
        }
    }
}
