//! Constants, run-time values and cross-stage persistent payloads.

use std::fmt;
use std::rc::Rc;

use crate::{Name, Span};

/// Literal constant, shared by the typed tree and the representation tree.
///
/// Floats are stored as their IEEE-754 bits so literals stay `Eq + Hash`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Lit {
    Int(i64),
    Char(char),
    Bool(bool),
    Float(u64),
    Str(Rc<str>),
}

impl Lit {
    pub fn float(value: f64) -> Self {
        Lit::Float(value.to_bits())
    }

    pub fn str(value: &str) -> Self {
        Lit::Str(Rc::from(value))
    }
}

/// A value as the generated code sees it when it runs.
///
/// The dynamic quoter receives values in this tagged form from the host
/// instead of inspecting raw memory, so every shape it distinguishes is a
/// variant here.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum RuntimeValue {
    Int(i64),
    Float(u64),
    Str(Rc<str>),
    /// Anything else, carried by reference without interpretation.
    Opaque(Rc<[u8]>),
}

impl RuntimeValue {
    pub fn float(value: f64) -> Self {
        RuntimeValue::Float(value.to_bits())
    }

    pub fn opaque(bytes: &[u8]) -> Self {
        RuntimeValue::Opaque(Rc::from(bytes))
    }
}

impl fmt::Debug for RuntimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeValue::Int(v) => write!(f, "Int({v})"),
            RuntimeValue::Float(bits) => write!(f, "Float({})", f64::from_bits(*bits)),
            RuntimeValue::Str(s) => write!(f, "Str({s:?})"),
            RuntimeValue::Opaque(bytes) => write!(f, "Opaque({} bytes)", bytes.len()),
        }
    }
}

/// A value carried from an earlier stage into generated code.
///
/// `name` and `span` only feed diagnostics. Equality compares the payload
/// too, but resolution never goes through the name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CspValue {
    pub payload: RuntimeValue,
    pub name: Name,
    pub span: Span,
}

impl CspValue {
    pub fn new(payload: RuntimeValue, name: Name, span: Span) -> Self {
        CspValue {
            payload,
            name,
            span,
        }
    }
}

/// A variable name minted when generated code runs.
///
/// Binders inside quotations are renamed to these so that splicing never
/// captures a variable by accident.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct BoundName {
    pub base: Name,
    pub stamp: u32,
}
