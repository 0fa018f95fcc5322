//! Errors raised while lowering quotations.
//!
//! Every error is fatal for the unit being processed: the pass stops at the
//! first one and never returns a partially lowered tree.

use std::fmt;

use stg_ir::EntityKind;

/// Stable codes for staging diagnostics.
///
/// Format: E#### where the first digit indicates the kind:
/// - E7xxx: staging errors in user code
/// - E9xxx: internal errors (a defect upstream of this pass)
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    /// Entity defined in the current unit used inside a quotation
    E7001,
    /// Construct with no staging semantics inside a quotation
    E7002,
    /// Internal invariant violated
    E9001,
}

impl ErrorCode {
    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorCode::E7001 => "E7001",
            ErrorCode::E7002 => "E7002",
            ErrorCode::E9001 => "E9001",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StageError {
    #[error(
        "{kind} {entity} cannot be used within quotations: it is defined in the unit being \
         compiled. Move its definition to a separately compiled file"
    )]
    NotQuotable { entity: String, kind: EntityKind },

    #[error("{0} are not supported within quotations")]
    NotSupported(&'static str),

    #[error("internal staging error: {0}")]
    Internal(#[from] InternalError),
}

impl StageError {
    pub fn code(&self) -> ErrorCode {
        match self {
            StageError::NotQuotable { .. } => ErrorCode::E7001,
            StageError::NotSupported(_) => ErrorCode::E7002,
            StageError::Internal(_) => ErrorCode::E9001,
        }
    }

    /// Whether the error points at a defect upstream rather than at the
    /// user's program.
    pub fn is_internal(&self) -> bool {
        matches!(self, StageError::Internal(_))
    }
}

/// Invariant violations that a correct type checker never lets through.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InternalError {
    #[error("escape outside of any quotation")]
    EscapeOutsideQuote,

    #[error("cannot determine the type that owns `{0}`")]
    NoOwningType(String),

    #[error("quoted variable `{0}` has no renamed binding in scope")]
    UnboundQuotedVariable(String),

    #[error("code fragment produced by this pass found inside a quotation")]
    FragmentInsideQuote,
}
