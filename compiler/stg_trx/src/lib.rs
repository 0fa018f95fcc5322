//! Staging lowering pass.
//!
//! Rewrites a type-checked compilation unit so that it contains no
//! quotation, escape or run nodes. Each quotation `⟨e⟩` becomes ordinary
//! code that, when evaluated, builds the representation of `e` by calling
//! the builder primitives of `stg_build`; a top-level `run e` becomes a call
//! to the loader's `run_code`.
//!
//! # Pipeline Position
//!
//! ```text
//! Type Check → **Staging lowering** → Code generation
//! ```
//!
//! # Components
//!
//! - [`qualify`]: rewrites constructor, field, exception and class
//!   references inside quotations to globally loadable paths
//! - [`csp`]: decides how a stage-0 identifier is carried into generated code
//! - `lower`: the stage-tracked lowering of a quoted expression
//! - `walk`: the whole-program traversal, sharing every untouched subtree
//! - [`Change`]: the modification signal the traversal is built on
//!
//! # Usage
//!
//! ```text
//! let mut trx = Trx::new(&symbols, &interner, StagingConfig::default());
//! let lowered = trx.structure(&unit)?.keep(&unit);
//! ```

pub mod change;
mod config;
pub mod csp;
mod emit;
mod error;
#[cfg(test)]
mod fixtures;
mod lower;
mod names;
pub mod qualify;
mod stack;
mod trx;
mod walk;

use std::rc::Rc;
use std::sync::Once;

use stg_ir::{Expr, StringInterner, Structure, SymbolTable};

pub use change::Change;
pub use config::StagingConfig;
pub use error::{ErrorCode, InternalError, StageError};
pub use trx::Trx;

/// Lower a whole compilation unit with a fresh context.
///
/// The result shares every item that contains no staging construct with
/// `unit`; when nothing needed lowering it is a cheap copy of `unit`.
pub fn lower_structure(
    unit: &Structure,
    symbols: &SymbolTable,
    interner: &StringInterner,
    config: StagingConfig,
) -> Result<Structure, StageError> {
    let mut trx = Trx::new(symbols, interner, config);
    Ok(trx.structure(unit)?.keep(unit))
}

/// Lower a single expression with a fresh context.
pub fn lower_expression(
    expr: &Rc<Expr>,
    symbols: &SymbolTable,
    interner: &StringInterner,
    config: StagingConfig,
) -> Result<Rc<Expr>, StageError> {
    let mut trx = Trx::new(symbols, interner, config);
    Ok(trx.expression(expr)?.keep(expr))
}

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Call this once at startup. Safe to call multiple times.
/// Enable with `RUST_LOG=stg_trx=debug` or `RUST_LOG=stg_trx=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
