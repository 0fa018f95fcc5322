//! The pass context.

use std::rc::Rc;

use rustc_hash::FxHashMap;
use stg_ir::{Expr, Ident, StringInterner, Structure, SymbolTable};
use tracing::debug;

use crate::change::Change;
use crate::emit::Primitives;
use crate::names::NameSupply;
use crate::{StageError, StagingConfig};

/// State for lowering the quotations of one compilation unit.
///
/// Borrows the checker's symbol table and interner. Owns the fresh-name
/// supply, which keeps counting across calls until [`Trx::reset`].
pub struct Trx<'a> {
    pub(crate) symbols: &'a SymbolTable,
    pub(crate) names: &'a StringInterner,
    pub(crate) config: StagingConfig,
    pub(crate) prims: Primitives,
    pub(crate) supply: NameSupply,
    /// Quoted binders in scope, mapped to the compile-time variable that
    /// holds their generated name.
    pub(crate) renames: FxHashMap<Ident, Ident>,
}

impl<'a> Trx<'a> {
    pub fn new(
        symbols: &'a SymbolTable,
        names: &'a StringInterner,
        config: StagingConfig,
    ) -> Self {
        let prims = Primitives::new(names, &config.primitives_module);
        Trx {
            symbols,
            names,
            prims,
            supply: NameSupply::starting_at(symbols.next_stamp()),
            renames: FxHashMap::default(),
            config,
        }
    }

    pub fn config(&self) -> &StagingConfig {
        &self.config
    }

    /// Lower every quotation in a compilation unit.
    ///
    /// Returns `Unchanged` when the unit contains no quotation or top-level
    /// run, in which case the caller keeps its tree.
    #[tracing::instrument(level = "debug", skip_all, fields(items = structure.items.len()))]
    pub fn structure(&mut self, structure: &Structure) -> Result<Change<Structure>, StageError> {
        let result = self.walk_structure(structure)?;
        debug!(
            changed = result.is_changed(),
            fresh_names = self.supply.issued(),
            "lowered structure"
        );
        Ok(result)
    }

    /// Lower every quotation in a single expression.
    #[tracing::instrument(level = "debug", skip_all, fields(span = %expr.span))]
    pub fn expression(&mut self, expr: &Rc<Expr>) -> Result<Change<Rc<Expr>>, StageError> {
        let result = self.walk_expr(expr)?;
        debug!(changed = result.is_changed(), "lowered expression");
        Ok(result)
    }

    /// Forget all per-run state. The next run numbers fresh identifiers
    /// from the start again.
    pub fn reset(&mut self) {
        self.supply.reset();
        self.renames.clear();
    }
}
