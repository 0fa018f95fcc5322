//! Binders inside quotations.
//!
//! A variable bound by quoted code (`fun x -> ...`, `let x = ...`, a match
//! arm, a `for` index) must not capture anything spliced into its scope, so
//! it gets a fresh name each time the quotation is built. The output binds a
//! compile-time variable `x'` to `gensym "x"` around the builder call, and
//! every quoted occurrence of `x` becomes `build_var(loc, x')`.

use std::rc::Rc;

use stg_build::Primitive;
use stg_ir::{Case, Expr, ExprKind, Ident, Pattern, PatternKind, RecFlag, Span, Ty, ValueBinding};
use tracing::trace;

use crate::qualify::qualify_ctor;
use crate::{InternalError, StageError, Trx};

impl Trx<'_> {
    /// The compile-time variable standing for the quoted binder `ident`.
    pub(super) fn renamed(&self, ident: Ident) -> Result<Ident, StageError> {
        self.renames.get(&ident).copied().ok_or_else(|| {
            InternalError::UnboundQuotedVariable(self.names.lookup(ident.name).to_owned()).into()
        })
    }

    /// Lower `f` with `binders` renamed, then wrap its result in the `gensym`
    /// bindings for them. Earlier renamings are restored afterwards, on
    /// success and on error alike.
    pub(super) fn with_fresh_binders(
        &mut self,
        binders: &[Ident],
        span: Span,
        f: impl FnOnce(&mut Self) -> Result<Rc<Expr>, StageError>,
    ) -> Result<Rc<Expr>, StageError> {
        let fresh: Vec<(Ident, Ident)> = binders
            .iter()
            .map(|&binder| (binder, self.supply.fresh(binder)))
            .collect();
        let shadowed: Vec<Option<Ident>> = fresh
            .iter()
            .map(|&(binder, new)| self.renames.insert(binder, new))
            .collect();
        if !fresh.is_empty() {
            trace!(count = fresh.len(), %span, "renamed quoted binders");
        }

        let result = f(self);

        for (&(binder, _), previous) in fresh.iter().zip(shadowed).rev() {
            match previous {
                Some(previous) => {
                    self.renames.insert(binder, previous);
                }
                None => {
                    self.renames.remove(&binder);
                }
            }
        }

        let body = result?;
        Ok(fresh.iter().rev().fold(body, |body, &(binder, new)| {
            self.bind_gensym(new, binder.name, body, span)
        }))
    }

    /// Pattern-building expression. Every variable in the pattern must
    /// already be renamed.
    pub(super) fn lower_pattern(&self, pattern: &Pattern) -> Result<Rc<Expr>, StageError> {
        let span = pattern.span;
        match &pattern.kind {
            PatternKind::Any => Ok(self.build(Primitive::PatAny, span, Vec::new())),
            PatternKind::Var(ident) => {
                let fresh = self.renamed(*ident)?;
                Ok(self.build(Primitive::PatVar, span, vec![self.bound(fresh, span)]))
            }
            PatternKind::Constant(lit) => {
                let lit = Expr::rc(ExprKind::Constant(lit.clone()), span, pattern.ty.clone());
                Ok(self.build(Primitive::PatConstant, span, vec![lit]))
            }
            PatternKind::Tuple(items) => {
                let items = self.lower_patterns(items, span)?;
                Ok(self.build(Primitive::PatTuple, span, vec![items]))
            }
            PatternKind::Construct { lid, desc, args } => {
                let ctor = qualify_ctor(self.symbols, self.names, lid, desc)?;
                let args = self.lower_patterns(args, span)?;
                Ok(self.build(
                    Primitive::PatConstruct,
                    span,
                    vec![self.embed_path(ctor, span), args],
                ))
            }
            PatternKind::Variant { label, arg } => {
                let arg = match arg {
                    Some(arg) => Some(self.lower_pattern(arg)?),
                    None => None,
                };
                Ok(self.build(
                    Primitive::PatVariant,
                    span,
                    vec![self.embed_name(*label, span), self.optional(arg, span)],
                ))
            }
            PatternKind::Alias { pattern, ident } => {
                let inner = self.lower_pattern(pattern)?;
                let fresh = self.renamed(*ident)?;
                Ok(self.build(
                    Primitive::PatAlias,
                    span,
                    vec![inner, self.bound(fresh, span)],
                ))
            }
            PatternKind::Or(left, right) => {
                let left = self.lower_pattern(left)?;
                let right = self.lower_pattern(right)?;
                Ok(self.build(Primitive::PatOr, span, vec![left, right]))
            }
        }
    }

    fn lower_patterns(&self, items: &[Pattern], span: Span) -> Result<Rc<Expr>, StageError> {
        let lowered = items
            .iter()
            .map(|item| self.lower_pattern(item))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.list(lowered, &self.prims.pattern_ty, span))
    }

    /// Arms of a `function`, `match` or `try`, each with its own renaming
    /// scope covering pattern, guard and body.
    pub(super) fn lower_cases(
        &mut self,
        cases: &[Case],
        level: u32,
        span: Span,
    ) -> Result<Rc<Expr>, StageError> {
        let mut lowered = Vec::with_capacity(cases.len());
        for case in cases {
            let binders = case.pattern.binders();
            let arm = self.with_fresh_binders(&binders, case.pattern.span, |this| {
                let pattern = this.lower_pattern(&case.pattern)?;
                let guard = match &case.guard {
                    Some(guard) => Some(this.lower(guard, level)?),
                    None => None,
                };
                let guard = this.optional(guard, case.body.span);
                let body = this.lower(&case.body, level)?;
                Ok(this.call(Primitive::Case, case.body.span, vec![pattern, guard, body]))
            })?;
            lowered.push(arm);
        }
        let elem = self.prims.case_ty.clone();
        Ok(self.list(lowered, &elem, span))
    }

    /// `let [rec] p1 = e1 and ... in body`. All binders of all bindings are
    /// renamed once, around the whole `build_let` call.
    pub(super) fn lower_let(
        &mut self,
        rec_flag: RecFlag,
        bindings: &[ValueBinding],
        body: &Rc<Expr>,
        level: u32,
        span: Span,
    ) -> Result<Rc<Expr>, StageError> {
        let binders: Vec<Ident> = bindings
            .iter()
            .flat_map(|binding| binding.pattern.binders())
            .collect();
        self.with_fresh_binders(&binders, span, |this| {
            let mut lowered = Vec::with_capacity(bindings.len());
            for binding in bindings {
                let pattern = this.lower_pattern(&binding.pattern)?;
                let value = this.lower(&binding.expr, level)?;
                lowered.push(this.pair(pattern, value, binding.expr.span));
            }
            let elem = Ty::Tuple(vec![
                this.prims.pattern_ty.clone(),
                this.prims.code_ty.clone(),
            ]);
            let bindings = this.list(lowered, &elem, span);
            let body = this.lower(body, level)?;
            Ok(this.build(
                Primitive::Let,
                span,
                vec![this.embed_rec_flag(rec_flag, span), bindings, body],
            ))
        })
    }
}
