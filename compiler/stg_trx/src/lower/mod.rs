//! Stage-tracked lowering of quoted expressions.
//!
//! `lower(e, n)` takes an expression sitting under `n` quotations and
//! returns an ordinary expression that, when evaluated, builds the
//! representation of `e`. Each node becomes a call to the builder for its
//! kind, so the quotation marker ends up pushed through to the leaves:
//!
//! - literals, globally loadable names and cross-stage values that are
//!   already captured are built now and planted as constants
//! - stage-0 identifiers go through the cross-stage resolver
//! - quoted binders are renamed (see `binders`)
//! - an escape at level 1 is ordinary code again and goes back to the walker

mod binders;

use std::rc::Rc;

use stg_build::{build, Primitive};
use stg_ir::{Expr, ExprKind, Path, RecordField, Span, Ty};
use tracing::trace;

use crate::qualify::{qualify_class, qualify_ctor, qualify_field};
use crate::stack::ensure_sufficient_stack;
use crate::{InternalError, StageError, Trx};

impl Trx<'_> {
    /// Lower `expr`, found under `level` quotations (`level >= 1`).
    pub(crate) fn lower(&mut self, expr: &Rc<Expr>, level: u32) -> Result<Rc<Expr>, StageError> {
        ensure_sufficient_stack(|| self.lower_expr(expr, level))
    }

    /// Main dispatch: one builder call per expression kind.
    #[expect(
        clippy::too_many_lines,
        reason = "exhaustive ExprKind → builder call dispatch"
    )]
    fn lower_expr(&mut self, expr: &Rc<Expr>, level: u32) -> Result<Rc<Expr>, StageError> {
        let span = expr.span;

        match &expr.kind {
            // Leaves
            ExprKind::Ident(path) => self.lower_ident(expr, path),
            ExprKind::Constant(lit) => {
                Ok(self.fragment(build::constant(self.location(span), lit.clone())))
            }
            ExprKind::Csp(value) => {
                Ok(self.fragment(build::csp(self.location(span), value.clone())))
            }
            ExprKind::New(class) => {
                let class = qualify_class(self.names, class)?;
                Ok(self.build(Primitive::New, span, vec![self.embed_path(class, span)]))
            }

            // Binders
            ExprKind::Let {
                rec_flag,
                bindings,
                body,
            } => self.lower_let(*rec_flag, bindings, body, level, span),
            ExprKind::Function { label, cases } => {
                let cases = self.lower_cases(cases, level, span)?;
                Ok(self.build(
                    Primitive::Function,
                    span,
                    vec![self.embed_label(*label, span), cases],
                ))
            }
            ExprKind::Match { scrutinee, cases } => {
                let scrutinee = self.lower(scrutinee, level)?;
                let cases = self.lower_cases(cases, level, span)?;
                Ok(self.build(Primitive::Match, span, vec![scrutinee, cases]))
            }
            ExprKind::Try { body, cases } => {
                let body = self.lower(body, level)?;
                let cases = self.lower_cases(cases, level, span)?;
                Ok(self.build(Primitive::Try, span, vec![body, cases]))
            }
            ExprKind::For {
                var,
                start,
                end,
                direction,
                body,
            } => {
                let start = self.lower(start, level)?;
                let end = self.lower(end, level)?;
                let direction = self.embed_direction(*direction, span);
                self.with_fresh_binders(&[*var], span, |this| {
                    let var = this.bound(this.renamed(*var)?, span);
                    let body = this.lower(body, level)?;
                    Ok(this.build(
                        Primitive::For,
                        span,
                        vec![var, start, end, direction, body],
                    ))
                })
            }

            // Structural forms
            ExprKind::Apply { func, args } => {
                let func = self.lower(func, level)?;
                let mut lowered = Vec::with_capacity(args.len());
                for (label, arg) in args {
                    let label = self.embed_label(*label, arg.span);
                    let arg = self.lower(arg, level)?;
                    lowered.push(self.pair(label, arg, span));
                }
                let elem = Ty::Tuple(vec![
                    self.prims.label_ty.clone(),
                    self.prims.code_ty.clone(),
                ]);
                let args = self.list(lowered, &elem, span);
                Ok(self.build(Primitive::Apply, span, vec![func, args]))
            }
            ExprKind::Tuple(items) => {
                let items = self.lower_list(items, level, span)?;
                Ok(self.build(Primitive::Tuple, span, vec![items]))
            }
            ExprKind::Construct { lid, desc, args } => {
                let ctor = qualify_ctor(self.symbols, self.names, lid, desc)?;
                let explicit_arity = args.len() > 1;
                let args = self.lower_list(args, level, span)?;
                Ok(self.build(
                    Primitive::Construct,
                    span,
                    vec![
                        self.embed_path(ctor, span),
                        args,
                        self.embed_flag(explicit_arity, span),
                    ],
                ))
            }
            ExprKind::Variant { label, arg } => {
                let arg = self.lower_optional(arg.as_ref(), level, span)?;
                Ok(self.build(
                    Primitive::Variant,
                    span,
                    vec![self.embed_name(*label, span), arg],
                ))
            }
            ExprKind::Record { fields, base } => {
                let fields = self.lower_record_fields(fields, level, span)?;
                let base = self.lower_optional(base.as_ref(), level, span)?;
                Ok(self.build(Primitive::Record, span, vec![fields, base]))
            }
            ExprKind::Field { record, lid, desc } => {
                let field = qualify_field(self.symbols, self.names, lid, desc)?;
                let record = self.lower(record, level)?;
                Ok(self.build(
                    Primitive::Field,
                    span,
                    vec![record, self.embed_path(field, span)],
                ))
            }
            ExprKind::SetField {
                record,
                lid,
                desc,
                value,
            } => {
                let field = qualify_field(self.symbols, self.names, lid, desc)?;
                let record = self.lower(record, level)?;
                let value = self.lower(value, level)?;
                Ok(self.build(
                    Primitive::SetField,
                    span,
                    vec![record, self.embed_path(field, span), value],
                ))
            }
            ExprKind::Array(items) => {
                let items = self.lower_list(items, level, span)?;
                Ok(self.build(Primitive::Array, span, vec![items]))
            }
            ExprKind::IfThenElse {
                cond,
                then_branch,
                else_branch,
            } => {
                let cond = self.lower(cond, level)?;
                let then_branch = self.lower(then_branch, level)?;
                let else_branch = self.lower_optional(else_branch.as_ref(), level, span)?;
                Ok(self.build(
                    Primitive::IfThenElse,
                    span,
                    vec![cond, then_branch, else_branch],
                ))
            }
            ExprKind::Sequence(first, second) => {
                let first = self.lower(first, level)?;
                let second = self.lower(second, level)?;
                Ok(self.build(Primitive::Sequence, span, vec![first, second]))
            }
            ExprKind::While { cond, body } => {
                let cond = self.lower(cond, level)?;
                let body = self.lower(body, level)?;
                Ok(self.build(Primitive::While, span, vec![cond, body]))
            }
            ExprKind::Assert(cond) => {
                let cond = self.lower(cond, level)?;
                Ok(self.build(Primitive::Assert, span, vec![cond]))
            }
            ExprKind::Lazy(body) => {
                let body = self.lower(body, level)?;
                Ok(self.build(Primitive::Lazy, span, vec![body]))
            }
            ExprKind::Send { object, method } => {
                let object = self.lower(object, level)?;
                Ok(self.build(
                    Primitive::Send,
                    span,
                    vec![object, self.embed_name(*method, span)],
                ))
            }

            // Staging
            ExprKind::Quote(body) => {
                trace!(level = level + 1, %span, "nested quotation");
                let body = self.lower(body, level + 1)?;
                Ok(self.build(Primitive::Quote, span, vec![body]))
            }
            ExprKind::Escape(body) => match level {
                0 => Err(InternalError::EscapeOutsideQuote.into()),
                1 => {
                    trace!(%span, "escape back to stage 0");
                    Ok(self.walk_expr(body)?.keep(body))
                }
                _ => {
                    let body = self.lower(body, level - 1)?;
                    Ok(self.build(Primitive::Escape, span, vec![body]))
                }
            },
            ExprKind::Run(body) => {
                let body = self.lower(body, level)?;
                Ok(self.build(Primitive::Run, span, vec![body]))
            }

            // No staging semantics
            ExprKind::Object(_) => Err(StageError::NotSupported("Objects")),
            ExprKind::InstVar(_) | ExprKind::SetInstVar { .. } => {
                Err(StageError::NotSupported("Instance variables"))
            }
            ExprKind::LetModule { .. } => Err(StageError::NotSupported("Local modules")),
            ExprKind::Pack(_) => Err(StageError::NotSupported("First-class modules")),
            ExprKind::Embedded(_) => Err(InternalError::FragmentInsideQuote.into()),
        }
    }

    /// Identifier inside a quotation: a stage-0 value crossing into generated
    /// code, or a variable bound by the quotation itself.
    fn lower_ident(&self, expr: &Rc<Expr>, path: &Path) -> Result<Rc<Expr>, StageError> {
        if self.symbols.stage_of(&path.head) == 0 {
            return Ok(self.cross_stage(expr, path));
        }
        if path.is_qualified() {
            return Err(InternalError::UnboundQuotedVariable(path.display(self.names)).into());
        }
        let fresh = self.renamed(path.head)?;
        Ok(self.build(Primitive::Var, expr.span, vec![self.bound(fresh, expr.span)]))
    }

    fn lower_list(
        &mut self,
        items: &[Rc<Expr>],
        level: u32,
        span: Span,
    ) -> Result<Rc<Expr>, StageError> {
        let mut lowered = Vec::with_capacity(items.len());
        for item in items {
            lowered.push(self.lower(item, level)?);
        }
        let elem = self.prims.code_ty.clone();
        Ok(self.list(lowered, &elem, span))
    }

    fn lower_optional(
        &mut self,
        item: Option<&Rc<Expr>>,
        level: u32,
        span: Span,
    ) -> Result<Rc<Expr>, StageError> {
        let lowered = match item {
            Some(item) => Some(self.lower(item, level)?),
            None => None,
        };
        Ok(self.optional(lowered, span))
    }

    fn lower_record_fields(
        &mut self,
        fields: &[RecordField],
        level: u32,
        span: Span,
    ) -> Result<Rc<Expr>, StageError> {
        let mut lowered = Vec::with_capacity(fields.len());
        for field in fields {
            let path = qualify_field(self.symbols, self.names, &field.lid, &field.desc)?;
            let path = self.embed_path(path, field.value.span);
            let value = self.lower(&field.value, level)?;
            lowered.push(self.pair(path, value, field.value.span));
        }
        let elem = Ty::Tuple(vec![self.prims.path_ty.clone(), self.prims.code_ty.clone()]);
        Ok(self.list(lowered, &elem, span))
    }
}
