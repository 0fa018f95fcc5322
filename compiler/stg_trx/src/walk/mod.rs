//! Whole-program traversal with structural sharing.
//!
//! Walks stage-0 code looking for quotations and top-level `run`. Every
//! step answers [`Change`]: a node is rebuilt only when one of its children
//! changed, so a subtree without staging constructs comes back as the very
//! same `Rc` it went in as.

mod structure;

use std::rc::Rc;

use stg_build::Primitive;
use stg_ir::{Case, Expr, ExprKind, RecordField, ValueBinding};
use tracing::trace;

use crate::change::{self, Change};
use crate::stack::ensure_sufficient_stack;
use crate::{InternalError, StageError, Trx};

type Walked<T> = Result<Change<T>, StageError>;

impl Trx<'_> {
    /// Walk a stage-0 expression.
    pub(crate) fn walk_expr(&mut self, expr: &Rc<Expr>) -> Walked<Rc<Expr>> {
        ensure_sufficient_stack(|| self.walk_expr_kind(expr))
    }

    #[expect(
        clippy::too_many_lines,
        reason = "exhaustive ExprKind traversal"
    )]
    fn walk_expr_kind(&mut self, expr: &Rc<Expr>) -> Walked<Rc<Expr>> {
        let kind = match &expr.kind {
            ExprKind::Quote(body) => {
                trace!(span = %expr.span, "lowering quotation");
                let lowered = self.lower(body, 1)?;
                let mut node = Rc::unwrap_or_clone(lowered);
                node.span = expr.span;
                node.ty = expr.ty.clone();
                return Ok(Change::Changed(Rc::new(node)));
            }
            ExprKind::Run(body) => {
                let body = self.walk_expr(body)?.keep(body);
                return Ok(Change::Changed(self.call_typed(
                    Primitive::RunCode,
                    expr.span,
                    vec![body],
                    expr.ty.clone(),
                )));
            }
            ExprKind::Escape(_) => return Err(InternalError::EscapeOutsideQuote.into()),

            ExprKind::Ident(_)
            | ExprKind::Constant(_)
            | ExprKind::New(_)
            | ExprKind::InstVar(_)
            | ExprKind::Csp(_)
            | ExprKind::Embedded(_) => Change::Unchanged,

            ExprKind::Let {
                rec_flag,
                bindings,
                body,
            } => {
                let new_bindings = change::list(self, bindings, Self::walk_binding)?;
                let new_body = self.walk_expr(body)?;
                if !new_bindings.is_changed() && !new_body.is_changed() {
                    return Ok(Change::Unchanged);
                }
                Change::Changed(ExprKind::Let {
                    rec_flag: *rec_flag,
                    bindings: new_bindings.keep(bindings),
                    body: new_body.keep(body),
                })
            }
            ExprKind::Function { label, cases } => change::list(self, cases, Self::walk_case)?
                .map(|cases| ExprKind::Function {
                    label: *label,
                    cases,
                }),
            ExprKind::Apply { func, args } => change::pair(
                self,
                func,
                args,
                Self::walk_expr,
                |cx, args| {
                    change::list(cx, args, |cx, (label, arg)| {
                        Ok(cx.walk_expr(arg)?.map(|arg| (*label, arg)))
                    })
                },
            )?
            .map(|(func, args)| ExprKind::Apply { func, args }),
            ExprKind::Match { scrutinee, cases } => {
                change::pair(self, scrutinee, cases, Self::walk_expr, |cx, cases| {
                    change::list(cx, cases, Self::walk_case)
                })?
                .map(|(scrutinee, cases)| ExprKind::Match { scrutinee, cases })
            }
            ExprKind::Try { body, cases } => {
                change::pair(self, body, cases, Self::walk_expr, |cx, cases| {
                    change::list(cx, cases, Self::walk_case)
                })?
                .map(|(body, cases)| ExprKind::Try { body, cases })
            }
            ExprKind::Tuple(items) => self.walk_exprs(items)?.map(ExprKind::Tuple),
            ExprKind::Array(items) => self.walk_exprs(items)?.map(ExprKind::Array),
            ExprKind::Construct { lid, desc, args } => {
                self.walk_exprs(args)?.map(|args| ExprKind::Construct {
                    lid: lid.clone(),
                    desc: desc.clone(),
                    args,
                })
            }
            ExprKind::Variant { label, arg } => change::option(self, arg, Self::walk_expr)?
                .map(|arg| ExprKind::Variant { label: *label, arg }),
            ExprKind::Record { fields, base } => change::pair(
                self,
                fields,
                base,
                |cx, fields| change::list(cx, fields, Self::walk_record_field),
                |cx, base| change::option(cx, base, Self::walk_expr),
            )?
            .map(|(fields, base)| ExprKind::Record { fields, base }),
            ExprKind::Field { record, lid, desc } => {
                self.walk_expr(record)?.map(|record| ExprKind::Field {
                    record,
                    lid: lid.clone(),
                    desc: desc.clone(),
                })
            }
            ExprKind::SetField {
                record,
                lid,
                desc,
                value,
            } => change::pair(self, record, value, Self::walk_expr, Self::walk_expr)?.map(
                |(record, value)| ExprKind::SetField {
                    record,
                    lid: lid.clone(),
                    desc: desc.clone(),
                    value,
                },
            ),
            ExprKind::IfThenElse {
                cond,
                then_branch,
                else_branch,
            } => {
                let new_cond = self.walk_expr(cond)?;
                let new_then = self.walk_expr(then_branch)?;
                let new_else = change::option(self, else_branch, Self::walk_expr)?;
                if !new_cond.is_changed() && !new_then.is_changed() && !new_else.is_changed() {
                    return Ok(Change::Unchanged);
                }
                Change::Changed(ExprKind::IfThenElse {
                    cond: new_cond.keep(cond),
                    then_branch: new_then.keep(then_branch),
                    else_branch: new_else.keep(else_branch),
                })
            }
            ExprKind::Sequence(first, second) => {
                change::pair(self, first, second, Self::walk_expr, Self::walk_expr)?
                    .map(|(first, second)| ExprKind::Sequence(first, second))
            }
            ExprKind::While { cond, body } => {
                change::pair(self, cond, body, Self::walk_expr, Self::walk_expr)?
                    .map(|(cond, body)| ExprKind::While { cond, body })
            }
            ExprKind::For {
                var,
                start,
                end,
                direction,
                body,
            } => {
                let new_start = self.walk_expr(start)?;
                let new_end = self.walk_expr(end)?;
                let new_body = self.walk_expr(body)?;
                if !new_start.is_changed() && !new_end.is_changed() && !new_body.is_changed() {
                    return Ok(Change::Unchanged);
                }
                Change::Changed(ExprKind::For {
                    var: *var,
                    start: new_start.keep(start),
                    end: new_end.keep(end),
                    direction: *direction,
                    body: new_body.keep(body),
                })
            }
            ExprKind::Assert(cond) => self.walk_expr(cond)?.map(ExprKind::Assert),
            ExprKind::Lazy(body) => self.walk_expr(body)?.map(ExprKind::Lazy),
            ExprKind::Send { object, method } => {
                self.walk_expr(object)?.map(|object| ExprKind::Send {
                    object,
                    method: *method,
                })
            }
            ExprKind::Object(body) => self.walk_class_body(body)?.map(ExprKind::Object),
            ExprKind::SetInstVar { var, value } => {
                self.walk_expr(value)?.map(|value| ExprKind::SetInstVar { var: *var, value })
            }
            ExprKind::LetModule { name, module, body } => {
                change::pair(self, module, body, Self::walk_module, Self::walk_expr)?.map(
                    |(module, body)| ExprKind::LetModule {
                        name: *name,
                        module,
                        body,
                    },
                )
            }
            ExprKind::Pack(module) => self.walk_module(module)?.map(ExprKind::Pack),
        };
        Ok(kind.map(|kind| Expr::rc(kind, expr.span, expr.ty.clone())))
    }

    fn walk_exprs(&mut self, items: &[Rc<Expr>]) -> Walked<Vec<Rc<Expr>>> {
        change::list(self, items, Self::walk_expr)
    }

    fn walk_binding(&mut self, binding: &ValueBinding) -> Walked<ValueBinding> {
        Ok(self.walk_expr(&binding.expr)?.map(|expr| ValueBinding {
            pattern: binding.pattern.clone(),
            expr,
        }))
    }

    fn walk_case(&mut self, case: &Case) -> Walked<Case> {
        Ok(change::pair(
            self,
            &case.guard,
            &case.body,
            |cx, guard| change::option(cx, guard, Self::walk_expr),
            Self::walk_expr,
        )?
        .map(|(guard, body)| Case {
            pattern: case.pattern.clone(),
            guard,
            body,
        }))
    }

    fn walk_record_field(&mut self, field: &RecordField) -> Walked<RecordField> {
        Ok(self.walk_expr(&field.value)?.map(|value| RecordField {
            lid: field.lid.clone(),
            desc: field.desc.clone(),
            value,
        }))
    }
}
