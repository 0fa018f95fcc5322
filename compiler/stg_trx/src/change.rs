//! Modification signal for structure-sharing traversals.
//!
//! A traversal step answers either [`Change::Unchanged`], meaning the caller
//! keeps the node it already holds, or [`Change::Changed`] with a
//! replacement. The combinators below lift that over containers: a container
//! is rebuilt only when one of its elements changed, and elements before the
//! first change are cloned (cheap `Rc` bumps) only at that point.
//!
//! Each combinator threads a context `cx` through the per-element callback so
//! callers can pass methods like `Self::walk_expr` that need `&mut self`.

/// Outcome of transforming one node.
#[derive(Clone, Debug, PartialEq, Eq)]
#[must_use]
pub enum Change<T> {
    Unchanged,
    Changed(T),
}

impl<T> Change<T> {
    #[inline]
    pub fn is_changed(&self) -> bool {
        matches!(self, Change::Changed(_))
    }

    #[inline]
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Change<U> {
        match self {
            Change::Unchanged => Change::Unchanged,
            Change::Changed(value) => Change::Changed(f(value)),
        }
    }

    /// The replacement, or a clone of `original` if there is none.
    #[inline]
    pub fn keep(self, original: &T) -> T
    where
        T: Clone,
    {
        match self {
            Change::Unchanged => original.clone(),
            Change::Changed(value) => value,
        }
    }

    #[inline]
    pub fn into_option(self) -> Option<T> {
        match self {
            Change::Unchanged => None,
            Change::Changed(value) => Some(value),
        }
    }
}

/// Transform every element; rebuild the list only if some element changed.
pub fn list<C, T, E>(
    cx: &mut C,
    items: &[T],
    mut f: impl FnMut(&mut C, &T) -> Result<Change<T>, E>,
) -> Result<Change<Vec<T>>, E>
where
    T: Clone,
{
    let mut rebuilt: Option<Vec<T>> = None;
    for (i, item) in items.iter().enumerate() {
        match f(cx, item)? {
            Change::Changed(new) => rebuilt
                .get_or_insert_with(|| {
                    let mut out = Vec::with_capacity(items.len());
                    out.extend_from_slice(&items[..i]);
                    out
                })
                .push(new),
            Change::Unchanged => {
                if let Some(out) = &mut rebuilt {
                    out.push(item.clone());
                }
            }
        }
    }
    Ok(rebuilt.map_or(Change::Unchanged, Change::Changed))
}

/// Transform both halves; `Changed` iff either half changed.
pub fn pair<C, A, B, E>(
    cx: &mut C,
    a: &A,
    b: &B,
    fa: impl FnOnce(&mut C, &A) -> Result<Change<A>, E>,
    fb: impl FnOnce(&mut C, &B) -> Result<Change<B>, E>,
) -> Result<Change<(A, B)>, E>
where
    A: Clone,
    B: Clone,
{
    let ca = fa(cx, a)?;
    let cb = fb(cx, b)?;
    if !ca.is_changed() && !cb.is_changed() {
        return Ok(Change::Unchanged);
    }
    Ok(Change::Changed((ca.keep(a), cb.keep(b))))
}

/// Transform the element if present. `None` is always unchanged.
pub fn option<C, T, E>(
    cx: &mut C,
    item: &Option<T>,
    f: impl FnOnce(&mut C, &T) -> Result<Change<T>, E>,
) -> Result<Change<Option<T>>, E> {
    match item {
        None => Ok(Change::Unchanged),
        Some(value) => Ok(f(cx, value)?.map(Some)),
    }
}
