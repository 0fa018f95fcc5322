//! Stack growth for the recursive lowering and walking passes.
//!
//! Quotations nest arbitrarily and every level recurses through both the
//! walker and the lowerer, so each recursive entry point runs inside
//! [`ensure_sufficient_stack`].
//!
//! - **Red zone**: 100KB. Below this much remaining stack we grow.
//! - **Growth size**: 1MB per segment.
//! - **WASM**: plain call, the runtime manages its own stack.

const RED_ZONE: usize = 100 * 1024;

const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, first growing the stack if less than the red zone remains.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
