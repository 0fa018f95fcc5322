//! Builder primitives for staged code.
//!
//! The fixed library the generated code calls into, and that the lowering
//! pass also calls directly when a fragment can be built at compile time:
//!
//! - [`build`]: one constructor per representation node kind
//! - [`pattern`]: pattern constructors for binders inside quotations
//! - [`lift`]: literal lifts and the dynamic quoter for captured values
//! - [`Gensym`]: fresh names for binders, minted when generated code runs
//! - [`Primitive`]: the catalogue of entry points, by short name
//!
//! # Pipeline Position
//!
//! ```text
//! Type Check → **Staging lowering** → output tree ─ calls ─→ stg_build
//!                                                       └─→ loader (run_code)
//! ```

pub mod build;
mod gensym;
pub mod lift;
pub mod pattern;
mod primitive;

pub use gensym::Gensym;
pub use primitive::Primitive;
