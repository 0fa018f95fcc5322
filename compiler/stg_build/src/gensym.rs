//! Fresh variable names for binders in generated code.

use stg_ir::{BoundName, Name};

/// Counter behind `gensym`.
///
/// Owned by whoever runs generated code; independent runs either use their
/// own `Gensym` or call [`Gensym::reset`] in between.
#[derive(Debug, Default)]
pub struct Gensym {
    counter: u32,
}

impl Gensym {
    pub fn new() -> Self {
        Gensym::default()
    }

    /// A name never returned before by this generator since the last reset.
    pub fn fresh(&mut self, base: Name) -> BoundName {
        self.counter += 1;
        BoundName {
            base,
            stamp: self.counter,
        }
    }

    pub fn reset(&mut self) {
        self.counter = 0;
    }
}
