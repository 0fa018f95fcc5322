//! Pass configuration.

/// Settings for one run of the staging pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StagingConfig {
    /// Persistent module the builder primitives are loaded from.
    pub primitives_module: String,
    /// Record source locations in generated code. When off, every emitted
    /// location is the dummy span.
    pub keep_locations: bool,
}

impl StagingConfig {
    #[must_use]
    pub fn with_primitives_module(mut self, module: impl Into<String>) -> Self {
        self.primitives_module = module.into();
        self
    }

    #[must_use]
    pub fn with_locations(mut self, keep: bool) -> Self {
        self.keep_locations = keep;
        self
    }
}

impl Default for StagingConfig {
    fn default() -> Self {
        StagingConfig {
            primitives_module: "Trx".to_owned(),
            keep_locations: true,
        }
    }
}
