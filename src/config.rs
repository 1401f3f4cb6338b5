//! Descriptor configuration
//!
//! This module provides the knobs that shape how member tables are built. The defaults
//! reproduce the plain reflection view: every public method that is not declared on the root
//! class shows up, duplicates and bridge methods included.

/// Configuration for member table construction and hierarchy walks
///
/// The defaults keep the descriptor layer a faithful mirror of what the reflection facility
/// reports; overload disambiguation and filtering is left to the invoker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DescriptorConfig {
    /// Drop an overload whose parameter types and static-ness match one already present
    /// under the same name (duplicate handles, covariant bridge methods)
    pub deduplicate_overloads: bool,

    /// Maximum depth of superclass/superinterface chains walked while enumerating inherited
    /// methods (default: 64)
    pub max_hierarchy_depth: usize,
}

impl Default for DescriptorConfig {
    fn default() -> Self {
        Self {
            deduplicate_overloads: false,
            max_hierarchy_depth: 64,
        }
    }
}

impl DescriptorConfig {
    /// Creates a configuration that collapses duplicate overloads
    ///
    /// Identical to [`DescriptorConfig::default`] except that overloads sharing a parameter
    /// type sequence are folded into the first one discovered.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            deduplicate_overloads: true,
            ..Self::default()
        }
    }

    /// Overrides the maximum hierarchy depth
    #[must_use]
    pub fn with_max_hierarchy_depth(mut self, depth: usize) -> Self {
        self.max_hierarchy_depth = depth;
        self
    }
}
