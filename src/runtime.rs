//! The host runtime: bootstrap loader, root class and the shared descriptor cache.

use std::sync::Arc;

use crate::{
    config::DescriptorConfig,
    descriptor::{ClassDescriptor, DescriptorCache},
    host::{ClassBuilder, ClassLoader, HostClassRc, LoaderRc, Modifiers},
    reflect::HierarchyReflector,
    Result,
};

/// Name of the class every non-interface class ultimately extends
pub const ROOT_CLASS_NAME: &str = "Object";

/// Name of the loader defining the root class
pub const BOOTSTRAP_LOADER_NAME: &str = "bootstrap";

/// Entry point tying the host model to the descriptor layer
///
/// A runtime owns the bootstrap loader with its root class, and one [`DescriptorCache`] whose
/// reflector hides the members of that root class. Application loaders created through
/// [`HostRuntime::loader`] delegate to the bootstrap loader but are owned by the caller: once the
/// caller drops a loader and its classes, those classes are reclaimed even though the runtime's
/// cache described them.
///
/// # Examples
///
/// ```rust
/// use classdesc::prelude::*;
///
/// let runtime = HostRuntime::new()?;
/// assert_eq!(runtime.root().name, "Object");
///
/// let loader = runtime.loader("app");
/// let point = ClassBuilder::new("Point")
///     .default_constructor()
///     .method("x", |m| m.public().returns("int"))
///     .build(&loader)?;
///
/// assert!(point.is_subtype_of(runtime.root()));
/// assert!(runtime.describe(&point).lookup_method("x")?.is_some());
/// # Ok::<(), classdesc::Error>(())
/// ```
pub struct HostRuntime {
    bootstrap: LoaderRc,
    root: HostClassRc,
    descriptors: DescriptorCache,
}

impl HostRuntime {
    /// Boot a runtime with the default descriptor configuration
    ///
    /// # Errors
    /// Returns an error if the root class can not be defined, which only happens for a broken
    /// bootstrap class set.
    pub fn new() -> Result<Self> {
        Self::with_config(DescriptorConfig::default())
    }

    /// Boot a runtime with a specific descriptor configuration
    ///
    /// # Errors
    /// See [`HostRuntime::new`].
    pub fn with_config(config: DescriptorConfig) -> Result<Self> {
        let bootstrap = ClassLoader::new(BOOTSTRAP_LOADER_NAME);
        let root = root_class().build(&bootstrap)?;

        let reflector = Arc::new(HierarchyReflector::with_config(&root, config));
        let descriptors = DescriptorCache::with_config(reflector, config);

        log::debug!(
            "Booted host runtime, root class {} ({})",
            root.name,
            root.id()
        );

        Ok(HostRuntime {
            bootstrap,
            root,
            descriptors,
        })
    }

    /// The root class
    #[must_use]
    pub fn root(&self) -> &HostClassRc {
        &self.root
    }

    /// The loader defining the root class
    #[must_use]
    pub fn bootstrap(&self) -> &LoaderRc {
        &self.bootstrap
    }

    /// Create an application loader delegating to the bootstrap loader
    ///
    /// The runtime does not keep the returned loader.
    pub fn loader(&self, name: impl Into<String>) -> LoaderRc {
        ClassLoader::with_parent(name, &self.bootstrap)
    }

    /// The shared descriptor cache
    #[must_use]
    pub fn descriptors(&self) -> &DescriptorCache {
        &self.descriptors
    }

    /// Shorthand for acquiring the descriptor of `class` from the shared cache
    pub fn describe(&self, class: &HostClassRc) -> Arc<ClassDescriptor> {
        self.descriptors.acquire(class)
    }
}

impl std::fmt::Debug for HostRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostRuntime")
            .field("bootstrap", &self.bootstrap.name())
            .field("root", &self.root.id())
            .field("descriptors", &self.descriptors)
            .finish()
    }
}

/// The root class with the members every object carries
fn root_class() -> ClassBuilder {
    ClassBuilder::new(ROOT_CLASS_NAME)
        .root()
        .default_constructor()
        .method("getClass", |m| {
            m.public().final_().modifiers(Modifiers::NATIVE).returns("Class")
        })
        .method("hashCode", |m| m.public().modifiers(Modifiers::NATIVE).returns("int"))
        .method("equals", |m| m.public().param(ROOT_CLASS_NAME).returns("boolean"))
        .method("clone", |m| {
            m.protected().modifiers(Modifiers::NATIVE).returns(ROOT_CLASS_NAME)
        })
        .method("toString", |m| m.public().returns("String"))
        .method("notify", |m| m.public().final_().modifiers(Modifiers::NATIVE))
        .method("notifyAll", |m| m.public().final_().modifiers(Modifiers::NATIVE))
        .method("wait", |m| m.public().final_())
        .method("wait", |m| m.public().final_().param("long"))
        .method("wait", |m| m.public().final_().param("long").param("int"))
        .method("finalize", |m| m.protected())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflect::Reflector;

    #[test]
    fn test_root_class() {
        let runtime = HostRuntime::new().unwrap();
        let root = runtime.root();

        assert_eq!(root.name, ROOT_CLASS_NAME);
        assert_eq!(root.loader, BOOTSTRAP_LOADER_NAME);
        assert!(root.superclass().is_none());
        assert_eq!(root.declared_methods().len(), 11);
        assert_eq!(root.declared_constructors().len(), 1);

        let found = runtime.bootstrap().find(ROOT_CLASS_NAME).unwrap();
        assert_eq!(found.id(), root.id());
        assert_eq!(runtime.bootstrap().root_class().unwrap().id(), root.id());
    }

    #[test]
    fn test_protected_root_members_hidden() {
        let runtime = HostRuntime::new().unwrap();
        let reflector = HierarchyReflector::new(runtime.root());

        let methods = reflector.public_methods(runtime.root()).unwrap();
        assert_eq!(methods.len(), 9);
        assert!(!methods.iter().any(|m| m.name == "clone" || m.name == "finalize"));
    }

    #[test]
    fn test_loaders_not_retained() {
        let runtime = HostRuntime::new().unwrap();
        let loader = runtime.loader("app");
        let weak = Arc::downgrade(&loader);

        assert_eq!(loader.parent().unwrap().name(), BOOTSTRAP_LOADER_NAME);
        assert_eq!(loader.root_class().unwrap().id(), runtime.root().id());

        drop(loader);
        assert!(weak.upgrade().is_none());
    }

    #[test]
    fn test_independent_runtimes() {
        let first = HostRuntime::new().unwrap();
        let second = HostRuntime::new().unwrap();
        assert_ne!(first.root().id(), second.root().id());
    }

    #[test]
    fn test_describe_uses_shared_cache() {
        let runtime = HostRuntime::new().unwrap();
        let loader = runtime.loader("app");
        let class = ClassBuilder::new("Thing").build(&loader).unwrap();

        let desc = runtime.describe(&class);
        assert!(Arc::ptr_eq(&desc, &runtime.descriptors().acquire(&class)));
    }
}
