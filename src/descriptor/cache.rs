use std::sync::Arc;

use crossbeam_skiplist::SkipMap;
use rayon::prelude::*;

use crate::{
    config::DescriptorConfig,
    descriptor::ClassDescriptor,
    host::{ClassId, HostClassRc},
    reflect::Reflector,
    Result,
};

/// Maps host classes to their unique `ClassDescriptor`
///
/// # Storage
///
/// Descriptors live in a lock-free skip list keyed by [`ClassId`]. Reads never take a lock; a
/// miss inserts a fresh, unmaterialized descriptor. Should two threads miss on the same class at
/// once, only one descriptor is published and both callers receive it, so every caller observes
/// the same descriptor (and, once built, the same member table) for a class.
///
/// # Lifetime
///
/// Descriptors hold their class weakly, so the cache never keeps a class alive. Entries of
/// reclaimed classes stay until [`DescriptorCache::purge_unloaded`] drops them; class ids are
/// never reused, so a stale entry can not be mistaken for a newer class.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use classdesc::prelude::*;
///
/// let runtime = HostRuntime::new()?;
/// let loader = runtime.loader("app");
/// let list = ClassBuilder::new("List")
///     .default_constructor()
///     .method("add", |m| m.public().param("Object").returns("boolean"))
///     .method("add", |m| m.public().param("int").param("Object"))
///     .method("of", |m| m.public().static_().returns("List"))
///     .build(&loader)?;
///
/// let cache = DescriptorCache::new(Arc::new(HierarchyReflector::new(runtime.root())));
/// let desc = cache.acquire(&list);
///
/// assert_eq!(desc.lookup_method("add")?.map(MethodDesc::len), Some(2));
/// assert!(desc.lookup_static_method("of")?.is_some());
/// assert!(Arc::ptr_eq(&desc, &cache.acquire(&list)));
/// # Ok::<(), classdesc::Error>(())
/// ```
pub struct DescriptorCache {
    entries: SkipMap<ClassId, Arc<ClassDescriptor>>,
    reflector: Arc<dyn Reflector>,
    config: DescriptorConfig,
}

impl DescriptorCache {
    /// Create an empty cache reflecting through `reflector`
    pub fn new(reflector: Arc<dyn Reflector>) -> Self {
        Self::with_config(reflector, DescriptorConfig::default())
    }

    /// Create an empty cache with a specific configuration
    pub fn with_config(reflector: Arc<dyn Reflector>, config: DescriptorConfig) -> Self {
        DescriptorCache {
            entries: SkipMap::new(),
            reflector,
            config,
        }
    }

    /// The configuration handed to every descriptor of this cache
    #[must_use]
    pub fn config(&self) -> &DescriptorConfig {
        &self.config
    }

    /// The descriptor of `class`, created on first request
    pub fn acquire(&self, class: &HostClassRc) -> Arc<ClassDescriptor> {
        let id = class.id();
        if let Some(entry) = self.entries.get(&id) {
            return entry.value().clone();
        }

        log::trace!("Descriptor cache miss for {} ({})", class.name, id);
        self.entries
            .get_or_insert_with(id, || {
                Arc::new(ClassDescriptor::new(
                    class,
                    self.reflector.clone(),
                    self.config,
                ))
            })
            .value()
            .clone()
    }

    /// The descriptor cached for `id`, without creating one
    #[must_use]
    pub fn get(&self, id: ClassId) -> Option<Arc<ClassDescriptor>> {
        self.entries.get(&id).map(|entry| entry.value().clone())
    }

    /// Acquire the descriptors of `classes` and build their member tables in parallel
    ///
    /// # Errors
    /// Returns the first materialization error encountered. Descriptors that were built before
    /// the failure stay built.
    pub fn prefetch(&self, classes: &[HostClassRc]) -> Result<()> {
        classes
            .par_iter()
            .try_for_each(|class| self.acquire(class).member_table().map(|_| ()))
    }

    /// Drop the entries whose class has been reclaimed, returning how many were dropped
    pub fn purge_unloaded(&self) -> usize {
        let mut purged = 0;
        for entry in self.entries.iter() {
            if !entry.value().is_class_alive() && entry.remove() {
                purged += 1;
            }
        }

        if purged > 0 {
            log::debug!("Purged {} descriptor(s) of unloaded classes", purged);
        }
        purged
    }

    /// Number of cached descriptors
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no descriptor is cached
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for DescriptorCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DescriptorCache")
            .field("entries", &self.entries.len())
            .field("config", &self.config)
            .finish()
    }
}
