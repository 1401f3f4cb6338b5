//! Class loaders: the namespaces that define and own host classes.
//!
//! A loader keeps a strong reference to every class it defines, so a class lives exactly as
//! long as its defining loader (plus whatever else holds it). Loaders form a tree; lookups by
//! name go parent-first, mirroring the delegation model of the JVM.
//!
//! # Thread Safety
//!
//! The class table is a `DashMap`, so classes can be defined and looked up concurrently.
//! Defining a class is atomic with respect to its name: of two racing definitions of the same
//! name, exactly one succeeds.

use std::sync::{Arc, OnceLock};

use dashmap::{mapref::entry::Entry, DashMap};

use crate::{
    host::{ClassBuilder, HostClassRc, HostClassRef},
    Error, Result,
};

/// Reference to a `ClassLoader`
pub type LoaderRc = Arc<ClassLoader>;

/// Defines classes and owns them for its lifetime
pub struct ClassLoader {
    name: String,
    parent: Option<LoaderRc>,
    classes: DashMap<String, HostClassRc>,
    root: OnceLock<HostClassRef>,
}

impl ClassLoader {
    /// Create a loader without a parent
    ///
    /// Classes built into a parentless loader need an explicit superclass until the loader has
    /// a root class registered; in practice only the runtime's bootstrap loader is created this
    /// way.
    pub fn new(name: impl Into<String>) -> LoaderRc {
        Arc::new(ClassLoader {
            name: name.into(),
            parent: None,
            classes: DashMap::new(),
            root: OnceLock::new(),
        })
    }

    /// Create a loader delegating to `parent`
    pub fn with_parent(name: impl Into<String>, parent: &LoaderRc) -> LoaderRc {
        Arc::new(ClassLoader {
            name: name.into(),
            parent: Some(parent.clone()),
            classes: DashMap::new(),
            root: OnceLock::new(),
        })
    }

    /// Name of this loader
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The parent loader, if any
    #[must_use]
    pub fn parent(&self) -> Option<&LoaderRc> {
        self.parent.as_ref()
    }

    /// The root class visible from this loader (its own, or the nearest ancestor's)
    #[must_use]
    pub fn root_class(&self) -> Option<HostClassRc> {
        match self.root.get().and_then(HostClassRef::upgrade) {
            Some(root) => Some(root),
            None => self.parent.as_ref().and_then(|parent| parent.root_class()),
        }
    }

    /// Build `builder` into this loader, see [`ClassBuilder::build`]
    ///
    /// # Errors
    ///
    /// Returns the builder's validation errors and [`Error::DuplicateClass`].
    pub fn define(&self, builder: ClassBuilder) -> Result<HostClassRc> {
        builder.build(self)
    }

    /// Resolve `name` with parent-first delegation
    #[must_use]
    pub fn find(&self, name: &str) -> Option<HostClassRc> {
        if let Some(parent) = &self.parent {
            if let Some(class) = parent.find(name) {
                return Some(class);
            }
        }

        self.find_local(name)
    }

    /// Resolve `name` among the classes defined by this loader only
    #[must_use]
    pub fn find_local(&self, name: &str) -> Option<HostClassRc> {
        self.classes.get(name).map(|entry| entry.value().clone())
    }

    /// All classes defined by this loader, ordered by definition
    #[must_use]
    pub fn classes(&self) -> Vec<HostClassRc> {
        let mut classes: Vec<HostClassRc> = self
            .classes
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        classes.sort_by_key(|class| class.id());
        classes
    }

    /// Number of classes defined by this loader
    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Returns `true` if this loader defines no classes
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub(crate) fn register(&self, class: &HostClassRc, is_root: bool) -> Result<()> {
        if is_root && self.root.get().is_some() {
            return Err(hierarchy_error!(
                "Loader '{}' already has a root class",
                self.name
            ));
        }

        match self.classes.entry(class.name.clone()) {
            Entry::Occupied(_) => Err(Error::DuplicateClass {
                loader: self.name.clone(),
                name: class.name.clone(),
            }),
            Entry::Vacant(entry) => {
                entry.insert(class.clone());
                if is_root {
                    self.root.set(HostClassRef::new(class)).map_err(|_| {
                        hierarchy_error!("Loader '{}' already has a root class", self.name)
                    })?;
                }
                Ok(())
            }
        }
    }
}

impl std::fmt::Debug for ClassLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassLoader")
            .field("name", &self.name)
            .field("parent", &self.parent.as_ref().map(|p| p.name.clone()))
            .field("classes", &self.classes.len())
            .finish()
    }
}
