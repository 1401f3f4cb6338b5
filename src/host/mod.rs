//! In-memory model of the host runtime's classes.
//!
//! The descriptor layer reflects over this model: classes with a single-inheritance superclass
//! chain, superinterfaces, and declared methods and constructors carrying JVM-style modifier
//! flags. Classes are defined through a [`ClassLoader`] which owns them; once the loader and all
//! other owners are gone the class is reclaimed.
//!
//! # Key Components
//!
//! - [`HostClass`]: A defined class or interface
//! - [`HostClassRef`]: Weak handle to a class, used wherever holding the class must not keep it
//!   alive
//! - [`HostMethod`] / [`HostConstructor`]: Declared members
//! - [`ClassBuilder`]: Fluent construction and validation of classes
//! - [`ClassLoader`]: Defines and owns classes, with parent-first lookup
//! - [`Modifiers`]: Access and property flags
//!
//! # Ownership
//!
//! A class holds its superclass and superinterfaces strongly; the hierarchy is acyclic so no
//! cycle can form. Members only point back to their declaring class weakly.
//!
//! # Examples
//!
//! ```rust
//! use classdesc::prelude::*;
//!
//! let runtime = HostRuntime::new()?;
//! let loader = runtime.loader("app");
//!
//! let shape = ClassBuilder::new("Shape")
//!     .interface()
//!     .method("area", |m| m.public().abstract_().returns("double"))
//!     .build(&loader)?;
//! let circle = ClassBuilder::new("Circle")
//!     .implements(&shape)
//!     .constructor(|c| c.public().param("double"))
//!     .method("area", |m| m.public().returns("double"))
//!     .build(&loader)?;
//!
//! assert_eq!(circle.superclass().unwrap().id(), runtime.root().id());
//! assert_eq!(circle.interfaces().len(), 1);
//! # Ok::<(), classdesc::Error>(())
//! ```

mod builder;
mod loader;
mod member;
mod modifiers;

use std::{
    fmt,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Weak,
    },
};

pub use builder::{ClassBuilder, ConstructorBuilder, MethodBuilder};
pub use loader::{ClassLoader, LoaderRc};
pub use member::{HostConstructor, HostConstructorRc, HostMethod, HostMethodRc};
pub use modifiers::{Modifiers, ACCESS_MASK};

/// Reference to a `HostClass`
pub type HostClassRc = Arc<HostClass>;

static NEXT_CLASS_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a defined class
///
/// Ids are handed out from a global counter and never reused, so a stale id can not alias a
/// class defined later. Two classes with the same name defined by different loaders have
/// different ids.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClassId(u64);

impl ClassId {
    pub(crate) fn next() -> Self {
        ClassId(NEXT_CLASS_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw id value
    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClassId({})", self.0)
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A class or interface defined in the host runtime
pub struct HostClass {
    id: ClassId,
    /// Class name, unique per defining loader
    pub name: String,
    /// Name of the defining loader
    pub loader: String,
    /// Modifier flags (`INTERFACE`, `ABSTRACT`, `FINAL`, ...)
    pub modifiers: Modifiers,
    superclass: Option<HostClassRc>,
    interfaces: Vec<HostClassRc>,
    methods: Vec<HostMethodRc>,
    constructors: Vec<HostConstructorRc>,
}

impl HostClass {
    /// Identity of this class
    #[must_use]
    pub fn id(&self) -> ClassId {
        self.id
    }

    /// The direct superclass; `None` for the root class and for interfaces
    #[must_use]
    pub fn superclass(&self) -> Option<&HostClassRc> {
        self.superclass.as_ref()
    }

    /// Directly implemented (or, for interfaces, extended) interfaces in declaration order
    #[must_use]
    pub fn interfaces(&self) -> &[HostClassRc] {
        &self.interfaces
    }

    /// Methods declared by this class, in declaration order, regardless of access
    #[must_use]
    pub fn declared_methods(&self) -> &[HostMethodRc] {
        &self.methods
    }

    /// Constructors declared by this class, in declaration order, regardless of access
    #[must_use]
    pub fn declared_constructors(&self) -> &[HostConstructorRc] {
        &self.constructors
    }

    /// Returns `true` if this is an interface
    #[must_use]
    pub fn is_interface(&self) -> bool {
        self.modifiers.is_interface()
    }

    /// Returns `true` if this class is abstract (interfaces always are)
    #[must_use]
    pub fn is_abstract(&self) -> bool {
        self.modifiers.is_abstract() || self.is_interface()
    }

    /// Returns `true` if `self` is `other` or inherits from it, directly or transitively
    #[must_use]
    pub fn is_subtype_of(&self, other: &HostClass) -> bool {
        if self.id == other.id {
            return true;
        }

        if let Some(superclass) = &self.superclass {
            if superclass.is_subtype_of(other) {
                return true;
            }
        }

        self.interfaces
            .iter()
            .any(|interface| interface.is_subtype_of(other))
    }
}

impl PartialEq for HostClass {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for HostClass {}

impl std::hash::Hash for HostClass {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for HostClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl fmt::Debug for HostClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostClass")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("loader", &self.loader)
            .field("modifiers", &self.modifiers)
            .field("methods", &self.methods.len())
            .field("constructors", &self.constructors.len())
            .finish()
    }
}

/// A weak handle to a `HostClass`
///
/// Holding a `HostClassRef` does not keep the class alive. This is what lets descriptors and
/// members point at their class without rooting it.
#[derive(Clone, Debug)]
pub struct HostClassRef {
    weak_ref: Weak<HostClass>,
}

impl HostClassRef {
    /// Create a new `HostClassRef` from a strong reference
    pub fn new(strong_ref: &HostClassRc) -> Self {
        Self {
            weak_ref: Arc::downgrade(strong_ref),
        }
    }

    pub(crate) fn from_weak(weak_ref: Weak<HostClass>) -> Self {
        Self { weak_ref }
    }

    /// Get a strong reference to the class, returning None if the class has been reclaimed
    #[must_use]
    pub fn upgrade(&self) -> Option<HostClassRc> {
        self.weak_ref.upgrade()
    }

    /// Check if the referenced class is still alive
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.weak_ref.strong_count() > 0
    }
}

impl From<&HostClassRc> for HostClassRef {
    fn from(strong_ref: &HostClassRc) -> Self {
        Self::new(strong_ref)
    }
}
