//! Host reflection facility consumed by the descriptor layer.
//!
//! The descriptor layer never walks a class hierarchy itself. Everything it needs from the host
//! runtime goes through the [`Reflector`] trait:
//!
//! - enumeration of public methods, inherited ones included
//! - enumeration of public constructors
//! - the identity of the root class whose declared methods are hidden
//! - the factory turning a method or constructor handle into a [`SingleMethodDesc`]
//!
//! [`HierarchyReflector`] implements the trait over the in-memory [`crate::host`] model. Other
//! implementations can wrap it to add access policies, failure injection or instrumentation.
//!
//! # Examples
//!
//! ```rust
//! use classdesc::prelude::*;
//!
//! let runtime = HostRuntime::new()?;
//! let loader = runtime.loader("app");
//! let base = ClassBuilder::new("Base")
//!     .method("describe", |m| m.public().returns("String"))
//!     .build(&loader)?;
//! let derived = ClassBuilder::new("Derived")
//!     .extends(&base)
//!     .method("describe", |m| m.public().returns("String"))
//!     .build(&loader)?;
//!
//! let reflector = HierarchyReflector::new(runtime.root());
//! let methods = reflector.public_methods(&derived)?;
//!
//! // The override hides the inherited declaration
//! let describe: Vec<_> = methods.iter().filter(|m| m.name == "describe").collect();
//! assert_eq!(describe.len(), 1);
//! assert_eq!(describe[0].declaring_id, derived.id());
//! # Ok::<(), classdesc::Error>(())
//! ```

mod hierarchy;

pub use hierarchy::HierarchyReflector;

use crate::{
    descriptor::SingleMethodDesc,
    host::{ClassId, HostClass, HostConstructorRc, HostMethodRc},
    Result,
};

/// Reflective access to the members of host classes
///
/// Implementations must be deterministic for a given class: the descriptor layer preserves the
/// enumeration order as the overload order, and rebuilding a member table is expected to yield
/// the same buckets.
pub trait Reflector: Send + Sync {
    /// Identity of the root class; methods and constructors it declares are never exposed
    fn root_class_id(&self) -> ClassId;

    /// Public methods of `class`, including the ones inherited from superclasses and
    /// superinterfaces
    ///
    /// # Errors
    ///
    /// Implementation specific; propagated unchanged by the descriptor layer.
    fn public_methods(&self, class: &HostClass) -> Result<Vec<HostMethodRc>>;

    /// Public constructors declared by `class`
    ///
    /// # Errors
    ///
    /// Implementation specific; propagated unchanged by the descriptor layer.
    fn public_constructors(&self, class: &HostClass) -> Result<Vec<HostConstructorRc>>;

    /// Wrap a method handle into a descriptor
    fn unreflect_method(&self, method: &HostMethodRc) -> SingleMethodDesc {
        SingleMethodDesc::method(method.clone())
    }

    /// Wrap a constructor handle into a descriptor
    fn unreflect_constructor(&self, constructor: &HostConstructorRc) -> SingleMethodDesc {
        SingleMethodDesc::constructor(constructor.clone())
    }
}
