//! Per-class method descriptors and the cache handing them out.
//!
//! This module is the interop-facing half of the crate. Given a host class it answers three
//! questions by name: which public methods are called `name`, which of those are static, and
//! which public constructors exist. The answers are computed once per class and then served
//! without locking.
//!
//! # Architecture
//!
//! - [`DescriptorCache`] - maps each class to exactly one [`ClassDescriptor`], never keeping the
//!   class alive
//! - [`ClassDescriptor`] - answers lookups, materializing its [`MemberTable`] on first use
//! - [`MemberTable`] - the immutable name index built from the reflection facility
//! - [`MethodDesc`] - what a lookup returns: a [`SingleMethodDesc`] for one callable or an
//!   [`OverloadedMethodDesc`] for several
//!
//! # Grouping Rule
//!
//! Callables sharing a name are merged in enumeration order. Merging into a single descriptor
//! yields an overloaded one holding both; merging into an overloaded one appends. Methods declared
//! by the root class are skipped, overrides of them are kept.
//!
//! # Examples
//!
//! ```rust
//! use classdesc::prelude::*;
//!
//! let runtime = HostRuntime::new()?;
//! let loader = runtime.loader("app");
//! let shape = ClassBuilder::new("Shape")
//!     .default_constructor()
//!     .constructor(|c| c.public().param("String"))
//!     .method("area", |m| m.public().returns("double"))
//!     .build(&loader)?;
//!
//! let desc = runtime.descriptors().acquire(&shape);
//! let ctor = desc.lookup_constructor()?.expect("public constructors");
//! assert!(ctor.is_overloaded());
//!
//! let area = desc.lookup_method("area")?.and_then(MethodDesc::as_single);
//! assert_eq!(area.map(SingleMethodDesc::name), Some("area"));
//!
//! // Declared by the root class only
//! assert!(desc.lookup_method("hashCode")?.is_none());
//! # Ok::<(), classdesc::Error>(())
//! ```

mod cache;
mod class;
mod members;
mod method;

pub use cache::DescriptorCache;
pub use class::ClassDescriptor;
pub use members::MemberTable;
pub use method::{Callable, CallableKind, MethodDesc, OverloadedMethodDesc, SingleMethodDesc};
