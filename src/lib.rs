// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![deny(unsafe_code)]

//! # classdesc
//!
//! Per-class method descriptors for a language interop layer running on top of a managed host
//! runtime. A dynamic language calling into host classes asks, by name, which public methods,
//! static methods and constructors a class exposes; `classdesc` answers those questions once per
//! class and serves every later lookup from an immutable, lock-free table.
//!
//! ## Features
//!
//! - **Lazy materialization** - A class's members are enumerated on its first lookup, never before
//! - **At-most-once construction** - Racing first lookups build the member table exactly once
//! - **Overload grouping** - Callables sharing a name come back as one ordered overload set
//! - **Root filtering** - Members declared by the root class (`equals`, `wait`, ...) are hidden
//! - **Unload friendly** - Neither descriptors nor the cache keep a class alive
//!
//! ## Quick Start
//!
//! ```rust
//! use classdesc::prelude::*;
//!
//! let runtime = HostRuntime::new()?;
//! let loader = runtime.loader("app");
//!
//! let greeter = ClassBuilder::new("Greeter")
//!     .default_constructor()
//!     .method("greet", |m| m.public().returns("String"))
//!     .method("greet", |m| m.public().param("String").returns("String"))
//!     .method("create", |m| m.public().static_().returns("Greeter"))
//!     .build(&loader)?;
//!
//! let desc = runtime.descriptors().acquire(&greeter);
//!
//! let greet = desc.lookup_method("greet")?.expect("greet is public");
//! assert!(greet.is_overloaded());
//! assert_eq!(greet.len(), 2);
//!
//! assert!(desc.lookup_static_method("create")?.is_some());
//! assert!(desc.lookup_static_method("greet")?.is_none());
//! assert!(desc.lookup_method("toString")?.is_none());
//! # Ok::<(), classdesc::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`host`] - The in-memory class model: classes, members, modifiers, loaders
//! - [`reflect`] - The [`reflect::Reflector`] seam between the model and the descriptor layer
//! - [`descriptor`] - Descriptors, member tables and the descriptor cache
//! - [`HostRuntime`] - Bootstrap loader, root class and the shared cache in one place
//! - [`Error`] and [`Result`] - Error handling
//!
//! ## Error Handling
//!
//! A lookup of a name the class does not expose is not an error: it yields `Ok(None)`. Errors are
//! reserved for failures to produce a member table at all (the class was unloaded, the reflection
//! facility failed, the hierarchy is deeper than configured) and are reported as [`Error`]. A
//! failed build leaves the descriptor unmaterialized, so the next lookup tries again.
//!
//! ## Logging
//!
//! The crate logs through the `log` facade: cache misses at `trace`, member table builds and
//! cache purges at `debug`. Install any `log` compatible logger to see them.

#[macro_use]
pub(crate) mod error;
pub(crate) mod config;

#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types and traits.
///
/// ```rust
/// use classdesc::prelude::*;
///
/// let runtime = HostRuntime::new()?;
/// let loader = runtime.loader("app");
/// let class = ClassBuilder::new("Empty").build(&loader)?;
/// assert!(runtime.descriptors().acquire(&class).lookup_constructor()?.is_none());
/// # Ok::<(), classdesc::Error>(())
/// ```
pub mod prelude;

/// Descriptors, member tables and the descriptor cache.
pub mod descriptor;

/// In-memory model of the host runtime's classes.
pub mod host;

/// Host reflection facility consumed by the descriptor layer.
pub mod reflect;

mod runtime;

/// `classdesc` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// `classdesc` Error type
///
/// Covers every failure the descriptor layer and the class model can report.
pub use error::Error;

/// Configuration of member table construction.
pub use config::DescriptorConfig;

/// Entry point tying the host model to the descriptor layer.
pub use runtime::{HostRuntime, BOOTSTRAP_LOADER_NAME, ROOT_CLASS_NAME};
