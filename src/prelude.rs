//! # classdesc Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and traits
//! from the classdesc library. Import it to define host classes and look up their descriptors
//! without spelling out module paths.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all classdesc operations
pub use crate::Error;

/// The result type used throughout classdesc
pub use crate::Result;

/// Configuration for member table construction
pub use crate::DescriptorConfig;

// ================================================================================================
// Main Entry Points
// ================================================================================================

/// Bootstrap loader, root class and shared descriptor cache
pub use crate::HostRuntime;

// ================================================================================================
// Host Class Model
// ================================================================================================

/// Classes and their handles
pub use crate::host::{ClassId, HostClass, HostClassRc, HostClassRef};

/// Declared members
pub use crate::host::{HostConstructor, HostConstructorRc, HostMethod, HostMethodRc};

/// Class definition
pub use crate::host::{ClassBuilder, ClassLoader, ConstructorBuilder, LoaderRc, MethodBuilder};

/// Modifier flags
pub use crate::host::Modifiers;

// ================================================================================================
// Reflection
// ================================================================================================

/// The reflection seam and its hierarchy walking implementation
pub use crate::reflect::{HierarchyReflector, Reflector};

// ================================================================================================
// Descriptors
// ================================================================================================

/// Per-class descriptors and their cache
pub use crate::descriptor::{ClassDescriptor, DescriptorCache, MemberTable};

/// Lookup results
pub use crate::descriptor::{
    Callable, CallableKind, MethodDesc, OverloadedMethodDesc, SingleMethodDesc,
};
