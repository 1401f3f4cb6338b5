//! Method descriptors: a single callable or an ordered overload set.
//!
//! [`MethodDesc`] is what every lookup hands to the invoker. A name bound to exactly one
//! callable yields [`MethodDesc::Single`]; a name shared by several yields
//! [`MethodDesc::Overloaded`] holding them in discovery order. Once a bucket is overloaded it
//! stays overloaded.
//!
//! Descriptors are immutable and cheap to clone: a single is one `Arc`, an overload set is one
//! `Arc` of a dense slice.

use std::{fmt, slice, sync::Arc};

use strum::{AsRefStr, Display};

use crate::{
    host::{ClassId, HostConstructorRc, HostMethodRc},
    Error, Result,
};

/// The kind of callable wrapped by a `SingleMethodDesc`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum CallableKind {
    /// A method
    Method,
    /// A constructor
    Constructor,
}

/// Handle to the host callable behind a descriptor
#[derive(Clone)]
pub enum Callable {
    /// A host method
    Method(HostMethodRc),
    /// A host constructor
    Constructor(HostConstructorRc),
}

impl Callable {
    /// What kind of callable this is
    #[must_use]
    pub fn kind(&self) -> CallableKind {
        match self {
            Callable::Method(_) => CallableKind::Method,
            Callable::Constructor(_) => CallableKind::Constructor,
        }
    }
}

impl PartialEq for Callable {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Callable::Method(a), Callable::Method(b)) => Arc::ptr_eq(a, b),
            (Callable::Constructor(a), Callable::Constructor(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Eq for Callable {}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Callable::Method(method) => write!(f, "Method({method})"),
            Callable::Constructor(constructor) => write!(f, "Constructor({constructor})"),
        }
    }
}

/// Descriptor of exactly one host method or constructor
///
/// Equality is identity of the underlying handle: two descriptors are equal only if they wrap
/// the very same method or constructor.
#[derive(Clone, PartialEq, Eq)]
pub struct SingleMethodDesc {
    callable: Callable,
}

impl SingleMethodDesc {
    /// Wrap a host method
    #[must_use]
    pub fn method(method: HostMethodRc) -> Self {
        SingleMethodDesc {
            callable: Callable::Method(method),
        }
    }

    /// Wrap a host constructor
    #[must_use]
    pub fn constructor(constructor: HostConstructorRc) -> Self {
        SingleMethodDesc {
            callable: Callable::Constructor(constructor),
        }
    }

    /// The wrapped host callable
    #[must_use]
    pub fn callable(&self) -> &Callable {
        &self.callable
    }

    /// Simple name; constructors are named `<init>`
    #[must_use]
    pub fn name(&self) -> &str {
        match &self.callable {
            Callable::Method(method) => &method.name,
            Callable::Constructor(_) => "<init>",
        }
    }

    /// Parameter type names in declaration order
    #[must_use]
    pub fn parameter_types(&self) -> &[String] {
        match &self.callable {
            Callable::Method(method) => &method.parameter_types,
            Callable::Constructor(constructor) => &constructor.parameter_types,
        }
    }

    /// Id of the declaring class
    #[must_use]
    pub fn declaring_id(&self) -> ClassId {
        match &self.callable {
            Callable::Method(method) => method.declaring_id,
            Callable::Constructor(constructor) => constructor.declaring_id,
        }
    }

    /// Returns `true` for static methods (constructors are not static)
    #[must_use]
    pub fn is_static(&self) -> bool {
        match &self.callable {
            Callable::Method(method) => method.is_static(),
            Callable::Constructor(_) => false,
        }
    }

    /// Returns `true` if this wraps a constructor
    #[must_use]
    pub fn is_constructor(&self) -> bool {
        self.callable.kind() == CallableKind::Constructor
    }

    /// Returns `true` if `other` could not be told apart by argument types
    ///
    /// Same kind, same static-ness and the same parameter type sequence.
    #[must_use]
    pub fn same_shape(&self, other: &SingleMethodDesc) -> bool {
        self.callable.kind() == other.callable.kind()
            && self.is_static() == other.is_static()
            && self.parameter_types() == other.parameter_types()
    }
}

impl fmt::Display for SingleMethodDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.callable {
            Callable::Method(method) => write!(f, "{} {}", self.callable.kind(), method),
            Callable::Constructor(constructor) => {
                write!(f, "{} {}", self.callable.kind(), constructor)
            }
        }
    }
}

impl fmt::Debug for SingleMethodDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SingleMethodDesc")
            .field(&self.callable)
            .finish()
    }
}

/// An ordered, non-empty set of callables sharing one name
#[derive(Clone, PartialEq, Eq)]
pub struct OverloadedMethodDesc {
    overloads: Arc<[SingleMethodDesc]>,
}

impl OverloadedMethodDesc {
    /// Create an overload set
    ///
    /// ## Arguments
    /// * 'overloads' - The callables, in the order they should be presented to the invoker
    ///
    /// # Errors
    /// Returns [`Error::Empty`] if `overloads` is empty.
    pub fn new(overloads: Vec<SingleMethodDesc>) -> Result<Self> {
        if overloads.is_empty() {
            return Err(Error::Empty);
        }

        Ok(OverloadedMethodDesc {
            overloads: overloads.into(),
        })
    }

    /// The overloads in discovery order
    #[must_use]
    pub fn overloads(&self) -> &[SingleMethodDesc] {
        &self.overloads
    }

    /// A new overload set with `overload` appended
    #[must_use]
    pub fn with(&self, overload: SingleMethodDesc) -> Self {
        let mut overloads = Vec::with_capacity(self.overloads.len() + 1);
        overloads.extend(self.overloads.iter().cloned());
        overloads.push(overload);

        OverloadedMethodDesc {
            overloads: overloads.into(),
        }
    }
}

impl fmt::Debug for OverloadedMethodDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.overloads.iter()).finish()
    }
}

/// Descriptor handed to the invoker for one name
#[derive(Clone, PartialEq, Eq)]
pub enum MethodDesc {
    /// Exactly one callable carries this name
    Single(SingleMethodDesc),
    /// Several callables carry this name; the invoker picks one by argument types
    Overloaded(OverloadedMethodDesc),
}

impl MethodDesc {
    /// Fold `other` into this descriptor
    ///
    /// A single becomes an overload set `[self, other]`; an overload set gets `other` appended.
    /// The result is never a single again.
    #[must_use]
    pub fn merge(self, other: SingleMethodDesc) -> MethodDesc {
        match self {
            MethodDesc::Single(existing) => MethodDesc::Overloaded(OverloadedMethodDesc {
                overloads: vec![existing, other].into(),
            }),
            MethodDesc::Overloaded(existing) => MethodDesc::Overloaded(existing.with(other)),
        }
    }

    /// The callables behind this descriptor, in discovery order
    #[must_use]
    pub fn overloads(&self) -> &[SingleMethodDesc] {
        match self {
            MethodDesc::Single(single) => slice::from_ref(single),
            MethodDesc::Overloaded(overloaded) => overloaded.overloads(),
        }
    }

    /// Simple name shared by all overloads
    #[must_use]
    pub fn name(&self) -> &str {
        self.overloads()[0].name()
    }

    /// Number of callables
    #[must_use]
    pub fn len(&self) -> usize {
        self.overloads().len()
    }

    /// Always `false`: a descriptor carries at least one callable
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns `true` for the `Overloaded` variant
    #[must_use]
    pub fn is_overloaded(&self) -> bool {
        matches!(self, MethodDesc::Overloaded(_))
    }

    /// The single callable, if this is not an overload set
    #[must_use]
    pub fn as_single(&self) -> Option<&SingleMethodDesc> {
        match self {
            MethodDesc::Single(single) => Some(single),
            MethodDesc::Overloaded(_) => None,
        }
    }

    /// Returns `true` if `single` is one of the callables
    #[must_use]
    pub fn contains(&self, single: &SingleMethodDesc) -> bool {
        self.overloads().contains(single)
    }
}

impl From<SingleMethodDesc> for MethodDesc {
    fn from(single: SingleMethodDesc) -> Self {
        MethodDesc::Single(single)
    }
}

impl From<OverloadedMethodDesc> for MethodDesc {
    fn from(overloaded: OverloadedMethodDesc) -> Self {
        MethodDesc::Overloaded(overloaded)
    }
}

impl fmt::Debug for MethodDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MethodDesc::Single(single) => fmt::Debug::fmt(single, f),
            MethodDesc::Overloaded(overloaded) => {
                f.debug_tuple("Overloaded").field(overloaded).finish()
            }
        }
    }
}
