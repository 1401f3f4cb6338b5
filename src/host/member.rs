//! Methods and constructors declared by host classes.
//!
//! Members keep a weak reference to their declaring class, next to the class's [`ClassId`].
//! The id is what the descriptor layer compares against when filtering root-declared members;
//! the weak reference is only needed to navigate back to the class itself.

use std::{fmt, sync::Arc};

use crate::host::{ClassId, HostClassRc, HostClassRef, Modifiers};

/// Reference to a `HostMethod`
pub type HostMethodRc = Arc<HostMethod>;
/// Reference to a `HostConstructor`
pub type HostConstructorRc = Arc<HostConstructor>;

/// A method declared by a host class
pub struct HostMethod {
    /// Simple declared name
    pub name: String,
    /// Parameter type names, in declaration order
    pub parameter_types: Vec<String>,
    /// Return type name (`void` for none)
    pub return_type: String,
    /// Modifier flags
    pub modifiers: Modifiers,
    /// Id of the declaring class
    pub declaring_id: ClassId,
    /// Name of the declaring class
    pub declaring_name: String,
    declaring: HostClassRef,
}

impl HostMethod {
    pub(crate) fn new(
        name: String,
        parameter_types: Vec<String>,
        return_type: String,
        modifiers: Modifiers,
        declaring: HostClassRef,
        declaring_id: ClassId,
        declaring_name: String,
    ) -> Self {
        HostMethod {
            name,
            parameter_types,
            return_type,
            modifiers,
            declaring_id,
            declaring_name,
            declaring,
        }
    }

    /// The class declaring this method, if it is still alive
    #[must_use]
    pub fn declaring_class(&self) -> Option<HostClassRc> {
        self.declaring.upgrade()
    }

    /// Returns `true` if the method is public
    #[must_use]
    pub fn is_public(&self) -> bool {
        self.modifiers.is_public()
    }

    /// Returns `true` if the method is static
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.modifiers.is_static()
    }

    /// Returns `true` if `other` has the same name and parameter types
    ///
    /// This is the override relation of the host: return types do not take part, so a
    /// covariant override matches the method it overrides.
    #[must_use]
    pub fn same_signature(&self, other: &HostMethod) -> bool {
        self.name == other.name && self.parameter_types == other.parameter_types
    }
}

impl fmt::Display for HostMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}.{}({})",
            self.return_type,
            self.declaring_name,
            self.name,
            self.parameter_types.join(",")
        )
    }
}

impl fmt::Debug for HostMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostMethod")
            .field("signature", &format_args!("{self}"))
            .field("modifiers", &self.modifiers)
            .field("declaring_id", &self.declaring_id)
            .finish()
    }
}

/// A constructor declared by a host class
pub struct HostConstructor {
    /// Parameter type names, in declaration order
    pub parameter_types: Vec<String>,
    /// Modifier flags
    pub modifiers: Modifiers,
    /// Id of the declaring class
    pub declaring_id: ClassId,
    /// Name of the declaring class
    pub declaring_name: String,
    declaring: HostClassRef,
}

impl HostConstructor {
    pub(crate) fn new(
        parameter_types: Vec<String>,
        modifiers: Modifiers,
        declaring: HostClassRef,
        declaring_id: ClassId,
        declaring_name: String,
    ) -> Self {
        HostConstructor {
            parameter_types,
            modifiers,
            declaring_id,
            declaring_name,
            declaring,
        }
    }

    /// The class declaring this constructor, if it is still alive
    #[must_use]
    pub fn declaring_class(&self) -> Option<HostClassRc> {
        self.declaring.upgrade()
    }

    /// Returns `true` if the constructor is public
    #[must_use]
    pub fn is_public(&self) -> bool {
        self.modifiers.is_public()
    }
}

impl fmt::Display for HostConstructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({})",
            self.declaring_name,
            self.parameter_types.join(",")
        )
    }
}

impl fmt::Debug for HostConstructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostConstructor")
            .field("signature", &format_args!("{self}"))
            .field("modifiers", &self.modifiers)
            .field("declaring_id", &self.declaring_id)
            .finish()
    }
}
