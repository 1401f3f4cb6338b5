//! Modifier sets for host classes and members.
//!
//! The values mirror the access flags of the JVM class file format, so a modifier set
//! read from a real class file can be carried over with [`Modifiers::from_bits_truncate`].
//! Some bits carry a different meaning depending on the kind of member they are attached to
//! (`0x0040` is `volatile` on fields and `bridge` on methods); only the method/class readings
//! are named here.

use bitflags::bitflags;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    /// Modifier flags of a class, method or constructor
    pub struct Modifiers: u16 {
        /// Accessible from everywhere
        const PUBLIC = 0x0001;
        /// Accessible only inside the declaring class
        const PRIVATE = 0x0002;
        /// Accessible inside the package and from subclasses
        const PROTECTED = 0x0004;
        /// Not bound to an instance
        const STATIC = 0x0008;
        /// Cannot be overridden / subclassed
        const FINAL = 0x0010;
        /// Invocation takes the receiver's monitor
        const SYNCHRONIZED = 0x0020;
        /// Compiler generated bridge method
        const BRIDGE = 0x0040;
        /// Last parameter is a variable arity array
        const VARARGS = 0x0080;
        /// Implemented outside of the host's bytecode
        const NATIVE = 0x0100;
        /// The class is an interface
        const INTERFACE = 0x0200;
        /// No implementation / not instantiable
        const ABSTRACT = 0x0400;
        /// Strict floating point semantics
        const STRICT = 0x0800;
        /// Not present in source code
        const SYNTHETIC = 0x1000;
    }
}

/// Bitmask for access level extraction
pub const ACCESS_MASK: u16 = 0x0007;

impl Modifiers {
    /// Returns `true` if the `PUBLIC` flag is set
    #[must_use]
    pub fn is_public(self) -> bool {
        self.contains(Modifiers::PUBLIC)
    }

    /// Returns `true` if the `STATIC` flag is set
    #[must_use]
    pub fn is_static(self) -> bool {
        self.contains(Modifiers::STATIC)
    }

    /// Returns `true` if the `ABSTRACT` flag is set
    #[must_use]
    pub fn is_abstract(self) -> bool {
        self.contains(Modifiers::ABSTRACT)
    }

    /// Returns `true` if the `INTERFACE` flag is set
    #[must_use]
    pub fn is_interface(self) -> bool {
        self.contains(Modifiers::INTERFACE)
    }

    /// Returns `true` for compiler generated members (`BRIDGE` or `SYNTHETIC`)
    #[must_use]
    pub fn is_synthetic(self) -> bool {
        self.intersects(Modifiers::BRIDGE | Modifiers::SYNTHETIC)
    }

    /// Replace the access level with `access`, keeping every other flag
    #[must_use]
    pub fn with_access(self, access: Modifiers) -> Modifiers {
        (self - Self::from_bits_truncate(ACCESS_MASK)) | access.access()
    }

    /// Extract the access level (public, private, protected or package-private if empty)
    #[must_use]
    pub fn access(self) -> Modifiers {
        Self::from_bits_truncate(self.bits() & ACCESS_MASK)
    }
}
