use thiserror::Error;

use crate::host::ClassId;

macro_rules! hierarchy_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::InvalidHierarchy {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::InvalidHierarchy {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// Absence is never an error in this crate: a lookup for a method the class does not expose
/// returns `Ok(None)`. The variants below cover the cases where a descriptor could not be
/// produced at all.
///
/// # Error Categories
///
/// ## Class Model Errors
/// - [`Error::InvalidHierarchy`] - A class definition violates the host's hierarchy rules
/// - [`Error::DuplicateClass`] - A loader already defines a class with that name
///
/// ## Reflection Errors
/// - [`Error::ClassUnloaded`] - The class was reclaimed before its members were materialized
/// - [`Error::RecursionLimit`] - The hierarchy walk exceeded the configured depth
/// - [`Error::Reflection`] - The host reflection facility reported a failure
///
/// ## Descriptor Errors
/// - [`Error::Empty`] - An overload set was constructed without any overloads
///
/// # Examples
///
/// ```rust
/// use classdesc::{prelude::*, Error};
///
/// let runtime = HostRuntime::new()?;
/// let loader = runtime.loader("app");
/// let point = ClassBuilder::new("Point").default_constructor().build(&loader)?;
///
/// match runtime.descriptors().acquire(&point).lookup_constructor() {
///     Ok(Some(ctor)) => println!("{} overload(s)", ctor.len()),
///     Ok(None) => println!("no public constructor"),
///     Err(Error::ClassUnloaded(id)) => eprintln!("class {} is gone", id),
///     Err(e) => eprintln!("reflection failed: {}", e),
/// }
/// # Ok::<(), classdesc::Error>(())
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// A class definition violates the host's hierarchy rules.
    ///
    /// Raised by the class builders, e.g. when a class extends an interface, implements a
    /// non-interface, or an interface declares a constructor. The error carries the source
    /// location where the violation was detected.
    ///
    /// # Fields
    ///
    /// * `message` - Description of the violated rule
    /// * `file` - Source file where the error was detected
    /// * `line` - Source line where the error was detected
    #[error("Invalid hierarchy - {file}:{line}: {message}")]
    InvalidHierarchy {
        /// The message to be printed for the `InvalidHierarchy` error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// A class with this name is already defined by the loader.
    #[error("Loader '{loader}' already defines class '{name}'")]
    DuplicateClass {
        /// Name of the defining loader
        loader: String,
        /// Name of the conflicting class
        name: String,
    },

    /// The class behind a descriptor has been reclaimed.
    ///
    /// Descriptors only hold a weak handle to their class. Once the defining loader and every
    /// other owner dropped the class, a descriptor whose members were never materialized can
    /// no longer produce them.
    #[error("Class {0} has been unloaded")]
    ClassUnloaded(ClassId),

    /// Walking the class hierarchy exceeded the configured depth.
    ///
    /// The associated value is the limit that was hit, see
    /// [`crate::DescriptorConfig::max_hierarchy_depth`].
    #[error("Reached the maximum hierarchy depth allowed - {0}")]
    RecursionLimit(usize),

    /// The host reflection facility failed to enumerate members.
    ///
    /// Propagated unchanged through the descriptor layer. The descriptor stays
    /// unmaterialized, so the next lookup retries.
    #[error("Reflection failed - {0}")]
    Reflection(String),

    /// An overload set was created from an empty list.
    #[error("Provided overload list was empty")]
    Empty,
}
