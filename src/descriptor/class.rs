use std::{
    fmt,
    hash::{Hash, Hasher},
    sync::{Arc, Mutex, OnceLock, PoisonError},
};

use crate::{
    config::DescriptorConfig,
    descriptor::{MemberTable, MethodDesc},
    host::{ClassId, HostClassRc, HostClassRef},
    reflect::Reflector,
    Error, Result,
};

/// Per-class façade answering name lookups for the interop layer
///
/// A descriptor starts out holding nothing but a weak handle to its class. The first lookup
/// materializes the [`MemberTable`]; every later lookup reads it without locking.
///
/// # Thread Safety
///
/// Materialization happens at most once. Threads racing on the first lookup of the same
/// descriptor serialize on a lock private to that descriptor; lookups on other descriptors never
/// wait on it. The table is published through a `OnceLock`, so a reader that sees it sees it
/// fully built.
///
/// # Failure
///
/// If building the table fails the error is returned as is and the slot stays empty. The next
/// lookup builds from scratch.
pub struct ClassDescriptor {
    id: ClassId,
    name: String,
    class: HostClassRef,
    reflector: Arc<dyn Reflector>,
    config: DescriptorConfig,
    members: OnceLock<MemberTable>,
    init: Mutex<()>,
}

impl ClassDescriptor {
    /// Create an unmaterialized descriptor for `class`, only ever called by the owning cache
    pub(crate) fn new(
        class: &HostClassRc,
        reflector: Arc<dyn Reflector>,
        config: DescriptorConfig,
    ) -> Self {
        ClassDescriptor {
            id: class.id(),
            name: class.name.clone(),
            class: HostClassRef::new(class),
            reflector,
            config,
            members: OnceLock::new(),
            init: Mutex::new(()),
        }
    }

    /// Identity of the described class
    #[must_use]
    pub fn class_id(&self) -> ClassId {
        self.id
    }

    /// Name of the described class
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The described class, unless it has been reclaimed
    #[must_use]
    pub fn class_handle(&self) -> Option<HostClassRc> {
        self.class.upgrade()
    }

    /// Returns `true` while the described class has not been reclaimed
    #[must_use]
    pub fn is_class_alive(&self) -> bool {
        self.class.is_valid()
    }

    /// Returns `true` once the member table has been built
    #[must_use]
    pub fn is_materialized(&self) -> bool {
        self.members.get().is_some()
    }

    /// Look up the public method(s) named `name`, static ones included
    ///
    /// # Errors
    /// Can only fail while the member table is not built yet, see
    /// [`ClassDescriptor::member_table`].
    pub fn lookup_method(&self, name: &str) -> Result<Option<&MethodDesc>> {
        Ok(self.member_table()?.method(name))
    }

    /// Look up the public static method(s) named `name`
    ///
    /// # Errors
    /// See [`ClassDescriptor::member_table`].
    pub fn lookup_static_method(&self, name: &str) -> Result<Option<&MethodDesc>> {
        Ok(self.member_table()?.static_method(name))
    }

    /// Look up the public constructor(s)
    ///
    /// # Errors
    /// See [`ClassDescriptor::member_table`].
    pub fn lookup_constructor(&self) -> Result<Option<&MethodDesc>> {
        Ok(self.member_table()?.constructor())
    }

    /// The member table, built on first use
    ///
    /// # Errors
    /// Returns [`Error::ClassUnloaded`] if the class was reclaimed before the table was built,
    /// and propagates any error of the reflection facility.
    pub fn member_table(&self) -> Result<&MemberTable> {
        if let Some(members) = self.members.get() {
            return Ok(members);
        }

        // Guards no data, a panic during a previous build leaves nothing to repair
        let _guard = self.init.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(members) = self.members.get() {
            return Ok(members);
        }

        let class = self.class.upgrade().ok_or(Error::ClassUnloaded(self.id))?;
        let members = MemberTable::build(&class, self.reflector.as_ref(), &self.config)?;
        Ok(self.members.get_or_init(|| members))
    }
}

impl PartialEq for ClassDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ClassDescriptor {}

impl Hash for ClassDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for ClassDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HostClass[{}]", self.name)
    }
}

impl fmt::Debug for ClassDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassDescriptor")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("materialized", &self.is_materialized())
            .finish()
    }
}
