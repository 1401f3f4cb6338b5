//! Fluent builders for host classes.
//!
//! [`ClassBuilder`] collects the shape of a class and validates it against the host's hierarchy
//! rules when [`ClassBuilder::build`] registers it with a [`ClassLoader`]. Members are described
//! through closures receiving a [`MethodBuilder`] or [`ConstructorBuilder`], so a class reads
//! top to bottom like its source declaration.
//!
//! # Examples
//!
//! ```rust
//! use classdesc::prelude::*;
//!
//! let runtime = HostRuntime::new()?;
//! let loader = runtime.loader("app");
//!
//! // public class Counter {
//! //     public Counter() {}
//! //     public Counter(int start) {}
//! //     public void add(int n) {}
//! //     public void add(long n) {}
//! //     public static Counter zero() {}
//! // }
//! let counter = ClassBuilder::new("Counter")
//!     .default_constructor()
//!     .constructor(|c| c.public().param("int"))
//!     .method("add", |m| m.public().param("int"))
//!     .method("add", |m| m.public().param("long"))
//!     .method("zero", |m| m.public().static_().returns("Counter"))
//!     .build(&loader)?;
//!
//! assert_eq!(counter.declared_methods().len(), 3);
//! assert_eq!(counter.declared_constructors().len(), 2);
//! # Ok::<(), classdesc::Error>(())
//! ```

use std::sync::Arc;

use crate::{
    host::{
        ClassId, ClassLoader, HostClass, HostClassRc, HostClassRef, HostConstructor, HostMethod,
        Modifiers,
    },
    Result,
};

/// Describes one method while its class is being built
#[derive(Debug, Clone)]
pub struct MethodBuilder {
    name: String,
    parameter_types: Vec<String>,
    return_type: String,
    modifiers: Modifiers,
}

impl MethodBuilder {
    /// Start a package-private instance method returning `void`
    pub fn new(name: impl Into<String>) -> Self {
        MethodBuilder {
            name: name.into(),
            parameter_types: Vec::new(),
            return_type: "void".to_string(),
            modifiers: Modifiers::empty(),
        }
    }

    /// Mark the method `public`
    #[must_use]
    pub fn public(mut self) -> Self {
        self.modifiers = self.modifiers.with_access(Modifiers::PUBLIC);
        self
    }

    /// Mark the method `protected`
    #[must_use]
    pub fn protected(mut self) -> Self {
        self.modifiers = self.modifiers.with_access(Modifiers::PROTECTED);
        self
    }

    /// Mark the method `private`
    #[must_use]
    pub fn private(mut self) -> Self {
        self.modifiers = self.modifiers.with_access(Modifiers::PRIVATE);
        self
    }

    /// Mark the method `static`
    #[must_use]
    pub fn static_(mut self) -> Self {
        self.modifiers |= Modifiers::STATIC;
        self
    }

    /// Mark the method `final`
    #[must_use]
    pub fn final_(mut self) -> Self {
        self.modifiers |= Modifiers::FINAL;
        self
    }

    /// Mark the method `abstract`
    #[must_use]
    pub fn abstract_(mut self) -> Self {
        self.modifiers |= Modifiers::ABSTRACT;
        self
    }

    /// Mark the method as a compiler generated bridge
    #[must_use]
    pub fn bridge(mut self) -> Self {
        self.modifiers |= Modifiers::BRIDGE | Modifiers::SYNTHETIC;
        self
    }

    /// Add arbitrary modifier flags
    #[must_use]
    pub fn modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers |= modifiers;
        self
    }

    /// Append a parameter type
    #[must_use]
    pub fn param(mut self, type_name: impl Into<String>) -> Self {
        self.parameter_types.push(type_name.into());
        self
    }

    /// Set the return type
    #[must_use]
    pub fn returns(mut self, type_name: impl Into<String>) -> Self {
        self.return_type = type_name.into();
        self
    }

    fn finish(
        self,
        declaring: &HostClassRef,
        declaring_id: ClassId,
        declaring_name: &str,
    ) -> HostMethod {
        HostMethod::new(
            self.name,
            self.parameter_types,
            self.return_type,
            self.modifiers,
            declaring.clone(),
            declaring_id,
            declaring_name.to_string(),
        )
    }
}

/// Describes one constructor while its class is being built
#[derive(Debug, Clone)]
pub struct ConstructorBuilder {
    parameter_types: Vec<String>,
    modifiers: Modifiers,
}

impl Default for ConstructorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ConstructorBuilder {
    /// Start a package-private nullary constructor
    pub fn new() -> Self {
        ConstructorBuilder {
            parameter_types: Vec::new(),
            modifiers: Modifiers::empty(),
        }
    }

    /// Mark the constructor `public`
    #[must_use]
    pub fn public(mut self) -> Self {
        self.modifiers = self.modifiers.with_access(Modifiers::PUBLIC);
        self
    }

    /// Mark the constructor `protected`
    #[must_use]
    pub fn protected(mut self) -> Self {
        self.modifiers = self.modifiers.with_access(Modifiers::PROTECTED);
        self
    }

    /// Mark the constructor `private`
    #[must_use]
    pub fn private(mut self) -> Self {
        self.modifiers = self.modifiers.with_access(Modifiers::PRIVATE);
        self
    }

    /// Add arbitrary modifier flags
    #[must_use]
    pub fn modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers |= modifiers;
        self
    }

    /// Append a parameter type
    #[must_use]
    pub fn param(mut self, type_name: impl Into<String>) -> Self {
        self.parameter_types.push(type_name.into());
        self
    }

    fn finish(
        self,
        declaring: &HostClassRef,
        declaring_id: ClassId,
        declaring_name: &str,
    ) -> HostConstructor {
        HostConstructor::new(
            self.parameter_types,
            self.modifiers,
            declaring.clone(),
            declaring_id,
            declaring_name.to_string(),
        )
    }
}

/// Builds and registers a `HostClass`
///
/// Classes are `public` by default. A class that names no superclass extends the root class of
/// the loader it is built into; interfaces have no superclass.
pub struct ClassBuilder {
    name: String,
    modifiers: Modifiers,
    superclass: Option<HostClassRc>,
    interfaces: Vec<HostClassRc>,
    methods: Vec<MethodBuilder>,
    constructors: Vec<ConstructorBuilder>,
    is_root: bool,
}

impl ClassBuilder {
    /// Start a public class named `name`
    pub fn new(name: impl Into<String>) -> Self {
        ClassBuilder {
            name: name.into(),
            modifiers: Modifiers::PUBLIC,
            superclass: None,
            interfaces: Vec::new(),
            methods: Vec::new(),
            constructors: Vec::new(),
            is_root: false,
        }
    }

    /// Builds the root of the class hierarchy: no superclass, registered as the loader's root
    pub(crate) fn root(mut self) -> Self {
        self.is_root = true;
        self
    }

    /// Turn the class into an interface
    #[must_use]
    pub fn interface(mut self) -> Self {
        self.modifiers |= Modifiers::INTERFACE | Modifiers::ABSTRACT;
        self
    }

    /// Mark the class `abstract`
    #[must_use]
    pub fn abstract_(mut self) -> Self {
        self.modifiers |= Modifiers::ABSTRACT;
        self
    }

    /// Mark the class `final`
    #[must_use]
    pub fn final_(mut self) -> Self {
        self.modifiers |= Modifiers::FINAL;
        self
    }

    /// Replace the class modifier flags
    #[must_use]
    pub fn modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Set the direct superclass
    #[must_use]
    pub fn extends(mut self, superclass: &HostClassRc) -> Self {
        self.superclass = Some(superclass.clone());
        self
    }

    /// Add a directly implemented interface (or, for interfaces, an extended one)
    #[must_use]
    pub fn implements(mut self, interface: &HostClassRc) -> Self {
        self.interfaces.push(interface.clone());
        self
    }

    /// Declare a method
    #[must_use]
    pub fn method<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: FnOnce(MethodBuilder) -> MethodBuilder,
    {
        self.methods.push(f(MethodBuilder::new(name)));
        self
    }

    /// Declare a constructor
    #[must_use]
    pub fn constructor<F>(mut self, f: F) -> Self
    where
        F: FnOnce(ConstructorBuilder) -> ConstructorBuilder,
    {
        self.constructors.push(f(ConstructorBuilder::new()));
        self
    }

    /// Declare a public nullary constructor, the one a compiler synthesizes for classes without
    /// any explicit constructor
    #[must_use]
    pub fn default_constructor(self) -> Self {
        self.constructor(ConstructorBuilder::public)
    }

    /// Validate the class and define it in `loader`
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidHierarchy`] if the class extends an interface or a final
    /// class, implements a non-interface, or is an interface with a superclass or constructors.
    /// Returns [`crate::Error::DuplicateClass`] if `loader` already defines a class of that name.
    pub fn build(self, loader: &ClassLoader) -> Result<HostClassRc> {
        let is_interface = self.modifiers.is_interface();

        if let Some(superclass) = &self.superclass {
            if is_interface {
                return Err(hierarchy_error!(
                    "Interface {} can not extend class {}",
                    self.name,
                    superclass.name
                ));
            }
            if superclass.is_interface() {
                return Err(hierarchy_error!(
                    "{} can not extend interface {}",
                    self.name,
                    superclass.name
                ));
            }
            if superclass.modifiers.contains(Modifiers::FINAL) {
                return Err(hierarchy_error!(
                    "{} can not extend final class {}",
                    self.name,
                    superclass.name
                ));
            }
        }

        if let Some(interface) = self.interfaces.iter().find(|i| !i.is_interface()) {
            return Err(hierarchy_error!(
                "{} can not implement class {}",
                self.name,
                interface.name
            ));
        }

        if is_interface && !self.constructors.is_empty() {
            return Err(hierarchy_error!(
                "Interface {} can not declare constructors",
                self.name
            ));
        }

        let superclass = match self.superclass {
            Some(superclass) => Some(superclass),
            None if is_interface || self.is_root => None,
            None => Some(loader.root_class().ok_or_else(|| {
                hierarchy_error!("Loader '{}' has no root class for {}", loader.name(), self.name)
            })?),
        };

        let id = ClassId::next();
        let name = self.name;
        let methods = self.methods;
        let constructors = self.constructors;

        let class = Arc::new_cyclic(|weak| {
            let declaring = HostClassRef::from_weak(weak.clone());
            HostClass {
                id,
                loader: loader.name().to_string(),
                modifiers: self.modifiers,
                superclass,
                interfaces: self.interfaces,
                methods: methods
                    .into_iter()
                    .map(|m| Arc::new(m.finish(&declaring, id, &name)))
                    .collect(),
                constructors: constructors
                    .into_iter()
                    .map(|c| Arc::new(c.finish(&declaring, id, &name)))
                    .collect(),
                name,
            }
        });

        loader.register(&class, self.is_root)?;
        Ok(class)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{runtime::HostRuntime, Error};

    #[test]
    fn test_method_builder_access() {
        let method = MethodBuilder::new("m").private().public();
        assert_eq!(method.modifiers, Modifiers::PUBLIC);

        let method = MethodBuilder::new("m").public().static_().protected();
        assert_eq!(method.modifiers, Modifiers::PROTECTED | Modifiers::STATIC);

        let method = MethodBuilder::new("m").bridge();
        assert!(method.modifiers.is_synthetic());
    }

    #[test]
    fn test_build_members() {
        let runtime = HostRuntime::new().unwrap();
        let loader = runtime.loader("test");

        let class = ClassBuilder::new("Pair")
            .constructor(|c| c.public().param("Object").param("Object"))
            .method("first", |m| m.public().returns("Object"))
            .method("of", |m| {
                m.public()
                    .static_()
                    .param("Object")
                    .param("Object")
                    .returns("Pair")
            })
            .build(&loader)
            .unwrap();

        assert_eq!(class.name, "Pair");
        assert_eq!(class.loader, "test");
        assert_eq!(class.superclass().unwrap().id(), runtime.root().id());

        let methods = class.declared_methods();
        assert_eq!(methods.len(), 2);
        assert_eq!(methods[0].name, "first");
        assert_eq!(methods[0].declaring_id, class.id());
        assert_eq!(methods[1].parameter_types, vec!["Object", "Object"]);
        assert!(methods[1].is_static());
        assert_eq!(methods[1].declaring_class().unwrap().id(), class.id());

        let ctor = &class.declared_constructors()[0];
        assert!(ctor.is_public());
        assert_eq!(ctor.to_string(), "Pair(Object,Object)");
    }

    #[test]
    fn test_interface_rules() {
        let runtime = HostRuntime::new().unwrap();
        let loader = runtime.loader("test");

        let iface = ClassBuilder::new("Runnable")
            .interface()
            .method("run", |m| m.public().abstract_())
            .build(&loader)
            .unwrap();
        assert!(iface.is_interface());
        assert!(iface.superclass().is_none());

        let result = ClassBuilder::new("Bad").extends(&iface).build(&loader);
        assert!(matches!(result, Err(Error::InvalidHierarchy { .. })));

        let plain = ClassBuilder::new("Plain").build(&loader).unwrap();
        let result = ClassBuilder::new("AlsoBad").implements(&plain).build(&loader);
        assert!(matches!(result, Err(Error::InvalidHierarchy { .. })));

        let result = ClassBuilder::new("CtorIface")
            .interface()
            .default_constructor()
            .build(&loader);
        assert!(matches!(result, Err(Error::InvalidHierarchy { .. })));
    }

    #[test]
    fn test_final_superclass() {
        let runtime = HostRuntime::new().unwrap();
        let loader = runtime.loader("test");

        let sealed = ClassBuilder::new("Sealed").final_().build(&loader).unwrap();
        let result = ClassBuilder::new("Sub").extends(&sealed).build(&loader);
        match result {
            Err(Error::InvalidHierarchy { message, .. }) => {
                assert!(message.contains("final class Sealed"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_subtype_relation() {
        let runtime = HostRuntime::new().unwrap();
        let loader = runtime.loader("test");

        let iface = ClassBuilder::new("I").interface().build(&loader).unwrap();
        let base = ClassBuilder::new("Base").implements(&iface).build(&loader).unwrap();
        let derived = ClassBuilder::new("Derived").extends(&base).build(&loader).unwrap();

        assert!(derived.is_subtype_of(&base));
        assert!(derived.is_subtype_of(&iface));
        assert!(derived.is_subtype_of(runtime.root()));
        assert!(!base.is_subtype_of(&derived));
        assert!(!iface.is_subtype_of(runtime.root()));
    }
}
