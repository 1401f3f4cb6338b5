//! The member view of one class: instance methods, static methods and constructors.

use std::collections::HashMap;

use crate::{
    config::DescriptorConfig,
    descriptor::{MethodDesc, SingleMethodDesc},
    host::HostClass,
    reflect::Reflector,
    Result,
};

/// Name-indexed view of the public callables of one class
///
/// Built once from the reflection facility and never mutated afterwards, so the maps can be
/// read from any number of threads without synchronization.
///
/// # Layout
///
/// - `methods` holds every public method not declared by the root class, static or not
/// - `static_methods` holds the static subset of `methods`, under the same names
/// - `constructor` aggregates every public constructor not declared by the root class
///
/// Within a name the overloads keep the order in which the reflection facility reported them.
#[derive(Debug)]
pub struct MemberTable {
    methods: HashMap<String, MethodDesc>,
    static_methods: HashMap<String, MethodDesc>,
    constructor: Option<MethodDesc>,
}

impl MemberTable {
    /// Enumerate `class` through `reflector` and group its callables by name
    ///
    /// ## Arguments
    /// * 'class'     - The class to describe
    /// * 'reflector' - Source of the public members and of the descriptor factory
    /// * 'config'    - Controls overload deduplication
    ///
    /// # Errors
    /// Propagates any error of the reflection facility unchanged.
    pub fn build(
        class: &HostClass,
        reflector: &dyn Reflector,
        config: &DescriptorConfig,
    ) -> Result<Self> {
        let root = reflector.root_class_id();

        let mut methods = HashMap::new();
        let mut static_methods = HashMap::new();
        for method in reflector.public_methods(class)? {
            if method.declaring_id == root {
                continue;
            }

            let single = reflector.unreflect_method(&method);
            if method.is_static() {
                insert(&mut static_methods, &method.name, single.clone(), config);
            }
            insert(&mut methods, &method.name, single, config);
        }

        let mut constructor = None;
        for ctor in reflector.public_constructors(class)? {
            if ctor.declaring_id == root {
                continue;
            }

            let single = reflector.unreflect_constructor(&ctor);
            constructor = Some(match constructor {
                None => MethodDesc::Single(single),
                Some(existing) => fold(existing, single, config),
            });
        }

        log::debug!(
            "Built member table for {} ({} method names, {} static, {} constructor overloads)",
            class.name,
            methods.len(),
            static_methods.len(),
            constructor.as_ref().map_or(0, MethodDesc::len)
        );

        Ok(MemberTable {
            methods,
            static_methods,
            constructor,
        })
    }

    /// Descriptor for the public method(s) named `name`
    #[must_use]
    pub fn method(&self, name: &str) -> Option<&MethodDesc> {
        self.methods.get(name)
    }

    /// Descriptor for the public static method(s) named `name`
    #[must_use]
    pub fn static_method(&self, name: &str) -> Option<&MethodDesc> {
        self.static_methods.get(name)
    }

    /// Descriptor aggregating the public constructors
    #[must_use]
    pub fn constructor(&self) -> Option<&MethodDesc> {
        self.constructor.as_ref()
    }

    /// Names with at least one public method, in no particular order
    pub fn method_names(&self) -> impl Iterator<Item = &str> {
        self.methods.keys().map(String::as_str)
    }

    /// Names with at least one public static method, in no particular order
    pub fn static_method_names(&self) -> impl Iterator<Item = &str> {
        self.static_methods.keys().map(String::as_str)
    }

    /// Number of distinct method names
    #[must_use]
    pub fn len(&self) -> usize {
        self.methods.len()
    }

    /// Returns `true` if the class exposes no methods (constructors are not counted)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

/// Add `single` to the bucket `name`, creating or extending it
fn insert(
    map: &mut HashMap<String, MethodDesc>,
    name: &str,
    single: SingleMethodDesc,
    config: &DescriptorConfig,
) {
    let merged = match map.remove(name) {
        None => MethodDesc::Single(single),
        Some(existing) => fold(existing, single, config),
    };
    map.insert(name.to_string(), merged);
}

/// The merge rule, honouring overload deduplication
fn fold(existing: MethodDesc, single: SingleMethodDesc, config: &DescriptorConfig) -> MethodDesc {
    if config.deduplicate_overloads
        && existing
            .overloads()
            .iter()
            .any(|overload| overload.same_shape(&single))
    {
        return existing;
    }

    existing.merge(single)
}
