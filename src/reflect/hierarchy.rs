use std::collections::HashSet;

use crate::{
    config::DescriptorConfig,
    host::{ClassId, HostClass, HostClassRc, HostConstructorRc, HostMethodRc},
    reflect::Reflector,
    Error::{RecursionLimit, Reflection},
    Result,
};

/// Reflects over the in-memory class model with JVM `getMethods` semantics
///
/// The public methods of a class are, in this order:
///
/// 1. its own declared public methods, in declaration order
/// 2. the public methods of its superclass that it does not override
/// 3. the public instance methods of its superinterfaces, depth-first in declaration order,
///    unless a method with the same signature was already collected
///
/// Two methods share a signature when their names and parameter types match. Static methods of
/// superinterfaces are not inherited. Constructors are never inherited.
///
/// Every superclass chain must end in the root class this reflector was created for. A class
/// whose chain ends in another root (for instance the root of a different `HostRuntime`) is
/// rejected with [`crate::Error::Reflection`], as its root methods could not be told apart.
#[derive(Debug, Clone)]
pub struct HierarchyReflector {
    root: ClassId,
    config: DescriptorConfig,
}

impl HierarchyReflector {
    /// Create a reflector hiding the members declared by `root`
    pub fn new(root: &HostClassRc) -> Self {
        Self::with_config(root, DescriptorConfig::default())
    }

    /// Create a reflector with a specific configuration
    pub fn with_config(root: &HostClassRc, config: DescriptorConfig) -> Self {
        HierarchyReflector {
            root: root.id(),
            config,
        }
    }

    /// Internal recursive walk with depth tracking
    ///
    /// ## Arguments
    /// * 'class'   - The class to enumerate
    /// * 'depth'   - Indicator of recursion level
    /// * 'visited' - Superinterfaces already walked during this enumeration
    fn methods_with_depth(
        &self,
        class: &HostClass,
        depth: usize,
        visited: &mut HashSet<ClassId>,
    ) -> Result<Vec<HostMethodRc>> {
        if depth >= self.config.max_hierarchy_depth {
            return Err(RecursionLimit(self.config.max_hierarchy_depth));
        }

        let mut collected: Vec<HostMethodRc> = class
            .declared_methods()
            .iter()
            .filter(|method| method.is_public())
            .cloned()
            .collect();

        match class.superclass() {
            Some(superclass) => {
                for inherited in self.methods_with_depth(superclass, depth + 1, visited)? {
                    if !collected.iter().any(|m| m.same_signature(&inherited)) {
                        collected.push(inherited);
                    }
                }
            }
            None if class.is_interface() || class.id() == self.root => {}
            None => {
                return Err(Reflection(format!(
                    "{} ({}) is not rooted in class {}",
                    class.name,
                    class.id(),
                    self.root
                )));
            }
        }

        for interface in class.interfaces() {
            // A second path to the same interface can only yield signatures already collected
            if !visited.insert(interface.id()) {
                continue;
            }

            for inherited in self.methods_with_depth(interface, depth + 1, visited)? {
                if inherited.is_static() {
                    continue;
                }
                if !collected.iter().any(|m| m.same_signature(&inherited)) {
                    collected.push(inherited);
                }
            }
        }

        Ok(collected)
    }
}

impl Reflector for HierarchyReflector {
    fn root_class_id(&self) -> ClassId {
        self.root
    }

    fn public_methods(&self, class: &HostClass) -> Result<Vec<HostMethodRc>> {
        self.methods_with_depth(class, 0, &mut HashSet::new())
    }

    fn public_constructors(&self, class: &HostClass) -> Result<Vec<HostConstructorRc>> {
        Ok(class
            .declared_constructors()
            .iter()
            .filter(|constructor| constructor.is_public())
            .cloned()
            .collect())
    }
}
