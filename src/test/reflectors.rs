use std::sync::atomic::{AtomicUsize, Ordering};

use crate::{
    descriptor::SingleMethodDesc,
    host::{ClassId, HostClass, HostConstructorRc, HostMethodRc},
    reflect::{HierarchyReflector, Reflector},
    runtime::HostRuntime,
    Result,
};

/// Hierarchy reflector counting how often the descriptor factory runs
pub struct CountingReflector {
    inner: HierarchyReflector,
    invocations: AtomicUsize,
}

impl CountingReflector {
    pub fn invocations(&self) -> usize {
        self.invocations.load(Ordering::SeqCst)
    }
}

impl Reflector for CountingReflector {
    fn root_class_id(&self) -> ClassId {
        self.inner.root_class_id()
    }

    fn public_methods(&self, class: &HostClass) -> Result<Vec<HostMethodRc>> {
        self.inner.public_methods(class)
    }

    fn public_constructors(&self, class: &HostClass) -> Result<Vec<HostConstructorRc>> {
        self.inner.public_constructors(class)
    }

    fn unreflect_method(&self, method: &HostMethodRc) -> SingleMethodDesc {
        self.invocations.fetch_add(1, Ordering::SeqCst);
        self.inner.unreflect_method(method)
    }

    fn unreflect_constructor(&self, constructor: &HostConstructorRc) -> SingleMethodDesc {
        self.invocations.fetch_add(1, Ordering::SeqCst);
        self.inner.unreflect_constructor(constructor)
    }
}

pub fn counting_reflector(runtime: &HostRuntime) -> CountingReflector {
    CountingReflector {
        inner: HierarchyReflector::new(runtime.root()),
        invocations: AtomicUsize::new(0),
    }
}
