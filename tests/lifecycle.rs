//! Integration tests for class identity across loaders, class unloading and failure recovery.

use std::{
    panic::{catch_unwind, AssertUnwindSafe},
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Arc,
    },
};

use classdesc::{prelude::*, Error, Result};

/// Same name in two loaders means two classes and two descriptors.
#[test]
fn test_loader_identity() -> Result<()> {
    let runtime = HostRuntime::new()?;
    let plugins = runtime.loader("plugins");
    let scripts = runtime.loader("scripts");

    let a = ClassBuilder::new("Task")
        .method("run", |m| m.public())
        .build(&plugins)?;
    let b = ClassBuilder::new("Task")
        .method("run", |m| m.public().param("int"))
        .build(&scripts)?;

    let da = runtime.describe(&a);
    let db = runtime.describe(&b);
    assert!(!Arc::ptr_eq(&da, &db));
    assert_ne!(da.class_id(), db.class_id());

    let run_a = da.lookup_method("run")?.and_then(MethodDesc::as_single);
    let run_b = db.lookup_method("run")?.and_then(MethodDesc::as_single);
    assert_eq!(run_a.map(|s| s.parameter_types().len()), Some(0));
    assert_eq!(run_b.map(|s| s.parameter_types().len()), Some(1));

    assert!(Arc::ptr_eq(&da, &runtime.describe(&plugins.find("Task").unwrap())));

    Ok(())
}

/// A loader refuses a second definition of a name it already defines.
#[test]
fn test_duplicate_definition() -> Result<()> {
    let runtime = HostRuntime::new()?;
    let loader = runtime.loader("app");
    ClassBuilder::new("Once").build(&loader)?;

    match ClassBuilder::new("Once").build(&loader) {
        Err(Error::DuplicateClass { loader, name }) => {
            assert_eq!(loader, "app");
            assert_eq!(name, "Once");
        }
        other => panic!("expected a duplicate class error, got {other:?}"),
    }

    // Sibling loaders have separate namespaces
    let sibling = runtime.loader("other");
    assert!(ClassBuilder::new("Once").build(&sibling).is_ok());

    Ok(())
}

/// Descriptors do not keep their class alive; the cache forgets reclaimed classes on purge.
#[test]
fn test_unload_and_purge() -> Result<()> {
    let runtime = HostRuntime::new()?;
    let loader = runtime.loader("plugin");
    let class = ClassBuilder::new("Plugin")
        .default_constructor()
        .method("start", |m| m.public())
        .build(&loader)?;
    let weak = HostClassRef::new(&class);

    let used = runtime.describe(&class);
    assert!(used.lookup_method("start")?.is_some());
    let untouched = {
        let other = ClassBuilder::new("Unused").build(&loader)?;
        runtime.describe(&other)
    };

    drop(class);
    drop(loader);

    assert!(!weak.is_valid());
    assert!(used.class_handle().is_none());

    // Built tables outlive the class, unbuilt ones can no longer be built
    assert!(used.lookup_method("start")?.is_some());
    assert!(matches!(
        untouched.lookup_method("start"),
        Err(Error::ClassUnloaded(_))
    ));

    assert_eq!(runtime.descriptors().len(), 2);
    assert_eq!(runtime.descriptors().purge_unloaded(), 2);
    assert!(runtime.descriptors().is_empty());

    Ok(())
}

/// Fails every call until the given number of failures has been reported
struct FailingReflector {
    inner: HierarchyReflector,
    remaining: AtomicUsize,
}

impl Reflector for FailingReflector {
    fn root_class_id(&self) -> ClassId {
        self.inner.root_class_id()
    }

    fn public_methods(&self, class: &HostClass) -> Result<Vec<HostMethodRc>> {
        let failing = self
            .remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failing {
            return Err(Error::Reflection(format!("{} is not accessible", class.name)));
        }
        self.inner.public_methods(class)
    }

    fn public_constructors(&self, class: &HostClass) -> Result<Vec<HostConstructorRc>> {
        self.inner.public_constructors(class)
    }
}

/// A failed build is reported as is and retried by the next lookup.
#[test]
fn test_failure_is_retried() -> Result<()> {
    let runtime = HostRuntime::new()?;
    let loader = runtime.loader("app");
    let class = ClassBuilder::new("Guarded")
        .method("open", |m| m.public())
        .build(&loader)?;

    let cache = DescriptorCache::new(Arc::new(FailingReflector {
        inner: HierarchyReflector::new(runtime.root()),
        remaining: AtomicUsize::new(2),
    }));
    let desc = cache.acquire(&class);

    for _ in 0..2 {
        match desc.lookup_method("open") {
            Err(Error::Reflection(message)) => assert_eq!(message, "Guarded is not accessible"),
            other => panic!("expected a reflection error, got {other:?}"),
        }
        assert!(!desc.is_materialized());
    }

    assert!(desc.lookup_method("open")?.is_some());
    assert!(desc.is_materialized());
    assert!(Arc::ptr_eq(&desc, &cache.acquire(&class)));

    Ok(())
}

/// Hierarchies deeper than configured fail with a recursion error instead of overflowing.
#[test]
fn test_hierarchy_depth_limit() -> Result<()> {
    let config = DescriptorConfig::default().with_max_hierarchy_depth(8);
    let runtime = HostRuntime::with_config(config)?;
    let loader = runtime.loader("deep");

    let mut class = ClassBuilder::new("Level0").build(&loader)?;
    for level in 1..16 {
        class = ClassBuilder::new(format!("Level{level}"))
            .extends(&class)
            .build(&loader)?;
    }

    let desc = runtime.describe(&class);
    assert!(matches!(
        desc.lookup_method("anything"),
        Err(Error::RecursionLimit(8))
    ));
    assert!(!desc.is_materialized());

    Ok(())
}

/// Invalid hierarchies are rejected when the class is built.
#[test]
fn test_invalid_hierarchy() -> Result<()> {
    let runtime = HostRuntime::new()?;
    let loader = runtime.loader("app");
    let sealed = ClassBuilder::new("Sealed").final_().build(&loader)?;

    match ClassBuilder::new("Breaker").extends(&sealed).build(&loader) {
        Err(Error::InvalidHierarchy { message, .. }) => {
            assert_eq!(message, "Breaker can not extend final class Sealed");
        }
        other => panic!("expected an invalid hierarchy error, got {other:?}"),
    }
    assert!(loader.find_local("Breaker").is_none());

    Ok(())
}

/// Panics on the first enumeration, then behaves
struct PanickingReflector {
    inner: HierarchyReflector,
    panicked: AtomicBool,
}

impl Reflector for PanickingReflector {
    fn root_class_id(&self) -> ClassId {
        self.inner.root_class_id()
    }

    fn public_methods(&self, class: &HostClass) -> Result<Vec<HostMethodRc>> {
        if !self.panicked.swap(true, Ordering::SeqCst) {
            panic!("reflection of {} aborted", class.name);
        }
        self.inner.public_methods(class)
    }

    fn public_constructors(&self, class: &HostClass) -> Result<Vec<HostConstructorRc>> {
        self.inner.public_constructors(class)
    }
}

/// A panic during materialization leaves the descriptor usable for the next lookup.
#[test]
fn test_panic_does_not_poison() -> Result<()> {
    let runtime = HostRuntime::new()?;
    let loader = runtime.loader("app");
    let class = ClassBuilder::new("Fragile")
        .method("open", |m| m.public())
        .build(&loader)?;

    let cache = DescriptorCache::new(Arc::new(PanickingReflector {
        inner: HierarchyReflector::new(runtime.root()),
        panicked: AtomicBool::new(false),
    }));
    let desc = cache.acquire(&class);

    let first = catch_unwind(AssertUnwindSafe(|| desc.lookup_method("open").map(|f| f.is_some())));
    assert!(first.is_err());
    assert!(!desc.is_materialized());

    assert!(desc.lookup_method("open")?.is_some());
    assert!(desc.is_materialized());
    assert!(Arc::ptr_eq(&desc, &cache.acquire(&class)));

    Ok(())
}

/// Classes of another runtime are refused instead of exposing that runtime's root methods.
#[test]
fn test_foreign_runtime_class() -> Result<()> {
    let runtime = HostRuntime::new()?;
    let other = HostRuntime::new()?;
    let loader = other.loader("other");
    let foreign = ClassBuilder::new("Foreign")
        .default_constructor()
        .method("run", |m| m.public())
        .build(&loader)?;

    let desc = runtime.describe(&foreign);
    assert!(matches!(desc.lookup_method("hashCode"), Err(Error::Reflection(_))));
    assert!(matches!(desc.lookup_method("run"), Err(Error::Reflection(_))));
    assert!(!desc.is_materialized());

    // At home the class describes as usual, with the root methods hidden
    let home = other.describe(&foreign);
    assert!(home.lookup_method("run")?.is_some());
    assert!(home.lookup_method("hashCode")?.is_none());
    assert!(home.lookup_constructor()?.is_some());

    Ok(())
}
