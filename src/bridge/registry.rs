//! Process-wide table of native callables.
//!
//! Built once, the first time anything asks for it, and never mutated
//! afterwards. Each class arrives with its constructor and full method
//! table already composed.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::types::ClassKind;

use super::native::NativeCallable;

/// A script-visible class: its constructor and methods.
#[derive(Debug)]
pub struct ClassDesc {
    pub kind: ClassKind,
    pub constructor: NativeCallable,
    pub methods: Vec<NativeCallable>,
}

impl ClassDesc {
    /// Look up a method by its short name (`next`, not `Apol.next`).
    pub fn method(&self, short: &str) -> Option<&NativeCallable> {
        let prefix = self.kind.script_name();
        self.methods.iter().find(|m| {
            m.name
                .strip_prefix(prefix)
                .and_then(|rest| rest.strip_prefix('.'))
                == Some(short)
        })
    }

    /// Constructor followed by methods.
    pub fn callables(&self) -> impl Iterator<Item = &NativeCallable> {
        std::iter::once(&self.constructor).chain(self.methods.iter())
    }
}

/// Lookup slot: class index and, for methods, method index.
type Slot = (usize, Option<usize>);

#[derive(Debug)]
pub struct NativeRegistry {
    classes: Vec<ClassDesc>,
    index: HashMap<&'static str, Slot>,
}

impl NativeRegistry {
    /// Index a fixed set of classes.
    pub fn new(classes: Vec<ClassDesc>) -> Self {
        let mut index = HashMap::new();
        for (ci, class) in classes.iter().enumerate() {
            index.insert(class.constructor.name, (ci, None));
            for (mi, method) in class.methods.iter().enumerate() {
                index.insert(method.name, (ci, Some(mi)));
            }
        }
        Self { classes, index }
    }

    /// Find a callable by its exposed name, e.g. `Apol` or `Apol.next`.
    pub fn get(&self, name: &str) -> Option<&NativeCallable> {
        let (ci, mi) = *self.index.get(name)?;
        let class = &self.classes[ci];
        match mi {
            None => Some(&class.constructor),
            Some(mi) => class.methods.get(mi),
        }
    }

    pub fn class(&self, kind: ClassKind) -> Option<&ClassDesc> {
        self.classes.iter().find(|c| c.kind == kind)
    }

    pub fn classes(&self) -> &[ClassDesc] {
        &self.classes
    }

    /// Every callable, class by class.
    pub fn callables(&self) -> impl Iterator<Item = &NativeCallable> {
        self.classes.iter().flat_map(ClassDesc::callables)
    }

    /// Every exposed name, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.index.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Closest registered name, for "did you mean" hints.
    pub fn suggest(&self, name: &str) -> Option<&'static str> {
        let lower = name.to_ascii_lowercase();
        self.names()
            .into_iter()
            .find(|candidate| candidate.to_ascii_lowercase() == lower)
            .or_else(|| {
                let (prefix, _) = name.split_once('.')?;
                self.names()
                    .into_iter()
                    .find(|candidate| candidate.eq_ignore_ascii_case(prefix))
            })
    }
}

/// The native library, built on first use.
pub fn registry() -> &'static NativeRegistry {
    static REGISTRY: OnceLock<NativeRegistry> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        let classes = crate::library::classes().expect("native library signatures are unambiguous");
        tracing::debug!(classes = classes.len(), "native registry built");
        NativeRegistry::new(classes)
    })
}
