use std::{fmt, sync::Arc};

use indexmap::IndexMap;

use crate::{object::Object, types::Type};

/// A checkable constraint attached to a parameter.
///
/// This is the Rust shape of a Python annotation used as a contract: a type
/// (`a: int`) or a predicate (`a: lambda a: a > 1`).
pub trait Expectation: Send + Sync {
    /// Returns whether `value` satisfies the expectation.
    fn check(&self, value: &Object) -> bool;

    /// Human-readable form of the expectation, used in error messages.
    fn describe(&self) -> String;
}

/// `isinstance` check.
impl Expectation for Type {
    fn check(&self, value: &Object) -> bool {
        self.is_instance(value)
    }

    fn describe(&self) -> String {
        self.py_repr()
    }
}

/// A predicate function with a label for messages.
#[derive(Clone)]
pub struct Predicate {
    label: String,
    func: Arc<dyn Fn(&Object) -> bool + Send + Sync>,
}

impl Predicate {
    pub fn new(label: impl Into<String>, func: impl Fn(&Object) -> bool + Send + Sync + 'static) -> Self {
        Self {
            label: label.into(),
            func: Arc::new(func),
        }
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Predicate").field(&self.label).finish()
    }
}

impl Expectation for Predicate {
    fn check(&self, value: &Object) -> bool {
        (self.func)(value)
    }

    fn describe(&self) -> String {
        self.label.clone()
    }
}

/// Per-parameter expectations of a callable, in declaration order.
///
/// The binder never looks at annotations; they are supplied by the decorator that
/// checks them and are treated as an opaque mapping from parameter name to expectation.
#[derive(Clone, Default)]
pub struct Annotations(IndexMap<String, Arc<dyn Expectation>>);

impl Annotations {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an expectation for `name`, replacing any earlier one.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, expectation: impl Expectation + 'static) -> Self {
        self.insert(name, expectation);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, expectation: impl Expectation + 'static) {
        self.0.insert(name.into(), Arc::new(expectation));
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn Expectation> {
        self.0.get(name).map(|e| &**e)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &dyn Expectation)> {
        self.0.iter().map(|(name, e)| (name.as_str(), &**e))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Annotations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.0.iter().map(|(name, e)| (name, e.describe())))
            .finish()
    }
}
