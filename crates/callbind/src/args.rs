use std::{borrow::Cow, ops::Index};

use indexmap::IndexMap;

use crate::{
    object::{DictPairs, Object, Value},
    signature::ParamKind,
};

/// The actual arguments of a call site: positional values in order plus keyword values by name.
///
/// Keyword names are unique; inserting the same name twice keeps the later value,
/// exactly as `f(**{"a": 1, **{"a": 2}})` would.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArgValues {
    positional: Vec<Value>,
    keywords: IndexMap<String, Value>,
}

impl ArgValues {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates call arguments from positional values only, like `f(*values)`.
    pub fn positional<V: Into<Value>>(values: impl IntoIterator<Item = V>) -> Self {
        Self {
            positional: values.into_iter().map(Into::into).collect(),
            keywords: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn from_parts(positional: Vec<Value>, keywords: IndexMap<String, Value>) -> Self {
        Self { positional, keywords }
    }

    /// Appends a positional argument.
    #[must_use]
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// Adds a keyword argument.
    #[must_use]
    pub fn kwarg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.keywords.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn positional_len(&self) -> usize {
        self.positional.len()
    }

    #[must_use]
    pub fn keyword_len(&self) -> usize {
        self.keywords.len()
    }

    #[must_use]
    pub fn positional_values(&self) -> &[Value] {
        &self.positional
    }

    #[must_use]
    pub fn keyword_values(&self) -> &IndexMap<String, Value> {
        &self.keywords
    }

    /// Splits the arguments into positional values and keyword values.
    #[must_use]
    pub fn into_parts(self) -> (Vec<Value>, IndexMap<String, Value>) {
        (self.positional, self.keywords)
    }

    /// Renders the positional values as a Python tuple repr, e.g. `(1, 'text')`.
    #[must_use]
    pub fn positional_repr(&self) -> String {
        Object::Tuple(self.positional.iter().map(|v| Object::clone(v)).collect()).py_repr()
    }
}

/// The result of binding a call to a signature.
///
/// Holds one entry per named parameter in declaration order, plus the collected
/// `*args` tuple and `**kwargs` dict when the signature declares them. Values are
/// the call-site handles themselves (or the declared defaults), never copies.
///
/// Immutable once returned by [`Signature::bind`](crate::Signature::bind).
#[derive(Debug, Clone, PartialEq)]
pub struct BoundArguments {
    /// Named parameters in declaration order, with their kind for call reconstruction.
    arguments: IndexMap<String, (ParamKind, Value)>,
    var_args: Option<(String, Vec<Value>)>,
    var_kwargs: Option<(String, IndexMap<String, Value>)>,
}

impl BoundArguments {
    pub(crate) fn new(
        arguments: IndexMap<String, (ParamKind, Value)>,
        var_args: Option<(String, Vec<Value>)>,
        var_kwargs: Option<(String, IndexMap<String, Value>)>,
    ) -> Self {
        Self {
            arguments,
            var_args,
            var_kwargs,
        }
    }

    /// Returns the value bound to a named (non-variadic) parameter.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.arguments.get(name).map(|(_, value)| value)
    }

    /// Looks a parameter up by name as a Python object, including the variadic slots.
    ///
    /// Named parameters are borrowed; `*args` is materialized as a tuple and
    /// `**kwargs` as a dict, which is what the function body would see.
    #[must_use]
    pub fn get_object(&self, name: &str) -> Option<Cow<'_, Object>> {
        if let Some(value) = self.get(name) {
            return Some(Cow::Borrowed(&**value));
        }
        if let Some((var_name, values)) = &self.var_args
            && var_name == name
        {
            return Some(Cow::Owned(Object::Tuple(
                values.iter().map(|v| Object::clone(v)).collect(),
            )));
        }
        if let Some((var_name, entries)) = &self.var_kwargs
            && var_name == name
        {
            let pairs: DictPairs = entries
                .iter()
                .map(|(k, v)| (Object::String(k.clone()), Object::clone(v)))
                .collect();
            return Some(Cow::Owned(Object::Dict(pairs)));
        }
        None
    }

    /// Returns whether `name` is bound, counting the variadic slots.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.arguments.contains_key(name)
            || self.var_args.as_ref().is_some_and(|(n, _)| n == name)
            || self.var_kwargs.as_ref().is_some_and(|(n, _)| n == name)
    }

    /// The values collected by the `*args` parameter, if one is declared.
    #[must_use]
    pub fn var_args(&self) -> Option<&[Value]> {
        self.var_args.as_ref().map(|(_, values)| values.as_slice())
    }

    /// The entries collected by the `**kwargs` parameter, if one is declared.
    #[must_use]
    pub fn var_kwargs(&self) -> Option<&IndexMap<String, Value>> {
        self.var_kwargs.as_ref().map(|(_, entries)| entries)
    }

    /// Iterates over the named parameters in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.arguments.iter().map(|(name, (_, value))| (name.as_str(), value))
    }

    /// Number of named parameters bound (variadic slots excluded).
    #[must_use]
    pub fn len(&self) -> usize {
        self.arguments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.arguments.is_empty()
    }

    /// Positional arguments of an equivalent call, like `inspect.BoundArguments.args`.
    ///
    /// Every positional-capable parameter in order, followed by the `*args` values.
    #[must_use]
    pub fn args(&self) -> Vec<Value> {
        let mut args: Vec<Value> = self
            .arguments
            .values()
            .filter(|(kind, _)| kind.is_positional())
            .map(|(_, value)| value.clone())
            .collect();
        if let Some((_, extra)) = &self.var_args {
            args.extend(extra.iter().cloned());
        }
        args
    }

    /// Keyword arguments of an equivalent call, like `inspect.BoundArguments.kwargs`.
    ///
    /// Every keyword-only parameter, followed by the `**kwargs` entries.
    #[must_use]
    pub fn kwargs(&self) -> IndexMap<String, Value> {
        let mut kwargs: IndexMap<String, Value> = self
            .arguments
            .iter()
            .filter(|(_, (kind, _))| *kind == ParamKind::KeywordOnly)
            .map(|(name, (_, value))| (name.clone(), value.clone()))
            .collect();
        if let Some((_, extra)) = &self.var_kwargs {
            kwargs.extend(extra.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        kwargs
    }

    /// Rebuilds call arguments that bind to the same values against the same signature.
    #[must_use]
    pub fn to_arg_values(&self) -> ArgValues {
        ArgValues::from_parts(self.args(), self.kwargs())
    }
}

impl Index<&str> for BoundArguments {
    type Output = Value;

    /// # Panics
    /// Panics if no named parameter called `name` is bound.
    fn index(&self, name: &str) -> &Value {
        match self.get(name) {
            Some(value) => value,
            None => panic!("no bound argument named {name:?}"),
        }
    }
}
