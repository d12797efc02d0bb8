//! Function signature representation and argument binding.
//!
//! This module handles Python function signatures including all parameter kinds:
//! positional-only, positional-or-keyword, *args, keyword-only, and **kwargs.
//! It also handles default values and the argument binding algorithm.

use std::fmt;

use ahash::AHashSet;
use indexmap::IndexMap;
use smallvec::SmallVec;
use strum::{Display, IntoStaticStr};

use crate::{
    args::{ArgValues, BoundArguments},
    exception::{BindError, SignatureError},
    object::Value,
    tracer::{BindTracer, NoopTracer},
};

/// The kind of a declared parameter, in the order kinds must appear in a signature.
///
/// `Display` gives the `inspect.Parameter.kind` name (`POSITIONAL_OR_KEYWORD`);
/// [`ParamKind::description`] gives the prose form used in error messages.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, IntoStaticStr, serde::Serialize, serde::Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ParamKind {
    /// Parameters before `/`, e.g. `a` in `def f(a, /): ...`
    PositionalOnly,
    /// Regular parameters, e.g. `a` in `def f(a): ...`
    PositionalOrKeyword,
    /// `*args`: collects surplus positional arguments into a tuple.
    VarPositional,
    /// Parameters after `*` or `*args`, e.g. `c` in `def f(*, c): ...`
    KeywordOnly,
    /// `**kwargs`: collects unmatched keyword arguments into a dict.
    VarKeyword,
}

impl ParamKind {
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::PositionalOnly => "positional-only",
            Self::PositionalOrKeyword => "positional or keyword",
            Self::VarPositional => "variadic positional",
            Self::KeywordOnly => "keyword-only",
            Self::VarKeyword => "variadic keyword",
        }
    }

    /// Whether parameters of this kind can receive a positional argument by slot.
    #[must_use]
    pub fn is_positional(self) -> bool {
        matches!(self, Self::PositionalOnly | Self::PositionalOrKeyword)
    }

    #[must_use]
    pub fn is_variadic(self) -> bool {
        matches!(self, Self::VarPositional | Self::VarKeyword)
    }
}

/// One declared parameter: its name, kind, and optional default value.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Parameter {
    name: String,
    kind: ParamKind,
    default: Option<Value>,
}

impl Parameter {
    pub fn new(name: impl Into<String>, kind: ParamKind) -> Self {
        Self {
            name: name.into(),
            kind,
            default: None,
        }
    }

    pub fn positional_only(name: impl Into<String>) -> Self {
        Self::new(name, ParamKind::PositionalOnly)
    }

    pub fn positional_or_keyword(name: impl Into<String>) -> Self {
        Self::new(name, ParamKind::PositionalOrKeyword)
    }

    pub fn var_positional(name: impl Into<String>) -> Self {
        Self::new(name, ParamKind::VarPositional)
    }

    pub fn keyword_only(name: impl Into<String>) -> Self {
        Self::new(name, ParamKind::KeywordOnly)
    }

    pub fn var_keyword(name: impl Into<String>) -> Self {
        Self::new(name, ParamKind::VarKeyword)
    }

    /// Attaches a default value.
    ///
    /// The value is shared: every call that falls back to it binds this same handle.
    #[must_use]
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn kind(&self) -> ParamKind {
        self.kind
    }

    #[must_use]
    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    #[must_use]
    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ParamKind::VarPositional => write!(f, "*{}", self.name),
            ParamKind::VarKeyword => write!(f, "**{}", self.name),
            _ => match &self.default {
                Some(default) => write!(f, "{}={}", self.name, default.py_repr()),
                None => f.write_str(&self.name),
            },
        }
    }
}

/// Represents a Python function signature with all parameter kinds.
///
/// A complete Python signature can include:
/// - Positional-only parameters (before `/`)
/// - Positional-or-keyword parameters (regular parameters)
/// - Variable positional parameter (`*args`)
/// - Keyword-only parameters (after `*` or `*args`)
/// - Variable keyword parameter (`**kwargs`)
///
/// A signature is built once per callable and is immutable afterwards, so it can be
/// cached and shared across threads. Construction enforces the declaration rules
/// (see [`Signature::new`]); binding assumes them.
///
/// Serializes as its parameter list; deserializing re-validates it.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "Vec<Parameter>", into = "Vec<Parameter>")]
pub struct Signature {
    /// Named (non-variadic) parameters in declaration order: positional kinds first, then keyword-only.
    params: Vec<Parameter>,
    /// Variable positional parameter name, e.g. `args` in `def f(*args): ...`
    var_args: Option<String>,
    /// Variable keyword parameter name, e.g. `kwargs` in `def f(**kwargs): ...`
    var_kwargs: Option<String>,
    /// Number of positional parameters without a default.
    required_positional: usize,
    /// Number of positional parameters.
    max_positional: usize,
    /// How simple the signature is, used for fast path when binding
    bind_mode: BindMode,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum BindMode {
    /// Only positional-or-keyword parameters, none with defaults, no *args/**kwargs.
    #[default]
    Simple,
    /// Only positional-or-keyword parameters, some with defaults, no *args/**kwargs.
    ///
    /// This identifies the common pattern `def f(a, b=1, c=2)`.
    SimpleWithDefaults,
    Complex,
}

impl Signature {
    /// Creates a signature from parameter descriptors in declaration order.
    ///
    /// # Errors
    /// Returns an error if:
    /// - a name is not a valid identifier or appears twice
    /// - kinds are out of order (positional-only, positional-or-keyword, *args,
    ///   keyword-only, **kwargs)
    /// - there is more than one *args or **kwargs
    /// - a positional parameter without a default follows one with a default
    /// - *args or **kwargs carries a default
    pub fn new(parameters: impl IntoIterator<Item = Parameter>) -> Result<Self, SignatureError> {
        let mut params = Vec::new();
        let mut var_args = None;
        let mut var_kwargs = None;
        let mut seen = AHashSet::new();
        let mut top_kind = ParamKind::PositionalOnly;
        let mut seen_default = false;

        for param in parameters {
            // positional-only names never reach a keyword lookup, so keywords are allowed there
            if !is_identifier(&param.name) || (param.kind != ParamKind::PositionalOnly && is_keyword(&param.name)) {
                return Err(SignatureError::InvalidName(param.name));
            }
            if param.kind < top_kind {
                return Err(SignatureError::WrongOrder {
                    before: top_kind,
                    after: param.kind,
                });
            }
            top_kind = param.kind;

            match param.kind {
                ParamKind::VarPositional | ParamKind::VarKeyword => {
                    if param.default.is_some() {
                        return Err(SignatureError::VariadicDefault(param.kind));
                    }
                    let slot = if param.kind == ParamKind::VarPositional {
                        &mut var_args
                    } else {
                        &mut var_kwargs
                    };
                    if slot.is_some() {
                        return Err(SignatureError::DuplicateVariadic(param.kind));
                    }
                    if !seen.insert(param.name.clone()) {
                        return Err(SignatureError::DuplicateParameter(param.name));
                    }
                    *slot = Some(param.name);
                    continue;
                }
                ParamKind::PositionalOnly | ParamKind::PositionalOrKeyword => {
                    if param.default.is_some() {
                        seen_default = true;
                    } else if seen_default {
                        return Err(SignatureError::NonDefaultAfterDefault(param.name));
                    }
                }
                // keyword-only parameters may be required after optional ones
                ParamKind::KeywordOnly => {}
            }

            if !seen.insert(param.name.clone()) {
                return Err(SignatureError::DuplicateParameter(param.name));
            }
            params.push(param);
        }

        let max_positional = params.iter().filter(|p| p.kind.is_positional()).count();
        let required_positional = params
            .iter()
            .filter(|p| p.kind.is_positional() && p.default.is_none())
            .count();

        let plain = var_args.is_none()
            && var_kwargs.is_none()
            && params.iter().all(|p| p.kind == ParamKind::PositionalOrKeyword);
        let bind_mode = if !plain {
            BindMode::Complex
        } else if required_positional == max_positional {
            BindMode::Simple
        } else {
            BindMode::SimpleWithDefaults
        };

        Ok(Self {
            params,
            var_args,
            var_kwargs,
            required_positional,
            max_positional,
            bind_mode,
        })
    }

    /// Starts a builder that appends parameters in declaration order.
    #[must_use]
    pub fn builder() -> SignatureBuilder {
        SignatureBuilder::default()
    }

    /// Binds arguments to parameters according to Python's calling conventions.
    ///
    /// The algorithm, in order:
    /// 1. Walk the named parameters left to right. Each takes the next unused positional
    ///    value (keyword-only parameters never do), else a same-named keyword value
    ///    (positional-only parameters never do), else its default; otherwise the call
    ///    is missing an argument.
    /// 2. A parameter filled positionally while a same-named keyword is also present
    ///    is a duplicate, whatever the two values are.
    /// 3. Surplus positional values go to *args, or are an error without one.
    /// 4. Unmatched keyword values go to **kwargs, or are an error without one.
    ///
    /// Errors are reported in that order. Values are moved, never copied; defaults
    /// are bound by handle.
    ///
    /// # Arguments
    /// * `func_name` - Function name for error messages
    /// * `args` - The arguments from the call site
    pub fn bind(&self, func_name: &str, args: ArgValues) -> Result<BoundArguments, BindError> {
        self.bind_traced(func_name, args, &mut NoopTracer)
    }

    /// Same as [`Signature::bind`], reporting each binding decision to `tracer`.
    pub fn bind_traced<Tr: BindTracer + ?Sized>(
        &self,
        func_name: &str,
        args: ArgValues,
        tracer: &mut Tr,
    ) -> Result<BoundArguments, BindError> {
        tracer.on_bind(func_name, args.positional_len(), args.keyword_len());
        let result = self.bind_inner(func_name, args, tracer);
        if let Err(err) = &result {
            tracer.on_error(err);
        }
        result
    }

    fn bind_inner<Tr: BindTracer + ?Sized>(
        &self,
        func_name: &str,
        args: ArgValues,
        tracer: &mut Tr,
    ) -> Result<BoundArguments, BindError> {
        let (positional, mut keywords) = args.into_parts();
        let given = positional.len();

        // Fast path for plain signatures called with positionals only
        if self.bind_mode != BindMode::Complex
            && keywords.is_empty()
            && (self.required_positional..=self.max_positional).contains(&given)
        {
            return Ok(self.bind_positional_only(positional, tracer));
        }

        let mut arguments = IndexMap::with_capacity(self.params.len());
        let mut pos_iter = positional.into_iter();
        let mut kwonly_given = 0;

        // 1. and 2. Fill named parameters from positionals, keywords, then defaults
        for param in &self.params {
            let name = param.name.as_str();
            if param.kind != ParamKind::KeywordOnly
                && let Some(value) = pos_iter.next()
            {
                if param.kind == ParamKind::PositionalOrKeyword && keywords.contains_key(name) {
                    return Err(BindError::DuplicateArgument {
                        func: func_name.to_owned(),
                        param: name.to_owned(),
                    });
                }
                tracer.on_positional(name);
                arguments.insert(name.to_owned(), (param.kind, value));
            } else if param.kind != ParamKind::PositionalOnly
                && let Some(value) = keywords.shift_remove(name)
            {
                if param.kind == ParamKind::KeywordOnly {
                    kwonly_given += 1;
                }
                tracer.on_keyword(name);
                arguments.insert(name.to_owned(), (param.kind, value));
            } else if let Some(default) = &param.default {
                tracer.on_default(name);
                arguments.insert(name.to_owned(), (param.kind, default.clone()));
            } else {
                return Err(BindError::MissingArgument {
                    func: func_name.to_owned(),
                    param: name.to_owned(),
                    keyword_only: param.kind == ParamKind::KeywordOnly,
                });
            }
        }

        // 3. Collect surplus positional args into *args
        let surplus: Vec<Value> = pos_iter.collect();
        let var_args = match &self.var_args {
            Some(var_name) => {
                tracer.on_var_args(var_name, surplus.len());
                Some((var_name.clone(), surplus))
            }
            None if surplus.is_empty() => None,
            None => {
                return Err(BindError::TooManyPositionalArguments {
                    func: func_name.to_owned(),
                    min: self.required_positional,
                    max: self.max_positional,
                    given,
                    kwonly_given,
                });
            }
        };

        // 4. Collect unmatched keyword args into **kwargs
        let var_kwargs = match &self.var_kwargs {
            Some(var_name) => {
                tracer.on_var_kwargs(var_name, keywords.len());
                Some((var_name.clone(), keywords))
            }
            None => {
                if let Some(keyword) = keywords.keys().next() {
                    return Err(self.unmatched_keyword_error(func_name, keyword, &keywords));
                }
                None
            }
        };

        Ok(BoundArguments::new(arguments, var_args, var_kwargs))
    }

    /// Binds a positional-only call to a `Simple` or `SimpleWithDefaults` signature.
    ///
    /// The caller guarantees `required_positional <= given <= max_positional` and that
    /// no keywords were passed, so every parameter past `given` has a default.
    fn bind_positional_only<Tr: BindTracer + ?Sized>(&self, positional: Vec<Value>, tracer: &mut Tr) -> BoundArguments {
        let mut pos_iter = positional.into_iter();
        let arguments: IndexMap<String, (ParamKind, Value)> = self
            .params
            .iter()
            .filter_map(|param| {
                let value = if let Some(value) = pos_iter.next() {
                    tracer.on_positional(&param.name);
                    value
                } else {
                    tracer.on_default(&param.name);
                    param.default.clone()?
                };
                Some((param.name.clone(), (param.kind, value)))
            })
            .collect();
        debug_assert_eq!(arguments.len(), self.params.len());
        BoundArguments::new(arguments, None, None)
    }

    /// Builds the error for the first keyword that matched no parameter.
    ///
    /// Like CPython, a keyword naming a positional-only parameter takes precedence and
    /// the error lists every such keyword in the call.
    fn unmatched_keyword_error(&self, func_name: &str, keyword: &str, keywords: &IndexMap<String, Value>) -> BindError {
        let pos_only: SmallVec<[&str; 4]> = keywords
            .keys()
            .map(String::as_str)
            .filter(|k| self.is_positional_only(k))
            .collect();
        if pos_only.is_empty() {
            BindError::UnexpectedKeywordArgument {
                func: func_name.to_owned(),
                keyword: keyword.to_owned(),
            }
        } else {
            BindError::PositionalOnlyAsKeyword {
                func: func_name.to_owned(),
                params: pos_only.iter().map(|&k| k.to_owned()).collect(),
            }
        }
    }

    fn is_positional_only(&self, name: &str) -> bool {
        self.params
            .iter()
            .any(|p| p.kind == ParamKind::PositionalOnly && p.name == name)
    }

    /// Returns the number of named parameters (excluding *args/**kwargs).
    #[must_use]
    pub fn param_count(&self) -> usize {
        self.params.len()
    }

    /// Looks up a named (non-variadic) parameter.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Parameter> {
        self.params.iter().find(|p| p.name == name)
    }

    #[must_use]
    pub fn var_args_name(&self) -> Option<&str> {
        self.var_args.as_deref()
    }

    #[must_use]
    pub fn var_kwargs_name(&self) -> Option<&str> {
        self.var_kwargs.as_deref()
    }

    /// Returns the minimum number of positional arguments a call must supply
    /// when no keywords are used.
    #[must_use]
    pub fn required_positional_count(&self) -> usize {
        self.required_positional
    }

    /// Returns the maximum number of positional arguments accepted.
    ///
    /// Returns None if *args is present (unlimited positional args).
    #[must_use]
    pub fn max_positional_count(&self) -> Option<usize> {
        if self.var_args.is_some() {
            None
        } else {
            Some(self.max_positional)
        }
    }

    /// Returns whether binding can skip keyword lookups for positional-only calls.
    #[must_use]
    pub fn is_simple(&self) -> bool {
        self.bind_mode != BindMode::Complex
    }

    /// Returns every parameter, variadics included, in declaration order.
    #[must_use]
    pub fn parameters(&self) -> Vec<Parameter> {
        let mut out = Vec::with_capacity(self.params.len() + 2);
        let split = self.params.partition_point(|p| p.kind.is_positional());
        out.extend_from_slice(&self.params[..split]);
        if let Some(name) = &self.var_args {
            out.push(Parameter::var_positional(name.clone()));
        }
        out.extend_from_slice(&self.params[split..]);
        if let Some(name) = &self.var_kwargs {
            out.push(Parameter::var_keyword(name.clone()));
        }
        out
    }
}

impl TryFrom<Vec<Parameter>> for Signature {
    type Error = SignatureError;

    fn try_from(parameters: Vec<Parameter>) -> Result<Self, Self::Error> {
        Self::new(parameters)
    }
}

impl From<Signature> for Vec<Parameter> {
    fn from(signature: Signature) -> Self {
        signature.parameters()
    }
}

/// Renders the signature the way `inspect.signature` does, e.g. `(a, /, b='text', *args, c, **kw)`.
impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::new();
        let mut after_pos_only = false;
        let mut kwonly_marked = false;
        for param in self.parameters() {
            if after_pos_only && param.kind != ParamKind::PositionalOnly {
                parts.push("/".to_owned());
                after_pos_only = false;
            }
            match param.kind {
                ParamKind::PositionalOnly => after_pos_only = true,
                ParamKind::VarPositional => kwonly_marked = true,
                ParamKind::KeywordOnly if !kwonly_marked => {
                    parts.push("*".to_owned());
                    kwonly_marked = true;
                }
                _ => {}
            }
            parts.push(param.to_string());
        }
        if after_pos_only {
            parts.push("/".to_owned());
        }
        write!(f, "({})", parts.join(", "))
    }
}

/// Appends parameters to a signature in declaration order.
///
/// ```
/// use callbind::Signature;
///
/// let sig = Signature::builder()
///     .arg("a")
///     .arg_with_default("b", "text")
///     .var_args("args")
///     .build()
///     .unwrap();
/// assert_eq!(sig.to_string(), "(a, b='text', *args)");
/// ```
#[derive(Debug, Clone, Default)]
pub struct SignatureBuilder {
    params: Vec<Parameter>,
}

impl SignatureBuilder {
    #[must_use]
    pub fn param(mut self, param: Parameter) -> Self {
        self.params.push(param);
        self
    }

    #[must_use]
    pub fn positional_only(self, name: impl Into<String>) -> Self {
        self.param(Parameter::positional_only(name))
    }

    #[must_use]
    pub fn positional_only_with_default(self, name: impl Into<String>, default: impl Into<Value>) -> Self {
        self.param(Parameter::positional_only(name).with_default(default))
    }

    /// Appends a positional-or-keyword parameter.
    #[must_use]
    pub fn arg(self, name: impl Into<String>) -> Self {
        self.param(Parameter::positional_or_keyword(name))
    }

    #[must_use]
    pub fn arg_with_default(self, name: impl Into<String>, default: impl Into<Value>) -> Self {
        self.param(Parameter::positional_or_keyword(name).with_default(default))
    }

    #[must_use]
    pub fn var_args(self, name: impl Into<String>) -> Self {
        self.param(Parameter::var_positional(name))
    }

    #[must_use]
    pub fn keyword_only(self, name: impl Into<String>) -> Self {
        self.param(Parameter::keyword_only(name))
    }

    #[must_use]
    pub fn keyword_only_with_default(self, name: impl Into<String>, default: impl Into<Value>) -> Self {
        self.param(Parameter::keyword_only(name).with_default(default))
    }

    #[must_use]
    pub fn var_kwargs(self, name: impl Into<String>) -> Self {
        self.param(Parameter::var_keyword(name))
    }

    pub fn build(self) -> Result<Signature, SignatureError> {
        Signature::new(self.params)
    }
}

/// Python's hard keywords, as listed by `keyword.kwlist`.
const KEYWORDS: [&str; 35] = [
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class", "continue", "def", "del",
    "elif", "else", "except", "finally", "for", "from", "global", "if", "import", "in", "is", "lambda", "nonlocal",
    "not", "or", "pass", "raise", "return", "try", "while", "with", "yield",
];

fn is_keyword(name: &str) -> bool {
    KEYWORDS.contains(&name)
}

/// Returns whether `name` is a valid Python identifier.
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|first| first == '_' || first.is_alphabetic())
        && chars.all(|c| c == '_' || c.is_alphanumeric())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::exception::BindErrorKind;

    fn sig(params: Vec<Parameter>) -> Signature {
        Signature::new(params).unwrap()
    }

    #[test]
    fn bind_mode_follows_parameter_shape() {
        let simple = Signature::builder().arg("a").arg("b").build().unwrap();
        assert_eq!(simple.bind_mode, BindMode::Simple);
        let defaults = Signature::builder().arg("a").arg_with_default("b", 1).build().unwrap();
        assert_eq!(defaults.bind_mode, BindMode::SimpleWithDefaults);
        let complex = Signature::builder().arg("a").var_args("rest").build().unwrap();
        assert_eq!(complex.bind_mode, BindMode::Complex);
        assert!(!complex.is_simple());
    }

    #[test]
    fn fast_path_and_full_path_agree() {
        let fast = Signature::builder()
            .arg("a")
            .arg_with_default("b", "text")
            .build()
            .unwrap();
        let slow = Signature::builder()
            .arg("a")
            .arg_with_default("b", "text")
            .var_kwargs("kw")
            .build()
            .unwrap();
        let fast_bound = fast.bind("f", ArgValues::positional([1])).unwrap();
        let slow_bound = slow.bind("f", ArgValues::positional([1])).unwrap();
        let fast_pairs: Vec<_> = fast_bound.iter().collect();
        let slow_pairs: Vec<_> = slow_bound.iter().collect();
        assert_eq!(fast_pairs, slow_pairs);
    }

    #[test]
    fn fast_path_falls_back_on_wrong_count() {
        let simple = Signature::builder().arg("a").build().unwrap();
        let err = simple.bind("f", ArgValues::new()).unwrap_err();
        assert_eq!(err.kind(), BindErrorKind::MissingArgument);
        let err = simple.bind("f", ArgValues::positional([1, 2])).unwrap_err();
        assert_eq!(err.kind(), BindErrorKind::TooManyPositionalArguments);
    }

    #[test]
    fn missing_error_is_reported_before_surplus() {
        // the walk fails on `b` before surplus positionals are considered
        let s = sig(vec![
            Parameter::positional_or_keyword("a"),
            Parameter::keyword_only("b"),
        ]);
        let err = s.bind("f", ArgValues::positional([1, 2])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "f() missing 1 required keyword-only argument: 'b'"
        );
    }

    #[test]
    fn positional_only_keyword_goes_to_kwargs_when_declared() {
        let s = sig(vec![
            Parameter::positional_only("a"),
            Parameter::var_keyword("kw"),
        ]);
        let bound = s.bind("f", ArgValues::new().arg(1).kwarg("a", 2)).unwrap();
        assert_eq!(*bound["a"], 1.into());
        assert_eq!(*bound.var_kwargs().unwrap()["a"], 2.into());
    }

    #[test]
    fn positional_only_keyword_error_lists_all_names() {
        let s = sig(vec![
            Parameter::positional_only("a").with_default(0),
            Parameter::positional_only("b").with_default(0),
        ]);
        let err = s
            .bind("f", ArgValues::new().kwarg("b", 1).kwarg("zz", 2).kwarg("a", 3))
            .unwrap_err();
        assert_eq!(err.kind(), BindErrorKind::PositionalOnlyAsKeyword);
        assert_eq!(
            err.to_string(),
            "f() got some positional-only arguments passed as keyword arguments: 'b, a'"
        );
    }

    #[test]
    fn too_many_counts_keyword_only_arguments() {
        let s = sig(vec![
            Parameter::positional_or_keyword("a"),
            Parameter::keyword_only("k").with_default(0),
        ]);
        let err = s
            .bind("f", ArgValues::new().arg(1).arg(2).kwarg("k", 3))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "f() takes 1 positional argument but 2 positional arguments (and 1 keyword-only argument) were given"
        );
    }

    #[test]
    fn display_matches_inspect() {
        let s = sig(vec![
            Parameter::positional_only("a"),
            Parameter::positional_or_keyword("b").with_default("text"),
            Parameter::keyword_only("c"),
            Parameter::var_keyword("kw"),
        ]);
        assert_eq!(s.to_string(), "(a, /, b='text', *, c, **kw)");
        let s = sig(vec![
            Parameter::positional_or_keyword("a"),
            Parameter::var_positional("args"),
            Parameter::keyword_only("c").with_default(1),
        ]);
        assert_eq!(s.to_string(), "(a, *args, c=1)");
        assert_eq!(sig(vec![Parameter::positional_only("x")]).to_string(), "(x, /)");
        assert_eq!(sig(vec![]).to_string(), "()");
    }

    #[test]
    fn parameters_round_trip_declaration_order() {
        let declared = vec![
            Parameter::positional_only("a"),
            Parameter::positional_or_keyword("b"),
            Parameter::var_positional("args"),
            Parameter::keyword_only("c"),
            Parameter::var_keyword("kw"),
        ];
        assert_eq!(sig(declared.clone()).parameters(), declared);
    }

    #[test]
    fn identifiers() {
        assert!(is_identifier("a"));
        assert!(is_identifier("_private2"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("2a"));
        assert!(!is_identifier("a-b"));
        assert!(is_keyword("class"));
        assert!(!is_keyword("match"));
    }

    #[test]
    fn keywords_are_only_valid_positional_only_names() {
        let err = Signature::builder().arg("class").build().unwrap_err();
        assert_eq!(err.to_string(), "'class' is not a valid parameter name");
        for param in [
            Parameter::keyword_only("lambda"),
            Parameter::var_positional("None"),
            Parameter::var_keyword("from"),
        ] {
            assert!(matches!(Signature::new([param]), Err(SignatureError::InvalidName(_))));
        }
        let sig = Signature::builder().positional_only("class").build().unwrap();
        assert_eq!(sig.to_string(), "(class, /)");
    }
}
