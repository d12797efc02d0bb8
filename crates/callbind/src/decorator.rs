//! Decorators that check bound arguments against per-parameter annotations.
//!
//! Both decorators are thin clients of the binder: they bind the call, look each
//! annotated parameter up in the bound arguments, and on success forward the same
//! binding to the wrapped callable's [`Callable::apply`]. Stacked decorators bind
//! once and run their checks outermost first.

use std::{fmt, sync::Arc};

use crate::{
    args::BoundArguments,
    exception::{Exception, RunResult},
    expectation::Annotations,
    function::Callable,
    io::PrintWriter,
    object::Object,
    signature::Signature,
};

/// Which check a [`Decorated`] callable runs, and how it words failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckMode {
    /// Annotations are types; failures read `a must be a <class 'int'>`.
    TypeCheck,
    /// Annotations are predicates; failures read `Argument 'a' failed to validate`.
    Validate,
}

/// A bound argument that did not satisfy its annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    param: String,
    expected: String,
    mode: CheckMode,
}

impl ValidationError {
    /// The offending parameter.
    #[must_use]
    pub fn parameter(&self) -> &str {
        &self.param
    }

    /// The failed expectation, as described by [`Expectation::describe`](crate::Expectation::describe).
    #[must_use]
    pub fn expected(&self) -> &str {
        &self.expected
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mode {
            CheckMode::TypeCheck => write!(f, "{} must be a {}", self.param, self.expected),
            CheckMode::Validate => write!(f, "Argument '{}' failed to validate", self.param),
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for Exception {
    fn from(err: ValidationError) -> Self {
        Self::type_error(err.to_string())
    }
}

/// A callable wrapped by [`check_types`] or [`validate`].
///
/// Shares the wrapped callable's name and signature, so decorators stack.
#[derive(Clone)]
pub struct Decorated {
    inner: Arc<dyn Callable>,
    annotations: Annotations,
    mode: CheckMode,
}

impl Decorated {
    #[must_use]
    pub fn new(inner: impl Callable + 'static, annotations: Annotations, mode: CheckMode) -> Self {
        Self {
            inner: Arc::new(inner),
            annotations,
            mode,
        }
    }

    /// Checks every annotation against already-bound arguments, in annotation order.
    ///
    /// Variadic parameters are checked as the tuple or dict the body would see.
    ///
    /// # Errors
    /// `KeyError` if an annotation names a parameter that is not bound, or a
    /// `TypeError` built from the [`ValidationError`] of the first failed check.
    pub fn check(&self, bound: &BoundArguments) -> RunResult<()> {
        match self.validation_error(bound)? {
            Some(err) => Err(err.into()),
            None => Ok(()),
        }
    }

    /// Like [`Decorated::check`] but hands back the first failed expectation as a
    /// typed [`ValidationError`] instead of raising it.
    ///
    /// # Errors
    /// `KeyError` if an annotation names a parameter that is not bound.
    pub fn validation_error(&self, bound: &BoundArguments) -> RunResult<Option<ValidationError>> {
        for (name, expectation) in self.annotations.iter() {
            let Some(value) = bound.get_object(name) else {
                return Err(Exception::key_error(name));
            };
            if !expectation.check(&value) {
                return Ok(Some(ValidationError {
                    param: name.to_owned(),
                    expected: expectation.describe(),
                    mode: self.mode,
                }));
            }
        }
        Ok(None)
    }
}

impl fmt::Debug for Decorated {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Decorated")
            .field("name", &self.inner.name())
            .field("mode", &self.mode)
            .field("annotations", &self.annotations)
            .finish()
    }
}

impl Callable for Decorated {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn signature(&self) -> &Signature {
        self.inner.signature()
    }

    /// Checks the annotations, then forwards the same binding to the wrapped callable.
    fn apply(&self, bound: &BoundArguments, print: &mut dyn PrintWriter) -> RunResult<Object> {
        self.check(bound)?;
        self.inner.apply(bound, print)
    }
}

/// Checks that annotated arguments are instances of their annotated [`Type`](crate::Type).
///
/// Non-type expectations are accepted too; their `describe()` text is used in the message.
#[must_use]
pub fn check_types(func: impl Callable + 'static, annotations: Annotations) -> Decorated {
    Decorated::new(func, annotations, CheckMode::TypeCheck)
}

/// Checks that annotated arguments satisfy their annotated [`Predicate`](crate::Predicate).
#[must_use]
pub fn validate(func: impl Callable + 'static, annotations: Annotations) -> Decorated {
    Decorated::new(func, annotations, CheckMode::Validate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        args::ArgValues,
        exception::ExcType,
        expectation::Predicate,
        function::Function,
        io::{CollectStringPrint, NoPrint},
        types::Type,
    };

    fn collect(name: &str, sig: Signature) -> Function {
        Function::new(name, sig, |bound, _| {
            Ok(Object::Tuple(bound.args().iter().map(|v| Object::clone(v)).collect()))
        })
    }

    #[test]
    fn var_args_are_checked_as_a_tuple() {
        let sig = Signature::builder().var_args("rest").build().unwrap();
        let non_empty = Predicate::new("non-empty", Object::is_truthy);
        let f = validate(collect("f", sig), Annotations::new().with("rest", non_empty));
        assert!(f.call(ArgValues::positional([1]), &mut NoPrint).is_ok());
        let err = f.call(ArgValues::new(), &mut NoPrint).unwrap_err();
        assert_eq!(err.message(), Some("Argument 'rest' failed to validate"));
    }

    #[test]
    fn unknown_annotation_is_a_key_error() {
        let sig = Signature::builder().arg("a").build().unwrap();
        let f = check_types(collect("f", sig.clone()), Annotations::new().with("c", Type::Int));
        let err = f.call(ArgValues::positional([1]), &mut NoPrint).unwrap_err();
        assert_eq!(err.exc_type(), ExcType::KeyError);
        assert_eq!(err.message(), Some("'c'"));

        // the typed check agrees with apply on the same binding
        let bound = sig.bind("f", ArgValues::positional([1])).unwrap();
        let typed = f.validation_error(&bound).unwrap_err();
        let applied = f.apply(&bound, &mut NoPrint).unwrap_err();
        assert_eq!(typed, applied);
        assert_eq!(typed, Exception::key_error("c"));
    }

    #[test]
    fn decorators_stack() {
        let sig = Signature::builder().arg("a").build().unwrap();
        let inner = check_types(collect("f", sig), Annotations::new().with("a", Type::Int));
        let outer = validate(
            inner,
            Annotations::new().with("a", Predicate::new("truthy", Object::is_truthy)),
        );
        assert_eq!(outer.name(), "f");
        // the outer check runs first
        let err = outer.call(ArgValues::positional([0]), &mut NoPrint).unwrap_err();
        assert_eq!(err.message(), Some("Argument 'a' failed to validate"));
        // then the inner one
        let err = outer.call(ArgValues::positional(["x"]), &mut NoPrint).unwrap_err();
        assert_eq!(err.message(), Some("a must be a <class 'int'>"));
        assert!(outer.call(ArgValues::positional([2]), &mut NoPrint).is_ok());
    }

    #[test]
    fn apply_checks_before_forwarding() {
        let sig = Signature::builder().arg("a").build().unwrap();
        let f = check_types(collect("f", sig.clone()), Annotations::new().with("a", Type::Int));
        let mut print = CollectStringPrint::new();

        let bound = sig.bind("f", ArgValues::positional(["text"])).unwrap();
        let err = f.validation_error(&bound).unwrap().unwrap();
        assert_eq!(err.parameter(), "a");
        assert_eq!(f.apply(&bound, &mut print).unwrap_err().exc_type(), ExcType::TypeError);

        let bound = sig.bind("f", ArgValues::positional([7])).unwrap();
        assert_eq!(f.apply(&bound, &mut print).unwrap(), Object::Tuple(vec![Object::Int(7)]));
    }
}
