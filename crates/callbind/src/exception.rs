use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumDiscriminants, EnumString, IntoStaticStr};

use crate::signature::ParamKind;

/// Result type alias for operations that can raise a Python-level exception.
pub type RunResult<T> = Result<T, Exception>;

/// Python exception types that binding, decorators and function bodies can raise.
///
/// Uses strum derives for automatic `Display`, `FromStr`, and `Into<&'static str>` implementations.
/// The string representation matches the variant name exactly (e.g., `TypeError` -> "TypeError").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr, Serialize, Deserialize)]
pub enum ExcType {
    /// Primary exception class, used by function bodies for generic failures.
    Exception,
    /// Raised by annotations that name a parameter the call never bound.
    KeyError,
    /// Raised by failed stdout writes.
    OSError,
    /// Call-site errors from the binder and failed decorator checks.
    TypeError,
    /// Invalid parameter declarations.
    ValueError,
}

/// A raised exception: its type plus an optional message argument.
///
/// This is the error value that crosses the public API. Binding, signature and
/// validation errors all convert into it, and function bodies raise it directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exception {
    exc_type: ExcType,
    message: Option<String>,
}

impl Exception {
    /// Creates an exception with a message argument.
    #[must_use]
    pub fn new(exc_type: ExcType, message: impl Into<String>) -> Self {
        Self {
            exc_type,
            message: Some(message.into()),
        }
    }

    /// Creates an exception without a message argument, like `raise ValueError`.
    #[must_use]
    pub fn bare(exc_type: ExcType) -> Self {
        Self {
            exc_type,
            message: None,
        }
    }

    #[must_use]
    pub fn type_error(message: impl Into<String>) -> Self {
        Self::new(ExcType::TypeError, message)
    }

    /// Creates a `KeyError` whose argument is the repr of the missing key.
    #[must_use]
    pub fn key_error(key: &str) -> Self {
        let mut repr = String::with_capacity(key.len() + 2);
        // writing to a String cannot fail
        let _ = crate::object::string_repr_fmt(key, &mut repr);
        Self::new(ExcType::KeyError, repr)
    }

    #[must_use]
    pub fn exc_type(&self) -> ExcType {
        self.exc_type
    }

    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

impl fmt::Display for Exception {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => write!(f, "{}: {message}", self.exc_type),
            None => write!(f, "{}", self.exc_type),
        }
    }
}

impl std::error::Error for Exception {}

/// A call that cannot be bound to a signature.
///
/// Every variant is a user-input error raised as `TypeError` and carries the
/// function name plus the offending parameter or keyword, so callers can build
/// their own diagnostics. `Display` matches CPython's message for the same call.
#[derive(Debug, Clone, PartialEq, Eq, EnumDiscriminants)]
#[strum_discriminants(name(BindErrorKind), derive(Display, IntoStaticStr, Hash))]
pub enum BindError {
    /// A required parameter received no value from any source.
    ///
    /// Only the first missing parameter is reported, in the singular form
    /// `missing 1 required ...`.
    MissingArgument {
        func: String,
        param: String,
        keyword_only: bool,
    },
    /// A parameter was supplied both positionally and by a same-named keyword.
    DuplicateArgument { func: String, param: String },
    /// More positional values than the signature can absorb, with no `*args` sink.
    TooManyPositionalArguments {
        func: String,
        /// Number of positional parameters without a default.
        min: usize,
        /// Number of positional parameters.
        max: usize,
        given: usize,
        /// Keyword-only parameters that were supplied, reported alongside the count.
        kwonly_given: usize,
    },
    /// A keyword matches no parameter and there is no `**kwargs` sink.
    UnexpectedKeywordArgument { func: String, keyword: String },
    /// Positional-only parameters were named as keywords and there is no `**kwargs` sink.
    PositionalOnlyAsKeyword { func: String, params: Vec<String> },
}

impl BindError {
    #[must_use]
    pub fn kind(&self) -> BindErrorKind {
        self.into()
    }

    /// The name of the function whose call failed to bind.
    #[must_use]
    pub fn func_name(&self) -> &str {
        match self {
            Self::MissingArgument { func, .. }
            | Self::DuplicateArgument { func, .. }
            | Self::TooManyPositionalArguments { func, .. }
            | Self::UnexpectedKeywordArgument { func, .. }
            | Self::PositionalOnlyAsKeyword { func, .. } => func,
        }
    }

    /// The parameter or keyword name the error is about, if it names one.
    #[must_use]
    pub fn parameter(&self) -> Option<&str> {
        match self {
            Self::MissingArgument { param, .. } | Self::DuplicateArgument { param, .. } => Some(param),
            Self::UnexpectedKeywordArgument { keyword, .. } => Some(keyword),
            Self::PositionalOnlyAsKeyword { params, .. } => params.first().map(String::as_str),
            Self::TooManyPositionalArguments { .. } => None,
        }
    }
}

impl fmt::Display for BindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingArgument {
                func,
                param,
                keyword_only,
            } => {
                let group = if *keyword_only { "keyword-only" } else { "positional" };
                write!(f, "{func}() missing 1 required {group} argument: '{param}'")
            }
            Self::DuplicateArgument { func, param } => {
                write!(f, "{func}() got multiple values for argument '{param}'")
            }
            Self::TooManyPositionalArguments {
                func,
                min,
                max,
                given,
                kwonly_given,
            } => {
                // mirrors CPython's too_many_positional()
                let has_defaults = min != max;
                let takes = if has_defaults {
                    format!("from {min} to {max}")
                } else {
                    max.to_string()
                };
                let takes_plural = if *max != 1 || has_defaults { "s" } else { "" };
                write!(f, "{func}() takes {takes} positional argument{takes_plural} but {given}")?;
                if *kwonly_given > 0 {
                    let given_plural = if *given == 1 { "" } else { "s" };
                    let kwonly_plural = if *kwonly_given == 1 { "" } else { "s" };
                    write!(
                        f,
                        " positional argument{given_plural} (and {kwonly_given} keyword-only argument{kwonly_plural})"
                    )?;
                }
                let verb = if *given == 1 && *kwonly_given == 0 { "was" } else { "were" };
                write!(f, " {verb} given")
            }
            Self::UnexpectedKeywordArgument { func, keyword } => {
                write!(f, "{func}() got an unexpected keyword argument '{keyword}'")
            }
            Self::PositionalOnlyAsKeyword { func, params } => {
                write!(
                    f,
                    "{func}() got some positional-only arguments passed as keyword arguments: '{}'",
                    params.join(", ")
                )
            }
        }
    }
}

impl std::error::Error for BindError {}

impl From<BindError> for Exception {
    fn from(err: BindError) -> Self {
        Self::type_error(err.to_string())
    }
}

/// A parameter list that violates the rules of a Python signature.
///
/// Raised as `ValueError` with the same messages `inspect.Signature` uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignatureError {
    /// The name is not a valid Python identifier.
    InvalidName(String),
    DuplicateParameter(String),
    /// A parameter kind appears after a kind that must follow it.
    WrongOrder { before: ParamKind, after: ParamKind },
    /// More than one `*args` or more than one `**kwargs`.
    DuplicateVariadic(ParamKind),
    /// A required positional parameter follows one with a default.
    NonDefaultAfterDefault(String),
    /// `*args` or `**kwargs` declared with a default value.
    VariadicDefault(ParamKind),
}

impl fmt::Display for SignatureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidName(name) => write!(f, "'{name}' is not a valid parameter name"),
            Self::DuplicateParameter(name) => write!(f, "duplicate parameter name: '{name}'"),
            Self::WrongOrder { before, after } => write!(
                f,
                "wrong parameter order: {} parameter before {} parameter",
                before.description(),
                after.description()
            ),
            Self::DuplicateVariadic(kind) => write!(f, "more than one {} parameter", kind.description()),
            Self::NonDefaultAfterDefault(_) => f.write_str("non-default argument follows default argument"),
            Self::VariadicDefault(kind) => {
                write!(f, "{} parameters cannot have default values", kind.description())
            }
        }
    }
}

impl std::error::Error for SignatureError {}

impl From<SignatureError> for Exception {
    fn from(err: SignatureError) -> Self {
        Self::new(ExcType::ValueError, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_type_and_message() {
        let exc = Exception::type_error("f() got an unexpected keyword argument 'z'");
        assert_eq!(exc.to_string(), "TypeError: f() got an unexpected keyword argument 'z'");
        assert_eq!(Exception::bare(ExcType::ValueError).to_string(), "ValueError");
    }

    #[test]
    fn key_error_uses_repr() {
        let exc = Exception::key_error("c");
        assert_eq!(exc.exc_type(), ExcType::KeyError);
        assert_eq!(exc.message(), Some("'c'"));
    }

    #[test]
    fn exc_type_round_trips_through_str() {
        let name: &'static str = ExcType::TypeError.into();
        assert_eq!(name, "TypeError");
        assert_eq!("KeyError".parse::<ExcType>().unwrap(), ExcType::KeyError);
    }

    #[test]
    fn too_many_positional_messages() {
        let err = |min, max, given, kwonly_given| BindError::TooManyPositionalArguments {
            func: "f".to_owned(),
            min,
            max,
            given,
            kwonly_given,
        };
        assert_eq!(err(1, 1, 2, 0).to_string(), "f() takes 1 positional argument but 2 were given");
        assert_eq!(err(0, 0, 1, 0).to_string(), "f() takes 0 positional arguments but 1 was given");
        assert_eq!(
            err(1, 2, 3, 0).to_string(),
            "f() takes from 1 to 2 positional arguments but 3 were given"
        );
        assert_eq!(
            err(1, 1, 2, 1).to_string(),
            "f() takes 1 positional argument but 2 positional arguments (and 1 keyword-only argument) were given"
        );
    }

    #[test]
    fn bind_errors_become_type_errors() {
        let err = BindError::MissingArgument {
            func: "f".to_owned(),
            param: "a".to_owned(),
            keyword_only: false,
        };
        assert_eq!(err.kind(), BindErrorKind::MissingArgument);
        assert_eq!(err.parameter(), Some("a"));
        let exc = Exception::from(err);
        assert_eq!(exc.exc_type(), ExcType::TypeError);
        assert_eq!(exc.message(), Some("f() missing 1 required positional argument: 'a'"));
    }

    #[test]
    fn signature_errors_become_value_errors() {
        let exc = Exception::from(SignatureError::VariadicDefault(ParamKind::VarPositional));
        assert_eq!(exc.exc_type(), ExcType::ValueError);
        assert_eq!(
            exc.message(),
            Some("variadic positional parameters cannot have default values")
        );
    }
}
