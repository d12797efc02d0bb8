use std::fmt;

use strum::{EnumString, IntoStaticStr};

use crate::object::Object;

/// Represents the Python type of a value.
///
/// Used as the expectation in type-checking annotations (`a: int`) and parsed
/// from the builtin type names (`"int".parse::<Type>()`).
///
/// `Display` renders the bare name (`int`); [`Type::py_repr`] renders the class
/// repr (`<class 'int'>`) used in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, IntoStaticStr, serde::Serialize, serde::Deserialize)]
#[strum(serialize_all = "lowercase")]
pub enum Type {
    #[strum(serialize = "NoneType")]
    NoneType,
    Bool,
    Int,
    Float,
    Str,
    Bytes,
    List,
    Tuple,
    Dict,
}

impl Type {
    /// Returns whether `self` is `other` or one of its subclasses.
    ///
    /// The only subclass relation among builtin value types is `bool` <: `int`.
    #[must_use]
    pub fn is_subclass_of(self, other: Self) -> bool {
        self == other || (self == Self::Bool && other == Self::Int)
    }

    /// Python's `isinstance(value, self)`.
    #[must_use]
    pub fn is_instance(self, value: &Object) -> bool {
        value.py_type().is_subclass_of(self)
    }

    #[must_use]
    pub fn py_repr(self) -> String {
        format!("<class '{self}'>")
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name: &'static str = self.into();
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool_is_an_int() {
        assert!(Type::Int.is_instance(&Object::Bool(true)));
        assert!(!Type::Bool.is_instance(&Object::Int(1)));
        assert!(!Type::Int.is_instance(&Object::from("1")));
    }

    #[test]
    fn names_match_builtins() {
        assert_eq!(Type::Str.to_string(), "str");
        assert_eq!(Type::NoneType.to_string(), "NoneType");
        assert_eq!(Type::Int.py_repr(), "<class 'int'>");
        assert_eq!("dict".parse::<Type>().unwrap(), Type::Dict);
    }
}
