use std::{
    fmt::{self, Write},
    ops::Deref,
    sync::Arc,
};

use indexmap::IndexMap;

use crate::types::Type;

/// A Python value that can be passed to, bound by, or returned from a callable.
///
/// `Object` owns all its data and can be freely cloned, compared, or serialized.
/// Call sites wrap objects in [`Value`] handles before binding so that defaults
/// can be shared by identity rather than copied.
///
/// # Binary Serialization
///
/// For binary serialization (e.g., with postcard), `Object` uses derived serde
/// with the externally tagged format (`{"Int": 42}`).
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub enum Object {
    /// Python's `None` singleton.
    #[serde(alias = "none", alias = "NoneType")]
    None,
    /// Python boolean (`True` or `False`).
    #[serde(alias = "bool")]
    Bool(bool),
    /// Python integer (64-bit signed).
    #[serde(alias = "int")]
    Int(i64),
    /// Python float (64-bit IEEE 754).
    #[serde(alias = "float")]
    Float(f64),
    /// Python string (UTF-8).
    #[serde(alias = "str")]
    String(String),
    /// Python bytes object.
    #[serde(alias = "bytes")]
    Bytes(Vec<u8>),
    /// Python list (mutable sequence).
    #[serde(alias = "list")]
    List(Vec<Self>),
    /// Python tuple (immutable sequence).
    ///
    /// Surplus positional arguments collected into `*args` are exposed as a tuple.
    #[serde(alias = "tuple")]
    Tuple(Vec<Self>),
    /// Python dictionary (insertion-ordered mapping).
    ///
    /// Unmatched keyword arguments collected into `**kwargs` are exposed as a dict.
    #[serde(alias = "dict")]
    Dict(DictPairs),
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            _ => self.repr_fmt(f),
        }
    }
}

impl Object {
    /// Creates a dict object from key-value pairs.
    pub fn dict(dict: impl Into<DictPairs>) -> Self {
        Self::Dict(dict.into())
    }

    /// Returns the Python `repr()` string for this value.
    #[must_use]
    pub fn py_repr(&self) -> String {
        let mut s = String::new();
        // writing to a String cannot fail
        let _ = self.repr_fmt(&mut s);
        s
    }

    fn repr_fmt(&self, f: &mut impl Write) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Bool(true) => f.write_str("True"),
            Self::Bool(false) => f.write_str("False"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => {
                if v.is_nan() {
                    return f.write_str("nan");
                }
                if v.is_infinite() {
                    return f.write_str(if *v > 0.0 { "inf" } else { "-inf" });
                }
                float_repr_fmt(*v, f)
            }
            Self::String(s) => string_repr_fmt(s, f),
            Self::Bytes(b) => bytes_repr_fmt(b, f),
            Self::List(items) => {
                f.write_char('[')?;
                repr_items(items, f)?;
                f.write_char(']')
            }
            Self::Tuple(items) => {
                f.write_char('(')?;
                repr_items(items, f)?;
                if items.len() == 1 {
                    f.write_char(',')?;
                }
                f.write_char(')')
            }
            Self::Dict(d) => {
                f.write_char('{')?;
                let mut iter = d.iter();
                if let Some((k, v)) = iter.next() {
                    k.repr_fmt(f)?;
                    f.write_str(": ")?;
                    v.repr_fmt(f)?;
                    for (k, v) in iter {
                        f.write_str(", ")?;
                        k.repr_fmt(f)?;
                        f.write_str(": ")?;
                        v.repr_fmt(f)?;
                    }
                }
                f.write_char('}')
            }
        }
    }

    /// Returns `true` if this value is "truthy" according to Python's truth testing rules.
    ///
    /// `None`, `False`, zero numbers and empty collections are falsy; everything else is truthy.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::None => false,
            Self::Bool(b) => *b,
            Self::Int(i) => *i != 0,
            Self::Float(f) => *f != 0.0,
            Self::String(s) => !s.is_empty(),
            Self::Bytes(b) => !b.is_empty(),
            Self::List(l) => !l.is_empty(),
            Self::Tuple(t) => !t.is_empty(),
            Self::Dict(d) => !d.is_empty(),
        }
    }

    /// Returns the exact Python type of this value, as `type(x)` would.
    #[must_use]
    pub fn py_type(&self) -> Type {
        match self {
            Self::None => Type::NoneType,
            Self::Bool(_) => Type::Bool,
            Self::Int(_) => Type::Int,
            Self::Float(_) => Type::Float,
            Self::String(_) => Type::Str,
            Self::Bytes(_) => Type::Bytes,
            Self::List(_) => Type::List,
            Self::Tuple(_) => Type::Tuple,
            Self::Dict(_) => Type::Dict,
        }
    }

    /// Returns the Python type name for this value (e.g., `"int"`, `"str"`, `"list"`).
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.py_type().into()
    }

    /// Returns the integer value of an `int` (or `bool`, which subclasses `int`).
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            Self::Bool(b) => Some(i64::from(*b)),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

/// Writes a finite float the way CPython's `repr` does: shortest round-trip digits,
/// switching to exponent form below `1e-4` and from `1e16` up.
fn float_repr_fmt(v: f64, f: &mut impl Write) -> fmt::Result {
    let sci = format!("{v:e}");
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);
    if !(-4..16).contains(&exp) {
        let sign = if exp < 0 { '-' } else { '+' };
        return write!(f, "{mantissa}e{sign}{:02}", exp.unsigned_abs());
    }
    let s = v.to_string();
    f.write_str(&s)?;
    if !s.contains('.') {
        f.write_str(".0")?;
    }
    Ok(())
}

fn repr_items(items: &[Object], f: &mut impl Write) -> fmt::Result {
    let mut iter = items.iter();
    if let Some(first) = iter.next() {
        first.repr_fmt(f)?;
        for item in iter {
            f.write_str(", ")?;
            item.repr_fmt(f)?;
        }
    }
    Ok(())
}

/// Writes a CPython-compatible repr of a string.
///
/// Single quotes are used unless the string contains a single quote and no double quote.
pub(crate) fn string_repr_fmt(s: &str, f: &mut impl Write) -> fmt::Result {
    let quote = if s.contains('\'') && !s.contains('"') { '"' } else { '\'' };
    f.write_char(quote)?;
    for c in s.chars() {
        match c {
            '\\' => f.write_str("\\\\")?,
            '\t' => f.write_str("\\t")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            c if c == quote => {
                f.write_char('\\')?;
                f.write_char(c)?;
            }
            c if (c as u32) < 0x20 || c as u32 == 0x7f => write!(f, "\\x{:02x}", c as u32)?,
            c => f.write_char(c)?,
        }
    }
    f.write_char(quote)
}

fn bytes_repr_fmt(bytes: &[u8], f: &mut impl Write) -> fmt::Result {
    let has_single = bytes.contains(&b'\'');
    let has_double = bytes.contains(&b'"');
    let quote = if has_single && !has_double { '"' } else { '\'' };

    f.write_char('b')?;
    f.write_char(quote)?;
    for &byte in bytes {
        match byte {
            b'\\' => f.write_str("\\\\")?,
            b'\t' => f.write_str("\\t")?,
            b'\n' => f.write_str("\\n")?,
            b'\r' => f.write_str("\\r")?,
            b'\'' if quote == '\'' => f.write_str("\\'")?,
            b'"' if quote == '"' => f.write_str("\\\"")?,
            0x20..=0x7e => f.write_char(char::from(byte))?,
            _ => write!(f, "\\x{byte:02x}")?,
        }
    }
    f.write_char(quote)
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::None, Self::None) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            // `True == 1` holds in Python
            (Self::Bool(a), Self::Int(b)) | (Self::Int(b), Self::Bool(a)) => i64::from(*a) == *b,
            // Use to_bits() so equality stays reflexive for NaN
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Bytes(a), Self::Bytes(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Tuple(a), Self::Tuple(b)) => a == b,
            (Self::Dict(a), Self::Dict(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Object {}

impl From<bool> for Object {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Object {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Object {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for Object {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Object {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for Object {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

/// Error returned when an `Object` cannot be converted to the requested Rust type.
#[derive(Debug)]
pub struct ConversionError {
    /// The type name that was expected (e.g., "int", "str").
    pub expected: &'static str,
    /// The actual type name of the `Object` (e.g., "list", "NoneType").
    pub actual: &'static str,
}

impl ConversionError {
    #[must_use]
    pub fn new(expected: &'static str, actual: &'static str) -> Self {
        Self { expected, actual }
    }
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected {}, got {}", self.expected, self.actual)
    }
}

impl std::error::Error for ConversionError {}

impl TryFrom<&Object> for i64 {
    type Error = ConversionError;

    fn try_from(value: &Object) -> Result<Self, Self::Error> {
        value
            .as_int()
            .ok_or_else(|| ConversionError::new("int", value.type_name()))
    }
}

/// A collection of key-value pairs representing Python dictionary contents.
///
/// Used by `Object::Dict` to store dictionary entries while preserving insertion order.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DictPairs(Vec<(Object, Object)>);

impl From<Vec<(Object, Object)>> for DictPairs {
    fn from(pairs: Vec<(Object, Object)>) -> Self {
        Self(pairs)
    }
}

impl From<IndexMap<String, Object>> for DictPairs {
    fn from(map: IndexMap<String, Object>) -> Self {
        map.into_iter().map(|(k, v)| (Object::String(k), v)).collect()
    }
}

impl IntoIterator for DictPairs {
    type Item = (Object, Object);
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a DictPairs {
    type Item = &'a (Object, Object);
    type IntoIter = std::slice::Iter<'a, (Object, Object)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(Object, Object)> for DictPairs {
    fn from_iter<T: IntoIterator<Item = (Object, Object)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl DictPairs {
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Looks up the value stored under a string key.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&Object> {
        self.0
            .iter()
            .find(|(k, _)| k.as_str() == Some(key))
            .map(|(_, v)| v)
    }

    fn iter(&self) -> impl Iterator<Item = &(Object, Object)> {
        self.0.iter()
    }
}

/// A shared handle to an [`Object`].
///
/// Cloning a `Value` clones the handle, never the object: binding moves call-site
/// values into the result and hands out the declared default itself when a
/// parameter is not supplied. [`Value::is`] is Python's `is` operator on handles.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(from = "Object", into = "Object")]
pub struct Value(Arc<Object>);

impl Value {
    #[must_use]
    pub fn new(object: Object) -> Self {
        Self(Arc::new(object))
    }

    /// Returns `true` if both handles point at the same object.
    #[must_use]
    pub fn is(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Returns the wrapped object, cloning it only if other handles remain.
    #[must_use]
    pub fn into_object(self) -> Object {
        Arc::unwrap_or_clone(self.0)
    }
}

impl Deref for Value {
    type Target = Object;

    fn deref(&self) -> &Object {
        &self.0
    }
}

impl AsRef<Object> for Value {
    fn as_ref(&self) -> &Object {
        &self.0
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.0, f)
    }
}

impl From<Object> for Value {
    fn from(object: Object) -> Self {
        Self::new(object)
    }
}

impl From<Value> for Object {
    fn from(value: Value) -> Self {
        value.into_object()
    }
}

macro_rules! value_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Self::new(Object::from(value))
                }
            }
        )*
    };
}

value_from!(bool, i64, i32, f64, &str, String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repr_matches_python() {
        assert_eq!(Object::from("other text").py_repr(), "'other text'");
        assert_eq!(Object::from("it's").py_repr(), "\"it's\"");
        assert_eq!(Object::Float(2.0).py_repr(), "2.0");
        assert_eq!(Object::Float(-0.0).py_repr(), "-0.0");
        assert_eq!(Object::Float(0.0001).py_repr(), "0.0001");
        assert_eq!(Object::Float(1e15).py_repr(), "1000000000000000.0");
        assert_eq!(Object::Float(1e16).py_repr(), "1e+16");
        assert_eq!(Object::Float(1e20).py_repr(), "1e+20");
        assert_eq!(Object::Float(-1.5e300).py_repr(), "-1.5e+300");
        assert_eq!(Object::Float(1e-7).py_repr(), "1e-07");
        assert_eq!(Object::Float(2.5e-5).py_repr(), "2.5e-05");
        assert_eq!(Object::Tuple(vec![Object::Int(1)]).py_repr(), "(1,)");
        assert_eq!(
            Object::Tuple(vec![Object::Int(1), Object::from("text")]).py_repr(),
            "(1, 'text')"
        );
        assert_eq!(Object::Bytes(b"a'b".to_vec()).py_repr(), "b\"a'b\"");
        let dict = Object::dict(vec![(Object::from("k"), Object::None)]);
        assert_eq!(dict.py_repr(), "{'k': None}");
    }

    #[test]
    fn bool_compares_equal_to_int() {
        assert_eq!(Object::Bool(true), Object::Int(1));
        assert_ne!(Object::Bool(false), Object::Int(1));
    }

    #[test]
    fn value_clone_shares_object() {
        let a = Value::from("text");
        let b = a.clone();
        let c = Value::from("text");
        assert!(a.is(&b));
        assert!(!a.is(&c));
        assert_eq!(a, c);
    }

    #[test]
    fn conversions_report_actual_type() {
        let err = i64::try_from(&Object::from("x")).unwrap_err();
        assert_eq!(err.to_string(), "expected int, got str");
        assert_eq!(i64::try_from(&Object::Bool(true)).unwrap(), 1);
    }
}
