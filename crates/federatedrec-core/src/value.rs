//! Loosely-typed parameter values.
//!
//! Callers hand parameters over as JSON-like trees where a field may be a bare
//! string in one config and a mapping in the next. [`ParamValue`] is the
//! boundary representation for that input; everything past the normalizers in
//! [`crate::params`] works on strict types.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A dynamically typed parameter value.
///
/// Deserializes from any JSON value: integers stay [`ParamValue::Int`], other
/// numbers become [`ParamValue::Float`] and `null` is [`ParamValue::None`].
#[derive(Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    #[default]
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<ParamValue>),
    Map(BTreeMap<String, ParamValue>),
}

impl ParamValue {
    /// Returns the name of the value's type as it appears in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            ParamValue::None => "NoneType",
            ParamValue::Bool(_) => "bool",
            ParamValue::Int(_) => "int",
            ParamValue::Float(_) => "float",
            ParamValue::String(_) => "str",
            ParamValue::List(_) => "list",
            ParamValue::Map(_) => "dict",
        }
    }

    /// Returns the value as `f64` if it is an integer or a float.
    ///
    /// Booleans are not treated as numbers.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            ParamValue::Int(v) => Some(*v as f64),
            ParamValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the value as `i64` if it is an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ParamValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, ParamValue>> {
        match self {
            ParamValue::Map(v) => Some(v),
            _ => None,
        }
    }

    /// Returns true for `None`, empty strings, empty lists and empty maps.
    pub fn is_empty(&self) -> bool {
        match self {
            ParamValue::None => true,
            ParamValue::String(v) => v.is_empty(),
            ParamValue::List(v) => v.is_empty(),
            ParamValue::Map(v) => v.is_empty(),
            _ => false,
        }
    }

    fn to_debug_string(&self) -> String {
        match self {
            ParamValue::None => "None".to_string(),
            ParamValue::Bool(v) => v.to_string(),
            ParamValue::Int(v) => v.to_string(),
            ParamValue::Float(v) => format!("{:?}", v),
            ParamValue::String(v) => format!("\"{}\"", v),
            ParamValue::List(v) => {
                let items = v
                    .iter()
                    .map(|x| x.to_debug_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("[{}]", items)
            }
            ParamValue::Map(v) => {
                let items = v
                    .iter()
                    .map(|(k, val)| format!("{:?}: {}", k, val.to_debug_string()))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{{{}}}", items)
            }
        }
    }
}

impl fmt::Debug for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_debug_string())
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_debug_string())
    }
}

macro_rules! impl_from {
    ($t:ty, $variant:ident) => {
        impl From<$t> for ParamValue {
            fn from(value: $t) -> Self {
                ParamValue::$variant(value)
            }
        }
    };
}

impl_from!(bool, Bool);
impl_from!(i64, Int);
impl_from!(f64, Float);
impl_from!(String, String);
impl_from!(BTreeMap<String, ParamValue>, Map);

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Int(value.into())
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::String(value.to_string())
    }
}

impl<T> From<Vec<T>> for ParamValue
where
    T: Into<ParamValue>,
{
    fn from(value: Vec<T>) -> Self {
        ParamValue::List(value.into_iter().map(|v| v.into()).collect())
    }
}

impl<T> From<Option<T>> for ParamValue
where
    T: Into<ParamValue>,
{
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(ParamValue::None)
    }
}

/// Builds a [`ParamValue::Map`] from `key => value` pairs.
///
/// ```
/// use federatedrec_core::param_map;
///
/// let early_stop = param_map! { "early_stop" => "abs", "eps" => 0.01 };
/// assert_eq!(early_stop.as_map().unwrap().len(), 2);
/// ```
#[macro_export]
macro_rules! param_map {
    ($($key:expr => $value:expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut map = ::std::collections::BTreeMap::<String, $crate::ParamValue>::new();
        $(map.insert(($key).to_string(), $crate::ParamValue::from($value));)*
        $crate::ParamValue::Map(map)
    }};
}
