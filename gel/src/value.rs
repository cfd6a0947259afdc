use crate::error::{Error, Result};
use crate::procedure::{NativeFn, Procedure};
use crate::scope::Scope;
use crate::args::Args;

use chrono::{DateTime, NaiveDateTime};
use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

/// An insertion ordered string keyed map.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Object {
    entries: Vec<(String, Value)>,
}

impl Object {
    pub fn new() -> Object {
        Object::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Overwrites in place, so a key keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item=(&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item=&str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Object {
    fn from_iter<T: IntoIterator<Item=(K, Value)>>(iter: T) -> Self {
        let mut object = Object::new();
        for (k, v) in iter {
            object.insert(k, v);
        }
        object
    }
}

/// Runtime values of the language.
///
/// Arrays and objects are shared and never mutated once built, builtins
/// always construct new ones.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Rc<Vec<Value>>),
    Object(Rc<Object>),
    Function(Rc<Procedure>),
    Date(NaiveDateTime),
}

impl From<bool> for Value {
    fn from(b: bool) -> Self { Value::Bool(b) }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self { Value::Number(n) }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self { Value::Number(n as f64) }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self { Value::String(s.to_string()) }
}

impl From<String> for Value {
    fn from(s: String) -> Self { Value::String(s) }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self { Value::Array(Rc::new(items)) }
}

impl From<Object> for Value {
    fn from(object: Object) -> Self { Value::Object(Rc::new(object)) }
}

impl From<NaiveDateTime> for Value {
    fn from(date: NaiveDateTime) -> Self { Value::Date(date) }
}

impl From<Procedure> for Value {
    fn from(procedure: Procedure) -> Self { Value::Function(Rc::new(procedure)) }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "undefined"),
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", number_to_string(*n)),
            Value::String(s) => write!(f, "{}", s),
            Value::Array(items) => {
                let parts: Vec<String> = items.iter()
                    .map(|item| match item {
                        Value::Undefined | Value::Null => String::new(),
                        other => other.to_string(),
                    })
                    .collect();
                write!(f, "{}", parts.join(","))
            },
            Value::Object(_) => write!(f, "[object Object]"),
            Value::Function(p) => write!(f, "{:?}", p),
            Value::Date(d) => write!(f, "{}", d.format("%Y-%m-%dT%H:%M:%S%.3fZ")),
        }
    }
}

// integers print without a fraction, like 3 instead of 3.0
pub fn number_to_string(n: f64) -> String {
    if n.is_nan() {
        format!("NaN")
    } else if n.is_infinite() {
        if n > 0.0 { format!("Infinity") } else { format!("-Infinity") }
    } else if n == 0.0 {
        format!("0")
    } else if n.fract() == 0.0 && n.abs() < 1e21 {
        format!("{:.0}", n)
    } else {
        format!("{}", n)
    }
}

// numeric conversion of string contents, empty or blank is 0
fn string_to_number(s: &str) -> f64 {
    let s = s.trim();
    if s.is_empty() {
        return 0.0;
    }
    match s {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => (),
    }
    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = s.strip_prefix(prefix) {
            return i64::from_str_radix(digits, radix).map(|n| n as f64).unwrap_or(f64::NAN);
        }
    }
    // rust also accepts "inf" and "nan" spellings
    if s.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') {
        return f64::NAN;
    }
    s.parse().unwrap_or(f64::NAN)
}

pub fn date_millis(date: &NaiveDateTime) -> f64 {
    date.and_utc().timestamp_millis() as f64
}

pub fn date_from_millis(millis: f64) -> Option<NaiveDateTime> {
    if !millis.is_finite() {
        return None;
    }
    DateTime::from_timestamp_millis(millis.trunc() as i64).map(|d| d.naive_utc())
}

impl Value {
    /// Wraps a native closure as a callable value.
    pub fn native<F>(name: &str, f: F) -> Value
        where F: Fn(&Rc<Scope>, &mut Args) -> Result<Value> + 'static
    {
        let fp: NativeFn = Rc::new(f);
        Value::Function(Rc::new(Procedure::builtin(name, fp)))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::Function(_) => "function",
            Value::Date(_) => "date",
        }
    }

    pub fn is_nullish(&self) -> bool {
        matches!(self, Value::Undefined | Value::Null)
    }

    fn is_primitive(&self) -> bool {
        !matches!(self, Value::Array(_) | Value::Object(_) | Value::Function(_) | Value::Date(_))
    }

    pub fn truthy(&self) -> bool {
        match self {
            Value::Undefined | Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => !(n.is_nan() || *n == 0.0),
            Value::String(s) => !s.is_empty(),
            _ => true,
        }
    }

    pub fn to_number(&self) -> f64 {
        match self {
            Value::Undefined => f64::NAN,
            Value::Null => 0.0,
            Value::Bool(b) => if *b { 1.0 } else { 0.0 },
            Value::Number(n) => *n,
            Value::String(s) => string_to_number(s),
            Value::Array(_) => string_to_number(&self.to_string()),
            Value::Object(_) | Value::Function(_) => f64::NAN,
            Value::Date(d) => date_millis(d),
        }
    }

    /// Reduces compound values for operators. Dates become numbers only
    /// when `numeric` is asked for (relational operators), strings otherwise.
    pub fn to_primitive(&self, numeric: bool) -> Value {
        match self {
            Value::Date(d) if numeric => Value::Number(date_millis(d)),
            v if v.is_primitive() => v.clone(),
            v => Value::String(v.to_string()),
        }
    }

    /// Identity for shared values, value equality for primitives.
    pub fn strict_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) => true,
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => Rc::ptr_eq(a, b),
            (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b),
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::Date(a), Value::Date(b)) => a == b,
            _ => false,
        }
    }

    /// Equality with coercions between numbers, strings and booleans.
    pub fn loose_eq(&self, other: &Value) -> bool {
        use Value::*;
        match (self, other) {
            (Undefined | Null, Undefined | Null) => true,
            (Undefined | Null, _) | (_, Undefined | Null) => false,
            (a, b) if std::mem::discriminant(a) == std::mem::discriminant(b) => a.strict_eq(b),
            (Number(_), String(_)) | (String(_), Number(_)) => self.to_number() == other.to_number(),
            (Bool(_), _) => Number(self.to_number()).loose_eq(other),
            (_, Bool(_)) => self.loose_eq(&Number(other.to_number())),
            (a, b) if !a.is_primitive() && b.is_primitive() => a.to_primitive(false).loose_eq(b),
            (a, b) if a.is_primitive() && !b.is_primitive() => a.loose_eq(&b.to_primitive(false)),
            _ => false,
        }
    }

    /// Ordering for `<`-like operators, `None` when incomparable (NaN).
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self.to_primitive(true), other.to_primitive(true)) {
            (Value::String(a), Value::String(b)) => Some(a.cmp(&b)),
            (a, b) => a.to_number().partial_cmp(&b.to_number()),
        }
    }

    /// The `+` operator, concatenates when either side is a string.
    pub fn add(&self, other: &Value) -> Value {
        let (a, b) = (self.to_primitive(false), other.to_primitive(false));
        match (&a, &b) {
            (Value::String(_), _) | (_, Value::String(_)) => {
                Value::String(format!("{}{}", a, b))
            },
            _ => Value::Number(a.to_number() + b.to_number()),
        }
    }

    /// Own property lookup, used by member access and `getValue`.
    pub fn property(&self, key: &str) -> Option<Value> {
        match self {
            Value::Object(object) => object.get(key).cloned(),
            Value::Array(items) if key == "length" => Some(Value::Number(items.len() as f64)),
            Value::Array(items) => key.parse::<usize>().ok()
                .and_then(|idx| items.get(idx).cloned()),
            Value::Function(p) => p.property(key).cloned(),
            _ => None,
        }
    }

    pub fn to_json(&self) -> Option<serde_json::Value> {
        use serde_json::Value as Json;
        match self {
            Value::Undefined | Value::Function(_) => None,
            Value::Null => Some(Json::Null),
            Value::Bool(b) => Some(Json::Bool(*b)),
            Value::Number(n) => Some(json_number(*n)),
            Value::String(s) => Some(Json::String(s.clone())),
            Value::Array(items) => Some(Json::Array(items.iter()
                .map(|item| item.to_json().unwrap_or(Json::Null))
                .collect())),
            Value::Object(object) => Some(Json::Object(object.iter()
                .filter_map(|(k, v)| v.to_json().map(|v| (k.to_string(), v)))
                .collect())),
            Value::Date(_) => Some(Json::String(self.to_string())),
        }
    }

    pub fn from_json(json: serde_json::Value) -> Value {
        use serde_json::Value as Json;
        match json {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::Bool(b),
            Json::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            Json::String(s) => Value::String(s),
            Json::Array(items) => items.into_iter().map(Value::from_json)
                .collect::<Vec<_>>().into(),
            Json::Object(map) => map.into_iter()
                .map(|(k, v)| (k, Value::from_json(v)))
                .collect::<Object>().into(),
        }
    }

    pub fn parse_json(text: &str) -> Result<Value> {
        serde_json::from_str(text)
            .map(Value::from_json)
            .map_err(|e| Error::Json(e.to_string()))
    }
}

fn json_number(n: f64) -> serde_json::Value {
    if n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 {
        serde_json::Value::from(n as i64)
    } else {
        serde_json::Number::from_f64(n)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null)
    }
}

///////////////////////////////////////////////////////////////////////////////
