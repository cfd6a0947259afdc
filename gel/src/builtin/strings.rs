use crate::args::Args;
use crate::error::{Error, Result};
use crate::scope::Scope;
use crate::value::{Object, Value};

use std::rc::Rc;

fn type_error(what: &str, value: &Value) -> Error {
    Error::Type(format!("{} of {}", what, value.type_name()))
}

// integer conversion for positions, NaN counts as 0
fn to_integer(value: &Value) -> f64 {
    let n = value.to_number();
    if n.is_nan() { 0.0 } else { n.trunc() }
}

// resolves a possibly negative slice bound against a length
fn relative(bound: &Value, len: usize, default: usize) -> usize {
    if let Value::Undefined = bound {
        return default;
    }
    let n = to_integer(bound);
    let len = len as f64;
    let idx = if n < 0.0 { (len + n).max(0.0) } else { n.min(len) };
    idx as usize
}

pub fn to_string(_: &Rc<Scope>, args: &mut Args) -> Result<Value> {
    Ok(Value::String(args.next()?.to_string()))
}

pub fn to_lower_case(_: &Rc<Scope>, args: &mut Args) -> Result<Value> {
    match args.next()? {
        Value::String(s) => Ok(Value::String(s.to_lowercase())),
        _ => Ok(Value::Undefined),
    }
}

pub fn char_at(_: &Rc<Scope>, args: &mut Args) -> Result<Value> {
    let target = args.next()?;
    let position = if args.has_next() { args.next()? } else { Value::Undefined };
    let s = match target {
        Value::String(s) => s,
        _ => return Ok(Value::Undefined),
    };
    let idx = to_integer(&position);
    let found = if idx < 0.0 { None } else { s.chars().nth(idx as usize) };
    Ok(Value::String(found.map(String::from).unwrap_or_default()))
}

/// `(join separator items...)`, separator defaults to a comma.
pub fn join(_: &Rc<Scope>, args: &mut Args) -> Result<Value> {
    let values = args.all()?;
    let separator = match values.first() {
        None | Some(Value::Undefined) => format!(","),
        Some(sep) => sep.to_string(),
    };
    let parts: Vec<String> = values.iter().skip(1)
        .map(|v| if v.is_nullish() { String::new() } else { v.to_string() })
        .collect();
    Ok(Value::String(parts.join(&separator)))
}

/// Replaces `{N}` with the N-th value, leaving placeholders of missing or
/// undefined values in place.
pub fn format(_: &Rc<Scope>, args: &mut Args) -> Result<Value> {
    let mut values = args.all()?;
    let template = match values.first() {
        Some(Value::String(_)) => values.remove(0).to_string(),
        Some(other) => return Err(type_error("format", other)),
        None => return Err(type_error("format", &Value::Undefined)),
    };
    let mut result = String::new();
    let mut rest = template.as_str();
    while let Some(open) = rest.find('{') {
        result.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let digits = after.chars().take_while(|c| c.is_ascii_digit()).count();
        if digits == 0 || !after[digits..].starts_with('}') {
            result.push('{');
            rest = after;
            continue;
        }
        let placeholder = &rest[open..open + digits + 2];
        let value = after[..digits].parse::<usize>().ok()
            .and_then(|idx| values.get(idx))
            .filter(|v| !matches!(v, Value::Undefined));
        match value {
            Some(v) => result.push_str(&v.to_string()),
            None => result.push_str(placeholder),
        }
        rest = &after[digits + 1..];
    }
    result.push_str(rest);
    Ok(Value::String(result))
}

/// `(contains [strict] target items...)`: every item must occur in the
/// target. Case is ignored unless `strict` is true.
pub fn contains(_: &Rc<Scope>, args: &mut Args) -> Result<Value> {
    let mut values = args.all()?.into_iter();
    let mut target = values.next().unwrap_or_default();
    if target.is_nullish() {
        return Ok(Value::Undefined);
    }
    let mut strict = false;
    if let Value::Bool(b) = target {
        strict = b;
        target = values.next().unwrap_or_default();
    }
    let lower = |v: Value| match v {
        Value::String(s) if !strict => Value::String(s.to_lowercase()),
        v => v,
    };
    let target = lower(target);
    for item in values.map(lower) {
        let found = match &target {
            Value::String(s) => s.contains(item.to_string().as_str()),
            Value::Array(items) => items.iter().any(|i| i.strict_eq(&item)),
            other => return Err(type_error("contains", other)),
        };
        if !found {
            return Ok(Value::Bool(false));
        }
    }
    Ok(Value::Bool(true))
}

/// `(slice target)`, `(slice start target)` or `(slice start end target)`.
pub fn slice(_: &Rc<Scope>, args: &mut Args) -> Result<Value> {
    let mut target = args.next()?;
    let mut start = Value::Undefined;
    let mut end = Value::Undefined;
    if args.has_next() {
        start = target;
        target = args.next()?;
    }
    if args.has_next() {
        end = target;
        target = args.next()?;
    }
    match target {
        Value::String(s) => {
            let chars: Vec<char> = s.chars().collect();
            let from = relative(&start, chars.len(), 0);
            let to = relative(&end, chars.len(), chars.len());
            Ok(Value::String(chars[from..to.max(from)].iter().collect()))
        },
        Value::Array(items) => {
            let from = relative(&start, items.len(), 0);
            let to = relative(&end, items.len(), items.len());
            Ok(items[from..to.max(from)].to_vec().into())
        },
        other => Err(type_error("slice", &other)),
    }
}

pub fn length(_: &Rc<Scope>, args: &mut Args) -> Result<Value> {
    let target = args.next()?;
    Ok(match &target {
        Value::String(s) => Value::Number(s.chars().count() as f64),
        Value::Array(items) => Value::Number(items.len() as f64),
        Value::Object(object) => object.get("length").cloned().unwrap_or_default(),
        Value::Function(p) => p.arity().map_or(Value::Undefined, |n| Value::Number(n as f64)),
        v if v.is_nullish() => return Err(type_error("length", v)),
        _ => Value::Undefined,
    })
}

/// Appends to a string or an array, `undefined` for anything else.
pub fn concat(_: &Rc<Scope>, args: &mut Args) -> Result<Value> {
    let mut result = args.next()?;
    while args.has_next() {
        result = match result {
            Value::String(s) => Value::String(s + &args.next()?.to_string()),
            Value::Array(items) => {
                let mut items = items.to_vec();
                match args.next()? {
                    Value::Array(more) => items.extend(more.iter().cloned()),
                    other => items.push(other),
                }
                items.into()
            },
            _ => return Ok(Value::Undefined),
        };
    }
    Ok(result)
}

pub fn get_value(_: &Rc<Scope>, args: &mut Args) -> Result<Value> {
    let target = args.next()?;
    let key = args.next()?;
    match target {
        Value::Object(_) | Value::Array(_) | Value::Date(_) => {
            Ok(target.property(&key.to_string()).unwrap_or_default())
        },
        _ => Ok(Value::Undefined),
    }
}

fn keys(value: &Value) -> Vec<String> {
    match value {
        Value::Object(object) => object.keys().map(String::from).collect(),
        Value::Array(items) => (0..items.len()).map(|i| i.to_string()).collect(),
        Value::String(s) => (0..s.chars().count()).map(|i| i.to_string()).collect(),
        _ => Vec::new(),
    }
}

fn index(value: &Value, key: &str) -> Value {
    match value {
        Value::String(s) => key.parse::<usize>().ok()
            .and_then(|i| s.chars().nth(i))
            .map_or(Value::Undefined, |c| Value::String(c.to_string())),
        other => other.property(key).unwrap_or_default(),
    }
}

/// `(refine [exclude] source keys...)`: a copy of `source` with only the
/// given keys, or without them when `exclude` is true.
pub fn refine(_: &Rc<Scope>, args: &mut Args) -> Result<Value> {
    let mut values = args.all()?;
    let exclude = match values.first() {
        Some(Value::Bool(b)) => {
            let b = *b;
            values.remove(0);
            b
        },
        _ => false,
    };
    let original = if values.is_empty() { Value::Undefined } else { values.remove(0) };
    let wanted: Vec<String> = values.iter().map(|v| v.to_string()).collect();
    let mut refined = Object::new();
    for key in keys(&original) {
        if wanted.contains(&key) != exclude {
            refined.insert(key.as_str(), index(&original, &key));
        }
    }
    Ok(refined.into())
}

/// `(compare objects... reference comparator)`: true when the comparator
/// accepts every property of every object against the reference.
pub fn compare(_: &Rc<Scope>, args: &mut Args) -> Result<Value> {
    let mut values = args.all()?;
    let comparator = values.pop().unwrap_or_default();
    let reference = values.pop().unwrap_or_default();
    let mut result = true;
    while let Some(object) = values.pop() {
        for key in keys(&object) {
            if reference.is_nullish() {
                return Err(type_error("compare", &reference));
            }
            let pair = vec![index(&object, &key), index(&reference, &key)];
            if !args.call_with(&comparator, pair)?.truthy() {
                result = false;
            }
        }
    }
    Ok(Value::Bool(result))
}

///////////////////////////////////////////////////////////////////////////////
