use crate::args::Args;
use crate::error::{Error, Result};
use crate::scope::Scope;
use crate::value::{Object, Value};

use std::cmp::Ordering;
use std::rc::Rc;

pub fn object(_: &Rc<Scope>, args: &mut Args) -> Result<Value> {
    let mut result = Object::new();
    while args.has_next() {
        let key = args.next()?;
        result.insert(key.to_string(), args.next()?);
    }
    Ok(result.into())
}

pub fn array(_: &Rc<Scope>, args: &mut Args) -> Result<Value> {
    Ok(args.all()?.into())
}

/// Arrays map to arrays, objects map their values keeping the keys.
pub fn map(_: &Rc<Scope>, args: &mut Args) -> Result<Value> {
    let source = args.next()?;
    let f = args.next()?;
    match source {
        Value::Array(items) => Ok(items.iter()
            .map(|item| args.call_with(&f, vec![item.clone()]))
            .collect::<Result<Vec<_>>>()?
            .into()),
        Value::Object(object) => {
            let mut result = Object::new();
            for (key, value) in object.iter() {
                result.insert(key, args.call_with(&f, vec![value.clone()])?);
            }
            Ok(result.into())
        },
        _ => Ok(Object::new().into()),
    }
}

// stable merge sort that lets the comparator fail
fn merge_sort<F>(mut items: Vec<Value>, cmp: &mut F) -> Result<Vec<Value>>
    where F: FnMut(&Value, &Value) -> Result<Ordering>
{
    if items.len() <= 1 {
        return Ok(items);
    }
    let right = items.split_off(items.len() / 2);
    let left = merge_sort(items, cmp)?;
    let right = merge_sort(right, cmp)?;

    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();
    while let (Some(l), Some(r)) = (left.peek(), right.peek()) {
        let next = if cmp(l, r)? == Ordering::Greater { right.next() } else { left.next() };
        merged.extend(next);
    }
    merged.extend(left);
    merged.extend(right);
    Ok(merged)
}

/// A sorted copy of an array, the comparator answers like `a - b`.
pub fn sort(_: &Rc<Scope>, args: &mut Args) -> Result<Value> {
    let values = args.all()?;
    let f = values.get(1).cloned().unwrap_or_default();
    let items = match values.first() {
        Some(Value::Array(items)) => items.to_vec(),
        _ => return Ok(Value::Undefined),
    };
    let mut cmp = |a: &Value, b: &Value| -> Result<Ordering> {
        let n = args.call_with(&f, vec![a.clone(), b.clone()])?.to_number();
        Ok(if n > 0.0 {
            Ordering::Greater
        } else if n < 0.0 {
            Ordering::Less
        } else {
            Ordering::Equal
        })
    };
    Ok(merge_sort(items, &mut cmp)?.into())
}

/// Keeps items the predicate accepts, or items strictly equal to a
/// non function second argument.
pub fn filter(_: &Rc<Scope>, args: &mut Args) -> Result<Value> {
    let values = args.all()?;
    if values.len() < 2 {
        return Ok(values.into());
    }
    let (source, f) = (&values[0], &values[1]);
    let items = match source {
        Value::Array(items) => items,
        _ => return Ok(Value::Undefined),
    };
    let mut kept = Vec::new();
    for item in items.iter() {
        let keep = match f {
            Value::Function(_) => args.call_with(f, vec![item.clone()])?.truthy(),
            other => item.strict_eq(other),
        };
        if keep {
            kept.push(item.clone());
        }
    }
    Ok(kept.into())
}

pub fn find_one(_: &Rc<Scope>, args: &mut Args) -> Result<Value> {
    let values = args.all()?;
    if values.len() < 2 {
        return Ok(values.into());
    }
    let (source, f) = (&values[0], &values[1]);
    if let Value::Array(items) = source {
        for item in items.iter() {
            if args.call_with(f, vec![item.clone()])?.truthy() {
                return Ok(item.clone());
            }
        }
    }
    Ok(Value::Undefined)
}

/// `(fold items seed fn)`, or `(fold a b c seed fn)` folding over the
/// loose leading arguments.
pub fn fold(_: &Rc<Scope>, args: &mut Args) -> Result<Value> {
    let mut values = args.all()?;
    let f = values.pop().unwrap_or_default();
    let mut result = values.pop().unwrap_or_default();
    let items: Vec<Value> = if values.len() > 1 {
        values
    } else {
        match values.pop().unwrap_or_default() {
            Value::Array(items) => items.to_vec(),
            Value::String(s) => s.chars().map(|c| Value::String(c.to_string())).collect(),
            v if v.is_nullish() => {
                return Err(Error::Type(format!("cannot fold over {}", v.type_name())));
            },
            _ => Vec::new(),
        }
    };
    for item in items {
        result = args.call_with(&f, vec![result, item])?;
    }
    Ok(result)
}

pub fn last(_: &Rc<Scope>, args: &mut Args) -> Result<Value> {
    match args.next()? {
        Value::Array(items) => Ok(items.last().cloned().unwrap_or_default()),
        _ => Ok(Value::Undefined),
    }
}

///////////////////////////////////////////////////////////////////////////////
