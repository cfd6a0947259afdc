use crate::args::Args;
use crate::error::Result;
use crate::scope::Scope;
use crate::value::Value;

use std::rc::Rc;

// only the taken branch is evaluated
pub fn ternary(_: &Rc<Scope>, args: &mut Args) -> Result<Value> {
    if args.next()?.truthy() {
        args.next()
    } else {
        args.get(2)
    }
}

pub fn not(_: &Rc<Scope>, args: &mut Args) -> Result<Value> {
    Ok(Value::Bool(!args.next()?.truthy()))
}

pub fn loose_eq(_: &Rc<Scope>, args: &mut Args) -> Result<Value> {
    let a = args.next()?;
    Ok(Value::Bool(a.loose_eq(&args.next()?)))
}

pub fn loose_ne(_: &Rc<Scope>, args: &mut Args) -> Result<Value> {
    let a = args.next()?;
    Ok(Value::Bool(!a.loose_eq(&args.next()?)))
}

pub fn strict_eq(_: &Rc<Scope>, args: &mut Args) -> Result<Value> {
    let a = args.next()?;
    Ok(Value::Bool(a.strict_eq(&args.next()?)))
}

pub fn strict_ne(_: &Rc<Scope>, args: &mut Args) -> Result<Value> {
    let a = args.next()?;
    Ok(Value::Bool(!a.strict_eq(&args.next()?)))
}

/// First truthy argument, or the last one evaluated.
pub fn or(_: &Rc<Scope>, args: &mut Args) -> Result<Value> {
    let mut last = Value::Undefined;
    while args.has_next() {
        last = args.next()?;
        if last.truthy() {
            return Ok(last);
        }
    }
    Ok(last)
}

/// First argument that is exactly `true`, or the last one evaluated.
pub fn either(_: &Rc<Scope>, args: &mut Args) -> Result<Value> {
    let mut last = Value::Undefined;
    while args.has_next() {
        last = args.next()?;
        if last == Value::Bool(true) {
            return Ok(last);
        }
    }
    Ok(last)
}

/// `false` at the first falsy argument, otherwise the last value.
pub fn and(_: &Rc<Scope>, args: &mut Args) -> Result<Value> {
    let mut last = Value::Undefined;
    while args.has_next() {
        last = args.next()?;
        if !last.truthy() {
            return Ok(Value::Bool(false));
        }
    }
    Ok(last)
}

///////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use crate::{Session, Value};

    fn eval(expr: &str) -> Value {
        Session::new().evaluate(expr).unwrap()
    }

    #[test]
    fn ternary_is_lazy() {
        assert_eq!(eval("(? false 1 2)"), Value::from(2));
        assert_eq!(eval("(? true 1 (undefinedFn))"), Value::from(1));
        assert_eq!(eval("(? 0 1 2)"), Value::from(2));
        assert_eq!(eval("(? '' 1)"), Value::Undefined);
        assert!(Session::new().evaluate("(? false 1 (undefinedFn))").is_err());
    }

    #[test]
    fn equality() {
        assert_eq!(eval("(= 1 '1')"), Value::from(true));
        assert_eq!(eval("(== 1 '1')"), Value::from(false));
        assert_eq!(eval("(!= null undefined)"), Value::from(false));
        assert_eq!(eval("(!== null undefined)"), Value::from(true));
        assert_eq!(eval("(== 'a' 'a')"), Value::from(true));
        assert_eq!(eval("(! 0)"), Value::from(true));
    }

    #[test]
    fn short_circuits() {
        assert_eq!(eval("(|| 0 '' 'x' (undefinedFn))"), Value::from("x"));
        assert_eq!(eval("(|| 0 null)"), Value::Null);
        assert_eq!(eval("(| 1 'a' true)"), Value::from(true));
        assert_eq!(eval("(| 1 'a')"), Value::from("a"));
        assert_eq!(eval("(&& 1 'a' 3)"), Value::from(3));
        assert_eq!(eval("(&& 1 null (undefinedFn))"), Value::from(false));
        assert_eq!(eval("(&&)"), Value::Undefined);
    }
}
