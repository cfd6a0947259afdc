use crate::args::Args;
use crate::error::{Error, Result};
use crate::scope::Scope;
use crate::value::Value;

use std::rc::Rc;

/// Binds leading arguments, the rest come with the eventual call.
pub fn partial(_: &Rc<Scope>, args: &mut Args) -> Result<Value> {
    let mut outer = args.all()?;
    let f = if outer.is_empty() { Value::Undefined } else { outer.remove(0) };
    Ok(Value::native("partial", move |_, args| {
        let mut values = outer.clone();
        values.extend(args.all()?);
        args.call_with(&f, values)
    }))
}

/// Calls the function with every argument, bound and supplied, reversed.
pub fn flip(_: &Rc<Scope>, args: &mut Args) -> Result<Value> {
    let mut outer = args.all()?;
    let f = if outer.is_empty() { Value::Undefined } else { outer.remove(0) };
    Ok(Value::native("flip", move |_, args| {
        let mut values = outer.clone();
        values.extend(args.all()?);
        values.reverse();
        args.call_with(&f, values)
    }))
}

/// Right to left composition, the last function gets the call's arguments.
pub fn compose(_: &Rc<Scope>, args: &mut Args) -> Result<Value> {
    let mut fns = args.all()?;
    fns.reverse();
    Ok(Value::native("compose", move |_, args| {
        let first = fns.first().cloned().unwrap_or_default();
        let values = args.all()?;
        let mut result = args.call_with(&first, values)?;
        for f in fns.iter().skip(1) {
            result = args.call_with(f, vec![result])?;
        }
        Ok(result)
    }))
}

pub fn apply(_: &Rc<Scope>, args: &mut Args) -> Result<Value> {
    let f = args.next()?;
    let values = match args.next()? {
        Value::Array(items) => items.to_vec(),
        other => return Err(Error::Type(format!("apply needs an array, got {}", other.type_name()))),
    };
    args.call_with(&f, values)
}

///////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use crate::{Error, Session, Value};

    fn eval(expr: &str) -> Value {
        Session::new().evaluate(expr).unwrap()
    }

    #[test]
    fn partial_application() {
        assert_eq!(eval("((partial + 1) 2)"), Value::from(3));
        assert_eq!(eval("((partial join '-' 'a') 'b' 'c')"), Value::from("a-b-c"));
    }

    #[test]
    fn flipped() {
        assert_eq!(eval("((flip - 10 4))"), Value::from(-6));
        assert_eq!(eval("((flip - 10) 4)"), Value::from(-6));
        assert_eq!(eval("((flip array 1) 2 3)"),
                   Value::from(vec![Value::from(3), Value::from(2), Value::from(1)]));
    }

    #[test]
    fn composition() {
        assert_eq!(eval("((compose {x (* x 2)} {x (+ x 1)}) 5)"), Value::from(12));
        assert_eq!(eval("((compose toString +) 1 2)"), Value::from("3"));
    }

    #[test]
    fn application() {
        assert_eq!(eval("(apply + (array 1 2))"), Value::from(3));
        assert_eq!(eval("(apply {a b (- a b)} (array 5 2))"), Value::from(3));
        assert!(matches!(Session::new().evaluate("(apply + 1)"), Err(Error::Type(_))));
        assert!(matches!(Session::new().evaluate("(apply 1 (array))"),
                         Err(Error::NotCallable(_))));
    }
}
