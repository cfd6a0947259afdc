use crate::args::Args;
use crate::error::Result;
use crate::scope::Scope;
use crate::value::Value;

use std::cmp::Ordering;
use std::rc::Rc;

fn numeric(args: &mut Args, op: fn(f64, f64) -> f64) -> Result<Value> {
    let a = args.next()?.to_number();
    let b = args.next()?.to_number();
    Ok(Value::Number(op(a, b)))
}

fn relation(args: &mut Args, accept: fn(Ordering) -> bool) -> Result<Value> {
    let a = args.next()?;
    let b = args.next()?;
    Ok(Value::Bool(a.compare(&b).map_or(false, accept)))
}

// extremes where a NaN anywhere poisons the result
fn extreme(args: &mut Args, pick: fn(f64, f64) -> f64) -> Result<Value> {
    let mut result = args.next()?;
    while args.has_next() {
        let (a, b) = (result.to_number(), args.next()?.to_number());
        result = Value::Number(if a.is_nan() || b.is_nan() { f64::NAN } else { pick(a, b) });
    }
    Ok(result)
}

pub fn plus(_: &Rc<Scope>, args: &mut Args) -> Result<Value> {
    let a = args.next()?;
    let b = args.next()?;
    Ok(a.add(&b))
}

pub fn minus(_: &Rc<Scope>, args: &mut Args) -> Result<Value> {
    numeric(args, |a, b| a - b)
}

pub fn times(_: &Rc<Scope>, args: &mut Args) -> Result<Value> {
    numeric(args, |a, b| a * b)
}

pub fn divide(_: &Rc<Scope>, args: &mut Args) -> Result<Value> {
    numeric(args, |a, b| a / b)
}

pub fn less(_: &Rc<Scope>, args: &mut Args) -> Result<Value> {
    relation(args, |o| o == Ordering::Less)
}

pub fn greater(_: &Rc<Scope>, args: &mut Args) -> Result<Value> {
    relation(args, |o| o == Ordering::Greater)
}

pub fn less_equal(_: &Rc<Scope>, args: &mut Args) -> Result<Value> {
    relation(args, |o| o != Ordering::Greater)
}

pub fn greater_equal(_: &Rc<Scope>, args: &mut Args) -> Result<Value> {
    relation(args, |o| o != Ordering::Less)
}

pub fn is_nan(_: &Rc<Scope>, args: &mut Args) -> Result<Value> {
    Ok(Value::Bool(args.get(0)?.to_number().is_nan()))
}

pub fn max(_: &Rc<Scope>, args: &mut Args) -> Result<Value> {
    extreme(args, f64::max)
}

pub fn min(_: &Rc<Scope>, args: &mut Args) -> Result<Value> {
    extreme(args, f64::min)
}

pub fn double(_: &Rc<Scope>, args: &mut Args) -> Result<Value> {
    Ok(Value::Number(args.next()?.to_number() * 2.0))
}

///////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use crate::{Error, Session, Value};

    fn eval(expr: &str) -> Value {
        Session::new().evaluate(expr).unwrap()
    }

    #[test]
    fn arithmetic() {
        assert_eq!(eval("(+ 1 2)"), Value::from(3));
        assert_eq!(eval("(* (+ 1 2) 3)"), Value::from(9));
        assert_eq!(eval("(- 10 4)"), Value::from(6));
        assert_eq!(eval("(/ 1 4)"), Value::from(0.25));
        assert_eq!(eval("(/ 1 0)"), Value::from(f64::INFINITY));
        assert_eq!(eval("(+ 'a' 1)"), Value::from("a1"));
        assert_eq!(eval("(+ 1 null)"), Value::from(1));
        assert_eq!(eval("(* '3' '4')"), Value::from(12));
        assert_eq!(eval("(double 21)"), Value::from(42));
    }

    #[test]
    fn missing_operand() {
        assert!(matches!(Session::new().evaluate("(+ 1)"), Err(Error::Arity{supplied: 1, ..})));
    }

    #[test]
    fn comparisons() {
        assert_eq!(eval("(< 1 2)"), Value::from(true));
        assert_eq!(eval("(> 'b' 'a')"), Value::from(true));
        assert_eq!(eval("(< '10' '9')"), Value::from(true));
        assert_eq!(eval("(< '10' 9)"), Value::from(false));
        assert_eq!(eval("(>= 2 2)"), Value::from(true));
        assert_eq!(eval("(<= NaN 1)"), Value::from(false));
        assert_eq!(eval("(> undefined 0)"), Value::from(false));
    }

    #[test]
    fn extremes() {
        assert_eq!(eval("(max 1 5 3)"), Value::from(5));
        assert_eq!(eval("(min 4 -2 8)"), Value::from(-2));
        assert_eq!(eval("(max 'x')"), Value::from("x"));
        assert!(eval("(max 1 NaN 3)").to_number().is_nan());
        assert_eq!(eval("(isNaN 'abc')"), Value::from(true));
        assert_eq!(eval("(isNaN '12')"), Value::from(false));
        assert_eq!(eval("(isNaN)"), Value::from(true));
    }
}
