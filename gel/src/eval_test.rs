use crate::error::Error;
use crate::session::{Bindings, Session};
use crate::value::{Object, Value};

use pretty_assertions::assert_eq;

fn eval(text: &str) -> Value {
    Session::new().evaluate(text).unwrap()
}

fn eval_with(text: &str, vars: Vec<(&str, Value)>) -> Result<Value, Error> {
    let bindings: Bindings = vars.into_iter().map(|(k, v)| (k.to_string(), v)).collect();
    Session::new().evaluate_with(text, &bindings)
}

#[test]
fn test_basic_calls() {
    assert_eq!(eval("(+ 1 2)"), Value::from(3));
    assert_eq!(eval("(* (+ 1 2) 3)"), Value::from(9));
    assert_eq!(eval("(map (array 1 2 3) {x (* x 2)})"),
               Value::from(vec![Value::from(2), Value::from(4), Value::from(6)]));
    assert_eq!(eval("(? false 1 2)"), Value::from(2));
    assert_eq!(eval("(? true 1 (undefinedFn))"), Value::from(1));
}

#[test]
fn test_literals() {
    assert_eq!(eval("'single'"), Value::from("single"));
    assert_eq!(eval(r#""say \"hi\"""#), Value::from(r#"say "hi""#));
    assert_eq!(eval("-4.5"), Value::from(-4.5));
    assert_eq!(eval("null"), Value::Null);
    assert_eq!(eval("undefined"), Value::Undefined);
    assert_eq!(eval("false"), Value::from(false));
    assert_eq!(eval(""), Value::Undefined);
    assert_eq!(eval("1 2 3"), Value::from(3));
}

#[test]
fn test_identifiers() {
    assert_eq!(eval("missing"), Value::Undefined);
    assert_eq!(eval_with("(+ x 1)", vec![("x", Value::from(41))]), Ok(Value::from(42)));
    // bindings shadow builtins
    assert_eq!(eval_with("(max 1 2)", vec![("max", Value::from(5))]),
               Err(Error::NotCallable(format!("max"))));
    assert_eq!(eval("(toString +)"), Value::from("[native +]"));
}

#[test]
fn test_unknown_callee() {
    assert_eq!(Session::new().evaluate("(nope 1)"), Err(Error::UnknownFunction(format!("nope"))));
    assert_eq!(Session::new().evaluate("(+ 1 (nope))"), Err(Error::UnknownFunction(format!("nope"))));
    assert_eq!(Session::new().evaluate("(5 1)"), Err(Error::NotCallable(format!("5"))));
    assert_eq!(Session::new().evaluate("()"), Err(Error::NotCallable(format!("()"))));
    // a failing expression aborts the whole evaluation
    assert!(Session::new().evaluate("(+ 1 2) (nope)").is_err());
}

#[test]
fn test_grouping_non_callables() {
    assert_eq!(eval_with("(x)", vec![("x", Value::from(5))]), Ok(Value::from(5)));
    assert_eq!(eval_with("(x)", vec![("x", Value::Undefined)]), Ok(Value::Undefined));
    assert_eq!(eval("((+ 1 2))"), Value::from(3));
}

#[test]
fn test_member_access() {
    let a: Object = vec![("c", Value::from(1))].into_iter().collect();
    assert_eq!(eval_with("(a.b)", vec![("a", a.clone().into())]), Ok(Value::Undefined));
    assert_eq!(eval_with("a.c", vec![("a", a.into())]), Ok(Value::from(1)));
    assert_eq!(eval("(array 1 2 3).length"), Value::from(3));
    assert_eq!(eval("(array 'x' 'y').1"), Value::from("y"));
    assert_eq!(eval("(object 'a' (object 'b' 5)).a.b"), Value::from(5));
    assert_eq!(eval("'str'.length"), Value::Undefined);
    assert_eq!(eval("missing.deeper.still"), Value::Undefined);
    assert!(matches!(eval("date.addDays"), Value::Function(_)));
}

#[test]
fn test_closures() {
    assert_eq!(eval("({x (* x x)} 7)"), Value::from(49));
    assert_eq!(eval("({x y (- x y)} 10 4)"), Value::from(6));
    assert_eq!(eval("({x y y} 1)"), Value::Undefined);
    assert_eq!(eval("((({x {y (+ x y)}}) 3) 4)"), Value::from(7));
    assert_eq!(eval("(({x {y (+ x y)}} 10) 5)"), Value::from(15));
    assert!(matches!(eval("{x x}"), Value::Function(_)));
    assert!(matches!(eval("({x x})"), Value::Function(_)));
    assert_eq!(eval("({})"), Value::Undefined);
    assert_eq!(eval("({42})"), Value::from(42));
}

#[test]
fn test_lexical_scope() {
    // the inner closure sees the x it was created under, not the caller's
    assert_eq!(eval("({f ({x (f)} 100)} ({x {(+ x 1)}} 1))"), Value::from(2));
    // parameters shadow bindings without touching them
    let session = Session::new();
    let mut bindings = Bindings::new();
    bindings.insert(format!("x"), Value::from(1));
    assert_eq!(session.evaluate_with("({x (+ x 1)} 5)", &bindings), Ok(Value::from(6)));
    assert_eq!(session.evaluate_with("x", &bindings), Ok(Value::from(1)));
}

#[test]
fn test_arity_error() {
    assert_eq!(Session::new().evaluate("(- 1)"),
               Err(Error::Arity{callee: format!("(- 1)"), supplied: 1}));
    assert!(matches!(Session::new().evaluate("(!)"), Err(Error::Arity{supplied: 0, ..})));
}

#[test]
fn test_depth_limit() {
    let nested = "(+ 1 (+ 1 (+ 1 (+ 1 (+ 1 1)))))";
    assert_eq!(Session::new().with_max_depth(5).evaluate(nested), Err(Error::TooDeep(5)));
    assert_eq!(Session::new().with_max_depth(64).evaluate(nested), Ok(Value::from(6)));
    // runaway self application
    assert_eq!(Session::new().with_max_depth(64).evaluate("({f (f f)} {f (f f)})"),
               Err(Error::TooDeep(64)));
}

#[test]
fn test_tokenizer_errors_surface() {
    assert_eq!(Session::new().evaluate("(+ 1 'oops)"),
               Err(Error::UnclosedString{quote: '\'', offset: 5}));
    assert_eq!(Session::new().evaluate("(+ 1 #)"),
               Err(Error::UnparseableToken{offset: 5, remainder: format!("#)")}));
    assert!(matches!(Session::new().evaluate("(+ 1 2"), Err(Error::BadNesting{..})));
}
