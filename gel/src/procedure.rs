use crate::args::Args;
use crate::error::Result;
use crate::parser::Node;
use crate::scope::Scope;
use crate::value::{Object, Value};

use std::{cmp, fmt};
use std::rc::Rc;

/// Native procedures see the calling scope and the lazy argument cursor.
pub type NativeFn = Rc<dyn Fn(&Rc<Scope>, &mut Args) -> Result<Value>>;

enum Body {
    Native(NativeFn),
    Closure(Option<Rc<Node>>),
}

pub struct Procedure {
    name: String,
    params: Vec<String>,
    body: Body,
    env: Option<Rc<Scope>>,
    properties: Object,
}

impl cmp::PartialEq for Procedure {
    fn eq(&self, other: &Procedure) -> bool { std::ptr::eq(self, other) }
}

impl fmt::Debug for Procedure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.body {
            Body::Native(_) => write!(f, "[native {}]", self.name),
            Body::Closure(Some(ref body)) if self.params.is_empty() => write!(f, "{{{}}}", body),
            Body::Closure(Some(ref body)) => write!(f, "{{{} {}}}", self.params.join(" "), body),
            Body::Closure(None) => write!(f, "{{}}"),
        }
    }
}

impl Procedure {
    pub fn new(params: Vec<String>, body: Option<Rc<Node>>, env: Rc<Scope>) -> Procedure {
        Procedure{
            name: String::new(),
            params,
            body: Body::Closure(body),
            env: Some(env),
            properties: Object::new(),
        }
    }

    pub fn builtin(name: &str, fp: NativeFn) -> Procedure {
        Procedure{
            name: name.to_string(),
            params: Vec::new(),
            body: Body::Native(fp),
            env: None,
            properties: Object::new(),
        }
    }

    pub fn with_property(mut self, key: &str, value: Value) -> Procedure {
        self.properties.insert(key, value);
        self
    }

    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// Declared parameter count, closures only.
    pub fn arity(&self) -> Option<usize> {
        match self.body {
            Body::Closure(_) => Some(self.params.len()),
            Body::Native(_) => None,
        }
    }

    pub fn call(self: &Rc<Self>, scope: &Rc<Scope>, args: &mut Args) -> Result<Value> {
        match self.body {
            Body::Native(ref fp) => fp(scope, args),
            Body::Closure(ref body) => {
                // applying a closure that wants arguments to none yields the closure
                if !self.params.is_empty() && args.is_empty() {
                    return Ok(Value::Function(self.clone()));
                }
                let env = match self.env {
                    Some(ref env) => Scope::nested(env),
                    None => Scope::new(),
                };
                for (idx, param) in self.params.iter().enumerate() {
                    env.set(param.as_str(), args.get(idx)?);
                }
                match body {
                    Some(body) => args.evaluator().eval(body, &env),
                    None => Ok(Value::Undefined),
                }
            }
        }
    }
}
