use crate::args::{Arg, Args};
use crate::error::{Error, Result};
use crate::parser::{Node, NodeKind};
use crate::procedure::Procedure;
use crate::scope::Scope;
use crate::value::Value;

use std::cell::Cell;
use std::rc::Rc;

pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Tree walking evaluator. It only keeps the nesting depth of the node
/// being evaluated so runaway recursion fails instead of blowing the stack.
#[derive(Debug)]
pub struct Evaluator {
    max_depth: usize,
    depth: Cell<usize>,
}

impl Default for Evaluator {
    fn default() -> Self {
        Evaluator::new(DEFAULT_MAX_DEPTH)
    }
}

impl Evaluator {
    pub fn new(max_depth: usize) -> Evaluator {
        Evaluator{max_depth, depth: Cell::new(0)}
    }

    /// Evaluates top level nodes in order against a shared scope.
    pub fn evaluate(&self, nodes: &[Rc<Node>], scope: &Rc<Scope>) -> Result<Vec<Value>> {
        nodes.iter().map(|node| self.eval(node, scope)).collect()
    }

    pub fn eval(&self, node: &Rc<Node>, scope: &Rc<Scope>) -> Result<Value> {
        let depth = self.depth.get() + 1;
        if depth > self.max_depth {
            return Err(Error::TooDeep(self.max_depth));
        }
        self.depth.set(depth);
        let result = self.dispatch(node, scope);
        self.depth.set(depth - 1);
        result
    }

    fn dispatch(&self, node: &Rc<Node>, scope: &Rc<Scope>) -> Result<Value> {
        match &node.kind {
            NodeKind::String(s) => Ok(Value::String(s.clone())),
            NodeKind::Number(n) => Ok(Value::Number(*n)),
            NodeKind::Boolean(b) => Ok(Value::Bool(*b)),
            NodeKind::Null => Ok(Value::Null),
            NodeKind::Undefined => Ok(Value::Undefined),
            NodeKind::Keyword(value) => Ok(value.clone()),
            // unbound names read as undefined
            NodeKind::Identifier => Ok(scope.get(&node.original).unwrap_or_default()),
            NodeKind::Function(children) => {
                let (params, body) = match children.split_last() {
                    Some((body, params)) => (
                        params.iter().map(|p| p.original.clone()).collect(),
                        Some(body.clone()),
                    ),
                    None => (Vec::new(), None),
                };
                Ok(Procedure::new(params, body, scope.clone()).into())
            },
            NodeKind::Member{target, identifier} => {
                let target = self.eval(target, scope)?;
                Ok(target.property(&identifier.original).unwrap_or_default())
            },
            NodeKind::Call(children) => self.eval_call(node, children, scope),
        }
    }

    fn eval_call(&self, node: &Rc<Node>, children: &[Rc<Node>], scope: &Rc<Scope>) -> Result<Value> {
        let (callee, rest) = children.split_first()
            .ok_or_else(|| Error::NotCallable(node.to_string()))?;
        let scope = Scope::nested(scope);
        let f = self.eval(callee, &scope)?;
        if let Value::Function(_) = f {
            let items = rest.iter().cloned().map(Arg::Node).collect();
            return call_with(self, &f, &scope, items, Some(node.clone()));
        }
        if let NodeKind::Identifier = callee.kind {
            if !scope.contains(&callee.original) {
                return Err(Error::UnknownFunction(callee.original.clone()));
            }
        }
        // without arguments the parentheses only group
        if rest.is_empty() {
            Ok(f)
        } else {
            Err(Error::NotCallable(callee.to_string()))
        }
    }
}

/// Calls a function value with a fresh argument cursor over `items`.
pub fn call_with(evaluator: &Evaluator, f: &Value, scope: &Rc<Scope>,
                 items: Vec<Arg>, callee: Option<Rc<Node>>) -> Result<Value> {
    match f {
        Value::Function(procedure) => {
            let mut args = Args::new(evaluator, scope.clone(), items, callee);
            procedure.call(scope, &mut args)
        },
        other => Err(Error::NotCallable(format!("{} value", other.type_name()))),
    }
}
