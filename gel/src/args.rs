use crate::error::{Error, Result};
use crate::eval::{call_with, Evaluator};
use crate::parser::Node;
use crate::scope::Scope;
use crate::value::Value;

use std::rc::Rc;

/// An argument form: an unevaluated node or a value supplied directly.
#[derive(Clone, Debug, PartialEq)]
pub enum Arg {
    Node(Rc<Node>),
    Value(Value),
}

/// The lazy view over a call's arguments. Nodes are evaluated against the
/// calling scope only when asked for, and again every time they are.
pub struct Args<'e> {
    evaluator: &'e Evaluator,
    scope: Rc<Scope>,
    items: Vec<Arg>,
    index: usize,
    callee: Option<Rc<Node>>,
}

impl<'e> Args<'e> {
    pub fn new(evaluator: &'e Evaluator, scope: Rc<Scope>, items: Vec<Arg>,
               callee: Option<Rc<Node>>) -> Args<'e> {
        Args{evaluator, scope, items, index: 0, callee}
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn value_of(&self, arg: &Arg) -> Result<Value> {
        match arg {
            Arg::Node(node) => self.evaluator.eval(node, &self.scope),
            Arg::Value(value) => Ok(value.clone()),
        }
    }

    /// Random access, out of range is `undefined`.
    pub fn get(&self, idx: usize) -> Result<Value> {
        match self.items.get(idx) {
            Some(arg) => self.value_of(arg),
            None => Ok(Value::Undefined),
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<Value> {
        let arg = match self.items.get(self.index) {
            Some(arg) => arg.clone(),
            None => return Err(Error::Arity{
                callee: self.callee_text(),
                supplied: self.items.len(),
            }),
        };
        self.index += 1;
        self.value_of(&arg)
    }

    pub fn has_next(&self) -> bool {
        self.index < self.items.len()
    }

    pub fn all(&mut self) -> Result<Vec<Value>> {
        let mut values = Vec::new();
        while self.has_next() {
            values.push(self.next()?);
        }
        Ok(values)
    }

    /// The argument forms themselves, or with every node swapped for its value.
    pub fn raw(&self, evaluated: bool) -> Result<Vec<Arg>> {
        if !evaluated {
            return Ok(self.items.clone());
        }
        self.items.iter()
            .map(|arg| self.value_of(arg).map(Arg::Value))
            .collect()
    }

    pub fn callee(&self) -> Option<&Rc<Node>> {
        self.callee.as_ref()
    }

    fn callee_text(&self) -> String {
        self.callee.as_ref().map_or(format!("<host call>"), |c| c.to_string())
    }

    pub fn scope(&self) -> &Rc<Scope> {
        &self.scope
    }

    pub fn evaluator(&self) -> &'e Evaluator {
        self.evaluator
    }

    /// Invokes a function value with already evaluated arguments.
    pub fn call_with(&self, f: &Value, values: Vec<Value>) -> Result<Value> {
        let items = values.into_iter().map(Arg::Value).collect();
        call_with(self.evaluator, f, &self.scope, items, self.callee.clone())
    }
}
