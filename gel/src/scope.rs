use crate::value::Value;

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// One level of the lexical environment chain.
#[derive(Default)]
pub struct Scope {
    vars: RefCell<HashMap<String, Value>>,
    outer: Option<Rc<Scope>>,
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut names: Vec<String> = self.vars.borrow().keys().cloned().collect();
        names.sort();
        write!(f, "Scope({:?}, outer: {})", names, self.outer.is_some())
    }
}

impl Scope {
    pub fn new() -> Rc<Scope> {
        Rc::new(Scope::default())
    }

    pub fn nested(outer: &Rc<Scope>) -> Rc<Scope> {
        Rc::new(Scope{vars: RefCell::new(HashMap::new()), outer: Some(outer.clone())})
    }

    pub fn outer(&self) -> Option<&Rc<Scope>> {
        self.outer.as_ref()
    }

    /// Searches this level then the outer chain.
    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.vars.borrow().get(name) {
            return Some(value.clone());
        }
        self.outer.as_ref().and_then(|outer| outer.get(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.vars.borrow().contains_key(name)
            || self.outer.as_ref().map_or(false, |outer| outer.contains(name))
    }

    // set and add only ever touch this level
    pub fn set(&self, name: impl Into<String>, value: Value) {
        self.vars.borrow_mut().insert(name.into(), value);
    }

    pub fn add<K, I>(&self, vars: I) where K: Into<String>, I: IntoIterator<Item=(K, Value)> {
        self.vars.borrow_mut().extend(vars.into_iter().map(|(k, v)| (k.into(), v)));
    }
}

///////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_walks_outward() {
        let root = Scope::new();
        root.add(vec![("a", Value::from(1)), ("b", Value::from(2))]);
        let inner = Scope::nested(&root);
        inner.set("a", Value::from("shadow"));
        assert_eq!(inner.get("a"), Some(Value::from("shadow")));
        assert_eq!(inner.get("b"), Some(Value::from(2)));
        assert_eq!(inner.get("c"), None);
        assert_eq!(root.get("a"), Some(Value::from(1)));
    }

    #[test]
    fn set_is_local() {
        let root = Scope::new();
        let inner = Scope::nested(&root);
        inner.set("x", Value::Null);
        assert!(inner.contains("x"));
        assert!(!root.contains("x"));
        // a stored undefined is still a binding
        root.set("u", Value::Undefined);
        assert_eq!(inner.get("u"), Some(Value::Undefined));
    }
}
