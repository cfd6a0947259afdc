use std::rc::Rc;

/// Two level name keyed table: a shared default level and a local level
/// that is consulted first. Removing a local entry uncovers the default.
#[derive(Clone)]
pub struct Registry<T> {
    defaults: Rc<Vec<(String, T)>>,
    local: Vec<(String, T)>,
}

impl<T> Registry<T> {
    pub fn new(defaults: Rc<Vec<(String, T)>>) -> Registry<T> {
        Registry{defaults, local: Vec::new()}
    }

    pub fn get(&self, name: &str) -> Option<&T> {
        self.local.iter()
            .chain(self.defaults.iter())
            .find(|(n, _)| n == name)
            .map(|(_, entry)| entry)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Adds or replaces a local entry, returning the local one it replaced.
    pub fn insert(&mut self, name: impl Into<String>, entry: T) -> Option<T> {
        let name = name.into();
        match self.local.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => Some(std::mem::replace(&mut slot.1, entry)),
            None => {
                self.local.push((name, entry));
                None
            }
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<T> {
        let idx = self.local.iter().position(|(n, _)| n == name)?;
        Some(self.local.remove(idx).1)
    }

    /// Local entries in registration order, then the defaults they don't shadow.
    pub fn iter(&self) -> impl Iterator<Item=(&str, &T)> {
        let shadowed = |name: &str| self.local.iter().any(|(n, _)| n == name);
        self.local.iter()
            .map(|(n, entry)| (n.as_str(), entry))
            .chain(self.defaults.iter()
                .filter(move |(n, _)| !shadowed(n))
                .map(|(n, entry)| (n.as_str(), entry)))
    }

    pub fn defaults(&self) -> &Rc<Vec<(String, T)>> {
        &self.defaults
    }
}

///////////////////////////////////////////////////////////////////////////////
