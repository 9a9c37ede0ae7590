use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::object::Object;

struct Scope {
    store: HashMap<String, Object>,
    outer: Option<Environment>,
}

/// Handle to a lexical scope.
///
/// Clones share the same scope, which is how closures observe bindings
/// added to their defining scope after they were created.
#[derive(Clone)]
pub struct Environment {
    inner: Rc<RefCell<Scope>>,
}

impl Environment {
    pub fn new() -> Self {
        Self::wrap(Scope {
            store: HashMap::new(),
            outer: None,
        })
    }

    pub fn new_enclosed(outer: &Environment) -> Self {
        Self::wrap(Scope {
            store: HashMap::new(),
            outer: Some(outer.clone()),
        })
    }

    fn wrap(scope: Scope) -> Self {
        Environment {
            inner: Rc::new(RefCell::new(scope)),
        }
    }

    pub fn get(&self, name: &str) -> Option<Object> {
        let scope = self.inner.borrow();
        match scope.store.get(name) {
            Some(val) => Some(val.clone()),
            None => scope.outer.as_ref().and_then(|outer| outer.get(name)),
        }
    }

    /// Binds `name` in this scope, shadowing any outer binding.
    pub fn insert(&self, name: impl Into<String>, val: Object) -> Object {
        self.inner.borrow_mut().store.insert(name.into(), val.clone());
        val
    }

    pub fn ptr_eq(&self, other: &Environment) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scope = self.inner.borrow();
        let mut names: Vec<&String> = scope.store.keys().collect();
        names.sort();
        f.debug_struct("Environment")
            .field("names", &names)
            .field("enclosed", &scope.outer.is_some())
            .finish()
    }
}
