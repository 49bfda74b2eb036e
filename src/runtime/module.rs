//! Modules
//!
//! A module anchors program counters and owns the globals that resumed code
//! resolves against. Built-in modules declare their exports up front and fill
//! them in when imported.

use super::computation::Callable;
use super::types::{RootValue, Val};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug)]
pub struct Module {
    name: String,
    identifier: String,
    exports: Vec<String>,
    globals: RefCell<HashMap<String, Val>>,
}

impl Module {
    pub fn new<I, S>(name: impl Into<String>, identifier: impl Into<String>, exports: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Module {
            name: name.into(),
            identifier: identifier.into(),
            exports: exports.into_iter().map(Into::into).collect(),
            globals: RefCell::new(HashMap::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn exports(&self) -> &[String] {
        &self.exports
    }

    pub fn get_global(&self, name: &str) -> Option<Val> {
        self.globals.borrow().get(name).cloned()
    }

    pub fn set_global(&self, name: impl Into<String>, value: Val) {
        self.globals.borrow_mut().insert(name.into(), value);
    }

    /// Register a callable under its own name
    pub fn define_func(&self, callable: Rc<Callable>) {
        self.set_global(callable.name().to_string(), Val::Func(callable));
    }

    /// Declared exports that have not been defined yet
    pub fn missing_exports(&self) -> Vec<&str> {
        let globals = self.globals.borrow();
        self.exports
            .iter()
            .filter(|name| !globals.contains_key(name.as_str()))
            .map(String::as_str)
            .collect()
    }
}

impl RootValue for Module {}
