use indexmap::IndexMap;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position,
};

/// A scope of variable bindings.
///
/// Lookups walk outwards through `parent`; writes only ever touch this
/// scope. A function call gets a fresh environment whose parent is the
/// global scope, so callers' locals are never visible to the callee.
#[derive(Debug, Default)]
pub struct Environment<'p> {
    variables: IndexMap<String, i64>,
    parent: Option<&'p Environment<'p>>,
    capacity: Option<usize>,
}

impl<'p> Environment<'p> {
    pub fn new(capacity: Option<usize>) -> Self {
        Environment {
            variables: IndexMap::new(),
            parent: None,
            capacity,
        }
    }

    pub fn with_parent(parent: &'p Environment<'p>, capacity: Option<usize>) -> Self {
        Environment {
            variables: IndexMap::new(),
            parent: Some(parent),
            capacity,
        }
    }

    /// The outermost environment of the chain.
    pub fn root(&self) -> &Environment<'p> {
        match self.parent {
            Some(parent) => parent.root(),
            None => self,
        }
    }

    pub fn lookup(&self, name: &str, position: &Position) -> Result<i64, Error> {
        match self.get(name) {
            Some(value) => Ok(value),
            None => Err(Error::new(
                ErrorImpl::VariableNotDeclared {
                    variable: name.to_string(),
                },
                position.clone(),
            )),
        }
    }

    pub fn get(&self, name: &str) -> Option<i64> {
        match self.variables.get(name) {
            Some(value) => Some(*value),
            None => self.parent.and_then(|parent| parent.get(name)),
        }
    }

    /// Binds `name` in this scope, overwriting an existing binding here.
    ///
    /// A binding of the same name in an outer scope is shadowed, never
    /// written through.
    pub fn assign(&mut self, name: &str, value: i64, position: &Position) -> Result<(), Error> {
        if let Some(slot) = self.variables.get_mut(name) {
            *slot = value;
            return Ok(());
        }

        if let Some(limit) = self.capacity {
            if self.variables.len() >= limit {
                return Err(Error::new(
                    ErrorImpl::CapacityExceeded { limit },
                    position.clone(),
                ));
            }
        }

        self.variables.insert(name.to_string(), value);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Bindings of this scope, in the order they were first assigned.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, i64> {
        self.variables.iter()
    }
}
