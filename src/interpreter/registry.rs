use std::sync::Arc;

use indexmap::IndexMap;

use crate::ast::statements::{BlockStmt, FnDeclStmt};

/// A user function as registered by executing its declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    pub name: String,
    pub parameters: Vec<String>,
    pub body: BlockStmt,
}

impl FunctionDef {
    pub fn arity(&self) -> usize {
        self.parameters.len()
    }
}

impl From<&FnDeclStmt> for FunctionDef {
    fn from(decl: &FnDeclStmt) -> Self {
        FunctionDef {
            name: decl.identifier.clone(),
            parameters: decl.parameters.clone(),
            body: decl.body.clone(),
        }
    }
}

/// Name to definition mapping, filled in as declarations execute.
///
/// Definitions are handed out as `Arc` so a running call keeps its body alive
/// even if the function is redefined while it executes.
#[derive(Debug, Default)]
pub struct FunctionRegistry {
    functions: IndexMap<String, Arc<FunctionDef>>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Default::default()
    }

    /// Inserts or replaces a definition. The last definition wins.
    pub fn define(&mut self, function: FunctionDef) {
        self.functions
            .insert(function.name.clone(), Arc::new(function));
    }

    pub fn get(&self, name: &str) -> Option<Arc<FunctionDef>> {
        self.functions.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}
