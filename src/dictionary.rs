// The optional variable dictionary.
//
// The base machine always thunks on an unbound `Variable`. A
// `Dictionary` is an explicit, opt-in collaborator that the rewriter
// consults first; its absence reproduces the base behaviour exactly.
// Modeled as a chain of scopes so that a caller can layer local
// bindings over a shared base dictionary without copying it.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::block::Block;

struct Scope {
    bindings: RefCell<HashMap<String, Block>>,
    parent: Option<Dictionary>,
}

/// A chained name-to-block binding table.
#[derive(Clone)]
pub struct Dictionary(Rc<Scope>);

impl Dictionary {
    /// A fresh dictionary with no bindings and no parent.
    pub fn new() -> Dictionary {
        Dictionary(Rc::new(Scope {
            bindings: RefCell::new(HashMap::new()),
            parent: None,
        }))
    }

    /// A child scope that shadows `self` without mutating it.
    pub fn child(&self) -> Dictionary {
        Dictionary(Rc::new(Scope {
            bindings: RefCell::new(HashMap::new()),
            parent: Some(self.clone()),
        }))
    }

    /// Bind `name` to `block` in this scope.
    pub fn define(&self, name: impl Into<String>, block: Block) {
        self.0.bindings.borrow_mut().insert(name.into(), block);
    }

    /// Look up `name`, walking the parent chain if it isn't bound
    /// in this scope.
    pub fn get(&self, name: &str) -> Option<Block> {
        if let Some(block) = self.0.bindings.borrow().get(name) {
            return Some(block.clone());
        }
        self.0.parent.as_ref().and_then(|parent| parent.get(name))
    }
}

impl Default for Dictionary {
    fn default() -> Dictionary {
        Dictionary::new()
    }
}
