// ABOUTME: Environment module — symbol-to-value bindings with lexical parent chain

use crate::error::EvalError;
use crate::value::{Builtin, Value};
use std::cell::RefCell;
use std::rc::Rc;

/// A single binding frame plus an optional link to its enclosing frame.
/// Frames compose into a tree rooted at the global environment; a Lambda's
/// captured environment has its parent wired up only at call time (§4.6),
/// so this can never form a cycle — `parent` is a plain owned `Rc`.
///
/// Bindings are a `Vec`, not a `HashMap`: spec.md §4.3 specifies linear
/// scan within a frame and insertion order, both of which a `Vec` gives for
/// free and a hash map would have to fake.
#[derive(Debug)]
pub struct Environment {
    bindings: RefCell<Vec<(String, Value)>>,
    parent: Option<Rc<Environment>>,
}

impl Environment {
    /// Creates a new global environment with no parent.
    pub fn new() -> Rc<Self> {
        Rc::new(Environment {
            bindings: RefCell::new(Vec::new()),
            parent: None,
        })
    }

    /// Creates a new child environment with a parent.
    pub fn with_parent(parent: Rc<Environment>) -> Rc<Self> {
        Rc::new(Environment {
            bindings: RefCell::new(Vec::new()),
            parent: Some(parent),
        })
    }

    /// Lookup with parent walk. Linear search at this frame first.
    pub fn get(&self, name: &str) -> Result<Value, EvalError> {
        {
            let bindings = self.bindings.borrow();
            if let Some((_, v)) = bindings.iter().find(|(k, _)| k == name) {
                return Ok(v.clone());
            }
        }
        match &self.parent {
            Some(parent) => parent.get(name),
            None => Err(EvalError::UndefinedSymbol(name.to_string())),
        }
    }

    /// Local bind (`=`): install in this frame only, replacing any
    /// same-named entry that already lives here.
    pub fn put(&self, name: String, value: Value) {
        let mut bindings = self.bindings.borrow_mut();
        if let Some(entry) = bindings.iter_mut().find(|(k, _)| *k == name) {
            entry.1 = value;
        } else {
            bindings.push((name, value));
        }
    }

    /// Global bind (`def`): walk to the root frame, then local-bind there.
    pub fn def(self: &Rc<Self>, name: String, value: Value) {
        let mut root = Rc::clone(self);
        while let Some(parent) = root.parent.clone() {
            root = parent;
        }
        root.put(name, value);
    }

    /// Reverse-lookup used only by the printer to name built-ins by their
    /// bound symbol; walks the parent chain, innermost frame first.
    pub fn reverse_lookup(&self, target: Builtin) -> Option<String> {
        {
            let bindings = self.bindings.borrow();
            for (name, value) in bindings.iter() {
                if let Value::Builtin(f) = value {
                    if *f as usize == target as usize {
                        return Some(name.clone());
                    }
                }
            }
        }
        self.parent.as_ref().and_then(|p| p.reverse_lookup(target))
    }

    /// All names bound in this frame (used by the REPL's `symbols` command,
    /// which inspects only the global frame).
    pub fn names(&self) -> Vec<String> {
        self.bindings
            .borrow()
            .iter()
            .map(|(k, _)| k.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn define_and_get() {
        let env = Environment::new();
        env.put("x".to_string(), Value::Number(42));
        assert_eq!(env.get("x"), Ok(Value::Number(42)));
    }

    #[test]
    fn undefined_symbol() {
        let env = Environment::new();
        assert_eq!(
            env.get("undefined"),
            Err(EvalError::UndefinedSymbol("undefined".to_string()))
        );
    }

    #[test]
    fn local_bind_shadows_only_current_frame() {
        let parent = Environment::new();
        parent.put("x".to_string(), Value::Number(1));

        let child = Environment::with_parent(parent.clone());
        child.put("x".to_string(), Value::Number(2));

        assert_eq!(child.get("x"), Ok(Value::Number(2)));
        assert_eq!(parent.get("x"), Ok(Value::Number(1)));
    }

    #[test]
    fn parent_lookup_falls_through() {
        let parent = Environment::new();
        parent.put("x".to_string(), Value::Number(42));
        let child = Environment::with_parent(parent);
        assert_eq!(child.get("x"), Ok(Value::Number(42)));
    }

    #[test]
    fn def_always_targets_the_root_frame() {
        let root = Environment::new();
        let child = Environment::with_parent(root.clone());
        let grandchild = Environment::with_parent(child.clone());

        grandchild.def("x".to_string(), Value::Number(99));

        assert_eq!(root.get("x"), Ok(Value::Number(99)));
        // def never leaves a binding in the intermediate frames
        assert!(child.bindings.borrow().is_empty());
        assert!(grandchild.bindings.borrow().is_empty());
    }

    #[test]
    fn put_replaces_existing_binding_in_place() {
        let env = Environment::new();
        env.put("x".to_string(), Value::Number(1));
        env.put("x".to_string(), Value::Number(2));
        assert_eq!(env.bindings.borrow().len(), 1);
        assert_eq!(env.get("x"), Ok(Value::Number(2)));
    }

    #[test]
    fn reverse_lookup_finds_bound_builtin() {
        fn dummy(_env: Rc<Environment>, _args: Vec<Value>) -> Result<Value, EvalError> {
            Ok(Value::Number(0))
        }
        let env = Environment::new();
        env.put("dummy".to_string(), Value::Builtin(dummy));
        assert_eq!(env.reverse_lookup(dummy), Some("dummy".to_string()));
    }

    #[test]
    fn names_reflects_insertion_order() {
        let env = Environment::new();
        env.put("b".to_string(), Value::Number(1));
        env.put("a".to_string(), Value::Number(2));
        assert_eq!(env.names(), vec!["b".to_string(), "a".to_string()]);
    }
}
