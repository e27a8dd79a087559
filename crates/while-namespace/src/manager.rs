//! Component C8: a `namespace × old_name → fresh_name` table
//! with its inverse, used by the macro inliner to keep a
//! freshly-copied macro body's variables from colliding with the caller's.
//! Follows `RenameTable`'s shape
//! (`compiler/passes/src/common/rename_table/mod.rs`), generalised from a
//! single parent-scope chain to a flat map of independently named
//! namespaces — this system has no notion of lexical scope nesting, only
//! of "the copy of macro M currently being inlined".

use std::cell::RefCell;

use indexmap::IndexMap;

use crate::name_generator::NameGenerator;

pub const DEFAULT_NAMESPACE: &str = "default";

#[derive(Default)]
pub struct NamespaceManager {
    inner: RefCell<Inner>,
}

#[derive(Default)]
struct Inner {
    forward: IndexMap<String, IndexMap<String, String>>,
    backward: IndexMap<String, (String, String)>,
    names: NameGenerator,
    namespaces: NameGenerator,
}

impl NamespaceManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps `old` (in namespace `ns`, default `"default"`) to `new`, or to a
    /// freshly generated name if `new` is absent. On an existing mapping,
    /// returns it unchanged unless `force` is set, in which case the old
    /// fresh name is released (dropped from the inverse lookup) and
    /// replaced. An automatically generated name never collides with a name
    /// already tracked in any namespace (including one only ever seeded via
    /// an explicit `new`), so callers can seed a manager with a host
    /// program's existing variables before drawing fresh ones for it.
    pub fn add(&self, old: &str, ns: Option<&str>, new: Option<String>, force: bool) -> String {
        let ns = ns.unwrap_or(DEFAULT_NAMESPACE).to_string();
        let mut inner = self.inner.borrow_mut();

        if let Some(existing) = inner.forward.get(&ns).and_then(|m| m.get(old)).cloned() {
            if !force {
                return existing;
            }
            inner.backward.shift_remove(&existing);
        }

        let fresh = match new {
            Some(n) => n,
            None => loop {
                let candidate = inner.names.next(true);
                if !inner.backward.contains_key(&candidate) {
                    break candidate;
                }
            },
        };
        inner.forward.entry(ns.clone()).or_default().insert(old.to_string(), fresh.clone());
        inner.backward.insert(fresh.clone(), (old.to_string(), ns));
        fresh
    }

    pub fn get(&self, old: &str, ns: Option<&str>) -> Option<String> {
        let ns = ns.unwrap_or(DEFAULT_NAMESPACE);
        self.inner.borrow().forward.get(ns).and_then(|m| m.get(old)).cloned()
    }

    pub fn delete(&self, old: &str, ns: Option<&str>) -> bool {
        let ns = ns.unwrap_or(DEFAULT_NAMESPACE).to_string();
        let mut inner = self.inner.borrow_mut();
        let Some(map) = inner.forward.get_mut(&ns) else { return false };
        let Some(fresh) = map.shift_remove(old) else { return false };
        inner.backward.shift_remove(&fresh);
        true
    }

    pub fn delete_namespace(&self, ns: Option<&str>) -> bool {
        let ns = ns.unwrap_or(DEFAULT_NAMESPACE).to_string();
        let mut inner = self.inner.borrow_mut();
        let Some(map) = inner.forward.shift_remove(&ns) else { return false };
        for fresh in map.values() {
            inner.backward.shift_remove(fresh);
        }
        true
    }

    pub fn exists(&self, old: &str, ns: Option<&str>) -> bool {
        let ns = ns.unwrap_or(DEFAULT_NAMESPACE);
        self.inner.borrow().forward.get(ns).is_some_and(|m| m.contains_key(old))
    }

    pub fn namespace_exists(&self, ns: &str) -> bool {
        self.inner.borrow().forward.contains_key(ns)
    }

    /// Every fresh name currently tracked by the inverse lookup, across all
    /// namespaces, in order of introduction.
    pub fn variables(&self) -> Vec<String> {
        self.inner.borrow().backward.keys().cloned().collect()
    }

    pub fn namespaces(&self) -> Vec<String> {
        self.inner.borrow().forward.keys().cloned().collect()
    }

    /// A fresh namespace name, drawn from its own name stream so it never
    /// collides with a variable name.
    pub fn get_new_namespace(&self) -> String {
        self.inner.borrow().namespaces.next(true)
    }

    /// Peeks the name `add` would mint next if called without an explicit
    /// `new`, without consuming it or any name it would have to skip past.
    pub fn get_next_var_name(&self) -> String {
        let inner = self.inner.borrow();
        let mut skip = 0;
        loop {
            let candidate = inner.names.peek_ahead(skip);
            if !inner.backward.contains_key(&candidate) {
                return candidate;
            }
            skip += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_without_explicit_name_draws_from_the_generator() {
        let mgr = NamespaceManager::new();
        assert_eq!(mgr.add("X", None, None, false), "A");
        assert_eq!(mgr.add("Y", None, None, false), "B");
    }

    #[test]
    fn add_is_idempotent_without_force() {
        let mgr = NamespaceManager::new();
        let first = mgr.add("X", None, None, false);
        let second = mgr.add("X", None, Some("ZZZ".to_string()), false);
        assert_eq!(first, second);
    }

    #[test]
    fn force_replaces_and_releases_the_old_fresh_name() {
        let mgr = NamespaceManager::new();
        let first = mgr.add("X", None, None, false);
        let replaced = mgr.add("X", None, Some("OVERRIDE".to_string()), true);
        assert_ne!(first, replaced);
        assert_eq!(mgr.get("X", None).as_deref(), Some("OVERRIDE"));
        assert!(!mgr.variables().contains(&first));
    }

    #[test]
    fn namespaces_are_independent() {
        let mgr = NamespaceManager::new();
        mgr.add("X", Some("m1"), Some("m1_X".to_string()), false);
        mgr.add("X", Some("m2"), Some("m2_X".to_string()), false);
        assert_eq!(mgr.get("X", Some("m1")).as_deref(), Some("m1_X"));
        assert_eq!(mgr.get("X", Some("m2")).as_deref(), Some("m2_X"));
        assert!(!mgr.exists("X", None));
    }

    #[test]
    fn delete_namespace_releases_every_entry() {
        let mgr = NamespaceManager::new();
        mgr.add("X", Some("m1"), Some("fresh".to_string()), false);
        assert!(mgr.delete_namespace(Some("m1")));
        assert!(!mgr.namespace_exists("m1"));
        assert!(mgr.variables().is_empty());
    }

    #[test]
    fn get_new_namespace_never_repeats() {
        let mgr = NamespaceManager::new();
        let a = mgr.get_new_namespace();
        let b = mgr.get_new_namespace();
        assert_ne!(a, b);
    }

    #[test]
    fn get_next_var_name_does_not_consume() {
        let mgr = NamespaceManager::new();
        assert_eq!(mgr.get_next_var_name(), "A");
        assert_eq!(mgr.add("X", None, None, false), "A");
        assert_eq!(mgr.get_next_var_name(), "B");
    }

    #[test]
    fn auto_generated_names_skip_over_ones_seeded_with_an_explicit_name() {
        let mgr = NamespaceManager::new();
        // Seed "A" as already taken, the way a caller would pre-populate a
        // manager with a host program's own variables before drawing fresh
        // names for something else entirely.
        mgr.add("A", None, Some("A".to_string()), false);
        assert_eq!(mgr.get_next_var_name(), "B");
        assert_eq!(mgr.add("N", Some("macro"), None, false), "B");
    }

    #[test]
    fn auto_generated_names_skip_collisions_across_namespaces() {
        let mgr = NamespaceManager::new();
        mgr.add("A", None, Some("A".to_string()), false);
        mgr.add("B", None, Some("B".to_string()), false);
        assert_eq!(mgr.add("N", Some("macro"), None, false), "C");
    }
}
