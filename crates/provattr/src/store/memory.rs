use super::AttributeStore;
use crate::changes::{AttrMap, ChangeSet};
use crate::entry::{EntryKind, EntryRef};
use crate::error::{ProvError, Result};
use std::cell::RefCell;
use std::collections::HashMap;

/// In-memory attribute store.
///
/// Uses `RefCell` for interior mutability; the engine is single-threaded and
/// the [`AttributeStore`] trait takes `&self` everywhere.
#[derive(Default)]
pub struct MemStore {
    entries: RefCell<HashMap<EntryRef, AttrMap>>,
    simulate_commit_error: RefCell<bool>,
    simulate_lookup_error: RefCell<bool>,
    commits: RefCell<usize>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write stored values directly, bypassing change sets and typed setters.
    /// An empty `values` removes the attribute.
    pub fn put_raw(&self, entry: &EntryRef, name: &str, values: &[&str]) {
        let mut entries = self.entries.borrow_mut();
        let attrs = entries.entry(entry.clone()).or_default();
        if values.is_empty() {
            attrs.remove(name);
        } else {
            attrs.insert(
                name.to_string(),
                values.iter().map(|v| v.to_string()).collect(),
            );
        }
    }

    /// Make every subsequent commit fail with [`ProvError::Commit`].
    pub fn set_simulate_commit_error(&self, simulate: bool) {
        *self.simulate_commit_error.borrow_mut() = simulate;
    }

    /// Make every subsequent read fail with [`ProvError::Io`].
    pub fn set_simulate_lookup_error(&self, simulate: bool) {
        *self.simulate_lookup_error.borrow_mut() = simulate;
    }

    /// Number of successful commits so far.
    pub fn commit_count(&self) -> usize {
        *self.commits.borrow()
    }
}

impl AttributeStore for MemStore {
    fn attributes(&self, entry: &EntryRef) -> Result<AttrMap> {
        if *self.simulate_lookup_error.borrow() {
            return Err(ProvError::Io(std::io::Error::other(
                "Simulated lookup error",
            )));
        }
        let entries = self.entries.borrow();
        Ok(entries.get(entry).cloned().unwrap_or_default())
    }

    fn commit(&self, entry: &EntryRef, changes: &ChangeSet) -> Result<()> {
        if *self.simulate_commit_error.borrow() {
            return Err(ProvError::Commit("Simulated commit error".to_string()));
        }
        let mut entries = self.entries.borrow_mut();
        changes.apply(entries.entry(entry.clone()).or_default());
        *self.commits.borrow_mut() += 1;
        Ok(())
    }

    fn entries(&self, kind: EntryKind) -> Result<Vec<EntryRef>> {
        let entries = self.entries.borrow();
        let mut refs: Vec<EntryRef> = entries.keys().filter(|e| e.kind == kind).cloned().collect();
        refs.sort();
        Ok(refs)
    }
}
