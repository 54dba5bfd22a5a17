//! # Attribute Store
//!
//! The store is the only stateful collaborator of the accessor engine. It
//! answers two questions, "what is stored under this name for this entry" and
//! "apply this change set to this entry", and nothing else. Defaults, coercion
//! and validation all live above it.
//!
//! ## Implementations
//!
//! - [`MemStore`](memory::MemStore): in-memory, for tests and embedding. Has
//!   hooks to write raw values and to simulate failures.
//! - [`FileStore`](fs::FileStore): one JSON document per entry under a root
//!   directory, written atomically. Backs the CLI.
//!
//! ## Receivers
//!
//! Every method takes `&self`. Implementations that need to mutate own their
//! interior mutability, so a view can hold a plain shared borrow of the store.
//!
//! ## Commit semantics
//!
//! `commit` applies the whole change set or nothing, using
//! [`ChangeSet::apply`](crate::changes::ChangeSet::apply). Committing to an
//! entry that does not exist yet creates it.

use crate::changes::{AttrMap, ChangeSet};
use crate::entry::{EntryKind, EntryRef};
use crate::error::Result;

pub mod fs;
pub mod memory;

pub trait AttributeStore {
    /// Every stored attribute of `entry`. An unknown entry has none.
    fn attributes(&self, entry: &EntryRef) -> Result<AttrMap>;

    /// Apply `changes` to `entry` as one unit.
    fn commit(&self, entry: &EntryRef, changes: &ChangeSet) -> Result<()>;

    /// Entries of `kind` known to the store, sorted by name.
    fn entries(&self, kind: EntryKind) -> Result<Vec<EntryRef>>;

    /// Stored values of one attribute, or `None` when absent.
    fn lookup(&self, entry: &EntryRef, name: &str) -> Result<Option<Vec<String>>> {
        Ok(self.attributes(entry)?.remove(name))
    }
}
