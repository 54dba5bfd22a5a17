//! # Provattr Architecture
//!
//! Provattr is a **typed accessor layer over a directory-style attribute store**.
//! A directory entry (a server, a domain, the global config) carries a bag of
//! named string attributes; this crate turns that bag into typed reads with
//! defaults and typed writes through a single commit path.
//!
//! The schema is data, not code. One engine serves every attribute.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Facade (server.rs)                                         │
//! │  - One named method per catalog attribute                   │
//! │  - server.mail_port().get() / .set(8080)? / .unset()?       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Handles (attributes/handles.rs)                            │
//! │  - Bind a descriptor to a Rust type (i32, bool, enum, ...)  │
//! │  - Apply the declared default                               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Engine (view.rs)                                           │
//! │  - Reads: lookup, coerce, fall back to default              │
//! │  - Writes: stage into a ChangeSet, commit once              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - AttributeStore trait: lookup + commit                    │
//! │  - FileStore (CLI), MemStore (testing, embedding)           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Contract
//!
//! - Reads never fail. Absent, malformed, or unreadable values resolve to a
//!   default and the anomaly is logged through `tracing`.
//! - Direct writes commit exactly one change set and propagate store errors
//!   unchanged. Staged writes (`*_in`) only fill a change set.
//! - Nothing is cached; every read goes to the store.
//!
//! ## Module Overview
//!
//! - [`attributes`]: Descriptors, catalog, coercion, enums and typed handles
//! - [`changes`]: Pending modifications (`name`, `+name`, `-name`)
//! - [`view`]: The generic accessor engine
//! - [`server`]: Named accessors for server entries
//! - [`store`]: Storage abstraction and implementations
//! - [`entry`]: Entry kinds and references
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod attributes;
pub mod changes;
pub mod config;
pub mod entry;
pub mod error;
pub mod server;
pub mod store;
pub mod view;

#[cfg(test)]
pub(crate) mod test_utils;

pub use attributes::{AttrEnum, AttrValue, AttributeDescriptor, AttributeKind, ToAttrValue};
pub use changes::ChangeSet;
pub use entry::{EntryKind, EntryRef};
pub use error::{ProvError, Result};
pub use server::Server;
pub use store::fs::FileStore;
pub use store::memory::MemStore;
pub use store::AttributeStore;
pub use view::AttributeView;
