//! # Attribute System
//!
//! Attributes are named, typed values hanging off a directory entry. Instead of
//! one hand-written getter/setter/unsetter per attribute, this module keeps the
//! schema as data and the behaviour in one engine:
//!
//! - **Descriptors**: name, id, kind, default, multiplicity and valid tokens
//! - **Catalog**: the table of server attributes, searchable by name
//! - **Coercion**: stored string <-> typed value, reporting failure as `None`
//! - **Handles**: a descriptor bound to a Rust type, giving the accessor shapes
//!
//! ## Attribute Kinds
//!
//! | Kind | Example | Stored as | Implicit default |
//! |------|---------|-----------|------------------|
//! | `String` | `zimbraServiceHostname` | as-is | absent |
//! | `Int` | `zimbraMailPort` | decimal | `-1` |
//! | `Long` | `zimbraFileUploadMaxSize` | decimal or `10MB` | `-1` |
//! | `Bool` | `zimbraImapServerEnabled` | `TRUE` / `FALSE` | `false` |
//! | `Duration` | `zimbraHsmAge` | `30d`, `2h`, `90s`, `250ms` | `-1` |
//! | `Timestamp` | `zimbraCreateTimestamp` | `20240131235959Z` | absent |
//! | `Enum` | `zimbraMailMode` | one declared token | absent |
//!
//! Any kind may be multi-valued; a multi-valued attribute with nothing stored
//! reads as an empty sequence.
//!
//! ## Usage
//!
//! ```ignore
//! // By handle (typed)
//! let port = IntAttr::new(&catalog::MAIL_PORT).on(&view);
//! port.set(8080)?;
//!
//! // By name (dynamic)
//! let desc = catalog::lookup("MailPort").unwrap();
//! let value = view.resolve(desc);
//! ```

pub mod catalog;
pub mod coerce;
mod descriptor;
mod enums;
mod handles;
mod value;

pub use coerce::ToAttrValue;
pub use descriptor::{AttributeDescriptor, AttributeKind};
pub use enums::{
    AttrEnum, BackupMode, ClusterType, MailMode, MailReferMode, MtaTlsSecurityLevel,
    ReverseProxyLogLevel, ReverseProxyMailMode, StartTlsMode, TableMaintenanceOperation,
};
pub use handles::{
    BoolAttr, Bound, DurationAttr, EnumAttr, IntAttr, LongAttr, MultiAttr, ScalarAttr, StrAttr,
    TimeAttr, TypedAttr,
};
pub use value::AttrValue;
