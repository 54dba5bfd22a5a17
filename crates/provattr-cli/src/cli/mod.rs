//! # CLI Behavior
//!
//! `provattr` works on one entry kind at a time (`--kind`, default from
//! config) and one store directory (`--store`, default from config).
//!
//! - `provattr get mail1 MailPort` prints the resolved value, defaults applied.
//!   `--raw` shows only what is stored.
//! - `provattr set mail1 MailPort 8080 MailMode https` validates every pair,
//!   then commits them as one change set. `+ATTR`/`-ATTR` add to or remove from
//!   multi-valued attributes (put them after `--`).
//! - `provattr unset mail1 MailPort` clears attributes in one commit.
//! - `provattr describe [ATTR]` shows the catalog.
//! - `provattr entries` lists entries present in the store.
//!
//! Attribute names are matched against the catalog by full name, by name
//! without the `zimbra` prefix, or case-insensitively.
//!
//! ## Module Structure
//!
//! - `setup`: Argument parsing via clap, version string
//! - `commands`: Context setup and per-command handlers
//! - `print`: Human and JSON output

mod commands;
mod print;
pub mod setup;

pub use commands::run;
