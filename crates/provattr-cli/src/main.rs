//! # Provattr CLI
//!
//! A thin admin client over the `provattr` library: it opens a file-backed
//! attribute store and reads or edits entries through the same accessor engine
//! library users get. This file only invokes `cli::run()` and handles process
//! termination.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (src/cli/)                                       │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - Config, logging and dispatch (commands.rs)               │
//! │  - Terminal output via console styles (print.rs)            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  provattr library                                           │
//! │  - catalog lookup, AttributeView, ChangeSet, FileStore      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything in the library is UI agnostic. Output formatting, exit codes and
//! the tracing subscriber live here.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
