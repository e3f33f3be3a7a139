//! # statehash
//!
//! Maps keywords to small dense identifiers through a character-driven state
//! transition table instead of a computed hash function.
//!
//! The table is a trie stored as 37 parallel lanes: one per input symbol
//! (`0-9`, `a-z` with case folding) and one holding identifiers. Inserting a
//! keyword walks existing transitions and allocates states only for the
//! unshared suffix; the first keyword gets identifier 0, the next new one 1,
//! and so on. Bytes outside the alphabet are skipped, so `"a-b"` and `"ab"`
//! are the same keyword.
//!
//! ## Example
//!
//! ```rust
//! use statehash::{TableConfig, TransitionTable};
//!
//! let mut table = TransitionTable::new(TableConfig::default()).unwrap();
//! assert_eq!(table.insert(b"374d3d5a-2dd1-451a-bccc-7102c37bf029"), Ok(0));
//! assert_eq!(table.insert(b"44cb7697-e0f3-45bf-bb2f-a5836c312279"), Ok(1));
//!
//! assert_eq!(table.lookup(b"44CB7697E0F345BFBB2FA5836C312279"), Ok(1));
//! assert!(table.lookup(b"unknown-pattern").is_err());
//! ```

#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]

#[macro_use]
pub mod diagnostics;

pub mod alphabet;
pub mod config;
pub mod error;
pub mod keywords;
mod lanes;
pub mod shared;
mod table;

pub use config::{TableConfig, DEFAULT_CAPACITY};
pub use diagnostics::{DiagnosticSink, Location, TracingSink};
pub use error::TableError;
pub use keywords::{load_keywords, load_keywords_from, LoadError, LoadReport};
pub use shared::SharedTable;
pub use table::{TableStats, TransitionTable};

#[cfg(test)]
mod proptests;
