//! Sectioned flat-text storage.
//!
//! A store is one plain text file holding named sections. Each section is a
//! header line `***name***` followed by body lines up to the next header or
//! end of file:
//!
//! ```text
//! ***Name***
//! Ezra
//! ***Supplies***
//! food
//! bullets
//! ```
//!
//! Reads scan the file afresh on every call; writes read the whole file,
//! edit it in memory and rewrite it completely. Nothing is cached between
//! calls and nothing is locked, so concurrent writers race and the last one
//! wins.
//!
//! # Modules
//!
//! - [`format`] — header flag and line terminators
//! - [`names`] — section name and body line validation
//! - [`scanner`] — forward-only reads: one section, all lines, all names
//! - [`index`] — [`SectionIndex`] built for rewrites, and [`RewriteMode`]
//! - [`serializer`] — writes lines back out
//! - [`resource`] — the [`Resource`] trait; [`FileResource`] and
//!   [`InMemoryResource`] implement it
//! - [`notify`] — advisory [`Notifier`] for abandoned writes
//! - [`config`] — [`StoreConfig`], loadable from TOML
//! - [`store`] — [`SectionStore`], the public read/write surface
//!
//! # Design Rules
//!
//! 1. Section order is file order; new sections go at the end.
//! 2. Reads return the first section with a matching name; writes replace
//!    every matching section.
//! 3. A write never creates a section; [`SectionStore::add_section`] does.
//! 4. The store never creates its resource on its own.

pub mod config;
pub mod error;
pub mod file;
pub mod format;
pub mod index;
pub mod memory;
pub mod names;
pub mod notify;
pub mod resource;
pub mod scanner;
pub mod serializer;
pub mod store;

pub use config::StoreConfig;
pub use error::{StoreError, StoreResult};
pub use file::FileResource;
pub use format::{LineEnding, FLAG};
pub use index::{Block, RewriteMode, SectionIndex};
pub use memory::InMemoryResource;
pub use notify::{LogNotifier, Notice, NoticeKind, Notifier, Operation, RecordingNotifier};
pub use resource::Resource;
pub use store::{SectionStore, WriteOutcome};
