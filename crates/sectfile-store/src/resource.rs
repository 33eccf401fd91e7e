//! The [`Resource`] trait: the byte stream a store reads and rewrites.
//!
//! A resource is acquired fresh by every operation and released before the
//! operation returns. Implementations never cache content across calls.

use std::io::{self, BufRead, Write};

/// Storage backend for one store file.
///
/// The store core only needs a readable line source and a truncating sink.
/// Creating the resource is the caller's job: the core never calls
/// [`Resource::create`] on its own.
pub trait Resource {
    /// Human-readable location, used in logs and error messages.
    fn locator(&self) -> String;

    /// Whether the resource currently exists.
    fn exists(&self) -> bool;

    /// Create the resource if it is absent, including any missing parent
    /// container. Never overwrites existing content.
    ///
    /// Returns `Ok(true)` if the resource was created by this call.
    fn create(&self) -> io::Result<bool>;

    /// Open the resource for a single forward read.
    ///
    /// Fails with [`io::ErrorKind::NotFound`] if the resource does not exist.
    fn reader(&self) -> io::Result<Box<dyn BufRead + '_>>;

    /// Open the resource for writing, truncating any existing content.
    fn writer(&self) -> io::Result<Box<dyn Write + '_>>;
}
