//! In-memory resource for testing and embedding.
//!
//! [`InMemoryResource`] keeps the whole file as a byte buffer behind an
//! `RwLock`. `None` content models a resource that has not been created.
//! An optional write limit makes writers fail part way through, leaving the
//! truncated prefix behind the way a full disk would.

use std::io::{self, BufRead, Cursor, Write};
use std::sync::{RwLock, RwLockWriteGuard};

use crate::resource::Resource;

/// An in-memory implementation of [`Resource`].
#[derive(Debug, Default)]
pub struct InMemoryResource {
    content: RwLock<Option<Vec<u8>>>,
    write_limit: Option<usize>,
}

impl InMemoryResource {
    /// A resource that does not exist yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// An existing resource holding `text`.
    pub fn with_text(text: &str) -> Self {
        Self {
            content: RwLock::new(Some(text.as_bytes().to_vec())),
            write_limit: None,
        }
    }

    /// Make every writer fail once it has accepted `limit` bytes.
    pub fn with_write_limit(mut self, limit: usize) -> Self {
        self.write_limit = Some(limit);
        self
    }

    /// Current raw content, or `None` if the resource does not exist.
    pub fn bytes(&self) -> Option<Vec<u8>> {
        self.content.read().ok().and_then(|c| c.clone())
    }

    /// Current content as text, or `None` if absent or not UTF-8.
    pub fn text(&self) -> Option<String> {
        self.bytes().and_then(|b| String::from_utf8(b).ok())
    }

    /// Forget the content, as if the resource had been deleted.
    pub fn remove(&self) {
        if let Ok(mut content) = self.content.write() {
            *content = None;
        }
    }
}

fn poisoned<E: std::fmt::Display>(e: E) -> io::Error {
    io::Error::other(format!("lock poisoned: {e}"))
}

impl Resource for InMemoryResource {
    fn locator(&self) -> String {
        "memory".to_string()
    }

    fn exists(&self) -> bool {
        self.content.read().map(|c| c.is_some()).unwrap_or(false)
    }

    fn create(&self) -> io::Result<bool> {
        let mut content = self.content.write().map_err(poisoned)?;
        if content.is_some() {
            return Ok(false);
        }
        *content = Some(Vec::new());
        Ok(true)
    }

    fn reader(&self) -> io::Result<Box<dyn BufRead + '_>> {
        let content = self.content.read().map_err(poisoned)?;
        match content.as_ref() {
            Some(bytes) => Ok(Box::new(Cursor::new(bytes.clone()))),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                "in-memory resource does not exist",
            )),
        }
    }

    fn writer(&self) -> io::Result<Box<dyn Write + '_>> {
        let mut content = self.content.write().map_err(poisoned)?;
        *content = Some(Vec::new());
        Ok(Box::new(MemoryWriter {
            content,
            remaining: self.write_limit,
        }))
    }
}

/// Truncating writer that holds the write lock until dropped.
struct MemoryWriter<'a> {
    content: RwLockWriteGuard<'a, Option<Vec<u8>>>,
    remaining: Option<usize>,
}

impl Write for MemoryWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let accepted = match self.remaining {
            Some(0) if !buf.is_empty() => {
                return Err(io::Error::new(io::ErrorKind::WriteZero, "write limit reached"));
            }
            Some(left) => buf.len().min(left),
            None => buf.len(),
        };
        if let Some(left) = self.remaining.as_mut() {
            *left -= accepted;
        }
        self.content
            .get_or_insert_with(Vec::new)
            .extend_from_slice(&buf[..accepted]);
        Ok(accepted)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[test]
    fn new_resource_does_not_exist() {
        let res = InMemoryResource::new();
        assert!(!res.exists());
        assert!(res.bytes().is_none());
        let err = res.reader().err().unwrap();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn create_is_idempotent() {
        let res = InMemoryResource::new();
        assert!(res.create().unwrap());
        assert!(!res.create().unwrap());
        assert_eq!(res.text().as_deref(), Some(""));
    }

    #[test]
    fn create_keeps_existing_content() {
        let res = InMemoryResource::with_text("***A***\n");
        assert!(!res.create().unwrap());
        assert_eq!(res.text().as_deref(), Some("***A***\n"));
    }

    #[test]
    fn reader_sees_content() {
        let res = InMemoryResource::with_text("line\n");
        let mut out = String::new();
        res.reader().unwrap().read_to_string(&mut out).unwrap();
        assert_eq!(out, "line\n");
    }

    #[test]
    fn writer_truncates() {
        let res = InMemoryResource::with_text("old content\n");
        {
            let mut w = res.writer().unwrap();
            w.write_all(b"new\n").unwrap();
        }
        assert_eq!(res.text().as_deref(), Some("new\n"));
    }

    #[test]
    fn write_limit_leaves_prefix() {
        let res = InMemoryResource::with_text("old content\n").with_write_limit(3);
        {
            let mut w = res.writer().unwrap();
            assert!(w.write_all(b"abcdef").is_err());
        }
        assert_eq!(res.text().as_deref(), Some("abc"));
    }

    #[test]
    fn remove_forgets_content() {
        let res = InMemoryResource::with_text("x\n");
        res.remove();
        assert!(!res.exists());
    }
}
