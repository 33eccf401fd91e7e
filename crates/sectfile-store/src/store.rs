//! [`SectionStore`]: named sections of lines in one flat text resource.
//!
//! Two API surfaces share one implementation:
//!
//! - The strict API (`read_*`, `write_*`, `add_section`, `create`) returns
//!   [`StoreResult`] and distinguishes an absent section from an I/O error.
//! - The compatibility API (`get_*`, `set_*`, `append_section`,
//!   `list_sections`, `ensure_created`) never fails: reads degrade to empty
//!   results and abandoned writes go to the [`Notifier`].
//!
//! Every call rebuilds its view of the resource from scratch. Writes are
//! read-all, edit, write-all with no temp-file swap, so a write that fails
//! part way can leave the resource truncated.

use std::io::{self, BufRead};

use tracing::{debug, error};

use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};
use crate::file::FileResource;
use crate::format::{header_line, LineEnding};
use crate::index::{RewriteMode, SectionIndex};
use crate::names::{validate_body, validate_section_name};
use crate::notify::{LogNotifier, Notice, NoticeKind, Notifier, Operation};
use crate::resource::Resource;
use crate::{scanner, serializer};

/// Result of a section write.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WriteOutcome {
    /// Every block with a matching header now holds the new body.
    Replaced { sections: usize },
    /// No header matched; the new body was discarded.
    NotFound,
}

impl WriteOutcome {
    pub fn is_replaced(&self) -> bool {
        matches!(self, Self::Replaced { .. })
    }
}

/// A failed write and the phase it failed in.
struct Abandoned {
    kind: NoticeKind,
    error: StoreError,
}

impl Abandoned {
    fn prepare<E: Into<StoreError>>(error: E) -> Self {
        Self {
            kind: NoticeKind::PrepareFailed,
            error: error.into(),
        }
    }

    fn save<E: Into<StoreError>>(error: E) -> Self {
        Self {
            kind: NoticeKind::SaveFailed,
            error: error.into(),
        }
    }

    fn rejected(error: StoreError) -> Self {
        Self {
            kind: NoticeKind::Rejected,
            error,
        }
    }
}

/// Sectioned text store over a single [`Resource`].
pub struct SectionStore<R = FileResource> {
    resource: R,
    line_ending: LineEnding,
    rewrite_mode: RewriteMode,
    notifier: Box<dyn Notifier>,
}

impl<R: Resource> std::fmt::Debug for SectionStore<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SectionStore")
            .field("locator", &self.resource.locator())
            .field("line_ending", &self.line_ending)
            .field("rewrite_mode", &self.rewrite_mode)
            .finish()
    }
}

impl SectionStore<FileResource> {
    /// Store backed by the file `config` names.
    pub fn open(config: &StoreConfig) -> Self {
        SectionStore::new(FileResource::from_config(config))
            .with_line_ending(config.line_ending)
            .with_rewrite_mode(config.rewrite_mode)
    }
}

impl<R: Resource> SectionStore<R> {
    /// Store over `resource` with default line ending, lossless rewrites
    /// and notices sent to the log.
    pub fn new(resource: R) -> Self {
        Self {
            resource,
            line_ending: LineEnding::default(),
            rewrite_mode: RewriteMode::default(),
            notifier: Box::new(LogNotifier),
        }
    }

    pub fn with_line_ending(mut self, ending: LineEnding) -> Self {
        self.line_ending = ending;
        self
    }

    pub fn with_rewrite_mode(mut self, mode: RewriteMode) -> Self {
        self.rewrite_mode = mode;
        self
    }

    /// Send abandoned-write notices to `notifier` instead of the log.
    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    pub fn resource(&self) -> &R {
        &self.resource
    }

    pub fn rewrite_mode(&self) -> RewriteMode {
        self.rewrite_mode
    }

    // ---------------------------------------------------------------
    // Resource lifecycle
    // ---------------------------------------------------------------

    /// Whether the backing resource exists.
    pub fn exists(&self) -> bool {
        self.resource.exists()
    }

    /// Create the backing resource if absent. Returns `true` if created.
    pub fn create(&self) -> StoreResult<bool> {
        Ok(self.resource.create()?)
    }

    /// Create the backing resource if absent, logging any failure.
    pub fn ensure_created(&self) {
        if let Err(e) = self.create() {
            error!(locator = %self.resource.locator(), error = %e, "store could not be created");
        }
    }

    // ---------------------------------------------------------------
    // Strict API
    // ---------------------------------------------------------------

    /// Body of the first section named `name`, or `None` if absent.
    pub fn read_section(&self, name: &str) -> StoreResult<Option<Vec<String>>> {
        Ok(scanner::find_section(self.reader()?, name)?)
    }

    /// First body line of the first section named `name`.
    ///
    /// `None` if the section is absent or empty.
    pub fn read_first_line(&self, name: &str) -> StoreResult<Option<String>> {
        Ok(scanner::find_first_line(self.reader()?, name)?)
    }

    /// Every line of the resource, in order.
    pub fn read_all_lines(&self) -> StoreResult<Vec<String>> {
        Ok(scanner::read_all_lines(self.reader()?)?)
    }

    /// Name of every section header, in file order, duplicates included.
    pub fn read_section_names(&self) -> StoreResult<Vec<String>> {
        Ok(scanner::list_sections(self.reader()?)?)
    }

    /// Replace the body of every section named `name` with `lines`.
    ///
    /// Never creates a section: if none matches, `lines` are discarded and
    /// [`WriteOutcome::NotFound`] is returned. In lossless mode the resource
    /// is then left untouched; in legacy mode it is still rewritten.
    pub fn write_section<S: AsRef<str>>(
        &self,
        name: &str,
        lines: &[S],
    ) -> StoreResult<WriteOutcome> {
        self.rewrite_section(name, lines).map_err(|a| a.error)
    }

    /// [`write_section`](Self::write_section) with a single body line.
    pub fn write_line(&self, name: &str, line: &str) -> StoreResult<WriteOutcome> {
        self.write_section(name, &[line])
    }

    /// Append an empty section named `name` at the end of the resource.
    ///
    /// Existing sections with the same name are not checked for.
    pub fn add_section(&self, name: &str) -> StoreResult<()> {
        self.append_header(name).map_err(|a| a.error)
    }

    // ---------------------------------------------------------------
    // Compatibility API
    // ---------------------------------------------------------------

    /// Body of the first section named `name`; empty if absent or unreadable.
    pub fn get_section(&self, name: &str) -> Vec<String> {
        degrade(self.read_section(name), name).unwrap_or_default()
    }

    /// First body line of section `name`; empty if absent or unreadable.
    pub fn get_first_line(&self, name: &str) -> String {
        degrade(self.read_first_line(name), name).unwrap_or_default()
    }

    /// Every line of the resource; empty if unreadable.
    pub fn get_all_lines(&self) -> Vec<String> {
        degrade(self.read_all_lines().map(Some), "").unwrap_or_default()
    }

    /// Section names in file order; empty if unreadable.
    pub fn list_sections(&self) -> Vec<String> {
        degrade(self.read_section_names().map(Some), "").unwrap_or_default()
    }

    /// Replace section bodies, reporting failures to the notifier.
    pub fn set_section<S: AsRef<str>>(&self, name: &str, lines: &[S]) {
        if let Err(abandoned) = self.rewrite_section(name, lines) {
            self.report(Operation::SetSection, name, abandoned);
        }
    }

    /// [`set_section`](Self::set_section) with a single body line.
    pub fn set_line(&self, name: &str, line: &str) {
        self.set_section(name, &[line]);
    }

    /// Append an empty section, reporting failures to the notifier.
    pub fn append_section(&self, name: &str) {
        if let Err(abandoned) = self.append_header(name) {
            self.report(Operation::AppendSection, name, abandoned);
        }
    }

    // ---------------------------------------------------------------
    // Internals
    // ---------------------------------------------------------------

    fn reader(&self) -> StoreResult<Box<dyn BufRead + '_>> {
        self.resource.reader().map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                StoreError::ResourceMissing(self.resource.locator())
            } else {
                StoreError::Io(e)
            }
        })
    }

    fn rewrite_section<S: AsRef<str>>(
        &self,
        name: &str,
        lines: &[S],
    ) -> Result<WriteOutcome, Abandoned> {
        validate_section_name(name).map_err(Abandoned::rejected)?;
        validate_body(name, lines).map_err(Abandoned::rejected)?;

        let mut index = {
            let reader = self.reader().map_err(Abandoned::prepare)?;
            SectionIndex::parse(reader, self.rewrite_mode).map_err(Abandoned::prepare)?
        };

        let replaced = index.replace(name, lines);
        if !index.should_persist(replaced) {
            debug!(section = name, locator = %self.resource.locator(), "no matching section; nothing written");
            return Ok(WriteOutcome::NotFound);
        }

        self.write_lines(index.into_lines())?;

        Ok(match replaced {
            0 => WriteOutcome::NotFound,
            sections => WriteOutcome::Replaced { sections },
        })
    }

    fn append_header(&self, name: &str) -> Result<(), Abandoned> {
        validate_section_name(name).map_err(Abandoned::rejected)?;

        let mut lines = self.read_all_lines().map_err(Abandoned::prepare)?;
        lines.push(header_line(name));
        self.write_lines(lines)
    }

    fn write_lines(&self, lines: Vec<String>) -> Result<(), Abandoned> {
        let writer = self.resource.writer().map_err(Abandoned::save)?;
        let written =
            serializer::write_all(writer, &lines, self.line_ending).map_err(Abandoned::save)?;
        debug!(locator = %self.resource.locator(), lines = written, "store rewritten");
        Ok(())
    }

    fn report(&self, operation: Operation, section: &str, abandoned: Abandoned) {
        self.notifier.notify(&Notice {
            operation,
            kind: abandoned.kind,
            section: section.to_string(),
            locator: self.resource.locator(),
            detail: abandoned.error.to_string(),
        });
    }
}

/// Collapse a strict read result for the compatibility API.
fn degrade<T>(result: StoreResult<Option<T>>, section: &str) -> Option<T> {
    match result {
        Ok(value) => value,
        Err(e) => {
            debug!(section, error = %e, "read failed; treating as not found");
            None
        }
    }
}
