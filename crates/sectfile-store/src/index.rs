//! The in-memory section index used by every write.
//!
//! A [`SectionIndex`] is built from a full pass over the source, edited in
//! place, then flattened back into lines for the serializer. It never
//! outlives the call that built it.
//!
//! Two [`RewriteMode`]s control how malformed files are handled:
//!
//! - [`RewriteMode::Lossless`] keeps lines that appear before the first
//!   header as an unnamed preamble, always keeps the final block, and
//!   reports that nothing needs writing when no section matched.
//! - [`RewriteMode::Legacy`] matches older writers exactly: the
//!   first line is taken as a header whatever it contains, the final block
//!   is lost unless it was one of the replaced sections, and the file is
//!   rewritten even when nothing matched.

use std::io::{self, BufRead};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::format::{header_line, header_name, is_header};

/// How a rewrite treats content the section model cannot place.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RewriteMode {
    /// Preserve every line; skip the rewrite when no section matched.
    #[default]
    Lossless,
    /// Bit-for-bit compatible with legacy stores, data loss included.
    Legacy,
}

/// A header line and the body lines that follow it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Block {
    /// The raw header line, or `None` for a lossless-mode preamble.
    pub header: Option<String>,
    /// Lines up to the next header or end of input.
    pub body: Vec<String>,
    replaced: bool,
}

impl Block {
    fn new(header: Option<String>) -> Self {
        Self {
            header,
            body: Vec::new(),
            replaced: false,
        }
    }

    /// The section name carried by this block's header, if any.
    pub fn name(&self) -> Option<&str> {
        self.header.as_deref().and_then(header_name)
    }

    /// Whether the block's body was substituted by [`SectionIndex::replace`].
    pub fn is_replaced(&self) -> bool {
        self.replaced
    }
}

/// Ordered blocks of one store file.
#[derive(Clone, Debug)]
pub struct SectionIndex {
    blocks: Vec<Block>,
    mode: RewriteMode,
}

impl SectionIndex {
    /// Parse the whole source into blocks.
    pub fn parse<R: BufRead>(reader: R, mode: RewriteMode) -> io::Result<Self> {
        let mut blocks: Vec<Block> = Vec::new();

        for line in reader.lines() {
            let line = line?;
            let opens_block =
                is_header(&line) || (blocks.is_empty() && mode == RewriteMode::Legacy);
            if opens_block {
                blocks.push(Block::new(Some(line)));
                continue;
            }
            match blocks.last_mut() {
                Some(block) => block.body.push(line),
                None => {
                    let mut preamble = Block::new(None);
                    preamble.body.push(line);
                    blocks.push(preamble);
                }
            }
        }

        debug!(blocks = blocks.len(), ?mode, "section index built");
        Ok(Self { blocks, mode })
    }

    /// All blocks in file order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Number of blocks, preamble included.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Returns `true` if the source had no lines at all.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// The mode this index was parsed with.
    pub fn mode(&self) -> RewriteMode {
        self.mode
    }

    /// Body of the first block whose header is exactly `***name***`.
    pub fn get(&self, name: &str) -> Option<&[String]> {
        let target = header_line(name);
        self.blocks
            .iter()
            .find(|b| b.header.as_deref() == Some(target.as_str()))
            .map(|b| b.body.as_slice())
    }

    /// Replace the body of every block named `name`.
    ///
    /// Returns how many blocks matched. Never creates a block.
    pub fn replace<S: AsRef<str>>(&mut self, name: &str, body: &[S]) -> usize {
        let target = header_line(name);
        let mut replaced = 0;
        for block in &mut self.blocks {
            if block.header.as_deref() == Some(target.as_str()) {
                block.body = body.iter().map(|l| l.as_ref().to_string()).collect();
                block.replaced = true;
                replaced += 1;
            }
        }
        debug!(section = name, replaced, "section bodies replaced");
        replaced
    }

    /// Whether a rewrite after replacing `replaced` blocks should touch the
    /// resource at all.
    pub fn should_persist(&self, replaced: usize) -> bool {
        match self.mode {
            RewriteMode::Lossless => replaced > 0,
            RewriteMode::Legacy => !self.blocks.is_empty(),
        }
    }

    /// Flatten the index into output lines.
    ///
    /// In legacy mode the final block is omitted unless it was replaced.
    pub fn into_lines(self) -> Vec<String> {
        let mut blocks = self.blocks;
        if self.mode == RewriteMode::Legacy && blocks.last().is_some_and(|b| !b.replaced) {
            if let Some(dropped) = blocks.pop() {
                warn!(
                    header = dropped.header.as_deref().unwrap_or_default(),
                    lines = dropped.body.len() + 1,
                    "legacy rewrite drops the final block"
                );
            }
        }

        let mut lines = Vec::with_capacity(blocks.iter().map(|b| b.body.len() + 1).sum());
        for block in blocks {
            lines.extend(block.header);
            lines.extend(block.body);
        }
        lines
    }
}
