//! Writes lines back out to a resource.

use std::io::{self, Write};

use tracing::debug;

use crate::format::LineEnding;

/// Write every line followed by `ending`, in order, then flush.
///
/// The destination is expected to be freshly truncated. Nothing guards
/// against a failure part way through: whatever was written before the
/// error stays written. Returns the number of lines written.
pub fn write_all<W, I, S>(mut dest: W, lines: I, ending: LineEnding) -> io::Result<usize>
where
    W: Write,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let terminator = ending.as_str().as_bytes();
    let mut written = 0;
    for line in lines {
        dest.write_all(line.as_ref().as_bytes())?;
        dest.write_all(terminator)?;
        written += 1;
    }
    dest.flush()?;
    debug!(lines = written, "lines serialized");
    Ok(written)
}
