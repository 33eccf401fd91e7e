//! Input validation for section names and body lines.
//!
//! Both end up as single lines in the store file, so neither may carry a
//! line break. Body lines that start with the header flag are accepted but
//! logged: they will read back as section boundaries.

use tracing::warn;

use crate::error::{StoreError, StoreResult};
use crate::format::is_header;

/// Characters that would split a value across stored lines.
const LINE_BREAKS: &[char] = &['\n', '\r'];

/// Validate a section name, returning `Ok(())` if it fits on a header line.
///
/// # Examples
///
/// ```
/// use sectfile_store::names::validate_section_name;
///
/// assert!(validate_section_name("party").is_ok());
/// assert!(validate_section_name("two\nlines").is_err());
/// ```
pub fn validate_section_name(name: &str) -> StoreResult<()> {
    if let Some(ch) = name.chars().find(|c| LINE_BREAKS.contains(c)) {
        return Err(StoreError::InvalidName {
            name: name.to_string(),
            reason: format!("contains line break {ch:?}"),
        });
    }
    Ok(())
}

/// Validate the body lines destined for `section`.
pub fn validate_body<S: AsRef<str>>(section: &str, lines: &[S]) -> StoreResult<()> {
    for (index, line) in lines.iter().enumerate() {
        let line = line.as_ref();
        if let Some(ch) = line.chars().find(|c| LINE_BREAKS.contains(c)) {
            return Err(StoreError::InvalidLine {
                section: section.to_string(),
                index,
                reason: format!("contains line break {ch:?}"),
            });
        }
        if is_header(line) {
            warn!(section, index, "body line starts with the header flag and will read back as a header");
        }
    }
    Ok(())
}
