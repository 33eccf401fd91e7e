//! On-disk format primitives: the header flag and line terminators.
//!
//! A header line is any line that starts with [`FLAG`]. A well-formed header
//! is exactly `***<name>***`; anything else that starts with the flag still
//! counts as a section boundary, and body text starting with `***` cannot be
//! stored without being read back as a header.

use serde::{Deserialize, Serialize};

/// Marker that opens and closes a section header line.
pub const FLAG: &str = "***";

/// Build the header line for a section name.
///
/// # Examples
///
/// ```
/// use sectfile_store::format::header_line;
///
/// assert_eq!(header_line("stats"), "***stats***");
/// ```
pub fn header_line(name: &str) -> String {
    format!("{FLAG}{name}{FLAG}")
}

/// Returns `true` if `line` is a section boundary.
pub fn is_header(line: &str) -> bool {
    line.starts_with(FLAG)
}

/// Extract the name portion of a header line.
///
/// The leading flag is removed, then the trailing flag if one remains after
/// it. A header too short to carry both flags yields whatever follows the
/// leading flag. Returns `None` for body lines.
pub fn header_name(line: &str) -> Option<&str> {
    let rest = line.strip_prefix(FLAG)?;
    Some(rest.strip_suffix(FLAG).unwrap_or(rest))
}

/// Line terminator written after every serialized line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    /// `\n`
    Lf,
    /// `\r\n`
    CrLf,
    /// The platform terminator: `\r\n` on Windows, `\n` elsewhere.
    #[default]
    Native,
}

impl LineEnding {
    /// The terminator bytes as a string slice.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
            Self::Native => {
                if cfg!(windows) {
                    "\r\n"
                } else {
                    "\n"
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_line_wraps_name_in_flags() {
        assert_eq!(header_line("Gold"), "***Gold***");
        assert_eq!(header_line(""), "******");
    }

    #[test]
    fn header_detection_is_prefix_only() {
        assert!(is_header("***Gold***"));
        assert!(is_header("***"));
        assert!(is_header("****not really a header"));
        assert!(!is_header(" ***Gold***"));
        assert!(!is_header("Gold"));
        assert!(!is_header(""));
    }

    #[test]
    fn header_name_strips_both_flags() {
        assert_eq!(header_name("***Gold***"), Some("Gold"));
        assert_eq!(header_name("******"), Some(""));
        assert_eq!(header_name("***a b c***"), Some("a b c"));
    }

    #[test]
    fn header_name_tolerates_short_headers() {
        assert_eq!(header_name("***"), Some(""));
        assert_eq!(header_name("****"), Some("*"));
        assert_eq!(header_name("***open"), Some("open"));
    }

    #[test]
    fn header_name_of_body_line_is_none() {
        assert_eq!(header_name("plain"), None);
        assert_eq!(header_name("**almost"), None);
    }

    #[test]
    fn line_endings() {
        assert_eq!(LineEnding::Lf.as_str(), "\n");
        assert_eq!(LineEnding::CrLf.as_str(), "\r\n");
        assert!(LineEnding::Native.as_str().ends_with('\n'));
    }
}
