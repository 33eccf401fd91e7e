//! Forward-only scans over a line source.
//!
//! Every function here consumes a fresh [`BufRead`] and reads only as far as
//! it needs to. Line terminators (`\n` or `\r\n`) are stripped.

use std::io::{self, BufRead};

use tracing::debug;

use crate::format::{header_line, header_name, is_header};

/// Capture the body of the first section named `name`.
///
/// Capture starts after the line that equals `***name***` exactly and stops
/// at the next line starting with the flag, or at end of input. Later
/// sections with the same name are never looked at.
///
/// Returns `Ok(None)` if no header matches. A matching section with no body
/// lines yields `Ok(Some(vec![]))`.
pub fn find_section<R: BufRead>(reader: R, name: &str) -> io::Result<Option<Vec<String>>> {
    let target = header_line(name);
    let mut lines = reader.lines();
    let mut scanned = 0usize;

    while let Some(line) = lines.next() {
        scanned += 1;
        if line? != target {
            continue;
        }

        let mut body = Vec::new();
        for line in lines.by_ref() {
            let line = line?;
            if is_header(&line) {
                break;
            }
            body.push(line);
        }
        debug!(section = name, header_at = scanned, lines = body.len(), "section found");
        return Ok(Some(body));
    }

    debug!(section = name, scanned, "section not found");
    Ok(None)
}

/// The first body line of the first section named `name`.
///
/// Returns `Ok(None)` if the section is absent or has no body.
pub fn find_first_line<R: BufRead>(reader: R, name: &str) -> io::Result<Option<String>> {
    Ok(find_section(reader, name)?.and_then(|body| body.into_iter().next()))
}

/// Every line of the source, unmodified, in order.
pub fn read_all_lines<R: BufRead>(reader: R) -> io::Result<Vec<String>> {
    reader.lines().collect()
}

/// The name portion of every header line, in file order.
///
/// Duplicate names are reported once per occurrence.
pub fn list_sections<R: BufRead>(reader: R) -> io::Result<Vec<String>> {
    let mut names = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if let Some(name) = header_name(&line) {
            names.push(name.to_string());
        }
    }
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const SAVE: &str = "***Name***\nEzra\n***Supplies***\nfood\nbullets\n***Empty***\n***Name***\nShadow\n";

    fn src(text: &str) -> Cursor<&[u8]> {
        Cursor::new(text.as_bytes())
    }

    #[test]
    fn finds_section_body() {
        let body = find_section(src(SAVE), "Supplies").unwrap();
        assert_eq!(body, Some(vec!["food".to_string(), "bullets".to_string()]));
    }

    #[test]
    fn first_match_wins() {
        let body = find_section(src(SAVE), "Name").unwrap();
        assert_eq!(body, Some(vec!["Ezra".to_string()]));
    }

    #[test]
    fn empty_section_is_found_but_empty() {
        assert_eq!(find_section(src(SAVE), "Empty").unwrap(), Some(vec![]));
    }

    #[test]
    fn missing_section_is_none() {
        assert_eq!(find_section(src(SAVE), "Wagon").unwrap(), None);
        assert_eq!(find_first_line(src(SAVE), "Wagon").unwrap(), None);
    }

    #[test]
    fn header_must_match_exactly() {
        assert_eq!(find_section(src(SAVE), "Nam").unwrap(), None);
        assert_eq!(find_section(src(" ***Name***\nx\n"), "Name").unwrap(), None);
    }

    #[test]
    fn last_section_runs_to_end_of_input() {
        let text = "***A***\none\ntwo";
        assert_eq!(
            find_section(src(text), "A").unwrap(),
            Some(vec!["one".to_string(), "two".to_string()])
        );
    }

    #[test]
    fn flag_prefixed_body_line_ends_capture() {
        let text = "***A***\none\n***not a section\ntwo\n";
        assert_eq!(find_section(src(text), "A").unwrap(), Some(vec!["one".to_string()]));
    }

    #[test]
    fn crlf_terminators_are_stripped() {
        let text = "***A***\r\none\r\n***B***\r\n";
        assert_eq!(find_section(src(text), "A").unwrap(), Some(vec!["one".to_string()]));
        assert_eq!(list_sections(src(text)).unwrap(), vec!["A", "B"]);
    }

    #[test]
    fn first_line_of_section() {
        assert_eq!(
            find_first_line(src(SAVE), "Supplies").unwrap(),
            Some("food".to_string())
        );
        assert_eq!(find_first_line(src(SAVE), "Empty").unwrap(), None);
    }

    #[test]
    fn reads_all_lines_verbatim() {
        let lines = read_all_lines(src(SAVE)).unwrap();
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], "***Name***");
        assert_eq!(lines[7], "Shadow");
    }

    #[test]
    fn lists_sections_in_file_order_with_duplicates() {
        assert_eq!(
            list_sections(src(SAVE)).unwrap(),
            vec!["Name", "Supplies", "Empty", "Name"]
        );
    }

    #[test]
    fn empty_source() {
        assert_eq!(find_section(src(""), "A").unwrap(), None);
        assert!(read_all_lines(src("")).unwrap().is_empty());
        assert!(list_sections(src("")).unwrap().is_empty());
    }

    #[test]
    fn invalid_utf8_is_an_error() {
        let bytes: &[u8] = &[b'*', b'*', b'*', 0xff, 0xfe, b'\n'];
        assert!(find_section(Cursor::new(bytes), "A").is_err());
    }
}
