use std::sync::LazyLock;

use regex::Regex;

use crate::cursor::LineCursor;

static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9.]+\s+.+$").expect("static regex must compile"));
static UNDERLINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-+$").expect("static regex must compile"));

/// A section heading in a report: a numbered title line immediately
/// followed by a dashed underline, e.g.
///
/// ```text
/// 1. Utilization by Hierarchy
/// ----------------------------
/// ```
#[derive(Debug, Clone)]
pub struct Heading {
    /// The trimmed title line, e.g. "1. Utilization by Hierarchy".
    pub title: String,
    /// Byte offset of the first line after the underline.
    pub pos: usize,
}

impl Heading {
    /// Find the next heading at or after the cursor position.
    /// Returns None once the input is exhausted.
    ///
    /// The title/underline pair must be adjacent: a numbered title line
    /// with anything other than a dash-only line right below it is not a
    /// heading. Each call starts with a fresh "previous line", so repeated
    /// calls enumerate the remaining headings one at a time.
    pub fn find_next(cursor: &mut LineCursor) -> Option<Heading> {
        let mut prev: Option<String> = None;
        while let Some(line) = cursor.next_line() {
            let line = line.trim();
            if let Some(title) = prev.as_deref() {
                if TITLE_RE.is_match(title) && UNDERLINE_RE.is_match(line) {
                    return Some(Heading {
                        title: title.to_string(),
                        pos: cursor.pos(),
                    });
                }
            }
            prev = Some(line.to_string());
        }
        None
    }

    /// Collect every heading from the cursor position to the end of input,
    /// in document order. Leaves the cursor at end of input.
    pub fn scan_all(cursor: &mut LineCursor) -> Vec<Heading> {
        let mut headings = Vec::new();
        while let Some(h) = Heading::find_next(cursor) {
            headings.push(h);
        }
        headings
    }
}
