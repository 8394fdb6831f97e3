use std::ops::Range;
use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;

use crate::cursor::LineCursor;
use crate::error::ParseError;

/// Full-width border row: `+----+----+`.
static BORDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\+-+)+\+$").expect("static regex must compile"));
/// Leading `| ` prefix; the captured run of extra spaces encodes depth.
static INDENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\|\s(\s*)").expect("static regex must compile"));

/// One data row of a table. The first cell is the row's name; the rest
/// are keyed by their column heading, in column order.
#[derive(Debug, Clone)]
pub struct Row {
    pub name: String,
    pub values: IndexMap<String, String>,
}

impl Row {
    /// Build a row from one line's cells. Cell 0 is the row name; the rest
    /// zip positionally with the non-name column headings. The zip is
    /// lenient on both sides: a short row omits its trailing columns, and
    /// extra cells are dropped.
    fn from_cells(headings: &[String], mut cells: Vec<String>) -> Row {
        let name = cells.remove(0);
        let values = headings.iter().skip(1).cloned().zip(cells).collect();
        Row { name, values }
    }
}

/// A parsed box-drawing table: column headings, data rows, and each row's
/// indentation depth (in 2-space units) in a parallel list.
#[derive(Debug, Clone)]
pub struct Table {
    /// Caller-supplied label, not drawn from the table data.
    pub name: String,
    /// All column headings, including the leading name column.
    pub headings: Vec<String>,
    pub rows: Vec<Row>,
    /// Nesting depth per row, parallel to `rows`.
    pub depths: Vec<usize>,
    /// Byte span of the column-heading line, for error reporting.
    pub header_span: Range<usize>,
    pub file_id: usize,
}

impl Table {
    /// Parse the next table at or after the cursor position.
    ///
    /// Skips forward to the first full-width border line; `Ok(None)` if the
    /// input ends before one is found. Reads the column-heading row, skips
    /// the header separator, then reads data rows up to the closing border.
    pub fn parse_next(
        cursor: &mut LineCursor,
        name: &str,
        file_id: usize,
    ) -> Result<Option<Table>, ParseError> {
        // Seek to the start of the next table
        loop {
            match cursor.next_line() {
                Some(line) if BORDER_RE.is_match(line) => break,
                Some(_) => continue,
                None => return Ok(None),
            }
        }

        let header_start = cursor.pos();
        let header_line = cursor.next_line().ok_or_else(|| {
            ParseError::error(
                "unexpected end of input after table border",
                header_start..header_start,
                file_id,
            )
        })?;
        let headings = split_cells(header_line);
        let header_span = header_start..header_start + header_line.len();

        // Header separator line, skipped unconditionally
        cursor.next_line().ok_or_else(|| {
            ParseError::error(
                "unexpected end of input in table header",
                header_span.clone(),
                file_id,
            )
        })?;

        let mut rows = Vec::new();
        let mut depths = Vec::new();
        loop {
            let line_start = cursor.pos();
            let line = cursor.next_line().ok_or_else(|| {
                ParseError::error(
                    "table is not terminated by a closing border",
                    header_span.clone(),
                    file_id,
                )
            })?;
            if BORDER_RE.is_match(line) {
                break;
            }

            let line_span = line_start..line_start + line.len();
            let cells = split_cells(line);
            if cells.is_empty() {
                return Err(ParseError::error(
                    "malformed table row: no cells found",
                    line_span,
                    file_id,
                ));
            }
            let indent = INDENT_RE.captures(line).ok_or_else(|| {
                ParseError::error(
                    "malformed table row: expected a '| ' prefix",
                    line_span.clone(),
                    file_id,
                )
            })?;
            depths.push(indent[1].len() / 2);
            rows.push(Row::from_cells(&headings, cells));
        }

        Ok(Some(Table {
            name: name.to_string(),
            headings,
            rows,
            depths,
            header_span,
            file_id,
        }))
    }

    /// The column headings minus the two fixed identifier columns
    /// ("Instance" and "Module"), in original order. Either one missing
    /// is a structural error.
    pub fn value_columns(&self) -> Result<Vec<String>, ParseError> {
        let mut columns = self.headings.clone();
        for required in ["Instance", "Module"] {
            match columns.iter().position(|c| c == required) {
                Some(i) => {
                    columns.remove(i);
                }
                None => {
                    return Err(ParseError::error(
                        format!("column '{required}' not found in table"),
                        self.header_span.clone(),
                        self.file_id,
                    )
                    .with_note(format!("columns found: {}", self.headings.join(", "))));
                }
            }
        }
        Ok(columns)
    }
}

/// Extract the trimmed cell texts strictly between `|` delimiters.
/// Text before the first delimiter or after the last is ignored; a line
/// with fewer than two delimiters has no cells.
fn split_cells(line: &str) -> Vec<String> {
    let mut parts: Vec<&str> = line.split('|').collect();
    if parts.len() < 3 {
        return Vec::new();
    }
    parts.pop();
    parts.remove(0);
    parts.into_iter().map(|c| c.trim().to_string()).collect()
}
