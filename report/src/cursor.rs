/// A byte-offset line cursor over an in-memory report.
///
/// The source text is immutable; all parsing state is the read position,
/// so a heading's recorded offset can be re-visited with `seek` and the
/// same text can be parsed more than once.
pub struct LineCursor<'a> {
    source: &'a str,
    pos: usize,
}

impl<'a> LineCursor<'a> {
    pub fn new(source: &'a str) -> Self {
        LineCursor { source, pos: 0 }
    }

    /// Byte offset of the start of the next unread line.
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Move the read position to an absolute byte offset.
    pub fn seek(&mut self, pos: usize) {
        self.pos = pos.min(self.source.len());
    }

    /// Read the next line, without its terminator.
    /// Returns None once the input is exhausted.
    pub fn next_line(&mut self) -> Option<&'a str> {
        if self.pos >= self.source.len() {
            return None;
        }
        let rest = &self.source[self.pos..];
        let line = match rest.find('\n') {
            Some(i) => {
                self.pos += i + 1;
                &rest[..i]
            }
            None => {
                self.pos = self.source.len();
                rest
            }
        };
        Some(line.strip_suffix('\r').unwrap_or(line))
    }
}
