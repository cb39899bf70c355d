//! Script ingestion and the interpreter's read cursor.
//!
//! A script is an ordered stream of text lines consumed exactly once. The
//! interpreter owns its position through a [`ScriptSource`] cursor injected at
//! construction; the cursor is deliberately not rewindable, so a reset of the
//! interpreter resumes at whatever line has not yet been consumed.

/// A line of script text with its original location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptLine {
    /// The line text (without trailing newline).
    pub text: String,
    /// 1-indexed line number in the original script.
    pub number: usize,
}

/// One-shot cursor over an ordered stream of script lines.
///
/// `next_line` hands out each line exactly once in file order and returns
/// `None` permanently once the stream is exhausted. There is no rewind
/// operation: the cursor survives an interpreter reset unchanged.
pub trait ScriptSource {
    /// Consumes and returns the next line, or `None` at end of stream.
    fn next_line(&mut self) -> Option<ScriptLine>;

    /// Returns the number of lines consumed so far.
    ///
    /// Equals the 1-based line number of the most recently consumed line, or
    /// zero before the first fetch.
    fn consumed_lines(&self) -> usize;
}

/// In-memory script backed by a list of lines.
#[derive(Debug, Clone, Default)]
pub struct MemoryScript {
    lines: Vec<String>,
    cursor: usize,
}

impl MemoryScript {
    /// Creates a script from an iterator of lines.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            cursor: 0,
        }
    }

    /// Creates a script by splitting a text blob into lines.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Self::from_lines(text.lines())
    }

    /// Returns the total number of lines in the script.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns true when the script has no lines at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl ScriptSource for MemoryScript {
    fn next_line(&mut self) -> Option<ScriptLine> {
        let text = self.lines.get(self.cursor)?.clone();
        self.cursor += 1;
        Some(ScriptLine {
            text,
            number: self.cursor,
        })
    }

    fn consumed_lines(&self) -> usize {
        self.cursor
    }
}
