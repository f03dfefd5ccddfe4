use std::fmt;

/// Kind of record a [`Diagnostic`] refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordKind {
    Vertex,
    Face,
    Node,
    Triangle,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RecordKind::Vertex => "vertex",
            RecordKind::Face => "face",
            RecordKind::Node => "node",
            RecordKind::Triangle => "triangle",
        };

        write!(f, "{name}")
    }
}

/// A record that got skipped while parsing.
///
/// `line` is 1-based; `0` means the whole file couldn't be read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub line: usize,
    pub record: RecordKind,
    pub reason: String,
}

impl Diagnostic {
    pub fn new(line: usize, record: RecordKind, reason: impl ToString) -> Self {
        Self {
            line,
            record,
            reason: reason.to_string(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.line == 0 {
            write!(f, "skipped all {} records: {}", self.record, self.reason)
        } else {
            write!(
                f,
                "line {}: skipped {} record: {}",
                self.line, self.record, self.reason
            )
        }
    }
}

/// Outcome of a lenient parse: whatever could be parsed, plus what couldn't.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Parsed<T> {
    pub value: T,
    pub skipped: Vec<Diagnostic>,
}

impl<T> Parsed<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            skipped: Default::default(),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        let target = Diagnostic::new(12, RecordKind::Face, "index 0");

        assert_eq!("line 12: skipped face record: index 0", target.to_string());

        let target = Diagnostic::new(0, RecordKind::Node, "file not found");

        assert_eq!(
            "skipped all node records: file not found",
            target.to_string()
        );
    }
}
