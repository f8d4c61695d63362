use thiserror::Error;

/// Parse failure: a human-readable description plus the 1-based line and
/// column of the failing read position.
///
/// Renders as `line: <L>, col: <C> desc: <message>`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line: {line}, col: {col} desc: {desc}")]
pub struct ParseError {
    pub line: usize,
    pub col: usize,
    pub desc: &'static str,
}

impl ParseError {
    pub(crate) fn at(text: &[u8], pos: usize, desc: &'static str) -> Self {
        let (line, col) = locate(text, pos);
        Self { line, col, desc }
    }
}

// Derived backward from the failure position, only on the error path.
// Column is the distance to the nearest preceding newline plus one; line is
// one plus the newline count before the position.
pub(crate) fn locate(text: &[u8], pos: usize) -> (usize, usize) {
    let before = &text[..pos.min(text.len())];
    match memchr::memrchr(b'\n', before) {
        Some(newline) => {
            let line = 2 + memchr::memchr_iter(b'\n', &before[..newline]).count();
            (line, before.len() - newline)
        }
        None => (1, before.len() + 1),
    }
}
