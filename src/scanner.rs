//! Block-comment state machine shared by the LOC and method counters.

const BLOCK_OPEN: &str = "/*";
const BLOCK_CLOSE: &str = "*/";
const LINE_COMMENT: &str = "//";

/// How a trimmed line is treated by the counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass {
    /// Opens, continues or closes a block comment.
    BlockComment,
    /// Blank, a `//` comment, or a `*` comment-body line.
    Ignorable,
    /// Anything else.
    Code,
}

/// Classifies trimmed lines while tracking whether a block comment is open.
///
/// Only line starts and ends are inspected. A line that starts with `/*`
/// opens a block even when it also ends with `*/`, so `/* note */` keeps the
/// scanner inside a comment until a later line ends with `*/`.
#[derive(Debug, Default)]
pub struct CommentScanner {
    in_block_comment: bool,
}

impl CommentScanner {
    /// Create a scanner outside any block comment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify `trimmed` and advance the block-comment state.
    pub fn classify(&mut self, trimmed: &str) -> LineClass {
        if self.in_block_comment {
            if trimmed.ends_with(BLOCK_CLOSE) {
                self.in_block_comment = false;
            }
            return LineClass::BlockComment;
        }

        if trimmed.starts_with(BLOCK_OPEN) {
            self.in_block_comment = true;
            return LineClass::BlockComment;
        }

        if is_ignorable(trimmed) {
            LineClass::Ignorable
        } else {
            LineClass::Code
        }
    }
}

fn is_ignorable(trimmed: &str) -> bool {
    trimmed.is_empty() || trimmed.starts_with(LINE_COMMENT) || trimmed.starts_with('*')
}
