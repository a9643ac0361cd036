//! Comment and blank-line stripping for the diff passes.
//!
//! Cleaning walks each line character by character. Block-comment state is
//! carried across lines; string-literal state is reset at every line. A
//! comment marker inside a string or char literal is plain text.

const BLOCK_CLOSE: &str = "*/";

/// Strips comments and blank lines from a raw line sequence.
///
/// Surviving lines are trimmed and keep their relative order. The state is
/// local to one call, so cleaning is a pure function of its input.
#[derive(Debug, Default)]
pub struct LineCleaner {
    in_block_comment: bool,
}

impl LineCleaner {
    /// Create a cleaner positioned outside any block comment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clean `lines`, returning the non-blank, non-comment lines trimmed.
    pub fn clean<S: AsRef<str>>(mut self, lines: &[S]) -> Vec<String> {
        lines
            .iter()
            .filter_map(|line| self.clean_line(line.as_ref()))
            .collect()
    }

    /// Process one line and return its surviving code, if any.
    fn clean_line(&mut self, line: &str) -> Option<String> {
        if self.in_block_comment {
            // The line that closes a comment contributes nothing, whatever follows.
            if line.contains(BLOCK_CLOSE) {
                self.in_block_comment = false;
            }
            return None;
        }

        let chars: Vec<char> = line.chars().collect();
        let mut code = String::with_capacity(line.len());
        let mut quote: Option<char> = None;
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];
            let next = chars.get(i + 1).copied();

            if self.in_block_comment {
                if c == '*' && next == Some('/') {
                    self.in_block_comment = false;
                    i += 2;
                } else {
                    i += 1;
                }
                continue;
            }

            if let Some(q) = quote {
                code.push(c);
                if c == '\\' {
                    if let Some(escaped) = next {
                        code.push(escaped);
                        i += 2;
                        continue;
                    }
                } else if c == q {
                    quote = None;
                }
                i += 1;
                continue;
            }

            match (c, next) {
                ('"' | '\'', _) => {
                    quote = Some(c);
                    code.push(c);
                    i += 1;
                }
                ('/', Some('/')) => break,
                ('/', Some('*')) => {
                    self.in_block_comment = true;
                    i += 2;
                }
                _ => {
                    code.push(c);
                    i += 1;
                }
            }
        }

        let trimmed = code.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }
}

/// Convenience wrapper around [`LineCleaner::clean`].
pub fn clean_lines<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    LineCleaner::new().clean(lines)
}
