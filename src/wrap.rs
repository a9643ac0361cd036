//! Greedy separator-based wrapping shared by the formatter strategies.

/// Width of `s` in characters.
pub fn width_of(s: &str) -> usize {
    s.chars().count()
}

/// Leading whitespace of `line`.
pub fn leading_whitespace(line: &str) -> &str {
    &line[..line.len() - line.trim_start().len()]
}

/// Split `text` into trimmed chunks of at most `limit` characters.
///
/// From each chunk start the candidate end is `start + limit`. If the
/// character at that end is not a separator, the end walks back to the
/// nearest separator after `start`. The separator opens the next chunk.
/// When no separator exists in range the chunk runs forward to the next
/// separator instead, so it may exceed `limit`.
pub fn wrap_by<F>(text: &str, limit: usize, is_separator: F) -> Vec<String>
where
    F: Fn(char) -> bool,
{
    let chars: Vec<char> = text.chars().collect();
    let limit = limit.max(1);
    let mut chunks = Vec::new();
    let mut start = 0;

    while start < chars.len() {
        let mut end = (start + limit).min(chars.len());
        if end < chars.len() && !is_separator(chars[end]) {
            end = match (start + 1..end).rev().find(|&i| is_separator(chars[i])) {
                Some(separator) => separator,
                None => (end..chars.len())
                    .find(|&i| is_separator(chars[i]))
                    .unwrap_or(chars.len()),
            };
        }

        let chunk: String = chars[start..end].iter().collect();
        let chunk = chunk.trim();
        if !chunk.is_empty() {
            chunks.push(chunk.to_string());
        }
        start = end;
    }

    chunks
}

/// [`wrap_by`] on whitespace.
pub fn wrap_words(text: &str, limit: usize) -> Vec<String> {
    wrap_by(text, limit, char::is_whitespace)
}
