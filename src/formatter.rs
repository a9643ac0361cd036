//! Reflow of lines wider than the configured width.
//!
//! Every overlong line is assigned one [`LineCategory`] by first match, in
//! declaration order, and rewritten by the handler for that category. A
//! handler that cannot find the structural marker it splits on reports
//! [`RevlinesError::NoMatch`] and the line is wrapped on whitespace instead.
//! A line carrying a `//` comment keeps its comment marker on that path: a
//! whole-line comment becomes a block comment and a trailing comment moves to
//! its own line.
//!
//! Indentation that would leave less than half the width for content is
//! dropped, so every strategy keeps at least half a line of room.

use crate::error::{Result, RevlinesError};
use crate::patterns::{
    has_flow_control, is_abstract_method_signature, is_import_or_package, is_method_signature,
    is_only_line_comment,
};
use crate::wrap::{leading_whitespace, width_of, wrap_by, wrap_words};

/// Default maximum line width.
pub const DEFAULT_WIDTH: usize = 80;

/// Indentation added to parameter and continuation lines.
const CONTINUATION_INDENT: &str = "        ";
/// Indentation of lines holding a split string literal.
const LITERAL_INDENT: &str = "  ";
/// Characters a literal chunk line spends on indentation, quotes and ` +`.
const LITERAL_OVERHEAD: usize = 6;
const CONCAT_MARKER: &str = " +";
const LINE_COMMENT: &str = "//";
const BLOCK_OPEN: &str = "/* ";
const BLOCK_CONTINUE: &str = " * ";
const BLOCK_CLOSE: &str = " */";

/// Shape of an overlong line, in dispatch priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineCategory {
    /// Contains a `"` or `'`.
    Quoted,
    /// Looks like a method or abstract method signature.
    MethodSignature,
    /// Contains `if`, `for`, `while` or `switch` with a parenthesized condition.
    FlowControl,
    /// Consists only of a `//` comment.
    StandaloneComment,
    /// Code followed by a `//` comment.
    TrailingComment,
    /// An `import` or `package` declaration.
    ImportOrPackage,
    /// Anything else.
    Plain,
}

impl LineCategory {
    /// Select the category of `line`.
    pub fn of(line: &str) -> Self {
        let trimmed = line.trim();
        if line.contains('"') || line.contains('\'') {
            LineCategory::Quoted
        } else if is_method_signature(trimmed) || is_abstract_method_signature(trimmed) {
            LineCategory::MethodSignature
        } else if has_flow_control(line) {
            LineCategory::FlowControl
        } else if trimmed.starts_with(LINE_COMMENT) {
            LineCategory::StandaloneComment
        } else if line.contains(LINE_COMMENT) {
            LineCategory::TrailingComment
        } else if is_import_or_package(line) {
            LineCategory::ImportOrPackage
        } else {
            LineCategory::Plain
        }
    }

    /// Name used in log output and `NoMatch` errors.
    pub const fn name(self) -> &'static str {
        match self {
            LineCategory::Quoted => "quoted",
            LineCategory::MethodSignature => "method_signature",
            LineCategory::FlowControl => "flow_control",
            LineCategory::StandaloneComment => "standalone_comment",
            LineCategory::TrailingComment => "trailing_comment",
            LineCategory::ImportOrPackage => "import_or_package",
            LineCategory::Plain => "plain",
        }
    }
}

/// Rewrites overlong lines so they fit in `width` characters where a split
/// point exists.
#[derive(Debug, Clone, Copy)]
pub struct LineFormatter {
    width: usize,
}

impl Default for LineFormatter {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
        }
    }
}

impl LineFormatter {
    /// Create a formatter with the default width of 80.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a formatter with a custom width. A width of zero is treated
    /// as one.
    pub fn with_width(width: usize) -> Self {
        Self {
            width: width.max(1),
        }
    }

    /// Maximum width of an output line.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Reflow every line, keeping lines that already fit untouched.
    pub fn format<S: AsRef<str>>(&self, lines: &[S]) -> Vec<String> {
        lines
            .iter()
            .flat_map(|line| self.format_line(line.as_ref()))
            .collect()
    }

    /// Reflow a single line.
    pub fn format_line(&self, line: &str) -> Vec<String> {
        if width_of(line) <= self.width {
            return vec![line.to_string()];
        }

        let category = LineCategory::of(line);
        tracing::trace!(category = category.name(), width = width_of(line), "Reflowing line");

        match self.apply(category, line) {
            Ok(out) => out,
            Err(err) => {
                tracing::trace!(error = %err, "Falling back");
                self.fallback(line)
            }
        }
    }

    /// Whitespace wrap for lines no strategy could split, except that a `//`
    /// comment is never wrapped onto a line without its marker.
    fn fallback(&self, line: &str) -> Vec<String> {
        let rescued = if is_only_line_comment(line.trim()) {
            self.rewrite_as_block_comment(line)
        } else {
            self.split_trailing_comment(line)
        };
        rescued.unwrap_or_else(|_| self.wrap_plain(line))
    }

    fn apply(&self, category: LineCategory, line: &str) -> Result<Vec<String>> {
        match category {
            LineCategory::Quoted => self.wrap_quoted(line),
            LineCategory::MethodSignature => {
                self.split_parenthesized(line, category, |c| c == ',')
            }
            LineCategory::FlowControl => {
                self.split_parenthesized(line, category, char::is_whitespace)
            }
            LineCategory::StandaloneComment => self.rewrite_as_block_comment(line),
            LineCategory::TrailingComment => self.split_trailing_comment(line),
            LineCategory::ImportOrPackage => Ok(self.split_qualified_name(line)),
            LineCategory::Plain => Ok(self.wrap_plain(line)),
        }
    }

    /// Copy unquoted code verbatim and split overlong string literals into
    /// concatenated chunks.
    fn wrap_quoted(&self, line: &str) -> Result<Vec<String>> {
        let segments = split_literals(line);
        let has_literal = segments
            .iter()
            .any(|segment| matches!(segment, Segment::Literal { .. }));
        if !has_literal || comment_start(line).is_some() {
            return Err(RevlinesError::no_match(LineCategory::Quoted.name(), line));
        }

        let indent = self.usable_indent(leading_whitespace(line));
        let mut out = Vec::new();
        let mut current = String::new();

        for segment in segments {
            let text = segment.text();
            if width_of(&current) + width_of(text) <= self.width {
                current.push_str(text);
                continue;
            }
            flush(&mut out, &mut current);

            match segment {
                Segment::Code(code) => {
                    let available = self.width.saturating_sub(width_of(indent));
                    let mut chunks = wrap_words(code, available);
                    if let Some(last) = chunks.pop() {
                        out.extend(chunks.into_iter().map(|c| format!("{indent}{c}")));
                        current = format!("{indent}{last}");
                        if code.ends_with(char::is_whitespace) {
                            current.push(' ');
                        }
                    }
                }
                Segment::Literal { quote, body, .. } => {
                    if width_of(LITERAL_INDENT) + width_of(text) <= self.width {
                        current = format!("{LITERAL_INDENT}{text}");
                        continue;
                    }
                    let size = self.width.saturating_sub(LITERAL_OVERHEAD);
                    let mut chunks = split_literal_body(body, size);
                    let last = chunks.pop().unwrap_or_default();
                    out.extend(
                        chunks
                            .into_iter()
                            .map(|c| format!("{LITERAL_INDENT}{quote}{c}{quote}{CONCAT_MARKER}")),
                    );
                    current = format!("{LITERAL_INDENT}{quote}{last}{quote}");
                }
            }
        }
        flush(&mut out, &mut current);

        if out.is_empty() {
            return Err(RevlinesError::no_match(LineCategory::Quoted.name(), line));
        }
        Ok(out)
    }

    /// Split around the first `(` and the last `)`, putting the enclosed
    /// span on its own continuation line.
    fn split_parenthesized<F>(
        &self,
        line: &str,
        category: LineCategory,
        inner_separator: F,
    ) -> Result<Vec<String>>
    where
        F: Fn(char) -> bool,
    {
        if comment_start(line).is_some() {
            return Err(RevlinesError::no_match(category.name(), line));
        }
        let open = line
            .find('(')
            .ok_or_else(|| RevlinesError::no_match(category.name(), line))?;
        let close = line
            .rfind(')')
            .filter(|&close| close > open)
            .ok_or_else(|| RevlinesError::no_match(category.name(), line))?;

        let indent = leading_whitespace(line);
        let inner_indent = self.continuation_indent(indent);
        let prefix = line[..=open].trim_end();
        let inner = line[open + 1..close].trim();
        let suffix = format!("{indent}{}", line[close..].trim());

        let mut out = self.fit_or_wrap(prefix);
        if !inner.is_empty() {
            let available = self.width.saturating_sub(width_of(&inner_indent));
            if width_of(inner) <= available {
                out.push(format!("{inner_indent}{inner}"));
            } else {
                out.extend(
                    wrap_by(inner, available, inner_separator)
                        .into_iter()
                        .map(|c| format!("{inner_indent}{c}")),
                );
            }
        }
        out.extend(self.fit_or_wrap(&suffix));
        Ok(out)
    }

    /// Turn a `//` comment into a wrapped block comment.
    fn rewrite_as_block_comment(&self, line: &str) -> Result<Vec<String>> {
        let indent = self.usable_indent(leading_whitespace(line));
        let text = line.trim().trim_start_matches('/').trim();
        if text.is_empty() {
            return Err(RevlinesError::no_match(
                LineCategory::StandaloneComment.name(),
                line,
            ));
        }

        let available = self
            .width
            .saturating_sub(width_of(indent) + BLOCK_OPEN.len() + BLOCK_CLOSE.len());
        let chunks = wrap_words(text, available);
        let last = chunks.len().saturating_sub(1);

        Ok(chunks
            .iter()
            .enumerate()
            .map(|(i, chunk)| {
                let lead = if i == 0 { BLOCK_OPEN } else { BLOCK_CONTINUE };
                let close = if i == last { BLOCK_CLOSE } else { "" };
                format!("{indent}{lead}{chunk}{close}")
            })
            .collect())
    }

    /// Move a trailing `//` comment onto its own line after the code.
    fn split_trailing_comment(&self, line: &str) -> Result<Vec<String>> {
        let marker = comment_start(line)
            .ok_or_else(|| RevlinesError::no_match(LineCategory::TrailingComment.name(), line))?;
        let code = line[..marker].trim_end();
        if code.trim().is_empty() {
            return Err(RevlinesError::no_match(
                LineCategory::TrailingComment.name(),
                line,
            ));
        }

        let mut out = self.format_line(code);
        let comment = format!("{}{}", leading_whitespace(line), line[marker..].trim());
        if width_of(&comment) <= self.width {
            out.push(comment);
        } else {
            match self.rewrite_as_block_comment(&comment) {
                Ok(block) => out.extend(block),
                Err(_) => out.extend(self.wrap_plain(&comment)),
            }
        }
        Ok(out)
    }

    /// Split an import or package path at `.` boundaries.
    fn split_qualified_name(&self, line: &str) -> Vec<String> {
        let indent = leading_whitespace(line);
        let first_indent = self.usable_indent(indent);
        let next_indent = self.continuation_indent(indent);
        let available = self
            .width
            .saturating_sub(width_of(first_indent).max(width_of(&next_indent)));
        wrap_by(line.trim(), available, |c| c == '.')
            .into_iter()
            .enumerate()
            .map(|(i, chunk)| {
                if i == 0 {
                    format!("{first_indent}{chunk}")
                } else {
                    format!("{next_indent}{chunk}")
                }
            })
            .collect()
    }

    /// Greedy whitespace wrap keeping the original indentation on every
    /// chunk.
    fn wrap_plain(&self, line: &str) -> Vec<String> {
        let indent = self.usable_indent(leading_whitespace(line));
        let available = self.width.saturating_sub(width_of(indent));
        wrap_words(line.trim(), available)
            .into_iter()
            .map(|chunk| format!("{indent}{chunk}"))
            .collect()
    }

    /// `indent`, or nothing when it would take half the width or more.
    fn usable_indent<'a>(&self, indent: &'a str) -> &'a str {
        if width_of(indent) < self.width / 2 {
            indent
        } else {
            ""
        }
    }

    /// Indent of lines continuing a statement indented by `indent`.
    fn continuation_indent(&self, indent: &str) -> String {
        let nested = format!("{}{CONTINUATION_INDENT}", self.usable_indent(indent));
        self.usable_indent(&nested).to_string()
    }

    fn fit_or_wrap(&self, text: &str) -> Vec<String> {
        if width_of(text) <= self.width {
            vec![text.to_string()]
        } else {
            self.wrap_plain(text)
        }
    }
}

/// Reflow `lines` with the default width.
pub fn reflow<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    LineFormatter::new().format(lines)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment<'a> {
    Code(&'a str),
    /// A terminated literal. `text` includes the quotes, `body` excludes them.
    Literal {
        text: &'a str,
        quote: char,
        body: &'a str,
    },
}

impl<'a> Segment<'a> {
    fn text(&self) -> &'a str {
        match *self {
            Segment::Code(text) | Segment::Literal { text, .. } => text,
        }
    }
}

/// Split `line` into code and terminated literals. An unterminated literal
/// stays part of the trailing code.
fn split_literals(line: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut code_start = 0;
    let mut chars = line.char_indices();

    while let Some((open, quote)) = chars.next() {
        if quote != '"' && quote != '\'' {
            continue;
        }
        let mut escaped = false;
        let mut close = None;
        for (i, c) in chars.by_ref() {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == quote {
                close = Some(i);
                break;
            }
        }
        let Some(close) = close else { break };

        if open > code_start {
            segments.push(Segment::Code(&line[code_start..open]));
        }
        segments.push(Segment::Literal {
            text: &line[open..=close],
            quote,
            body: &line[open + 1..close],
        });
        code_start = close + 1;
    }

    if code_start < line.len() {
        segments.push(Segment::Code(&line[code_start..]));
    }
    segments
}

/// Byte offset of the first `//` outside string literals.
fn comment_start(line: &str) -> Option<usize> {
    let mut offset = 0;
    for segment in split_literals(line) {
        if let Segment::Code(code) = segment {
            if let Some(i) = code.find(LINE_COMMENT) {
                return Some(offset + i);
            }
        }
        offset += segment.text().len();
    }
    None
}

/// Cut a literal body into chunks of at most `size` characters. A chunk
/// never ends on the backslash of an escape sequence.
fn split_literal_body(body: &str, size: usize) -> Vec<String> {
    let chars: Vec<char> = body.chars().collect();
    let size = size.max(2);
    let mut chunks = Vec::new();
    let mut start = 0;

    while start < chars.len() {
        let mut end = (start + size).min(chars.len());
        if end < chars.len() && ends_inside_escape(&chars[start..end]) {
            end -= 1;
        }
        chunks.push(chars[start..end].iter().collect());
        start = end;
    }
    chunks
}

fn ends_inside_escape(chars: &[char]) -> bool {
    chars.iter().rev().take_while(|&&c| c == '\\').count() % 2 == 1
}

fn flush(out: &mut Vec<String>, current: &mut String) {
    let line = current.trim_end();
    if !line.trim().is_empty() {
        out.push(line.to_string());
    }
    current.clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_fits(lines: &[String], width: usize) {
        for line in lines {
            assert!(width_of(line) <= width, "line exceeds {width}: {line:?}");
        }
    }

    #[test]
    fn test_lines_within_width_pass_through() {
        let lines = ["public class A {", "    int x = 1; // short", ""];
        assert_eq!(reflow(&lines), lines.to_vec());
    }

    #[test]
    fn test_category_selection() {
        let cases = [
            (r#"String s = "text";"#, LineCategory::Quoted),
            ("public void run(int a) {", LineCategory::MethodSignature),
            ("public abstract void run(int a);", LineCategory::MethodSignature),
            ("    while (running && !stopped) {", LineCategory::FlowControl),
            ("    // explains the loop", LineCategory::StandaloneComment),
            ("    int total = sum(values); // running total", LineCategory::TrailingComment),
            ("import java.util.concurrent.ConcurrentHashMap;", LineCategory::ImportOrPackage),
            ("    int total = first + second + third;", LineCategory::Plain),
        ];
        for (line, expected) in cases {
            assert_eq!(LineCategory::of(line), expected, "{line}");
        }
    }

    #[test]
    fn test_quoted_priority_wins_over_comment() {
        assert_eq!(
            LineCategory::of(r#"    log("value"); // trace"#),
            LineCategory::Quoted
        );
    }

    #[test]
    fn test_long_literal_is_split_into_concatenated_chunks() {
        let body = "word ".repeat(30);
        let line = format!("        String message = \"{body}\";");
        let out = reflow(&[line.as_str()]);

        assert_fits(&out, DEFAULT_WIDTH);
        assert_eq!(out[0], "        String message =");
        for chunk in &out[1..out.len() - 1] {
            assert!(chunk.starts_with("  \""));
            assert!(chunk.ends_with("\" +"));
        }
        assert!(out[out.len() - 1].ends_with("\";"));

        let rebuilt: String = out[1..]
            .iter()
            .map(|l| {
                let l = l.trim_start().trim_end_matches(" +").trim_end_matches(';');
                &l[1..l.len() - 1]
            })
            .collect();
        assert_eq!(rebuilt, body);
    }

    #[test]
    fn test_literal_split_keeps_escape_sequences_together() {
        let body = format!("{}\\\"{}", "a".repeat(73), "b".repeat(40));
        let line = format!("x = \"{body}\";");
        let out = reflow(&[line.as_str()]);

        assert_eq!(out[0], "x =");
        assert_eq!(out[1], format!("  \"{}\" +", "a".repeat(73)));
        assert!(out[2].starts_with("  \"\\\""));
    }

    #[test]
    fn test_unterminated_quote_is_treated_as_code() {
        let line = format!("    char c = '{}", "z ".repeat(45));
        let out = reflow(&[line.as_str()]);
        assert_fits(&out, DEFAULT_WIDTH);
        assert!(out.iter().all(|l| !l.ends_with(" +")));
    }

    #[test]
    fn test_method_signature_splits_at_parentheses() {
        let line = "    public static List<String> buildIndex(List<String> documents, Map<String, Integer> weights, int limit) {";
        assert_eq!(
            reflow(&[line]),
            vec![
                "    public static List<String> buildIndex(",
                "            List<String> documents, Map<String, Integer> weights, int limit",
                "    ) {",
            ]
        );
    }

    #[test]
    fn test_long_parameter_list_is_split_by_commas() {
        let line = "    public Report summarize(String title, List<Entry> entries, Map<String, Integer> totals, Locale locale, boolean detailed) {";
        assert_eq!(
            reflow(&[line]),
            vec![
                "    public Report summarize(",
                "            String title, List<Entry> entries, Map<String, Integer> totals",
                "            , Locale locale, boolean detailed",
                "    ) {",
            ]
        );
    }

    #[test]
    fn test_flow_control_condition_is_split_by_spaces() {
        let line = "        if (firstConditionIsSatisfied && secondConditionIsSatisfied || thirdConditionIsSatisfied) {";
        assert_eq!(
            reflow(&[line]),
            vec![
                "        if (",
                "                firstConditionIsSatisfied && secondConditionIsSatisfied ||",
                "                thirdConditionIsSatisfied",
                "        ) {",
            ]
        );
    }

    #[test]
    fn test_method_without_closing_parenthesis_degrades_to_whitespace_wrap() {
        let line = "    public void configure(int alpha, int beta, int gamma, int delta, int epsilon, int zeta, int eta,";
        assert_eq!(LineCategory::of(line), LineCategory::MethodSignature);
        assert!(
            LineFormatter::new()
                .apply(LineCategory::MethodSignature, line)
                .is_err()
        );
        assert_eq!(
            reflow(&[line]),
            vec![
                "    public void configure(int alpha, int beta, int gamma, int delta, int",
                "    epsilon, int zeta, int eta,",
            ]
        );
    }

    #[test]
    fn test_standalone_comment_becomes_block_comment() {
        let line = "    // This comment explains in considerable detail why the following computation is performed lazily.";
        assert_eq!(
            reflow(&[line]),
            vec![
                "    /* This comment explains in considerable detail why the following",
                "     * computation is performed lazily. */",
            ]
        );
    }

    #[test]
    fn test_trailing_comment_moves_to_its_own_line() {
        let line = "        total = accumulator.combine(previousTotal, currentIncrement); // merge partial sums from each worker";
        assert_eq!(
            reflow(&[line]),
            vec![
                "        total = accumulator.combine(previousTotal, currentIncrement);",
                "        // merge partial sums from each worker",
            ]
        );
    }

    #[test]
    fn test_import_is_split_at_dots() {
        let line = "import org.example.platform.infrastructure.persistence.repositories.jdbc.CustomerAccountRepository;";
        assert_eq!(
            reflow(&[line]),
            vec![
                "import org.example.platform.infrastructure.persistence.repositories.jdbc",
                "        .CustomerAccountRepository;",
            ]
        );
    }

    #[test]
    fn test_deep_indent_flow_control_fits_width() {
        let indent = " ".repeat(70);
        let line = format!("{indent}if (alpha && beta) {{");
        assert_eq!(
            reflow(&[line.as_str()]),
            vec![
                format!("{indent}if ("),
                "        alpha && beta".to_string(),
                format!("{indent}) {{"),
            ]
        );
    }

    #[test]
    fn test_deep_indent_method_and_import_fit_width() {
        let indent = " ".repeat(76);
        let method = format!("{indent}public void resize(int width, int height) {{");
        let import = format!(
            "{indent}import org.example.platform.infrastructure.persistence.repositories.jdbc.CustomerAccountRepository;"
        );
        for line in [method, import] {
            let out = reflow(&[line.as_str()]);
            assert!(out.len() > 1, "{line:?} was not split");
            assert_fits(&out, DEFAULT_WIDTH);
        }
    }

    #[test]
    fn test_deep_indent_comment_fits_width() {
        let line = format!("{}// {}", " ".repeat(79), "note ".repeat(10).trim_end());
        let out = reflow(&[line.as_str()]);
        assert_fits(&out, DEFAULT_WIDTH);
        assert!(out[0].starts_with("/* note"));
    }

    #[test]
    fn test_comment_with_apostrophe_stays_a_comment() {
        let line = "    // This retry loop isn't obvious, so here is the surrounding retry loop in detail for readers.";
        assert_eq!(LineCategory::of(line), LineCategory::Quoted);
        let out = reflow(&[line]);

        assert_fits(&out, DEFAULT_WIDTH);
        assert!(out[0].starts_with("    /* This retry loop isn't"));
        assert!(out[1..].iter().all(|l| l.starts_with("     * ")));
        assert!(out[out.len() - 1].ends_with("for readers. */"));
    }

    #[test]
    fn test_comment_with_loop_condition_stays_a_comment() {
        let line = "        // keep polling while (attempts < max) so that the worker notices a late shutdown signal.";
        assert_eq!(LineCategory::of(line), LineCategory::FlowControl);
        let out = reflow(&[line]);

        assert_fits(&out, DEFAULT_WIDTH);
        assert!(out[0].starts_with("        /* keep polling while (attempts < max)"));
        assert!(out[1..].iter().all(|l| l.starts_with("         * ")));
    }

    #[test]
    fn test_method_with_trailing_comment_keeps_comment_marker() {
        let line = "    public void refresh(int attempts) { // called by the scheduler whenever the cache entry expires (see notes)";
        assert_eq!(
            reflow(&[line]),
            vec![
                "    public void refresh(int attempts) {",
                "    // called by the scheduler whenever the cache entry expires (see notes)",
            ]
        );
    }

    #[test]
    fn test_literal_with_trailing_comment_keeps_comment_marker() {
        let line = r#"        log.info("starting the nightly export job for every tenant"); // see the runbook for details"#;
        assert_eq!(
            reflow(&[line]),
            vec![
                r#"        log.info("starting the nightly export job for every tenant");"#,
                "        // see the runbook for details",
            ]
        );
    }

    #[test]
    fn test_comment_start_ignores_slashes_in_literals() {
        assert_eq!(comment_start(r#"url = "http://example.com"; // home"#), Some(28));
        assert_eq!(comment_start(r#"url = "http://example.com";"#), None);
        assert_eq!(comment_start("    // isn't"), Some(4));
    }

    #[test]
    fn test_plain_wrap_keeps_indentation_and_content() {
        let line = format!("    {}", "value + ".repeat(20).trim_end());
        let out = reflow(&[line.as_str()]);
        assert_fits(&out, DEFAULT_WIDTH);
        assert!(out.iter().all(|l| l.starts_with("    ")));
        let joined = out.iter().map(|l| l.trim()).collect::<Vec<_>>().join(" ");
        assert_eq!(joined, line.trim());
    }

    #[test]
    fn test_custom_width() {
        let formatter = LineFormatter::with_width(20);
        let out = formatter.format(&["alpha beta gamma delta epsilon"]);
        assert_eq!(out, vec!["alpha beta gamma", "delta epsilon"]);
    }

    #[test]
    fn test_split_literals() {
        let segments = split_literals(r#"f("a\"b", 'c') + "x"#);
        assert_eq!(
            segments,
            vec![
                Segment::Code("f("),
                Segment::Literal {
                    text: r#""a\"b""#,
                    quote: '"',
                    body: r#"a\"b"#
                },
                Segment::Code(", "),
                Segment::Literal {
                    text: "'c'",
                    quote: '\'',
                    body: "c"
                },
                Segment::Code(r#") + "x"#),
            ]
        );
    }
}
