//! Line-shape patterns.
//!
//! These regexes stand in for parsing: they match the shape of a single
//! trimmed line and are deliberately permissive. Patterns are compiled once on
//! first use.

use regex::Regex;
use std::sync::LazyLock;

macro_rules! line_pattern {
    ($name:ident, $regex_str:expr) => {
        pub(crate) static $name: LazyLock<Option<Regex>> =
            LazyLock::new(|| Regex::new($regex_str).ok());
    };
}

// `int a = 10, b = 20;`, `final List<String> x = a(), y = b();`
line_pattern!(
    MULTI_INSTANCE,
    r"^\s*(?:final\s+)?\w+(?:<.*>)?\s+\w+\s*=\s*[^,;]+(?:\s*,\s*\w+\s*=\s*[^,;]+)+\s*;\s*$"
);

// `public class Foo {`, `private static class Bar { // nested`
line_pattern!(
    CLASS_DECLARATION,
    r"^(public|private|protected)(\s\w+)*\s+class\b.*\s*(//.*)?$"
);

// `public void run() {`, `private static List<String> names() throws IOException {`
line_pattern!(
    METHOD_SIGNATURE,
    r"^(public|private|protected)\s+[a-zA-Z\s]*\s*[\w<>\[\],]*\s*\w+\s*\(.*\)?\s*.*\{?\s*(//.*)?$"
);

// `public abstract void process();`
line_pattern!(
    ABSTRACT_METHOD_SIGNATURE,
    r"^(public|private|protected)\s+abstract\s+[\w<>\[\],]+\s+\w+\s*\(.*\)?\s*(//.*)?$"
);

// `if (ready)`, `for (int i = 0; i < n; i++)`; searched anywhere in the line.
line_pattern!(FLOW_CONTROL, r"\b(if|for|while|switch)\s*\([^)]*\)\s*");

line_pattern!(ONLY_LINE_COMMENT, r"^//.*");

line_pattern!(
    IMPORT_OR_PACKAGE,
    r"^\s*(import|package)\s+[a-zA-Z0-9_.*]+\s*;$"
);

fn matches(pattern: &LazyLock<Option<Regex>>, line: &str) -> bool {
    pattern.as_ref().is_some_and(|re| re.is_match(line))
}

/// Several variables initialised in one declaration statement.
pub fn is_multi_instance_declaration(line: &str) -> bool {
    matches(&MULTI_INSTANCE, line)
}

/// A class declaration with an access modifier.
pub fn is_class_declaration(trimmed: &str) -> bool {
    matches(&CLASS_DECLARATION, trimmed)
}

/// A method signature with an access modifier.
pub fn is_method_signature(trimmed: &str) -> bool {
    matches(&METHOD_SIGNATURE, trimmed)
}

/// An abstract method signature.
pub fn is_abstract_method_signature(trimmed: &str) -> bool {
    matches(&ABSTRACT_METHOD_SIGNATURE, trimmed)
}

/// Contains an `if`/`for`/`while`/`switch` followed by a parenthesized condition.
pub fn has_flow_control(line: &str) -> bool {
    matches(&FLOW_CONTROL, line)
}

/// The whole trimmed line is a `//` comment.
pub fn is_only_line_comment(trimmed: &str) -> bool {
    matches(&ONLY_LINE_COMMENT, trimmed)
}

/// An `import` or `package` declaration.
pub fn is_import_or_package(line: &str) -> bool {
    matches(&IMPORT_OR_PACKAGE, line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_patterns_compile() {
        for pattern in [
            &MULTI_INSTANCE,
            &CLASS_DECLARATION,
            &METHOD_SIGNATURE,
            &ABSTRACT_METHOD_SIGNATURE,
            &FLOW_CONTROL,
            &ONLY_LINE_COMMENT,
            &IMPORT_OR_PACKAGE,
        ] {
            assert!(pattern.is_some());
        }
    }

    #[test]
    fn test_multi_instance_declaration() {
        assert!(is_multi_instance_declaration("int a = 1, b = 2;"));
        assert!(is_multi_instance_declaration(r#"  String x = "hello", y = "world";"#));
        assert!(is_multi_instance_declaration("final int a = 1, b = 2, c = 3;"));
        assert!(!is_multi_instance_declaration("int a = 1;"));
        assert!(!is_multi_instance_declaration("int x = max(a, b);"));
    }

    #[test]
    fn test_class_declaration() {
        assert!(is_class_declaration("public class MyClass {"));
        assert!(is_class_declaration("private static class Inner { // nested"));
        assert!(is_class_declaration("public final class Util"));
        assert!(!is_class_declaration("class PackagePrivate {"));
        assert!(!is_class_declaration("public interface Shape {"));
    }

    #[test]
    fn test_class_must_be_a_whole_word() {
        assert!(!is_class_declaration("public void classify() {"));
        assert!(!is_class_declaration("private int classCount;"));
    }

    #[test]
    fn test_method_signature() {
        assert!(is_method_signature("public void doSomething() {"));
        assert!(is_method_signature(
            "private static List<String> getNames() throws IOException {"
        ));
        assert!(is_method_signature("protected int size(int a, int b) // size"));
        assert!(!is_method_signature("int local = compute();"));
        assert!(!is_method_signature("public int count;"));
    }

    #[test]
    fn test_abstract_method_signature() {
        assert!(is_abstract_method_signature("public abstract void process();"));
        assert!(is_abstract_method_signature(
            "protected abstract List<String> computeValues();"
        ));
        assert!(!is_abstract_method_signature("public void process() {"));
    }

    #[test]
    fn test_flow_control() {
        assert!(has_flow_control("if (ready) {"));
        assert!(has_flow_control("    } else if(x > 1) {"));
        assert!(has_flow_control("for (int i = 0; i < 10; i++) {"));
        assert!(has_flow_control("while (true)"));
        assert!(!has_flow_control("notify(x);"));
        assert!(!has_flow_control("int iff = 2;"));
    }

    #[test]
    fn test_only_line_comment_and_import() {
        assert!(is_only_line_comment("// hello"));
        assert!(!is_only_line_comment("int a; // hello"));
        assert!(is_import_or_package("import java.util.List;"));
        assert!(is_import_or_package("package com.example.app;"));
        assert!(is_import_or_package("import java.util.*;"));
        assert!(!is_import_or_package("import static java.lang.Math.max;"));
    }
}
