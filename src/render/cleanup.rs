//! Whitespace normalization applied once to a composed page.

use regex::Regex;

/// Normalizes the raw concatenation of rendered paragraphs.
///
/// Stages, in order:
/// 1. strip trailing whitespace from every line
/// 2. collapse runs of three or more newlines to a single blank line
/// 3. reduce extra spacing after a list marker (`-   item` → `- item`)
/// 4. trim the whole result
pub struct Normalizer {
    trailing_whitespace: Regex,
    excess_newlines: Regex,
    list_marker_spacing: Regex,
}

impl Normalizer {
    /// Create a new normalizer.
    pub fn new() -> Self {
        Self {
            trailing_whitespace: Regex::new(r"(?m)[^\S\n]+$").expect("static regex"),
            excess_newlines: Regex::new(r"\n{3,}").expect("static regex"),
            list_marker_spacing: Regex::new(r"(?m)^([^\S\n]*-[^\S\n])[^\S\n]+")
                .expect("static regex"),
        }
    }

    /// Process text through all normalization stages.
    pub fn process(&self, text: &str) -> String {
        let result = self.trailing_whitespace.replace_all(text, "");
        let result = self.excess_newlines.replace_all(&result, "\n\n");
        let result = self.list_marker_spacing.replace_all(&result, "${1}");
        result.trim().to_string()
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_newlines() {
        let normalizer = Normalizer::new();
        assert_eq!(normalizer.process("a\n\n\n\nb"), "a\n\nb");
        assert_eq!(normalizer.process("a\n\nb"), "a\n\nb");
    }

    #[test]
    fn test_whitespace_only_lines_do_not_leave_triple_newlines() {
        let normalizer = Normalizer::new();
        let result = normalizer.process("a\n  \n\t\n\nb");
        assert_eq!(result, "a\n\nb");
    }

    #[test]
    fn test_trailing_whitespace_per_line() {
        let normalizer = Normalizer::new();
        assert_eq!(normalizer.process("one  \ntwo\t\nthree"), "one\ntwo\nthree");
    }

    #[test]
    fn test_list_marker_spacing() {
        let normalizer = Normalizer::new();
        assert_eq!(normalizer.process("-    item"), "- item");
        assert_eq!(
            normalizer.process("- a\n    -   nested"),
            "- a\n    - nested"
        );
        // Checkbox markers are left alone.
        assert_eq!(normalizer.process("- [ ] todo"), "- [ ] todo");
    }

    #[test]
    fn test_list_spacing_does_not_join_lines() {
        let normalizer = Normalizer::new();
        assert_eq!(normalizer.process("- \nnext"), "-\nnext");
    }

    #[test]
    fn test_trim_whole_result() {
        let normalizer = Normalizer::new();
        assert_eq!(normalizer.process("\n\n## Title\n\nBody\n\n"), "## Title\n\nBody");
    }
}
