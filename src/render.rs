//! Markdown-style rendering of explanation trees.

use crate::explanation::Explanation;

/// Renders `explanations` as a bulleted list, one line per node.
///
/// Each line is `indent` spaces, `"* "`, then the formatted message.
/// Children are rendered at `indent + 1` on the lines that follow their
/// parent. An empty slice renders as an empty string.
pub fn render(explanations: &[Explanation], indent: usize) -> String {
    let mut lines = Vec::new();
    push_lines(&mut lines, explanations, indent);
    lines.join("\n")
}

fn push_lines(lines: &mut Vec<String>, explanations: &[Explanation], indent: usize) {
    for explanation in explanations {
        lines.push(format!(
            "{}* {}",
            " ".repeat(indent),
            explanation.formatted_message()
        ));
        push_lines(lines, &explanation.items, indent + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn should_contain() -> Explanation {
        Explanation::new("shouldContain", "Should contain:").with_items(vec![
            Explanation::new("lowerCase", "lower case letters (a-z)"),
            Explanation::new("upperCase", "upper case letters (A-Z)"),
            Explanation::new("numbers", "numbers (i.e. 0-9)"),
        ])
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render(&[], 0), "");
        assert_eq!(render(&[], 3), "");
    }

    #[test]
    fn test_render_nested_at_top_level() {
        let explanations = vec![
            Explanation::new("lengthAtLeast", "At least %d characters in length")
                .with_format(vec![8i64.into()]),
            should_contain(),
        ];
        assert_eq!(
            render(&explanations, 0),
            "* At least 8 characters in length\n\
             * Should contain:\n \
             * lower case letters (a-z)\n \
             * upper case letters (A-Z)\n \
             * numbers (i.e. 0-9)"
        );
    }

    #[test]
    fn test_render_nested_one_level_in() {
        assert_eq!(
            render(&[should_contain()], 1),
            " * Should contain:\n  * lower case letters (a-z)\n  * upper case letters (A-Z)\n  * numbers (i.e. 0-9)"
        );
    }

    #[test]
    fn test_render_ignores_verified() {
        let explanation =
            Explanation::new("nonEmpty", "Non-empty password required").with_verified(false);
        assert_eq!(render(&[explanation], 0), "* Non-empty password required");
    }
}
