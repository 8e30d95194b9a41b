//! Light script and stylesheet minification
//!
//! Whitespace- and comment-stripping passes, not full parsers. Enough to cut
//! the served payload while never reordering or rewriting identifiers.

/// Strip comments and per-line whitespace from a script.
///
/// Line comments, block-comment lines and blank lines are dropped; remaining
/// lines are trimmed and joined with a newline so statements that rely on
/// automatic semicolon insertion stay valid.
pub fn minify_js(input: &str) -> String {
    let mut out = Vec::new();
    let mut in_block_comment = false;

    for line in input.lines() {
        let mut line = line.trim();

        if in_block_comment {
            match line.find("*/") {
                Some(end) => {
                    line = line[end + 2..].trim();
                    in_block_comment = false;
                }
                None => continue,
            }
        }

        // Only whole-line comments are stripped; a // inside a string
        // literal cannot start a line on its own.
        if line.starts_with("//") || line.is_empty() {
            continue;
        }

        if let Some(start) = line.find("/*") {
            if !line[start..].contains("*/") {
                in_block_comment = true;
                line = line[..start].trim_end();
                if line.is_empty() {
                    continue;
                }
            }
        }

        out.push(line);
    }

    out.join("\n")
}

/// Collapse a stylesheet to a single line with blank lines removed
pub fn minify_css(input: &str) -> String {
    input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| !(line.starts_with("/*") && line.ends_with("*/")))
        .collect::<Vec<_>>()
        .join("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minify_js_strips_line_comments() {
        let input = "// header\nvar a = 1;\n  // trailing comment line\nvar b = 2;\n";
        assert_eq!(minify_js(input), "var a = 1;\nvar b = 2;");
    }

    #[test]
    fn test_minify_js_strips_block_comments() {
        let input = "/*\n * ${copyright}\n */\nvar a = 1;";
        assert_eq!(minify_js(input), "var a = 1;");
    }

    #[test]
    fn test_minify_js_keeps_code_after_block_end() {
        let input = "/* short */ var a = 1;\nvar b = 2;";
        assert_eq!(minify_js(input), "/* short */ var a = 1;\nvar b = 2;");
    }

    #[test]
    fn test_minify_css_collapses_lines() {
        let input = ".a {\n  color: red;\n}\n\n.b {\n  color: blue;\n}\n";
        assert_eq!(minify_css(input), ".a {color: red;}.b {color: blue;}");
    }

    #[test]
    fn test_minify_css_drops_single_line_comments() {
        let input = "/* banner */\n.a { color: red; }\n";
        assert_eq!(minify_css(input), ".a { color: red; }");
    }
}
