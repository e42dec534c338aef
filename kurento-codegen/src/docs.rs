//! Documentation normalization.
//!
//! IDL documentation is reStructuredText-flavoured prose. It is treated as
//! opaque text: markup tokens are stripped, blank lines dropped and long lines
//! wrapped so the generated doc comments stay within the column budget.

/// Column budget for a doc comment line, prefix excluded.
pub const DOC_LINE_LENGTH: usize = 79;

/// Cross-reference and term markers removed from documentation.
const MARKUP_TOKENS: [&str; 5] = [":rom:cls:", ":rom:meth:", ":rom:attr:", ":rom:evt:", ":term:"];

/// Prefix of every emitted comment line.
const COMMENT_PREFIX: &str = "///";

/// Formats documentation into doc comment lines.
#[must_use]
pub fn format_doc(doc: &str) -> Vec<String> {
    let mut text = doc.to_string();
    for token in MARKUP_TOKENS {
        text = text.replace(token, "");
    }
    let text = text.replace("``", "\"");

    let mut parts = Vec::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }
        wrap_line(line, &mut parts);
    }

    parts
        .iter()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .map(|part| format!("{COMMENT_PREFIX} {part}"))
        .collect()
}

/// Appends formatted documentation to `output`, one line per comment line.
pub fn push_doc(output: &mut String, indent: &str, doc: &str) {
    for line in format_doc(doc) {
        output.push_str(indent);
        output.push_str(&line);
        output.push('\n');
    }
}

/// Breaks `line` at the last space within the budget until the remainder
/// fits. A prefix with no space is left unbroken.
fn wrap_line(line: &str, parts: &mut Vec<String>) {
    let mut rest = line.trim_end();

    loop {
        rest = rest.trim_start();
        if rest.chars().count() <= DOC_LINE_LENGTH {
            break;
        }

        let window_end = rest
            .char_indices()
            .nth(DOC_LINE_LENGTH + 1)
            .map_or(rest.len(), |(i, _)| i);
        match rest[..window_end].rfind(' ') {
            Some(pos) => {
                parts.push(rest[..pos].to_string());
                rest = &rest[pos..];
            }
            None => break,
        }
    }

    parts.push(rest.to_string());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_doc_short() {
        let lines = format_doc("Creates a :rom:cls:`MediaPipeline`.");
        assert_eq!(lines, vec!["/// Creates a `MediaPipeline`."]);
    }

    #[test]
    fn test_format_doc_markup() {
        let lines = format_doc("See :term:`SDP` and ``true`` and :rom:meth:`connect`");
        assert_eq!(lines, vec!["/// See `SDP` and \"true\" and `connect`"]);
    }

    #[test]
    fn test_format_doc_drops_blank_lines() {
        let lines = format_doc("first\n\n   \nsecond\n");
        assert_eq!(lines, vec!["/// first", "/// second"]);
    }

    #[test]
    fn test_format_doc_empty() {
        assert!(format_doc("").is_empty());
        assert!(format_doc("\n \n").is_empty());
    }

    #[test]
    fn test_format_doc_wraps_at_space() {
        let head = "a".repeat(79);
        let tail = "b".repeat(40);
        let doc = format!(":rom:cls:{head} {tail}");
        assert_eq!(doc.len() - ":rom:cls:".len(), 120);

        let lines = format_doc(&doc);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], format!("/// {head}"));
        assert_eq!(lines[1], format!("/// {tail}"));
        assert!(lines.iter().all(|l| !l.contains(":rom:cls:")));
        assert!(lines[0].len() - 4 <= DOC_LINE_LENGTH);
    }

    #[test]
    fn test_format_doc_wraps_repeatedly() {
        let doc = ["word"; 60].join(" ");
        let lines = format_doc(&doc);

        assert!(lines.len() >= 3);
        for line in &lines {
            assert!(line.len() - 4 <= DOC_LINE_LENGTH, "{line}");
        }
        let rejoined: Vec<&str> = lines.iter().map(|l| &l[4..]).collect();
        assert_eq!(rejoined.join(" "), doc);
    }

    #[test]
    fn test_format_doc_unbreakable_line() {
        let word = "x".repeat(100);
        let lines = format_doc(&word);
        assert_eq!(lines, vec![format!("/// {word}")]);
    }

    #[test]
    fn test_format_doc_unbreakable_prefix_then_words() {
        let doc = format!("{} tail words", "y".repeat(90));
        let lines = format_doc(&doc);
        assert_eq!(lines, vec![format!("/// {doc}")]);
    }

    #[test]
    fn test_format_doc_multibyte() {
        let doc = format!("{} {}", "é".repeat(79), "ü".repeat(10));
        let lines = format_doc(&doc);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], format!("/// {}", "ü".repeat(10)));
    }

    #[test]
    fn test_push_doc_indent() {
        let mut output = String::new();
        push_doc(&mut output, "    ", "one\ntwo");
        assert_eq!(output, "    /// one\n    /// two\n");
    }
}
