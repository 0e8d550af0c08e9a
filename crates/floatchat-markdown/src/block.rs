#![forbid(unsafe_code)]

//! Block phase: a line scanner that classifies each input line and folds the
//! classified stream into block-level HTML, tracking open-list state.
//!
//! The scanner runs on already-escaped text, so a literal `<` can no longer
//! occur in any line.

/// Classification of a single input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    /// Empty or whitespace-only.
    Blank,
    /// `1. item` or `1) item`, leading indentation allowed.
    Ordered { content: &'a str },
    /// `- item` or `* item`, leading indentation allowed. Horizontal-rule
    /// lines (three or more bare `-`/`*`) are excluded.
    Unordered { content: &'a str },
    /// `#`, `##` or `###` followed by whitespace. Deeper levels are not
    /// headings.
    Heading { level: u8, content: &'a str },
    /// Anything else; passed through for the inline phase.
    Text,
}

/// Classify one line.
pub fn classify(line: &str) -> Line<'_> {
    if line.trim().is_empty() {
        return Line::Blank;
    }
    if let Some(content) = ordered_item(line) {
        return Line::Ordered { content };
    }
    if let Some(content) = unordered_item(line) {
        return Line::Unordered { content };
    }
    if let Some((level, content)) = heading(line) {
        return Line::Heading { level, content };
    }
    Line::Text
}

/// Whether a line opens like a list item (marker present, content optional).
/// Used only for the blank-line lookahead: a blank line inside a list keeps
/// the list open when the *next* line still carries a list marker.
pub fn has_list_marker(line: &str) -> bool {
    let rest = line.trim_start();
    if let Some(after) = rest.strip_prefix(['-', '*']) {
        return after.starts_with(char::is_whitespace);
    }
    let digits = rest.len() - rest.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return false;
    }
    let after_digits = &rest[digits..];
    after_digits
        .strip_prefix(['.', ')'])
        .is_some_and(|after| after.starts_with(char::is_whitespace))
}

fn ordered_item(line: &str) -> Option<&str> {
    let rest = line.trim_start();
    let digits = rest.len() - rest.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return None;
    }
    let after = rest[digits..].strip_prefix(['.', ')'])?;
    item_content(after)
}

fn unordered_item(line: &str) -> Option<&str> {
    // A bare rule line like `***` or `---` is not a list item.
    if line.len() >= 3 && line.chars().all(|c| c == '-' || c == '*') {
        return None;
    }
    let after = line.trim_start().strip_prefix(['-', '*'])?;
    item_content(after)
}

fn item_content(after_marker: &str) -> Option<&str> {
    if !after_marker.starts_with(char::is_whitespace) {
        return None;
    }
    let content = after_marker.trim_start();
    (!content.is_empty()).then_some(content)
}

fn heading(line: &str) -> Option<(u8, &str)> {
    let hashes = line.len() - line.trim_start_matches('#').len();
    if !(1..=3).contains(&hashes) {
        return None;
    }
    let rest = &line[hashes..];
    let mut chars = rest.chars();
    let first = chars.next()?;
    if !first.is_whitespace() {
        return None;
    }
    // Only the first whitespace character is consumed; any further
    // indentation stays in the heading content.
    Some((hashes as u8, chars.as_str()))
}

/// Fold the classified line stream into block HTML, lines joined by `\n`.
///
/// List state rules: switching between ordered and unordered closes the
/// previous list; a non-list, non-blank line closes any open list; a blank
/// line closes open lists only when the next line does not carry a list
/// marker; end of input closes whatever is still open.
pub fn transform(escaped: &str) -> String {
    let lines: Vec<&str> = escaped.split('\n').collect();
    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    let mut in_ordered = false;
    let mut in_unordered = false;

    for (i, line) in lines.iter().enumerate() {
        match classify(line) {
            Line::Blank => {
                if in_ordered || in_unordered {
                    let next_keeps_list = lines
                        .get(i + 1)
                        .is_some_and(|next| !next.trim().is_empty() && has_list_marker(next));
                    if !next_keeps_list {
                        if in_ordered {
                            out.push("</ol>".to_owned());
                            in_ordered = false;
                        }
                        if in_unordered {
                            out.push("</ul>".to_owned());
                            in_unordered = false;
                        }
                    }
                }
                out.push((*line).to_owned());
            }
            Line::Ordered { content } => {
                if !in_ordered {
                    if in_unordered {
                        out.push("</ul>".to_owned());
                        in_unordered = false;
                    }
                    out.push("<ol>".to_owned());
                    in_ordered = true;
                }
                out.push(format!("<li>{content}</li>"));
            }
            Line::Unordered { content } => {
                if in_ordered {
                    out.push("</ol>".to_owned());
                    in_ordered = false;
                }
                if !in_unordered {
                    out.push("<ul>".to_owned());
                    in_unordered = true;
                }
                out.push(format!("<li>{content}</li>"));
            }
            Line::Heading { level, content } => {
                close_open_lists(&mut out, &mut in_ordered, &mut in_unordered);
                out.push(format!("<h{level}>{content}</h{level}>"));
            }
            Line::Text => {
                close_open_lists(&mut out, &mut in_ordered, &mut in_unordered);
                out.push((*line).to_owned());
            }
        }
    }

    close_open_lists(&mut out, &mut in_ordered, &mut in_unordered);
    out.join("\n")
}

fn close_open_lists(out: &mut Vec<String>, in_ordered: &mut bool, in_unordered: &mut bool) {
    if *in_ordered {
        out.push("</ol>".to_owned());
        *in_ordered = false;
    }
    if *in_unordered {
        out.push("</ul>".to_owned());
        *in_unordered = false;
    }
}

#[cfg(test)]
mod tests {
    use super::{Line, classify, has_list_marker, transform};
    use pretty_assertions::assert_eq;

    #[test]
    fn classifies_lines() {
        assert_eq!(classify(""), Line::Blank);
        assert_eq!(classify("   \t"), Line::Blank);
        assert_eq!(classify("1. one"), Line::Ordered { content: "one" });
        assert_eq!(classify("  12) twelve"), Line::Ordered { content: "twelve" });
        assert_eq!(classify("- dash"), Line::Unordered { content: "dash" });
        assert_eq!(classify("* star"), Line::Unordered { content: "star" });
        assert_eq!(classify("## Title"), Line::Heading { level: 2, content: "Title" });
        assert_eq!(classify("plain"), Line::Text);
    }

    #[test]
    fn marker_without_space_is_text() {
        assert_eq!(classify("1.nospace"), Line::Text);
        assert_eq!(classify("-nospace"), Line::Text);
        assert_eq!(classify("#nospace"), Line::Text);
    }

    #[test]
    fn rule_lines_are_not_list_items() {
        assert_eq!(classify("***"), Line::Text);
        assert_eq!(classify("-----"), Line::Text);
    }

    #[test]
    fn deep_headings_are_text() {
        assert_eq!(classify("#### too deep"), Line::Text);
    }

    #[test]
    fn heading_keeps_extra_indent() {
        // One whitespace char after the hashes is the separator; the rest
        // belongs to the content.
        assert_eq!(classify("##  Spaced"), Line::Heading { level: 2, content: " Spaced" });
        assert_eq!(classify("#\tTabbed"), Line::Heading { level: 1, content: "Tabbed" });
    }

    #[test]
    fn list_marker_lookahead_ignores_missing_content() {
        assert!(has_list_marker("1. item"));
        assert!(has_list_marker("- "));
        assert!(!has_list_marker("plain"));
        assert!(!has_list_marker("1.x"));
    }

    #[test]
    fn groups_consecutive_items() {
        let html = transform("1. a\n2. b");
        assert_eq!(html, "<ol>\n<li>a</li>\n<li>b</li>\n</ol>");
    }

    #[test]
    fn switching_list_kind_closes_previous() {
        let html = transform("1. a\n- b");
        assert_eq!(html, "<ol>\n<li>a</li>\n</ol>\n<ul>\n<li>b</li>\n</ul>");
    }

    #[test]
    fn blank_line_keeps_list_open_when_items_continue() {
        let html = transform("- a\n\n- b");
        assert_eq!(html, "<ul>\n<li>a</li>\n\n<li>b</li>\n</ul>");
    }

    #[test]
    fn blank_line_closes_list_before_prose() {
        let html = transform("- a\n\ntext");
        assert_eq!(html, "<ul>\n<li>a</li>\n</ul>\n\ntext");
    }

    #[test]
    fn trailing_blank_closes_list() {
        let html = transform("- a\n");
        assert_eq!(html, "<ul>\n<li>a</li>\n</ul>\n");
    }

    #[test]
    fn text_line_interrupts_list() {
        let html = transform("1. a\nplain\n2. b");
        assert_eq!(
            html,
            "<ol>\n<li>a</li>\n</ol>\nplain\n<ol>\n<li>b</li>\n</ol>"
        );
    }

    #[test]
    fn end_of_input_closes_list() {
        let html = transform("- only");
        assert_eq!(html, "<ul>\n<li>only</li>\n</ul>");
    }
}
