#![forbid(unsafe_code)]

//! Renders the markdown subset used in chat replies to sanitized HTML.
//!
//! Dialect: `#`/`##`/`###` headings, ordered (`1.`/`1)`) and unordered
//! (`-`/`*`) lists, `**bold**`, `*italic*`, `` `code` ``, `[text](url)`
//! links, and line breaks. Input is HTML-escaped before any markup is
//! generated, so the output can only ever contain the tags this crate emits:
//! `h1 h2 h3 ol ul li strong em code a br`.
//!
//! The pipeline is two explicit phases. [`block`] scans line by line and
//! produces block-level structure; [`inline`] then applies span transformers
//! in a fixed order over the joined result. Rendering is total: any input
//! produces a string, and malformed markup degrades to literal text.

mod block;
mod escape;
mod inline;

pub use escape::escape_html;

/// Render chat markdown to sanitized HTML.
pub fn render(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let escaped = escape::escape_html(text);
    let blocks = block::transform(&escaped);
    inline::transform(&blocks)
}

#[cfg(test)]
mod tests {
    use super::render;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    /// Every `<` in rendered output must begin a whitelisted tag.
    fn assert_whitelisted(html: &str) {
        const SIMPLE: [&str; 17] = [
            "<h1>", "</h1>", "<h2>", "</h2>", "<h3>", "</h3>", "<ol>", "</ol>", "<ul>", "</ul>",
            "<li>", "</li>", "<strong>", "</strong>", "<em>", "</em>", "<br>",
        ];
        let mut rest = html;
        while let Some(pos) = rest.find('<') {
            let tail = &rest[pos..];
            if let Some(tag) = SIMPLE
                .iter()
                .chain(["<code>", "</code>", "</a>"].iter())
                .find(|t| tail.starts_with(**t))
            {
                rest = &tail[tag.len()..];
            } else if tail.starts_with("<a href=\"") {
                let end = tail.find('>').expect("unterminated anchor tag");
                rest = &tail[end + 1..];
            } else {
                let snippet: String = tail.chars().take(40).collect();
                panic!("unexpected markup: {snippet}");
            }
        }
    }

    #[test]
    fn empty_input_renders_empty() {
        assert_eq!(render(""), "");
    }

    #[test]
    fn raw_html_is_escaped() {
        assert_eq!(
            render("<img src=x onerror=alert(1)>"),
            "&lt;img src=x onerror=alert(1)&gt;"
        );
    }

    #[test]
    fn headings_by_level() {
        assert_eq!(render("# One"), "<h1>One</h1>");
        assert_eq!(render("## Two"), "<h2>Two</h2>");
        assert_eq!(render("### Three"), "<h3>Three</h3>");
        assert_eq!(render("#### Four"), "#### Four");
    }

    #[test]
    fn full_reply_shape() {
        let input = "## Summary\nTwo papers stand out:\n1. First paper\n2. Second paper\nSee **bold** and `code`.";
        assert_eq!(
            render(input),
            "<h2>Summary</h2><br>Two papers stand out:\n<ol>\n<li>First paper</li>\n\
             <li>Second paper</li>\n</ol><br>See <strong>bold</strong> and <code>code</code>."
        );
    }

    #[test]
    fn list_items_get_inline_formatting() {
        assert_eq!(
            render("- **bold** item\n- `code` item"),
            "<ul>\n<li><strong>bold</strong> item</li>\n<li><code>code</code> item</li>\n</ul>"
        );
    }

    #[test]
    fn blank_line_between_items_keeps_one_list() {
        let html = render("1. a\n\n2. b");
        assert_eq!(html.matches("<ol>").count(), 1);
        assert_eq!(html.matches("</ol>").count(), 1);
    }

    #[test]
    fn blank_line_before_prose_closes_list() {
        let html = render("1. a\n\nprose");
        let close = html.find("</ol>").expect("list closed");
        let prose = html.find("prose").expect("prose present");
        assert!(close < prose);
    }

    #[test]
    fn link_in_escaped_context() {
        assert_eq!(
            render("see [a_b](http://x.test/p_q) now"),
            "see <a href=\"http://x.test/p_q\" target=\"_blank\" \
             rel=\"noopener noreferrer\">a_b</a> now"
        );
    }

    #[test]
    fn quote_in_url_cannot_escape_attribute() {
        let html = render("[x](http://e.test/\"onmouseover=\"alert(1))");
        assert!(html.contains("&quot;"));
        assert!(!html.contains("\"onmouseover"));
        assert_whitelisted(&html);
    }

    #[test]
    fn code_protects_markers() {
        assert_eq!(render("`**not bold**`"), "<code>**not bold**</code>");
    }

    #[test]
    fn no_break_padding_inside_lists() {
        let html = render("intro\n- a\n- b\noutro");
        assert!(!html.contains("<ul><br>"));
        assert!(!html.contains("<br></ul>"));
    }

    #[test]
    fn balanced_tags_on_typical_input() {
        let html = render("# T\n- one\n- two\n\n1. three\n\ndone **now**");
        for tag in ["ol", "ul", "li", "h1", "strong"] {
            assert_eq!(
                html.matches(&format!("<{tag}>")).count(),
                html.matches(&format!("</{tag}>")).count(),
                "unbalanced <{tag}> in {html}"
            );
        }
    }

    proptest! {
        #[test]
        fn output_is_always_whitelisted(input in "[ -~\n]{0,200}") {
            assert_whitelisted(&render(&input));
        }

        #[test]
        fn markdownish_input_is_whitelisted(
            input in proptest::collection::vec(
                prop_oneof![
                    Just("# h".to_owned()),
                    Just("- item".to_owned()),
                    Just("1. item".to_owned()),
                    Just("**b** *i* _u_ `c`".to_owned()),
                    Just("[t](http://u.test)".to_owned()),
                    Just("<script>alert(1)</script>".to_owned()),
                    Just(String::new()),
                    "[a-z *_`#\\[\\]()<>&\"]{0,30}",
                ],
                0..8,
            )
        ) {
            assert_whitelisted(&render(&input.join("\n")));
        }

        #[test]
        fn plain_words_round_trip(input in "[a-z][a-z ]{0,60}[a-z]") {
            // No markdown metacharacters: rendering is the identity.
            prop_assert_eq!(render(&input), input);
        }
    }
}
