#![forbid(unsafe_code)]

//! HTML escaping. Runs before any markup is generated, so every `<`, `>` and
//! `&` in renderer output that is not part of a generated tag originated here
//! as an entity.

/// Escape the five HTML-significant characters.
///
/// Quotes are included even though they only matter inside attribute values;
/// escaping them unconditionally keeps link URLs from breaking out of their
/// `href` attribute.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::escape_html;
    use pretty_assertions::assert_eq;

    #[test]
    fn escapes_all_significant_chars() {
        assert_eq!(
            escape_html(r#"<script>alert("x&'y")</script>"#),
            "&lt;script&gt;alert(&quot;x&amp;&#39;y&quot;)&lt;/script&gt;"
        );
    }

    #[test]
    fn passes_plain_text_through() {
        assert_eq!(escape_html("hello, wörld 42"), "hello, wörld 42");
    }

    #[test]
    fn ampersand_first_no_double_escape() {
        assert_eq!(escape_html("&lt;"), "&amp;lt;");
    }
}
