#![forbid(unsafe_code)]

//! Inline phase: span transformers applied over the joined block output.
//!
//! The pass order is load-bearing. Code spans run first so their contents are
//! shielded from every later pass; links run before emphasis so underscores
//! inside URLs survive; bold runs before italic so `**` is never read as two
//! `*` markers; newline conversion runs last, once all block tags exist.

/// Tags a newline must not be converted in front of.
const BREAK_EXEMPT_TAGS: [&str; 7] = ["ol", "ul", "li", "h1", "h2", "h3", "br"];

/// Tags whose immediate inner `<br>` neighbors are stripped.
const BLOCK_TAGS: [&str; 5] = ["ol", "ul", "h1", "h2", "h3"];

/// Apply every inline pass in order.
pub fn transform(html: &str) -> String {
    let html = code_spans(html);
    let html = links(&html);
    let html = bold_spans(&html, "**");
    let html = bold_spans(&html, "__");
    let html = emphasis_spans(&html, '*');
    let html = emphasis_spans(&html, '_');
    let html = line_breaks(&html);
    strip_boundary_breaks(&html)
}

/// `` `code` `` spans. Content is any non-empty run without a backtick;
/// newlines are allowed. An unclosed or empty pair leaves the backtick
/// literal, and the second of two adjacent backticks may still open a span.
fn code_spans(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    loop {
        let Some(open) = rest.find('`') else {
            out.push_str(rest);
            return out;
        };
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('`') {
            Some(close) if close > 0 => {
                out.push_str("<code>");
                out.push_str(&after[..close]);
                out.push_str("</code>");
                rest = &after[close + 1..];
            }
            _ => {
                out.push('`');
                rest = after;
            }
        }
    }
}

/// `[text](url)` links. The URL is trimmed and the anchor always opens in a
/// new tab with `rel="noopener noreferrer"`.
fn links(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(open) = rest.find('[') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];
        match parse_link(tail) {
            Some((text, url, consumed)) => {
                out.push_str("<a href=\"");
                out.push_str(url.trim());
                out.push_str("\" target=\"_blank\" rel=\"noopener noreferrer\">");
                out.push_str(text);
                out.push_str("</a>");
                rest = &tail[consumed..];
            }
            None => {
                out.push('[');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Parse a link at the start of `s` (which begins with `[`). Returns the
/// text, the raw URL, and the byte length consumed.
fn parse_link(s: &str) -> Option<(&str, &str, usize)> {
    let close = s.find(']')?;
    let text = &s[1..close];
    if text.is_empty() {
        return None;
    }
    let after = &s[close + 1..];
    if !after.starts_with('(') {
        return None;
    }
    let url_close = after.find(')')?;
    let url = &after[1..url_close];
    if url.is_empty() {
        return None;
    }
    Some((text, url, close + 1 + url_close + 1))
}

/// `**bold**` / `__bold__`. Content must be non-empty and stay on one line;
/// the nearest closing delimiter wins. A delimiter without a same-line
/// closer stays literal.
fn bold_spans(s: &str, delim: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(open) = rest.find(delim) {
        let after = &rest[open + delim.len()..];
        match after.find(delim) {
            Some(close) if close > 0 && !after[..close].contains('\n') => {
                out.push_str(&rest[..open]);
                out.push_str("<strong>");
                out.push_str(&after[..close]);
                out.push_str("</strong>");
                rest = &after[close + delim.len()..];
            }
            _ => {
                out.push_str(&rest[..open + delim.len()]);
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// `*italic*` / `_italic_`, guarded so markers embedded in words, URLs or
/// generated tags never match. A failed opener stays literal, and its
/// would-be closer gets its own chance to open a span.
fn emphasis_spans(s: &str, marker: char) -> String {
    let mut out = String::with_capacity(s.len());
    let mut i = 0;
    while let Some(rel) = s[i..].find(marker) {
        let open = i + rel;
        out.push_str(&s[i..open]);
        match emphasis_span_at(s, open, marker) {
            Some((content, end)) => {
                out.push_str("<em>");
                out.push_str(content);
                out.push_str("</em>");
                i = end;
            }
            None => {
                out.push(marker);
                i = open + 1;
            }
        }
    }
    out.push_str(&s[i..]);
    out
}

/// Try to read an emphasis span whose opening marker sits at byte `open`.
fn emphasis_span_at(s: &str, open: usize, marker: char) -> Option<(&str, usize)> {
    if s[..open].chars().next_back().is_some_and(|c| bad_before(c, marker)) {
        return None;
    }
    let after = &s[open + 1..];
    let close = after.find(marker)?;
    if close == 0 {
        return None;
    }
    let content = &after[..close];
    if content.contains(['\n', '<', '>']) {
        return None;
    }
    let end = open + 1 + close + 1;
    if s[end..].chars().next().is_some_and(|c| bad_after(c, marker)) {
        return None;
    }
    Some((content, end))
}

// Word characters in the ASCII sense, matching the guard classes the
// emphasis rules are defined over.
fn is_word(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn bad_before(c: char, marker: char) -> bool {
    if marker == '*' && c == '*' {
        return true;
    }
    is_word(c) || c == '<'
}

fn bad_after(c: char, marker: char) -> bool {
    if marker == '*' && c == '*' {
        return true;
    }
    is_word(c) || c == '>'
}

/// Convert remaining newlines to `<br>`, except directly before a
/// block-level or `<br>` tag, where the newline is kept as-is.
fn line_breaks(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut i = 0;
    while let Some(rel) = s[i..].find('\n') {
        let pos = i + rel;
        out.push_str(&s[i..pos]);
        if followed_by_exempt_tag(&s[pos + 1..]) {
            out.push('\n');
        } else {
            out.push_str("<br>");
        }
        i = pos + 1;
    }
    out.push_str(&s[i..]);
    out
}

fn followed_by_exempt_tag(rest: &str) -> bool {
    let Some(tag) = rest.strip_prefix('<') else {
        return false;
    };
    let tag = tag.strip_prefix('/').unwrap_or(tag);
    BREAK_EXEMPT_TAGS.iter().any(|name| tag.starts_with(name))
}

/// Drop `<br>` right after an opening block tag or right before its closing
/// tag, so lists and headings are not padded with empty lines.
fn strip_boundary_breaks(s: &str) -> String {
    let mut out = s.to_owned();
    for tag in BLOCK_TAGS {
        out = out.replace(&format!("<{tag}><br>"), &format!("<{tag}>"));
    }
    for tag in BLOCK_TAGS {
        out = out.replace(&format!("<br></{tag}>"), &format!("</{tag}>"));
    }
    out
}
