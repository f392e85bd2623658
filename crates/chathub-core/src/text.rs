//! Chat message text handling — sanitization and display formatting.
//!
//! Messages are stored and broadcast as already-formatted strings
//! (`[HH:MM:SS] sender: body`), so everything that touches user input
//! goes through [`sanitize`] first.

use chrono::Local;

/// Strips HTML markup from untrusted chat input.
///
/// Tags are removed entirely; the contents of `<script>` and `<style>`
/// elements are dropped along with the tags so executable payloads never
/// reach a browser. A lone `<` that does not start a tag (e.g. `2 < 3`)
/// is kept as-is.
pub fn sanitize(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = String::with_capacity(input.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'<' {
            if let Some((name, tag_end)) = parse_tag(input, i) {
                if name.eq_ignore_ascii_case("script") || name.eq_ignore_ascii_case("style") {
                    // Skip the element body up to and including its close tag.
                    i = skip_element(input, tag_end, &name);
                } else {
                    i = tag_end;
                }
                continue;
            }
        }
        let ch = input[i..].chars().next().unwrap_or('\u{FFFD}');
        out.push(ch);
        i += ch.len_utf8();
    }

    out
}

/// Parses a tag starting at `start` (which must point at `<`).
///
/// Returns the tag name and the index just past the closing `>`, or
/// `None` if this is not a tag.
fn parse_tag(input: &str, start: usize) -> Option<(String, usize)> {
    let rest = &input[start + 1..];
    let mut chars = rest.char_indices();

    let (mut name_start, first) = chars.next()?;
    let closing = first == '/';
    if closing {
        let (idx, ch) = chars.next()?;
        if !ch.is_ascii_alphabetic() {
            return None;
        }
        name_start = idx;
    } else if !first.is_ascii_alphabetic() {
        return None;
    }

    let rel_end = rest[name_start..]
        .find(|c: char| !c.is_ascii_alphanumeric())
        .map(|off| name_start + off)
        .unwrap_or(rest.len());
    let name = rest[name_start..rel_end].to_string();

    match rest.find('>') {
        Some(gt) => {
            let name = if closing { format!("/{name}") } else { name };
            Some((name, start + 1 + gt + 1))
        }
        // Unterminated tag: swallow the rest of the input.
        None => Some((name, input.len())),
    }
}

/// Skips past the closing tag of `name`, starting at `from`.
fn skip_element(input: &str, from: usize, name: &str) -> usize {
    let close = format!("</{}", name.to_ascii_lowercase());
    let lower = input[from..].to_ascii_lowercase();
    match lower.find(&close) {
        Some(rel) => {
            let after = from + rel;
            match input[after..].find('>') {
                Some(gt) => after + gt + 1,
                None => input.len(),
            }
        }
        None => input.len(),
    }
}

/// Formats a user chat message for display: `[HH:MM:SS] user: body`.
///
/// Both sides are sanitized; the result is immutable from here on.
pub fn format_chat(user: &str, body: &str) -> String {
    let now = Local::now().format("%H:%M:%S");
    format!("[{now}] {}: {}", sanitize(user), sanitize(body))
}

/// Formats a system announcement: `[HH:MM:SS] * text`.
pub fn format_system(text: &str) -> String {
    let now = Local::now().format("%H:%M:%S");
    format!("[{now}] * {}", sanitize(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_plain_text_through() {
        assert_eq!(sanitize("hello world"), "hello world");
    }

    #[test]
    fn keeps_non_tag_angle_brackets() {
        assert_eq!(sanitize("2 < 3 and 5 > 4"), "2 < 3 and 5 > 4");
    }

    #[test]
    fn strips_simple_tags() {
        assert_eq!(sanitize("<b>bold</b> move"), "bold move");
    }

    #[test]
    fn drops_script_content_entirely() {
        let out = sanitize("hi <script>alert('xss')</script> there");
        assert_eq!(out, "hi  there");
        assert!(!out.contains("alert"));
    }

    #[test]
    fn drops_script_with_attributes() {
        let out = sanitize("<script type=\"text/javascript\">steal()</script>ok");
        assert_eq!(out, "ok");
    }

    #[test]
    fn unterminated_script_swallows_rest() {
        let out = sanitize("before <script>evil(");
        assert_eq!(out, "before ");
    }

    #[test]
    fn drops_style_content() {
        assert_eq!(sanitize("<style>body{}</style>x"), "x");
    }

    #[test]
    fn formats_chat_line() {
        let line = format_chat("alice", "hello");
        assert!(line.ends_with("] alice: hello"), "got {line}");
        assert!(line.starts_with('['));
    }

    #[test]
    fn chat_line_sanitizes_body() {
        let line = format_chat("mallory", "<script>x()</script>hi");
        assert!(line.ends_with("] mallory: hi"), "got {line}");
    }

    #[test]
    fn formats_system_line() {
        let line = format_system("alice joined the room");
        assert!(line.ends_with("] * alice joined the room"), "got {line}");
    }
}
