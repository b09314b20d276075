//! Escaping of service-provided text before it reaches a backend.

/// Escape text for insertion into HTML markup.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

/// Strip control characters that a terminal would interpret.
///
/// Newlines and tabs survive; escape sequences, carriage returns and other
/// C0/C1 controls are replaced with `U+FFFD`.
pub fn sanitize_terminal(text: &str) -> String {
    text.chars()
        .map(|c| {
            if c == '\n' || c == '\t' || !c.is_control() {
                c
            } else {
                char::REPLACEMENT_CHARACTER
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"a" & 'b'</b>"#),
            "&lt;b&gt;&quot;a&quot; &amp; &#039;b&#039;&lt;/b&gt;"
        );
        assert_eq!(escape_html("MOV R0, a"), "MOV R0, a");
    }

    #[test]
    fn test_sanitize_terminal() {
        assert_eq!(sanitize_terminal("ok\n\tnext"), "ok\n\tnext");
        assert_eq!(sanitize_terminal("\x1b[31mred"), "\u{fffd}[31mred");
        assert_eq!(sanitize_terminal("a\rb"), "a\u{fffd}b");
    }
}
