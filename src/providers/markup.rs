/// Escape text for XML character data and attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            // Control characters other than tab/newline are not allowed in XML 1.0.
            c if (c as u32) < 0x20 && c != '\t' && c != '\n' && c != '\r' => {}
            c => out.push(c),
        }
    }
    out
}

/// Minimal HTML page with one `<p>` per line of `text`.
pub fn html_document(text: &str, encoding: &str) -> String {
    let body: String = text
        .lines()
        .map(|line| format!("<p>{}</p>\n", escape(line)))
        .collect();
    format!(
        "<!DOCTYPE html>\n<html><head><meta charset=\"{}\"></head><body>\n{}</body></html>\n",
        encoding, body
    )
}

/// Element names: a letter or `_`, then letters, digits, `_`, `-` or `.`.
pub fn is_valid_element_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_document_escapes_lines() {
        let html = html_document("a < b\nc", "utf-8");
        assert!(html.contains("<p>a &lt; b</p>\n<p>c</p>"));
        assert!(html.contains("charset=\"utf-8\""));
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("a < b & \"c\""), "a &lt; b &amp; &quot;c&quot;");
        assert_eq!(escape("bell\u{7}"), "bell");
        assert_eq!(escape("line\nbreak"), "line\nbreak");
    }

    #[test]
    fn test_element_names() {
        assert!(is_valid_element_name("root"));
        assert!(is_valid_element_name("_row-1.x"));
        assert!(!is_valid_element_name("1row"));
        assert!(!is_valid_element_name(""));
        assert!(!is_valid_element_name("a b"));
    }
}
