//! HTML escaping for user-supplied text.

/// Escape the five HTML-significant characters.
///
/// `&` becomes `&amp;`, `<` becomes `&lt;`, `>` becomes `&gt;`, `"` becomes
/// `&quot;` and `'` becomes `&#039;`. Every other character is copied as is.
/// Entities produced here are never escaped a second time because the input
/// is scanned once.
///
/// # Examples
///
/// ```
/// use mdlite_renderer::escape_html;
///
/// assert_eq!(escape_html(r#"<b>&""#), "&lt;b&gt;&amp;&quot;");
/// ```
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_all_special_characters() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#039;s&lt;/a&gt;"
        );
    }

    #[test]
    fn test_escape_tag_ampersand_quote() {
        assert_eq!(escape_html(r#"<b>&""#), "&lt;b&gt;&amp;&quot;");
    }

    #[test]
    fn test_escape_does_not_double_escape_own_output() {
        // Each `&` in the input is escaped exactly once.
        assert_eq!(escape_html("&lt;"), "&amp;lt;");
    }

    #[test]
    fn test_escape_plain_text_unchanged() {
        assert_eq!(escape_html("plain text 123 ü"), "plain text 123 ü");
    }

    #[test]
    fn test_escape_empty() {
        assert_eq!(escape_html(""), "");
    }
}
