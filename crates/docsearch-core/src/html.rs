//! HTML escaping for text that echoes user input.

/// Escapes `&`, `<`, `>` and `"` so a query can be echoed inside markup.
///
/// # Examples
///
/// ```
/// use docsearch_core::html::html_encode;
///
/// assert_eq!(html_encode(r#"<a href="x">&"#), "&lt;a href=&quot;x&quot;&gt;&amp;");
/// ```
pub fn html_encode(text: &str) -> String {
    let mut encoded = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => encoded.push_str("&amp;"),
            '<' => encoded.push_str("&lt;"),
            '>' => encoded.push_str("&gt;"),
            '"' => encoded.push_str("&quot;"),
            _ => encoded.push(c),
        }
    }
    encoded
}
