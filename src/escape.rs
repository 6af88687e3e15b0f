//! Markup escaping
//!
//! Every piece of analyzed or API-returned text goes through [`escape_html`]
//! before it is placed into rendered markup.

/// Escape `&`, `<`, `>`, `"` and `'` so the text renders literally
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
