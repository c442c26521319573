// Longest name we accept between '&' and ';' when deciding whether an ampersand
// already starts a character reference.
const MAX_ENTITY_LEN: usize = 32;

/// Escapes HTML-significant characters so the text cannot be rendered as markup.
///
/// An `&` that already begins a well-formed character reference is left alone,
/// which makes the function idempotent.
pub fn sanitize(input: &str) -> String {
    let mut out = String::with_capacity(input.len());

    for (i, c) in input.char_indices() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '&' if starts_with_reference(&input[i + 1..]) => out.push('&'),
            '&' => out.push_str("&amp;"),
            _ => out.push(c),
        }
    }

    out
}

/// `rest` is everything after an `&`.
fn starts_with_reference(rest: &str) -> bool {
    let Some(end) = rest.bytes().take(MAX_ENTITY_LEN + 1).position(|b| b == b';') else {
        return false;
    };
    let body = &rest[..end];

    match body.strip_prefix('#') {
        Some(numeric) => match numeric.strip_prefix(|c| c == 'x' || c == 'X') {
            Some(hex) => !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit()),
            None => !numeric.is_empty() && numeric.chars().all(|c| c.is_ascii_digit()),
        },
        None => !body.is_empty() && body.chars().all(|c| c.is_ascii_alphanumeric()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(sanitize("https://www.google.com"), "https://www.google.com");
        assert_eq!(sanitize("Fun in the sun"), "Fun in the sun");
        assert_eq!(sanitize(""), "");
    }

    #[test]
    fn test_script_tag_escaped() {
        let escaped = sanitize(r#"Naughty <script>alert("xss")</script>"#);
        assert_eq!(
            escaped,
            "Naughty &lt;script&gt;alert(&quot;xss&quot;)&lt;/script&gt;"
        );
        assert!(!escaped.contains('<'));
        assert!(!escaped.contains('>'));
    }

    #[test]
    fn test_attribute_quotes_escaped() {
        assert_eq!(
            sanitize(r#"<img src="x" onerror='alert(1)'>"#),
            "&lt;img src=&quot;x&quot; onerror=&#x27;alert(1)&#x27;&gt;"
        );
    }

    #[test]
    fn test_bare_ampersand_escaped() {
        assert_eq!(sanitize("Tom & Jerry"), "Tom &amp; Jerry");
        assert_eq!(sanitize("a&b"), "a&amp;b");
        assert_eq!(sanitize("&;"), "&amp;;");
        assert_eq!(sanitize("&#;"), "&amp;#;");
        assert_eq!(sanitize("&#xZZ;"), "&amp;#xZZ;");
    }

    #[test]
    fn test_existing_references_kept() {
        assert_eq!(sanitize("fish &amp; chips"), "fish &amp; chips");
        assert_eq!(sanitize("&#60;&#x3C;&lt;"), "&#60;&#x3C;&lt;");
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            r#"Naughty naughty very naughty <script>alert("xss");</script>"#,
            "Tom & Jerry <b>'quoted'</b>",
            "&&&;;<<>>\"'",
            "caf\u{e9} & cr\u{e8}me",
            "x => {fetch('http://localhost:8000/bookmarks/911')}",
        ];
        for input in inputs {
            let once = sanitize(input);
            assert_eq!(sanitize(&once), once, "not idempotent for {input:?}");
        }
    }
}
