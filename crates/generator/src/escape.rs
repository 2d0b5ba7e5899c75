//! Escaping for HTML attribute/text context and XML text nodes.

/// HTML-escape a string to prevent XSS attacks
///
/// Escapes: & < > " '
pub fn escape_html(s: &str) -> String {
    escape_with(s, "&#x27;")
}

/// Escape the five XML-significant characters with named entities.
///
/// Each character is replaced exactly once, so an `&` produced by another
/// substitution is never escaped again.
pub fn escape_xml(s: &str) -> String {
    escape_with(s, "&apos;")
}

fn escape_with(s: &str, apostrophe: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str(apostrophe),
            _ => out.push(c),
        }
    }
    out
}

/// Inverse of [`escape_xml`]. Also accepts `&#39;` and `&#x27;`.
/// Unknown entities are left untouched.
pub fn unescape_xml(s: &str) -> String {
    const ENTITIES: &[(&str, char)] = &[
        ("&amp;", '&'),
        ("&lt;", '<'),
        ("&gt;", '>'),
        ("&quot;", '"'),
        ("&apos;", '\''),
        ("&#39;", '\''),
        ("&#x27;", '\''),
    ];

    let mut out = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];

        match ENTITIES.iter().find(|(entity, _)| rest.starts_with(entity)) {
            Some((entity, c)) => {
                out.push(*c);
                rest = &rest[entity.len()..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

/// Wrap trusted markup in a CDATA section. The markup itself is not
/// escaped; a literal `]]>` is split across two sections.
pub fn cdata(s: &str) -> String {
    format!("<![CDATA[{}]]>", s.replace("]]>", "]]]]><![CDATA[>"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html_basic_characters() {
        assert_eq!(escape_html("Hello World"), "Hello World");
        assert_eq!(escape_html("Test & Test"), "Test &amp; Test");
        assert_eq!(escape_html("<script>"), "&lt;script&gt;");
        assert_eq!(escape_html("\"quoted\""), "&quot;quoted&quot;");
        assert_eq!(escape_html("'single'"), "&#x27;single&#x27;");
    }

    #[test]
    fn test_escape_html_xss_attempts() {
        assert_eq!(
            escape_html("<script>alert('XSS')</script>"),
            "&lt;script&gt;alert(&#x27;XSS&#x27;)&lt;/script&gt;"
        );
        assert_eq!(
            escape_html("\"><img src=x onerror=alert(1)>"),
            "&quot;&gt;&lt;img src=x onerror=alert(1)&gt;"
        );
    }

    #[test]
    fn test_escape_xml_all_five() {
        assert_eq!(
            escape_xml("A&B<C>D\"E'F"),
            "A&amp;B&lt;C&gt;D&quot;E&apos;F"
        );
    }

    #[test]
    fn test_escape_xml_does_not_double_escape() {
        assert_eq!(escape_xml("<"), "&lt;");
        assert_eq!(escape_xml("&lt;"), "&amp;lt;");
    }

    #[test]
    fn test_escape_round_trip() {
        let inputs = [
            "Tom & Jerry's <\"quoted\"> show",
            "&amp; already escaped",
            "&&<<>>\"\"''",
            "",
            "plain text",
            "トラック & 曲",
        ];
        for input in inputs {
            let escaped = escape_xml(input);
            assert_eq!(unescape_xml(&escaped), input);
            for raw in ['<', '>', '"', '\''] {
                assert!(!escaped.contains(raw), "{:?} in {:?}", raw, escaped);
            }
            // Every remaining ampersand starts an entity
            for (i, _) in escaped.match_indices('&') {
                let tail = &escaped[i..];
                assert!(
                    ["&amp;", "&lt;", "&gt;", "&quot;", "&apos;"]
                        .iter()
                        .any(|e| tail.starts_with(e))
                );
            }
        }
    }

    #[test]
    fn test_unescape_numeric_apostrophe_and_unknown_entity() {
        assert_eq!(unescape_xml("it&#39;s &#x27;ok&#x27;"), "it's 'ok'");
        assert_eq!(unescape_xml("&nbsp; & done"), "&nbsp; & done");
        assert_eq!(unescape_xml("&amp;lt;"), "&lt;");
    }

    #[test]
    fn test_cdata_is_verbatim() {
        assert_eq!(cdata("<p>Tom & Jerry</p>"), "<![CDATA[<p>Tom & Jerry</p>]]>");
        assert_eq!(cdata("a]]>b"), "<![CDATA[a]]]]><![CDATA[>b]]>");
    }
}
