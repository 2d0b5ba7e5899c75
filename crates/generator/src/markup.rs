use outseek_site_core::{BodyFormat, ContentRecord};
use pulldown_cmark::{Options, Parser, html};

/// Record body as HTML. Markdown bodies are rendered; HTML bodies are
/// trusted and passed through.
pub fn render_body(record: &ContentRecord) -> String {
    match record.body_format {
        BodyFormat::Html => record.body.trim().to_string(),
        BodyFormat::Markdown => markdown_to_html(&record.body),
    }
}

pub fn markdown_to_html(source: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(source, options);
    let mut out = String::with_capacity(source.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_to_html() {
        let html = markdown_to_html("## Key Applications\n\n**Customer Service:** chatbots");
        assert!(html.contains("<h2>Key Applications</h2>"));
        assert!(html.contains("<strong>Customer Service:</strong>"));
    }

    #[test]
    fn test_markdown_tables() {
        let html = markdown_to_html("| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(html.contains("<table>"));
    }
}
