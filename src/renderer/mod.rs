//! HTML renderer module
//!
//! Compiles changelog markdown into a standalone HTML document. Output is a
//! pure function of the title and markdown text.

use pulldown_cmark::{html, Options, Parser};
use pulldown_cmark_escape::escape_html;

const STYLE: &str = "\
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Helvetica, Arial, sans-serif; \
line-height: 1.5; max-width: 48em; margin: 0 auto; padding: 1em; color: #24292e; }
h1, h2 { border-bottom: 1px solid #eaecef; padding-bottom: .3em; }
code { background: #f6f8fa; padding: .2em .4em; border-radius: 3px; }
pre code { display: block; padding: 1em; overflow: auto; }
table { border-collapse: collapse; }
th, td { border: 1px solid #dfe2e5; padding: 6px 13px; }
";

/// Render `markdown` as a complete HTML page titled `title`
pub fn render_html(title: &str, markdown: &str) -> String {
    let mut output = String::new();

    output.push_str("<!DOCTYPE html>\n");
    output.push_str("<html>\n<head>\n");
    output.push_str("<meta charset=\"utf-8\">\n");
    output.push_str("<title>");
    // Writing into a String cannot fail
    let _ = escape_html(&mut output, title);
    output.push_str("</title>\n");
    output.push_str(&format!("<style>\n{}</style>\n", STYLE));
    output.push_str("</head>\n<body>\n");
    output.push_str(&render_body(markdown));
    output.push_str("</body>\n</html>\n");

    output
}

/// Render markdown to an HTML fragment
fn render_body(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(markdown, options);
    let mut body = String::new();
    html::push_html(&mut body, parser);
    body
}
