//! Markdown → HTML for the overlay.
//!
//! Model output is untrusted: raw HTML blocks and inline tags are escaped
//! and shown as text, never injected into the webview.

use pulldown_cmark::{html, Event, Options, Parser};

pub fn render_markdown(markdown: &str) -> String {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;
    let parser = Parser::new_ext(markdown, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}
