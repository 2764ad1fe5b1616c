//! Markdown → HTML renderer.
//!
//! Thin wrapper around `pulldown_cmark`: parse the lesson source with a
//! fixed extension set and push straight to an HTML string. Rendering is
//! a pure function of the source, so it can run per request and stay
//! reproducible; lessons store raw markdown only.
//!
//! Code blocks come out as plain `<pre><code class="language-…">` —
//! syntax coloring happens client-side (highlight.js), triggered by the
//! view selector's fragment marker.

use pulldown_cmark::{Options, Parser, html};

/// Render one markdown document to an HTML fragment.
pub fn markdown_to_html(source: &str) -> String {
    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_TABLES);
    opts.insert(Options::ENABLE_STRIKETHROUGH);
    opts.insert(Options::ENABLE_TASKLISTS);
    opts.insert(Options::ENABLE_FOOTNOTES);
    opts.insert(Options::ENABLE_HEADING_ATTRIBUTES);

    let parser = Parser::new_ext(source, opts);
    let mut out = String::with_capacity(source.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}
