//! Server-side page chrome.
//!
//! Two templates: the home page (course outline) and the lesson page
//! (rendered lesson body between Prev/Next controls). Navigation buttons
//! use htmx to swap just the lesson body; the fragment path in the HTTP
//! adapter serves those swaps.
//!
//! Lesson content is authored by the course owner and rendered as-is;
//! only it and the unit metadata reach these templates.

use crate::core::catalog::Catalog;
use crate::core::nav::NavModel;

const HTMX_SCRIPT: &str = r#"<script src="https://unpkg.com/htmx.org@1.9.12"></script>"#;
const HLJS_HEAD: &str = concat!(
    r#"<link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/highlight.js/11.9.0/styles/github-dark.min.css">"#,
    "\n",
    r#"<script src="https://cdnjs.cloudflare.com/ajax/libs/highlight.js/11.9.0/highlight.min.js"></script>"#,
);

/// The course outline: every unit with its lessons, deep-linked.
pub fn home(catalog: &Catalog) -> String {
    let mut outline = String::new();
    for (unit_idx, unit) in catalog.units().iter().enumerate() {
        outline.push_str(&format!(
            "<section class=\"unit\">\n<h2>{}</h2>\n<p>{}</p>\n<ol>\n",
            unit.title, unit.description
        ));
        for (lesson_idx, lesson) in unit.lessons.iter().enumerate() {
            outline.push_str(&format!(
                "<li><a href=\"/lessons/{}/{}\">{}</a></li>\n",
                unit_idx, lesson_idx, lesson.title
            ));
        }
        outline.push_str("</ol>\n</section>\n");
    }

    page(
        "Course",
        &format!(
            "<h1>Course</h1>\n<p><a class=\"start\" href=\"/lessons\">Start from the beginning</a></p>\n{}",
            outline
        ),
    )
}

/// A lesson page: chrome around the rendered body, with htmx-driven
/// Prev/Next controls targeting the body container.
pub fn lesson(body: &str, model: &NavModel, catalog: &Catalog) -> String {
    let unit_title = catalog
        .unit(model.unit)
        .map(|u| u.title.as_str())
        .unwrap_or("");

    let prev_disabled = if model.first_page { " disabled" } else { "" };
    let next_disabled = if model.last_page { " disabled" } else { "" };

    let content = format!(
        r##"<nav class="lesson-nav">
<a href="/">Home</a>
<span class="unit-title">{unit_title}</span>
</nav>
<main id="lesson-content">
{body}
</main>
<div class="pager">
<button hx-get="/lessons/prev" hx-target="#lesson-content"{prev_disabled}>&larr; Prev</button>
<button hx-get="/lessons/next" hx-target="#lesson-content"{next_disabled}>Next &rarr;</button>
</div>
<script>hljs.highlightAll();</script>"##
    );

    page(unit_title, &content)
}

fn page(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<link rel="stylesheet" href="/public/style.css">
{HLJS_HEAD}
{HTMX_SCRIPT}
</head>
<body>
{content}
</body>
</html>
"#
    )
}
