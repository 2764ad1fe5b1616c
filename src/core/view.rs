//! # View Selector
//!
//! Pure mapping from a session's [`NavModel`] to what should be
//! rendered: a template name plus, for lessons, the rendered HTML body.
//! The HTTP adapter wraps the result in page chrome (full-page request)
//! or returns the payload as-is (fragment request).
//!
//! Anything unrenderable — a recorded navigation error, an empty
//! catalog, a cursor that somehow points outside the catalog — falls
//! back to the home view. Selection never panics on bad state.

use crate::core::catalog::Catalog;
use crate::core::nav::{NavModel, Page};
use crate::render;

/// Client-side post-processing hook appended to lesson fragments, so
/// htmx swaps re-trigger highlight.js on the new content.
pub const HIGHLIGHT_TRIGGER: &str = "<script>hljs.highlightAll();</script>";

/// Render target named by the selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    Home,
    Lesson,
}

/// What the external renderer is asked to produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub template: Template,
    /// Rendered lesson HTML; `None` for the home view.
    pub payload: Option<String>,
}

impl View {
    fn home() -> Self {
        View { template: Template::Home, payload: None }
    }
}

/// Map the model's current state to a render target.
///
/// `fragment` is the request-shape hint: fragment requests get the bare
/// lesson body plus the highlight trigger, full-page requests get the
/// body alone for embedding in chrome.
pub fn select(model: &NavModel, catalog: &Catalog, fragment: bool) -> View {
    if model.error.is_some() || catalog.is_empty() {
        return View::home();
    }

    match model.page {
        Page::Home => View::home(),
        Page::Lesson => {
            let Some(lesson) = catalog.lesson(model.unit, model.lesson) else {
                return View::home();
            };
            let mut payload = render::markdown_to_html(&lesson.body);
            if fragment {
                payload.push_str(HIGHLIGHT_TRIGGER);
            }
            View {
                template: Template::Lesson,
                payload: Some(payload),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::nav::{NavError, NavModel, Page};
    use crate::test_support::{empty_catalog, sample_catalog};

    fn lesson_model(unit: usize, lesson: usize) -> NavModel {
        NavModel {
            page: Page::Lesson,
            unit,
            lesson,
            first_page: false,
            last_page: false,
            error: None,
        }
    }

    #[test]
    fn test_home_state_selects_home() {
        let view = select(&NavModel::new(), &sample_catalog(), false);
        assert_eq!(view.template, Template::Home);
        assert!(view.payload.is_none());
    }

    #[test]
    fn test_lesson_full_page_has_body_without_trigger() {
        let view = select(&lesson_model(0, 0), &sample_catalog(), false);
        assert_eq!(view.template, Template::Lesson);
        let payload = view.payload.unwrap();
        assert!(payload.contains("L1"));
        assert!(!payload.contains(HIGHLIGHT_TRIGGER));
    }

    #[test]
    fn test_lesson_fragment_appends_highlight_trigger() {
        let view = select(&lesson_model(1, 0), &sample_catalog(), true);
        assert_eq!(view.template, Template::Lesson);
        let payload = view.payload.unwrap();
        assert!(payload.contains("L3"));
        assert!(payload.ends_with(HIGHLIGHT_TRIGGER));
    }

    #[test]
    fn test_error_state_falls_back_to_home() {
        let mut model = lesson_model(0, 0);
        model.error = Some(NavError::InvalidPosition { unit: 9, lesson: 0 });
        let view = select(&model, &sample_catalog(), true);
        assert_eq!(view.template, Template::Home);
    }

    #[test]
    fn test_empty_catalog_falls_back_to_home() {
        let view = select(&lesson_model(0, 0), &empty_catalog(), false);
        assert_eq!(view.template, Template::Home);
    }

    #[test]
    fn test_out_of_bounds_cursor_falls_back_to_home() {
        let view = select(&lesson_model(7, 7), &sample_catalog(), false);
        assert_eq!(view.template, Template::Home);
    }
}
