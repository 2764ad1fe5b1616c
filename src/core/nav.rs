//! # Navigation State Machine
//!
//! Everything a visitor can do to their cursor becomes a [`NavCommand`].
//! Click "next"? That's `NavCommand::Next`. Follow a deep link? That's
//! `NavCommand::Goto { .. }`.
//!
//! The `update()` function takes the session's model and a command and
//! mutates the model in place. No I/O here — the catalog comes in as a
//! shared reference and is never written to.
//!
//! ```text
//! NavModel + NavCommand  →  update()  →  NavModel'
//! ```
//!
//! Boundary commands saturate rather than wrap: `Next` at the final
//! lesson stays put with `last_page` set, `Prev` at the very first
//! lesson stays put with `first_page` set. Both flags are recomputed
//! from the position on every transition, so they can never go stale.

use crate::core::catalog::Catalog;
use std::fmt;

/// Which render target the session is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Lesson,
}

/// Closed set of navigation commands, matched exhaustively in `update()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavCommand {
    /// Jump straight to a position. The home route is `Goto` with
    /// `Page::Home` at (0, 0), which also resets the cursor.
    Goto { page: Page, unit: usize, lesson: usize },
    Next,
    Prev,
}

/// Per-request navigation failure, recorded on the model and translated
/// into a safe fallback view at the HTTP boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavError {
    /// The catalog has no lessons; nothing can be navigated.
    Unavailable,
    /// A `Goto` referenced an out-of-range unit/lesson pair.
    InvalidPosition { unit: usize, lesson: usize },
}

impl fmt::Display for NavError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavError::Unavailable => write!(f, "no lessons available"),
            NavError::InvalidPosition { unit, lesson } => {
                write!(f, "invalid position: unit {unit}, lesson {lesson}")
            }
        }
    }
}

impl std::error::Error for NavError {}

/// Per-session cursor over the shared catalog, plus boundary flags.
///
/// One of these exists per browser session, guarded by its own mutex in
/// the session registry. It holds indices into the catalog and never a
/// copy of the content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavModel {
    pub page: Page,
    pub unit: usize,
    pub lesson: usize,
    pub first_page: bool,
    pub last_page: bool,
    pub error: Option<NavError>,
}

impl NavModel {
    /// Entry state: home page, cursor parked on the first lesson.
    pub fn new() -> Self {
        Self {
            page: Page::Home,
            unit: 0,
            lesson: 0,
            first_page: true,
            last_page: false,
            error: None,
        }
    }

    pub fn position(&self) -> (usize, usize) {
        (self.unit, self.lesson)
    }
}

impl Default for NavModel {
    fn default() -> Self {
        Self::new()
    }
}

/// Apply one navigation command.
///
/// An empty catalog fails every command with [`NavError::Unavailable`]
/// and leaves the model untouched. A failed `Goto` records
/// [`NavError::InvalidPosition`] and preserves the prior position.
pub fn update(model: &mut NavModel, catalog: &Catalog, command: NavCommand) {
    if catalog.is_empty() {
        model.error = Some(NavError::Unavailable);
        return;
    }

    match command {
        NavCommand::Goto { page, unit, lesson } => {
            if catalog.lesson(unit, lesson).is_none() {
                model.error = Some(NavError::InvalidPosition { unit, lesson });
                return;
            }
            model.page = page;
            model.unit = unit;
            model.lesson = lesson;
            model.error = None;
            recompute_flags(model, catalog);
        }

        NavCommand::Next => {
            model.page = Page::Lesson;
            model.error = None;
            let at_end = catalog.last_position() == Some(model.position());
            if at_end {
                // Saturate: stay on the final lesson.
                recompute_flags(model, catalog);
                return;
            }
            let unit_len = catalog.unit(model.unit).map_or(0, |u| u.len());
            if model.lesson + 1 >= unit_len {
                model.unit += 1;
                model.lesson = 0;
            } else {
                model.lesson += 1;
            }
            recompute_flags(model, catalog);
        }

        NavCommand::Prev => {
            model.page = Page::Lesson;
            model.error = None;
            if model.unit == 0 && model.lesson == 0 {
                // Saturate: stay on the very first lesson.
                recompute_flags(model, catalog);
                return;
            }
            if model.lesson == 0 {
                model.unit -= 1;
                model.lesson = catalog.unit(model.unit).map_or(0, |u| u.len().saturating_sub(1));
            } else {
                model.lesson -= 1;
            }
            recompute_flags(model, catalog);
        }
    }
}

/// Derive both boundary flags from the current position. Called after
/// every transition so the flags always agree with the cursor.
fn recompute_flags(model: &mut NavModel, catalog: &Catalog) {
    model.first_page = model.unit == 0 && model.lesson == 0;
    model.last_page = catalog.last_position() == Some(model.position());
}
