//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::path::PathBuf;

use crate::core::catalog::{Catalog, Lesson, Unit};

fn lesson(title: &str, body: &str) -> Lesson {
    Lesson {
        title: title.to_string(),
        body: body.to_string(),
        path: PathBuf::from(format!("{}.md", title.to_lowercase())),
    }
}

/// The two-unit fixture used throughout: Intro ["L1", "L2"],
/// Advanced ["L3"].
pub fn sample_catalog() -> Catalog {
    Catalog::from_units(vec![
        Unit {
            title: "Intro".to_string(),
            description: "Start here".to_string(),
            lessons: vec![
                lesson("L1", "L1\n\nFirst lesson body."),
                lesson("L2", "L2\n\nSecond lesson body."),
            ],
            order: None,
        },
        Unit {
            title: "Advanced".to_string(),
            description: "Go deeper".to_string(),
            lessons: vec![lesson("L3", "L3\n\n```rust\nfn main() {}\n```")],
            order: None,
        },
    ])
}

/// A catalog with nothing to navigate.
pub fn empty_catalog() -> Catalog {
    Catalog::from_units(vec![])
}

/// One unit, one lesson: the position that is both first and last.
pub fn single_lesson_catalog() -> Catalog {
    Catalog::from_units(vec![Unit {
        title: "Only".to_string(),
        description: "One lesson".to_string(),
        lessons: vec![lesson("Solo", "Solo\n\nThe only lesson.")],
        order: None,
    }])
}
