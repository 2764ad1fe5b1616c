//! # Lesson Catalog
//!
//! Loads the course content from a directory tree and holds it as an
//! immutable catalog shared by every session:
//!
//! ```text
//! lessons/
//! ├── 01-intro/
//! │   ├── info.json        // unit manifest: name, description, index
//! │   ├── 01-welcome.md
//! │   └── 02-setup.md
//! └── 02-advanced/
//!     ├── info.json
//!     └── 01-deep-dive.md
//! ```
//!
//! The loader is tolerant of partial corruption: a unit with a broken
//! manifest or an empty lesson file is skipped with a warning, not a
//! fatal error. Only zero usable units (or an unreadable base dir) abort
//! startup.
//!
//! Per-session cursors never live here. The catalog is read-only after
//! load; navigation state is held in `NavModel`, one per session.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::Deserialize;

/// One markdown-sourced content item.
///
/// The body is kept as raw markdown; HTML is derived on demand by
/// `render::markdown_to_html`, so a render is always reproducible from
/// source.
#[derive(Debug, Clone)]
pub struct Lesson {
    /// First line of the source file, verbatim (no markdown stripping).
    pub title: String,
    /// Full raw markdown source.
    pub body: String,
    /// Where the source was read from.
    pub path: PathBuf,
}

/// A named group of ordered lessons.
#[derive(Debug, Clone)]
pub struct Unit {
    pub title: String,
    pub description: String,
    /// Lessons in filename order.
    pub lessons: Vec<Lesson>,
    /// Ordering override from the manifest's optional `index` field.
    pub order: Option<i64>,
}

impl Unit {
    pub fn len(&self) -> usize {
        self.lessons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lessons.is_empty()
    }
}

/// The full immutable set of units, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Catalog {
    units: Vec<Unit>,
}

/// Unit manifest (`info.json`). Unknown fields are rejected so that a
/// stray lesson list or typo'd key is caught at load time instead of
/// silently ignored.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Manifest {
    name: String,
    description: String,
    #[serde(default)]
    index: Option<i64>,
}

/// Fatal load failure — the server refuses to start without content.
#[derive(Debug)]
pub enum LoadError {
    Io { path: PathBuf, source: io::Error },
    NoUnits { path: PathBuf },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io { path, source } => {
                write!(f, "cannot read lessons directory {}: {}", path.display(), source)
            }
            LoadError::NoUnits { path } => {
                write!(f, "no usable units found in {}", path.display())
            }
        }
    }
}

impl std::error::Error for LoadError {}

/// Non-fatal, per-unit load failure. Logged and skipped.
#[derive(Debug)]
pub enum UnitError {
    Io { path: PathBuf, source: io::Error },
    Manifest { path: PathBuf, source: serde_json::Error },
    EmptyLesson { path: PathBuf },
    NoLessons,
}

impl fmt::Display for UnitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitError::Io { path, source } => {
                write!(f, "cannot read {}: {}", path.display(), source)
            }
            UnitError::Manifest { path, source } => {
                write!(f, "malformed manifest {}: {}", path.display(), source)
            }
            UnitError::EmptyLesson { path } => {
                write!(f, "empty lesson file {} (no title line)", path.display())
            }
            UnitError::NoLessons => write!(f, "unit contains no markdown lessons"),
        }
    }
}

impl std::error::Error for UnitError {}

impl Catalog {
    /// Scan `base` and build the catalog.
    ///
    /// Immediate subdirectories become candidate units, visited in
    /// filename order. Units that fail to load are skipped with a
    /// warning. Fails only if the base directory is unreadable or no
    /// unit survives.
    pub fn load(base: &Path) -> Result<Catalog, LoadError> {
        let entries = fs::read_dir(base).map_err(|source| LoadError::Io {
            path: base.to_path_buf(),
            source,
        })?;

        let mut unit_dirs: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_dir())
            .collect();
        unit_dirs.sort();

        let mut units = Vec::new();
        for dir in &unit_dirs {
            match load_unit(dir) {
                Ok(unit) => {
                    debug!("Added unit '{}' with {} lessons", unit.title, unit.len());
                    units.push(unit);
                }
                Err(e) => warn!("Skipping unit {}: {}", dir.display(), e),
            }
        }

        if units.is_empty() {
            return Err(LoadError::NoUnits {
                path: base.to_path_buf(),
            });
        }

        // Scan order is the baseline key; a manifest `index` overrides
        // it. Scan position is the tiebreaker, so the order stays
        // deterministic when indexes collide or are absent.
        let mut keyed: Vec<(usize, Unit)> = units.into_iter().enumerate().collect();
        keyed.sort_by_key(|(pos, unit)| (unit.order.unwrap_or(*pos as i64), *pos));
        let units = keyed.into_iter().map(|(_, unit)| unit).collect();

        Ok(Catalog { units })
    }

    /// Build a catalog directly from units (in-memory fixtures, mostly).
    pub fn from_units(units: Vec<Unit>) -> Catalog {
        Catalog { units }
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn unit(&self, index: usize) -> Option<&Unit> {
        self.units.get(index)
    }

    pub fn lesson(&self, unit: usize, lesson: usize) -> Option<&Lesson> {
        self.units.get(unit)?.lessons.get(lesson)
    }

    pub fn total_lessons(&self) -> usize {
        self.units.iter().map(Unit::len).sum()
    }

    /// True when there is nothing to navigate to.
    pub fn is_empty(&self) -> bool {
        self.total_lessons() == 0
    }

    /// `(unit, lesson)` of the final lesson, or `None` for an empty catalog.
    pub fn last_position(&self) -> Option<(usize, usize)> {
        let (unit_idx, unit) = self
            .units
            .iter()
            .enumerate()
            .rev()
            .find(|(_, u)| !u.is_empty())?;
        Some((unit_idx, unit.len() - 1))
    }
}

/// Load a single unit directory: manifest plus every `*.md` file in
/// filename order.
fn load_unit(dir: &Path) -> Result<Unit, UnitError> {
    let manifest_path = dir.join("info.json");
    let raw = fs::read_to_string(&manifest_path).map_err(|source| UnitError::Io {
        path: manifest_path.clone(),
        source,
    })?;
    let manifest = parse_manifest(&raw).map_err(|source| UnitError::Manifest {
        path: manifest_path,
        source,
    })?;

    let entries = fs::read_dir(dir).map_err(|source| UnitError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    let mut lesson_paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "md"))
        .collect();
    lesson_paths.sort();

    let mut lessons = Vec::new();
    for path in lesson_paths {
        let body = fs::read_to_string(&path).map_err(|source| UnitError::Io {
            path: path.clone(),
            source,
        })?;
        let title = match body.lines().next() {
            Some(line) => line.to_string(),
            None => return Err(UnitError::EmptyLesson { path }),
        };
        lessons.push(Lesson { title, body, path });
    }

    if lessons.is_empty() {
        return Err(UnitError::NoLessons);
    }

    Ok(Unit {
        title: manifest.name,
        description: manifest.description,
        lessons,
        order: manifest.index,
    })
}

/// Decode a manifest under the tolerant grammar.
///
/// Manifests are hand-authored, so two departures from strict JSON are
/// accepted (and nothing else):
///
/// - a single trailing comma before the closing brace, and
/// - a missing final `}`.
///
/// Surrounding whitespace is ignored. The normalized text must then
/// decode as a strict [`Manifest`].
fn parse_manifest(raw: &str) -> Result<Manifest, serde_json::Error> {
    serde_json::from_str(&normalize_manifest(raw))
}

fn normalize_manifest(raw: &str) -> String {
    let mut text = raw.trim().trim_end_matches(',').trim_end().to_string();
    if !text.ends_with('}') {
        text.push('}');
    }
    // A trailing comma left just before the brace: `{"name": "x",}`
    if let Some(body) = text.strip_suffix('}') {
        let body = body.trim_end();
        if let Some(stripped) = body.strip_suffix(',') {
            text = format!("{}}}", stripped.trim_end());
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_unit(base: &Path, dir: &str, manifest: &str, lessons: &[(&str, &str)]) {
        let unit_dir = base.join(dir);
        fs::create_dir_all(&unit_dir).unwrap();
        fs::write(unit_dir.join("info.json"), manifest).unwrap();
        for (name, body) in lessons {
            fs::write(unit_dir.join(name), body).unwrap();
        }
    }

    #[test]
    fn test_load_two_units_in_scan_order() {
        let tmp = TempDir::new().unwrap();
        write_unit(
            tmp.path(),
            "01-intro",
            r#"{"name": "Intro", "description": "Start here"}"#,
            &[("01-a.md", "L1\nbody"), ("02-b.md", "L2\nbody")],
        );
        write_unit(
            tmp.path(),
            "02-advanced",
            r#"{"name": "Advanced", "description": "Go deeper"}"#,
            &[("01-c.md", "L3\nbody")],
        );

        let catalog = Catalog::load(tmp.path()).unwrap();
        assert_eq!(catalog.units().len(), 2);
        assert_eq!(catalog.units()[0].title, "Intro");
        assert_eq!(catalog.units()[1].title, "Advanced");
        assert_eq!(catalog.total_lessons(), 3);
        assert_eq!(catalog.units()[0].lessons[0].title, "L1");
        assert_eq!(catalog.last_position(), Some((1, 0)));
    }

    #[test]
    fn test_malformed_manifest_skips_unit_only() {
        let tmp = TempDir::new().unwrap();
        write_unit(
            tmp.path(),
            "01-good",
            r#"{"name": "Good", "description": "ok"}"#,
            &[("01-a.md", "L1\nbody"), ("02-b.md", "L2\nbody")],
        );
        write_unit(
            tmp.path(),
            "02-bad",
            r#"{"name": "Bad", "descr"#,
            &[("01-c.md", "L3\nbody")],
        );

        let catalog = Catalog::load(tmp.path()).unwrap();
        assert_eq!(catalog.units().len(), 1);
        assert_eq!(catalog.units()[0].title, "Good");
    }

    #[test]
    fn test_missing_manifest_skips_unit() {
        let tmp = TempDir::new().unwrap();
        write_unit(
            tmp.path(),
            "01-good",
            r#"{"name": "Good", "description": "ok"}"#,
            &[("01-a.md", "L1\nbody")],
        );
        let orphan = tmp.path().join("02-orphan");
        fs::create_dir_all(&orphan).unwrap();
        fs::write(orphan.join("01-c.md"), "L3\nbody").unwrap();

        let catalog = Catalog::load(tmp.path()).unwrap();
        assert_eq!(catalog.units().len(), 1);
    }

    #[test]
    fn test_empty_lesson_file_skips_unit() {
        let tmp = TempDir::new().unwrap();
        write_unit(
            tmp.path(),
            "01-good",
            r#"{"name": "Good", "description": "ok"}"#,
            &[("01-a.md", "L1\nbody")],
        );
        write_unit(
            tmp.path(),
            "02-hollow",
            r#"{"name": "Hollow", "description": "one lesson is empty"}"#,
            &[("01-c.md", "")],
        );

        let catalog = Catalog::load(tmp.path()).unwrap();
        assert_eq!(catalog.units().len(), 1);
        assert_eq!(catalog.units()[0].title, "Good");
    }

    #[test]
    fn test_zero_units_is_fatal() {
        let tmp = TempDir::new().unwrap();
        match Catalog::load(tmp.path()) {
            Err(LoadError::NoUnits { .. }) => {}
            other => panic!("expected NoUnits, got {:?}", other),
        }
    }

    #[test]
    fn test_unreadable_base_dir_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("does-not-exist");
        match Catalog::load(&missing) {
            Err(LoadError::Io { .. }) => {}
            other => panic!("expected Io error, got {:?}", other),
        }
    }

    #[test]
    fn test_manifest_index_overrides_scan_order() {
        let tmp = TempDir::new().unwrap();
        write_unit(
            tmp.path(),
            "01-second",
            r#"{"name": "Second", "description": "d", "index": 2}"#,
            &[("01-a.md", "A\nbody")],
        );
        write_unit(
            tmp.path(),
            "02-first",
            r#"{"name": "First", "description": "d", "index": 1}"#,
            &[("01-b.md", "B\nbody")],
        );

        let catalog = Catalog::load(tmp.path()).unwrap();
        assert_eq!(catalog.units()[0].title, "First");
        assert_eq!(catalog.units()[1].title, "Second");
    }

    #[test]
    fn test_non_markdown_files_ignored() {
        let tmp = TempDir::new().unwrap();
        write_unit(
            tmp.path(),
            "01-intro",
            r#"{"name": "Intro", "description": "d"}"#,
            &[("01-a.md", "L1\nbody")],
        );
        fs::write(tmp.path().join("01-intro").join("notes.txt"), "scratch").unwrap();

        let catalog = Catalog::load(tmp.path()).unwrap();
        assert_eq!(catalog.units()[0].len(), 1);
    }

    #[test]
    fn test_title_is_first_line_verbatim() {
        let tmp = TempDir::new().unwrap();
        write_unit(
            tmp.path(),
            "01-intro",
            r#"{"name": "Intro", "description": "d"}"#,
            &[("01-a.md", "# Welcome to the course\n\nHello.")],
        );

        let catalog = Catalog::load(tmp.path()).unwrap();
        // No markdown stripping: the `#` stays.
        assert_eq!(catalog.units()[0].lessons[0].title, "# Welcome to the course");
    }

    #[test]
    fn test_normalize_accepts_trailing_comma_and_missing_brace() {
        let m = parse_manifest("{\"name\": \"A\", \"description\": \"d\",").unwrap();
        assert_eq!(m.name, "A");

        let m = parse_manifest("{\"name\": \"B\", \"description\": \"d\",}").unwrap();
        assert_eq!(m.name, "B");

        let m = parse_manifest("  {\"name\": \"C\", \"description\": \"d\"}  \n").unwrap();
        assert_eq!(m.name, "C");
    }

    #[test]
    fn test_manifest_rejects_unknown_fields() {
        let err = parse_manifest(r#"{"name": "A", "description": "d", "lessons": []}"#);
        assert!(err.is_err());
    }

    #[test]
    fn test_manifest_requires_all_fields() {
        assert!(parse_manifest(r#"{"name": "A"}"#).is_err());
    }
}
