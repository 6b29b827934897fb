//! File access for the raw history and the canonical series file.
//!
//! The canonical file is only ever replaced whole: the new content is
//! written to a temp file beside it, checked, renamed over the old one, and
//! read back once more.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use log::{debug, info};
use tempfile::NamedTempFile;

use crate::config::HISTORICAL_UPPER_BOUND;
use crate::error::{PriceError, Result};
use crate::models::Store;

/// What a source file turned out to hold.
#[derive(Debug, Clone, PartialEq)]
pub enum InputKind {
    Canonical(Store),
    RawText(Vec<String>),
}

fn read_existing(path: &Path) -> Result<String> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(text),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            Err(PriceError::MissingInput(path.to_path_buf()))
        }
        Err(e) => Err(e.into()),
    }
}

/// Read the raw quotation text as lines.
pub fn read_raw_lines(path: &Path) -> Result<Vec<String>> {
    let text = read_existing(path)?;
    Ok(text.lines().map(str::to_string).collect())
}

/// Reject a loaded store whose series break the canonical invariants.
fn check_loaded(store: Store, path: &Path) -> Result<Store> {
    match store.invariant_violation(HISTORICAL_UPPER_BOUND) {
        Some(reason) => Err(PriceError::InvalidStore {
            path: path.to_path_buf(),
            reason,
        }),
        None => Ok(store),
    }
}

/// Load a canonical store.
///
/// A file that parses but breaks the series invariants fails with
/// [`PriceError::InvalidStore`], never with a validation error: the problem
/// is in the input, not in anything this crate wrote.
pub fn load_store(path: &Path) -> Result<Store> {
    let text = read_existing(path)?;
    let store: Store = serde_json::from_str(&text)?;
    check_loaded(store, path)
}

/// Decide whether `path` holds a canonical store or raw text.
pub fn detect_input(path: &Path) -> Result<InputKind> {
    let text = read_existing(path)?;
    match serde_json::from_str::<Store>(&text) {
        Ok(store) => Ok(InputKind::Canonical(check_loaded(store, path)?)),
        Err(e) => {
            debug!("{} is not a canonical store ({}), treating as raw text", path.display(), e);
            Ok(InputKind::RawText(text.lines().map(str::to_string).collect()))
        }
    }
}

/// Parse and check canonical content.
fn validate_text(text: &str, origin: &Path) -> Result<Store> {
    let store: Store = serde_json::from_str(text).map_err(|e| {
        PriceError::Validation(format!("{} is not a canonical store: {}", origin.display(), e))
    })?;
    if let Some(reason) = store.invariant_violation(HISTORICAL_UPPER_BOUND) {
        return Err(PriceError::Validation(format!("{} has {}", origin.display(), reason)));
    }
    Ok(store)
}

/// Re-read a written file and confirm it is a valid canonical store.
pub fn validate_file(path: &Path) -> Result<Store> {
    let text = fs::read_to_string(path).map_err(|e| {
        PriceError::Validation(format!("cannot read back {}: {}", path.display(), e))
    })?;
    validate_text(&text, path)
}

/// Write `store` pretty-printed to `path`, atomically.
pub fn save_store(path: &Path, store: &Store) -> Result<()> {
    let mut text = serde_json::to_string_pretty(store)?;
    text.push('\n');
    validate_text(&text, path)?;

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(text.as_bytes())?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;

    let written = validate_file(path)?;
    if written.total_points() != store.total_points() {
        return Err(PriceError::Validation(format!(
            "{} reads back with {} points, expected {}",
            path.display(),
            written.total_points(),
            store.total_points()
        )));
    }
    info!("Wrote {} ({} points)", path.display(), store.total_points());
    Ok(())
}
