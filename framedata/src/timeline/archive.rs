//! Directory-backed archive and weapon entry lookup

use std::path::{Component, Path, PathBuf};

use super::ArchiveReader;
use crate::error::LookupError;

/// Extension shared by every timeline entry.
const TIMELINE_EXTENSION: &str = "tae";

/// Maximum edit distance for a "did you mean" suggestion.
const SUGGESTION_DISTANCE: usize = 3;

/// An archive whose entries are the files below a root directory.
///
/// Entry names are root-relative, `/`-separated, and listed in sorted order
/// so repeated runs see the same sequence.
#[derive(Debug, Clone)]
pub struct DirectoryArchive {
    root: PathBuf,
}

impl DirectoryArchive {
    /// Opens an archive rooted at `root`.
    ///
    /// # Errors
    ///
    /// Returns an error if `root` is not a directory.
    pub fn open(root: impl Into<PathBuf>) -> std::io::Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("archive directory not found: {}", root.display()),
            ));
        }
        Ok(Self { root })
    }

    /// Root directory of the archive.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn entry_path(&self, name: &str) -> std::io::Result<PathBuf> {
        let relative = Path::new(name);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)));
        if escapes {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid archive entry name: {name}"),
            ));
        }
        Ok(self.root.join(relative))
    }
}

impl ArchiveReader for DirectoryArchive {
    fn entry_names(&self) -> std::io::Result<Vec<String>> {
        let root = self.root.to_str().ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("archive path is not valid UTF-8: {}", self.root.display()),
            )
        })?;
        let pattern = format!("{}/**/*", glob::Pattern::escape(root));

        let paths = glob::glob(&pattern)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()))?;

        let mut names = Vec::new();
        for path in paths {
            let path = path.map_err(std::io::Error::from)?;
            if !path.is_file() {
                continue;
            }
            let Ok(relative) = path.strip_prefix(&self.root) else {
                continue;
            };
            let name = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            names.push(name);
        }

        names.sort();
        Ok(names)
    }

    fn read_entry(&self, name: &str) -> std::io::Result<Vec<u8>> {
        std::fs::read(self.entry_path(name)?)
    }
}

/// File name of the timeline entry for a weapon id.
#[must_use]
pub fn timeline_entry_name(weapon_id: &str) -> String {
    format!("a{weapon_id}.{TIMELINE_EXTENSION}")
}

/// Finds the single timeline entry for `weapon_id` among `names`.
///
/// Only entries ending in `tae` are candidates; a candidate matches when its
/// final path segment is exactly `a{weapon_id}.tae`.
///
/// # Errors
///
/// Returns [`LookupError::NotFound`] when nothing matches and
/// [`LookupError::Ambiguous`] when more than one entry does.
pub fn locate_timeline_entry(names: &[String], weapon_id: &str) -> Result<String, LookupError> {
    let wanted = timeline_entry_name(weapon_id);

    let timeline_entries = || {
        names
            .iter()
            .filter(|name| name.ends_with(TIMELINE_EXTENSION))
    };

    let mut candidates: Vec<&String> = timeline_entries()
        .filter(|name| file_name(name) == wanted)
        .collect();

    match candidates.len() {
        1 => Ok(candidates.remove(0).clone()),
        0 => Err(LookupError::NotFound {
            weapon_id: weapon_id.to_string(),
            suggestion: timeline_entries()
                .map(|name| file_name(name))
                .map(|name| (name, strsim::damerau_levenshtein(&wanted, name)))
                .filter(|(_, dist)| *dist <= SUGGESTION_DISTANCE)
                .min_by_key(|(_, dist)| *dist)
                .map(|(name, _)| name.to_string()),
            entry: wanted,
        }),
        _ => Err(LookupError::Ambiguous {
            weapon_id: weapon_id.to_string(),
            candidates: candidates.into_iter().cloned().collect(),
        }),
    }
}

fn file_name(entry: &str) -> &str {
    entry.rsplit('/').next().unwrap_or(entry)
}
