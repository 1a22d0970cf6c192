// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Frame domain model: an SVG file whose stem is the user-facing display name.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Result, bail};

/// Session-unique frame identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameId(pub u64);

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "frame-{}", self.0)
    }
}

/// A selectable frame backed by a file on disk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pub id: FrameId,
    pub path: PathBuf,
    /// File stem, possibly carrying a `[tag,...]` suffix.
    pub display_name: String,
}

impl Frame {
    pub fn new(id: FrameId, path: PathBuf) -> Self {
        let display_name = display_name_from_path(&path);
        Self {
            id,
            path,
            display_name,
        }
    }

    /// Whether this frame can be exported as an icon.
    pub fn is_exportable(&self) -> bool {
        is_svg(&self.path)
    }

    /// Name of the containing directory, used as the fallback category.
    pub fn page_name(&self) -> Option<String> {
        self.path
            .parent()
            .and_then(|dir| dir.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .filter(|name| !name.trim().is_empty())
    }
}

/// Derive the display name from a file path (its stem, lossily decoded).
pub fn display_name_from_path(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Return true when the path extension is SVG.
pub fn is_svg(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"))
}

/// Check that a display name can serve as a file stem.
///
/// Brackets and commas are allowed because they carry tags; path separators,
/// characters reserved on Windows, and control characters are not.
pub fn validate_display_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        bail!("Frame name cannot be empty.");
    }
    if name == "." || name == ".." {
        bail!("Frame name '{name}' is reserved.");
    }
    if let Some(bad) = name.chars().find(|&c| {
        matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|') || c.is_control()
    }) {
        bail!("Frame name contains an unsupported character: {bad:?}");
    }
    if name.ends_with('.') || name.ends_with(' ') {
        bail!("Frame name cannot end with a dot or space.");
    }
    Ok(())
}
