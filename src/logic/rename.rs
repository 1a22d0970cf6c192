// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Persist frame names by renaming the backing file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use crate::models::frame::validate_display_name;

/// What the user asked for when a frame name changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenameKind {
    /// Tag segment replaced, base name kept.
    Tags,
    /// Base name replaced, tags kept.
    Name,
}

impl RenameKind {
    /// Notice shown once the rename is on disk.
    pub fn success_message(&self) -> &'static str {
        match self {
            RenameKind::Tags => "Tags updated successfully!",
            RenameKind::Name => "Frame renamed successfully!",
        }
    }
}

/// Rename the file at `path` so its stem becomes `display_name`.
///
/// The extension and directory are kept. Renaming to the current name is a
/// no-op. Returns the new path.
///
/// # Errors
///
/// Fails when the source is gone, the name is not a valid file stem, or a
/// different file already uses the target name.
pub fn rename_frame_file(path: &Path, display_name: &str) -> Result<PathBuf> {
    if !path.is_file() {
        bail!("Error: Frame not found!");
    }
    validate_display_name(display_name)?;

    let mut file_name = display_name.to_string();
    if let Some(ext) = path.extension() {
        file_name.push('.');
        file_name.push_str(&ext.to_string_lossy());
    }
    let target = path.with_file_name(file_name);

    if target == path {
        return Ok(target);
    }
    if target.exists() && !is_case_only_alias(path, &target)? {
        bail!("A frame named '{}' already exists.", display_name);
    }

    fs::rename(path, &target)
        .with_context(|| format!("Failed to rename {:?} to {:?}", path, target))?;
    log::info!("renamed {} -> {}", path.display(), target.display());
    Ok(target)
}

/// True when `target` only "exists" because the filesystem folds case and
/// it names the same file as `path`.
///
/// A directory entry spelled exactly like `target` is a different file.
fn is_case_only_alias(path: &Path, target: &Path) -> Result<bool> {
    let (Some(source_name), Some(target_name)) = (path.file_name(), target.file_name()) else {
        return Ok(false);
    };
    if !source_name
        .to_string_lossy()
        .eq_ignore_ascii_case(&target_name.to_string_lossy())
    {
        return Ok(false);
    }

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    for entry in fs::read_dir(dir).with_context(|| format!("Failed to read {:?}", dir))? {
        let entry = entry.with_context(|| format!("Failed to read {:?}", dir))?;
        if entry.file_name() == target_name {
            return Ok(false);
        }
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn rename_frame_file_keeps_directory_and_extension() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("Arrow [nav].svg");
        fs::write(&path, "<svg/>").unwrap();

        let renamed = rename_frame_file(&path, "Arrow Left[nav]").unwrap();

        assert_eq!(renamed, tmp.path().join("Arrow Left[nav].svg"));
        assert!(renamed.exists());
        assert!(!path.exists());
    }

    #[test]
    fn rename_frame_file_reports_missing_source() {
        let tmp = TempDir::new().unwrap();

        let err = rename_frame_file(&tmp.path().join("gone.svg"), "New").unwrap_err();

        assert_eq!(err.to_string(), "Error: Frame not found!");
    }

    #[test]
    fn rename_frame_file_refuses_to_overwrite() {
        let tmp = TempDir::new().unwrap();
        let a = tmp.path().join("a.svg");
        let b = tmp.path().join("b.svg");
        fs::write(&a, "a").unwrap();
        fs::write(&b, "b").unwrap();

        assert!(rename_frame_file(&a, "b").is_err());
        assert_eq!(fs::read_to_string(&b).unwrap(), "b");
    }

    #[test]
    fn rename_frame_file_rejects_invalid_names() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("a.svg");
        fs::write(&path, "a").unwrap();

        assert!(rename_frame_file(&path, "../escape").is_err());
        assert!(path.exists());
    }

    #[test]
    fn rename_refuses_to_replace_file_differing_only_in_case() {
        let tmp = TempDir::new().unwrap();
        let upper = tmp.path().join("Home.svg");
        let lower = tmp.path().join("home.svg");
        fs::write(&upper, "UPPER").unwrap();
        fs::write(&lower, "LOWER").unwrap();
        if fs::read_dir(tmp.path()).unwrap().count() < 2 {
            // Case-insensitive filesystem: both names are one file.
            return;
        }

        let err = rename_frame_file(&upper, "home").unwrap_err();

        assert!(err.to_string().contains("already exists"));
        assert_eq!(fs::read_to_string(&lower).unwrap(), "LOWER");
        assert_eq!(fs::read_to_string(&upper).unwrap(), "UPPER");
    }

    #[test]
    fn case_only_rename_succeeds() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("Home.svg");
        fs::write(&path, "icon").unwrap();

        let renamed = rename_frame_file(&path, "home").unwrap();

        assert_eq!(renamed, tmp.path().join("home.svg"));
        assert_eq!(fs::read_to_string(&renamed).unwrap(), "icon");
        let names: Vec<_> = fs::read_dir(tmp.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("home.svg")]);
    }

    #[test]
    fn rename_to_same_name_is_noop() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("same.svg");
        fs::write(&path, "a").unwrap();

        assert_eq!(rename_frame_file(&path, "same").unwrap(), path);
    }
}
