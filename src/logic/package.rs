// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Business logic for packaging exported icons into a zip download.
//!
//! Layout of the archive:
//! - `<root>/<slug>.svg` with the exported SVG text,
//! - `<root>/<slug>.json` with the icon metadata alongside it,
//! - `<root>/icons.json` manifest listing every icon (optional).

use std::collections::HashSet;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};
use zip::{CompressionMethod, write::FileOptions};

use crate::models::icon::ExportResult;
use crate::utils::{hash_bytes, sanitize_component};

/// Manifest filename inside the archive root.
pub const MANIFEST_NAME: &str = "icons.json";

/// Packaging switches chosen by the user or configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PackageOptions {
    pub include_manifest: bool,
}

impl Default for PackageOptions {
    fn default() -> Self {
        Self {
            include_manifest: true,
        }
    }
}

/// Suggest a safe archive filename from the current category.
///
/// Falls back to `icons.zip` when the category is blank.
pub fn suggested_package_name(category: &str) -> String {
    let base = sanitize_component(category).to_ascii_lowercase();
    format!("{base}.zip")
}

/// Force a specific extension onto a path when it is missing or different.
///
/// Keeps existing matching extension (case-insensitive); otherwise replaces it.
pub fn ensure_extension(mut path: PathBuf, extension: &str) -> PathBuf {
    let replace = !matches!(
        path.extension().and_then(|e| e.to_str()),
        Some(ext) if ext.eq_ignore_ascii_case(extension)
    );

    if replace {
        path.set_extension(extension);
    }
    path
}

/// Ensure no two entries would land on the same archive path.
///
/// With the manifest enabled, an icon whose sidecar would be named
/// [`MANIFEST_NAME`] is rejected as well.
pub fn assert_unique_filenames(results: &[ExportResult], options: PackageOptions) -> Result<()> {
    let mut seen = HashSet::new();
    for result in results {
        let key = result.metadata.filename.to_lowercase();
        if !seen.insert(key) {
            return Err(anyhow!(
                "Duplicate icon filename in package: {}. Rename one of the frames first.",
                result.metadata.filename
            ));
        }

        let sidecar = sidecar_name(result);
        if options.include_manifest && sidecar.eq_ignore_ascii_case(MANIFEST_NAME) {
            bail!(
                "Icon {} would replace the package manifest {MANIFEST_NAME}. \
                 Rename the frame or turn off the manifest.",
                result.metadata.filename
            );
        }
    }
    Ok(())
}

fn sidecar_name(result: &ExportResult) -> String {
    format!("{}.json", result.metadata.slug())
}

/// Write every export result and its metadata into a zip at `output`.
///
/// Parent directories for `output` are created if missing. The archive is
/// written next to `output` under a temporary name and moved into place only
/// once complete, so a failed run leaves any existing file untouched. Nothing
/// is written when the result list is empty or archive paths collide.
pub fn build_and_write_package(
    output: &Path,
    results: &[ExportResult],
    options: PackageOptions,
    generated_at: OffsetDateTime,
) -> Result<()> {
    if results.is_empty() {
        bail!("No exported icons to download. Export frames first.");
    }
    assert_unique_filenames(results, options)?;

    if let Some(parent) = output.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory {:?}", parent))?;
    }

    let root_folder = sanitize_component(
        output
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("icons"),
    );

    let temp_path = output.with_extension("zip.tmp");
    let written = File::create(&temp_path)
        .with_context(|| format!("Failed to write package file {:?}", temp_path))
        .and_then(|file| write_archive(file, &root_folder, results, options, generated_at));
    if let Err(err) = written {
        if let Err(cleanup) = fs::remove_file(&temp_path) {
            log::debug!("could not remove {}: {cleanup}", temp_path.display());
        }
        return Err(err);
    }

    fs::rename(&temp_path, output)
        .with_context(|| format!("Failed to move package into place at {:?}", output))?;
    log::info!("wrote {} icon(s) to {}", results.len(), output.display());
    Ok(())
}

fn write_archive(
    file: File,
    root_folder: &str,
    results: &[ExportResult],
    options: PackageOptions,
    generated_at: OffsetDateTime,
) -> Result<()> {
    let root_prefix = format!("{root_folder}/");
    let mut zip = zip::ZipWriter::new(file);
    let options_deflate: FileOptions<'_, ()> =
        FileOptions::default().compression_method(CompressionMethod::Deflated);

    zip.add_directory(root_prefix.as_str(), options_deflate)
        .context("Failed to create root directory in package")?;

    let mut manifest_icons = Vec::with_capacity(results.len());
    for result in results {
        let meta = &result.metadata;
        let svg_path = format!("{root_prefix}{}", meta.filename);
        let json_path = format!("{root_prefix}{}", sidecar_name(result));

        zip.start_file(svg_path.as_str(), options_deflate)
            .with_context(|| format!("Failed to add file {svg_path} to package"))?;
        zip.write_all(result.svg.as_bytes())
            .with_context(|| format!("Failed to write {svg_path} into package"))?;

        zip.start_file(json_path.as_str(), options_deflate)
            .with_context(|| format!("Failed to add file {json_path} to package"))?;
        let meta_bytes = serde_json::to_vec_pretty(meta)?;
        zip.write_all(&meta_bytes)
            .with_context(|| format!("Failed to write {json_path} into package"))?;

        let mut entry = serde_json::to_value(meta)?;
        entry["sha256"] = serde_json::Value::String(hash_bytes(result.svg.as_bytes()));
        manifest_icons.push(entry);
    }

    if options.include_manifest {
        let timestamp = generated_at
            .format(&Rfc3339)
            .map_err(|err| anyhow!("Failed to format manifest timestamp: {}", err))?;
        let manifest = serde_json::json!({
            "generatedAt": timestamp,
            "count": manifest_icons.len(),
            "icons": manifest_icons,
        });

        zip.start_file(format!("{root_prefix}{MANIFEST_NAME}"), options_deflate)
            .context("Failed to create manifest file")?;
        zip.write_all(&serde_json::to_vec_pretty(&manifest)?)
            .context("Failed to write manifest file")?;
    }

    zip.finish().context("Failed to finalize package")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs::{self, File};
    use std::io::Read;
    use std::path::PathBuf;

    use serde_json::Value;
    use tempfile::TempDir;
    use time::OffsetDateTime;
    use zip::ZipArchive;

    use super::*;
    use crate::models::frame::FrameId;
    use crate::models::icon::IconMetadata;

    fn result(id: u64, name: &str) -> ExportResult {
        ExportResult {
            frame_id: FrameId(id),
            svg: format!("<svg id=\"{id}\"/>"),
            metadata: IconMetadata::from_display_name(name, "Common", 24.0, 24.0),
        }
    }

    fn read_entry(archive: &mut ZipArchive<File>, name: &str) -> String {
        let mut entry = archive.by_name(name).unwrap();
        let mut buf = String::new();
        entry.read_to_string(&mut buf).unwrap();
        buf
    }

    #[test]
    fn suggested_package_name_sanitizes_and_lowercases() {
        assert_eq!(suggested_package_name("Ångström Icons"), "angstrom_icons.zip");
        assert_eq!(suggested_package_name("  "), "icons.zip");
    }

    #[test]
    fn ensure_extension_preserves_matching_extension_case_insensitive() {
        let path = PathBuf::from("/tmp/pack.ZIP");
        assert_eq!(ensure_extension(path.clone(), "zip"), path);
    }

    #[test]
    fn ensure_extension_replaces_when_different() {
        let result = ensure_extension(PathBuf::from("pack.txt"), "zip");
        assert_eq!(result.extension().and_then(|e| e.to_str()), Some("zip"));
    }

    #[test]
    fn build_and_write_package_writes_svg_json_and_manifest() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("nested").join("my icons.zip");
        let results = vec![result(1, "Arrow Left [nav, ui]"), result(2, "Home")];

        build_and_write_package(
            &out,
            &results,
            PackageOptions::default(),
            OffsetDateTime::from_unix_timestamp(0).unwrap(),
        )
        .unwrap();

        let mut archive = ZipArchive::new(File::open(&out).unwrap()).unwrap();
        assert_eq!(read_entry(&mut archive, "my_icons/arrow-left.svg"), "<svg id=\"1\"/>");

        let meta: Value =
            serde_json::from_str(&read_entry(&mut archive, "my_icons/arrow-left.json")).unwrap();
        assert_eq!(meta["name"], "ArrowLeft");
        assert_eq!(meta["tags"], serde_json::json!(["nav", "ui"]));

        let manifest: Value =
            serde_json::from_str(&read_entry(&mut archive, "my_icons/icons.json")).unwrap();
        assert_eq!(manifest["count"], 2);
        assert_eq!(manifest["generatedAt"], "1970-01-01T00:00:00Z");
        assert_eq!(manifest["icons"][1]["filename"], "home.svg");
        assert_eq!(
            manifest["icons"][1]["sha256"],
            hash_bytes(b"<svg id=\"2\"/>").as_str()
        );
    }

    #[test]
    fn build_and_write_package_can_skip_manifest() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("icons.zip");

        build_and_write_package(
            &out,
            &[result(1, "Home")],
            PackageOptions {
                include_manifest: false,
            },
            OffsetDateTime::from_unix_timestamp(0).unwrap(),
        )
        .unwrap();

        let mut archive = ZipArchive::new(File::open(&out).unwrap()).unwrap();
        assert!(archive.by_name("icons/icons.json").is_err());
        assert!(archive.by_name("icons/home.svg").is_ok());
    }

    #[test]
    fn build_and_write_package_rejects_duplicate_filenames() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("dup.zip");
        let results = vec![result(1, "Home [a]"), result(2, "home")];

        let err = build_and_write_package(
            &out,
            &results,
            PackageOptions::default(),
            OffsetDateTime::from_unix_timestamp(0).unwrap(),
        )
        .unwrap_err();

        assert!(err.to_string().contains("Duplicate icon filename"));
        assert!(!out.exists(), "nothing should be written on rejection");
    }

    #[test]
    fn icon_named_like_manifest_is_rejected_before_writing() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("pack.zip");
        let results = vec![result(1, "Icons [ui]")];

        let err = build_and_write_package(
            &out,
            &results,
            PackageOptions::default(),
            OffsetDateTime::from_unix_timestamp(0).unwrap(),
        )
        .unwrap_err();

        assert!(err.to_string().contains("package manifest icons.json"));
        assert!(!out.exists());
        assert!(!out.with_extension("zip.tmp").exists());
    }

    #[test]
    fn icon_named_like_manifest_is_fine_without_manifest() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("pack.zip");

        build_and_write_package(
            &out,
            &[result(1, "Icons [ui]")],
            PackageOptions {
                include_manifest: false,
            },
            OffsetDateTime::from_unix_timestamp(0).unwrap(),
        )
        .unwrap();

        let mut archive = ZipArchive::new(File::open(&out).unwrap()).unwrap();
        let meta: Value =
            serde_json::from_str(&read_entry(&mut archive, "pack/icons.json")).unwrap();
        assert_eq!(meta["name"], "Icons");
    }

    #[test]
    fn failed_write_keeps_existing_package() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("pack.zip");
        fs::write(&out, "previous package").unwrap();
        // A directory at the temporary path makes creating the archive fail.
        fs::create_dir(out.with_extension("zip.tmp")).unwrap();

        let result = build_and_write_package(
            &out,
            &[result(1, "Home")],
            PackageOptions::default(),
            OffsetDateTime::from_unix_timestamp(0).unwrap(),
        );

        assert!(result.is_err());
        assert_eq!(fs::read_to_string(&out).unwrap(), "previous package");
    }

    #[test]
    fn successful_write_leaves_no_temporary_file() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("pack.zip");

        build_and_write_package(
            &out,
            &[result(1, "Home")],
            PackageOptions::default(),
            OffsetDateTime::from_unix_timestamp(0).unwrap(),
        )
        .unwrap();

        assert!(out.exists());
        assert!(!out.with_extension("zip.tmp").exists());
    }

    #[test]
    fn build_and_write_package_rejects_empty_results() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("empty.zip");

        let result = build_and_write_package(
            &out,
            &[],
            PackageOptions::default(),
            OffsetDateTime::from_unix_timestamp(0).unwrap(),
        );

        assert!(result.is_err());
        assert!(!out.exists());
    }
}
