// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Export frames as SVG icons with derived metadata.
//!
//! Responsibilities:
//! - Decide which frames are exportable and report the ones that are not.
//! - Measure each SVG with `usvg` and optionally re-serialize it.
//! - Resolve the icon category and build [`IconMetadata`] from the frame name.

use std::fs;

use resvg::usvg;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::frame::Frame;
use crate::models::icon::{ExportResult, IconMetadata};

/// Category used when neither the user nor the frame's folder provides one.
pub const DEFAULT_CATEGORY: &str = "Uncategorized";

/// How the SVG text of an exported frame is produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SvgExportMode {
    /// Keep the file contents byte-for-byte.
    #[default]
    Source,
    /// Re-serialize through usvg: resolved styles, simplified paths, no `<text>`.
    Normalized,
}

impl SvgExportMode {
    pub fn label(&self) -> &'static str {
        match self {
            SvgExportMode::Source => "Source",
            SvgExportMode::Normalized => "Normalized",
        }
    }
}

/// Why a frame produced no export result.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Skipping {0}: Only SVG frames can be exported")]
    NotAFrame(String),
    #[error("Error exporting {name}: {reason}")]
    Failed { name: String, reason: String },
}

/// Outcome of exporting a batch of frames.
#[derive(Debug, Default)]
pub struct ExportBatch {
    pub results: Vec<ExportResult>,
    /// User-facing notices for frames that were skipped or failed.
    pub notices: Vec<String>,
}

/// Pick the category for a frame: explicit value, then folder name, then default.
pub fn resolve_category(explicit: &str, frame: &Frame) -> String {
    let explicit = explicit.trim();
    if !explicit.is_empty() {
        return explicit.to_string();
    }
    frame
        .page_name()
        .unwrap_or_else(|| DEFAULT_CATEGORY.to_string())
}

/// Export a single frame.
///
/// # Errors
///
/// [`ExportError::NotAFrame`] for non-SVG files, [`ExportError::Failed`] when
/// the file cannot be read or parsed.
pub fn export_frame(
    frame: &Frame,
    category: &str,
    mode: SvgExportMode,
) -> Result<ExportResult, ExportError> {
    if !frame.is_exportable() {
        return Err(ExportError::NotAFrame(frame.display_name.clone()));
    }

    let failed = |reason: String| ExportError::Failed {
        name: frame.display_name.clone(),
        reason,
    };

    let source = fs::read_to_string(&frame.path).map_err(|e| failed(e.to_string()))?;
    let tree = usvg::Tree::from_str(&source, &usvg::Options::default())
        .map_err(|e| failed(e.to_string()))?;

    let size = tree.size();
    let svg = match mode {
        SvgExportMode::Source => source,
        SvgExportMode::Normalized => tree.to_string(&usvg::WriteOptions::default()),
    };

    Ok(ExportResult {
        frame_id: frame.id,
        svg,
        metadata: IconMetadata::from_display_name(
            &frame.display_name,
            category,
            size.width(),
            size.height(),
        ),
    })
}

/// Export every frame in order, collecting results and notices.
pub fn export_frames(frames: &[Frame], category: &str, mode: SvgExportMode) -> ExportBatch {
    let mut batch = ExportBatch::default();

    for frame in frames {
        let category = resolve_category(category, frame);
        match export_frame(frame, &category, mode) {
            Ok(result) => {
                log::debug!(
                    "exported {} as {} ({}x{})",
                    frame.path.display(),
                    result.metadata.filename,
                    result.metadata.width,
                    result.metadata.height
                );
                batch.results.push(result);
            }
            Err(err) => {
                log::warn!("{err}");
                batch.notices.push(err.to_string());
            }
        }
    }

    batch
}
