// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Icon metadata derived from a frame's display name and size.

use serde::{Deserialize, Serialize};

use crate::models::frame::FrameId;
use crate::models::naming::{to_kebab_case, to_pascal_case};
use crate::models::tags::{ExtractedTags, extract_tags};

/// Read-only metadata snapshot written next to each exported SVG.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconMetadata {
    /// PascalCase identifier.
    pub name: String,
    pub category: String,
    pub width: u32,
    pub height: u32,
    pub tags: Vec<String>,
    /// Kebab-case slug with `.svg` extension.
    pub filename: String,
}

impl IconMetadata {
    /// Derive metadata from a raw display name such as `"Arrow Left [nav, ui]"`.
    ///
    /// Sizes are rounded to the nearest whole pixel.
    pub fn from_display_name(display_name: &str, category: &str, width: f32, height: f32) -> Self {
        let ExtractedTags { clean_name, tags } = extract_tags(display_name);

        Self {
            name: to_pascal_case(&clean_name),
            category: category.to_string(),
            width: round_dimension(width),
            height: round_dimension(height),
            tags,
            filename: format!("{}.svg", to_kebab_case(&clean_name)),
        }
    }

    /// Filename without the `.svg` extension, used for the sidecar JSON.
    pub fn slug(&self) -> &str {
        self.filename
            .strip_suffix(".svg")
            .unwrap_or(self.filename.as_str())
    }

    /// Re-derive name, tags and filename after the frame was renamed.
    pub fn renamed(&self, display_name: &str) -> Self {
        let mut next = Self::from_display_name(display_name, &self.category, 0.0, 0.0);
        next.width = self.width;
        next.height = self.height;
        next
    }
}

/// One exported frame: its SVG text and derived metadata.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportResult {
    pub frame_id: FrameId,
    pub svg: String,
    pub metadata: IconMetadata,
}

fn round_dimension(value: f32) -> u32 {
    if value.is_finite() && value > 0.0 {
        value.round() as u32
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_display_name_derives_all_fields() {
        let meta = IconMetadata::from_display_name("Arrow Left [nav, ui]", "Navigation", 23.6, 24.4);

        assert_eq!(meta.name, "ArrowLeft");
        assert_eq!(meta.category, "Navigation");
        assert_eq!(meta.width, 24);
        assert_eq!(meta.height, 24);
        assert_eq!(meta.tags, vec!["nav", "ui"]);
        assert_eq!(meta.filename, "arrow-left.svg");
        assert_eq!(meta.slug(), "arrow-left");
    }

    #[test]
    fn round_dimension_rounds_halves_up_and_clamps_invalid() {
        assert_eq!(round_dimension(15.5), 16);
        assert_eq!(round_dimension(-3.0), 0);
        assert_eq!(round_dimension(f32::NAN), 0);
    }

    #[test]
    fn renamed_keeps_size_and_category() {
        let meta = IconMetadata::from_display_name("Old [a]", "Common", 16.0, 20.0);

        let next = meta.renamed("New Name[a,b]");

        assert_eq!(next.name, "NewName");
        assert_eq!(next.tags, vec!["a", "b"]);
        assert_eq!(next.filename, "new-name.svg");
        assert_eq!((next.width, next.height), (16, 20));
        assert_eq!(next.category, "Common");
    }

    // JSON keys match the metadata files consumers already read.
    #[test]
    fn serializes_with_expected_keys() {
        let meta = IconMetadata::from_display_name("Home", "Common", 24.0, 24.0);

        let value = serde_json::to_value(&meta).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "name": "Home",
                "category": "Common",
                "width": 24,
                "height": 24,
                "tags": [],
                "filename": "home.svg",
            })
        );
    }
}
