// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Tag codec: reads and writes the bracketed tag suffix of a frame name.
//!
//! A display name such as `"Arrow Left [nav, ui]"` carries its tags in the
//! first `[...]` segment. Only that first segment is ever recognized; any
//! later bracket text stays part of the name.

use std::sync::LazyLock;

use regex::Regex;

/// First (non-greedy) bracket pair, capturing its interior.
static TAG_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(.*?)\]").expect("tag segment pattern is valid"));

/// Result of splitting a display name into its clean name and tag list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExtractedTags {
    /// Display name without the first bracket segment, trimmed.
    pub clean_name: String,
    /// Tags in written order. Empty entries are retained.
    pub tags: Vec<String>,
}

/// Split `name` into its clean name and the tags of the first bracket segment.
///
/// The interior is split on commas and each piece trimmed; pieces that trim
/// to nothing are kept as empty tags. Without brackets the clean name is the
/// trimmed input and the tag list is empty.
///
/// # Examples
///
/// ```ignore
/// let parsed = extract_tags("Arrow Left [nav, ui]");
/// assert_eq!(parsed.clean_name, "Arrow Left");
/// assert_eq!(parsed.tags, vec!["nav", "ui"]);
/// ```
pub fn extract_tags(name: &str) -> ExtractedTags {
    let Some(caps) = TAG_SEGMENT.captures(name) else {
        return ExtractedTags {
            clean_name: name.trim().to_string(),
            tags: Vec::new(),
        };
    };

    let tags = caps[1]
        .split(',')
        .map(|tag| tag.trim().to_string())
        .collect();

    ExtractedTags {
        clean_name: strip_first_segment(name),
        tags,
    }
}

/// Replace the tag segment of `name` with `tags`.
///
/// Any existing first bracket segment is removed. When `tags` is non-empty
/// it is appended as `[tags]` directly after the clean name. The tag string
/// is taken as-is; callers join and tidy it beforehand.
pub fn update_frame_name_with_tags(name: &str, tags: &str) -> String {
    let clean_name = strip_first_segment(name);
    if tags.is_empty() {
        clean_name
    } else {
        format!("{clean_name}[{tags}]")
    }
}

/// Rename a frame to `new_name` while carrying over the tags of `old_name`.
pub fn rename_frame_keep_tags(old_name: &str, new_name: &str) -> String {
    let ExtractedTags { tags, .. } = extract_tags(old_name);
    let name = new_name.trim();
    if tags.is_empty() {
        name.to_string()
    } else {
        format!("{name}[{}]", tags.join(","))
    }
}

/// Normalize free-form tag input (`"a, b,,c "`) into the joined form `"a,b,c"`.
///
/// Used by the tag editor before handing the string to
/// [`update_frame_name_with_tags`].
pub fn join_tag_input(input: &str) -> String {
    split_tag_input(input).join(",")
}

/// Split free-form tag input on commas, dropping blank entries.
pub fn split_tag_input(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

fn strip_first_segment(name: &str) -> String {
    TAG_SEGMENT.replace(name, "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_tags_splits_and_trims_bracket_content() {
        let parsed = extract_tags("Arrow Left [nav, ui]");

        assert_eq!(parsed.clean_name, "Arrow Left");
        assert_eq!(parsed.tags, vec!["nav", "ui"]);
    }

    #[test]
    fn extract_tags_without_brackets_returns_trimmed_name() {
        let parsed = extract_tags("  Plain Name ");

        assert_eq!(parsed.clean_name, "Plain Name");
        assert!(parsed.tags.is_empty());
    }

    // Only the first bracket pair counts; later ones stay inside the name.
    #[test]
    fn extract_tags_only_processes_first_bracket_pair() {
        let parsed = extract_tags("A [x] B [y]");

        assert_eq!(parsed.tags, vec!["x"]);
        assert_eq!(parsed.clean_name, "A  B [y]");
    }

    // Blank pieces are kept as empty tags rather than filtered.
    #[test]
    fn extract_tags_retains_empty_tags() {
        let parsed = extract_tags("Icon [a,,b]");

        assert_eq!(parsed.tags, vec!["a", "", "b"]);
    }

    #[test]
    fn extract_tags_keeps_duplicates_in_order() {
        let parsed = extract_tags("Icon[b, a, b]");

        assert_eq!(parsed.clean_name, "Icon");
        assert_eq!(parsed.tags, vec!["b", "a", "b"]);
    }

    #[test]
    fn extract_tags_is_idempotent_on_clean_name() {
        let first = extract_tags("Arrow Left [nav, ui]");
        let second = extract_tags(&first.clean_name);

        assert_eq!(second.clean_name, first.clean_name);
        assert!(second.tags.is_empty());
    }

    #[test]
    fn extract_tags_handles_empty_input() {
        assert_eq!(extract_tags(""), ExtractedTags::default());
    }

    // An unclosed bracket is not a tag segment.
    #[test]
    fn extract_tags_ignores_unclosed_bracket() {
        let parsed = extract_tags("Broken [nav");

        assert_eq!(parsed.clean_name, "Broken [nav");
        assert!(parsed.tags.is_empty());
    }

    #[test]
    fn update_with_empty_tags_strips_segment() {
        assert_eq!(update_frame_name_with_tags("Arrow [nav, ui]", ""), "Arrow");
        assert_eq!(update_frame_name_with_tags("Arrow", ""), "Arrow");
    }

    #[test]
    fn update_appends_tags_without_space() {
        assert_eq!(
            update_frame_name_with_tags("Arrow Left [old]", "nav,ui"),
            "Arrow Left[nav,ui]"
        );
    }

    // The tag string is inserted verbatim.
    #[test]
    fn update_does_not_revalidate_tag_string() {
        assert_eq!(update_frame_name_with_tags("Arrow", " a , b"), "Arrow[ a , b]");
    }

    #[test]
    fn rename_keeps_existing_tags() {
        assert_eq!(rename_frame_keep_tags("Old [a,b]", "New Name"), "New Name[a,b]");
    }

    #[test]
    fn rename_without_tags_trims_new_name() {
        assert_eq!(rename_frame_keep_tags("Old", "  New Name  "), "New Name");
    }

    #[test]
    fn rename_rejoins_tags_without_whitespace() {
        assert_eq!(rename_frame_keep_tags("Old [ a , b ]", "New"), "New[a,b]");
    }

    #[test]
    fn join_tag_input_drops_blanks_and_whitespace() {
        assert_eq!(join_tag_input(" nav, ,ui ,,"), "nav,ui");
        assert_eq!(join_tag_input("   "), "");
    }
}
