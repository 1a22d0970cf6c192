// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Produce filesystem-safe path components for archive names.

/// Fallback component used when nothing printable survives sanitization.
pub const FALLBACK_COMPONENT: &str = "icons";

/// Produce a filesystem-safe path component.
///
/// # Steps
/// - Transliterate Unicode to ASCII with `deunicode` (e.g., "Å" → "A").
/// - Allow ASCII alphanumerics plus `-`, `_`, and `.`; treat other characters as `_`.
/// - Collapse runs of `_` and `.`; trim leading/trailing `_` and trailing dots.
/// - Guard against reserved/empty names.
///
/// Used for the archive root folder and the suggested archive filename.
/// Frame names are not passed through here because their brackets carry tags.
pub fn sanitize_component(value: &str) -> String {
    let transliterated = deunicode::deunicode(value);
    let mut out = String::with_capacity(transliterated.len());
    let mut last: Option<char> = None;

    for ch in transliterated.chars() {
        let mapped = if ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '.') {
            ch
        } else {
            '_'
        };

        if matches!(mapped, '_' | '.') && last == Some(mapped) {
            continue;
        }
        out.push(mapped);
        last = Some(mapped);
    }

    // Avoid a stray underscore immediately before a dot.
    while let Some(pos) = out.find("_.") {
        out.remove(pos);
    }

    let trimmed = out.trim_matches('_').trim_end_matches('.');
    if trimmed.is_empty() || trimmed.chars().all(|c| c == '.' || c == '_') {
        return FALLBACK_COMPONENT.to_string();
    }
    let mut out = trimmed.to_string();

    // Protect against Windows reserved device names for the basename.
    let (basename, ext) = match out.rsplit_once('.') {
        Some((base, ext)) if !base.is_empty() => (base.to_string(), Some(ext.to_string())),
        _ => (out.clone(), None),
    };

    if is_reserved_device_name(&basename) {
        let new_base = format!("{basename}_");
        out = match ext {
            Some(ext) => format!("{new_base}.{ext}"),
            None => new_base,
        };
    }

    out
}

fn is_reserved_device_name(basename: &str) -> bool {
    let upper = basename.to_ascii_uppercase();
    match upper.as_str() {
        "CON" | "PRN" | "AUX" | "NUL" => true,
        other => {
            let bytes = other.as_bytes();
            bytes.len() == 4
                && (other.starts_with("COM") || other.starts_with("LPT"))
                && matches!(bytes[3], b'1'..=b'9')
        }
    }
}

#[cfg(test)]
mod tests {
    use super::sanitize_component;

    #[test]
    fn sanitize_component_transliterates_and_collapses() {
        assert_eq!(sanitize_component("Ångström  icons"), "Angstrom_icons");
    }

    // Brackets and commas become separators; trailing separators are dropped.
    #[test]
    fn sanitize_component_replaces_tag_punctuation() {
        assert_eq!(sanitize_component("Arrow [nav, ui]"), "Arrow_nav_ui");
    }

    #[test]
    fn sanitize_component_keeps_dotted_names() {
        assert_eq!(sanitize_component("set..v1...2.zip"), "set.v1.2.zip");
    }

    #[test]
    fn sanitize_component_appends_suffix_for_windows_reserved_basenames() {
        assert_eq!(sanitize_component("CON"), "CON_");
        assert_eq!(sanitize_component("com3.zip"), "com3_.zip");
        assert_eq!(sanitize_component("COM10"), "COM10");
    }

    #[test]
    fn sanitize_component_falls_back_for_empty_results() {
        assert_eq!(sanitize_component("..."), "icons");
        assert_eq!(sanitize_component("[]"), "icons");
        assert_eq!(sanitize_component(""), "icons");
    }
}
