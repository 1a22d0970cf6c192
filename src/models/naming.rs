// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Name formatter: identifier and slug renderings of a clean frame name.

use std::sync::LazyLock;

use regex::Regex;

/// Every bracket segment, matched non-greedily.
static ANY_TAG_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[.*?\]").expect("bracket pattern is valid"));

/// Runs of `-`, `_`, or whitespace separating identifier words.
static WORD_SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-_\s]+").expect("separator pattern is valid"));

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Convert a clean name into PascalCase (`"arrow-left_icon"` → `"ArrowLeftIcon"`).
///
/// Bracket segments still present in the input are removed before splitting,
/// so a name that skipped tag extraction does not leak tags into the identifier.
pub fn to_pascal_case(clean_name: &str) -> String {
    let stripped = ANY_TAG_SEGMENT.replace_all(clean_name, "");

    WORD_SEPARATORS
        .split(stripped.trim())
        .filter(|part| !part.is_empty())
        .map(capitalize)
        .collect()
}

/// Convert a clean name into a lowercase, hyphen-separated slug.
///
/// Only whitespace is rewritten; punctuation passes through unchanged.
pub fn to_kebab_case(clean_name: &str) -> String {
    let lower = clean_name.to_lowercase();
    WHITESPACE_RUN.replace_all(&lower, "-").into_owned()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.as_str().to_lowercase().chars())
            .collect(),
        None => String::new(),
    }
}
