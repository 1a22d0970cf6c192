// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Built-in tag presets offered by the tag editor.

/// A named group of commonly used icon tags.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TagPreset {
    pub group: &'static str,
    pub tags: &'static [&'static str],
}

pub const TAG_PRESETS: &[TagPreset] = &[
    TagPreset {
        group: "UI Elements",
        tags: &[
            "button", "input", "checkbox", "radio", "select", "modal", "card", "dropdown",
        ],
    },
    TagPreset {
        group: "Navigation",
        tags: &[
            "menu",
            "sidebar",
            "navbar",
            "breadcrumb",
            "pagination",
            "tab",
            "link",
            "arrow",
        ],
    },
    TagPreset {
        group: "Actions",
        tags: &[
            "add", "remove", "delete", "edit", "save", "cancel", "upload", "download",
        ],
    },
    TagPreset {
        group: "Feedback",
        tags: &[
            "success",
            "error",
            "warning",
            "info",
            "help",
            "notification",
            "alert",
            "progress",
        ],
    },
    TagPreset {
        group: "Layout",
        tags: &[
            "grid",
            "container",
            "row",
            "column",
            "flex",
            "divider",
            "spacing",
            "alignment",
        ],
    },
    TagPreset {
        group: "Common",
        tags: &[
            "user",
            "home",
            "search",
            "settings",
            "profile",
            "dashboard",
            "calendar",
            "clock",
        ],
    },
];
