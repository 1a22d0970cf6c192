// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Domain layer: pure data types and string codecs shared between UI and export logic.

pub mod frame;
pub mod icon;
pub mod naming;
pub mod presets;
pub mod tags;
