// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Side-effecting business logic: export, renaming, and packaging.

pub mod export;
pub mod package;
pub mod rename;
