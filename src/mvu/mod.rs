// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Root Model-View-Update kernel wiring component state, messages, and commands.

use std::path::PathBuf;

use time::OffsetDateTime;

use crate::config::Config;
use crate::logic::export::{ExportBatch, SvgExportMode, export_frames};
use crate::logic::package::{PackageOptions, assert_unique_filenames, build_and_write_package};
use crate::logic::rename::{RenameKind, rename_frame_file};
use crate::models::frame::{Frame, FrameId};
use crate::models::icon::ExportResult;
use crate::models::tags::{rename_frame_keep_tags, update_frame_name_with_tags};
use crate::ui::components::frames::{self, FramesCommand, FramesModel, FramesMsg};
use crate::ui::components::results::{self, ResultsIntent, ResultsModel, ResultsMsg};

const BUSY_MESSAGE: &str = "Wait for the running export or rename to finish.";

/// Top-level application state.
#[derive(Default)]
pub struct AppModel {
    /// Category applied to all icons; blank falls back to each frame's folder.
    pub category: String,
    pub export_mode: SvgExportMode,
    /// Whether "Download All" writes the `icons.json` manifest.
    pub include_manifest: bool,
    /// Loaded frames and selection.
    pub frames: FramesModel,
    /// Latest export results with their editors.
    pub results: ResultsModel,
    /// True while an export command is in flight.
    pub exporting: bool,
    /// Last package written, offered for reveal in the file manager.
    pub last_package: Option<PathBuf>,
    /// Latest status message to display.
    pub status: Option<String>,
    /// Latest error message to display in modal.
    pub error: Option<String>,
    /// Count of queued background commands.
    pub pending_commands: usize,
    /// Set once the user asked to close the window.
    pub close_requested: bool,
}

impl AppModel {
    pub fn from_config(config: &Config) -> Self {
        Self {
            category: config.category.clone(),
            export_mode: config.export_mode,
            include_manifest: config.include_manifest,
            ..Default::default()
        }
    }
}

/// Application messages routed through the update function.
pub enum Msg {
    CategoryChanged(String),
    SetExportMode(SvgExportMode),
    SetIncludeManifest(bool),
    ExportRequested,
    ExportCompleted(ExportBatch),
    FrameRenamed {
        id: FrameId,
        kind: RenameKind,
        result: Result<PathBuf, String>,
    },
    DownloadRequested(PathBuf),
    DownloadCancelled,
    DownloadCompleted(Result<PathBuf, String>),
    RevealPackage,
    DismissError,
    CloseRequested,
    Notify(String),
    Frames(FramesMsg),
    Results(ResultsMsg),
}

/// Commands represent side-effects executed between frames.
pub enum Command {
    PickFiles,
    PickFolder,
    ExportFrames {
        frames: Vec<Frame>,
        category: String,
        mode: SvgExportMode,
    },
    RenameFrame {
        id: FrameId,
        path: PathBuf,
        display_name: String,
        kind: RenameKind,
    },
    WritePackage(PackagePayload),
    Reveal(PathBuf),
}

/// Captured, validated data for writing the zip.
pub struct PackagePayload {
    /// Final archive path on disk (with `.zip` extension enforced).
    pub output: PathBuf,
    pub results: Vec<ExportResult>,
    pub options: PackageOptions,
}

/// Update the application model and enqueue commands.
pub fn update(model: &mut AppModel, msg: Msg, cmds: &mut Vec<Command>) {
    match msg {
        Msg::CategoryChanged(text) => model.category = text,
        Msg::SetExportMode(mode) => model.export_mode = mode,
        Msg::SetIncludeManifest(on) => model.include_manifest = on,
        Msg::DismissError => model.error = None,
        Msg::CloseRequested => model.close_requested = true,
        Msg::Notify(message) => surface_event(model, message, false),
        Msg::Frames(m) => {
            let mut frame_cmds = Vec::new();
            if let Some(event) = frames::update(&mut model.frames, m, &mut frame_cmds) {
                surface_event(model, event.message, event.is_error);
            }
            for c in frame_cmds {
                match c {
                    FramesCommand::PickFiles => cmds.push(Command::PickFiles),
                    FramesCommand::PickFolder => cmds.push(Command::PickFolder),
                }
            }
        }
        Msg::Results(m) => {
            let (intent, event) = results::update(&mut model.results, m);
            if let Some(event) = event {
                surface_event(model, event.message, event.is_error);
            }
            if let Some(intent) = intent {
                handle_results_intent(model, intent, cmds);
            }
        }
        Msg::ExportRequested => {
            if model.exporting || model.results.has_pending() {
                surface_event(model, BUSY_MESSAGE.into(), false);
                return;
            }
            let selected = model.frames.selected_frames();
            if selected.is_empty() {
                model.results.clear();
                surface_event(
                    model,
                    "Please select at least one frame to export".into(),
                    false,
                );
                return;
            }
            model.exporting = true;
            cmds.push(Command::ExportFrames {
                frames: selected,
                category: model.category.clone(),
                mode: model.export_mode,
            });
        }
        Msg::ExportCompleted(batch) => {
            model.exporting = false;
            let count = batch.results.len();
            model.results.replace(batch.results);
            let mut message = format!("Exported {count} icon(s).");
            if !batch.notices.is_empty() {
                message.push(' ');
                message.push_str(&batch.notices.join(" "));
            }
            surface_event(model, message, false);
        }
        Msg::FrameRenamed { id, kind, result } => {
            model.results.set_pending(id, false);
            match result {
                Ok(path) => {
                    match model.frames.apply_rename(id, path) {
                        Some(display_name) => model.results.apply_rename(id, &display_name),
                        None => log::debug!("{id} renamed after it was removed from the list"),
                    }
                    surface_event(model, kind.success_message().to_string(), false);
                }
                Err(err) => surface_event(model, err, true),
            }
        }
        Msg::DownloadRequested(output) => match validate_for_download(model, output) {
            Ok(payload) => cmds.push(Command::WritePackage(payload)),
            Err(err) => surface_event(model, err, true),
        },
        Msg::DownloadCancelled => surface_event(model, "Download cancelled.".to_string(), false),
        Msg::DownloadCompleted(result) => match result {
            Ok(path) => {
                surface_event(model, format!("Icons saved: {}", path.display()), false);
                model.last_package = Some(path);
            }
            Err(err) => surface_event(model, format!("Failed to create zip file:\n\n{err}"), true),
        },
        Msg::RevealPackage => {
            if let Some(path) = &model.last_package {
                cmds.push(Command::Reveal(path.clone()));
            }
        }
    }
}

/// Execute a command synchronously on the calling thread and return a resulting message.
pub fn run_command(cmd: Command) -> Msg {
    match cmd {
        Command::PickFiles => {
            let files = rfd::FileDialog::new()
                .set_title("Select SVG frames")
                .add_filter("SVG", &["svg"])
                .pick_files()
                .unwrap_or_default();
            Msg::Frames(FramesMsg::FilesPicked(files))
        }
        Command::PickFolder => {
            let Some(dir) = rfd::FileDialog::new()
                .set_title("Select a folder of SVG frames")
                .pick_folder()
            else {
                return Msg::Frames(FramesMsg::FilesPicked(Vec::new()));
            };
            match frames::svg_files_in(&dir) {
                Ok(files) if files.is_empty() => {
                    Msg::Notify(format!("No SVG files found in {}", dir.display()))
                }
                Ok(files) => Msg::Frames(FramesMsg::FilesPicked(files)),
                Err(err) => Msg::Notify(format!("Failed to read folder {}: {err}", dir.display())),
            }
        }
        Command::ExportFrames {
            frames,
            category,
            mode,
        } => Msg::ExportCompleted(export_frames(&frames, &category, mode)),
        Command::RenameFrame {
            id,
            path,
            display_name,
            kind,
        } => {
            let result = rename_frame_file(&path, &display_name).map_err(|e| e.to_string());
            Msg::FrameRenamed { id, kind, result }
        }
        Command::WritePackage(payload) => {
            let res = build_and_write_package(
                &payload.output,
                &payload.results,
                payload.options,
                OffsetDateTime::now_utc(),
            )
            .map(|_| payload.output.clone());
            Msg::DownloadCompleted(res.map_err(|e| format!("{e:#}")))
        }
        Command::Reveal(path) => {
            let target = path.parent().map(PathBuf::from).unwrap_or(path);
            match open::that(&target) {
                Ok(()) => Msg::Notify(format!("Opened {}", target.display())),
                Err(err) => Msg::Notify(format!("Could not open {}: {err}", target.display())),
            }
        }
    }
}

/// Turn a tag/rename request into a file rename of the frame's current name.
fn handle_results_intent(model: &mut AppModel, intent: ResultsIntent, cmds: &mut Vec<Command>) {
    let (id, kind) = match &intent {
        ResultsIntent::UpdateTags { id, .. } => (*id, RenameKind::Tags),
        ResultsIntent::Rename { id, .. } => (*id, RenameKind::Name),
    };

    if model.exporting || model.results.is_pending(id) {
        surface_event(model, BUSY_MESSAGE.into(), false);
        return;
    }

    let Some(frame) = model.frames.frame(id) else {
        surface_event(model, "Error: Frame not found!".into(), true);
        return;
    };

    let display_name = match &intent {
        ResultsIntent::UpdateTags { tags, .. } => {
            update_frame_name_with_tags(&frame.display_name, tags)
        }
        ResultsIntent::Rename { new_name, .. } => {
            rename_frame_keep_tags(&frame.display_name, new_name)
        }
    };

    model.results.set_pending(id, true);
    cmds.push(Command::RenameFrame {
        id,
        path: frame.path.clone(),
        display_name,
        kind,
    });
}

/// Update status/error fields consistently for user feedback.
fn surface_event(model: &mut AppModel, message: String, is_error: bool) {
    if is_error {
        log::warn!("{message}");
        model.error = Some(message.clone());
    } else {
        log::info!("{message}");
    }
    model.status = Some(message);
}

/// Validate model state and build the payload required to write the zip.
fn validate_for_download(model: &AppModel, output: PathBuf) -> Result<PackagePayload, String> {
    if model.results.is_empty() {
        return Err("No exported icons to download. Export frames first.".into());
    }

    let results = model.results.export_results();
    let options = PackageOptions {
        include_manifest: model.include_manifest,
    };
    assert_unique_filenames(&results, options).map_err(|e| e.to_string())?;

    Ok(PackagePayload {
        output,
        results,
        options,
    })
}
