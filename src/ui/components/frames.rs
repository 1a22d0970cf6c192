// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Frame list with explicit selection, shaped for MVU updates.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use eframe::egui;

use crate::models::frame::{Frame, FrameId, is_svg};

/// MVU state for loaded frames and the current selection.
#[derive(Default)]
pub struct FramesModel {
    frames: Vec<Frame>,
    selected: BTreeSet<FrameId>,
    next_id: u64,
}

/// Messages emitted by the frames view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FramesMsg {
    RequestPickFiles,
    RequestPickFolder,
    FilesPicked(Vec<PathBuf>),
    Toggle(FrameId),
    SelectAll,
    ClearSelection,
    Remove(FrameId),
}

/// Side-effectful commands that must run outside the update function.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FramesCommand {
    PickFiles,
    PickFolder,
}

/// User-facing feedback surfaced to the status bar.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FramesEvent {
    pub message: String,
    pub is_error: bool,
}

impl FramesModel {
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn frame(&self, id: FrameId) -> Option<&Frame> {
        self.frames.iter().find(|frame| frame.id == id)
    }

    pub fn is_selected(&self, id: FrameId) -> bool {
        self.selected.contains(&id)
    }

    /// Selected frames in list order.
    pub fn selected_frames(&self) -> Vec<Frame> {
        self.frames
            .iter()
            .filter(|frame| self.selected.contains(&frame.id))
            .cloned()
            .collect()
    }

    /// Point a frame at its renamed file. Returns the new display name.
    pub fn apply_rename(&mut self, id: FrameId, new_path: PathBuf) -> Option<String> {
        let frame = self.frames.iter_mut().find(|frame| frame.id == id)?;
        *frame = Frame::new(id, new_path);
        Some(frame.display_name.clone())
    }

    fn add_paths(&mut self, paths: Vec<PathBuf>) -> usize {
        let mut added = 0;
        for path in paths {
            if self.frames.iter().any(|frame| frame.path == path) {
                continue;
            }
            self.next_id += 1;
            let id = FrameId(self.next_id);
            self.frames.push(Frame::new(id, path));
            self.selected.insert(id);
            added += 1;
        }
        added
    }
}

/// Apply a message to the frames model. Returns a user-facing event when relevant.
pub fn update(
    model: &mut FramesModel,
    msg: FramesMsg,
    cmds: &mut Vec<FramesCommand>,
) -> Option<FramesEvent> {
    match msg {
        FramesMsg::RequestPickFiles => {
            cmds.push(FramesCommand::PickFiles);
            None
        }
        FramesMsg::RequestPickFolder => {
            cmds.push(FramesCommand::PickFolder);
            None
        }
        FramesMsg::FilesPicked(paths) => {
            if paths.is_empty() {
                return None;
            }
            let offered = paths.len();
            let added = model.add_paths(paths);
            let message = if added == offered {
                format!("Added {added} frame(s).")
            } else {
                format!(
                    "Added {added} frame(s); skipped {} already loaded.",
                    offered - added
                )
            };
            Some(FramesEvent {
                message,
                is_error: false,
            })
        }
        FramesMsg::Toggle(id) => {
            if !model.selected.remove(&id) && model.frame(id).is_some() {
                model.selected.insert(id);
            }
            None
        }
        FramesMsg::SelectAll => {
            model.selected = model.frames.iter().map(|frame| frame.id).collect();
            None
        }
        FramesMsg::ClearSelection => {
            model.selected.clear();
            None
        }
        FramesMsg::Remove(id) => {
            model.frames.retain(|frame| frame.id != id);
            model.selected.remove(&id);
            Some(FramesEvent {
                message: "Frame removed".to_string(),
                is_error: false,
            })
        }
    }
}

/// List the SVG files directly inside `dir`, sorted by name.
pub fn svg_files_in(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && is_svg(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Render the frames panel and return any messages triggered by user interaction.
pub fn view(ui: &mut egui::Ui, model: &FramesModel) -> Vec<FramesMsg> {
    let mut msgs = Vec::new();

    ui.horizontal_wrapped(|ui| {
        if ui
            .button(format!("{} Add SVG files", egui_phosphor::regular::PLUS))
            .clicked()
        {
            msgs.push(FramesMsg::RequestPickFiles);
        }
        if ui
            .button(format!("{} Add folder", egui_phosphor::regular::FOLDER_OPEN))
            .clicked()
        {
            msgs.push(FramesMsg::RequestPickFolder);
        }
        ui.separator();
        if ui
            .add_enabled(!model.frames.is_empty(), egui::Button::new("Select all"))
            .clicked()
        {
            msgs.push(FramesMsg::SelectAll);
        }
        if ui
            .add_enabled(!model.selected.is_empty(), egui::Button::new("Clear"))
            .clicked()
        {
            msgs.push(FramesMsg::ClearSelection);
        }
    });

    ui.add_space(6.0);

    let visuals = ui.visuals().clone();
    egui::Frame::new()
        .fill(visuals.panel_fill)
        .stroke(visuals.window_stroke())
        .inner_margin(8.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            if model.frames.is_empty() {
                ui.label(
                    egui::RichText::new("No frames loaded. Add SVG files or drop them here.")
                        .color(egui::Color32::from_gray(150)),
                );
            } else {
                render_frame_list(ui, model, &mut msgs);
            }
        });

    ui.label(
        egui::RichText::new(format!(
            "{} of {} selected",
            model.selected.len(),
            model.frames.len()
        ))
        .small()
        .color(egui::Color32::from_gray(110)),
    );

    msgs
}

fn render_frame_list(ui: &mut egui::Ui, model: &FramesModel, msgs: &mut Vec<FramesMsg>) {
    for frame in &model.frames {
        ui.horizontal(|ui| {
            let mut checked = model.is_selected(frame.id);
            if ui.checkbox(&mut checked, "").changed() {
                msgs.push(FramesMsg::Toggle(frame.id));
            }

            if !frame.is_exportable() {
                ui.label(
                    egui::RichText::new(egui_phosphor::regular::WARNING)
                        .color(egui::Color32::from_rgb(232, 89, 12)),
                )
                .on_hover_text("Not an SVG frame; it will be skipped on export");
            }

            ui.label(frame.display_name.as_str())
                .on_hover_text(frame.path.display().to_string());

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui
                    .button(
                        egui::RichText::new(egui_phosphor::regular::TRASH_SIMPLE)
                            .color(egui::Color32::from_gray(140)),
                    )
                    .on_hover_text("Remove frame from list")
                    .clicked()
                {
                    msgs.push(FramesMsg::Remove(frame.id));
                }
            });
        });
    }
}
