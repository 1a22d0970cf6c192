// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Export results list with per-icon tag editing and renaming.

use std::collections::BTreeSet;

use eframe::egui;

use crate::models::frame::FrameId;
use crate::models::icon::ExportResult;
use crate::models::presets::TAG_PRESETS;
use crate::models::tags::{join_tag_input, split_tag_input};

/// One exported icon plus the editor buffers shown next to it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultItem {
    pub result: ExportResult,
    /// Comma-separated tags being edited.
    pub tags_input: String,
    /// New base name being edited (tags are kept on rename).
    pub name_input: String,
    preview_uri: String,
}

impl ResultItem {
    fn new(result: ExportResult, generation: u64) -> Self {
        let tags_input = tags_to_input(&result.metadata.tags);
        let preview_uri = format!("bytes://{}-{generation}.svg", result.frame_id);
        Self {
            result,
            tags_input,
            name_input: String::new(),
            preview_uri,
        }
    }
}

/// MVU state for export results.
#[derive(Default)]
pub struct ResultsModel {
    items: Vec<ResultItem>,
    generation: u64,
    /// Frames with a rename in flight; their editors are locked.
    pending: BTreeSet<FrameId>,
}

/// Messages emitted by the results view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResultsMsg {
    TagsInputChanged { id: FrameId, text: String },
    AddPresetTag { id: FrameId, tag: String },
    ApplyTags(FrameId),
    NameInputChanged { id: FrameId, text: String },
    ApplyRename(FrameId),
}

/// Requests the results view cannot fulfil itself; the app turns them into commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResultsIntent {
    /// Replace the frame's tags with this comma-joined list (may be empty).
    UpdateTags { id: FrameId, tags: String },
    /// Rename the frame, keeping its tags.
    Rename { id: FrameId, new_name: String },
}

/// User-facing feedback surfaced to the status bar or error modal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultsEvent {
    pub message: String,
    pub is_error: bool,
}

impl ResultsModel {
    pub fn items(&self) -> &[ResultItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item(&self, id: FrameId) -> Option<&ResultItem> {
        self.items.iter().find(|item| item.result.frame_id == id)
    }

    pub fn is_pending(&self, id: FrameId) -> bool {
        self.pending.contains(&id)
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Lock or unlock the editors of one frame around a rename.
    pub fn set_pending(&mut self, id: FrameId, pending: bool) {
        if pending {
            self.pending.insert(id);
        } else {
            self.pending.remove(&id);
        }
    }

    /// Export results in display order.
    pub fn export_results(&self) -> Vec<ExportResult> {
        self.items.iter().map(|item| item.result.clone()).collect()
    }

    /// Replace all results, e.g. after a new export run.
    pub fn replace(&mut self, results: Vec<ExportResult>) {
        self.generation += 1;
        let generation = self.generation;
        self.items = results
            .into_iter()
            .map(|result| ResultItem::new(result, generation))
            .collect();
    }

    pub fn clear(&mut self) {
        self.replace(Vec::new());
    }

    /// Re-derive the metadata of a renamed frame's result.
    pub fn apply_rename(&mut self, id: FrameId, display_name: &str) {
        if let Some(item) = self.item_mut(id) {
            item.result.metadata = item.result.metadata.renamed(display_name);
            item.tags_input = tags_to_input(&item.result.metadata.tags);
            item.name_input.clear();
        }
    }

    fn item_mut(&mut self, id: FrameId) -> Option<&mut ResultItem> {
        self.items.iter_mut().find(|item| item.result.frame_id == id)
    }
}

/// Apply a message to the results model.
///
/// Returns an intent when the frame itself must change, or an event for
/// feedback that needs no side effect.
pub fn update(
    model: &mut ResultsModel,
    msg: ResultsMsg,
) -> (Option<ResultsIntent>, Option<ResultsEvent>) {
    match msg {
        ResultsMsg::TagsInputChanged { id, text } => {
            if let Some(item) = model.item_mut(id) {
                item.tags_input = text;
            }
            (None, None)
        }
        ResultsMsg::AddPresetTag { id, tag } => {
            if let Some(item) = model.item_mut(id) {
                item.tags_input = add_tag_to_input(&item.tags_input, &tag);
            }
            (None, None)
        }
        ResultsMsg::ApplyTags(id) => match model.item(id) {
            Some(item) => (
                Some(ResultsIntent::UpdateTags {
                    id,
                    tags: join_tag_input(&item.tags_input),
                }),
                None,
            ),
            None => (None, Some(not_found())),
        },
        ResultsMsg::NameInputChanged { id, text } => {
            if let Some(item) = model.item_mut(id) {
                item.name_input = text;
            }
            (None, None)
        }
        ResultsMsg::ApplyRename(id) => match model.item(id) {
            Some(item) if item.name_input.trim().is_empty() => (
                None,
                Some(ResultsEvent {
                    message: "Frame name cannot be empty.".into(),
                    is_error: true,
                }),
            ),
            Some(item) => (
                Some(ResultsIntent::Rename {
                    id,
                    new_name: item.name_input.trim().to_string(),
                }),
                None,
            ),
            None => (None, Some(not_found())),
        },
    }
}

fn not_found() -> ResultsEvent {
    ResultsEvent {
        message: "Error: Frame not found!".into(),
        is_error: true,
    }
}

/// Editable form of a tag list; empty tags are not offered for editing.
fn tags_to_input(tags: &[String]) -> String {
    tags.iter()
        .filter(|tag| !tag.is_empty())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Append `tag` to comma-separated `input` unless it is already listed.
fn add_tag_to_input(input: &str, tag: &str) -> String {
    let mut tags = split_tag_input(input);
    if !tags.iter().any(|existing| existing.eq_ignore_ascii_case(tag)) {
        tags.push(tag.to_string());
    }
    tags.join(", ")
}

/// Render all results and return any messages triggered by user interaction.
///
/// With `locked` set (an export is running) no editor accepts input.
pub fn view(ui: &mut egui::Ui, model: &ResultsModel, locked: bool) -> Vec<ResultsMsg> {
    let mut msgs = Vec::new();

    if model.items.is_empty() {
        render_empty_state(ui);
        return msgs;
    }

    for (index, item) in model.items.iter().enumerate() {
        let editable = !locked && !model.is_pending(item.result.frame_id);
        render_result(ui, item, editable, &mut msgs);
        if index < model.items.len() - 1 {
            ui.separator();
        }
    }

    msgs
}

fn render_empty_state(ui: &mut egui::Ui) {
    ui.vertical_centered(|ui| {
        ui.add_space(24.0);
        ui.label(
            egui::RichText::new(egui_phosphor::regular::CURSOR)
                .size(40.0)
                .color(egui::Color32::from_gray(140)),
        );
        ui.add_space(8.0);
    });
    let steps = [
        "Add SVG files or a folder; each file is a frame",
        "Click \"Export Selected Frames\" to generate SVGs",
        "Edit tags or rename frames if needed",
        "Use \"Download All\" to get your icons with metadata",
    ];
    for (n, step) in steps.iter().enumerate() {
        ui.label(
            egui::RichText::new(format!("{}. {step}", n + 1)).color(egui::Color32::from_gray(110)),
        );
    }
}

fn render_result(
    ui: &mut egui::Ui,
    item: &ResultItem,
    editable: bool,
    msgs: &mut Vec<ResultsMsg>,
) {
    let meta = &item.result.metadata;

    ui.horizontal(|ui| {
        ui.add(
            egui::Image::from_bytes(item.preview_uri.clone(), item.result.svg.as_bytes().to_vec())
                .fit_to_exact_size(egui::vec2(48.0, 48.0)),
        );

        ui.vertical(|ui| {
            ui.label(egui::RichText::new(meta.name.as_str()).strong());
            ui.label(
                egui::RichText::new(format!(
                    "{} | {} | {}×{}",
                    meta.filename, meta.category, meta.width, meta.height
                ))
                .small()
                .color(egui::Color32::from_gray(102)),
            );
            let tags = if meta.tags.is_empty() {
                "no tags".to_string()
            } else {
                meta.tags.join(", ")
            };
            ui.label(
                egui::RichText::new(tags)
                    .small()
                    .color(egui::Color32::from_gray(90)),
            );
        });
    });

    ui.add_space(4.0);
    ui.add_enabled_ui(editable, |ui| {
        render_tags_editor(ui, item, msgs);
        render_rename_editor(ui, item, msgs);
    });
}

fn render_tags_editor(ui: &mut egui::Ui, item: &ResultItem, msgs: &mut Vec<ResultsMsg>) {
    let id = item.result.frame_id;

    ui.horizontal(|ui| {
        let mut buffer = item.tags_input.clone();
        let response = ui.add(
            egui::TextEdit::singleline(&mut buffer)
                .hint_text("e.g., nav, arrow")
                .desired_width(200.0),
        );
        if response.changed() {
            msgs.push(ResultsMsg::TagsInputChanged {
                id,
                text: buffer.clone(),
            });
        }

        let enter = response.lost_focus() && ui.input(|inp| inp.key_pressed(egui::Key::Enter));
        if enter
            || ui
                .button(format!("{} Update tags", egui_phosphor::regular::TAG))
                .clicked()
        {
            msgs.push(ResultsMsg::ApplyTags(id));
        }

        ui.menu_button(egui_phosphor::regular::LIST_PLUS, |ui| {
            for preset in TAG_PRESETS {
                ui.menu_button(preset.group, |ui| {
                    for tag in preset.tags {
                        if ui.button(*tag).clicked() {
                            msgs.push(ResultsMsg::AddPresetTag {
                                id,
                                tag: (*tag).to_string(),
                            });
                            ui.close();
                        }
                    }
                });
            }
        })
        .response
        .on_hover_text("Add a preset tag");
    });
}

fn render_rename_editor(ui: &mut egui::Ui, item: &ResultItem, msgs: &mut Vec<ResultsMsg>) {
    let id = item.result.frame_id;

    ui.horizontal(|ui| {
        let mut buffer = item.name_input.clone();
        let response = ui.add(
            egui::TextEdit::singleline(&mut buffer)
                .hint_text("New frame name")
                .desired_width(200.0),
        );
        if response.changed() {
            msgs.push(ResultsMsg::NameInputChanged {
                id,
                text: buffer.clone(),
            });
        }

        let enter = response.lost_focus() && ui.input(|inp| inp.key_pressed(egui::Key::Enter));
        let rename_enabled = !item.name_input.trim().is_empty();
        if enter
            || ui
                .add_enabled(
                    rename_enabled,
                    egui::Button::new(format!(
                        "{} Rename",
                        egui_phosphor::regular::PENCIL_SIMPLE
                    )),
                )
                .on_disabled_hover_text("Enter a new name first")
                .clicked()
        {
            msgs.push(ResultsMsg::ApplyRename(id));
        }
    });
}
