// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Top-level egui application shell for exporting and packaging icons.
//! Handles layout, export controls, and wiring to the background workers.

pub mod components;

use std::path::PathBuf;

use eframe::egui;

use crate::config::Config;
use crate::logic::export::SvgExportMode;
use crate::logic::package::{ensure_extension, suggested_package_name};
use crate::mvu::{self, AppModel, Command, Msg};
use crate::ui::components::frames::{self, FramesMsg};
use crate::ui::components::results;

/// Stateful egui application for exporting frames into an icon package.
pub struct IconPackApp {
    model: AppModel,
    inbox: Vec<Msg>,
    cmd_tx: crossbeam_channel::Sender<Command>,
    msg_rx: crossbeam_channel::Receiver<Msg>,
}

impl IconPackApp {
    pub fn new(config: &Config) -> Self {
        let (cmd_tx, cmd_rx) = crossbeam_channel::unbounded::<Command>();
        let (msg_tx, msg_rx) = crossbeam_channel::unbounded::<Msg>();

        let threads = config.workers();
        log::debug!("starting {threads} command worker(s)");
        for _ in 0..threads {
            let cmd_rx = cmd_rx.clone();
            let msg_tx = msg_tx.clone();
            std::thread::spawn(move || {
                for cmd in cmd_rx.iter() {
                    let msg = mvu::run_command(cmd);
                    let _ = msg_tx.send(msg);
                }
            });
        }

        Self {
            model: AppModel::from_config(config),
            inbox: Vec::new(),
            cmd_tx,
            msg_rx,
        }
    }
}

impl eframe::App for IconPackApp {
    /// Drives a single UI frame: drains worker results, applies queued messages,
    /// then renders the top bar, frame list, results, and status line.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ensure_spacing(ctx);
        self.collect_dropped_files(ctx);

        // Pull messages produced by the command worker.
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.model.pending_commands = self.model.pending_commands.saturating_sub(1);
            self.inbox.push(msg);
        }

        // Process pending messages in the order the views emitted them.
        for msg in std::mem::take(&mut self.inbox) {
            let mut commands = Vec::new();
            mvu::update(&mut self.model, msg, &mut commands);
            for cmd in commands {
                if self.cmd_tx.send(cmd).is_ok() {
                    self.model.pending_commands += 1;
                }
            }
        }

        if self.model.close_requested {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            return;
        }

        if self.model.pending_commands > 0 {
            ctx.request_repaint();
        }

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.heading("Icon Export");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    self.render_close_button(ui);
                    self.render_theme_controls(ui);
                    ui.separator();
                    self.render_download_button(ui);
                    self.render_export_button(ui);
                });
            });
            ui.add_space(4.0);
            self.render_export_options(ui);
            ui.add_space(4.0);
        });

        self.render_error_modal(ctx);

        egui::TopBottomPanel::bottom("status_panel")
            .resizable(false)
            .show(ctx, |ui| {
                self.render_status(ui);
            });

        egui::SidePanel::left("frames_panel")
            .resizable(true)
            .default_width(280.0)
            .show(ctx, |ui| {
                ui.add_space(8.0);
                ui.label(egui::RichText::new("Frames").strong());
                ui.add_space(4.0);
                egui::ScrollArea::vertical()
                    .id_salt("frames_scroll")
                    .show(ui, |ui| {
                        let frame_msgs = frames::view(ui, &self.model.frames);
                        self.inbox.extend(frame_msgs.into_iter().map(Msg::Frames));
                    });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(8.0);
            egui::ScrollArea::vertical()
                .id_salt("results_scroll")
                .show(ui, |ui| {
                    let result_msgs =
                        results::view(ui, &self.model.results, self.model.exporting);
                    self.inbox
                        .extend(result_msgs.into_iter().map(Msg::Results));
                });
        });
    }
}

impl IconPackApp {
    fn ensure_spacing(&self, ctx: &egui::Context) {
        ctx.style_mut(|style| {
            style.spacing.item_spacing = egui::vec2(6.0, 6.0);
        });
    }

    /// Queue files dropped onto the window as new frames.
    fn collect_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped: Vec<PathBuf> = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .filter_map(|file| file.path.clone())
                .collect()
        });
        if !dropped.is_empty() {
            self.inbox.push(Msg::Frames(FramesMsg::FilesPicked(dropped)));
        }
    }

    fn render_theme_controls(&mut self, ui: &mut egui::Ui) {
        ui.add_space(2.0);
        egui::widgets::global_theme_preference_switch(ui);
    }

    fn render_close_button(&mut self, ui: &mut egui::Ui) {
        if ui
            .button(egui_phosphor::regular::X)
            .on_hover_text("Close")
            .clicked()
        {
            self.inbox.push(Msg::CloseRequested);
        }
    }

    fn render_export_button(&mut self, ui: &mut egui::Ui) {
        let button = egui::Button::new(format!(
            "{} Export Selected Frames",
            egui_phosphor::regular::EXPORT
        ));
        if ui
            .add_enabled(
                !self.model.exporting && !self.model.results.has_pending(),
                button,
            )
            .on_disabled_hover_text("Export or rename in progress")
            .clicked()
        {
            self.inbox.push(Msg::ExportRequested);
        }
    }

    /// Render the "Download All" button and handle the save-file dialog interaction.
    ///
    /// Enabled once an export produced results. The chosen path always ends in `.zip`.
    fn render_download_button(&mut self, ui: &mut egui::Ui) {
        let button = egui::Button::new(format!(
            "{} Download All",
            egui_phosphor::regular::DOWNLOAD_SIMPLE
        ));

        if ui
            .add_enabled(!self.model.results.is_empty(), button)
            .on_disabled_hover_text("Export frames first")
            .clicked()
        {
            let default_name = suggested_package_name(&self.model.category);
            let dialog = rfd::FileDialog::new()
                .set_title("Save icon package")
                .add_filter("Zip archive", &["zip"])
                .set_file_name(&default_name);

            if let Some(path) = dialog.save_file() {
                let output_path = ensure_extension(path, "zip");
                self.inbox.push(Msg::DownloadRequested(output_path));
            } else {
                self.inbox.push(Msg::DownloadCancelled);
            }
        }

        if self.model.last_package.is_some()
            && ui
                .button(egui_phosphor::regular::FOLDER_OPEN)
                .on_hover_text("Show last package in file manager")
                .clicked()
        {
            self.inbox.push(Msg::RevealPackage);
        }
    }

    /// Category field, export mode, and manifest switch.
    fn render_export_options(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Category");
            let mut category = self.model.category.clone();
            if ui
                .add(
                    egui::TextEdit::singleline(&mut category)
                        .hint_text("Defaults to the frame's folder")
                        .desired_width(200.0),
                )
                .changed()
            {
                self.inbox.push(Msg::CategoryChanged(category));
            }

            ui.separator();

            let mut mode = self.model.export_mode;
            ui.label("SVG");
            ui.selectable_value(
                &mut mode,
                SvgExportMode::Source,
                SvgExportMode::Source.label(),
            )
            .on_hover_text("Copy the frame's SVG unchanged");
            ui.selectable_value(
                &mut mode,
                SvgExportMode::Normalized,
                SvgExportMode::Normalized.label(),
            )
            .on_hover_text("Re-serialize the parsed SVG tree");
            if mode != self.model.export_mode {
                self.inbox.push(Msg::SetExportMode(mode));
            }

            ui.separator();

            let mut include_manifest = self.model.include_manifest;
            if ui
                .checkbox(&mut include_manifest, "Include icons.json")
                .on_hover_text("Add a manifest with checksums to the package")
                .changed()
            {
                self.inbox.push(Msg::SetIncludeManifest(include_manifest));
            }
        });
    }

    /// Render a simple modal window for error messages.
    fn render_error_modal(&mut self, ctx: &egui::Context) {
        if let Some(message) = self.model.error.clone() {
            egui::Window::new("Error")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
                .show(ctx, |ui| {
                    ui.label(message);
                    ui.add_space(8.0);
                    if ui.button("OK").clicked() {
                        self.inbox.push(Msg::DismissError);
                    }
                });
        }
    }

    /// Render latest status message when present.
    fn render_status(&self, ui: &mut egui::Ui) {
        if let Some(text) = &self.model.status {
            let display = if self.model.pending_commands > 0 {
                format!("{}  ({} working…)", text, self.model.pending_commands)
            } else {
                text.to_string()
            };
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(display).color(egui::Color32::from_gray(68)));
                if self.model.pending_commands > 0 {
                    ui.add(egui::Spinner::new().size(14.0))
                        .on_hover_text(format!(
                            "{} task(s) running in background",
                            self.model.pending_commands
                        ));
                }
            });
        }
    }
}
