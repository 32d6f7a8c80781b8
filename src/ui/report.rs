// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Deck generation progress and report windows.

use crate::render::deck::{CardStatus, Progress, RenderReport};

/// Result of report window interaction.
pub enum ReportAction {
    None,
    Export(&'static str),
    Close,
}

/// Modal progress window; returns true when Cancel was clicked.
pub fn show_progress(ctx: &egui::Context, progress: Progress, cancelling: bool) -> bool {
    let mut cancel = false;
    egui::Window::new("Generating deck")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            let fraction = if progress.total == 0 {
                0.0
            } else {
                progress.done as f32 / progress.total as f32
            };
            ui.label(format!("Card {} of {}", progress.done, progress.total));
            ui.add(egui::ProgressBar::new(fraction).show_percentage());
            if ui.add_enabled(!cancelling, egui::Button::new("Cancel")).clicked() {
                cancel = true;
            }
        });
    cancel
}

/// Window listing the outcome of the last deck generation.
pub fn show(ctx: &egui::Context, report: &RenderReport) -> ReportAction {
    let mut action = ReportAction::None;

    egui::Window::new("Deck report")
        .collapsible(false)
        .default_width(420.0)
        .show(ctx, |ui| {
            let heading = if report.is_success() {
                egui::RichText::new("Deck generated successfully").color(egui::Color32::LIGHT_GREEN)
            } else {
                egui::RichText::new("Deck generated with problems").color(egui::Color32::LIGHT_RED)
            };
            ui.heading(heading);
            ui.label(report.summary());
            ui.separator();

            egui::ScrollArea::vertical().max_height(240.0).show(ui, |ui| {
                for outcome in &report.outcomes {
                    let (marker, detail) = match &outcome.status {
                        CardStatus::Written { text_drawn: true } => ("✔", String::new()),
                        CardStatus::Written { text_drawn: false } => {
                            ("✔", " (no room for text)".to_string())
                        }
                        CardStatus::Failed { reason } => ("✖", format!(" - {reason}")),
                        CardStatus::Cancelled => ("–", " (cancelled)".to_string()),
                    };
                    ui.label(format!(
                        "{} card_{}.png  {}{}",
                        marker,
                        outcome.number(),
                        outcome.phrase,
                        detail
                    ));
                }
            });

            ui.separator();
            ui.horizontal(|ui| {
                if ui.button("Export JSON...").clicked() {
                    action = ReportAction::Export("json");
                }
                if ui.button("Export YAML...").clicked() {
                    action = ReportAction::Export("yaml");
                }
                if ui.button("Close").clicked() {
                    action = ReportAction::Close;
                }
            });
        });

    action
}
