// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Preview canvas for the current card.
//!
//! Shows the card rendered at full resolution, scaled down to fit. The text
//! band can be dragged vertically; double-clicking it re-centers the text.

use crate::util::geometry::{fit_to_height, to_image_space, to_screen_space};

/// Tallest preview shown, in points.
pub const MAX_PREVIEW_HEIGHT: u32 = 768;

/// Result of canvas interaction.
pub enum CanvasAction {
    None,
    /// Vertical drag of the text, in image pixels.
    DragText(f32),
    ResetPlacement,
}

/// What the canvas needs to draw the current preview.
pub struct PreviewView<'a> {
    pub texture: &'a egui::TextureHandle,
    pub image_size: (u32, u32),
    /// Top and height of the text block, in image pixels.
    pub text_band: Option<(u32, u32)>,
}

/// Display the preview area and handle dragging of the text.
pub fn show(ui: &mut egui::Ui, preview: Option<PreviewView<'_>>, status: &str) -> CanvasAction {
    let mut action = CanvasAction::None;
    ui.style_mut().visuals.extreme_bg_color = egui::Color32::from_gray(40);

    let available_size = ui.available_size() - egui::vec2(0.0, 24.0);

    egui::Frame::canvas(ui.style()).show(ui, |ui| {
        ui.set_min_size(available_size);

        let Some(preview) = preview else {
            show_welcome(ui);
            return;
        };

        let (img_width, img_height) = preview.image_size;
        let (fit_width, fit_height, _) = fit_to_height(img_width, img_height, MAX_PREVIEW_HEIGHT);

        // Shrink further if the panel is narrower or shorter than the preview
        let available = ui.available_size();
        let shrink = (available.x / fit_width as f32)
            .min(available.y / fit_height as f32)
            .min(1.0);
        let display_width = fit_width as f32 * shrink;
        let display_height = fit_height as f32 * shrink;
        let scale = display_width / img_width as f32;

        let x_offset = ((available.x - display_width) / 2.0).max(0.0);
        let y_offset = ((available.y - display_height) / 2.0).max(0.0);
        let image_rect = egui::Rect::from_min_size(
            ui.min_rect().min + egui::vec2(x_offset, y_offset),
            egui::vec2(display_width, display_height),
        );

        ui.painter().image(
            preview.texture.id(),
            image_rect,
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );

        if let Some((top, height)) = preview.text_band {
            let band = egui::Rect::from_min_size(
                image_rect.min + egui::vec2(0.0, to_screen_space(top as f32, scale)),
                egui::vec2(display_width, to_screen_space(height as f32, scale).max(4.0)),
            );

            let response = ui
                .allocate_rect(band, egui::Sense::click_and_drag())
                .on_hover_cursor(egui::CursorIcon::ResizeVertical)
                .on_hover_text("Drag to move the text, double-click to re-center");

            if response.hovered() || response.dragged() {
                ui.painter().rect_stroke(
                    band,
                    0.0,
                    egui::Stroke::new(1.0, egui::Color32::LIGHT_BLUE),
                );
            }

            if response.double_clicked() {
                action = CanvasAction::ResetPlacement;
            } else if response.dragged() {
                let delta = response.drag_delta().y;
                if delta != 0.0 {
                    action = CanvasAction::DragText(to_image_space(delta, scale));
                }
            }
        }
    });

    ui.separator();
    ui.label(status);

    action
}

fn show_welcome(ui: &mut egui::Ui) {
    ui.centered_and_justified(|ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(20.0);
            ui.heading(
                egui::RichText::new("CARDECK")
                    .size(32.0)
                    .color(egui::Color32::from_gray(200)),
            );
            ui.label(
                egui::RichText::new("Card deck generator")
                    .size(14.0)
                    .color(egui::Color32::from_gray(150)),
            );
            ui.add_space(20.0);
            ui.label(
                egui::RichText::new("Open or drop a background image to begin")
                    .color(egui::Color32::from_gray(180)),
            );
            ui.add_space(10.0);
            ui.label(
                egui::RichText::new("File → Open Background...")
                    .weak()
                    .color(egui::Color32::from_gray(130)),
            );
        });
    });
}
