// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Control panel.
//!
//! Buttons for loading inputs, the render settings, phrase navigation and
//! the "Generate Deck" button.

use crate::layout::Alignment;
use crate::models::config::{RenderConfig, SCALE_RANGE};

/// Result of control panel interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlsAction {
    None,
    LoadImage,
    LoadPhrases,
    ResetPhrases,
    SelectFolder,
    PrevPhrase,
    NextPhrase,
    Generate,
}

const BUTTON_SIZE: [f32; 2] = [150.0, 40.0];

/// Display the control panel.
///
/// Render settings are edited in place; everything else is returned as an
/// action for the application to perform.
pub fn show(
    ui: &mut egui::Ui,
    config: &mut RenderConfig,
    padding_input: &mut String,
    font_families: &[String],
    busy: bool,
) -> ControlsAction {
    let mut action = ControlsAction::None;

    egui::Grid::new("input_buttons")
        .num_columns(2)
        .spacing([10.0, 10.0])
        .show(ui, |ui| {
            if ui.add_sized(BUTTON_SIZE, egui::Button::new("Load Image")).clicked() {
                action = ControlsAction::LoadImage;
            }
            if ui.add_sized(BUTTON_SIZE, egui::Button::new("Load Phrases")).clicked() {
                action = ControlsAction::LoadPhrases;
            }
            ui.end_row();

            if ui.add_sized(BUTTON_SIZE, egui::Button::new("Reset Phrases")).clicked() {
                action = ControlsAction::ResetPhrases;
            }
            if ui.add_sized(BUTTON_SIZE, egui::Button::new("Select Folder")).clicked() {
                action = ControlsAction::SelectFolder;
            }
            ui.end_row();
        });

    ui.add_space(12.0);
    ui.label("Text scale (%)");
    let mut scale = config.scale_percent();
    if ui
        .add(egui::Slider::new(&mut scale, SCALE_RANGE).step_by(1.0))
        .changed()
    {
        config.set_scale_percent(scale);
    }

    ui.add_space(8.0);
    ui.label("Font");
    egui::ComboBox::from_id_source("font_family")
        .width(BUTTON_SIZE[0] * 2.0)
        .selected_text(config.font_family.as_str())
        .show_ui(ui, |ui| {
            for family in font_families {
                ui.selectable_value(&mut config.font_family, family.clone(), family);
            }
        });

    ui.add_space(8.0);
    ui.label("Text alignment");
    egui::ComboBox::from_id_source("alignment")
        .selected_text(alignment_label(config.alignment))
        .show_ui(ui, |ui| {
            for alignment in Alignment::ALL {
                ui.selectable_value(&mut config.alignment, alignment, alignment_label(alignment));
            }
        });

    ui.add_space(8.0);
    ui.horizontal(|ui| {
        ui.label("Padding (px)");
        let response = ui.add(egui::TextEdit::singleline(padding_input).desired_width(40.0));
        if response.changed() {
            padding_input.retain(|c| c.is_ascii_digit());
            config.parse_padding(padding_input);
        }
    });

    ui.add_space(12.0);
    ui.horizontal(|ui| {
        if ui.add_sized(BUTTON_SIZE, egui::Button::new("◀ Previous")).clicked() {
            action = ControlsAction::PrevPhrase;
        }
        if ui.add_sized(BUTTON_SIZE, egui::Button::new("Next ▶")).clicked() {
            action = ControlsAction::NextPhrase;
        }
    });

    ui.with_layout(egui::Layout::bottom_up(egui::Align::LEFT), |ui| {
        ui.add_space(8.0);
        let generate = egui::Button::new(
            egui::RichText::new("Generate Deck").color(egui::Color32::WHITE),
        )
        .fill(egui::Color32::from_rgb(30, 80, 200));
        if ui
            .add_enabled(!busy, generate.min_size(egui::vec2(BUTTON_SIZE[0] * 2.0 + 10.0, BUTTON_SIZE[1])))
            .clicked()
        {
            action = ControlsAction::Generate;
        }
    });

    action
}

fn alignment_label(alignment: Alignment) -> &'static str {
    match alignment {
        Alignment::Left => "Left",
        Alignment::Center => "Center",
        Alignment::Right => "Right",
    }
}
