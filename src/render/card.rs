// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Drawing a single card.
//!
//! The background is copied into a fresh canvas and the phrase is drawn on
//! top. The shared background is never modified.

use super::font::LoadedFont;
use crate::layout::{layout_text, TextBlock};
use crate::models::config::RenderConfig;
use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_text_mut;

/// A rendered card and the layout used to draw it.
pub struct RenderedCard {
    pub image: RgbaImage,
    /// `None` when the padding left no room and the text was skipped.
    pub layout: Option<TextBlock>,
}

impl RenderedCard {
    pub fn text_drawn(&self) -> bool {
        self.layout.is_some()
    }
}

/// Render `phrase` onto a copy of `background`.
pub fn render_card(
    background: &RgbaImage,
    phrase: &str,
    config: &RenderConfig,
    font: &LoadedFont,
) -> RenderedCard {
    let mut canvas = background.clone();
    let (width, height) = canvas.dimensions();

    let layout = match layout_text(phrase, width, height, config, font) {
        Ok(block) => block,
        Err(e) => {
            log::warn!("Skipping text for {:?}: {}", phrase, e);
            return RenderedCard {
                image: canvas,
                layout: None,
            };
        }
    };

    let color = Rgba(config.text_color);
    for line in layout.lines.iter().filter(|line| !line.text.is_empty()) {
        draw_text_mut(&mut canvas, color, line.x, line.y, font.scale(), &font.font, &line.text);
    }

    RenderedCard {
        image: canvas,
        layout: Some(layout),
    }
}
