// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Render configuration.
//!
//! The single value object read by both the preview and the deck export.
//! It is passed explicitly to the layout engine; nothing reaches into the
//! UI to look up padding or font settings.

use crate::layout::{Alignment, VerticalPlacement};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

pub const DEFAULT_FONT_FAMILY: &str = "DejaVu Sans";
pub const DEFAULT_SCALE_PERCENT: u32 = 20;
pub const DEFAULT_PADDING: u32 = 10;
pub const SCALE_RANGE: RangeInclusive<u32> = 10..=100;
pub const PADDING_RANGE: RangeInclusive<u32> = 0..=100;

/// Render settings; last value wins, no history is kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    pub font_family: String,
    scale_percent: u32,
    pub alignment: Alignment,
    padding: u32,
    pub text_color: [u8; 4],
    pub placement: VerticalPlacement,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            scale_percent: DEFAULT_SCALE_PERCENT,
            alignment: Alignment::default(),
            padding: DEFAULT_PADDING,
            text_color: [0, 0, 0, 255],
            placement: VerticalPlacement::default(),
        }
    }
}

impl RenderConfig {
    pub fn scale_percent(&self) -> u32 {
        self.scale_percent
    }

    /// Set the text scale, clamped to the slider range.
    pub fn set_scale_percent(&mut self, percent: u32) {
        self.scale_percent = percent.clamp(*SCALE_RANGE.start(), *SCALE_RANGE.end());
    }

    pub fn padding(&self) -> u32 {
        self.padding
    }

    /// Set the padding in pixels, clamped to the accepted range.
    pub fn set_padding(&mut self, padding: u32) {
        self.padding = padding.clamp(*PADDING_RANGE.start(), *PADDING_RANGE.end());
    }

    /// Apply padding typed by the user; unparsable input restores the default.
    pub fn parse_padding(&mut self, input: &str) {
        match input.trim().parse::<u32>() {
            Ok(value) => self.set_padding(value),
            Err(_) => {
                log::debug!("Padding {:?} is not a number, using {}", input, DEFAULT_PADDING);
                self.padding = DEFAULT_PADDING;
            }
        }
    }

    /// Font size in points; the scale percentage maps one-to-one.
    pub fn font_points(&self) -> f32 {
        self.scale_percent as f32
    }

    /// Font size in pixels on the full resolution image (96 DPI).
    pub fn font_px(&self) -> f32 {
        self.font_points() * 96.0 / 72.0
    }
}
