// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Font discovery and metrics.
//!
//! Fonts are looked up by family name among the installed system fonts.
//! Unknown families fall back to the bundled DejaVu Sans so a deck can
//! always be rendered.

use crate::error::{CardError, Result};
use crate::layout::TextMeasure;
use ab_glyph::{point, Font, FontArc, FontVec, GlyphId, PxScale, ScaleFont};
use fontdb::{Database, Family, Query};
use std::collections::BTreeSet;

const BUNDLED_FONT: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");
pub const BUNDLED_FAMILY: &str = "DejaVu Sans";

/// Installed font families plus the bundled fallback.
pub struct FontLibrary {
    db: Database,
}

impl Default for FontLibrary {
    fn default() -> Self {
        Self::new()
    }
}

impl FontLibrary {
    /// Library with only the bundled font.
    pub fn new() -> Self {
        Self {
            db: Database::new(),
        }
    }

    /// Library with every font installed on the system.
    pub fn with_system_fonts() -> Self {
        let mut db = Database::new();
        db.load_system_fonts();
        log::info!("Found {} system font faces", db.len());
        Self { db }
    }

    /// Sorted family names, for the font picker.
    pub fn families(&self) -> Vec<String> {
        let mut names: BTreeSet<String> = self
            .db
            .faces()
            .flat_map(|face| face.families.iter().map(|(name, _)| name.clone()))
            .collect();
        names.insert(BUNDLED_FAMILY.to_string());
        names.into_iter().collect()
    }

    /// Load `family` at `px` pixels, falling back to the bundled font.
    pub fn load(&self, family: &str, px: f32) -> Result<LoadedFont> {
        if let Some(font) = self.load_system(family) {
            log::debug!("Using system font {:?}", family);
            return Ok(LoadedFont::new(family, font, px));
        }

        if family != BUNDLED_FAMILY {
            log::warn!("Font {:?} not available, using {}", family, BUNDLED_FAMILY);
        }
        Ok(LoadedFont::new(BUNDLED_FAMILY, bundled_font()?, px))
    }

    fn load_system(&self, family: &str) -> Option<FontArc> {
        let families = [Family::Name(family)];
        let id = self.db.query(&Query {
            families: &families,
            ..Default::default()
        })?;

        let parsed = self
            .db
            .with_face_data(id, |data, index| FontVec::try_from_vec_and_index(data.to_vec(), index))?;

        match parsed {
            Ok(font) => Some(FontArc::from(font)),
            Err(e) => {
                log::warn!("Failed to parse font {:?}: {}", family, e);
                None
            }
        }
    }
}

fn bundled_font() -> Result<FontArc> {
    FontArc::try_from_slice(BUNDLED_FONT)
        .map_err(|e| CardError::Font(format!("bundled {BUNDLED_FAMILY}: {e}")))
}

/// A font resolved for a specific pixel size.
#[derive(Clone)]
pub struct LoadedFont {
    pub family: String,
    pub font: FontArc,
    pub px: f32,
}

impl LoadedFont {
    pub fn new(family: &str, font: FontArc, px: f32) -> Self {
        Self {
            family: family.to_string(),
            font,
            px,
        }
    }

    pub fn scale(&self) -> PxScale {
        PxScale::from(self.px)
    }

    /// Same font at a different size.
    pub fn resized(&self, px: f32) -> Self {
        Self {
            px,
            ..self.clone()
        }
    }

    /// Horizontal pixel span `[start, end)` that `draw_text_mut` paints for
    /// `text`, relative to the drawing origin. `None` for blank text.
    ///
    /// Glyphs are placed exactly as imageproc places them, so the span
    /// includes side bearings and the rounding of each glyph's pixel bounds.
    pub fn ink_span(&self, text: &str) -> Option<(i32, i32)> {
        let scale = self.scale();
        let scaled = self.font.as_scaled(scale);
        let mut caret = 0.0f32;
        let mut last: Option<GlyphId> = None;
        let mut span: Option<(i32, i32)> = None;

        for c in text.chars() {
            let id = scaled.glyph_id(c);
            let glyph = id.with_scale_and_position(scale, point(caret, scaled.ascent()));
            caret += scaled.h_advance(id);

            let Some(outlined) = scaled.outline_glyph(glyph) else {
                continue;
            };
            if let Some(last) = last {
                caret += scaled.kern(id, last);
            }
            last = Some(id);

            let bounds = outlined.px_bounds();
            let start = bounds.min.x.round() as i32;
            let end = start + bounds.width().round() as i32;
            span = Some(match span {
                None => (start, end),
                Some((s, e)) => (s.min(start), e.max(end)),
            });
        }

        span
    }
}

impl TextMeasure for LoadedFont {
    fn line_width(&self, text: &str) -> u32 {
        self.ink_span(text)
            .map(|(start, end)| (end - start).max(0) as u32)
            .unwrap_or(0)
    }

    fn ink_offset(&self, text: &str) -> i32 {
        self.ink_span(text).map(|(start, _)| start).unwrap_or(0)
    }

    fn line_height(&self) -> u32 {
        let scaled = self.font.as_scaled(self.scale());
        (scaled.height() + scaled.line_gap()).ceil().max(1.0) as u32
    }
}
