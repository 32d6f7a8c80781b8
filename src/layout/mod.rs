// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Text layout inside the placement rectangle.
//!
//! Word wrapping, horizontal alignment and vertical placement of a phrase.
//! The preview and the deck export both go through [`layout_text`], so what
//! the user sees is what gets written to disk.

use crate::error::Result;
use crate::models::config::RenderConfig;
use crate::util::geometry::{clamp_vertical, compute_rectangle, compute_vertical_center, Rect};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Horizontal text alignment within the placement rectangle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    #[default]
    Center,
    Right,
}

impl Alignment {
    pub const ALL: [Alignment; 3] = [Alignment::Left, Alignment::Center, Alignment::Right];

    pub fn as_str(&self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
        }
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Alignment {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(Alignment::Left),
            "center" | "centre" => Ok(Alignment::Center),
            "right" => Ok(Alignment::Right),
            other => Err(format!("unknown alignment: {other}")),
        }
    }
}

/// Where the text block sits vertically.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalPlacement {
    /// Centered between the paddings.
    #[default]
    Centered,
    /// Pinned top offset in image pixels, clamped between the paddings.
    Offset(u32),
}

/// Text metrics needed for wrapping and placement.
pub trait TextMeasure {
    /// Width of the inked pixels of a single line of text.
    fn line_width(&self, text: &str) -> u32;

    /// Distance from the drawing origin to the first inked column.
    ///
    /// Negative when a glyph reaches left of the origin.
    fn ink_offset(&self, _text: &str) -> i32 {
        0
    }

    /// Distance between consecutive baselines, in pixels.
    fn line_height(&self) -> u32;
}

/// A wrapped line with its drawing origin.
///
/// `x` is where the line is drawn from; its ink starts at `x + ink_offset`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedLine {
    pub text: String,
    pub x: i32,
    pub y: i32,
    pub width: u32,
}

/// The laid out phrase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBlock {
    /// Placement rectangle the text was wrapped into.
    pub rect: Rect,
    /// Top of the first line.
    pub top: u32,
    /// Total height of all lines.
    pub height: u32,
    pub lines: Vec<PlacedLine>,
}

/// Greedy word wrap that only breaks on whitespace.
///
/// A word wider than `max_width` is kept whole on its own line. Newlines in
/// `text` force a break.
pub fn wrap_text(text: &str, max_width: u32, measure: &impl TextMeasure) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            if current.is_empty() {
                current.push_str(word);
                continue;
            }

            let candidate = format!("{current} {word}");
            if measure.line_width(&candidate) <= max_width {
                current = candidate;
            } else {
                lines.push(std::mem::replace(&mut current, word.to_string()));
            }
        }
        lines.push(current);
    }

    lines
}

/// Lay out `text` on a container of the given size.
///
/// Fails with `InvalidLayout` when the padding leaves no room for text.
pub fn layout_text(
    text: &str,
    container_width: u32,
    container_height: u32,
    config: &RenderConfig,
    measure: &impl TextMeasure,
) -> Result<TextBlock> {
    let padding = config.padding();
    let rect = compute_rectangle(container_width, container_height, padding)?;

    let line_height = measure.line_height();
    let wrapped = wrap_text(text, rect.width, measure);
    let height = line_height.saturating_mul(wrapped.len() as u32);

    let top = match config.placement {
        VerticalPlacement::Centered => compute_vertical_center(height, container_height, padding),
        VerticalPlacement::Offset(y) => clamp_vertical(y as i64, height, container_height, padding),
    };

    let lines = wrapped
        .into_iter()
        .enumerate()
        .map(|(i, line)| {
            let width = measure.line_width(&line);
            let x = align_x(&rect, width, config.alignment) - measure.ink_offset(&line);
            let y = top as i64 + i as i64 * line_height as i64;
            PlacedLine {
                text: line,
                x,
                y: y as i32,
                width,
            }
        })
        .collect();

    log::debug!(
        "Laid out {:?} at top {} ({}px tall) in {:?}",
        text,
        top,
        height,
        rect
    );

    Ok(TextBlock {
        rect,
        top,
        height,
        lines,
    })
}

/// Resolve the left edge of a line's ink; overflowing lines may start left of the image.
fn align_x(rect: &Rect, line_width: u32, alignment: Alignment) -> i32 {
    let left = rect.x as i64;
    let width = line_width as i64;
    let x = match alignment {
        Alignment::Left => left,
        Alignment::Center => left + (rect.width as i64 - width) / 2,
        Alignment::Right => rect.right() as i64 - width,
    };
    x as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CardError;

    /// Monospace metrics: every char is 10px wide, lines are 20px tall.
    struct Mono;

    impl TextMeasure for Mono {
        fn line_width(&self, text: &str) -> u32 {
            text.chars().count() as u32 * 10
        }

        fn line_height(&self) -> u32 {
            20
        }
    }

    /// Like `Mono`, but the ink starts 3px left of the origin.
    struct Overhang;

    impl TextMeasure for Overhang {
        fn line_width(&self, text: &str) -> u32 {
            Mono.line_width(text)
        }

        fn ink_offset(&self, _text: &str) -> i32 {
            -3
        }

        fn line_height(&self) -> u32 {
            20
        }
    }

    fn config(padding: u32, alignment: Alignment) -> RenderConfig {
        let mut config = RenderConfig::default();
        config.set_padding(padding);
        config.alignment = alignment;
        config
    }

    #[test]
    fn test_alignment_parse_and_display() {
        for alignment in Alignment::ALL {
            assert_eq!(alignment.to_string().parse::<Alignment>(), Ok(alignment));
        }
        assert_eq!("  Center ".parse::<Alignment>(), Ok(Alignment::Center));
        assert!("justify".parse::<Alignment>().is_err());
    }

    #[test]
    fn test_wrap_fits_on_one_line() {
        assert_eq!(wrap_text("Ace of Spades", 200, &Mono), vec!["Ace of Spades"]);
    }

    #[test]
    fn test_wrap_is_greedy() {
        // 60px wide: "aa bb" (50px) fits, adding " cc" (80px) does not
        let lines = wrap_text("aa bb cc dd ee", 60, &Mono);
        assert_eq!(lines, vec!["aa bb", "cc dd", "ee"]);
    }

    #[test]
    fn test_wrap_never_breaks_mid_word() {
        let lines = wrap_text("a extraordinarily b", 50, &Mono);
        assert_eq!(lines, vec!["a", "extraordinarily", "b"]);
    }

    #[test]
    fn test_wrap_collapses_whitespace_and_honours_newlines() {
        let lines = wrap_text("one   two\nthree", 1000, &Mono);
        assert_eq!(lines, vec!["one two", "three"]);
    }

    #[test]
    fn test_layout_center_alignment() {
        // 200x100 container, padding 10 -> rect 180x80
        let block = layout_text("abcd", 200, 100, &config(10, Alignment::Center), &Mono).unwrap();
        assert_eq!(block.rect, Rect::new(10, 10, 180, 80));
        assert_eq!(block.lines.len(), 1);
        assert_eq!(block.lines[0].x, 10 + (180 - 40) / 2);
        assert_eq!(block.top, (100 - 20) / 2);
        assert_eq!(block.lines[0].y, 40);
    }

    #[test]
    fn test_layout_left_and_right_alignment() {
        let left = layout_text("abcd", 200, 100, &config(10, Alignment::Left), &Mono).unwrap();
        assert_eq!(left.lines[0].x, 10);

        let right = layout_text("abcd", 200, 100, &config(10, Alignment::Right), &Mono).unwrap();
        assert_eq!(right.lines[0].x, 190 - 40);
    }

    #[test]
    fn test_layout_places_ink_not_origin() {
        // Ink of every line lands exactly on the rectangle's edges
        let left = layout_text("abcd", 200, 100, &config(10, Alignment::Left), &Overhang).unwrap();
        assert_eq!(left.lines[0].x, 13);

        let right = layout_text("abcd", 200, 100, &config(10, Alignment::Right), &Overhang).unwrap();
        assert_eq!(right.lines[0].x - 3 + 40, 190);
    }

    #[test]
    fn test_layout_multiline_block_is_centered() {
        // rect width 60 -> three lines of 20px -> 60px tall block
        let block = layout_text("aa bb cc dd ee", 80, 200, &config(10, Alignment::Left), &Mono).unwrap();
        assert_eq!(block.lines.len(), 3);
        assert_eq!(block.height, 60);
        assert_eq!(block.top, 70);
        let ys: Vec<i32> = block.lines.iter().map(|l| l.y).collect();
        assert_eq!(ys, vec![70, 90, 110]);
    }

    #[test]
    fn test_layout_too_tall_is_top_aligned_at_padding() {
        // 30px container height with padding 5: one 20px line fits, two do not
        let block = layout_text("aa bb", 40, 30, &config(5, Alignment::Left), &Mono).unwrap();
        assert_eq!(block.lines.len(), 2);
        assert_eq!(block.top, 5);
    }

    #[test]
    fn test_layout_pinned_offset_is_clamped() {
        let mut config = config(10, Alignment::Center);
        config.placement = VerticalPlacement::Offset(500);
        let block = layout_text("abcd", 200, 100, &config, &Mono).unwrap();
        assert_eq!(block.top, 100 - 20 - 10);

        config.placement = VerticalPlacement::Offset(15);
        let block = layout_text("abcd", 200, 100, &config, &Mono).unwrap();
        assert_eq!(block.top, 15);
    }

    #[test]
    fn test_layout_invalid_padding() {
        let result = layout_text("abcd", 100, 100, &config(50, Alignment::Center), &Mono);
        assert!(matches!(result, Err(CardError::InvalidLayout { .. })));
    }
}
