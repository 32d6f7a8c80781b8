// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module provides the placement rectangle and vertical clamping used
//! by the layout engine, plus the conversions between preview coordinates
//! and image pixel coordinates.

use crate::error::{CardError, Result};
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in image pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Exclusive right edge.
    pub fn right(&self) -> u32 {
        self.x + self.width
    }
}

/// Compute the placement rectangle inset by `padding` on every side.
///
/// Fails with [`CardError::InvalidLayout`] when the padding leaves a
/// non-positive width or height.
pub fn compute_rectangle(container_width: u32, container_height: u32, padding: u32) -> Result<Rect> {
    let inset = padding as u64 * 2;
    if inset >= container_width as u64 || inset >= container_height as u64 {
        return Err(CardError::InvalidLayout {
            width: container_width,
            height: container_height,
            padding,
        });
    }

    let inset = padding * 2;
    Ok(Rect::new(
        padding,
        padding,
        container_width - inset,
        container_height - inset,
    ))
}

/// Vertically center content of `content_height` in the container.
///
/// The result is clamped to `[padding, container_height - content_height - padding]`.
/// When that range is empty the content is top-aligned at `padding`.
pub fn compute_vertical_center(content_height: u32, container_height: u32, padding: u32) -> u32 {
    let centered = (container_height as i64 - content_height as i64) / 2;
    clamp_offset(centered, content_height, container_height, padding)
}

/// Clamp a requested top offset so the content stays between the paddings.
///
/// Uses the same resolution as [`compute_vertical_center`] for an empty range.
pub fn clamp_vertical(y: i64, content_height: u32, container_height: u32, padding: u32) -> u32 {
    clamp_offset(y, content_height, container_height, padding)
}

fn clamp_offset(y: i64, content_height: u32, container_height: u32, padding: u32) -> u32 {
    let min = padding as i64;
    let max = container_height as i64 - content_height as i64 - padding as i64;
    if max < min {
        return padding;
    }
    y.clamp(min, max) as u32
}

/// Scale an image down to fit `max_height`, never scaling up.
///
/// Returns the scaled width, height and the scale factor applied.
pub fn fit_to_height(width: u32, height: u32, max_height: u32) -> (u32, u32, f32) {
    if height == 0 {
        return (width, height, 1.0);
    }
    let scale = (max_height as f32 / height as f32).min(1.0);
    let scaled_width = ((width as f32 * scale) as u32).max(1);
    let scaled_height = ((height as f32 * scale) as u32).max(1);
    (scaled_width, scaled_height, scale)
}

/// Convert a preview-space distance to image pixels.
pub fn to_image_space(distance: f32, scale: f32) -> f32 {
    if scale <= 0.0 {
        return distance;
    }
    distance / scale
}

/// Convert an image-pixel distance to preview space.
pub fn to_screen_space(distance: f32, scale: f32) -> f32 {
    distance * scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangle_inset_on_every_side() {
        for padding in [0, 1, 10, 20, 149] {
            let rect = compute_rectangle(400, 300, padding).unwrap();
            assert_eq!(rect.x, padding);
            assert_eq!(rect.y, padding);
            assert_eq!(400 - rect.right(), padding);
            assert_eq!(300 - (rect.y + rect.height), padding);
        }
    }

    #[test]
    fn test_rectangle_zero_padding_is_full_container() {
        let rect = compute_rectangle(100, 100, 0).unwrap();
        assert_eq!(rect, Rect::new(0, 0, 100, 100));
    }

    #[test]
    fn test_rectangle_rejects_oversized_padding() {
        assert!(matches!(
            compute_rectangle(100, 100, 50),
            Err(CardError::InvalidLayout { padding: 50, .. })
        ));
        assert!(compute_rectangle(100, 40, 20).is_err());
        assert!(compute_rectangle(40, 100, 25).is_err());
        assert!(compute_rectangle(0, 0, 0).is_err());
        assert!(compute_rectangle(100, 100, u32::MAX).is_err());
    }

    #[test]
    fn test_rectangle_batch_dimensions() {
        let rect = compute_rectangle(800, 600, 20).unwrap();
        assert_eq!(rect, Rect::new(20, 20, 760, 560));
    }

    #[test]
    fn test_vertical_center_stays_in_range() {
        let container = 600;
        for padding in [0, 5, 20, 100] {
            for content in [0, 10, 100, 300, 399] {
                let y = compute_vertical_center(content, container, padding);
                let max = container as i64 - content as i64 - padding as i64;
                if max >= padding as i64 {
                    assert!(y >= padding);
                    assert!(y as i64 <= max);
                } else {
                    assert_eq!(y, padding);
                }
            }
        }
    }

    #[test]
    fn test_vertical_center_exact() {
        assert_eq!(compute_vertical_center(100, 600, 20), 250);
        assert_eq!(compute_vertical_center(0, 100, 0), 50);
    }

    #[test]
    fn test_vertical_center_collapses_to_padding_when_too_tall() {
        // Range [20, 600 - 580 - 20] = [20, 0] is inverted
        assert_eq!(compute_vertical_center(580, 600, 20), 20);
        assert_eq!(compute_vertical_center(900, 600, 20), 20);
        assert_eq!(compute_vertical_center(900, 600, 0), 0);
    }

    #[test]
    fn test_clamp_vertical_bounds() {
        assert_eq!(clamp_vertical(-50, 100, 600, 20), 20);
        assert_eq!(clamp_vertical(1000, 100, 600, 20), 480);
        assert_eq!(clamp_vertical(300, 100, 600, 20), 300);
        assert_eq!(clamp_vertical(300, 700, 600, 20), 20);
    }

    #[test]
    fn test_fit_to_height_never_upscales() {
        assert_eq!(fit_to_height(400, 300, 768), (400, 300, 1.0));

        let (w, h, scale) = fit_to_height(2000, 1536, 768);
        assert_eq!((w, h), (1000, 768));
        assert!((scale - 0.5).abs() < 0.0001);
    }

    #[test]
    fn test_screen_image_roundtrip() {
        let scale = 0.375;
        let image = to_image_space(to_screen_space(120.0, scale), scale);
        assert!((image - 120.0).abs() < 0.0001);
    }
}
