// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Background image loading.
//!
//! This module handles decoding the background image once and keeping it
//! as a shared, read-only RGBA buffer that each card copies.

use crate::error::{CardError, Result};
use image::RgbaImage;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Extensions offered in the open dialog and accepted on drop.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp"];

/// The decoded background, shared read-only between preview and export.
#[derive(Debug, Clone)]
pub struct Background {
    pub path: PathBuf,
    pub image: Arc<RgbaImage>,
}

impl Background {
    pub fn new(path: PathBuf, image: RgbaImage) -> Self {
        Self {
            path,
            image: Arc::new(image),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// Decode the image at `path` into an RGBA background.
pub fn load_background(path: &Path) -> Result<Background> {
    let invalid = |reason: String| CardError::InvalidImage {
        path: path.to_path_buf(),
        reason,
    };

    let decoded = image::open(path).map_err(|e| invalid(e.to_string()))?;
    let rgba = decoded.to_rgba8();
    if rgba.width() == 0 || rgba.height() == 0 {
        return Err(invalid("image has no pixels".to_string()));
    }

    log::info!(
        "Loaded background: {} ({}x{})",
        path.display(),
        rgba.width(),
        rgba.height()
    );
    Ok(Background::new(path.to_path_buf(), rgba))
}

/// Check whether `path` has one of the supported image extensions.
pub fn is_image_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}
