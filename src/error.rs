// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Error types shared by the layout engine, the renderer and the loaders.

use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong while preparing or producing a deck.
#[derive(Debug, Error)]
pub enum CardError {
    /// The background file is missing, unreadable, or not a decodable image.
    #[error("Invalid image {}: {reason}", path.display())]
    InvalidImage { path: PathBuf, reason: String },

    /// Padding leaves no room for text inside the container.
    #[error("Invalid layout: padding {padding} does not fit a {width}x{height} container")]
    InvalidLayout { width: u32, height: u32, padding: u32 },

    /// The phrase file is unreadable or malformed.
    #[error("Cannot read phrases from {}: {reason}", path.display())]
    PhraseSource { path: PathBuf, reason: String },

    /// A single card could not be written.
    #[error("Card {} failed: {reason}", index + 1)]
    Render { index: usize, reason: String },

    /// No usable font could be loaded.
    #[error("Font error: {0}")]
    Font(String),

    #[error("No destination folder selected")]
    MissingDestination,

    #[error("Missing input: {0}")]
    MissingInputs(&'static str),
}

pub type Result<T> = std::result::Result<T, CardError>;
