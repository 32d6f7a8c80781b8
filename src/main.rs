// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! CARDECK - Card Deck Generator
//!
//! A cross-platform desktop application that lays phrases over a
//! background image and exports one PNG card per phrase.

mod app;
mod error;
mod io;
mod layout;
mod models;
mod render;
mod ui;
mod util;

use anyhow::Result;
use app::CardDeckApp;

fn main() -> Result<()> {
    // Initialize logging, info level unless RUST_LOG says otherwise
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1024.0, 768.0])
            .with_min_inner_size([1024.0, 768.0])
            .with_title("CARDECK - Card Deck Generator"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "CARDECK",
        options,
        Box::new(|_cc| Ok(Box::new(CardDeckApp::new()))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
