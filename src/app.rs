// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module contains the main application structure that implements
//! the egui::App trait. It owns the editing session, turns UI actions into
//! session changes and runs image loading and deck generation on
//! background threads.

use crate::error::CardError;
use crate::io::media::{is_image_path, load_background, Background, IMAGE_EXTENSIONS};
use crate::io::phrases::{is_phrase_path, PHRASE_EXTENSIONS};
use crate::io::serialization;
use crate::layout::VerticalPlacement;
use crate::models::config::RenderConfig;
use crate::models::session::Session;
use crate::render::card::render_card;
use crate::render::deck::{render_deck_with, Progress, RenderReport};
use crate::render::font::{FontLibrary, LoadedFont};
use crate::ui::{canvas, controls, report};
use crate::util::geometry::{clamp_vertical, fit_to_height};
use image::imageops::{self, FilterType};
use image::RgbaImage;
use std::fmt::Display;
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Minimum time between two preview renders.
const PREVIEW_INTERVAL: Duration = Duration::from_millis(50);

/// The current card rendered for display.
struct Preview {
    /// Card downscaled to at most the preview height.
    texture: egui::TextureHandle,
    /// Full size of the card in image pixels.
    image_size: (u32, u32),
    /// Top and height of the text block in image pixels.
    text_band: Option<(u32, u32)>,
}

/// Inputs the preview was rendered from; a change triggers a re-render.
#[derive(PartialEq)]
struct PreviewKey {
    background_version: u64,
    phrase: Option<String>,
    config: RenderConfig,
}

/// Messages from the deck generation thread.
enum GenerationEvent {
    Progress(Progress),
    Finished(RenderReport),
}

/// A deck generation running in the background.
struct Generation {
    receiver: Receiver<GenerationEvent>,
    cancel: Arc<AtomicBool>,
    progress: Progress,
}

/// Main application state.
pub struct CardDeckApp {
    /// Background, phrases, destination and render settings
    session: Session,

    /// Installed fonts and the family names offered in the picker
    fonts: FontLibrary,
    font_families: Vec<String>,

    /// Font for the requested family at the current size
    font: Option<(String, LoadedFont)>,

    /// Raw contents of the padding text field
    padding_input: String,

    preview: Option<Preview>,
    preview_key: Option<PreviewKey>,
    last_preview_render: Option<Instant>,

    /// Bumped whenever a new background is set
    background_version: u64,

    /// Sub-pixel part of the current text drag
    drag_remainder: f32,

    /// Receiver for background image loading
    image_loader: Option<Receiver<Result<Background, CardError>>>,

    /// Loading state message
    loading_message: Option<String>,

    generation: Option<Generation>,

    /// Number of cards awaiting the user's confirmation
    pending_confirmation: Option<usize>,

    /// Outcome of the last deck generation
    report: Option<RenderReport>,

    /// Error shown in a dialog until dismissed
    error_message: Option<String>,
}

impl Default for CardDeckApp {
    fn default() -> Self {
        Self::new()
    }
}

impl CardDeckApp {
    /// Create a new CARDECK application instance.
    pub fn new() -> Self {
        let fonts = FontLibrary::with_system_fonts();
        let font_families = fonts.families();
        let session = Session::new();
        let padding_input = session.config.padding().to_string();

        Self {
            session,
            fonts,
            font_families,
            font: None,
            padding_input,
            preview: None,
            preview_key: None,
            last_preview_render: None,
            background_version: 0,
            drag_remainder: 0.0,
            image_loader: None,
            loading_message: None,
            generation: None,
            pending_confirmation: None,
            report: None,
            error_message: None,
        }
    }

    fn show_error(&mut self, error: impl Display) {
        log::error!("{}", error);
        self.error_message = Some(error.to_string());
    }

    fn is_generating(&self) -> bool {
        self.generation.is_some()
    }

    /// Font for the configured family and size, loading it if needed.
    fn current_font(&mut self) -> Result<LoadedFont, CardError> {
        let family = self.session.config.font_family.clone();
        let px = self.session.config.font_px();

        if let Some((requested, font)) = &self.font {
            if *requested == family {
                return Ok(font.resized(px));
            }
        }

        let font = self.fonts.load(&family, px)?;
        self.font = Some((family, font.clone()));
        Ok(font)
    }

    /// Load an image file as the background (asynchronously).
    pub fn load_image_file(&mut self, path: PathBuf) {
        let (sender, receiver) = channel();
        self.image_loader = Some(receiver);
        self.loading_message = Some("Loading image...".to_string());

        // Spawn background thread for loading
        std::thread::spawn(move || {
            let _ = sender.send(load_background(&path));
        });
    }

    fn pick_background(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .set_title("Select background image")
            .add_filter("Images", IMAGE_EXTENSIONS)
            .pick_file()
        {
            self.load_image_file(path);
        }
    }

    /// Replace the phrases with the contents of `path`; on failure the
    /// current phrases are kept.
    fn load_phrases_file(&mut self, path: &Path) {
        if let Err(e) = self.session.load_phrases(path) {
            self.show_error(e);
        }
    }

    fn pick_phrases(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .set_title("Select phrase file")
            .add_filter("Phrases", PHRASE_EXTENSIONS)
            .pick_file()
        {
            self.load_phrases_file(&path);
        }
    }

    fn pick_destination(&mut self) {
        if let Some(folder) = rfd::FileDialog::new()
            .set_title("Select output folder")
            .pick_folder()
        {
            self.session.set_destination(folder);
        }
    }

    /// Validate the inputs and ask the user to confirm.
    fn request_generation(&mut self) {
        match self.session.prepare_deck() {
            Ok(job) => self.pending_confirmation = Some(job.phrases.len()),
            Err(e) => self.show_error(e),
        }
    }

    /// Render the deck on a background thread.
    fn start_generation(&mut self) {
        let job = match self.session.prepare_deck() {
            Ok(job) => job,
            Err(e) => return self.show_error(e),
        };
        let font = match self.current_font() {
            Ok(font) => font,
            Err(e) => return self.show_error(e),
        };

        let (sender, receiver) = channel();
        let cancel = Arc::new(AtomicBool::new(false));
        let cancel_flag = Arc::clone(&cancel);
        let total = job.phrases.len();

        std::thread::spawn(move || {
            let report = render_deck_with(
                &job.background,
                &job.phrases,
                &job.config,
                &font,
                &job.destination,
                |progress| {
                    let _ = sender.send(GenerationEvent::Progress(progress));
                    if cancel_flag.load(Ordering::Relaxed) {
                        ControlFlow::Break(())
                    } else {
                        ControlFlow::Continue(())
                    }
                },
            );
            let _ = sender.send(GenerationEvent::Finished(report));
        });

        self.report = None;
        self.generation = Some(Generation {
            receiver,
            cancel,
            progress: Progress { done: 0, total },
        });
    }

    fn export_report(&mut self, extension: &str) {
        let Some(report) = &self.report else {
            return;
        };
        let Some(path) = rfd::FileDialog::new()
            .add_filter(extension.to_uppercase(), &[extension])
            .set_file_name(format!("deck_report.{extension}"))
            .save_file()
        else {
            return;
        };

        match serialization::export_report(report, &path) {
            Ok(()) => log::info!("Exported report to {}", path.display()),
            Err(e) => self.show_error(format!("Failed to export report: {e:#}")),
        }
    }

    /// Handle files dropped onto the window.
    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped: Vec<PathBuf> = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .filter_map(|file| file.path.clone())
                .collect()
        });

        for path in dropped {
            if is_image_path(&path) {
                self.load_image_file(path);
            } else if is_phrase_path(&path) {
                self.load_phrases_file(&path);
            } else {
                log::warn!("Ignoring dropped file: {}", path.display());
            }
        }
    }

    fn poll_image_loader(&mut self) {
        if let Some(ref receiver) = self.image_loader {
            if let Ok(result) = receiver.try_recv() {
                self.image_loader = None;
                self.loading_message = None;

                match result {
                    Ok(background) => {
                        self.session.set_background(background);
                        self.session.config.placement = VerticalPlacement::Centered;
                        self.background_version += 1;
                    }
                    Err(e) => self.show_error(e),
                }
            }
        }
    }

    fn poll_generation(&mut self) {
        let Some(generation) = &mut self.generation else {
            return;
        };

        let mut finished = None;
        let mut lost = false;
        loop {
            match generation.receiver.try_recv() {
                Ok(GenerationEvent::Progress(progress)) => generation.progress = progress,
                Ok(GenerationEvent::Finished(report)) => {
                    finished = Some(report);
                    break;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    lost = true;
                    break;
                }
            }
        }

        if let Some(report) = finished {
            self.generation = None;
            self.report = Some(report);
        } else if lost {
            self.generation = None;
            self.show_error("Deck generation stopped unexpectedly");
        }
    }

    /// Re-render the preview when the background, phrase or settings changed.
    fn refresh_preview(&mut self, ctx: &egui::Context) {
        let Some(background) = self.session.background().map(|b| Arc::clone(&b.image)) else {
            self.preview = None;
            self.preview_key = None;
            return;
        };

        let key = PreviewKey {
            background_version: self.background_version,
            phrase: self.session.current_phrase().map(str::to_string),
            config: self.session.config.clone(),
        };
        if self.preview_key.as_ref() == Some(&key) {
            return;
        }

        // Slider drags change the settings every frame
        if let Some(last) = self.last_preview_render {
            let elapsed = last.elapsed();
            if elapsed < PREVIEW_INTERVAL {
                ctx.request_repaint_after(PREVIEW_INTERVAL - elapsed);
                return;
            }
        }

        let (width, height) = background.dimensions();
        let (preview_width, preview_height, _) = fit_to_height(width, height, canvas::MAX_PREVIEW_HEIGHT);

        let (color_image, text_band) = match &key.phrase {
            Some(phrase) => {
                let font = match self.current_font() {
                    Ok(font) => font,
                    Err(e) => return self.show_error(e),
                };
                let card = render_card(&background, phrase, &key.config, &font);
                let band = card.layout.as_ref().map(|layout| (layout.top, layout.height));
                (preview_image(&card.image, preview_width, preview_height), band)
            }
            None => (preview_image(&background, preview_width, preview_height), None),
        };

        let texture = ctx.load_texture("card_preview", color_image, egui::TextureOptions::LINEAR);
        self.preview = Some(Preview {
            texture,
            image_size: (width, height),
            text_band,
        });
        self.preview_key = Some(key);
        self.last_preview_render = Some(Instant::now());
    }

    /// Move the pinned text position by `delta` image pixels.
    fn drag_text(&mut self, delta: f32) {
        let Some(preview) = &self.preview else {
            return;
        };
        let Some((top, height)) = preview.text_band else {
            return;
        };

        self.drag_remainder += delta;
        let step = self.drag_remainder.trunc();
        if step == 0.0 {
            return;
        }
        self.drag_remainder -= step;

        // The band may lag behind a pin set since the last render
        let top = match self.session.config.placement {
            VerticalPlacement::Offset(y) => y,
            VerticalPlacement::Centered => top,
        };
        let y = clamp_vertical(
            top as i64 + step as i64,
            height,
            preview.image_size.1,
            self.session.config.padding(),
        );
        self.session.config.placement = VerticalPlacement::Offset(y);
    }

    fn status_text(&self) -> String {
        let background = match self.session.background() {
            Some(bg) => {
                let name = bg.path.file_name().unwrap_or(bg.path.as_os_str());
                format!("{} ({}x{})", name.to_string_lossy(), bg.width(), bg.height())
            }
            None => "No background".to_string(),
        };
        let font = match &self.font {
            Some((_, font)) => format!(" | Font: {}", font.family),
            None => String::new(),
        };
        let phrases = match self.session.position() {
            Some((current, total)) => format!("Phrase {current}/{total}"),
            None => "No phrases".to_string(),
        };
        let destination = match self.session.destination() {
            Some(folder) => folder.display().to_string(),
            None => "not selected".to_string(),
        };
        format!("{background} | {phrases}{font} | Output: {destination}")
    }

    fn handle_controls(&mut self, action: controls::ControlsAction) {
        use controls::ControlsAction;

        match action {
            ControlsAction::LoadImage => self.pick_background(),
            ControlsAction::LoadPhrases => self.pick_phrases(),
            ControlsAction::ResetPhrases => self.session.reset_phrases(),
            ControlsAction::SelectFolder => self.pick_destination(),
            ControlsAction::PrevPhrase => self.session.prev_phrase(),
            ControlsAction::NextPhrase => self.session.next_phrase(),
            ControlsAction::Generate => self.request_generation(),
            ControlsAction::None => {}
        }
    }

    fn show_dialogs(&mut self, ctx: &egui::Context) {
        if let Some(message) = self.error_message.clone() {
            egui::Window::new("Error")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.label(message);
                    if ui.button("OK").clicked() {
                        self.error_message = None;
                    }
                });
        }

        if let Some(count) = self.pending_confirmation {
            let mut answer = None;
            egui::Window::new("Confirm generation")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.label(format!("Generate {count} cards?"));
                    ui.horizontal(|ui| {
                        if ui.button("Yes").clicked() {
                            answer = Some(true);
                        }
                        if ui.button("No").clicked() {
                            answer = Some(false);
                        }
                    });
                });

            if let Some(confirmed) = answer {
                self.pending_confirmation = None;
                if confirmed {
                    self.start_generation();
                }
            }
        }

        if let Some(generation) = &self.generation {
            let cancelling = generation.cancel.load(Ordering::Relaxed);
            if report::show_progress(ctx, generation.progress, cancelling) {
                log::info!("Cancelling deck generation");
                generation.cancel.store(true, Ordering::Relaxed);
            }
        }

        let action = match &self.report {
            Some(deck_report) => report::show(ctx, deck_report),
            None => report::ReportAction::None,
        };
        match action {
            report::ReportAction::Export(extension) => self.export_report(extension),
            report::ReportAction::Close => self.report = None,
            report::ReportAction::None => {}
        }
    }
}

/// Convert a card to an egui image of the given size.
fn preview_image(card: &RgbaImage, width: u32, height: u32) -> egui::ColorImage {
    let size = [width as usize, height as usize];
    if card.dimensions() == (width, height) {
        return egui::ColorImage::from_rgba_unmultiplied(size, card.as_raw());
    }
    let scaled = imageops::resize(card, width, height, FilterType::Triangle);
    egui::ColorImage::from_rgba_unmultiplied(size, scaled.as_raw())
}

impl eframe::App for CardDeckApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_image_loader();
        self.poll_generation();
        self.handle_dropped_files(ctx);
        self.refresh_preview(ctx);

        // Request repaint while background work is running (to update progress)
        if self.loading_message.is_some() || self.is_generating() {
            ctx.request_repaint();
        }

        let busy = self.is_generating();

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open Background...").clicked() {
                        self.pick_background();
                        ui.close_menu();
                    }
                    if ui.button("Load Phrases...").clicked() {
                        self.pick_phrases();
                        ui.close_menu();
                    }
                    if ui.button("Reset Phrases").clicked() {
                        self.session.reset_phrases();
                        ui.close_menu();
                    }
                    if ui.button("Select Output Folder...").clicked() {
                        self.pick_destination();
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.add_enabled(!busy, egui::Button::new("Generate Deck...")).clicked() {
                        self.request_generation();
                        ui.close_menu();
                    }
                    let has_report = self.report.is_some();
                    ui.add_enabled_ui(has_report, |ui| {
                        ui.menu_button("Export Report", |ui| {
                            if ui.button("Export as JSON...").clicked() {
                                self.export_report("json");
                                ui.close_menu();
                            }
                            if ui.button("Export as YAML...").clicked() {
                                self.export_report("yaml");
                                ui.close_menu();
                            }
                        });
                    });
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("Text", |ui| {
                    if ui.button("Re-center Text").clicked() {
                        self.session.config.placement = VerticalPlacement::Centered;
                        ui.close_menu();
                    }
                });
            });
        });

        // Control panel (right side)
        let controls_action = egui::SidePanel::right("controls")
            .default_width(330.0)
            .resizable(false)
            .show(ctx, |ui| {
                controls::show(
                    ui,
                    &mut self.session.config,
                    &mut self.padding_input,
                    &self.font_families,
                    busy,
                )
            })
            .inner;
        self.handle_controls(controls_action);

        // Phrase navigation with the arrow keys when no text field is focused
        if !ctx.wants_keyboard_input() {
            if ctx.input(|i| i.key_pressed(egui::Key::ArrowLeft)) {
                self.session.prev_phrase();
            }
            if ctx.input(|i| i.key_pressed(egui::Key::ArrowRight)) {
                self.session.next_phrase();
            }
        }

        // Preview (center)
        let status = self.status_text();
        let canvas_action = egui::CentralPanel::default()
            .show(ctx, |ui| {
                if let Some(ref message) = self.loading_message {
                    ui.centered_and_justified(|ui| {
                        ui.vertical_centered(|ui| {
                            ui.add_space(20.0);
                            ui.spinner();
                            ui.add_space(10.0);
                            ui.label(
                                egui::RichText::new(message)
                                    .size(16.0)
                                    .color(egui::Color32::from_gray(200)),
                            );
                        });
                    });
                    canvas::CanvasAction::None
                } else {
                    let view = self.preview.as_ref().map(|preview| canvas::PreviewView {
                        texture: &preview.texture,
                        image_size: preview.image_size,
                        text_band: preview.text_band,
                    });
                    canvas::show(ui, view, &status)
                }
            })
            .inner;

        match canvas_action {
            canvas::CanvasAction::DragText(delta) => self.drag_text(delta),
            canvas::CanvasAction::ResetPlacement => {
                self.session.config.placement = VerticalPlacement::Centered;
                self.drag_remainder = 0.0;
                log::info!("Text re-centered");
            }
            canvas::CanvasAction::None => {}
        }

        self.show_dialogs(ctx);
    }
}
