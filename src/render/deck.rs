// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Batch rendering of a whole deck.
//!
//! Every phrase becomes `card_<n>.png` in the destination folder. A failed
//! card is recorded in the report and the batch moves on to the next one.

use super::card::render_card;
use super::font::LoadedFont;
use crate::error::{CardError, Result};
use crate::models::config::RenderConfig;
use image::{ImageFormat, RgbaImage};
use serde::{Deserialize, Serialize};
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};

/// File name of the card at 0-based `index`.
pub fn card_file_name(index: usize) -> String {
    format!("card_{}.png", index + 1)
}

/// What happened to a single card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum CardStatus {
    Written { text_drawn: bool },
    Failed { reason: String },
    Cancelled,
}

/// Outcome of one phrase in the batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardOutcome {
    pub index: usize,
    pub phrase: String,
    pub path: PathBuf,
    #[serde(flatten)]
    pub status: CardStatus,
}

impl CardOutcome {
    /// 1-based card number, matching the file name.
    pub fn number(&self) -> usize {
        self.index + 1
    }

    pub fn is_written(&self) -> bool {
        matches!(self.status, CardStatus::Written { .. })
    }
}

/// Per-card results of a deck render, one entry per phrase index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderReport {
    pub destination: PathBuf,
    pub config: RenderConfig,
    pub outcomes: Vec<CardOutcome>,
}

impl RenderReport {
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_written()).count()
    }

    pub fn failed(&self) -> impl Iterator<Item = &CardOutcome> + '_ {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, CardStatus::Failed { .. }))
    }

    pub fn cancelled(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.status == CardStatus::Cancelled)
            .count()
    }

    /// True when every card was written.
    pub fn is_success(&self) -> bool {
        self.succeeded() == self.total()
    }

    pub fn summary(&self) -> String {
        let mut summary = format!(
            "{} of {} cards written to {}",
            self.succeeded(),
            self.total(),
            self.destination.display()
        );
        let failed = self.failed().count();
        if failed > 0 {
            summary.push_str(&format!(", {failed} failed"));
        }
        let cancelled = self.cancelled();
        if cancelled > 0 {
            summary.push_str(&format!(", {cancelled} cancelled"));
        }
        summary
    }
}

/// Progress notification sent after each card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub done: usize,
    pub total: usize,
}

/// Render every phrase to `destination`.
pub fn render_deck<P: AsRef<str>>(
    background: &RgbaImage,
    phrases: &[P],
    config: &RenderConfig,
    font: &LoadedFont,
    destination: &Path,
) -> RenderReport {
    render_deck_with(background, phrases, config, font, destination, |_| {
        ControlFlow::Continue(())
    })
}

/// Render every phrase, reporting progress after each card.
///
/// Returning `ControlFlow::Break` from `observer` stops the batch; the
/// remaining cards are reported as cancelled.
pub fn render_deck_with<P, F>(
    background: &RgbaImage,
    phrases: &[P],
    config: &RenderConfig,
    font: &LoadedFont,
    destination: &Path,
    mut observer: F,
) -> RenderReport
where
    P: AsRef<str>,
    F: FnMut(Progress) -> ControlFlow<()>,
{
    let total = phrases.len();
    let mut outcomes = Vec::with_capacity(total);
    let mut stopped = false;

    log::info!("Generating {} cards into {}", total, destination.display());

    for (index, phrase) in phrases.iter().enumerate() {
        let phrase = phrase.as_ref();
        let path = destination.join(card_file_name(index));

        let status = if stopped {
            CardStatus::Cancelled
        } else {
            match export_card(index, background, phrase, config, font, &path) {
                Ok(text_drawn) => {
                    log::info!("Saved card {}: {}", index + 1, path.display());
                    CardStatus::Written { text_drawn }
                }
                Err(e) => {
                    log::error!("{}", e);
                    CardStatus::Failed {
                        reason: e.to_string(),
                    }
                }
            }
        };

        outcomes.push(CardOutcome {
            index,
            phrase: phrase.to_string(),
            path,
            status,
        });

        if !stopped && observer(Progress { done: index + 1, total }).is_break() {
            log::warn!("Deck generation cancelled after {} of {} cards", index + 1, total);
            stopped = true;
        }
    }

    let report = RenderReport {
        destination: destination.to_path_buf(),
        config: config.clone(),
        outcomes,
    };
    log::info!("{}", report.summary());
    report
}

fn export_card(
    index: usize,
    background: &RgbaImage,
    phrase: &str,
    config: &RenderConfig,
    font: &LoadedFont,
    path: &Path,
) -> Result<bool> {
    let card = render_card(background, phrase, config, font);
    card.image
        .save_with_format(path, ImageFormat::Png)
        .map_err(|e| CardError::Render {
            index,
            reason: e.to_string(),
        })?;
    Ok(card.text_drawn())
}
