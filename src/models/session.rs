// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Session state management.
//!
//! This module holds everything the user has set up so far: the background,
//! the phrases, the preview position, the destination folder and the render
//! configuration. The UI mutates it; the renderer only reads a snapshot.

use super::config::RenderConfig;
use super::phrases::PhraseList;
use crate::error::{CardError, Result};
use crate::io::media::Background;
use crate::io::phrases::read_phrases;
use image::RgbaImage;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Owned inputs for one deck render, safe to move to a worker thread.
#[derive(Debug, Clone)]
pub struct DeckJob {
    pub background: Arc<RgbaImage>,
    pub phrases: Vec<String>,
    pub config: RenderConfig,
    pub destination: PathBuf,
}

/// The current editing session.
#[derive(Debug, Default)]
pub struct Session {
    background: Option<Background>,
    phrases: PhraseList,
    current_index: usize,
    destination: Option<PathBuf>,
    pub config: RenderConfig,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn background(&self) -> Option<&Background> {
        self.background.as_ref()
    }

    pub fn set_background(&mut self, background: Background) {
        self.background = Some(background);
    }

    /// Replace the whole phrase list and go back to the first phrase.
    pub fn replace_phrases(&mut self, phrases: PhraseList) {
        self.phrases = phrases;
        self.current_index = 0;
    }

    /// Read `path` and replace the phrases with its contents.
    ///
    /// On error the current phrases and position are kept.
    pub fn load_phrases(&mut self, path: &Path) -> Result<usize> {
        let phrases = read_phrases(path)?;
        let count = phrases.len();
        self.replace_phrases(phrases);
        Ok(count)
    }

    pub fn reset_phrases(&mut self) {
        self.phrases.clear();
        self.current_index = 0;
        log::info!("Phrases reset");
    }

    pub fn current_phrase(&self) -> Option<&str> {
        self.phrases.get(self.current_index)
    }

    /// 1-based position and total, for display.
    pub fn position(&self) -> Option<(usize, usize)> {
        (!self.phrases.is_empty()).then(|| (self.current_index + 1, self.phrases.len()))
    }

    /// Move to the next phrase, wrapping around at the end.
    pub fn next_phrase(&mut self) {
        if !self.phrases.is_empty() {
            self.current_index = (self.current_index + 1) % self.phrases.len();
        }
    }

    /// Move to the previous phrase, wrapping around at the start.
    pub fn prev_phrase(&mut self) {
        let len = self.phrases.len();
        if len > 0 {
            self.current_index = (self.current_index + len - 1) % len;
        }
    }

    pub fn destination(&self) -> Option<&Path> {
        self.destination.as_deref()
    }

    pub fn set_destination(&mut self, folder: PathBuf) {
        log::info!("Output folder: {}", folder.display());
        self.destination = Some(folder);
    }

    /// Validate the session and snapshot what a deck render needs.
    ///
    /// Checks the destination first, then the background and phrases.
    /// Nothing is written and the session is not modified.
    pub fn prepare_deck(&self) -> Result<DeckJob> {
        let destination = self.destination.as_ref().ok_or(CardError::MissingDestination)?;
        if !destination.is_dir() {
            return Err(CardError::MissingDestination);
        }

        let background = self
            .background
            .as_ref()
            .ok_or(CardError::MissingInputs("background image"))?;
        if self.phrases.is_empty() {
            return Err(CardError::MissingInputs("phrases"));
        }

        Ok(DeckJob {
            background: Arc::clone(&background.image),
            phrases: self.phrases.to_vec(),
            config: self.config.clone(),
            destination: destination.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn background() -> Background {
        Background::new(
            PathBuf::from("back.png"),
            RgbaImage::from_pixel(8, 8, Rgba([0, 0, 0, 255])),
        )
    }

    fn session_with_phrases(phrases: &[&str]) -> Session {
        let mut session = Session::new();
        session.replace_phrases(PhraseList::from_lines(phrases.iter().copied()));
        session
    }

    #[test]
    fn test_navigation_wraps_around() {
        let mut session = session_with_phrases(&["a", "b", "c"]);
        assert_eq!(session.current_phrase(), Some("a"));

        session.prev_phrase();
        assert_eq!(session.current_phrase(), Some("c"));
        assert_eq!(session.position(), Some((3, 3)));

        session.next_phrase();
        session.next_phrase();
        assert_eq!(session.current_phrase(), Some("b"));
    }

    #[test]
    fn test_navigation_on_empty_list_is_noop() {
        let mut session = Session::new();
        session.next_phrase();
        session.prev_phrase();
        assert_eq!(session.current_phrase(), None);
        assert_eq!(session.position(), None);
    }

    #[test]
    fn test_load_then_reset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deck.txt");
        std::fs::write(&path, "one\n\ntwo\nthree\n").unwrap();

        let mut session = Session::new();
        assert_eq!(session.load_phrases(&path).unwrap(), 3);
        session.next_phrase();
        assert_eq!(session.position(), Some((2, 3)));

        session.reset_phrases();
        assert_eq!(session.position(), None);
        assert_eq!(session.current_phrase(), None);
    }

    #[test]
    fn test_failed_load_keeps_existing_phrases() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_with_phrases(&["first", "keep me"]);
        session.next_phrase();

        let missing = session.load_phrases(&dir.path().join("missing.txt"));
        assert!(matches!(missing, Err(CardError::PhraseSource { .. })));

        let unsupported = dir.path().join("deck.pdf");
        std::fs::write(&unsupported, "one\ntwo\n").unwrap();
        let unsupported = session.load_phrases(&unsupported);
        assert!(matches!(unsupported, Err(CardError::PhraseSource { .. })));

        assert_eq!(session.current_phrase(), Some("keep me"));
        assert_eq!(session.position(), Some((2, 2)));
    }

    #[test]
    fn test_prepare_requires_destination_first() {
        let session = Session::new();
        assert!(matches!(session.prepare_deck(), Err(CardError::MissingDestination)));

        let mut session = session_with_phrases(&["a"]);
        session.set_background(background());
        session.set_destination(PathBuf::from("/definitely/not/a/folder"));
        assert!(matches!(session.prepare_deck(), Err(CardError::MissingDestination)));
    }

    #[test]
    fn test_prepare_requires_background_and_phrases() {
        let dir = tempfile::tempdir().unwrap();

        let mut session = session_with_phrases(&["a"]);
        session.set_destination(dir.path().to_path_buf());
        assert!(matches!(
            session.prepare_deck(),
            Err(CardError::MissingInputs("background image"))
        ));

        let mut session = Session::new();
        session.set_destination(dir.path().to_path_buf());
        session.set_background(background());
        assert!(matches!(session.prepare_deck(), Err(CardError::MissingInputs("phrases"))));
    }

    #[test]
    fn test_prepare_snapshots_inputs() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_with_phrases(&["a", "b"]);
        session.set_destination(dir.path().to_path_buf());
        session.set_background(background());
        session.config.set_padding(33);

        let job = session.prepare_deck().unwrap();
        session.config.set_padding(5);

        assert_eq!(job.phrases, vec!["a", "b"]);
        assert_eq!(job.config.padding(), 33);
        assert_eq!(job.destination, dir.path());
        assert_eq!(job.background.dimensions(), (8, 8));
    }
}
