// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Phrase file loading.
//!
//! Plain text files hold one phrase per line. Delimited tables (CSV, TSV)
//! contribute the first field of every row. Both produce the same ordered
//! phrase list.

use crate::error::{CardError, Result};
use crate::models::phrases::PhraseList;
use std::path::Path;

/// Extensions offered in the open dialog and accepted on drop.
pub const PHRASE_EXTENSIONS: &[&str] = &["txt", "csv", "tsv"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PhraseFormat {
    Lines,
    Table(u8),
}

/// Read the phrases stored in `path`.
///
/// The file is parsed completely before anything is returned, so a failure
/// never leaves the caller with a partial list.
pub fn read_phrases(path: &Path) -> Result<PhraseList> {
    let source_error = |reason: String| CardError::PhraseSource {
        path: path.to_path_buf(),
        reason,
    };

    let format = phrase_format(path).ok_or_else(|| source_error("unsupported file type".to_string()))?;
    let bytes = std::fs::read(path).map_err(|e| source_error(e.to_string()))?;
    let text = String::from_utf8(bytes).map_err(|e| source_error(e.to_string()))?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(&text);

    let phrases = match format {
        PhraseFormat::Lines => PhraseList::from_lines(text.lines()),
        PhraseFormat::Table(delimiter) => {
            parse_table(text, delimiter).map_err(|e| source_error(e.to_string()))?
        }
    };

    if phrases.is_empty() {
        log::warn!("No phrases found in {}", path.display());
    }
    log::info!("Loaded {} phrases from {}", phrases.len(), path.display());
    Ok(phrases)
}

/// Check whether `path` looks like a phrase file.
pub fn is_phrase_path(path: &Path) -> bool {
    path.extension().is_some() && phrase_format(path).is_some()
}

fn phrase_format(path: &Path) -> Option<PhraseFormat> {
    let extension = match path.extension() {
        None => return Some(PhraseFormat::Lines),
        Some(ext) => ext.to_str()?.to_ascii_lowercase(),
    };

    match extension.as_str() {
        "txt" | "text" => Some(PhraseFormat::Lines),
        "csv" => Some(PhraseFormat::Table(b',')),
        "tsv" => Some(PhraseFormat::Table(b'\t')),
        _ => None,
    }
}

fn parse_table(text: &str, delimiter: u8) -> std::result::Result<PhraseList, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(text.as_bytes());

    let mut first_fields = Vec::new();
    for record in reader.records() {
        let record = record?;
        if let Some(field) = record.get(0) {
            first_fields.push(field.to_string());
        }
    }

    Ok(PhraseList::from_lines(first_fields))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn write(dir: &tempfile::TempDir, name: &str, contents: &[u8]) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_text_file_one_phrase_per_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "deck.txt", b"Ace of Spades\n\n  Two of Hearts  \r\n   \nThree of Clubs");

        let phrases = read_phrases(&path).unwrap();
        let collected: Vec<&str> = (0..phrases.len()).filter_map(|i| phrases.get(i)).collect();
        assert_eq!(collected, vec!["Ace of Spades", "Two of Hearts", "Three of Clubs"]);
    }

    #[test]
    fn test_text_file_line_count_matches() {
        let dir = tempfile::tempdir().unwrap();
        let lines: Vec<String> = (1..=25).map(|i| format!("Phrase {i}")).collect();
        let path = write(&dir, "many.txt", lines.join("\n\n").as_bytes());

        let phrases = read_phrases(&path).unwrap();
        assert_eq!(phrases.len(), 25);
        assert_eq!(phrases.get(0), Some("Phrase 1"));
        assert_eq!(phrases.get(24), Some("Phrase 25"));
    }

    #[test]
    fn test_byte_order_mark_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "bom.txt", "\u{feff}First\nSecond".as_bytes());
        assert_eq!(read_phrases(&path).unwrap().get(0), Some("First"));
    }

    #[test]
    fn test_csv_uses_first_field_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "deck.csv",
            b"Ace of Spades,1,spades\n\"King, of Hearts\",13\n,skipped\nQueen\n",
        );

        let phrases = read_phrases(&path).unwrap();
        let collected: Vec<&str> = (0..phrases.len()).filter_map(|i| phrases.get(i)).collect();
        assert_eq!(collected, vec!["Ace of Spades", "King, of Hearts", "Queen"]);
    }

    #[test]
    fn test_tsv_uses_tab_delimiter() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "deck.tsv", b"Jack, the knave\tsecond\nTen\tx\n");

        let phrases = read_phrases(&path).unwrap();
        let collected: Vec<&str> = (0..phrases.len()).filter_map(|i| phrases.get(i)).collect();
        assert_eq!(collected, vec!["Jack, the knave", "Ten"]);
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "deck.docx", b"whatever");
        assert!(matches!(read_phrases(&path), Err(CardError::PhraseSource { .. })));
    }

    #[test]
    fn test_missing_and_invalid_files() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_phrases(&dir.path().join("missing.txt")).is_err());

        let path = write(&dir, "latin1.txt", &[0x41, 0xff, 0xfe, 0x0a]);
        assert!(matches!(read_phrases(&path), Err(CardError::PhraseSource { .. })));
    }

    #[test]
    fn test_is_phrase_path() {
        assert!(is_phrase_path(Path::new("a.txt")));
        assert!(is_phrase_path(Path::new("a.CSV")));
        assert!(is_phrase_path(Path::new("a.tsv")));
        assert!(!is_phrase_path(Path::new("a.png")));
        assert!(!is_phrase_path(Path::new("README")));
    }
}
