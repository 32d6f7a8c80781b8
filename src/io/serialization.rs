// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Batch report export.
//!
//! This module writes deck render reports in YAML and JSON formats so a run
//! can be checked after the fact.

use crate::render::deck::RenderReport;
use anyhow::{bail, Result};
use std::path::Path;

/// Export a render report to YAML format.
pub fn export_yaml(report: &RenderReport, path: &Path) -> Result<()> {
    let yaml = serde_yaml::to_string(report)?;
    std::fs::write(path, yaml)?;
    Ok(())
}

/// Export a render report to JSON format.
pub fn export_json(report: &RenderReport, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Export a render report, picking the format from the file extension.
pub fn export_report(report: &RenderReport, path: &Path) -> Result<()> {
    let extension = path.extension().and_then(|s| s.to_str());
    match extension {
        Some("yaml") | Some("yml") => export_yaml(report, path),
        Some("json") => export_json(report, path),
        _ => bail!("Unsupported report extension: {:?}", extension),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::config::RenderConfig;
    use crate::render::deck::{CardOutcome, CardStatus};
    use std::path::PathBuf;

    fn report() -> RenderReport {
        RenderReport {
            destination: PathBuf::from("/tmp/deck"),
            config: RenderConfig::default(),
            outcomes: vec![
                CardOutcome {
                    index: 0,
                    phrase: "Ace of Spades".to_string(),
                    path: PathBuf::from("/tmp/deck/card_1.png"),
                    status: CardStatus::Written { text_drawn: true },
                },
                CardOutcome {
                    index: 1,
                    phrase: "Two of Hearts".to_string(),
                    path: PathBuf::from("/tmp/deck/card_2.png"),
                    status: CardStatus::Failed {
                        reason: "Permission denied".to_string(),
                    },
                },
            ],
        }
    }

    #[test]
    fn test_json_export_lists_every_card() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        export_report(&report(), &path).unwrap();

        let value: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let outcomes = value["outcomes"].as_array().unwrap();
        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0]["status"], "written");
        assert_eq!(outcomes[1]["status"], "failed");
        assert_eq!(outcomes[1]["reason"], "Permission denied");
        assert_eq!(value["config"]["alignment"], "center");
    }

    #[test]
    fn test_yaml_export_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.yaml");
        export_report(&report(), &path).unwrap();

        let parsed: RenderReport = serde_yaml::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed, report());
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        assert!(export_report(&report(), &dir.path().join("report.txt")).is_err());
    }
}
