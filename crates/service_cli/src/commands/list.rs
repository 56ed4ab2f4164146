//! List command implementation
//!
//! Prints the catalog, structured notes first, optionally filtered by family.

use std::io::Write;

use payoff_core::formula::{Family, PayoffFormula};
use payoff_engine::PayoffEngine;
use serde::Serialize;
use tracing::info;

use super::Format;
use crate::Result;

#[derive(Serialize)]
struct ListEntry<'a> {
    name: &'a str,
    kind: String,
    family: Family,
    risk_level: u8,
    capital_protected: bool,
    summary: &'a str,
}

impl<'a> From<&'a PayoffFormula> for ListEntry<'a> {
    fn from(formula: &'a PayoffFormula) -> Self {
        let info = formula.info();
        Self {
            name: formula.name(),
            kind: info.kind.to_string(),
            family: info.family,
            risk_level: info.risk_level,
            capital_protected: info.capital_protected,
            summary: &info.summary,
        }
    }
}

/// Run the list command
pub fn run<W: Write>(
    engine: &PayoffEngine,
    family: Option<Family>,
    format: &str,
    out: &mut W,
) -> Result<()> {
    let format = Format::parse(format, &[Format::Table, Format::Json])?;
    let entries: Vec<ListEntry<'_>> = engine
        .catalog()
        .iter()
        .filter(|formula| family.map_or(true, |f| formula.info().family == f))
        .map(ListEntry::from)
        .collect();
    info!(count = entries.len(), "Listing catalog entries");

    match format {
        Format::Json => {
            serde_json::to_writer_pretty(&mut *out, &entries)?;
            writeln!(out)?;
        }
        _ => {
            writeln!(
                out,
                "{:<40} {:<16} {:<20} {:>4}  {}",
                "Product", "Kind", "Family", "Risk", "Protected"
            )?;
            for entry in &entries {
                writeln!(
                    out,
                    "{:<40} {:<16} {:<20} {:>4}  {}",
                    entry.name,
                    entry.kind,
                    entry.family,
                    entry.risk_level,
                    if entry.capital_protected { "yes" } else { "" }
                )?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use payoff_engine::config::EngineConfig;

    fn engine() -> PayoffEngine {
        PayoffEngine::standard(EngineConfig::default()).unwrap()
    }

    #[test]
    fn test_table_lists_every_product() {
        let engine = engine();
        let mut out = Vec::new();
        run(&engine, None, "table", &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), engine.catalog().len() + 1);
        assert!(text.contains("Capital Protected Note"));
    }

    #[test]
    fn test_family_filter_json() {
        let mut out = Vec::new();
        run(&engine(), Some(Family::Barrier), "json", &mut out).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        let entries = json.as_array().unwrap();
        assert!(!entries.is_empty());
        assert!(entries.iter().all(|e| e["family"] == "barrier"));
    }

    #[test]
    fn test_csv_rejected() {
        let mut out = Vec::new();
        assert!(run(&engine(), None, "csv", &mut out).is_err());
    }
}
