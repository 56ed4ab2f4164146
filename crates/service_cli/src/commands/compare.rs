//! Compare command implementation
//!
//! Builds the comparator table: payoff range, payoff at the initial level and
//! breakevens for each requested product, at the configured defaults.

use std::io::Write;

use payoff_engine::metrics::PayoffSummary;
use payoff_engine::PayoffEngine;
use payoff_models::resolver::{NotChartableReason, Resolution};
use serde::Serialize;

use super::{fmt_value, Format};
use crate::Result;

#[derive(Debug, Serialize)]
struct CompareRow {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    matched_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    risk_level: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<PayoffSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<NotChartableReason>,
}

fn compare_row(engine: &PayoffEngine, name: &str) -> Result<CompareRow> {
    let row = match engine.resolve(name) {
        Resolution::Chart(resolved) => CompareRow {
            name: name.to_string(),
            matched_key: Some(resolved.matched_key().to_string()),
            risk_level: Some(resolved.formula().info().risk_level),
            summary: engine.summarize(&resolved)?,
            reason: None,
        },
        Resolution::NotChartable(reason) => CompareRow {
            name: name.to_string(),
            matched_key: None,
            risk_level: None,
            summary: None,
            reason: Some(reason),
        },
    };
    Ok(row)
}

/// Run the compare command
pub fn run<W: Write>(engine: &PayoffEngine, names: &[String], format: &str, out: &mut W) -> Result<()> {
    let format = Format::parse(format, &[Format::Table, Format::Json])?;
    let rows = names
        .iter()
        .map(|name| compare_row(engine, name))
        .collect::<Result<Vec<_>>>()?;

    if format == Format::Json {
        serde_json::to_writer_pretty(&mut *out, &rows)?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(
        out,
        "{:<36} {:>4} {:>9} {:>9} {:>9}  {}",
        "Product", "Risk", "Min", "Max", "At init", "Breakevens"
    )?;
    for row in &rows {
        let label = row.matched_key.as_deref().unwrap_or(&row.name);
        match (&row.summary, row.reason) {
            (Some(summary), _) => {
                let breakevens: Vec<String> =
                    summary.breakevens.iter().map(|&x| fmt_value(x)).collect();
                writeln!(
                    out,
                    "{:<36} {:>4} {:>9} {:>9} {:>9}  {}",
                    label,
                    row.risk_level.map_or(String::new(), |r| r.to_string()),
                    fmt_value(summary.min_payoff),
                    fmt_value(summary.max_payoff),
                    summary.payoff_at_initial.map_or("-".to_string(), fmt_value),
                    if breakevens.is_empty() {
                        "-".to_string()
                    } else {
                        breakevens.join(" ")
                    }
                )?;
            }
            (None, Some(reason)) => writeln!(out, "{:<36} not chartable ({})", label, reason)?,
            (None, None) => writeln!(out, "{:<36} no samples", label)?,
        }
    }
    Ok(())
}
