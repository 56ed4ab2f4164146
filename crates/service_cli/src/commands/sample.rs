//! Sample command implementation
//!
//! Resolves a product name and prints its sampled curves. Multi-year and
//! multi-curve products print one column per curve on the shared grid.

use std::io::Write;

use payoff_core::types::Point;
use payoff_engine::config::MAX_POINT_COUNT;
use payoff_engine::sampler::SampledCurve;
use payoff_engine::{Chart, PayoffEngine, Plot};
use payoff_models::resolver::Resolution;
use tracing::info;

use super::{fmt_value, Format};
use crate::{CliError, Result};

/// Run the sample command
pub fn run<W: Write>(
    engine: &PayoffEngine,
    name: &str,
    initial: Option<f64>,
    points: Option<usize>,
    format: &str,
    out: &mut W,
) -> Result<()> {
    let format = Format::parse(format, &[Format::Table, Format::Json, Format::Csv])?;
    let point_count = points.unwrap_or(engine.config().point_count);
    if point_count == 0 || point_count > MAX_POINT_COUNT {
        return Err(CliError::InvalidArgument(format!(
            "Invalid point count: {}. Must be between 1 and {}",
            point_count, MAX_POINT_COUNT
        )));
    }
    let initial_level = initial.unwrap_or(engine.config().initial_level);

    let plot = match engine.resolve(name) {
        Resolution::Chart(resolved) => {
            let curve = engine.sample(&resolved, initial_level, point_count)?;
            info!(
                product = name,
                matched_key = resolved.matched_key(),
                curves = curve.curve_count(),
                "Sampled payoff"
            );
            Plot::Chart(Chart {
                matched_key: resolved.matched_key().to_string(),
                method: resolved.method(),
                formula: resolved.into_formula(),
                curve,
            })
        }
        Resolution::NotChartable(reason) => Plot::NotChartable { reason },
    };

    match (format, &plot) {
        (Format::Json, _) => {
            serde_json::to_writer_pretty(&mut *out, &plot)?;
            writeln!(out)?;
        }
        (_, Plot::NotChartable { reason }) => {
            writeln!(out, "{}: no payoff chart ({})", name, reason)?;
        }
        (Format::Csv, Plot::Chart(chart)) => write_csv(chart, out)?,
        (_, Plot::Chart(chart)) => write_table(chart, out)?,
    }
    Ok(())
}

/// Column labels and point series of a sampled curve.
fn columns<'a>(chart: &'a Chart) -> Vec<(String, &'a [Point])> {
    match &chart.curve {
        SampledCurve::Standard(points) => vec![(chart.matched_key.clone(), points.as_slice())],
        SampledCurve::MultiYear(curves) => curves
            .iter()
            .map(|c| (format!("Year {}", c.year), c.points.as_slice()))
            .collect(),
        SampledCurve::MultiCurve(curves) => curves
            .iter()
            .map(|c| (c.label.clone(), c.points.as_slice()))
            .collect(),
    }
}

fn write_table<W: Write>(chart: &Chart, out: &mut W) -> Result<()> {
    let columns = columns(chart);
    writeln!(
        out,
        "{} (matched by {})",
        chart.matched_key, chart.method
    )?;
    write!(out, "{:>10}", "Level")?;
    for (label, _) in &columns {
        write!(out, " {:>22}", label)?;
    }
    writeln!(out)?;

    for (i, point) in chart.curve.primary().iter().enumerate() {
        write!(out, "{:>10}", fmt_value(point.x))?;
        for (_, points) in &columns {
            let y = points.get(i).map_or(String::new(), |p| fmt_value(p.y));
            write!(out, " {:>22}", y)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn write_csv<W: Write>(chart: &Chart, out: &mut W) -> Result<()> {
    let columns = columns(chart);
    let mut writer = csv::Writer::from_writer(out);

    let header = std::iter::once("level").chain(columns.iter().map(|(label, _)| label.as_str()));
    writer.write_record(header)?;

    for (i, point) in chart.curve.primary().iter().enumerate() {
        let row = std::iter::once(point.x.to_string()).chain(
            columns
                .iter()
                .map(|(_, points)| points.get(i).map_or(String::new(), |p| p.y.to_string())),
        );
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use payoff_core::formula::PayoffFormula;
    use payoff_core::shape::PayoffShape;
    use payoff_engine::config::EngineConfig;
    use payoff_models::resolver::MatchMethod;

    fn engine() -> PayoffEngine {
        PayoffEngine::standard(EngineConfig::default()).unwrap()
    }

    fn sample(name: &str, initial: Option<f64>, points: Option<usize>, format: &str) -> String {
        let mut out = Vec::new();
        run(&engine(), name, initial, points, format, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_csv_standard_curve() {
        let text = sample("Bull Call Spread", None, Some(10), "csv");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 12);
        assert_eq!(lines[0], "level,Bull Call Spread");
        assert_eq!(lines[1], "50,-6");
        assert_eq!(lines[7], "110,4");
        assert_eq!(lines[11], "150,14");
    }

    #[test]
    fn test_csv_multi_year_columns() {
        let text = sample("phoenix", None, Some(4), "csv");
        let header = text.lines().next().unwrap();
        assert_eq!(header, "level,Year 1,Year 2,Year 3,Year 4,Year 5,Year 6");
        assert_eq!(text.lines().count(), 6);
    }

    #[test]
    fn test_csv_quotes_labels() {
        let chart = Chart {
            matched_key: "Call, \"capped\"".to_string(),
            method: MatchMethod::Exact,
            formula: PayoffFormula::builder("Call", PayoffShape::Underlying)
                .build()
                .unwrap(),
            curve: SampledCurve::Standard(vec![Point::new(100.0, 5.0)]),
        };
        let mut out = Vec::new();
        write_csv(&chart, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "level,\"Call, \"\"capped\"\"\"\n100,5\n");
    }

    #[test]
    fn test_table_has_reference_column() {
        let text = sample("Capital Protected Note", None, Some(4), "table");
        let header = text.lines().nth(1).unwrap();
        assert!(header.contains("Level"));
        assert!(header.contains("Direct investment"));
    }

    #[test]
    fn test_json_not_chartable() {
        let text = sample("Credit Linked Note", None, None, "json");
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["status"], "not_chartable");
        assert_eq!(json["reason"], "credit-linked");
    }

    #[test]
    fn test_table_not_chartable() {
        let text = sample("Totally Unknown Widget", None, None, "table");
        assert_eq!(text.trim(), "Totally Unknown Widget: no payoff chart (unknown-product)");
    }

    #[test]
    fn test_rejects_point_count() {
        let mut out = Vec::new();
        let err = run(&engine(), "Long Call", None, Some(0), "table", &mut out).unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument(_)));
    }
}
