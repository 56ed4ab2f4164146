//! Check command implementation
//!
//! Validates the active configuration and the catalog behind the resolver.

use std::io::Write;

use anyhow::anyhow;
use payoff_core::formula::Family;
use payoff_engine::PayoffEngine;
use tracing::{info, warn};

use crate::Result;

/// Run the check command
pub fn run<W: Write>(engine: &PayoffEngine, out: &mut W) -> Result<()> {
    let config = engine.config();
    config.validate()?;

    writeln!(out, "Configuration")?;
    writeln!(out, "  Point count:   {}", config.point_count)?;
    writeln!(out, "  Initial level: {}", config.initial_level)?;
    writeln!(out, "  Phoenix years: {:?}", config.phoenix_years)?;
    writeln!(out, "  Log level:     {}", config.log_level)?;

    let catalog = engine.catalog();
    writeln!(out, "Catalog")?;
    writeln!(out, "  Structured notes: {}", catalog.structured_notes().len())?;
    writeln!(out, "  Options:          {}", catalog.options().len())?;
    for family in Family::ALL {
        writeln!(out, "    {:<20} {}", family, catalog.by_family(family).count())?;
    }

    let missing = engine.resolver().missing_rule_targets();
    if !missing.is_empty() {
        warn!(?missing, "Resolution rules point at missing catalog keys");
        return Err(anyhow!("rule targets missing from catalog: {}", missing.join(", ")).into());
    }

    info!("Check passed");
    writeln!(out, "OK")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use payoff_engine::config::EngineConfig;

    #[test]
    fn test_standard_catalog_passes() {
        let engine = PayoffEngine::standard(EngineConfig::default()).unwrap();
        let mut out = Vec::new();
        run(&engine, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Structured notes: 27"));
        assert!(text.contains("Options:          35"));
        assert!(text.trim_end().ends_with("OK"));
    }
}
