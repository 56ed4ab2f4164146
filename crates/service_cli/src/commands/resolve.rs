//! Resolve command implementation

use std::io::Write;

use payoff_engine::PayoffEngine;
use payoff_models::resolver::Resolution;

use crate::Result;

/// Run the resolve command
pub fn run<W: Write>(engine: &PayoffEngine, names: &[String], out: &mut W) -> Result<()> {
    for name in names {
        match engine.resolve(name) {
            Resolution::Chart(resolved) => writeln!(
                out,
                "{} -> {} ({})",
                name,
                resolved.matched_key(),
                resolved.method()
            )?,
            Resolution::NotChartable(reason) => {
                writeln!(out, "{} -> not chartable ({})", name, reason)?
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use payoff_engine::config::EngineConfig;

    #[test]
    fn test_resolve_output() {
        let engine = PayoffEngine::standard(EngineConfig::default()).unwrap();
        let names = vec![
            "Bull Call Spread".to_string(),
            "papillon long".to_string(),
            "CLN".to_string(),
        ];
        let mut out = Vec::new();
        run(&engine, &names, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Bull Call Spread -> Bull Call Spread (exact)");
        assert_eq!(lines[1], "papillon long -> Long Butterfly (pattern)");
        assert_eq!(lines[2], "CLN -> not chartable (credit-linked)");
    }
}
