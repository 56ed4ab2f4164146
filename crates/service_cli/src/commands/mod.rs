//! CLI command implementations
//!
//! Each submodule implements a specific CLI command. Commands write to the
//! given writer so they can be exercised without a terminal.

pub mod check;
pub mod compare;
pub mod list;
pub mod resolve;
pub mod sample;

use crate::{CliError, Result};

/// Output formats understood by the commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Table,
    Json,
    Csv,
}

impl Format {
    /// Parses `name`, rejecting formats not in `supported`.
    pub fn parse(name: &str, supported: &[Format]) -> Result<Self> {
        let format = match name.to_lowercase().as_str() {
            "table" => Some(Format::Table),
            "json" => Some(Format::Json),
            "csv" => Some(Format::Csv),
            _ => None,
        };
        match format {
            Some(format) if supported.contains(&format) => Ok(format),
            _ => {
                let names: Vec<&str> = supported.iter().map(|f| f.as_str()).collect();
                Err(CliError::InvalidArgument(format!(
                    "Unknown format: {}. Supported: {}",
                    name,
                    names.join(", ")
                )))
            }
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            Format::Table => "table",
            Format::Json => "json",
            Format::Csv => "csv",
        }
    }
}

/// Formats a payoff value for tables.
pub fn fmt_value(value: f64) -> String {
    format!("{:.2}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parse() {
        let all = [Format::Table, Format::Json, Format::Csv];
        assert_eq!(Format::parse("JSON", &all).unwrap(), Format::Json);
        assert!(Format::parse("xml", &all).is_err());

        let err = Format::parse("csv", &[Format::Table, Format::Json]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid argument: Unknown format: csv. Supported: table, json"
        );
    }
}
