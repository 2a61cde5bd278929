use std::fmt::Display;
use std::io::Write;

use serde::Serialize;

use crate::config::OutputFormat;
use crate::error::{CliError, CliResult};

/// Write one result in the configured format.
pub fn emit<W, T>(out: &mut W, format: OutputFormat, report: &T) -> CliResult<()>
where
    W: Write,
    T: Serialize + Display,
{
    match format {
        OutputFormat::Text => writeln!(out, "{}", report)?,
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, report)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

/// Report a non-fatal session error inline.
pub fn emit_error<W: Write>(out: &mut W, format: OutputFormat, err: &CliError) -> CliResult<()> {
    match format {
        OutputFormat::Text => writeln!(out, "error: {}", err)?,
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, &serde_json::json!({ "error": err.to_string() }))?;
            writeln!(out)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Sample {
        count: usize,
    }

    impl Display for Sample {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "count: {}", self.count)
        }
    }

    #[test]
    fn test_emit_text_and_json() {
        let mut out = Vec::new();
        emit(&mut out, OutputFormat::Text, &Sample { count: 3 }).unwrap();
        emit(&mut out, OutputFormat::Json, &Sample { count: 4 }).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "count: 3\n{\"count\":4}\n");
    }

    #[test]
    fn test_emit_error_json() {
        let mut out = Vec::new();
        emit_error(&mut out, OutputFormat::Json, &CliError::NotLoaded).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert!(value["error"].as_str().unwrap().contains("no graph loaded"));
    }
}
