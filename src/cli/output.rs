// Output formatting for CLI

use anyhow::Result;
use serde_json::Value;
use std::io::Write;

use super::config::OutputFormat;

/// Formats reports and status lines
pub struct OutputFormatter {
    format: OutputFormat,
    quiet: bool,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }

    /// Write a JSON report in the selected format
    pub fn output_report(&self, report: &Value, writer: &mut impl Write) -> Result<()> {
        match self.format {
            OutputFormat::Pretty => writeln!(writer, "{}", serde_json::to_string_pretty(report)?)?,
            OutputFormat::Json => writeln!(writer, "{}", serde_json::to_string(report)?)?,
            OutputFormat::KeyValue => self.output_key_value(report, "", writer)?,
        }
        Ok(())
    }

    /// Flatten nested objects into `a.b.c: value` lines
    fn output_key_value(&self, value: &Value, prefix: &str, writer: &mut impl Write) -> Result<()> {
        match value {
            Value::Object(obj) => {
                for (key, value) in obj {
                    let path = join_key(prefix, key);
                    self.output_key_value(value, &path, writer)?;
                }
            }
            Value::Array(items) if items.iter().any(|v| v.is_object() || v.is_array()) => {
                for (index, value) in items.iter().enumerate() {
                    let path = join_key(prefix, &index.to_string());
                    self.output_key_value(value, &path, writer)?;
                }
            }
            other => writeln!(writer, "{}: {}", prefix, format_value(other))?,
        }
        Ok(())
    }

    /// Print success message
    pub fn print_success(&self, message: &str) {
        if !self.quiet {
            println!("✓ {}", message);
        }
    }

    /// Print error message
    pub fn print_error(&self, message: &str) {
        eprintln!("✗ {}", message);
    }

    /// Print info message
    pub fn print_info(&self, message: &str) {
        if !self.quiet {
            println!("  {}", message);
        }
    }
}

fn join_key(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}

/// Format a scalar JSON value for display
fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "(null)".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(arr) => arr.iter().map(format_value).collect::<Vec<_>>().join(", "),
        Value::Object(obj) => format!("{{{} items}}", obj.len()),
    }
}
