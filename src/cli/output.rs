//! Output formatting for CLI
//!
//! Writes command results as JSON or YAML and prints colored diagnostics.

use anyhow::Result;
use colored::Colorize;
use rustible_utils::config::OutputFormat;
use std::io::Write;

/// Output formatter for different output modes
#[derive(Debug, Clone)]
pub struct OutputFormatter {
    /// Use colored output
    use_color: bool,
    /// Result format
    format: OutputFormat,
    /// Verbosity level
    verbosity: u8,
}

impl OutputFormatter {
    /// Create a new output formatter
    pub fn new(use_color: bool, format: OutputFormat, verbosity: u8) -> Self {
        // Respect NO_COLOR environment variable
        let use_color = use_color && std::env::var("NO_COLOR").is_err();

        Self {
            use_color,
            format,
            verbosity,
        }
    }

    /// Render a result value in the configured format
    pub fn render(&self, value: &serde_json::Value) -> Result<String> {
        Ok(match self.format {
            OutputFormat::Json => {
                let mut out = serde_json::to_string_pretty(value)?;
                out.push('\n');
                out
            }
            OutputFormat::Yaml => serde_yaml::to_string(value)?,
        })
    }

    /// Write a result value to stdout
    pub fn emit(&self, value: &serde_json::Value) -> Result<()> {
        let rendered = self.render(value)?;
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(rendered.as_bytes())?;
        stdout.flush()?;
        Ok(())
    }

    /// Write raw text to stdout
    pub fn text(&self, text: &str) -> Result<()> {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(text.as_bytes())?;
        stdout.flush()?;
        Ok(())
    }

    /// Print an error message
    pub fn error(&self, message: &str) {
        if self.use_color {
            eprintln!("{} {}", "ERROR:".red().bold(), message);
        } else {
            eprintln!("ERROR: {}", message);
        }
    }

    /// Print a debug message (requires higher verbosity)
    pub fn debug(&self, message: &str) {
        if self.verbosity < 2 {
            return;
        }

        if self.use_color {
            eprintln!("{} {}", "DEBUG:".magenta(), message);
        } else {
            eprintln!("DEBUG: {}", message);
        }
    }
}
