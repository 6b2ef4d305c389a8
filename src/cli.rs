use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::io::OutputFormat;

#[derive(Parser, Debug)]
#[command(
    name = "wraplint",
    version,
    about = "Lints TypeScript/JavaScript for nullable returns and exception flow that should use Option/Result wrappers"
)]
pub struct Cli {
    /// Files or directories to analyze
    #[arg(default_value = ".")]
    pub paths: Vec<PathBuf>,

    /// Apply available fixes to the analyzed files
    #[arg(long)]
    pub fix: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: FormatArg,

    /// Path to a wraplint.toml (defaults to ./wraplint.toml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Run only the named rule (no-nullable-return or no-exceptions)
    #[arg(long)]
    pub rule: Option<String>,

    /// Analyze files sequentially instead of in parallel
    #[arg(long)]
    pub no_parallel: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatArg {
    Text,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Text => OutputFormat::Terminal,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["wraplint"]);
        assert_eq!(cli.paths, vec![PathBuf::from(".")]);
        assert!(!cli.fix);
        assert_eq!(cli.format, FormatArg::Text);
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_flags() {
        let cli = Cli::parse_from(["wraplint", "src", "--fix", "--format", "json"]);
        assert_eq!(cli.paths, vec![PathBuf::from("src")]);
        assert!(cli.fix);
        assert_eq!(cli.format, FormatArg::Json);
    }

    #[test]
    fn test_rule_filter() {
        let cli = Cli::parse_from(["wraplint", "--rule", "no-exceptions"]);
        assert_eq!(cli.rule.as_deref(), Some("no-exceptions"));
    }
}
