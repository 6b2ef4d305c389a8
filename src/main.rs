use anyhow::Result;
use clap::Parser;
use rayon::prelude::*;
use std::path::PathBuf;

use wraplint::analyzers::analyze_file;
use wraplint::cli::Cli;
use wraplint::config::WraplintConfig;
use wraplint::core::{AnalysisReport, FileReport};
use wraplint::io::{apply_to_file, create_writer, discover_files};
use wraplint::registry::KnownApiRegistry;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let mut config = WraplintConfig::load(cli.config.as_deref())?;
    if let Some(rule) = &cli.rule {
        select_rule(&mut config, rule)?;
    }
    let registry = KnownApiRegistry::builtin();

    let files = discover_files(&cli.paths);
    log::info!("analyzing {} file(s)", files.len());

    let mut reports = run_analysis(&files, &config, &registry, cli.no_parallel);

    if cli.fix {
        apply_available_fixes(&mut reports, &config, &registry)?;
    }

    reports.retain(|r| !r.violations.is_empty());
    let report = AnalysisReport {
        files_analyzed: files.len(),
        files: reports,
    };

    let mut writer = create_writer(cli.format.into());
    writer.write_report(&report)?;

    if report.total_violations() > 0 {
        std::process::exit(2);
    }
    Ok(())
}

fn select_rule(config: &mut WraplintConfig, rule: &str) -> Result<()> {
    match rule {
        "no-nullable-return" => config.rules.no_exceptions.enabled = false,
        "no-exceptions" => config.rules.no_nullable_return.enabled = false,
        other => anyhow::bail!("unknown rule '{other}'"),
    }
    Ok(())
}

fn run_analysis(
    files: &[PathBuf],
    config: &WraplintConfig,
    registry: &KnownApiRegistry,
    sequential: bool,
) -> Vec<FileReport> {
    let analyze_one = |path: &PathBuf| match analyze_file(path, config, registry) {
        Ok(report) => Some(report),
        Err(error) => {
            log::warn!("{error}");
            None
        }
    };

    if sequential {
        files.iter().filter_map(analyze_one).collect()
    } else {
        files.par_iter().filter_map(analyze_one).collect()
    }
}

/// Overlapping rewrites are dropped rather than composed, so one apply
/// pass may leave fixable violations behind. Re-analyzing after each pass
/// converges within a few rounds; the cap is a safety net against a
/// rewrite that keeps producing new work.
const MAX_FIX_PASSES: usize = 8;

/// Apply every fix the engine produced, re-analyzing between passes, then
/// leave each report holding only what still needs a manual edit.
fn apply_available_fixes(
    reports: &mut [FileReport],
    config: &WraplintConfig,
    registry: &KnownApiRegistry,
) -> Result<()> {
    let mut total_applied = 0usize;

    for report in reports.iter_mut() {
        for _ in 0..MAX_FIX_PASSES {
            let applied = apply_to_file(&report.path, &report.violations)?;
            if applied == 0 {
                break;
            }
            total_applied += applied;
            log::info!("{}: applied {} fix(es)", report.path.display(), applied);
            report.violations = analyze_file(&report.path, config, registry)?.violations;
        }
        report.violations.retain(|v| v.fix.is_none());
    }

    if total_applied > 0 {
        eprintln!("Applied {total_applied} fix(es)");
    }
    Ok(())
}
