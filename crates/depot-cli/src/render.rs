use std::io::IsTerminal;

use anstyle::{AnsiColor, Effects, Style};
use depot_catalog::{Catalog, Ledger, UpdateCandidate};
use depot_core::{PackageSource, PackageVersion};
use depot_engine::{PackageReport, TransitionOutcome};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum OutputStyle {
    Plain,
    Rich,
}

pub(crate) fn current_output_style() -> OutputStyle {
    if std::io::stdout().is_terminal() {
        OutputStyle::Rich
    } else {
        OutputStyle::Plain
    }
}

fn section_style() -> Style {
    Style::new()
        .fg_color(Some(AnsiColor::BrightBlue.into()))
        .effects(Effects::BOLD)
}

fn good_style() -> Style {
    Style::new().fg_color(Some(AnsiColor::Green.into()))
}

fn error_style() -> Style {
    Style::new()
        .fg_color(Some(AnsiColor::Red.into()))
        .effects(Effects::BOLD)
}

fn colorize(style: OutputStyle, color: Style, text: &str) -> String {
    match style {
        OutputStyle::Plain => text.to_string(),
        OutputStyle::Rich => format!("{}{}{}", color.render(), text, color.render_reset()),
    }
}

pub(crate) fn format_section_header(style: OutputStyle, title: &str) -> String {
    colorize(style, section_style(), &format!("== {title} =="))
}

pub(crate) fn format_listing_lines(entries: &[(String, PackageVersion)]) -> Vec<String> {
    if entries.is_empty() {
        return vec!["(none)".to_string()];
    }

    let width = entries
        .iter()
        .map(|(name, _)| name.len())
        .max()
        .unwrap_or(0);
    entries
        .iter()
        .map(|(name, version)| format!("{name:<width$}  {version}"))
        .collect()
}

pub(crate) fn format_update_lines(candidates: &[UpdateCandidate]) -> Vec<String> {
    if candidates.is_empty() {
        return vec!["(up to date)".to_string()];
    }

    let width = candidates
        .iter()
        .map(|candidate| candidate.name.len())
        .max()
        .unwrap_or(0);
    candidates
        .iter()
        .map(|candidate| {
            format!(
                "{:<width$}  {} -> {}",
                candidate.name, candidate.installed, candidate.available
            )
        })
        .collect()
}

pub(crate) fn format_config_lines(catalogs: &[Catalog], ledger: &Ledger) -> Vec<String> {
    let mut lines = Vec::new();
    for catalog in catalogs {
        lines.push(format!(
            "catalog {}: {} (index {})",
            catalog.name(),
            catalog.root().display(),
            catalog.index_path().display()
        ));
    }
    lines.push(format!(
        "ledger: {} (index {})",
        ledger.root().display(),
        ledger.index_path().display()
    ));
    lines
}

pub(crate) fn format_report_line(style: OutputStyle, report: &PackageReport) -> String {
    let package = &report.package;
    let mut line = match &report.outcome {
        TransitionOutcome::Installed { version } => format!(
            "{} {package} {version}",
            colorize(style, good_style(), "installed")
        ),
        TransitionOutcome::Updated { previous, version } => format!(
            "{} {package} {previous} -> {version}",
            colorize(style, good_style(), "updated")
        ),
        TransitionOutcome::AlreadyInstalled { version } => {
            format!("already installed {package} {version}")
        }
        TransitionOutcome::Removed { version } => format!(
            "{} {package} {version}",
            colorize(style, good_style(), "removed")
        ),
        TransitionOutcome::NotFound => format!(
            "{} {package}: not found in any catalog",
            colorize(style, error_style(), "error")
        ),
        TransitionOutcome::Ambiguous { catalogs } => format!(
            "{} {package}: declared by multiple catalogs: {}",
            colorize(style, error_style(), "error"),
            catalogs.join(", ")
        ),
        TransitionOutcome::NotInstalled => format!(
            "{} {package}: not installed",
            colorize(style, error_style(), "error")
        ),
        TransitionOutcome::CorruptedLedgerEntry { version, path } => format!(
            "{} {package}: payload for {version} is missing at {}; stale entry dropped",
            colorize(style, error_style(), "error"),
            path.display()
        ),
        TransitionOutcome::Failed { message } => format!(
            "{} {package}: {message}",
            colorize(style, error_style(), "error")
        ),
    };

    if let Some(code) = report.script_exit {
        if code != 0 {
            line.push_str(&format!(" (lifecycle script exited with {code})"));
        }
    }
    line
}
