use anyhow::Result;
use depot_catalog::Ledger;
use depot_core::PackageSource;
use depot_engine::{CommandUnpacker, ProcessLifecycleRunner, TransitionEngine};

use crate::config::Config;
use crate::render::{
    current_output_style, format_config_lines, format_listing_lines, format_report_line,
    format_section_header, format_update_lines,
};
use crate::{Cli, Commands, ListScope};

pub(crate) fn run_cli(cli: Cli) -> Result<()> {
    let config = Config::load(&cli.config)?;
    let catalogs = config.open_catalogs()?;
    let mut ledger = Ledger::open(&config.ledger.dir)?;
    let style = current_output_style();

    match cli.command {
        Commands::List { what: None } => {
            for catalog in &catalogs {
                println!("{}", format_section_header(style, catalog.name()));
                for line in format_listing_lines(&catalog.list()) {
                    println!("{line}");
                }
            }
        }
        Commands::List {
            what: Some(ListScope::Installed),
        } => {
            println!("{}", format_section_header(style, "installed"));
            for line in format_listing_lines(&ledger.list()) {
                println!("{line}");
            }
        }
        Commands::List {
            what: Some(ListScope::Update),
        } => {
            for catalog in &catalogs {
                println!("{}", format_section_header(style, catalog.name()));
                for line in format_update_lines(&ledger.updates_against(catalog)) {
                    println!("{line}");
                }
            }
        }
        Commands::Show { what: _ } => {
            for line in format_config_lines(&catalogs, &ledger) {
                println!("{line}");
            }
        }
        Commands::Install { packages } => {
            let reports = TransitionEngine::new(
                &catalogs,
                &mut ledger,
                CommandUnpacker,
                ProcessLifecycleRunner,
            )
            .install(&packages)?;
            for report in &reports {
                println!("{}", format_report_line(style, report));
            }
        }
        Commands::Remove { packages } => {
            let reports = TransitionEngine::new(
                &catalogs,
                &mut ledger,
                CommandUnpacker,
                ProcessLifecycleRunner,
            )
            .remove(&packages)?;
            for report in &reports {
                println!("{}", format_report_line(style, report));
            }
        }
    }

    Ok(())
}
