use anyhow::Result;
use clap::Parser;
use gapmap::cli::{Cli, Commands};
use gapmap::commands::{assess, report, validate};

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Assess {
            catalog,
            session,
            save_session,
            format,
            output,
            require_consent,
        } => assess::run(assess::AssessConfig {
            catalog,
            session,
            save_session,
            format: format.into(),
            output,
            require_consent,
        }),
        Commands::Report {
            catalog,
            session,
            format,
            output,
        } => report::run(report::ReportConfig {
            catalog,
            session,
            format: format.into(),
            output,
        }),
        Commands::Validate { catalog, session } => {
            validate::run(validate::ValidateConfig { catalog, session })
        }
    }
}
