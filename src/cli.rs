use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Colored terminal report
    Terminal,
    /// Machine-readable result export
    Json,
    /// Markdown report
    Markdown,
}

impl From<OutputFormat> for crate::io::output::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Terminal => crate::io::output::OutputFormat::Terminal,
            OutputFormat::Json => crate::io::output::OutputFormat::Json,
            OutputFormat::Markdown => crate::io::output::OutputFormat::Markdown,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "gapmap")]
#[command(about = "Control maturity self-assessment scoring and prioritization", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run an interactive assessment
    Assess {
        /// Question catalogue JSON file
        #[arg(long, value_name = "FILE")]
        catalog: PathBuf,

        /// Resume from a previously exported session file
        #[arg(long, value_name = "FILE")]
        session: Option<PathBuf>,

        /// Write the session snapshot here on save or quit
        #[arg(long = "save-session", value_name = "FILE")]
        save_session: Option<PathBuf>,

        /// Report output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Write the final report here (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Require explicit consent before the assessment starts
        #[arg(long = "require-consent")]
        require_consent: bool,
    },

    /// Render a report from a saved session
    Report {
        /// Question catalogue JSON file
        #[arg(long, value_name = "FILE")]
        catalog: PathBuf,

        /// Session file to report on
        #[arg(long, value_name = "FILE")]
        session: PathBuf,

        /// Report output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate a saved session against a catalogue
    Validate {
        /// Question catalogue JSON file
        #[arg(long, value_name = "FILE")]
        catalog: PathBuf,

        /// Session file to validate
        #[arg(long, value_name = "FILE")]
        session: PathBuf,
    },
}
