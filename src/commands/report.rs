//! `gapmap report`: render a saved session as a report document.

use crate::catalog::Catalog;
use crate::io::output::{create_writer, create_writer_to, OutputFormat};
use crate::report::build_report;
use crate::session::import_session;
use anyhow::Context;
use chrono::Utc;
use std::fs;
use std::path::PathBuf;

pub struct ReportConfig {
    pub catalog: PathBuf,
    pub session: PathBuf,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
}

pub fn run(config: ReportConfig) -> anyhow::Result<()> {
    let catalog = Catalog::load(&config.catalog)?;
    let json = fs::read_to_string(&config.session)
        .with_context(|| format!("failed to read session file {}", config.session.display()))?;
    let imported = import_session(&json, &catalog)?;
    if imported.dropped > 0 {
        log::warn!(
            "{} session entries were dropped during import",
            imported.dropped
        );
    }

    let report = build_report(catalog.questions(), &imported.answers, Utc::now());

    match &config.output {
        Some(path) => {
            let file = fs::File::create(path)
                .with_context(|| format!("failed to create output file {}", path.display()))?;
            create_writer_to(config.format, file).write_report(&report)?;
        }
        None => create_writer(config.format).write_report(&report)?,
    }
    Ok(())
}
