//! `gapmap validate`: check a saved session against a catalogue and
//! account for every dropped entry.

use crate::catalog::Catalog;
use crate::session::import_session;
use anyhow::Context;
use std::fs;
use std::path::PathBuf;

pub struct ValidateConfig {
    pub catalog: PathBuf,
    pub session: PathBuf,
}

pub fn run(config: ValidateConfig) -> anyhow::Result<()> {
    let catalog = Catalog::load(&config.catalog)?;
    let json = fs::read_to_string(&config.session)
        .with_context(|| format!("failed to read session file {}", config.session.display()))?;
    let imported = import_session(&json, &catalog)?;

    println!("session file: {}", config.session.display());
    println!("catalogue questions: {}", catalog.len());
    println!("restored answers: {}", imported.answers.len());
    println!("dropped entries: {}", imported.dropped);
    println!("resume index: {}", imported.index);
    println!(
        "fully answered: {}",
        if imported.all_answered { "yes" } else { "no" }
    );
    Ok(())
}
