//! End-to-end statement generation: load, lay out, render, write, open.

use std::path::PathBuf;

use log::{debug, info};

use crate::builder::PdfBuilder;
use crate::config::StatementConfig;
use crate::error::Result;
use crate::loader::load_statement;
use crate::output::{self, Platform};
use crate::render::layout_statement;

/// Result of a successful run.
#[derive(Clone, Debug)]
pub struct GeneratedStatement {
    pub path: PathBuf,
    pub size: usize,
    /// Platform whose viewer was launched, if any.
    pub opened_with: Option<Platform>,
}

/// Runs the whole pipeline for `config`.
///
/// The viewer platform is resolved before anything is read or written, so an
/// unsupported platform fails without touching the output path.  The PDF is
/// fully rendered in memory before the output file is created.
pub fn run(config: &StatementConfig) -> Result<GeneratedStatement> {
    let platform = if config.open_viewer {
        Some(Platform::resolve(config.platform.as_deref())?)
    } else {
        None
    };

    let statement = load_statement(&config.input)?;

    let totals = statement.transaction_totals();
    info!(
        "Transactions total {} in and {} out (net {})",
        totals.money_in,
        totals.money_out,
        totals.net()
    );

    let document = layout_statement(&statement, &config.logo);
    debug!("Laid out {} blocks", document.blocks().len());

    let pdf = PdfBuilder::new()
        .with_fonts(config.fonts.clone())
        .render(&document)?;
    let path = output::write_pdf(&config.output, &pdf.bytes)?;

    if let Some(platform) = platform {
        output::open_in_viewer(platform, &path)?;
    }

    Ok(GeneratedStatement {
        path,
        size: pdf.bytes.len(),
        opened_with: platform,
    })
}
