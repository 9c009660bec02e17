use anyhow::Context;
use tracing::{info, warn};

use crate::config::CutMapsConfig;
use crate::filtering::{CutSummary, MapCutter, RangeSelector};
use crate::jobs::open_input;
use crate::parsing::header::copy_header;
use crate::utils::io::open_text_writer;

/// Cut a reads/mappings file pair to the configured window.
///
/// Both outputs keep their input's header verbatim and are written next to
/// `output_prefix` under the input file names. Every input read yields exactly
/// one output read line.
///
/// # Errors
///
/// Fails on IO errors, invalid headers, malformed records, or reads and
/// mappings that do not line up. The outputs are incomplete in that case.
pub fn run(config: &CutMapsConfig) -> anyhow::Result<CutSummary> {
    let mut reads = open_input(&config.reads)?;
    let mut mappings = open_input(&config.mappings)?;

    let reads_path = config.output_path(&config.reads);
    let mappings_path = config.output_path(&config.mappings);
    let mut reads_out = open_text_writer(&reads_path)
        .with_context(|| format!("Failed to create {}", reads_path.display()))?;
    let mut mappings_out = open_text_writer(&mappings_path)
        .with_context(|| format!("Failed to create {}", mappings_path.display()))?;

    copy_header(&mut reads, &mut reads_out)
        .with_context(|| format!("Bad header in {}", config.reads.display()))?;
    copy_header(&mut mappings, &mut mappings_out)
        .with_context(|| format!("Bad header in {}", config.mappings.display()))?;

    match &config.keep_range {
        Some(range) => info!(range = %range, "Cutting mappings to range"),
        None => warn!("No keep range configured, all mappings will be kept"),
    }

    let cutter = MapCutter::new(RangeSelector::new(config.keep_range.clone()));
    let summary = cutter
        .cut(reads, mappings, &mut reads_out, &mut mappings_out)
        .with_context(|| {
            format!(
                "Failed to cut {} / {}",
                config.reads.display(),
                config.mappings.display()
            )
        })?;

    reads_out
        .finish()
        .with_context(|| format!("Failed to finish {}", reads_path.display()))?;
    mappings_out
        .finish()
        .with_context(|| format!("Failed to finish {}", mappings_path.display()))?;

    info!(
        reads = summary.reads,
        placeholder_reads = summary.placeholder_reads,
        mappings_in = summary.mappings_in,
        mappings_kept = summary.mappings_kept,
        "Cut reads and mappings"
    );
    Ok(summary)
}
