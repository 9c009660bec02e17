use std::io::{BufRead, Write};

use anyhow::Context;
use tracing::info;

use crate::config::AnnotationConfig;
use crate::jobs::{open_input, AnnotationSummary};
use crate::parsing::genes::{parse_gene_line, GENE_COLUMNS};
use crate::parsing::header::CgiHeader;
use crate::utils::io::open_text_writer;

pub const FILE_TYPE: &str = "GENE-DATA";

/// Translate an NCBI gene table to half-open coordinates and UCSC names
///
/// # Errors
///
/// Fails on unreadable input or malformed rows.
pub fn run(config: &AnnotationConfig) -> anyhow::Result<AnnotationSummary> {
    let reader = open_input(&config.input)?;
    let allowed = config.canonical_set();

    let mut out = open_text_writer(&config.output)
        .with_context(|| format!("Failed to create {}", config.output.display()))?;
    CgiHeader::new(FILE_TYPE, &config.genome_reference, &GENE_COLUMNS).write_to(&mut out)?;

    let mut summary = AnnotationSummary::default();
    for (i, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read {}", config.input.display()))?;
        let is_data = !(line.trim().is_empty() || line.starts_with('#') || line.starts_with("mrnaAcc"));

        let gene = parse_gene_line(&line, allowed)
            .with_context(|| format!("{}:{}", config.input.display(), i + 1))?;
        match gene {
            Some(gene) => {
                writeln!(out, "{}", gene.to_line())?;
                summary.written += 1;
            }
            None if is_data => summary.dropped += 1,
            None => continue,
        }
        summary.rows += 1;
    }
    out.finish()
        .with_context(|| format!("Failed to finish {}", config.output.display()))?;

    info!(
        input = %config.input.display(),
        rows = summary.rows,
        dropped = summary.dropped,
        genes = summary.written,
        "Prepared gene annotation"
    );
    Ok(summary)
}
