//! File-level jobs: open inputs, run a core algorithm, write CGI-headed output.
//!
//! - **cut_maps**: cut a reads/mappings file pair to a genomic window
//! - **repeats**: flatten RepeatMasker annotation to one repeat per base
//! - **segdups**: count segmental duplication depth per base
//! - **genes**: translate an NCBI gene table to CGI coordinates
//!
//! Each job takes its configuration struct from [`crate::config`] and returns
//! a small summary that is also logged.

use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::Context;
use serde::Serialize;

use crate::aggregation::{sweep_chromosomes, CoverageState, IntervalCollector, Segment};
use crate::config::AnnotationConfig;
use crate::parsing::header::CgiHeader;
use crate::utils::io::{open_text_reader, open_text_writer};

pub mod cut_maps;
pub mod genes;
pub mod repeats;
pub mod segdups;

/// Counts reported by the annotation jobs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AnnotationSummary {
    /// Data rows read from the input
    pub rows: u64,
    /// Rows dropped for lying outside the canonical chromosomes
    pub dropped: u64,
    /// Rows written to the output
    pub written: u64,
}

/// Interval source rows: contig name, start, end and payload
pub(crate) type IntervalRow<P> = (String, u64, u64, P);

/// Read every data row of a UCSC table dump into a collector.
///
/// Lines starting with `#` (the table header) and blank lines are skipped.
pub(crate) fn collect_intervals<P, F>(
    config: &AnnotationConfig,
    mut parse: F,
) -> anyhow::Result<(IntervalCollector<P>, u64)>
where
    F: FnMut(&str) -> Result<IntervalRow<P>, crate::PrepError>,
{
    let reader = open_input(&config.input)?;
    let mut collector = IntervalCollector::new(config.canonical_set());
    let mut rows = 0;

    for (i, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read {}", config.input.display()))?;
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }
        let (contig, start, end, payload) = parse(&line)
            .with_context(|| format!("{}:{}", config.input.display(), i + 1))?;
        collector.push(&contig, start, end, payload);
        rows += 1;
    }

    Ok((collector, rows))
}

/// Write a CGI header, then sweep `collector` and write one line per segment,
/// one chromosome at a time
pub(crate) fn write_swept<P, S>(
    path: &Path,
    header: &CgiHeader,
    collector: IntervalCollector<P>,
    new_state: impl FnMut() -> S,
    format: impl Fn(&Segment<S::Value>) -> String,
) -> anyhow::Result<u64>
where
    S: CoverageState<P>,
{
    let mut out = open_text_writer(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    header.write_to(&mut out)?;

    let written = sweep_chromosomes(collector, new_state, |segments| {
        for segment in segments {
            writeln!(out, "{}", format(segment))?;
        }
        Ok(())
    })
    .with_context(|| format!("Failed to write {}", path.display()))?;

    out.finish()
        .with_context(|| format!("Failed to finish {}", path.display()))?;
    Ok(written)
}

pub(crate) fn open_input(path: &Path) -> anyhow::Result<Box<dyn BufRead>> {
    open_text_reader(path).with_context(|| format!("Failed to open {}", path.display()))
}
