use tracing::info;

use crate::aggregation::DepthState;
use crate::config::AnnotationConfig;
use crate::jobs::{collect_intervals, write_swept, AnnotationSummary};
use crate::parsing::header::CgiHeader;
use crate::parsing::segdups::{format_segdup_segment, parse_segdup_line, SEGDUP_COLUMNS};

pub const FILE_TYPE: &str = "UCSC-SEGDUP";

/// Count how many segmental duplications cover each base
///
/// # Errors
///
/// Fails on unreadable input, malformed rows, or unbalanced intervals.
pub fn run(config: &AnnotationConfig) -> anyhow::Result<AnnotationSummary> {
    let (collector, rows) = collect_intervals(config, |line| {
        parse_segdup_line(line).map(|row| (row.contig, row.start, row.end, ()))
    })?;
    let dropped = collector.dropped();

    let header = CgiHeader::new(FILE_TYPE, &config.genome_reference, &SEGDUP_COLUMNS);
    let written = write_swept(
        &config.output,
        &header,
        collector,
        DepthState::default,
        format_segdup_segment,
    )?;

    let summary = AnnotationSummary {
        rows,
        dropped,
        written,
    };
    info!(
        input = %config.input.display(),
        rows = summary.rows,
        dropped = summary.dropped,
        segments = summary.written,
        "Prepared segmental duplication annotation"
    );
    Ok(summary)
}
