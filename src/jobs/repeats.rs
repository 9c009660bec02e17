use tracing::info;

use crate::aggregation::PriorityState;
use crate::config::AnnotationConfig;
use crate::jobs::{collect_intervals, write_swept, AnnotationSummary};
use crate::parsing::header::CgiHeader;
use crate::parsing::repeats::{format_repeat_segment, parse_repeat_line, REPEAT_COLUMNS};

pub const FILE_TYPE: &str = "UCSC-REPMASK";

/// Flatten a RepeatMasker table so each base reports its least diverged repeat
///
/// # Errors
///
/// Fails on unreadable input, malformed rows, or unbalanced intervals.
pub fn run(config: &AnnotationConfig) -> anyhow::Result<AnnotationSummary> {
    let (collector, rows) = collect_intervals(config, |line| {
        parse_repeat_line(line).map(|row| (row.contig, row.start, row.end, row.repeat))
    })?;
    let dropped = collector.dropped();

    let header = CgiHeader::new(FILE_TYPE, &config.genome_reference, &REPEAT_COLUMNS);
    let written = write_swept(
        &config.output,
        &header,
        collector,
        PriorityState::default,
        format_repeat_segment,
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
        "Prepared repeat annotation"
    );
    Ok(summary)
}
