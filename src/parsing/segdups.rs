//! UCSC `genomicSuperDups` rows; only `chrom`, `chromStart` and `chromEnd`
//! (columns 1-3) are used.

use crate::aggregation::Segment;
use crate::error::PrepError;

/// Column names of the prepared segmental duplication file
pub const SEGDUP_COLUMNS: [&str; 4] = ["chromosome", "begin", "end", "count"];

/// A parsed duplication interval
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegdupRow {
    pub contig: String,
    pub start: u64,
    pub end: u64,
}

/// # Errors
///
/// Returns `PrepError::Format` if the row has fewer than 4 columns or the
/// coordinates are not integers.
pub fn parse_segdup_line(line: &str) -> Result<SegdupRow, PrepError> {
    let fields: Vec<&str> = line.trim_end_matches(['\r', '\n']).split('\t').collect();
    if fields.len() < 4 {
        return Err(PrepError::format(format!(
            "segdup row has {} columns, expected at least 4: {line}",
            fields.len()
        )));
    }

    let coordinate = |index: usize, what: &str| -> Result<u64, PrepError> {
        let value = fields[index].trim();
        value
            .parse()
            .map_err(|_| PrepError::format(format!("invalid {what} '{value}' in: {line}")))
    };

    Ok(SegdupRow {
        contig: fields[1].trim().to_string(),
        start: coordinate(2, "chromStart")?,
        end: coordinate(3, "chromEnd")?,
    })
}

#[must_use]
pub fn format_segdup_segment(segment: &Segment<usize>) -> String {
    format!(
        "{}\t{}\t{}\t{}",
        segment.chromosome, segment.start, segment.end, segment.value
    )
}
