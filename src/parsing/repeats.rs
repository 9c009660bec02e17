//! UCSC RepeatMasker (`rmsk`) table rows.
//!
//! Columns used (0-based): 2-4 `milliDiv`/`milliDel`/`milliIns`, 5 `genoName`,
//! 6 `genoStart`, 7 `genoEnd`, 9 `strand`, 10 `repName`, 12 `repFamily`.

use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

use crate::aggregation::Segment;
use crate::error::PrepError;

const MIN_FIELDS: usize = 13;

/// Column names of the prepared repeat file
pub const REPEAT_COLUMNS: [&str; 7] = [
    "chromosome",
    "begin",
    "end",
    "repName",
    "repFamily",
    "divergence",
    "strand",
];

/// Combined divergence of a repeat copy from its consensus, in per mille
/// (mismatches + deletions + insertions)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Divergence(pub u32);

impl fmt::Display for Divergence {
    /// Percent with one decimal, e.g. `123` per mille prints as `12.3`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.0 / 10, self.0 % 10)
    }
}

/// One RepeatMasker annotation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepeatAnnotation {
    pub name: String,
    pub family: String,
    pub divergence: Divergence,
    pub strand: String,
}

impl Ord for RepeatAnnotation {
    /// Priority order: least diverged first, then by name, then by family.
    /// Strand only breaks ties between otherwise identical annotations.
    fn cmp(&self, other: &Self) -> Ordering {
        self.divergence
            .cmp(&other.divergence)
            .then_with(|| self.name.cmp(&other.name))
            .then_with(|| self.family.cmp(&other.family))
            .then_with(|| self.strand.cmp(&other.strand))
    }
}

impl PartialOrd for RepeatAnnotation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A parsed `rmsk` row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepeatRow {
    pub contig: String,
    pub start: u64,
    pub end: u64,
    pub repeat: RepeatAnnotation,
}

fn field<'a>(fields: &[&'a str], index: usize) -> &'a str {
    fields[index].trim()
}

fn parse_number<T: std::str::FromStr>(fields: &[&str], index: usize, what: &str) -> Result<T, PrepError> {
    let value = field(fields, index);
    value
        .parse()
        .map_err(|_| PrepError::format(format!("invalid {what} '{value}'")))
}

/// Parse one tab-separated `rmsk` row
///
/// # Errors
///
/// Returns `PrepError::Format` if the row is short or a numeric column is invalid.
pub fn parse_repeat_line(line: &str) -> Result<RepeatRow, PrepError> {
    let fields: Vec<&str> = line.trim_end_matches(['\r', '\n']).split('\t').collect();
    if fields.len() < MIN_FIELDS {
        return Err(PrepError::format(format!(
            "rmsk row has {} columns, expected at least {MIN_FIELDS}: {line}",
            fields.len()
        )));
    }

    let mismatches: u32 = parse_number(&fields, 2, "milliDiv")?;
    let deletions: u32 = parse_number(&fields, 3, "milliDel")?;
    let insertions: u32 = parse_number(&fields, 4, "milliIns")?;
    let divergence = mismatches
        .checked_add(deletions)
        .and_then(|d| d.checked_add(insertions))
        .ok_or_else(|| PrepError::format(format!("divergence overflows in: {line}")))?;

    Ok(RepeatRow {
        contig: field(&fields, 5).to_string(),
        start: parse_number(&fields, 6, "genoStart")?,
        end: parse_number(&fields, 7, "genoEnd")?,
        repeat: RepeatAnnotation {
            name: field(&fields, 10).to_string(),
            family: field(&fields, 12).to_string(),
            divergence: Divergence(divergence),
            strand: fields[9].to_string(),
        },
    })
}

/// Render a swept repeat segment as an output row
#[must_use]
pub fn format_repeat_segment(segment: &Segment<RepeatAnnotation>) -> String {
    let repeat = &segment.value;
    format!(
        "{}\t{}\t{}\t{}\t{}\t{}\t{}",
        segment.chromosome,
        segment.start,
        segment.end,
        repeat.name,
        repeat.family,
        repeat.divergence,
        repeat.strand
    )
}
