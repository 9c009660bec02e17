//! NCBI gene table rows, translated to the CGI gene annotation layout.
//!
//! Input rows are comma-separated with closed, 1-based coordinates and NCBI
//! chromosome names:
//!
//! ```text
//! mrnaAcc,proteinAcc,geneId,symbol,orientation,exonCount,chromosome,exonStarts,exonEnds,genomeCdsStart,genomeCdsEnd,...
//! ```
//!
//! Output rows are tab-separated with half-open, 0-based coordinates and UCSC
//! chromosome names. A transcript without a CDS is written with the empty
//! range `1..0`.

use crate::core::chromosome::{CanonicalSet, Chromosome};
use crate::error::PrepError;

const INPUT_FIELDS: usize = 11;
const NO_CDS_END: i64 = -1;

/// Column names of the prepared gene file
pub const GENE_COLUMNS: [&str; 13] = [
    "mrnaAcc",
    "proteinAcc",
    "geneId",
    "symbol",
    "orientation",
    "chromosome",
    "genomeStart",
    "genomeEnd",
    "exonCount",
    "exonStarts",
    "exonEnds",
    "genomeCdsStart",
    "genomeCdsEnd",
];

/// A transcript in half-open, 0-based coordinates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneRecord {
    pub mrna_acc: String,
    pub protein_acc: String,
    pub gene_id: String,
    pub symbol: String,
    pub orientation: char,
    pub chromosome: Chromosome,
    pub exon_starts: Vec<u64>,
    pub exon_ends: Vec<u64>,
    pub cds_start: i64,
    pub cds_end: i64,
}

impl GeneRecord {
    #[must_use]
    pub fn genome_start(&self) -> u64 {
        self.exon_starts.first().copied().unwrap_or_default()
    }

    #[must_use]
    pub fn genome_end(&self) -> u64 {
        self.exon_ends.last().copied().unwrap_or_default()
    }

    #[must_use]
    pub fn to_line(&self) -> String {
        format!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            self.mrna_acc,
            self.protein_acc,
            self.gene_id,
            self.symbol,
            self.orientation,
            self.chromosome,
            self.genome_start(),
            self.genome_end(),
            self.exon_starts.len(),
            join(&self.exon_starts),
            join(&self.exon_ends),
            self.cds_start,
            self.cds_end
        )
    }
}

fn join(values: &[u64]) -> String {
    values
        .iter()
        .map(u64::to_string)
        .collect::<Vec<_>>()
        .join(";")
}

fn parse_list(list: &str, what: &str, line: &str) -> Result<Vec<u64>, PrepError> {
    list.split(';')
        .map(|v| {
            v.trim()
                .parse()
                .map_err(|_| PrepError::format(format!("invalid {what} '{v}' in: {line}")))
        })
        .collect()
}

fn parse_signed(value: &str, what: &str, line: &str) -> Result<i64, PrepError> {
    value
        .trim()
        .parse()
        .map_err(|_| PrepError::format(format!("invalid {what} '{value}' in: {line}")))
}

/// Parse one gene table row.
///
/// Returns `Ok(None)` for header, comment and blank lines, and for transcripts
/// on chromosomes outside `allowed`.
///
/// # Errors
///
/// Returns `PrepError::Format` for short rows, an orientation other than `+`/`-`,
/// exon lists that disagree with the exon count, zero exon starts, or a CDS
/// start of zero paired with anything but the `-1` "no CDS" end.
pub fn parse_gene_line(line: &str, allowed: CanonicalSet) -> Result<Option<GeneRecord>, PrepError> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() || line.starts_with('#') || line.starts_with("mrnaAcc") {
        return Ok(None);
    }

    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() < INPUT_FIELDS {
        return Err(PrepError::format(format!(
            "gene row has {} columns, expected at least {INPUT_FIELDS}: {line}",
            fields.len()
        )));
    }

    let Some(chromosome) = Chromosome::from_ncbi(fields[6]).filter(|c| allowed.contains(*c)) else {
        return Ok(None);
    };

    let orientation = match fields[4] {
        "+" => '+',
        "-" => '-',
        other => {
            return Err(PrepError::format(format!(
                "bad orientation '{other}' in: {line}"
            )))
        }
    };

    let exon_count: usize = fields[5]
        .trim()
        .parse()
        .map_err(|_| PrepError::format(format!("invalid exonCount '{}' in: {line}", fields[5])))?;
    let exon_starts = parse_list(fields[7], "exon start", line)?
        .into_iter()
        .map(|start| {
            start
                .checked_sub(1)
                .ok_or_else(|| PrepError::format(format!("exon start 0 is not 1-based in: {line}")))
        })
        .collect::<Result<Vec<_>, _>>()?;
    let exon_ends = parse_list(fields[8], "exon end", line)?;
    if exon_count == 0 || exon_count != exon_starts.len() || exon_count != exon_ends.len() {
        return Err(PrepError::format(format!("bad exon list: {line}")));
    }

    let mut cds_start = parse_signed(fields[9], "genomeCdsStart", line)?
        .checked_sub(1)
        .ok_or_else(|| PrepError::format(format!("genomeCdsStart out of range in: {line}")))?;
    let mut cds_end = parse_signed(fields[10], "genomeCdsEnd", line)?;
    if cds_start < 0 {
        if cds_end != NO_CDS_END {
            return Err(PrepError::format(format!("bad CDS range: {line}")));
        }
        cds_start = 1;
        cds_end = 0;
    }

    Ok(Some(GeneRecord {
        mrna_acc: fields[0].to_string(),
        protein_acc: fields[1].to_string(),
        gene_id: fields[2].to_string(),
        symbol: fields[3].to_string(),
        orientation,
        chromosome,
        exon_starts,
        exon_ends,
        cds_start,
        cds_end,
    }))
}
