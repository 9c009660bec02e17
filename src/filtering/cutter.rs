use std::io::{BufRead, Write};

use serde::Serialize;
use tracing::debug;

use crate::core::record::{placeholder_read_line, MappingRecord, ReadRecord};
use crate::error::PrepError;
use crate::filtering::mates::MateIndexRewriter;
use crate::filtering::scanner::MappingGroupScanner;
use crate::filtering::selector::RangeSelector;

/// Output of one read: its (possibly placeholder) read line and kept mappings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredRead {
    pub read_line: String,
    pub mapping_lines: Vec<String>,
}

impl FilteredRead {
    fn placeholder() -> Self {
        Self {
            read_line: placeholder_read_line(),
            mapping_lines: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.mapping_lines.is_empty()
    }
}

/// Counts reported after cutting a reads/mappings pair
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CutSummary {
    pub reads: u64,
    pub placeholder_reads: u64,
    pub mappings_in: u64,
    pub mappings_kept: u64,
}

/// Filter one read's mapping group to the selector's window.
///
/// Reads with both mates unmapped, and reads that keep no mapping, come out as
/// the placeholder read. Otherwise the last kept mapping becomes the group's
/// terminal record and mate indices are rewritten into the compacted group.
///
/// # Errors
///
/// Returns `PrepError::Consistency` if a mate index points outside the group.
pub fn filter_group(
    read: &ReadRecord,
    group: Vec<MappingRecord>,
    selector: &RangeSelector,
) -> Result<FilteredRead, PrepError> {
    if read.both_mates_unmapped() {
        return Ok(FilteredRead::placeholder());
    }

    let selection = selector.select(group);
    let mut kept = selection.kept;
    if kept.is_empty() {
        return Ok(FilteredRead::placeholder());
    }

    let last = kept.len() - 1;
    for (i, record) in kept.iter_mut().enumerate() {
        record.set_last_in_group(i == last);
    }

    let original_mates: Vec<usize> = kept.iter().map(MappingRecord::mate_index).collect();
    let links = MateIndexRewriter::new(&selection.remap).rewrite(&original_mates)?;

    let mapping_lines = kept
        .iter()
        .zip(links)
        .enumerate()
        .map(|(i, (record, link))| record.to_line_with_mate(link.resolve(i)))
        .collect();

    Ok(FilteredRead {
        read_line: read.as_line().to_string(),
        mapping_lines,
    })
}

/// Cuts a reads file and its mappings file down to a genomic window, consuming
/// both streams in lockstep: each read claims exactly one mapping group unless
/// both of its mates are unmapped, in which case it owns none.
pub struct MapCutter {
    selector: RangeSelector,
}

impl MapCutter {
    #[must_use]
    pub fn new(selector: RangeSelector) -> Self {
        Self { selector }
    }

    /// Cut header-less read and mapping streams into the two writers.
    ///
    /// # Errors
    ///
    /// Any format, truncation or consistency error aborts the cut; output
    /// already written is then incomplete.
    pub fn cut<R, M, WR, WM>(
        &self,
        reads: R,
        mappings: M,
        reads_out: &mut WR,
        mappings_out: &mut WM,
    ) -> Result<CutSummary, PrepError>
    where
        R: BufRead,
        M: BufRead,
        WR: Write,
        WM: Write,
    {
        let mut scanner = MappingGroupScanner::new(mappings.lines());
        let mut summary = CutSummary::default();

        for line in reads.lines() {
            let read = ReadRecord::parse(&line?)?;
            let group = if read.both_mates_unmapped() {
                Vec::new()
            } else {
                scanner.next_group(summary.reads)?
            };

            let filtered = filter_group(&read, group, &self.selector)?;
            writeln!(reads_out, "{}", filtered.read_line)?;
            for mapping in &filtered.mapping_lines {
                writeln!(mappings_out, "{mapping}")?;
            }

            summary.reads += 1;
            summary.mappings_kept += filtered.mapping_lines.len() as u64;
            if filtered.is_placeholder() {
                summary.placeholder_reads += 1;
            }
        }

        summary.mappings_in = scanner.records_read();
        scanner.finish()?;

        debug!(
            reads = summary.reads,
            placeholders = summary.placeholder_reads,
            mappings_in = summary.mappings_in,
            mappings_kept = summary.mappings_kept,
            "Cut complete"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(flags: u8) -> ReadRecord {
        ReadRecord::parse(&format!("{flags}\tACGTACGT\t########")).unwrap()
    }

    fn mapping(flags: u32, chromosome: &str, position: u64, mate: usize) -> MappingRecord {
        MappingRecord::parse(&format!(
            "{flags}\t{chromosome}\t{position}\t0\t0\t0\t1\t{mate}\tpayload"
        ))
        .unwrap()
    }

    fn window(spec: &str) -> RangeSelector {
        RangeSelector::new(Some(spec.parse().unwrap()))
    }

    fn mate_column(line: &str) -> usize {
        line.split('\t').nth(7).unwrap().parse().unwrap()
    }

    fn flags_column(line: &str) -> u32 {
        line.split('\t').next().unwrap().parse().unwrap()
    }

    #[test]
    fn test_single_mapping_inside_window() {
        let filtered = filter_group(
            &read(0),
            vec![mapping(1, "chr1", 150, 0)],
            &window("chr1,100,200"),
        )
        .unwrap();

        assert_eq!(filtered.read_line, "0\tACGTACGT\t########");
        assert_eq!(
            filtered.mapping_lines,
            vec!["1\tchr1\t150\t0\t0\t0\t1\t0\tpayload".to_string()]
        );
    }

    #[test]
    fn test_discarded_mate_becomes_self_reference() {
        let filtered = filter_group(
            &read(0),
            vec![mapping(0, "chr1", 50, 1), mapping(1, "chr1", 150, 0)],
            &window("chr1,100,200"),
        )
        .unwrap();

        assert_eq!(filtered.mapping_lines.len(), 1);
        let line = &filtered.mapping_lines[0];
        assert!(line.contains("\t150\t"));
        assert_eq!(mate_column(line), 0);
        assert_eq!(flags_column(line) & 1, 1);
    }

    #[test]
    fn test_both_mates_unmapped_ignores_mappings() {
        let filtered = filter_group(
            &read(5),
            vec![mapping(1, "chr1", 150, 0)],
            &RangeSelector::default(),
        )
        .unwrap();
        assert_eq!(filtered.read_line, placeholder_read_line());
        assert!(filtered.mapping_lines.is_empty());
    }

    #[test]
    fn test_nothing_kept_gives_placeholder() {
        let filtered = filter_group(
            &read(0),
            vec![mapping(1, "chr2", 150, 0)],
            &window("chr1,100,200"),
        )
        .unwrap();
        assert!(filtered.is_placeholder());
        assert_eq!(filtered.read_line, placeholder_read_line());
    }

    #[test]
    fn test_terminal_flag_moves_to_last_kept() {
        let filtered = filter_group(
            &read(0),
            vec![
                mapping(0, "chr1", 110, 2),
                mapping(0, "chr1", 120, 3),
                mapping(0, "chr1", 130, 0),
                mapping(1, "chr1", 900, 1),
            ],
            &window("chr1,100,200"),
        )
        .unwrap();

        let terminal: Vec<bool> = filtered
            .mapping_lines
            .iter()
            .map(|l| flags_column(l) & 1 == 1)
            .collect();
        assert_eq!(terminal, vec![false, false, true]);

        let mates: Vec<usize> = filtered.mapping_lines.iter().map(|l| mate_column(l)).collect();
        // 0 <-> 2 survive; 1 lost mate 3 and stays self-referencing
        assert_eq!(mates, vec![2, 1, 0]);
    }

    #[test]
    fn test_no_range_keeps_all_links() {
        let filtered = filter_group(
            &read(0),
            vec![mapping(0, "chr1", 10, 1), mapping(1, "chr7", 20, 0)],
            &RangeSelector::default(),
        )
        .unwrap();
        let mates: Vec<usize> = filtered.mapping_lines.iter().map(|l| mate_column(l)).collect();
        assert_eq!(mates, vec![1, 0]);
    }

    #[test]
    fn test_cut_streams_in_lockstep() {
        let reads = "0\tAC\t##\n5\tAC\t##\n0\tAC\t##\n";
        let mappings = "\
0\tchr1\t150\t0\t0\t0\t1\t1
1\tchr1\t160\t0\t0\t0\t1\t0
1\tchr2\t150\t0\t0\t0\t1\t0
";
        let mut reads_out = Vec::new();
        let mut mappings_out = Vec::new();
        let summary = MapCutter::new(window("chr1,100,200"))
            .cut(
                reads.as_bytes(),
                mappings.as_bytes(),
                &mut reads_out,
                &mut mappings_out,
            )
            .unwrap();

        assert_eq!(
            summary,
            CutSummary {
                reads: 3,
                placeholder_reads: 2,
                mappings_in: 3,
                mappings_kept: 2,
            }
        );
        let reads_out = String::from_utf8(reads_out).unwrap();
        assert_eq!(reads_out.lines().count(), 3);
        assert_eq!(reads_out.lines().next(), Some("0\tAC\t##"));
        assert_eq!(
            String::from_utf8(mappings_out).unwrap(),
            "0\tchr1\t150\t0\t0\t0\t1\t1\n1\tchr1\t160\t0\t0\t0\t1\t0\n"
        );
    }

    #[test]
    fn test_cut_detects_truncated_mappings() {
        let reads = "0\tAC\t##\n0\tAC\t##\n";
        let mappings = "1\tchr1\t150\t0\t0\t0\t1\t0\n";
        let result = MapCutter::new(RangeSelector::default()).cut(
            reads.as_bytes(),
            mappings.as_bytes(),
            &mut Vec::<u8>::new(),
            &mut Vec::<u8>::new(),
        );
        match result {
            Err(PrepError::TruncatedStream { read_number }) => assert_eq!(read_number, 1),
            other => panic!("expected truncation, got {other:?}"),
        }
    }

    #[test]
    fn test_cut_detects_unclaimed_mappings() {
        let reads = "0\tAC\t##\n";
        let mappings = "1\tchr1\t150\t0\t0\t0\t1\t0\n1\tchr1\t170\t0\t0\t0\t1\t0\n";
        let result = MapCutter::new(RangeSelector::default()).cut(
            reads.as_bytes(),
            mappings.as_bytes(),
            &mut Vec::<u8>::new(),
            &mut Vec::<u8>::new(),
        );
        assert!(matches!(result, Err(PrepError::Consistency(_))));
    }
}
