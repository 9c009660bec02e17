use std::io;
use std::iter::Peekable;

use crate::core::record::MappingRecord;
use crate::error::PrepError;

/// Splits the mapping stream into per-read groups.
///
/// A group is the run of records up to and including the first one carrying
/// the last-in-group flag.
pub struct MappingGroupScanner<I: Iterator<Item = io::Result<String>>> {
    lines: Peekable<I>,
    records_read: u64,
}

impl<I: Iterator<Item = io::Result<String>>> MappingGroupScanner<I> {
    pub fn new(lines: I) -> Self {
        Self {
            lines: lines.peekable(),
            records_read: 0,
        }
    }

    /// Number of mapping records consumed so far
    #[must_use]
    pub fn records_read(&self) -> u64 {
        self.records_read
    }

    /// Consume the group owned by read `read_number` (0-based)
    ///
    /// # Errors
    ///
    /// Returns `PrepError::TruncatedStream` if the stream ends before a
    /// last-in-group record, `PrepError::Format` for unparsable records and
    /// `PrepError::Io` for read failures.
    pub fn next_group(&mut self, read_number: u64) -> Result<Vec<MappingRecord>, PrepError> {
        let mut group = Vec::new();
        loop {
            let Some(line) = self.lines.next() else {
                return Err(PrepError::TruncatedStream { read_number });
            };
            let record = MappingRecord::parse(&line?)?;
            self.records_read += 1;

            let last = record.is_last_in_group();
            group.push(record);
            if last {
                return Ok(group);
            }
        }
    }

    /// Verify that every mapping record has been claimed by a read
    ///
    /// # Errors
    ///
    /// Returns `PrepError::Consistency` if records remain, which means the
    /// reads and mappings streams were out of step.
    pub fn finish(mut self) -> Result<(), PrepError> {
        match self.lines.next() {
            None => Ok(()),
            Some(Err(e)) => Err(e.into()),
            Some(Ok(line)) => Err(PrepError::consistency(format!(
                "mapping records remain after the last read, starting with: {line}"
            ))),
        }
    }
}
