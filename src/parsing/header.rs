//! The CGI metadata header that opens every data file.
//!
//! ```text
//! #TYPE	UCSC-SEGDUP
//! #GENERATED_AT	2010-Aug-17 14:03
//! #GENOME_REFERENCE	NCBI build 37
//!
//! >chromosome	begin	end	count
//! ```
//!
//! Metadata lines start with `#`, blank lines may appear, and the header ends
//! with the `>`-prefixed column-name line.

use std::io::{BufRead, Write};

use chrono::{DateTime, Local};

use crate::error::PrepError;

const GENERATED_AT_FORMAT: &str = "%Y-%b-%d %H:%M";

/// Copy a header line by line, leaving `reader` positioned on the first data line.
///
/// Lines are copied with their line terminator normalised to `\n`. Returns the
/// number of lines copied, including the column-name line.
///
/// # Errors
///
/// Returns `PrepError::InvalidHeader` if a data line appears before the
/// column-name line or the input ends inside the header.
pub fn copy_header<R: BufRead, W: Write>(reader: &mut R, writer: &mut W) -> Result<usize, PrepError> {
    let mut copied = 0;
    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            return Err(PrepError::InvalidHeader(
                "input ended before the '>' column-name line".to_string(),
            ));
        }
        let content = line.trim_end_matches(['\r', '\n']);
        if !(content.is_empty() || content.starts_with('#') || content.starts_with('>')) {
            return Err(PrepError::InvalidHeader(format!(
                "unexpected line {} in header: {content}",
                copied + 1
            )));
        }

        writeln!(writer, "{content}")?;
        copied += 1;
        if content.starts_with('>') {
            return Ok(copied);
        }
    }
}

/// Header written at the top of generated annotation files
#[derive(Debug, Clone)]
pub struct CgiHeader {
    pub file_type: String,
    pub genome_reference: String,
    pub generated_at: DateTime<Local>,
    pub columns: Vec<String>,
}

impl CgiHeader {
    pub fn new(
        file_type: impl Into<String>,
        genome_reference: impl Into<String>,
        columns: &[&str],
    ) -> Self {
        Self {
            file_type: file_type.into(),
            genome_reference: genome_reference.into(),
            generated_at: Local::now(),
            columns: columns.iter().map(|c| (*c).to_string()).collect(),
        }
    }

    #[must_use]
    pub fn with_generated_at(mut self, generated_at: DateTime<Local>) -> Self {
        self.generated_at = generated_at;
        self
    }

    /// # Errors
    ///
    /// Returns the IO error raised by `writer`.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writeln!(writer, "#TYPE\t{}", self.file_type)?;
        writeln!(
            writer,
            "#GENERATED_AT\t{}",
            self.generated_at.format(GENERATED_AT_FORMAT)
        )?;
        writeln!(writer, "#GENOME_REFERENCE\t{}", self.genome_reference)?;
        writeln!(writer)?;
        writeln!(writer, ">{}", self.columns.join("\t"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_copy_header_stops_after_column_line() {
        let input = "#TYPE\tREADS\n#BATCH\t1\n\n>flags\treads\tscores\r\n0\tACGT\t####\n";
        let mut reader = input.as_bytes();
        let mut out = Vec::new();

        let copied = copy_header(&mut reader, &mut out).unwrap();
        assert_eq!(copied, 4);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "#TYPE\tREADS\n#BATCH\t1\n\n>flags\treads\tscores\n"
        );

        let mut rest = String::new();
        reader.read_line(&mut rest).unwrap();
        assert_eq!(rest, "0\tACGT\t####\n");
    }

    #[test]
    fn test_copy_header_rejects_data_before_columns() {
        let mut reader = "#TYPE\tREADS\n0\tACGT\t####\n".as_bytes();
        assert!(matches!(
            copy_header(&mut reader, &mut Vec::<u8>::new()),
            Err(PrepError::InvalidHeader(_))
        ));
    }

    #[test]
    fn test_copy_header_rejects_truncated_header() {
        let mut reader = "#TYPE\tREADS\n".as_bytes();
        assert!(matches!(
            copy_header(&mut reader, &mut Vec::<u8>::new()),
            Err(PrepError::InvalidHeader(_))
        ));
    }

    #[test]
    fn test_write_header() {
        let at = Local.with_ymd_and_hms(2010, 8, 17, 14, 3, 0).unwrap();
        let header = CgiHeader::new("UCSC-SEGDUP", "NCBI build 37", &["chromosome", "begin"])
            .with_generated_at(at);

        let mut out = Vec::new();
        header.write_to(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "#TYPE\tUCSC-SEGDUP\n#GENERATED_AT\t2010-Aug-17 14:03\n#GENOME_REFERENCE\tNCBI build 37\n\n>chromosome\tbegin\n"
        );
    }
}
