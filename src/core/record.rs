//! Read and mapping rows of the CGI reads/mappings files.

use crate::error::PrepError;

/// Read flags: either half-DNB of mate 1 has no reported mapping
pub const MATE1_UNMAPPED_MASK: u8 = 0x03;
/// Read flags: either half-DNB of mate 2 has no reported mapping
pub const MATE2_UNMAPPED_MASK: u8 = 0x0C;

/// Mapping flags: this record closes its read's group
pub const LAST_IN_GROUP: u32 = 0x01;

const FLAGS_FIELD: usize = 0;
const CHROMOSOME_FIELD: usize = 1;
const POSITION_FIELD: usize = 2;
const MATE_FIELD: usize = 7;

const PLACEHOLDER_FLAGS: &str = "5";
const PLACEHOLDER_LENGTH: usize = 70;

/// The sentinel read line written for reads that keep no mappings:
/// flags `5`, 70 `A` bases and 70 `!` qualities.
#[must_use]
pub fn placeholder_read_line() -> String {
    format!(
        "{PLACEHOLDER_FLAGS}\t{}\t{}",
        "A".repeat(PLACEHOLDER_LENGTH),
        "!".repeat(PLACEHOLDER_LENGTH)
    )
}

/// One line of the reads file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadRecord {
    line: String,
    flags: u8,
}

impl ReadRecord {
    /// # Errors
    ///
    /// Returns `PrepError::Format` if the leading flags field is not a small integer.
    pub fn parse(line: &str) -> Result<Self, PrepError> {
        let line = line.trim_end_matches(['\r', '\n']);
        let field = line.split('\t').next().unwrap_or_default();
        let flags = field
            .parse()
            .map_err(|_| PrepError::format(format!("invalid read flags '{field}' in: {line}")))?;
        Ok(Self {
            line: line.to_string(),
            flags,
        })
    }

    #[must_use]
    pub fn flags(&self) -> u8 {
        self.flags
    }

    /// Both mates lack mappings, so the read owns no mapping records
    #[must_use]
    pub fn both_mates_unmapped(&self) -> bool {
        self.flags & MATE1_UNMAPPED_MASK != 0 && self.flags & MATE2_UNMAPPED_MASK != 0
    }

    #[must_use]
    pub fn as_line(&self) -> &str {
        &self.line
    }
}

/// One line of the mappings file.
///
/// Only the flags, chromosome, position and mate-index columns are interpreted;
/// every other column is carried through untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingRecord {
    fields: Vec<String>,
    flags: u32,
    position: u64,
    mate_index: usize,
}

impl MappingRecord {
    /// # Errors
    ///
    /// Returns `PrepError::Format` if the line has fewer than 8 columns or the
    /// flags, position or mate-index columns are not non-negative integers.
    pub fn parse(line: &str) -> Result<Self, PrepError> {
        let line = line.trim_end_matches(['\r', '\n']);
        let fields: Vec<String> = line.split('\t').map(str::to_string).collect();
        if fields.len() <= MATE_FIELD {
            return Err(PrepError::format(format!(
                "mapping has {} columns, expected at least {}: {line}",
                fields.len(),
                MATE_FIELD + 1
            )));
        }

        let numeric = |index: usize, what: &str| {
            fields[index].parse::<u64>().map_err(|_| {
                PrepError::format(format!("invalid {what} '{}' in: {line}", fields[index]))
            })
        };
        let flags = u32::try_from(numeric(FLAGS_FIELD, "mapping flags")?)
            .map_err(|_| PrepError::format(format!("mapping flags out of range in: {line}")))?;
        let position = numeric(POSITION_FIELD, "position")?;
        let mate_index = usize::try_from(numeric(MATE_FIELD, "mate index")?)
            .map_err(|_| PrepError::format(format!("mate index out of range in: {line}")))?;

        Ok(Self {
            fields,
            flags,
            position,
            mate_index,
        })
    }

    #[must_use]
    pub fn flags(&self) -> u32 {
        self.flags
    }

    #[must_use]
    pub fn is_last_in_group(&self) -> bool {
        self.flags & LAST_IN_GROUP != 0
    }

    pub fn set_last_in_group(&mut self, last: bool) {
        if last {
            self.flags |= LAST_IN_GROUP;
        } else {
            self.flags &= !LAST_IN_GROUP;
        }
        self.fields[FLAGS_FIELD] = self.flags.to_string();
    }

    #[must_use]
    pub fn chromosome(&self) -> &str {
        &self.fields[CHROMOSOME_FIELD]
    }

    #[must_use]
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Index of the mate record within this record's original group
    #[must_use]
    pub fn mate_index(&self) -> usize {
        self.mate_index
    }

    /// Render the record with its mate-index column replaced
    #[must_use]
    pub fn to_line_with_mate(&self, mate_index: usize) -> String {
        let mate = mate_index.to_string();
        let mut line = String::new();
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                line.push('\t');
            }
            line.push_str(if i == MATE_FIELD { &mate } else { field });
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAPPING: &str = "1\tchr1\t150\t0\t0\t0\t1\t3\tgap\t42";

    #[test]
    fn test_placeholder_read_line() {
        let line = placeholder_read_line();
        let fields: Vec<&str> = line.split('\t').collect();
        assert_eq!(fields.len(), 3);
        assert_eq!(fields[0], "5");
        assert_eq!(fields[1], "A".repeat(70));
        assert_eq!(fields[2], "!".repeat(70));
    }

    #[test]
    fn test_read_flags() {
        let read = ReadRecord::parse("6\tACGT\t####\n").unwrap();
        assert_eq!(read.flags(), 6);
        assert!(read.both_mates_unmapped());
        assert_eq!(read.as_line(), "6\tACGT\t####");

        for flags in ["0", "1", "2", "3", "4", "8", "12"] {
            let read = ReadRecord::parse(&format!("{flags}\tACGT\t####")).unwrap();
            assert!(!read.both_mates_unmapped(), "flags {flags}");
        }
        for flags in ["5", "9", "10", "15"] {
            let read = ReadRecord::parse(&format!("{flags}\tACGT\t####")).unwrap();
            assert!(read.both_mates_unmapped(), "flags {flags}");
        }
    }

    #[test]
    fn test_read_flags_must_be_numeric() {
        assert!(matches!(
            ReadRecord::parse("x\tACGT\t####"),
            Err(PrepError::Format(_))
        ));
    }

    #[test]
    fn test_parse_mapping() {
        let record = MappingRecord::parse(MAPPING).unwrap();
        assert!(record.is_last_in_group());
        assert_eq!(record.chromosome(), "chr1");
        assert_eq!(record.position(), 150);
        assert_eq!(record.mate_index(), 3);
        assert_eq!(record.to_line_with_mate(3), MAPPING);
        assert_eq!(
            record.to_line_with_mate(0),
            "1\tchr1\t150\t0\t0\t0\t1\t0\tgap\t42"
        );
    }

    #[test]
    fn test_terminal_flag_toggle() {
        let mut record = MappingRecord::parse("6\tchr2\t10\t0\t0\t0\t1\t0").unwrap();
        assert!(!record.is_last_in_group());
        record.set_last_in_group(true);
        assert_eq!(record.flags(), 7);
        assert!(record.to_line_with_mate(0).starts_with("7\t"));
        record.set_last_in_group(false);
        assert_eq!(record.flags(), 6);
    }

    #[test]
    fn test_malformed_mappings() {
        for line in [
            "1\tchr1\t150",
            "x\tchr1\t150\t0\t0\t0\t1\t0",
            "1\tchr1\tpos\t0\t0\t0\t1\t0",
            "1\tchr1\t-4\t0\t0\t0\t1\t0",
            "1\tchr1\t150\t0\t0\t0\t1\tmate",
        ] {
            assert!(
                matches!(MappingRecord::parse(line), Err(PrepError::Format(_))),
                "'{line}' should be rejected"
            );
        }
    }
}
