use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PrepError;

/// A half-open genomic window `[from, to)` on one chromosome.
///
/// Parsed from the `chromosome,from,to` form, e.g. `chr1,500,700`.
/// The chromosome is kept as the raw name so that any contig in the
/// mapping files can be targeted, not only canonical ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GenomicRange {
    pub chromosome: String,
    pub from: u64,
    pub to: u64,
}

impl GenomicRange {
    /// Create a range, rejecting `from > to`
    ///
    /// # Errors
    ///
    /// Returns `PrepError::RangeSpec` if the bounds are inverted.
    pub fn new(chromosome: impl Into<String>, from: u64, to: u64) -> Result<Self, PrepError> {
        let chromosome = chromosome.into();
        if from > to {
            return Err(PrepError::RangeSpec {
                spec: format!("{chromosome},{from},{to}"),
                reason: "start is past the end".to_string(),
            });
        }
        Ok(Self {
            chromosome,
            from,
            to,
        })
    }

    #[must_use]
    pub fn contains(&self, chromosome: &str, position: u64) -> bool {
        chromosome == self.chromosome && (self.from..self.to).contains(&position)
    }
}

impl FromStr for GenomicRange {
    type Err = PrepError;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| PrepError::RangeSpec {
            spec: spec.to_string(),
            reason: reason.to_string(),
        };

        let fields: Vec<&str> = spec.split(',').collect();
        let [chromosome, from, to] = fields.as_slice() else {
            return Err(invalid("expected chromosome,from,to"));
        };
        if chromosome.is_empty() {
            return Err(invalid("empty chromosome name"));
        }
        let from: u64 = from
            .parse()
            .map_err(|_| invalid("start is not a non-negative integer"))?;
        let to: u64 = to
            .parse()
            .map_err(|_| invalid("end is not a non-negative integer"))?;

        if from > to {
            return Err(invalid("start is past the end"));
        }

        Ok(Self {
            chromosome: (*chromosome).to_string(),
            from,
            to,
        })
    }
}

impl TryFrom<String> for GenomicRange {
    type Error = PrepError;

    fn try_from(spec: String) -> Result<Self, Self::Error> {
        spec.parse()
    }
}

impl From<GenomicRange> for String {
    fn from(range: GenomicRange) -> Self {
        range.to_string()
    }
}

impl fmt::Display for GenomicRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.chromosome, self.from, self.to)
    }
}
