use serde::{Deserialize, Serialize};

use crate::core::chromosome::Chromosome;

/// A half-open interval `[start, end)` on a canonical chromosome carrying an
/// annotation payload (a repeat, or nothing for segmental duplications).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenomicInterval<P> {
    pub chromosome: Chromosome,
    pub start: u64,
    pub end: u64,
    pub payload: P,
}

impl<P> GenomicInterval<P> {
    pub fn new(chromosome: Chromosome, start: u64, end: u64, payload: P) -> Self {
        Self {
            chromosome,
            start,
            end,
            payload,
        }
    }
}

