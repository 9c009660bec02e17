//! Core data types shared by the mapping filter and the annotation sweeps.
//!
//! - [`Chromosome`](chromosome::Chromosome): canonical contig enumeration and
//!   [`ChromosomeTable`](chromosome::ChromosomeTable) keyed by it
//! - [`GenomicRange`](range::GenomicRange): the half-open `chromosome,from,to` window
//! - [`GenomicInterval`](interval::GenomicInterval): an annotated interval on a canonical chromosome
//! - [`ReadRecord`](record::ReadRecord), [`MappingRecord`](record::MappingRecord): rows of
//!   the reads and mappings files
//!
//! ## Contig Naming
//!
//! Annotation inputs use UCSC names and are restricted to the canonical set:
//!
//! | Kept            | Optional | Dropped                       |
//! |-----------------|----------|-------------------------------|
//! | chr1-chr22, X, Y | chrM     | `_random`, `chrUn_*`, alt haps |
//!
//! The gene table arrives with NCBI names (`1`, `X`, `MT`) and is translated.

pub mod chromosome;
pub mod interval;
pub mod range;
pub mod record;
