//! Cutting CGI reads/mappings files down to a genomic window.
//!
//! The mappings file is a flat stream of per-read groups. Each read of the
//! reads file owns one group (or none, if both mates are unmapped), and the
//! two files must be consumed in lockstep:
//!
//! ```text
//! reads ──► ReadRecord ─┐
//!                        ├─► filter_group ─► read line + kept mappings
//! mappings ─► MappingGroupScanner ─► RangeSelector ─► MateIndexRewriter
//! ```
//!
//! ## Example
//!
//! ```rust
//! use cg_dataprep::filtering::{MapCutter, RangeSelector};
//!
//! let reads = "0\tACGT\t####\n";
//! let mappings = "0\tchr1\t50\t0\t0\t0\t1\t1\n1\tchr1\t150\t0\t0\t0\t1\t0\n";
//!
//! let cutter = MapCutter::new(RangeSelector::new(Some("chr1,100,200".parse().unwrap())));
//! let (mut reads_out, mut mappings_out) = (Vec::<u8>::new(), Vec::<u8>::new());
//! let summary = cutter
//!     .cut(reads.as_bytes(), mappings.as_bytes(), &mut reads_out, &mut mappings_out)
//!     .unwrap();
//!
//! assert_eq!(summary.mappings_kept, 1);
//! assert_eq!(String::from_utf8(mappings_out).unwrap(), "1\tchr1\t150\t0\t0\t0\t1\t0\n");
//! ```

pub mod cutter;
pub mod mates;
pub mod scanner;
pub mod selector;

pub use cutter::{filter_group, CutSummary, FilteredRead, MapCutter};
pub use mates::{IndexRemap, MateIndexRewriter, MateLink};
pub use scanner::MappingGroupScanner;
pub use selector::{RangeSelector, Selection};
