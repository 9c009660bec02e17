//! # cg-dataprep
//!
//! Data preparation for Complete Genomics style read, mapping and annotation files.
//!
//! Two jobs need more than line-by-line rewriting:
//!
//! - **Cutting mappings to a window**: a reads file and its mappings file are
//!   reduced to the mappings inside a half-open genomic range. Reads lose
//!   mappings but never disappear, and the mate cross-references of what is
//!   left stay valid.
//! - **Flattening annotation**: overlapping RepeatMasker or segmental
//!   duplication intervals are swept per chromosome into non-overlapping
//!   segments, reporting the least diverged repeat or the duplication depth.
//!
//! Around those sit the CGI header conventions, transparent gzip/bzip2 text
//! IO, and a gene table translator.
//!
//! ## Example
//!
//! ```rust
//! use cg_dataprep::aggregation::{sweep, DepthState};
//! use cg_dataprep::core::chromosome::Chromosome;
//! use cg_dataprep::core::interval::GenomicInterval;
//!
//! let chr1 = Chromosome::autosome(1).unwrap();
//! let intervals = vec![
//!     GenomicInterval::new(chr1, 100, 300, ()),
//!     GenomicInterval::new(chr1, 200, 400, ()),
//! ];
//!
//! let segments = sweep(chr1, &intervals, DepthState::default()).unwrap();
//! let depths: Vec<usize> = segments.iter().map(|s| s.value).collect();
//! assert_eq!(depths, vec![1, 2, 1]);
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Chromosomes, ranges, intervals and read/mapping records
//! - [`filtering`]: The lockstep reads/mappings range filter
//! - [`aggregation`]: Sweep-line interval aggregation
//! - [`parsing`]: CGI headers and the UCSC/NCBI input tables
//! - [`jobs`]: File-level runners driven by [`config`]

use std::sync::Once;

use tracing_subscriber::EnvFilter;

pub mod aggregation;
pub mod config;
pub mod core;
pub mod error;
pub mod filtering;
pub mod jobs;
pub mod parsing;
pub mod utils;

// Re-export commonly used types for convenience
pub use crate::core::chromosome::{CanonicalSet, Chromosome};
pub use crate::core::range::GenomicRange;
pub use error::{PrepError, Result};
pub use filtering::{CutSummary, MapCutter, RangeSelector};

static TRACING_INIT: Once = Once::new();

/// Install a compact stderr subscriber; `RUST_LOG` overrides the default filter.
///
/// Safe to call more than once, and a no-op when the host application has
/// already installed a global subscriber.
pub fn init_tracing(verbose: bool) {
    TRACING_INIT.call_once(|| {
        let default = if verbose {
            "cg_dataprep=debug,info"
        } else {
            "cg_dataprep=info,warn"
        };
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
        let installed = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .without_time()
            .with_writer(std::io::stderr)
            .try_init();
        if let Err(e) = installed {
            // An embedding application already owns the global subscriber
            tracing::debug!(error = %e, "Keeping the existing tracing subscriber");
        }
    });
}
