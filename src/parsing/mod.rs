//! Parsers and writers for the text formats handled by the crate.
//!
//! - **CGI header**: `#`-prefixed metadata ending with a `>` column line ([`header`])
//! - **UCSC rmsk**: RepeatMasker annotation rows ([`repeats`])
//! - **UCSC genomicSuperDups**: segmental duplication rows ([`segdups`])
//! - **NCBI gene table**: comma-separated transcripts ([`genes`])
//!
//! The reads and mappings rows live in [`crate::core::record`].

pub mod genes;
pub mod header;
pub mod repeats;
pub mod segdups;
