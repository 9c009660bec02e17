//! Job configuration, deserialised from JSON.
//!
//! ```json
//! {
//!   "reads": "MAP/reads_GS10364-FS3-L01_001.tsv.bz2",
//!   "mappings": "MAP/mapping_GS10364-FS3-L01_001.tsv.bz2",
//!   "output_prefix": "cut/",
//!   "keep_range": "chr1,500,700"
//! }
//! ```

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::chromosome::CanonicalSet;
use crate::core::range::GenomicRange;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Load any job configuration from a JSON file
///
/// # Errors
///
/// Returns `ConfigError::ReadError` if the file cannot be read, or
/// `ConfigError::ParseError` if it is not valid for `T`.
pub fn load_from_file<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Cutting a reads/mappings file pair to a genomic window
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CutMapsConfig {
    pub reads: PathBuf,
    pub mappings: PathBuf,

    /// Prepended to each input's file name to form its output path
    pub output_prefix: String,

    /// Window to keep; all mappings are kept when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keep_range: Option<GenomicRange>,
}

impl CutMapsConfig {
    /// `output_prefix` followed by the input's file name
    #[must_use]
    pub fn output_path(&self, input: &Path) -> PathBuf {
        let name = input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        PathBuf::from(format!("{}{name}", self.output_prefix))
    }
}

/// Preparing an annotation file (repeats, segmental duplications or genes)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnnotationConfig {
    pub input: PathBuf,
    pub output: PathBuf,

    /// Written to the `#GENOME_REFERENCE` header line, e.g. "NCBI build 37"
    pub genome_reference: String,

    #[serde(default)]
    pub include_mitochondrial: bool,
}

impl AnnotationConfig {
    #[must_use]
    pub fn canonical_set(&self) -> CanonicalSet {
        CanonicalSet::new(self.include_mitochondrial)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cut_maps_config_from_json() {
        let config: CutMapsConfig = serde_json::from_str(
            r#"{"reads": "in/reads.tsv.gz", "mappings": "in/mapping.tsv.gz",
                "output_prefix": "out/cut_", "keep_range": "chr1,500,700"}"#,
        )
        .unwrap();
        assert_eq!(config.keep_range, Some("chr1,500,700".parse().unwrap()));
        assert_eq!(
            config.output_path(&config.reads),
            PathBuf::from("out/cut_reads.tsv.gz")
        );
    }

    #[test]
    fn test_keep_range_is_optional() {
        let config: CutMapsConfig =
            serde_json::from_str(r#"{"reads": "r", "mappings": "m", "output_prefix": "x"}"#)
                .unwrap();
        assert!(config.keep_range.is_none());
    }

    #[test]
    fn test_bad_range_is_a_parse_error() {
        let result = serde_json::from_str::<CutMapsConfig>(
            r#"{"reads": "r", "mappings": "m", "output_prefix": "x", "keep_range": "chr1,5"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_annotation_config_defaults() {
        let config: AnnotationConfig = serde_json::from_str(
            r#"{"input": "rmsk.txt.gz", "output": "rmsk.tsv", "genome_reference": "NCBI build 37"}"#,
        )
        .unwrap();
        assert!(!config.include_mitochondrial);
        assert!(!config.canonical_set().include_mitochondrial);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("job.json");
        std::fs::write(
            &path,
            r#"{"input": "a", "output": "b", "genome_reference": "ref", "include_mitochondrial": true}"#,
        )
        .unwrap();
        let config: AnnotationConfig = load_from_file(&path).unwrap();
        assert!(config.include_mitochondrial);

        assert!(matches!(
            load_from_file::<AnnotationConfig>(&dir.path().join("missing.json")),
            Err(ConfigError::ReadError(_))
        ));
    }
}
