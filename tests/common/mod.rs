//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use cg_dataprep::utils::io::{open_text_reader, open_text_writer};

/// Write `content` to `dir/name`, compressing by extension
pub fn write_text(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    let mut writer = open_text_writer(&path).expect("Failed to create fixture");
    writer
        .write_all(content.as_bytes())
        .expect("Failed to write fixture");
    writer.finish().expect("Failed to finish fixture");
    path
}

/// Read every line of a possibly compressed text file
pub fn read_lines(path: &Path) -> Vec<String> {
    open_text_reader(path)
        .expect("Failed to open output")
        .lines()
        .collect::<Result<_, _>>()
        .expect("Failed to read output")
}

/// Lines after the CGI header's `>` column line
pub fn data_lines(path: &Path) -> Vec<String> {
    read_lines(path)
        .into_iter()
        .skip_while(|l| !l.starts_with('>'))
        .skip(1)
        .collect()
}

/// Compare two text files line by line, skipping lines with any of `ignore_prefixes`.
///
/// Panics with the first differing line number and both lines.
pub fn assert_text_eq(actual: &Path, expected: &Path, ignore_prefixes: &[&str]) {
    let keep = |line: &String| !ignore_prefixes.iter().any(|p| line.starts_with(p));
    let actual_lines: Vec<String> = read_lines(actual).into_iter().filter(keep).collect();
    let expected_lines: Vec<String> = read_lines(expected).into_iter().filter(keep).collect();

    for (i, (a, e)) in actual_lines.iter().zip(&expected_lines).enumerate() {
        assert_eq!(
            a,
            e,
            "compare {} {} failed near line {}",
            actual.display(),
            expected.display(),
            i + 1
        );
    }
    assert_eq!(
        actual_lines.len(),
        expected_lines.len(),
        "{} and {} differ in length",
        actual.display(),
        expected.display()
    );
}
