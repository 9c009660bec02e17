//! Text files that may be gzip or bzip2 compressed, chosen by extension.
//!
//! Supported extensions:
//! - `.gz`, `.bgz` (gzip, multi-member aware)
//! - `.bz2` (bzip2, multi-stream aware)
//! - anything else is plain text

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use bzip2::read::MultiBzDecoder;
use bzip2::write::BzEncoder;
use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;

/// Transport compression of a text file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    None,
    Gzip,
    Bzip2,
}

impl Compression {
    #[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
    pub fn from_path(path: &Path) -> Self {
        let path_str = path.to_string_lossy().to_lowercase();
        if path_str.ends_with(".gz") || path_str.ends_with(".bgz") {
            Self::Gzip
        } else if path_str.ends_with(".bz2") {
            Self::Bzip2
        } else {
            Self::None
        }
    }
}

/// Open a possibly compressed text file for buffered line reading
///
/// # Errors
///
/// Returns the underlying IO error if the file cannot be opened.
pub fn open_text_reader(path: &Path) -> io::Result<Box<dyn BufRead>> {
    let file = File::open(path)?;
    Ok(match Compression::from_path(path) {
        Compression::None => Box::new(BufReader::new(file)),
        Compression::Gzip => Box::new(BufReader::new(MultiGzDecoder::new(file))),
        Compression::Bzip2 => Box::new(BufReader::new(MultiBzDecoder::new(file))),
    })
}

/// A buffered, possibly compressing text writer.
///
/// Call [`TextWriter::finish`] to flush and write the compression trailer;
/// dropping the writer instead silently discards trailer errors.
pub enum TextWriter {
    Plain(BufWriter<File>),
    Gzip(GzEncoder<BufWriter<File>>),
    Bzip2(BzEncoder<BufWriter<File>>),
}

impl TextWriter {
    /// # Errors
    ///
    /// Returns the IO error raised while flushing or finishing the stream.
    pub fn finish(self) -> io::Result<()> {
        match self {
            Self::Plain(mut writer) => writer.flush(),
            Self::Gzip(encoder) => encoder.finish()?.flush(),
            Self::Bzip2(encoder) => encoder.finish()?.flush(),
        }
    }
}

impl Write for TextWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Plain(writer) => writer.write(buf),
            Self::Gzip(encoder) => encoder.write(buf),
            Self::Bzip2(encoder) => encoder.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Plain(writer) => writer.flush(),
            Self::Gzip(encoder) => encoder.flush(),
            Self::Bzip2(encoder) => encoder.flush(),
        }
    }
}

/// Create a text file, compressing according to its extension
///
/// # Errors
///
/// Returns the underlying IO error if the file cannot be created.
pub fn open_text_writer(path: &Path) -> io::Result<TextWriter> {
    let file = BufWriter::new(File::create(path)?);
    Ok(match Compression::from_path(path) {
        Compression::None => TextWriter::Plain(file),
        Compression::Gzip => TextWriter::Gzip(GzEncoder::new(file, flate2::Compression::default())),
        Compression::Bzip2 => {
            TextWriter::Bzip2(BzEncoder::new(file, bzip2::Compression::default()))
        }
    })
}
