use thiserror::Error;

pub type Result<T> = std::result::Result<T, PrepError>;

#[derive(Error, Debug)]
pub enum PrepError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid field format: {0}")]
    Format(String),

    #[error("Invalid range '{spec}': {reason}")]
    RangeSpec { spec: String, reason: String },

    #[error("Mapping stream ended before the terminal record of read {read_number}")]
    TruncatedStream { read_number: u64 },

    #[error("Consistency violation: {0}")]
    Consistency(String),

    #[error("Invalid file header: {0}")]
    InvalidHeader(String),
}

impl PrepError {
    pub(crate) fn format(msg: impl Into<String>) -> Self {
        Self::Format(msg.into())
    }

    pub(crate) fn consistency(msg: impl Into<String>) -> Self {
        Self::Consistency(msg.into())
    }
}
