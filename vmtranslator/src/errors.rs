//! Error taxonomy for the VM translator.
//!
//! Every case is fatal: the stage reports the first error and stops,
//! matching the toolchain-wide no-recovery error model.

#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed command: {0}")]
    MalformedCommand(String),
    #[error("unknown arithmetic command: {0}")]
    UnknownArithmetic(String),
    #[error("unknown memory segment: {0}")]
    UnknownSegment(String),
    #[error("segment {segment} has no index {index}")]
    SegmentIndexOutOfRange { segment: String, index: i32 },
}

pub type Result<T> = std::result::Result<T, TranslateError>;
