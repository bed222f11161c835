//! Error types for golden operand files.

use thiserror::Error;

/// Errors raised while reading or writing golden operand files.
///
/// Replay mode treats every one of these as a broken contract between the
/// recording run and the current run; nothing is silently padded or skipped.
#[derive(Error, Debug)]
pub enum GoldenFileError {
    #[error("failed to access golden file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("golden file '{path}' is missing its shape header")]
    MissingHeader { path: String },

    #[error("golden file '{path}' has a malformed shape header: {source}")]
    MalformedHeader {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("golden file '{path}' holds operand {found} but {expected} is required")]
    OperandMismatch {
        path: String,
        expected: String,
        found: String,
    },

    #[error("golden file '{path}' was recorded with {recorded} values but {required} are required")]
    ShapeMismatch {
        path: String,
        recorded: usize,
        required: usize,
    },

    #[error("golden file '{path}' ended after {read} of {required} values")]
    ShortRead {
        path: String,
        read: usize,
        required: usize,
    },

    #[error("golden file '{path}' line {line}: cannot parse value '{value}'")]
    MalformedValue {
        path: String,
        line: usize,
        value: String,
    },
}
