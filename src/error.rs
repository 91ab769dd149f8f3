use std::string::FromUtf8Error;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Reading or seeking the underlying stream failed. A cached record that can't be read back
    /// completely ends up here as `UnexpectedEof`.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// On request for a non existing index entry
    #[error("index entry {index} out of range, {len} lines indexed")]
    OutOfRange { index: usize, len: usize },

    /// The store was closed and its stream released
    #[error("stream unavailable: store is closed")]
    StreamClosed,

    #[error("invalid utf-8: {0}")]
    Utf8(#[from] FromUtf8Error),
}
