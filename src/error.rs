//! Error taxonomy for the measurement core.
//!
//! Absence of a measurement (too few reference lines, an unfilled history, a
//! failed stability check) is never an error; those ticks simply produce no
//! output. Only caller contract violations end up here.
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum GaugeError {
    /// Degenerate or non-finite configuration, rejected before any scale
    /// factor is computed from it.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// Frame whose geometry cannot feed the preprocessing pipeline.
    #[error("malformed frame {width}x{height} (channels={channels}, stride={stride}, len={len}): {reason}")]
    MalformedFrame {
        width: usize,
        height: usize,
        channels: usize,
        stride: usize,
        len: usize,
        reason: &'static str,
    },
    /// Failure reported by a file-backed frame source or report sink.
    #[error("i/o: {0}")]
    Io(String),
}

pub type Result<T> = std::result::Result<T, GaugeError>;

pub(crate) fn invalid_config(msg: impl Into<String>) -> GaugeError {
    GaugeError::InvalidConfig(msg.into())
}
