use std::str::Utf8Error;

use thiserror::Error;

/// Unexpected fault while reducing responses into display text.
///
/// Never leaves the reducer: it is turned into `Failure::Parse` with this
/// message as the description.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseFault {
    #[error("summary is not valid UTF-8 ({0})")]
    InvalidSummary(#[from] Utf8Error),

    #[error("detail arrived without a summary for cycle {0}")]
    MissingSummary(u64),
}
