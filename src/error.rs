use std::time::Duration;
use thiserror::Error;

/// Failures surfaced by the detection core.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DetectError {
    /// An axis name outside of `width`/`height`.
    #[error("invalid axis '{0}', expected 'width' or 'height'")]
    InvalidAxis(String),

    /// The surface kept reporting a zero inner size for the whole retry budget.
    #[error("surface never reported a non-zero size within {retries} retries of {delay:?}")]
    NeverStabilized { retries: u32, delay: Duration },
}
