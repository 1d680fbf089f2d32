//! Implementations of the extension traits

pub(crate) mod classify;
pub(crate) mod cleaning;
mod correlation;
mod iqr;
mod missing;
mod zscore;
