//! Consistency checks between step strategies

pub mod cross_check;

pub use cross_check::{cross_check, Divergence, VerificationConfig, VerificationReport};
