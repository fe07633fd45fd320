//! Analysis of simulation runs

pub mod history;

pub use history::{observe, observe_with, Classification, RunAnalysis};
