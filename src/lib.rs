//! # Grocery Classifier
//!
//! Builds a vocabulary and label space from a labelled grocery corpus, trains a small LSTM
//! classifier, and exports a half-precision model together with the JSON sidecar needed to
//! reproduce preprocessing at inference time.
#![forbid(unsafe_code)]

/// Models
pub mod models;

/// Pipelines
pub mod pipelines;

/// Datasets
pub mod datasets;

/// Utilities
pub mod utils;

/// Backend selection
pub mod backend;

/// Errors
pub mod error;

pub use error::{Error, Result};

/// Error macros
#[macro_use]
extern crate anyhow;
