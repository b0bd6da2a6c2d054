/// Vocabulary construction and tokenization
pub mod vocabulary;

/// Fixed-length sequence encoding
pub mod encoder;

/// Label to class index mapping
pub mod labels;

/// Text Classification Items
pub mod item;

/// Stratified train/validation split
pub mod split;

/// Batcher
pub mod batcher;

/// Experiment configuration
pub mod config;

/// Training
pub mod training;

/// Quantized model and metadata export
pub mod export;

/// Inference from an exported artifact pair
pub mod inference;

/// End-to-end orchestration
pub mod pipeline;

pub use batcher::Batcher;
pub use config::Config;
pub use encoder::Encoder;
pub use export::{export, ExportReport, Metadata};
pub use inference::{Classifier, Prediction};
pub use item::{EncodedItem, Item};
pub use labels::LabelSpace;
pub use pipeline::{prepare, run, Outcome, Prepared};
pub use split::stratified_split;
pub use training::{train, Evaluation, Trained};
pub use vocabulary::Vocabulary;
