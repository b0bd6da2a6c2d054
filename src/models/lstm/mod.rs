/// LSTM classifier configuration
pub mod config;

/// LSTM classifier module
pub mod model;

/// Training and validation steps
pub mod train;

pub use config::Config;
pub use model::{Model, ModelRecord};
