/// Embedding + LSTM sequence classifier
pub mod lstm;
