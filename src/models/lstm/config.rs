use burn::{
    nn::{DropoutConfig, EmbeddingConfig, LinearConfig, LstmConfig},
    tensor::backend::Backend,
};

use super::Model;

/// The classifier architecture. Persisted in the metadata sidecar so an inference process
/// can rebuild the module before loading the exported record.
#[derive(burn::config::Config, Debug, PartialEq)]
pub struct Config {
    /// Size of the vocabulary, reserved tokens included
    pub vocab_size: usize,

    /// Number of output classes
    pub n_classes: usize,

    /// Size of each token embedding
    #[config(default = 64)]
    pub embedding_dim: usize,

    /// Width of the LSTM hidden state
    #[config(default = 64)]
    pub hidden_size: usize,

    /// Width of the dense layer between the LSTM and the output
    #[config(default = 32)]
    pub dense_size: usize,

    /// Dropout on the LSTM input and after the dense layer
    #[config(default = 0.5)]
    pub dropout: f64,
}

impl Config {
    /// Initialize the model
    pub fn init<B: Backend>(&self, device: &B::Device) -> Model<B> {
        Model {
            embedding: EmbeddingConfig::new(self.vocab_size, self.embedding_dim).init(device),
            lstm_dropout: DropoutConfig::new(self.dropout).init(),
            lstm: LstmConfig::new(self.embedding_dim, self.hidden_size, true).init(device),
            dense: LinearConfig::new(self.hidden_size, self.dense_size).init(device),
            dropout: DropoutConfig::new(self.dropout).init(),
            output: LinearConfig::new(self.dense_size, self.n_classes).init(device),
            n_classes: self.n_classes,
        }
    }
}
