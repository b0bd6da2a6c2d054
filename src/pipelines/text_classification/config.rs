use burn::LearningRate;

use crate::models::lstm;

use super::{
    encoder::DEFAULT_MAX_LENGTH, split::DEFAULT_VALIDATION_FRACTION,
    vocabulary::DEFAULT_MAX_VOCAB_SIZE,
};

/// Define configuration struct for the experiment
#[derive(burn::config::Config, Debug)]
pub struct Config {
    /// Path to the training corpus
    #[config(default = "\"grocery_training_data.json\".to_string()")]
    pub corpus: String,

    /// Directory receiving the exported artifact pair
    #[config(default = "\".\".to_string()")]
    pub output_dir: String,

    /// Upper bound on the vocabulary size, reserved tokens included
    #[config(default = "DEFAULT_MAX_VOCAB_SIZE")]
    pub max_vocab_size: usize,

    /// Fixed length of every encoded sequence
    #[config(default = "DEFAULT_MAX_LENGTH")]
    pub max_length: usize,

    /// Size of each token embedding
    #[config(default = 64)]
    pub embedding_dim: usize,

    /// Width of the LSTM hidden state
    #[config(default = 64)]
    pub hidden_size: usize,

    /// Width of the dense layer
    #[config(default = 32)]
    pub dense_size: usize,

    /// Dropout rate
    #[config(default = 0.5)]
    pub dropout: f64,

    /// Number of epochs
    #[config(default = 20)]
    pub num_epochs: usize,

    /// Batch size
    #[config(default = 32)]
    pub batch_size: usize,

    /// Adam learning rate
    #[config(default = 1e-3)]
    pub learning_rate: LearningRate,

    /// Share of each class held out for validation
    #[config(default = "DEFAULT_VALIDATION_FRACTION")]
    pub validation_fraction: f64,

    /// Seed for the split and the data loader shuffle
    #[config(default = 42)]
    pub seed: u64,
}

impl Config {
    /// Reject settings that cannot produce a valid vocabulary, sequence, or batch
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.max_vocab_size < 2 {
            return Err(anyhow!(
                "max_vocab_size must leave room for the two reserved tokens, got {}",
                self.max_vocab_size
            ));
        }

        if self.max_length == 0 {
            return Err(anyhow!("max_length must be at least 1"));
        }

        if self.batch_size == 0 || self.num_epochs == 0 {
            return Err(anyhow!("batch_size and num_epochs must be at least 1"));
        }

        Ok(())
    }

    /// The classifier architecture for a given vocabulary and label count
    pub fn model_config(&self, vocab_size: usize, n_classes: usize) -> lstm::Config {
        lstm::Config::new(vocab_size, n_classes)
            .with_embedding_dim(self.embedding_dim)
            .with_hidden_size(self.hidden_size)
            .with_dense_size(self.dense_size)
            .with_dropout(self.dropout)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::new();

        assert_eq!(config.max_vocab_size, 5000);
        assert_eq!(config.max_length, 20);
        assert_eq!(config.embedding_dim, 64);
        assert_eq!(config.num_epochs, 20);
        assert_eq!(config.batch_size, 32);
        assert_eq!(config.validation_fraction, 0.2);
        assert_eq!(config.seed, 42);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate() {
        assert!(Config::new().with_max_vocab_size(1).validate().is_err());
        assert!(Config::new().with_max_length(0).validate().is_err());
        assert!(Config::new().with_batch_size(0).validate().is_err());
    }

    #[test]
    fn test_model_config() {
        let model = Config::new().with_hidden_size(16).model_config(100, 4);

        assert_eq!(model.vocab_size, 100);
        assert_eq!(model.n_classes, 4);
        assert_eq!(model.hidden_size, 16);
        assert_eq!(model.dense_size, 32);
    }
}
