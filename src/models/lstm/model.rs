use burn::{
    module::Module,
    nn::{loss::CrossEntropyLossConfig, Dropout, Embedding, Linear, Lstm},
    tensor::{
        activation::{relu, softmax},
        backend::Backend,
        Int, Tensor,
    },
    train::ClassificationOutput,
};

use crate::pipelines::text_classification::batcher::{Infer, Train};

/// Embedding -> LSTM -> dense (ReLU) -> softmax classifier
#[derive(Module, Debug)]
pub struct Model<B: Backend> {
    /// Token embeddings
    pub embedding: Embedding<B>,

    /// Dropout applied to the LSTM input
    pub lstm_dropout: Dropout,

    /// Recurrent layer summarizing the sequence
    pub lstm: Lstm<B>,

    /// Hidden dense layer
    pub dense: Linear<B>,

    /// Dropout after the dense layer
    pub dropout: Dropout,

    /// Output projection to class logits
    pub output: Linear<B>,

    /// Total number of classes
    pub n_classes: usize,
}

/// Define model behavior
impl<B: Backend> Model<B> {
    /// Unnormalized class scores: [batch_size, n_classes]
    pub fn logits(&self, tokens: Tensor<B, 2, Int>) -> Tensor<B, 2> {
        let [batch_size, seq_length] = tokens.dims();

        let embedded = self.embedding.forward(tokens);
        let embedded = self.lstm_dropout.forward(embedded);

        let (_, hidden_states) = self.lstm.forward(embedded, None);
        let [_, _, d_hidden] = hidden_states.dims();

        // The hidden state at the final time step summarizes the sequence
        let summary = hidden_states
            .slice([0..batch_size, seq_length - 1..seq_length, 0..d_hidden])
            .reshape([batch_size, d_hidden]);

        let hidden = relu(self.dense.forward(summary));
        let hidden = self.dropout.forward(hidden);

        self.output.forward(hidden)
    }

    /// Defines forward pass for training
    pub fn forward(&self, item: Train<B>) -> ClassificationOutput<B> {
        let output = self.logits(item.input.tokens);
        let targets = item.targets.to_device(&output.device());

        let loss = CrossEntropyLossConfig::new()
            .init(&output.device())
            .forward(output.clone(), targets.clone());

        ClassificationOutput {
            loss,
            output,
            targets,
        }
    }

    /// Defines forward pass for inference: class probabilities [batch_size, n_classes]
    pub fn infer(&self, input: Infer<B>) -> Tensor<B, 2> {
        softmax(self.logits(input.tokens), 1)
    }
}
