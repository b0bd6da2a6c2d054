use burn::{
    data::dataloader,
    tensor::{backend::Backend, Int, Tensor},
};
use derive_new::new;

use crate::utils::tensors::{class_ids_to_tensor, sequences_to_tensor};

use super::item::EncodedItem;

/// An inference batch for text classification
#[derive(Debug, Clone, new)]
pub struct Infer<B: Backend> {
    /// Encoded text as 2D tensor: [batch_size, max_length]
    pub tokens: Tensor<B, 2, Int>,
}

/// A training batch for text classification
#[derive(Clone, Debug, new)]
pub struct Train<B: Backend> {
    /// Model input
    pub input: Infer<B>,

    /// Class ids for the batch
    pub targets: Tensor<B, 1, Int>,
}

/// Struct for batching encoded examples
#[derive(Clone, new)]
pub struct Batcher<B: Backend> {
    /// Length of every encoded sequence
    max_length: usize,

    /// Device on which to perform computation (e.g., CPU or CUDA device)
    device: B::Device,
}

impl<B: Backend> Batcher<B> {
    /// Build an inference batch from already encoded sequences
    pub fn infer(&self, sequences: Vec<Vec<usize>>) -> Infer<B> {
        Infer::new(sequences_to_tensor(sequences, self.max_length, &self.device))
    }
}

/// Implement Batcher trait for Batcher struct for training
impl<B: Backend> dataloader::batcher::Batcher<EncodedItem, Train<B>> for Batcher<B> {
    /// Collects encoded examples into a training batch
    fn batch(&self, items: Vec<EncodedItem>) -> Train<B> {
        let (sequences, class_ids): (Vec<_>, Vec<_>) = items
            .into_iter()
            .map(|item| (item.sequence, item.class_id))
            .unzip();

        Train {
            input: self.infer(sequences),
            targets: class_ids_to_tensor(class_ids, &self.device),
        }
    }
}
