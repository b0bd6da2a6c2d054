use std::path::Path;

use burn::{
    module::Module,
    record::Recorder,
    tensor::backend::Backend,
};

use crate::{
    error::{Error, Result},
    models::lstm::Model,
    utils::files::fingerprint,
};

use super::{
    batcher::Batcher,
    export::{metadata_path, model_path, Metadata, ModelRecorder, MODEL_STEM},
};

/// Texts classified after every training run
pub static PROBE_TEXTS: &[&str] = &["mjölk", "fryst lax", "fullkornsbröd", "äpple", "tvättmedel"];

/// A single classification result
#[derive(Clone, Debug, PartialEq)]
pub struct Prediction {
    /// The predicted category label
    pub category: String,

    /// Class index of the predicted category
    pub class_index: usize,

    /// Probability assigned to the predicted category
    pub confidence: f32,
}

/// Runs an exported model using nothing but the artifact pair on disk
pub struct Classifier<B: Backend> {
    metadata: Metadata,
    model: Model<B>,
    batcher: Batcher<B>,
}

impl<B: Backend> Classifier<B> {
    /// Load the sidecar and the model artifact from an export directory, refusing a pair
    /// whose fingerprints disagree
    pub fn load(dir: &Path, device: &B::Device) -> Result<Self> {
        let metadata = Metadata::load(&metadata_path(dir))?;

        let actual = fingerprint(&model_path(dir))?;
        if actual != metadata.fingerprint {
            return Err(Error::FingerprintMismatch {
                expected: metadata.fingerprint.clone(),
                actual,
            });
        }

        log::debug!("Loading weights from {}", model_path(dir).display());

        let record = ModelRecorder::new()
            .load(dir.join(MODEL_STEM), device)
            .map_err(|e| Error::Record(e.to_string()))?;

        let model = metadata.model.init::<B>(device).load_record(record);
        let batcher = Batcher::new(metadata.max_length, device.clone());

        Ok(Self {
            metadata,
            model,
            batcher,
        })
    }

    /// The sidecar this classifier was loaded from
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// The exact sequence fed to the model for a text
    pub fn encode(&self, text: &str) -> Vec<usize> {
        self.metadata.encoder().encode(text)
    }

    /// Class probabilities for each text: one row of `n_classes` values per text
    pub fn probabilities<S: AsRef<str>>(&self, texts: &[S]) -> Vec<Vec<f32>> {
        if texts.is_empty() {
            return Vec::new();
        }

        let sequences = texts.iter().map(|text| self.encode(text.as_ref())).collect();
        let output = self.model.infer(self.batcher.infer(sequences));

        let n_classes = self.metadata.labels.len();
        let values = output.into_data().convert::<f32>().value;

        values.chunks(n_classes).map(<[f32]>::to_vec).collect()
    }

    /// Classify one text
    pub fn categorize(&self, text: &str) -> Prediction {
        self.categorize_batch(&[text]).remove(0)
    }

    /// Classify several texts with a single forward pass
    pub fn categorize_batch<S: AsRef<str>>(&self, texts: &[S]) -> Vec<Prediction> {
        self.probabilities(texts)
            .into_iter()
            .map(|row| self.decode(&row))
            .collect()
    }

    /// Arg-max over a probability row, mapped back to its label
    fn decode(&self, row: &[f32]) -> Prediction {
        let (class_index, confidence) = row
            .iter()
            .copied()
            .enumerate()
            .fold((0, f32::NEG_INFINITY), |best, (i, p)| {
                if p > best.1 {
                    (i, p)
                } else {
                    best
                }
            });

        let category = self
            .metadata
            .labels
            .label(class_index)
            .unwrap_or_default()
            .to_string();

        Prediction {
            category,
            class_index,
            confidence,
        }
    }
}
