use burn::{
    config::Config as _,
    data::{dataloader::DataLoaderBuilder, dataset::InMemDataset},
    module::AutodiffModule,
    optim::AdamConfig,
    tensor::{
        backend::{AutodiffBackend, Backend},
        ElementConversion,
    },
    train::{
        metric::{AccuracyMetric, LossMetric},
        LearnerBuilder,
    },
};
use derive_new::new;

use crate::{
    models::lstm::{self, Model},
    utils::renderer,
};

use super::{
    batcher::{Batcher, Train},
    item::EncodedItem,
    Config,
};

/// Loss and accuracy over a dataset
#[derive(Clone, Copy, Debug, PartialEq, new)]
pub struct Evaluation {
    /// Mean cross-entropy loss
    pub loss: f64,

    /// Share of correctly classified examples
    pub accuracy: f64,
}

/// A trained model and its final validation scores
pub struct Trained<B: AutodiffBackend> {
    /// The trained weights
    pub model: Model<B>,

    /// Validation loss and accuracy after the last epoch, dropout disabled
    pub validation: Evaluation,
}

/// Define train function
pub fn train<B: AutodiffBackend>(
    device: B::Device,               // Device on which to perform computation (e.g., CPU or CUDA device)
    dataset_train: Vec<EncodedItem>, // Training examples
    dataset_valid: Vec<EncodedItem>, // Validation examples
    model_config: &lstm::Config,     // Architecture of the classifier
    config: &Config,                 // Experiment configuration
    artifact_dir: &str,              // Directory for training logs and the experiment config
) -> anyhow::Result<Trained<B>> {
    if dataset_train.is_empty() || dataset_valid.is_empty() {
        return Err(anyhow!(
            "Training needs examples in both splits ({} train, {} valid)",
            dataset_train.len(),
            dataset_valid.len()
        ));
    }

    std::fs::create_dir_all(artifact_dir)?;
    config
        .save(format!("{artifact_dir}/config.json"))
        .map_err(|e| anyhow!("Unable to save experiment config: {}", e))?;

    let model = model_config.init::<B>(&device);

    // Initialize batchers for training and validation data
    let batcher_train = Batcher::<B>::new(config.max_length, device.clone());
    let batcher_valid = Batcher::<B::InnerBackend>::new(config.max_length, device.clone());

    let valid_items = dataset_valid.clone();

    // Without worker threads, batches are assembled on the training thread
    let dataloader_train = DataLoaderBuilder::new(batcher_train)
        .batch_size(config.batch_size)
        .shuffle(config.seed)
        .build(InMemDataset::new(dataset_train));

    let dataloader_valid = DataLoaderBuilder::new(batcher_valid.clone())
        .batch_size(config.batch_size)
        .build(InMemDataset::new(dataset_valid));

    let optimizer = AdamConfig::new().init();

    // No checkpointer: an interrupted run starts over
    let learner = LearnerBuilder::new(artifact_dir)
        .metric_train_numeric(AccuracyMetric::new())
        .metric_valid_numeric(AccuracyMetric::new())
        .metric_train_numeric(LossMetric::new())
        .metric_valid_numeric(LossMetric::new())
        .devices(vec![device])
        .num_epochs(config.num_epochs)
        .renderer(renderer::Simple::new())
        .summary()
        .build(model, optimizer, config.learning_rate);

    log::info!(
        "Training for {} epochs with batch size {}",
        config.num_epochs,
        config.batch_size
    );

    let model = learner.fit(dataloader_train, dataloader_valid);

    let validation = evaluate(&model.valid(), &batcher_valid, valid_items, config.batch_size);

    log::info!(
        "Validation loss: {:.4}, accuracy: {:.3}",
        validation.loss,
        validation.accuracy
    );

    Ok(Trained { model, validation })
}

/// Compute loss and accuracy over encoded examples, batch by batch
pub fn evaluate<B: Backend>(
    model: &Model<B>,
    batcher: &Batcher<B>,
    items: Vec<EncodedItem>,
    batch_size: usize,
) -> Evaluation {
    use burn::data::dataloader::batcher::Batcher as _;

    let total = items.len();
    if total == 0 {
        return Evaluation::new(f64::NAN, f64::NAN);
    }

    let mut loss_sum = 0.0;
    let mut correct = 0i64;

    for chunk in items.chunks(batch_size.max(1)) {
        let n = chunk.len();
        let batch: Train<B> = batcher.batch(chunk.to_vec());
        let output = model.forward(batch);

        let batch_loss: f64 = output.loss.into_scalar().elem();
        loss_sum += batch_loss * n as f64;

        let predictions = output.output.argmax(1).reshape([n]);
        let batch_correct: i64 = predictions
            .equal(output.targets)
            .int()
            .sum()
            .into_scalar()
            .elem();
        correct += batch_correct;
    }

    Evaluation::new(loss_sum / total as f64, correct as f64 / total as f64)
}
