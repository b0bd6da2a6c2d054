use std::path::Path;

use burn::{module::AutodiffModule, tensor::backend::AutodiffBackend};

use crate::{
    datasets::Corpus,
    error::{Error, Result},
};

use super::{
    export::{export, ExportReport},
    split::stratified_split,
    training::{train, Evaluation},
    Config, EncodedItem, Encoder, LabelSpace, Vocabulary,
};

/// Everything derived from the corpus before training
#[derive(Clone, Debug)]
pub struct Prepared {
    /// Vocabulary built from every item text
    pub vocab: Vocabulary,

    /// Label space built from every item category
    pub labels: LabelSpace,

    /// The declared category set
    pub categories: Vec<String>,

    /// Encoded examples in corpus order
    pub items: Vec<EncodedItem>,
}

/// The result of a full pipeline run
#[derive(Clone, Debug)]
pub struct Outcome {
    /// Final validation loss and accuracy
    pub validation: Evaluation,

    /// The exported artifact pair
    pub report: ExportReport,
}

/// Build the vocabulary and label space, then encode every example
pub fn prepare(corpus: &Corpus, config: &Config) -> Result<Prepared> {
    let vocab = Vocabulary::build(&corpus.texts(), config.max_vocab_size);
    log::info!("Vocabulary size: {}", vocab.len());

    let labels = LabelSpace::fit(&corpus.labels());
    log::info!("Number of categories: {}", labels.len());

    let encoder = Encoder::new(&vocab, config.max_length);
    let items = corpus
        .items
        .iter()
        .map(|item| {
            let class_id = labels
                .id(&item.category)
                .ok_or_else(|| Error::UnknownCategory {
                    text: item.text.clone(),
                    category: item.category.clone(),
                })?;

            Ok(EncodedItem::new(encoder.encode(&item.text), class_id))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Prepared {
        vocab,
        labels,
        categories: corpus.categories.clone(),
        items,
    })
}

/// Prepare, split, train, evaluate, and export. Stages run strictly one after another.
pub fn run<B: AutodiffBackend>(
    corpus: &Corpus,
    config: &Config,
    device: B::Device,
) -> anyhow::Result<Outcome> {
    config.validate()?;
    corpus.validate()?;

    let prepared = prepare(corpus, config)?;

    let (train_items, valid_items) = stratified_split(
        prepared.items,
        &prepared.labels,
        config.validation_fraction,
        config.seed,
    )?;

    let model_config = config.model_config(prepared.vocab.len(), prepared.labels.len());
    let output_dir = Path::new(&config.output_dir);
    let artifact_dir = output_dir.join("training");

    let trained = train::<B>(
        device,
        train_items,
        valid_items,
        &model_config,
        config,
        &artifact_dir.to_string_lossy(),
    )?;

    log::info!("Exporting quantized model");

    let report = export(
        trained.model.valid(),
        &prepared.vocab,
        &prepared.labels,
        &prepared.categories,
        config.max_length,
        &model_config,
        output_dir,
    )?;

    Ok(Outcome {
        validation: trained.validation,
        report,
    })
}
