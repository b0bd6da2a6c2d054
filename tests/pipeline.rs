use std::fs;

use burn::backend::{ndarray::NdArrayDevice, Autodiff, NdArray};
use grocery_classifier::{
    datasets::Corpus,
    pipelines::text_classification::{self, Classifier, Config, Encoder, Item, LabelSpace},
};
use pretty_assertions::assert_eq;

fn corpus() -> Corpus {
    let items = [
        ("mjölk", "dairy"),
        ("lätt mjölk", "dairy"),
        ("ost", "dairy"),
        ("grädde", "dairy"),
        ("yoghurt naturell", "dairy"),
        ("smör", "dairy"),
        ("äpple", "fruits_vegetables"),
        ("banan", "fruits_vegetables"),
        ("gurka", "fruits_vegetables"),
        ("tomat", "fruits_vegetables"),
        ("röd lök", "fruits_vegetables"),
        ("potatis", "fruits_vegetables"),
        ("tvättmedel", "household"),
        ("diskmedel", "household"),
        ("toalettpapper", "household"),
        ("hushållspapper", "household"),
        ("soppåsar", "household"),
        ("tvål", "household"),
    ];

    Corpus {
        categories: vec![
            "dairy".into(),
            "fruits_vegetables".into(),
            "household".into(),
            "frozen".into(),
        ],
        items: items
            .into_iter()
            .map(|(text, category)| Item::new(text.into(), category.into()))
            .collect(),
    }
}

#[test]
fn test_train_export_and_reload() {
    let dir = tempfile::tempdir().unwrap();
    let device = NdArrayDevice::Cpu;

    let config = Config::new()
        .with_output_dir(dir.path().to_string_lossy().into_owned())
        .with_max_length(4)
        .with_embedding_dim(8)
        .with_hidden_size(8)
        .with_dense_size(8)
        .with_num_epochs(1)
        .with_batch_size(4);

    let corpus = corpus();
    let outcome =
        text_classification::run::<Autodiff<NdArray>>(&corpus, &config, device).unwrap();

    assert!(outcome.validation.loss.is_finite());
    assert!((0.0..=1.0).contains(&outcome.validation.accuracy));
    assert!(outcome.report.model_bytes > 0);
    assert!(outcome.report.model_path.exists());
    assert!(outcome.report.metadata_path.exists());

    // Only the exported pair is used from here on
    let classifier = Classifier::<NdArray>::load(dir.path(), &device).unwrap();
    let metadata = classifier.metadata();

    assert_eq!(metadata.version, "1.0");
    assert_eq!(metadata.max_length, 4);
    assert_eq!(metadata.categories, corpus.categories);
    assert_eq!(
        metadata.labels.labels(),
        &["dairy", "fruits_vegetables", "household"]
    );

    // The sidecar reproduces the training-time encoding exactly
    let prepared = text_classification::prepare(&corpus, &config).unwrap();
    let training_encoder = Encoder::new(&prepared.vocab, config.max_length);
    for item in &corpus.items {
        assert_eq!(classifier.encode(&item.text), training_encoder.encode(&item.text));
    }

    // Every predicted class index maps back to the same category through the label space
    let labels = LabelSpace::fit(&corpus.labels());
    for prediction in classifier.categorize_batch(&["mjölk", "fryst lax", "🧼 tvål", ""]) {
        assert_eq!(labels.id(&prediction.category), Some(prediction.class_index));
        assert!(prediction.confidence > 0.0 && prediction.confidence <= 1.0);
    }

    let sidecar = fs::read_to_string(&outcome.report.metadata_path).unwrap();
    assert!(sidecar.contains("mjölk"));
}

#[test]
fn test_singleton_class_fails_before_training() {
    let dir = tempfile::tempdir().unwrap();

    let mut corpus = corpus();
    corpus.items.push(Item::new("fryst lax".into(), "frozen".into()));

    let config = Config::new()
        .with_output_dir(dir.path().to_string_lossy().into_owned())
        .with_num_epochs(1);

    let err = text_classification::run::<Autodiff<NdArray>>(&corpus, &config, NdArrayDevice::Cpu)
        .err()
        .unwrap();

    assert!(err.to_string().contains("frozen"));
    assert!(!dir.path().join("model_metadata.json").exists());
}
