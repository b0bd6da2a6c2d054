use std::{
    collections::BTreeSet,
    fs,
    path::{Path, PathBuf},
};

use burn::{
    module::Module,
    record::{HalfPrecisionSettings, NamedMpkGzFileRecorder, Recorder},
    tensor::backend::Backend,
};
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    models::lstm::{self, Model},
    utils::files::{fingerprint, write_atomic},
};

use super::{encoder::Encoder, labels::LabelSpace, vocabulary::Vocabulary};

/// The sidecar format version written and accepted by this crate
pub static METADATA_VERSION: &str = "1.0";

/// Stem of the exported model file; the recorder appends its own extension
pub static MODEL_STEM: &str = "grocery_classifier";

/// Extension appended by [`ModelRecorder`]
pub static MODEL_EXTENSION: &str = "mpk.gz";

/// Named MessagePack, gzip-compressed, weights stored as `f16`
pub type ModelRecorder = NamedMpkGzFileRecorder<HalfPrecisionSettings>;

/// File name of the metadata sidecar
pub static METADATA_FILE: &str = "model_metadata.json";

/// Everything an inference process needs to reproduce preprocessing and decode predictions
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Token to index mapping
    pub vocab: Vocabulary,

    /// Category labels ordered by class index
    pub labels: LabelSpace,

    /// The category set declared by the corpus
    pub categories: Vec<String>,

    /// Fixed sequence length
    pub max_length: usize,

    /// Sidecar format version
    pub version: String,

    /// Architecture needed to rebuild the module before loading its record
    pub model: lstm::Config,

    /// SHA-256 of the model artifact this sidecar was written with
    pub fingerprint: String,
}

impl Metadata {
    /// Read and validate a sidecar. Fails fast on an unknown version or an inconsistent
    /// vocabulary, label list, or model shape.
    pub fn load(path: &Path) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_slice(&fs::read(path)?)?;

        // Check the version before the schema, which may differ in other versions
        match value.get("version").and_then(|v| v.as_str()) {
            Some(version) if version == METADATA_VERSION => {}
            Some(version) => return Err(Error::UnsupportedVersion(version.to_string())),
            None => return Err(Error::UnsupportedVersion(String::new())),
        }

        let metadata: Self = serde_json::from_value(value)?;
        metadata.validate()?;

        Ok(metadata)
    }

    /// Check the sidecar's internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.version != METADATA_VERSION {
            return Err(Error::UnsupportedVersion(self.version.clone()));
        }

        self.vocab.validate()?;

        if self.max_length == 0 {
            return Err(Error::ShapeMismatch("max_length must be at least 1".into()));
        }

        if self.labels.is_empty() {
            return Err(Error::ShapeMismatch("label list is empty".into()));
        }

        let distinct: BTreeSet<&String> = self.labels.labels().iter().collect();
        if distinct.len() != self.labels.len() {
            return Err(Error::ShapeMismatch("label list contains duplicates".into()));
        }

        if self.model.vocab_size != self.vocab.len() {
            return Err(Error::ShapeMismatch(format!(
                "model expects {} tokens, vocabulary has {}",
                self.model.vocab_size,
                self.vocab.len()
            )));
        }

        if self.model.n_classes != self.labels.len() {
            return Err(Error::ShapeMismatch(format!(
                "model expects {} classes, label list has {}",
                self.model.n_classes,
                self.labels.len()
            )));
        }

        Ok(())
    }

    /// The encoder described by this sidecar
    pub fn encoder(&self) -> Encoder<'_> {
        Encoder::new(&self.vocab, self.max_length)
    }
}

/// Locations and size of an exported artifact pair
#[derive(Clone, Debug)]
pub struct ExportReport {
    /// Path of the quantized model record
    pub model_path: PathBuf,

    /// Path of the metadata sidecar
    pub metadata_path: PathBuf,

    /// Size of the model record in bytes
    pub model_bytes: u64,
}

/// Path of the model artifact inside an export directory
pub fn model_path(dir: &Path) -> PathBuf {
    dir.join(MODEL_STEM).with_extension(MODEL_EXTENSION)
}

/// Path of the metadata sidecar inside an export directory
pub fn metadata_path(dir: &Path) -> PathBuf {
    dir.join(METADATA_FILE)
}

/// Write the quantized model and its sidecar into `dir`.
///
/// The record is written with half-precision weights into a gzip-compressed MessagePack
/// file, then fingerprinted; the sidecar carrying that fingerprint is written last through
/// a rename so it never describes a different artifact than the one next to it.
pub fn export<B: Backend>(
    model: Model<B>,
    vocab: &Vocabulary,
    labels: &LabelSpace,
    categories: &[String],
    max_length: usize,
    model_config: &lstm::Config,
    dir: &Path,
) -> Result<ExportReport> {
    fs::create_dir_all(dir)?;

    let model_path = model_path(dir);
    let metadata_path = metadata_path(dir);

    ModelRecorder::new()
        .record(model.into_record(), dir.join(MODEL_STEM))
        .map_err(|e| Error::Record(e.to_string()))?;

    let model_bytes = fs::metadata(&model_path)?.len();

    let metadata = Metadata {
        vocab: vocab.clone(),
        labels: labels.clone(),
        categories: categories.to_vec(),
        max_length,
        version: METADATA_VERSION.to_string(),
        model: model_config.clone(),
        fingerprint: fingerprint(&model_path)?,
    };
    metadata.validate()?;

    write_atomic(&metadata_path, &serde_json::to_vec_pretty(&metadata)?)?;

    log::info!(
        "Model saved to {} ({:.1} KB)",
        model_path.display(),
        model_bytes as f64 / 1024.0
    );
    log::info!("Metadata saved to {}", metadata_path.display());

    Ok(ExportReport {
        model_path,
        metadata_path,
        model_bytes,
    })
}

#[cfg(test)]
mod tests {
    use burn::backend::NdArray;
    use pretty_assertions::assert_eq;

    use super::*;

    fn fixture() -> (Vocabulary, LabelSpace, Vec<String>, lstm::Config) {
        let vocab = Vocabulary::build(&["milk", "apple", "cheese", "banana"], 10);
        let labels = LabelSpace::fit(&["dairy", "produce"]);
        let categories = vec!["dairy".to_string(), "produce".to_string()];
        let config = lstm::Config::new(vocab.len(), labels.len())
            .with_embedding_dim(4)
            .with_hidden_size(4)
            .with_dense_size(4);

        (vocab, labels, categories, config)
    }

    fn export_fixture(dir: &Path) -> ExportReport {
        let (vocab, labels, categories, config) = fixture();
        let model = config.init::<NdArray>(&Default::default());

        export(model, &vocab, &labels, &categories, 3, &config, dir).unwrap()
    }

    #[test]
    fn test_export_writes_coupled_pair() {
        let dir = tempfile::tempdir().unwrap();
        let report = export_fixture(dir.path());

        assert_eq!(report.model_path, dir.path().join("grocery_classifier.mpk.gz"));
        assert!(report.model_path.exists());
        assert_eq!(report.metadata_path, dir.path().join("model_metadata.json"));
        assert!(report.model_bytes > 0);

        let metadata = Metadata::load(&report.metadata_path).unwrap();
        let (vocab, labels, categories, config) = fixture();

        assert_eq!(metadata.vocab, vocab);
        assert_eq!(metadata.labels, labels);
        assert_eq!(metadata.categories, categories);
        assert_eq!(metadata.max_length, 3);
        assert_eq!(metadata.version, "1.0");
        assert_eq!(metadata.model, config);
        assert_eq!(metadata.fingerprint, fingerprint(&report.model_path).unwrap());
    }

    #[test]
    fn test_model_extension_matches_recorder() {
        use burn::record::FileRecorder;

        assert_eq!(
            <ModelRecorder as FileRecorder<NdArray>>::file_extension(),
            MODEL_EXTENSION
        );

        let dir = tempfile::tempdir().unwrap();
        let report = export_fixture(dir.path());

        let files: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();

        assert!(files.contains(&"grocery_classifier.mpk.gz".to_string()));
        assert_eq!(report.model_path, model_path(dir.path()));
    }

    #[test]
    fn test_sidecar_layout() {
        let dir = tempfile::tempdir().unwrap();
        let report = export_fixture(dir.path());

        let raw: serde_json::Value =
            serde_json::from_slice(&fs::read(report.metadata_path).unwrap()).unwrap();

        assert_eq!(raw["vocab"]["<PAD>"], 0);
        assert_eq!(raw["vocab"]["<UNK>"], 1);
        assert_eq!(raw["labels"], serde_json::json!(["dairy", "produce"]));
        assert_eq!(raw["max_length"], 3);
        assert_eq!(raw["version"], "1.0");
    }

    #[test]
    fn test_sidecar_alone_reproduces_encoding() {
        let dir = tempfile::tempdir().unwrap();
        let report = export_fixture(dir.path());
        let (vocab, ..) = fixture();

        let metadata = Metadata::load(&report.metadata_path).unwrap();
        let training_side = Encoder::new(&vocab, 3);

        for text in ["milk", "Cheese and banana", "🍌 mjölk", "apple apple apple apple"] {
            assert_eq!(metadata.encoder().encode(text), training_side.encode(text));
        }
    }

    #[test]
    fn test_rejects_unknown_version() {
        let dir = tempfile::tempdir().unwrap();
        let report = export_fixture(dir.path());

        let mut raw: serde_json::Value =
            serde_json::from_slice(&fs::read(&report.metadata_path).unwrap()).unwrap();
        raw["version"] = serde_json::json!("2.0");
        fs::write(&report.metadata_path, raw.to_string()).unwrap();

        assert!(matches!(
            Metadata::load(&report.metadata_path),
            Err(Error::UnsupportedVersion(v)) if v == "2.0"
        ));
    }

    #[test]
    fn test_rejects_duplicate_labels() {
        let dir = tempfile::tempdir().unwrap();
        let report = export_fixture(dir.path());

        let mut raw: serde_json::Value =
            serde_json::from_slice(&fs::read(&report.metadata_path).unwrap()).unwrap();
        raw["labels"] = serde_json::json!(["dairy", "dairy"]);
        fs::write(&report.metadata_path, raw.to_string()).unwrap();

        assert!(matches!(
            Metadata::load(&report.metadata_path),
            Err(Error::ShapeMismatch(msg)) if msg.contains("duplicates")
        ));
    }

    #[test]
    fn test_rejects_shape_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let report = export_fixture(dir.path());

        let mut raw: serde_json::Value =
            serde_json::from_slice(&fs::read(&report.metadata_path).unwrap()).unwrap();
        raw["labels"] = serde_json::json!(["dairy", "frozen", "produce"]);
        fs::write(&report.metadata_path, raw.to_string()).unwrap();

        assert!(matches!(
            Metadata::load(&report.metadata_path),
            Err(Error::ShapeMismatch(_))
        ));
    }
}
