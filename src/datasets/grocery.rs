use std::path::Path;

use burn::data::dataset::InMemDataset;
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    pipelines::text_classification::Item,
};

/// The name of the grocery dataset
pub static DATASET: &str = "grocery";

/// The default corpus file name
pub static CORPUS_FILE: &str = "grocery_training_data.json";

/// A labelled grocery corpus: the declared categories and the examples using them
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Corpus {
    /// The declared category set
    pub categories: Vec<String>,

    /// Labelled item descriptions
    pub items: Vec<Item>,
}

impl Corpus {
    /// Read and validate a corpus file
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path.as_ref()).await?;

        let corpus: Self = serde_json::from_slice(&bytes)?;
        corpus.validate()?;

        log::info!(
            "Loaded {} {} examples in {} categories from {}",
            corpus.items.len(),
            DATASET,
            corpus.categories.len(),
            path.as_ref().display()
        );

        Ok(corpus)
    }

    /// Every item's category must be declared
    pub fn validate(&self) -> Result<()> {
        match self
            .items
            .iter()
            .find(|item| !self.categories.contains(&item.category))
        {
            Some(item) => Err(Error::UnknownCategory {
                text: item.text.clone(),
                category: item.category.clone(),
            }),
            None => Ok(()),
        }
    }

    /// Item texts in corpus order
    pub fn texts(&self) -> Vec<&str> {
        self.items.iter().map(|item| item.text.as_str()).collect()
    }

    /// Item categories in corpus order
    pub fn labels(&self) -> Vec<&str> {
        self.items.iter().map(|item| item.category.as_str()).collect()
    }
}

impl From<Corpus> for InMemDataset<Item> {
    fn from(corpus: Corpus) -> Self {
        InMemDataset::new(corpus.items)
    }
}
