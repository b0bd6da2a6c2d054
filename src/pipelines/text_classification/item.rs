use derive_new::new;
use serde::{Deserialize, Serialize};

/// A raw training example
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct Item {
    /// The free-text item description
    pub text: String,

    /// The category label of the text
    pub category: String,
}

/// A training example after encoding
#[derive(Clone, Debug, PartialEq, Eq, new)]
pub struct EncodedItem {
    /// Fixed-length token indices
    pub sequence: Vec<usize>,

    /// Class index of the category
    pub class_id: usize,
}
