use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::utils::classes::invert_map;

/// A bijection between category labels and dense class indices `[0, len)`.
///
/// Indices follow the lexicographic order of the distinct labels.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct LabelSpace {
    id2label: Vec<String>,
    label2id: BTreeMap<String, usize>,
}

impl LabelSpace {
    /// Build the label space from every observed label, duplicates allowed
    pub fn fit<S: AsRef<str>>(labels: &[S]) -> Self {
        let distinct: BTreeSet<&str> = labels.iter().map(AsRef::as_ref).collect();

        Self::from(distinct.into_iter().map(str::to_string).collect::<Vec<_>>())
    }

    /// The class index of a label
    pub fn id(&self, label: &str) -> Option<usize> {
        self.label2id.get(label).copied()
    }

    /// The label of a class index
    pub fn label(&self, id: usize) -> Option<&str> {
        self.id2label.get(id).map(String::as_str)
    }

    /// Labels ordered by class index
    pub fn labels(&self) -> &[String] {
        &self.id2label
    }

    /// The number of classes
    pub fn len(&self) -> usize {
        self.id2label.len()
    }

    /// True when no labels were observed
    pub fn is_empty(&self) -> bool {
        self.id2label.is_empty()
    }
}

/// Rebuild from an ordered label list, such as the one persisted in the sidecar
impl From<Vec<String>> for LabelSpace {
    fn from(id2label: Vec<String>) -> Self {
        let label2id = invert_map(id2label.iter().cloned().enumerate());

        Self { id2label, label2id }
    }
}

impl From<LabelSpace> for Vec<String> {
    fn from(labels: LabelSpace) -> Self {
        labels.id2label
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_sorted_distinct_labels() {
        let labels = LabelSpace::fit(&["produce", "dairy", "produce", "bakery", "dairy"]);

        assert_eq!(labels.labels(), &["bakery", "dairy", "produce"]);
        assert_eq!(labels.id("bakery"), Some(0));
        assert_eq!(labels.id("produce"), Some(2));
        assert_eq!(labels.id("frozen"), None);
        assert_eq!(labels.label(3), None);
    }

    #[test]
    fn test_mutual_inverse() {
        let labels = LabelSpace::fit(&["meat_fish", "dairy", "frukt & grönt", "household"]);

        for (id, label) in labels.labels().iter().enumerate() {
            assert_eq!(labels.id(label), Some(id));
            assert_eq!(labels.label(id), Some(label.as_str()));
        }
    }

    #[test]
    fn test_round_trip_through_ordered_list() {
        let labels = LabelSpace::fit(&["snacks_candy", "beverages", "frozen"]);

        let persisted = serde_json::to_string(&labels).unwrap();
        assert_eq!(persisted, r#"["beverages","frozen","snacks_candy"]"#);

        let restored: LabelSpace = serde_json::from_str(&persisted).unwrap();
        assert_eq!(restored, labels);
    }
}
