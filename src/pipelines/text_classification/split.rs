use std::collections::BTreeMap;

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use crate::error::{Error, Result};

use super::{item::EncodedItem, labels::LabelSpace};

/// The default share of examples held out for validation
pub const DEFAULT_VALIDATION_FRACTION: f64 = 0.2;

/// Split encoded examples into `(train, validation)` with per-class stratification.
///
/// Each class contributes `round(count * validation_fraction)` examples to validation,
/// clamped so both sides receive at least one. Every class therefore needs two or more
/// examples. The same seed always produces the same split.
pub fn stratified_split(
    items: Vec<EncodedItem>,
    labels: &LabelSpace,
    validation_fraction: f64,
    seed: u64,
) -> Result<(Vec<EncodedItem>, Vec<EncodedItem>)> {
    if !(validation_fraction > 0.0 && validation_fraction < 1.0) {
        return Err(Error::InvalidFraction(validation_fraction));
    }

    let total = items.len();

    let mut by_class: BTreeMap<usize, Vec<EncodedItem>> = BTreeMap::new();
    for item in items {
        by_class.entry(item.class_id).or_default().push(item);
    }

    if let Some((class_id, group)) = by_class.iter().find(|(_, group)| group.len() < 2) {
        let label = labels
            .label(*class_id)
            .map(str::to_string)
            .unwrap_or_else(|| class_id.to_string());

        return Err(Error::TooFewExamples {
            label,
            count: group.len(),
        });
    }

    let mut rng = StdRng::seed_from_u64(seed);

    let mut train = Vec::with_capacity(total);
    let mut valid = Vec::new();

    for (_, mut group) in by_class {
        let count = group.len();
        let n_valid = ((count as f64) * validation_fraction).round() as usize;
        let n_valid = n_valid.clamp(1, count - 1);

        group.shuffle(&mut rng);
        valid.extend(group.drain(..n_valid));
        train.extend(group);
    }

    // Interleave classes so batches are not grouped by category
    train.shuffle(&mut rng);
    valid.shuffle(&mut rng);

    log::debug!(
        "Dataset split: {} training, {} validation",
        train.len(),
        valid.len()
    );

    Ok((train, valid))
}
