use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The padding token, always at index 0
pub static PAD_TOKEN: &str = "<PAD>";

/// The out-of-vocabulary token, always at index 1
pub static UNK_TOKEN: &str = "<UNK>";

/// Index of the padding token
pub const PAD_TOKEN_ID: usize = 0;

/// Index of the out-of-vocabulary token
pub const UNK_TOKEN_ID: usize = 1;

/// The default cap on the vocabulary size, reserved tokens included
pub const DEFAULT_MAX_VOCAB_SIZE: usize = 5000;

/// Split text into lowercased, whitespace-delimited tokens
pub fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split_whitespace().map(str::to_lowercase)
}

/// A fixed mapping from tokens to contiguous indices `[0, len)`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vocabulary {
    token2id: BTreeMap<String, usize>,
}

impl Vocabulary {
    /// Build a vocabulary from a corpus of texts.
    ///
    /// Tokens are ranked by descending corpus frequency, ties broken by ascending token
    /// string, and the top `max_vocab_size - 2` receive indices from 2 upward. An empty
    /// corpus yields only the two reserved tokens.
    ///
    /// The reserved tokens always take two slots, so a cap below 2 is raised to 2.
    pub fn build<S: AsRef<str>>(texts: &[S], max_vocab_size: usize) -> Self {
        if max_vocab_size < 2 {
            log::warn!("Vocabulary cap {max_vocab_size} is below the 2 reserved tokens, using 2");
        }

        let mut counts: HashMap<String, usize> = HashMap::new();

        for text in texts {
            for token in tokenize(text.as_ref()) {
                *counts.entry(token).or_default() += 1;
            }
        }

        let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
        ranked.sort_by(|(a, a_count), (b, b_count)| b_count.cmp(a_count).then_with(|| a.cmp(b)));

        let mut token2id = BTreeMap::from([
            (PAD_TOKEN.to_string(), PAD_TOKEN_ID),
            (UNK_TOKEN.to_string(), UNK_TOKEN_ID),
        ]);

        let keep = max_vocab_size.saturating_sub(2);
        for (offset, (token, _)) in ranked.into_iter().take(keep).enumerate() {
            token2id.insert(token, offset + 2);
        }

        log::debug!("Built vocabulary with {} tokens", token2id.len());

        Self { token2id }
    }

    /// Wrap an existing mapping, checking the reserved and contiguous index layout
    pub fn from_map(token2id: BTreeMap<String, usize>) -> Result<Self> {
        let vocab = Self { token2id };
        vocab.validate()?;

        Ok(vocab)
    }

    /// Check that the reserved tokens hold their indices and indices cover `[0, len)`
    pub fn validate(&self) -> Result<()> {
        if self.token2id.get(PAD_TOKEN) != Some(&PAD_TOKEN_ID) {
            return Err(Error::InvalidVocabulary(format!(
                "{PAD_TOKEN} must map to {PAD_TOKEN_ID}"
            )));
        }

        if self.token2id.get(UNK_TOKEN) != Some(&UNK_TOKEN_ID) {
            return Err(Error::InvalidVocabulary(format!(
                "{UNK_TOKEN} must map to {UNK_TOKEN_ID}"
            )));
        }

        let mut seen = vec![false; self.len()];
        for (token, &id) in &self.token2id {
            match seen.get_mut(id) {
                Some(slot) if !*slot => *slot = true,
                Some(_) => {
                    return Err(Error::InvalidVocabulary(format!(
                        "index {id} is assigned more than once (at {token:?})"
                    )))
                }
                None => {
                    return Err(Error::InvalidVocabulary(format!(
                        "index {id} of {token:?} is outside [0, {})",
                        self.len()
                    )))
                }
            }
        }

        Ok(())
    }

    /// Look up a token, falling back to the unknown-token index
    pub fn id(&self, token: &str) -> usize {
        self.token2id.get(token).copied().unwrap_or(UNK_TOKEN_ID)
    }

    /// Look up a token without a fallback
    pub fn get(&self, token: &str) -> Option<usize> {
        self.token2id.get(token).copied()
    }

    /// The number of tokens, reserved tokens included
    pub fn len(&self) -> usize {
        self.token2id.len()
    }

    /// A vocabulary always holds the reserved tokens, so this is only true for a
    /// hand-built, invalid mapping
    pub fn is_empty(&self) -> bool {
        self.token2id.is_empty()
    }
}
