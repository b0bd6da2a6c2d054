use derive_new::new;

use super::vocabulary::{tokenize, Vocabulary, PAD_TOKEN_ID};

/// The default fixed sequence length
pub const DEFAULT_MAX_LENGTH: usize = 20;

/// Turns text into fixed-length index sequences.
///
/// Used unchanged for training data preparation and for inference from an exported
/// sidecar, so both sides see identical sequences for identical text.
#[derive(Clone, Debug, new)]
pub struct Encoder<'a> {
    /// Token to index mapping
    vocab: &'a Vocabulary,

    /// Length of every produced sequence
    max_length: usize,
}

impl Encoder<'_> {
    /// Encode one text. Unknown tokens map to the unknown-token index, short sequences are
    /// right-padded and long ones keep only their first `max_length` tokens.
    pub fn encode(&self, text: &str) -> Vec<usize> {
        let mut sequence: Vec<usize> = tokenize(text)
            .take(self.max_length)
            .map(|token| self.vocab.id(&token))
            .collect();

        sequence.resize(self.max_length, PAD_TOKEN_ID);

        sequence
    }

    /// The fixed output length
    pub fn max_length(&self) -> usize {
        self.max_length
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::pipelines::text_classification::vocabulary::UNK_TOKEN_ID;

    fn vocab() -> Vocabulary {
        Vocabulary::build(&["milk", "apple", "cheese", "banana"], 10)
    }

    #[test]
    fn test_pads_short_text() {
        let vocab = vocab();
        let encoder = Encoder::new(&vocab, 3);

        let milk = vocab.get("milk").unwrap();
        assert_eq!(encoder.encode("milk"), vec![milk, 0, 0]);
    }

    #[test]
    fn test_truncates_long_text_to_prefix() {
        let vocab = vocab();
        let encoder = Encoder::new(&vocab, 2);

        let expected = vec![vocab.get("apple").unwrap(), vocab.get("banana").unwrap()];
        assert_eq!(encoder.encode("apple banana cheese milk"), expected);
    }

    #[test]
    fn test_unknown_tokens() {
        let vocab = vocab();
        let encoder = Encoder::new(&vocab, 4);

        assert_eq!(
            encoder.encode("🥛 MILK okänd"),
            vec![UNK_TOKEN_ID, vocab.get("milk").unwrap(), UNK_TOKEN_ID, 0]
        );
    }

    #[test]
    fn test_fixed_length_for_any_input() {
        let vocab = vocab();
        let encoder = Encoder::new(&vocab, 5);

        for text in ["", "   ", "milk", "a b c d e", "a b c d e f g h i j k"] {
            assert_eq!(encoder.encode(text).len(), 5);
        }
    }

    #[test]
    fn test_idempotent() {
        let vocab = vocab();
        let encoder = Encoder::new(&vocab, DEFAULT_MAX_LENGTH);

        let text = "Fryst lax och ost";
        assert_eq!(encoder.encode(text), encoder.encode(text));
    }
}
