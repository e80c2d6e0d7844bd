use std::sync::Arc;

use serde::Serialize;

use crate::error::Result;
use super::vocab::{Token, Vocabulary};

/// A (current, next) pair: the model sees `current` and learns to predict `next`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TokenPair {
    pub current: Token,
    pub next: Token,
}

/// Character-level tokenizer over the shared [`Vocabulary`].
pub struct CharTokenizer {
    pub vocab: Arc<Vocabulary>,
}

impl CharTokenizer {
    pub fn new(vocab: Arc<Vocabulary>) -> Self {
        Self { vocab }
    }

    /// Encode text into tokens.
    ///
    /// The text is lowercased and everything outside `a-z` is dropped, then
    /// the result is wrapped in boundary tokens. Empty input therefore
    /// encodes to two boundary tokens.
    pub fn encode(&self, text: &str) -> Vec<Token> {
        let mut tokens = vec![self.vocab.boundary_token()];

        for c in text.chars().flat_map(char::to_lowercase) {
            // Anything the vocabulary does not know is silently skipped.
            if let Ok(id) = self.vocab.id_of_char(c) {
                if let Ok(token) = self.vocab.token(id) {
                    tokens.push(token);
                }
            }
        }

        tokens.push(self.vocab.boundary_token());
        tokens
    }

    /// Decode tokens back into a string, dropping boundary tokens.
    pub fn decode(&self, tokens: &[Token]) -> String {
        tokens.iter().filter_map(|t| t.symbol.as_char()).collect()
    }

    /// Decode raw ids. Fails with a range error on an unknown id.
    pub fn decode_ids(&self, ids: &[u32]) -> Result<String> {
        let tokens = ids
            .iter()
            .map(|&id| self.vocab.token(id))
            .collect::<Result<Vec<_>>>()?;
        Ok(self.decode(&tokens))
    }

    /// Consecutive (current, next) pairs of a token sequence.
    pub fn pairs(&self, tokens: &[Token]) -> Vec<TokenPair> {
        tokens
            .windows(2)
            .map(|w| TokenPair {
                current: w[0],
                next: w[1],
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ModelError;

    fn tokenizer() -> CharTokenizer {
        CharTokenizer::new(Arc::new(Vocabulary::new()))
    }

    #[test]
    fn test_encode_wraps_with_boundary() {
        let t = tokenizer();
        let ids: Vec<u32> = t.encode("emma").iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![26, 4, 12, 12, 0, 26]);
    }

    #[test]
    fn test_encode_normalizes() {
        let t = tokenizer();
        let tokens = t.encode("Ann-Marie 2");
        assert_eq!(t.decode(&tokens), "annmarie");
    }

    #[test]
    fn test_encode_empty() {
        let t = tokenizer();
        let tokens = t.encode("");
        assert_eq!(tokens.len(), 2);
        assert!(tokens.iter().all(|t| t.symbol.is_boundary()));
    }

    #[test]
    fn test_decode_ids() {
        let t = tokenizer();
        assert_eq!(t.decode_ids(&[26, 10, 0, 12, 14, 13, 26]).unwrap(), "kamon");
        assert!(matches!(t.decode_ids(&[30]), Err(ModelError::Range { .. })));
    }

    #[test]
    fn test_pairs() {
        let t = tokenizer();
        let tokens = t.encode("ava");
        let pairs = t.pairs(&tokens);
        assert_eq!(pairs.len(), 4);
        assert_eq!(pairs[0].current.id, 26);
        assert_eq!(pairs[0].next.id, 0);
        assert_eq!(pairs[3].next.id, 26);
        assert!(t.pairs(&tokens[..1]).is_empty());
    }
}
