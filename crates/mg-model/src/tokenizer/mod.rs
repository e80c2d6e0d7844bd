pub mod chars;
pub mod vocab;

pub use chars::{CharTokenizer, TokenPair};
pub use vocab::{Symbol, Token, Vocabulary, BOUNDARY_ID, BOUNDARY_SYMBOL, CONSONANTS, VOCAB_SIZE, VOWELS};
