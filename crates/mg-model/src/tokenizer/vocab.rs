use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Text form of the boundary symbol.
pub const BOUNDARY_SYMBOL: &str = "BOS";
/// Fixed id of the boundary symbol.
pub const BOUNDARY_ID: u32 = 26;
/// 26 lowercase letters plus the boundary.
pub const VOCAB_SIZE: usize = 27;

pub const VOWELS: &str = "aeiou";
pub const CONSONANTS: &str = "bcdfghjklmnpqrstvwxyz";

/// One entry of the vocabulary: a lowercase ASCII letter or the boundary
/// sentinel that marks both the start and the end of a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Symbol {
    Letter(char),
    Boundary,
}

impl Symbol {
    /// Parse the text form used by the presentation layer: `"a"`..`"z"` or `"BOS"`.
    pub fn parse(s: &str) -> Result<Symbol> {
        if s == BOUNDARY_SYMBOL {
            return Ok(Symbol::Boundary);
        }
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_lowercase() => Ok(Symbol::Letter(c)),
            _ => Err(ModelError::Lookup(s.to_string())),
        }
    }

    pub fn is_boundary(&self) -> bool {
        matches!(self, Symbol::Boundary)
    }

    /// The letter, or `None` for the boundary.
    pub fn as_char(&self) -> Option<char> {
        match self {
            Symbol::Letter(c) => Some(*c),
            Symbol::Boundary => None,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Letter(c) => f.pad(c.encode_utf8(&mut [0u8; 4])),
            Symbol::Boundary => f.pad(BOUNDARY_SYMBOL),
        }
    }
}

impl From<Symbol> for String {
    fn from(symbol: Symbol) -> String {
        symbol.to_string()
    }
}

impl TryFrom<String> for Symbol {
    type Error = ModelError;

    fn try_from(s: String) -> Result<Symbol> {
        Symbol::parse(&s)
    }
}

/// A symbol paired with its vocabulary id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    #[serde(rename = "char")]
    pub symbol: Symbol,
    pub id: u32,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.symbol, self.id)
    }
}

/// Character vocabulary: `a`..`z` map to ids 0..=25 and the boundary to 26.
///
/// Built once and shared read-only (typically behind an `Arc`) by everything
/// that needs to translate between symbols and ids.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    /// Symbols, indexed by token ID.
    symbols: Vec<Symbol>,
    /// Reverse mapping from symbol to token ID.
    symbol_to_id: HashMap<Symbol, u32>,
}

impl Vocabulary {
    pub fn new() -> Self {
        let mut symbols: Vec<Symbol> = ('a'..='z').map(Symbol::Letter).collect();
        symbols.push(Symbol::Boundary);

        let mut symbol_to_id = HashMap::with_capacity(symbols.len());
        for (id, symbol) in symbols.iter().enumerate() {
            symbol_to_id.insert(*symbol, id as u32);
        }

        Vocabulary {
            symbols,
            symbol_to_id,
        }
    }

    /// Number of entries; always 27.
    pub fn size(&self) -> usize {
        self.symbols.len()
    }

    pub fn boundary_id(&self) -> u32 {
        BOUNDARY_ID
    }

    pub fn boundary_token(&self) -> Token {
        Token {
            symbol: Symbol::Boundary,
            id: BOUNDARY_ID,
        }
    }

    /// Id of `symbol`, or [`ModelError::Lookup`] for anything other than a
    /// lowercase ASCII letter or the boundary.
    pub fn id_of(&self, symbol: Symbol) -> Result<u32> {
        self.symbol_to_id
            .get(&symbol)
            .copied()
            .ok_or_else(|| ModelError::Lookup(symbol.to_string()))
    }

    /// Id of a single letter.
    pub fn id_of_char(&self, c: char) -> Result<u32> {
        self.id_of(Symbol::Letter(c))
    }

    /// Id of a symbol given in text form (`"a"`..`"z"` or `"BOS"`).
    pub fn lookup(&self, s: &str) -> Result<u32> {
        self.id_of(Symbol::parse(s)?)
    }

    /// Symbol for `id`, or [`ModelError::Range`] if `id` is outside the vocabulary.
    pub fn symbol_of(&self, id: u32) -> Result<Symbol> {
        self.symbols
            .get(id as usize)
            .copied()
            .ok_or(ModelError::Range {
                id,
                size: self.symbols.len(),
            })
    }

    pub fn token(&self, id: u32) -> Result<Token> {
        Ok(Token {
            symbol: self.symbol_of(id)?,
            id,
        })
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::new()
    }
}
