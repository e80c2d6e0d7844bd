//! Hand-authored next-token scores that imitate a name model.
//!
//! There are no learned weights here. Every score starts at
//! [`BASELINE_SCORE`] and each rule in [`NAME_RULES`] whose condition holds
//! adds `delta + U(0, jitter)` to its targets. Rules only ever add, so a
//! later rule can strengthen or weaken an earlier one but never erase it.

use rand::Rng;

use crate::tokenizer::{Vocabulary, CONSONANTS, VOWELS};

/// Score every id starts from before any rule applies.
pub const BASELINE_SCORE: f64 = -5.0;

/// What a rule needs to see in the context before it fires.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Condition {
    /// Nothing has been generated yet (position 0).
    Start,
    /// The previous symbol is one of `aeiou`.
    AfterVowel,
    /// The previous symbol is a consonant.
    AfterConsonant,
    /// The previous symbol is one of the given letters.
    AfterAnyOf(&'static str),
    /// At least this many symbols have been generated.
    MinLength(usize),
    /// The context ends with this suffix.
    EndsWith(&'static str),
    /// Every listed condition holds.
    All(&'static [Condition]),
}

/// Which ids a rule adds to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Target {
    Letters(&'static str),
    Boundary,
}

/// How much a rule adds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Delta {
    /// A fixed amount.
    Fixed(f64),
    /// A fixed amount plus `per_symbol` for every symbol in the context.
    PerSymbol { base: f64, per_symbol: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rule {
    pub name: &'static str,
    pub when: Condition,
    pub target: Target,
    pub delta: Delta,
    /// Upper bound of the uniform noise added on top of `delta`.
    pub jitter: f64,
}

const COMMON_STARTERS: &str = "aejkmlsrc";
const OCCASIONAL_STARTERS: &str = "bdfghintpvw";
const POST_VOWEL_CONSONANTS: &str = "nrtlsm";
const CLUSTER_HEADS: &str = "str";
const CLUSTER_TAILS: &str = "tr";

/// Rules for name-like sequences, in evaluation order.
///
/// Common starters score 2.0..3.5 and occasional starters 0.5..1.5, so
/// jitter never lets an occasional starter outrank a common one.
pub const NAME_RULES: &[Rule] = &[
    Rule {
        name: "common-starter",
        when: Condition::Start,
        target: Target::Letters(COMMON_STARTERS),
        delta: Delta::Fixed(7.0),
        jitter: 1.5,
    },
    Rule {
        name: "occasional-starter",
        when: Condition::Start,
        target: Target::Letters(OCCASIONAL_STARTERS),
        delta: Delta::Fixed(5.5),
        jitter: 1.0,
    },
    Rule {
        name: "consonant-after-vowel",
        when: Condition::AfterVowel,
        target: Target::Letters(CONSONANTS),
        delta: Delta::Fixed(6.0),
        jitter: 1.5,
    },
    Rule {
        name: "common-post-vowel-consonant",
        when: Condition::AfterVowel,
        target: Target::Letters(POST_VOWEL_CONSONANTS),
        delta: Delta::Fixed(1.5),
        jitter: 0.0,
    },
    Rule {
        name: "end-after-vowel",
        when: Condition::All(&[Condition::AfterVowel, Condition::MinLength(2)]),
        target: Target::Boundary,
        delta: Delta::Fixed(1.0),
        jitter: 1.0,
    },
    Rule {
        name: "vowel-after-consonant",
        when: Condition::AfterConsonant,
        target: Target::Letters(VOWELS),
        delta: Delta::Fixed(7.0),
        jitter: 1.5,
    },
    Rule {
        name: "common-vowel",
        when: Condition::AfterConsonant,
        target: Target::Letters("ae"),
        delta: Delta::Fixed(1.0),
        jitter: 0.0,
    },
    Rule {
        name: "consonant-cluster",
        when: Condition::All(&[Condition::AfterConsonant, Condition::AfterAnyOf(CLUSTER_HEADS)]),
        target: Target::Letters(CLUSTER_TAILS),
        delta: Delta::Fixed(0.5),
        jitter: 0.0,
    },
    Rule {
        name: "end-with-length",
        when: Condition::MinLength(2),
        target: Target::Boundary,
        delta: Delta::PerSymbol {
            base: 4.0,
            per_symbol: 0.5,
        },
        jitter: 0.0,
    },
    Rule {
        name: "end-medium-name",
        when: Condition::MinLength(4),
        target: Target::Boundary,
        delta: Delta::Fixed(1.5),
        jitter: 0.0,
    },
    Rule {
        name: "end-long-name",
        when: Condition::MinLength(7),
        target: Target::Boundary,
        delta: Delta::Fixed(3.0),
        jitter: 0.0,
    },
    Rule {
        name: "e-after-qu",
        when: Condition::EndsWith("qu"),
        target: Target::Letters("e"),
        delta: Delta::Fixed(2.0),
        jitter: 0.0,
    },
    Rule {
        name: "vowel-after-th",
        when: Condition::EndsWith("th"),
        target: Target::Letters("ae"),
        delta: Delta::Fixed(1.5),
        jitter: 0.0,
    },
];

impl Condition {
    fn holds(&self, context: &str, position: usize) -> bool {
        // Rules about the previous symbol never fire at position 0.
        let previous = if position == 0 { None } else { context.chars().last() };
        match *self {
            Condition::Start => position == 0,
            Condition::AfterVowel => previous.is_some_and(|c| VOWELS.contains(c)),
            Condition::AfterConsonant => previous.is_some_and(|c| CONSONANTS.contains(c)),
            Condition::AfterAnyOf(set) => previous.is_some_and(|c| set.contains(c)),
            Condition::MinLength(n) => context.chars().count() >= n,
            Condition::EndsWith(suffix) => context.ends_with(suffix),
            Condition::All(conditions) => conditions.iter().all(|c| c.holds(context, position)),
        }
    }
}

impl Delta {
    fn amount(&self, context_len: usize) -> f64 {
        match *self {
            Delta::Fixed(d) => d,
            Delta::PerSymbol { base, per_symbol } => base + per_symbol * context_len as f64,
        }
    }
}

/// Produces a score for every vocabulary id from the name generated so far.
#[derive(Debug, Clone, Copy)]
pub struct LogitHeuristic {
    rules: &'static [Rule],
}

impl LogitHeuristic {
    pub fn new() -> Self {
        Self { rules: NAME_RULES }
    }

    pub fn with_rules(rules: &'static [Rule]) -> Self {
        Self { rules }
    }

    /// Rules that fire for this context, in evaluation order.
    pub fn matching_rules<'a>(
        &'a self,
        context: &'a str,
        position: usize,
    ) -> impl Iterator<Item = &'static Rule> + 'a {
        self.rules
            .iter()
            .filter(move |rule| rule.when.holds(context, position))
    }

    /// Scores with jitter, one per vocabulary id.
    ///
    /// `context` is the name so far without the leading boundary.
    pub fn scores<R: Rng + ?Sized>(
        &self,
        vocab: &Vocabulary,
        context: &str,
        position: usize,
        rng: &mut R,
    ) -> Vec<f64> {
        self.evaluate(vocab, context, position, |jitter| {
            if jitter > 0.0 {
                rng.gen_range(0.0..jitter)
            } else {
                0.0
            }
        })
    }

    /// Scores with all jitter set to zero.
    pub fn base_scores(&self, vocab: &Vocabulary, context: &str, position: usize) -> Vec<f64> {
        self.evaluate(vocab, context, position, |_| 0.0)
    }

    fn evaluate(
        &self,
        vocab: &Vocabulary,
        context: &str,
        position: usize,
        mut noise: impl FnMut(f64) -> f64,
    ) -> Vec<f64> {
        let mut scores = vec![BASELINE_SCORE; vocab.size()];
        let context_len = context.chars().count();

        for rule in self.matching_rules(context, position) {
            let amount = rule.delta.amount(context_len);
            match rule.target {
                Target::Letters(letters) => {
                    for id in letters.chars().filter_map(|c| vocab.id_of_char(c).ok()) {
                        scores[id as usize] += amount + noise(rule.jitter);
                    }
                }
                Target::Boundary => {
                    scores[vocab.boundary_id() as usize] += amount + noise(rule.jitter);
                }
            }
        }

        scores
    }
}

impl Default for LogitHeuristic {
    fn default() -> Self {
        Self::new()
    }
}
