//! Tagger — coarse part-of-speech annotation and lemma-style normalization.
//!
//! The tagger is process-wide shared state built once at startup and injected
//! as `Arc<dyn Tagger>` through `AppState`, so tests can swap in a scripted
//! implementation without touching the extraction pipeline.

use std::collections::HashSet;

use rust_stemmers::{Algorithm, Stemmer};

/// Coarse part-of-speech category of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pos {
    Noun,
    ProperNoun,
    Verb,
    Adjective,
    Adverb,
    Other,
}

impl Pos {
    /// Content-bearing categories retained by keyword extraction.
    pub fn is_content_bearing(self) -> bool {
        matches!(
            self,
            Pos::Noun | Pos::ProperNoun | Pos::Verb | Pos::Adjective
        )
    }
}

/// One annotated token from the tagger.
#[derive(Debug, Clone)]
pub struct Token {
    /// Lowercased normalized base form.
    pub lemma: String,
    pub pos: Pos,
    pub is_stop: bool,
    pub is_alpha: bool,
}

/// Tokenizes text and annotates each token with POS, lemma, and filter flags.
pub trait Tagger: Send + Sync {
    fn tag_and_lemmatize(&self, text: &str) -> Vec<Token>;
}

/// Default English tagger: Snowball stemming for lemmas, the standard English
/// stop list, and a suffix rule table for coarse POS classification.
pub struct EnglishTagger {
    stemmer: Stemmer,
    stop_words: HashSet<String>,
}

const VERB_SUFFIXES: &[&str] = &["ing", "ed", "ize", "ise", "ify"];
const ADJECTIVE_SUFFIXES: &[&str] = &[
    "ous", "ful", "ive", "able", "ible", "ic", "al", "ish", "less", "ant", "ent",
];

impl EnglishTagger {
    pub fn new() -> Self {
        let stop_words = stop_words::get(stop_words::LANGUAGE::English)
            .into_iter()
            .collect();
        Self {
            stemmer: Stemmer::create(Algorithm::English),
            stop_words,
        }
    }

    fn classify(surface: &str, lower: &str) -> Pos {
        let mut chars = surface.chars();
        let starts_upper = chars.next().is_some_and(|c| c.is_uppercase());
        let rest_lower = chars.all(|c| !c.is_uppercase());
        if starts_upper && rest_lower && surface.chars().count() > 1 {
            return Pos::ProperNoun;
        }
        if lower.len() > 4 && lower.ends_with("ly") {
            return Pos::Adverb;
        }
        if lower.len() > 4 && VERB_SUFFIXES.iter().any(|s| lower.ends_with(s)) {
            return Pos::Verb;
        }
        if lower.len() > 4 && ADJECTIVE_SUFFIXES.iter().any(|s| lower.ends_with(s)) {
            return Pos::Adjective;
        }
        Pos::Noun
    }
}

impl Default for EnglishTagger {
    fn default() -> Self {
        Self::new()
    }
}

impl Tagger for EnglishTagger {
    fn tag_and_lemmatize(&self, text: &str) -> Vec<Token> {
        text.split_whitespace()
            .filter_map(|raw| {
                let surface =
                    raw.trim_matches(|c: char| !c.is_alphanumeric());
                if surface.is_empty() {
                    return None;
                }
                let lower = surface.to_lowercase();
                let is_alpha = surface.chars().all(|c| c.is_alphabetic());
                let is_stop = self.stop_words.contains(&lower);
                let pos = Self::classify(surface, &lower);
                let lemma = self.stemmer.stem(&lower).into_owned();
                Some(Token {
                    lemma,
                    pos,
                    is_stop,
                    is_alpha,
                })
            })
            .collect()
    }
}
