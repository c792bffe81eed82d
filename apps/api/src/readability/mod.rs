//! Readability Aggregator — a fixed battery of standard readability formulas
//! computed over the extracted résumé text.
//!
//! Every metric is derived independently from the same `TextStats`, so the
//! battery degrades uniformly: degenerate input (no words or no sentences)
//! yields each formula's edge value instead of a panic or division by zero.

use serde::Serialize;

/// Words-per-minute figure used for the reading-time estimate.
const READING_WPM: f64 = 200.0;

/// A word is "difficult" when it has at least this many syllables
/// (the standard polysyllable proxy, also used by SMOG).
const DIFFICULT_SYLLABLE_THRESHOLD: usize = 3;

/// The fixed readability metrics report. Field names are part of the
/// response contract.
#[derive(Debug, Clone, Serialize)]
pub struct ReadabilityReport {
    pub flesch_reading_ease: f64,
    pub flesch_kincaid_grade: f64,
    pub smog_index: f64,
    pub coleman_liau_index: f64,
    pub automated_readability_index: f64,
    pub dale_chall_score: f64,
    pub difficult_words: usize,
    pub reading_time_minutes: f64,
    pub summary: String,
}

/// Computes the full readability battery for one text.
pub fn analyze_readability(text: &str) -> ReadabilityReport {
    let stats = TextStats::from_text(text);

    ReadabilityReport {
        flesch_reading_ease: round2(stats.flesch_reading_ease()),
        flesch_kincaid_grade: round2(stats.flesch_kincaid_grade()),
        smog_index: round2(stats.smog_index()),
        coleman_liau_index: round2(stats.coleman_liau_index()),
        automated_readability_index: round2(stats.automated_readability_index()),
        dale_chall_score: round2(stats.dale_chall_score()),
        difficult_words: stats.difficult_words,
        reading_time_minutes: round2(stats.words as f64 / READING_WPM),
        summary: stats.grade_level_summary(),
    }
}

/// Shared text statistics every formula draws from.
#[derive(Debug, Clone)]
struct TextStats {
    words: usize,
    sentences: usize,
    syllables: usize,
    letters: usize,
    characters: usize,
    difficult_words: usize,
}

impl TextStats {
    fn from_text(text: &str) -> Self {
        let sentences = text
            .split(['.', '!', '?'])
            .filter(|s| s.chars().any(|c| c.is_alphanumeric()))
            .count();

        let mut words = 0;
        let mut syllables = 0;
        let mut letters = 0;
        let mut characters = 0;
        let mut difficult_words = 0;

        for raw in text.split_whitespace() {
            let word: String = raw.chars().filter(|c| c.is_alphanumeric()).collect();
            if word.is_empty() {
                continue;
            }
            words += 1;
            letters += word.chars().filter(|c| c.is_alphabetic()).count();
            // ARI counts punctuation too, so take the raw token length.
            characters += raw.chars().count();
            let syl = count_syllables(&word);
            syllables += syl;
            if syl >= DIFFICULT_SYLLABLE_THRESHOLD {
                difficult_words += 1;
            }
        }

        Self {
            words,
            sentences,
            syllables,
            letters,
            characters,
            difficult_words,
        }
    }

    fn degenerate(&self) -> bool {
        self.words == 0 || self.sentences == 0
    }

    fn words_per_sentence(&self) -> f64 {
        self.words as f64 / self.sentences as f64
    }

    fn syllables_per_word(&self) -> f64 {
        self.syllables as f64 / self.words as f64
    }

    fn flesch_reading_ease(&self) -> f64 {
        if self.degenerate() {
            return 0.0;
        }
        206.835 - 1.015 * self.words_per_sentence() - 84.6 * self.syllables_per_word()
    }

    fn flesch_kincaid_grade(&self) -> f64 {
        if self.degenerate() {
            return 0.0;
        }
        0.39 * self.words_per_sentence() + 11.8 * self.syllables_per_word() - 15.59
    }

    /// SMOG is defined for texts of at least 3 sentences; below that it
    /// returns 0, matching the conventional edge value.
    fn smog_index(&self) -> f64 {
        if self.degenerate() || self.sentences < 3 {
            return 0.0;
        }
        let poly = self.difficult_words as f64;
        1.0430 * (poly * 30.0 / self.sentences as f64).sqrt() + 3.1291
    }

    fn coleman_liau_index(&self) -> f64 {
        if self.degenerate() {
            return 0.0;
        }
        let l = self.letters as f64 / self.words as f64 * 100.0;
        let s = self.sentences as f64 / self.words as f64 * 100.0;
        0.0588 * l - 0.296 * s - 15.8
    }

    fn automated_readability_index(&self) -> f64 {
        if self.degenerate() {
            return 0.0;
        }
        4.71 * (self.characters as f64 / self.words as f64) + 0.5 * self.words_per_sentence()
            - 21.43
    }

    fn dale_chall_score(&self) -> f64 {
        if self.degenerate() {
            return 0.0;
        }
        let pct_difficult = self.difficult_words as f64 / self.words as f64 * 100.0;
        let mut score = 0.1579 * pct_difficult + 0.0496 * self.words_per_sentence();
        if pct_difficult > 5.0 {
            score += 3.6365;
        }
        score
    }

    /// Consensus grade label across the grade-level formulas, in the style of
    /// textstat's `text_standard` ("8th and 9th grade").
    fn grade_level_summary(&self) -> String {
        if self.degenerate() {
            return "unknown".to_string();
        }
        let mut grades: Vec<i64> = [
            self.flesch_kincaid_grade(),
            self.coleman_liau_index(),
            self.automated_readability_index(),
        ]
        .iter()
        .map(|g| g.round().max(0.0) as i64)
        .collect();
        let smog = self.smog_index();
        if smog > 0.0 {
            grades.push(smog.round() as i64);
        }
        grades.sort_unstable();

        // Mode; ties resolved toward the lower grade.
        let mut best = grades[0];
        let mut best_count = 0;
        let mut i = 0;
        while i < grades.len() {
            let mut j = i;
            while j < grades.len() && grades[j] == grades[i] {
                j += 1;
            }
            if j - i > best_count {
                best_count = j - i;
                best = grades[i];
            }
            i = j;
        }

        format!("{} and {} grade", ordinal(best), ordinal(best + 1))
    }
}

/// Vowel-group syllable estimate with a silent-e adjustment; minimum 1.
fn count_syllables(word: &str) -> usize {
    let lower = word.to_lowercase();
    let mut count = 0;
    let mut prev_vowel = false;
    for c in lower.chars() {
        let vowel = matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
        if vowel && !prev_vowel {
            count += 1;
        }
        prev_vowel = vowel;
    }
    if lower.ends_with('e') && !lower.ends_with("le") && count > 1 {
        count -= 1;
    }
    count.max(1)
}

fn ordinal(n: i64) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
