//! Keyword extraction and résumé/JD matching.
//!
//! Extraction runs the injected tagger over raw text and keeps the lowercased
//! lemma of every alphabetic, non-stop, content-bearing token. Matching is set
//! intersection/difference against the job-description keyword set.

pub mod tagger;

use std::collections::BTreeSet;

use serde::Serialize;

use crate::keywords::tagger::Tagger;

/// Normalized keyword set for one text. `BTreeSet` keeps iteration sorted,
/// which is what the response contract requires for matched/missing lists.
pub type KeywordSet = BTreeSet<String>;

/// Extracts the normalized keyword set from raw text.
/// Empty input yields an empty set.
pub fn extract_keywords(text: &str, tagger: &dyn Tagger) -> KeywordSet {
    tagger
        .tag_and_lemmatize(text)
        .into_iter()
        .filter(|t| t.is_alpha && !t.is_stop && t.pos.is_content_bearing())
        .map(|t| t.lemma)
        .collect()
}

/// Result of matching a résumé keyword set against a job description's.
#[derive(Debug, Clone, Serialize)]
pub struct MatchResult {
    pub match_percent: f64,
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
}

/// Computes matched (intersection) and missing (JD minus résumé) keywords,
/// both sorted ascending, plus the match percentage. An empty JD set scores 0
/// (denominator floored at 1).
pub fn match_keywords(resume: &KeywordSet, job_description: &KeywordSet) -> MatchResult {
    let matched: Vec<String> = job_description.intersection(resume).cloned().collect();
    let missing: Vec<String> = job_description.difference(resume).cloned().collect();
    let percent = (matched.len() as f64 / job_description.len().max(1) as f64) * 100.0;

    MatchResult {
        match_percent: round2(percent),
        matched_keywords: matched,
        missing_keywords: missing,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keywords::tagger::EnglishTagger;

    fn set(words: &[&str]) -> KeywordSet {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let tagger = EnglishTagger::new();
        let text = "Built scalable data pipelines in Rust and Python";
        let a = extract_keywords(text, &tagger);
        let b = extract_keywords(text, &tagger);
        assert_eq!(a, b);
    }

    #[test]
    fn test_extraction_drops_stop_words_and_numbers() {
        let tagger = EnglishTagger::new();
        let keywords = extract_keywords("the 5 engineers and their manager", &tagger);
        assert!(!keywords.iter().any(|k| k == "the" || k == "and" || k == "5"));
        assert!(keywords.iter().any(|k| k.starts_with("engin")));
    }

    #[test]
    fn test_empty_text_yields_empty_set() {
        let tagger = EnglishTagger::new();
        assert!(extract_keywords("", &tagger).is_empty());
    }

    #[test]
    fn test_matched_and_missing_partition_jd_set() {
        let resume = set(&["python", "develop", "leadership"]);
        let jd = set(&["python", "develop", "kubernetes", "kafka"]);
        let result = match_keywords(&resume, &jd);

        let matched: KeywordSet = result.matched_keywords.iter().cloned().collect();
        let missing: KeywordSet = result.missing_keywords.iter().cloned().collect();
        assert!(matched.is_disjoint(&missing));
        let union: KeywordSet = matched.union(&missing).cloned().collect();
        assert_eq!(union, jd);
    }

    #[test]
    fn test_match_lists_are_sorted() {
        let resume = set(&["zeta", "alpha", "mid"]);
        let jd = set(&["zeta", "alpha", "mid", "beta", "yotta"]);
        let result = match_keywords(&resume, &jd);
        let mut sorted = result.matched_keywords.clone();
        sorted.sort();
        assert_eq!(result.matched_keywords, sorted);
        let mut sorted = result.missing_keywords.clone();
        sorted.sort();
        assert_eq!(result.missing_keywords, sorted);
    }

    #[test]
    fn test_empty_jd_set_scores_zero() {
        let resume = set(&["python"]);
        let jd = set(&[]);
        let result = match_keywords(&resume, &jd);
        assert_eq!(result.match_percent, 0.0);
        assert!(result.matched_keywords.is_empty());
        assert!(result.missing_keywords.is_empty());
    }

    #[test]
    fn test_match_percent_bounded() {
        let resume = set(&["a", "b", "c"]);
        let jd = set(&["a", "b"]);
        let result = match_keywords(&resume, &jd);
        assert!(result.match_percent >= 0.0 && result.match_percent <= 100.0);
        assert_eq!(result.match_percent, 100.0);
    }

    #[test]
    fn test_match_percent_rounded_to_two_decimals() {
        let resume = set(&["a", "b"]);
        let jd = set(&["a", "b", "c"]);
        let result = match_keywords(&resume, &jd);
        // 2/3 → 66.67
        assert_eq!(result.match_percent, 66.67);
    }

    #[test]
    fn test_python_developer_scenario_scores_high() {
        let tagger = EnglishTagger::new();
        let jd = extract_keywords(
            "Looking for a Python developer with strong leadership skills",
            &tagger,
        );
        let resume = extract_keywords(
            "Experienced developer skilled in Python and team leadership",
            &tagger,
        );
        let result = match_keywords(&resume, &jd);

        assert!(result.matched_keywords.iter().any(|k| k == "python"));
        assert!(result.matched_keywords.iter().any(|k| k == "develop"));
        assert!(result.matched_keywords.iter().any(|k| k == "leadership"));
        assert!(
            result.match_percent > 60.0,
            "match_percent was {}",
            result.match_percent
        );
    }
}
