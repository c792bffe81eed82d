//! Analysis Orchestrator — sequences the structural reader's output through
//! the ATS scorer, keyword matcher, and readability battery, and assembles
//! the response payload.

pub mod handlers;

use serde::Serialize;

use crate::ats::{self, AtsIssueReport, AtsPolicy};
use crate::document::Page;
use crate::keywords::{self, tagger::Tagger};
use crate::readability::{analyze_readability, ReadabilityReport};

/// ATS section of the response payload.
#[derive(Debug, Clone, Serialize)]
pub struct AtsCheck {
    /// Percentage-formatted score, e.g. "85%".
    pub ats_friendly_score: String,
    pub issues_found: AtsIssueReport,
    pub summary: String,
}

/// Top-level analysis payload. Field names are the response contract;
/// assembled once per request and never mutated afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    pub match_percent: f64,
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub readability: ReadabilityReport,
    pub ats_check: AtsCheck,
}

/// Runs the full pipeline over an extracted page sequence and the
/// job-description text. Every stage past document opening degrades
/// gracefully, so this function always produces a complete result.
pub fn run_analysis(pages: &[Page], job_description: &str, tagger: &dyn Tagger) -> AnalysisResult {
    let resume_text = pages
        .iter()
        .map(|p| p.text.as_str())
        .collect::<String>()
        .trim()
        .to_string();

    let assessment = ats::assess(pages, &AtsPolicy::default());

    let resume_keywords = keywords::extract_keywords(&resume_text, tagger);
    let jd_keywords = keywords::extract_keywords(job_description, tagger);
    let matches = keywords::match_keywords(&resume_keywords, &jd_keywords);

    let readability = analyze_readability(&resume_text);

    AnalysisResult {
        match_percent: matches.match_percent,
        matched_keywords: matches.matched_keywords,
        missing_keywords: matches.missing_keywords,
        readability,
        ats_check: AtsCheck {
            ats_friendly_score: format!("{}%", assessment.score),
            issues_found: assessment.issues,
            summary: assessment.summary,
        },
    }
}
