//! ATS Heuristic Scorer — estimates how well a résumé's structure survives
//! automated applicant-tracking parsers.
//!
//! Scoring is deduction-based over four page-level structural signals. All
//! thresholds live in `AtsPolicy` so the policy stays auditable and testable
//! in one place.

use serde::Serialize;

use crate::document::Page;

pub const HIGH_COMPATIBILITY_SUMMARY: &str = "High ATS compatibility";
pub const LOW_COMPATIBILITY_SUMMARY: &str = "May have ATS issues";

/// Deduction table and detection thresholds for the heuristic.
#[derive(Debug, Clone)]
pub struct AtsPolicy {
    pub table_deduction: u32,
    pub image_deduction: u32,
    pub multi_column_deduction: u32,
    pub fancy_font_deduction: u32,
    /// More than this many flagged lines triggers the multi-column deduction.
    pub multi_column_line_threshold: u32,
    /// More than this many double-space runs flags a single line.
    pub double_space_run_threshold: usize,
    /// A font whose lowercased name contains none of these substrings is
    /// "fancy".
    pub font_whitelist: &'static [&'static str],
    /// Scores at or above this cutoff get the high-compatibility summary.
    pub high_compatibility_cutoff: u32,
}

impl Default for AtsPolicy {
    fn default() -> Self {
        Self {
            table_deduction: 20,
            image_deduction: 20,
            multi_column_deduction: 20,
            fancy_font_deduction: 10,
            multi_column_line_threshold: 3,
            double_space_run_threshold: 3,
            font_whitelist: &["arial", "times", "calibri", "helvetica"],
            high_compatibility_cutoff: 80,
        }
    }
}

/// Itemized structural issue counts, accumulated across pages in document
/// order. Serialized field names are part of the response contract.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AtsIssueReport {
    pub tables: u32,
    pub images: u32,
    pub multi_column_lines: u32,
    pub fancy_fonts: u32,
}

/// Final compatibility assessment: score in [0, 100], the issues that drove
/// it, and a categorical summary.
#[derive(Debug, Clone, Serialize)]
pub struct AtsAssessment {
    pub score: u32,
    pub issues: AtsIssueReport,
    pub summary: String,
}

/// Accumulates the issue report over the page sequence.
pub fn collect_issues(pages: &[Page], policy: &AtsPolicy) -> AtsIssueReport {
    let mut issues = AtsIssueReport::default();

    for page in pages {
        // Page-level boolean: a page with tables counts once, however many.
        if page.table_count > 0 {
            issues.tables += 1;
        }
        issues.images += page.images.len() as u32;

        for line in page.text.lines() {
            if is_multi_column_line(line, policy) {
                issues.multi_column_lines += 1;
            }
        }

        // First offending character marks the page; at most one increment per
        // page regardless of how many distinct fonts offend.
        for c in &page.chars {
            if !is_whitelisted_font(&c.font_name, policy) {
                issues.fancy_fonts += 1;
                break;
            }
        }
    }

    issues
}

/// Scores the issue report against the deduction table and picks the summary.
pub fn assess(pages: &[Page], policy: &AtsPolicy) -> AtsAssessment {
    let issues = collect_issues(pages, policy);

    let mut deductions = 0;
    if issues.tables > 0 {
        deductions += policy.table_deduction;
    }
    if issues.images > 0 {
        deductions += policy.image_deduction;
    }
    if issues.multi_column_lines > policy.multi_column_line_threshold {
        deductions += policy.multi_column_deduction;
    }
    if issues.fancy_fonts > 0 {
        deductions += policy.fancy_font_deduction;
    }

    let score = 100u32.saturating_sub(deductions);
    let summary = if score >= policy.high_compatibility_cutoff {
        HIGH_COMPATIBILITY_SUMMARY
    } else {
        LOW_COMPATIBILITY_SUMMARY
    };

    AtsAssessment {
        score,
        issues,
        summary: summary.to_string(),
    }
}

/// A line reads as multi-column when it contains more than the threshold of
/// (non-overlapping) double-space runs, or any horizontal tab.
fn is_multi_column_line(line: &str, policy: &AtsPolicy) -> bool {
    line.matches("  ").count() > policy.double_space_run_threshold || line.contains('\t')
}

fn is_whitelisted_font(font_name: &str, policy: &AtsPolicy) -> bool {
    let lower = font_name.to_lowercase();
    policy.font_whitelist.iter().any(|w| lower.contains(w))
}
