use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::models::resume::{parse_year_month, ExperienceEntry};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    DuplicateEntry,
    DateOverlap,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningSeverity {
    Advisory,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionWarning {
    pub kind: WarningKind,
    pub section: String,
    pub description: String,
    pub severity: WarningSeverity,
}

/// Drops experience entries that repeat an earlier company + position pair
/// (case-insensitive) over touching year ranges, keeping the first. The same
/// role held in disjoint periods is a rehire and is kept. Roles at different
/// companies whose year ranges overlap are kept but reported.
pub fn dedup_experience(entries: Vec<ExperienceEntry>) -> (Vec<ExperienceEntry>, Vec<ExtractionWarning>) {
    let mut kept: Vec<ExperienceEntry> = Vec::with_capacity(entries.len());
    let mut warnings = Vec::new();

    for entry in entries {
        let duplicate = kept.iter().any(|k| {
            k.company.eq_ignore_ascii_case(&entry.company)
                && k.position.eq_ignore_ascii_case(&entry.position)
                && same_stint(k, &entry)
        });
        if duplicate {
            warnings.push(ExtractionWarning {
                kind: WarningKind::DuplicateEntry,
                section: "experience".to_string(),
                description: format!(
                    "Role '{}' at '{}' was described more than once; kept the first mention.",
                    entry.position, entry.company
                ),
                severity: WarningSeverity::Warning,
            });
            continue;
        }

        for existing in kept
            .iter()
            .filter(|k| !k.company.eq_ignore_ascii_case(&entry.company))
        {
            if ranges_overlap(existing, &entry) {
                warnings.push(ExtractionWarning {
                    kind: WarningKind::DateOverlap,
                    section: "experience".to_string(),
                    description: format!(
                        "Dates at '{}' overlap with '{}'. If these were simultaneous roles, this may be intentional.",
                        entry.company, existing.company
                    ),
                    severity: WarningSeverity::Advisory,
                });
            }
        }

        kept.push(entry);
    }

    (kept, warnings)
}

/// `(start year, end year)`; ongoing or undated ends are open.
fn year_span(entry: &ExperienceEntry) -> Option<(i32, i32)> {
    let start = parse_year_month(&entry.start_date)?.year();
    Some((start, open_end_year(entry)))
}

/// Year-level comparison: a role ending in 2017 and one starting in 2017 is a
/// hand-over, not an overlap.
fn ranges_overlap(a: &ExperienceEntry, b: &ExperienceEntry) -> bool {
    match (year_span(a), year_span(b)) {
        (Some((start_a, end_a)), Some((start_b, end_b))) => start_a < end_b && start_b < end_a,
        _ => false,
    }
}

/// Two mentions of one role describe the same stint when their year ranges
/// share at least one year. Missing start dates give no evidence of a
/// separate stint.
fn same_stint(a: &ExperienceEntry, b: &ExperienceEntry) -> bool {
    match (year_span(a), year_span(b)) {
        (Some((start_a, end_a)), Some((start_b, end_b))) => start_a <= end_b && start_b <= end_a,
        _ => true,
    }
}

fn open_end_year(entry: &ExperienceEntry) -> i32 {
    if entry.current {
        return i32::MAX;
    }
    parse_year_month(&entry.end_date)
        .map(|d| d.year())
        .unwrap_or(i32::MAX)
}
