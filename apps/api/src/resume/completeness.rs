use serde::{Deserialize, Serialize};

use crate::models::resume::{
    parse_year_month, ExperienceEntry, ResumeRecord, Section, SectionEntry, UNASSIGNED_NAME,
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum SectionStatus {
    Filled,
    Missing,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionHealth {
    pub section: Section,
    pub weight: f64,
    /// Entries holding user data; placeholders are not counted.
    pub entry_count: usize,
    pub status: SectionStatus,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonalInfoHealth {
    pub score: f64,
    pub missing_fields: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletenessReport {
    pub overall_score: f64,
    pub personal_info: PersonalInfoHealth,
    pub sections: Vec<SectionHealth>,
    pub filled_sections: Vec<Section>,
    pub missing_sections: Vec<Section>,
}

const SECTION_WEIGHTS: &[(Section, f64)] = &[
    (Section::Experience, 0.35),
    (Section::Education, 0.20),
    (Section::Skills, 0.15),
    (Section::Projects, 0.10),
    (Section::Certifications, 0.08),
    (Section::Languages, 0.07),
    (Section::Others, 0.05),
];

fn filled_count<T: SectionEntry>(entries: &[T]) -> usize {
    entries.iter().filter(|e| !e.is_placeholder()).count()
}

fn entry_count(record: &ResumeRecord, section: Section) -> usize {
    match section {
        Section::Experience => filled_count(&record.experience),
        Section::Education => filled_count(&record.education),
        Section::Skills => filled_count(&record.skills),
        Section::Certifications => filled_count(&record.certifications),
        Section::Projects => filled_count(&record.projects),
        Section::Languages => filled_count(&record.languages),
        Section::Others => filled_count(&record.others),
    }
}

/// A digit, percent sign or currency symbol anywhere in the description or achievements.
fn is_quantified(entry: &ExperienceEntry) -> bool {
    std::iter::once(&entry.description)
        .chain(entry.achievements.iter())
        .any(|text| {
            text.chars()
                .any(|c| c.is_ascii_digit() || matches!(c, '%' | '$' | '€' | '£' | '₹'))
        })
}

fn ends_before_start(start: &str, end: &str, current: bool) -> bool {
    if current {
        return false;
    }
    match (parse_year_month(start), parse_year_month(end)) {
        (Some(start), Some(end)) => end < start,
        _ => false,
    }
}

fn section_recommendations(record: &ResumeRecord, section: Section) -> Vec<String> {
    let mut recommendations = Vec::new();

    match section {
        Section::Experience => {
            let filled: Vec<_> = record.experience.iter().filter(|e| !e.is_placeholder()).collect();
            let unquantified = filled.iter().filter(|e| !is_quantified(e)).count();
            if unquantified > 0 {
                recommendations.push(format!(
                    "{unquantified} experience entries have no quantified outcome; add a number or an amount"
                ));
            }
            for entry in filled {
                if ends_before_start(&entry.start_date, &entry.end_date, entry.current) {
                    recommendations.push(format!(
                        "Experience at '{}' ends before it starts ({} → {})",
                        entry.company, entry.start_date, entry.end_date
                    ));
                }
            }
        }
        Section::Education => {
            for entry in record.education.iter().filter(|e| !e.is_placeholder()) {
                if ends_before_start(&entry.start_date, &entry.end_date, entry.current) {
                    recommendations.push(format!(
                        "Education at '{}' ends before it starts ({} → {})",
                        entry.institution, entry.start_date, entry.end_date
                    ));
                }
            }
        }
        _ => {}
    }

    recommendations
}

fn personal_info_health(record: &ResumeRecord) -> PersonalInfoHealth {
    let info = &record.personal_info;
    let fields = [
        ("firstName", &info.first_name),
        ("lastName", &info.last_name),
        ("email", &info.email),
        ("phone", &info.phone),
        ("title", &info.title),
        ("summary", &info.summary),
    ];

    let missing_fields: Vec<String> = fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty() || value.as_str() == UNASSIGNED_NAME)
        .map(|(name, _)| name.to_string())
        .collect();

    let score = (fields.len() - missing_fields.len()) as f64 / fields.len() as f64;
    PersonalInfoHealth {
        score,
        missing_fields,
    }
}

pub fn compute_completeness_report(record: &ResumeRecord) -> CompletenessReport {
    let mut sections = Vec::new();
    let mut filled_sections = Vec::new();
    let mut missing_sections = Vec::new();
    let mut weighted_score_sum = 0.0;

    for &(section, weight) in SECTION_WEIGHTS {
        let entry_count = entry_count(record, section);

        if entry_count == 0 {
            missing_sections.push(section);
            sections.push(SectionHealth {
                section,
                weight,
                entry_count,
                status: SectionStatus::Missing,
                recommendations: vec![format!("Add at least one {section} entry")],
            });
            continue;
        }

        weighted_score_sum += weight;
        filled_sections.push(section);
        sections.push(SectionHealth {
            section,
            weight,
            entry_count,
            status: SectionStatus::Filled,
            recommendations: section_recommendations(record, section),
        });
    }

    let total_weight: f64 = SECTION_WEIGHTS.iter().map(|(_, w)| w).sum();
    let overall_score = if total_weight > 0.0 {
        (weighted_score_sum / total_weight).clamp(0.0, 1.0)
    } else {
        0.0
    };

    CompletenessReport {
        overall_score,
        personal_info: personal_info_health(record),
        sections,
        filled_sections,
        missing_sections,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resume::extractor::extract;

    #[test]
    fn test_empty_record_scores_zero() {
        let report = compute_completeness_report(&ResumeRecord::empty());
        assert_eq!(report.overall_score, 0.0);
        assert_eq!(report.missing_sections.len(), 7);
        assert!(report.filled_sections.is_empty());
        assert_eq!(report.personal_info.score, 0.0);
        assert_eq!(report.personal_info.missing_fields.len(), 6);
    }

    #[test]
    fn test_unassigned_name_counts_as_missing() {
        let report = compute_completeness_report(&extract("I like trains."));
        assert!(report
            .personal_info
            .missing_fields
            .contains(&"firstName".to_string()));
    }

    #[test]
    fn test_weights_sum_to_one() {
        let total: f64 = SECTION_WEIGHTS.iter().map(|(_, w)| w).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_extracted_record_partial_score() {
        let record = extract(
            "My name is Jane Smith and I'm a Data Analyst. \
             I graduated from MIT with a Bachelor's in Statistics in 2019. \
             I worked at Acme Corp from 2019 to 2021 as a Junior Analyst where I built dashboards. \
             My skills include SQL, Python, Tableau.",
        );
        let report = compute_completeness_report(&record);
        // experience + education + skills
        assert!((report.overall_score - 0.70).abs() < 1e-9, "{}", report.overall_score);
        assert_eq!(
            report.filled_sections,
            vec![Section::Experience, Section::Education, Section::Skills]
        );
        let experience = &report.sections[0];
        assert_eq!(experience.status, SectionStatus::Filled);
        assert_eq!(experience.entry_count, 1);
        assert!(experience.recommendations[0].contains("no quantified outcome"));
        assert!(report
            .personal_info
            .missing_fields
            .contains(&"email".to_string()));
    }

    #[test]
    fn test_quantified_experience_has_no_recommendation() {
        let mut record = ResumeRecord::empty();
        record.experience[0].company = "Acme".to_string();
        record.experience[0].achievements = vec!["Reduced latency by 40%".to_string()];
        let report = compute_completeness_report(&record);
        assert!(report.sections[0].recommendations.is_empty());
    }

    #[test]
    fn test_end_before_start_flagged() {
        let mut record = ResumeRecord::empty();
        record.education[0].institution = "MIT".to_string();
        record.education[0].start_date = "2020-01".to_string();
        record.education[0].end_date = "2019-12".to_string();
        let report = compute_completeness_report(&record);
        let education = &report.sections[1];
        assert_eq!(education.section, Section::Education);
        assert!(education.recommendations[0].contains("ends before it starts"));
    }
}
