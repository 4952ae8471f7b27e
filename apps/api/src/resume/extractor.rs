//! Extractor: turns a free-text narrative into a best-guess `ResumeRecord`.
//!
//! Runs the rule battery in `rules`, maps candidates onto record entries, and
//! hands the result to the validator so every section ends up non-empty.
//! Never fails: unrecognised input yields the all-placeholder record.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::resume::{
    CertificationEntry, EducationEntry, ExperienceEntry, LanguageEntry, PersonalInfo,
    ProjectEntry, ResumeRecord, Section, SkillEntry, UNASSIGNED_NAME,
};
use crate::resume::dedup::{dedup_experience, ExtractionWarning};
use crate::resume::rules::{self, EducationMatch, ExperienceMatch};
use crate::resume::validation::validate;

/// Explicit per-section emptiness, carried alongside the sentinel-padded record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionPresence {
    pub section: Section,
    pub is_empty: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionReport {
    pub record: ResumeRecord,
    pub warnings: Vec<ExtractionWarning>,
    pub sections: Vec<SectionPresence>,
}

/// Extracts a validated record from `text`.
pub fn extract(text: &str) -> ResumeRecord {
    extract_with_report(text).record
}

/// Like `extract`, but also returns duplicate/overlap warnings and section presence flags.
pub fn extract_with_report(text: &str) -> ExtractionReport {
    let personal_info = extract_personal_info(text);

    let education: Vec<EducationEntry> = rules::extract_education(text)
        .into_iter()
        .map(|c| education_entry(c.value))
        .collect();

    let (experience, warnings) = dedup_experience(collect_experience(text));

    let skills: Vec<SkillEntry> = rules::extract_skills(text)
        .into_iter()
        .map(|name| SkillEntry { id: 0, name })
        .collect();

    let certifications: Vec<CertificationEntry> = rules::extract_certifications(text)
        .into_iter()
        .map(|name| CertificationEntry {
            id: 0,
            name,
            issuer: String::new(),
            date: String::new(),
            description: String::new(),
            credential_id: String::new(),
            credential_url: String::new(),
        })
        .collect();

    let projects: Vec<ProjectEntry> = rules::extract_project(text)
        .map(|p| ProjectEntry {
            id: 0,
            name: p.name,
            description: p.description,
            link: String::new(),
            technologies: vec![String::new()],
        })
        .into_iter()
        .collect();

    let languages: Vec<LanguageEntry> = rules::extract_languages(text)
        .into_iter()
        .map(|l| LanguageEntry {
            id: 0,
            name: l.name,
            level: l.level,
        })
        .collect();

    debug!(
        experience = experience.len(),
        education = education.len(),
        skills = skills.len(),
        certifications = certifications.len(),
        projects = projects.len(),
        languages = languages.len(),
        warnings = warnings.len(),
        "Extracted resume candidates"
    );

    let record = validate(&ResumeRecord {
        personal_info,
        experience,
        education,
        skills,
        certifications,
        projects,
        languages,
        others: Vec::new(),
        declaration: Default::default(),
    });

    let sections = Section::ALL
        .into_iter()
        .map(|section| SectionPresence {
            section,
            is_empty: record.section_is_empty(section),
        })
        .collect();

    ExtractionReport {
        record,
        warnings,
        sections,
    }
}

fn extract_personal_info(text: &str) -> PersonalInfo {
    let (first_name, last_name) = rules::extract_name(text)
        .map(|n| (n.first_name, n.last_name))
        .unwrap_or_else(|| (UNASSIGNED_NAME.to_string(), String::new()));

    PersonalInfo {
        first_name,
        last_name,
        email: rules::extract_email(text).unwrap_or_default(),
        phone: rules::extract_phone(text).unwrap_or_default(),
        address: rules::extract_address(text).unwrap_or_default(),
        title: rules::extract_title(text).unwrap_or_default(),
        summary: rules::extract_summary(text),
    }
}

/// Past roles in text order, then current roles. Ids are left for the
/// validator, which numbers entries 1..N in this order.
fn collect_experience(text: &str) -> Vec<ExperienceEntry> {
    let past = rules::extract_past_roles(text);
    let current = rules::extract_current_roles(text);
    debug!(past = past.len(), current = current.len(), "Experience matches");

    past.into_iter()
        .chain(current)
        .map(|c| experience_entry(c.value))
        .collect()
}

fn start_of(year: u32) -> String {
    format!("{year}-01")
}

fn end_of(year: u32) -> String {
    format!("{year}-12")
}

fn experience_entry(m: ExperienceMatch) -> ExperienceEntry {
    let (end_date, current) = match m.end_year {
        Some(year) => (end_of(year), false),
        None => (String::new(), true),
    };

    ExperienceEntry {
        id: 0,
        company: m.company,
        position: m.position,
        start_date: start_of(m.start_year),
        end_date,
        current,
        description: m.outcome,
        achievements: vec![String::new()],
    }
}

/// Only the graduation year is known; assume a four-year programme.
fn education_entry(m: EducationMatch) -> EducationEntry {
    EducationEntry {
        id: 0,
        institution: m.institution,
        degree: m.degree,
        field: m.field,
        start_date: start_of(m.graduation_year.saturating_sub(4)),
        end_date: end_of(m.graduation_year),
        current: false,
        description: String::new(),
    }
}
