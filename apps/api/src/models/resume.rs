#![allow(dead_code)]

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::resume::ResumeError;

/// `firstName` written by the extractor when the text never states a name.
pub const UNASSIGNED_NAME: &str = "unassigned";

/// Identity and contact block. Always present on a record, even when every field is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub title: String,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceEntry {
    pub id: u32,
    pub company: String,
    pub position: String,
    pub start_date: String,
    pub end_date: String,
    pub current: bool,
    pub description: String,
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationEntry {
    pub id: u32,
    pub institution: String,
    pub degree: String,
    pub field: String,
    pub start_date: String,
    pub end_date: String,
    pub current: bool,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillEntry {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificationEntry {
    pub id: u32,
    pub name: String,
    pub issuer: String,
    pub date: String,
    pub description: String,
    pub credential_id: String,
    pub credential_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub link: String,
    pub technologies: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageEntry {
    pub id: u32,
    pub name: String,
    /// Free text; usually one of the `LanguageLevel` labels but never enforced.
    pub level: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtherEntry {
    pub id: u32,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Declaration {
    pub text: String,
    pub place: String,
    pub date: String,
    pub signature: String,
}

/// The canonical structured representation of one resume.
///
/// Renderers rely on every array section holding at least one entry; run a
/// record through `resume::validation::validate` before handing it on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeRecord {
    pub personal_info: PersonalInfo,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub skills: Vec<SkillEntry>,
    pub certifications: Vec<CertificationEntry>,
    pub projects: Vec<ProjectEntry>,
    pub languages: Vec<LanguageEntry>,
    pub others: Vec<OtherEntry>,
    pub declaration: Declaration,
}

// ────────────────────────────────────────────────────────────────────────────
// Placeholders
// ────────────────────────────────────────────────────────────────────────────

/// Items stored in an array section. Every section type has a placeholder
/// shape and a notion of "holds no user data".
pub trait SectionEntry: Clone {
    const SECTION: Section;

    fn id(&self) -> u32;
    fn set_id(&mut self, id: u32);
    fn placeholder() -> Self;
    fn is_placeholder(&self) -> bool;
}

fn blank_list(items: &[String]) -> bool {
    items.iter().all(|s| s.trim().is_empty())
}

fn all_blank(fields: &[&str]) -> bool {
    fields.iter().all(|s| s.trim().is_empty())
}

impl SectionEntry for ExperienceEntry {
    const SECTION: Section = Section::Experience;

    fn id(&self) -> u32 {
        self.id
    }

    fn set_id(&mut self, id: u32) {
        self.id = id;
    }

    fn placeholder() -> Self {
        Self {
            id: 1,
            company: String::new(),
            position: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            current: false,
            description: String::new(),
            achievements: vec![String::new()],
        }
    }

    fn is_placeholder(&self) -> bool {
        all_blank(&[
            &self.company,
            &self.position,
            &self.start_date,
            &self.end_date,
            &self.description,
        ]) && blank_list(&self.achievements)
    }
}

impl SectionEntry for EducationEntry {
    const SECTION: Section = Section::Education;

    fn id(&self) -> u32 {
        self.id
    }

    fn set_id(&mut self, id: u32) {
        self.id = id;
    }

    fn placeholder() -> Self {
        Self {
            id: 1,
            institution: String::new(),
            degree: String::new(),
            field: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            current: false,
            description: String::new(),
        }
    }

    fn is_placeholder(&self) -> bool {
        all_blank(&[
            &self.institution,
            &self.degree,
            &self.field,
            &self.start_date,
            &self.end_date,
            &self.description,
        ])
    }
}

impl SectionEntry for SkillEntry {
    const SECTION: Section = Section::Skills;

    fn id(&self) -> u32 {
        self.id
    }

    fn set_id(&mut self, id: u32) {
        self.id = id;
    }

    fn placeholder() -> Self {
        Self {
            id: 1,
            name: String::new(),
        }
    }

    fn is_placeholder(&self) -> bool {
        self.name.trim().is_empty()
    }
}

impl SectionEntry for CertificationEntry {
    const SECTION: Section = Section::Certifications;

    fn id(&self) -> u32 {
        self.id
    }

    fn set_id(&mut self, id: u32) {
        self.id = id;
    }

    fn placeholder() -> Self {
        Self {
            id: 1,
            name: String::new(),
            issuer: String::new(),
            date: String::new(),
            description: String::new(),
            credential_id: String::new(),
            credential_url: String::new(),
        }
    }

    fn is_placeholder(&self) -> bool {
        all_blank(&[
            &self.name,
            &self.issuer,
            &self.date,
            &self.description,
            &self.credential_id,
            &self.credential_url,
        ])
    }
}

impl SectionEntry for ProjectEntry {
    const SECTION: Section = Section::Projects;

    fn id(&self) -> u32 {
        self.id
    }

    fn set_id(&mut self, id: u32) {
        self.id = id;
    }

    fn placeholder() -> Self {
        Self {
            id: 1,
            name: String::new(),
            description: String::new(),
            link: String::new(),
            technologies: vec![String::new()],
        }
    }

    fn is_placeholder(&self) -> bool {
        all_blank(&[&self.name, &self.description, &self.link]) && blank_list(&self.technologies)
    }
}

impl SectionEntry for LanguageEntry {
    const SECTION: Section = Section::Languages;

    fn id(&self) -> u32 {
        self.id
    }

    fn set_id(&mut self, id: u32) {
        self.id = id;
    }

    fn placeholder() -> Self {
        Self {
            id: 1,
            name: String::new(),
            level: String::new(),
        }
    }

    fn is_placeholder(&self) -> bool {
        all_blank(&[&self.name, &self.level])
    }
}

impl SectionEntry for OtherEntry {
    const SECTION: Section = Section::Others;

    fn id(&self) -> u32 {
        self.id
    }

    fn set_id(&mut self, id: u32) {
        self.id = id;
    }

    fn placeholder() -> Self {
        Self {
            id: 1,
            title: String::new(),
            description: String::new(),
        }
    }

    fn is_placeholder(&self) -> bool {
        all_blank(&[&self.title, &self.description])
    }
}

/// `max(existing ids) + 1`, or 1 for an empty section.
pub fn next_id<T: SectionEntry>(entries: &[T]) -> u32 {
    entries.iter().map(SectionEntry::id).max().map_or(1, |max| max + 1)
}

/// Parses the `YYYY-MM` form used by record dates (first day of the month).
pub fn parse_year_month(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d").ok()
}

impl ExperienceEntry {
    /// End date as a renderer shows it: "Present" for an ongoing role.
    pub fn display_end_date(&self) -> &str {
        if self.current {
            "Present"
        } else {
            &self.end_date
        }
    }
}

impl EducationEntry {
    pub fn display_end_date(&self) -> &str {
        if self.current {
            "Present"
        } else {
            &self.end_date
        }
    }
}

impl ResumeRecord {
    /// A fresh record with one placeholder per array section.
    pub fn empty() -> Self {
        Self {
            personal_info: PersonalInfo::default(),
            experience: vec![ExperienceEntry::placeholder()],
            education: vec![EducationEntry::placeholder()],
            skills: vec![SkillEntry::placeholder()],
            certifications: vec![CertificationEntry::placeholder()],
            projects: vec![ProjectEntry::placeholder()],
            languages: vec![LanguageEntry::placeholder()],
            others: vec![OtherEntry::placeholder()],
            declaration: Declaration::default(),
        }
    }

    /// True when the section holds nothing but placeholder entries.
    pub fn section_is_empty(&self, section: Section) -> bool {
        fn blank<T: SectionEntry>(entries: &[T]) -> bool {
            entries.iter().all(SectionEntry::is_placeholder)
        }

        match section {
            Section::Experience => blank(&self.experience),
            Section::Education => blank(&self.education),
            Section::Skills => blank(&self.skills),
            Section::Certifications => blank(&self.certifications),
            Section::Projects => blank(&self.projects),
            Section::Languages => blank(&self.languages),
            Section::Others => blank(&self.others),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Section names
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Experience,
    Education,
    Skills,
    Certifications,
    Projects,
    Languages,
    Others,
}

impl Section {
    pub const ALL: [Section; 7] = [
        Section::Experience,
        Section::Education,
        Section::Skills,
        Section::Certifications,
        Section::Projects,
        Section::Languages,
        Section::Others,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Experience => "experience",
            Section::Education => "education",
            Section::Skills => "skills",
            Section::Certifications => "certifications",
            Section::Projects => "projects",
            Section::Languages => "languages",
            Section::Others => "others",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Section {
    type Err = ResumeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Section::ALL
            .into_iter()
            .find(|section| section.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ResumeError::UnknownSection(s.to_string()))
    }
}

/// Proficiency labels offered by the language form. Stored records keep the raw string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LanguageLevel {
    Basic,
    Intermediate,
    Fluent,
    Native,
}

impl LanguageLevel {
    /// Lenient parse: case-insensitive, accepts a few common synonyms.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "basic" | "beginner" | "elementary" => Some(LanguageLevel::Basic),
            "intermediate" | "conversational" => Some(LanguageLevel::Intermediate),
            "fluent" | "advanced" | "professional" => Some(LanguageLevel::Fluent),
            "native" | "mother tongue" | "bilingual" => Some(LanguageLevel::Native),
            _ => None,
        }
    }
}
