//! Validator / normalizer. Guarantees the record shape renderers depend on.
//!
//! - every array section holds at least one entry (a placeholder if nothing else)
//! - ids within a section run 1..N in display order
//! - `achievements` / `technologies` are never empty lists
//! - `personalInfo` / `declaration` always exist; partial objects are merged
//!   field-by-field with the empty defaults
//!
//! Both entry points return a fresh record and never fail.

use serde_json::{Map, Value};
use tracing::warn;

use crate::models::resume::{
    CertificationEntry, Declaration, EducationEntry, ExperienceEntry, LanguageEntry, OtherEntry,
    PersonalInfo, ProjectEntry, ResumeRecord, SectionEntry, SkillEntry,
};

pub(crate) type Object = Map<String, Value>;

/// Normalizes a typed record.
pub fn validate(record: &ResumeRecord) -> ResumeRecord {
    let mut out = record.clone();

    normalize_section(&mut out.experience);
    normalize_section(&mut out.education);
    normalize_section(&mut out.skills);
    normalize_section(&mut out.certifications);
    normalize_section(&mut out.projects);
    normalize_section(&mut out.languages);
    normalize_section(&mut out.others);

    for entry in &mut out.experience {
        ensure_list(&mut entry.achievements);
    }
    for entry in &mut out.projects {
        ensure_list(&mut entry.technologies);
    }

    out
}

/// Normalizes arbitrary JSON (including `null`, non-objects, and fragments).
pub fn validate_value(value: &Value) -> ResumeRecord {
    let root = value.as_object();

    let record = ResumeRecord {
        personal_info: decode_personal_info(root.and_then(|o| o.get("personalInfo"))),
        experience: decode_section(root, decode_experience),
        education: decode_section(root, decode_education),
        skills: decode_section(root, decode_skill),
        certifications: decode_section(root, decode_certification),
        projects: decode_section(root, decode_project),
        languages: decode_section(root, decode_language),
        others: decode_section(root, decode_other),
        declaration: decode_declaration(root.and_then(|o| o.get("declaration"))),
    };

    validate(&record)
}

fn normalize_section<T: SectionEntry>(entries: &mut Vec<T>) {
    if entries.is_empty() {
        entries.push(T::placeholder());
    }
    for (index, entry) in entries.iter_mut().enumerate() {
        entry.set_id(index as u32 + 1);
    }
}

fn ensure_list(items: &mut Vec<String>) {
    if items.is_empty() {
        items.push(String::new());
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Lenient JSON decoding
// ────────────────────────────────────────────────────────────────────────────

fn decode_section<T: SectionEntry>(root: Option<&Object>, decode: fn(&Object) -> T) -> Vec<T> {
    let key = T::SECTION.as_str();
    let Some(items) = root.and_then(|o| o.get(key)).and_then(Value::as_array) else {
        return Vec::new();
    };

    items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| match item.as_object() {
            Some(obj) => Some(decode(obj)),
            None => {
                warn!("Discarding {key}[{index}]: expected an object, got {item}");
                None
            }
        })
        .collect()
}

/// Strings pass through; numbers and booleans are stringified; anything else is "".
fn text(obj: &Object, key: &str) -> String {
    match obj.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

fn flag(obj: &Object, key: &str) -> bool {
    match obj.get(key) {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s.trim().eq_ignore_ascii_case("true"),
        _ => false,
    }
}

/// Missing or non-array → `[""]`. Array items that are not string-ish are dropped.
fn string_list(obj: &Object, key: &str) -> Vec<String> {
    let Some(items) = obj.get(key).and_then(Value::as_array) else {
        return vec![String::new()];
    };
    items
        .iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        })
        .collect()
}

fn decode_personal_info(value: Option<&Value>) -> PersonalInfo {
    let Some(obj) = value.and_then(Value::as_object) else {
        return PersonalInfo::default();
    };
    PersonalInfo {
        first_name: text(obj, "firstName"),
        last_name: text(obj, "lastName"),
        email: text(obj, "email"),
        phone: text(obj, "phone"),
        address: text(obj, "address"),
        title: text(obj, "title"),
        summary: text(obj, "summary"),
    }
}

fn decode_declaration(value: Option<&Value>) -> Declaration {
    let Some(obj) = value.and_then(Value::as_object) else {
        return Declaration::default();
    };
    Declaration {
        text: text(obj, "text"),
        place: text(obj, "place"),
        date: text(obj, "date"),
        signature: text(obj, "signature"),
    }
}

pub(crate) fn decode_experience(obj: &Object) -> ExperienceEntry {
    ExperienceEntry {
        id: 0,
        company: text(obj, "company"),
        position: text(obj, "position"),
        start_date: text(obj, "startDate"),
        end_date: text(obj, "endDate"),
        current: flag(obj, "current"),
        description: text(obj, "description"),
        achievements: string_list(obj, "achievements"),
    }
}

pub(crate) fn decode_education(obj: &Object) -> EducationEntry {
    EducationEntry {
        id: 0,
        institution: text(obj, "institution"),
        degree: text(obj, "degree"),
        field: text(obj, "field"),
        start_date: text(obj, "startDate"),
        end_date: text(obj, "endDate"),
        current: flag(obj, "current"),
        description: text(obj, "description"),
    }
}

pub(crate) fn decode_skill(obj: &Object) -> SkillEntry {
    SkillEntry {
        id: 0,
        name: text(obj, "name"),
    }
}

pub(crate) fn decode_certification(obj: &Object) -> CertificationEntry {
    CertificationEntry {
        id: 0,
        name: text(obj, "name"),
        issuer: text(obj, "issuer"),
        date: text(obj, "date"),
        description: text(obj, "description"),
        credential_id: text(obj, "credentialId"),
        credential_url: text(obj, "credentialUrl"),
    }
}

pub(crate) fn decode_project(obj: &Object) -> ProjectEntry {
    ProjectEntry {
        id: 0,
        name: text(obj, "name"),
        description: text(obj, "description"),
        link: text(obj, "link"),
        technologies: string_list(obj, "technologies"),
    }
}

pub(crate) fn decode_language(obj: &Object) -> LanguageEntry {
    LanguageEntry {
        id: 0,
        name: text(obj, "name"),
        level: text(obj, "level"),
    }
}

pub(crate) fn decode_other(obj: &Object) -> OtherEntry {
    OtherEntry {
        id: 0,
        title: text(obj, "title"),
        description: text(obj, "description"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn assert_invariants(record: &ResumeRecord) {
        fn ids<T: SectionEntry>(entries: &[T]) -> Vec<u32> {
            entries.iter().map(SectionEntry::id).collect()
        }
        fn sequential(ids: Vec<u32>) -> bool {
            !ids.is_empty() && ids.iter().enumerate().all(|(i, id)| *id == i as u32 + 1)
        }
        assert!(sequential(ids(&record.experience)));
        assert!(sequential(ids(&record.education)));
        assert!(sequential(ids(&record.skills)));
        assert!(sequential(ids(&record.certifications)));
        assert!(sequential(ids(&record.projects)));
        assert!(sequential(ids(&record.languages)));
        assert!(sequential(ids(&record.others)));
        assert!(record.experience.iter().all(|e| !e.achievements.is_empty()));
        assert!(record.projects.iter().all(|p| !p.technologies.is_empty()));
    }

    #[test]
    fn test_null_becomes_empty_record() {
        let record = validate_value(&Value::Null);
        assert_eq!(record, ResumeRecord::empty());
        assert_invariants(&record);
    }

    #[test]
    fn test_empty_object_and_non_object_become_empty_record() {
        assert_eq!(validate_value(&json!({})), ResumeRecord::empty());
        assert_eq!(validate_value(&json!("resume")), ResumeRecord::empty());
        assert_eq!(validate_value(&json!([1, 2, 3])), ResumeRecord::empty());
    }

    #[test]
    fn test_empty_skills_replaced_with_placeholder() {
        let record = validate_value(&json!({ "skills": [] }));
        assert_eq!(
            record.skills,
            vec![SkillEntry {
                id: 1,
                name: String::new()
            }]
        );
    }

    #[test]
    fn test_non_array_section_replaced_with_placeholder() {
        let record = validate_value(&json!({ "skills": "SQL, Python" }));
        assert_eq!(record.skills, vec![SkillEntry::placeholder()]);
    }

    #[test]
    fn test_personal_info_is_merged_field_by_field() {
        let record = validate_value(&json!({ "personalInfo": { "firstName": "Amit" } }));
        assert_eq!(record.personal_info.first_name, "Amit");
        assert_eq!(record.personal_info.last_name, "");
        assert_eq!(record.personal_info.email, "");
        assert_eq!(record.personal_info.summary, "");
    }

    #[test]
    fn test_email_only_personal_info_preserved() {
        let record = validate_value(&json!({ "personalInfo": { "email": "a@b.com" } }));
        assert_eq!(record.personal_info.email, "a@b.com");
        assert_eq!(record.personal_info.first_name, "");
    }

    #[test]
    fn test_declaration_merge() {
        let record = validate_value(&json!({ "declaration": { "place": "Pune" } }));
        assert_eq!(record.declaration.place, "Pune");
        assert_eq!(record.declaration.text, "");
    }

    #[test]
    fn test_experience_missing_achievements_defaults() {
        let record = validate_value(&json!({
            "experience": [{ "company": "Acme", "position": "Analyst" }]
        }));
        assert_eq!(record.experience.len(), 1);
        assert_eq!(record.experience[0].company, "Acme");
        assert_eq!(record.experience[0].achievements, vec![String::new()]);
        assert!(!record.experience[0].current);
    }

    #[test]
    fn test_experience_keeps_existing_achievements() {
        let record = validate_value(&json!({
            "experience": [{ "company": "Acme", "achievements": ["Cut costs 20%", 42] }]
        }));
        assert_eq!(
            record.experience[0].achievements,
            vec!["Cut costs 20%".to_string(), "42".to_string()]
        );
    }

    #[test]
    fn test_project_non_array_technologies_defaults() {
        let record = validate_value(&json!({
            "projects": [{ "name": "ShopBot", "technologies": "Rust" }]
        }));
        assert_eq!(record.projects[0].name, "ShopBot");
        assert_eq!(record.projects[0].technologies, vec![String::new()]);
    }

    #[test]
    fn test_lenient_field_types() {
        let record = validate_value(&json!({
            "education": [{ "institution": "MIT", "endDate": 2019, "current": "true", "degree": null }]
        }));
        let edu = &record.education[0];
        assert_eq!(edu.end_date, "2019");
        assert!(edu.current);
        assert_eq!(edu.degree, "");
    }

    #[test]
    fn test_non_object_items_are_discarded() {
        let record = validate_value(&json!({
            "skills": ["SQL", { "name": "Rust" }, null]
        }));
        assert_eq!(record.skills.len(), 1);
        assert_eq!(record.skills[0].name, "Rust");
        assert_eq!(record.skills[0].id, 1);

        let record = validate_value(&json!({ "others": [1, 2] }));
        assert_eq!(record.others, vec![OtherEntry::placeholder()]);
    }

    #[test]
    fn test_ids_renumbered_sequentially() {
        let record = validate_value(&json!({
            "skills": [{ "id": 9, "name": "A" }, { "id": 9, "name": "B" }, { "name": "C" }]
        }));
        let ids: Vec<_> = record.skills.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_validate_is_idempotent() {
        let inputs = [
            Value::Null,
            json!({}),
            json!({ "skills": [] }),
            json!({ "personalInfo": { "firstName": "Amit" }, "projects": [{ "name": "X" }] }),
            json!({ "experience": [{ "id": 4, "company": "Acme", "achievements": [] }, 7] }),
        ];
        for input in inputs {
            let once = validate_value(&input);
            let twice = validate(&once);
            assert_eq!(once, twice);
            let via_json = validate_value(&serde_json::to_value(&once).unwrap());
            assert_eq!(once, via_json);
            assert_invariants(&once);
        }
    }

    #[test]
    fn test_validate_does_not_mutate_input() {
        let mut record = ResumeRecord::empty();
        record.skills.clear();
        record.experience[0].achievements.clear();
        let before = record.clone();

        let validated = validate(&record);

        assert_eq!(record, before);
        assert_eq!(validated.skills.len(), 1);
        assert_eq!(validated.experience[0].achievements, vec![String::new()]);
    }

    #[test]
    fn test_typed_validate_fills_empty_lists() {
        let mut record = ResumeRecord::empty();
        record.projects[0].technologies.clear();
        record.languages.clear();
        let validated = validate(&record);
        assert_eq!(validated.projects[0].technologies, vec![String::new()]);
        assert_eq!(validated.languages, vec![LanguageEntry::placeholder()]);
    }
}
