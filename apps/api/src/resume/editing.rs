//! Form-driven edits: the "add entry" / "remove entry" buttons of each section.

use serde_json::Value;
use tracing::debug;

use crate::models::resume::{next_id, ResumeRecord, Section, SectionEntry};
use crate::resume::validation::{self, validate, Object};
use crate::resume::ResumeError;

/// Appends one entry to `section`, decoded leniently from `entry` (or the
/// section placeholder when `entry` is absent or not an object). The new
/// entry gets `max(existing ids) + 1`.
pub fn append_entry(record: &ResumeRecord, section: Section, entry: Option<&Value>) -> ResumeRecord {
    let mut out = validate(record);

    let id = match section {
        Section::Experience => push(&mut out.experience, entry, validation::decode_experience),
        Section::Education => push(&mut out.education, entry, validation::decode_education),
        Section::Skills => push(&mut out.skills, entry, validation::decode_skill),
        Section::Certifications => {
            push(&mut out.certifications, entry, validation::decode_certification)
        }
        Section::Projects => push(&mut out.projects, entry, validation::decode_project),
        Section::Languages => push(&mut out.languages, entry, validation::decode_language),
        Section::Others => push(&mut out.others, entry, validation::decode_other),
    };
    debug!(%section, id, "Appended entry");

    validate(&out)
}

/// Removes the entry with `id` from `section`. Removing the last entry leaves
/// the section placeholder behind.
pub fn remove_entry(
    record: &ResumeRecord,
    section: Section,
    id: u32,
) -> Result<ResumeRecord, ResumeError> {
    let mut out = record.clone();

    let removed = match section {
        Section::Experience => remove(&mut out.experience, id),
        Section::Education => remove(&mut out.education, id),
        Section::Skills => remove(&mut out.skills, id),
        Section::Certifications => remove(&mut out.certifications, id),
        Section::Projects => remove(&mut out.projects, id),
        Section::Languages => remove(&mut out.languages, id),
        Section::Others => remove(&mut out.others, id),
    };
    if !removed {
        return Err(ResumeError::EntryNotFound { section, id });
    }
    debug!(%section, id, "Removed entry");

    Ok(validate(&out))
}

fn push<T: SectionEntry>(entries: &mut Vec<T>, value: Option<&Value>, decode: fn(&Object) -> T) -> u32 {
    let mut entry = value
        .and_then(Value::as_object)
        .map(decode)
        .unwrap_or_else(T::placeholder);
    let id = next_id(entries);
    entry.set_id(id);
    entries.push(entry);
    id
}

fn remove<T: SectionEntry>(entries: &mut Vec<T>, id: u32) -> bool {
    match entries.iter().position(|e| e.id() == id) {
        Some(index) => {
            entries.remove(index);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_append_placeholder_gets_next_id() {
        let record = ResumeRecord::empty();
        let out = append_entry(&record, Section::Experience, None);
        assert_eq!(out.experience.len(), 2);
        assert_eq!(out.experience[1].id, 2);
        assert_eq!(out.experience[1].achievements, vec![String::new()]);
        // input untouched
        assert_eq!(record.experience.len(), 1);
    }

    #[test]
    fn test_append_decodes_entry() {
        let record = ResumeRecord::empty();
        let entry = json!({ "name": "Rust", "id": 99 });
        let out = append_entry(&record, Section::Skills, Some(&entry));
        assert_eq!(out.skills.len(), 2);
        assert_eq!(out.skills[1].name, "Rust");
        assert_eq!(out.skills[1].id, 2);
    }

    #[test]
    fn test_append_project_with_empty_technologies() {
        let record = ResumeRecord::empty();
        let entry = json!({ "name": "ShopBot", "technologies": [] });
        let out = append_entry(&record, Section::Projects, Some(&entry));
        assert_eq!(out.projects[1].technologies, vec![String::new()]);
    }

    #[test]
    fn test_remove_entry() {
        let record = append_entry(&ResumeRecord::empty(), Section::Languages, Some(&json!({ "name": "Hindi" })));
        let out = remove_entry(&record, Section::Languages, 1).unwrap();
        assert_eq!(out.languages.len(), 1);
        assert_eq!(out.languages[0].name, "Hindi");
        assert_eq!(out.languages[0].id, 1);
    }

    #[test]
    fn test_remove_last_entry_leaves_placeholder() {
        let record = ResumeRecord::empty();
        let out = remove_entry(&record, Section::Others, 1).unwrap();
        assert_eq!(out.others.len(), 1);
        assert!(out.others[0].is_placeholder());
    }

    #[test]
    fn test_remove_unknown_id() {
        let err = remove_entry(&ResumeRecord::empty(), Section::Skills, 5).unwrap_err();
        assert!(matches!(
            err,
            ResumeError::EntryNotFound {
                section: Section::Skills,
                id: 5
            }
        ));
    }
}
