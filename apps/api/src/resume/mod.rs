// Resume core: free-text extraction, record validation, section edits, completeness.
// Everything here is synchronous and pure; HTTP plumbing lives in `handlers`.

pub mod completeness;
pub mod dedup;
pub mod editing;
pub mod extractor;
pub mod handlers;
pub mod rules;
pub mod validation;

use thiserror::Error;

use crate::models::resume::Section;

#[derive(Debug, Error)]
pub enum ResumeError {
    #[error("Unknown section '{0}'")]
    UnknownSection(String),

    #[error("No {section} entry with id {id}")]
    EntryNotFound { section: Section, id: u32 },
}
