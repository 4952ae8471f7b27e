//! Field rules: one small matcher per resume field family.
//!
//! Each rule takes the raw narrative and returns zero or more candidates with
//! the byte span they were read from. Rules never fail: no match is `None` or
//! an empty `Vec`. Trigger phrases are case-insensitive; captured text keeps
//! the author's casing.

use std::ops::{Range, RangeInclusive};
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::models::resume::LanguageLevel;

/// A value read from the narrative together with the span it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate<T> {
    pub span: Range<usize>,
    pub value: T,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameMatch {
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EducationMatch {
    pub institution: String,
    pub degree: String,
    pub field: String,
    pub graduation_year: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperienceMatch {
    pub company: String,
    pub position: String,
    pub start_year: u32,
    /// `None` for an ongoing role.
    pub end_year: Option<u32>,
    pub outcome: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectMatch {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageMatch {
    pub name: String,
    pub level: String,
}

type Build<T> = fn(&Captures<'_>) -> Option<T>;

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("valid regex")
}

// Sentence-bounded text. `LIST` additionally lets a dot through when it sits
// inside a token ("Node.js", "ASP.NET").
const SEG: &str = r"[^.!?\n]";
const TOKEN: &str = r"(?:[^.!?\n]|\.[^\s.])";
const LIST: &str = r"(?:[^.!?\n]|\.[^\s.])+";
const IM: &str = r"I(?:['’]m|\s+am)";

static NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"(?i)\bmy name is\s+([^.,;!?\n]+?)(?:\s+and\b|\s*[.,;!?\n]|\s*$)")
});

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}"));

// Optional `+CC`, an optional parenthesised area code, then digit groups
// joined by single separators. Digit count is checked in `extract_phone`.
static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"(?:^|[^\w+(])((?:\+\d{1,3}[\s.-]?)?(?:\(\d{1,4}\)[\s.-]?)?\d{1,5}(?:[\s.-]\d{1,5}){0,5})\b")
});

static YEAR_PAIR_RE: LazyLock<Regex> = LazyLock::new(|| compile(r"^\d{4}[\s.-]\d{4}$"));

const PHONE_DIGITS: RangeInclusive<usize> = 7..=15;

static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| compile(&format!(r"(?i)\b{IM}\s+an?\s+({SEG}+)")));

// "I'm a Data Analyst and I ..." ends the title before the next clause.
static TITLE_END_RE: LazyLock<Regex> = LazyLock::new(|| compile(r"(?i)\s+and\s+I\b"));

static PLACE_END_RE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?i)\s+(?:and|but|where|with|since)\b"));

static EDUCATION_WITH_FIELD_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile(&format!(
        r"(?i)\bgraduated from\s+({SEG}+?)\s+with\s+an?\s+({TOKEN}+?)\s+in\s+({SEG}+?)\s+in\s+(\d{{4}})\b"
    ))
});

static EDUCATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile(&format!(
        r"(?i)\bgraduated from\s+({SEG}+?)\s+with\s+an?\s+({TOKEN}+?)\s+in\s+(\d{{4}})\b"
    ))
});

const YEAR_RANGE: &str = r"from\s+(\d{4})\s+(?:to|until|through|-|–)\s+(\d{4}|present|now|today)";

static PAST_ROLE_WITH_OUTCOME_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile(&format!(
        r"(?i)\bworked at\s+({SEG}+?)\s+{YEAR_RANGE}\s+as\s+an?\s+({SEG}+?)\s+where\s+({SEG}+)"
    ))
});

static PAST_ROLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile(&format!(
        r"(?i)\bworked at\s+({SEG}+?)\s+{YEAR_RANGE}\s+as\s+an?\s+({SEG}+)"
    ))
});

static CURRENT_ROLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile(&format!(
        r"(?i)\bsince\s+(\d{{4}}),?\s+I(?:['’]ve|\s+have)\s+been\s+(?:at|with)\s+({SEG}+?)\s+as\s+an?\s+({SEG}+)"
    ))
});

// A title-cased run such as "Senior Product Manager" or "Head of Data".
static POSITION_RUN_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"^[A-Z][\w'’&/.+-]*(?:\s+(?:(?:of|and|for|the|in|&)\s+)*[A-Z][\w'’&/.+-]*)*")
});

static SKILLS_RE: LazyLock<Regex> =
    LazyLock::new(|| compile(&format!(r"(?i)\bskills\s+include:?\s+({LIST})")));

static CERTIFICATIONS_RE: LazyLock<Regex> =
    LazyLock::new(|| compile(&format!(r"(?i)\b{IM}\s+certified\s+in\s+({LIST})")));

static PROJECT_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile(&format!(
        r"(?i)\bmy most successful project was\s+({SEG}+?)\s+that\s+({SEG}+)"
    ))
});

static LANGUAGES_RE: LazyLock<Regex> =
    LazyLock::new(|| compile(&format!(r"(?i)\bI\s+speak\s+({LIST})")));

static ADDRESS_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile(&format!(
        r"(?i)\b(?:{IM}\s+based\s+in|I\s+live\s+in)\s+({SEG}+)"
    ))
});

static AND_SPLIT_RE: LazyLock<Regex> = LazyLock::new(|| compile(r"(?i)\s+and\s+"));

fn group(caps: &Captures<'_>, index: usize) -> String {
    caps.get(index)
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

fn year(caps: &Captures<'_>, index: usize) -> Option<u32> {
    caps.get(index).and_then(|m| m.as_str().parse().ok())
}

fn whole_span(caps: &Captures<'_>) -> Range<usize> {
    caps.get(0).map(|m| m.range()).unwrap_or(0..0)
}

/// Runs pattern variants from most to least specific. A variant's matches
/// claim their spans; later variants only contribute matches that do not
/// overlap a claimed span. Results come back in text order.
pub fn collect_by_precedence<T>(
    text: &str,
    variants: &[(&Regex, Build<T>)],
) -> Vec<Candidate<T>> {
    let mut found: Vec<Candidate<T>> = Vec::new();

    for (re, build) in variants {
        let mut fresh = Vec::new();
        for caps in re.captures_iter(text) {
            let span = whole_span(&caps);
            let overlaps = found
                .iter()
                .any(|c| c.span.start < span.end && span.start < c.span.end);
            if overlaps {
                continue;
            }
            if let Some(value) = build(&caps) {
                fresh.push(Candidate { span, value });
            }
        }
        found.extend(fresh);
    }

    found.sort_by_key(|c| c.span.start);
    found
}

/// Splits a comma-separated list, dropping a leading "and " from the final item.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split([',', ';'])
        .map(|item| {
            let item = item.trim();
            match item.get(..4) {
                Some(prefix) if prefix.eq_ignore_ascii_case("and ") => item[4..].trim().to_string(),
                _ => item.to_string(),
            }
        })
        .filter(|item| !item.is_empty())
        .collect()
}

/// Splits "Product Manager leading a team" into ("Product Manager", "leading a team").
pub fn split_role_clause(clause: &str) -> (String, String) {
    let clause = clause.trim();

    if let Some(run) = POSITION_RUN_RE.find(clause) {
        let position = run.as_str().trim_end_matches(['.', '-']).trim().to_string();
        let rest = clause[run.end()..].trim();
        let rest = rest
            .strip_prefix("where ")
            .or_else(|| rest.strip_prefix(", "))
            .or_else(|| rest.strip_prefix("- "))
            .unwrap_or(rest)
            .trim();
        return (position, rest.to_string());
    }

    match clause.split_once(" where ") {
        Some((position, outcome)) => (position.trim().to_string(), outcome.trim().to_string()),
        None => (clause.to_string(), String::new()),
    }
}

fn clip_clause(raw: &str, end: &Regex) -> String {
    match end.find(raw) {
        Some(m) => raw[..m.start()].trim().to_string(),
        None => raw.trim().to_string(),
    }
}

pub fn extract_name(text: &str) -> Option<NameMatch> {
    let caps = NAME_RE.captures(text)?;
    let full = group(&caps, 1);
    let mut tokens = full.split_whitespace();
    let first_name = tokens.next()?.to_string();
    let last_name = tokens.collect::<Vec<_>>().join(" ");
    Some(NameMatch {
        first_name,
        last_name,
    })
}

pub fn extract_email(text: &str) -> Option<String> {
    EMAIL_RE.find(text).map(|m| m.as_str().to_string())
}

/// First phone-shaped token holding 7 to 15 digits. Bare year ranges such as
/// "2019-2021" are skipped.
pub fn extract_phone(text: &str) -> Option<String> {
    PHONE_RE
        .captures_iter(text)
        .map(|caps| group(&caps, 1))
        .find(|candidate| {
            let digits = candidate.chars().filter(char::is_ascii_digit).count();
            PHONE_DIGITS.contains(&digits) && !YEAR_PAIR_RE.is_match(candidate)
        })
}

pub fn extract_title(text: &str) -> Option<String> {
    let caps = TITLE_RE.captures(text)?;
    let title = clip_clause(&group(&caps, 1), &TITLE_END_RE);
    (!title.is_empty()).then_some(title)
}

pub fn extract_address(text: &str) -> Option<String> {
    let caps = ADDRESS_RE.captures(text)?;
    let address = clip_clause(&group(&caps, 1), &PLACE_END_RE);
    (!address.is_empty()).then_some(address)
}

/// Text up to the first period, trimmed. Empty only when the input is blank.
pub fn extract_summary(text: &str) -> String {
    text.split('.').next().unwrap_or_default().trim().to_string()
}

fn education_with_field(caps: &Captures<'_>) -> Option<EducationMatch> {
    Some(EducationMatch {
        institution: group(caps, 1),
        degree: group(caps, 2),
        field: group(caps, 3),
        graduation_year: year(caps, 4)?,
    })
}

fn education_without_field(caps: &Captures<'_>) -> Option<EducationMatch> {
    Some(EducationMatch {
        institution: group(caps, 1),
        degree: group(caps, 2),
        field: String::new(),
        graduation_year: year(caps, 3)?,
    })
}

pub fn extract_education(text: &str) -> Vec<Candidate<EducationMatch>> {
    collect_by_precedence(
        text,
        &[
            (&*EDUCATION_WITH_FIELD_RE, education_with_field as Build<_>),
            (&*EDUCATION_RE, education_without_field as Build<_>),
        ],
    )
}

fn past_role_with_outcome(caps: &Captures<'_>) -> Option<ExperienceMatch> {
    Some(ExperienceMatch {
        company: group(caps, 1),
        start_year: year(caps, 2)?,
        end_year: year(caps, 3),
        position: group(caps, 4),
        outcome: group(caps, 5),
    })
}

fn past_role(caps: &Captures<'_>) -> Option<ExperienceMatch> {
    let (position, outcome) = split_role_clause(&group(caps, 4));
    Some(ExperienceMatch {
        company: group(caps, 1),
        start_year: year(caps, 2)?,
        end_year: year(caps, 3),
        position,
        outcome,
    })
}

/// "worked at A from Y1 to Y2 as a B [where C]" roles, in text order.
pub fn extract_past_roles(text: &str) -> Vec<Candidate<ExperienceMatch>> {
    collect_by_precedence(
        text,
        &[
            (&*PAST_ROLE_WITH_OUTCOME_RE, past_role_with_outcome as Build<_>),
            (&*PAST_ROLE_RE, past_role as Build<_>),
        ],
    )
}

/// "Since Y, I've been at A as a B ..." roles.
pub fn extract_current_roles(text: &str) -> Vec<Candidate<ExperienceMatch>> {
    CURRENT_ROLE_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let (position, outcome) = split_role_clause(&group(&caps, 3));
            Some(Candidate {
                span: whole_span(&caps),
                value: ExperienceMatch {
                    company: group(&caps, 2),
                    position,
                    start_year: year(&caps, 1)?,
                    end_year: None,
                    outcome,
                },
            })
        })
        .collect()
}

pub fn extract_skills(text: &str) -> Vec<String> {
    SKILLS_RE
        .captures(text)
        .map(|caps| split_list(&group(&caps, 1)))
        .unwrap_or_default()
}

pub fn extract_certifications(text: &str) -> Vec<String> {
    CERTIFICATIONS_RE
        .captures(text)
        .map(|caps| split_list(&group(&caps, 1)))
        .unwrap_or_default()
}

pub fn extract_project(text: &str) -> Option<ProjectMatch> {
    let caps = PROJECT_RE.captures(text)?;
    Some(ProjectMatch {
        name: group(&caps, 1),
        description: group(&caps, 2),
    })
}

/// "I speak fluent English, Hindi and basic French".
pub fn extract_languages(text: &str) -> Vec<LanguageMatch> {
    let Some(caps) = LANGUAGES_RE.captures(text) else {
        return Vec::new();
    };

    split_list(&group(&caps, 1))
        .iter()
        .flat_map(|item| AND_SPLIT_RE.split(item).map(str::trim).collect::<Vec<_>>())
        .filter(|item| !item.is_empty())
        .map(|item| match item.split_once(char::is_whitespace) {
            Some((first, rest)) if LanguageLevel::parse(first).is_some() => LanguageMatch {
                name: rest.trim().to_string(),
                level: first.to_string(),
            },
            _ => LanguageMatch {
                name: item.to_string(),
                level: String::new(),
            },
        })
        .collect()
}
