//! Checks a backend record against the saying it was produced for.
use crate::normalize::{collapse_whitespace, normalize};
use crate::record::SayingRecord;

/// Result of checking one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    Valid,
    Invalid(String),
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationOutcome::Valid)
    }

    /// Human readable failure reason, if any.
    pub fn reason(&self) -> Option<&str> {
        match self {
            ValidationOutcome::Valid => None,
            ValidationOutcome::Invalid(reason) => Some(reason.as_str()),
        }
    }
}

pub const NO_DATA: &str = "No data returned";
pub const MISMATCH: &str = "Combined parts do not match original text";

/// Validate `record` against `original`.
///
/// Checks run in order and the first failing one is reported:
/// 1. a record exists,
/// 2. every second part field holds non blank text,
/// 3. `lu_part1 + " " + lu_part2` normalizes to the same text as `original`.
pub fn validate(record: Option<&SayingRecord>, original: &str) -> ValidationOutcome {
    let record = match record {
        Some(r) => &r.entry,
        None => return ValidationOutcome::Invalid(NO_DATA.to_string()),
    };

    let second_parts = [
        ("lu_part2", &record.lu_part2),
        ("en_literal_translation_p2", &record.en_literal_translation_p2),
        (
            "en_closest_real_corresponding_saying_p2",
            &record.en_closest_real_corresponding_saying_p2,
        ),
    ];
    for (field, value) in second_parts {
        if value.trim().is_empty() {
            return ValidationOutcome::Invalid(format!(
                "Field {field} is empty - sayings must always be split in 2"
            ));
        }
    }

    let combined = format!("{} {}", record.lu_part1, record.lu_part2);
    let expected = collapse_whitespace(original);
    let got = collapse_whitespace(&combined);
    if normalize(&expected) != normalize(&got) {
        return ValidationOutcome::Invalid(MISMATCH.to_string());
    }

    ValidationOutcome::Valid
}
