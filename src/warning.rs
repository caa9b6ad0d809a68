use serde::Serialize;
use thiserror::Error;

/// A recoverable problem found while scanning or validating a case.
///
/// Warnings never stop parsing or serialization; they are collected and
/// handed back to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Error)]
pub enum Warning {
    #[error(
        "on line {line} in the \"{section}\" section, at most {max} values were expected but {found} were found, extra values were ignored"
    )]
    TooManyFields {
        section: &'static str,
        line: usize,
        max: usize,
        found: usize,
    },

    #[error("revision {given} given but only revision {supported} is supported, parsing may not be correct")]
    UnsupportedRevision { given: String, supported: i32 },

    #[error("the {field} value {value} on {component} {id} is not in the valid range {lower} to {upper}")]
    Range {
        component: &'static str,
        id: String,
        field: &'static str,
        value: f64,
        lower: f64,
        upper: f64,
    },

    #[error("description record {record} has {length} characters, only {limit} are supported")]
    DescriptionTooLong {
        record: usize,
        length: usize,
        limit: usize,
    },

    #[error("on {component} {id} the {field} value {value:?} {reason}")]
    ReservedIdentifier {
        component: &'static str,
        id: String,
        field: &'static str,
        value: String,
        reason: &'static str,
    },

    #[error("skipped {lines} lines of {section} data")]
    SkippedSection { section: &'static str, lines: usize },

    #[error("{lines} lines after the end of the case were not parsed")]
    TrailingContent { lines: usize },
}

impl Warning {
    /// The field a range warning refers to, if any.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Warning::Range { field, .. } | Warning::ReservedIdentifier { field, .. } => {
                Some(field)
            }
            _ => None,
        }
    }
}
