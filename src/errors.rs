use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// Per-field validation failures, keyed by the offending field name.
///
/// Kept ordered so error payloads are stable across runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push<K: Into<String>, V: Into<String>>(&mut self, field: K, message: V) {
        self.0.insert(field.into(), message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.0.iter()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<String> = self
            .0
            .iter()
            .map(|(field, msg)| format!("{}: {}", field, msg))
            .collect();
        write!(f, "{}", joined.join("; "))
    }
}

#[derive(Debug, Clone)]
pub enum LuxmeetError {
    Validation(String),
    InvalidFields(FieldErrors),
    SlugTaken(String),
    NotFound(String),
    VersionConflict(String),
    Persistence(String),
    Upstream(String),
    Scoring(String),
    CrmSync(String),
    Serialization(String),
    DateParse(String),
}

impl LuxmeetError {
    /// Stable error code, used in API envelopes and logs.
    pub fn code(&self) -> &'static str {
        match self {
            LuxmeetError::Validation(_) => "E001",
            LuxmeetError::InvalidFields(_) => "E002",
            LuxmeetError::SlugTaken(_) => "E003",
            LuxmeetError::NotFound(_) => "E004",
            LuxmeetError::VersionConflict(_) => "E005",
            LuxmeetError::Persistence(_) => "E006",
            LuxmeetError::Upstream(_) => "E007",
            LuxmeetError::Scoring(_) => "E008",
            LuxmeetError::CrmSync(_) => "E009",
            LuxmeetError::Serialization(_) => "E010",
            LuxmeetError::DateParse(_) => "E011",
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            LuxmeetError::Validation(_) => "Validation Error",
            LuxmeetError::InvalidFields(_) => "Field Validation Error",
            LuxmeetError::SlugTaken(_) => "Slug Already Taken",
            LuxmeetError::NotFound(_) => "Resource Not Found",
            LuxmeetError::VersionConflict(_) => "Version Conflict",
            LuxmeetError::Persistence(_) => "Persistence Error",
            LuxmeetError::Upstream(_) => "Upstream Service Error",
            LuxmeetError::Scoring(_) => "Scoring Error",
            LuxmeetError::CrmSync(_) => "CRM Sync Error",
            LuxmeetError::Serialization(_) => "Serialization Error",
            LuxmeetError::DateParse(_) => "Date Parse Error",
        }
    }

    pub fn message(&self) -> String {
        match self {
            LuxmeetError::InvalidFields(fields) => fields.to_string(),
            LuxmeetError::Validation(msg)
            | LuxmeetError::SlugTaken(msg)
            | LuxmeetError::NotFound(msg)
            | LuxmeetError::VersionConflict(msg)
            | LuxmeetError::Persistence(msg)
            | LuxmeetError::Upstream(msg)
            | LuxmeetError::Scoring(msg)
            | LuxmeetError::CrmSync(msg)
            | LuxmeetError::Serialization(msg)
            | LuxmeetError::DateParse(msg) => msg.clone(),
        }
    }

    /// Field errors carried by this error, if any.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            LuxmeetError::InvalidFields(fields) => Some(fields),
            _ => None,
        }
    }
}

impl fmt::Display for LuxmeetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error_type(), self.message())
    }
}

impl std::error::Error for LuxmeetError {}

impl LuxmeetError {
    pub fn validation<T: Into<String>>(msg: T) -> Self {
        LuxmeetError::Validation(msg.into())
    }

    pub fn invalid_fields(fields: FieldErrors) -> Self {
        LuxmeetError::InvalidFields(fields)
    }

    pub fn slug_taken<T: Into<String>>(msg: T) -> Self {
        LuxmeetError::SlugTaken(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        LuxmeetError::NotFound(msg.into())
    }

    pub fn version_conflict<T: Into<String>>(msg: T) -> Self {
        LuxmeetError::VersionConflict(msg.into())
    }

    pub fn persistence<T: Into<String>>(msg: T) -> Self {
        LuxmeetError::Persistence(msg.into())
    }

    pub fn upstream<T: Into<String>>(msg: T) -> Self {
        LuxmeetError::Upstream(msg.into())
    }

    pub fn scoring<T: Into<String>>(msg: T) -> Self {
        LuxmeetError::Scoring(msg.into())
    }

    pub fn crm_sync<T: Into<String>>(msg: T) -> Self {
        LuxmeetError::CrmSync(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        LuxmeetError::Serialization(msg.into())
    }

    pub fn date_parse<T: Into<String>>(msg: T) -> Self {
        LuxmeetError::DateParse(msg.into())
    }
}

impl From<std::io::Error> for LuxmeetError {
    fn from(err: std::io::Error) -> Self {
        LuxmeetError::Persistence(err.to_string())
    }
}

impl From<serde_json::Error> for LuxmeetError {
    fn from(err: serde_json::Error) -> Self {
        LuxmeetError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for LuxmeetError {
    fn from(err: chrono::ParseError) -> Self {
        LuxmeetError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LuxmeetError>;
