//! Hidden `method` field decoding

use std::fmt;

/// Method requested by an ajax form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMethod {
    Delete,
    Patch,
    /// Anything else, including a missing field
    Unknown(String),
}

impl FormMethod {
    /// Decode the raw field value; matching is exact and case-sensitive
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("DELETE") => FormMethod::Delete,
            Some("PATCH") => FormMethod::Patch,
            Some(other) => FormMethod::Unknown(other.to_string()),
            None => FormMethod::Unknown(String::new()),
        }
    }
}

impl fmt::Display for FormMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormMethod::Delete => write!(f, "DELETE"),
            FormMethod::Patch => write!(f, "PATCH"),
            FormMethod::Unknown(raw) => write!(f, "{:?}", raw),
        }
    }
}
