use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Order in which notes are listed, by id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListOrder {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("'{0}' is required")]
    Missing(&'static str),

    #[error("'{0}' must not be empty")]
    Empty(&'static str),

    #[error("at least one of 'title' or 'content' must be supplied")]
    NoUpdatableField,

    #[error("'id' must be an integer, got '{0}'")]
    InvalidId(String),

    #[error("'{0}' must not contain NUL characters")]
    NulCharacter(&'static str),

    #[error("malformed request body: {0}")]
    MalformedBody(String),

    #[error("malformed query string: {0}")]
    MalformedQuery(String),
}

/// A validated note that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNote {
    pub title: String,
    pub content: String,
}

impl NewNote {
    pub fn new(title: Option<String>, content: Option<String>) -> Result<Self, ValidationError> {
        Ok(Self {
            title: required("title", title)?,
            content: required("content", content)?,
        })
    }
}

/// A validated partial update. At least one field is set and every set field
/// is non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotePatch {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl NotePatch {
    pub fn new(title: Option<String>, content: Option<String>) -> Result<Self, ValidationError> {
        if title.is_none() && content.is_none() {
            return Err(ValidationError::NoUpdatableField);
        }

        Ok(Self {
            title: title.map(|t| non_empty("title", t)).transpose()?,
            content: content.map(|c| non_empty("content", c)).transpose()?,
        })
    }
}

fn required(field: &'static str, value: Option<String>) -> Result<String, ValidationError> {
    value
        .ok_or(ValidationError::Missing(field))
        .and_then(|v| non_empty(field, v))
}

fn non_empty(field: &'static str, value: String) -> Result<String, ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::Empty(field))
    } else if value.contains('\0') {
        // TEXT columns cannot store 0x00
        Err(ValidationError::NulCharacter(field))
    } else {
        Ok(value)
    }
}
