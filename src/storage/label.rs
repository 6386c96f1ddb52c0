//! Vertex label normalization.
//!
//! Creation and lookup both go through [`normalize_label`], so a label typed
//! in any letter case always resolves to the same vertex.

use std::fmt;
use std::ops::Deref;

use serde::Serialize;
use thiserror::Error;

/// Maximum number of characters in a normalized label.
pub const MAX_LABEL_LEN: usize = 16;

/// Reasons a raw label is rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LabelError {
    /// The label has no characters.
    #[error("label is empty")]
    Empty,
    /// The label exceeds [`MAX_LABEL_LEN`] characters.
    #[error("label has {len} characters, at most {MAX_LABEL_LEN} allowed")]
    TooLong {
        /// Character count of the rejected label.
        len: usize,
    },
    /// The label contains a character other than `A`-`Z` or `_`.
    #[error("illegal character {ch:?} at position {position}")]
    IllegalChar {
        /// Offending character after case folding.
        ch: char,
        /// Zero-based character position.
        position: usize,
    },
}

/// A validated, uppercase vertex label.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Label(String);

impl Label {
    /// Returns the label text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for Label {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for Label {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Label {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Case-folds `raw` to uppercase and validates the result.
pub fn normalize_label(raw: &str) -> Result<Label, LabelError> {
    let folded = raw.to_ascii_uppercase();
    let len = folded.chars().count();
    if len == 0 {
        return Err(LabelError::Empty);
    }
    if len > MAX_LABEL_LEN {
        return Err(LabelError::TooLong { len });
    }
    if let Some((position, ch)) = folded
        .chars()
        .enumerate()
        .find(|(_, ch)| !is_label_char(*ch))
    {
        return Err(LabelError::IllegalChar { ch, position });
    }
    Ok(Label(folded))
}

/// Returns `true` if `label` is already in normalized form.
pub fn is_normalized(label: &str) -> bool {
    !label.is_empty()
        && label.chars().count() <= MAX_LABEL_LEN
        && label.chars().all(is_label_char)
}

fn is_label_char(ch: char) -> bool {
    ch.is_ascii_uppercase() || ch == '_'
}
