use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;
use ustr::Ustr;

/// Per-field validation messages, keyed by search field key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    messages: BTreeMap<Ustr, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: Ustr, message: impl Into<String>) {
        self.messages.insert(key, message.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.messages.get(&Ustr::from(key)).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn retain(&mut self, mut keep: impl FnMut(&Ustr) -> bool) {
        self.messages.retain(|key, _| keep(key));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Ustr, &str)> {
        self.messages.iter().map(|(key, message)| (key, message.as_str()))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (key, message) in &self.messages {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{key}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

/// Why a search or record form submission was rejected.
#[derive(Debug, Error)]
pub enum FormError {
    #[error("form has invalid fields: {0}")]
    Validation(ValidationErrors),
    #[error("search form is loading")]
    Loading,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unsupported label width {0:?}, expected a number or \"auto\"")]
    LabelWidth(String),
    #[error("page size {0} is not one of the pager options {1:?}")]
    PageSize(usize, &'static [usize]),
    #[error("unknown search layout {0:?}, expected \"horizontal\" or \"vertical\"")]
    Layout(String),
    #[error("sibling count {0} is larger than {1}")]
    SiblingCount(usize, usize),
}
