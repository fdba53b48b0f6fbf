//! Submitted search values and the default record predicate.

use std::collections::BTreeMap;
use std::fmt;

use ustr::Ustr;

use crate::column::ColumnDescriptor;
use crate::record::{CellValue, Record};

/// The value held by one search input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
    Files(Vec<String>),
}

impl Default for FieldValue {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl FieldValue {
    /// Empty values are dropped from submitted criteria: blank or
    /// whitespace-only text, an unchecked flag, no files.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(text) => text.trim().is_empty(),
            Self::Flag(flag) => !flag,
            Self::Files(files) => files.is_empty(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Flag(flag) => write!(f, "{flag}"),
            Self::Files(files) => f.write_str(&files.join(", ")),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

/// Search field key → submitted value, without empty entries.
///
/// A new submission replaces the previous criteria wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    values: BTreeMap<Ustr, FieldValue>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds criteria from raw form values, dropping empty ones.
    pub fn from_values<K, I>(values: I) -> Self
    where
        K: Into<Ustr>,
        I: IntoIterator<Item = (K, FieldValue)>,
    {
        let values = values
            .into_iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(key, value)| (key.into(), value))
            .collect();
        Self { values }
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.values.get(&Ustr::from(key))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Ustr, &FieldValue)> {
        self.values.iter()
    }

    /// Default page predicate.
    ///
    /// Every criterion must hold. Columns with enumerated values match the raw
    /// value exactly, checkbox criteria match boolean cells, and everything
    /// else is a case-insensitive substring match. Criteria without a
    /// matching column, and file criteria, do not constrain.
    pub fn matches<R: Record>(&self, record: &R, columns: &[ColumnDescriptor<R>]) -> bool {
        self.values.iter().all(|(key, expected)| {
            let Some(column) = columns.iter().find(|c| c.data_key() == Some(*key)) else {
                return true;
            };
            let cell = record.cell(key);
            match expected {
                FieldValue::Text(expected) if column.value_enum.is_some() => {
                    cell.to_string() == *expected
                }
                FieldValue::Text(expected) => contains_ignore_case(&cell, expected),
                FieldValue::Flag(expected) => match cell {
                    CellValue::Bool(actual) => actual == *expected,
                    other => other.to_string() == expected.to_string(),
                },
                FieldValue::Files(_) => true,
            }
        })
    }

    /// Returns the records of `data` that satisfy [`Self::matches`].
    pub fn apply<'a, R: Record>(
        &self,
        data: &'a [R],
        columns: &[ColumnDescriptor<R>],
    ) -> Vec<&'a R> {
        data.iter()
            .filter(|record| self.matches(*record, columns))
            .collect()
    }
}

impl<K: Into<Ustr>> FromIterator<(K, FieldValue)> for FilterCriteria {
    fn from_iter<I: IntoIterator<Item = (K, FieldValue)>>(iter: I) -> Self {
        Self::from_values(iter)
    }
}

fn contains_ignore_case(cell: &CellValue, needle: &str) -> bool {
    cell.to_string()
        .to_lowercase()
        .contains(&needle.trim().to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::ValueEnum;
    use crate::status::Status;

    struct Position {
        name: &'static str,
        level: &'static str,
        remote: bool,
    }

    impl Record for Position {
        fn cell(&self, key: &str) -> CellValue {
            match key {
                "name" => self.name.into(),
                "level" => self.level.into(),
                "remote" => self.remote.into(),
                _ => CellValue::Null,
            }
        }
    }

    fn columns() -> Vec<ColumnDescriptor<Position>> {
        vec![
            ColumnDescriptor::new("name", "岗位名称"),
            ColumnDescriptor::new("level", "岗位级别").value_enum(
                ValueEnum::new()
                    .with("P1", "P1-初级", Status::Default)
                    .with("P10", "P10-专家", Status::Warning),
            ),
            ColumnDescriptor::new("remote", "远程"),
        ]
    }

    fn positions() -> Vec<Position> {
        vec![
            Position {
                name: "Frontend Engineer",
                level: "P1",
                remote: true,
            },
            Position {
                name: "Backend Engineer",
                level: "P10",
                remote: false,
            },
        ]
    }

    #[test]
    fn empty_values_are_dropped() {
        let criteria = FilterCriteria::from_values([
            ("name", FieldValue::from("张")),
            ("email", FieldValue::from("")),
            ("phone", FieldValue::from("   ")),
            ("remote", FieldValue::Flag(false)),
            ("avatar", FieldValue::Files(Vec::new())),
        ]);

        assert_eq!(criteria.len(), 1);
        assert_eq!(criteria.get("name"), Some(&FieldValue::from("张")));
    }

    #[test]
    fn text_matches_substring_ignoring_case() {
        let criteria = FilterCriteria::from_values([("name", FieldValue::from("frontend"))]);
        let data = positions();
        let matched = criteria.apply(&data, &columns());
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].name, "Frontend Engineer");
    }

    #[test]
    fn enum_values_match_exactly() {
        let criteria = FilterCriteria::from_values([("level", FieldValue::from("P1"))]);
        let data = positions();
        let matched = criteria.apply(&data, &columns());
        assert_eq!(matched.len(), 1, "P10 must not match P1");
        assert_eq!(matched[0].level, "P1");
    }

    #[test]
    fn flag_matches_bool_cells() {
        let criteria = FilterCriteria::from_values([("remote", FieldValue::Flag(true))]);
        let data = positions();
        let matched = criteria.apply(&data, &columns());
        assert_eq!(matched.len(), 1);
        assert!(matched[0].remote);
    }

    #[test]
    fn unknown_keys_do_not_constrain() {
        let criteria = FilterCriteria::from_values([("missing", FieldValue::from("x"))]);
        let data = positions();
        assert_eq!(criteria.apply(&data, &columns()).len(), 2);
    }

    #[test]
    fn all_criteria_must_hold() {
        let criteria = FilterCriteria::from_values([
            ("name", FieldValue::from("engineer")),
            ("level", FieldValue::from("P10")),
        ]);
        let data = positions();
        let matched = criteria.apply(&data, &columns());
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].name, "Backend Engineer");
    }
}
