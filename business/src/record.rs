//! Cell access for records shown in a column-driven table.

use std::cmp::Ordering;
use std::fmt;

/// A single cell value read from a record.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Null,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    fn as_number(&self) -> Option<f64> {
        match self {
            Self::Int(value) => Some(*value as f64),
            Self::Float(value) => Some(*value),
            _ => None,
        }
    }

    /// Ordering used by column sorting.
    ///
    /// Nulls sort first, numbers compare numerically, and any other mix of
    /// kinds compares by display text.
    pub fn sort_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Null, Self::Null) => Ordering::Equal,
            (Self::Null, _) => Ordering::Less,
            (_, Self::Null) => Ordering::Greater,
            (Self::Int(a), Self::Int(b)) => a.cmp(b),
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            _ => match (self.as_number(), other.as_number()) {
                (Some(a), Some(b)) => a.total_cmp(&b),
                _ => self.to_string().cmp(&other.to_string()),
            },
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Text(text) => f.write_str(text),
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Bool(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&String> for CellValue {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u32> for CellValue {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl<T: Into<Self>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// A row that can be displayed by column key.
///
/// Unknown keys return [`CellValue::Null`].
pub trait Record {
    fn cell(&self, key: &str) -> CellValue;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nulls_sort_first() {
        assert_eq!(CellValue::Null.sort_cmp(&"a".into()), Ordering::Less);
        assert_eq!(CellValue::from(1_i64).sort_cmp(&CellValue::Null), Ordering::Greater);
    }

    #[test]
    fn numbers_compare_numerically() {
        assert_eq!(
            CellValue::Int(9).sort_cmp(&CellValue::Int(10)),
            Ordering::Less,
            "9 < 10 even though \"9\" > \"10\""
        );
        assert_eq!(CellValue::Int(2).sort_cmp(&CellValue::Float(1.5)), Ordering::Greater);
    }

    #[test]
    fn display_is_raw_value() {
        assert_eq!(CellValue::from("张三").to_string(), "张三");
        assert_eq!(CellValue::from(12_u32).to_string(), "12");
        assert_eq!(CellValue::Null.to_string(), "");
        assert_eq!(CellValue::from(None::<&str>), CellValue::Null);
    }
}
