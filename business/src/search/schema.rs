//! Validation rules for search form values.

use std::fmt;
use std::rc::Rc;

use ustr::Ustr;

use crate::criteria::FieldValue;
use crate::error::ValidationErrors;
use crate::search::field::{InputKind, SearchField};

/// Custom field check. `Err` carries the message shown under the input.
pub type Validator = Rc<dyn Fn(&FieldValue) -> Result<(), String>>;

/// What kind of value an input produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueShape {
    Text,
    Choice,
    Toggle,
    Files,
}

impl ValueShape {
    /// The value a field of this shape starts from and resets to.
    pub fn empty_value(self) -> FieldValue {
        match self {
            Self::Text | Self::Choice => FieldValue::Text(String::new()),
            Self::Toggle => FieldValue::Flag(false),
            Self::Files => FieldValue::Files(Vec::new()),
        }
    }
}

impl InputKind {
    pub const fn value_shape(self) -> ValueShape {
        match self {
            Self::Select | Self::Radio => ValueShape::Choice,
            Self::Checkbox => ValueShape::Toggle,
            Self::File => ValueShape::Files,
            Self::Input
            | Self::Textarea
            | Self::Number
            | Self::Password
            | Self::Email
            | Self::Tel
            | Self::Url
            | Self::Search
            | Self::Date
            | Self::DateTimeLocal
            | Self::Time
            | Self::Month
            | Self::Week
            | Self::Color
            | Self::Range => ValueShape::Text,
        }
    }
}

#[derive(Clone)]
pub enum FieldRule {
    /// Field-supplied check; replaces the default rule.
    Custom(Validator),
    /// Must not be empty.
    Required { message: String },
    Optional,
}

impl FieldRule {
    pub fn check(&self, value: &FieldValue) -> Result<(), String> {
        match self {
            Self::Custom(validator) => validator(value),
            Self::Required { message } if value.is_empty() => Err(message.clone()),
            Self::Required { .. } | Self::Optional => Ok(()),
        }
    }
}

impl fmt::Debug for FieldRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Custom(_) => f.write_str("Custom(..)"),
            Self::Required { message } => {
                f.debug_struct("Required").field("message", message).finish()
            }
            Self::Optional => f.write_str("Optional"),
        }
    }
}

/// Validation rules of a form, one per field, in field order.
#[derive(Debug, Clone, Default)]
pub struct ValidationSchema {
    rules: Vec<(Ustr, ValueShape, FieldRule)>,
}

impl ValidationSchema {
    pub fn rule(&self, key: &str) -> Option<&FieldRule> {
        self.rules
            .iter()
            .find(|(rule_key, _, _)| rule_key == key)
            .map(|(_, _, rule)| rule)
    }

    pub fn shape(&self, key: &str) -> Option<ValueShape> {
        self.rules
            .iter()
            .find(|(rule_key, _, _)| rule_key == key)
            .map(|(_, shape, _)| *shape)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Checks every field; a missing value counts as the field's empty value.
    pub fn validate<'a>(
        &self,
        mut value_of: impl FnMut(&str) -> Option<&'a FieldValue>,
    ) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        for (key, shape, rule) in &self.rules {
            let empty;
            let value = match value_of(key) {
                Some(value) => value,
                None => {
                    empty = shape.empty_value();
                    &empty
                }
            };
            if let Err(message) = rule.check(value) {
                errors.insert(*key, message);
            }
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Builds the rule set of `fields`.
///
/// A field's own validator wins; otherwise required fields must be non-empty
/// and all others are optional. A blank required choice reads `请选择X`, any
/// other blank required field `X不能为空`.
pub fn build_validation_schema(fields: &[SearchField]) -> ValidationSchema {
    let rules = fields
        .iter()
        .map(|field| {
            let rule = match (&field.validator, field.required) {
                (Some(validator), _) => FieldRule::Custom(Rc::clone(validator)),
                (None, true) => FieldRule::Required {
                    message: required_message(field),
                },
                (None, false) => FieldRule::Optional,
            };
            (field.key, field.input_kind.value_shape(), rule)
        })
        .collect();
    ValidationSchema { rules }
}

fn required_message(field: &SearchField) -> String {
    match field.input_kind.value_shape() {
        ValueShape::Choice => format!("请选择{}", field.label),
        _ => format!("{}不能为空", field.label),
    }
}

/// Rejects text not shaped like `name@domain.tld`, blank text included.
pub fn email_validator(message: impl Into<String>) -> Validator {
    let message = message.into();
    Rc::new(move |value| {
        if is_email(value.as_text().unwrap_or_default().trim()) {
            Ok(())
        } else {
            Err(message.clone())
        }
    })
}

fn is_email(text: &str) -> bool {
    let Some((local, domain)) = text.split_once('@') else {
        return false;
    };
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !local.is_empty()
        && !host.is_empty()
        && !tld.is_empty()
        && !domain.contains('@')
        && !text.chars().any(char::is_whitespace)
}

/// Requires non-blank text of ASCII letters, digits and `_`.
pub fn identifier_validator(empty: impl Into<String>, invalid: impl Into<String>) -> Validator {
    let empty = empty.into();
    let invalid = invalid.into();
    Rc::new(move |value| {
        let text = value.as_text().unwrap_or_default().trim();
        if text.is_empty() {
            Err(empty.clone())
        } else if text.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            Ok(())
        } else {
            Err(invalid.clone())
        }
    })
}
