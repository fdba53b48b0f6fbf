//! Create and edit forms for a single record.
//!
//! A [`RecordForm`] reuses the search field descriptions and validation
//! rules, but keeps every value on submit: clearing an optional field is a
//! real edit, not a missing criterion.

use std::collections::BTreeMap;

use ustr::Ustr;

use crate::criteria::FieldValue;
use crate::error::{FormError, ValidationErrors};
use crate::search::field::SearchField;
use crate::search::schema::{ValidationSchema, build_validation_schema};

/// What saving the form does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(u32),
    /// Read-only details; nothing is saved.
    View(u32),
}

impl FormMode {
    /// Id of the record the form was opened on.
    pub fn record_id(self) -> Option<u32> {
        match self {
            Self::Create => None,
            Self::Edit(id) | Self::View(id) => Some(id),
        }
    }
}

/// Values of a submitted [`RecordForm`], empty ones included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    values: BTreeMap<Ustr, FieldValue>,
}

impl FormValues {
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.values.get(&Ustr::from(key))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(&Ustr::from(key))
    }

    /// Trimmed text of `key`; empty when the field is missing or not text.
    pub fn text(&self, key: &str) -> String {
        self.get(key)
            .and_then(FieldValue::as_text)
            .map(|text| text.trim().to_owned())
            .unwrap_or_default()
    }

    /// Trimmed text of `key`, or `fallback` when the form has no such field.
    pub fn text_or(&self, key: &str, fallback: &str) -> String {
        if self.contains(key) {
            self.text(key)
        } else {
            fallback.to_owned()
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[derive(Debug)]
pub struct RecordForm {
    mode: FormMode,
    title: Option<String>,
    fields: Vec<SearchField>,
    schema: ValidationSchema,
    values: BTreeMap<Ustr, FieldValue>,
    errors: ValidationErrors,
}

impl RecordForm {
    pub fn new(mode: FormMode, fields: Vec<SearchField>) -> Self {
        let schema = build_validation_schema(&fields);
        let values = fields
            .iter()
            .map(|field| (field.key, field.input_kind.value_shape().empty_value()))
            .collect();
        Self {
            mode,
            title: None,
            fields,
            schema,
            values,
            errors: ValidationErrors::new(),
        }
    }

    pub fn create(fields: Vec<SearchField>) -> Self {
        Self::new(FormMode::Create, fields)
    }

    pub fn edit(id: u32, fields: Vec<SearchField>) -> Self {
        Self::new(FormMode::Edit(id), fields)
    }

    pub fn view(id: u32, fields: Vec<SearchField>) -> Self {
        Self::new(FormMode::View(id), fields)
    }

    /// Prefills fields. Keys the form does not have are ignored.
    #[must_use]
    pub fn with_values<K, V>(mut self, values: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: Into<FieldValue>,
    {
        for (key, value) in values {
            if let Some(slot) = self.values.get_mut(&Ustr::from(key.as_ref())) {
                *slot = value.into();
            }
        }
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn is_read_only(&self) -> bool {
        matches!(self.mode, FormMode::View(_))
    }

    pub fn fields(&self) -> &[SearchField] {
        &self.fields
    }

    pub fn value(&self, key: &str) -> Option<&FieldValue> {
        self.values.get(&Ustr::from(key))
    }

    /// Sets a field value and clears its error. Returns `false` for unknown
    /// keys and on read-only forms.
    pub fn set_value(&mut self, key: &str, value: impl Into<FieldValue>) -> bool {
        if self.is_read_only() {
            return false;
        }
        let key = Ustr::from(key);
        let Some(slot) = self.values.get_mut(&key) else {
            return false;
        };
        *slot = value.into();
        self.errors.retain(|error_key| *error_key != key);
        true
    }

    pub fn error(&self, key: &str) -> Option<&str> {
        self.errors.get(key)
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Validates every field and returns all values when they pass.
    ///
    /// On failure the messages stay on the form until the field is edited or
    /// the form is submitted again.
    pub fn submit(&mut self) -> Result<FormValues, FormError> {
        if let Err(errors) = self.schema.validate(|key| self.values.get(&Ustr::from(key))) {
            log::debug!("record form blocked: {errors}");
            self.errors = errors.clone();
            return Err(FormError::Validation(errors));
        }
        self.errors.clear();
        Ok(FormValues {
            values: self.values.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::field::InputKind;
    use crate::search::schema::email_validator;

    fn user_fields() -> Vec<SearchField> {
        vec![
            SearchField::new("username", "用户名", InputKind::Input).required(),
            SearchField::new("email", "邮箱", InputKind::Email)
                .with_validator(email_validator("请输入有效的邮箱地址")),
            SearchField::new("status", "状态", InputKind::Select)
                .required()
                .with_options([("active", "启用"), ("inactive", "禁用")]),
            SearchField::new("remark", "备注", InputKind::Textarea),
        ]
    }

    #[test]
    fn blank_required_fields_are_reported() {
        let mut form = RecordForm::create(user_fields()).with_values([("status", "active")]);
        let err = form.submit().expect_err("username and email are missing");
        let FormError::Validation(errors) = err else {
            panic!("unexpected error {err:?}");
        };
        assert_eq!(errors.get("username"), Some("用户名不能为空"));
        assert_eq!(errors.get("email"), Some("请输入有效的邮箱地址"));
        assert_eq!(errors.len(), 2);
        assert_eq!(form.error("username"), Some("用户名不能为空"));
    }

    #[test]
    fn editing_a_field_clears_its_error() {
        let mut form = RecordForm::create(user_fields());
        form.submit().expect_err("empty form");
        assert!(form.set_value("username", "zhouba"));
        assert!(form.error("username").is_none());
        assert!(form.error("email").is_some());
        assert!(!form.set_value("unknown", "x"));
    }

    #[test]
    fn submit_keeps_empty_optional_values() {
        let mut form = RecordForm::edit(3, user_fields()).with_values([
            ("username", " lisi "),
            ("email", "lisi@yishan.com"),
            ("status", "inactive"),
            ("phone", "ignored"),
        ]);
        let values = form.submit().expect("valid form");
        assert_eq!(form.mode(), FormMode::Edit(3));
        assert_eq!(values.text("username"), "lisi");
        assert_eq!(values.get("remark"), Some(&FieldValue::from("")));
        assert!(!values.contains("phone"));
        assert_eq!(values.text_or("phone", "13800138002"), "13800138002");
    }

    #[test]
    fn view_forms_are_read_only() {
        let mut form = RecordForm::view(1, user_fields()).with_values([("username", "admin")]);
        assert!(form.is_read_only());
        assert!(!form.set_value("username", "root"));
        assert_eq!(form.value("username"), Some(&FieldValue::from("admin")));
        assert_eq!(form.mode().record_id(), Some(1));
    }
}
