//! Derivation of search fields from column descriptors.

use ustr::Ustr;

use crate::column::{ColumnDescriptor, SELECT_COLUMN_ID, ValueType};
use crate::search::schema::Validator;

/// Input control a search field is rendered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputKind {
    Input,
    Select,
    Textarea,
    Number,
    Password,
    Email,
    Tel,
    Url,
    Search,
    Date,
    DateTimeLocal,
    Time,
    Month,
    Week,
    Color,
    Range,
    Checkbox,
    Radio,
    File,
}

impl InputKind {
    /// Fixed value type → input kind table. Kinds without a dedicated input
    /// fall back to a plain text input.
    pub const fn from_value_type(value_type: ValueType) -> Self {
        match value_type {
            ValueType::Text => Self::Input,
            ValueType::Select => Self::Select,
            ValueType::Date | ValueType::DateTime | ValueType::DateRange => Self::Date,
            ValueType::Textarea => Self::Textarea,
            ValueType::Number => Self::Number,
            ValueType::Password => Self::Password,
            ValueType::Email => Self::Email,
            ValueType::Tel => Self::Tel,
            ValueType::Url => Self::Url,
            ValueType::Search => Self::Search,
            ValueType::DateTimeLocal => Self::DateTimeLocal,
            ValueType::Time => Self::Time,
            ValueType::Month => Self::Month,
            ValueType::Week => Self::Week,
            ValueType::Color => Self::Color,
            ValueType::Range => Self::Range,
            ValueType::Checkbox => Self::Checkbox,
            ValueType::Radio => Self::Radio,
            ValueType::File => Self::File,
            ValueType::Option | ValueType::Index | ValueType::IndexBorder => Self::Input,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

/// Form-ready description of one searchable input.
#[derive(Clone)]
pub struct SearchField {
    pub key: Ustr,
    pub label: String,
    pub input_kind: InputKind,
    pub options: Vec<SelectOption>,
    pub order: i32,
    pub col_size: u8,
    pub placeholder: Option<String>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub step: Option<f64>,
    pub multiple: bool,
    pub accept: Option<String>,
    pub rows: Option<usize>,
    pub disabled: bool,
    pub read_only: bool,
    pub required: bool,
    pub validator: Option<Validator>,
}

impl SearchField {
    pub fn new(key: &str, label: impl Into<String>, input_kind: InputKind) -> Self {
        Self {
            key: Ustr::from(key),
            label: label.into(),
            input_kind,
            options: Vec::new(),
            order: 0,
            col_size: 1,
            placeholder: None,
            min: None,
            max: None,
            step: None,
            multiple: false,
            accept: None,
            rows: None,
            disabled: false,
            read_only: false,
            required: false,
            validator: None,
        }
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Choices of a select or radio field as `(value, label)` pairs.
    #[must_use]
    pub fn with_options<V, L>(mut self, options: impl IntoIterator<Item = (V, L)>) -> Self
    where
        V: Into<String>,
        L: Into<String>,
    {
        self.options = options
            .into_iter()
            .map(|(value, label)| SelectOption {
                label: label.into(),
                value: value.into(),
            })
            .collect();
        self
    }

    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    #[must_use]
    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = Some(validator);
        self
    }

    /// Placeholder shown in an empty input: `请选择X` for choices, `请输入X`
    /// otherwise, unless the column supplied one.
    pub fn placeholder_text(&self) -> String {
        if let Some(placeholder) = &self.placeholder {
            return placeholder.clone();
        }
        match self.input_kind {
            InputKind::Select => format!("请选择{}", self.label),
            _ => format!("请输入{}", self.label),
        }
    }

    fn from_column<R>(key: Ustr, column: &ColumnDescriptor<R>) -> Self {
        let input_kind = if column.value_enum.is_some() {
            InputKind::Select
        } else {
            InputKind::from_value_type(column.value_type)
        };
        let options = column
            .value_enum
            .iter()
            .flat_map(|values| values.iter())
            .map(|(value, entry)| SelectOption {
                label: entry.text.clone(),
                value: value.to_owned(),
            })
            .collect();
        let label = if column.label.is_empty() {
            key.to_string()
        } else {
            column.label.clone()
        };
        let props = &column.field_props;

        Self {
            key,
            label,
            input_kind,
            options,
            order: column.order,
            col_size: column.col_size.filter(|size| *size > 0).unwrap_or(1),
            placeholder: props.placeholder.clone(),
            min: props.min,
            max: props.max,
            step: props.step,
            multiple: props.multiple,
            accept: props.accept.clone(),
            rows: props.rows,
            disabled: props.disabled,
            read_only: props.read_only,
            required: props.required,
            validator: props.validator.clone(),
        }
    }
}

impl std::fmt::Debug for SearchField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchField")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("input_kind", &self.input_kind)
            .field("options", &self.options)
            .field("order", &self.order)
            .field("col_size", &self.col_size)
            .field("required", &self.required)
            .finish_non_exhaustive()
    }
}

/// Derives the search form fields of a column set.
///
/// Columns hidden from search, the actions and selection columns, option
/// columns and columns without a data key are left out. The result is sorted
/// by descending `order`; equal orders keep their column order.
pub fn derive_fields<R>(columns: &[ColumnDescriptor<R>]) -> Vec<SearchField> {
    let mut fields: Vec<SearchField> = columns
        .iter()
        .filter(|column| is_searchable(column))
        .filter_map(|column| match column.data_key() {
            Some(key) => Some(SearchField::from_column(key, column)),
            None => {
                if cfg!(debug_assertions) {
                    log::warn!(
                        "column {:?} has no data key and is skipped by the search form",
                        column.label
                    );
                }
                None
            }
        })
        .collect();

    // `sort_by` is stable, so ties keep column order.
    fields.sort_by(|a, b| b.order.cmp(&a.order));
    fields
}

fn is_searchable<R>(column: &ColumnDescriptor<R>) -> bool {
    !column.hide_in_search
        && !column.is_actions()
        && column.id.is_none_or(|id| id != SELECT_COLUMN_ID)
        && column.value_type != ValueType::Option
}
