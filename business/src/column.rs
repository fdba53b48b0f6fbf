//! Column descriptors: the single source a page authors for both its table and
//! its search form.

use std::fmt;
use std::rc::Rc;

use serde::Deserialize;
use ustr::Ustr;

use crate::record::CellValue;
use crate::search::Validator;
use crate::status::Status;
use crate::table::{ActionHandlers, Cell};

/// Id of the conventional row actions column.
pub const ACTIONS_COLUMN_ID: &str = "actions";

/// Id of the row selection checkbox column.
pub const SELECT_COLUMN_ID: &str = "select";

/// How a column's values are typed. Drives the derived search input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValueType {
    #[default]
    Text,
    Select,
    Date,
    DateTime,
    DateRange,
    Time,
    /// Row operations; never searchable.
    Option,
    Index,
    IndexBorder,
    Textarea,
    Number,
    Password,
    Email,
    Tel,
    Url,
    Search,
    #[serde(rename = "datetime-local")]
    DateTimeLocal,
    Month,
    Week,
    Color,
    Range,
    Checkbox,
    Radio,
    File,
}

/// Display text and status of one enumerated raw value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumEntry {
    pub text: String,
    pub status: Status,
}

/// Raw value → label mapping, kept in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValueEnum {
    entries: Vec<(String, EnumEntry)>,
}

impl ValueEnum {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry. Re-declaring a value replaces its entry in place.
    #[must_use]
    pub fn with(
        mut self,
        value: impl Into<String>,
        text: impl Into<String>,
        status: Status,
    ) -> Self {
        let value = value.into();
        let entry = EnumEntry {
            text: text.into(),
            status,
        };
        match self.entries.iter_mut().find(|(existing, _)| *existing == value) {
            Some((_, slot)) => *slot = entry,
            None => self.entries.push((value, entry)),
        }
        self
    }

    pub fn get(&self, value: &str) -> Option<&EnumEntry> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == value)
            .map(|(_, entry)| entry)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &EnumEntry)> {
        self.entries.iter().map(|(value, entry)| (value.as_str(), entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Extra input properties forwarded to the derived search field.
#[derive(Clone, Default)]
pub struct FieldProps {
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

impl fmt::Debug for FieldProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldProps")
            .field("placeholder", &self.placeholder)
            .field("min", &self.min)
            .field("max", &self.max)
            .field("step", &self.step)
            .field("multiple", &self.multiple)
            .field("accept", &self.accept)
            .field("rows", &self.rows)
            .field("disabled", &self.disabled)
            .field("read_only", &self.read_only)
            .field("required", &self.required)
            .field("validator", &self.validator.is_some())
            .finish()
    }
}

/// Custom cell renderer: `(cell value, record, row index, action handlers)`.
pub type CellRenderer<R> = Rc<dyn Fn(&CellValue, &R, usize, &ActionHandlers<R>) -> Cell>;

/// Declarative description of one table column and its search eligibility.
pub struct ColumnDescriptor<R> {
    /// Column id for columns without a data binding, e.g. `actions`.
    pub id: Option<Ustr>,
    /// Record key the column reads; also the search field key.
    pub key: Option<Ustr>,
    pub label: String,
    pub value_type: ValueType,
    pub value_enum: Option<ValueEnum>,
    pub hide_in_search: bool,
    pub hide_in_table: bool,
    pub sortable: bool,
    pub filterable: bool,
    /// Search priority; higher values come first in the search form.
    pub order: i32,
    /// Grid units the search field occupies, relative to one regular field.
    pub col_size: Option<u8>,
    pub field_props: FieldProps,
    pub render: Option<CellRenderer<R>>,
}

impl<R> ColumnDescriptor<R> {
    /// A text column bound to `key`.
    pub fn new(key: &str, label: impl Into<String>) -> Self {
        Self {
            id: None,
            key: Some(Ustr::from(key)),
            label: label.into(),
            value_type: ValueType::Text,
            value_enum: None,
            hide_in_search: false,
            hide_in_table: false,
            sortable: false,
            filterable: false,
            order: 0,
            col_size: None,
            field_props: FieldProps::default(),
            render: None,
        }
    }

    /// The conventional operations column. Its renderer receives the table's
    /// action handlers.
    pub fn actions(
        label: impl Into<String>,
        render: impl Fn(&CellValue, &R, usize, &ActionHandlers<R>) -> Cell + 'static,
    ) -> Self {
        let mut column = Self::new("", label);
        column.id = Some(Ustr::from(ACTIONS_COLUMN_ID));
        column.key = None;
        column.value_type = ValueType::Option;
        column.hide_in_search = true;
        column.render = Some(Rc::new(render));
        column
    }

    #[must_use]
    pub fn id(mut self, id: &str) -> Self {
        self.id = Some(Ustr::from(id));
        self
    }

    #[must_use]
    pub fn value_type(mut self, value_type: ValueType) -> Self {
        self.value_type = value_type;
        self
    }

    #[must_use]
    pub fn value_enum(mut self, value_enum: ValueEnum) -> Self {
        self.value_enum = Some(value_enum);
        self
    }

    #[must_use]
    pub fn hide_in_search(mut self) -> Self {
        self.hide_in_search = true;
        self
    }

    #[must_use]
    pub fn hide_in_table(mut self) -> Self {
        self.hide_in_table = true;
        self
    }

    #[must_use]
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    #[must_use]
    pub fn filterable(mut self) -> Self {
        self.filterable = true;
        self
    }

    #[must_use]
    pub fn order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }

    #[must_use]
    pub fn col_size(mut self, col_size: u8) -> Self {
        self.col_size = Some(col_size);
        self
    }

    #[must_use]
    pub fn field_props(mut self, field_props: FieldProps) -> Self {
        self.field_props = field_props;
        self
    }

    #[must_use]
    pub fn render(
        mut self,
        render: impl Fn(&CellValue, &R, usize, &ActionHandlers<R>) -> Cell + 'static,
    ) -> Self {
        self.render = Some(Rc::new(render));
        self
    }

    /// The data key, if the column has a non-empty one.
    pub fn data_key(&self) -> Option<Ustr> {
        self.key.filter(|key| !key.is_empty())
    }

    /// Stable identifier: the explicit id, else the data key.
    pub fn identifier(&self) -> Ustr {
        self.id
            .or_else(|| self.data_key())
            .unwrap_or_else(|| Ustr::from(self.label.as_str()))
    }

    pub fn is_actions(&self) -> bool {
        self.id.is_some_and(|id| id == ACTIONS_COLUMN_ID)
    }

    /// Whether users may hide this column from the table.
    pub fn can_hide(&self) -> bool {
        !self.is_actions()
    }
}

impl<R> Clone for ColumnDescriptor<R> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            key: self.key,
            label: self.label.clone(),
            value_type: self.value_type,
            value_enum: self.value_enum.clone(),
            hide_in_search: self.hide_in_search,
            hide_in_table: self.hide_in_table,
            sortable: self.sortable,
            filterable: self.filterable,
            order: self.order,
            col_size: self.col_size,
            field_props: self.field_props.clone(),
            render: self.render.clone(),
        }
    }
}

impl<R> fmt::Debug for ColumnDescriptor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDescriptor")
            .field("id", &self.id)
            .field("key", &self.key)
            .field("label", &self.label)
            .field("value_type", &self.value_type)
            .field("value_enum", &self.value_enum)
            .field("hide_in_search", &self.hide_in_search)
            .field("hide_in_table", &self.hide_in_table)
            .field("sortable", &self.sortable)
            .field("filterable", &self.filterable)
            .field("order", &self.order)
            .field("col_size", &self.col_size)
            .field("field_props", &self.field_props)
            .field("render", &self.render.is_some())
            .finish()
    }
}
