//! Search form state: values, collapse state, submit and reset.
//!
//! The form owns everything a renderer needs for one frame and reports user
//! intent outward only through [`SearchFormHandlers`]. It never touches the
//! column set it was derived from.

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;
use ustr::Ustr;

use crate::column::ColumnDescriptor;
use crate::criteria::{FieldValue, FilterCriteria};
use crate::error::{ConfigError, FormError, ValidationErrors};
use crate::search::field::{SearchField, derive_fields};
use crate::search::layout::{
    GridLayout, LayoutEngine, LayoutMode, WidthObserver, default_visible_count,
};
use crate::search::schema::{ValidationSchema, build_validation_schema};

/// Label column width of horizontal forms.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "RawLabelWidth")]
pub enum LabelWidth {
    Auto,
    Px(f32),
}

impl Default for LabelWidth {
    fn default() -> Self {
        Self::Px(80.0)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawLabelWidth {
    Px(f32),
    Keyword(String),
}

impl TryFrom<RawLabelWidth> for LabelWidth {
    type Error = ConfigError;

    fn try_from(raw: RawLabelWidth) -> Result<Self, Self::Error> {
        match raw {
            RawLabelWidth::Px(px) if px.is_finite() && px >= 0.0 => Ok(Self::Px(px)),
            RawLabelWidth::Px(px) => Err(ConfigError::LabelWidth(px.to_string())),
            RawLabelWidth::Keyword(keyword) if keyword == "auto" => Ok(Self::Auto),
            RawLabelWidth::Keyword(keyword) => Err(ConfigError::LabelWidth(keyword)),
        }
    }
}

/// Options recognized by the search form.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchFormConfig {
    /// Initial collapse state of an uncontrolled form.
    pub default_collapsed: bool,
    /// Controlled collapse state. When set, toggling only reports through
    /// `on_collapse` and the host decides.
    pub collapsed: Option<bool>,
    pub layout: LayoutMode,
    pub label_width: LabelWidth,
    pub hide_required_mark: bool,
    /// Draw a divider between field rows.
    pub split: bool,
    /// Keep values of fields hidden by collapsing in submitted criteria.
    pub preserve: bool,
    /// Slots shown while collapsed, including the action group.
    pub default_cols_number: Option<usize>,
    /// Fixed grid span of each field in horizontal mode.
    pub span: Option<u8>,
    /// Disables submit and reset.
    pub loading: bool,
}

impl Default for SearchFormConfig {
    fn default() -> Self {
        Self {
            default_collapsed: true,
            collapsed: None,
            layout: LayoutMode::Horizontal,
            label_width: LabelWidth::default(),
            hide_required_mark: true,
            split: false,
            preserve: true,
            default_cols_number: None,
            span: None,
            loading: false,
        }
    }
}

type SearchCallback = Box<dyn FnMut(&FilterCriteria)>;
type ResetCallback = Box<dyn FnMut()>;
type CollapseCallback = Box<dyn FnMut(bool)>;

/// Optional callbacks of a search form. Absent callbacks are skipped.
#[derive(Default)]
pub struct SearchFormHandlers {
    on_search: Option<SearchCallback>,
    on_reset: Option<ResetCallback>,
    on_collapse: Option<CollapseCallback>,
}

impl SearchFormHandlers {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn on_search(mut self, f: impl FnMut(&FilterCriteria) + 'static) -> Self {
        self.on_search = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_reset(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_reset = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_collapse(mut self, f: impl FnMut(bool) + 'static) -> Self {
        self.on_collapse = Some(Box::new(f));
        self
    }
}

impl fmt::Debug for SearchFormHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchFormHandlers")
            .field("on_search", &self.on_search.is_some())
            .field("on_reset", &self.on_reset.is_some())
            .field("on_collapse", &self.on_collapse.is_some())
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollapseState {
    Collapsed,
    Expanded,
}

impl CollapseState {
    fn from_collapsed(collapsed: bool) -> Self {
        if collapsed {
            Self::Collapsed
        } else {
            Self::Expanded
        }
    }

    fn is_collapsed(self) -> bool {
        self == Self::Collapsed
    }
}

/// Search form derived from a column set.
#[derive(Debug)]
pub struct SearchForm {
    config: SearchFormConfig,
    fields: Vec<SearchField>,
    schema: ValidationSchema,
    values: BTreeMap<Ustr, FieldValue>,
    errors: ValidationErrors,
    collapse: CollapseState,
    layout: LayoutEngine,
    handlers: SearchFormHandlers,
}

impl SearchForm {
    pub fn new(config: SearchFormConfig) -> Self {
        let collapse = CollapseState::from_collapsed(config.default_collapsed);
        Self {
            config,
            fields: Vec::new(),
            schema: ValidationSchema::default(),
            values: BTreeMap::new(),
            errors: ValidationErrors::new(),
            collapse,
            layout: LayoutEngine::new(),
            handlers: SearchFormHandlers::new(),
        }
    }

    pub fn from_columns<R>(columns: &[ColumnDescriptor<R>], config: SearchFormConfig) -> Self {
        let mut form = Self::new(config);
        form.sync_columns(columns);
        form
    }

    #[must_use]
    pub fn with_handlers(mut self, handlers: SearchFormHandlers) -> Self {
        self.handlers = handlers;
        self
    }

    pub fn set_handlers(&mut self, handlers: SearchFormHandlers) {
        self.handlers = handlers;
    }

    /// Re-derives fields from `columns`.
    ///
    /// Called every frame. Values of fields that still exist are kept, values
    /// of removed fields are discarded and new fields start empty.
    pub fn sync_columns<R>(&mut self, columns: &[ColumnDescriptor<R>]) {
        self.fields = derive_fields(columns);
        self.schema = build_validation_schema(&self.fields);

        let previous = std::mem::take(&mut self.values);
        self.values = self
            .fields
            .iter()
            .map(|field| {
                let value = previous
                    .get(&field.key)
                    .cloned()
                    .unwrap_or_else(|| field.input_kind.value_shape().empty_value());
                (field.key, value)
            })
            .collect();
        let dropped = previous
            .keys()
            .filter(|key| !self.values.contains_key(*key))
            .count();
        if dropped > 0 {
            log::debug!("discarded {dropped} values of removed search fields");
        }

        let values = &self.values;
        self.errors.retain(|key| values.contains_key(key));
    }

    pub fn config(&self) -> &SearchFormConfig {
        &self.config
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.config.loading = loading;
    }

    pub fn is_loading(&self) -> bool {
        self.config.loading
    }

    /// Sets the controlled collapse state, or `None` to hand control back.
    pub fn set_controlled_collapsed(&mut self, collapsed: Option<bool>) {
        self.config.collapsed = collapsed;
    }

    pub fn fields(&self) -> &[SearchField] {
        &self.fields
    }

    pub fn schema(&self) -> &ValidationSchema {
        &self.schema
    }

    // =====================
    // Layout
    // =====================

    /// Pulls a container width measurement. Returns whether it changed.
    pub fn observe_width(&mut self, observer: &mut impl WidthObserver) -> bool {
        self.layout.observe(observer)
    }

    pub fn container_width(&self) -> f32 {
        self.layout.width()
    }

    pub fn grid(&self) -> GridLayout {
        self.layout.compute(self.config.layout, self.config.span)
    }

    /// Fields shown while collapsed.
    pub fn default_visible_count(&self) -> usize {
        default_visible_count(self.grid().fields_per_row, self.config.default_cols_number)
    }

    pub fn collapse_state(&self) -> CollapseState {
        match self.config.collapsed {
            Some(collapsed) => CollapseState::from_collapsed(collapsed),
            None => self.collapse,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapse_state().is_collapsed()
    }

    pub fn visible_count(&self) -> usize {
        if self.is_collapsed() {
            self.default_visible_count().min(self.fields.len())
        } else {
            self.fields.len()
        }
    }

    pub fn visible_fields(&self) -> &[SearchField] {
        &self.fields[..self.visible_count()]
    }

    /// Whether the expand/collapse toggle is shown.
    pub fn has_more_fields(&self) -> bool {
        self.fields.len() > self.default_visible_count()
    }

    pub fn action_span(&self) -> u8 {
        self.grid().action_span(self.visible_count())
    }

    /// Flips the collapse state and reports it through `on_collapse`.
    ///
    /// Returns the requested state. A controlled form does not change until
    /// the host updates it.
    pub fn toggle_collapsed(&mut self) -> bool {
        let collapsed = !self.is_collapsed();
        if self.config.collapsed.is_none() {
            self.collapse = CollapseState::from_collapsed(collapsed);
        }
        log::debug!("search form collapsed: {collapsed}");
        if let Some(on_collapse) = self.handlers.on_collapse.as_mut() {
            on_collapse(collapsed);
        }
        collapsed
    }

    // =====================
    // Values
    // =====================

    pub fn value(&self, key: &str) -> Option<&FieldValue> {
        self.values.get(&Ustr::from(key))
    }

    pub fn value_mut(&mut self, key: &str) -> Option<&mut FieldValue> {
        self.values.get_mut(&Ustr::from(key))
    }

    /// Sets a field value. Returns `false` for unknown keys.
    pub fn set_value(&mut self, key: &str, value: impl Into<FieldValue>) -> bool {
        match self.value_mut(key) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }

    pub fn error(&self, key: &str) -> Option<&str> {
        self.errors.get(key)
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Validates, cleans and reports the current values through `on_search`.
    ///
    /// Empty values are left out of the criteria. With `preserve` off, values
    /// of fields hidden by collapsing are left out too. While loading, or when
    /// a field fails its rule, nothing is reported.
    pub fn submit(&mut self) -> Result<FilterCriteria, FormError> {
        if self.config.loading {
            return Err(FormError::Loading);
        }

        if let Err(errors) = self.schema.validate(|key| self.values.get(&Ustr::from(key))) {
            log::debug!("search submit blocked: {errors}");
            self.errors = errors.clone();
            return Err(FormError::Validation(errors));
        }
        self.errors.clear();

        let submitted = if self.config.preserve {
            self.fields.len()
        } else {
            self.visible_count()
        };
        let criteria: FilterCriteria = self.fields[..submitted]
            .iter()
            .filter_map(|field| Some((field.key, self.values.get(&field.key)?.clone())))
            .collect();

        log::info!("search submitted with {} criteria", criteria.len());
        if let Some(on_search) = self.handlers.on_search.as_mut() {
            on_search(&criteria);
        }
        Ok(criteria)
    }

    /// Restores every field to its empty value and reports through `on_reset`.
    pub fn reset(&mut self) {
        for field in &self.fields {
            self.values
                .insert(field.key, field.input_kind.value_shape().empty_value());
        }
        self.errors.clear();
        log::info!("search form reset");
        if let Some(on_reset) = self.handlers.on_reset.as_mut() {
            on_reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::column::{FieldProps, ValueType};
    use crate::search::layout::FixedWidth;

    type Column = ColumnDescriptor<()>;

    fn columns(orders: &[i32]) -> Vec<Column> {
        orders
            .iter()
            .enumerate()
            .map(|(i, order)| Column::new(&format!("f{i}"), format!("字段{i}")).order(*order))
            .collect()
    }

    fn form_at(width: f32, columns: &[Column], config: SearchFormConfig) -> SearchForm {
        let mut form = SearchForm::from_columns(columns, config);
        form.observe_width(&mut FixedWidth(width));
        form
    }

    #[test]
    fn collapsed_form_shows_highest_order_fields() {
        let form = form_at(1400.0, &columns(&[4, 3, 2, 1, 0]), SearchFormConfig::default());

        assert!(form.is_collapsed(), "forms start collapsed");
        assert_eq!(form.default_visible_count(), 3);
        let visible: Vec<&str> = form.visible_fields().iter().map(|f| f.key.as_str()).collect();
        assert_eq!(visible, ["f0", "f1", "f2"]);
        assert!(form.has_more_fields(), "5 fields > 3 visible");
        assert_eq!(form.action_span(), 6);
    }

    #[test]
    fn toggle_expands_and_reports() {
        let reported = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&reported);
        let mut form = form_at(1400.0, &columns(&[4, 3, 2, 1, 0]), SearchFormConfig::default())
            .with_handlers(
                SearchFormHandlers::new().on_collapse(move |c| sink.borrow_mut().push(c)),
            );

        assert!(!form.toggle_collapsed());
        assert_eq!(form.visible_count(), 5);
        assert_eq!(form.action_span(), 18, "one field on the second row");
        assert!(form.toggle_collapsed());
        assert_eq!(*reported.borrow(), [false, true]);
    }

    #[test]
    fn controlled_form_waits_for_host() {
        let config = SearchFormConfig {
            collapsed: Some(true),
            ..SearchFormConfig::default()
        };
        let mut form = form_at(1400.0, &columns(&[4, 3, 2, 1, 0]), config);

        assert!(!form.toggle_collapsed(), "requests expansion");
        assert!(form.is_collapsed(), "host has not updated yet");

        form.set_controlled_collapsed(Some(false));
        assert_eq!(form.visible_count(), 5);
    }

    #[test]
    fn no_toggle_when_everything_fits() {
        let form = form_at(1400.0, &columns(&[1, 0]), SearchFormConfig::default());
        assert!(!form.has_more_fields());
        assert_eq!(form.visible_count(), 2);
    }

    #[test]
    fn default_cols_number_overrides_responsive_count() {
        let config = SearchFormConfig {
            default_cols_number: Some(2),
            ..SearchFormConfig::default()
        };
        let form = form_at(1400.0, &columns(&[4, 3, 2]), config);
        assert_eq!(form.default_visible_count(), 1);
        assert_eq!(form.visible_count(), 1);
    }

    #[test]
    fn empty_submit_reports_no_criteria() {
        let seen = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&seen);
        let mut form = SearchForm::from_columns(&columns(&[1, 0]), SearchFormConfig::default())
            .with_handlers(
                SearchFormHandlers::new().on_search(move |c| *sink.borrow_mut() = Some(c.clone())),
            );

        let criteria = form.submit().expect("empty form is valid");
        assert!(criteria.is_empty());
        assert_eq!(*seen.borrow(), Some(FilterCriteria::new()));
    }

    #[test]
    fn submit_keeps_only_filled_values() {
        let columns = vec![
            Column::new("name", "姓名"),
            Column::new("email", "邮箱"),
            Column::new("department", "部门").value_type(ValueType::Select),
        ];
        let mut form = SearchForm::from_columns(&columns, SearchFormConfig::default());
        assert!(form.set_value("name", "张"));
        assert!(form.set_value("email", "  "));

        let criteria = form.submit().expect("valid");
        assert_eq!(
            criteria,
            FilterCriteria::from_values([("name", FieldValue::from("张"))])
        );
    }

    #[test]
    fn required_field_blocks_submit() {
        let columns = vec![Column::new("username", "用户名").field_props(FieldProps {
            required: true,
            ..FieldProps::default()
        })];
        let called = Rc::new(RefCell::new(false));
        let sink = Rc::clone(&called);
        let mut form = SearchForm::from_columns(&columns, SearchFormConfig::default())
            .with_handlers(SearchFormHandlers::new().on_search(move |_| *sink.borrow_mut() = true));

        let err = form.submit().expect_err("required field is empty");
        assert!(matches!(err, FormError::Validation(_)));
        assert_eq!(form.error("username"), Some("用户名不能为空"));
        assert!(!*called.borrow(), "on_search must not run");

        form.set_value("username", "admin");
        assert!(form.submit().is_ok());
        assert!(form.error("username").is_none(), "error cleared after success");
    }

    #[test]
    fn loading_blocks_submit() {
        let mut form = SearchForm::from_columns(&columns(&[0]), SearchFormConfig::default());
        form.set_loading(true);
        assert!(matches!(form.submit(), Err(FormError::Loading)));
    }

    #[test]
    fn without_preserve_collapsed_values_are_dropped() {
        let config = SearchFormConfig {
            preserve: false,
            ..SearchFormConfig::default()
        };
        let mut form = form_at(1400.0, &columns(&[4, 3, 2, 1, 0]), config);
        form.set_value("f0", "visible");
        form.set_value("f4", "hidden");

        let criteria = form.submit().expect("valid");
        assert!(criteria.get("f0").is_some());
        assert!(criteria.get("f4").is_none(), "f4 is collapsed away");

        form.toggle_collapsed();
        assert!(form.submit().expect("valid").get("f4").is_some());
    }

    #[test]
    fn reset_clears_values_and_reports() {
        let resets = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&resets);
        let mut form = SearchForm::from_columns(&columns(&[1, 0]), SearchFormConfig::default())
            .with_handlers(SearchFormHandlers::new().on_reset(move || *sink.borrow_mut() += 1));
        form.set_value("f0", "x");

        form.reset();
        assert_eq!(form.value("f0"), Some(&FieldValue::from("")));
        assert_eq!(*resets.borrow(), 1);
    }

    #[test]
    fn sync_discards_values_of_removed_fields() {
        let mut form = SearchForm::from_columns(&columns(&[1, 0]), SearchFormConfig::default());
        form.set_value("f0", "kept");
        form.set_value("f1", "dropped");

        form.sync_columns(&columns(&[1]));
        assert_eq!(form.fields().len(), 1);
        assert_eq!(form.value("f0"), Some(&FieldValue::from("kept")));
        assert!(form.value("f1").is_none());

        form.sync_columns(&columns(&[1, 0]));
        assert_eq!(form.value("f1"), Some(&FieldValue::from("")), "re-added field starts empty");
    }

    #[test]
    fn checkbox_fields_start_unchecked() {
        let columns = vec![Column::new("remote", "远程").value_type(ValueType::Checkbox)];
        let form = SearchForm::from_columns(&columns, SearchFormConfig::default());
        assert_eq!(form.value("remote"), Some(&FieldValue::Flag(false)));
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let raw = r#"{"layout":"vertical","labelWidth":"auto","defaultColsNumber":4}"#;
        let config: SearchFormConfig = serde_json::from_str(raw).expect("config should parse");

        assert_eq!(config.layout, LayoutMode::Vertical);
        assert_eq!(config.label_width, LabelWidth::Auto);
        assert_eq!(config.default_cols_number, Some(4));
        assert!(config.default_collapsed);
        assert!(config.preserve);
        assert!(config.hide_required_mark);

        let px: SearchFormConfig =
            serde_json::from_str(r#"{"labelWidth":120}"#).expect("numeric label width");
        assert_eq!(px.label_width, LabelWidth::Px(120.0));

        assert!(
            serde_json::from_str::<SearchFormConfig>(r#"{"labelWidth":"wide"}"#).is_err(),
            "unknown keyword"
        );
    }
}
