//! Search form derived from column descriptors.
//!
//! - `field`: column → search field derivation
//! - `layout`: responsive 24-unit grid computations
//! - `schema`: per-field validation rules
//! - `form`: form values, collapse state, submit and reset
//! - `record_form`: create, edit and detail forms over the same field types

mod field;
mod form;
mod layout;
mod record_form;
mod schema;

pub use field::{InputKind, SearchField, SelectOption, derive_fields};
pub use form::{CollapseState, LabelWidth, SearchForm, SearchFormConfig, SearchFormHandlers};
pub use layout::{
    DEFAULT_CONTAINER_WIDTH, FixedWidth, GRID_COLUMNS, GridLayout, LayoutEngine, LayoutMode,
    WidthObserver, default_visible_count, layout, layout_with_span,
};
pub use record_form::{FormMode, FormValues, RecordForm};
pub use schema::{
    FieldRule, ValidationSchema, Validator, ValueShape, build_validation_schema, email_validator,
    identifier_validator,
};
