//! Column-driven table and search engine for the Yishan admin console.
//!
//! This crate keeps the UI "dumb": pages author a set of [`ColumnDescriptor`]s,
//! and everything else is derived from them here:
//! - `search`: search fields, responsive layout, validation and form state
//! - `table`: table view state, row projection and row action dispatch
//! - `pagination`: pager page/ellipsis windowing
//! - `criteria`: submitted filter values and the default record predicate
//!
//! Rendering lives in `yishan-ui`, which only reads these types and reports
//! user input back through them.

mod column;
mod config;
mod criteria;
mod error;
mod pagination;
mod record;
mod status;

pub mod search;
pub mod table;

pub use column::{
    ACTIONS_COLUMN_ID, CellRenderer, ColumnDescriptor, EnumEntry, FieldProps, SELECT_COLUMN_ID,
    ValueEnum, ValueType,
};
pub use config::{AdminConfig, RawAdminConfig};
pub use criteria::{FieldValue, FilterCriteria};
pub use error::{ConfigError, FormError, ValidationErrors};
pub use pagination::{DEFAULT_SIBLING_COUNT, MAX_SIBLING_COUNT, PageItem, page_range};
pub use record::{CellValue, Record};
pub use status::{Status, StyleToken, status_to_style_token};
