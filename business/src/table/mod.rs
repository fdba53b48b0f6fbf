//! Data table state and row projection.
//!
//! - `state`: paging, sorting, filters, column visibility, selection
//! - `view`: one frame of headers, rows and pager data
//! - `cell`: renderer-neutral cell nodes
//! - `actions`: row actions and their handlers

mod actions;
mod cell;
mod state;
mod view;

pub use actions::{ActionHandlers, RowAction};
pub use cell::{ActionButton, Cell};
pub use state::{DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS, SortDirection, SortState, TableState};
pub use view::{EMPTY_PLACEHOLDER, HeaderCell, RowView, TableBody, TableView};
