pub mod data_table;
pub mod pagination;
pub mod record_form;
pub mod search_form;
pub mod stat_card;

pub use data_table::{DataTableResponse, column_settings, data_table, render_badge, table_toolbar};
pub use pagination::{PagerAction, pagination};
pub use record_form::{RecordFormResponse, record_form_dialog};
pub use search_form::{SearchFormResponse, search_form, search_form_with_picker};
pub use stat_card::{StatCard, stat_cards};
