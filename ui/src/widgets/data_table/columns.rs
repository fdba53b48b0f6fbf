//! Column widths of the data table.

use egui_extras::Column;
use yishan_business::table::HeaderCell;

pub const SELECT_WIDTH: f32 = 32.0;
pub const COLUMN_WIDTH: f32 = 120.0;
pub const MIN_COLUMN_WIDTH: f32 = 60.0;
pub const ACTIONS_MIN_WIDTH: f32 = 160.0;
pub const ROW_HEIGHT: f32 = 32.0;
pub const HEADER_HEIGHT: f32 = 30.0;
/// Header height when a column filter sits under the labels.
pub const FILTER_HEADER_HEIGHT: f32 = 58.0;
pub const PLACEHOLDER_HEIGHT: f32 = 64.0;

/// Table column configuration for `headers`:
/// - selection checkbox (fixed, only when rows are selectable)
/// - data columns (resizable, clipped)
/// - actions column (sized to its buttons)
///
/// The last data column fills the remaining space.
pub fn table_columns(headers: &[HeaderCell], selectable: bool) -> Vec<Column> {
    let mut columns = Vec::with_capacity(headers.len() + 1);
    if selectable {
        columns.push(Column::exact(SELECT_WIDTH));
    }

    let last_data = headers.iter().rposition(|header| !header.is_actions);
    for (index, header) in headers.iter().enumerate() {
        let column = if header.is_actions {
            Column::auto().at_least(ACTIONS_MIN_WIDTH)
        } else if Some(index) == last_data {
            Column::remainder().at_least(MIN_COLUMN_WIDTH).clip(true)
        } else {
            Column::initial(COLUMN_WIDTH)
                .at_least(MIN_COLUMN_WIDTH)
                .resizable(true)
                .clip(true)
        };
        columns.push(column);
    }
    columns
}

/// Header height fitting the tallest header cell.
pub fn header_height(headers: &[HeaderCell]) -> f32 {
    if headers.iter().any(|header| header.filterable) {
        FILTER_HEADER_HEIGHT
    } else {
        HEADER_HEIGHT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ustr::Ustr;

    fn header(key: &str, is_actions: bool, filterable: bool) -> HeaderCell {
        HeaderCell {
            id: Ustr::from(key),
            key: (!is_actions).then(|| Ustr::from(key)),
            label: key.to_owned(),
            sortable: false,
            sort: None,
            filterable,
            filter_options: None,
            is_actions,
        }
    }

    #[test]
    fn one_column_per_header_plus_selection() {
        let headers = [header("name", false, false), header("actions", true, false)];
        assert_eq!(table_columns(&headers, false).len(), 2);
        assert_eq!(table_columns(&headers, true).len(), 3);
        assert!(table_columns(&[], false).is_empty());
    }

    #[test]
    fn filters_make_the_header_taller() {
        assert_eq!(header_height(&[header("name", false, false)]), HEADER_HEIGHT);
        assert_eq!(
            header_height(&[header("status", false, true)]),
            FILTER_HEADER_HEIGHT
        );
    }
}
