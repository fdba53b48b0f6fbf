//! Projection of columns, records and table state into one renderable frame.

use ustr::Ustr;

use crate::column::{ColumnDescriptor, ValueType};
use crate::criteria::{FieldValue, FilterCriteria};
use crate::pagination::{PageItem, page_range};
use crate::record::{CellValue, Record};
use crate::search::SelectOption;
use crate::table::actions::ActionHandlers;
use crate::table::cell::Cell;
use crate::table::state::{SortDirection, TableState};

/// Text of the placeholder row of an empty table.
pub const EMPTY_PLACEHOLDER: &str = "暂无数据";

#[derive(Debug, Clone, PartialEq)]
pub struct HeaderCell {
    pub id: Ustr,
    pub key: Option<Ustr>,
    pub label: String,
    pub sortable: bool,
    pub sort: Option<SortDirection>,
    pub filterable: bool,
    /// Choices of a header filter over enumerated values. `None` means free text.
    pub filter_options: Option<Vec<SelectOption>>,
    pub is_actions: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowView {
    /// Index of the record in the data handed to [`TableView::build`].
    pub index: usize,
    /// One-based position across all filtered rows.
    pub number: usize,
    pub selected: bool,
    pub cells: Vec<Cell>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TableBody {
    Rows(Vec<RowView>),
    /// One row spanning every column.
    Placeholder { colspan: usize, text: &'static str },
}

/// Everything one frame of a data table shows.
#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    pub headers: Vec<HeaderCell>,
    pub body: TableBody,
    /// Rows left after filtering, across all pages.
    pub total_rows: usize,
    pub page_count: usize,
    /// Zero-based page shown, clamped to the last page.
    pub page_index: usize,
    pub page_size: usize,
    pub page_items: Vec<PageItem>,
    /// Data indices of every filtered row, in display order.
    pub filtered_rows: Vec<usize>,
}

impl TableView {
    /// Filters, sorts and pages `data`, then renders the visible page.
    ///
    /// Columns keep their supplied order. Cells use the column renderer when
    /// present, an enum badge for enumerated columns, the raw value otherwise.
    pub fn build<R: Record>(
        columns: &[ColumnDescriptor<R>],
        data: &[R],
        state: &TableState,
        handlers: &ActionHandlers<R>,
    ) -> Self {
        let visible: Vec<&ColumnDescriptor<R>> = columns
            .iter()
            .filter(|column| !column.hide_in_table && state.is_column_visible(column.identifier()))
            .collect();
        let headers: Vec<HeaderCell> = visible
            .iter()
            .map(|column| header_cell(column, state))
            .collect();

        let mut rows = filter_rows(columns, data, state);
        sort_rows(&mut rows, columns, data, state);

        let total_rows = rows.len();
        let page_size = state.page_size().max(1);
        let page_count = total_rows.div_ceil(page_size);
        let page_index = state.page_index().min(page_count.saturating_sub(1));
        let page_items = page_range(page_index + 1, page_count, state.sibling_count());

        let start = page_index * page_size;
        let page: Vec<RowView> = rows
            .iter()
            .enumerate()
            .skip(start)
            .take(page_size)
            .map(|(position, &index)| {
                let record = &data[index];
                let cells = visible
                    .iter()
                    .map(|column| render_cell(column, record, index, position, handlers))
                    .collect();
                RowView {
                    index,
                    number: position + 1,
                    selected: state.is_selected(index),
                    cells,
                }
            })
            .collect();

        let body = if page.is_empty() {
            TableBody::Placeholder {
                colspan: headers.len().max(1),
                text: EMPTY_PLACEHOLDER,
            }
        } else {
            TableBody::Rows(page)
        };

        Self {
            headers,
            body,
            total_rows,
            page_count,
            page_index,
            page_size,
            page_items,
            filtered_rows: rows,
        }
    }

    pub fn rows(&self) -> &[RowView] {
        match &self.body {
            TableBody::Rows(rows) => rows,
            TableBody::Placeholder { .. } => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.body, TableBody::Placeholder { .. })
    }

    pub fn can_previous(&self) -> bool {
        self.page_index > 0
    }

    pub fn can_next(&self) -> bool {
        self.page_index + 1 < self.page_count
    }

    /// Pager summary, e.g. `共42条`.
    pub fn total_label(&self) -> String {
        format!("共{}条", self.total_rows)
    }
}

fn header_cell<R>(column: &ColumnDescriptor<R>, state: &TableState) -> HeaderCell {
    let id = column.identifier();
    let key = column.data_key();
    let sortable = column.sortable && key.is_some();
    let filterable = column.filterable && key.is_some();
    let filter_options = column
        .value_enum
        .as_ref()
        .filter(|_| filterable)
        .map(|values| {
            values
                .iter()
                .map(|(value, entry)| SelectOption {
                    label: entry.text.clone(),
                    value: value.to_owned(),
                })
                .collect()
        });

    HeaderCell {
        id,
        key,
        label: column.label.clone(),
        sortable,
        sort: key
            .filter(|_| sortable)
            .and_then(|key| state.sort_direction(key)),
        filterable,
        filter_options,
        is_actions: column.is_actions(),
    }
}

fn filter_rows<R: Record>(
    columns: &[ColumnDescriptor<R>],
    data: &[R],
    state: &TableState,
) -> Vec<usize> {
    let header_filters: FilterCriteria = state
        .column_filters()
        .filter(|(key, _)| {
            columns
                .iter()
                .any(|column| column.filterable && column.data_key() == Some(*key))
        })
        .map(|(key, value)| (key, FieldValue::from(value)))
        .collect();

    data.iter()
        .enumerate()
        .filter(|(_, record)| {
            state.filter().matches(*record, columns) && header_filters.matches(*record, columns)
        })
        .map(|(index, _)| index)
        .collect()
}

fn sort_rows<R: Record>(
    rows: &mut [usize],
    columns: &[ColumnDescriptor<R>],
    data: &[R],
    state: &TableState,
) {
    let Some(sort) = state.sort() else {
        return;
    };
    let sortable = columns
        .iter()
        .any(|column| column.sortable && column.data_key() == Some(sort.key));
    if !sortable {
        return;
    }

    rows.sort_by(|&a, &b| {
        let ordering = data[a]
            .cell(&sort.key)
            .sort_cmp(&data[b].cell(&sort.key));
        match sort.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}

fn render_cell<R: Record>(
    column: &ColumnDescriptor<R>,
    record: &R,
    index: usize,
    position: usize,
    handlers: &ActionHandlers<R>,
) -> Cell {
    let value = match column.data_key() {
        Some(key) => record.cell(&key),
        None => CellValue::Null,
    };
    if let Some(render) = &column.render {
        return render(&value, record, index, handlers);
    }
    if matches!(column.value_type, ValueType::Index | ValueType::IndexBorder) {
        return Cell::text((position + 1).to_string());
    }
    match &column.value_enum {
        Some(values) if !value.is_null() => {
            let raw = value.to_string();
            match values.get(&raw) {
                Some(entry) => Cell::badge(entry.text.clone(), entry.status),
                None => Cell::Text(raw),
            }
        }
        _ => Cell::from_value(&value),
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::column::ValueEnum;
    use crate::status::{Status, StyleToken};
    use crate::table::{ActionButton, RowAction};

    #[derive(Debug)]
    struct User {
        name: &'static str,
        age: i64,
        status: &'static str,
    }

    impl Record for User {
        fn cell(&self, key: &str) -> CellValue {
            match key {
                "name" => self.name.into(),
                "age" => self.age.into(),
                "status" => self.status.into(),
                _ => CellValue::Null,
            }
        }
    }

    fn users(count: usize) -> Vec<User> {
        (0..count)
            .map(|i| User {
                name: if i % 2 == 0 { "张三" } else { "李四" },
                age: 20 + i as i64,
                status: if i % 3 == 0 { "inactive" } else { "active" },
            })
            .collect()
    }

    fn columns() -> Vec<ColumnDescriptor<User>> {
        vec![
            ColumnDescriptor::new("name", "姓名").sortable(),
            ColumnDescriptor::new("age", "年龄").sortable(),
            ColumnDescriptor::new("status", "状态").filterable().value_enum(
                ValueEnum::new()
                    .with("active", "启用", Status::Success)
                    .with("inactive", "禁用", Status::Error),
            ),
            ColumnDescriptor::actions("操作", |_, user: &User, _, _| {
                let toggle = if user.status == "active" {
                    RowAction::Disable
                } else {
                    RowAction::Enable
                };
                Cell::actions([ActionButton::new(RowAction::Edit), ActionButton::new(toggle)])
            }),
        ]
    }

    fn build(data: &[User], state: &TableState) -> TableView {
        TableView::build(&columns(), data, state, &ActionHandlers::new())
    }

    #[test]
    fn empty_data_renders_placeholder() {
        let view = build(&[], &TableState::new());
        assert_eq!(
            view.body,
            TableBody::Placeholder {
                colspan: 4,
                text: EMPTY_PLACEHOLDER
            }
        );
        assert_eq!(view.total_rows, 0);
        assert_eq!(view.page_count, 0);
        assert!(view.page_items.is_empty());
        assert!(!view.can_previous() && !view.can_next());
    }

    #[test]
    fn pages_filtered_rows() {
        let data = users(25);
        let mut state = TableState::new();
        state.set_page_index(2);
        let view = build(&data, &state);

        assert_eq!(view.total_rows, 25);
        assert_eq!(view.page_count, 3);
        assert_eq!(view.rows().len(), 5);
        assert_eq!(view.rows()[0].number, 21);
        assert!(view.can_previous());
        assert!(!view.can_next());
        assert_eq!(view.total_label(), "共25条");
    }

    #[test]
    fn page_index_is_clamped_when_rows_shrink() {
        let data = users(25);
        let mut state = TableState::new();
        state.set_page_index(2);
        state.set_column_filter(Ustr::from("status"), "inactive");
        state.set_page_index(2);

        let view = build(&data, &state);
        assert_eq!(view.total_rows, 9);
        assert_eq!(view.page_index, 0);
        assert_eq!(view.rows().len(), 9);
    }

    #[test]
    fn enum_columns_render_badges() {
        let data = users(1);
        let view = build(&data, &TableState::new());
        assert_eq!(
            view.rows()[0].cells[2],
            Cell::Badge {
                text: "禁用".to_owned(),
                token: StyleToken::Danger
            }
        );
    }

    #[test]
    fn unknown_enum_value_falls_back_to_raw_text() {
        let data = vec![User {
            name: "王五",
            age: 30,
            status: "locked",
        }];
        let view = build(&data, &TableState::new());
        assert_eq!(view.rows()[0].cells[2], Cell::text("locked"));
    }

    #[test]
    fn sorts_by_sortable_column() {
        let data = users(3);
        let mut state = TableState::new();
        state.toggle_sort(Ustr::from("age"));
        state.toggle_sort(Ustr::from("age"));
        let view = build(&data, &state);

        let ages: Vec<Cell> = view.rows().iter().map(|row| row.cells[1].clone()).collect();
        assert_eq!(ages, [Cell::text("22"), Cell::text("21"), Cell::text("20")]);
        assert_eq!(view.headers[1].sort, Some(SortDirection::Descending));
    }

    #[test]
    fn search_filter_applies() {
        let data = users(4);
        let mut state = TableState::new();
        state.set_filter(FilterCriteria::from_values([("name", FieldValue::from("张"))]));
        let view = build(&data, &state);
        assert_eq!(view.filtered_rows, [0, 2]);
    }

    #[test]
    fn padded_header_filter_matches_trimmed_text() {
        let data = users(4);
        let mut columns = columns();
        columns[0].filterable = true;
        let mut state = TableState::new();

        state.set_column_filter(Ustr::from("name"), " 张 ");
        let view = TableView::build(&columns, &data, &state, &ActionHandlers::new());
        assert_eq!(view.filtered_rows, [0, 2]);

        state.set_column_filter(Ustr::from("name"), "  ");
        let view = TableView::build(&columns, &data, &state, &ActionHandlers::new());
        assert_eq!(view.total_rows, 4, "blank text does not constrain");
    }

    #[test]
    fn hidden_columns_are_left_out() {
        let data = users(1);
        let mut columns = columns();
        columns[1].hide_in_table = true;
        let mut state = TableState::new();
        state.set_column_visible(&columns[0], false);

        let view = TableView::build(&columns, &data, &state, &ActionHandlers::new());
        let labels: Vec<&str> = view.headers.iter().map(|h| h.label.as_str()).collect();
        assert_eq!(labels, ["状态", "操作"]);
        assert!(view.headers[1].is_actions);
    }

    #[test]
    fn filterable_enum_headers_offer_options() {
        let view = build(&users(1), &TableState::new());
        let options = view.headers[2].filter_options.as_ref().expect("enum filter");
        assert_eq!(options.len(), 2);
        assert!(view.headers[0].filter_options.is_none());
    }

    #[test]
    fn action_renderer_receives_handlers() {
        let deleted = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&deleted);
        let handlers = ActionHandlers::new()
            .on(RowAction::Delete, move |user: &User| sink.borrow_mut().push(user.name));
        let columns = vec![ColumnDescriptor::actions(
            "操作",
            |_, user: &User, _, handlers: &ActionHandlers<User>| {
                handlers.dispatch(RowAction::Delete, user);
                Cell::Empty
            },
        )];

        let data = users(2);
        TableView::build(&columns, &data, &TableState::new(), &handlers);
        assert_eq!(*deleted.borrow(), ["张三", "李四"]);
    }
}
