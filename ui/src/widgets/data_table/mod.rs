//! egui rendering of a [`TableView`].
//!
//! The table is split into smaller, focused components:
//! - `columns`: column definitions and widths
//! - `header`: header labels, sort buttons and column filters
//! - `row`: body rows
//! - `cells`: cell rendering for each `Cell` kind
//!
//! Clicks are collected into a [`DataTableResponse`] while the table is drawn
//! and applied once the frame's table iteration is over.

mod cells;
pub mod columns;
mod header;
mod row;

use std::hash::Hash;

use egui::{Align, Checkbox, Frame, Layout, Margin, RichText, Stroke, Ui};
use egui_extras::TableBuilder;
use ustr::Ustr;
use yishan_business::ColumnDescriptor;
use yishan_business::table::{ActionHandlers, RowAction, TableBody, TableState, TableView};

use self::columns::{PLACEHOLDER_HEIGHT, ROW_HEIGHT, header_height, table_columns};
use self::header::render_table_header;
use self::row::render_row;
use crate::utils::colors::{BORDER_COLOR, HEADER_BG_COLOR};

pub use self::cells::render_badge;

/// Everything the user did with the table this frame.
#[derive(Debug, Default)]
pub struct DataTableResponse {
    pub sort: Option<Ustr>,
    pub column_filters: Vec<(Ustr, String)>,
    /// Data indices of rows whose checkbox was clicked.
    pub toggled_rows: Vec<usize>,
    pub select_page: Option<bool>,
    /// Clicked action buttons with the data index of their row.
    pub actions: Vec<(RowAction, usize)>,
}

impl DataTableResponse {
    /// Applies header and selection changes to `state`, then dispatches the
    /// clicked actions to `handlers`. Returns how many actions had a handler.
    pub fn apply<R>(
        self,
        state: &mut TableState,
        view: &TableView,
        data: &[R],
        handlers: &ActionHandlers<R>,
    ) -> usize {
        if let Some(key) = self.sort {
            state.toggle_sort(key);
        }
        for (key, value) in self.column_filters {
            log::debug!("column filter {key} = {value:?}");
            state.set_column_filter(key, value);
        }
        for index in self.toggled_rows {
            state.toggle_selected(index);
        }
        match self.select_page {
            Some(true) => state.select_all(view.rows().iter().map(|row| row.index)),
            Some(false) => state.clear_selection(),
            None => {}
        }

        self.actions
            .into_iter()
            .filter_map(|(action, index)| data.get(index).map(|record| (action, record)))
            .filter(|(action, record)| handlers.dispatch(*action, record))
            .count()
    }
}

/// Draws `view` as a bordered table, or its header and a placeholder row
/// when the page is empty.
pub fn data_table(
    ui: &mut Ui,
    id_salt: impl Hash,
    view: &TableView,
    state: &TableState,
    selectable: bool,
) -> DataTableResponse {
    let mut response = DataTableResponse::default();
    let rows = view.rows();
    let page_selected =
        selectable.then(|| !rows.is_empty() && rows.iter().all(|row| row.selected));

    Frame::NONE
        .stroke(Stroke::new(1.0, BORDER_COLOR))
        .inner_margin(Margin::ZERO)
        .show(ui, |ui| {
            let mut table = TableBuilder::new(ui)
                .id_salt(id_salt)
                .striped(true)
                .vscroll(false)
                .cell_layout(Layout::left_to_right(Align::Center));
            for column in table_columns(&view.headers, selectable) {
                table = table.column(column);
            }

            table
                .header(header_height(&view.headers), |mut header| {
                    let result =
                        render_table_header(&mut header, &view.headers, state, page_selected);
                    response.sort = result.sort;
                    response.column_filters = result.filters;
                    response.select_page = result.select_page;
                })
                .body(|mut body| {
                    for row in rows {
                        body.row(ROW_HEIGHT, |mut table_row| {
                            let result = render_row(&mut table_row, row, selectable);
                            if result.toggle_selected {
                                response.toggled_rows.push(row.index);
                            }
                            if let Some(action) = result.action {
                                response.actions.push((action, row.index));
                            }
                        });
                    }
                });

            if let TableBody::Placeholder { text, .. } = &view.body {
                placeholder_row(ui, text);
            }
        });

    response
}

/// One row spanning the full table width.
fn placeholder_row(ui: &mut Ui, text: &str) {
    ui.allocate_ui_with_layout(
        egui::vec2(ui.available_width(), PLACEHOLDER_HEIGHT),
        Layout::centered_and_justified(egui::Direction::TopDown),
        |ui| {
            ui.weak(text);
        },
    );
}

/// A "列设置" menu with one checkbox per table column. Columns that cannot
/// be hidden are shown disabled.
pub fn column_settings<R>(ui: &mut Ui, columns: &[ColumnDescriptor<R>], state: &mut TableState) {
    let mut changes = Vec::new();
    ui.menu_button("列设置", |ui| {
        for (index, column) in columns.iter().enumerate() {
            if column.hide_in_table {
                continue;
            }
            let mut visible = state.is_column_visible(column.identifier());
            let checkbox = Checkbox::new(&mut visible, &column.label);
            if ui.add_enabled(column.can_hide(), checkbox).changed() {
                changes.push((index, visible));
            }
        }
    });

    for (index, visible) in changes {
        let column = &columns[index];
        if state.set_column_visible(column, visible) {
            log::debug!("column {} visible: {visible}", column.identifier());
        }
    }
}

/// Light gray toolbar strip above the table.
pub fn table_toolbar<R>(ui: &mut Ui, add_contents: impl FnOnce(&mut Ui) -> R) -> R {
    Frame::NONE
        .fill(HEADER_BG_COLOR)
        .inner_margin(Margin::symmetric(8, 6))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new("数据列表").strong());
                ui.with_layout(Layout::right_to_left(Align::Center), add_contents)
                    .inner
            })
            .inner
        })
        .inner
}
