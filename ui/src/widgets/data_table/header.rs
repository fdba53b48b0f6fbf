//! Table header rendering: labels, sort buttons and column filters.

use egui::{ComboBox, RichText, TextEdit, Ui};
use egui_extras::TableRow;
use ustr::Ustr;
use yishan_business::table::{HeaderCell, SortDirection, TableState};

const FILTER_ALL: &str = "全部";

/// What the user changed in the header this frame.
#[derive(Debug, Default)]
pub struct HeaderResult {
    /// Data key whose sort should advance.
    pub sort: Option<Ustr>,
    pub filters: Vec<(Ustr, String)>,
    /// Select or clear every row of the page.
    pub select_page: Option<bool>,
}

/// Renders the header row.
///
/// `page_selected` is `Some` when rows are selectable and tells whether the
/// whole page is selected.
pub fn render_table_header(
    header: &mut TableRow<'_, '_>,
    headers: &[HeaderCell],
    state: &TableState,
    page_selected: Option<bool>,
) -> HeaderResult {
    let mut result = HeaderResult::default();

    if let Some(all) = page_selected {
        header.col(|ui| {
            let mut checked = all;
            if ui.checkbox(&mut checked, "").on_hover_text("全选").changed() {
                result.select_page = Some(checked);
            }
        });
    }

    for cell in headers {
        header.col(|ui| {
            ui.vertical(|ui| {
                ui.horizontal(|ui| {
                    ui.strong(&cell.label);
                    if let Some(key) = cell.key.filter(|_| cell.sortable) {
                        let button = ui.small_button(sort_icon(cell.sort)).on_hover_text("排序");
                        if button.clicked() {
                            result.sort = Some(key);
                        }
                    }
                });
                if let Some(key) = cell.key.filter(|_| cell.filterable) {
                    let current = state.column_filter(key).unwrap_or_default();
                    if let Some(value) = column_filter(ui, cell, key, current) {
                        result.filters.push((key, value));
                    }
                }
            });
        });
    }

    result
}

fn sort_icon(sort: Option<SortDirection>) -> &'static str {
    match sort {
        Some(SortDirection::Ascending) => "▲",
        Some(SortDirection::Descending) => "▼",
        None => "⇅",
    }
}

/// Dropdown over enumerated values, free text otherwise.
fn column_filter(ui: &mut Ui, cell: &HeaderCell, key: Ustr, current: &str) -> Option<String> {
    let mut value = current.to_owned();
    match &cell.filter_options {
        Some(options) => {
            let selected = options
                .iter()
                .find(|option| option.value == current)
                .map_or(FILTER_ALL, |option| option.label.as_str());
            ComboBox::from_id_salt(("column_filter", key.as_str()))
                .selected_text(RichText::new(selected).small())
                .show_ui(ui, |ui| {
                    ui.selectable_value(&mut value, String::new(), FILTER_ALL);
                    for option in options {
                        ui.selectable_value(&mut value, option.value.clone(), &option.label);
                    }
                });
        }
        None => {
            ui.add(
                TextEdit::singleline(&mut value)
                    .hint_text("筛选")
                    .desired_width(f32::INFINITY),
            );
        }
    }
    (value != current).then_some(value)
}
