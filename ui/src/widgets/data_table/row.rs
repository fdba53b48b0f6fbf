//! Body row rendering.

use egui::{Stroke, Ui};
use egui_extras::TableRow;
use yishan_business::table::{RowAction, RowView};

use super::cells::render_cell;

/// Result of rendering a row.
#[derive(Debug, Default)]
pub struct RowResult {
    pub toggle_selected: bool,
    pub action: Option<RowAction>,
}

/// Renders the selection checkbox (when `selectable`) and every cell of `row`.
pub fn render_row(table_row: &mut TableRow<'_, '_>, row: &RowView, selectable: bool) -> RowResult {
    let mut result = RowResult::default();
    table_row.set_selected(row.selected);

    if selectable {
        table_row.col(|ui| {
            let mut checked = row.selected;
            if ui.checkbox(&mut checked, "").changed() {
                result.toggle_selected = true;
            }
            draw_cell_bottom_border(ui);
        });
    }

    for cell in &row.cells {
        table_row.col(|ui| {
            if let Some(action) = render_cell(ui, cell) {
                result.action = Some(action);
            }
            draw_cell_bottom_border(ui);
        });
    }

    result
}

/// Draws a bottom border line for a table cell.
fn draw_cell_bottom_border(ui: &mut Ui) {
    let rect = ui.max_rect();
    let border_color = ui.visuals().widgets.noninteractive.bg_stroke.color;
    ui.painter().hline(
        rect.left()..=rect.right(),
        rect.bottom(),
        Stroke::new(1.0, border_color),
    );
}
