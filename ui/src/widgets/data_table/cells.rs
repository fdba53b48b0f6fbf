//! Cell rendering, one function per [`Cell`] kind.

use egui::{Button, Frame, Label, Margin, RichText, Stroke, Ui};
use yishan_business::StyleToken;
use yishan_business::table::{ActionButton, Cell, RowAction};

use crate::utils::colors::{COLOR_BLUE, COLOR_RED, style_token_color};

/// Renders `cell` and returns the action whose button was clicked.
pub fn render_cell(ui: &mut Ui, cell: &Cell) -> Option<RowAction> {
    match cell {
        Cell::Text(text) => {
            render_text_cell(ui, text);
            None
        }
        Cell::Emphasis(text) => {
            render_emphasis_cell(ui, text);
            None
        }
        Cell::Badge { text, token } => {
            render_badge(ui, text, *token);
            None
        }
        Cell::Actions(buttons) => render_action_buttons(ui, buttons),
        Cell::Empty => {
            ui.weak("-");
            None
        }
    }
}

/// Long text is truncated with an ellipsis; hover shows the full value.
#[inline]
fn render_text_cell(ui: &mut Ui, text: &str) {
    ui.add(Label::new(text).truncate());
}

#[inline]
fn render_emphasis_cell(ui: &mut Ui, text: &str) {
    ui.label(RichText::new(text).monospace().strong());
}

/// Rounded badge tinted with the token color.
pub fn render_badge(ui: &mut Ui, text: &str, token: StyleToken) {
    let color = style_token_color(token);
    Frame::NONE
        .fill(color.gamma_multiply(0.12))
        .stroke(Stroke::new(1.0, color.gamma_multiply(0.5)))
        .corner_radius(4)
        .inner_margin(Margin::symmetric(6, 1))
        .show(ui, |ui| {
            ui.label(RichText::new(text).color(color).small());
        });
}

/// Link-style buttons; destructive ones are red.
fn render_action_buttons(ui: &mut Ui, buttons: &[ActionButton]) -> Option<RowAction> {
    let mut clicked = None;
    ui.horizontal(|ui| {
        for button in buttons {
            let color = if button.danger { COLOR_RED } else { COLOR_BLUE };
            let text = RichText::new(&button.label).color(color);
            if ui.add(Button::new(text).frame(false)).clicked() {
                clicked = Some(button.action);
            }
        }
    });
    clicked
}
