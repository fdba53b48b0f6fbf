//! Summary cards above list pages and on the dashboard.

use egui::{Color32, Frame, Margin, RichText, Stroke, Ui};

use crate::utils::colors::BORDER_COLOR;

#[derive(Debug, Clone, PartialEq)]
pub struct StatCard {
    pub title: &'static str,
    pub value: String,
    pub hint: Option<(String, Color32)>,
}

impl StatCard {
    pub fn new(title: &'static str, value: impl ToString) -> Self {
        Self {
            title,
            value: value.to_string(),
            hint: None,
        }
    }

    #[must_use]
    pub fn hint(mut self, hint: impl Into<String>, color: Color32) -> Self {
        self.hint = Some((hint.into(), color));
        self
    }
}

/// Lays `cards` out in equal-width columns.
pub fn stat_cards(ui: &mut Ui, cards: &[StatCard]) {
    if cards.is_empty() {
        return;
    }
    ui.columns(cards.len(), |columns| {
        for (ui, card) in columns.iter_mut().zip(cards) {
            stat_card(ui, card);
        }
    });
}

fn stat_card(ui: &mut Ui, card: &StatCard) {
    Frame::NONE
        .stroke(Stroke::new(1.0, BORDER_COLOR))
        .corner_radius(6)
        .inner_margin(Margin::symmetric(12, 10))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(card.title).small());
            ui.label(RichText::new(&card.value).heading().strong());
            if let Some((hint, color)) = &card.hint {
                ui.label(RichText::new(hint).small().color(*color));
            }
        });
}
