//! Pager under a data table: `共N条`, page buttons and page size.

use std::hash::Hash;

use egui::{Align, Button, ComboBox, Layout, Ui};
use yishan_business::PageItem;
use yishan_business::table::{PAGE_SIZE_OPTIONS, TableState, TableView};

/// A pager click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagerAction {
    /// Zero-based page index.
    GoTo(usize),
    PageSize(usize),
}

impl PagerAction {
    pub fn apply(self, state: &mut TableState) {
        match self {
            Self::GoTo(page_index) => state.set_page_index(page_index),
            Self::PageSize(page_size) => {
                if let Err(err) = state.set_page_size(page_size) {
                    log::warn!("{err}");
                }
            }
        }
    }
}

/// Draws the pager for `view`. The total sits left, the controls right.
pub fn pagination(ui: &mut Ui, id_salt: impl Hash, view: &TableView) -> Option<PagerAction> {
    let mut action = None;

    ui.horizontal(|ui| {
        ui.label(view.total_label());

        // Right to left: page size, next, pages (last first), previous.
        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            let mut page_size = view.page_size;
            ComboBox::from_id_salt(id_salt)
                .selected_text(format!("{page_size}条/页"))
                .show_ui(ui, |ui| {
                    for size in PAGE_SIZE_OPTIONS {
                        ui.selectable_value(&mut page_size, *size, format!("{size}条/页"));
                    }
                });
            if page_size != view.page_size {
                action = Some(PagerAction::PageSize(page_size));
            }

            if ui
                .add_enabled(view.can_next(), Button::new("›"))
                .on_hover_text("下一页")
                .clicked()
            {
                action = Some(PagerAction::GoTo(view.page_index + 1));
            }

            for item in view.page_items.iter().rev() {
                match *item {
                    PageItem::Page(page) => {
                        let current = page == view.page_index + 1;
                        if ui.selectable_label(current, page.to_string()).clicked() && !current {
                            action = Some(PagerAction::GoTo(page - 1));
                        }
                    }
                    PageItem::Ellipsis => {
                        ui.weak(item.to_string());
                    }
                }
            }

            if ui
                .add_enabled(view.can_previous(), Button::new("‹"))
                .on_hover_text("上一页")
                .clicked()
            {
                action = Some(PagerAction::GoTo(view.page_index.saturating_sub(1)));
            }
        });
    });

    action
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actions_update_the_state() {
        let mut state = TableState::new();
        PagerAction::GoTo(3).apply(&mut state);
        assert_eq!(state.page_index(), 3);

        PagerAction::PageSize(20).apply(&mut state);
        assert_eq!((state.page_size(), state.page_index()), (20, 0));

        PagerAction::PageSize(15).apply(&mut state);
        assert_eq!(state.page_size(), 20, "sizes outside the options are ignored");
    }
}
