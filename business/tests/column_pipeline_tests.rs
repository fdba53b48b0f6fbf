//! End-to-end tests of the column → search form → table pipeline.

use std::cell::RefCell;
use std::rc::Rc;

use yishan_business::search::{
    FixedWidth, LayoutMode, SearchForm, SearchFormConfig, SearchFormHandlers, derive_fields, layout,
};
use yishan_business::table::{
    ActionButton, ActionHandlers, Cell, EMPTY_PLACEHOLDER, RowAction, TableBody, TableState,
    TableView,
};
use yishan_business::{
    CellValue, ColumnDescriptor, FieldValue, FilterCriteria, PageItem, Record, Status, ValueEnum,
    ValueType, page_range,
};

#[derive(Debug, Clone)]
struct Position {
    id: u32,
    name: String,
    level: &'static str,
    status: &'static str,
}

impl Record for Position {
    fn cell(&self, key: &str) -> CellValue {
        match key {
            "id" => self.id.into(),
            "name" => (&self.name).into(),
            "level" => self.level.into(),
            "status" => self.status.into(),
            _ => CellValue::Null,
        }
    }
}

fn positions(count: u32) -> Vec<Position> {
    (1..=count)
        .map(|id| Position {
            id,
            name: format!("岗位{id}"),
            level: if id % 2 == 0 { "P2" } else { "P1" },
            status: if id % 5 == 0 { "inactive" } else { "active" },
        })
        .collect()
}

fn columns() -> Vec<ColumnDescriptor<Position>> {
    vec![
        ColumnDescriptor::new("id", "ID").hide_in_search().sortable(),
        ColumnDescriptor::new("name", "岗位名称").order(3),
        ColumnDescriptor::new("level", "岗位级别").order(2).value_enum(
            ValueEnum::new()
                .with("P1", "P1-初级", Status::Default)
                .with("P2", "P2-中级", Status::Processing),
        ),
        ColumnDescriptor::new("status", "状态").order(1).value_enum(
            ValueEnum::new()
                .with("active", "启用", Status::Success)
                .with("inactive", "禁用", Status::Error),
        ),
        ColumnDescriptor::actions("操作", |_, position: &Position, _, _| {
            let toggle = if position.status == "active" {
                RowAction::Disable
            } else {
                RowAction::Enable
            };
            Cell::actions([
                ActionButton::new(RowAction::View),
                ActionButton::new(RowAction::Edit),
                ActionButton::new(toggle),
                ActionButton::new(RowAction::Delete),
            ])
        }),
    ]
}

mod pagination_tests {
    use super::*;

    #[test]
    fn small_totals_have_no_ellipsis() {
        for sibling in 0..3 {
            for total in 0..=sibling * 2 + 5 {
                let expected: Vec<PageItem> = (1..=total).map(PageItem::Page).collect();
                assert_eq!(page_range(1, total, sibling), expected, "total {total}");
            }
        }
    }

    #[test]
    fn large_totals_keep_first_and_last_increasing() {
        for sibling in 0..3 {
            let total = sibling * 2 + 12;
            for current in 1..=total {
                let pages: Vec<usize> = page_range(current, total, sibling)
                    .into_iter()
                    .filter_map(PageItem::page)
                    .collect();
                assert_eq!(pages.first(), Some(&1));
                assert_eq!(pages.last(), Some(&total));
                assert!(pages.windows(2).all(|w| w[0] < w[1]), "{pages:?}");
            }
        }
    }
}

mod search_form_tests {
    use super::*;

    #[test]
    fn derived_fields_skip_hidden_and_option_columns() {
        let keys: Vec<String> = derive_fields(&columns())
            .into_iter()
            .map(|field| field.key.to_string())
            .collect();
        assert_eq!(keys, ["name", "level", "status"]);
    }

    #[test]
    fn layout_breakpoints() {
        let medium = layout(800.0, LayoutMode::Horizontal);
        assert_eq!((medium.col_span, medium.fields_per_row), (8, 3));
        let wide = layout(1400.0, LayoutMode::Horizontal);
        assert_eq!((wide.col_span, wide.fields_per_row), (6, 4));
        assert_eq!(
            layout(600.0, LayoutMode::Horizontal).effective_mode,
            LayoutMode::Vertical
        );
    }

    #[test]
    fn five_fields_at_1400px_collapse_to_three() {
        let columns: Vec<ColumnDescriptor<Position>> = (0..5)
            .map(|i| ColumnDescriptor::new(&format!("f{i}"), format!("字段{i}")).order(4 - i))
            .collect();
        let mut form = SearchForm::from_columns(&columns, SearchFormConfig::default());
        form.observe_width(&mut FixedWidth(1400.0));

        assert_eq!(form.default_visible_count(), 3);
        let visible: Vec<&str> = form.visible_fields().iter().map(|f| f.key.as_str()).collect();
        assert_eq!(visible, ["f0", "f1", "f2"]);
        assert!(form.has_more_fields());
    }

    #[test]
    fn submitted_criteria_drive_the_table() {
        let data = positions(30);
        let columns = columns();
        let state = Rc::new(RefCell::new(TableState::new()));
        state.borrow_mut().set_page_index(2);

        let sink = Rc::clone(&state);
        let mut form = SearchForm::from_columns(&columns, SearchFormConfig::default())
            .with_handlers(SearchFormHandlers::new().on_search(move |criteria| {
                sink.borrow_mut().set_filter(criteria.clone())
            }));
        form.set_value("level", "P1");

        let criteria = form.submit().expect("form is valid");
        assert_eq!(
            criteria,
            FilterCriteria::from_values([("level", FieldValue::from("P1"))])
        );

        let state = state.borrow();
        assert_eq!(state.page_index(), 0, "new criteria start at the first page");
        let view = TableView::build(&columns, &data, &state, &ActionHandlers::new());
        assert_eq!(view.total_rows, 15);
        assert_eq!(view.page_count, 2);
        assert!(view.rows().iter().all(|row| data[row.index].level == "P1"));
    }
}

mod table_tests {
    use super::*;

    #[test]
    fn empty_data_has_one_placeholder_row() {
        let all = columns();
        for count in 1..=all.len() {
            let view =
                TableView::build(&all[..count], &[], &TableState::new(), &ActionHandlers::new());
            assert_eq!(
                view.body,
                TableBody::Placeholder {
                    colspan: count,
                    text: EMPTY_PLACEHOLDER
                }
            );
        }
    }

    #[test]
    fn action_clicks_dispatch_after_the_frame() {
        let data = positions(3);
        let columns = columns();
        let (tx, rx) = flume::unbounded();
        let handlers = ActionHandlers::new()
            .on(RowAction::Edit, {
                let tx = tx.clone();
                move |p: &Position| tx.send((RowAction::Edit, p.id)).expect("receiver alive")
            })
            .on(RowAction::Delete, move |p: &Position| {
                tx.send((RowAction::Delete, p.id)).expect("receiver alive")
            });

        let view = TableView::build(&columns, &data, &TableState::new(), &handlers);
        let clicks: Vec<(RowAction, usize)> = view
            .rows()
            .iter()
            .filter_map(|row| match row.cells.last() {
                Some(Cell::Actions(buttons)) => Some((buttons[1].action, row.index)),
                _ => None,
            })
            .collect();
        for (action, index) in clicks {
            handlers.dispatch(action, &data[index]);
        }
        assert!(!handlers.dispatch(RowAction::View, &data[0]), "no view handler");

        let received: Vec<(RowAction, u32)> = rx.try_iter().collect();
        assert_eq!(
            received,
            [(RowAction::Edit, 1), (RowAction::Edit, 2), (RowAction::Edit, 3)]
        );
    }

    #[test]
    fn enum_columns_show_badges_and_index_columns_count() {
        let data = positions(5);
        let columns = vec![
            ColumnDescriptor::new("index", "#").value_type(ValueType::Index),
            columns().swap_remove(3),
        ];
        let view = TableView::build(&columns, &data, &TableState::new(), &ActionHandlers::new());

        assert_eq!(view.rows()[4].cells[0], Cell::text("5"));
        assert_eq!(view.rows()[4].cells[1], Cell::badge("禁用", Status::Error));
    }
}
