use kittest::Queryable;
use yishan_business::table::TableState;
use yishan_business::{AdminConfig, RawAdminConfig};
use yishan_ui::pages::positions::{PositionsPage, mock_positions};

use crate::common::TestCtx;

mod common;

/// Twelve positions, ten per page.
fn two_page_positions() -> PositionsPage {
    let mut positions = mock_positions();
    let extra: Vec<_> = positions
        .iter()
        .map(|position| {
            let mut copy = position.clone();
            copy.id += 100;
            copy.code = format!("{}-B", copy.code);
            copy
        })
        .collect();
    positions.extend(extra);
    let config = AdminConfig::from_raw(RawAdminConfig {
        page_size: Some(10),
        ..RawAdminConfig::default()
    })
    .expect("valid page size");
    PositionsPage::with_positions(positions, &config)
}

#[test]
fn test_pager_shows_total_and_pages() {
    let mut ctx = TestCtx::new(|ui, page: &mut PositionsPage| page.ui(ui), two_page_positions());
    let harness = ctx.harness_mut();
    harness.step();

    assert!(harness.query_by_label("共12条").is_some());
    assert!(harness.query_by_label("2").is_some());
    assert!(harness.query_by_label("QA001-B").is_none(), "row 12 is on page two");
}

#[test]
fn test_page_two_shows_remaining_rows() {
    let mut ctx = TestCtx::new(|ui, page: &mut PositionsPage| page.ui(ui), two_page_positions());
    let harness = ctx.harness_mut();
    harness.step();

    harness.get_by_label("2").click();
    harness.step();
    harness.step();

    let table: &TableState = harness.state().list().table();
    assert_eq!(table.page_index(), 1);
    assert!(harness.query_by_label("QA001-B").is_some());
}
