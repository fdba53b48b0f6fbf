use kittest::Queryable;
use yishan_business::AdminConfig;
use yishan_ui::pages::alerts::{AlertStatus, AlertsPage};
use yishan_ui::state::Route;

use crate::common::TestCtx;

mod common;

fn draw_alerts(ui: &mut egui::Ui, page: &mut AlertsPage) {
    page.ui(ui);
}

#[test]
fn test_alerts_page_lists_mock_alerts() {
    let mut ctx = TestCtx::new(draw_alerts, AlertsPage::new(&AdminConfig::default()));
    let harness = ctx.harness_mut();
    harness.step();

    assert!(harness.query_by_label("共6条").is_some());
    assert!(harness.query_by_label("活跃告警").is_some());
    assert!(harness.query_by_label("数据库连接异常").is_some());
}

#[test]
fn test_acknowledge_button_moves_alert_on() {
    let mut ctx = TestCtx::new(draw_alerts, AlertsPage::new(&AdminConfig::default()));
    let harness = ctx.harness_mut();
    harness.step();

    harness
        .query_all_by_label("确认")
        .next()
        .expect("acknowledge button on the first active alert")
        .click();
    harness.step();
    harness.step();

    assert_eq!(
        harness.state().list().records()[0].status,
        AlertStatus::Acknowledged
    );
    assert!(harness.query_by_label("告警\"CPU使用率过高\"已确认").is_some());
}

#[test]
fn test_level_buttons_filter_the_table() {
    let mut ctx = TestCtx::new(draw_alerts, AlertsPage::new(&AdminConfig::default()));
    let harness = ctx.harness_mut();
    harness.step();

    // The filter bar comes before the level badges in the table.
    harness
        .query_all_by_label("严重")
        .next()
        .expect("level filter button")
        .click();
    harness.step();
    harness.step();

    assert!(harness.query_by_label("共2条").is_some());
    assert!(harness.query_by_label("磁盘空间不足").is_none());
}

#[test]
fn test_dashboard_links_to_alerts() {
    let mut ctx = TestCtx::new_app();
    let harness = ctx.harness_mut();
    harness.step();

    harness.get_by_label("查看全部").click();
    harness.step();
    harness.step();

    assert_eq!(harness.state().state().route, Route::Alerts);
    assert!(harness.query_by_label("共6条").is_some());
}
