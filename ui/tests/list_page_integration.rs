use kittest::Queryable;
use yishan_business::AdminConfig;
use yishan_business::table::RowAction;
use yishan_ui::pages::positions::PositionsPage;
use yishan_ui::pages::users::{User, UsersPage, mock_users};

use crate::common::TestCtx;

mod common;

fn draw_users(ui: &mut egui::Ui, page: &mut UsersPage) {
    page.ui(ui);
}

#[test]
fn test_users_page_lists_mock_records() {
    let mut ctx = TestCtx::new(draw_users, UsersPage::new(&AdminConfig::default()));
    let harness = ctx.harness_mut();
    harness.step();

    assert!(harness.query_by_label("共5条").is_some());
    assert!(harness.query_by_label("zhangsan").is_some());
    assert!(harness.query_by_label("总用户数").is_some());
}

#[test]
fn test_submitted_search_filters_the_table() {
    let mut ctx = TestCtx::new(draw_users, UsersPage::new(&AdminConfig::default()));
    let harness = ctx.harness_mut();
    harness.step();

    {
        let form = harness.state_mut().list_mut().form_mut();
        form.set_value("name", "张三");
        form.submit().expect("no required fields");
    }
    harness.step();
    harness.step();

    assert!(harness.query_by_label("共1条").is_some());
    assert!(harness.query_by_label("zhangsan").is_some());
    assert!(harness.query_by_label("lisi").is_none());
    assert_eq!(harness.state().list().table().page_index(), 0);
}

#[test]
fn test_reset_restores_all_rows() {
    let mut ctx = TestCtx::new(draw_users, UsersPage::new(&AdminConfig::default()));
    let harness = ctx.harness_mut();

    {
        let form = harness.state_mut().list_mut().form_mut();
        form.set_value("name", "张三");
        form.submit().expect("no required fields");
    }
    harness.step();
    harness.state_mut().list_mut().form_mut().reset();
    harness.step();
    harness.step();

    assert!(harness.query_by_label("共5条").is_some());
}

#[test]
fn test_empty_page_shows_placeholder() {
    let mut ctx = TestCtx::new(
        draw_users,
        UsersPage::with_users(Vec::<User>::new(), &AdminConfig::default()),
    );
    let harness = ctx.harness_mut();
    harness.step();

    assert!(harness.query_by_label("暂无数据").is_some());
    assert!(harness.query_by_label("共0条").is_some());
}

#[test]
fn test_row_action_notice_is_shown() {
    let mut ctx = TestCtx::new(draw_users, UsersPage::new(&AdminConfig::default()));
    let harness = ctx.harness_mut();
    harness.step();

    harness.state_mut().apply(RowAction::Delete, 3);
    harness.step();

    assert!(harness.query_by_label("用户\"李四\"已删除").is_some());
    assert!(harness.query_by_label("共4条").is_some());
    assert_eq!(harness.state().list().records().len(), mock_users().len() - 1);
}

#[test]
fn test_refused_action_is_reported_as_error() {
    let mut ctx = TestCtx::new(
        |ui, page: &mut PositionsPage| page.ui(ui),
        PositionsPage::new(&AdminConfig::default()),
    );
    let harness = ctx.harness_mut();
    harness.step();

    harness.state_mut().apply(RowAction::Disable, 2);
    harness.step();

    assert!(
        harness
            .query_by_label_contains("无法禁用岗位\"后端开发工程师\"")
            .is_some()
    );
    assert!(harness.state().list().notice().is_some_and(|n| n.is_error));
}
