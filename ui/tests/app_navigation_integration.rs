use kittest::Queryable;
use yishan_ui::state::Route;

use crate::common::TestCtx;

mod common;

#[test]
fn test_every_route_is_listed_in_navigation() {
    let mut ctx = TestCtx::new_app();
    let harness = ctx.harness_mut();
    harness.step();

    for route in Route::ALL {
        // The dashboard repeats page names in its shortcuts.
        assert!(
            harness.query_all_by_label(route.label()).next().is_some(),
            "navigation entry '{}' should be visible",
            route.label()
        );
    }
}

#[test]
fn test_dashboard_is_the_landing_page() {
    let mut ctx = TestCtx::new_app();
    let harness = ctx.harness_mut();
    harness.step();

    assert_eq!(harness.state().state().route, Route::Dashboard);
    assert!(harness.query_by_label("12,345").is_some());
    assert!(harness.query_by_label("CPU使用率过高").is_some());
}

#[test]
fn test_route_switch_shows_list_page() {
    let mut ctx = TestCtx::new_app();
    let harness = ctx.harness_mut();

    harness.state_mut().state_mut().route = Route::Users;
    harness.step();

    assert!(harness.query_by_label("共5条").is_some());
    assert!(harness.query_by_label("系统管理员").is_some());
}

#[test]
fn test_clicking_navigation_changes_route() {
    let mut ctx = TestCtx::new_app();
    let harness = ctx.harness_mut();

    // Away from the dashboard, whose shortcuts repeat the page names.
    harness.state_mut().state_mut().route = Route::Users;
    harness.step();

    harness.get_by_label("角色管理").click();
    harness.step();
    harness.step();

    assert_eq!(harness.state().state().route, Route::Roles);
    assert!(harness.query_by_label("超级管理员").is_some());
}
