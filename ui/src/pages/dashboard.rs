//! 仪表盘: headline numbers, growth, live alerts and shortcuts into the
//! list pages. All figures are static demo data.

use egui::{Color32, Frame, Margin, RichText, Stroke, Ui};
use yishan_business::StyleToken;

use crate::state::Route;
use crate::utils::colors::{
    BORDER_COLOR, COLOR_AMBER, COLOR_BLUE, COLOR_GREEN, COLOR_RED, style_token_color,
};
use crate::widgets::{StatCard, render_badge, stat_cards};

const SECTION_SPACING: f32 = 12.0;
const COLOR_PURPLE: Color32 = Color32::from_rgb(128, 90, 213);

struct Alert {
    title: &'static str,
    detail: &'static str,
    level: &'static str,
    token: StyleToken,
}

const ALERTS: [Alert; 3] = [
    Alert {
        title: "CPU使用率过高",
        detail: "当前85% - 2分钟前",
        level: "紧急",
        token: StyleToken::Danger,
    },
    Alert {
        title: "响应时间异常",
        detail: "平均2.3s - 5分钟前",
        level: "重要",
        token: StyleToken::Warning,
    },
    Alert {
        title: "系统备份完成",
        detail: "数据库备份 - 1小时前",
        level: "正常",
        token: StyleToken::Success,
    },
];

const INSIGHTS: [(&str, &str, Color32); 3] = [
    ("用户活跃度提升", "检测到用户活跃度较上周提升18%，建议加强用户留存策略。", COLOR_BLUE),
    ("资源优化建议", "系统负载在高峰期达到80%，建议考虑扩容或优化查询性能。", COLOR_AMBER),
    ("系统运行良好", "过去24小时系统运行稳定，可用性达到99.8%，表现优秀。", COLOR_GREEN),
];

const SHORTCUTS: [(Route, &str); 4] = [
    (Route::Users, "管理系统用户"),
    (Route::Roles, "配置用户角色"),
    (Route::Departments, "组织架构管理"),
    (Route::Positions, "岗位与编制管理"),
];

pub fn headline_cards() -> Vec<StatCard> {
    vec![
        StatCard::new("总用户数", "12,345").hint("+12.5% 较上月增长", COLOR_GREEN),
        StatCard::new("活跃用户", "8,967").hint("+8.2% 较上周增长", COLOR_GREEN),
        StatCard::new("新增用户", "234").hint("-2.1% 较昨日下降", COLOR_RED),
        StatCard::new("系统负载", "45%").hint("CPU使用率正常", COLOR_GREEN),
    ]
}

fn section(ui: &mut Ui, title: &str, add_contents: impl FnOnce(&mut Ui)) {
    Frame::NONE
        .stroke(Stroke::new(1.0, BORDER_COLOR))
        .corner_radius(6)
        .inner_margin(Margin::same(12))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(title).strong());
            ui.add_space(8.0);
            add_contents(ui);
        });
}

fn growth(ui: &mut Ui) {
    let figures = [
        ("+15.2%", "月增长率", COLOR_GREEN),
        ("2,847", "本月新增", COLOR_BLUE),
        ("89.3%", "留存率", COLOR_PURPLE),
    ];
    ui.columns(figures.len(), |columns| {
        for (ui, (value, label, color)) in columns.iter_mut().zip(figures) {
            ui.vertical_centered(|ui| {
                ui.label(RichText::new(value).heading().color(color));
                ui.label(RichText::new(label).small());
            });
        }
    });
}

/// Returns whether 查看全部 was clicked.
fn alerts(ui: &mut Ui) -> bool {
    for alert in &ALERTS {
        let color = style_token_color(alert.token);
        Frame::NONE
            .fill(color.gamma_multiply(0.08))
            .stroke(Stroke::new(1.0, color.gamma_multiply(0.4)))
            .corner_radius(6)
            .inner_margin(Margin::symmetric(10, 8))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.horizontal(|ui| {
                    ui.vertical(|ui| {
                        ui.label(RichText::new(alert.title).strong().color(color));
                        ui.label(RichText::new(alert.detail).small());
                    });
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        render_badge(ui, alert.level, alert.token);
                    });
                });
            });
        ui.add_space(6.0);
    }
    ui.button("查看全部").clicked()
}

fn insights(ui: &mut Ui) {
    ui.columns(INSIGHTS.len(), |columns| {
        for (ui, (title, text, color)) in columns.iter_mut().zip(INSIGHTS) {
            Frame::NONE
                .fill(color.gamma_multiply(0.08))
                .corner_radius(6)
                .inner_margin(Margin::same(10))
                .show(ui, |ui| {
                    ui.label(RichText::new(title).strong().color(color));
                    ui.label(text);
                });
        }
    });
}

/// Returns the page a shortcut asked to open.
fn shortcuts(ui: &mut Ui) -> Option<Route> {
    let mut target = None;
    ui.columns(SHORTCUTS.len(), |columns| {
        for (ui, (route, hint)) in columns.iter_mut().zip(SHORTCUTS) {
            let clicked = ui.button(route.label()).on_hover_text(hint).clicked();
            ui.label(RichText::new(hint).small());
            if clicked {
                target = Some(route);
            }
        }
    });
    target
}

/// Draws the dashboard. Returns a route when a shortcut or 查看全部 was
/// clicked.
pub fn dashboard(ui: &mut Ui) -> Option<Route> {
    stat_cards(ui, &headline_cards());
    ui.add_space(SECTION_SPACING);

    let mut target = None;
    section(ui, "用户增长趋势", growth);
    ui.add_space(SECTION_SPACING);
    section(ui, "实时告警", |ui| {
        if alerts(ui) {
            target = Some(Route::Alerts);
        }
    });
    ui.add_space(SECTION_SPACING);
    section(ui, "智能洞察", insights);
    ui.add_space(SECTION_SPACING);

    section(ui, "快速操作中心", |ui| {
        if let Some(route) = shortcuts(ui) {
            target = Some(route);
        }
    });
    if let Some(route) = target {
        log::debug!("dashboard shortcut to {route:?}");
    }
    target
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shortcuts_point_at_list_pages() {
        assert!(SHORTCUTS.iter().all(|(route, _)| *route != Route::Dashboard));
    }

    #[test]
    fn falling_numbers_are_red() {
        let cards = headline_cards();
        assert_eq!(cards[2].hint.as_ref().map(|(_, color)| *color), Some(COLOR_RED));
    }
}
