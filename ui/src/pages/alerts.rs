//! 实时告警: system alerts filtered by level and status.
//!
//! An active alert can be acknowledged or resolved, an acknowledged one can
//! only be resolved, and a resolved alert is final.

use egui::{RichText, Ui};
use ustr::Ustr;
use yishan_business::table::{ActionButton, Cell, RowAction, TableState};
use yishan_business::{
    AdminConfig, CellValue, ColumnDescriptor, Record, Status, ValueEnum, ValueType,
};

use super::list::{ListPage, ListRecord, Notice};
use crate::utils::colors::{COLOR_AMBER, COLOR_GREEN, COLOR_RED};
use crate::widgets::{StatCard, stat_cards};

const FILTER_ALL: &str = "全部";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlertLevel {
    Critical,
    Warning,
    Info,
}

impl AlertLevel {
    pub const ALL: [Self; 3] = [Self::Critical, Self::Warning, Self::Info];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Critical => "严重",
            Self::Warning => "警告",
            Self::Info => "信息",
        }
    }

    fn status(self) -> Status {
        match self {
            Self::Critical => Status::Error,
            Self::Warning => Status::Warning,
            Self::Info => Status::Processing,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlertStatus {
    Active,
    Acknowledged,
    Resolved,
}

impl AlertStatus {
    pub const ALL: [Self; 3] = [Self::Active, Self::Acknowledged, Self::Resolved];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Acknowledged => "acknowledged",
            Self::Resolved => "resolved",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Active => "活跃",
            Self::Acknowledged => "已确认",
            Self::Resolved => "已解决",
        }
    }

    fn status(self) -> Status {
        match self {
            Self::Active => Status::Error,
            Self::Acknowledged => Status::Warning,
            Self::Resolved => Status::Success,
        }
    }

    /// Status after 确认, if allowed from here.
    pub fn acknowledged(self) -> Option<Self> {
        (self == Self::Active).then_some(Self::Acknowledged)
    }

    /// Status after 解决, if allowed from here.
    pub fn resolved(self) -> Option<Self> {
        (self != Self::Resolved).then_some(Self::Resolved)
    }
}

pub fn acknowledge_action() -> RowAction {
    RowAction::custom("acknowledge")
}

pub fn resolve_action() -> RowAction {
    RowAction::custom("resolve")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub level: AlertLevel,
    pub status: AlertStatus,
    pub timestamp: String,
    pub source: String,
    pub category: String,
}

impl Record for Alert {
    fn cell(&self, key: &str) -> CellValue {
        match key {
            "id" => self.id.into(),
            "title" => (&self.title).into(),
            "description" => (&self.description).into(),
            "level" => self.level.as_str().into(),
            "status" => self.status.as_str().into(),
            "timestamp" => (&self.timestamp).into(),
            "source" => (&self.source).into(),
            "category" => (&self.category).into(),
            _ => CellValue::Null,
        }
    }
}

impl ListRecord for Alert {
    fn id(&self) -> u32 {
        self.id
    }
}

fn level_enum() -> ValueEnum {
    AlertLevel::ALL.iter().fold(ValueEnum::new(), |values, level| {
        values.with(level.as_str(), level.label(), level.status())
    })
}

fn status_enum() -> ValueEnum {
    AlertStatus::ALL.iter().fold(ValueEnum::new(), |values, status| {
        values.with(status.as_str(), status.label(), status.status())
    })
}

fn action_cell(alert: &Alert) -> Cell {
    let acknowledge = ActionButton::new(acknowledge_action()).label("确认");
    let resolve = ActionButton::new(resolve_action()).label("解决");
    match alert.status {
        AlertStatus::Active => Cell::actions([acknowledge, resolve]),
        AlertStatus::Acknowledged => Cell::actions([resolve]),
        AlertStatus::Resolved => Cell::Empty,
    }
}

pub fn columns() -> Vec<ColumnDescriptor<Alert>> {
    vec![
        ColumnDescriptor::new("title", "告警标题")
            .order(3)
            .render(|value, _, _, _| Cell::emphasis(value.to_string())),
        ColumnDescriptor::new("level", "告警级别")
            .value_type(ValueType::Select)
            .order(2)
            .filterable()
            .value_enum(level_enum()),
        ColumnDescriptor::new("status", "状态")
            .value_type(ValueType::Select)
            .order(1)
            .filterable()
            .value_enum(status_enum()),
        ColumnDescriptor::new("category", "分类"),
        ColumnDescriptor::new("source", "来源").hide_in_search(),
        ColumnDescriptor::new("description", "描述").hide_in_search(),
        ColumnDescriptor::new("timestamp", "告警时间")
            .value_type(ValueType::DateTime)
            .hide_in_search()
            .sortable(),
        ColumnDescriptor::actions("操作", |_, alert: &Alert, _, _| action_cell(alert)),
    ]
}

pub fn mock_alerts() -> Vec<Alert> {
    let alert = |id,
                 title: &str,
                 description: &str,
                 level,
                 status,
                 timestamp: &str,
                 source: &str,
                 category: &str| Alert {
        id,
        title: title.to_owned(),
        description: description.to_owned(),
        level,
        status,
        timestamp: timestamp.to_owned(),
        source: source.to_owned(),
        category: category.to_owned(),
    };
    vec![
        alert(
            1,
            "CPU使用率过高",
            "服务器CPU使用率持续超过90%，可能影响系统性能",
            AlertLevel::Critical,
            AlertStatus::Active,
            "2024-01-15 15:30:25",
            "system-monitor",
            "系统资源",
        ),
        alert(
            2,
            "数据库连接异常",
            "数据库连接池耗尽，新的连接请求被拒绝",
            AlertLevel::Critical,
            AlertStatus::Active,
            "2024-01-15 15:25:18",
            "database",
            "数据库",
        ),
        alert(
            3,
            "内存使用率告警",
            "系统内存使用率达到85%，建议检查内存占用情况",
            AlertLevel::Warning,
            AlertStatus::Acknowledged,
            "2024-01-15 15:20:42",
            "system-monitor",
            "系统资源",
        ),
        alert(
            4,
            "磁盘空间不足",
            "/var/log 目录磁盘使用率达到95%，需要清理日志文件",
            AlertLevel::Warning,
            AlertStatus::Active,
            "2024-01-15 15:15:30",
            "system-monitor",
            "存储",
        ),
        alert(
            5,
            "用户登录异常",
            "检测到来自异常IP的多次登录尝试",
            AlertLevel::Warning,
            AlertStatus::Active,
            "2024-01-15 15:10:15",
            "security",
            "安全",
        ),
        alert(
            6,
            "系统备份完成",
            "定时数据备份任务已成功完成",
            AlertLevel::Info,
            AlertStatus::Resolved,
            "2024-01-15 14:30:00",
            "backup-service",
            "备份",
        ),
    ]
}

pub struct AlertsPage {
    list: ListPage<Alert>,
}

impl AlertsPage {
    pub fn new(config: &AdminConfig) -> Self {
        Self::with_alerts(mock_alerts(), config)
    }

    pub fn with_alerts(alerts: Vec<Alert>, config: &AdminConfig) -> Self {
        let list = ListPage::new("alerts", columns(), alerts, config)
            .handle(acknowledge_action())
            .handle(resolve_action());
        Self { list }
    }

    pub fn list(&self) -> &ListPage<Alert> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut ListPage<Alert> {
        &mut self.list
    }

    pub fn ui(&mut self, ui: &mut Ui) {
        filter_bar(ui, self.list.table_mut());
        ui.add_space(8.0);
        let actions = self.list.show(ui, |ui, alerts| stat_cards(ui, &stats(alerts)));
        for (action, id) in actions {
            self.apply(action, id);
        }
    }

    /// Moves alert `id` along its lifecycle.
    pub fn apply(&mut self, action: RowAction, id: u32) {
        let Some(alert) = self.list.record_mut(id) else {
            log::debug!("alert {id} no longer exists");
            return;
        };
        let (verb, next) = if action == acknowledge_action() {
            ("确认", alert.status.acknowledged())
        } else if action == resolve_action() {
            ("解决", alert.status.resolved())
        } else {
            log::debug!("alert action {action} is not handled");
            return;
        };
        let notice = match next {
            Some(status) => {
                alert.status = status;
                Notice::success(format!("告警\"{}\"{}", alert.title, status.label()))
            }
            None => Notice::error(format!(
                "告警\"{}\"{}，无法{verb}",
                alert.title,
                alert.status.label()
            )),
        };
        self.list.set_notice(notice);
    }
}

/// 告警级别 and 状态 button rows. They drive the same header filters as the
/// table's own filter dropdowns.
fn filter_bar(ui: &mut Ui, table: &mut TableState) {
    let level = AlertLevel::ALL.map(|level| (level.as_str(), level.label()));
    let status = AlertStatus::ALL.map(|status| (status.as_str(), status.label()));
    filter_row(ui, table, "level", "告警级别：", &level);
    filter_row(ui, table, "status", "状态：", &status);
}

fn filter_row(
    ui: &mut Ui,
    table: &mut TableState,
    key: &str,
    title: &str,
    choices: &[(&str, &str)],
) {
    let key = Ustr::from(key);
    let current = table.column_filter(key).unwrap_or_default().to_owned();
    let mut choice = None;
    ui.horizontal(|ui| {
        ui.label(RichText::new(title).strong());
        if ui.selectable_label(current.is_empty(), FILTER_ALL).clicked() {
            choice = Some(String::new());
        }
        for (value, label) in choices {
            if ui.selectable_label(current == *value, *label).clicked() {
                choice = Some((*value).to_owned());
            }
        }
    });
    if let Some(choice) = choice {
        log::debug!("alert filter {key} = {choice:?}");
        table.set_column_filter(key, choice);
    }
}

fn stats(alerts: &[&Alert]) -> Vec<StatCard> {
    let count = |keep: fn(&Alert) -> bool| alerts.iter().filter(|alert| keep(alert)).count();
    let active = count(|alert| alert.status == AlertStatus::Active);
    let critical = count(|alert| {
        alert.status == AlertStatus::Active && alert.level == AlertLevel::Critical
    });
    vec![
        StatCard::new("活跃告警", active).hint("需要立即处理", COLOR_RED),
        StatCard::new("严重告警", critical).hint("高优先级处理", COLOR_RED),
        StatCard::new("已确认", count(|alert| alert.status == AlertStatus::Acknowledged))
            .hint("处理中", COLOR_AMBER),
        StatCard::new("已解决", count(|alert| alert.status == AlertStatus::Resolved))
            .hint("已关闭", COLOR_GREEN),
    ]
}
