//! 岗位管理: positions with level, department and head count.
//!
//! Positions that still have staff can be neither deleted nor disabled.

use egui::Ui;
use yishan_business::search::{FormValues, InputKind, SearchField};
use yishan_business::table::{ActionButton, ActionHandlers, Cell, RowAction};
use yishan_business::{
    AdminConfig, CellValue, ColumnDescriptor, FieldProps, FieldValue, Record, Status, ValueEnum,
    ValueType,
};

use super::list::{EditableRecord, ListPage, ListRecord, Notice, timestamp_now};
use crate::widgets::{StatCard, stat_cards};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub id: u32,
    pub name: String,
    pub code: String,
    pub department: String,
    pub level: String,
    pub description: String,
    pub requirements: String,
    pub user_count: u32,
    pub status: String,
    pub create_time: String,
}

impl Record for Position {
    fn cell(&self, key: &str) -> CellValue {
        match key {
            "id" => self.id.into(),
            "name" => (&self.name).into(),
            "code" => (&self.code).into(),
            "department" => (&self.department).into(),
            "level" => (&self.level).into(),
            "description" => (&self.description).into(),
            "requirements" => (&self.requirements).into(),
            "userCount" => self.user_count.into(),
            "status" => (&self.status).into(),
            "createTime" => (&self.create_time).into(),
            _ => CellValue::Null,
        }
    }
}

impl ListRecord for Position {
    fn id(&self) -> u32 {
        self.id
    }
}

impl EditableRecord for Position {
    const NOUN: &'static str = "岗位";

    fn display_name(&self) -> &str {
        &self.name
    }

    fn form_fields() -> Vec<SearchField> {
        vec![
            SearchField::new("name", "岗位名称", InputKind::Input).required(),
            SearchField::new("code", "岗位编码", InputKind::Input).required(),
            SearchField::new("department", "所属部门", InputKind::Select)
                .required()
                .with_options(options(&departments())),
            SearchField::new("level", "岗位级别", InputKind::Select)
                .required()
                .with_options(options(&levels())),
            SearchField::new("status", "状态", InputKind::Select)
                .required()
                .with_options(options(&statuses())),
            SearchField::new("description", "岗位描述", InputKind::Textarea),
            SearchField::new("requirements", "任职要求", InputKind::Textarea),
        ]
    }

    fn form_values(&self) -> Vec<(&'static str, FieldValue)> {
        vec![
            ("name", self.name.clone().into()),
            ("code", self.code.clone().into()),
            ("department", self.department.clone().into()),
            ("level", self.level.clone().into()),
            ("status", self.status.clone().into()),
            ("description", self.description.clone().into()),
            ("requirements", self.requirements.clone().into()),
        ]
    }

    fn form_defaults() -> Vec<(&'static str, FieldValue)> {
        vec![("status", "正常".into())]
    }

    fn from_form(id: u32, values: &FormValues, previous: Option<&Self>) -> Self {
        Self {
            id,
            name: values.text("name"),
            code: values.text("code"),
            department: values.text("department"),
            level: values.text("level"),
            description: values.text("description"),
            requirements: values.text("requirements"),
            user_count: previous.map_or(0, |position| position.user_count),
            status: values.text("status"),
            create_time: previous
                .map_or_else(timestamp_now, |position| position.create_time.clone()),
        }
    }
}

impl Position {
    pub fn is_active(&self) -> bool {
        self.status == "正常"
    }
}

/// `(value, label)` choices of an enumeration.
fn options(values: &ValueEnum) -> Vec<(String, String)> {
    values
        .iter()
        .map(|(value, entry)| (value.to_owned(), entry.text.clone()))
        .collect()
}

fn statuses() -> ValueEnum {
    ValueEnum::new()
        .with("正常", "正常", Status::Success)
        .with("禁用", "禁用", Status::Default)
}

fn departments() -> ValueEnum {
    ValueEnum::new()
        .with("技术部", "技术部", Status::Success)
        .with("产品部", "产品部", Status::Processing)
        .with("市场部", "市场部", Status::Warning)
        .with("销售部", "销售部", Status::Default)
        .with("人事部", "人事部", Status::Success)
        .with("财务部", "财务部", Status::Processing)
}

fn levels() -> ValueEnum {
    ValueEnum::new()
        .with("P1", "P1-初级", Status::Default)
        .with("P2", "P2-中级", Status::Processing)
        .with("P3", "P3-高级", Status::Success)
        .with("P4", "P4-专家", Status::Warning)
        .with("M1", "M1-主管", Status::Success)
        .with("M2", "M2-经理", Status::Success)
        .with("M3", "M3-总监", Status::Success)
}

/// Buttons of one position. Only actions the page handles are offered.
fn action_cell(position: &Position, handlers: &ActionHandlers<Position>) -> Cell {
    let toggle = if position.is_active() {
        RowAction::Disable
    } else {
        RowAction::Enable
    };
    let buttons = [
        ActionButton::new(RowAction::View).label("查看详情"),
        ActionButton::new(RowAction::Edit),
        ActionButton::new(RowAction::ViewUsers).label("查看人员"),
        ActionButton::new(toggle),
        ActionButton::new(RowAction::Delete),
    ];
    Cell::actions(
        buttons
            .into_iter()
            .filter(|button| handlers.contains(button.action)),
    )
}

pub fn columns() -> Vec<ColumnDescriptor<Position>> {
    vec![
        ColumnDescriptor::new("name", "岗位名称"),
        ColumnDescriptor::new("code", "岗位编码")
            .render(|value, _, _, _| Cell::emphasis(value.to_string())),
        ColumnDescriptor::new("department", "所属部门")
            .value_type(ValueType::Select)
            .value_enum(departments()),
        ColumnDescriptor::new("level", "岗位级别")
            .value_type(ValueType::Select)
            .value_enum(levels()),
        ColumnDescriptor::new("userCount", "在职人数").hide_in_search().sortable(),
        ColumnDescriptor::new("status", "状态")
            .value_type(ValueType::Select)
            .filterable()
            .value_enum(statuses()),
        ColumnDescriptor::new("description", "岗位描述").field_props(FieldProps {
            placeholder: Some("请输入描述关键字".to_owned()),
            ..FieldProps::default()
        }),
        ColumnDescriptor::new("requirements", "任职要求").hide_in_table().hide_in_search(),
        ColumnDescriptor::new("createTime", "创建时间")
            .value_type(ValueType::DateTime)
            .hide_in_search()
            .sortable(),
        ColumnDescriptor::actions("操作", |_, position: &Position, _, handlers| {
            action_cell(position, handlers)
        }),
    ]
}

pub fn mock_positions() -> Vec<Position> {
    let position = |id,
                    name: &str,
                    code: &str,
                    department: &str,
                    level: &str,
                    description: &str,
                    requirements: &str,
                    user_count,
                    status: &str,
                    time: &str| Position {
        id,
        name: name.to_owned(),
        code: code.to_owned(),
        department: department.to_owned(),
        level: level.to_owned(),
        description: description.to_owned(),
        requirements: requirements.to_owned(),
        user_count,
        status: status.to_owned(),
        create_time: time.to_owned(),
    };
    vec![
        position(
            1,
            "前端开发工程师",
            "FE001",
            "技术部",
            "P2",
            "负责前端页面开发和用户交互优化",
            "熟练掌握React、Vue等前端框架，具备良好的编程基础",
            8,
            "正常",
            "2024-01-15 10:30:00",
        ),
        position(
            2,
            "后端开发工程师",
            "BE001",
            "技术部",
            "P3",
            "负责后端服务开发和系统架构设计",
            "熟练掌握Java、Python等后端语言，具备分布式系统经验",
            12,
            "正常",
            "2024-01-10 14:20:00",
        ),
        position(
            3,
            "产品经理",
            "PM001",
            "产品部",
            "P3",
            "负责产品规划和需求分析",
            "具备产品思维和用户体验意识，熟悉产品设计流程",
            5,
            "正常",
            "2024-01-08 09:15:00",
        ),
        position(
            4,
            "UI设计师",
            "UI001",
            "设计部",
            "P2",
            "负责界面设计和视觉效果优化",
            "熟练使用Figma、Sketch等设计工具，具备良好的审美能力",
            3,
            "正常",
            "2024-01-05 16:45:00",
        ),
        position(
            5,
            "技术总监",
            "TD001",
            "技术部",
            "M3",
            "负责技术团队管理和技术决策",
            "具备丰富的技术管理经验和团队领导能力",
            1,
            "正常",
            "2024-01-01 08:00:00",
        ),
        position(
            6,
            "测试工程师",
            "QA001",
            "技术部",
            "P2",
            "负责软件测试和质量保证",
            "熟悉测试流程和自动化测试工具",
            4,
            "禁用",
            "2023-12-20 11:30:00",
        ),
    ]
}

pub struct PositionsPage {
    list: ListPage<Position>,
}

impl PositionsPage {
    pub fn new(config: &AdminConfig) -> Self {
        Self::with_positions(mock_positions(), config)
    }

    pub fn with_positions(positions: Vec<Position>, config: &AdminConfig) -> Self {
        let list = ListPage::new("positions", columns(), positions, config)
            .creatable()
            .handle(RowAction::View)
            .handle(RowAction::Edit)
            .handle(RowAction::ViewUsers)
            .handle(RowAction::Enable)
            .handle(RowAction::Disable)
            .handle(RowAction::Delete);
        Self { list }
    }

    pub fn list(&self) -> &ListPage<Position> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut ListPage<Position> {
        &mut self.list
    }

    pub fn ui(&mut self, ui: &mut Ui) {
        let actions = self.list.show(ui, |ui, positions| stat_cards(ui, &stats(positions)));
        for (action, id) in actions {
            self.apply(action, id);
        }
        self.list.editor_ui(ui);
    }

    pub fn apply(&mut self, action: RowAction, id: u32) {
        let Some(position) = self.list.records().iter().find(|p| p.id == id).cloned() else {
            log::debug!("position {id} no longer exists");
            return;
        };

        let notice = match action {
            RowAction::Delete | RowAction::Disable if position.user_count > 0 => {
                let verb = if action == RowAction::Delete { "删除" } else { "禁用" };
                Notice::error(format!(
                    "无法{verb}岗位\"{}\"，该岗位下还有{}名员工",
                    position.name, position.user_count
                ))
            }
            RowAction::Delete => {
                self.list.remove(id);
                Notice::success(format!("岗位\"{}\"已删除", position.name))
            }
            RowAction::Enable | RowAction::Disable => {
                let status = if action == RowAction::Enable { "正常" } else { "禁用" };
                if let Some(record) = self.list.record_mut(id) {
                    record.status = status.to_owned();
                }
                Notice::success(format!("岗位\"{}\"已{}", position.name, action.label()))
            }
            RowAction::View => {
                self.list.open_view(id);
                return;
            }
            RowAction::Edit => {
                self.list.open_edit(id);
                return;
            }
            RowAction::ViewUsers => Notice::success(format!(
                "查看岗位\"{}\"下的{}名员工",
                position.name, position.user_count
            )),
            other => {
                log::debug!("position action {other} is not handled");
                return;
            }
        };
        self.list.set_notice(notice);
    }
}

/// Staff per position, rounded to one decimal.
fn average_staff(positions: &[&Position]) -> f64 {
    if positions.is_empty() {
        return 0.0;
    }
    let staff: u32 = positions.iter().map(|p| p.user_count).sum();
    (f64::from(staff) / positions.len() as f64 * 10.0).round() / 10.0
}

fn stats(positions: &[&Position]) -> Vec<StatCard> {
    let active = positions.iter().filter(|p| p.is_active()).count();
    let staff: u32 = positions.iter().map(|p| p.user_count).sum();
    vec![
        StatCard::new("岗位总数", positions.len()),
        StatCard::new("活跃岗位", active),
        StatCard::new("在职人员", staff),
        StatCard::new("平均人数", average_staff(positions)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staffed_positions_cannot_be_deleted_or_disabled() {
        let mut page = PositionsPage::new(&AdminConfig::default());

        page.apply(RowAction::Delete, 1);
        assert_eq!(page.list().records().len(), 6);
        assert_eq!(
            page.list().notice().map(|notice| notice.text.as_str()),
            Some("无法删除岗位\"前端开发工程师\"，该岗位下还有8名员工")
        );

        page.apply(RowAction::Disable, 1);
        assert!(page.list().records()[0].is_active());
    }

    #[test]
    fn empty_positions_can_be_deleted() {
        let mut positions = mock_positions();
        positions[5].user_count = 0;
        let mut page = PositionsPage::with_positions(positions, &AdminConfig::default());

        page.apply(RowAction::Enable, 6);
        assert!(page.list().records()[5].is_active());
        page.apply(RowAction::Delete, 6);
        assert_eq!(page.list().records().len(), 5);
    }

    #[test]
    fn average_is_rounded_to_one_decimal() {
        let positions = mock_positions();
        let refs: Vec<&Position> = positions.iter().collect();
        // 33 staff over 6 positions
        assert!((average_staff(&refs) - 5.5).abs() < f64::EPSILON);
        assert_eq!(average_staff(&[]), 0.0);
    }

    #[test]
    fn action_buttons_follow_registered_handlers() {
        let position = &mock_positions()[5];
        let handlers = ActionHandlers::new().on(RowAction::Enable, |_: &Position| {});
        assert_eq!(
            action_cell(position, &handlers),
            Cell::actions([ActionButton::new(RowAction::Enable)])
        );
    }

    #[test]
    fn new_position_starts_without_staff() {
        let mut page = PositionsPage::new(&AdminConfig::default());
        page.list_mut().open_create();
        let form = page.list_mut().editor_mut().expect("create form is open");
        for (key, value) in [
            ("name", "运维工程师"),
            ("code", "OPS001"),
            ("department", "技术部"),
            ("level", "P2"),
        ] {
            form.set_value(key, value);
        }

        assert!(page.list_mut().save_editor());
        let position = page.list().records().last().expect("new position");
        assert_eq!((position.id, position.user_count), (7, 0));
        assert!(position.is_active());
        assert_eq!(
            page.list().notice().map(|notice| notice.text.as_str()),
            Some("岗位\"运维工程师\"已创建")
        );
    }

    #[test]
    fn level_must_be_chosen() {
        let mut page = PositionsPage::new(&AdminConfig::default());
        page.apply(RowAction::Edit, 2);
        page.list_mut()
            .editor_mut()
            .expect("edit form is open")
            .set_value("level", "");
        assert!(!page.list_mut().save_editor());
        assert_eq!(
            page.list().editor().and_then(|form| form.error("level")),
            Some("请选择岗位级别")
        );
    }
}
