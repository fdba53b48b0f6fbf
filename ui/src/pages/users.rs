//! 用户管理: user accounts with role and status.

use egui::Ui;
use yishan_business::search::{FormValues, InputKind, SearchField, email_validator};
use yishan_business::table::{ActionButton, Cell, RowAction};
use yishan_business::{
    AdminConfig, CellValue, ColumnDescriptor, FieldValue, Record, Status, ValueEnum, ValueType,
};

use super::list::{EditableRecord, ListPage, ListRecord, Notice, timestamp_now};
use crate::utils::colors::{COLOR_GREEN, COLOR_RED};
use crate::widgets::{StatCard, stat_cards};

const DEPARTMENTS: [&str; 4] = ["技术部", "市场部", "财务部", "人事部"];
const ROLES: [(&str, &str, Status); 3] = [
    ("admin", "管理员", Status::Processing),
    ("user", "普通用户", Status::Default),
    ("editor", "编辑", Status::Success),
];
const STATUSES: [(&str, &str, Status); 2] = [
    ("active", "启用", Status::Success),
    ("inactive", "禁用", Status::Default),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: u32,
    pub username: String,
    pub name: String,
    pub department: String,
    pub role: String,
    pub status: String,
    pub email: String,
    pub phone: String,
    pub create_time: String,
}

impl Record for User {
    fn cell(&self, key: &str) -> CellValue {
        match key {
            "id" => self.id.into(),
            "username" => (&self.username).into(),
            "name" => (&self.name).into(),
            "department" => (&self.department).into(),
            "role" => (&self.role).into(),
            "status" => (&self.status).into(),
            "email" => (&self.email).into(),
            "phone" => (&self.phone).into(),
            "createTime" => (&self.create_time).into(),
            _ => CellValue::Null,
        }
    }
}

impl ListRecord for User {
    fn id(&self) -> u32 {
        self.id
    }
}

impl EditableRecord for User {
    const NOUN: &'static str = "用户";

    fn display_name(&self) -> &str {
        &self.name
    }

    fn form_fields() -> Vec<SearchField> {
        vec![
            SearchField::new("username", "用户名", InputKind::Input).required(),
            SearchField::new("name", "姓名", InputKind::Input).required(),
            SearchField::new("email", "邮箱", InputKind::Email)
                .required()
                .with_validator(email_validator("请输入有效的邮箱地址")),
            SearchField::new("phone", "手机号", InputKind::Tel).required(),
            SearchField::new("department", "部门", InputKind::Select)
                .required()
                .with_options(DEPARTMENTS.map(|name| (name, name))),
            SearchField::new("role", "角色", InputKind::Select)
                .required()
                .with_options(ROLES.map(|(value, label, _)| (value, label))),
            SearchField::new("status", "状态", InputKind::Select)
                .required()
                .with_options(STATUSES.map(|(value, label, _)| (value, label))),
        ]
    }

    fn form_values(&self) -> Vec<(&'static str, FieldValue)> {
        vec![
            ("username", self.username.clone().into()),
            ("name", self.name.clone().into()),
            ("email", self.email.clone().into()),
            ("phone", self.phone.clone().into()),
            ("department", self.department.clone().into()),
            ("role", self.role.clone().into()),
            ("status", self.status.clone().into()),
        ]
    }

    fn form_defaults() -> Vec<(&'static str, FieldValue)> {
        vec![("status", "active".into())]
    }

    fn from_form(id: u32, values: &FormValues, previous: Option<&Self>) -> Self {
        Self {
            id,
            username: values.text("username"),
            name: values.text("name"),
            department: values.text("department"),
            role: values.text("role"),
            status: values.text("status"),
            email: values.text("email"),
            phone: values.text("phone"),
            create_time: previous.map_or_else(timestamp_now, |user| user.create_time.clone()),
        }
    }
}

impl User {
    pub fn is_active(&self) -> bool {
        self.status == "active"
    }
}

fn value_enum(entries: &[(&str, &str, Status)]) -> ValueEnum {
    entries
        .iter()
        .fold(ValueEnum::new(), |values, (value, label, status)| {
            values.with(*value, *label, *status)
        })
}

pub fn columns() -> Vec<ColumnDescriptor<User>> {
    vec![
        ColumnDescriptor::new("username", "用户名").order(4),
        ColumnDescriptor::new("name", "姓名").order(3),
        ColumnDescriptor::new("department", "部门")
            .value_type(ValueType::Select)
            .order(2)
            .value_enum(value_enum(&DEPARTMENTS.map(|name| (name, name, Status::Default)))),
        ColumnDescriptor::new("role", "角色")
            .value_type(ValueType::Select)
            .order(1)
            .value_enum(value_enum(&ROLES)),
        ColumnDescriptor::new("status", "状态")
            .value_type(ValueType::Select)
            .order(5)
            .filterable()
            .value_enum(value_enum(&STATUSES)),
        ColumnDescriptor::new("email", "邮箱").order(6),
        ColumnDescriptor::new("phone", "电话").hide_in_search(),
        ColumnDescriptor::new("createTime", "创建时间")
            .value_type(ValueType::DateTime)
            .hide_in_search()
            .sortable(),
        ColumnDescriptor::actions("操作", |_, user: &User, _, _| {
            let toggle = if user.is_active() {
                RowAction::Disable
            } else {
                RowAction::Enable
            };
            Cell::actions([
                ActionButton::new(RowAction::Edit),
                ActionButton::new(toggle),
                ActionButton::new(RowAction::Delete),
            ])
        }),
    ]
}

pub fn mock_users() -> Vec<User> {
    let user = |id,
                username: &str,
                name: &str,
                department: &str,
                role: &str,
                status: &str,
                time: &str| User {
        id,
        username: username.to_owned(),
        name: name.to_owned(),
        department: department.to_owned(),
        role: role.to_owned(),
        status: status.to_owned(),
        email: format!("{username}@yishan.com"),
        phone: format!("1380013800{}", id - 1),
        create_time: time.to_owned(),
    };
    vec![
        user(1, "admin", "系统管理员", "技术部", "admin", "active", "2024-01-01 10:00:00"),
        user(2, "zhangsan", "张三", "技术部", "editor", "active", "2024-01-15 14:30:00"),
        user(3, "lisi", "李四", "市场部", "user", "active", "2024-02-01 09:15:00"),
        user(4, "wangwu", "王五", "财务部", "user", "inactive", "2024-02-15 16:45:00"),
        user(5, "zhaoliu", "赵六", "人事部", "user", "active", "2024-03-01 11:20:00"),
    ]
}

pub struct UsersPage {
    list: ListPage<User>,
}

impl UsersPage {
    pub fn new(config: &AdminConfig) -> Self {
        Self::with_users(mock_users(), config)
    }

    pub fn with_users(users: Vec<User>, config: &AdminConfig) -> Self {
        let list = ListPage::new("users", columns(), users, config)
            .creatable()
            .handle(RowAction::Edit)
            .handle(RowAction::Enable)
            .handle(RowAction::Disable)
            .handle(RowAction::Delete)
            .selectable();
        Self { list }
    }

    pub fn list(&self) -> &ListPage<User> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut ListPage<User> {
        &mut self.list
    }

    pub fn ui(&mut self, ui: &mut Ui) {
        let actions = self.list.show(ui, |ui, users| stat_cards(ui, &stats(users)));
        for (action, id) in actions {
            self.apply(action, id);
        }
        self.list.editor_ui(ui);
    }

    /// Applies a row action to the in-memory users.
    pub fn apply(&mut self, action: RowAction, id: u32) {
        let notice = match action {
            RowAction::Edit => {
                if !self.list.open_edit(id) {
                    log::debug!("user {id} no longer exists");
                }
                return;
            }
            RowAction::Delete => self
                .list
                .remove(id)
                .map(|user| Notice::success(format!("用户\"{}\"已删除", user.name))),
            RowAction::Enable | RowAction::Disable => {
                let status = if action == RowAction::Enable { "active" } else { "inactive" };
                self.list.record_mut(id).map(|user| {
                    user.status = status.to_owned();
                    Notice::success(format!("用户\"{}\"已{}", user.name, action.label()))
                })
            }
            other => {
                log::debug!("user action {other} is not handled");
                return;
            }
        };
        match notice {
            Some(notice) => self.list.set_notice(notice),
            None => log::debug!("user {id} no longer exists"),
        }
    }
}

fn stats(users: &[&User]) -> Vec<StatCard> {
    let active = users.iter().filter(|user| user.is_active()).count();
    let mut departments: Vec<&str> = users.iter().map(|user| user.department.as_str()).collect();
    departments.sort_unstable();
    departments.dedup();

    vec![
        StatCard::new("总用户数", users.len()),
        StatCard::new("正常用户", active).hint("已启用", COLOR_GREEN),
        StatCard::new("禁用用户", users.len() - active).hint("已禁用", COLOR_RED),
        StatCard::new("部门数量", departments.len()),
    ]
}
