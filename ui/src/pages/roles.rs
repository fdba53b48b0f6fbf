//! 角色管理: roles, their permissions and member counts.

use std::rc::Rc;

use egui::Ui;
use yishan_business::search::{FormValues, InputKind, RecordForm, SearchField, identifier_validator};
use yishan_business::table::{ActionButton, Cell, RowAction};
use yishan_business::{
    AdminConfig, CellValue, ColumnDescriptor, FieldValue, Record, Status, ValueEnum, ValueType,
};

use super::list::{EditableRecord, ListPage, ListRecord, Notice, timestamp_now};
use crate::widgets::{StatCard, stat_cards};

/// Permissions listed in the table before the rest collapse into `+N`.
const SHOWN_PERMISSIONS: usize = 3;
const PERMISSION_SEPARATOR: &str = "、";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    pub id: u32,
    pub name: String,
    pub code: String,
    pub status: String,
    pub description: String,
    pub user_count: u32,
    pub create_time: String,
    pub permissions: Vec<String>,
}

impl Record for Role {
    fn cell(&self, key: &str) -> CellValue {
        match key {
            "id" => self.id.into(),
            "name" => (&self.name).into(),
            "code" => (&self.code).into(),
            "status" => (&self.status).into(),
            "description" => (&self.description).into(),
            "userCount" => self.user_count.into(),
            "createTime" => (&self.create_time).into(),
            "permissions" => self.permissions.join(PERMISSION_SEPARATOR).into(),
            _ => CellValue::Null,
        }
    }
}

impl ListRecord for Role {
    fn id(&self) -> u32 {
        self.id
    }
}

impl EditableRecord for Role {
    const NOUN: &'static str = "角色";

    fn display_name(&self) -> &str {
        &self.name
    }

    fn form_fields() -> Vec<SearchField> {
        vec![
            SearchField::new("name", "角色名称", InputKind::Input).required(),
            SearchField::new("code", "角色编码", InputKind::Input)
                .required()
                .with_validator(identifier_validator(
                    "角色编码不能为空",
                    "角色编码只能包含字母、数字和下划线",
                )),
            SearchField::new("status", "状态", InputKind::Select)
                .required()
                .with_options([("正常", "正常"), ("禁用", "禁用")]),
            SearchField::new("description", "描述", InputKind::Textarea),
            permissions_field(),
        ]
    }

    fn form_values(&self) -> Vec<(&'static str, FieldValue)> {
        vec![
            ("name", self.name.clone().into()),
            ("code", self.code.clone().into()),
            ("status", self.status.clone().into()),
            ("description", self.description.clone().into()),
            ("permissions", self.permissions.join(PERMISSION_SEPARATOR).into()),
        ]
    }

    fn form_defaults() -> Vec<(&'static str, FieldValue)> {
        vec![("status", "正常".into())]
    }

    fn from_form(id: u32, values: &FormValues, previous: Option<&Self>) -> Self {
        let keep = |key: &str, field: fn(&Self) -> &str| {
            values.text_or(key, previous.map_or("", field))
        };
        let permissions = if values.contains("permissions") {
            split_permissions(&values.text("permissions"))
        } else {
            previous.map(|role| role.permissions.clone()).unwrap_or_default()
        };
        Self {
            id,
            name: keep("name", |role| &role.name),
            code: keep("code", |role| &role.code),
            status: keep("status", |role| &role.status),
            description: keep("description", |role| &role.description),
            user_count: previous.map_or(0, |role| role.user_count),
            create_time: previous.map_or_else(timestamp_now, |role| role.create_time.clone()),
            permissions,
        }
    }
}

fn permissions_field() -> SearchField {
    SearchField::new("permissions", "权限配置", InputKind::Textarea)
        .with_placeholder("多个权限以、分隔，如 用户管理、数据查看")
        .with_validator(Rc::new(|value: &FieldValue| {
            if split_permissions(value.as_text().unwrap_or_default()).is_empty() {
                Err("请至少选择一个权限".to_owned())
            } else {
                Ok(())
            }
        }))
}

/// Splits on `、`, `,` and `，`, dropping blanks and repeats.
fn split_permissions(text: &str) -> Vec<String> {
    let mut permissions: Vec<String> = Vec::new();
    for permission in text.split(['、', ',', '，']).map(str::trim) {
        if !permission.is_empty() && !permissions.iter().any(|p| p == permission) {
            permissions.push(permission.to_owned());
        }
    }
    permissions
}

/// First permissions, then `+N` for the rest.
fn permission_summary(permissions: &[String]) -> String {
    let mut summary = permissions
        .iter()
        .take(SHOWN_PERMISSIONS)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(PERMISSION_SEPARATOR);
    if permissions.len() > SHOWN_PERMISSIONS {
        summary.push_str(&format!(" +{}", permissions.len() - SHOWN_PERMISSIONS));
    }
    summary
}

pub fn columns() -> Vec<ColumnDescriptor<Role>> {
    vec![
        ColumnDescriptor::new("name", "角色名称"),
        ColumnDescriptor::new("code", "角色编码")
            .render(|value, _, _, _| Cell::emphasis(value.to_string())),
        ColumnDescriptor::new("status", "状态")
            .value_type(ValueType::Select)
            .filterable()
            .value_enum(
                ValueEnum::new()
                    .with("正常", "正常", Status::Success)
                    .with("禁用", "禁用", Status::Error),
            ),
        ColumnDescriptor::new("userCount", "用户数量").hide_in_search().sortable(),
        ColumnDescriptor::new("permissions", "权限")
            .hide_in_search()
            .render(|_, role: &Role, _, _| Cell::text(permission_summary(&role.permissions))),
        ColumnDescriptor::new("description", "描述").hide_in_search(),
        ColumnDescriptor::new("createTime", "创建时间")
            .value_type(ValueType::DateTime)
            .hide_in_search()
            .sortable(),
        ColumnDescriptor::actions("操作", |_, _: &Role, _, _| {
            Cell::actions([
                ActionButton::new(RowAction::View),
                ActionButton::new(RowAction::Edit),
                ActionButton::new(RowAction::AssignRole).label("分配权限"),
                ActionButton::new(RowAction::ViewUsers),
                ActionButton::new(RowAction::Delete),
            ])
        }),
    ]
}

pub fn mock_roles() -> Vec<Role> {
    let role = |id,
                name: &str,
                code: &str,
                status: &str,
                description: &str,
                user_count,
                time: &str,
                permissions: &[&str]| Role {
        id,
        name: name.to_owned(),
        code: code.to_owned(),
        status: status.to_owned(),
        description: description.to_owned(),
        user_count,
        create_time: time.to_owned(),
        permissions: permissions.iter().map(|p| (*p).to_owned()).collect(),
    };
    vec![
        role(
            1,
            "超级管理员",
            "admin",
            "正常",
            "系统最高权限管理员",
            1,
            "2024-01-01 10:00:00",
            &["用户管理", "角色管理", "部门管理", "系统设置", "数据查看", "数据操作"],
        ),
        role(
            2,
            "系统管理员",
            "system",
            "正常",
            "系统配置和管理员",
            2,
            "2024-01-01 10:00:00",
            &["用户管理", "角色管理", "部门管理", "系统设置"],
        ),
        role(
            3,
            "部门经理",
            "manager",
            "正常",
            "部门级别的管理人员",
            4,
            "2024-01-15 14:30:00",
            &["用户管理", "数据查看"],
        ),
        role(
            4,
            "普通员工",
            "user",
            "正常",
            "普通系统用户",
            15,
            "2024-02-01 09:15:00",
            &["数据查看"],
        ),
        role(
            5,
            "访客",
            "guest",
            "禁用",
            "只读访问用户",
            0,
            "2024-02-15 16:45:00",
            &["基础查看"],
        ),
    ]
}

pub struct RolesPage {
    list: ListPage<Role>,
}

impl RolesPage {
    pub fn new(config: &AdminConfig) -> Self {
        let list = ListPage::new("roles", columns(), mock_roles(), config)
            .creatable()
            .handle(RowAction::View)
            .handle(RowAction::Edit)
            .handle(RowAction::AssignRole)
            .handle(RowAction::ViewUsers)
            .handle(RowAction::Delete);
        Self { list }
    }

    pub fn list(&self) -> &ListPage<Role> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut ListPage<Role> {
        &mut self.list
    }

    pub fn ui(&mut self, ui: &mut Ui) {
        let actions = self.list.show(ui, |ui, roles| stat_cards(ui, &stats(roles)));
        for (action, id) in actions {
            self.apply(action, id);
        }
        self.list.editor_ui(ui);
    }

    pub fn apply(&mut self, action: RowAction, id: u32) {
        let Some(role) = self.list.records().iter().find(|role| role.id == id).cloned() else {
            log::debug!("role {id} no longer exists");
            return;
        };
        let notice = match action {
            RowAction::Delete if role.user_count > 0 => Notice::error(format!(
                "无法删除角色\"{}\"，该角色下还有{}名用户",
                role.name, role.user_count
            )),
            RowAction::Delete => {
                self.list.remove(id);
                Notice::success(format!("角色\"{}\"已删除", role.name))
            }
            RowAction::ViewUsers => Notice::success(format!(
                "角色\"{}\"下共有{}名用户",
                role.name, role.user_count
            )),
            RowAction::View => {
                self.list.open_view(id);
                return;
            }
            RowAction::Edit => {
                self.list.open_edit(id);
                return;
            }
            RowAction::AssignRole => {
                let form = RecordForm::edit(id, vec![permissions_field()])
                    .with_title(format!("分配权限 - {}", role.name))
                    .with_values(role.form_values());
                self.list.open_form(form);
                return;
            }
            other => {
                log::debug!("role action {other} is not handled");
                return;
            }
        };
        self.list.set_notice(notice);
    }
}

fn stats(roles: &[&Role]) -> Vec<StatCard> {
    let active = roles.iter().filter(|role| role.status == "正常").count();
    let members: u32 = roles.iter().map(|role| role.user_count).sum();
    vec![
        StatCard::new("角色总数", roles.len()),
        StatCard::new("启用角色", active),
        StatCard::new("禁用角色", roles.len() - active),
        StatCard::new("关联用户", members),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_permission_lists_collapse() {
        let roles = mock_roles();
        assert_eq!(permission_summary(&roles[0].permissions), "用户管理、角色管理、部门管理 +3");
        assert_eq!(permission_summary(&roles[2].permissions), "用户管理、数据查看");
    }

    #[test]
    fn roles_with_members_are_kept() {
        let mut page = RolesPage::new(&AdminConfig::default());
        page.apply(RowAction::Delete, 1);
        assert_eq!(page.list().records().len(), 5);
        assert!(page.list().notice().is_some_and(|notice| notice.is_error));

        page.apply(RowAction::Delete, 5);
        assert_eq!(page.list().records().len(), 4);
    }

    #[test]
    fn permissions_split_on_common_separators() {
        assert_eq!(
            split_permissions(" 用户管理、数据查看,数据查看，报表导出、 "),
            ["用户管理", "数据查看", "报表导出"]
        );
        assert!(split_permissions(" 、 ").is_empty());
    }

    #[test]
    fn assigning_permissions_keeps_the_other_fields() {
        let mut page = RolesPage::new(&AdminConfig::default());
        page.apply(RowAction::AssignRole, 3);
        let form = page.list_mut().editor_mut().expect("permission form is open");
        assert_eq!(form.title(), Some("分配权限 - 部门经理"));
        assert_eq!(form.fields().len(), 1);

        form.set_value("permissions", "");
        assert!(!page.list_mut().save_editor());
        assert_eq!(
            page.list().editor().and_then(|form| form.error("permissions")),
            Some("请至少选择一个权限")
        );

        page.list_mut()
            .editor_mut()
            .expect("still open")
            .set_value("permissions", "数据查看、报表查看");
        assert!(page.list_mut().save_editor());
        let role = &page.list().records()[2];
        assert_eq!(role.permissions, ["数据查看", "报表查看"]);
        assert_eq!((role.name.as_str(), role.code.as_str()), ("部门经理", "manager"));
        assert_eq!(role.user_count, 4);
    }

    #[test]
    fn role_code_must_be_an_identifier() {
        let mut page = RolesPage::new(&AdminConfig::default());
        page.apply(RowAction::Edit, 2);
        page.list_mut()
            .editor_mut()
            .expect("edit form is open")
            .set_value("code", "sys-admin");
        assert!(!page.list_mut().save_editor());
        assert_eq!(
            page.list().editor().and_then(|form| form.error("code")),
            Some("角色编码只能包含字母、数字和下划线")
        );
    }

    #[test]
    fn view_opens_read_only_details() {
        let mut page = RolesPage::new(&AdminConfig::default());
        page.apply(RowAction::View, 1);
        let form = page.list().editor().expect("details are open");
        assert!(form.is_read_only());
        assert_eq!(form.value("code"), Some(&FieldValue::from("admin")));
    }
}
