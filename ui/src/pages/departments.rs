//! 部门管理: the department tree flattened into a list.

use egui::Ui;
use yishan_business::search::{FormValues, InputKind, SearchField};
use yishan_business::table::{ActionButton, Cell, RowAction};
use yishan_business::{
    AdminConfig, CellValue, ColumnDescriptor, FieldValue, Record, Status, ValueEnum, ValueType,
};

use super::list::{EditableRecord, ListPage, ListRecord, Notice, timestamp_now};
use crate::widgets::{StatCard, stat_cards};

const PARENTS: [&str; 2] = ["总公司", "技术部"];
const STATUSES: [(&str, &str, Status); 2] = [
    ("normal", "正常", Status::Success),
    ("disabled", "禁用", Status::Default),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Department {
    pub id: u32,
    pub name: String,
    pub code: String,
    pub parent: String,
    pub leader: String,
    pub user_count: u32,
    pub status: String,
    pub description: String,
    pub create_time: String,
}

impl Record for Department {
    fn cell(&self, key: &str) -> CellValue {
        match key {
            "id" => self.id.into(),
            "name" => (&self.name).into(),
            "code" => (&self.code).into(),
            "parent" => (&self.parent).into(),
            "leader" => (&self.leader).into(),
            "userCount" => self.user_count.into(),
            "status" => (&self.status).into(),
            "description" => (&self.description).into(),
            "createTime" => (&self.create_time).into(),
            _ => CellValue::Null,
        }
    }
}

impl ListRecord for Department {
    fn id(&self) -> u32 {
        self.id
    }
}

impl EditableRecord for Department {
    const NOUN: &'static str = "部门";

    fn display_name(&self) -> &str {
        &self.name
    }

    fn form_fields() -> Vec<SearchField> {
        vec![
            SearchField::new("name", "部门名称", InputKind::Input).required(),
            SearchField::new("code", "部门编码", InputKind::Input).required(),
            SearchField::new("parent", "上级部门", InputKind::Select)
                .with_placeholder("无上级部门")
                .with_options(PARENTS.map(|name| (name, name))),
            SearchField::new("leader", "负责人", InputKind::Input).required(),
            SearchField::new("status", "状态", InputKind::Select)
                .required()
                .with_options(STATUSES.map(|(value, label, _)| (value, label))),
            SearchField::new("description", "描述", InputKind::Textarea),
        ]
    }

    fn form_values(&self) -> Vec<(&'static str, FieldValue)> {
        vec![
            ("name", self.name.clone().into()),
            ("code", self.code.clone().into()),
            ("parent", self.parent.clone().into()),
            ("leader", self.leader.clone().into()),
            ("status", self.status.clone().into()),
            ("description", self.description.clone().into()),
        ]
    }

    fn form_defaults() -> Vec<(&'static str, FieldValue)> {
        vec![("status", "normal".into())]
    }

    fn from_form(id: u32, values: &FormValues, previous: Option<&Self>) -> Self {
        Self {
            id,
            name: values.text("name"),
            code: values.text("code"),
            parent: values.text("parent"),
            leader: values.text("leader"),
            user_count: previous.map_or(0, |department| department.user_count),
            status: values.text("status"),
            description: values.text("description"),
            create_time: previous
                .map_or_else(timestamp_now, |department| department.create_time.clone()),
        }
    }
}

pub fn columns() -> Vec<ColumnDescriptor<Department>> {
    vec![
        ColumnDescriptor::new("name", "部门名称"),
        ColumnDescriptor::new("code", "部门编码")
            .render(|value, _, _, _| Cell::emphasis(value.to_string())),
        ColumnDescriptor::new("parent", "上级部门")
            .value_type(ValueType::Select)
            .value_enum(PARENTS.iter().fold(ValueEnum::new(), |values, name| {
                values.with(*name, *name, Status::Default)
            }))
            .render(|value, _, _, _| Cell::from_value(value)),
        ColumnDescriptor::new("leader", "负责人"),
        ColumnDescriptor::new("userCount", "人员数量").hide_in_search().sortable(),
        ColumnDescriptor::new("status", "状态")
            .value_type(ValueType::Select)
            .filterable()
            .value_enum(STATUSES.iter().fold(ValueEnum::new(), |values, entry| {
                values.with(entry.0, entry.1, entry.2)
            })),
        ColumnDescriptor::new("description", "描述").hide_in_search(),
        ColumnDescriptor::new("createTime", "创建时间")
            .value_type(ValueType::DateTime)
            .hide_in_search()
            .sortable(),
        ColumnDescriptor::actions("操作", |_, department: &Department, _, _| {
            let toggle = if department.status == "normal" {
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

pub fn mock_departments() -> Vec<Department> {
    let department = |id,
                      name: &str,
                      code: &str,
                      parent: &str,
                      leader: &str,
                      user_count,
                      description: &str,
                      time: &str| Department {
        id,
        name: name.to_owned(),
        code: code.to_owned(),
        parent: parent.to_owned(),
        leader: leader.to_owned(),
        user_count,
        status: "normal".to_owned(),
        description: description.to_owned(),
        create_time: time.to_owned(),
    };
    vec![
        department(
            1,
            "技术部",
            "tech",
            "总公司",
            "张三",
            8,
            "负责技术开发和系统维护",
            "2024-01-01 10:00:00",
        ),
        department(
            2,
            "市场部",
            "market",
            "总公司",
            "李四",
            5,
            "负责市场营销和客户拓展",
            "2024-01-01 10:00:00",
        ),
        department(
            3,
            "财务部",
            "finance",
            "总公司",
            "王五",
            3,
            "负责财务管理和会计核算",
            "2024-01-15 14:30:00",
        ),
        department(
            4,
            "人事部",
            "hr",
            "总公司",
            "赵六",
            4,
            "负责人力资源管理和行政事务",
            "2024-02-01 09:15:00",
        ),
        department(
            5,
            "前端组",
            "frontend",
            "技术部",
            "前端经理",
            3,
            "负责前端开发工作",
            "2024-02-15 16:45:00",
        ),
        department(
            6,
            "后端组",
            "backend",
            "技术部",
            "后端经理",
            4,
            "负责后端开发工作",
            "2024-02-15 16:45:00",
        ),
    ]
}

pub struct DepartmentsPage {
    list: ListPage<Department>,
}

impl DepartmentsPage {
    pub fn new(config: &AdminConfig) -> Self {
        let list = ListPage::new("departments", columns(), mock_departments(), config)
            .creatable()
            .handle(RowAction::Edit)
            .handle(RowAction::Enable)
            .handle(RowAction::Disable)
            .handle(RowAction::Delete);
        Self { list }
    }

    pub fn list(&self) -> &ListPage<Department> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut ListPage<Department> {
        &mut self.list
    }

    pub fn ui(&mut self, ui: &mut Ui) {
        let actions = self.list.show(ui, |ui, departments| {
            stat_cards(ui, &stats(departments));
        });
        for (action, id) in actions {
            self.apply(action, id);
        }
        self.list.editor_ui(ui);
    }

    pub fn apply(&mut self, action: RowAction, id: u32) {
        let Some(department) = self.list.records().iter().find(|d| d.id == id).cloned() else {
            log::debug!("department {id} no longer exists");
            return;
        };
        let has_children = self
            .list
            .records()
            .iter()
            .any(|d| d.parent == department.name);

        let notice = match action {
            RowAction::Delete if has_children => Notice::error(format!(
                "无法删除部门\"{}\"，请先删除其下级部门",
                department.name
            )),
            RowAction::Delete => {
                self.list.remove(id);
                Notice::success(format!("部门\"{}\"已删除", department.name))
            }
            RowAction::Enable | RowAction::Disable => {
                let status = if action == RowAction::Enable { "normal" } else { "disabled" };
                if let Some(record) = self.list.record_mut(id) {
                    record.status = status.to_owned();
                }
                Notice::success(format!("部门\"{}\"已{}", department.name, action.label()))
            }
            RowAction::Edit => {
                self.list.open_edit(id);
                return;
            }
            other => {
                log::debug!("department action {other} is not handled");
                return;
            }
        };
        self.list.set_notice(notice);
    }
}

fn stats(departments: &[&Department]) -> Vec<StatCard> {
    let normal = departments.iter().filter(|d| d.status == "normal").count();
    let members: u32 = departments.iter().map(|d| d.user_count).sum();
    vec![
        StatCard::new("部门总数", departments.len()),
        StatCard::new("正常部门", normal),
        StatCard::new("停用部门", departments.len() - normal),
        StatCard::new("总人数", members),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parents_with_children_are_kept() {
        let mut page = DepartmentsPage::new(&AdminConfig::default());
        page.apply(RowAction::Delete, 1);
        assert_eq!(page.list().records().len(), 6);

        page.apply(RowAction::Delete, 5);
        assert_eq!(page.list().records().len(), 5);
    }

    #[test]
    fn stats_sum_members() {
        let departments = mock_departments();
        let refs: Vec<&Department> = departments.iter().collect();
        assert_eq!(stats(&refs)[3].value, "27");
    }

    #[test]
    fn edit_can_clear_the_parent() {
        let mut page = DepartmentsPage::new(&AdminConfig::default());
        page.apply(RowAction::Edit, 5);
        let form = page.list_mut().editor_mut().expect("edit form is open");
        assert_eq!(form.value("parent"), Some(&FieldValue::from("技术部")));
        form.set_value("parent", "");
        form.set_value("leader", " ");

        assert!(!page.list_mut().save_editor());
        page.list_mut()
            .editor_mut()
            .expect("leader is required")
            .set_value("leader", "周九");
        assert!(page.list_mut().save_editor());

        let department = &page.list().records()[4];
        assert_eq!(department.parent, "");
        assert_eq!(department.leader, "周九");
        assert_eq!(department.user_count, 3);
    }
}
