use yishan_business::AdminConfig;

use crate::pages::{AlertsPage, DepartmentsPage, PositionsPage, RolesPage, UsersPage};

/// Navigation entries of the side panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Dashboard,
    Alerts,
    Users,
    Roles,
    Departments,
    Positions,
}

impl Route {
    pub const ALL: [Route; 6] = [
        Route::Dashboard,
        Route::Alerts,
        Route::Users,
        Route::Roles,
        Route::Departments,
        Route::Positions,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Route::Dashboard => "仪表盘",
            Route::Alerts => "实时告警",
            Route::Users => "用户管理",
            Route::Roles => "角色管理",
            Route::Departments => "部门管理",
            Route::Positions => "岗位管理",
        }
    }
}

/// The main application state.
///
/// Every page keeps its own records, form and table state, so switching
/// routes does not lose searches or selections.
pub struct State {
    pub route: Route,
    pub config: AdminConfig,
    pub alerts: AlertsPage,
    pub users: UsersPage,
    pub roles: RolesPage,
    pub departments: DepartmentsPage,
    pub positions: PositionsPage,
}

impl State {
    pub fn new(config: AdminConfig) -> Self {
        Self {
            route: Route::default(),
            alerts: AlertsPage::new(&config),
            users: UsersPage::new(&config),
            roles: RolesPage::new(&config),
            departments: DepartmentsPage::new(&config),
            positions: PositionsPage::new(&config),
            config,
        }
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new(AdminConfig::default())
    }
}
