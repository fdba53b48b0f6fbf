//! Pages of the admin shell, one per navigation entry.
//!
//! - `dashboard`: static overview with shortcuts into the list pages
//! - `alerts`: live alerts with acknowledge and resolve
//! - `list`: the column-driven scaffold shared by every list page, with its
//!   create/edit dialog
//! - `users`, `roles`, `departments`, `positions`: mock-backed list pages

pub mod alerts;
pub mod dashboard;
pub mod departments;
pub mod list;
pub mod positions;
pub mod roles;
pub mod users;

pub use alerts::AlertsPage;
pub use dashboard::dashboard;
pub use departments::DepartmentsPage;
pub use list::{EditableRecord, ListPage, ListRecord, Notice, PageEvent};
pub use positions::PositionsPage;
pub use roles::RolesPage;
pub use users::UsersPage;
