//! Row actions and their handlers.

use std::collections::HashMap;
use std::fmt;

use ustr::Ustr;

/// An operation offered on a single row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowAction {
    View,
    Edit,
    Delete,
    Enable,
    Disable,
    ViewUsers,
    AssignRole,
    Custom(Ustr),
}

impl RowAction {
    pub fn custom(name: &str) -> Self {
        Self::Custom(Ustr::from(name))
    }

    pub fn name(&self) -> &str {
        match self {
            Self::View => "view",
            Self::Edit => "edit",
            Self::Delete => "delete",
            Self::Enable => "enable",
            Self::Disable => "disable",
            Self::ViewUsers => "view_users",
            Self::AssignRole => "assign_role",
            Self::Custom(name) => name.as_str(),
        }
    }

    /// Button text used when a renderer does not supply its own.
    pub fn label(&self) -> &str {
        match self {
            Self::View => "查看",
            Self::Edit => "编辑",
            Self::Delete => "删除",
            Self::Enable => "启用",
            Self::Disable => "禁用",
            Self::ViewUsers => "查看用户",
            Self::AssignRole => "分配角色",
            Self::Custom(name) => name.as_str(),
        }
    }
}

impl fmt::Display for RowAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

type Handler<R> = Box<dyn Fn(&R)>;

/// Partial mapping from row actions to callbacks.
///
/// Dispatching an action without a handler does nothing.
pub struct ActionHandlers<R> {
    handlers: HashMap<RowAction, Handler<R>>,
}

impl<R> Default for ActionHandlers<R> {
    fn default() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }
}

impl<R> ActionHandlers<R> {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn on(mut self, action: RowAction, handler: impl Fn(&R) + 'static) -> Self {
        self.insert(action, handler);
        self
    }

    pub fn insert(&mut self, action: RowAction, handler: impl Fn(&R) + 'static) {
        self.handlers.insert(action, Box::new(handler));
    }

    pub fn contains(&self, action: RowAction) -> bool {
        self.handlers.contains_key(&action)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Runs the handler of `action` for `record`. Returns whether one ran.
    pub fn dispatch(&self, action: RowAction, record: &R) -> bool {
        match self.handlers.get(&action) {
            Some(handler) => {
                log::debug!("dispatching row action {action}");
                handler(record);
                true
            }
            None => {
                log::debug!("no handler for row action {action}");
                false
            }
        }
    }
}

impl<R> fmt::Debug for ActionHandlers<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.handlers.keys()).finish()
    }
}
