use std::env::vars;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::pagination::{DEFAULT_SIBLING_COUNT, MAX_SIBLING_COUNT};
use crate::search::{LayoutMode, SearchFormConfig};
use crate::table::{DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS, TableState};

/// Environment variable prefix of the console settings.
const ENV_PREFIX: &str = "YISHAN";

/// Validated console-wide defaults for list pages.
#[derive(Debug, Clone, PartialEq)]
pub struct AdminConfig {
    page_size: usize,
    search_layout: LayoutMode,
    default_collapsed: bool,
    sibling_count: usize,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            search_layout: LayoutMode::Horizontal,
            default_collapsed: true,
            sibling_count: DEFAULT_SIBLING_COUNT,
        }
    }
}

// Every setting is optional; unset ones take the defaults above.
#[derive(Debug, Default, Deserialize)]
pub struct RawAdminConfig {
    pub page_size: Option<usize>,
    pub search_layout: Option<String>,
    pub default_collapsed: Option<bool>,
    pub sibling_count: Option<usize>,
}

impl AdminConfig {
    /// Reads `YISHAN_*` environment variables.
    pub fn init() -> anyhow::Result<Self> {
        log::info!("Loading console configuration from environment variables");
        let raw: RawAdminConfig = serde_env::from_iter_with_prefix(vars(), ENV_PREFIX)?;
        Self::from_raw(raw)
    }

    pub fn from_raw(raw: RawAdminConfig) -> anyhow::Result<Self> {
        let RawAdminConfig {
            page_size,
            search_layout,
            default_collapsed,
            sibling_count,
        } = raw;
        let defaults = Self::default();

        let page_size = page_size.unwrap_or(defaults.page_size);
        if !PAGE_SIZE_OPTIONS.contains(&page_size) {
            return Err(ConfigError::PageSize(page_size, PAGE_SIZE_OPTIONS).into());
        }
        let search_layout = match search_layout {
            Some(layout) => layout.parse::<LayoutMode>()?,
            None => defaults.search_layout,
        };

        let sibling_count = sibling_count.unwrap_or(defaults.sibling_count);
        if sibling_count > MAX_SIBLING_COUNT {
            return Err(ConfigError::SiblingCount(sibling_count, MAX_SIBLING_COUNT).into());
        }

        let config = Self {
            page_size,
            search_layout,
            default_collapsed: default_collapsed.unwrap_or(defaults.default_collapsed),
            sibling_count,
        };
        log::debug!("console configuration: {config:?}");
        Ok(config)
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn search_layout(&self) -> LayoutMode {
        self.search_layout
    }

    pub fn default_collapsed(&self) -> bool {
        self.default_collapsed
    }

    pub fn sibling_count(&self) -> usize {
        self.sibling_count
    }

    /// Search form options carrying the configured defaults.
    pub fn search_form_config(&self) -> SearchFormConfig {
        SearchFormConfig {
            layout: self.search_layout,
            default_collapsed: self.default_collapsed,
            ..SearchFormConfig::default()
        }
    }

    /// A fresh table state with the configured page size and pager width.
    pub fn table_state(&self) -> TableState {
        let mut state = TableState::new().with_sibling_count(self.sibling_count);
        if let Err(err) = state.set_page_size(self.page_size) {
            log::warn!("{err}");
        }
        state
    }
}
